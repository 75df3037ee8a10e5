pub use sea_orm_migration::prelude::*;

mod m20260701_090000_users;
mod m20260701_091000_auth_sessions;
mod m20260701_100000_catalog;
mod m20260701_110000_bookings;
mod m20260701_120000_billing;
mod m20260701_130000_campaigns;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260701_090000_users::Migration),
            Box::new(m20260701_091000_auth_sessions::Migration),
            Box::new(m20260701_100000_catalog::Migration),
            Box::new(m20260701_110000_bookings::Migration),
            Box::new(m20260701_120000_billing::Migration),
            Box::new(m20260701_130000_campaigns::Migration),
        ]
    }
}
