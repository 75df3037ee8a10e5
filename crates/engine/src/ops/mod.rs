use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

mod billing;
mod bookings;
mod campaigns;
mod customers;
mod events;
mod facilitators;
mod reports;
mod sessions;

pub use billing::FinancialSummary;
pub use customers::CustomerTotals;
pub use reports::{FinancialData, MonthlyRevenue, SeasonTotals, ServiceRevenue};

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[derive(Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }
}

fn parse_id(value: &str, label: &str) -> ResultEngine<Uuid> {
    Uuid::parse_str(value.trim()).map_err(|_| EngineError::KeyNotFound(label.to_string()))
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or("").is_empty()
}

fn required<T>(value: Option<T>, label: &'static str) -> ResultEngine<T> {
    value.ok_or_else(|| {
        EngineError::Validation(format!("missing required fields: {label}"))
    })
}

fn required_text(value: Option<String>, label: &'static str) -> ResultEngine<String> {
    match value.as_deref().map(str::trim) {
        Some(trimmed) if !trimmed.is_empty() => Ok(trimmed.to_string()),
        _ => Err(EngineError::Validation(format!(
            "missing required fields: {label}"
        ))),
    }
}

fn missing_fields(missing: Vec<&'static str>) -> ResultEngine<()> {
    if missing.is_empty() {
        Ok(())
    } else {
        Err(EngineError::Validation(format!(
            "missing required fields: {}",
            missing.join(", ")
        )))
    }
}

fn normalize_optional_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        Ok(Engine {
            database: self.database,
        })
    }
}
