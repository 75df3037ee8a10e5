//! Customer/user account operations, including role management.

use std::collections::HashMap;

use sea_orm::{ActiveValue, QueryFilter, QueryOrder, prelude::*};

use crate::{
    CustomerPatch, EngineError, Money, NewCustomer, ResultEngine, Role, User, bookings, users,
};

use super::{Engine, is_blank, missing_fields, normalize_optional_text, required_text};

/// Booking-derived totals attached to a customer listing entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CustomerTotals {
    pub total_bookings: u64,
    pub total_spent: Money,
}

impl Engine {
    /// Loads one user by id. Used by the authorization guard on every request.
    pub async fn find_user(&self, user_id: &str) -> ResultEngine<User> {
        let user_id = super::parse_id(user_id, "user")?;
        let model = users::Entity::find_by_id(user_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user".to_string()))?;
        User::try_from(model)
    }

    /// Lists all users newest first, for role management.
    pub async fn list_users(&self) -> ResultEngine<Vec<User>> {
        let models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(models.len());
        for model in models {
            out.push(User::try_from(model)?);
        }
        Ok(out)
    }

    /// Lists customers newest first with booking totals.
    ///
    /// Totals match bookings by user id or by the booking's customer email,
    /// so walk-in bookings recorded against an email still count.
    pub async fn list_customers(&self) -> ResultEngine<Vec<(User, CustomerTotals)>> {
        let user_models = users::Entity::find()
            .order_by_desc(users::Column::CreatedAt)
            .all(&self.database)
            .await?;
        let booking_models = bookings::Entity::find().all(&self.database).await?;

        let mut by_user: HashMap<String, CustomerTotals> = HashMap::new();
        let mut by_email: HashMap<String, CustomerTotals> = HashMap::new();
        for booking in &booking_models {
            let totals = CustomerTotals {
                total_bookings: 1,
                total_spent: Money::new(booking.total_price_minor),
            };
            if let Some(user_id) = &booking.user_id {
                let entry = by_user.entry(user_id.clone()).or_default();
                entry.total_bookings += totals.total_bookings;
                entry.total_spent += totals.total_spent;
            } else {
                let entry = by_email.entry(booking.customer_email.clone()).or_default();
                entry.total_bookings += totals.total_bookings;
                entry.total_spent += totals.total_spent;
            }
        }

        let mut out = Vec::with_capacity(user_models.len());
        for model in user_models {
            let mut totals = by_user.get(&model.id).copied().unwrap_or_default();
            if let Some(email_totals) = by_email.get(&model.email) {
                totals.total_bookings += email_totals.total_bookings;
                totals.total_spent += email_totals.total_spent;
            }
            out.push((User::try_from(model)?, totals));
        }
        Ok(out)
    }

    /// Creates a customer account. Duplicate emails are rejected.
    pub async fn create_customer(&self, cmd: NewCustomer) -> ResultEngine<User> {
        let mut missing = Vec::new();
        if is_blank(&cmd.name) {
            missing.push("name");
        }
        if is_blank(&cmd.email) {
            missing.push("email");
        }
        missing_fields(missing)?;

        let name = required_text(cmd.name, "name")?;
        let email = required_text(cmd.email, "email")?;

        let existing = users::Entity::find()
            .filter(users::Column::Email.eq(email.clone()))
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::Conflict(format!(
                "a customer with email {email} already exists"
            )));
        }

        let user = User::new(name, email, normalize_optional_text(cmd.phone.as_deref()));
        users::ActiveModel::from(&user).insert(&self.database).await?;
        Ok(user)
    }

    /// Applies a partial patch to a customer record.
    pub async fn update_customer(&self, user_id: &str, patch: CustomerPatch) -> ResultEngine<User> {
        let user_id = super::parse_id(user_id, "user")?;
        let model = users::Entity::find_by_id(user_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user".to_string()))?;

        if let Some(email) = patch.email.as_deref().map(str::trim) {
            if !email.is_empty() && email != model.email {
                let taken = users::Entity::find()
                    .filter(users::Column::Email.eq(email.to_string()))
                    .one(&self.database)
                    .await?;
                if taken.is_some() {
                    return Err(EngineError::Conflict(format!(
                        "a customer with email {email} already exists"
                    )));
                }
            }
        }

        let mut update = <users::ActiveModel as sea_orm::ActiveModelTrait>::default();
        if let Some(name) = normalize_optional_text(patch.name.as_deref()) {
            update.name = ActiveValue::Set(name);
        }
        if let Some(email) = normalize_optional_text(patch.email.as_deref()) {
            update.email = ActiveValue::Set(email);
        }
        if let Some(phone) = normalize_optional_text(patch.phone.as_deref()) {
            update.phone = ActiveValue::Set(Some(phone));
        }
        if !update.is_changed() {
            return User::try_from(model);
        }
        update.id = ActiveValue::Set(model.id.clone());
        let updated = update.update(&self.database).await?;
        User::try_from(updated)
    }

    /// Deletes a customer, blocked while bookings reference the account.
    pub async fn delete_customer(&self, user_id: &str) -> ResultEngine<()> {
        let user_id = super::parse_id(user_id, "user")?;
        users::Entity::find_by_id(user_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user".to_string()))?;

        let referenced = bookings::Entity::find()
            .filter(bookings::Column::UserId.eq(user_id.to_string()))
            .one(&self.database)
            .await?;
        if referenced.is_some() {
            return Err(EngineError::Conflict(
                "cannot delete customer with existing bookings".to_string(),
            ));
        }

        users::Entity::delete_by_id(user_id.to_string())
            .exec(&self.database)
            .await?;
        Ok(())
    }

    /// Sets a user's role. Unguarded beyond existence; the HTTP layer
    /// restricts the caller to admins.
    pub async fn set_user_role(&self, user_id: &str, role: Role) -> ResultEngine<User> {
        let user_id = super::parse_id(user_id, "user")?;
        let model = users::Entity::find_by_id(user_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("user".to_string()))?;

        let update = users::ActiveModel {
            id: ActiveValue::Set(model.id.clone()),
            role: ActiveValue::Set(role.as_str().to_string()),
            ..Default::default()
        };
        let updated = update.update(&self.database).await?;
        User::try_from(updated)
    }
}
