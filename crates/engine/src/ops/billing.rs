//! Invoice / purchase-order / payment reconciliation.
//!
//! Payment recording inserts the payment row and applies the balance delta in
//! one transaction; the balance itself moves via an atomic SQL
//! read-modify-write so concurrent recordings against the same document
//! cannot lose updates.

use std::collections::HashMap;

use chrono::Utc;
use sea_orm::{
    ActiveValue, ConnectionTrait, DatabaseTransaction, PaginatorTrait, QueryFilter, QueryOrder,
    Statement, TransactionTrait, prelude::*,
};
use uuid::Uuid;

use crate::{
    DocumentStatus, EngineError, Invoice, Money, NewInvoice, NewPayment, NewPurchaseOrder,
    Payment, PaymentPatch, PaymentTarget, PurchaseOrder, ResultEngine,
    docnum::{self, DocumentKind},
    facilitators, invoices, payments, purchase_orders,
};

use super::{Engine, is_blank, missing_fields, normalize_optional_text, required, required_text, with_tx};

/// Counts and totals over invoices, purchase orders and payments.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FinancialSummary {
    pub invoice_count: u64,
    pub invoices_total: Money,
    pub invoices_paid: Money,
    pub invoices_due: Money,
    pub paid_invoices: u64,
    pub overdue_invoices: u64,
    pub purchase_order_count: u64,
    pub purchase_orders_total: Money,
    pub purchase_orders_paid: Money,
    pub purchase_orders_due: Money,
    pub paid_purchase_orders: u64,
    pub payment_count: u64,
    pub payments_total: Money,
}

impl Engine {
    /// Creates an invoice with a fresh `INV-YYYYMMDD-NNN` number.
    ///
    /// Balances start at `amount_paid = 0`, `amount_due = total`; status is
    /// `draft` until payments move it.
    pub async fn create_invoice(&self, cmd: NewInvoice) -> ResultEngine<Invoice> {
        let mut missing = Vec::new();
        if is_blank(&cmd.customer_name) {
            missing.push("customer_name");
        }
        if cmd.due_date.is_none() {
            missing.push("due_date");
        }
        if cmd.total.is_none() {
            missing.push("total");
        }
        missing_fields(missing)?;

        let customer_name = required_text(cmd.customer_name, "customer_name")?;
        let due_date = required(cmd.due_date, "due_date")?;
        let total = required(cmd.total, "total")?;
        let tax = cmd.tax.unwrap_or(Money::ZERO);
        let subtotal = cmd.subtotal.unwrap_or(total - tax);

        with_tx!(self, |db_tx| {
            let today = Utc::now().date_naive();
            let seq = invoices::Entity::find()
                .filter(
                    invoices::Column::InvoiceNumber
                        .like(docnum::day_pattern(DocumentKind::Invoice, today)),
                )
                .count(&db_tx)
                .await?
                + 1;

            let invoice = Invoice {
                id: Uuid::new_v4(),
                invoice_number: docnum::format_number(DocumentKind::Invoice, today, seq),
                customer_id: cmd
                    .customer_id
                    .as_deref()
                    .and_then(|s| Uuid::parse_str(s.trim()).ok()),
                customer_name,
                customer_email: normalize_optional_text(cmd.customer_email.as_deref()),
                customer_phone: normalize_optional_text(cmd.customer_phone.as_deref()),
                due_date,
                subtotal,
                tax,
                total,
                amount_paid: Money::ZERO,
                amount_due: total,
                currency: cmd.currency.unwrap_or_default(),
                status: DocumentStatus::Draft,
                notes: normalize_optional_text(cmd.notes.as_deref()),
                terms: normalize_optional_text(cmd.terms.as_deref()),
                created_at: Utc::now(),
            };
            invoices::ActiveModel::from(&invoice).insert(&db_tx).await?;
            Ok(invoice)
        })
    }

    /// Creates a purchase order for an existing facilitator.
    pub async fn create_purchase_order(&self, cmd: NewPurchaseOrder) -> ResultEngine<PurchaseOrder> {
        let mut missing = Vec::new();
        if is_blank(&cmd.facilitator_id) {
            missing.push("facilitator_id");
        }
        if cmd.due_date.is_none() {
            missing.push("due_date");
        }
        if cmd.total.is_none() {
            missing.push("total");
        }
        missing_fields(missing)?;

        let facilitator_id = super::parse_id(
            &required_text(cmd.facilitator_id, "facilitator_id")?,
            "facilitator",
        )?;
        let due_date = required(cmd.due_date, "due_date")?;
        let total = required(cmd.total, "total")?;
        let tax = cmd.tax.unwrap_or(Money::ZERO);
        let subtotal = cmd.subtotal.unwrap_or(total - tax);

        with_tx!(self, |db_tx| {
            facilitators::Entity::find_by_id(facilitator_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("facilitator".to_string()))?;

            let today = Utc::now().date_naive();
            let seq = purchase_orders::Entity::find()
                .filter(
                    purchase_orders::Column::PoNumber
                        .like(docnum::day_pattern(DocumentKind::PurchaseOrder, today)),
                )
                .count(&db_tx)
                .await?
                + 1;

            let po = PurchaseOrder {
                id: Uuid::new_v4(),
                po_number: docnum::format_number(DocumentKind::PurchaseOrder, today, seq),
                facilitator_id,
                due_date,
                subtotal,
                tax,
                total,
                amount_paid: Money::ZERO,
                amount_due: total,
                currency: cmd.currency.unwrap_or_default(),
                status: DocumentStatus::Draft,
                notes: normalize_optional_text(cmd.notes.as_deref()),
                terms: normalize_optional_text(cmd.terms.as_deref()),
                created_at: Utc::now(),
            };
            purchase_orders::ActiveModel::from(&po).insert(&db_tx).await?;
            Ok(po)
        })
    }

    /// Records a payment against an invoice.
    ///
    /// The payment insert and the balance delta commit together or not at
    /// all. Status derivation: `paid` iff the new due ≤ 0, else `partial`
    /// iff the new paid > 0, else unchanged.
    pub async fn record_invoice_payment(
        &self,
        invoice_id: &str,
        cmd: NewPayment,
    ) -> ResultEngine<(Invoice, Payment)> {
        let invoice_id = super::parse_id(invoice_id, "invoice")?;
        let (amount, payment) = self.prepare_payment(cmd)?;

        with_tx!(self, |db_tx| {
            // The atomic read-modify-write goes first: it takes the write
            // lock before any read in this transaction, and its row count
            // doubles as the existence check.
            let backend = self.database.get_database_backend();
            let result = db_tx
                .execute(Statement::from_sql_and_values(
                    backend,
                    "UPDATE invoices SET \
                       amount_paid_minor = amount_paid_minor + ?, \
                       amount_due_minor = total_minor - (amount_paid_minor + ?), \
                       status = CASE \
                         WHEN total_minor - (amount_paid_minor + ?) <= 0 THEN 'paid' \
                         WHEN amount_paid_minor + ? > 0 THEN 'partial' \
                         ELSE status END \
                     WHERE id = ?",
                    vec![
                        amount.minor().into(),
                        amount.minor().into(),
                        amount.minor().into(),
                        amount.minor().into(),
                        invoice_id.to_string().into(),
                    ],
                ))
                .await?;
            if result.rows_affected() == 0 {
                return Err(EngineError::KeyNotFound("invoice".to_string()));
            }

            let payment = self
                .insert_payment(&db_tx, payment, PaymentTarget::Invoice(invoice_id))
                .await?;

            let model = invoices::Entity::find_by_id(invoice_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("invoice".to_string()))?;
            Ok((Invoice::try_from(model)?, payment))
        })
    }

    /// Records a payment against a purchase order. Symmetric to
    /// [`record_invoice_payment`](Engine::record_invoice_payment).
    pub async fn record_po_payment(
        &self,
        purchase_order_id: &str,
        cmd: NewPayment,
    ) -> ResultEngine<(PurchaseOrder, Payment)> {
        let po_id = super::parse_id(purchase_order_id, "purchase order")?;
        let (amount, payment) = self.prepare_payment(cmd)?;

        with_tx!(self, |db_tx| {
            let backend = self.database.get_database_backend();
            let result = db_tx
                .execute(Statement::from_sql_and_values(
                    backend,
                    "UPDATE purchase_orders SET \
                       amount_paid_minor = amount_paid_minor + ?, \
                       amount_due_minor = total_minor - (amount_paid_minor + ?), \
                       status = CASE \
                         WHEN total_minor - (amount_paid_minor + ?) <= 0 THEN 'paid' \
                         WHEN amount_paid_minor + ? > 0 THEN 'partial' \
                         ELSE status END \
                     WHERE id = ?",
                    vec![
                        amount.minor().into(),
                        amount.minor().into(),
                        amount.minor().into(),
                        amount.minor().into(),
                        po_id.to_string().into(),
                    ],
                ))
                .await?;
            if result.rows_affected() == 0 {
                return Err(EngineError::KeyNotFound("purchase order".to_string()));
            }

            let payment = self
                .insert_payment(&db_tx, payment, PaymentTarget::PurchaseOrder(po_id))
                .await?;

            let model = purchase_orders::Entity::find_by_id(po_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::KeyNotFound("purchase order".to_string()))?;
            Ok((PurchaseOrder::try_from(model)?, payment))
        })
    }

    /// Lists invoices newest first, each with its payments.
    pub async fn list_invoices(&self) -> ResultEngine<Vec<(Invoice, Vec<Payment>)>> {
        let rows = invoices::Entity::find()
            .order_by_desc(invoices::Column::CreatedAt)
            .find_with_related(payments::Entity)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (invoice_model, payment_models) in rows {
            let invoice = Invoice::try_from(invoice_model)?;
            let mut payment_list = Vec::with_capacity(payment_models.len());
            for model in payment_models {
                payment_list.push(Payment::try_from(model)?);
            }
            out.push((invoice, payment_list));
        }
        Ok(out)
    }

    /// Lists purchase orders newest first, each with its payments.
    pub async fn list_purchase_orders(&self) -> ResultEngine<Vec<(PurchaseOrder, Vec<Payment>)>> {
        let rows = purchase_orders::Entity::find()
            .order_by_desc(purchase_orders::Column::CreatedAt)
            .find_with_related(payments::Entity)
            .all(&self.database)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for (po_model, payment_models) in rows {
            let po = PurchaseOrder::try_from(po_model)?;
            let mut payment_list = Vec::with_capacity(payment_models.len());
            for model in payment_models {
                payment_list.push(Payment::try_from(model)?);
            }
            out.push((po, payment_list));
        }
        Ok(out)
    }

    /// Lists payments newest first, each with its parent's document number.
    pub async fn list_payments(&self) -> ResultEngine<Vec<(Payment, Option<String>)>> {
        let payment_models = payments::Entity::find()
            .order_by_desc(payments::Column::CreatedAt)
            .all(&self.database)
            .await?;

        let invoice_numbers: HashMap<String, String> = invoices::Entity::find()
            .all(&self.database)
            .await?
            .into_iter()
            .map(|model| (model.id, model.invoice_number))
            .collect();
        let po_numbers: HashMap<String, String> = purchase_orders::Entity::find()
            .all(&self.database)
            .await?
            .into_iter()
            .map(|model| (model.id, model.po_number))
            .collect();

        let mut out = Vec::with_capacity(payment_models.len());
        for model in payment_models {
            let payment = Payment::try_from(model)?;
            let parent_number = match payment.target {
                PaymentTarget::Invoice(id) => invoice_numbers.get(&id.to_string()).cloned(),
                PaymentTarget::PurchaseOrder(id) => po_numbers.get(&id.to_string()).cloned(),
            };
            out.push((payment, parent_number));
        }
        Ok(out)
    }

    /// Admin override: overwrite an invoice status with no transition checks.
    pub async fn override_invoice_status(
        &self,
        invoice_id: &str,
        status: DocumentStatus,
    ) -> ResultEngine<Invoice> {
        let invoice_id = super::parse_id(invoice_id, "invoice")?;
        let model = invoices::Entity::find_by_id(invoice_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("invoice".to_string()))?;

        let update = invoices::ActiveModel {
            id: ActiveValue::Set(model.id.clone()),
            status: ActiveValue::Set(status.as_str().to_string()),
            ..Default::default()
        };
        let updated = update.update(&self.database).await?;
        Invoice::try_from(updated)
    }

    /// Admin override: overwrite a purchase-order status.
    pub async fn override_po_status(
        &self,
        purchase_order_id: &str,
        status: DocumentStatus,
    ) -> ResultEngine<PurchaseOrder> {
        let po_id = super::parse_id(purchase_order_id, "purchase order")?;
        let model = purchase_orders::Entity::find_by_id(po_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("purchase order".to_string()))?;

        let update = purchase_orders::ActiveModel {
            id: ActiveValue::Set(model.id.clone()),
            status: ActiveValue::Set(status.as_str().to_string()),
            ..Default::default()
        };
        let updated = update.update(&self.database).await?;
        PurchaseOrder::try_from(updated)
    }

    /// Deletes an invoice. Payments referencing it are left in place.
    pub async fn delete_invoice(&self, invoice_id: &str) -> ResultEngine<()> {
        let invoice_id = super::parse_id(invoice_id, "invoice")?;
        let result = invoices::Entity::delete_by_id(invoice_id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("invoice".to_string()));
        }
        Ok(())
    }

    /// Deletes a purchase order. Payments referencing it are left in place.
    pub async fn delete_purchase_order(&self, purchase_order_id: &str) -> ResultEngine<()> {
        let po_id = super::parse_id(purchase_order_id, "purchase order")?;
        let result = purchase_orders::Entity::delete_by_id(po_id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("purchase order".to_string()));
        }
        Ok(())
    }

    /// Edits payment metadata. The parent's balances stay as posted.
    pub async fn update_payment(&self, payment_id: &str, patch: PaymentPatch) -> ResultEngine<Payment> {
        let payment_id = super::parse_id(payment_id, "payment")?;
        let model = payments::Entity::find_by_id(payment_id.to_string())
            .one(&self.database)
            .await?
            .ok_or_else(|| EngineError::KeyNotFound("payment".to_string()))?;

        let mut update = <payments::ActiveModel as sea_orm::ActiveModelTrait>::default();
        if let Some(method) = patch.payment_method {
            update.payment_method = ActiveValue::Set(method);
        }
        if let Some(date) = patch.payment_date {
            update.payment_date = ActiveValue::Set(date);
        }
        if let Some(reference) = patch.reference_number {
            update.reference_number = ActiveValue::Set(Some(reference));
        }
        if let Some(notes) = patch.notes {
            update.notes = ActiveValue::Set(Some(notes));
        }
        if !update.is_changed() {
            return Payment::try_from(model);
        }
        update.id = ActiveValue::Set(model.id.clone());
        let updated = update.update(&self.database).await?;
        Payment::try_from(updated)
    }

    /// Deletes a payment row. The parent's balances stay as posted.
    pub async fn delete_payment(&self, payment_id: &str) -> ResultEngine<()> {
        let payment_id = super::parse_id(payment_id, "payment")?;
        let result = payments::Entity::delete_by_id(payment_id.to_string())
            .exec(&self.database)
            .await?;
        if result.rows_affected == 0 {
            return Err(EngineError::KeyNotFound("payment".to_string()));
        }
        Ok(())
    }

    /// Counts and totals over all invoices, purchase orders and payments.
    ///
    /// Pure derivation over committed state; safe to recompute on every call.
    pub async fn financial_summary(&self) -> ResultEngine<FinancialSummary> {
        let invoice_models = invoices::Entity::find().all(&self.database).await?;
        let po_models = purchase_orders::Entity::find().all(&self.database).await?;
        let payment_models = payments::Entity::find().all(&self.database).await?;

        let mut summary = FinancialSummary::default();

        for model in invoice_models {
            summary.invoice_count += 1;
            summary.invoices_total += Money::new(model.total_minor);
            summary.invoices_paid += Money::new(model.amount_paid_minor);
            summary.invoices_due += Money::new(model.amount_due_minor);
            match model.status.as_str() {
                "paid" => summary.paid_invoices += 1,
                "overdue" => summary.overdue_invoices += 1,
                _ => {}
            }
        }

        for model in po_models {
            summary.purchase_order_count += 1;
            summary.purchase_orders_total += Money::new(model.total_minor);
            summary.purchase_orders_paid += Money::new(model.amount_paid_minor);
            summary.purchase_orders_due += Money::new(model.amount_due_minor);
            if model.status == "paid" {
                summary.paid_purchase_orders += 1;
            }
        }

        for model in payment_models {
            summary.payment_count += 1;
            summary.payments_total += Money::new(model.amount_minor);
        }

        Ok(summary)
    }

    fn prepare_payment(&self, cmd: NewPayment) -> ResultEngine<(Money, NewPayment)> {
        let mut missing = Vec::new();
        if cmd.amount.is_none() {
            missing.push("amount");
        }
        if is_blank(&cmd.payment_method) {
            missing.push("payment_method");
        }
        missing_fields(missing)?;

        let amount = required(cmd.amount, "amount")?;
        if !amount.is_positive() {
            return Err(EngineError::Validation("amount must be > 0".to_string()));
        }
        Ok((amount, cmd))
    }

    async fn insert_payment(
        &self,
        db_tx: &DatabaseTransaction,
        cmd: NewPayment,
        target: PaymentTarget,
    ) -> ResultEngine<Payment> {
        let today = Utc::now().date_naive();
        let seq = payments::Entity::find()
            .filter(
                payments::Column::PaymentNumber
                    .like(docnum::day_pattern(DocumentKind::Payment, today)),
            )
            .count(db_tx)
            .await?
            + 1;

        let payment = Payment {
            id: Uuid::new_v4(),
            payment_number: docnum::format_number(DocumentKind::Payment, today, seq),
            target,
            amount: required(cmd.amount, "amount")?,
            payment_method: required_text(cmd.payment_method, "payment_method")?,
            payment_date: cmd.payment_date.unwrap_or_else(Utc::now),
            reference_number: normalize_optional_text(cmd.reference_number.as_deref()),
            notes: normalize_optional_text(cmd.notes.as_deref()),
            created_at: Utc::now(),
        };
        payments::ActiveModel::from(&payment).insert(db_tx).await?;
        Ok(payment)
    }
}
