//! PaymentInfo GraphQL type

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::loaders::Loaders;
use crate::models::PaymentInfo as DbPaymentInfo;

use super::admission::Admission;
use super::payment::Payment;

/// Payment prescription exposed via GraphQL
pub struct PaymentInfo {
    row: DbPaymentInfo,
}

impl PaymentInfo {
    pub fn new(row: DbPaymentInfo) -> Self {
        Self { row }
    }
}

impl From<DbPaymentInfo> for PaymentInfo {
    fn from(row: DbPaymentInfo) -> Self {
        Self::new(row)
    }
}

#[Object]
impl PaymentInfo {
    /// Unique payment info identifier
    async fn id(&self) -> Uuid {
        self.row.id
    }

    /// Name of the payment information
    async fn name(&self) -> Option<&str> {
        self.row.name.as_deref()
    }

    /// English name of the payment information
    async fn name_en(&self) -> Option<&str> {
        self.row.name_en.as_deref()
    }

    /// Bank account number
    async fn account_number(&self) -> Option<&str> {
        self.row.account_number.as_deref()
    }

    /// Specific symbol for the transaction
    async fn specific_symbol(&self) -> Option<&str> {
        self.row.specific_symbol.as_deref()
    }

    /// Constant symbol for the transaction
    async fn constant_symbol(&self) -> Option<&str> {
        self.row.constant_symbol.as_deref()
    }

    /// International Bank Account Number
    async fn iban(&self) -> Option<&str> {
        self.row.iban.as_deref()
    }

    /// SWIFT/BIC code
    async fn swift(&self) -> Option<&str> {
        self.row.swift.as_deref()
    }

    /// Amount to pay
    async fn amount(&self) -> Option<f64> {
        self.row.amount
    }

    /// Creation timestamp
    async fn created(&self) -> DateTime<Utc> {
        self.row.created
    }

    /// Timestamp of the last change; echo this back when mutating
    async fn lastchange(&self) -> DateTime<Utc> {
        self.row.lastchange
    }

    /// User who created the entity (external aggregate)
    async fn createdby_id(&self) -> Option<Uuid> {
        self.row.createdby
    }

    /// User who last changed the entity (external aggregate)
    async fn changedby_id(&self) -> Option<Uuid> {
        self.row.changedby
    }

    /// Access-control aggregate the entity belongs to
    async fn rbacobject_id(&self) -> Option<Uuid> {
        self.row.rbacobject
    }

    /// Transactions matched against this prescription
    async fn payments(&self, ctx: &Context<'_>) -> Result<Vec<Payment>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .payments
            .related("payment_info_id", Some(self.row.id))
            .await?;
        Ok(rows.into_iter().map(Payment::from).collect())
    }

    /// Admissions that prescribe this payment
    async fn admissions(&self, ctx: &Context<'_>) -> Result<Vec<Admission>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .admissions
            .related("payment_info_id", Some(self.row.id))
            .await?;
        Ok(rows.into_iter().map(Admission::from).collect())
    }
}
