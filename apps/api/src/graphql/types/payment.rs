//! Payment GraphQL type

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::loaders::Loaders;
use crate::models::Payment as DbPayment;

use super::payment_info::PaymentInfo;

/// Observed bank transaction exposed via GraphQL
pub struct Payment {
    row: DbPayment,
}

impl Payment {
    pub fn new(row: DbPayment) -> Self {
        Self { row }
    }
}

impl From<DbPayment> for Payment {
    fn from(row: DbPayment) -> Self {
        Self::new(row)
    }
}

#[Object]
impl Payment {
    /// Unique payment identifier
    async fn id(&self) -> Uuid {
        self.row.id
    }

    /// Prescription this transaction was matched against
    async fn payment_info_id(&self) -> Option<Uuid> {
        self.row.payment_info_id
    }

    /// Opaque identifier assigned by the bank
    async fn bank_unique_data(&self) -> Option<&str> {
        self.row.bank_unique_data.as_deref()
    }

    /// Variable symbol carried by the transaction
    async fn variable_symbol(&self) -> Option<&str> {
        self.row.variable_symbol.as_deref()
    }

    /// Amount actually paid
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

    /// Prescription this transaction was matched against
    async fn payment_info(&self, ctx: &Context<'_>) -> Result<Option<PaymentInfo>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.payment_infos.load(self.row.payment_info_id).await?;
        Ok(row.map(PaymentInfo::from))
    }
}
