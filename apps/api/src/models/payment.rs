//! Payment model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

use super::{EntityPatch, Mutable, Table};

/// Row from the `payments` table: a single observed bank transaction
/// matched against a [`PaymentInfo`](super::PaymentInfo) prescription.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Payment {
    pub id: Uuid,
    /// Prescription this transaction was matched against
    pub payment_info_id: Option<Uuid>,
    /// Opaque identifier assigned by the bank
    pub bank_unique_data: Option<String>,
    /// Variable symbol carried by the transaction
    pub variable_symbol: Option<String>,
    /// Amount actually paid
    pub amount: Option<f64>,
    pub created: DateTime<Utc>,
    pub lastchange: DateTime<Utc>,
    pub createdby: Option<Uuid>,
    pub changedby: Option<Uuid>,
    pub rbacobject: Option<Uuid>,
}

/// Partial update for a [`Payment`]; `None` fields are left untouched.
#[derive(Debug, Clone)]
pub struct PaymentPatch {
    pub id: Uuid,
    pub lastchange: DateTime<Utc>,
    pub payment_info_id: Option<Uuid>,
    pub bank_unique_data: Option<String>,
    pub variable_symbol: Option<String>,
    pub amount: Option<f64>,
    pub changedby: Option<Uuid>,
}

impl EntityPatch for PaymentPatch {
    fn id(&self) -> Uuid {
        self.id
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }
}

impl Table for Payment {
    const TABLE: &'static str = "payments";

    const COLUMNS: &'static str = "id, payment_info_id, bank_unique_data, \
        variable_symbol, amount, \
        created, lastchange, createdby, changedby, rbacobject";

    fn id(&self) -> Uuid {
        self.id
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }

    fn key(&self, column: &str) -> Option<Uuid> {
        match column {
            "payment_info_id" => self.payment_info_id,
            _ => None,
        }
    }
}

impl Mutable for Payment {
    type Patch = PaymentPatch;

    fn stamp_new(&mut self, now: DateTime<Utc>) {
        if self.id.is_nil() {
            self.id = Uuid::new_v4();
        }
        self.created = now;
        self.lastchange = now;
    }

    fn set_lastchange(&mut self, now: DateTime<Utc>) {
        self.lastchange = now;
    }

    fn apply(&mut self, patch: &PaymentPatch) {
        if let Some(v) = patch.payment_info_id {
            self.payment_info_id = Some(v);
        }
        if let Some(v) = &patch.bank_unique_data {
            self.bank_unique_data = Some(v.clone());
        }
        if let Some(v) = &patch.variable_symbol {
            self.variable_symbol = Some(v.clone());
        }
        if let Some(v) = patch.amount {
            self.amount = Some(v);
        }
        if let Some(v) = patch.changedby {
            self.changedby = Some(v);
        }
    }

    fn bind_insert<'q>(
        q: QueryAs<'q, Postgres, Self, PgArguments>,
        row: &Self,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        q.bind(row.id)
            .bind(row.payment_info_id)
            .bind(row.bank_unique_data.clone())
            .bind(row.variable_symbol.clone())
            .bind(row.amount)
            .bind(row.created)
            .bind(row.lastchange)
            .bind(row.createdby)
            .bind(row.changedby)
            .bind(row.rbacobject)
    }

    fn bind_update<'q>(
        q: QueryAs<'q, Postgres, Self, PgArguments>,
        row: &Self,
        token: DateTime<Utc>,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        q.bind(row.id)
            .bind(row.payment_info_id)
            .bind(row.bank_unique_data.clone())
            .bind(row.variable_symbol.clone())
            .bind(row.amount)
            .bind(row.created)
            .bind(row.lastchange)
            .bind(row.createdby)
            .bind(row.changedby)
            .bind(row.rbacobject)
            .bind(token)
    }
}
