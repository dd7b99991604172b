//! Payment info model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

use super::{EntityPatch, Mutable, Table};

/// Row from the `paymentinfos` table: banking details shared by the
/// payments of one admission.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PaymentInfo {
    pub id: Uuid,
    /// Name of the payment information
    pub name: Option<String>,
    /// English name of the payment information
    pub name_en: Option<String>,
    /// Bank account number
    pub account_number: Option<String>,
    /// Specific symbol for the transaction
    pub specific_symbol: Option<String>,
    /// Constant symbol for the transaction
    pub constant_symbol: Option<String>,
    /// International Bank Account Number
    pub iban: Option<String>,
    /// SWIFT/BIC code
    pub swift: Option<String>,
    /// Amount to pay
    pub amount: Option<f64>,
    pub created: DateTime<Utc>,
    pub lastchange: DateTime<Utc>,
    pub createdby: Option<Uuid>,
    pub changedby: Option<Uuid>,
    pub rbacobject: Option<Uuid>,
}

/// Partial update for a [`PaymentInfo`]; `None` fields are left untouched.
#[derive(Debug, Clone)]
pub struct PaymentInfoPatch {
    pub id: Uuid,
    pub lastchange: DateTime<Utc>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub account_number: Option<String>,
    pub specific_symbol: Option<String>,
    pub constant_symbol: Option<String>,
    pub iban: Option<String>,
    pub swift: Option<String>,
    pub amount: Option<f64>,
    pub changedby: Option<Uuid>,
}

impl EntityPatch for PaymentInfoPatch {
    fn id(&self) -> Uuid {
        self.id
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }
}

impl Table for PaymentInfo {
    const TABLE: &'static str = "paymentinfos";

    const COLUMNS: &'static str = "id, name, name_en, account_number, \
        specific_symbol, constant_symbol, iban, swift, amount, \
        created, lastchange, createdby, changedby, rbacobject";

    fn id(&self) -> Uuid {
        self.id
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }

    fn key(&self, _column: &str) -> Option<Uuid> {
        None
    }
}

impl Mutable for PaymentInfo {
    type Patch = PaymentInfoPatch;

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

    fn apply(&mut self, patch: &PaymentInfoPatch) {
        if let Some(v) = &patch.name {
            self.name = Some(v.clone());
        }
        if let Some(v) = &patch.name_en {
            self.name_en = Some(v.clone());
        }
        if let Some(v) = &patch.account_number {
            self.account_number = Some(v.clone());
        }
        if let Some(v) = &patch.specific_symbol {
            self.specific_symbol = Some(v.clone());
        }
        if let Some(v) = &patch.constant_symbol {
            self.constant_symbol = Some(v.clone());
        }
        if let Some(v) = &patch.iban {
            self.iban = Some(v.clone());
        }
        if let Some(v) = &patch.swift {
            self.swift = Some(v.clone());
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
            .bind(row.name.clone())
            .bind(row.name_en.clone())
            .bind(row.account_number.clone())
            .bind(row.specific_symbol.clone())
            .bind(row.constant_symbol.clone())
            .bind(row.iban.clone())
            .bind(row.swift.clone())
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
            .bind(row.name.clone())
            .bind(row.name_en.clone())
            .bind(row.account_number.clone())
            .bind(row.specific_symbol.clone())
            .bind(row.constant_symbol.clone())
            .bind(row.iban.clone())
            .bind(row.swift.clone())
            .bind(row.amount)
            .bind(row.created)
            .bind(row.lastchange)
            .bind(row.createdby)
            .bind(row.changedby)
            .bind(row.rbacobject)
            .bind(token)
    }
}
