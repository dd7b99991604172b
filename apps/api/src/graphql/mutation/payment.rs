//! Payment and payment prescription mutations

use async_graphql::{Context, InputObject, Object, Result, Union};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::loaders::{Loaders, UpdateOutcome};
use crate::graphql::types::{Payment, PaymentInfo};
use crate::models::{
    Payment as DbPayment, PaymentInfo as DbPaymentInfo, PaymentInfoPatch, PaymentPatch, Table,
};

use super::{delete_mutation_result, DeleteMutationResult, MutationError};

/// Result of a payment insert or update
#[derive(Union)]
pub enum PaymentMutationResult {
    Payment(Payment),
    Error(MutationError),
}

/// Result of a payment prescription insert or update
#[derive(Union)]
pub enum PaymentInfoMutationResult {
    PaymentInfo(PaymentInfo),
    Error(MutationError),
}

/// Fields accepted when recording a payment
#[derive(InputObject)]
pub struct PaymentInsertInput {
    pub id: Option<Uuid>,
    pub payment_info_id: Option<Uuid>,
    pub bank_unique_data: Option<String>,
    pub variable_symbol: Option<String>,
    pub amount: Option<f64>,
}

impl PaymentInsertInput {
    fn into_row(self) -> DbPayment {
        let now = Utc::now();
        DbPayment {
            id: self.id.unwrap_or_else(Uuid::nil),
            payment_info_id: self.payment_info_id,
            bank_unique_data: self.bank_unique_data,
            variable_symbol: self.variable_symbol,
            amount: self.amount,
            created: now,
            lastchange: now,
            createdby: None,
            changedby: None,
            rbacobject: None,
        }
    }
}

/// Fields accepted when updating a payment
#[derive(InputObject)]
pub struct PaymentUpdateInput {
    pub id: Uuid,
    /// Token read alongside the entity
    pub lastchange: DateTime<Utc>,
    pub payment_info_id: Option<Uuid>,
    pub bank_unique_data: Option<String>,
    pub variable_symbol: Option<String>,
    pub amount: Option<f64>,
}

impl PaymentUpdateInput {
    fn into_patch(self) -> PaymentPatch {
        PaymentPatch {
            id: self.id,
            lastchange: self.lastchange,
            payment_info_id: self.payment_info_id,
            bank_unique_data: self.bank_unique_data,
            variable_symbol: self.variable_symbol,
            amount: self.amount,
            changedby: None,
        }
    }
}

/// Fields accepted when creating a payment prescription
#[derive(InputObject)]
pub struct PaymentInfoInsertInput {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub account_number: Option<String>,
    pub specific_symbol: Option<String>,
    pub constant_symbol: Option<String>,
    pub iban: Option<String>,
    pub swift: Option<String>,
    pub amount: Option<f64>,
}

impl PaymentInfoInsertInput {
    fn into_row(self) -> DbPaymentInfo {
        let now = Utc::now();
        DbPaymentInfo {
            id: self.id.unwrap_or_else(Uuid::nil),
            name: self.name,
            name_en: self.name_en,
            account_number: self.account_number,
            specific_symbol: self.specific_symbol,
            constant_symbol: self.constant_symbol,
            iban: self.iban,
            swift: self.swift,
            amount: self.amount,
            created: now,
            lastchange: now,
            createdby: None,
            changedby: None,
            rbacobject: None,
        }
    }
}

/// Fields accepted when updating a payment prescription
#[derive(InputObject)]
pub struct PaymentInfoUpdateInput {
    pub id: Uuid,
    /// Token read alongside the entity
    pub lastchange: DateTime<Utc>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub account_number: Option<String>,
    pub specific_symbol: Option<String>,
    pub constant_symbol: Option<String>,
    pub iban: Option<String>,
    pub swift: Option<String>,
    pub amount: Option<f64>,
}

impl PaymentInfoUpdateInput {
    fn into_patch(self) -> PaymentInfoPatch {
        PaymentInfoPatch {
            id: self.id,
            lastchange: self.lastchange,
            name: self.name,
            name_en: self.name_en,
            account_number: self.account_number,
            specific_symbol: self.specific_symbol,
            constant_symbol: self.constant_symbol,
            iban: self.iban,
            swift: self.swift,
            amount: self.amount,
            changedby: None,
        }
    }
}

/// Mutations over payments and payment prescriptions
#[derive(Default)]
pub struct PaymentMutation;

#[Object]
impl PaymentMutation {
    /// Record a payment
    async fn payment_insert(
        &self,
        ctx: &Context<'_>,
        input: PaymentInsertInput,
    ) -> Result<PaymentMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let stored = loaders.payments.insert(input.into_row()).await?;
        Ok(PaymentMutationResult::Payment(stored.into()))
    }

    /// Update a payment; requires the current `lastchange` token
    async fn payment_update(
        &self,
        ctx: &Context<'_>,
        input: PaymentUpdateInput,
    ) -> Result<PaymentMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let id = input.id;
        match loaders.payments.update(input.into_patch()).await? {
            UpdateOutcome::Updated(row) => Ok(PaymentMutationResult::Payment(row.into())),
            UpdateOutcome::NotFound => Ok(PaymentMutationResult::Error(
                MutationError::not_found("payment", id),
            )),
            UpdateOutcome::Conflict { current } => Ok(PaymentMutationResult::Error(
                MutationError::conflict("payment", id, current.lastchange()),
            )),
        }
    }

    /// Delete a payment; requires the current `lastchange` token
    async fn payment_delete(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        lastchange: DateTime<Utc>,
    ) -> Result<DeleteMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let outcome = loaders.payments.delete(id, lastchange).await?;
        Ok(delete_mutation_result("payment", id, outcome))
    }

    /// Create a payment prescription
    async fn payment_info_insert(
        &self,
        ctx: &Context<'_>,
        input: PaymentInfoInsertInput,
    ) -> Result<PaymentInfoMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let stored = loaders.payment_infos.insert(input.into_row()).await?;
        Ok(PaymentInfoMutationResult::PaymentInfo(stored.into()))
    }

    /// Update a payment prescription; requires the current `lastchange` token
    async fn payment_info_update(
        &self,
        ctx: &Context<'_>,
        input: PaymentInfoUpdateInput,
    ) -> Result<PaymentInfoMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let id = input.id;
        match loaders.payment_infos.update(input.into_patch()).await? {
            UpdateOutcome::Updated(row) => Ok(PaymentInfoMutationResult::PaymentInfo(row.into())),
            UpdateOutcome::NotFound => Ok(PaymentInfoMutationResult::Error(
                MutationError::not_found("payment info", id),
            )),
            UpdateOutcome::Conflict { current } => Ok(PaymentInfoMutationResult::Error(
                MutationError::conflict("payment info", id, current.lastchange()),
            )),
        }
    }

    /// Delete a payment prescription; requires the current `lastchange` token
    async fn payment_info_delete(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        lastchange: DateTime<Utc>,
    ) -> Result<DeleteMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let outcome = loaders.payment_infos.delete(id, lastchange).await?;
        Ok(delete_mutation_result("payment info", id, outcome))
    }
}
