//! Admission mutations

use async_graphql::{Context, InputObject, Object, Result, Union};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::loaders::{Loaders, UpdateOutcome};
use crate::graphql::types::Admission;
use crate::models::{Admission as DbAdmission, AdmissionPatch, Table};

use super::{delete_mutation_result, DeleteMutationResult, MutationError};

/// Result of an admission insert or update
#[derive(Union)]
pub enum AdmissionMutationResult {
    Admission(Admission),
    Error(MutationError),
}

/// Fields accepted when creating an admission
///
/// An explicit `id` may be supplied for cross-system imports; the server
/// assigns one otherwise.
#[derive(InputObject)]
pub struct AdmissionInsertInput {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub program_id: Option<Uuid>,
    pub payment_info_id: Option<Uuid>,
    pub application_start_date: Option<DateTime<Utc>>,
    pub application_last_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub condition_date: Option<DateTime<Utc>>,
    pub request_condition_start_date: Option<DateTime<Utc>>,
    pub request_condition_last_date: Option<DateTime<Utc>>,
    pub request_exam_start_date: Option<DateTime<Utc>>,
    pub request_exam_last_date: Option<DateTime<Utc>>,
    pub payment_date: Option<DateTime<Utc>>,
    pub request_enrollment_start_date: Option<DateTime<Utc>>,
    pub request_enrollment_end_date: Option<DateTime<Utc>>,
}

impl AdmissionInsertInput {
    fn into_row(self) -> DbAdmission {
        let now = Utc::now();
        DbAdmission {
            id: self.id.unwrap_or_else(Uuid::nil),
            name: self.name,
            name_en: self.name_en,
            program_id: self.program_id,
            payment_info_id: self.payment_info_id,
            application_start_date: self.application_start_date,
            application_last_date: self.application_last_date,
            end_date: self.end_date,
            condition_date: self.condition_date,
            request_condition_start_date: self.request_condition_start_date,
            request_condition_last_date: self.request_condition_last_date,
            request_exam_start_date: self.request_exam_start_date,
            request_exam_last_date: self.request_exam_last_date,
            payment_date: self.payment_date,
            request_enrollment_start_date: self.request_enrollment_start_date,
            request_enrollment_end_date: self.request_enrollment_end_date,
            created: now,
            lastchange: now,
            createdby: None,
            changedby: None,
            rbacobject: None,
        }
    }
}

/// Fields accepted when updating an admission; absent fields keep their
/// stored value
#[derive(InputObject)]
pub struct AdmissionUpdateInput {
    pub id: Uuid,
    /// Token read alongside the entity
    pub lastchange: DateTime<Utc>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub program_id: Option<Uuid>,
    pub payment_info_id: Option<Uuid>,
    pub application_start_date: Option<DateTime<Utc>>,
    pub application_last_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub condition_date: Option<DateTime<Utc>>,
    pub request_condition_start_date: Option<DateTime<Utc>>,
    pub request_condition_last_date: Option<DateTime<Utc>>,
    pub request_exam_start_date: Option<DateTime<Utc>>,
    pub request_exam_last_date: Option<DateTime<Utc>>,
    pub payment_date: Option<DateTime<Utc>>,
    pub request_enrollment_start_date: Option<DateTime<Utc>>,
    pub request_enrollment_end_date: Option<DateTime<Utc>>,
}

impl AdmissionUpdateInput {
    fn into_patch(self) -> AdmissionPatch {
        AdmissionPatch {
            id: self.id,
            lastchange: self.lastchange,
            name: self.name,
            name_en: self.name_en,
            program_id: self.program_id,
            payment_info_id: self.payment_info_id,
            application_start_date: self.application_start_date,
            application_last_date: self.application_last_date,
            end_date: self.end_date,
            condition_date: self.condition_date,
            request_condition_start_date: self.request_condition_start_date,
            request_condition_last_date: self.request_condition_last_date,
            request_exam_start_date: self.request_exam_start_date,
            request_exam_last_date: self.request_exam_last_date,
            payment_date: self.payment_date,
            request_enrollment_start_date: self.request_enrollment_start_date,
            request_enrollment_end_date: self.request_enrollment_end_date,
            changedby: None,
        }
    }
}

/// Mutations over admission processes
#[derive(Default)]
pub struct AdmissionMutation;

#[Object]
impl AdmissionMutation {
    /// Create an admission
    async fn admission_insert(
        &self,
        ctx: &Context<'_>,
        input: AdmissionInsertInput,
    ) -> Result<AdmissionMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let stored = loaders.admissions.insert(input.into_row()).await?;
        Ok(AdmissionMutationResult::Admission(stored.into()))
    }

    /// Update an admission; requires the current `lastchange` token
    async fn admission_update(
        &self,
        ctx: &Context<'_>,
        input: AdmissionUpdateInput,
    ) -> Result<AdmissionMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let id = input.id;
        match loaders.admissions.update(input.into_patch()).await? {
            UpdateOutcome::Updated(row) => Ok(AdmissionMutationResult::Admission(row.into())),
            UpdateOutcome::NotFound => Ok(AdmissionMutationResult::Error(
                MutationError::not_found("admission", id),
            )),
            UpdateOutcome::Conflict { current } => Ok(AdmissionMutationResult::Error(
                MutationError::conflict("admission", id, current.lastchange()),
            )),
        }
    }

    /// Delete an admission; requires the current `lastchange` token
    async fn admission_delete(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        lastchange: DateTime<Utc>,
    ) -> Result<DeleteMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let outcome = loaders.admissions.delete(id, lastchange).await?;
        Ok(delete_mutation_result("admission", id, outcome))
    }
}
