//! Student admission and exam registration mutations

use async_graphql::{Context, InputObject, Object, Result, Union};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::loaders::{Loaders, UpdateOutcome};
use crate::graphql::types::{StudentAdmission, StudentExamLink};
use crate::models::{
    StudentAdmission as DbStudentAdmission, StudentAdmissionPatch,
    StudentExamLink as DbStudentExamLink, StudentExamLinkPatch, Table,
};

use super::{delete_mutation_result, DeleteMutationResult, MutationError};

/// Result of a student admission insert or update
#[derive(Union)]
pub enum StudentAdmissionMutationResult {
    StudentAdmission(StudentAdmission),
    Error(MutationError),
}

/// Result of an exam registration insert or update
#[derive(Union)]
pub enum StudentExamLinkMutationResult {
    StudentExamLink(StudentExamLink),
    Error(MutationError),
}

/// Fields accepted when creating a student admission
#[derive(InputObject)]
pub struct StudentAdmissionInsertInput {
    pub id: Option<Uuid>,
    pub admission_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
    pub state_id: Option<Uuid>,
    pub extended_condition_date: Option<DateTime<Utc>>,
    pub admissioned: Option<bool>,
    pub enrollment_date: Option<DateTime<Utc>>,
    pub payment_id: Option<Uuid>,
}

impl StudentAdmissionInsertInput {
    fn into_row(self) -> DbStudentAdmission {
        let now = Utc::now();
        DbStudentAdmission {
            id: self.id.unwrap_or_else(Uuid::nil),
            admission_id: self.admission_id,
            student_id: self.student_id,
            state_id: self.state_id,
            extended_condition_date: self.extended_condition_date,
            admissioned: self.admissioned,
            enrollment_date: self.enrollment_date,
            payment_id: self.payment_id,
            created: now,
            lastchange: now,
            createdby: None,
            changedby: None,
            rbacobject: None,
        }
    }
}

/// Fields accepted when updating a student admission
#[derive(InputObject)]
pub struct StudentAdmissionUpdateInput {
    pub id: Uuid,
    /// Token read alongside the entity
    pub lastchange: DateTime<Utc>,
    pub admission_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
    pub state_id: Option<Uuid>,
    pub extended_condition_date: Option<DateTime<Utc>>,
    pub admissioned: Option<bool>,
    pub enrollment_date: Option<DateTime<Utc>>,
    pub payment_id: Option<Uuid>,
}

impl StudentAdmissionUpdateInput {
    fn into_patch(self) -> StudentAdmissionPatch {
        StudentAdmissionPatch {
            id: self.id,
            lastchange: self.lastchange,
            admission_id: self.admission_id,
            student_id: self.student_id,
            state_id: self.state_id,
            extended_condition_date: self.extended_condition_date,
            admissioned: self.admissioned,
            enrollment_date: self.enrollment_date,
            payment_id: self.payment_id,
            changedby: None,
        }
    }
}

/// Fields accepted when registering a student application for an exam
#[derive(InputObject)]
pub struct StudentExamLinkInsertInput {
    pub id: Option<Uuid>,
    pub exam_id: Option<Uuid>,
    pub student_admission_id: Option<Uuid>,
}

impl StudentExamLinkInsertInput {
    fn into_row(self) -> DbStudentExamLink {
        let now = Utc::now();
        DbStudentExamLink {
            id: self.id.unwrap_or_else(Uuid::nil),
            exam_id: self.exam_id,
            student_admission_id: self.student_admission_id,
            created: now,
            lastchange: now,
            createdby: None,
            changedby: None,
            rbacobject: None,
        }
    }
}

/// Fields accepted when moving an exam registration
#[derive(InputObject)]
pub struct StudentExamLinkUpdateInput {
    pub id: Uuid,
    /// Token read alongside the entity
    pub lastchange: DateTime<Utc>,
    pub exam_id: Option<Uuid>,
    pub student_admission_id: Option<Uuid>,
}

impl StudentExamLinkUpdateInput {
    fn into_patch(self) -> StudentExamLinkPatch {
        StudentExamLinkPatch {
            id: self.id,
            lastchange: self.lastchange,
            exam_id: self.exam_id,
            student_admission_id: self.student_admission_id,
            changedby: None,
        }
    }
}

/// Mutations over student applications and their exam registrations
#[derive(Default)]
pub struct StudentMutation;

#[Object]
impl StudentMutation {
    /// Create a student admission
    async fn student_admission_insert(
        &self,
        ctx: &Context<'_>,
        input: StudentAdmissionInsertInput,
    ) -> Result<StudentAdmissionMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let stored = loaders.student_admissions.insert(input.into_row()).await?;
        Ok(StudentAdmissionMutationResult::StudentAdmission(
            stored.into(),
        ))
    }

    /// Update a student admission; requires the current `lastchange` token
    async fn student_admission_update(
        &self,
        ctx: &Context<'_>,
        input: StudentAdmissionUpdateInput,
    ) -> Result<StudentAdmissionMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let id = input.id;
        match loaders.student_admissions.update(input.into_patch()).await? {
            UpdateOutcome::Updated(row) => Ok(StudentAdmissionMutationResult::StudentAdmission(
                row.into(),
            )),
            UpdateOutcome::NotFound => Ok(StudentAdmissionMutationResult::Error(
                MutationError::not_found("student admission", id),
            )),
            UpdateOutcome::Conflict { current } => Ok(StudentAdmissionMutationResult::Error(
                MutationError::conflict("student admission", id, current.lastchange()),
            )),
        }
    }

    /// Delete a student admission; requires the current `lastchange` token
    async fn student_admission_delete(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        lastchange: DateTime<Utc>,
    ) -> Result<DeleteMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let outcome = loaders.student_admissions.delete(id, lastchange).await?;
        Ok(delete_mutation_result("student admission", id, outcome))
    }

    /// Register a student application for an exam
    async fn student_exam_link_insert(
        &self,
        ctx: &Context<'_>,
        input: StudentExamLinkInsertInput,
    ) -> Result<StudentExamLinkMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let stored = loaders.student_exam_links.insert(input.into_row()).await?;
        Ok(StudentExamLinkMutationResult::StudentExamLink(stored.into()))
    }

    /// Move an exam registration; requires the current `lastchange` token
    async fn student_exam_link_update(
        &self,
        ctx: &Context<'_>,
        input: StudentExamLinkUpdateInput,
    ) -> Result<StudentExamLinkMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let id = input.id;
        match loaders.student_exam_links.update(input.into_patch()).await? {
            UpdateOutcome::Updated(row) => Ok(StudentExamLinkMutationResult::StudentExamLink(
                row.into(),
            )),
            UpdateOutcome::NotFound => Ok(StudentExamLinkMutationResult::Error(
                MutationError::not_found("exam registration", id),
            )),
            UpdateOutcome::Conflict { current } => Ok(StudentExamLinkMutationResult::Error(
                MutationError::conflict("exam registration", id, current.lastchange()),
            )),
        }
    }

    /// Remove an exam registration; requires the current `lastchange` token
    async fn student_exam_link_delete(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        lastchange: DateTime<Utc>,
    ) -> Result<DeleteMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let outcome = loaders.student_exam_links.delete(id, lastchange).await?;
        Ok(delete_mutation_result("exam registration", id, outcome))
    }
}
