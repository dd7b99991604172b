//! Exam, exam type and exam result mutations

use async_graphql::{Context, InputObject, Object, Result, Union};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::loaders::{Loaders, UpdateOutcome};
use crate::graphql::types::{Exam, ExamResult, ExamType};
use crate::models::{
    Exam as DbExam, ExamPatch, ExamResult as DbExamResult, ExamResultPatch,
    ExamType as DbExamType, ExamTypePatch, Table,
};

use super::{delete_mutation_result, DeleteMutationResult, MutationError};

/// Result of an exam type insert or update
#[derive(Union)]
pub enum ExamTypeMutationResult {
    ExamType(ExamType),
    Error(MutationError),
}

/// Result of an exam insert or update
#[derive(Union)]
pub enum ExamMutationResult {
    Exam(Exam),
    Error(MutationError),
}

/// Result of an exam result insert or update
#[derive(Union)]
pub enum ExamResultMutationResult {
    ExamResult(ExamResult),
    Error(MutationError),
}

/// Fields accepted when creating an exam type
#[derive(InputObject)]
pub struct ExamTypeInsertInput {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    pub admission_id: Option<Uuid>,
    pub master_exam_type_id: Option<Uuid>,
}

impl ExamTypeInsertInput {
    fn into_row(self) -> DbExamType {
        let now = Utc::now();
        DbExamType {
            id: self.id.unwrap_or_else(Uuid::nil),
            name: self.name,
            name_en: self.name_en,
            min_score: self.min_score,
            max_score: self.max_score,
            admission_id: self.admission_id,
            master_exam_type_id: self.master_exam_type_id,
            created: now,
            lastchange: now,
            createdby: None,
            changedby: None,
            rbacobject: None,
        }
    }
}

/// Fields accepted when updating an exam type
#[derive(InputObject)]
pub struct ExamTypeUpdateInput {
    pub id: Uuid,
    /// Token read alongside the entity
    pub lastchange: DateTime<Utc>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    pub admission_id: Option<Uuid>,
    pub master_exam_type_id: Option<Uuid>,
}

impl ExamTypeUpdateInput {
    fn into_patch(self) -> ExamTypePatch {
        ExamTypePatch {
            id: self.id,
            lastchange: self.lastchange,
            name: self.name,
            name_en: self.name_en,
            min_score: self.min_score,
            max_score: self.max_score,
            admission_id: self.admission_id,
            master_exam_type_id: self.master_exam_type_id,
            changedby: None,
        }
    }
}

/// Fields accepted when creating an exam
#[derive(InputObject)]
pub struct ExamInsertInput {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub exam_date: Option<DateTime<Utc>>,
    pub exam_type_id: Option<Uuid>,
    pub examiners_id: Option<Uuid>,
    pub facility_id: Option<Uuid>,
}

impl ExamInsertInput {
    fn into_row(self) -> DbExam {
        let now = Utc::now();
        DbExam {
            id: self.id.unwrap_or_else(Uuid::nil),
            name: self.name,
            name_en: self.name_en,
            exam_date: self.exam_date,
            exam_type_id: self.exam_type_id,
            examiners_id: self.examiners_id,
            facility_id: self.facility_id,
            created: now,
            lastchange: now,
            createdby: None,
            changedby: None,
            rbacobject: None,
        }
    }
}

/// Fields accepted when updating an exam
#[derive(InputObject)]
pub struct ExamUpdateInput {
    pub id: Uuid,
    /// Token read alongside the entity
    pub lastchange: DateTime<Utc>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub exam_date: Option<DateTime<Utc>>,
    pub exam_type_id: Option<Uuid>,
    pub examiners_id: Option<Uuid>,
    pub facility_id: Option<Uuid>,
}

impl ExamUpdateInput {
    fn into_patch(self) -> ExamPatch {
        ExamPatch {
            id: self.id,
            lastchange: self.lastchange,
            name: self.name,
            name_en: self.name_en,
            exam_date: self.exam_date,
            exam_type_id: self.exam_type_id,
            examiners_id: self.examiners_id,
            facility_id: self.facility_id,
            changedby: None,
        }
    }
}

/// Fields accepted when creating an exam result
#[derive(InputObject)]
pub struct ExamResultInsertInput {
    pub id: Option<Uuid>,
    pub score: Option<f64>,
    pub exam_id: Option<Uuid>,
    pub student_admission_id: Option<Uuid>,
}

impl ExamResultInsertInput {
    fn into_row(self) -> DbExamResult {
        let now = Utc::now();
        DbExamResult {
            id: self.id.unwrap_or_else(Uuid::nil),
            score: self.score,
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

/// Fields accepted when updating an exam result
#[derive(InputObject)]
pub struct ExamResultUpdateInput {
    pub id: Uuid,
    /// Token read alongside the entity
    pub lastchange: DateTime<Utc>,
    pub score: Option<f64>,
    pub exam_id: Option<Uuid>,
    pub student_admission_id: Option<Uuid>,
}

impl ExamResultUpdateInput {
    fn into_patch(self) -> ExamResultPatch {
        ExamResultPatch {
            id: self.id,
            lastchange: self.lastchange,
            score: self.score,
            exam_id: self.exam_id,
            student_admission_id: self.student_admission_id,
            changedby: None,
        }
    }
}

/// Mutations over exam types, exams and their results
#[derive(Default)]
pub struct ExamMutation;

#[Object]
impl ExamMutation {
    /// Create an exam type
    async fn exam_type_insert(
        &self,
        ctx: &Context<'_>,
        input: ExamTypeInsertInput,
    ) -> Result<ExamTypeMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let stored = loaders.exam_types.insert(input.into_row()).await?;
        Ok(ExamTypeMutationResult::ExamType(stored.into()))
    }

    /// Update an exam type; requires the current `lastchange` token
    async fn exam_type_update(
        &self,
        ctx: &Context<'_>,
        input: ExamTypeUpdateInput,
    ) -> Result<ExamTypeMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let id = input.id;
        match loaders.exam_types.update(input.into_patch()).await? {
            UpdateOutcome::Updated(row) => Ok(ExamTypeMutationResult::ExamType(row.into())),
            UpdateOutcome::NotFound => Ok(ExamTypeMutationResult::Error(
                MutationError::not_found("exam type", id),
            )),
            UpdateOutcome::Conflict { current } => Ok(ExamTypeMutationResult::Error(
                MutationError::conflict("exam type", id, current.lastchange()),
            )),
        }
    }

    /// Delete an exam type; requires the current `lastchange` token
    async fn exam_type_delete(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        lastchange: DateTime<Utc>,
    ) -> Result<DeleteMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let outcome = loaders.exam_types.delete(id, lastchange).await?;
        Ok(delete_mutation_result("exam type", id, outcome))
    }

    /// Create an exam
    async fn exam_insert(
        &self,
        ctx: &Context<'_>,
        input: ExamInsertInput,
    ) -> Result<ExamMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let stored = loaders.exams.insert(input.into_row()).await?;
        Ok(ExamMutationResult::Exam(stored.into()))
    }

    /// Update an exam; requires the current `lastchange` token
    async fn exam_update(
        &self,
        ctx: &Context<'_>,
        input: ExamUpdateInput,
    ) -> Result<ExamMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let id = input.id;
        match loaders.exams.update(input.into_patch()).await? {
            UpdateOutcome::Updated(row) => Ok(ExamMutationResult::Exam(row.into())),
            UpdateOutcome::NotFound => {
                Ok(ExamMutationResult::Error(MutationError::not_found("exam", id)))
            }
            UpdateOutcome::Conflict { current } => Ok(ExamMutationResult::Error(
                MutationError::conflict("exam", id, current.lastchange()),
            )),
        }
    }

    /// Delete an exam; requires the current `lastchange` token
    async fn exam_delete(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        lastchange: DateTime<Utc>,
    ) -> Result<DeleteMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let outcome = loaders.exams.delete(id, lastchange).await?;
        Ok(delete_mutation_result("exam", id, outcome))
    }

    /// Record an exam result
    async fn exam_result_insert(
        &self,
        ctx: &Context<'_>,
        input: ExamResultInsertInput,
    ) -> Result<ExamResultMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let stored = loaders.exam_results.insert(input.into_row()).await?;
        Ok(ExamResultMutationResult::ExamResult(stored.into()))
    }

    /// Update an exam result; requires the current `lastchange` token
    async fn exam_result_update(
        &self,
        ctx: &Context<'_>,
        input: ExamResultUpdateInput,
    ) -> Result<ExamResultMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let id = input.id;
        match loaders.exam_results.update(input.into_patch()).await? {
            UpdateOutcome::Updated(row) => Ok(ExamResultMutationResult::ExamResult(row.into())),
            UpdateOutcome::NotFound => Ok(ExamResultMutationResult::Error(
                MutationError::not_found("exam result", id),
            )),
            UpdateOutcome::Conflict { current } => Ok(ExamResultMutationResult::Error(
                MutationError::conflict("exam result", id, current.lastchange()),
            )),
        }
    }

    /// Delete an exam result; requires the current `lastchange` token
    async fn exam_result_delete(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        lastchange: DateTime<Utc>,
    ) -> Result<DeleteMutationResult> {
        let loaders = ctx.data::<Loaders>()?;
        let outcome = loaders.exam_results.delete(id, lastchange).await?;
        Ok(delete_mutation_result("exam result", id, outcome))
    }
}
