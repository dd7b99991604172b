//! Admission GraphQL type
//!
//! This module defines the GraphQL type for admission processes with
//! relationship resolvers backed by the request's loaders.

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::loaders::Loaders;
use crate::models::Admission as DbAdmission;

use super::exam_type::ExamType;
use super::external::Program;
use super::payment_info::PaymentInfo;
use super::student_admission::StudentAdmission;

/// Admission process exposed via GraphQL
pub struct Admission {
    row: DbAdmission,
}

impl Admission {
    pub fn new(row: DbAdmission) -> Self {
        Self { row }
    }
}

impl From<DbAdmission> for Admission {
    fn from(row: DbAdmission) -> Self {
        Self::new(row)
    }
}

#[Object]
impl Admission {
    /// Unique admission identifier
    async fn id(&self) -> Uuid {
        self.row.id
    }

    /// Name of the admission entry
    async fn name(&self) -> Option<&str> {
        self.row.name.as_deref()
    }

    /// English name of the admission entry
    async fn name_en(&self) -> Option<&str> {
        self.row.name_en.as_deref()
    }

    /// Program the admission admits into (external aggregate)
    async fn program_id(&self) -> Option<Uuid> {
        self.row.program_id
    }

    /// Payment prescription identifier
    async fn payment_info_id(&self) -> Option<Uuid> {
        self.row.payment_info_id
    }

    /// From when the application can be submitted
    async fn application_start_date(&self) -> Option<DateTime<Utc>> {
        self.row.application_start_date
    }

    /// Until when the application can be submitted
    async fn application_last_date(&self) -> Option<DateTime<Utc>> {
        self.row.application_last_date
    }

    /// Admission validity end date
    async fn end_date(&self) -> Option<DateTime<Utc>> {
        self.row.end_date
    }

    /// Deadline for fulfilling admission conditions
    async fn condition_date(&self) -> Option<DateTime<Utc>> {
        self.row.condition_date
    }

    /// From when a condition extension can be requested
    async fn request_condition_start_date(&self) -> Option<DateTime<Utc>> {
        self.row.request_condition_start_date
    }

    /// Until when a condition extension can be requested
    async fn request_condition_last_date(&self) -> Option<DateTime<Utc>> {
        self.row.request_condition_last_date
    }

    /// From when an exam date can be requested
    async fn request_exam_start_date(&self) -> Option<DateTime<Utc>> {
        self.row.request_exam_start_date
    }

    /// Until when an exam date can be requested
    async fn request_exam_last_date(&self) -> Option<DateTime<Utc>> {
        self.row.request_exam_last_date
    }

    /// Payment deadline
    async fn payment_date(&self) -> Option<DateTime<Utc>> {
        self.row.payment_date
    }

    /// From when enrollment can be requested
    async fn request_enrollment_start_date(&self) -> Option<DateTime<Utc>> {
        self.row.request_enrollment_start_date
    }

    /// Until when enrollment can be requested
    async fn request_enrollment_end_date(&self) -> Option<DateTime<Utc>> {
        self.row.request_enrollment_end_date
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

    /// Program the admission admits into, resolved by its subgraph
    async fn program(&self) -> Option<Program> {
        self.row.program_id.map(|id| Program { id })
    }

    /// Payment prescription attached to this admission
    async fn payment_info(&self, ctx: &Context<'_>) -> Result<Option<PaymentInfo>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.payment_infos.load(self.row.payment_info_id).await?;
        Ok(row.map(PaymentInfo::from))
    }

    /// Exam types belonging to this admission
    async fn exam_types(&self, ctx: &Context<'_>) -> Result<Vec<ExamType>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .exam_types
            .related("admission_id", Some(self.row.id))
            .await?;
        Ok(rows.into_iter().map(ExamType::from).collect())
    }

    /// Student applications submitted for this admission
    async fn student_admissions(&self, ctx: &Context<'_>) -> Result<Vec<StudentAdmission>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .student_admissions
            .related("admission_id", Some(self.row.id))
            .await?;
        Ok(rows.into_iter().map(StudentAdmission::from).collect())
    }
}
