//! ExamType GraphQL type

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::loaders::Loaders;
use crate::models::ExamType as DbExamType;

use super::admission::Admission;
use super::exam::Exam;

/// Exam type exposed via GraphQL
///
/// Exam types form a shallow master/sub hierarchy through
/// `master_exam_type_id`; each query field only ever walks one level, so
/// traversal depth is bounded by the client query.
pub struct ExamType {
    row: DbExamType,
}

impl ExamType {
    pub fn new(row: DbExamType) -> Self {
        Self { row }
    }
}

impl From<DbExamType> for ExamType {
    fn from(row: DbExamType) -> Self {
        Self::new(row)
    }
}

#[Object]
impl ExamType {
    /// Unique exam type identifier
    async fn id(&self) -> Uuid {
        self.row.id
    }

    /// Name of the exam type
    async fn name(&self) -> Option<&str> {
        self.row.name.as_deref()
    }

    /// English name of the exam type
    async fn name_en(&self) -> Option<&str> {
        self.row.name_en.as_deref()
    }

    /// Minimum achievable score
    async fn min_score(&self) -> Option<f64> {
        self.row.min_score
    }

    /// Maximum achievable score
    async fn max_score(&self) -> Option<f64> {
        self.row.max_score
    }

    /// Admission this exam type belongs to
    async fn admission_id(&self) -> Option<Uuid> {
        self.row.admission_id
    }

    /// Parent exam type in the master/sub hierarchy
    async fn master_exam_type_id(&self) -> Option<Uuid> {
        self.row.master_exam_type_id
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

    /// Admission this exam type belongs to
    async fn admission(&self, ctx: &Context<'_>) -> Result<Option<Admission>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.admissions.load(self.row.admission_id).await?;
        Ok(row.map(Admission::from))
    }

    /// Parent exam type, if any
    async fn master_exam_type(&self, ctx: &Context<'_>) -> Result<Option<ExamType>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.exam_types.load(self.row.master_exam_type_id).await?;
        Ok(row.map(ExamType::from))
    }

    /// Exam types that declare this one as their master
    async fn sub_exam_types(&self, ctx: &Context<'_>) -> Result<Vec<ExamType>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .exam_types
            .related("master_exam_type_id", Some(self.row.id))
            .await?;
        Ok(rows.into_iter().map(ExamType::from).collect())
    }

    /// Scheduled exams of this type
    async fn exams(&self, ctx: &Context<'_>) -> Result<Vec<Exam>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .exams
            .related("exam_type_id", Some(self.row.id))
            .await?;
        Ok(rows.into_iter().map(Exam::from).collect())
    }
}
