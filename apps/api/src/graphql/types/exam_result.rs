//! ExamResult GraphQL type

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::loaders::Loaders;
use crate::models::ExamResult as DbExamResult;

use super::exam::Exam;
use super::student_admission::StudentAdmission;

/// Exam result exposed via GraphQL
pub struct ExamResult {
    row: DbExamResult,
}

impl ExamResult {
    pub fn new(row: DbExamResult) -> Self {
        Self { row }
    }
}

impl From<DbExamResult> for ExamResult {
    fn from(row: DbExamResult) -> Self {
        Self::new(row)
    }
}

#[Object]
impl ExamResult {
    /// Unique exam result identifier
    async fn id(&self) -> Uuid {
        self.row.id
    }

    /// Score achieved on the exam
    async fn score(&self) -> Option<f64> {
        self.row.score
    }

    /// Exam the result belongs to
    async fn exam_id(&self) -> Option<Uuid> {
        self.row.exam_id
    }

    /// Student application the result belongs to
    async fn student_admission_id(&self) -> Option<Uuid> {
        self.row.student_admission_id
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

    /// Exam the result belongs to
    async fn exam(&self, ctx: &Context<'_>) -> Result<Option<Exam>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.exams.load(self.row.exam_id).await?;
        Ok(row.map(Exam::from))
    }

    /// Student application the result belongs to
    async fn student_admission(&self, ctx: &Context<'_>) -> Result<Option<StudentAdmission>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders
            .student_admissions
            .load(self.row.student_admission_id)
            .await?;
        Ok(row.map(StudentAdmission::from))
    }
}
