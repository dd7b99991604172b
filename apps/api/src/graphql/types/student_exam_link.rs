//! StudentExamLink GraphQL type
//!
//! Association row between exams and student admissions. Exposed so
//! registrations can be created and removed individually; the
//! many-to-many traversals on `Exam` and `StudentAdmission` resolve
//! through it.

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::loaders::Loaders;
use crate::models::StudentExamLink as DbStudentExamLink;

use super::exam::Exam;
use super::student_admission::StudentAdmission;

/// Registration of a student application for an exam
pub struct StudentExamLink {
    row: DbStudentExamLink,
}

impl StudentExamLink {
    pub fn new(row: DbStudentExamLink) -> Self {
        Self { row }
    }
}

impl From<DbStudentExamLink> for StudentExamLink {
    fn from(row: DbStudentExamLink) -> Self {
        Self::new(row)
    }
}

#[Object]
impl StudentExamLink {
    /// Unique link identifier
    async fn id(&self) -> Uuid {
        self.row.id
    }

    /// Exam side of the registration
    async fn exam_id(&self) -> Option<Uuid> {
        self.row.exam_id
    }

    /// Student application side of the registration
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

    /// Exam side of the registration
    async fn exam(&self, ctx: &Context<'_>) -> Result<Option<Exam>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.exams.load(self.row.exam_id).await?;
        Ok(row.map(Exam::from))
    }

    /// Student application side of the registration
    async fn student_admission(&self, ctx: &Context<'_>) -> Result<Option<StudentAdmission>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders
            .student_admissions
            .load(self.row.student_admission_id)
            .await?;
        Ok(row.map(StudentAdmission::from))
    }
}
