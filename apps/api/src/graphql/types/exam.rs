//! Exam GraphQL type

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;
use uuid::Uuid;

use crate::graphql::loaders::Loaders;
use crate::models::Exam as DbExam;

use super::exam_result::ExamResult;
use super::exam_type::ExamType;
use super::external::{Facility, Group};
use super::student_admission::StudentAdmission;

/// Scheduled exam exposed via GraphQL
pub struct Exam {
    row: DbExam,
}

impl Exam {
    pub fn new(row: DbExam) -> Self {
        Self { row }
    }
}

impl From<DbExam> for Exam {
    fn from(row: DbExam) -> Self {
        Self::new(row)
    }
}

#[Object]
impl Exam {
    /// Unique exam identifier
    async fn id(&self) -> Uuid {
        self.row.id
    }

    /// Name of the exam
    async fn name(&self) -> Option<&str> {
        self.row.name.as_deref()
    }

    /// English name of the exam
    async fn name_en(&self) -> Option<&str> {
        self.row.name_en.as_deref()
    }

    /// Date when the exam takes place
    async fn exam_date(&self) -> Option<DateTime<Utc>> {
        self.row.exam_date
    }

    /// Type of this exam
    async fn exam_type_id(&self) -> Option<Uuid> {
        self.row.exam_type_id
    }

    /// Examiner group (external aggregate)
    async fn examiners_id(&self) -> Option<Uuid> {
        self.row.examiners_id
    }

    /// Facility where the exam takes place (external aggregate)
    async fn facility_id(&self) -> Option<Uuid> {
        self.row.facility_id
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

    /// Type of this exam
    async fn exam_type(&self, ctx: &Context<'_>) -> Result<Option<ExamType>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.exam_types.load(self.row.exam_type_id).await?;
        Ok(row.map(ExamType::from))
    }

    /// Examiner group, resolved by the identity subgraph
    async fn examiners(&self) -> Option<Group> {
        self.row.examiners_id.map(|id| Group { id })
    }

    /// Facility hosting the exam, resolved by its subgraph
    async fn facility(&self) -> Option<Facility> {
        self.row.facility_id.map(|id| Facility { id })
    }

    /// Results recorded for this exam
    async fn results(&self, ctx: &Context<'_>) -> Result<Vec<ExamResult>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .exam_results
            .related("exam_id", Some(self.row.id))
            .await?;
        Ok(rows.into_iter().map(ExamResult::from).collect())
    }

    /// Student applications registered for this exam
    ///
    /// Walks the association table, then loads the far side in one
    /// batched query.
    async fn student_admissions(&self, ctx: &Context<'_>) -> Result<Vec<StudentAdmission>> {
        let loaders = ctx.data::<Loaders>()?;
        let links = loaders
            .student_exam_links
            .related("exam_id", Some(self.row.id))
            .await?;
        let rows = try_join_all(
            links
                .iter()
                .map(|link| loaders.student_admissions.load(link.student_admission_id)),
        )
        .await?;
        Ok(rows
            .into_iter()
            .flatten()
            .map(StudentAdmission::from)
            .collect())
    }
}
