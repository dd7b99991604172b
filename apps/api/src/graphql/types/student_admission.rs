//! StudentAdmission GraphQL type

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};
use futures_util::future::try_join_all;
use uuid::Uuid;

use crate::graphql::loaders::Loaders;
use crate::models::StudentAdmission as DbStudentAdmission;

use super::admission::Admission;
use super::exam::Exam;
use super::exam_result::ExamResult;
use super::external::{State, User};
use super::payment::Payment;

/// Student application for an admission, exposed via GraphQL
pub struct StudentAdmission {
    row: DbStudentAdmission,
}

impl StudentAdmission {
    pub fn new(row: DbStudentAdmission) -> Self {
        Self { row }
    }
}

impl From<DbStudentAdmission> for StudentAdmission {
    fn from(row: DbStudentAdmission) -> Self {
        Self::new(row)
    }
}

#[Object]
impl StudentAdmission {
    /// Unique student admission identifier
    async fn id(&self) -> Uuid {
        self.row.id
    }

    /// Admission the student applied for
    async fn admission_id(&self) -> Option<Uuid> {
        self.row.admission_id
    }

    /// Applying student (external user aggregate)
    async fn student_id(&self) -> Option<Uuid> {
        self.row.student_id
    }

    /// Current state of the application (external state aggregate)
    async fn state_id(&self) -> Option<Uuid> {
        self.row.state_id
    }

    /// Individually extended condition deadline
    async fn extended_condition_date(&self) -> Option<DateTime<Utc>> {
        self.row.extended_condition_date
    }

    /// Whether the student has been admitted
    async fn admissioned(&self) -> Option<bool> {
        self.row.admissioned
    }

    /// Date of enrollment
    async fn enrollment_date(&self) -> Option<DateTime<Utc>> {
        self.row.enrollment_date
    }

    /// Payment covering the admission fee
    async fn payment_id(&self) -> Option<Uuid> {
        self.row.payment_id
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

    /// Admission the student applied for
    async fn admission(&self, ctx: &Context<'_>) -> Result<Option<Admission>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.admissions.load(self.row.admission_id).await?;
        Ok(row.map(Admission::from))
    }

    /// Applying student, resolved by the identity subgraph
    async fn student(&self) -> Option<User> {
        self.row.student_id.map(|id| User { id })
    }

    /// Current application state, resolved by its subgraph
    async fn state(&self) -> Option<State> {
        self.row.state_id.map(|id| State { id })
    }

    /// Payment covering the admission fee
    async fn payment(&self, ctx: &Context<'_>) -> Result<Option<Payment>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.payments.load(self.row.payment_id).await?;
        Ok(row.map(Payment::from))
    }

    /// Results this student achieved
    async fn results(&self, ctx: &Context<'_>) -> Result<Vec<ExamResult>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .exam_results
            .related("student_admission_id", Some(self.row.id))
            .await?;
        Ok(rows.into_iter().map(ExamResult::from).collect())
    }

    /// Exams the student is registered for
    ///
    /// Walks the association table, then loads the far side in one
    /// batched query.
    async fn exams(&self, ctx: &Context<'_>) -> Result<Vec<Exam>> {
        let loaders = ctx.data::<Loaders>()?;
        let links = loaders
            .student_exam_links
            .related("student_admission_id", Some(self.row.id))
            .await?;
        let rows = try_join_all(links.iter().map(|link| loaders.exams.load(link.exam_id))).await?;
        Ok(rows.into_iter().flatten().map(Exam::from).collect())
    }
}
