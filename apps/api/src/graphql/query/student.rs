//! Student admission queries

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::filter::{BindValue, WhereFilter};
use crate::graphql::loaders::Loaders;
use crate::graphql::pagination::DEFAULT_LIMIT;
use crate::graphql::types::{State, StudentAdmission, StudentExamLink, User};

use super::page_args;

/// Queries over student applications
#[derive(Default)]
pub struct StudentQuery;

#[Object]
impl StudentQuery {
    /// Get a student admission by ID
    async fn student_admission_by_id(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
    ) -> Result<Option<StudentAdmission>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.student_admissions.load(Some(id)).await?;
        Ok(row.map(StudentAdmission::from))
    }

    /// Page through student admissions
    async fn student_admission_page(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 0)] skip: i32,
        #[graphql(default_with = "DEFAULT_LIMIT")] limit: i32,
        r#where: Option<WhereFilter>,
        orderby: Option<String>,
        #[graphql(default = false)] desc: bool,
    ) -> Result<Vec<StudentAdmission>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .student_admissions
            .page(page_args(skip, limit, r#where, orderby, desc))
            .await?;
        Ok(rows.into_iter().map(StudentAdmission::from).collect())
    }

    /// All applications submitted by one student
    async fn student_admissions_by_student(
        &self,
        ctx: &Context<'_>,
        student_id: Uuid,
    ) -> Result<Vec<StudentAdmission>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .student_admissions
            .filter_by(&[("student_id", BindValue::Uuid(student_id))])
            .await?;
        Ok(rows.into_iter().map(StudentAdmission::from).collect())
    }

    /// Get an exam registration by ID
    async fn student_exam_link_by_id(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
    ) -> Result<Option<StudentExamLink>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.student_exam_links.load(Some(id)).await?;
        Ok(row.map(StudentExamLink::from))
    }

    #[graphql(entity)]
    async fn find_student_admission_by_id(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
    ) -> Result<Option<StudentAdmission>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.student_admissions.load(Some(id)).await?;
        Ok(row.map(StudentAdmission::from))
    }

    #[graphql(entity)]
    async fn find_user_by_id(&self, id: Uuid) -> User {
        User { id }
    }

    #[graphql(entity)]
    async fn find_state_by_id(&self, id: Uuid) -> State {
        State { id }
    }
}
