//! Exam, exam type and exam result queries

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::filter::WhereFilter;
use crate::graphql::loaders::Loaders;
use crate::graphql::pagination::DEFAULT_LIMIT;
use crate::graphql::types::{Exam, ExamResult, ExamType, Facility, Group};

use super::page_args;

/// Queries over exam types, exams and their results
#[derive(Default)]
pub struct ExamQuery;

#[Object]
impl ExamQuery {
    /// Get an exam type by ID
    async fn exam_type_by_id(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<ExamType>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.exam_types.load(Some(id)).await?;
        Ok(row.map(ExamType::from))
    }

    /// Page through exam types
    async fn exam_type_page(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 0)] skip: i32,
        #[graphql(default_with = "DEFAULT_LIMIT")] limit: i32,
        r#where: Option<WhereFilter>,
        orderby: Option<String>,
        #[graphql(default = false)] desc: bool,
    ) -> Result<Vec<ExamType>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .exam_types
            .page(page_args(skip, limit, r#where, orderby, desc))
            .await?;
        Ok(rows.into_iter().map(ExamType::from).collect())
    }

    /// Get an exam by ID
    async fn exam_by_id(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Exam>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.exams.load(Some(id)).await?;
        Ok(row.map(Exam::from))
    }

    /// Page through exams
    async fn exam_page(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 0)] skip: i32,
        #[graphql(default_with = "DEFAULT_LIMIT")] limit: i32,
        r#where: Option<WhereFilter>,
        orderby: Option<String>,
        #[graphql(default = false)] desc: bool,
    ) -> Result<Vec<Exam>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .exams
            .page(page_args(skip, limit, r#where, orderby, desc))
            .await?;
        Ok(rows.into_iter().map(Exam::from).collect())
    }

    /// Get an exam result by ID
    async fn exam_result_by_id(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<ExamResult>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.exam_results.load(Some(id)).await?;
        Ok(row.map(ExamResult::from))
    }

    /// Page through exam results
    async fn exam_result_page(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 0)] skip: i32,
        #[graphql(default_with = "DEFAULT_LIMIT")] limit: i32,
        r#where: Option<WhereFilter>,
        orderby: Option<String>,
        #[graphql(default = false)] desc: bool,
    ) -> Result<Vec<ExamResult>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .exam_results
            .page(page_args(skip, limit, r#where, orderby, desc))
            .await?;
        Ok(rows.into_iter().map(ExamResult::from).collect())
    }

    #[graphql(entity)]
    async fn find_exam_type_by_id(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
    ) -> Result<Option<ExamType>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.exam_types.load(Some(id)).await?;
        Ok(row.map(ExamType::from))
    }

    #[graphql(entity)]
    async fn find_exam_by_id(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Exam>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.exams.load(Some(id)).await?;
        Ok(row.map(Exam::from))
    }

    #[graphql(entity)]
    async fn find_exam_result_by_id(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
    ) -> Result<Option<ExamResult>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.exam_results.load(Some(id)).await?;
        Ok(row.map(ExamResult::from))
    }

    #[graphql(entity)]
    async fn find_group_by_id(&self, id: Uuid) -> Group {
        Group { id }
    }

    #[graphql(entity)]
    async fn find_facility_by_id(&self, id: Uuid) -> Facility {
        Facility { id }
    }
}
