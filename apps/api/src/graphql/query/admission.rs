//! Admission queries

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::filter::{BindValue, WhereFilter};
use crate::graphql::loaders::Loaders;
use crate::graphql::pagination::DEFAULT_LIMIT;
use crate::graphql::types::{Admission, Program};

use super::page_args;

/// Queries over admission processes
#[derive(Default)]
pub struct AdmissionQuery;

#[Object]
impl AdmissionQuery {
    /// Get an admission by ID
    async fn admission_by_id(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Admission>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.admissions.load(Some(id)).await?;
        Ok(row.map(Admission::from))
    }

    /// Page through admissions
    async fn admission_page(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 0)] skip: i32,
        #[graphql(default_with = "DEFAULT_LIMIT")] limit: i32,
        r#where: Option<WhereFilter>,
        orderby: Option<String>,
        #[graphql(default = false)] desc: bool,
    ) -> Result<Vec<Admission>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .admissions
            .page(page_args(skip, limit, r#where, orderby, desc))
            .await?;
        Ok(rows.into_iter().map(Admission::from).collect())
    }

    /// All admissions admitting into one program
    async fn admissions_by_program(
        &self,
        ctx: &Context<'_>,
        program_id: Uuid,
    ) -> Result<Vec<Admission>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .admissions
            .filter_by(&[("program_id", BindValue::Uuid(program_id))])
            .await?;
        Ok(rows.into_iter().map(Admission::from).collect())
    }

    #[graphql(entity)]
    async fn find_admission_by_id(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
    ) -> Result<Option<Admission>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.admissions.load(Some(id)).await?;
        Ok(row.map(Admission::from))
    }

    #[graphql(entity)]
    async fn find_program_by_id(&self, id: Uuid) -> Program {
        Program { id }
    }
}
