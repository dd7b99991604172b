//! Payment queries

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::filter::WhereFilter;
use crate::graphql::loaders::Loaders;
use crate::graphql::pagination::DEFAULT_LIMIT;
use crate::graphql::types::{Payment, PaymentInfo};

use super::page_args;

/// Queries over payments and payment prescriptions
#[derive(Default)]
pub struct PaymentQuery;

#[Object]
impl PaymentQuery {
    /// Get a payment by ID
    async fn payment_by_id(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Payment>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.payments.load(Some(id)).await?;
        Ok(row.map(Payment::from))
    }

    /// Page through payments
    async fn payment_page(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 0)] skip: i32,
        #[graphql(default_with = "DEFAULT_LIMIT")] limit: i32,
        r#where: Option<WhereFilter>,
        orderby: Option<String>,
        #[graphql(default = false)] desc: bool,
    ) -> Result<Vec<Payment>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .payments
            .page(page_args(skip, limit, r#where, orderby, desc))
            .await?;
        Ok(rows.into_iter().map(Payment::from).collect())
    }

    /// Get a payment prescription by ID
    async fn payment_info_by_id(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
    ) -> Result<Option<PaymentInfo>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.payment_infos.load(Some(id)).await?;
        Ok(row.map(PaymentInfo::from))
    }

    /// Page through payment prescriptions
    async fn payment_info_page(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 0)] skip: i32,
        #[graphql(default_with = "DEFAULT_LIMIT")] limit: i32,
        r#where: Option<WhereFilter>,
        orderby: Option<String>,
        #[graphql(default = false)] desc: bool,
    ) -> Result<Vec<PaymentInfo>> {
        let loaders = ctx.data::<Loaders>()?;
        let rows = loaders
            .payment_infos
            .page(page_args(skip, limit, r#where, orderby, desc))
            .await?;
        Ok(rows.into_iter().map(PaymentInfo::from).collect())
    }

    #[graphql(entity)]
    async fn find_payment_by_id(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Payment>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.payments.load(Some(id)).await?;
        Ok(row.map(Payment::from))
    }

    #[graphql(entity)]
    async fn find_payment_info_by_id(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
    ) -> Result<Option<PaymentInfo>> {
        let loaders = ctx.data::<Loaders>()?;
        let row = loaders.payment_infos.load(Some(id)).await?;
        Ok(row.map(PaymentInfo::from))
    }
}
