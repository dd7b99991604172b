//! Query root for the admissions GraphQL API

mod admission;
mod exam;
mod payment;
mod student;

pub use admission::AdmissionQuery;
pub use exam::ExamQuery;
pub use payment::PaymentQuery;
pub use student::StudentQuery;

use async_graphql::MergedObject;

use crate::graphql::filter::WhereFilter;
use crate::graphql::loaders::PageArgs;
use crate::graphql::pagination::{clamp_limit, clamp_skip, MAX_LIMIT};

/// Root query type combining all domain queries
#[derive(MergedObject, Default)]
pub struct Query(AdmissionQuery, ExamQuery, StudentQuery, PaymentQuery);

/// Build loader paging parameters from raw resolver arguments
pub(crate) fn page_args(
    skip: i32,
    limit: i32,
    filter: Option<WhereFilter>,
    orderby: Option<String>,
    desc: bool,
) -> PageArgs {
    PageArgs {
        skip: clamp_skip(skip),
        limit: clamp_limit(limit, MAX_LIMIT),
        filter,
        orderby,
        desc,
    }
}
