//! DataLoader layer for GraphQL
//!
//! This module provides the request-scoped loader registry that solves
//! N+1 query problems in relationship resolvers. Each entity type gets
//! an [`EntityLoader`] bundling a batched primary-key loader, memoized
//! foreign-key grouping loaders and the token-checked write path.

mod batch;
mod entity;

pub use entity::{DeleteOutcome, EntityLoader, LoaderError, PageArgs, UpdateOutcome};

use sqlx::PgPool;

use crate::models::{
    Admission, Exam, ExamResult, ExamType, Payment, PaymentInfo, StudentAdmission,
    StudentExamLink,
};

/// Container for all per-table loaders
///
/// Built once per incoming GraphQL request and injected as request data,
/// so no cached row ever outlives the request that read it. Resolvers
/// obtain it via `ctx.data::<Loaders>()` and never touch the pool
/// directly.
pub struct Loaders {
    pub admissions: EntityLoader<Admission>,
    pub exam_types: EntityLoader<ExamType>,
    pub exams: EntityLoader<Exam>,
    pub exam_results: EntityLoader<ExamResult>,
    pub student_admissions: EntityLoader<StudentAdmission>,
    pub student_exam_links: EntityLoader<StudentExamLink>,
    pub payments: EntityLoader<Payment>,
    pub payment_infos: EntityLoader<PaymentInfo>,
}

impl Loaders {
    pub fn new(pool: PgPool) -> Self {
        Self {
            admissions: EntityLoader::new(pool.clone()),
            exam_types: EntityLoader::new(pool.clone()),
            exams: EntityLoader::new(pool.clone()),
            exam_results: EntityLoader::new(pool.clone()),
            student_admissions: EntityLoader::new(pool.clone()),
            student_exam_links: EntityLoader::new(pool.clone()),
            payments: EntityLoader::new(pool.clone()),
            payment_infos: EntityLoader::new(pool),
        }
    }
}
