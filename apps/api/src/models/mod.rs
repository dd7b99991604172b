//! Database models for the admissions subgraph
//!
//! Every persisted entity carries an immutable `id`, `created` and
//! `lastchange` timestamps, and the audit triple
//! `createdby` / `changedby` / `rbacobject`. `lastchange` doubles as the
//! optimistic-concurrency token: updates and deletes must echo the value
//! they last observed or the write is rejected.
//!
//! Foreign keys are nullable on purpose (tolerant schema); referential
//! integrity is an application concern, not a storage constraint.

pub mod admission;
pub mod exam;
pub mod exam_result;
pub mod exam_type;
pub mod payment;
pub mod payment_info;
pub mod student_admission;
pub mod student_exam_link;

pub use admission::{Admission, AdmissionPatch};
pub use exam::{Exam, ExamPatch};
pub use exam_result::{ExamResult, ExamResultPatch};
pub use exam_type::{ExamType, ExamTypePatch};
pub use payment::{Payment, PaymentPatch};
pub use payment_info::{PaymentInfo, PaymentInfoPatch};
pub use student_admission::{StudentAdmission, StudentAdmissionPatch};
pub use student_exam_link::{StudentExamLink, StudentExamLinkPatch};

use chrono::{DateTime, Utc};
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

/// Row-level contract every persisted entity satisfies.
///
/// `COLUMNS` is the canonical select list; it doubles as the whitelist
/// for `orderby` and where-filter column validation, so nothing outside
/// the declared schema can reach the SQL text.
pub trait Table: for<'r> FromRow<'r, PgRow> + Clone + Send + Sync + Unpin + 'static {
    /// Table name.
    const TABLE: &'static str;

    /// Comma-separated select list matching the struct fields.
    const COLUMNS: &'static str;

    fn id(&self) -> Uuid;

    /// Optimistic-concurrency token.
    fn lastchange(&self) -> DateTime<Utc>;

    /// Value of a declared foreign-key column.
    ///
    /// Only columns named here can be used by the grouping sub-loader;
    /// anything else yields `None` and groups nothing.
    fn key(&self, column: &str) -> Option<Uuid>;

    /// Whether `name` is a column of this table.
    fn has_column(name: &str) -> bool {
        Self::COLUMNS.split(',').any(|c| c.trim() == name)
    }
}

/// Changeset contract: the caller-supplied partial update.
pub trait EntityPatch: Send + Sync + 'static {
    /// Primary key of the row being updated.
    fn id(&self) -> Uuid;

    /// The `lastchange` token the caller last observed.
    fn lastchange(&self) -> DateTime<Utc>;
}

/// Write-side contract for entities exposed through CRUD mutations.
///
/// The merge is an explicit field-by-field copy per entity (`apply`),
/// not an attribute-enumeration trick: which fields are copyable is a
/// declared, testable contract.
pub trait Mutable: Table {
    type Patch: EntityPatch;

    /// Assign an id when the row carries a nil one and stamp the
    /// creation timestamps.
    fn stamp_new(&mut self, now: DateTime<Utc>);

    /// Re-stamp the concurrency token.
    fn set_lastchange(&mut self, now: DateTime<Utc>);

    /// Copy every present (`Some`) patch field onto the row. The patch
    /// `id` and `lastchange` are identity and token, never payload.
    fn apply(&mut self, patch: &Self::Patch);

    /// Bind all columns of `row` onto the insert statement, in
    /// `COLUMNS` order.
    fn bind_insert<'q>(
        q: QueryAs<'q, Postgres, Self, PgArguments>,
        row: &Self,
    ) -> QueryAs<'q, Postgres, Self, PgArguments>;

    /// Bind the id, the non-id columns in `COLUMNS` order, and finally
    /// the compare-and-set token onto the update statement.
    fn bind_update<'q>(
        q: QueryAs<'q, Postgres, Self, PgArguments>,
        row: &Self,
        token: DateTime<Utc>,
    ) -> QueryAs<'q, Postgres, Self, PgArguments>;

    /// `INSERT INTO <table> (<columns>) VALUES ($1..$n) RETURNING <columns>`.
    fn insert_sql() -> String {
        let n = Self::COLUMNS.split(',').count();
        let placeholders = (1..=n)
            .map(|i| format!("${}", i))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            Self::TABLE,
            Self::COLUMNS,
            placeholders,
            Self::COLUMNS
        )
    }

    /// Full-row update guarded by an atomic compare-and-set on the
    /// `lastchange` token.
    fn update_sql() -> String {
        let columns: Vec<&str> = Self::COLUMNS.split(',').map(str::trim).collect();
        let set = columns
            .iter()
            .filter(|c| **c != "id")
            .enumerate()
            .map(|(i, c)| format!("{} = ${}", c, i + 2))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "UPDATE {} SET {} WHERE id = $1 AND lastchange = ${} RETURNING {}",
            Self::TABLE,
            set,
            columns.len() + 1,
            Self::COLUMNS
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_column_trims_whitespace() {
        assert!(Admission::has_column("id"));
        assert!(Admission::has_column("program_id"));
        assert!(Admission::has_column("lastchange"));
        assert!(!Admission::has_column("password"));
        assert!(!Admission::has_column("id; DROP TABLE admissions"));
    }

    #[test]
    fn insert_sql_covers_every_column() {
        let sql = ExamType::insert_sql();
        let n = ExamType::COLUMNS.split(',').count();
        assert!(sql.starts_with("INSERT INTO examtypes"));
        assert!(sql.contains(&format!("${}", n)));
        assert!(!sql.contains(&format!("${}", n + 1)));
        assert!(sql.contains("RETURNING"));
    }

    #[test]
    fn update_sql_guards_on_token_and_never_sets_id() {
        let sql = ExamType::update_sql();
        let n = ExamType::COLUMNS.split(',').count();
        assert!(sql.contains(&format!("WHERE id = $1 AND lastchange = ${}", n + 1)));
        assert!(!sql.contains("id = $2"));
        assert!(sql.contains("lastchange = $"));
    }
}
