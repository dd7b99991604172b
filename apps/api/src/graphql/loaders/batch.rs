//! Batch functions behind the per-table DataLoaders
//!
//! Two batchers exist per entity type: one keyed by primary key and one
//! keyed by a declared foreign-key column. Both coalesce every key
//! requested within a batch tick into a single `ANY($1)` query.

use async_graphql::dataloader::Loader;
use sqlx::PgPool;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Arc;
use uuid::Uuid;

use crate::models::Table;

/// Batched primary-key lookup for one table
pub struct IdBatch<T: Table> {
    pool: PgPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Table> IdBatch<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }
}

impl<T: Table> Loader<Uuid> for IdBatch<T> {
    type Value = T;
    type Error = Arc<sqlx::Error>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!(
            "SELECT {} FROM {} WHERE id = ANY($1)",
            T::COLUMNS,
            T::TABLE
        );
        let rows: Vec<T> = sqlx::query_as(&sql)
            .bind(keys)
            .fetch_all(&self.pool)
            .await
            .map_err(Arc::new)?;

        // Missing ids simply stay absent; the DataLoader reports them as None
        Ok(rows.into_iter().map(|r| (r.id(), r)).collect())
    }
}

/// Batched foreign-key grouping lookup for one table
///
/// The column name is fixed at construction and must come from the
/// table's declared column list; callers validate it before building
/// the loader since it is interpolated into the statement.
pub struct FkBatch<T: Table> {
    pool: PgPool,
    column: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Table> FkBatch<T> {
    pub fn new(pool: PgPool, column: &'static str) -> Self {
        Self {
            pool,
            column,
            _marker: PhantomData,
        }
    }
}

impl<T: Table> Loader<Uuid> for FkBatch<T> {
    type Value = Vec<T>;
    type Error = Arc<sqlx::Error>;

    async fn load(&self, keys: &[Uuid]) -> Result<HashMap<Uuid, Self::Value>, Self::Error> {
        if keys.is_empty() {
            return Ok(HashMap::new());
        }
        let sql = format!(
            "SELECT {} FROM {} WHERE {} = ANY($1) ORDER BY {}, id",
            T::COLUMNS,
            T::TABLE,
            self.column,
            self.column
        );
        let rows: Vec<T> = sqlx::query_as(&sql)
            .bind(keys)
            .fetch_all(&self.pool)
            .await
            .map_err(Arc::new)?;

        Ok(group_per_key(self.column, rows, keys))
    }
}

/// Group rows by the value of one foreign-key column
///
/// Every requested key gets an entry, empty when no row references it, so
/// the DataLoader caches the absence instead of retrying.
pub(crate) fn group_per_key<T: Table>(
    column: &str,
    rows: Vec<T>,
    keys: &[Uuid],
) -> HashMap<Uuid, Vec<T>> {
    let mut grouped: HashMap<Uuid, Vec<T>> = HashMap::new();
    for row in rows {
        if let Some(key) = row.key(column) {
            grouped.entry(key).or_default().push(row);
        }
    }
    for key in keys {
        grouped.entry(*key).or_default();
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ExamType;
    use chrono::Utc;

    fn exam_type(admission_id: Option<Uuid>) -> ExamType {
        let now = Utc::now();
        ExamType {
            id: Uuid::new_v4(),
            name: Some("written exam".into()),
            name_en: None,
            min_score: None,
            max_score: None,
            admission_id,
            master_exam_type_id: None,
            created: now,
            lastchange: now,
            createdby: None,
            changedby: None,
            rbacobject: None,
        }
    }

    #[test]
    fn test_group_per_key_splits_by_column_value() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let rows = vec![
            exam_type(Some(a)),
            exam_type(Some(b)),
            exam_type(Some(a)),
        ];
        let grouped = group_per_key("admission_id", rows, &[a, b]);
        assert_eq!(grouped[&a].len(), 2);
        assert_eq!(grouped[&b].len(), 1);
    }

    #[test]
    fn test_group_per_key_covers_every_requested_key() {
        let referenced = Uuid::new_v4();
        let unreferenced = Uuid::new_v4();
        let grouped = group_per_key(
            "admission_id",
            vec![exam_type(Some(referenced))],
            &[referenced, unreferenced],
        );
        assert_eq!(grouped[&referenced].len(), 1);
        assert!(grouped[&unreferenced].is_empty());
    }

    #[test]
    fn test_group_per_key_drops_rows_with_null_key() {
        let key = Uuid::new_v4();
        let grouped = group_per_key("admission_id", vec![exam_type(None)], &[key]);
        assert!(grouped[&key].is_empty());
        assert_eq!(grouped.len(), 1);
    }
}
