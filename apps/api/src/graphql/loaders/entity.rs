//! Per-table loader with request-scoped caching
//!
//! An [`EntityLoader`] is created once per incoming GraphQL request and
//! bundles everything resolvers need for one table: a batched, cached
//! primary-key loader, memoized foreign-key grouping loaders, and the
//! write path with optimistic concurrency control.

use async_graphql::dataloader::{DataLoader, HashMapCache};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::graphql::filter::{self, BindValue, FilterError, WhereFilter};
use crate::models::{EntityPatch, Mutable, Table};

use super::batch::{FkBatch, IdBatch};

/// Errors surfaced by loader operations
///
/// `NotFound` and token conflicts are not errors here; they are ordinary
/// outcomes carried by [`UpdateOutcome`] and [`DeleteOutcome`].
#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("database error: {0}")]
    Batch(Arc<sqlx::Error>),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("unknown column: {0}")]
    UnknownColumn(String),
}

/// Outcome of a token-checked update
#[derive(Debug)]
pub enum UpdateOutcome<T> {
    Updated(T),
    NotFound,
    /// The supplied token did not match; `current` carries the row as
    /// stored so the caller can surface the fresh token.
    Conflict { current: T },
}

/// Outcome of a token-checked delete
#[derive(Debug)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
    Conflict { current: DateTime<Utc> },
}

/// Paging parameters for [`EntityLoader::page`]
#[derive(Debug, Default)]
pub struct PageArgs {
    pub skip: i64,
    pub limit: i64,
    pub filter: Option<WhereFilter>,
    pub orderby: Option<String>,
    pub desc: bool,
}

/// Cached, batching loader for one table
pub struct EntityLoader<T: Table> {
    pool: PgPool,
    by_id: DataLoader<IdBatch<T>, HashMapCache>,
    /// Grouping loaders, one per foreign-key column, created on first use
    /// so each column's cache lives exactly as long as the request.
    related: Mutex<HashMap<&'static str, Arc<DataLoader<FkBatch<T>, HashMapCache>>>>,
}

impl<T: Table> EntityLoader<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            by_id: DataLoader::with_cache(
                IdBatch::new(pool.clone()),
                tokio::spawn,
                HashMapCache::default(),
            ),
            related: Mutex::new(HashMap::new()),
            pool,
        }
    }

    /// Load one row by primary key
    ///
    /// `None` short-circuits without touching the database. Concurrent
    /// calls within a batch tick coalesce into one query and results are
    /// cached for the rest of the request. A missing id resolves to
    /// `None`, never an error.
    pub async fn load(&self, id: Option<Uuid>) -> Result<Option<T>, LoaderError> {
        let Some(id) = id else {
            return Ok(None);
        };
        self.by_id.load_one(id).await.map_err(LoaderError::Batch)
    }

    /// Load every row whose `column` equals `key`, batched and cached
    ///
    /// `None` keys resolve to an empty list. The column must be one of
    /// the table's declared columns.
    pub async fn related(
        &self,
        column: &'static str,
        key: Option<Uuid>,
    ) -> Result<Vec<T>, LoaderError> {
        let Some(key) = key else {
            return Ok(Vec::new());
        };
        if !T::has_column(column) {
            return Err(LoaderError::UnknownColumn(column.to_string()));
        }
        let loader = {
            let mut map = self.related.lock().await;
            Arc::clone(map.entry(column).or_insert_with(|| {
                Arc::new(DataLoader::with_cache(
                    FkBatch::new(self.pool.clone(), column),
                    tokio::spawn,
                    HashMapCache::default(),
                ))
            }))
        };
        let rows = loader.load_one(key).await.map_err(LoaderError::Batch)?;
        Ok(rows.unwrap_or_default())
    }

    /// One unbatched query with ANDed equality predicates
    ///
    /// Returned rows are primed into the id cache so follow-up `load`s
    /// in the same request hit no further queries.
    pub async fn filter_by(
        &self,
        predicates: &[(&'static str, BindValue)],
    ) -> Result<Vec<T>, LoaderError> {
        let mut sql = format!("SELECT {} FROM {}", T::COLUMNS, T::TABLE);
        for (i, (column, _)) in predicates.iter().enumerate() {
            if !T::has_column(column) {
                return Err(LoaderError::UnknownColumn((*column).to_string()));
            }
            sql.push_str(if i == 0 { " WHERE " } else { " AND " });
            sql.push_str(&format!("{} = ${}", column, i + 1));
        }
        sql.push_str(" ORDER BY id");

        let mut q = sqlx::query_as::<_, T>(&sql);
        for (_, value) in predicates {
            q = filter::bind_one(q, value);
        }
        let rows = q.fetch_all(&self.pool).await?;
        self.prime(&rows).await;
        Ok(rows)
    }

    /// Deterministic page over the table
    ///
    /// Applies the optional compiled `where` tree, orders by the
    /// validated `orderby` column (primary key when absent, with the
    /// primary key as tiebreak otherwise) and slices with
    /// `OFFSET`/`LIMIT`. Rows are primed into the id cache.
    pub async fn page(&self, args: PageArgs) -> Result<Vec<T>, LoaderError> {
        let mut sql = format!("SELECT {} FROM {}", T::COLUMNS, T::TABLE);
        let mut binds = Vec::new();
        if let Some(tree) = &args.filter {
            let compiled = filter::compile(tree, T::COLUMNS, 1)?;
            sql.push_str(" WHERE ");
            sql.push_str(&compiled.sql);
            binds = compiled.binds;
        }

        let order_column = match args.orderby.as_deref() {
            Some(column) => {
                if !T::has_column(column) {
                    return Err(LoaderError::UnknownColumn(column.to_string()));
                }
                column
            }
            None => "id",
        };
        let direction = if args.desc { "DESC" } else { "ASC" };
        sql.push_str(&format!(" ORDER BY {} {}", order_column, direction));
        if order_column != "id" {
            sql.push_str(", id ASC");
        }
        sql.push_str(&format!(
            " OFFSET ${} LIMIT ${}",
            binds.len() + 1,
            binds.len() + 2
        ));

        let mut q = sqlx::query_as::<_, T>(&sql);
        for value in &binds {
            q = filter::bind_one(q, value);
        }
        let rows = q
            .bind(args.skip)
            .bind(args.limit)
            .fetch_all(&self.pool)
            .await?;
        self.prime(&rows).await;
        Ok(rows)
    }

    async fn prime(&self, rows: &[T]) {
        self.by_id
            .feed_many(rows.iter().map(|r| (r.id(), r.clone())))
            .await;
    }

    /// Drop every grouping cache; called after any write so vector
    /// reads later in the request observe the change.
    async fn clear_related(&self) {
        let map = self.related.lock().await;
        for loader in map.values() {
            loader.clear::<Uuid>();
        }
    }

    /// Fresh unbatched read of the stored token, bypassing the cache
    async fn current_token(&self, id: Uuid) -> Result<Option<DateTime<Utc>>, LoaderError> {
        let sql = format!("SELECT lastchange FROM {} WHERE id = $1", T::TABLE);
        let token = sqlx::query_scalar::<_, DateTime<Utc>>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(token)
    }

    /// Fresh unbatched read of a row, bypassing the cache
    async fn fetch_current(&self, id: Uuid) -> Result<Option<T>, LoaderError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE id = $1",
            T::COLUMNS,
            T::TABLE
        );
        let row = sqlx::query_as::<_, T>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }
}

impl<T: Mutable> EntityLoader<T> {
    /// Persist a new row
    ///
    /// Assigns an id when the caller supplied none and stamps both
    /// timestamps. The stored row is returned to the caller but not
    /// primed into the id cache; grouping caches are cleared so vector
    /// reads in the same request pick the row up.
    pub async fn insert(&self, mut row: T) -> Result<T, LoaderError> {
        row.stamp_new(Utc::now());
        let sql = T::insert_sql();
        let stored = T::bind_insert(sqlx::query_as(&sql), &row)
            .fetch_one(&self.pool)
            .await?;
        self.clear_related().await;
        Ok(stored)
    }

    /// Apply a token-checked partial update
    ///
    /// The write itself is a compare-and-set on the old token, so a
    /// concurrent edit between the read and the write also reports
    /// `Conflict` rather than silently overwriting.
    pub async fn update(&self, patch: T::Patch) -> Result<UpdateOutcome<T>, LoaderError> {
        let id = patch.id();
        let Some(mut row) = self.fetch_current(id).await? else {
            return Ok(UpdateOutcome::NotFound);
        };
        let token = row.lastchange();
        if patch.lastchange() != token {
            return Ok(UpdateOutcome::Conflict { current: row });
        }

        row.apply(&patch);
        row.set_lastchange(Utc::now());
        let sql = T::update_sql();
        let stored = T::bind_update(sqlx::query_as(&sql), &row, token)
            .fetch_optional(&self.pool)
            .await?;

        match stored {
            Some(stored) => {
                self.by_id.feed_one(stored.id(), stored.clone()).await;
                self.clear_related().await;
                Ok(UpdateOutcome::Updated(stored))
            }
            // Lost the race between our read and the compare-and-set
            None => match self.fetch_current(id).await? {
                Some(current) => {
                    self.by_id.feed_one(current.id(), current.clone()).await;
                    Ok(UpdateOutcome::Conflict { current })
                }
                None => Ok(UpdateOutcome::NotFound),
            },
        }
    }

    /// Token-checked delete
    ///
    /// Children are left untouched; the schema tolerates dangling
    /// foreign keys and resolvers answer them with `null`/empty.
    pub async fn delete(
        &self,
        id: Uuid,
        lastchange: DateTime<Utc>,
    ) -> Result<DeleteOutcome, LoaderError> {
        let sql = format!("DELETE FROM {} WHERE id = $1 AND lastchange = $2", T::TABLE);
        let result = sqlx::query(&sql)
            .bind(id)
            .bind(lastchange)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() > 0 {
            // The cache has no per-key eviction, so drop it wholesale
            self.by_id.clear::<Uuid>();
            self.clear_related().await;
            return Ok(DeleteOutcome::Deleted);
        }

        match self.current_token(id).await? {
            Some(current) => Ok(DeleteOutcome::Conflict { current }),
            None => Ok(DeleteOutcome::NotFound),
        }
    }
}
