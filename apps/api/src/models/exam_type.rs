//! Exam type model
//!
//! A type of exam within an admission. A "master" exam type can group
//! sub exam types through `master_exam_type_id`; the hierarchy is
//! shallow by convention and storage does not guard against cycles, so
//! consumers must only walk one level at a time.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

use super::{EntityPatch, Mutable, Table};

/// Row from the `examtypes` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExamType {
    pub id: Uuid,
    /// Name of the exam type
    pub name: Option<String>,
    /// English name of the exam type
    pub name_en: Option<String>,
    /// Minimum score to pass this exam type
    pub min_score: Option<f64>,
    /// Maximum achievable score
    pub max_score: Option<f64>,
    /// Admission this exam type belongs to
    pub admission_id: Option<Uuid>,
    /// Master exam type grouping this one, if any
    pub master_exam_type_id: Option<Uuid>,
    pub created: DateTime<Utc>,
    pub lastchange: DateTime<Utc>,
    pub createdby: Option<Uuid>,
    pub changedby: Option<Uuid>,
    pub rbacobject: Option<Uuid>,
}

/// Partial update for an [`ExamType`]; `None` fields are left untouched.
#[derive(Debug, Clone)]
pub struct ExamTypePatch {
    pub id: Uuid,
    pub lastchange: DateTime<Utc>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub min_score: Option<f64>,
    pub max_score: Option<f64>,
    pub admission_id: Option<Uuid>,
    pub master_exam_type_id: Option<Uuid>,
    pub changedby: Option<Uuid>,
}

impl EntityPatch for ExamTypePatch {
    fn id(&self) -> Uuid {
        self.id
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }
}

impl Table for ExamType {
    const TABLE: &'static str = "examtypes";

    const COLUMNS: &'static str = "id, name, name_en, min_score, max_score, \
        admission_id, master_exam_type_id, \
        created, lastchange, createdby, changedby, rbacobject";

    fn id(&self) -> Uuid {
        self.id
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }

    fn key(&self, column: &str) -> Option<Uuid> {
        match column {
            "admission_id" => self.admission_id,
            "master_exam_type_id" => self.master_exam_type_id,
            _ => None,
        }
    }
}

impl Mutable for ExamType {
    type Patch = ExamTypePatch;

    fn stamp_new(&mut self, now: DateTime<Utc>) {
        if self.id.is_nil() {
            self.id = Uuid::new_v4();
        }
        self.created = now;
        self.lastchange = now;
    }

    fn set_lastchange(&mut self, now: DateTime<Utc>) {
        self.lastchange = now;
    }

    fn apply(&mut self, patch: &ExamTypePatch) {
        if let Some(v) = &patch.name {
            self.name = Some(v.clone());
        }
        if let Some(v) = &patch.name_en {
            self.name_en = Some(v.clone());
        }
        if let Some(v) = patch.min_score {
            self.min_score = Some(v);
        }
        if let Some(v) = patch.max_score {
            self.max_score = Some(v);
        }
        if let Some(v) = patch.admission_id {
            self.admission_id = Some(v);
        }
        if let Some(v) = patch.master_exam_type_id {
            self.master_exam_type_id = Some(v);
        }
        if let Some(v) = patch.changedby {
            self.changedby = Some(v);
        }
    }

    fn bind_insert<'q>(
        q: QueryAs<'q, Postgres, Self, PgArguments>,
        row: &Self,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        q.bind(row.id)
            .bind(row.name.clone())
            .bind(row.name_en.clone())
            .bind(row.min_score)
            .bind(row.max_score)
            .bind(row.admission_id)
            .bind(row.master_exam_type_id)
            .bind(row.created)
            .bind(row.lastchange)
            .bind(row.createdby)
            .bind(row.changedby)
            .bind(row.rbacobject)
    }

    fn bind_update<'q>(
        q: QueryAs<'q, Postgres, Self, PgArguments>,
        row: &Self,
        token: DateTime<Utc>,
    ) -> QueryAs<'q, Postgres, Self, PgArguments> {
        q.bind(row.id)
            .bind(row.name.clone())
            .bind(row.name_en.clone())
            .bind(row.min_score)
            .bind(row.max_score)
            .bind(row.admission_id)
            .bind(row.master_exam_type_id)
            .bind(row.created)
            .bind(row.lastchange)
            .bind(row.createdby)
            .bind(row.changedby)
            .bind(row.rbacobject)
            .bind(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_merges_score_bounds() {
        let now = Utc::now();
        let mut row = ExamType {
            id: Uuid::new_v4(),
            name: Some("Matematika".into()),
            name_en: None,
            min_score: Some(0.0),
            max_score: None,
            admission_id: None,
            master_exam_type_id: None,
            created: now,
            lastchange: now,
            createdby: None,
            changedby: None,
            rbacobject: None,
        };

        let patch = ExamTypePatch {
            id: row.id,
            lastchange: now,
            name: None,
            name_en: None,
            min_score: Some(50.0),
            max_score: Some(100.0),
            admission_id: None,
            master_exam_type_id: None,
            changedby: None,
        };
        row.apply(&patch);

        assert_eq!(row.min_score, Some(50.0));
        assert_eq!(row.max_score, Some(100.0));
        assert_eq!(row.name.as_deref(), Some("Matematika"));
    }
}
