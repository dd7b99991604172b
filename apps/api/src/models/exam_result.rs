//! Exam result model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

use super::{EntityPatch, Mutable, Table};

/// Row from the `examresults` table: the score one student admission
/// achieved in one exam. Leaf entity, no children.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ExamResult {
    pub id: Uuid,
    /// Achieved score
    pub score: Option<f64>,
    /// Exam the result belongs to
    pub exam_id: Option<Uuid>,
    /// Student admission the result belongs to
    pub student_admission_id: Option<Uuid>,
    pub created: DateTime<Utc>,
    pub lastchange: DateTime<Utc>,
    pub createdby: Option<Uuid>,
    pub changedby: Option<Uuid>,
    pub rbacobject: Option<Uuid>,
}

/// Partial update for an [`ExamResult`]; `None` fields are left untouched.
#[derive(Debug, Clone)]
pub struct ExamResultPatch {
    pub id: Uuid,
    pub lastchange: DateTime<Utc>,
    pub score: Option<f64>,
    pub exam_id: Option<Uuid>,
    pub student_admission_id: Option<Uuid>,
    pub changedby: Option<Uuid>,
}

impl EntityPatch for ExamResultPatch {
    fn id(&self) -> Uuid {
        self.id
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }
}

impl Table for ExamResult {
    const TABLE: &'static str = "examresults";

    const COLUMNS: &'static str = "id, score, exam_id, student_admission_id, \
        created, lastchange, createdby, changedby, rbacobject";

    fn id(&self) -> Uuid {
        self.id
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }

    fn key(&self, column: &str) -> Option<Uuid> {
        match column {
            "exam_id" => self.exam_id,
            "student_admission_id" => self.student_admission_id,
            _ => None,
        }
    }
}

impl Mutable for ExamResult {
    type Patch = ExamResultPatch;

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

    fn apply(&mut self, patch: &ExamResultPatch) {
        if let Some(v) = patch.score {
            self.score = Some(v);
        }
        if let Some(v) = patch.exam_id {
            self.exam_id = Some(v);
        }
        if let Some(v) = patch.student_admission_id {
            self.student_admission_id = Some(v);
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
            .bind(row.score)
            .bind(row.exam_id)
            .bind(row.student_admission_id)
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
            .bind(row.score)
            .bind(row.exam_id)
            .bind(row.student_admission_id)
            .bind(row.created)
            .bind(row.lastchange)
            .bind(row.createdby)
            .bind(row.changedby)
            .bind(row.rbacobject)
            .bind(token)
    }
}
