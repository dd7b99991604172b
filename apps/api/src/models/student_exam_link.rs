//! Student-exam link model
//!
//! Pure association row for the many-to-many relation between exams and
//! student admissions. No payload beyond the audit fields.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

use super::{EntityPatch, Mutable, Table};

/// Row from the `studentexamlinks` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentExamLink {
    pub id: Uuid,
    /// Linked exam
    pub exam_id: Option<Uuid>,
    /// Linked student admission
    pub student_admission_id: Option<Uuid>,
    pub created: DateTime<Utc>,
    pub lastchange: DateTime<Utc>,
    pub createdby: Option<Uuid>,
    pub changedby: Option<Uuid>,
    pub rbacobject: Option<Uuid>,
}

/// Partial update for a [`StudentExamLink`]; `None` fields are left untouched.
#[derive(Debug, Clone)]
pub struct StudentExamLinkPatch {
    pub id: Uuid,
    pub lastchange: DateTime<Utc>,
    pub exam_id: Option<Uuid>,
    pub student_admission_id: Option<Uuid>,
    pub changedby: Option<Uuid>,
}

impl EntityPatch for StudentExamLinkPatch {
    fn id(&self) -> Uuid {
        self.id
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }
}

impl Table for StudentExamLink {
    const TABLE: &'static str = "studentexamlinks";

    const COLUMNS: &'static str = "id, exam_id, student_admission_id, \
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

impl Mutable for StudentExamLink {
    type Patch = StudentExamLinkPatch;

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

    fn apply(&mut self, patch: &StudentExamLinkPatch) {
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
