//! Exam model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

use super::{EntityPatch, Mutable, Table};

/// Row from the `exams` table: one scheduled exam of an exam type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Exam {
    pub id: Uuid,
    /// Name of the exam
    pub name: Option<String>,
    /// English name of the exam
    pub name_en: Option<String>,
    /// Date of the exam
    pub exam_date: Option<DateTime<Utc>>,
    /// Exam type this exam belongs to
    pub exam_type_id: Option<Uuid>,
    /// Examiner group (external aggregate)
    pub examiners_id: Option<Uuid>,
    /// Facility where the exam takes place (external aggregate)
    pub facility_id: Option<Uuid>,
    pub created: DateTime<Utc>,
    pub lastchange: DateTime<Utc>,
    pub createdby: Option<Uuid>,
    pub changedby: Option<Uuid>,
    pub rbacobject: Option<Uuid>,
}

/// Partial update for an [`Exam`]; `None` fields are left untouched.
#[derive(Debug, Clone)]
pub struct ExamPatch {
    pub id: Uuid,
    pub lastchange: DateTime<Utc>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub exam_date: Option<DateTime<Utc>>,
    pub exam_type_id: Option<Uuid>,
    pub examiners_id: Option<Uuid>,
    pub facility_id: Option<Uuid>,
    pub changedby: Option<Uuid>,
}

impl EntityPatch for ExamPatch {
    fn id(&self) -> Uuid {
        self.id
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }
}

impl Table for Exam {
    const TABLE: &'static str = "exams";

    const COLUMNS: &'static str = "id, name, name_en, exam_date, exam_type_id, \
        examiners_id, facility_id, \
        created, lastchange, createdby, changedby, rbacobject";

    fn id(&self) -> Uuid {
        self.id
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }

    fn key(&self, column: &str) -> Option<Uuid> {
        match column {
            "exam_type_id" => self.exam_type_id,
            "examiners_id" => self.examiners_id,
            "facility_id" => self.facility_id,
            _ => None,
        }
    }
}

impl Mutable for Exam {
    type Patch = ExamPatch;

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

    fn apply(&mut self, patch: &ExamPatch) {
        if let Some(v) = &patch.name {
            self.name = Some(v.clone());
        }
        if let Some(v) = &patch.name_en {
            self.name_en = Some(v.clone());
        }
        if let Some(v) = patch.exam_date {
            self.exam_date = Some(v);
        }
        if let Some(v) = patch.exam_type_id {
            self.exam_type_id = Some(v);
        }
        if let Some(v) = patch.examiners_id {
            self.examiners_id = Some(v);
        }
        if let Some(v) = patch.facility_id {
            self.facility_id = Some(v);
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
            .bind(row.exam_date)
            .bind(row.exam_type_id)
            .bind(row.examiners_id)
            .bind(row.facility_id)
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
            .bind(row.exam_date)
            .bind(row.exam_type_id)
            .bind(row.examiners_id)
            .bind(row.facility_id)
            .bind(row.created)
            .bind(row.lastchange)
            .bind(row.createdby)
            .bind(row.changedby)
            .bind(row.rbacobject)
            .bind(token)
    }
}
