//! Student admission model

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

use super::{EntityPatch, Mutable, Table};

/// Row from the `studentadmissions` table: one applicant's progress
/// through an admission.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StudentAdmission {
    pub id: Uuid,
    /// Admission the student applied to
    pub admission_id: Option<Uuid>,
    /// Applying user (external aggregate)
    pub student_id: Option<Uuid>,
    /// Current state of the application (external aggregate)
    pub state_id: Option<Uuid>,
    /// Extended deadline for proving admission conditions
    pub extended_condition_date: Option<DateTime<Utc>>,
    /// Whether the student has been admissioned
    pub admissioned: Option<bool>,
    /// Scheduled enrollment date
    pub enrollment_date: Option<DateTime<Utc>>,
    /// Payment of the admission fee
    pub payment_id: Option<Uuid>,
    pub created: DateTime<Utc>,
    pub lastchange: DateTime<Utc>,
    pub createdby: Option<Uuid>,
    pub changedby: Option<Uuid>,
    pub rbacobject: Option<Uuid>,
}

/// Partial update for a [`StudentAdmission`]; `None` fields are left untouched.
#[derive(Debug, Clone)]
pub struct StudentAdmissionPatch {
    pub id: Uuid,
    pub lastchange: DateTime<Utc>,
    pub admission_id: Option<Uuid>,
    pub student_id: Option<Uuid>,
    pub state_id: Option<Uuid>,
    pub extended_condition_date: Option<DateTime<Utc>>,
    pub admissioned: Option<bool>,
    pub enrollment_date: Option<DateTime<Utc>>,
    pub payment_id: Option<Uuid>,
    pub changedby: Option<Uuid>,
}

impl EntityPatch for StudentAdmissionPatch {
    fn id(&self) -> Uuid {
        self.id
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }
}

impl Table for StudentAdmission {
    const TABLE: &'static str = "studentadmissions";

    const COLUMNS: &'static str = "id, admission_id, student_id, state_id, \
        extended_condition_date, admissioned, enrollment_date, payment_id, \
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
            "student_id" => self.student_id,
            "state_id" => self.state_id,
            "payment_id" => self.payment_id,
            _ => None,
        }
    }
}

impl Mutable for StudentAdmission {
    type Patch = StudentAdmissionPatch;

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

    fn apply(&mut self, patch: &StudentAdmissionPatch) {
        if let Some(v) = patch.admission_id {
            self.admission_id = Some(v);
        }
        if let Some(v) = patch.student_id {
            self.student_id = Some(v);
        }
        if let Some(v) = patch.state_id {
            self.state_id = Some(v);
        }
        if let Some(v) = patch.extended_condition_date {
            self.extended_condition_date = Some(v);
        }
        if let Some(v) = patch.admissioned {
            self.admissioned = Some(v);
        }
        if let Some(v) = patch.enrollment_date {
            self.enrollment_date = Some(v);
        }
        if let Some(v) = patch.payment_id {
            self.payment_id = Some(v);
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
            .bind(row.admission_id)
            .bind(row.student_id)
            .bind(row.state_id)
            .bind(row.extended_condition_date)
            .bind(row.admissioned)
            .bind(row.enrollment_date)
            .bind(row.payment_id)
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
            .bind(row.admission_id)
            .bind(row.student_id)
            .bind(row.state_id)
            .bind(row.extended_condition_date)
            .bind(row.admissioned)
            .bind(row.enrollment_date)
            .bind(row.payment_id)
            .bind(row.created)
            .bind(row.lastchange)
            .bind(row.createdby)
            .bind(row.changedby)
            .bind(row.rbacobject)
            .bind(token)
    }
}
