//! Admission model
//!
//! One admission round for an academic program, with the date windows
//! governing applications, conditions, exam requests and enrollment.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

use super::{EntityPatch, Mutable, Table};

/// Row from the `admissions` table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Admission {
    pub id: Uuid,
    /// Name of the admission entry
    pub name: Option<String>,
    /// English name of the admission entry
    pub name_en: Option<String>,
    /// Associated academic program (external aggregate)
    pub program_id: Option<Uuid>,
    /// Payment information shared by applicants of this admission
    pub payment_info_id: Option<Uuid>,
    /// From when an application can be submitted
    pub application_start_date: Option<DateTime<Utc>>,
    /// Until when an application can be submitted
    pub application_last_date: Option<DateTime<Utc>>,
    /// Admission validity end date
    pub end_date: Option<DateTime<Utc>>,
    /// Until when the admission conditions must be proven
    pub condition_date: Option<DateTime<Utc>>,
    /// From when a condition extension can be requested
    pub request_condition_start_date: Option<DateTime<Utc>>,
    /// Until when a condition extension can be requested
    pub request_condition_last_date: Option<DateTime<Utc>>,
    /// From when an alternative exam date can be requested
    pub request_exam_start_date: Option<DateTime<Utc>>,
    /// Until when an alternative exam date can be requested
    pub request_exam_last_date: Option<DateTime<Utc>>,
    /// Payment due date
    pub payment_date: Option<DateTime<Utc>>,
    /// From when an enrollment transfer can be requested
    pub request_enrollment_start_date: Option<DateTime<Utc>>,
    /// Until when an enrollment transfer can be requested
    pub request_enrollment_end_date: Option<DateTime<Utc>>,
    pub created: DateTime<Utc>,
    pub lastchange: DateTime<Utc>,
    pub createdby: Option<Uuid>,
    pub changedby: Option<Uuid>,
    pub rbacobject: Option<Uuid>,
}

/// Partial update for an [`Admission`]; `None` fields are left untouched.
#[derive(Debug, Clone)]
pub struct AdmissionPatch {
    pub id: Uuid,
    /// Token observed by the caller, checked before writing.
    pub lastchange: DateTime<Utc>,
    pub name: Option<String>,
    pub name_en: Option<String>,
    pub program_id: Option<Uuid>,
    pub payment_info_id: Option<Uuid>,
    pub application_start_date: Option<DateTime<Utc>>,
    pub application_last_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub condition_date: Option<DateTime<Utc>>,
    pub request_condition_start_date: Option<DateTime<Utc>>,
    pub request_condition_last_date: Option<DateTime<Utc>>,
    pub request_exam_start_date: Option<DateTime<Utc>>,
    pub request_exam_last_date: Option<DateTime<Utc>>,
    pub payment_date: Option<DateTime<Utc>>,
    pub request_enrollment_start_date: Option<DateTime<Utc>>,
    pub request_enrollment_end_date: Option<DateTime<Utc>>,
    pub changedby: Option<Uuid>,
}

impl EntityPatch for AdmissionPatch {
    fn id(&self) -> Uuid {
        self.id
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }
}

impl Table for Admission {
    const TABLE: &'static str = "admissions";

    const COLUMNS: &'static str = "id, name, name_en, program_id, payment_info_id, \
        application_start_date, application_last_date, end_date, condition_date, \
        request_condition_start_date, request_condition_last_date, \
        request_exam_start_date, request_exam_last_date, payment_date, \
        request_enrollment_start_date, request_enrollment_end_date, \
        created, lastchange, createdby, changedby, rbacobject";

    fn id(&self) -> Uuid {
        self.id
    }

    fn lastchange(&self) -> DateTime<Utc> {
        self.lastchange
    }

    fn key(&self, column: &str) -> Option<Uuid> {
        match column {
            "program_id" => self.program_id,
            "payment_info_id" => self.payment_info_id,
            _ => None,
        }
    }
}

impl Mutable for Admission {
    type Patch = AdmissionPatch;

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

    fn apply(&mut self, patch: &AdmissionPatch) {
        if let Some(v) = &patch.name {
            self.name = Some(v.clone());
        }
        if let Some(v) = &patch.name_en {
            self.name_en = Some(v.clone());
        }
        if let Some(v) = patch.program_id {
            self.program_id = Some(v);
        }
        if let Some(v) = patch.payment_info_id {
            self.payment_info_id = Some(v);
        }
        if let Some(v) = patch.application_start_date {
            self.application_start_date = Some(v);
        }
        if let Some(v) = patch.application_last_date {
            self.application_last_date = Some(v);
        }
        if let Some(v) = patch.end_date {
            self.end_date = Some(v);
        }
        if let Some(v) = patch.condition_date {
            self.condition_date = Some(v);
        }
        if let Some(v) = patch.request_condition_start_date {
            self.request_condition_start_date = Some(v);
        }
        if let Some(v) = patch.request_condition_last_date {
            self.request_condition_last_date = Some(v);
        }
        if let Some(v) = patch.request_exam_start_date {
            self.request_exam_start_date = Some(v);
        }
        if let Some(v) = patch.request_exam_last_date {
            self.request_exam_last_date = Some(v);
        }
        if let Some(v) = patch.payment_date {
            self.payment_date = Some(v);
        }
        if let Some(v) = patch.request_enrollment_start_date {
            self.request_enrollment_start_date = Some(v);
        }
        if let Some(v) = patch.request_enrollment_end_date {
            self.request_enrollment_end_date = Some(v);
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
            .bind(row.program_id)
            .bind(row.payment_info_id)
            .bind(row.application_start_date)
            .bind(row.application_last_date)
            .bind(row.end_date)
            .bind(row.condition_date)
            .bind(row.request_condition_start_date)
            .bind(row.request_condition_last_date)
            .bind(row.request_exam_start_date)
            .bind(row.request_exam_last_date)
            .bind(row.payment_date)
            .bind(row.request_enrollment_start_date)
            .bind(row.request_enrollment_end_date)
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
            .bind(row.program_id)
            .bind(row.payment_info_id)
            .bind(row.application_start_date)
            .bind(row.application_last_date)
            .bind(row.end_date)
            .bind(row.condition_date)
            .bind(row.request_condition_start_date)
            .bind(row.request_condition_last_date)
            .bind(row.request_exam_start_date)
            .bind(row.request_exam_last_date)
            .bind(row.payment_date)
            .bind(row.request_enrollment_start_date)
            .bind(row.request_enrollment_end_date)
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

    fn blank(now: DateTime<Utc>) -> Admission {
        Admission {
            id: Uuid::nil(),
            name: None,
            name_en: None,
            program_id: None,
            payment_info_id: None,
            application_start_date: None,
            application_last_date: None,
            end_date: None,
            condition_date: None,
            request_condition_start_date: None,
            request_condition_last_date: None,
            request_exam_start_date: None,
            request_exam_last_date: None,
            payment_date: None,
            request_enrollment_start_date: None,
            request_enrollment_end_date: None,
            created: now,
            lastchange: now,
            createdby: None,
            changedby: None,
            rbacobject: None,
        }
    }

    #[test]
    fn stamp_new_assigns_id_and_timestamps() {
        let now = Utc::now();
        let mut row = blank(now);
        row.stamp_new(now);
        assert!(!row.id.is_nil());
        assert_eq!(row.created, now);
        assert_eq!(row.lastchange, now);
    }

    #[test]
    fn stamp_new_keeps_caller_supplied_id() {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let mut row = blank(now);
        row.id = id;
        row.stamp_new(now);
        assert_eq!(row.id, id);
    }

    #[test]
    fn apply_skips_absent_fields() {
        let now = Utc::now();
        let mut row = blank(now);
        row.name = Some("Projektovy den".into());
        let program = Uuid::new_v4();

        let patch = AdmissionPatch {
            id: row.id,
            lastchange: row.lastchange,
            name: None,
            name_en: Some("Project day".into()),
            program_id: Some(program),
            payment_info_id: None,
            application_start_date: None,
            application_last_date: None,
            end_date: None,
            condition_date: None,
            request_condition_start_date: None,
            request_condition_last_date: None,
            request_exam_start_date: None,
            request_exam_last_date: None,
            payment_date: None,
            request_enrollment_start_date: None,
            request_enrollment_end_date: None,
            changedby: None,
        };
        row.apply(&patch);

        assert_eq!(row.name.as_deref(), Some("Projektovy den"));
        assert_eq!(row.name_en.as_deref(), Some("Project day"));
        assert_eq!(row.program_id, Some(program));
        assert_eq!(row.payment_info_id, None);
    }

    #[test]
    fn declared_foreign_keys_only() {
        let now = Utc::now();
        let mut row = blank(now);
        row.program_id = Some(Uuid::new_v4());
        assert_eq!(row.key("program_id"), row.program_id);
        assert_eq!(row.key("name"), None);
        assert_eq!(row.key("nonexistent"), None);
    }
}
