//! Database-backed loader tests
//!
//! These tests exercise the loader layer against a real PostgreSQL
//! instance and are ignored by default. Run them with:
//!
//! ```sh
//! DATABASE_URL=postgres://... cargo test -p admissions-api -- --ignored
//! ```

use admissions_api::graphql::loaders::{DeleteOutcome, Loaders, PageArgs, UpdateOutcome};
use admissions_api::models::{Admission, AdmissionPatch, ExamType, ExamTypePatch};
use chrono::{Duration, Utc};
use sqlx::PgPool;
use uuid::Uuid;

async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for loader tests");
    let pool = PgPool::connect(&url).await.expect("database connection");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");
    pool
}

fn blank_admission(name: &str) -> Admission {
    let now = Utc::now();
    Admission {
        id: Uuid::nil(),
        name: Some(name.to_string()),
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

fn blank_exam_type(name: &str, admission_id: Option<Uuid>) -> ExamType {
    let now = Utc::now();
    ExamType {
        id: Uuid::nil(),
        name: Some(name.to_string()),
        name_en: None,
        min_score: Some(0.0),
        max_score: Some(100.0),
        admission_id,
        master_exam_type_id: None,
        created: now,
        lastchange: now,
        createdby: None,
        changedby: None,
        rbacobject: None,
    }
}

#[tokio::test]
#[ignore]
async fn test_insert_assigns_id_and_stamps_token() {
    let loaders = Loaders::new(pool().await);

    let stored = loaders
        .admissions
        .insert(blank_admission("spring intake"))
        .await
        .expect("insert");

    assert_ne!(stored.id, Uuid::nil());
    assert_eq!(stored.created, stored.lastchange);
    assert_eq!(stored.name.as_deref(), Some("spring intake"));
}

#[tokio::test]
#[ignore]
async fn test_insert_keeps_caller_supplied_id() {
    let loaders = Loaders::new(pool().await);

    let id = Uuid::new_v4();
    let mut row = blank_admission("imported intake");
    row.id = id;

    let stored = loaders.admissions.insert(row).await.expect("insert");
    assert_eq!(stored.id, id);
}

#[tokio::test]
#[ignore]
async fn test_concurrent_loads_coalesce_and_cache() {
    let p = pool().await;
    let loaders = Loaders::new(p.clone());

    let a = loaders
        .admissions
        .insert(blank_admission("batch a"))
        .await
        .expect("insert");
    let b = loaders
        .admissions
        .insert(blank_admission("batch b"))
        .await
        .expect("insert");

    let (ra, rb) = tokio::join!(
        loaders.admissions.load(Some(a.id)),
        loaders.admissions.load(Some(b.id)),
    );
    assert_eq!(ra.expect("load").expect("found").id, a.id);
    assert_eq!(rb.expect("load").expect("found").id, b.id);

    // Mutate behind the loader's back; a cached read must not see it
    sqlx::query("UPDATE admissions SET name = $1 WHERE id = $2")
        .bind("renamed behind the cache")
        .bind(a.id)
        .execute(&p)
        .await
        .expect("raw update");

    let cached = loaders
        .admissions
        .load(Some(a.id))
        .await
        .expect("load")
        .expect("found");
    assert_eq!(cached.name.as_deref(), Some("batch a"));
}

#[tokio::test]
#[ignore]
async fn test_load_none_and_missing_resolve_to_none() {
    let loaders = Loaders::new(pool().await);

    let absent = loaders.admissions.load(None).await.expect("load");
    assert!(absent.is_none());

    let missing = loaders
        .admissions
        .load(Some(Uuid::new_v4()))
        .await
        .expect("load");
    assert!(missing.is_none());
}

#[tokio::test]
#[ignore]
async fn test_update_with_fresh_token_applies_and_reprimes_cache() {
    let loaders = Loaders::new(pool().await);

    let stored = loaders
        .admissions
        .insert(blank_admission("before update"))
        .await
        .expect("insert");

    let outcome = loaders
        .admissions
        .update(AdmissionPatch {
            id: stored.id,
            lastchange: stored.lastchange,
            name: Some("after update".to_string()),
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
            changedby: None,
        })
        .await
        .expect("update");

    let updated = match outcome {
        UpdateOutcome::Updated(row) => row,
        other => panic!("expected Updated, got {:?}", other),
    };
    assert_eq!(updated.name.as_deref(), Some("after update"));
    assert!(updated.lastchange > stored.lastchange);

    // The cache now answers with the stored row, not the stale insert
    let cached = loaders
        .admissions
        .load(Some(stored.id))
        .await
        .expect("load")
        .expect("found");
    assert_eq!(cached.name.as_deref(), Some("after update"));
    assert_eq!(cached.lastchange, updated.lastchange);
}

#[tokio::test]
#[ignore]
async fn test_update_with_stale_token_reports_conflict_with_current_row() {
    let loaders = Loaders::new(pool().await);

    let stored = loaders
        .admissions
        .insert(blank_admission("contended"))
        .await
        .expect("insert");

    let stale = stored.lastchange - Duration::seconds(30);
    let outcome = loaders
        .admissions
        .update(AdmissionPatch {
            id: stored.id,
            lastchange: stale,
            name: Some("should not apply".to_string()),
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
            changedby: None,
        })
        .await
        .expect("update");

    match outcome {
        UpdateOutcome::Conflict { current } => {
            assert_eq!(current.lastchange, stored.lastchange);
            assert_eq!(current.name.as_deref(), Some("contended"));
        }
        other => panic!("expected Conflict, got {:?}", other),
    }
}

#[tokio::test]
#[ignore]
async fn test_update_missing_row_reports_not_found() {
    let loaders = Loaders::new(pool().await);

    let outcome = loaders
        .admissions
        .update(AdmissionPatch {
            id: Uuid::new_v4(),
            lastchange: Utc::now(),
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
            changedby: None,
        })
        .await
        .expect("update");

    assert!(matches!(outcome, UpdateOutcome::NotFound));
}

#[tokio::test]
#[ignore]
async fn test_delete_discriminates_conflict_and_not_found() {
    let loaders = Loaders::new(pool().await);

    let stored = loaders
        .admissions
        .insert(blank_admission("to delete"))
        .await
        .expect("insert");

    let stale = stored.lastchange - Duration::seconds(30);
    match loaders
        .admissions
        .delete(stored.id, stale)
        .await
        .expect("delete")
    {
        DeleteOutcome::Conflict { current } => assert_eq!(current, stored.lastchange),
        other => panic!("expected Conflict, got {:?}", other),
    }

    assert!(matches!(
        loaders
            .admissions
            .delete(stored.id, stored.lastchange)
            .await
            .expect("delete"),
        DeleteOutcome::Deleted
    ));

    assert!(matches!(
        loaders
            .admissions
            .delete(stored.id, stored.lastchange)
            .await
            .expect("delete"),
        DeleteOutcome::NotFound
    ));
}

#[tokio::test]
#[ignore]
async fn test_related_groups_by_foreign_key_and_covers_empty_keys() {
    let loaders = Loaders::new(pool().await);

    let with_types = loaders
        .admissions
        .insert(blank_admission("with exam types"))
        .await
        .expect("insert");
    let without_types = loaders
        .admissions
        .insert(blank_admission("without exam types"))
        .await
        .expect("insert");

    loaders
        .exam_types
        .insert(blank_exam_type("written", Some(with_types.id)))
        .await
        .expect("insert");
    loaders
        .exam_types
        .insert(blank_exam_type("oral", Some(with_types.id)))
        .await
        .expect("insert");

    let (populated, empty) = tokio::join!(
        loaders.exam_types.related("admission_id", Some(with_types.id)),
        loaders
            .exam_types
            .related("admission_id", Some(without_types.id)),
    );
    assert_eq!(populated.expect("related").len(), 2);
    assert!(empty.expect("related").is_empty());

    let none = loaders
        .exam_types
        .related("admission_id", None)
        .await
        .expect("related");
    assert!(none.is_empty());
}

#[tokio::test]
#[ignore]
async fn test_write_invalidates_grouping_cache_within_request() {
    let loaders = Loaders::new(pool().await);

    let admission = loaders
        .admissions
        .insert(blank_admission("growing admission"))
        .await
        .expect("insert");

    // Caches the empty grouping for this key
    let before = loaders
        .exam_types
        .related("admission_id", Some(admission.id))
        .await
        .expect("related");
    assert!(before.is_empty());

    loaders
        .exam_types
        .insert(blank_exam_type("added later", Some(admission.id)))
        .await
        .expect("insert");

    // Insert cleared the grouping cache, so the new row is observed
    let after = loaders
        .exam_types
        .related("admission_id", Some(admission.id))
        .await
        .expect("related");
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].name.as_deref(), Some("added later"));
}

#[tokio::test]
#[ignore]
async fn test_filter_by_primes_the_id_cache() {
    let p = pool().await;
    let loaders = Loaders::new(p.clone());

    let program_id = Uuid::new_v4();
    let mut row = blank_admission("primed");
    row.program_id = Some(program_id);
    let stored = loaders.admissions.insert(row).await.expect("insert");

    let found = loaders
        .admissions
        .filter_by(&[(
            "program_id",
            admissions_api::graphql::filter::BindValue::Uuid(program_id),
        )])
        .await
        .expect("filter_by");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].id, stored.id);

    // Mutate behind the loader's back; the primed cache must answer
    sqlx::query("UPDATE admissions SET name = $1 WHERE id = $2")
        .bind("renamed behind the cache")
        .bind(stored.id)
        .execute(&p)
        .await
        .expect("raw update");

    let cached = loaders
        .admissions
        .load(Some(stored.id))
        .await
        .expect("load")
        .expect("found");
    assert_eq!(cached.name.as_deref(), Some("primed"));
}

#[tokio::test]
#[ignore]
async fn test_paging_is_deterministic() {
    let loaders = Loaders::new(pool().await);

    let marker = Uuid::new_v4();
    for name in ["page c", "page a", "page b"] {
        let mut row = blank_admission(name);
        row.program_id = Some(marker);
        loaders.admissions.insert(row).await.expect("insert");
    }

    let filter = admissions_api::graphql::filter::WhereFilter {
        and: None,
        or: None,
        field: Some("program_id".to_string()),
        op: Some(admissions_api::graphql::filter::FilterOp::Eq),
        value: Some(serde_json::json!(marker.to_string())),
    };

    let first_two = loaders
        .admissions
        .page(PageArgs {
            skip: 0,
            limit: 2,
            filter: Some(filter.clone()),
            orderby: Some("name".to_string()),
            desc: false,
        })
        .await
        .expect("page");
    let rest = loaders
        .admissions
        .page(PageArgs {
            skip: 2,
            limit: 2,
            filter: Some(filter),
            orderby: Some("name".to_string()),
            desc: false,
        })
        .await
        .expect("page");

    let names: Vec<_> = first_two
        .iter()
        .chain(rest.iter())
        .map(|a| a.name.clone().unwrap())
        .collect();
    assert_eq!(names, vec!["page a", "page b", "page c"]);
}

#[tokio::test]
#[ignore]
async fn test_admission_scenario_end_to_end() {
    let loaders = Loaders::new(pool().await);

    // An admission with a master exam type and one sub type
    let admission = loaders
        .admissions
        .insert(blank_admission("computer science fall"))
        .await
        .expect("insert");

    let master = loaders
        .exam_types
        .insert(blank_exam_type("entrance exam", Some(admission.id)))
        .await
        .expect("insert");

    let mut sub = blank_exam_type("math section", Some(admission.id));
    sub.master_exam_type_id = Some(master.id);
    let sub = loaders.exam_types.insert(sub).await.expect("insert");

    // Vector read from the admission side sees both types
    let types = loaders
        .exam_types
        .related("admission_id", Some(admission.id))
        .await
        .expect("related");
    assert_eq!(types.len(), 2);

    // The hierarchy resolves one level in each direction
    let subs = loaders
        .exam_types
        .related("master_exam_type_id", Some(master.id))
        .await
        .expect("related");
    assert_eq!(subs.len(), 1);
    assert_eq!(subs[0].id, sub.id);

    let parent = loaders
        .exam_types
        .load(sub.master_exam_type_id)
        .await
        .expect("load")
        .expect("found");
    assert_eq!(parent.id, master.id);

    // Renaming the sub type with its token succeeds and the admission's
    // grouping read observes the change in the same request
    let outcome = loaders
        .exam_types
        .update(ExamTypePatch {
            id: sub.id,
            lastchange: sub.lastchange,
            name: Some("mathematics".to_string()),
            name_en: None,
            min_score: None,
            max_score: None,
            admission_id: None,
            master_exam_type_id: None,
            changedby: None,
        })
        .await
        .expect("update");
    assert!(matches!(outcome, UpdateOutcome::Updated(_)));

    let types = loaders
        .exam_types
        .related("admission_id", Some(admission.id))
        .await
        .expect("related");
    assert!(types
        .iter()
        .any(|t| t.name.as_deref() == Some("mathematics")));
}
