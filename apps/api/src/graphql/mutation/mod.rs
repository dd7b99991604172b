//! Mutation root for the admissions GraphQL API
//!
//! Every entity gets insert / update / delete. Update and delete require
//! the `lastchange` token read alongside the entity; a stale token makes
//! the mutation answer a [`MutationError`] payload instead of applying,
//! with the token currently held by storage echoed back so the client
//! can re-read and retry.

mod admission;
mod exam;
mod payment;
mod student;

pub use admission::AdmissionMutation;
pub use exam::ExamMutation;
pub use payment::PaymentMutation;
pub use student::StudentMutation;

use async_graphql::{Enum, MergedObject, SimpleObject, Union};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::graphql::loaders::DeleteOutcome;

/// Root mutation type combining all domain mutations
#[derive(MergedObject, Default)]
pub struct Mutation(
    AdmissionMutation,
    ExamMutation,
    StudentMutation,
    PaymentMutation,
);

/// Discriminates why a mutation did not apply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum MutationErrorCode {
    /// No row with the given id exists
    NotFound,
    /// The supplied `lastchange` token does not match storage
    Conflict,
}

/// Failed-mutation payload
#[derive(Debug, Clone, SimpleObject)]
pub struct MutationError {
    /// Human-readable description of the failure
    pub msg: String,
    /// Machine-readable failure kind
    pub code: MutationErrorCode,
    /// Token currently held by storage, present on conflicts
    pub lastchange: Option<DateTime<Utc>>,
}

impl MutationError {
    pub(crate) fn not_found(entity: &str, id: Uuid) -> Self {
        Self {
            msg: format!("{} {} not found", entity, id),
            code: MutationErrorCode::NotFound,
            lastchange: None,
        }
    }

    pub(crate) fn conflict(entity: &str, id: Uuid, current: DateTime<Utc>) -> Self {
        Self {
            msg: format!("{} {} was changed concurrently", entity, id),
            code: MutationErrorCode::Conflict,
            lastchange: Some(current),
        }
    }
}

/// Successful-delete payload
#[derive(Debug, Clone, SimpleObject)]
pub struct DeleteResult {
    /// Id of the removed row
    pub id: Uuid,
    pub msg: String,
}

/// Result of a token-checked delete mutation
#[derive(Union)]
pub enum DeleteMutationResult {
    Ok(DeleteResult),
    Error(MutationError),
}

pub(crate) fn delete_mutation_result(
    entity: &str,
    id: Uuid,
    outcome: DeleteOutcome,
) -> DeleteMutationResult {
    match outcome {
        DeleteOutcome::Deleted => DeleteMutationResult::Ok(DeleteResult {
            id,
            msg: format!("{} deleted", entity),
        }),
        DeleteOutcome::NotFound => {
            DeleteMutationResult::Error(MutationError::not_found(entity, id))
        }
        DeleteOutcome::Conflict { current } => {
            DeleteMutationResult::Error(MutationError::conflict(entity, id, current))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_carries_no_token() {
        let err = MutationError::not_found("admission", Uuid::new_v4());
        assert_eq!(err.code, MutationErrorCode::NotFound);
        assert!(err.lastchange.is_none());
    }

    #[test]
    fn test_conflict_echoes_current_token() {
        let current = Utc::now();
        let err = MutationError::conflict("admission", Uuid::new_v4(), current);
        assert_eq!(err.code, MutationErrorCode::Conflict);
        assert_eq!(err.lastchange, Some(current));
    }

    #[test]
    fn test_delete_outcomes_map_to_payloads() {
        let id = Uuid::new_v4();
        assert!(matches!(
            delete_mutation_result("exam", id, DeleteOutcome::Deleted),
            DeleteMutationResult::Ok(_)
        ));
        assert!(matches!(
            delete_mutation_result("exam", id, DeleteOutcome::NotFound),
            DeleteMutationResult::Error(MutationError {
                code: MutationErrorCode::NotFound,
                ..
            })
        ));
        assert!(matches!(
            delete_mutation_result(
                "exam",
                id,
                DeleteOutcome::Conflict {
                    current: Utc::now()
                }
            ),
            DeleteMutationResult::Error(MutationError {
                code: MutationErrorCode::Conflict,
                ..
            })
        ));
    }
}
