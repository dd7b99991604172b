//! GraphQL object types
//!
//! One wrapper type per entity; relationship fields resolve through the
//! request's [`Loaders`](crate::graphql::loaders::Loaders) so repeated
//! lookups batch and cache per request.

mod admission;
mod exam;
mod external;
mod exam_result;
mod exam_type;
mod payment;
mod payment_info;
mod student_admission;
mod student_exam_link;

pub use admission::Admission;
pub use exam::Exam;
pub use external::{Facility, Group, Program, State, User};
pub use exam_result::ExamResult;
pub use exam_type::ExamType;
pub use payment::Payment;
pub use payment_info::PaymentInfo;
pub use student_admission::StudentAdmission;
pub use student_exam_link::StudentExamLink;
