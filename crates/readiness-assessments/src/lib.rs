//! readiness-assessments
//!
//! Response tracking and the assessment lifecycle. Orchestrates the document
//! store and the completion evaluator behind the API the route layer calls.

pub mod companies;
pub mod config;
mod documents;
pub mod error;
pub mod responses;
pub mod service;

pub use companies::{CompanyChanges, CompanyService, NewCompany};
pub use config::{DeleteMode, DeletePolicy, ServiceConfig};
pub use error::AssessmentError;
pub use responses::ResponseStore;
pub use service::AssessmentService;
