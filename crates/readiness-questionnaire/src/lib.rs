//! readiness-questionnaire
//!
//! Questionnaire definitions and the completion evaluator. Pure data and pure
//! functions: no storage dependency. Defines the category, subcategory and
//! question tree of each supported assessment type, and how saved answers map
//! onto completion status.

pub mod builtin;
pub mod completion;
pub mod definition;
pub mod error;
pub mod registry;

pub use definition::{Category, Question, QuestionType, QuestionnaireDefinition, Subcategory};
pub use registry::{QuestionnaireProvider, Registry};
