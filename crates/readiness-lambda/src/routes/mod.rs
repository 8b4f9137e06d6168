pub mod assessments;
pub mod companies;
pub mod health;
pub mod questionnaires;
