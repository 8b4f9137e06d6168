use thiserror::Error;

#[derive(Debug, Error)]
pub enum QuestionnaireError {
    #[error("unknown questionnaire: {assessment_type} (version {version:?})")]
    UnknownQuestionnaire {
        assessment_type: String,
        version: Option<u32>,
    },

    #[error("duplicate category id '{category_id}' in questionnaire '{assessment_type}'")]
    DuplicateCategory {
        assessment_type: String,
        category_id: String,
    },

    #[error("duplicate question id '{question_id}' in questionnaire '{assessment_type}' v{version}")]
    DuplicateQuestion {
        assessment_type: String,
        version: u32,
        question_id: String,
    },

    #[error("questionnaire '{assessment_type}' v{version} is already registered")]
    AlreadyRegistered { assessment_type: String, version: u32 },

    #[error("failed to read questionnaire file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid questionnaire JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}
