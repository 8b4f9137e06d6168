use super::question;
use crate::definition::{Category, QuestionType, QuestionnaireDefinition, Subcategory};

pub const ASSESSMENT_TYPE: &str = "ai_readiness";

const MATURITY: &[&str] = &["none", "initial", "developing", "established", "optimized"];

const DATA_SOURCES: &[&str] = &[
    "crm",
    "erp",
    "data_warehouse",
    "data_lake",
    "spreadsheets",
    "other",
];

const HOSTING: &[&str] = &["on_premises", "hybrid", "public_cloud"];

/// AI Readiness Assessment, version 1.
/// Five categories; "Additional Context" is optional-only.
pub fn definition() -> QuestionnaireDefinition {
    use QuestionType::*;

    let data_readiness = Category {
        id: "data_readiness".to_string(),
        name: "Data Readiness".to_string(),
        description: Some("Availability, quality and accessibility of data.".to_string()),
        subcategories: vec![
            Subcategory {
                id: "data_availability".to_string(),
                name: "Data Availability".to_string(),
                questions: vec![
                    question(
                        "dr_sources",
                        "Which data sources does the organization maintain?",
                        true,
                        MultiSelect,
                        DATA_SOURCES,
                    ),
                    question(
                        "dr_volume_gb",
                        "Approximate volume of analyzable data (GB)",
                        false,
                        Numeric,
                        &[],
                    ),
                ],
            },
            Subcategory {
                id: "data_quality".to_string(),
                name: "Data Quality".to_string(),
                questions: vec![
                    question(
                        "dr_quality",
                        "How would you rate overall data quality?",
                        true,
                        SingleSelect,
                        MATURITY,
                    ),
                    question(
                        "dr_catalog",
                        "Is there a maintained data catalog?",
                        true,
                        Boolean,
                        &[],
                    ),
                ],
            },
        ],
    };

    let infrastructure = Category {
        id: "infrastructure".to_string(),
        name: "Technology Infrastructure".to_string(),
        description: None,
        subcategories: vec![Subcategory {
            id: "compute".to_string(),
            name: "Compute and Platforms".to_string(),
            questions: vec![
                question(
                    "inf_cloud",
                    "Primary hosting model",
                    true,
                    SingleSelect,
                    HOSTING,
                ),
                question(
                    "inf_ml_platform",
                    "Is an ML platform in use?",
                    true,
                    Boolean,
                    &[],
                ),
                question(
                    "inf_notes",
                    "Notable infrastructure constraints",
                    false,
                    FreeText,
                    &[],
                ),
            ],
        }],
    };

    let talent = Category {
        id: "talent".to_string(),
        name: "Talent and Skills".to_string(),
        description: None,
        subcategories: vec![Subcategory {
            id: "team".to_string(),
            name: "Team".to_string(),
            questions: vec![
                question(
                    "tal_data_scientists",
                    "Number of data scientists or ML engineers",
                    true,
                    Numeric,
                    &[],
                ),
                question(
                    "tal_training",
                    "Is AI literacy training offered?",
                    true,
                    Boolean,
                    &[],
                ),
            ],
        }],
    };

    let strategy = Category {
        id: "strategy".to_string(),
        name: "Strategy and Governance".to_string(),
        description: None,
        subcategories: vec![
            Subcategory {
                id: "vision".to_string(),
                name: "Vision".to_string(),
                questions: vec![
                    question(
                        "str_goals",
                        "Describe the primary goals for AI adoption",
                        true,
                        FreeText,
                        &[],
                    ),
                    question(
                        "str_sponsor",
                        "Is there an executive sponsor?",
                        true,
                        Boolean,
                        &[],
                    ),
                ],
            },
            Subcategory {
                id: "governance".to_string(),
                name: "Governance".to_string(),
                questions: vec![question(
                    "str_policy",
                    "Maturity of the AI usage policy",
                    true,
                    SingleSelect,
                    MATURITY,
                )],
            },
        ],
    };

    let additional = Category {
        id: "additional_context".to_string(),
        name: "Additional Context".to_string(),
        description: Some("Optional background for the report.".to_string()),
        subcategories: vec![Subcategory {
            id: "notes".to_string(),
            name: "Notes".to_string(),
            questions: vec![question(
                "ctx_notes",
                "Anything else we should know?",
                false,
                FreeText,
                &[],
            )],
        }],
    };

    QuestionnaireDefinition {
        assessment_type: ASSESSMENT_TYPE.to_string(),
        version: 1,
        name: "AI Readiness Assessment".to_string(),
        categories: vec![data_readiness, infrastructure, talent, strategy, additional],
    }
}
