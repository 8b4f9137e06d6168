use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::document::Document;
use crate::keys;

fn active() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Company {
    pub id: Uuid,
    pub name: String,
    pub industry: Option<String>,
    pub description: Option<String>,
    #[serde(default = "active")]
    pub is_active: bool,
    pub created_at: jiff::Timestamp,
    pub updated_at: jiff::Timestamp,
    #[serde(default)]
    pub deleted_at: Option<jiff::Timestamp>,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        let now = jiff::Timestamp::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            industry: None,
            description: None,
            is_active: true,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }
}

impl Document for Company {
    fn key(&self) -> String {
        keys::company(self.id)
    }
}
