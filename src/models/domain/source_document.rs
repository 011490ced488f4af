use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Uploaded study material with its extracted text.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceDocument {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    #[serde(rename = "fileName")]
    pub title: String,
    pub text_extracted: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl SourceDocument {
    pub fn new(user_id: &str, title: &str, text_extracted: &str) -> Self {
        SourceDocument {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            title: title.to_string(),
            text_extracted: text_extracted.to_string(),
            created_at: Some(Utc::now()),
        }
    }

    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}
