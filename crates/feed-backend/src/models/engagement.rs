//! Engagement wire models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JSON record for an appended engagement event (view or contact)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementEventRecord {
    pub kind: String,
    pub item_id: Uuid,
    pub viewer_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

/// JSON record for a reaction upsert
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactionRecord {
    pub item_id: Uuid,
    pub viewer_id: Uuid,
    pub kind: String,
    pub created_at: DateTime<Utc>,
}

/// JSON record for a comment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentRecord {
    pub id: Uuid,
    pub item_id: Uuid,
    pub author_id: Uuid,
    pub author_name: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
}
