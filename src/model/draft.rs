//! Draft posts: authored content not yet attached to a calendar day.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Platform;

/// A draft post, kept in its own persisted list until attached to a day.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Draft {
    pub id: Uuid,
    pub platform: Platform,
    pub content: String,
    pub created_at: Timestamp,
}

impl Draft {
    pub fn new(platform: Platform, content: String) -> Self {
        Draft {
            id: Uuid::new_v4(),
            platform,
            content,
            created_at: Timestamp::now(),
        }
    }
}
