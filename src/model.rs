use serde::{Deserialize, Serialize};

use crate::config::ImportSettings;

/// Metadata of one video as delivered by a [`VideoSource`](crate::source::VideoSource)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoMetadata {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// Result of importing one video into one post
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportOutcome {
    pub post_id: u64,
    pub video_id: String,
    pub title: String,
    /// Field keys written to the store, in key order
    pub updated_fields: Vec<String>,
}

/// Where a batch import takes its videos from
#[derive(Debug, Clone)]
pub enum BatchInput {
    /// Lines of a video list; blanks and `#` comments are skipped
    List(Vec<String>),
    /// Every post that already has a `video_videofil` value
    ExistingPosts,
}

#[derive(Debug, Clone)]
pub struct BatchRequest {
    pub input: BatchInput,
    /// Create a post for listed videos that have none
    pub create_posts: bool,
    /// Maximum number of videos to process; 0 means no limit
    pub limit: usize,
}

impl BatchRequest {
    /// A request whose `create_posts` and `limit` come from configuration
    pub fn from_settings(input: BatchInput, settings: &ImportSettings) -> Self {
        Self {
            input,
            create_posts: settings.create_posts,
            limit: settings.limit,
        }
    }
}

/// Counts and per-item outcomes of a batch import
#[derive(Debug, Default, Serialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<ImportOutcome>,
    /// `(video id, error message)` for every failed item
    pub errors: Vec<(String, String)>,
}
