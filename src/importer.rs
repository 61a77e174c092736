use std::path::Path;

use log::{debug, info, warn};

use crate::config::ImportSettings;
use crate::error::ImportError;
use crate::fields::FieldSchema;
use crate::model::{BatchInput, BatchRequest, BatchSummary, ImportOutcome};
use crate::parser::{DescriptionParser, VIDEO_FIELD};
use crate::source::VideoSource;
use crate::store::MetaStore;
use crate::video_id::extract_video_id;

/// Title given to posts created by a batch before their video is imported
pub const PLACEHOLDER_TITLE: &str = "Importing...";

/// Fetches video metadata, parses the description and writes the fields to a post
pub struct Importer<'a> {
    source: &'a dyn VideoSource,
    store: &'a dyn MetaStore,
    parser: DescriptionParser<'a>,
    overwrite: bool,
}

/// One unit of batch work: a video and, if already known, its post
struct BatchItem {
    video_id: String,
    post_id: Option<u64>,
}

impl<'a> Importer<'a> {
    pub fn new(source: &'a dyn VideoSource, store: &'a dyn MetaStore, schema: &'a FieldSchema) -> Self {
        Self {
            source,
            store,
            parser: DescriptionParser::new(schema),
            overwrite: ImportSettings::default().overwrite,
        }
    }

    /// Take the default overwrite behaviour of [`import`](Self::import) from settings
    pub fn with_settings(mut self, settings: &ImportSettings) -> Self {
        self.overwrite = settings.overwrite;
        self
    }

    /// Import one video into `post_id` with the configured overwrite behaviour
    pub async fn import(&self, post_id: u64, video_input: &str) -> Result<ImportOutcome, ImportError> {
        self.import_video(post_id, video_input, self.overwrite).await
    }

    /// Import one video into `post_id`.
    ///
    /// With `overwrite` off, fields that already hold a non-empty value are
    /// left alone and not reported as updated.
    pub async fn import_video(
        &self,
        post_id: u64,
        video_input: &str,
        overwrite: bool,
    ) -> Result<ImportOutcome, ImportError> {
        let video_id = extract_video_id(video_input)
            .ok_or_else(|| ImportError::InvalidVideo(video_input.trim().to_string()))?;

        debug!(
            "Fetching {} from source '{}'",
            video_id,
            self.source.source_name()
        );
        let video = self.source.fetch(&video_id).await?;

        let parsed = self
            .parser
            .parse(&video.description, &video.title, &video_id);

        let mut updated_fields = Vec::with_capacity(parsed.len());
        for (key, value) in &parsed {
            if !overwrite {
                let existing = self.store.get_meta(post_id, key)?;
                if existing.is_some_and(|v| !v.is_empty()) {
                    debug!("Keeping existing value of '{}' on post {}", key, post_id);
                    continue;
                }
            }
            self.store.set_meta(post_id, key, value)?;
            updated_fields.push(key.clone());
        }

        info!(
            "Imported {} into post {}: {} field(s) updated",
            video_id,
            post_id,
            updated_fields.len()
        );

        Ok(ImportOutcome {
            post_id,
            video_id,
            title: video.title,
            updated_fields,
        })
    }

    /// Import many videos. A failing item is counted and logged; it never
    /// stops the batch.
    pub async fn import_all(&self, request: &BatchRequest) -> Result<BatchSummary, ImportError> {
        let items = self.collect_items(&request.input, request.limit)?;

        info!("Starting import of {} video(s)", items.len());

        let mut summary = BatchSummary::default();
        for item in items {
            match self.import_item(&item, request.create_posts).await {
                Ok(outcome) => {
                    summary.succeeded += 1;
                    summary.outcomes.push(outcome);
                }
                Err(e) => {
                    warn!("Import of {} failed: {}", item.video_id, e);
                    summary.failed += 1;
                    summary.errors.push((item.video_id, e.to_string()));
                }
            }
        }

        info!(
            "Import complete: {} succeeded, {} failed",
            summary.succeeded, summary.failed
        );
        Ok(summary)
    }

    /// `limit` caps the list after parsing, but caps stored posts before their
    /// values are checked, so a capped run may yield fewer than `limit` items
    fn collect_items(&self, input: &BatchInput, limit: usize) -> Result<Vec<BatchItem>, ImportError> {
        let cap = if limit > 0 { limit } else { usize::MAX };
        match input {
            BatchInput::List(lines) => {
                let items: Vec<BatchItem> = parse_video_list(lines)
                    .into_iter()
                    .take(cap)
                    .map(|video_id| BatchItem {
                        video_id,
                        post_id: None,
                    })
                    .collect();
                info!("Found {} video ID(s) in list", items.len());
                Ok(items)
            }
            BatchInput::ExistingPosts => {
                let mut items = Vec::new();
                for post_id in self.store.posts_with_meta(VIDEO_FIELD)?.into_iter().take(cap) {
                    let stored = self.store.get_meta(post_id, VIDEO_FIELD)?.unwrap_or_default();
                    if let Some(video_id) = extract_video_id(&stored) {
                        items.push(BatchItem {
                            video_id,
                            post_id: Some(post_id),
                        });
                    }
                }
                info!("Found {} post(s) with video IDs", items.len());
                Ok(items)
            }
        }
    }

    async fn import_item(&self, item: &BatchItem, create_posts: bool) -> Result<ImportOutcome, ImportError> {
        if let Some(post_id) = item.post_id {
            return self.import_video(post_id, &item.video_id, true).await;
        }

        if let Some(post_id) = self.store.find_post_by_meta(VIDEO_FIELD, &item.video_id)? {
            return self.import_video(post_id, &item.video_id, true).await;
        }

        if !create_posts {
            return Err(ImportError::Store(format!(
                "post not found for {} and post creation is disabled",
                item.video_id
            )));
        }

        let post_id = self.store.create_post(PLACEHOLDER_TITLE)?;
        debug!("Created post {} for {}", post_id, item.video_id);

        let outcome = self.import_video(post_id, &item.video_id, true).await?;
        if !outcome.title.is_empty() {
            self.store.set_post_title(post_id, &outcome.title)?;
        }
        Ok(outcome)
    }
}

/// Video IDs from the lines of a list, skipping blanks, `#` comments and
/// anything that is not a recognisable video
pub fn parse_video_list<S: AsRef<str>>(lines: &[S]) -> Vec<String> {
    lines
        .iter()
        .map(|line| line.as_ref().trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let id = extract_video_id(line);
            if id.is_none() {
                warn!("Skipping unrecognised video entry: {}", line);
            }
            id
        })
        .collect()
}

/// Read a video list file, one ID or URL per line
pub async fn read_video_list(path: &Path) -> Result<Vec<String>, ImportError> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(content.lines().map(str::to_string).collect())
}
