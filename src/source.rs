use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;

use crate::error::ImportError;
use crate::model::VideoMetadata;

/// Supplier of video title and description by video ID.
///
/// Network-backed sources (e.g. the YouTube Data API) live outside this crate.
#[async_trait]
pub trait VideoSource: Send + Sync {
    /// Short name used in log lines
    fn source_name(&self) -> &str;

    /// Fetch metadata for an already validated 11-character video ID
    async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, ImportError>;
}

/// Fixed in-memory set of videos
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    videos: HashMap<String, VideoMetadata>,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_video(mut self, video: VideoMetadata) -> Self {
        self.videos.insert(video.id.clone(), video);
        self
    }
}

#[async_trait]
impl VideoSource for StaticSource {
    fn source_name(&self) -> &str {
        "static"
    }

    async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, ImportError> {
        self.videos
            .get(video_id)
            .cloned()
            .ok_or_else(|| ImportError::NotFound(video_id.to_string()))
    }
}

/// Reads `<dir>/<id>.info.json` files, e.g. as written by `yt-dlp --write-info-json`
#[derive(Debug, Clone)]
pub struct InfoJsonSource {
    dir: PathBuf,
}

impl InfoJsonSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, video_id: &str) -> PathBuf {
        self.dir.join(format!("{}.info.json", video_id))
    }
}

#[async_trait]
impl VideoSource for InfoJsonSource {
    fn source_name(&self) -> &str {
        "info-json"
    }

    async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, ImportError> {
        let path = self.path_for(video_id);
        debug!("Reading video metadata from {}", path.display());

        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ImportError::NotFound(video_id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        let mut video: VideoMetadata = serde_json::from_str(&raw)?;
        if video.id.is_empty() {
            video.id = video_id.to_string();
        } else if video.id != video_id {
            return Err(ImportError::Source(format!(
                "{} describes video '{}', expected '{}'",
                path.display(),
                video.id,
                video_id
            )));
        }

        Ok(video)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_source_not_found() {
        let source = StaticSource::new();
        let err = source.fetch("dQw4w9WgXcQ").await.unwrap_err();
        assert!(matches!(err, ImportError::NotFound(id) if id == "dQw4w9WgXcQ"));
    }

    #[tokio::test]
    async fn test_info_json_ignores_extra_keys() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("dQw4w9WgXcQ.info.json"),
            r#"{"id":"dQw4w9WgXcQ","title":"Sekstur","description":"Intro: Hej","duration":212}"#,
        )
        .unwrap();

        let source = InfoJsonSource::new(dir.path());
        let video = source.fetch("dQw4w9WgXcQ").await.unwrap();
        assert_eq!(video.title, "Sekstur");
        assert_eq!(video.description, "Intro: Hej");
    }

    #[tokio::test]
    async fn test_info_json_id_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("dQw4w9WgXcQ.info.json"),
            r#"{"id":"aaaaaaaaaaa","title":"x"}"#,
        )
        .unwrap();

        let source = InfoJsonSource::new(dir.path());
        let err = source.fetch("dQw4w9WgXcQ").await.unwrap_err();
        assert!(matches!(err, ImportError::Source(_)));
    }

    #[tokio::test]
    async fn test_info_json_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let source = InfoJsonSource::new(dir.path());
        let err = source.fetch("dQw4w9WgXcQ").await.unwrap_err();
        assert!(matches!(err, ImportError::NotFound(_)));
    }
}
