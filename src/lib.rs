//! Dance metadata fields and YouTube description import.
//!
//! The heart of the crate is [`DescriptionParser`], which turns a hand-written
//! video description into field values. [`Importer`] wires a [`VideoSource`]
//! and a [`MetaStore`] around it.
//!
//! ```
//! use fff_danse::parse_description;
//!
//! let fields = parse_description("Intro: Velkommen\nSE1: Første sekvens", "", "");
//! assert_eq!(fields["video_intro"], "Velkommen");
//! assert_eq!(fields["video_se1"], "Første sekvens");
//! ```

pub mod config;
pub mod error;
pub mod fields;
pub mod importer;
pub mod markup;
pub mod model;
pub mod parser;
pub mod source;
pub mod store;
pub mod video_id;

pub use crate::config::Settings;
pub use error::{ImportError, SchemaError};
pub use fields::{FieldDefinition, FieldSchema};
pub use importer::{parse_video_list, read_video_list, Importer};
pub use model::{BatchInput, BatchRequest, BatchSummary, ImportOutcome, VideoMetadata};
pub use parser::{parse_description, DescriptionParser, ParsedFields};
pub use source::{InfoJsonSource, StaticSource, VideoSource};
pub use store::{MemoryStore, MetaStore};
pub use video_id::{embed_url, extract_video_id, playable_video_id};

/// Fetch one video from `source` and parse it without touching any store
///
/// # Example
/// ```no_run
/// # use fff_danse::{preview_video, InfoJsonSource};
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let source = InfoJsonSource::new("videos");
/// let (video, fields) = preview_video(&source, "https://youtu.be/dQw4w9WgXcQ").await?;
/// println!("{}: {} field(s)", video.title, fields.len());
/// # Ok(())
/// # }
/// ```
pub async fn preview_video(
    source: &dyn VideoSource,
    video_input: &str,
) -> Result<(VideoMetadata, ParsedFields), ImportError> {
    let video_id = extract_video_id(video_input)
        .ok_or_else(|| ImportError::InvalidVideo(video_input.trim().to_string()))?;
    let video = source.fetch(&video_id).await?;
    let fields = parse_description(&video.description, &video.title, &video_id);
    Ok((video, fields))
}
