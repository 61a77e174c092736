//! YouTube description parser.
//!
//! Turns a loosely structured, hand-written video description into field
//! values. Two kinds of structure are recognised:
//!
//! * named blocks such as `Intro:`, `SE1:` or `LÆR2:`, which may span several
//!   lines and map to the `video_*` sequence fields, and
//! * single-line `field_key: value` pairs, accepted only when the key exists
//!   in the [`FieldSchema`].
//!
//! Parsing is best effort: anything unrecognised is skipped, never reported.

mod blocks;
mod pairs;

use std::collections::BTreeMap;

use log::debug;

use crate::fields::FieldSchema;
use crate::markup::strip_all_tags;

use self::blocks::{extract_structured_blocks, map_block_to_field};
use self::pairs::extract_key_value_pairs;

/// Field key to value, as produced by one parse
pub type ParsedFields = BTreeMap<String, String>;

pub const TITLE_FIELD: &str = "danse_navn";
pub const VIDEO_FIELD: &str = "video_videofil";

/// Stateless description parser bound to a field schema
#[derive(Debug, Clone, Copy)]
pub struct DescriptionParser<'a> {
    schema: &'a FieldSchema,
}

impl Default for DescriptionParser<'static> {
    fn default() -> Self {
        Self::new(FieldSchema::builtin())
    }
}

impl<'a> DescriptionParser<'a> {
    pub fn new(schema: &'a FieldSchema) -> Self {
        Self { schema }
    }

    pub fn schema(&self) -> &'a FieldSchema {
        self.schema
    }

    /// Parse a description into field values.
    ///
    /// `title` and `video_id` are fallbacks for `danse_navn` and
    /// `video_videofil` when the description does not set them; pass empty
    /// strings to skip them.
    pub fn parse(&self, description: &str, title: &str, video_id: &str) -> ParsedFields {
        let mut parsed = ParsedFields::new();

        if description.is_empty() {
            return parsed;
        }

        let normalized = description.replace("\r\n", "\n").replace('\r', "\n");
        let lines: Vec<&str> = normalized.split('\n').collect();

        let blocks = extract_structured_blocks(&lines);
        for (block_key, content) in &blocks {
            match map_block_to_field(block_key) {
                Some(field) => {
                    parsed.insert(field.to_string(), content.trim().to_string());
                }
                None => debug!("Block '{}' has no field mapping", block_key),
            }
        }

        // Residual pairs win over block values for the same key
        parsed.extend(extract_key_value_pairs(&lines, &blocks, self.schema));

        if !title.is_empty() && !parsed.contains_key(TITLE_FIELD) {
            parsed.insert(TITLE_FIELD.to_string(), strip_all_tags(title));
        }

        if !video_id.is_empty() && !parsed.contains_key(VIDEO_FIELD) {
            parsed.insert(VIDEO_FIELD.to_string(), video_id.to_string());
        }

        debug!("Parsed {} field(s) from description", parsed.len());
        parsed
    }
}

/// Parse with the built-in schema
pub fn parse_description(description: &str, title: &str, video_id: &str) -> ParsedFields {
    DescriptionParser::default().parse(description, title, video_id)
}
