use std::collections::HashMap;

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

lazy_static! {
    /// `Intro:`, `SE1:`, `LÆR2: inline text`
    static ref BLOCK_HEADER: Regex =
        Regex::new(r"(?i)^\s*([A-ZÆØÅ][A-ZÆØÅ0-9]{0,10}):\s*(.*)$").expect("valid header pattern");
    /// Any simple `key: value` line; ends the block that is currently open
    static ref SIMPLE_PAIR: Regex =
        Regex::new(r"(?i)^\s*[a-z0-9_]+\s*:\s*.+$").expect("valid pair pattern");
}

/// Block identifier to field key
const BLOCK_FIELDS: [(&str, &str); 10] = [
    ("intro", "video_intro"),
    ("se1", "video_se1"),
    ("se2", "video_se2"),
    ("se3", "video_se3"),
    ("lær1", "video_lær1"),
    ("lær2", "video_lær2"),
    ("lær3", "video_lær3"),
    ("dans1", "video_dans1"),
    ("dans2", "video_dans2"),
    ("dans3", "video_dans3"),
];

const KEY_SYNONYMS: [(&str, &str); 6] = [
    ("lære1", "lær1"),
    ("laer1", "lær1"),
    ("lære2", "lær2"),
    ("laer2", "lær2"),
    ("lære3", "lær3"),
    ("laer3", "lær3"),
];

/// A matched block header line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BlockHeader {
    /// Normalized block key
    pub key: String,
    /// Trimmed inline content after the colon, possibly empty
    pub content: String,
}

pub(crate) fn match_block_header(line: &str) -> Option<BlockHeader> {
    let caps = BLOCK_HEADER.captures(line)?;
    Some(BlockHeader {
        key: normalize_block_key(&caps[1]),
        content: caps[2].trim().to_string(),
    })
}

/// Lowercase and fold the spelling variants of "lær"
pub(crate) fn normalize_block_key(raw: &str) -> String {
    let key = raw.trim().to_lowercase();
    KEY_SYNONYMS
        .iter()
        .find(|(alias, _)| *alias == key)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(key)
}

pub(crate) fn map_block_to_field(block_key: &str) -> Option<&'static str> {
    BLOCK_FIELDS
        .iter()
        .find(|(block, _)| *block == block_key)
        .map(|(_, field)| *field)
}

fn is_block_boundary(line: &str) -> bool {
    if line.trim().is_empty() {
        return false;
    }
    SIMPLE_PAIR.is_match(line) || BLOCK_HEADER.is_match(line)
}

/// Block currently being accumulated
struct OpenBlock {
    key: String,
    lines: Vec<String>,
}

impl OpenBlock {
    /// Record into `blocks` if anything was accumulated. A later block with
    /// the same key replaces the earlier one.
    fn close_into(self, blocks: &mut HashMap<String, String>) {
        if self.lines.is_empty() {
            debug!("Dropping empty block '{}'", self.key);
            return;
        }
        debug!("Recorded block '{}' ({} lines)", self.key, self.lines.len());
        blocks.insert(self.key, self.lines.join("\n"));
    }
}

/// Collect named multi-line sections, keyed by normalized block key.
///
/// Unmapped keys are kept here; the caller drops them when mapping to fields.
pub(crate) fn extract_structured_blocks(lines: &[&str]) -> HashMap<String, String> {
    let mut blocks = HashMap::new();
    let mut current: Option<OpenBlock> = None;

    for raw in lines {
        let line = raw.trim();

        if let Some(header) = match_block_header(line) {
            if let Some(block) = current.take() {
                block.close_into(&mut blocks);
            }

            let mut lines = Vec::new();
            if !header.content.is_empty() {
                lines.push(header.content);
            }
            current = Some(OpenBlock {
                key: header.key,
                lines,
            });
        } else if current.is_some() {
            if is_block_boundary(line) {
                if let Some(block) = current.take() {
                    block.close_into(&mut blocks);
                }
            } else if let Some(block) = current.as_mut() {
                block.lines.push(line.to_string());
            }
        }
    }

    if let Some(block) = current.take() {
        block.close_into(&mut blocks);
    }

    blocks
}
