use std::collections::{BTreeMap, HashMap};

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;

use super::blocks::match_block_header;
use crate::fields::FieldSchema;

lazy_static! {
    static ref KEY_VALUE: Regex =
        Regex::new(r"^\s*([A-Za-z0-9_æøåÆØÅ]+)\s*:\s*(.+)$").expect("valid key:value pattern");
}

/// Single-line `key: value` pairs whose key is a schema field.
///
/// Header lines of blocks that were already recorded are skipped. A key seen
/// more than once gets its values joined with newlines, in encounter order.
pub(crate) fn extract_key_value_pairs(
    lines: &[&str],
    blocks: &HashMap<String, String>,
    schema: &FieldSchema,
) -> BTreeMap<String, String> {
    let mut pairs: BTreeMap<String, String> = BTreeMap::new();

    for raw in lines {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(header) = match_block_header(line) {
            if blocks.contains_key(&header.key) {
                continue;
            }
        }

        let Some(caps) = KEY_VALUE.captures(line) else {
            continue;
        };
        let key = caps[1].trim().to_lowercase();
        let value = caps[2].trim();

        if !schema.contains(&key) {
            debug!("Ignoring unknown field '{}'", key);
            continue;
        }

        pairs
            .entry(key)
            .and_modify(|existing| {
                existing.push('\n');
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }

    pairs
}
