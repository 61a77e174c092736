//! Central field definitions for dance posts.
//!
//! A [`FieldSchema`] is the registry of every metadata key a dance post can
//! carry, with a display label and the group it belongs to. The parser uses
//! it to decide which `key: value` lines are real fields; the store accessors
//! at the bottom of this module use it to read values back.

use std::collections::HashMap;

use lazy_static::lazy_static;
use serde::Serialize;

use crate::error::{ImportError, SchemaError};
use crate::store::MetaStore;

/// A single field: its key, human label and group key
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldDefinition {
    pub key: String,
    pub label: String,
    pub group: String,
}

impl FieldDefinition {
    pub fn new(key: impl Into<String>, label: impl Into<String>, group: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            group: group.into(),
        }
    }
}

/// Immutable, ordered registry of valid field keys
#[derive(Debug, Clone)]
pub struct FieldSchema {
    fields: Vec<FieldDefinition>,
    index: HashMap<String, usize>,
}

lazy_static! {
    static ref BUILTIN: FieldSchema =
        FieldSchema::new(builtin_fields()).expect("built-in field table is valid");
}

impl FieldSchema {
    /// Build a schema, rejecting malformed or duplicate keys
    pub fn new(fields: Vec<FieldDefinition>) -> Result<Self, SchemaError> {
        let mut index = HashMap::with_capacity(fields.len());

        for (position, field) in fields.iter().enumerate() {
            if !is_valid_key(&field.key) {
                return Err(SchemaError::InvalidKey(field.key.clone()));
            }
            if index.insert(field.key.clone(), position).is_some() {
                return Err(SchemaError::DuplicateKey(field.key.clone()));
            }
        }

        Ok(Self { fields, index })
    }

    /// The schema shipped with the plugin, built once per process
    pub fn builtin() -> &'static FieldSchema {
        &BUILTIN
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&FieldDefinition> {
        self.index.get(key).map(|&i| &self.fields[i])
    }

    /// Label for a field, or the key itself when the field is unknown
    pub fn label<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).map(|f| f.label.as_str()).unwrap_or(key)
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Fields bucketed by group, groups in order of first appearance
    pub fn grouped(&self) -> Vec<(&str, Vec<&FieldDefinition>)> {
        let mut groups: Vec<(&str, Vec<&FieldDefinition>)> = Vec::new();

        for field in &self.fields {
            match groups.iter_mut().find(|(g, _)| *g == field.group) {
                Some((_, members)) => members.push(field),
                None => groups.push((field.group.as_str(), vec![field])),
            }
        }

        groups
    }

    /// Fields belonging to one group, in declaration order
    pub fn group(&self, group: &str) -> Vec<&FieldDefinition> {
        self.fields.iter().filter(|f| f.group == group).collect()
    }

    /// Like [`group`](Self::group), but a group with no fields is an error
    pub fn require_group(&self, group: &str) -> Result<Vec<&FieldDefinition>, SchemaError> {
        let members = self.group(group);
        if members.is_empty() {
            return Err(SchemaError::UnknownGroup(group.to_string()));
        }
        Ok(members)
    }
}

fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| matches!(c, 'a'..='z' | '0'..='9' | '_' | 'æ' | 'ø' | 'å'))
}

/// Display label for a group key
pub fn group_label(group: &str) -> Option<&'static str> {
    GROUP_LABELS
        .iter()
        .find(|(key, _)| *key == group)
        .map(|(_, label)| *label)
}

const GROUP_LABELS: &[(&str, &str)] = &[
    ("danseinfo", "Danseinfo"),
    ("video", "Video"),
    ("video_alt", "Alternativ video"),
    ("video_groups", "Video-sekvenser"),
    ("trin_figur", "Trin & figur-video"),
    ("audio", "Lyd"),
    ("beskrivelse", "Beskrivelse / PDF"),
    ("historie_audio", "Historie (lyd)"),
    ("historie_text", "Historie (tekst)"),
    ("node", "Noder"),
    ("noter", "Noter"),
    ("lignende", "Lignende danse"),
    ("kommentar", "Kommentar"),
];

const BUILTIN_FIELDS: &[(&str, &str, &str)] = &[
    // Audio
    ("audio_lydfil", "Lydfil", "audio"),
    ("audio_kommentar1", "Lydkommentar 1", "audio"),
    ("audio_kommentar2", "Lydkommentar 2", "audio"),
    ("audio_note", "Lydnote", "audio"),
    ("audio_dato", "Lyddato", "audio"),
    // Beskrivelse / PDF
    ("bes_pdffil", "PDF", "beskrivelse"),
    ("bes_opstil", "PDF-opstilling", "beskrivelse"),
    ("bes_forklar", "PDF-forklaring", "beskrivelse"),
    ("bes_dato", "PDF-dato", "beskrivelse"),
    // Danse-info
    ("danse_navn", "Dansenavn", "danseinfo"),
    ("danse_egn", "Egn", "danseinfo"),
    ("danse_ex_navn", "Alternativt navn", "danseinfo"),
    ("danse_ex_egn", "Alternativ egn", "danseinfo"),
    ("danse_topo", "Topografi", "danseinfo"),
    ("danse_hefte", "Hæfte", "danseinfo"),
    ("danse_side", "Side", "danseinfo"),
    ("danse_opstilling", "Danseopstilling", "danseinfo"),
    ("danse_trin", "Trinbeskrivelse", "danseinfo"),
    ("danse_musik", "Musikinfo", "danseinfo"),
    ("danse_takt", "Takt", "danseinfo"),
    ("danse_figur", "Figurbeskrivelse", "danseinfo"),
    ("danse_niveau", "Niveau", "danseinfo"),
    ("danse_dato", "Dansedato", "danseinfo"),
    // Historie (lyd)
    ("historie_fil", "Historiefil", "historie_audio"),
    ("historie_kommentar1", "Historiekommentar 1", "historie_audio"),
    ("historie_kommentar2", "Historiekommentar 2", "historie_audio"),
    ("historie_note", "Historienote", "historie_audio"),
    ("historie_dato", "Historiedato", "historie_audio"),
    // Historie (tekst)
    ("historie_txt_text", "Historietekst", "historie_text"),
    ("historie_txt_note", "Tekstnote", "historie_text"),
    ("historie_txt_dato", "Tekstdato", "historie_text"),
    // Kommentar
    ("kommentar_komm", "Kommentar", "kommentar"),
    // Lignende danse
    ("ligner_ens", "Lignende danse", "lignende"),
    // Node
    ("node_nodefil", "Nodefil", "node"),
    ("node_kommentar1", "Nodekommentar 1", "node"),
    ("node_kommentar2", "Nodekommentar 2", "node"),
    ("node_note", "Nodenote", "node"),
    ("node_dato", "Nodedato", "node"),
    // Noter
    ("noter_niveau", "Noteniveau", "noter"),
    ("noter_instruk", "Instruktion", "noter"),
    ("noter_video", "Notevideo", "noter"),
    ("noter_andre", "Andre noter", "noter"),
    ("noter_dato", "Notedato", "noter"),
    // Trin / figur video
    ("trin_figur_video_trin", "Videotrin", "trin_figur"),
    ("trin_figur_video_figur", "Videfigur", "trin_figur"),
    ("trin_figur_video_videofil", "Trin/figur-video", "trin_figur"),
    ("trin_figur_video_kommentar1", "Trin/figur-komm. 1", "trin_figur"),
    ("trin_figur_video_kommentar2", "Trin/figur-komm. 2", "trin_figur"),
    ("trin_figur_video_dato", "Trin/figur-dato", "trin_figur"),
    // Video (intro / hoved)
    ("video_videofil", "Video", "video"),
    ("video_kommentar1", "Videokommentar 1", "video"),
    ("video_kommentar2", "Videokommentar 2", "video"),
    ("video_note", "Videonote", "video"),
    ("video_dato", "Videodato", "video"),
    // Video, alternativ version
    ("video_ååååmmdd_videofil", "Alternativ video", "video_alt"),
    ("video_ååååmmdd_kommentar1", "Alt. kommentar 1", "video_alt"),
    ("video_ååååmmdd_kommentar2", "Alt. kommentar 2", "video_alt"),
    ("video_ååååmmdd_note", "Alt. note", "video_alt"),
    ("video_ååååmmdd_dato", "Alt. dato", "video_alt"),
    // Video, intro + sekvenser
    ("video_intro", "Intro", "video_groups"),
    ("video_se1", "SE1", "video_groups"),
    ("video_se2", "SE2", "video_groups"),
    ("video_se3", "SE3", "video_groups"),
    ("video_lær1", "LÆR1", "video_groups"),
    ("video_lær2", "LÆR2", "video_groups"),
    ("video_lær3", "LÆR3", "video_groups"),
    ("video_dans1", "DANS1", "video_groups"),
    ("video_dans2", "DANS2", "video_groups"),
    ("video_dans3", "DANS3", "video_groups"),
];

fn builtin_fields() -> Vec<FieldDefinition> {
    BUILTIN_FIELDS
        .iter()
        .map(|(key, label, group)| FieldDefinition::new(*key, *label, *group))
        .collect()
}

// Store-backed accessors. An unknown key or a missing/empty value yields the
// caller's default rather than an error.

/// Read one field of a post, falling back to `default`
pub fn get_field(
    store: &dyn MetaStore,
    schema: &FieldSchema,
    post_id: u64,
    key: &str,
    default: &str,
) -> Result<String, ImportError> {
    if post_id == 0 || !schema.contains(key) {
        return Ok(default.to_string());
    }

    match store.get_meta(post_id, key)? {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Ok(default.to_string()),
    }
}

/// Every schema field of a post, in schema order
pub fn get_all_fields(
    store: &dyn MetaStore,
    schema: &FieldSchema,
    post_id: u64,
    only_with_values: bool,
) -> Result<Vec<(String, String)>, ImportError> {
    collect_values(store, schema.fields(), post_id, only_with_values)
}

/// Schema fields of one group for a post
pub fn get_fields_by_group(
    store: &dyn MetaStore,
    schema: &FieldSchema,
    group: &str,
    post_id: u64,
    only_with_values: bool,
) -> Result<Vec<(String, String)>, ImportError> {
    collect_values(store, schema.group(group).into_iter(), post_id, only_with_values)
}

pub fn has_field(
    store: &dyn MetaStore,
    schema: &FieldSchema,
    post_id: u64,
    key: &str,
) -> Result<bool, ImportError> {
    Ok(!get_field(store, schema, post_id, key, "")?.is_empty())
}

fn collect_values<'a>(
    store: &dyn MetaStore,
    fields: impl Iterator<Item = &'a FieldDefinition>,
    post_id: u64,
    only_with_values: bool,
) -> Result<Vec<(String, String)>, ImportError> {
    if post_id == 0 {
        return Ok(Vec::new());
    }

    let mut values = Vec::new();
    for field in fields {
        let value = store.get_meta(post_id, &field.key)?.unwrap_or_default();
        if only_with_values && value.is_empty() {
            continue;
        }
        values.push((field.key.clone(), value));
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[test]
    fn test_builtin_schema_is_valid() {
        let schema = FieldSchema::builtin();
        assert_eq!(schema.len(), 69);
        assert!(schema.contains("danse_navn"));
        assert!(schema.contains("video_lær2"));
        assert!(schema.contains("bes_pdffil"));
        assert!(!schema.contains("BES_pdffil"));
    }

    #[test]
    fn test_rejects_uppercase_key() {
        let result = FieldSchema::new(vec![FieldDefinition::new("BES_pdffil", "PDF", "beskrivelse")]);
        assert_eq!(result.unwrap_err(), SchemaError::InvalidKey("BES_pdffil".to_string()));
    }

    #[test]
    fn test_rejects_duplicate_key() {
        let result = FieldSchema::new(vec![
            FieldDefinition::new("danse_navn", "Dansenavn", "danseinfo"),
            FieldDefinition::new("danse_navn", "Navn", "danseinfo"),
        ]);
        assert_eq!(result.unwrap_err(), SchemaError::DuplicateKey("danse_navn".to_string()));
    }

    #[test]
    fn test_label_falls_back_to_key() {
        let schema = FieldSchema::builtin();
        assert_eq!(schema.label("danse_hefte"), "Hæfte");
        assert_eq!(schema.label("unknown_key"), "unknown_key");
    }

    #[test]
    fn test_grouped_keeps_declaration_order() {
        let schema = FieldSchema::builtin();
        let groups = schema.grouped();

        assert_eq!(groups.len(), 13);
        assert_eq!(groups[0].0, "audio");
        assert_eq!(groups[0].1.len(), 5);
        let (last, members) = groups.last().unwrap();
        assert_eq!(*last, "video_groups");
        assert_eq!(members[0].key, "video_intro");
        assert_eq!(members[9].key, "video_dans3");

        for (group, _) in &groups {
            assert!(group_label(group).is_some(), "missing label for {group}");
        }
    }

    #[test]
    fn test_require_group_rejects_unknown_group() {
        let schema = FieldSchema::builtin();
        assert_eq!(schema.require_group("audio").unwrap().len(), 5);
        assert_eq!(
            schema.require_group("lyd").unwrap_err(),
            SchemaError::UnknownGroup("lyd".to_string())
        );
    }

    #[test]
    fn test_get_field_defaults() {
        let schema = FieldSchema::builtin();
        let store = MemoryStore::new();
        let post = store.create_post("Sønderhoning").unwrap();
        store.set_meta(post, "danse_egn", "Fanø").unwrap();
        store.set_meta(post, "danse_takt", "").unwrap();

        assert_eq!(get_field(&store, schema, post, "danse_egn", "-").unwrap(), "Fanø");
        assert_eq!(get_field(&store, schema, post, "danse_takt", "-").unwrap(), "-");
        assert_eq!(get_field(&store, schema, post, "not_a_field", "-").unwrap(), "-");
        assert_eq!(get_field(&store, schema, 0, "danse_egn", "-").unwrap(), "-");
        assert!(has_field(&store, schema, post, "danse_egn").unwrap());
        assert!(!has_field(&store, schema, post, "danse_takt").unwrap());
    }

    #[test]
    fn test_group_values_only_with_values() {
        let schema = FieldSchema::builtin();
        let store = MemoryStore::new();
        let post = store.create_post("Hornfiben").unwrap();
        store.set_meta(post, "audio_lydfil", "hornfiben.mp3").unwrap();

        let all = get_fields_by_group(&store, schema, "audio", post, false).unwrap();
        assert_eq!(all.len(), 5);

        let filled = get_fields_by_group(&store, schema, "audio", post, true).unwrap();
        assert_eq!(filled, vec![("audio_lydfil".to_string(), "hornfiben.mp3".to_string())]);

        let everything = get_all_fields(&store, schema, post, true).unwrap();
        assert_eq!(everything.len(), 1);
    }
}
