use fff_danse::{parse_description, DescriptionParser, FieldDefinition, FieldSchema};

#[test]
fn test_empty_description_is_empty_for_any_hints() {
    assert!(parse_description("", "", "").is_empty());
    assert!(parse_description("", "Title", "dQw4w9WgXcQ").is_empty());
}

#[test]
fn test_inline_blocks() {
    let parsed = parse_description("Intro: Hello\nSE1: World", "", "");
    assert_eq!(parsed.get("video_intro").unwrap(), "Hello");
    assert_eq!(parsed.get("video_se1").unwrap(), "World");
    assert_eq!(parsed.len(), 2);
}

#[test]
fn test_multi_line_block() {
    let parsed = parse_description("Intro:\nLine1\nLine2", "", "");
    assert_eq!(parsed.get("video_intro").unwrap(), "Line1\nLine2");
}

#[test]
fn test_residual_pair_after_block_survives_title_fallback() {
    let parsed = parse_description("Intro: Hi\ndanse_navn: Foo", "Some Title", "");
    assert_eq!(parsed.get("video_intro").unwrap(), "Hi");
    assert_eq!(parsed.get("danse_navn").unwrap(), "Foo");
}

#[test]
fn test_repeated_residual_key_is_concatenated_in_order() {
    let parsed = parse_description("danse_egn: A\ndanse_egn: B", "", "");
    assert_eq!(parsed.get("danse_egn").unwrap(), "A\nB");
}

#[test]
fn test_lær_spellings_normalize_to_same_field() {
    for description in ["Laer1: Step", "Lære1: Step", "LÆR1: Step", "lær1: Step"] {
        let parsed = parse_description(description, "", "");
        assert_eq!(
            parsed.get("video_lær1").map(String::as_str),
            Some("Step"),
            "failed for {description:?}"
        );
    }
}

#[test]
fn test_unknown_key_is_dropped() {
    let parsed = parse_description("foobar_key: xyz", "", "");
    assert!(parsed.is_empty());

    // A short alphabetic key is read as an unmapped block instead
    let parsed = parse_description("foobar: xyz", "", "");
    assert!(parsed.get("foobar").is_none());
    assert!(parsed.is_empty());
}

#[test]
fn test_fallbacks_only_fire_when_unset() {
    let parsed = parse_description("danse_navn: Explicit", "TitleFallback", "");
    assert_eq!(parsed.get("danse_navn").unwrap(), "Explicit");

    let parsed = parse_description("video_videofil: abcdefghijk", "", "dQw4w9WgXcQ");
    assert_eq!(parsed.get("video_videofil").unwrap(), "abcdefghijk");

    let parsed = parse_description("danse_egn: Fanø", "<em>Sønderhoning</em>", "dQw4w9WgXcQ");
    assert_eq!(parsed.get("danse_navn").unwrap(), "Sønderhoning");
    assert_eq!(parsed.get("video_videofil").unwrap(), "dQw4w9WgXcQ");
}

#[test]
fn test_parse_is_idempotent() {
    let description = "Intro: Velkommen\n\nSE1:\nFørste\nAnden\ndanse_egn: Fanø\nLÆR2: Langsomt";
    let first = parse_description(description, "Titel", "dQw4w9WgXcQ");
    let second = parse_description(description, "Titel", "dQw4w9WgXcQ");
    assert_eq!(first, second);
}

#[test]
fn test_duplicate_block_keeps_only_the_later_one() {
    let parsed = parse_description("Intro: first\nIntro: second\nmore", "", "");
    assert_eq!(parsed.get("video_intro").unwrap(), "second\nmore");
}

#[test]
fn test_blank_lines_inside_block_are_kept() {
    let parsed = parse_description("SE2:\nførste\n\nanden\n", "", "");
    // Trailing blank line is trimmed away with the value
    assert_eq!(parsed.get("video_se2").unwrap(), "første\n\nanden");
}

#[test]
fn test_url_line_opens_unmapped_block() {
    // "https://..." looks like a block header; it ends the current block
    let parsed = parse_description("DANS1: Hele dansen\nhttps://example.com/noder.pdf", "", "");
    assert_eq!(parsed.get("video_dans1").unwrap(), "Hele dansen");
    assert_eq!(parsed.len(), 1);
}

#[test]
fn test_http_key_only_filtered_by_schema() {
    let schema = FieldSchema::new(vec![FieldDefinition::new("http_kilde", "Kilde", "test")]).unwrap();
    let parser = DescriptionParser::new(&schema);
    let parsed = parser.parse("http_kilde: //example.com", "", "");
    assert_eq!(parsed.get("http_kilde").unwrap(), "//example.com");
}

#[test]
fn test_full_description() {
    let description = "\
Sønderhoning fra Fanø, optaget til FFF.

Intro: Kort introduktion til dansen
SE1: Første tur
SE2: Anden tur
LÆRE1:
Trin for trin
langsomt tempo
DANS1: Hele dansen i tempo
danse_egn: Fanø
danse_takt: 3/4
danse_musik: Spillemændene
foobar_key: ignoreres
";
    let parsed = parse_description(description, "Sønderhoning", "dQw4w9WgXcQ");

    assert_eq!(parsed.get("video_intro").unwrap(), "Kort introduktion til dansen");
    assert_eq!(parsed.get("video_se1").unwrap(), "Første tur");
    assert_eq!(parsed.get("video_se2").unwrap(), "Anden tur");
    assert_eq!(parsed.get("video_lær1").unwrap(), "Trin for trin\nlangsomt tempo");
    assert_eq!(parsed.get("video_dans1").unwrap(), "Hele dansen i tempo");
    assert_eq!(parsed.get("danse_egn").unwrap(), "Fanø");
    assert_eq!(parsed.get("danse_takt").unwrap(), "3/4");
    assert_eq!(parsed.get("danse_musik").unwrap(), "Spillemændene");
    assert_eq!(parsed.get("danse_navn").unwrap(), "Sønderhoning");
    assert_eq!(parsed.get("video_videofil").unwrap(), "dQw4w9WgXcQ");
    assert_eq!(parsed.len(), 10);
}

#[test]
fn test_custom_schema_limits_residual_keys() {
    let schema = FieldSchema::new(vec![FieldDefinition::new("danse_egn", "Egn", "danseinfo")]).unwrap();
    let parser = DescriptionParser::new(&schema);

    let parsed = parser.parse("danse_egn: Fanø\ndanse_takt: 3/4\nIntro: Hej", "", "");
    assert_eq!(parsed.get("danse_egn").unwrap(), "Fanø");
    assert!(parsed.get("danse_takt").is_none());
    // Block mapping does not depend on the schema
    assert_eq!(parsed.get("video_intro").unwrap(), "Hej");
}
