use sockybara::{JsonTraitSource, SockyError, TokenId, TraitSlot, TraitSource, render};

const SNAPSHOT: &str = r##"{
    "0": {
        "traits": ["ff0000", "00ff00", "0000ff", "ffff00", "112233", "445566", "ff00ff", "00ffff", "#808080"],
        "owner": "0x00000000000000000000000000000000000000aa"
    },
    "247": {
        "traits": [null, null, null, null, null, null, null, null, "ff8800"]
    }
}"##;

#[tokio::test]
async fn loads_records_from_a_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("traits.json");
    std::fs::write(&path, SNAPSHOT).unwrap();

    let source = JsonTraitSource::from_path(&path).unwrap();
    assert_eq!(source.len(), 2);

    let record = source.fetch(TokenId::new(0).unwrap()).await.unwrap();
    assert_eq!(
        record.owner.as_deref(),
        Some("0x00000000000000000000000000000000000000aa")
    );
    assert_eq!(record.traits.get(TraitSlot::FrontLeftSock), "#ff0000");
    // Already-marked values are not marked twice.
    assert_eq!(record.traits.get(TraitSlot::Nose), "#808080");
}

#[tokio::test]
async fn null_entries_fall_back_to_defaults() {
    let source = JsonTraitSource::from_json_str(SNAPSHOT).unwrap();
    let record = source.fetch("247".parse().unwrap()).await.unwrap();

    assert_eq!(record.owner, None);
    assert_eq!(record.traits.get(TraitSlot::Nose), "#ff8800");
    assert_eq!(record.traits.get(TraitSlot::LeftEye), "black");
    assert_eq!(record.traits.get(TraitSlot::BackRightSock), "white");

    let img = render(&record.traits);
    assert_eq!(img.slot_fills(TraitSlot::Nose), ["#ff8800"]);
}

#[tokio::test]
async fn unknown_token_is_a_validation_error() {
    let source = JsonTraitSource::from_json_str(SNAPSHOT).unwrap();
    let err = source.fetch(TokenId::new(5).unwrap()).await.unwrap_err();
    assert!(matches!(err, SockyError::Validation(_)));
    assert!(!source.is_empty());
}

#[test]
fn missing_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = JsonTraitSource::from_path(&dir.path().join("nope.json")).unwrap_err();
    assert!(err.to_string().contains("open trait source"));
}
