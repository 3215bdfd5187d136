use taxorec::error::TaxorecError;
use taxorec::record::Record;
use taxorec::validate::{ArgSet, RawArgs, RecordKind};

fn rank_bag(field_id: Option<i64>) -> RawArgs {
    RawArgs {
        value: Some("KINGDOM".to_string()),
        label: Some("kingdom".to_string()),
        is_main: Some(1),
        rel_index: Some(1),
        field_id,
        ..RawArgs::default()
    }
}

#[test]
fn full_rank_bag_validates() {
    let args = ArgSet::filter(RecordKind::Rank, &rank_bag(Some(2)));
    args.validate().expect("full rank bag should validate");
}

#[test]
fn rank_without_field_id_uses_reduced_set() {
    // No field id demotes RANK to the reduced required set; the tag stays RANK.
    let args = ArgSet::filter(RecordKind::Rank, &rank_bag(None));
    args.validate().expect("reduced rank bag should validate");
    assert_eq!(args.kind(), RecordKind::Rank);
}

#[test]
fn rank_missing_label_is_rejected() {
    let mut raw = rank_bag(None);
    raw.label = None;
    let args = ArgSet::filter(RecordKind::Rank, &raw);
    let err = args.validate().expect_err("missing label must fail");
    assert!(
        matches!(err, TaxorecError::MissingField { kind: "RANK", field: "label" }),
        "unexpected error: {err}"
    );
}

#[test]
fn suffix_requires_both_foreign_keys() {
    let raw = RawArgs {
        value: Some("INAE".to_string()),
        rank_id: Some(3),
        ..RawArgs::default()
    };
    let args = ArgSet::filter(RecordKind::Suffix, &raw);
    let err = args.validate().expect_err("missing genus_type_id must fail");
    assert!(
        matches!(err, TaxorecError::MissingField { field: "genus_type_id", .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn field_needs_only_its_value() {
    let raw = RawArgs {
        value: Some("BOTANY".to_string()),
        // Unrelated attributes are filtered out, not rejected.
        rank_id: Some(7),
        ..RawArgs::default()
    };
    let args = ArgSet::filter(RecordKind::Field, &raw);
    args.validate().expect("field bag should validate");
    let record = Record::build(RecordKind::Field, &args).expect("field builds");
    assert_eq!(format!("{record}"), "Field={name=BOTANY}");
}

#[test]
fn unknown_type_tag_is_rejected() {
    let err = "SPECIMEN".parse::<RecordKind>().expect_err("unknown tag");
    assert!(matches!(err, TaxorecError::UnknownType(_)));
}

#[test]
fn type_tag_parses_case_insensitively() {
    assert_eq!(
        "genustype".parse::<RecordKind>().expect("parses"),
        RecordKind::GenusType
    );
}

#[test]
fn entity_cannot_be_built_from_a_bag() {
    // The empty required set validates, but construction still needs the
    // conservation status id only entity-insert can resolve.
    let raw = RawArgs {
        value: Some("GRAY WOLF".to_string()),
        ..RawArgs::default()
    };
    let args = ArgSet::filter(RecordKind::Entity, &raw);
    args.validate().expect("entity bag has no required attrs");
    let err = Record::build(RecordKind::Entity, &args).expect_err("entity build must fail");
    assert!(
        matches!(err, TaxorecError::MissingField { kind: "ENTITY", field: "cons_status_id" }),
        "unexpected error: {err}"
    );
}
