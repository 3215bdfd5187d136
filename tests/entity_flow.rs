use taxorec::dispatch::{TaxonomyPair, insert_entity, insert_record};
use taxorec::error::TaxorecError;
use taxorec::persist::Store;
use taxorec::record::{Rank, Record};

// CONSERVATION_STATUSES and CLASSIFICATIONS are prerequisites managed outside
// the tools; tests stand them up the way a deployment would.
fn setup() -> Store {
    let store = Store::open_in_memory().expect("store");
    store.ensure_schema().expect("schema");
    store
        .connection()
        .execute_batch(
            "
            CREATE TABLE CONSERVATION_STATUSES (
                ID INTEGER PRIMARY KEY,
                CODE_RL TEXT UNIQUE NOT NULL
            );
            CREATE TABLE CLASSIFICATIONS (
                ENTITY_ID INTEGER NOT NULL,
                RANK_ID INTEGER NOT NULL,
                NAME TEXT NOT NULL,
                PRIMARY KEY (ENTITY_ID, RANK_ID)
            );
            INSERT INTO CONSERVATION_STATUSES (CODE_RL)
                VALUES ('LC'), ('EN'), ('CR');
            ",
        )
        .expect("prerequisite tables");
    for (name, label, rel_index) in [("KINGDOM", "kingdom", 1), ("PHYLUM", "phylum", 2)] {
        insert_record(
            &store,
            &Record::Rank(Rank::new(name.into(), label.into(), 1, rel_index, None)),
        )
        .expect("seed rank");
    }
    store
}

fn pairs(tokens: &[&str]) -> Vec<TaxonomyPair> {
    tokens
        .iter()
        .map(|t| t.parse().expect("taxonomy token"))
        .collect()
}

#[test]
fn entity_with_taxonomy_round_trip() {
    let store = setup();
    let entity_id = insert_entity(
        &store,
        "Gray Wolf",
        Some("LC"),
        None,
        &pairs(&["KINGDOM=Animalia", "PHYLUM=Chordata"]),
    )
    .expect("entity flow");

    let (name, cons_status_id, pop_est): (String, i64, Option<i64>) = store
        .connection()
        .query_row(
            "SELECT NAME, CONS_STATUS_ID, POP_EST FROM ENTITIES WHERE ID = ?",
            [entity_id],
            |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
        )
        .expect("entity row");
    assert_eq!(name, "GRAY WOLF");
    assert_eq!(cons_status_id, 1, "resolved from code 'LC'");
    assert_eq!(pop_est, None);

    let mut classifications: Vec<(i64, String)> = store
        .connection()
        .prepare("SELECT RANK_ID, NAME FROM CLASSIFICATIONS WHERE ENTITY_ID = ?")
        .expect("prepare")
        .query_map([entity_id], |r| Ok((r.get(0)?, r.get(1)?)))
        .expect("query")
        .collect::<Result<_, _>>()
        .expect("rows");
    classifications.sort();
    let kingdom_id = store.rank_id_by_name("KINGDOM").expect("kingdom id");
    let phylum_id = store.rank_id_by_name("PHYLUM").expect("phylum id");
    assert_eq!(
        classifications,
        vec![
            (kingdom_id, "Animalia".to_string()),
            (phylum_id, "Chordata".to_string())
        ]
    );
}

#[test]
fn entity_with_population_estimate() {
    let store = setup();
    let entity_id =
        insert_entity(&store, "Gray Wolf", Some("LC"), Some(300_000), &[]).expect("entity flow");
    let pop_est: Option<i64> = store
        .connection()
        .query_row("SELECT POP_EST FROM ENTITIES WHERE ID = ?", [entity_id], |r| r.get(0))
        .expect("row");
    assert_eq!(pop_est, Some(300_000));
}

#[test]
fn reinserting_entity_updates_in_place() {
    let store = setup();
    let first = insert_entity(&store, "Gray Wolf", Some("LC"), None, &[]).expect("first");
    let second = insert_entity(&store, "gray wolf", Some("EN"), None, &[]).expect("second");
    assert_eq!(first, second, "name normalizes to the same natural key");
    let (rows, cons_status_id): (i64, i64) = store
        .connection()
        .query_row(
            "SELECT COUNT(*), MAX(CONS_STATUS_ID) FROM ENTITIES",
            [],
            |r| Ok((r.get(0)?, r.get(1)?)),
        )
        .expect("row");
    assert_eq!(rows, 1);
    assert_eq!(cons_status_id, 2, "status updated to 'EN'");
}

#[test]
fn unknown_conservation_code_is_a_lookup_miss() {
    let store = setup();
    let err = insert_entity(&store, "Gray Wolf", Some("ZZ"), None, &[])
        .expect_err("unknown code must fail");
    assert!(
        matches!(err, TaxorecError::LookupMiss { entity: "conservation status", .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn missing_conservation_code_fails_validation() {
    let store = setup();
    let err =
        insert_entity(&store, "Gray Wolf", None, None, &[]).expect_err("missing code must fail");
    assert!(
        matches!(err, TaxorecError::MissingField { kind: "ENTITY", field: "cons_status_id" }),
        "unexpected error: {err}"
    );
}

#[test]
fn unresolved_rank_label_rolls_back_the_entity() {
    let store = setup();
    let err = insert_entity(
        &store,
        "Gray Wolf",
        Some("LC"),
        None,
        &pairs(&["ORDER=Carnivora"]),
    )
    .expect_err("unseeded rank label must fail");
    assert!(
        matches!(err, TaxorecError::LookupMiss { entity: "rank label", .. }),
        "unexpected error: {err}"
    );
    // The whole flow is one transaction; the entity row must not survive.
    let entities: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM ENTITIES", [], |r| r.get(0))
        .expect("count");
    assert_eq!(entities, 0);
}

#[test]
fn malformed_taxonomy_token_is_rejected() {
    let err = "KINGDOM Animalia"
        .parse::<TaxonomyPair>()
        .expect_err("token without '=' must fail");
    assert!(matches!(err, TaxorecError::InvalidArgument(_)));
}
