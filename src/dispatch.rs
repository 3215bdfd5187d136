//! Insertion dispatch: maps a record to its upsert statement, runs batches
//! inside one transaction, and drives the entity-with-taxonomy flow.

use std::str::FromStr;

use tracing::info;

use crate::error::{Result, TaxorecError};
use crate::persist::{Store, sql};
use crate::record::{Batch, Classification, Entity, Rank, Record};

// Rank and Entity each have two statement variants; the row shape decides.
fn rank_statement(rank: &Rank) -> &'static str {
    if rank.field_id().is_some() {
        sql::UPSERT_RANK_WITH_FIELD
    } else {
        sql::UPSERT_RANK
    }
}

fn entity_statement(entity: &Entity) -> &'static str {
    if entity.pop_est().is_some() {
        sql::UPSERT_ENTITY_WITH_POP
    } else {
        sql::UPSERT_ENTITY
    }
}

/// Upsert a single record using the statement its variant selects.
pub fn insert_record(store: &Store, record: &Record) -> Result<()> {
    match record {
        Record::Rank(r) => store.execute(rank_statement(r), r.row())?,
        Record::Field(r) => store.execute(sql::UPSERT_FIELD, r.row())?,
        Record::GenusType(r) => store.execute(sql::UPSERT_GENUS_TYPE, r.row())?,
        Record::Suffix(r) => store.execute(sql::UPSERT_SUFFIX, r.row())?,
        Record::Entity(r) => store.execute(entity_statement(r), r.row())?,
        Record::Classification(r) => store.execute(sql::UPSERT_CLASSIFICATION, r.row())?,
    }
    info!(record = %record, "upserted");
    Ok(())
}

/// Upsert a whole batch inside one transaction. Any failing element rolls the
/// entire batch back, and each element picks its statement variant the same
/// way a single insert does.
pub fn insert_batch(store: &Store, batch: &Batch) -> Result<()> {
    let tx = store.transaction()?;
    match batch {
        Batch::Ranks(ranks) => {
            for r in ranks {
                store.execute(rank_statement(r), r.row())?;
            }
        }
        Batch::Fields(fields) => {
            for r in fields {
                store.execute(sql::UPSERT_FIELD, r.row())?;
            }
        }
        Batch::GenusTypes(genus_types) => {
            for r in genus_types {
                store.execute(sql::UPSERT_GENUS_TYPE, r.row())?;
            }
        }
        Batch::Suffixes(suffixes) => {
            for r in suffixes {
                store.execute(sql::UPSERT_SUFFIX, r.row())?;
            }
        }
    }
    tx.commit()?;
    info!(kind = batch.kind(), count = batch.len(), "batch upserted");
    Ok(())
}

// ------------- Entity flow -------------
/// One `LABEL=VALUE` taxonomy token: a rank label and the entity's value at
/// that rank.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxonomyPair {
    label: String,
    value: String,
}

impl TaxonomyPair {
    pub fn new(label: String, value: String) -> Self {
        Self { label, value }
    }
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl FromStr for TaxonomyPair {
    type Err = TaxorecError;

    // The label side normalizes upper; the value side is kept as typed.
    fn from_str(s: &str) -> Result<Self> {
        let malformed =
            || TaxorecError::InvalidArgument(format!("taxonomy token '{s}', expected LABEL=VALUE"));
        let (label, value) = s.split_once('=').ok_or_else(malformed)?;
        if label.is_empty() || value.is_empty() {
            return Err(malformed());
        }
        Ok(Self {
            label: label.to_uppercase(),
            value: value.to_string(),
        })
    }
}

/// Upsert an entity and one classification per taxonomy pair, all in one
/// transaction.
///
/// The conservation code resolves against the status code table and the
/// entity id against the freshly upserted row by name; the insert cursor's
/// last row id is stale when the upsert updated an existing row. Returns the
/// entity id.
pub fn insert_entity(
    store: &Store,
    name: &str,
    cons_code: Option<&str>,
    pop_est: Option<i64>,
    taxonomy: &[TaxonomyPair],
) -> Result<i64> {
    let cons_code = cons_code.ok_or(TaxorecError::MissingField {
        kind: "ENTITY",
        field: "cons_status_id",
    })?;
    let codes = store.conservation_codes()?;
    let cons_status_id = *codes
        .get(cons_code)
        .ok_or_else(|| TaxorecError::LookupMiss {
            entity: "conservation status",
            key: cons_code.to_string(),
        })?;
    let entity = Entity::new(name.to_uppercase(), cons_status_id, pop_est);

    let tx = store.transaction()?;
    store.execute(entity_statement(&entity), entity.row())?;
    let entity_id = store.entity_id_by_name(entity.name())?;
    for pair in taxonomy {
        let rank_id = store.rank_id_by_label(&pair.label().to_lowercase())?;
        let classification = Classification::new(entity_id, rank_id, pair.value().to_string());
        store.execute(sql::UPSERT_CLASSIFICATION, classification.row())?;
    }
    tx.commit()?;
    info!(
        entity = %entity,
        classifications = taxonomy.len(),
        "entity upserted"
    );
    Ok(entity_id)
}
