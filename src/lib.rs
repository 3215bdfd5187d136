//! Taxorec – command-line utilities for upserting taxonomic classification
//! records into a SQLite store.
//!
//! The store holds the building blocks of a taxonomy:
//! * A [`record::Rank`] is a taxonomic level (Kingdom, Phylum, ...) with an
//!   ordering index and an optional grouping [`record::Field`].
//! * A [`record::GenusType`] is a categorical qualifier selecting suffix
//!   conventions, and a [`record::Suffix`] is the naming-convention suffix
//!   for a (Rank, GenusType) pair.
//! * An [`record::Entity`] is a concrete classified subject with a
//!   conservation status and optional population estimate, and a
//!   [`record::Classification`] is the value an entity holds at a given rank.
//!
//! Every table mutates through natural-key upserts only: inserting a record
//! whose unique key already exists overwrites the remaining columns of that
//! row.
//!
//! ## Modules
//! * [`record`] – Immutable record value objects, row tuples and the factory.
//! * [`validate`] – Record-kind tags plus attribute-bag filtering/validation.
//! * [`dispatch`] – Record-to-statement dispatch, batches and the entity flow.
//! * [`persist`] – SQLite schema, upsert statements and natural-key lookups.
//! * [`config`] – Database-path settings.
//! * [`error`] – The crate-wide error taxonomy.
//!
//! ## Quick Start
//! ```
//! use taxorec::dispatch::insert_record;
//! use taxorec::persist::Store;
//! use taxorec::record::{Rank, Record};
//!
//! let store = Store::open_in_memory().unwrap();
//! store.ensure_schema().unwrap();
//! let rank = Rank::new("KINGDOM".into(), "kingdom".into(), 1, 1, None);
//! insert_record(&store, &Record::Rank(rank)).unwrap();
//! assert!(store.rank_id_by_name("KINGDOM").is_ok());
//! ```
//!
//! The two binaries, `structure-insert` and `entity-insert`, wrap these
//! modules; see their `--help` output for the command-line surfaces.

pub mod config;
pub mod dispatch;
pub mod error;
pub mod persist;
pub mod record;
pub mod validate;
