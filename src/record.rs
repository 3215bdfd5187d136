//! Record value objects and the construction factory.
//!
//! Each record kind is an immutable value object with a canonical row-tuple
//! rendering used to bind the parametrized upsert statements. Rank and Entity
//! carry an optional column (`field_id`, `pop_est`); its presence is encoded
//! as `Option` at construction time, so a legitimate id of `0` is never
//! confused with absence, and the row shape follows directly from it.

use std::fmt;

use rusqlite::types::Value;

use crate::error::{Result, TaxorecError};
use crate::validate::{ArgSet, Attr, RecordKind};

// ------------- Rank -------------
#[derive(Debug, Clone, PartialEq)]
pub struct Rank {
    name: String,
    label: String,
    is_main: i64,
    rel_index: i64,
    field_id: Option<i64>,
}

impl Rank {
    pub fn new(
        name: String,
        label: String,
        is_main: i64,
        rel_index: i64,
        field_id: Option<i64>,
    ) -> Self {
        Self {
            name,
            label,
            is_main,
            rel_index,
            field_id,
        }
    }
    pub fn from_args(args: &ArgSet) -> Result<Self> {
        Ok(Self {
            name: args.text(Attr::Value)?,
            label: args.text(Attr::Label)?,
            is_main: args.int(Attr::IsMain)?,
            rel_index: args.int(Attr::RelIndex)?,
            field_id: args.opt_int(Attr::FieldId),
        })
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn label(&self) -> &str {
        &self.label
    }
    pub fn is_main(&self) -> i64 {
        self.is_main
    }
    pub fn rel_index(&self) -> i64 {
        self.rel_index
    }
    pub fn field_id(&self) -> Option<i64> {
        self.field_id
    }
    /// Canonical row tuple: four values without a field id, five with.
    pub fn row(&self) -> Vec<Value> {
        let mut row = vec![
            Value::from(self.name.clone()),
            Value::from(self.label.clone()),
            Value::from(self.is_main),
            Value::from(self.rel_index),
        ];
        if let Some(field_id) = self.field_id {
            row.push(Value::from(field_id));
        }
        row
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Rank={{name={}, label={}, is_main={}, rel_index={}",
            self.name, self.label, self.is_main, self.rel_index
        )?;
        if let Some(field_id) = self.field_id {
            write!(f, ", field_id={field_id}")?;
        }
        write!(f, "}}")
    }
}

// ------------- Field -------------
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
}

impl Field {
    pub fn new(name: String) -> Self {
        Self { name }
    }
    pub fn from_args(args: &ArgSet) -> Result<Self> {
        Ok(Self {
            name: args.text(Attr::Value)?,
        })
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn row(&self) -> Vec<Value> {
        vec![Value::from(self.name.clone())]
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Field={{name={}}}", self.name)
    }
}

// ------------- GenusType -------------
#[derive(Debug, Clone, PartialEq)]
pub struct GenusType {
    name: String,
}

impl GenusType {
    pub fn new(name: String) -> Self {
        Self { name }
    }
    pub fn from_args(args: &ArgSet) -> Result<Self> {
        Ok(Self {
            name: args.text(Attr::Value)?,
        })
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn row(&self) -> Vec<Value> {
        vec![Value::from(self.name.clone())]
    }
}

impl fmt::Display for GenusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GenusType={{name={}}}", self.name)
    }
}

// ------------- Suffix -------------
#[derive(Debug, Clone, PartialEq)]
pub struct Suffix {
    rank_id: i64,
    genus_type_id: i64,
    suffix: String,
}

impl Suffix {
    pub fn new(rank_id: i64, genus_type_id: i64, suffix: String) -> Self {
        Self {
            rank_id,
            genus_type_id,
            suffix,
        }
    }
    pub fn from_args(args: &ArgSet) -> Result<Self> {
        Ok(Self {
            rank_id: args.int(Attr::RankId)?,
            genus_type_id: args.int(Attr::GenusTypeId)?,
            suffix: args.text(Attr::Value)?,
        })
    }
    pub fn rank_id(&self) -> i64 {
        self.rank_id
    }
    pub fn genus_type_id(&self) -> i64 {
        self.genus_type_id
    }
    pub fn suffix(&self) -> &str {
        &self.suffix
    }
    pub fn row(&self) -> Vec<Value> {
        vec![
            Value::from(self.rank_id),
            Value::from(self.genus_type_id),
            Value::from(self.suffix.clone()),
        ]
    }
}

impl fmt::Display for Suffix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Suffix={{rank_id={}, genus_type_id={}, suffix={}}}",
            self.rank_id, self.genus_type_id, self.suffix
        )
    }
}

// ------------- Entity -------------
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    cons_status_id: i64,
    pop_est: Option<i64>,
}

impl Entity {
    pub fn new(name: String, cons_status_id: i64, pop_est: Option<i64>) -> Self {
        Self {
            name,
            cons_status_id,
            pop_est,
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn cons_status_id(&self) -> i64 {
        self.cons_status_id
    }
    pub fn pop_est(&self) -> Option<i64> {
        self.pop_est
    }
    /// Canonical row tuple: two values without a population estimate, three with.
    pub fn row(&self) -> Vec<Value> {
        let mut row = vec![
            Value::from(self.name.clone()),
            Value::from(self.cons_status_id),
        ];
        if let Some(pop_est) = self.pop_est {
            row.push(Value::from(pop_est));
        }
        row
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Entity={{name={}, cons_status_id={}",
            self.name, self.cons_status_id
        )?;
        if let Some(pop_est) = self.pop_est {
            write!(f, ", pop_est={pop_est}")?;
        }
        write!(f, "}}")
    }
}

// ------------- Classification -------------
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    entity_id: i64,
    rank_id: i64,
    name: String,
}

impl Classification {
    pub fn new(entity_id: i64, rank_id: i64, name: String) -> Self {
        Self {
            entity_id,
            rank_id,
            name,
        }
    }
    pub fn entity_id(&self) -> i64 {
        self.entity_id
    }
    pub fn rank_id(&self) -> i64 {
        self.rank_id
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn row(&self) -> Vec<Value> {
        vec![
            Value::from(self.entity_id),
            Value::from(self.rank_id),
            Value::from(self.name.clone()),
        ]
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Classification={{entity_id={}, rank_id={}, name={}}}",
            self.entity_id, self.rank_id, self.name
        )
    }
}

// ------------- Record -------------
/// Tagged union over every insertable record kind, used by the dispatcher to
/// select the matching upsert statement.
#[derive(Debug, Clone, PartialEq)]
pub enum Record {
    Rank(Rank),
    Field(Field),
    GenusType(GenusType),
    Suffix(Suffix),
    Entity(Entity),
    Classification(Classification),
}

impl Record {
    /// Factory over the five kinds the structure-insert surface accepts.
    ///
    /// Entity rows carry a conservation status id that only the entity-insert
    /// flow can resolve, so building one from an attribute bag always reports
    /// that field as missing.
    pub fn build(kind: RecordKind, args: &ArgSet) -> Result<Record> {
        match kind {
            RecordKind::Rank => Ok(Record::Rank(Rank::from_args(args)?)),
            RecordKind::Field => Ok(Record::Field(Field::from_args(args)?)),
            RecordKind::GenusType => Ok(Record::GenusType(GenusType::from_args(args)?)),
            RecordKind::Suffix => Ok(Record::Suffix(Suffix::from_args(args)?)),
            RecordKind::Entity => Err(TaxorecError::MissingField {
                kind: "ENTITY",
                field: "cons_status_id",
            }),
        }
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Record::Rank(r) => r.fmt(f),
            Record::Field(r) => r.fmt(f),
            Record::GenusType(r) => r.fmt(f),
            Record::Suffix(r) => r.fmt(f),
            Record::Entity(r) => r.fmt(f),
            Record::Classification(r) => r.fmt(f),
        }
    }
}

// ------------- Batch -------------
/// A homogeneous collection of records, upserted inside one transaction.
#[derive(Debug, Clone)]
pub enum Batch {
    Ranks(Vec<Rank>),
    Fields(Vec<Field>),
    GenusTypes(Vec<GenusType>),
    Suffixes(Vec<Suffix>),
}

impl Batch {
    pub fn len(&self) -> usize {
        match self {
            Batch::Ranks(v) => v.len(),
            Batch::Fields(v) => v.len(),
            Batch::GenusTypes(v) => v.len(),
            Batch::Suffixes(v) => v.len(),
        }
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
    pub fn kind(&self) -> &'static str {
        match self {
            Batch::Ranks(_) => "RANK",
            Batch::Fields(_) => "FIELD",
            Batch::GenusTypes(_) => "GENUSTYPE",
            Batch::Suffixes(_) => "SUFFIX",
        }
    }
}
