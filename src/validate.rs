//! Argument filtering and validation for the structure-insert surface.
//!
//! A caller supplies an open bag of named values ([`RawArgs`]) together with a
//! record-type tag ([`RecordKind`]). [`ArgSet::filter`] drops absent entries
//! and keeps only the attributes the tag requires; [`ArgSet::validate`] then
//! checks that the required set is fully covered. A RANK invocation without a
//! field id selects the reduced required set while the external tag stays
//! RANK.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TaxorecError};

// ------------- RecordKind -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Rank,
    Field,
    GenusType,
    Suffix,
    Entity,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rank => "RANK",
            Self::Field => "FIELD",
            Self::GenusType => "GENUSTYPE",
            Self::Suffix => "SUFFIX",
            Self::Entity => "ENTITY",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RecordKind {
    type Err = TaxorecError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "RANK" => Ok(Self::Rank),
            "FIELD" => Ok(Self::Field),
            "GENUSTYPE" => Ok(Self::GenusType),
            "SUFFIX" => Ok(Self::Suffix),
            "ENTITY" => Ok(Self::Entity),
            _ => Err(TaxorecError::UnknownType(s.to_string())),
        }
    }
}

// ------------- Attributes -------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attr {
    Value,
    Label,
    IsMain,
    RelIndex,
    FieldId,
    RankId,
    GenusTypeId,
}

impl Attr {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Value => "value",
            Self::Label => "label",
            Self::IsMain => "is_main",
            Self::RelIndex => "rel_index",
            Self::FieldId => "field_id",
            Self::RankId => "rank_id",
            Self::GenusTypeId => "genus_type_id",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Text(String),
    Int(i64),
}

impl AttrValue {
    fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            Self::Int(_) => None,
        }
    }
    fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            Self::Text(_) => None,
        }
    }
}

/// The open bag of caller-supplied values. `None` counts as absent.
#[derive(Debug, Clone, Default)]
pub struct RawArgs {
    pub value: Option<String>,
    pub label: Option<String>,
    pub is_main: Option<i64>,
    pub rel_index: Option<i64>,
    pub field_id: Option<i64>,
    pub rank_id: Option<i64>,
    pub genus_type_id: Option<i64>,
}

impl RawArgs {
    fn get(&self, attr: Attr) -> Option<AttrValue> {
        match attr {
            Attr::Value => self.value.clone().map(AttrValue::Text),
            Attr::Label => self.label.clone().map(AttrValue::Text),
            Attr::IsMain => self.is_main.map(AttrValue::Int),
            Attr::RelIndex => self.rel_index.map(AttrValue::Int),
            Attr::FieldId => self.field_id.map(AttrValue::Int),
            Attr::RankId => self.rank_id.map(AttrValue::Int),
            Attr::GenusTypeId => self.genus_type_id.map(AttrValue::Int),
        }
    }
}

// ------------- Required sets -------------
const RANK_FULL: &[Attr] = &[
    Attr::Value,
    Attr::Label,
    Attr::IsMain,
    Attr::RelIndex,
    Attr::FieldId,
];
const RANK_REDUCED: &[Attr] = &[Attr::Value, Attr::Label, Attr::IsMain, Attr::RelIndex];
const FIELD: &[Attr] = &[Attr::Value];
const GENUS_TYPE: &[Attr] = &[Attr::Value];
const SUFFIX: &[Attr] = &[Attr::Value, Attr::RankId, Attr::GenusTypeId];
// Entity rows are populated by the entity-insert flow, not by attribute bags.
const ENTITY: &[Attr] = &[];

fn required(kind: RecordKind, has_field_id: bool) -> &'static [Attr] {
    match kind {
        RecordKind::Rank if has_field_id => RANK_FULL,
        RecordKind::Rank => RANK_REDUCED,
        RecordKind::Field => FIELD,
        RecordKind::GenusType => GENUS_TYPE,
        RecordKind::Suffix => SUFFIX,
        RecordKind::Entity => ENTITY,
    }
}

// ------------- ArgSet -------------
/// The filtered attribute set for one record-construction attempt.
#[derive(Debug, Clone)]
pub struct ArgSet {
    kind: RecordKind,
    attrs: HashMap<Attr, AttrValue>,
}

impl ArgSet {
    /// Drop absent entries and keep `value` plus the intersection of the
    /// supplied attributes with the required set for the effective kind.
    pub fn filter(kind: RecordKind, raw: &RawArgs) -> ArgSet {
        let has_field_id = raw.field_id.is_some();
        let mut attrs = HashMap::new();
        if let Some(v) = raw.get(Attr::Value) {
            attrs.insert(Attr::Value, v);
        }
        for &attr in required(kind, has_field_id) {
            if let Some(v) = raw.get(attr) {
                attrs.insert(attr, v);
            }
        }
        ArgSet { kind, attrs }
    }

    pub fn kind(&self) -> RecordKind {
        self.kind
    }

    /// Strict pass: every required attribute must have survived filtering.
    pub fn validate(&self) -> Result<()> {
        let has_field_id = self.attrs.contains_key(&Attr::FieldId);
        for &attr in required(self.kind, has_field_id) {
            if !self.attrs.contains_key(&attr) {
                return Err(TaxorecError::MissingField {
                    kind: self.kind.as_str(),
                    field: attr.name(),
                });
            }
        }
        Ok(())
    }

    fn missing(&self, attr: Attr) -> TaxorecError {
        TaxorecError::MissingField {
            kind: self.kind.as_str(),
            field: attr.name(),
        }
    }

    pub(crate) fn text(&self, attr: Attr) -> Result<String> {
        self.attrs
            .get(&attr)
            .and_then(AttrValue::as_text)
            .map(str::to_string)
            .ok_or_else(|| self.missing(attr))
    }

    pub(crate) fn int(&self, attr: Attr) -> Result<i64> {
        self.attrs
            .get(&attr)
            .and_then(AttrValue::as_int)
            .ok_or_else(|| self.missing(attr))
    }

    pub(crate) fn opt_int(&self, attr: Attr) -> Option<i64> {
        self.attrs.get(&attr).and_then(AttrValue::as_int)
    }
}
