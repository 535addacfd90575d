//! Module: schema
//! Responsibility: attribute name -> (semantic type, row slot) resolution.
//! Does not own: row storage or value decoding.
//! Boundary: read-only registry passed explicitly to typing, predicate
//! resolution and rule generation.


use crate::error::CompileError;
use derive_more::{Deref, Display};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

///
/// AttributeType
///
/// Semantic type of an input attribute.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    Integer,
    Real,
    Text,
    Date,
}

impl AttributeType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Text => "text",
            Self::Date => "date",
        }
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Real)
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttributeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "integer" => Ok(Self::Integer),
            "real" => Ok(Self::Real),
            "text" => Ok(Self::Text),
            "date" => Ok(Self::Date),
            other => Err(other.to_string()),
        }
    }
}

///
/// OutputType
///
/// Type of an aggregate output slot. `Count` and `Ratio` never appear on
/// input attributes; the rest mirror `AttributeType`.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    Integer,
    Real,
    Text,
    Date,
    Count,
    Ratio,
}

impl From<AttributeType> for OutputType {
    fn from(ty: AttributeType) -> Self {
        match ty {
            AttributeType::Integer => Self::Integer,
            AttributeType::Real => Self::Real,
            AttributeType::Text => Self::Text,
            AttributeType::Date => Self::Date,
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Integer => "integer",
            Self::Real => "real",
            Self::Text => "text",
            Self::Date => "date",
            Self::Count => "count",
            Self::Ratio => "ratio",
        };
        f.write_str(label)
    }
}

///
/// RowSlot
///
/// Zero-based positional slot of an attribute within an input row.
///

#[derive(
    Clone, Copy, Debug, Deref, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize,
)]
#[serde(transparent)]
pub struct RowSlot(usize);

impl RowSlot {
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

///
/// SchemaEntry
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SchemaEntry {
    pub ty: AttributeType,
    pub slot: RowSlot,
}

///
/// SchemaRegistry
///
/// Fixed input schema. Built once at process start and shared read-only by
/// every compilation; it holds no interior mutability.
///

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SchemaRegistry {
    entries: BTreeMap<String, SchemaEntry>,
}

impl SchemaRegistry {
    /// Build a registry, assigning slots in declaration order.
    pub fn new<I, S>(attributes: I) -> Result<Self, CompileError>
    where
        I: IntoIterator<Item = (S, AttributeType)>,
        S: Into<String>,
    {
        let mut entries = BTreeMap::new();

        for (index, (name, ty)) in attributes.into_iter().enumerate() {
            let name = name.into();
            if entries.contains_key(&name) {
                return Err(CompileError::DuplicateAttribute { attribute: name });
            }

            entries.insert(
                name,
                SchemaEntry {
                    ty,
                    slot: RowSlot::new(index),
                },
            );
        }

        Ok(Self { entries })
    }

    /// The canonical `sales` table used by multi-feature query examples.
    #[must_use]
    pub fn sales() -> Self {
        const SALES: [(&str, AttributeType); 8] = [
            ("cust", AttributeType::Text),
            ("prod", AttributeType::Text),
            ("day", AttributeType::Integer),
            ("month", AttributeType::Integer),
            ("year", AttributeType::Integer),
            ("state", AttributeType::Text),
            ("quant", AttributeType::Integer),
            ("date", AttributeType::Date),
        ];

        let entries = SALES
            .iter()
            .enumerate()
            .map(|(index, (name, ty))| {
                (
                    (*name).to_string(),
                    SchemaEntry {
                        ty: *ty,
                        slot: RowSlot::new(index),
                    },
                )
            })
            .collect();

        Self { entries }
    }

    /// Resolve an attribute to its type and row slot.
    pub fn lookup(&self, name: &str) -> Result<SchemaEntry, CompileError> {
        self.entries
            .get(name)
            .copied()
            .ok_or_else(|| CompileError::unknown_attribute(name))
    }

    pub fn attribute_type(&self, name: &str) -> Result<AttributeType, CompileError> {
        self.lookup(name).map(|entry| entry.ty)
    }

    pub fn slot(&self, name: &str) -> Result<RowSlot, CompileError> {
        self.lookup(name).map(|entry| entry.slot)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate attributes in slot order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, SchemaEntry)> {
        let mut attributes = self
            .entries
            .iter()
            .map(|(name, entry)| (name.as_str(), *entry))
            .collect::<Vec<_>>();
        attributes.sort_by_key(|(_, entry)| entry.slot);

        attributes.into_iter()
    }
}
