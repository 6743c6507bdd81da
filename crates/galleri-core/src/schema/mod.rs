// Declarative column schemas for the reference-data tables
//
// A schema maps fixed column positions to typed attributes and declares its
// own row-validity rule. Rows carry no header; meaning comes from position only.

use std::fmt;
use std::str::FromStr;

use crate::attribute::{AttributeMap, AttributeValue};
use crate::error::CoreError;
use crate::format::SkipReason;

pub mod icb;
pub mod lsoa;
pub mod population;
pub mod unique_lsoa;

/// Type tag applied to a column's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    S,
    N,
}

/// One column mapped to one attribute.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub attribute: &'static str,
    pub column: usize,
    pub tag: Tag,
}

impl Field {
    pub const fn s(attribute: &'static str, column: usize) -> Self {
        Self {
            attribute,
            column,
            tag: Tag::S,
        }
    }

    pub const fn n(attribute: &'static str, column: usize) -> Self {
        Self {
            attribute,
            column,
            tag: Tag::N,
        }
    }
}

/// Attribute written with the same value on every item.
#[derive(Debug, Clone, Copy)]
pub struct Constant {
    pub attribute: &'static str,
    pub value: bool,
}

/// An accepted row width and the columns dropped before mapping.
#[derive(Debug, Clone, Copy)]
pub struct Width {
    pub columns: usize,
    pub ignored: &'static [usize],
}

/// Row-validity rule, declared per schema.
#[derive(Debug, Clone, Copy)]
pub enum RowShape {
    /// Row must reach the highest mapped column; trailing columns are ignored.
    AtLeastMapped,
    /// Row must be exactly one of these widths.
    Widths(&'static [Width]),
}

#[derive(Debug)]
pub struct Schema {
    pub name: &'static str,
    pub fields: &'static [Field],
    pub constants: &'static [Constant],
    pub shape: RowShape,
    /// Attributes that must be non-empty for the row to be kept.
    pub required: &'static [&'static str],
    /// Attribute expected to identify an item uniquely within its table.
    pub key: &'static str,
}

impl Schema {
    /// Number of columns a row needs to satisfy every mapped field.
    pub fn min_columns(&self) -> usize {
        self.fields
            .iter()
            .map(|field| field.column + 1)
            .max()
            .unwrap_or(0)
    }

    /// Map one row into attributes, or say why the row is rejected.
    pub fn apply<S: AsRef<str>>(&self, row: &[S]) -> Result<AttributeMap, SkipReason> {
        let columns = self.project(row)?;

        let mut attributes = AttributeMap::with_capacity(self.fields.len() + self.constants.len());
        for field in self.fields {
            let text = columns[field.column].to_string();
            let value = match field.tag {
                Tag::S => AttributeValue::S(text),
                Tag::N => AttributeValue::N(text),
            };
            attributes.insert(field.attribute, value);
        }

        for &attribute in self.required {
            let empty = attributes
                .get(attribute)
                .and_then(AttributeValue::key_text)
                .map_or(true, str::is_empty);
            if empty {
                return Err(SkipReason::MissingValue { attribute });
            }
        }

        for constant in self.constants {
            attributes.insert(constant.attribute, AttributeValue::Bool(constant.value));
        }

        Ok(attributes)
    }

    fn project<'r, S: AsRef<str>>(&self, row: &'r [S]) -> Result<Vec<&'r str>, SkipReason> {
        match self.shape {
            RowShape::AtLeastMapped => {
                let required = self.min_columns();
                if row.len() < required {
                    return Err(SkipReason::TooShort {
                        found: row.len(),
                        required,
                    });
                }
                Ok(row.iter().map(AsRef::as_ref).collect())
            }
            RowShape::Widths(widths) => {
                let width = widths
                    .iter()
                    .find(|width| width.columns == row.len())
                    .ok_or_else(|| SkipReason::UnexpectedWidth {
                        found: row.len(),
                        expected: widths.iter().map(|width| width.columns).collect(),
                    })?;
                Ok(row
                    .iter()
                    .enumerate()
                    .filter(|(index, _)| !width.ignored.contains(index))
                    .map(|(_, value)| value.as_ref())
                    .collect())
            }
        }
    }
}

/// CSV-backed datasets the loader knows how to format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dataset {
    Icb,
    Lsoa,
    UniqueLsoa,
    Population,
}

impl Dataset {
    pub const ALL: [Dataset; 4] = [
        Dataset::Icb,
        Dataset::Lsoa,
        Dataset::UniqueLsoa,
        Dataset::Population,
    ];

    pub fn schema(&self) -> &'static Schema {
        match self {
            Dataset::Icb => &icb::SCHEMA,
            Dataset::Lsoa => &lsoa::SCHEMA,
            Dataset::UniqueLsoa => &unique_lsoa::SCHEMA,
            Dataset::Population => &population::SCHEMA,
        }
    }

    /// Base table name before environment namespacing.
    pub fn default_table(&self) -> &'static str {
        match self {
            Dataset::Icb => "ParticipatingIcb",
            Dataset::Lsoa => "LSOA_table",
            Dataset::UniqueLsoa => "UniqueLsoa",
            Dataset::Population => "Population",
        }
    }

    pub fn default_batch_size(&self) -> usize {
        match self {
            Dataset::Icb => 25,
            Dataset::Lsoa | Dataset::UniqueLsoa | Dataset::Population => 100,
        }
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dataset::Icb => write!(f, "icb"),
            Dataset::Lsoa => write!(f, "lsoa"),
            Dataset::UniqueLsoa => write!(f, "unique-lsoa"),
            Dataset::Population => write!(f, "population"),
        }
    }
}

impl FromStr for Dataset {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "icb" | "participating-icb" => Ok(Dataset::Icb),
            "lsoa" => Ok(Dataset::Lsoa),
            "unique-lsoa" | "unique_lsoa" => Ok(Dataset::UniqueLsoa),
            "population" => Ok(Dataset::Population),
            _ => Err(CoreError::UnknownDataset(s.to_string())),
        }
    }
}
