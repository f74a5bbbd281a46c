//! # Casing
//!
//! Field-name casing policies shared by the tag builder, identifier naming,
//! and output file naming.

use crate::error::ConfigError;
use heck::{ToLowerCamelCase, ToSnakeCase, ToUpperCamelCase};
use std::fmt::Display;
use std::str::FromStr;

/// Casing applied to generated serialisation names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Casing {
    /// Leave names untouched and emit no serialisation tag.
    #[default]
    None,
    /// `lowerCamel`.
    Camel,
    /// `lower_snake`.
    Snake,
    /// `UpperCamel`.
    Pascal,
}

impl Casing {
    /// Rewrites `name` according to the policy.
    pub fn apply(self, name: &str) -> String {
        match self {
            Casing::None => name.to_string(),
            Casing::Camel => name.to_lower_camel_case(),
            Casing::Snake => name.to_snake_case(),
            Casing::Pascal => name.to_upper_camel_case(),
        }
    }

    /// Parses a configured value, attributing failures to `section`.
    pub fn parse_for(section: &'static str, value: &str) -> Result<Self, ConfigError> {
        value.parse().map_err(|_| ConfigError::InvalidCasing {
            section,
            value: value.to_string(),
        })
    }
}

impl FromStr for Casing {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(Casing::None),
            "camel" => Ok(Casing::Camel),
            "snake" => Ok(Casing::Snake),
            "pascal" => Ok(Casing::Pascal),
            other => Err(format!("unknown casing: {}", other)),
        }
    }
}

impl Display for Casing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Casing::None => write!(f, "none"),
            Casing::Camel => write!(f, "camel"),
            Casing::Snake => write!(f, "snake"),
            Casing::Pascal => write!(f, "pascal"),
        }
    }
}

/// Upper camel case, used for identifier-derived type and method names.
pub fn to_pascal(name: &str) -> String {
    name.to_upper_camel_case()
}

/// Lower snake case, used for output file names.
pub fn to_file_stem(name: &str) -> String {
    name.to_snake_case()
}
