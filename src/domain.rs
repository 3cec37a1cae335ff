use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PokemonId(u32);

impl PokemonId {
    pub fn new(value: u32) -> Result<Self, CatalogError> {
        if value == 0 {
            return Err(CatalogError::InvalidId(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for PokemonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PokemonId {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        let is_valid = !trimmed.is_empty() && trimmed.chars().all(|ch| ch.is_ascii_digit());
        if !is_valid {
            return Err(CatalogError::InvalidId(value.to_string()));
        }
        let parsed = trimmed
            .parse::<u32>()
            .map_err(|_| CatalogError::InvalidId(value.to_string()))?;
        Self::new(parsed).map_err(|_| CatalogError::InvalidId(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stat {
    pub name: String,
    pub value: u32,
}

/// Flattened view of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    pub id: PokemonId,
    pub name: String,
    pub image: String,
    pub sprite: Option<String>,
    pub height: u32,
    pub weight: u32,
    pub base_experience: u32,
    pub abilities: Vec<String>,
    pub stats: Vec<Stat>,
    pub types: Vec<String>,
}

impl Summary {
    pub fn display_name(&self) -> String {
        self.name.replace('-', " ")
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        self.types.iter().any(|t| t == type_name)
    }
}
