use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::domain::Summary;
use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    #[default]
    Id,
    Name,
    Height,
    Weight,
    BaseExperience,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Id => write!(f, "id"),
            SortKey::Name => write!(f, "name"),
            SortKey::Height => write!(f, "height"),
            SortKey::Weight => write!(f, "weight"),
            SortKey::BaseExperience => write!(f, "base-experience"),
        }
    }
}

impl FromStr for SortKey {
    type Err = CatalogError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "id" => Ok(SortKey::Id),
            "name" => Ok(SortKey::Name),
            "height" => Ok(SortKey::Height),
            "weight" => Ok(SortKey::Weight),
            "base-experience" | "base_experience" | "baseexperience" => {
                Ok(SortKey::BaseExperience)
            }
            _ => Err(CatalogError::InvalidSortKey(value.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }
}

pub fn compare_by_key(a: &Summary, b: &Summary, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id.cmp(&b.id),
        SortKey::Height => a.height.cmp(&b.height),
        SortKey::Weight => a.weight.cmp(&b.weight),
        SortKey::BaseExperience => a.base_experience.cmp(&b.base_experience),
        SortKey::Name => a
            .name
            .to_lowercase()
            .cmp(&b.name.to_lowercase())
            .then_with(|| a.name.cmp(&b.name)),
    }
}

pub fn search_and_sort(
    items: &[Summary],
    term: &str,
    key: SortKey,
    order: SortOrder,
) -> Vec<Summary> {
    let query = term.trim().to_lowercase();
    let mut matched: Vec<Summary> = items
        .iter()
        .filter(|entry| entry.name.to_lowercase().contains(&query))
        .cloned()
        .collect();
    matched.sort_by(|a, b| {
        let ordering = compare_by_key(a, b, key);
        match order {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    });
    matched
}

pub fn all_types(items: &[Summary]) -> Vec<String> {
    items
        .iter()
        .flat_map(|entry| entry.types.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn filter_by_types(items: &[Summary], selected: &[String]) -> Vec<Summary> {
    items
        .iter()
        .filter(|entry| selected.iter().all(|type_name| entry.has_type(type_name)))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeSelection {
    selected: Vec<String>,
}

impl TypeSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, type_name: &str) -> bool {
        if let Some(index) = self.selected.iter().position(|t| t == type_name) {
            self.selected.remove(index);
            false
        } else {
            self.selected.push(type_name.to_string());
            true
        }
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.selected.iter().any(|t| t == type_name)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn as_slice(&self) -> &[String] {
        &self.selected
    }

    pub fn apply(&self, items: &[Summary]) -> Vec<Summary> {
        filter_by_types(items, &self.selected)
    }
}

impl<S: AsRef<str>> FromIterator<S> for TypeSelection {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut selection = TypeSelection::new();
        for type_name in iter {
            if !selection.contains(type_name.as_ref()) {
                selection.toggle(type_name.as_ref());
            }
        }
        selection
    }
}
