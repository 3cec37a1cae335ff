use std::io::{self, Write};

use serde::Serialize;

use crate::domain::Summary;
use crate::query::{SortKey, SortOrder};
use crate::store::Neighbors;

#[derive(Debug, Clone, Copy)]
pub enum OutputMode {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResult {
    pub search: String,
    pub sort: SortKey,
    pub order: SortOrder,
    pub total: usize,
    pub items: Vec<Summary>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryResult {
    pub available_types: Vec<String>,
    pub selected_types: Vec<String>,
    pub total: usize,
    pub items: Vec<Summary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailResult {
    pub pokemon: Summary,
    pub previous: Option<NeighborRef>,
    pub next: Option<NeighborRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NeighborRef {
    pub id: u32,
    pub name: String,
}

impl DetailResult {
    pub fn new(pokemon: Summary, neighbors: Neighbors) -> Self {
        let to_ref = |entry: Summary| NeighborRef {
            id: entry.id.get(),
            name: entry.name,
        };
        Self {
            pokemon,
            previous: neighbors.previous.map(to_ref),
            next: neighbors.next.map(to_ref),
        }
    }
}

pub struct JsonOutput;

impl JsonOutput {
    pub fn print<T: Serialize>(value: &T) -> io::Result<()> {
        let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
        let mut stdout = io::stdout();
        stdout.write_all(json.as_bytes())?;
        stdout.write_all(b"\n")?;
        Ok(())
    }
}

pub struct TextOutput;

impl TextOutput {
    pub fn list_row(entry: &Summary) -> String {
        format!(
            "#{:03}  {:<16} {:<18} h:{:<4} w:{:<5} xp:{}",
            entry.id.get(),
            entry.display_name(),
            entry.types.join("/"),
            entry.height,
            entry.weight,
            entry.base_experience
        )
    }

    pub fn print_list(result: &ListResult) {
        println!("Showing {} of {} Pokémon", result.items.len(), result.total);
        for entry in &result.items {
            println!("{}", Self::list_row(entry));
        }
    }

    pub fn print_gallery(result: &GalleryResult) {
        println!("Types: {}", result.available_types.join(", "));
        if !result.selected_types.is_empty() {
            println!("Selected: {}", result.selected_types.join(", "));
        }
        println!("Showing {} of {}", result.items.len(), result.total);
        for entry in &result.items {
            println!("#{:03}  {:<16} {}", entry.id.get(), entry.display_name(), entry.image);
        }
    }

    pub fn detail_lines(result: &DetailResult) -> Vec<String> {
        let pokemon = &result.pokemon;
        let mut lines = vec![
            format!("#{:03} {}", pokemon.id.get(), pokemon.display_name()),
            format!("types: {}", pokemon.types.join(", ")),
            format!("height: {}", pokemon.height),
            format!("weight: {}", pokemon.weight),
            format!("base experience: {}", pokemon.base_experience),
            format!("abilities: {}", pokemon.abilities.join(", ")),
        ];
        for stat in &pokemon.stats {
            lines.push(format!("  {:<16} {}", stat.name, stat.value));
        }
        if !pokemon.image.is_empty() {
            lines.push(format!("image: {}", pokemon.image));
        }
        if let Some(sprite) = &pokemon.sprite {
            lines.push(format!("sprite: {sprite}"));
        }
        let describe = |neighbor: &Option<NeighborRef>| match neighbor {
            Some(entry) => format!("#{:03} {}", entry.id, entry.name.replace('-', " ")),
            None => "-".to_string(),
        };
        lines.push(format!(
            "previous: {}  next: {}",
            describe(&result.previous),
            describe(&result.next)
        ));
        lines
    }

    pub fn print_detail(result: &DetailResult) {
        for line in Self::detail_lines(result) {
            println!("{line}");
        }
    }
}
