#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::Duration;

use pokedex_catalog::api::{
    CatalogClient, DetailTarget, NamedResource, RawAbility, RawArtwork, RawDetail, RawListEntry,
    RawListing, RawSprites, RawStat, RawType,
};
use pokedex_catalog::error::CatalogError;

pub fn entry_url(id: u32) -> String {
    format!("https://pokeapi.co/api/v2/pokemon/{id}/")
}

pub fn raw_detail(id: u32, name: &str, types: &[(u32, &str)]) -> RawDetail {
    let mut other = HashMap::new();
    other.insert(
        "official-artwork".to_string(),
        Some(RawArtwork {
            front_default: Some(format!("art/{id}.png")),
        }),
    );
    RawDetail {
        id,
        name: name.to_string(),
        height: id * 2,
        weight: id * 10,
        base_experience: Some(50 + id),
        abilities: vec![RawAbility {
            ability: NamedResource {
                name: "overgrow".to_string(),
            },
        }],
        stats: vec![RawStat {
            base_stat: 45,
            stat: NamedResource {
                name: "hp".to_string(),
            },
        }],
        types: types
            .iter()
            .map(|(slot, name)| RawType {
                slot: *slot,
                kind: NamedResource {
                    name: name.to_string(),
                },
            })
            .collect(),
        sprites: RawSprites {
            front_default: Some(format!("sprite/{id}.png")),
            other: Some(other),
        },
    }
}

/// Scripted upstream. Detail lookups resolve by the trailing id of a URL or by
/// numeric id.
#[derive(Default)]
pub struct MockCatalog {
    pub listing: Vec<RawListEntry>,
    pub details: HashMap<u32, RawDetail>,
    pub failing: HashSet<u32>,
    pub panicking: HashSet<u32>,
    /// Lookups currently running, and the highest value it reached.
    pub in_flight: AtomicUsize,
    pub peak_in_flight: AtomicUsize,
    pub list_fails: bool,
    pub list_calls: Mutex<usize>,
    pub detail_calls: Mutex<Vec<DetailTarget>>,
    /// Taken by the first `list` call, which waits on it twice: once on
    /// entry and once before returning.
    pub list_gate: Mutex<Option<Arc<Barrier>>>,
    /// Waited on by every detail-by-id lookup before it returns.
    pub detail_gate: Option<Arc<Barrier>>,
}

impl MockCatalog {
    pub fn with_entries(entries: Vec<RawDetail>) -> Self {
        let mut mock = MockCatalog::default();
        for detail in entries {
            mock.listing.push(RawListEntry {
                name: detail.name.clone(),
                url: entry_url(detail.id),
            });
            mock.details.insert(detail.id, detail);
        }
        mock
    }

    pub fn failing(mut self, id: u32) -> Self {
        self.failing.insert(id);
        self
    }

    pub fn detail_call_count(&self) -> usize {
        self.detail_calls.lock().unwrap().len()
    }

    pub fn list_call_count(&self) -> usize {
        *self.list_calls.lock().unwrap()
    }
}

impl CatalogClient for MockCatalog {
    fn list(&self, limit: u32, offset: u32) -> Result<RawListing, CatalogError> {
        *self.list_calls.lock().unwrap() += 1;
        let gate = self.list_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.wait();
            gate.wait();
        }
        if self.list_fails {
            return Err(CatalogError::Http("connection refused".to_string()));
        }
        let results: Vec<RawListEntry> = self
            .listing
            .iter()
            .skip(offset as usize)
            .take(limit as usize)
            .cloned()
            .collect();
        Ok(RawListing {
            count: self.listing.len() as u32,
            next: None,
            previous: None,
            results,
        })
    }

    fn detail(&self, target: &DetailTarget) -> Result<RawDetail, CatalogError> {
        self.detail_calls.lock().unwrap().push(target.clone());
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);
        thread::sleep(Duration::from_micros(50));
        let result = self.lookup(target);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

impl MockCatalog {
    fn lookup(&self, target: &DetailTarget) -> Result<RawDetail, CatalogError> {
        let id = match target {
            DetailTarget::Id(id) => {
                if let Some(gate) = &self.detail_gate {
                    gate.wait();
                }
                id.get()
            }
            DetailTarget::Url(url) => url
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .and_then(|tail| tail.parse().ok())
                .ok_or_else(|| CatalogError::Decode(format!("bad url {url}")))?,
        };
        if self.panicking.contains(&id) {
            panic!("malformed upstream record {id}");
        }
        if self.failing.contains(&id) {
            return Err(CatalogError::Status {
                status: 500,
                message: "upstream exploded".to_string(),
            });
        }
        self.details
            .get(&id)
            .cloned()
            .ok_or(CatalogError::Status {
                status: 404,
                message: "Not Found".to_string(),
            })
    }
}
