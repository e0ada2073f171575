//! Static National Pokédex gallery.
//!
//! The list is generated offline and read once at startup. Several shapes of
//! generated JSON are accepted so the generator can change without a
//! matching release here.

pub mod handlers;

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DexEntry {
    pub dex_number: i64,
    pub name: String,
    pub sprite_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DexGallery {
    /// Sorted by dex number, one entry per number.
    entries: Vec<DexEntry>,
}

impl DexGallery {
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("reading Pokédex list {}", path.display()))?;
        let value: Value = serde_json::from_str(&data)
            .with_context(|| format!("parsing Pokédex list {}", path.display()))?;
        let gallery = Self::from_value(&value)?;
        info!(
            "Loaded {} Pokédex entries from {}",
            gallery.entries.len(),
            path.display()
        );
        Ok(gallery)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        let items = if let Some(a) = value.as_array() {
            a
        } else if let Some(obj) = value.as_object() {
            obj.get("pokemon")
                .and_then(Value::as_array)
                .or_else(|| obj.values().find_map(Value::as_array))
                .context("Pokédex JSON object holds no array")?
        } else {
            anyhow::bail!("Pokédex JSON must be an array or an object holding one");
        };

        let mut entries: Vec<DexEntry> = items
            .iter()
            .enumerate()
            .filter_map(|(i, item)| {
                let entry = parse_entry(item);
                if entry.is_none() {
                    warn!("Skipping Pokédex item {i}: no usable number or name");
                }
                entry
            })
            .collect();
        entries.sort_by_key(|e| e.dex_number);
        entries.dedup_by_key(|e| e.dex_number);

        Ok(DexGallery { entries })
    }

    pub fn entries(&self) -> &[DexEntry] {
        &self.entries
    }

    pub fn get(&self, dex_number: i64) -> Option<&DexEntry> {
        self.entries
            .binary_search_by_key(&dex_number, |e| e.dex_number)
            .ok()
            .map(|i| &self.entries[i])
    }
}

fn parse_entry(item: &Value) -> Option<DexEntry> {
    let dex_number = ["dex_number", "id", "num"].iter().find_map(|k| {
        let v = item.get(*k)?;
        v.as_i64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse::<i64>().ok()))
    })?;
    if dex_number <= 0 {
        return None;
    }

    let name = item
        .get("name")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())?
        .to_string();

    let sprite_url = ["sprite_url", "sprite", "image_url", "img"]
        .iter()
        .find_map(|k| item.get(*k).and_then(Value::as_str))
        .map(str::to_string);

    Some(DexEntry {
        dex_number,
        name,
        sprite_url,
    })
}
