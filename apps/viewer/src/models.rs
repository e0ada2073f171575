use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Shown wherever a record has no `image_url`.
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.png";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSummary {
    pub id: i64,
    pub box_number: i64,
    pub box_slot: i64,
    pub species_name: String,
    pub dex_number: Option<i64>,
    pub form_name: Option<String>,
    pub nickname: Option<String>,
    pub level: Option<i64>,
    pub nature: Option<String>,
    pub is_shiny: bool,
    pub gender: Option<String>,
    pub original_trainer: Option<String>,
    pub trainer_id: Option<String>,
    pub ball_type: Option<String>,
    pub image_url: Option<String>,
}

impl CollectionSummary {
    /// Primary card label: the nickname, or the species when there is none.
    pub fn display_name(&self) -> &str {
        display_name(self.nickname.as_deref(), &self.species_name)
    }

    pub fn image_or_placeholder(&self) -> &str {
        self.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSpread {
    pub hp: Option<i64>,
    pub atk: Option<i64>,
    pub def: Option<i64>,
    pub spatk: Option<i64>,
    pub spdef: Option<i64>,
    pub speed: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDetail {
    pub id: i64,
    pub box_number: i64,
    pub box_slot: i64,
    pub species_name: String,
    pub dex_number: Option<i64>,
    pub form_name: Option<String>,
    pub nickname: Option<String>,
    pub level: Option<i64>,
    pub nature: Option<String>,
    pub ability: Option<String>,
    pub is_shiny: bool,
    pub gender: Option<String>,
    pub held_item: Option<String>,
    pub mark: Option<String>,
    pub move1: Option<String>,
    pub move2: Option<String>,
    pub move3: Option<String>,
    pub move4: Option<String>,
    pub ivs: Option<StatSpread>,
    pub evs: Option<StatSpread>,
    pub original_trainer: Option<String>,
    pub trainer_id: Option<String>,
    pub game_of_origin: Option<String>,
    pub ball_type: Option<String>,
    pub date_caught: Option<String>,
    pub met_at_level: Option<i64>,
    pub met_at_location: Option<String>,
    pub image_url: Option<String>,
    pub sprite_url: Option<String>,
    pub parsed_at: Option<NaiveDateTime>,
}

impl CollectionDetail {
    pub fn display_name(&self) -> &str {
        display_name(self.nickname.as_deref(), &self.species_name)
    }

    pub fn image_or_placeholder(&self) -> &str {
        self.image_url.as_deref().unwrap_or(PLACEHOLDER_IMAGE)
    }

    /// Move slots in display order; empty slots stay in place.
    pub fn moves(&self) -> [Option<&str>; 4] {
        [
            self.move1.as_deref(),
            self.move2.as_deref(),
            self.move3.as_deref(),
            self.move4.as_deref(),
        ]
    }
}

fn display_name<'a>(nickname: Option<&'a str>, species: &'a str) -> &'a str {
    nickname
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(species)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListPage {
    pub total: i64,
    pub items: Vec<CollectionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerCount {
    pub original_trainer: String,
    pub n: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total: i64,
    pub shiny: i64,
    pub top_trainers: Vec<TrainerCount>,
}

/// Filter state as the user composes it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filters {
    pub text: String,
    pub shiny: Option<bool>,
    pub trainer: Option<String>,
}

impl Filters {
    pub fn to_query(&self, limit: i64, offset: i64) -> ListQuery {
        let text = self.text.trim();
        ListQuery {
            q: (!text.is_empty()).then(|| text.to_string()),
            shiny: self.shiny,
            ot: self.trainer.clone(),
            limit,
            offset,
        }
    }
}

/// Query string for `GET /api/pokemon`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shiny: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ot: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
