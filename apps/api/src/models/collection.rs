use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One card in the collection grid.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
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

/// Flat projection of a `pokemon` row; reshaped into [`CollectionDetail`].
#[derive(Debug, Clone, FromRow)]
pub struct CollectionDetailRow {
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
    pub iv_hp: Option<i64>,
    pub iv_atk: Option<i64>,
    pub iv_def: Option<i64>,
    pub iv_spatk: Option<i64>,
    pub iv_spdef: Option<i64>,
    pub iv_speed: Option<i64>,
    pub ev_hp: Option<i64>,
    pub ev_atk: Option<i64>,
    pub ev_def: Option<i64>,
    pub ev_spatk: Option<i64>,
    pub ev_spdef: Option<i64>,
    pub ev_speed: Option<i64>,
    pub move1: Option<String>,
    pub move2: Option<String>,
    pub move3: Option<String>,
    pub move4: Option<String>,
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

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatSpread {
    pub hp: Option<i64>,
    pub atk: Option<i64>,
    pub def: Option<i64>,
    pub spatk: Option<i64>,
    pub spdef: Option<i64>,
    pub speed: Option<i64>,
}

impl StatSpread {
    /// `None` when no stat of the spread was extracted.
    fn from_columns(
        hp: Option<i64>,
        atk: Option<i64>,
        def: Option<i64>,
        spatk: Option<i64>,
        spdef: Option<i64>,
        speed: Option<i64>,
    ) -> Option<Self> {
        let spread = StatSpread {
            hp,
            atk,
            def,
            spatk,
            spdef,
            speed,
        };
        (spread != StatSpread::default()).then_some(spread)
    }
}

/// Full record behind the detail overlay.
#[derive(Debug, Clone, Serialize, Deserialize)]
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

impl From<CollectionDetailRow> for CollectionDetail {
    fn from(row: CollectionDetailRow) -> Self {
        let ivs = StatSpread::from_columns(
            row.iv_hp,
            row.iv_atk,
            row.iv_def,
            row.iv_spatk,
            row.iv_spdef,
            row.iv_speed,
        );
        let evs = StatSpread::from_columns(
            row.ev_hp,
            row.ev_atk,
            row.ev_def,
            row.ev_spatk,
            row.ev_spdef,
            row.ev_speed,
        );
        CollectionDetail {
            id: row.id,
            box_number: row.box_number,
            box_slot: row.box_slot,
            species_name: row.species_name,
            dex_number: row.dex_number,
            form_name: row.form_name,
            nickname: row.nickname,
            level: row.level,
            nature: row.nature,
            ability: row.ability,
            is_shiny: row.is_shiny,
            gender: row.gender,
            held_item: row.held_item,
            mark: row.mark,
            move1: row.move1,
            move2: row.move2,
            move3: row.move3,
            move4: row.move4,
            ivs,
            evs,
            original_trainer: row.original_trainer,
            trainer_id: row.trainer_id,
            game_of_origin: row.game_of_origin,
            ball_type: row.ball_type,
            date_caught: row.date_caught,
            met_at_level: row.met_at_level,
            met_at_location: row.met_at_location,
            image_url: row.image_url,
            sprite_url: row.sprite_url,
            parsed_at: row.parsed_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionPage {
    pub total: i64,
    pub items: Vec<CollectionSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct TrainerCount {
    pub original_trainer: String,
    pub n: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total: i64,
    pub shiny: i64,
    pub top_trainers: Vec<TrainerCount>,
}
