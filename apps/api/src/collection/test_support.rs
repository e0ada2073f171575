//! In-memory collection store for tests.

use chrono::Utc;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

/// Single-connection pool so every query sees the same `:memory:` database.
pub async fn memory_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory SQLite");
    crate::db::run_migrations(&pool)
        .await
        .expect("migrations apply");
    pool
}

#[derive(Debug, Clone)]
pub struct Fixture {
    species: String,
    dex: Option<i64>,
    nickname: Option<String>,
    shiny: Option<bool>,
    trainer: Option<String>,
    ability: Option<String>,
    moves: [Option<String>; 4],
    ivs: [Option<i64>; 6],
    detail_screenshot: Option<String>,
    parsed: bool,
}

impl Fixture {
    pub fn new(species: &str) -> Self {
        Fixture {
            species: species.to_string(),
            dex: None,
            nickname: None,
            shiny: Some(false),
            trainer: None,
            ability: None,
            moves: Default::default(),
            ivs: Default::default(),
            detail_screenshot: None,
            parsed: true,
        }
    }

    pub fn dex(mut self, dex: i64) -> Self {
        self.dex = Some(dex);
        self
    }

    pub fn nickname(mut self, nickname: &str) -> Self {
        self.nickname = Some(nickname.to_string());
        self
    }

    pub fn shiny(mut self) -> Self {
        self.shiny = Some(true);
        self
    }

    /// Stored as SQL NULL, as legacy rows can be.
    pub fn null_shiny(mut self) -> Self {
        self.shiny = None;
        self
    }

    pub fn trainer(mut self, trainer: &str) -> Self {
        self.trainer = Some(trainer.to_string());
        self
    }

    pub fn ability(mut self, ability: &str) -> Self {
        self.ability = Some(ability.to_string());
        self
    }

    pub fn moves(mut self, moves: &[Option<&str>]) -> Self {
        for (slot, m) in self.moves.iter_mut().zip(moves) {
            *slot = m.map(str::to_string);
        }
        self
    }

    pub fn ivs(mut self, ivs: [i64; 6]) -> Self {
        self.ivs = ivs.map(Some);
        self
    }

    pub fn detail_screenshot(mut self, path: &str) -> Self {
        self.detail_screenshot = Some(path.to_string());
        self
    }

    /// Ingested but not yet parsed: invisible through the API.
    pub fn unparsed(mut self) -> Self {
        self.parsed = false;
        self
    }
}

/// Inserts the fixture into the next free slot of box 0 and returns its id.
pub async fn insert(pool: &SqlitePool, fixture: &Fixture) -> i64 {
    let parsed_at = fixture.parsed.then(|| Utc::now().naive_utc());
    sqlx::query(
        r#"
        INSERT INTO pokemon (
            box_number, box_slot, species_name, dex_number, nickname, is_shiny,
            original_trainer, ability, move1, move2, move3, move4,
            iv_hp, iv_atk, iv_def, iv_spatk, iv_spdef, iv_speed,
            detail_screenshot_path, parsed_at
        )
        VALUES (
            0, (SELECT COUNT(*) FROM pokemon), ?, ?, ?, ?,
            ?, ?, ?, ?, ?, ?,
            ?, ?, ?, ?, ?, ?,
            ?, ?
        )
        "#,
    )
    .bind(&fixture.species)
    .bind(fixture.dex)
    .bind(&fixture.nickname)
    .bind(fixture.shiny)
    .bind(&fixture.trainer)
    .bind(&fixture.ability)
    .bind(&fixture.moves[0])
    .bind(&fixture.moves[1])
    .bind(&fixture.moves[2])
    .bind(&fixture.moves[3])
    .bind(fixture.ivs[0])
    .bind(fixture.ivs[1])
    .bind(fixture.ivs[2])
    .bind(fixture.ivs[3])
    .bind(fixture.ivs[4])
    .bind(fixture.ivs[5])
    .bind(&fixture.detail_screenshot)
    .bind(parsed_at)
    .execute(pool)
    .await
    .expect("fixture insert")
    .last_insert_rowid()
}
