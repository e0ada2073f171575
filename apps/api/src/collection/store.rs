use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::collection::query::{like_pattern, CollectionFilter, ListQuery};
use crate::models::collection::{
    CollectionDetail, CollectionDetailRow, CollectionPage, CollectionStats, CollectionSummary,
    TrainerCount,
};

/// Rows without `parsed_at` are still being ingested and stay hidden.
const VISIBLE: &str = "parsed_at IS NOT NULL";

pub const TOP_TRAINERS: i64 = 10;

const SUMMARY_COLUMNS: &str = r#"
    id,
    box_number,
    box_slot,
    COALESCE(species_name, 'Unknown') AS species_name,
    dex_number,
    form_name,
    nickname,
    level,
    nature,
    COALESCE(is_shiny, 0)             AS is_shiny,
    gender,
    original_trainer,
    trainer_id,
    ball_type,
    CASE WHEN detail_screenshot_path IS NOT NULL
         THEN '/image/' || detail_screenshot_path END AS image_url
"#;

const DETAIL_COLUMNS: &str = r#"
    id,
    box_number,
    box_slot,
    COALESCE(species_name, 'Unknown') AS species_name,
    dex_number,
    form_name,
    nickname,
    level,
    nature,
    ability,
    COALESCE(is_shiny, 0)             AS is_shiny,
    gender,
    held_item,
    mark,
    iv_hp, iv_atk, iv_def, iv_spatk, iv_spdef, iv_speed,
    ev_hp, ev_atk, ev_def, ev_spatk, ev_spdef, ev_speed,
    move1, move2, move3, move4,
    original_trainer,
    trainer_id,
    game_of_origin,
    ball_type,
    date_caught,
    met_at_level,
    met_at_location,
    CASE WHEN detail_screenshot_path IS NOT NULL
         THEN '/image/' || detail_screenshot_path END AS image_url,
    CASE WHEN sprite_path IS NOT NULL
         THEN '/image/' || sprite_path END AS sprite_url,
    parsed_at
"#;

/// Dex order, unnumbered forms last, id as the tiebreak. Total over
/// visible rows, so consecutive offsets never overlap or skip.
const LISTING_ORDER: &str = " ORDER BY dex_number IS NULL, dex_number, id";

/// Text matching uses SQLite `LIKE`, which folds ASCII case only: `pika`
/// finds `Pikachu`, but `FLABÉBÉ` does not find `Flabébé`.
fn push_filters(qb: &mut QueryBuilder<'_, Sqlite>, filter: &CollectionFilter) {
    qb.push(" WHERE ").push(VISIBLE);

    if let Some(text) = &filter.text {
        let pattern = like_pattern(text);
        qb.push(" AND (species_name LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR nickname LIKE ")
            .push_bind(pattern.clone())
            .push(" ESCAPE '\\' OR original_trainer LIKE ")
            .push_bind(pattern)
            .push(" ESCAPE '\\')");
    }

    if let Some(shiny) = filter.shiny {
        qb.push(" AND COALESCE(is_shiny, 0) = ").push_bind(shiny);
    }

    if let Some(trainer) = &filter.trainer {
        qb.push(" AND original_trainer = ").push_bind(trainer.clone());
    }
}

/// Counts every row matching the filter, then fetches one page of it.
pub async fn list_records(pool: &SqlitePool, query: &ListQuery) -> Result<CollectionPage, sqlx::Error> {
    let mut count = QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM pokemon");
    push_filters(&mut count, &query.filter);
    let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

    let mut page = QueryBuilder::<Sqlite>::new("SELECT ");
    page.push(SUMMARY_COLUMNS).push(" FROM pokemon");
    push_filters(&mut page, &query.filter);
    page.push(LISTING_ORDER)
        .push(" LIMIT ")
        .push_bind(query.window.limit)
        .push(" OFFSET ")
        .push_bind(query.window.offset);
    let items = page
        .build_query_as::<CollectionSummary>()
        .fetch_all(pool)
        .await?;

    tracing::debug!(
        total,
        returned = items.len(),
        offset = query.window.offset,
        "Listed collection page"
    );

    Ok(CollectionPage { total, items })
}

pub async fn get_record(pool: &SqlitePool, id: i64) -> Result<Option<CollectionDetail>, sqlx::Error> {
    let sql = format!("SELECT {DETAIL_COLUMNS} FROM pokemon WHERE id = ? AND {VISIBLE}");
    let row = sqlx::query_as::<_, CollectionDetailRow>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(CollectionDetail::from))
}

pub async fn collection_stats(pool: &SqlitePool) -> Result<CollectionStats, sqlx::Error> {
    let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM pokemon WHERE {VISIBLE}"))
        .fetch_one(pool)
        .await?;

    let shiny: i64 = sqlx::query_scalar(&format!(
        "SELECT COUNT(*) FROM pokemon WHERE {VISIBLE} AND COALESCE(is_shiny, 0) = 1"
    ))
    .fetch_one(pool)
    .await?;

    let top_trainers = sqlx::query_as::<_, TrainerCount>(&format!(
        r#"
        SELECT original_trainer, COUNT(*) AS n
        FROM pokemon
        WHERE {VISIBLE} AND original_trainer IS NOT NULL
        GROUP BY original_trainer
        ORDER BY n DESC, original_trainer ASC
        LIMIT ?
        "#
    ))
    .bind(TOP_TRAINERS)
    .fetch_all(pool)
    .await?;

    Ok(CollectionStats {
        total,
        shiny,
        top_trainers,
    })
}
