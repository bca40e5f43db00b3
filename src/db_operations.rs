use rusqlite::{params, Connection, OptionalExtension};

use chrono::NaiveDate;

use crate::data_types::openmensa_data_types::Dish;

pub fn check_or_create_db_tables(db: &str) -> rusqlite::Result<()> {
    let conn = Connection::open(db)?;

    // one cached menu per canteen and day
    conn.prepare(
        "create table if not exists menus (
        canteen_id integer not null,
        date text not null,
        json_text text not null,
        primary key (canteen_id, date)
        )",
    )?
    .execute([])?;

    Ok(())
}

pub fn cache_menu(
    db: &str,
    canteen_id: u32,
    date: NaiveDate,
    dishes: &[Dish],
) -> anyhow::Result<()> {
    let conn = Connection::open(db)?;
    let mut stmt = conn.prepare_cached(
        "replace into menus (canteen_id, date, json_text)
            values (?1, ?2, ?3)",
    )?;

    stmt.execute(params![
        canteen_id,
        date.format("%Y-%m-%d").to_string(),
        serde_json::to_string(dishes)?
    ])?;

    Ok(())
}

pub fn get_cached_menu(
    db: &str,
    canteen_id: u32,
    date: NaiveDate,
) -> anyhow::Result<Option<Vec<Dish>>> {
    let conn = Connection::open(db)?;
    let mut stmt =
        conn.prepare_cached("SELECT json_text FROM menus WHERE canteen_id = ?1 AND date = ?2")?;

    let json_text: Option<String> = stmt
        .query_row(
            params![canteen_id, date.format("%Y-%m-%d").to_string()],
            |row| row.get(0),
        )
        .optional()?;

    match json_text {
        Some(json_text) => Ok(Some(serde_json::from_str(&json_text)?)),
        None => Ok(None),
    }
}
