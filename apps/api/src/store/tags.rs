use sqlx::SqliteExecutor;

use crate::models::tag::{EntityKind, TagLookup, TagRow};

pub async fn list_tags<'e>(db: impl SqliteExecutor<'e>) -> Result<Vec<TagRow>, sqlx::Error> {
    sqlx::query_as::<_, TagRow>("SELECT id, name, color FROM tags ORDER BY name")
        .fetch_all(db)
        .await
}

pub async fn get_tag<'e>(
    db: impl SqliteExecutor<'e>,
    id: i64,
) -> Result<Option<TagRow>, sqlx::Error> {
    sqlx::query_as::<_, TagRow>("SELECT id, name, color FROM tags WHERE id = ?")
        .bind(id)
        .fetch_optional(db)
        .await
}

/// Inserts a tag; a duplicate name fails with a unique violation.
pub async fn insert_tag<'e>(
    db: impl SqliteExecutor<'e>,
    name: &str,
    color: &str,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query("INSERT INTO tags (name, color) VALUES (?, ?)")
        .bind(name)
        .bind(color)
        .execute(db)
        .await?;
    Ok(result.last_insert_rowid())
}

pub async fn update_tag<'e>(
    db: impl SqliteExecutor<'e>,
    id: i64,
    name: &str,
    color: &str,
) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("UPDATE tags SET name = ?, color = ? WHERE id = ?")
        .bind(name)
        .bind(color)
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

/// Deletes a tag. Its account and contact links cascade in the same statement.
pub async fn delete_tag<'e>(db: impl SqliteExecutor<'e>, id: i64) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tags WHERE id = ?")
        .bind(id)
        .execute(db)
        .await?;
    Ok(result.rows_affected())
}

pub async fn tag_lookup<'e>(db: impl SqliteExecutor<'e>) -> Result<TagLookup, sqlx::Error> {
    let rows: Vec<(String, i64)> = sqlx::query_as("SELECT name, id FROM tags")
        .fetch_all(db)
        .await?;
    Ok(rows.into_iter().collect())
}

pub async fn tags_for_entity<'e>(
    db: impl SqliteExecutor<'e>,
    kind: EntityKind,
    entity_id: i64,
) -> Result<Vec<TagRow>, sqlx::Error> {
    let sql = format!(
        "SELECT t.id, t.name, t.color FROM tags t \
         JOIN {link} l ON l.tag_id = t.id \
         WHERE l.{column} = ? ORDER BY t.name",
        link = kind.link_table(),
        column = kind.link_column(),
    );
    sqlx::query_as::<_, TagRow>(&sql)
        .bind(entity_id)
        .fetch_all(db)
        .await
}

pub async fn entity_exists<'e>(
    db: impl SqliteExecutor<'e>,
    kind: EntityKind,
    entity_id: i64,
) -> Result<bool, sqlx::Error> {
    let sql = format!(
        "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?)",
        kind.entity_table()
    );
    let found: i64 = sqlx::query_scalar(&sql)
        .bind(entity_id)
        .fetch_one(db)
        .await?;
    Ok(found != 0)
}

/// Removes every tag link of one entity.
pub async fn clear_entity_links<'e>(
    db: impl SqliteExecutor<'e>,
    kind: EntityKind,
    entity_id: i64,
) -> Result<u64, sqlx::Error> {
    let sql = format!(
        "DELETE FROM {} WHERE {} = ?",
        kind.link_table(),
        kind.link_column()
    );
    let result = sqlx::query(&sql).bind(entity_id).execute(db).await?;
    Ok(result.rows_affected())
}

pub async fn insert_entity_link<'e>(
    db: impl SqliteExecutor<'e>,
    kind: EntityKind,
    entity_id: i64,
    tag_id: i64,
) -> Result<(), sqlx::Error> {
    let sql = format!(
        "INSERT INTO {} ({}, tag_id) VALUES (?, ?)",
        kind.link_table(),
        kind.link_column()
    );
    sqlx::query(&sql)
        .bind(entity_id)
        .bind(tag_id)
        .execute(db)
        .await?;
    Ok(())
}
