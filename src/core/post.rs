//! Post lookup and get-or-create on SQLite.

use crate::core::Post;
use crate::db::schema::PostRow;
use crate::error::Result;
use rusqlite::{Connection, OptionalExtension};

/// Find the first post whose title equals `title` exactly.
pub fn find_post(conn: &Connection, title: &str) -> Result<Option<Post>> {
    let row = conn
        .query_row(
            "SELECT post_id, post_title FROM posts WHERE post_title = ? LIMIT 1",
            [title],
            PostRow::from_row,
        )
        .optional()?;
    Ok(row.map(Post::from_row))
}

/// Return the id of the post titled `title`, inserting it if missing.
///
/// Must run inside a write transaction so the lookup and the insert are
/// not interleaved with another writer.
pub fn resolve(conn: &Connection, title: &str) -> Result<i64> {
    if let Some(post) = find_post(conn, title)? {
        tracing::debug!(post_id = post.post_id, title, "post found");
        return Ok(post.post_id);
    }

    conn.execute("INSERT INTO posts (post_title) VALUES (?)", [title])?;
    let post_id = conn.last_insert_rowid();
    tracing::info!(post_id, title, "created post");
    Ok(post_id)
}
