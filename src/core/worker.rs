//! Worker and post models.

use crate::db::schema::{PostRow, WorkerRow, WorkerSummaryRow};
use crate::error::{Error, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// Storage and CLI format for dates of birth.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` date of birth.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Format a date of birth the way it is stored.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// A job title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub post_id: i64,
    pub post_title: String,
}

impl Post {
    /// Convert a PostRow to a Post.
    pub fn from_row(row: PostRow) -> Self {
        Self {
            post_id: row.post_id,
            post_title: row.post_title,
        }
    }
}

/// Input to the worker writer: the post is given by title, not id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorker {
    pub surname: String,
    pub name: String,
    pub post: String,
    pub phone: String,
    pub date: NaiveDate,
}

/// A stored worker record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Worker {
    pub id: i64,
    pub surname: String,
    pub name: String,
    pub phone: String,
    pub post_id: i64,
    pub date: NaiveDate,
}

impl Worker {
    /// Convert a WorkerRow to a Worker.
    pub fn from_row(row: WorkerRow) -> Result<Self> {
        Ok(Self {
            id: row.id,
            surname: row.surname,
            name: row.name,
            phone: row.phone,
            post_id: row.post_id,
            date: parse_date(&row.date)?,
        })
    }
}

/// The fields shown in the worker listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorkerSummary {
    pub surname: String,
    pub name: String,
    pub phone: String,
    pub date: NaiveDate,
}

impl WorkerSummary {
    /// Convert a WorkerSummaryRow to a WorkerSummary.
    pub fn from_row(row: WorkerSummaryRow) -> Result<Self> {
        Ok(Self {
            surname: row.surname,
            name: row.name,
            phone: row.phone,
            date: parse_date(&row.date)?,
        })
    }
}
