//! Client-side document filtering
//!
//! Filters run over the list a dashboard already holds; nothing here talks
//! to the server.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use shared::models::Document;

use crate::{ClientError, ClientResult};

/// Dashboard filter state.
///
/// Dates are calendar days interpreted at 00:00 UTC. A range (either bound
/// set) takes precedence over the single `date`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentFilter {
    /// Case-insensitive substring of the uploader's name
    pub user: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub date: Option<NaiveDate>,
}

impl DocumentFilter {
    /// Parse a `YYYY-MM-DD` form value; blank means unset.
    pub fn parse_date(raw: &str) -> ClientResult<Option<NaiveDate>> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ClientError::Validation(format!("Invalid date: {raw}")))
    }

    pub fn is_active(&self) -> bool {
        !self.user.is_empty()
            || self.start_date.is_some()
            || self.end_date.is_some()
            || self.date.is_some()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn matches(&self, doc: &Document) -> bool {
        if !self.user.is_empty()
            && !doc
                .uploaded_by_name
                .to_lowercase()
                .contains(&self.user.to_lowercase())
        {
            return false;
        }

        if self.start_date.is_some() || self.end_date.is_some() {
            let start = self.start_date.map(midnight_utc);
            // The end day is included in full.
            let end = self.end_date.map(|d| midnight_utc(d) + Duration::days(1));
            start.is_none_or(|s| doc.upload_date >= s) && end.is_none_or(|e| doc.upload_date <= e)
        } else if let Some(date) = self.date {
            doc.upload_date.date_naive() == date
        } else {
            true
        }
    }

    /// Matching documents, newest upload first.
    ///
    /// The sort is stable, so documents sharing a timestamp keep the order
    /// the server returned them in.
    pub fn apply(&self, documents: &[Document]) -> Vec<Document> {
        let mut filtered: Vec<Document> = documents
            .iter()
            .filter(|doc| self.matches(doc))
            .cloned()
            .collect();
        filtered.sort_by(|a, b| b.upload_date.cmp(&a.upload_date));
        filtered
    }
}

fn midnight_utc(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
