//! Catalog vocabulary: dates, gender, sort keys and pagination.
//!
//! Query-string parsing lives here (not in the API crate) so the rules are
//! testable without an HTTP stack and shared by every caller.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::Date;

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Wire format for birthdays and release dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(field: &str, value: &str) -> Result<Date, CoreError> {
    Date::parse_from_str(value, DATE_FORMAT)
        .map_err(|_| CoreError::Validation(format!("{field} must be a date in YYYY-MM-DD format")))
}

// ---------------------------------------------------------------------------
// Gender
// ---------------------------------------------------------------------------

/// Actor gender. Stored as a boolean column: male = `false`, female = `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn from_db(is_female: bool) -> Self {
        if is_female {
            Gender::Female
        } else {
            Gender::Male
        }
    }

    pub fn to_db(self) -> bool {
        matches!(self, Gender::Female)
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(CoreError::Validation("unknown gender used".into())),
        }
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// Columns a film listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FilmSortField {
    Title,
    #[default]
    Rating,
    ReleaseDate,
}

impl FilmSortField {
    /// The SQL column for this sort key. Only these literals ever reach an
    /// `ORDER BY` clause.
    pub fn column(self) -> &'static str {
        match self {
            FilmSortField::Title => "title",
            FilmSortField::Rating => "rating",
            FilmSortField::ReleaseDate => "release_date",
        }
    }
}

impl FromStr for FilmSortField {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "title" => Ok(FilmSortField::Title),
            "rating" => Ok(FilmSortField::Rating),
            "release_date" => Ok(FilmSortField::ReleaseDate),
            _ => Err(CoreError::Validation(
                "unknown field for sorting used".into(),
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn keyword(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

impl FromStr for SortOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            _ => Err(CoreError::Validation("unknown sorting order used".into())),
        }
    }
}

// ---------------------------------------------------------------------------
// Pagination
// ---------------------------------------------------------------------------

/// Largest accepted `limit`.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Default `limit` for `/actors` and `/films`.
pub const DEFAULT_LIST_LIMIT: i64 = 10;

/// Default `limit` for `/films/search`.
pub const DEFAULT_SEARCH_LIMIT: i64 = 1;

/// A validated page request: `page >= 1`, `1 <= limit <= 100`, and the row
/// offset fits in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: i64,
    limit: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64) -> Result<Self, CoreError> {
        if page < 1 {
            return Err(CoreError::Validation(
                "page parameter is too small, 1 or higher required".into(),
            ));
        }
        if !(1..=MAX_PAGE_LIMIT).contains(&limit) {
            return Err(CoreError::Validation(format!(
                "limit parameter is not in range [1, {MAX_PAGE_LIMIT}]"
            )));
        }
        if (page - 1).checked_mul(limit).is_none() {
            return Err(CoreError::Validation("page parameter is too large".into()));
        }
        Ok(Self { page, limit })
    }

    /// Build from raw query-string values. Missing values take the defaults
    /// (`page = 1`, `limit = default_limit`).
    pub fn from_query(
        page: Option<&str>,
        limit: Option<&str>,
        default_limit: i64,
    ) -> Result<Self, CoreError> {
        let page = match page {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| CoreError::Validation("page parameter is not a number".into()))?,
            None => 1,
        };
        let limit = match limit {
            Some(raw) => raw
                .parse::<i64>()
                .map_err(|_| CoreError::Validation("limit parameter is not a number".into()))?,
            None => default_limit,
        };
        Self::new(page, limit)
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn limit(&self) -> i64 {
        self.limit
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.limit
    }
}

impl fmt::Display for Pagination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "page {} (limit {})", self.page, self.limit)
    }
}

/// Escape `%`, `_` and `\` so a user fragment matches literally inside an
/// `ILIKE '%' || $n || '%'` pattern.
pub fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
