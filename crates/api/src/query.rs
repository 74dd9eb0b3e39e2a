//! Query-string parameter types.
//!
//! Values are kept as raw strings so the parse rules (and their messages)
//! live in `filmoteka_core::catalog`.

use filmoteka_core::catalog::{FilmSortField, Pagination, SortOrder};
use filmoteka_core::error::CoreError;
use serde::Deserialize;

/// `?page=&limit=`
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<String>,
    pub limit: Option<String>,
}

impl PageParams {
    pub fn pagination(&self, default_limit: i64) -> Result<Pagination, CoreError> {
        Pagination::from_query(self.page.as_deref(), self.limit.as_deref(), default_limit)
    }
}

/// `GET /films?field=&order=&page=&limit=`
#[derive(Debug, Default, Deserialize)]
pub struct FilmListParams {
    pub field: Option<String>,
    pub order: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}

impl FilmListParams {
    pub fn sort(&self) -> Result<(FilmSortField, SortOrder), CoreError> {
        let field = self
            .field
            .as_deref()
            .map(str::parse)
            .transpose()?
            .unwrap_or_default();
        let order = self
            .order
            .as_deref()
            .map(str::parse)
            .transpose()?
            .unwrap_or_default();
        Ok((field, order))
    }
}

/// `GET /films/search?title=&name=&page=&limit=`
#[derive(Debug, Default, Deserialize)]
pub struct FilmSearchParams {
    /// Title fragment.
    pub title: Option<String>,
    /// Actor name fragment.
    pub name: Option<String>,
    #[serde(flatten)]
    pub page: PageParams,
}
