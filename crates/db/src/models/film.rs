//! Film entity model and DTOs.

use filmoteka_core::types::{Date, DbId};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::actor::Actor;

/// A row from the `films` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Film {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub release_date: Date,
    pub rating: f32,
}

/// A film with its resolved cast, ordered by actor id ascending.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilmWithCast {
    #[serde(flatten)]
    pub film: Film,
    pub actors: Vec<Actor>,
}

/// DTO for creating a new film. `actor_ids` may be empty.
#[derive(Debug, Clone)]
pub struct CreateFilm {
    pub title: String,
    pub description: String,
    pub release_date: Date,
    pub rating: f32,
    pub actor_ids: Vec<DbId>,
}

/// DTO for a partial film update.
///
/// `actor_ids: None` keeps the current cast; `Some(vec![])` clears it.
#[derive(Debug, Clone, Default)]
pub struct UpdateFilm {
    pub title: Option<String>,
    pub description: Option<String>,
    pub release_date: Option<Date>,
    pub rating: Option<f32>,
    pub actor_ids: Option<Vec<DbId>>,
}

impl UpdateFilm {
    /// `true` when no field would change.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.release_date.is_none()
            && self.rating.is_none()
            && self.actor_ids.is_none()
    }
}

/// Fragment search criteria. At least one fragment must be non-empty.
#[derive(Debug, Clone, Default)]
pub struct FilmSearch {
    /// Case-insensitive substring of the film title.
    pub title: Option<String>,
    /// Case-insensitive substring of any cast member's name.
    pub actor_name: Option<String>,
}

impl FilmSearch {
    /// Build from raw fragments, treating empty strings as absent.
    pub fn new(title: Option<String>, actor_name: Option<String>) -> Self {
        Self {
            title: title.filter(|t| !t.is_empty()),
            actor_name: actor_name.filter(|n| !n.is_empty()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.actor_name.is_none()
    }
}
