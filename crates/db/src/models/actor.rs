//! Actor entity model and DTOs.

use filmoteka_core::catalog::Gender;
use filmoteka_core::types::{Date, DbId};
use serde::Serialize;
use sqlx::FromRow;

use crate::models::film::Film;

/// A row from the `actors` table. `gender` is the raw storage flag.
#[derive(Debug, Clone, FromRow)]
pub struct ActorRow {
    pub id: DbId,
    pub name: String,
    pub gender: bool,
    pub birthday: Date,
}

/// An actor as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Actor {
    pub id: DbId,
    pub name: String,
    pub gender: Gender,
    pub birthday: Date,
}

impl From<ActorRow> for Actor {
    fn from(row: ActorRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            gender: Gender::from_db(row.gender),
            birthday: row.birthday,
        }
    }
}

/// An actor together with every film they appear in (ordered by film id).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorWithFilms {
    #[serde(flatten)]
    pub actor: Actor,
    pub films: Vec<Film>,
}

/// DTO for creating a new actor.
#[derive(Debug, Clone)]
pub struct CreateActor {
    pub name: String,
    pub gender: Gender,
    pub birthday: Date,
}

/// DTO for a partial actor update. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateActor {
    pub name: Option<String>,
    pub gender: Option<Gender>,
    pub birthday: Option<Date>,
}

impl UpdateActor {
    /// `true` when no field would change.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.gender.is_none() && self.birthday.is_none()
    }
}
