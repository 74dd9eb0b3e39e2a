//! Application services.
//!
//! One capability trait per entity kind, each with a PostgreSQL-backed
//! implementation. Handlers only see the traits (through [`AppState`]), so
//! the HTTP layer can be exercised against in-memory implementations.
//!
//! [`AppState`]: crate::state::AppState

pub mod actor;
pub mod auth;
pub mod error;
pub mod film;

pub use actor::{ActorService, PgActorService};
pub use auth::{AuthService, PgAuthService};
pub use error::ServiceError;
pub use film::{FilmService, PgFilmService};
