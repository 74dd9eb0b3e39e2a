//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument. Mutations run inside a single
//! transaction; listings share one pooled connection across their
//! dependent lookups.

pub mod actor_repo;
pub mod credential_repo;
pub mod film_repo;

pub use actor_repo::ActorRepo;
pub use credential_repo::CredentialRepo;
pub use film_repo::FilmRepo;
