//! Shared helpers for the HTTP integration tests.
//!
//! Two ways to build the app:
//! - [`build_fake_app`]: in-memory services, no database needed;
//! - [`build_test_app`]: PostgreSQL services on a `#[sqlx::test]` pool.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method, Request};
use axum::response::Response;
use axum::Router;
use filmoteka_api::auth::jwt::JwtConfig;
use filmoteka_api::config::{LogFormat, ServerConfig};
use filmoteka_api::router::build_app_router;
use filmoteka_api::services::{ActorService, AuthService, FilmService, ServiceError};
use filmoteka_api::state::AppState;
use filmoteka_core::catalog::{FilmSortField, Pagination, SortOrder};
use filmoteka_core::types::DbId;
use filmoteka_db::models::actor::{Actor, ActorWithFilms, CreateActor, UpdateActor};
use filmoteka_db::models::film::{CreateFilm, Film, FilmSearch, FilmWithCast, UpdateFilm};
use filmoteka_db::RepoError;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_SECRET: &str = "integration-test-secret";

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Test `ServerConfig` with local-development defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://unused".to_string(),
        db_max_connections: 5,
        db_acquire_timeout_secs: 1,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        request_timeout_secs: 30,
        log_format: LogFormat::Text,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
            expiry_hours: 24,
        },
    }
}

/// The full router over PostgreSQL-backed services.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    build_app_router(AppState::new(pool, config.clone()), &config)
}

/// The full router over in-memory services. The pool points at a closed
/// port, so only `/ping` ever touches it.
pub fn build_fake_app(catalog: Arc<FakeCatalog>, auth: Arc<FakeAuth>) -> Router {
    let config = test_config();
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(250))
        .connect_lazy("postgres://filmoteka@127.0.0.1:1/unreachable")
        .unwrap();

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        actors: catalog.clone(),
        films: catalog,
        auth,
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Tokens and requests
// ---------------------------------------------------------------------------

pub fn admin_token() -> String {
    test_config().jwt.issue_now(true).unwrap()
}

pub fn user_token() -> String {
    test_config().jwt.issue_now(false).unwrap()
}

pub fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    request(Method::GET, uri, token, None)
}

pub fn delete(uri: &str, token: Option<&str>) -> Request<Body> {
    request(Method::DELETE, uri, token, None)
}

pub fn post_json(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    request(Method::POST, uri, token, Some(body))
}

pub fn put_json(uri: &str, token: Option<&str>, body: &str) -> Request<Body> {
    request(Method::PUT, uri, token, Some(body))
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

// ---------------------------------------------------------------------------
// In-memory catalog
// ---------------------------------------------------------------------------

/// Actor and film services over plain vectors. `calls` counts every service
/// invocation so tests can assert that rejected requests never reached it.
#[derive(Default)]
pub struct FakeCatalog {
    pub calls: AtomicUsize,
    next_id: AtomicI64,
    pub actors: Mutex<Vec<ActorWithFilms>>,
    pub films: Mutex<Vec<FilmWithCast>>,
    pub last_film_update: Mutex<Option<UpdateFilm>>,
    pub last_list: Mutex<Option<(FilmSortField, SortOrder, Pagination)>>,
    pub last_search: Mutex<Option<(FilmSearch, Pagination)>>,
}

impl FakeCatalog {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) -> DbId {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

#[async_trait]
impl ActorService for FakeCatalog {
    async fn create(&self, input: CreateActor) -> Result<DbId, ServiceError> {
        let id = self.touch();
        self.actors.lock().unwrap().push(ActorWithFilms {
            actor: Actor {
                id,
                name: input.name,
                gender: input.gender,
                birthday: input.birthday,
            },
            films: vec![],
        });
        Ok(id)
    }

    async fn update(&self, id: DbId, _input: UpdateActor) -> Result<(), ServiceError> {
        self.touch();
        let actors = self.actors.lock().unwrap();
        if actors.iter().any(|a| a.actor.id == id) {
            Ok(())
        } else {
            Err(RepoError::NotFound.into())
        }
    }

    async fn delete(&self, id: DbId) -> Result<(), ServiceError> {
        self.touch();
        let mut actors = self.actors.lock().unwrap();
        let before = actors.len();
        actors.retain(|a| a.actor.id != id);
        if actors.len() < before {
            Ok(())
        } else {
            Err(RepoError::NotFound.into())
        }
    }

    async fn list(&self, _pagination: Pagination) -> Result<Vec<ActorWithFilms>, ServiceError> {
        self.touch();
        Ok(self.actors.lock().unwrap().clone())
    }
}

#[async_trait]
impl FilmService for FakeCatalog {
    async fn create(&self, input: CreateFilm) -> Result<DbId, ServiceError> {
        let id = self.touch();
        let actors = self.actors.lock().unwrap();
        let mut cast = Vec::new();
        for actor_id in &input.actor_ids {
            match actors.iter().find(|a| a.actor.id == *actor_id) {
                Some(a) => cast.push(a.actor.clone()),
                None => return Err(RepoError::ActorDoesNotExist.into()),
            }
        }
        self.films.lock().unwrap().push(FilmWithCast {
            film: Film {
                id,
                title: input.title,
                description: input.description,
                release_date: input.release_date,
                rating: input.rating,
            },
            actors: cast,
        });
        Ok(id)
    }

    async fn update(&self, id: DbId, input: UpdateFilm) -> Result<(), ServiceError> {
        self.touch();
        *self.last_film_update.lock().unwrap() = Some(input);
        let films = self.films.lock().unwrap();
        if films.iter().any(|f| f.film.id == id) {
            Ok(())
        } else {
            Err(RepoError::NotFound.into())
        }
    }

    async fn delete(&self, id: DbId) -> Result<(), ServiceError> {
        self.touch();
        let mut films = self.films.lock().unwrap();
        let before = films.len();
        films.retain(|f| f.film.id != id);
        if films.len() < before {
            Ok(())
        } else {
            Err(RepoError::NotFound.into())
        }
    }

    async fn list(
        &self,
        field: FilmSortField,
        order: SortOrder,
        pagination: Pagination,
    ) -> Result<Vec<FilmWithCast>, ServiceError> {
        self.touch();
        *self.last_list.lock().unwrap() = Some((field, order, pagination));
        Ok(self.films.lock().unwrap().clone())
    }

    async fn search(
        &self,
        criteria: FilmSearch,
        pagination: Pagination,
    ) -> Result<Vec<FilmWithCast>, ServiceError> {
        self.touch();
        *self.last_search.lock().unwrap() = Some((criteria, pagination));
        Ok(vec![])
    }
}

// ---------------------------------------------------------------------------
// In-memory credentials
// ---------------------------------------------------------------------------

/// Login -> (password, is_admin). Passwords are kept in clear; hashing is
/// covered by the PostgreSQL-backed tests.
#[derive(Default)]
pub struct FakeAuth {
    users: Mutex<HashMap<String, (String, bool)>>,
}

impl FakeAuth {
    pub fn with_admin(login: &str, password: &str) -> Self {
        let auth = Self::default();
        auth.users
            .lock()
            .unwrap()
            .insert(login.to_string(), (password.to_string(), true));
        auth
    }
}

#[async_trait]
impl AuthService for FakeAuth {
    async fn register(&self, login: &str, password: &str) -> Result<(), ServiceError> {
        let mut users = self.users.lock().unwrap();
        if users.contains_key(login) {
            return Err(RepoError::AlreadyExists.into());
        }
        users.insert(login.to_string(), (password.to_string(), false));
        Ok(())
    }

    async fn check_credentials(&self, login: &str, password: &str) -> Result<(), ServiceError> {
        match self.users.lock().unwrap().get(login) {
            None => Err(RepoError::UserNotFound.into()),
            Some((stored, _)) if stored == password => Ok(()),
            Some(_) => Err(ServiceError::WrongPassword),
        }
    }

    async fn is_admin(&self, login: &str) -> Result<bool, ServiceError> {
        self.users
            .lock()
            .unwrap()
            .get(login)
            .map(|(_, is_admin)| *is_admin)
            .ok_or_else(|| RepoError::UserNotFound.into())
    }
}
