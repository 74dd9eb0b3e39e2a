//! End-to-end flows over PostgreSQL.

mod common;

use axum::http::header::SET_COOKIE;
use axum::http::StatusCode;
use axum::Router;
use common::*;
use serde_json::{json, Value};
use sqlx::PgPool;

/// Register `login`, grant admin out of band, log in again and return the
/// admin token.
async fn admin_session(app: &Router, pool: &PgPool, login: &str) -> String {
    let credentials = json!({ "login": login, "password": "s3cret" }).to_string();

    let response = send(app, post_json("/register", None, &credentials)).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    sqlx::query("UPDATE auth SET is_admin = true WHERE login = $1")
        .bind(login)
        .execute(pool)
        .await
        .unwrap();

    let response = send(app, post_json("/login", None, &credentials)).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["token"].as_str().unwrap().to_string()
}

async fn create(app: &Router, token: &str, uri: &str, body: Value) -> i64 {
    let response = send(app, post_json(uri, Some(token), &body.to_string())).await;
    assert_eq!(response.status(), StatusCode::CREATED, "POST {uri} {body}");
    body_json(response).await["id"].as_i64().unwrap()
}

fn actor(name: &str, birthday: &str) -> Value {
    json!({ "name": name, "gender": "male", "birthday": birthday })
}

#[sqlx::test(migrations = "../db/migrations")]
async fn ping_reports_database_up(pool: PgPool) {
    let app = build_test_app(pool);
    let response = send(&app, get("/ping", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn register_issues_a_non_admin_session(pool: PgPool) {
    let app = build_test_app(pool);
    let body = json!({ "login": "viewer", "password": "pw" }).to_string();

    let response = send(&app, post_json("/register", None, &body)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.headers().contains_key(SET_COOKIE));
    let token = body_json(response).await["token"].as_str().unwrap().to_string();

    let response = send(&app, get("/films", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let body = actor("A", "1990-01-01").to_string();
    let response = send(&app, post_json("/actor", Some(&token), &body)).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = send(&app, post_json("/register", None, &body)).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn catalog_round_trip(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = admin_session(&app, &pool, "admin").await;

    let keanu = create(&app, &token, "/actor", actor("Keanu Reeves", "1964-09-02")).await;
    let carrie = create(
        &app,
        &token,
        "/actor",
        json!({ "name": "Carrie-Anne Moss", "gender": "female", "birthday": "1967-08-21" }),
    )
    .await;

    let matrix = create(
        &app,
        &token,
        "/film",
        json!({
            "title": "The Matrix",
            "description": "A hacker learns the truth about his reality",
            "releaseDate": "1999-03-31",
            "rating": 8.7,
            "actorIDs": [keanu, carrie],
        }),
    )
    .await;
    create(
        &app,
        &token,
        "/film",
        json!({
            "title": "John Wick",
            "description": "A retired hitman returns",
            "releaseDate": "2014-10-24",
            "rating": 7.4,
            "actorIDs": [keanu],
        }),
    )
    .await;

    // Default order: rating descending.
    let response = send(&app, get("/films", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let films = body_json(response).await;
    assert_eq!(films[0]["id"], matrix);
    assert_eq!(films[0]["releaseDate"], "1999-03-31");
    assert_eq!(films[0]["actors"].as_array().unwrap().len(), 2);
    assert_eq!(films[1]["title"], "John Wick");

    let response = send(&app, get("/films?field=title&order=desc&limit=1", Some(&token))).await;
    let films = body_json(response).await;
    assert_eq!(films.as_array().unwrap().len(), 1);
    assert_eq!(films[0]["title"], "The Matrix");

    // Search defaults to a single result.
    let response = send(&app, get("/films/search?name=keanu", Some(&token))).await;
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);

    let response = send(&app, get("/films/search?title=wick&limit=10", Some(&token))).await;
    let found = body_json(response).await;
    assert_eq!(found[0]["title"], "John Wick");

    let response = send(&app, get("/films/search?title=nothing-like-this", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, get("/actors", Some(&token))).await;
    let actors = body_json(response).await;
    assert_eq!(actors[0]["id"], keanu);
    assert_eq!(actors[0]["gender"], "male");
    assert_eq!(actors[0]["films"].as_array().unwrap().len(), 2);
    assert_eq!(actors[1]["films"].as_array().unwrap().len(), 1);

    // Drop Carrie-Anne from the cast.
    let body = json!({ "actorIDs": [keanu] }).to_string();
    let response = send(&app, put_json(&format!("/film/{matrix}"), Some(&token), &body)).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = send(&app, get("/actors", Some(&token))).await;
    let actors = body_json(response).await;
    assert_eq!(actors[1]["films"].as_array().unwrap().len(), 0);

    // Deleting twice: the second call finds nothing.
    let uri = format!("/actor/{carrie}");
    assert_eq!(send(&app, delete(&uri, Some(&token))).await.status(), StatusCode::NO_CONTENT);
    assert_eq!(send(&app, delete(&uri, Some(&token))).await.status(), StatusCode::NOT_FOUND);

    let uri = format!("/film/{matrix}");
    assert_eq!(send(&app, delete(&uri, Some(&token))).await.status(), StatusCode::NO_CONTENT);
    let response = send(&app, delete(&uri, Some(&token))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn cast_violations(pool: PgPool) {
    let app = build_test_app(pool.clone());
    let token = admin_session(&app, &pool, "admin").await;
    let young = create(&app, &token, "/actor", actor("Young", "2005-06-01")).await;

    let response = send(
        &app,
        post_json(
            "/film",
            Some(&token),
            &json!({
                "title": "Ghost cast",
                "description": "Nobody here",
                "releaseDate": "2010-01-01",
                "rating": 5,
                "actorIDs": [young + 1000],
            })
            .to_string(),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "ACTOR_NOT_FOUND");

    let response = send(
        &app,
        post_json(
            "/film",
            Some(&token),
            &json!({
                "title": "Too early",
                "description": "Released before the actor was born",
                "releaseDate": "2000-01-01",
                "rating": 5,
                "actorIDs": [young],
            })
            .to_string(),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "ACTOR_NOT_BORN_BEFORE_RELEASE");

    // Neither failed create left a film behind.
    let response = send(&app, get("/films", Some(&token))).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let film = create(
        &app,
        &token,
        "/film",
        json!({
            "title": "Later",
            "description": "Fine",
            "releaseDate": "2020-01-01",
            "rating": 6,
            "actorIDs": [young],
        }),
    )
    .await;

    // Moving the birthday past the release date is refused too.
    let body = json!({ "birthday": "2021-01-01" }).to_string();
    let response = send(&app, put_json(&format!("/actor/{young}"), Some(&token), &body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json!({ "releaseDate": "2004-12-31" }).to_string();
    let response = send(&app, put_json(&format!("/film/{film}"), Some(&token), &body)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(&app, put_json("/film/999999", Some(&token), &body)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn login_failures_do_not_reveal_which_part_was_wrong(pool: PgPool) {
    let app = build_test_app(pool.clone());
    admin_session(&app, &pool, "admin").await;

    let wrong_password = json!({ "login": "admin", "password": "nope" }).to_string();
    let unknown_login = json!({ "login": "ghost", "password": "s3cret" }).to_string();

    let a = send(&app, post_json("/login", None, &wrong_password)).await;
    let b = send(&app, post_json("/login", None, &unknown_login)).await;
    assert_eq!(a.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(b.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(a).await, body_json(b).await);
}
