//! HTTP transport integration tests.
//!
//! Starts an axum server and exercises it with reqwest.

use std::sync::Arc;

use peliculas_api::{http, Catalog, InMemoryDocumentStore, SequentialIds};
use serde_json::{json, Value};

/// Bind to port 0 and return the base URL.
async fn start_server() -> String {
    let catalog = Arc::new(Catalog::new(
        InMemoryDocumentStore::new(),
        SequentialIds::new(),
    ));
    let app = http::router(catalog);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn banner_and_health() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client.get(format!("{base}/")).send().await.unwrap();
    assert_eq!(resp.status(), 200);
    assert_eq!(resp.text().await.unwrap(), http::BANNER);

    let resp = client.get(format!("{base}/health")).send().await.unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body, json!({ "ok": true }));
}

#[tokio::test]
async fn create_then_get_movie() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/peliculas"))
        .json(&json!({ "name": "John Wick", "releaseYear": 2014 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    assert_eq!(
        created,
        json!({ "id": "p_1", "name": "John Wick", "releaseYear": 2014, "actorIds": [] })
    );

    let resp = client
        .get(format!("{base}/peliculas/p_1"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let fetched: Value = resp.json().await.unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn missing_movie_returns_404_with_error() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/peliculas/does-not-exist"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn empty_body_returns_400_with_error() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/peliculas"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());

    let resp = client
        .post(format!("{base}/actores"))
        .header("content-type", "application/json")
        .body("{ not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn list_filters_by_query_string() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    for (name, year) in [("John Wick", 2014), ("Matrix", 1999)] {
        client
            .post(format!("{base}/peliculas"))
            .json(&json!({ "name": name, "releaseYear": year }))
            .send()
            .await
            .unwrap();
    }

    let body: Value = client
        .get(format!("{base}/peliculas?nombre=wick"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<_> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["John Wick"]);

    let body: Value = client
        .get(format!("{base}/peliculas?nombre=&anioPublicacion=1999"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "Matrix");
}

#[tokio::test]
async fn repeated_query_key_uses_first_value() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    for (name, year) in [("John Wick", 2014), ("Matrix", 1999)] {
        client
            .post(format!("{base}/peliculas"))
            .json(&json!({ "name": name, "releaseYear": year }))
            .send()
            .await
            .unwrap();
    }

    let resp = client
        .get(format!("{base}/peliculas?nombre=wick&nombre=matrix"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["name"], "John Wick");
}

#[tokio::test]
async fn patch_validates_year() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{base}/peliculas"))
        .json(&json!({ "name": "Matrix", "releaseYear": 1999 }))
        .send()
        .await
        .unwrap();

    let resp = client
        .patch(format!("{base}/peliculas/p_1"))
        .json(&json!({ "releaseYear": "1999" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    let resp = client
        .patch(format!("{base}/peliculas/p_1"))
        .json(&json!({ "name": "The Matrix" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "The Matrix");
    assert_eq!(body["releaseYear"], 1999);

    let resp = client
        .patch(format!("{base}/peliculas/p_404"))
        .json(&json!({ "name": "Nope" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}

#[tokio::test]
async fn actor_lifecycle_cascades_over_http() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/actores"))
        .json(&json!({ "name": "Keanu Reeves", "birthYear": 1964 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let actor: Value = resp.json().await.unwrap();
    let actor_id = actor["id"].as_str().unwrap().to_string();
    assert_eq!(actor_id, "a_1");

    let movie: Value = client
        .post(format!("{base}/peliculas"))
        .json(&json!({ "name": "John Wick", "releaseYear": 2014, "actorIds": [] }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let movie_id = movie["id"].as_str().unwrap().to_string();

    let resp = client
        .post(format!("{base}/peliculas/{movie_id}/actores"))
        .json(&json!({}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    for _ in 0..2 {
        let resp = client
            .post(format!("{base}/peliculas/{movie_id}/actores"))
            .json(&json!({ "actorId": actor_id }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status(), 200);
        let body: Value = resp.json().await.unwrap();
        assert_eq!(body["actorIds"], json!([actor_id]));
    }

    let resp = client
        .delete(format!("{base}/peliculas/{movie_id}/actores/a_other"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = client
        .delete(format!("{base}/actores/{actor_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let deleted: Value = resp.json().await.unwrap();
    assert_eq!(deleted, actor);

    let body: Value = client
        .get(format!("{base}/peliculas/{movie_id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["actorIds"], json!([]));

    let resp = client
        .get(format!("{base}/actores/{actor_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let resp = client
        .delete(format!("{base}/peliculas/{movie_id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = client
        .get(format!("{base}/actores"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn get_and_patch_actor() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/actores"))
        .json(&json!({ "name": "Keanu Reeves", "birthYear": 1964 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 201);
    let created: Value = resp.json().await.unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let resp = client
        .get(format!("{base}/actores/{id}"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let fetched: Value = resp.json().await.unwrap();
    assert_eq!(fetched, created);

    let resp = client
        .patch(format!("{base}/actores/{id}"))
        .json(&json!({ "birthYear": 1965 }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let patched: Value = resp.json().await.unwrap();
    assert_eq!(patched["name"], "Keanu Reeves");
    assert_eq!(patched["birthYear"], 1965);

    let fetched: Value = client
        .get(format!("{base}/actores/{id}"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(fetched, patched);

    let resp = client
        .patch(format!("{base}/actores/{id}"))
        .json(&json!({ "name": "" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn any_origin_is_allowed() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .get(format!("{base}/actores"))
        .header("origin", "http://example.test")
        .send()
        .await
        .unwrap();
    assert_eq!(
        resp.headers()["access-control-allow-origin"],
        "*"
    );

    let resp = client
        .request(reqwest::Method::OPTIONS, format!("{base}/peliculas"))
        .header("origin", "http://example.test")
        .header("access-control-request-method", "POST")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 204);
    assert_eq!(
        resp.headers()["access-control-allow-origin"],
        "*"
    );
}
