//! HTTP transport for the catalog.
//!
//! Requires the `http` feature. Uses axum for routing; catalog calls run on
//! the blocking pool since every operation does whole-file I/O.
//!
//! ## Routes
//!
//! | Method & Path                            | Success            |
//! |------------------------------------------|--------------------|
//! | `GET /peliculas?nombre=&anioPublicacion=`| 200, `[Movie]`     |
//! | `GET /peliculas/:id`                     | 200, `Movie`       |
//! | `POST /peliculas`                        | 201, `Movie`       |
//! | `PATCH /peliculas/:id`                   | 200, `Movie`       |
//! | `POST /peliculas/:id/actores`            | 200, `Movie`       |
//! | `DELETE /peliculas/:id/actores/:actorId` | 200, `Movie`       |
//! | `DELETE /peliculas/:id`                  | 200, deleted movie |
//! | `GET /actores`                           | 200, `[Actor]`     |
//! | `GET /actores/:id`                       | 200, `Actor`       |
//! | `POST /actores`                          | 201, `Actor`       |
//! | `PATCH /actores/:id`                     | 200, `Actor`       |
//! | `DELETE /actores/:id`                    | 200, deleted actor |
//!
//! Errors are `{ "error": "..." }` with status 400, 404 or 500. Every
//! response allows any origin.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use peliculas_api::{http, Catalog, InMemoryDocumentStore};
//!
//! let catalog = Arc::new(Catalog::with_random_ids(InMemoryDocumentStore::new()));
//! http::serve(catalog, "127.0.0.1:3000").await?;
//! ```

use std::sync::Arc;
use std::time::Instant;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::{error, info, Instrument};

use crate::catalog::{
    actor_id_from_json, ActorPatch, Catalog, MoviePatch, MovieQuery, NewActor, NewMovie,
};
use crate::error::CatalogError;
use crate::id::IdProvider;
use crate::model::{Actor, Movie};
use crate::store::DocumentStore;

type Shared<S, I> = Arc<Catalog<S, I>>;

/// Text served at `GET /`.
pub const BANNER: &str = "API de Películas funcionando";

/// Error surfaced by an HTTP handler.
#[derive(Debug)]
pub enum ApiError {
    Catalog(CatalogError),
    /// The blocking task running the operation panicked or was cancelled.
    Task(tokio::task::JoinError),
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        ApiError::Catalog(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::Catalog(CatalogError::InvalidInput(rejection.body_text()))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::Catalog(CatalogError::InvalidInput(rejection.body_text()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Catalog(e) => {
                let status = StatusCode::from_u16(e.status_code())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
                if status.is_server_error() {
                    error!(error = %e, "catalog operation failed");
                }
                (status, e.to_string())
            }
            ApiError::Task(e) => {
                error!(error = %e, "catalog task failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Build an axum `Router` serving the catalog.
pub fn router<S, I>(catalog: Shared<S, I>) -> Router
where
    S: DocumentStore + 'static,
    I: IdProvider + 'static,
{
    Router::<Shared<S, I>>::new()
        .route("/", get(banner_handler))
        .route("/health", get(health_handler))
        .route("/peliculas", get(list_movies).post(create_movie))
        .route(
            "/peliculas/:id",
            get(get_movie).patch(update_movie).delete(delete_movie),
        )
        .route("/peliculas/:id/actores", post(add_actor))
        .route("/peliculas/:id/actores/:actor_id", delete(remove_actor))
        .route("/actores", get(list_actors).post(create_actor))
        .route(
            "/actores/:id",
            get(get_actor).patch(update_actor).delete(delete_actor),
        )
        .layer(middleware::from_fn(request_tracing))
        .layer(middleware::from_fn(cors))
        .with_state(catalog)
}

/// Serve the catalog over HTTP at the given address (e.g. `"127.0.0.1:3000"`).
pub async fn serve<S, I>(catalog: Shared<S, I>, addr: &str) -> Result<(), std::io::Error>
where
    S: DocumentStore + 'static,
    I: IdProvider + 'static,
{
    let app = router(catalog);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "catalog API listening");
    axum::serve(listener, app).await
}

/// Run a catalog operation on the blocking pool.
async fn blocking<S, I, T, F>(catalog: Shared<S, I>, op: F) -> Result<T, ApiError>
where
    S: DocumentStore + 'static,
    I: IdProvider + 'static,
    T: Send + 'static,
    F: FnOnce(&Catalog<S, I>) -> Result<T, CatalogError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || op(catalog.as_ref()))
        .await
        .map_err(ApiError::Task)?
        .map_err(ApiError::from)
}

async fn banner_handler() -> &'static str {
    BANNER
}

async fn health_handler() -> Json<Value> {
    Json(json!({ "ok": true }))
}

async fn list_movies<S, I>(
    State(catalog): State<Shared<S, I>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Json<Vec<Movie>>, ApiError>
where
    S: DocumentStore + 'static,
    I: IdProvider + 'static,
{
    let Query(pairs) = query?;
    let query = MovieQuery::from_pairs(pairs);
    let movies = blocking(catalog, move |c| c.list_movies(&query)).await?;
    Ok(Json(movies))
}

async fn get_movie<S, I>(
    State(catalog): State<Shared<S, I>>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError>
where
    S: DocumentStore + 'static,
    I: IdProvider + 'static,
{
    let movie = blocking(catalog, move |c| c.get_movie(&id)).await?;
    Ok(Json(movie))
}

async fn create_movie<S, I>(
    State(catalog): State<Shared<S, I>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Movie>), ApiError>
where
    S: DocumentStore + 'static,
    I: IdProvider + 'static,
{
    let Json(body) = body?;
    let input = NewMovie::from_json(&body)?;
    let movie = blocking(catalog, move |c| c.create_movie(input)).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

async fn update_movie<S, I>(
    State(catalog): State<Shared<S, I>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Movie>, ApiError>
where
    S: DocumentStore + 'static,
    I: IdProvider + 'static,
{
    let Json(body) = body?;
    let patch = MoviePatch::from_json(&body)?;
    let movie = blocking(catalog, move |c| c.update_movie(&id, patch)).await?;
    Ok(Json(movie))
}

async fn add_actor<S, I>(
    State(catalog): State<Shared<S, I>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Movie>, ApiError>
where
    S: DocumentStore + 'static,
    I: IdProvider + 'static,
{
    let Json(body) = body?;
    let actor_id = actor_id_from_json(&body)?;
    let movie = blocking(catalog, move |c| c.add_actor_to_movie(&id, &actor_id)).await?;
    Ok(Json(movie))
}

async fn remove_actor<S, I>(
    State(catalog): State<Shared<S, I>>,
    Path((id, actor_id)): Path<(String, String)>,
) -> Result<Json<Movie>, ApiError>
where
    S: DocumentStore + 'static,
    I: IdProvider + 'static,
{
    let movie = blocking(catalog, move |c| c.remove_actor_from_movie(&id, &actor_id)).await?;
    Ok(Json(movie))
}

async fn delete_movie<S, I>(
    State(catalog): State<Shared<S, I>>,
    Path(id): Path<String>,
) -> Result<Json<Movie>, ApiError>
where
    S: DocumentStore + 'static,
    I: IdProvider + 'static,
{
    let movie = blocking(catalog, move |c| c.delete_movie(&id)).await?;
    Ok(Json(movie))
}

async fn list_actors<S, I>(
    State(catalog): State<Shared<S, I>>,
) -> Result<Json<Vec<Actor>>, ApiError>
where
    S: DocumentStore + 'static,
    I: IdProvider + 'static,
{
    let actors = blocking(catalog, |c| c.list_actors()).await?;
    Ok(Json(actors))
}

async fn get_actor<S, I>(
    State(catalog): State<Shared<S, I>>,
    Path(id): Path<String>,
) -> Result<Json<Actor>, ApiError>
where
    S: DocumentStore + 'static,
    I: IdProvider + 'static,
{
    let actor = blocking(catalog, move |c| c.get_actor(&id)).await?;
    Ok(Json(actor))
}

async fn create_actor<S, I>(
    State(catalog): State<Shared<S, I>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<(StatusCode, Json<Actor>), ApiError>
where
    S: DocumentStore + 'static,
    I: IdProvider + 'static,
{
    let Json(body) = body?;
    let input = NewActor::from_json(&body)?;
    let actor = blocking(catalog, move |c| c.create_actor(input)).await?;
    Ok((StatusCode::CREATED, Json(actor)))
}

async fn update_actor<S, I>(
    State(catalog): State<Shared<S, I>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<Actor>, ApiError>
where
    S: DocumentStore + 'static,
    I: IdProvider + 'static,
{
    let Json(body) = body?;
    let patch = ActorPatch::from_json(&body)?;
    let actor = blocking(catalog, move |c| c.update_actor(&id, patch)).await?;
    Ok(Json(actor))
}

async fn delete_actor<S, I>(
    State(catalog): State<Shared<S, I>>,
    Path(id): Path<String>,
) -> Result<Json<Actor>, ApiError>
where
    S: DocumentStore + 'static,
    I: IdProvider + 'static,
{
    let actor = blocking(catalog, move |c| c.delete_actor(&id)).await?;
    Ok(Json(actor))
}

/// Allow any origin; answer preflight requests directly.
async fn cors(req: Request, next: Next) -> Response {
    if req.method() == Method::OPTIONS {
        let mut resp = StatusCode::NO_CONTENT.into_response();
        let headers = resp.headers_mut();
        headers.insert("access-control-allow-origin", HeaderValue::from_static("*"));
        headers.insert(
            "access-control-allow-methods",
            HeaderValue::from_static("GET,POST,PATCH,DELETE,OPTIONS"),
        );
        headers.insert(
            "access-control-allow-headers",
            HeaderValue::from_static("content-type"),
        );
        return resp;
    }

    let mut resp = next.run(req).await;
    resp.headers_mut()
        .insert("access-control-allow-origin", HeaderValue::from_static("*"));
    resp
}

async fn request_tracing(req: Request, next: Next) -> Response {
    let span = tracing::info_span!(
        "http.request",
        method = %req.method(),
        route = %req.uri().path(),
    );
    let started = Instant::now();
    let resp = next.run(req).instrument(span.clone()).await;
    span.in_scope(|| {
        info!(
            status = resp.status().as_u16(),
            elapsed = ?started.elapsed(),
            "request completed"
        );
    });
    resp
}
