use std::sync::Arc;

use axum::extract::{FromRequest, Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::auth::{self, AuthCinema};
use crate::error::{ApiError, ApiResult};
use crate::models::CinemaPublic;
use crate::store::{CityFilters, FilmSort};
use crate::validate::{LoginRequest, NewCinema, NewFilm, NewProgrammation};
use crate::AppState;

/// `Json` with rejections converted to the validation-error envelope.
#[derive(FromRequest)]
#[from_request(via(Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/verify", get(verify))
        .route("/api/auth/cinema", get(verify))
        .route("/api/cinemas", get(list_cinemas).post(create_cinema))
        .route("/api/cinemas/{id}", get(get_cinema))
        .route("/api/films", get(list_films).post(create_film))
        .route("/api/films/by-city/{city}", get(films_by_city))
        .route("/api/films/{id}", get(get_film).put(update_film).delete(delete_film))
        .route("/api/programmations", get(list_programmations).post(create_programmation))
        .route(
            "/api/programmations/{id}",
            get(get_programmation).put(update_programmation).delete(delete_programmation),
        )
        .fallback(not_found)
        .with_state(state)
}

type Reply = (StatusCode, Json<Value>);

fn ok(data: Value) -> Reply {
    (StatusCode::OK, Json(json!({ "success": true, "data": data })))
}

fn ok_message(message: &str, data: Value) -> Reply {
    (StatusCode::OK, Json(json!({ "success": true, "message": message, "data": data })))
}

fn created(message: &str, data: Value) -> Reply {
    (StatusCode::CREATED, Json(json!({ "success": true, "message": message, "data": data })))
}

fn deleted(message: &str) -> Reply {
    (StatusCode::OK, Json(json!({ "success": true, "message": message })))
}

fn parse_id(raw: &str, message: &'static str) -> Result<i64, ApiError> {
    raw.parse().map_err(|_| ApiError::InvalidId(message))
}

async fn not_found() -> ApiError {
    ApiError::NotFound("The requested resource was not found")
}

// ---- auth ----

async fn login(
    State(state): State<Arc<AppState>>,
    payload: ApiJson<LoginRequest>,
) -> ApiResult<Reply> {
    let input = payload.0.validate()?;

    // same failure for unknown login and wrong password
    let cinema = state
        .store
        .cinema_by_login(&input.login)
        .await
        .filter(|c| auth::verify_password(&input.mot_de_passe, &c.mot_de_passe))
        .ok_or(ApiError::AuthFailed("Invalid credentials"))?;

    let token = auth::issue_token(
        &state.config.jwt_secret,
        cinema.id,
        &cinema.login,
        state.config.token_ttl_hours,
    )?;

    tracing::info!(cinema_id = cinema.id, login = %cinema.login, "cinema authenticated");

    Ok(ok_message(
        "Authentication successful",
        json!({ "token": token, "cinema": CinemaPublic::from(&cinema) }),
    ))
}

async fn verify(AuthCinema(cinema): AuthCinema) -> Reply {
    ok_message("Token is valid", json!({ "cinema": cinema }))
}

// ---- cinemas ----

#[derive(Debug, Deserialize)]
struct CinemasQuery {
    ville: Option<String>,
}

async fn list_cinemas(
    State(state): State<Arc<AppState>>,
    Query(query): Query<CinemasQuery>,
) -> Reply {
    let cinemas = state.store.cinemas(query.ville.as_deref()).await;
    ok(json!({ "cinemas": cinemas }))
}

async fn get_cinema(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Reply> {
    let id = parse_id(&id, "Invalid cinema ID")?;
    let cinema = state.store.cinema(id).await.ok_or(ApiError::NotFound("Cinema not found"))?;
    Ok(ok(json!({ "cinema": CinemaPublic::from(&cinema) })))
}

async fn create_cinema(
    State(state): State<Arc<AppState>>,
    payload: ApiJson<NewCinema>,
) -> ApiResult<Reply> {
    let input = payload.0.validate()?;

    if state.store.cinema_by_login(&input.login).await.is_some() {
        return Err(ApiError::field("login", "Login already exists"));
    }

    let password_hash = auth::hash_password(&input.mot_de_passe);
    let cinema = state.store.create_cinema(input, password_hash).await;

    tracing::info!(cinema_id = cinema.id, login = %cinema.login, "cinema created");

    Ok(created("Cinema created successfully", json!({ "cinema": CinemaPublic::from(&cinema) })))
}

// ---- films ----

async fn list_films(State(state): State<Arc<AppState>>) -> Reply {
    let films = state.store.films().await;
    ok(json!({ "films": films }))
}

#[derive(Debug, Deserialize)]
struct CityQuery {
    genre: Option<String>,
    langue: Option<String>,
    age_minimum: Option<String>,
    sort: Option<String>,
}

async fn films_by_city(
    State(state): State<Arc<AppState>>,
    Path(city): Path<String>,
    Query(query): Query<CityQuery>,
) -> ApiResult<Reply> {
    let sort = match query.sort.as_deref() {
        Some(raw) => Some(FilmSort::parse(raw).ok_or_else(|| {
            ApiError::field("sort", "Expected one of popular, newest, alphabetical, rating")
        })?),
        None => None,
    };

    let filters = CityFilters {
        genre: query.genre,
        langue: query.langue,
        age_minimum: query.age_minimum,
        sort,
    };
    let films = state.store.films_by_city(&city, &filters).await;

    Ok(ok(json!({ "city": city, "films": films })))
}

async fn get_film(State(state): State<Arc<AppState>>, Path(id): Path<String>) -> ApiResult<Reply> {
    let id = parse_id(&id, "Invalid film ID")?;
    let film = state
        .store
        .film_with_programmations(id)
        .await
        .ok_or(ApiError::NotFound("Film not found"))?;
    Ok(ok(json!({ "film": film })))
}

async fn create_film(
    State(state): State<Arc<AppState>>,
    AuthCinema(cinema): AuthCinema,
    payload: ApiJson<NewFilm>,
) -> ApiResult<Reply> {
    let input = payload.0.validate()?;
    let film = state.store.create_film(input).await;

    tracing::info!(film_id = film.id, cinema_id = cinema.id, "film created");

    Ok(created("Film created successfully", json!({ "film": film })))
}

async fn update_film(
    State(state): State<Arc<AppState>>,
    AuthCinema(_cinema): AuthCinema,
    Path(id): Path<String>,
    payload: ApiJson<NewFilm>,
) -> ApiResult<Reply> {
    let id = parse_id(&id, "Invalid film ID")?;
    let input = payload.0.validate()?;

    let film =
        state.store.update_film(id, input).await.ok_or(ApiError::NotFound("Film not found"))?;

    Ok(ok_message("Film updated successfully", json!({ "film": film })))
}

async fn delete_film(
    State(state): State<Arc<AppState>>,
    AuthCinema(cinema): AuthCinema,
    Path(id): Path<String>,
) -> ApiResult<Reply> {
    let id = parse_id(&id, "Invalid film ID")?;

    if !state.store.delete_film(id).await {
        return Err(ApiError::NotFound("Film not found"));
    }

    tracing::info!(film_id = id, cinema_id = cinema.id, "film deleted");

    Ok(deleted("Film deleted successfully"))
}

// ---- programmations ----

#[derive(Debug, Deserialize)]
struct ProgrammationsQuery {
    cinema_id: Option<String>,
    film_id: Option<String>,
}

async fn list_programmations(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProgrammationsQuery>,
) -> ApiResult<Reply> {
    let cinema_id = query
        .cinema_id
        .as_deref()
        .map(|raw| parse_id(raw, "Invalid cinema ID"))
        .transpose()?;
    let film_id =
        query.film_id.as_deref().map(|raw| parse_id(raw, "Invalid film ID")).transpose()?;

    let programmations = state.store.programmations(cinema_id, film_id).await;
    Ok(ok(json!({ "programmations": programmations })))
}

async fn get_programmation(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<Reply> {
    let id = parse_id(&id, "Invalid programming ID")?;
    let programmation = state
        .store
        .programmation_with_details(id)
        .await
        .ok_or(ApiError::NotFound("Programming not found"))?;
    Ok(ok(json!({ "programmation": programmation })))
}

async fn create_programmation(
    State(state): State<Arc<AppState>>,
    AuthCinema(cinema): AuthCinema,
    payload: ApiJson<NewProgrammation>,
) -> ApiResult<Reply> {
    let input = payload.0.validate()?;

    if state.store.film(input.film_id).await.is_none() {
        return Err(ApiError::field("film_id", "Film not found"));
    }

    // owner is always the authenticated cinema
    let programmation = state.store.create_programmation(input, cinema.id).await;

    tracing::info!(
        programmation_id = programmation.id,
        cinema_id = cinema.id,
        "programmation created"
    );

    Ok(created("Programming created successfully", json!({ "programmation": programmation })))
}

async fn update_programmation(
    State(state): State<Arc<AppState>>,
    AuthCinema(cinema): AuthCinema,
    Path(id): Path<String>,
    payload: ApiJson<NewProgrammation>,
) -> ApiResult<Reply> {
    let id = parse_id(&id, "Invalid programming ID")?;
    let input = payload.0.validate()?;

    let existing = state
        .store
        .programmation(id)
        .await
        .ok_or(ApiError::NotFound("Programming not found"))?;

    if existing.cinema_id != cinema.id {
        return Err(ApiError::Forbidden("You do not have permission to update this programming"));
    }

    if state.store.film(input.film_id).await.is_none() {
        return Err(ApiError::field("film_id", "Film not found"));
    }

    let programmation = state
        .store
        .update_programmation(id, input)
        .await
        .ok_or(ApiError::NotFound("Programming not found"))?;

    Ok(ok_message("Programming updated successfully", json!({ "programmation": programmation })))
}

async fn delete_programmation(
    State(state): State<Arc<AppState>>,
    AuthCinema(cinema): AuthCinema,
    Path(id): Path<String>,
) -> ApiResult<Reply> {
    let id = parse_id(&id, "Invalid programming ID")?;

    let existing = state
        .store
        .programmation(id)
        .await
        .ok_or(ApiError::NotFound("Programming not found"))?;

    if existing.cinema_id != cinema.id {
        return Err(ApiError::Forbidden("You do not have permission to delete this programming"));
    }

    state.store.delete_programmation(id).await;

    tracing::info!(programmation_id = id, cinema_id = cinema.id, "programmation deleted");

    Ok(deleted("Programming deleted successfully"))
}
