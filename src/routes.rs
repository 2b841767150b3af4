use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Html,
};
use tracing::warn;

use crate::{
    AppState, catalog,
    error::AppResult,
    search::{RawSearchQuery, parse_query},
    templates,
};

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    let genres = match state.catalog.list_genres().await {
        Ok(genres) => genres,
        Err(err) => {
            warn!(error = %err, "catalog unreachable, rendering without genres");
            Vec::new()
        },
    };

    let (min_year, max_year) = match state.catalog.year_range().await {
        Ok(range) => range,
        Err(err) => {
            warn!(error = %err, "catalog unreachable, using default year range");
            catalog::DEFAULT_YEAR_RANGE
        },
    };

    let stats = state
        .activity
        .statistics(state.config.top_queries_limit, state.config.recent_queries_limit)
        .await;

    Html(templates::index_page(&genres, min_year, max_year, &stats))
}

pub async fn search(
    State(state): State<Arc<AppState>>,
    Query(raw): Query<RawSearchQuery>,
) -> AppResult<Html<String>> {
    let (query, page) = parse_query(&raw)?;
    let outcome = state.orchestrator.search(query, page).await?;
    Ok(Html(templates::results_page(&outcome)))
}

pub async fn movie_detail(
    State(state): State<Arc<AppState>>,
    Path(film_id): Path<i32>,
) -> AppResult<Html<String>> {
    let film = state.catalog.film_detail(film_id).await?;
    Ok(Html(templates::movie_page(&film)))
}

pub async fn stats(State(state): State<Arc<AppState>>) -> Html<String> {
    let stats = state
        .activity
        .statistics(state.config.top_queries_limit, state.config.recent_queries_limit)
        .await;
    Html(templates::stats_page(&stats))
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (StatusCode::NOT_FOUND, Html(templates::not_found_page("page")))
}
