use serde::Deserialize;
use tracing::warn;

use crate::{
    activity::ActivityLog,
    catalog::{ALL_GENRES, CatalogStore, normalize_keyword},
    error::{AppError, AppResult, StoreError},
    models::{FilmSummary, PageInfo, SearchParams, SearchQuery},
};

/// Raw query-string parameters as the browser sends them. Numeric fields
/// arrive as strings so that malformed input surfaces as a validation
/// failure instead of a rejected extractor.
#[derive(Debug, Default, Deserialize)]
pub struct RawSearchQuery {
    #[serde(rename = "type")]
    pub search_type: Option<String>,
    pub keyword: Option<String>,
    pub genre_id: Option<String>,
    pub start_year: Option<String>,
    pub end_year: Option<String>,
    pub page: Option<String>,
}

/// One resolved search, ready for presentation.
#[derive(Debug)]
pub struct SearchOutcome {
    pub query: SearchQuery,
    pub params: SearchParams,
    pub rows: Vec<FilmSummary>,
    pub page: PageInfo,
    /// True when the catalog was unreachable and the empty result set is
    /// a degraded response rather than a genuine zero-match.
    pub degraded: bool,
}

/// Dispatches parsed searches to the catalog and mirrors page-1 activity
/// into the search log. Both stores are injected at construction.
#[derive(Clone)]
pub struct SearchOrchestrator {
    catalog: CatalogStore,
    activity: ActivityLog,
}

impl SearchOrchestrator {
    pub fn new(catalog: CatalogStore, activity: ActivityLog) -> Self {
        Self { catalog, activity }
    }

    pub async fn search(&self, query: SearchQuery, page: u64) -> AppResult<SearchOutcome> {
        let page_size = self.catalog.page_size();

        let (rows, total, params, degraded) = match &query {
            SearchQuery::Keyword { keyword } => {
                let params = SearchParams::Keyword { keyword: keyword.clone() };
                match self.catalog.search_by_keyword(keyword, page).await {
                    Ok((rows, total)) => (rows, total, params, false),
                    Err(StoreError::NotFound(what)) => return Err(AppError::NotFound(what)),
                    Err(StoreError::Unavailable(err)) => {
                        warn!(error = %err, "catalog unreachable, returning empty results");
                        (Vec::new(), 0, params, true)
                    },
                }
            },
            SearchQuery::GenreYear { genre_id, start_year, end_year } => {
                match self.catalog.search_by_genre_year(*genre_id, *start_year, *end_year, page).await
                {
                    Ok((rows, total, genre)) => {
                        let params = SearchParams::GenreYear {
                            genre,
                            start_year: *start_year,
                            end_year: *end_year,
                        };
                        (rows, total, params, false)
                    },
                    Err(StoreError::NotFound(what)) => return Err(AppError::NotFound(what)),
                    Err(StoreError::Unavailable(err)) => {
                        warn!(error = %err, "catalog unreachable, returning empty results");
                        let params = SearchParams::GenreYear {
                            genre: ALL_GENRES.to_string(),
                            start_year: *start_year,
                            end_year: *end_year,
                        };
                        (Vec::new(), 0, params, true)
                    },
                }
            },
        };

        // Statistics count first-page hits, not total matches, and only
        // page 1 is recorded. Best-effort: record never fails the search.
        if page == 1 {
            self.activity.record(&params, rows.len()).await;
        }

        Ok(SearchOutcome {
            query,
            params,
            rows,
            page: PageInfo::new(page, page_size, total),
            degraded,
        })
    }
}

/// Parse and validate raw query-string parameters into a `SearchQuery`
/// and a 1-indexed page. No store access happens here.
pub fn parse_query(raw: &RawSearchQuery) -> AppResult<(SearchQuery, u64)> {
    let page = match raw.page.as_deref() {
        None | Some("") => 1,
        Some(s) => s
            .trim()
            .parse::<u64>()
            .ok()
            .filter(|p| *p >= 1)
            .ok_or_else(|| AppError::Validation("page must be a positive number".to_string()))?,
    };

    let query = match raw.search_type.as_deref().unwrap_or("keyword") {
        "keyword" => {
            let keyword = normalize_keyword(raw.keyword.as_deref().unwrap_or(""));
            if keyword.is_empty() {
                return Err(AppError::Validation("enter a keyword to search".to_string()));
            }
            SearchQuery::Keyword { keyword }
        },
        "genre_year" => SearchQuery::GenreYear {
            genre_id: parse_int(raw.genre_id.as_deref(), "genre")?,
            start_year: parse_int(raw.start_year.as_deref(), "start year")?,
            end_year: parse_int(raw.end_year.as_deref(), "end year")?,
        },
        other => {
            return Err(AppError::Validation(format!("unknown search type '{other}'")));
        },
    };

    Ok((query, page))
}

fn parse_int(value: Option<&str>, field: &str) -> AppResult<i32> {
    value
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::Validation(format!("{field} is required")))?
        .parse()
        .map_err(|_| AppError::Validation(format!("{field} must be a whole number")))
}
