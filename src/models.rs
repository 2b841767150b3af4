use serde::{Deserialize, Serialize};

use crate::entities::film;

/// Subset of film columns shown in search results.
#[derive(Clone, Debug, PartialEq)]
pub struct FilmSummary {
    pub film_id: i32,
    pub title: String,
    pub release_year: i32,
    pub rating: Option<String>,
}

impl From<film::Model> for FilmSummary {
    fn from(m: film::Model) -> Self {
        Self {
            film_id: m.film_id,
            title: m.title,
            release_year: m.release_year,
            rating: m.rating,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

/// A parsed, validated search request. `genre_id` 0 means all genres.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchQuery {
    Keyword {
        keyword: String,
    },
    GenreYear {
        genre_id: i32,
        start_year: i32,
        end_year: i32,
    },
}

/// Normalized parameters of a logged search. A closed enum rather than a
/// loose key-value map, so grouping equality is structural and independent
/// of any key ordering. Serialized field order is fixed by declaration,
/// which makes the JSON form canonical and safe to GROUP BY.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchParams {
    Keyword {
        keyword: String,
    },
    GenreYear {
        genre: String,
        start_year: i32,
        end_year: i32,
    },
}

impl SearchParams {
    pub fn kind(&self) -> &'static str {
        match self {
            SearchParams::Keyword { .. } => "keyword",
            SearchParams::GenreYear { .. } => "genre_year",
        }
    }

    pub fn description(&self) -> String {
        match self {
            SearchParams::Keyword { keyword } => format!("Search: '{keyword}'"),
            SearchParams::GenreYear { genre, start_year, end_year } => {
                format!("Genre: {genre}, Years: {start_year}-{end_year}")
            },
        }
    }
}

/// 1-indexed window over an ordered result set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u64,
    pub page_size: u64,
    pub total: u64,
    pub has_prev: bool,
    pub has_next: bool,
}

impl PageInfo {
    pub fn new(page: u64, page_size: u64, total: u64) -> Self {
        Self {
            page,
            page_size,
            total,
            has_prev: page > 1,
            has_next: page.saturating_mul(page_size) < total,
        }
    }
}

/// One row of the "most frequent searches" view.
#[derive(Clone, Debug, PartialEq)]
pub struct PopularQuery {
    pub params: SearchParams,
    pub count: i64,
    pub last_searched: i64,
}

/// One row of the "most recently distinct searches" view.
#[derive(Clone, Debug, PartialEq)]
pub struct RecentQuery {
    pub params: SearchParams,
    pub last_searched: i64,
}

#[derive(Clone, Debug, Default)]
pub struct Statistics {
    pub popular: Vec<PopularQuery>,
    pub recent: Vec<RecentQuery>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_info_flags_at_boundaries() {
        let p = PageInfo::new(1, 10, 3);
        assert!(!p.has_prev);
        assert!(!p.has_next);

        let p = PageInfo::new(1, 10, 11);
        assert!(p.has_next);

        // page * page_size == total means no next page
        let p = PageInfo::new(2, 10, 20);
        assert!(p.has_prev);
        assert!(!p.has_next);

        let p = PageInfo::new(2, 10, 21);
        assert!(p.has_next);
    }

    #[test]
    fn page_info_survives_huge_page_numbers() {
        let p = PageInfo::new(u64::MAX, 10, 3);
        assert!(p.has_prev);
        assert!(!p.has_next);
    }

    #[test]
    fn search_params_group_by_value() {
        let a = SearchParams::GenreYear {
            genre: "Action".to_string(),
            start_year: 2000,
            end_year: 2010,
        };
        let b = SearchParams::GenreYear {
            genre: "Action".to_string(),
            start_year: 2000,
            end_year: 2010,
        };
        assert_eq!(a, b);
        // Equal values must serialize identically for SQL grouping.
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }

    #[test]
    fn search_params_round_trip() {
        let p = SearchParams::Keyword { keyword: "alien".to_string() };
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(serde_json::from_str::<SearchParams>(&json).unwrap(), p);
        assert_eq!(p.kind(), "keyword");
    }
}
