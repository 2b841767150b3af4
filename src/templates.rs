use maud::{DOCTYPE, Markup, html};

use crate::{
    entities::film,
    models::{Genre, SearchQuery, Statistics},
    search::SearchOutcome,
};

const TAILWIND_CDN: &str = "https://cdn.tailwindcss.com";

pub fn index_page(genres: &[Genre], min_year: i32, max_year: i32, stats: &Statistics) -> String {
    page(
        "Movie Catalog Search",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-3xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" { "Movie Catalog Search" }
                        p class="mt-2 text-gray-600" { "Find films by keyword or browse by genre and year." }

                        form class="mt-8 space-y-4" method="get" action="/search" {
                            input type="hidden" name="type" value="keyword";
                            div {
                                label class="block text-sm font-medium text-gray-700" for="keyword" { "Keyword" }
                                input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2 focus:border-blue-500 focus:outline-none focus:ring-1 focus:ring-blue-500" name="keyword" id="keyword" placeholder="e.g. alien" required;
                            }
                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Search titles" }
                        }

                        form class="mt-8 space-y-4 border-t border-gray-200 pt-8" method="get" action="/search" {
                            input type="hidden" name="type" value="genre_year";
                            div {
                                label class="block text-sm font-medium text-gray-700" for="genre_id" { "Genre" }
                                select class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" name="genre_id" id="genre_id" {
                                    option value="0" { "All Genres" }
                                    @for genre in genres {
                                        option value=(genre.id) { (genre.name) }
                                    }
                                }
                            }
                            div class="grid grid-cols-2 gap-4" {
                                div {
                                    label class="block text-sm font-medium text-gray-700" for="start_year" { "From" }
                                    input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" type="number" name="start_year" id="start_year" min=(min_year) max=(max_year) value=(min_year) required;
                                }
                                div {
                                    label class="block text-sm font-medium text-gray-700" for="end_year" { "To" }
                                    input class="mt-2 w-full rounded-md border border-gray-300 px-3 py-2" type="number" name="end_year" id="end_year" min=(min_year) max=(max_year) value=(max_year) required;
                                }
                            }
                            button class="w-full rounded-md bg-blue-600 px-4 py-2 font-semibold text-white hover:bg-blue-700" type="submit" { "Browse" }
                        }
                    }

                    div class="mt-8 bg-white shadow rounded-lg p-8" {
                        div class="flex items-start justify-between" {
                            h2 class="text-xl font-semibold text-gray-900" { "Search activity" }
                            a class="text-sm text-blue-600 hover:text-blue-800" href="/stats" { "Full statistics" }
                        }
                        (stats_summary(stats))
                    }
                }
            }
        },
    )
}

pub fn results_page(outcome: &SearchOutcome) -> String {
    page(
        "Search results",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-4xl mx-auto px-6 py-10" {
                    div class="flex items-start justify-between gap-6" {
                        div {
                            h1 class="text-3xl font-bold text-gray-900" { "Search results" }
                            p class="mt-2 text-gray-600" { (outcome.params.description()) " · " (outcome.page.total) " matches" }
                        }
                        a class="text-sm text-blue-600 hover:text-blue-800" href="/" { "New search" }
                    }

                    @if outcome.degraded {
                        div class="mt-6 rounded-md border border-yellow-300 bg-yellow-50 p-4 text-sm text-yellow-800" {
                            "The catalog is temporarily unavailable. Please try again in a moment."
                        }
                    } @else if outcome.rows.is_empty() {
                        div class="mt-10 bg-white shadow rounded-lg p-8" {
                            p class="text-gray-600" { "No films matched your search." }
                        }
                    } @else {
                        div class="mt-10 bg-white shadow rounded-lg overflow-hidden" {
                            table class="w-full text-left" {
                                thead class="bg-gray-100 text-sm text-gray-600" {
                                    tr {
                                        th class="px-6 py-3" { "Title" }
                                        th class="px-6 py-3" { "Year" }
                                        th class="px-6 py-3" { "Rating" }
                                    }
                                }
                                tbody class="divide-y divide-gray-100" {
                                    @for film in &outcome.rows {
                                        tr class="hover:bg-gray-50" {
                                            td class="px-6 py-3" {
                                                a class="font-medium text-blue-600 hover:text-blue-800" href=(format!("/movie/{}", film.film_id)) { (film.title) }
                                            }
                                            td class="px-6 py-3 text-gray-700" { (film.release_year) }
                                            td class="px-6 py-3 text-gray-700" { (film.rating.as_deref().unwrap_or("—")) }
                                        }
                                    }
                                }
                            }
                        }
                    }

                    (pagination(outcome))
                }
            }
        },
    )
}

pub fn movie_page(film: &film::Model) -> String {
    page(
        &film.title,
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-2xl mx-auto px-6 py-12" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-3xl font-bold text-gray-900" {
                            (film.title)
                            span class="ml-2 font-normal text-gray-500" { "(" (film.release_year) ")" }
                        }
                        @if let Some(rating) = &film.rating {
                            span class="mt-3 inline-block rounded bg-gray-100 px-2 py-1 text-sm font-medium text-gray-700" { (rating) }
                        }
                        @if let Some(description) = &film.description {
                            p class="mt-4 text-gray-700" { (description) }
                        }

                        dl class="mt-6 grid grid-cols-2 gap-x-6 gap-y-3 text-sm" {
                            @if let Some(length) = film.length {
                                dt class="text-gray-500" { "Length" }
                                dd class="text-gray-900" { (length) " min" }
                            }
                            dt class="text-gray-500" { "Rental duration" }
                            dd class="text-gray-900" { (film.rental_duration) " days" }
                            dt class="text-gray-500" { "Rental rate" }
                            dd class="text-gray-900" { "$" (format!("{:.2}", film.rental_rate)) }
                            dt class="text-gray-500" { "Replacement cost" }
                            dd class="text-gray-900" { "$" (format!("{:.2}", film.replacement_cost)) }
                        }

                        a class="mt-8 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back to search" }
                    }
                }
            }
        },
    )
}

pub fn stats_page(stats: &Statistics) -> String {
    page(
        "Search statistics",
        html! {
            div class="min-h-screen bg-gray-50" {
                div class="max-w-3xl mx-auto px-6 py-12" {
                    div class="flex items-start justify-between" {
                        h1 class="text-3xl font-bold text-gray-900" { "Search statistics" }
                        a class="text-sm text-blue-600 hover:text-blue-800" href="/" { "Back to search" }
                    }
                    div class="mt-8 bg-white shadow rounded-lg p-8" {
                        (stats_summary(stats))
                    }
                }
            }
        },
    )
}

pub fn error_page(title: &str, message: &str) -> String {
    page(
        title,
        html! {
            div class="min-h-screen bg-gray-50 flex items-center justify-center" {
                div class="max-w-xl w-full px-6" {
                    div class="bg-white shadow rounded-lg p-8" {
                        h1 class="text-2xl font-bold text-gray-900" { (title) }
                        p class="mt-4 text-gray-700" { (message) }
                        a class="mt-6 inline-block text-blue-600 hover:text-blue-800" href="/" { "Back" }
                    }
                }
            }
        },
    )
}

pub fn not_found_page(what: &str) -> String {
    error_page("Not found", &format!("The {what} you were looking for does not exist."))
}

fn page(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                script src=(TAILWIND_CDN) {}
            }
            body { (body) }
        }
    }
    .into_string()
}

fn stats_summary(stats: &Statistics) -> Markup {
    html! {
        h3 class="mt-6 text-sm font-semibold uppercase tracking-wide text-gray-500" { "Most frequent" }
        @if stats.popular.is_empty() {
            p class="mt-2 text-sm text-gray-500" { "No searches recorded yet." }
        } @else {
            table class="mt-2 w-full text-left text-sm" {
                thead class="text-gray-500" {
                    tr {
                        th class="py-1 pr-4" { "Query" }
                        th class="py-1 pr-4" { "Count" }
                        th class="py-1" { "Last searched" }
                    }
                }
                tbody class="divide-y divide-gray-100" {
                    @for entry in &stats.popular {
                        tr {
                            td class="py-2 pr-4 text-gray-900" { (entry.params.description()) }
                            td class="py-2 pr-4 text-gray-700" { (entry.count) }
                            td class="py-2 text-gray-700" { (format_ts(entry.last_searched)) }
                        }
                    }
                }
            }
        }

        h3 class="mt-6 text-sm font-semibold uppercase tracking-wide text-gray-500" { "Most recent" }
        @if stats.recent.is_empty() {
            p class="mt-2 text-sm text-gray-500" { "No searches recorded yet." }
        } @else {
            ul class="mt-2 space-y-1 text-sm" {
                @for entry in &stats.recent {
                    li class="text-gray-700" {
                        span class="text-gray-900" { (entry.params.description()) }
                        span class="text-gray-500" { " · " (format_ts(entry.last_searched)) }
                    }
                }
            }
        }
    }
}

fn pagination(outcome: &SearchOutcome) -> Markup {
    let page = outcome.page;
    html! {
        @if page.has_prev || page.has_next {
            nav class="mt-8 flex items-center justify-between" {
                @if page.has_prev {
                    a class="rounded-md bg-white px-4 py-2 text-sm font-medium text-gray-700 shadow hover:bg-gray-50" href=(search_url(&outcome.query, page.page - 1)) { "Previous" }
                } @else {
                    span {}
                }
                span class="text-sm text-gray-500" { "Page " (page.page) }
                @if page.has_next {
                    a class="rounded-md bg-white px-4 py-2 text-sm font-medium text-gray-700 shadow hover:bg-gray-50" href=(search_url(&outcome.query, page.page + 1)) { "Next" }
                } @else {
                    span {}
                }
            }
        }
    }
}

fn search_url(query: &SearchQuery, page: u64) -> String {
    match query {
        SearchQuery::Keyword { keyword } => {
            format!("/search?type=keyword&keyword={}&page={page}", urlencoding::encode(keyword))
        },
        SearchQuery::GenreYear { genre_id, start_year, end_year } => format!(
            "/search?type=genre_year&genre_id={genre_id}&start_year={start_year}&end_year={end_year}&page={page}"
        ),
    }
}

fn format_ts(seconds: i64) -> String {
    jiff::Timestamp::from_second(seconds)
        .map(|ts| ts.strftime("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_carry_the_full_html_scaffold() {
        let html = error_page("Not found", "no such film");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Not found</title>"));
        assert!(html.contains(TAILWIND_CDN));
        assert!(html.contains("no such film"));
    }

    #[test]
    fn search_urls_are_escaped_and_paged() {
        let query = SearchQuery::Keyword { keyword: "alien wave".to_string() };
        assert_eq!(search_url(&query, 2), "/search?type=keyword&keyword=alien%20wave&page=2");

        let query = SearchQuery::GenreYear { genre_id: 3, start_year: 2000, end_year: 2010 };
        assert_eq!(
            search_url(&query, 1),
            "/search?type=genre_year&genre_id=3&start_year=2000&end_year=2010&page=1"
        );
    }
}
