use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, QueryOrder, QuerySelect, Set,
};
use tracing::warn;

use crate::{
    entities::search_log,
    models::{PopularQuery, RecentQuery, SearchParams, Statistics},
};

/// Append-only adapter over the search activity store. The connection is
/// opened once at startup and shared by every request; writes and the two
/// aggregate reads are all best-effort and never fail a search.
#[derive(Clone)]
pub struct ActivityLog {
    db: DatabaseConnection,
}

#[derive(Debug, FromQueryResult)]
struct PopularRow {
    params: String,
    hits: i64,
    last_searched: i64,
}

#[derive(Debug, FromQueryResult)]
struct RecentRow {
    params: String,
    last_searched: i64,
}

impl ActivityLog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Append one log entry, timestamped now. Failures are swallowed:
    /// logging must never abort the enclosing search.
    pub async fn record(&self, params: &SearchParams, results_count: usize) {
        let json = match serde_json::to_string(params) {
            Ok(json) => json,
            Err(err) => {
                warn!(error = %err, "failed to serialize search params");
                return;
            },
        };

        let entry = search_log::ActiveModel {
            id: Default::default(),
            timestamp: Set(now_sec()),
            search_type: Set(params.kind().to_string()),
            params: Set(json),
            results_count: Set(results_count as i32),
        };

        if let Err(err) = search_log::Entity::insert(entry).exec(&self.db).await {
            warn!(error = %err, "failed to record search");
        }
    }

    /// Most frequent distinct queries, by occurrence count descending.
    /// Empty on store failure.
    pub async fn top_queries(&self, limit: u64) -> Vec<PopularQuery> {
        let rows = search_log::Entity::find()
            .select_only()
            .column(search_log::Column::Params)
            .column_as(search_log::Column::Id.count(), "hits")
            .column_as(search_log::Column::Timestamp.max(), "last_searched")
            .group_by(search_log::Column::SearchType)
            .group_by(search_log::Column::Params)
            .order_by_desc(search_log::Column::Id.count())
            .limit(limit)
            .into_model::<PopularRow>()
            .all(&self.db)
            .await;

        match rows {
            Ok(rows) => rows
                .into_iter()
                .filter_map(|row| {
                    Some(PopularQuery {
                        params: parse_params(&row.params)?,
                        count: row.hits,
                        last_searched: row.last_searched,
                    })
                })
                .collect(),
            Err(err) => {
                warn!(error = %err, "failed to load top queries");
                Vec::new()
            },
        }
    }

    /// Most recently seen distinct queries, newest first. A repeated
    /// search keeps a single entry with its latest timestamp. Empty on
    /// store failure.
    pub async fn recent_distinct(&self, limit: u64) -> Vec<RecentQuery> {
        let rows = search_log::Entity::find()
            .select_only()
            .column(search_log::Column::Params)
            .column_as(search_log::Column::Timestamp.max(), "last_searched")
            .group_by(search_log::Column::SearchType)
            .group_by(search_log::Column::Params)
            .order_by_desc(search_log::Column::Timestamp.max())
            .limit(limit)
            .into_model::<RecentRow>()
            .all(&self.db)
            .await;

        match rows {
            Ok(rows) => rows
                .into_iter()
                .filter_map(|row| {
                    Some(RecentQuery {
                        params: parse_params(&row.params)?,
                        last_searched: row.last_searched,
                    })
                })
                .collect(),
            Err(err) => {
                warn!(error = %err, "failed to load recent queries");
                Vec::new()
            },
        }
    }

    pub async fn statistics(&self, top_limit: u64, recent_limit: u64) -> Statistics {
        Statistics {
            popular: self.top_queries(top_limit).await,
            recent: self.recent_distinct(recent_limit).await,
        }
    }
}

fn parse_params(json: &str) -> Option<SearchParams> {
    match serde_json::from_str(json) {
        Ok(params) => Some(params),
        Err(err) => {
            warn!(error = %err, params = %json, "skipping unparseable log entry");
            None
        },
    }
}

fn now_sec() -> i64 {
    jiff::Timestamp::now().as_second()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil;

    fn kw(keyword: &str) -> SearchParams {
        SearchParams::Keyword { keyword: keyword.to_string() }
    }

    async fn insert_at(log: &ActivityLog, params: &SearchParams, timestamp: i64) {
        let entry = search_log::ActiveModel {
            id: Default::default(),
            timestamp: Set(timestamp),
            search_type: Set(params.kind().to_string()),
            params: Set(serde_json::to_string(params).unwrap()),
            results_count: Set(1),
        };
        search_log::Entity::insert(entry).exec(&log.db).await.unwrap();
    }

    async fn seeded_log() -> ActivityLog {
        let (log, _db) = testutil::activity_log().await;
        let genre = SearchParams::GenreYear {
            genre: "Action".to_string(),
            start_year: 2000,
            end_year: 2010,
        };

        insert_at(&log, &kw("alien"), 100).await;
        insert_at(&log, &kw("alien"), 200).await;
        insert_at(&log, &kw("alien"), 300).await;
        insert_at(&log, &genre, 150).await;
        insert_at(&log, &genre, 250).await;
        insert_at(&log, &kw("solaris"), 400).await;
        log
    }

    #[tokio::test]
    async fn record_appends_entries() {
        let (log, _db) = testutil::activity_log().await;
        log.record(&kw("alien"), 3).await;
        log.record(&kw("alien"), 3).await;

        let popular = log.top_queries(10).await;
        assert_eq!(popular.len(), 1);
        assert_eq!(popular[0].count, 2);
        assert_eq!(popular[0].params, kw("alien"));
    }

    #[tokio::test]
    async fn top_queries_orders_by_count_desc() {
        let log = seeded_log().await;
        let popular = log.top_queries(10).await;

        assert_eq!(popular.len(), 3);
        let counts: Vec<_> = popular.iter().map(|p| p.count).collect();
        assert_eq!(counts, [3, 2, 1]);
        assert_eq!(popular[0].params, kw("alien"));
        assert_eq!(popular[0].last_searched, 300);
    }

    #[tokio::test]
    async fn top_queries_honors_limit() {
        let log = seeded_log().await;
        assert_eq!(log.top_queries(2).await.len(), 2);
    }

    #[tokio::test]
    async fn recent_distinct_keeps_one_entry_per_query() {
        let log = seeded_log().await;
        let recent = log.recent_distinct(10).await;

        assert_eq!(recent.len(), 3);
        let stamps: Vec<_> = recent.iter().map(|r| r.last_searched).collect();
        assert_eq!(stamps, [400, 300, 250]);
        assert_eq!(recent[0].params, kw("solaris"));

        for (i, a) in recent.iter().enumerate() {
            for b in &recent[i + 1..] {
                assert_ne!(a.params, b.params);
            }
        }
    }

    #[tokio::test]
    async fn unparseable_rows_are_skipped() {
        let (log, db) = testutil::activity_log().await;
        crate::db::run_sql(
            &db,
            "INSERT INTO search_log (timestamp, search_type, params, results_count) \
             VALUES (50, 'keyword', 'not json', 1)",
        )
        .await
        .unwrap();
        insert_at(&log, &kw("alien"), 100).await;

        assert_eq!(log.top_queries(10).await.len(), 1);
        assert_eq!(log.recent_distinct(10).await.len(), 1);
    }

    #[tokio::test]
    async fn aggregates_are_empty_when_store_is_broken() {
        let log = seeded_log().await;
        crate::db::run_sql(&log.db, "DROP TABLE search_log").await.unwrap();

        assert!(log.top_queries(10).await.is_empty());
        assert!(log.recent_distinct(10).await.is_empty());
        // and recording must not panic either
        log.record(&kw("alien"), 1).await;
    }
}
