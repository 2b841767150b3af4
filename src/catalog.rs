use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait,
    sea_query::{Expr, Func},
};

use crate::{
    entities::{category, film, film_category},
    error::StoreError,
    models::{FilmSummary, Genre},
};

pub const ALL_GENRES: &str = "All Genres";

/// Year bounds reported when the catalog is empty. Callers reuse them when
/// the store is unreachable.
pub const DEFAULT_YEAR_RANGE: (i32, i32) = (1900, 2025);

/// Read-only adapter over the relational catalog. Each call borrows a
/// pooled connection and returns it on every exit path.
#[derive(Clone)]
pub struct CatalogStore {
    db: DatabaseConnection,
    page_size: u64,
}

impl CatalogStore {
    pub fn new(db: DatabaseConnection, page_size: u64) -> Self {
        Self { db, page_size }
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Case-insensitive substring match on title, ordered by title.
    /// Returns one page of rows plus the total match count.
    pub async fn search_by_keyword(
        &self,
        keyword: &str,
        page: u64,
    ) -> Result<(Vec<FilmSummary>, u64), StoreError> {
        let keyword = normalize_keyword(keyword);
        let pattern = format!("%{}%", keyword.to_lowercase());

        let paginator = film::Entity::find()
            .filter(Expr::expr(Func::lower(Expr::col(film::Column::Title))).like(pattern.as_str()))
            .order_by_asc(film::Column::Title)
            .paginate(&self.db, self.page_size);

        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((rows.into_iter().map(FilmSummary::from).collect(), total))
    }

    /// Films in `[start_year, end_year]`, optionally restricted to one
    /// genre. `genre_id` 0 matches every genre; an unknown genre id is a
    /// `NotFound` error rather than an empty name.
    pub async fn search_by_genre_year(
        &self,
        genre_id: i32,
        start_year: i32,
        end_year: i32,
        page: u64,
    ) -> Result<(Vec<FilmSummary>, u64, String), StoreError> {
        let genre_name = if genre_id == 0 {
            ALL_GENRES.to_string()
        } else {
            category::Entity::find_by_id(genre_id)
                .one(&self.db)
                .await?
                .map(|c| c.name)
                .ok_or(StoreError::NotFound("genre"))?
        };

        let mut query = film::Entity::find()
            .filter(film::Column::ReleaseYear.between(start_year, end_year))
            .order_by_asc(film::Column::Title);

        if genre_id != 0 {
            query = query
                .join(JoinType::InnerJoin, film::Relation::FilmCategory.def())
                .filter(film_category::Column::CategoryId.eq(genre_id));
        }

        let paginator = query.paginate(&self.db, self.page_size);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.saturating_sub(1)).await?;
        Ok((rows.into_iter().map(FilmSummary::from).collect(), total, genre_name))
    }

    pub async fn list_genres(&self) -> Result<Vec<Genre>, StoreError> {
        let rows =
            category::Entity::find().order_by_asc(category::Column::Name).all(&self.db).await?;
        Ok(rows.into_iter().map(|c| Genre { id: c.category_id, name: c.name }).collect())
    }

    /// MIN/MAX release year across the catalog, or `DEFAULT_YEAR_RANGE`
    /// when the catalog is empty.
    pub async fn year_range(&self) -> Result<(i32, i32), StoreError> {
        let row: Option<(Option<i32>, Option<i32>)> = film::Entity::find()
            .select_only()
            .column_as(film::Column::ReleaseYear.min(), "min_year")
            .column_as(film::Column::ReleaseYear.max(), "max_year")
            .into_tuple()
            .one(&self.db)
            .await?;

        let (min, max) = row.unwrap_or((None, None));
        Ok((min.unwrap_or(DEFAULT_YEAR_RANGE.0), max.unwrap_or(DEFAULT_YEAR_RANGE.1)))
    }

    pub async fn film_detail(&self, film_id: i32) -> Result<film::Model, StoreError> {
        film::Entity::find_by_id(film_id)
            .one(&self.db)
            .await?
            .ok_or(StoreError::NotFound("film"))
    }
}

/// Collapse internal whitespace so "alien   wave" and "alien wave" match
/// (and group in the activity log) identically.
pub fn normalize_keyword(keyword: &str) -> String {
    keyword.split_whitespace().collect::<Vec<_>>().join(" ")
}
