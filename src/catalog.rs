use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QueryOrder, QuerySelect,
    RelationTrait, Set, sea_query::Expr,
};

use crate::{
    entities::{genres, movies, movies_genres},
    error::AppResult,
    models::{Genre, Movie, MovieGenre, MovieUpdate, NewMovie},
};

/// Statement-level access to the movie catalog. Every method issues a single
/// statement; sequencing across statements is left to the caller.
#[derive(Clone)]
pub struct Catalog {
    db: DatabaseConnection,
}

impl Catalog {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    #[cfg(test)]
    pub(crate) fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub async fn list_movies(&self) -> AppResult<Vec<Movie>> {
        let rows = movies::Entity::find().all(&self.db).await?;
        Ok(rows.into_iter().map(Movie::from).collect())
    }

    pub async fn find_movie(&self, movie_id: i32) -> AppResult<Option<Movie>> {
        let row = movies::Entity::find_by_id(movie_id).one(&self.db).await?;
        Ok(row.map(Movie::from))
    }

    /// Junction rows for `movie_id` joined with their genre, in link order.
    pub async fn movie_genres(&self, movie_id: i32) -> AppResult<Vec<MovieGenre>> {
        let rows = movies_genres::Entity::find()
            .select_only()
            .column_as(genres::Column::Id, "id")
            .column(movies_genres::Column::MoviesId)
            .column(movies_genres::Column::GenresId)
            .column(genres::Column::Name)
            .join(JoinType::InnerJoin, movies_genres::Relation::Genres.def())
            .filter(movies_genres::Column::MoviesId.eq(movie_id))
            .order_by_asc(movies_genres::Column::Id)
            .into_model::<MovieGenre>()
            .all(&self.db)
            .await?;
        Ok(rows)
    }

    /// Inserts the movie row alone and returns its generated id.
    pub async fn insert_movie(&self, movie: &NewMovie) -> AppResult<i32> {
        let model = movies::ActiveModel {
            id: Default::default(),
            title: Set(movie.title.clone()),
            poster: Set(movie.poster.clone()),
            description: Set(movie.description.clone()),
        };
        let res = movies::Entity::insert(model).exec(&self.db).await?;
        Ok(res.last_insert_id)
    }

    pub async fn link_genre(&self, movie_id: i32, genre_id: i32) -> AppResult<()> {
        let model = movies_genres::ActiveModel {
            id: Default::default(),
            movies_id: Set(movie_id),
            genres_id: Set(genre_id),
        };
        movies_genres::Entity::insert(model).exec(&self.db).await?;
        Ok(())
    }

    /// Returns the number of rows touched; zero is not an error.
    pub async fn update_movie(&self, update: &MovieUpdate) -> AppResult<u64> {
        let res = movies::Entity::update_many()
            .col_expr(movies::Column::Title, Expr::value(update.title.clone()))
            .col_expr(movies::Column::Poster, Expr::value(update.poster.clone()))
            .col_expr(movies::Column::Description, Expr::value(update.description.clone()))
            .filter(movies::Column::Id.eq(update.id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let rows = genres::Entity::find().order_by_asc(genres::Column::Id).all(&self.db).await?;
        Ok(rows.into_iter().map(Genre::from).collect())
    }
}
