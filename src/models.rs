use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};

use crate::entities::{genres, movies};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: i32,
    pub title: String,
    pub poster: String,
    pub description: String,
}

impl From<movies::Model> for Movie {
    fn from(m: movies::Model) -> Self {
        Self { id: m.id, title: m.title, poster: m.poster, description: m.description }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i32,
    pub name: String,
}

impl From<genres::Model> for Genre {
    fn from(g: genres::Model) -> Self {
        Self { id: g.id, name: g.name }
    }
}

/// A junction row joined with its genre; `id` is the genre's id.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize, FromQueryResult)]
pub struct MovieGenre {
    pub id: i32,
    pub movies_id: i32,
    pub genres_id: i32,
    pub name: String,
}

/// Payload of `GET /api/movie/:id`. `movieDetails` is left out of the JSON
/// when no movie row matched.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub movie_details: Option<Movie>,
    #[serde(default)]
    pub movie_genres: Vec<MovieGenre>,
}

impl Default for MovieDetail {
    fn default() -> Self {
        Self {
            movie_details: Some(Movie {
                id: 0,
                title: "Movie Title".to_string(),
                poster: "poster path".to_string(),
                description: "movie description".to_string(),
            }),
            movie_genres: vec![MovieGenre {
                id: 0,
                movies_id: 0,
                genres_id: 0,
                name: "genre name".to_string(),
            }],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub poster: String,
    pub description: String,
    pub genre_id: i32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MovieUpdate {
    pub id: i32,
    pub title: String,
    pub poster: String,
    pub description: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Created {
    pub id: i32,
}
