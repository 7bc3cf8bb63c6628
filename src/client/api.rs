use serde::de::DeserializeOwned;

use crate::models::{Genre, Movie, MovieDetail, MovieUpdate, NewMovie};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to {path} failed: {source}")]
    Http {
        path: String,
        #[source]
        source: reqwest::Error,
    },
}

/// HTTP binding for the catalog routes. Any non-2xx answer is an error.
#[derive(Clone)]
pub struct CatalogApi {
    http: reqwest::Client,
    base_url: String,
}

impl CatalogApi {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self { http, base_url: base_url.into() }
    }

    pub async fn list_movies(&self) -> Result<Vec<Movie>, ClientError> {
        self.get_json("/api/movie").await
    }

    pub async fn movie_detail(&self, movie_id: i32) -> Result<MovieDetail, ClientError> {
        self.get_json(&format!("/api/movie/{movie_id}")).await
    }

    pub async fn list_genres(&self) -> Result<Vec<Genre>, ClientError> {
        self.get_json("/api/genre").await
    }

    pub async fn create_movie(&self, movie: &NewMovie) -> Result<(), ClientError> {
        let path = "/api/movie";
        let result = async {
            self.http.post(self.url(path)).json(movie).send().await?.error_for_status()?;
            Ok::<_, reqwest::Error>(())
        }
        .await;
        result.map_err(|source| ClientError::Http { path: path.to_string(), source })
    }

    pub async fn update_movie(&self, movie: &MovieUpdate) -> Result<(), ClientError> {
        let path = "/api/movie";
        let result = async {
            self.http.put(self.url(path)).json(movie).send().await?.error_for_status()?;
            Ok::<_, reqwest::Error>(())
        }
        .await;
        result.map_err(|source| ClientError::Http { path: path.to_string(), source })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let result = async {
            self.http.get(self.url(path)).send().await?.error_for_status()?.json::<T>().await
        }
        .await;
        result.map_err(|source| ClientError::Http { path: path.to_string(), source })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}
