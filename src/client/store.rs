use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::models::{Genre, Movie, MovieDetail};

/// Three independent slices. Each is replaced whole by its action.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct CatalogState {
    pub movies: Vec<Movie>,
    pub genres: Vec<Genre>,
    pub movie_details: MovieDetail,
}

#[derive(Clone, Debug)]
pub enum Action {
    SetMovies(Vec<Movie>),
    SetGenres(Vec<Genre>),
    SetDetails(MovieDetail),
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetMovies(_) => "SET_MOVIES",
            Action::SetGenres(_) => "SET_GENRES",
            Action::SetDetails(_) => "SET_DETAILS",
        }
    }
}

impl CatalogState {
    pub fn reduce(&mut self, action: Action) {
        match action {
            Action::SetMovies(movies) => self.movies = movies,
            Action::SetGenres(genres) => self.genres = genres,
            Action::SetDetails(detail) => self.movie_details = detail,
        }
    }
}

/// Holds the current state. `apply` is the only way to change it.
#[derive(Clone)]
pub struct Store {
    tx: Arc<watch::Sender<CatalogState>>,
}

impl Store {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(CatalogState::default());
        Self { tx: Arc::new(tx) }
    }

    pub fn apply(&self, action: Action) {
        debug!(action = action.name(), "applying action");
        self.tx.send_modify(|state| state.reduce(action));
    }

    pub fn snapshot(&self) -> CatalogState {
        self.tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<CatalogState> {
        self.tx.subscribe()
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}
