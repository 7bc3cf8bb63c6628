use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::{
    client::{
        api::CatalogApi,
        store::{Action, Store},
    },
    models::{MovieUpdate, NewMovie},
};

const HOME: &str = "/";
const MOVIE_ADDED: &str = "Movie added to list! Returning to Home page";
const ADD_FAILED: &str = "Failed to add movie. Please try again.";
const EDIT_FAILED: &str = "Failed to edit movie. Please try again.";

/// Moves the presentation layer to another view.
pub trait Navigator: Send + Sync {
    fn push(&self, path: &str);
}

/// Shows a message to the user.
pub trait Notifier: Send + Sync {
    fn alert(&self, message: &str);
}

pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn alert(&self, message: &str) {
        info!(message, "user notice");
    }
}

pub enum Intent {
    FetchMovieList,
    FetchMovieDetails { id: i32 },
    FetchGenres,
    PostNewMovie { data: NewMovie, nav: Arc<dyn Navigator> },
    UpdateMovie { data: MovieUpdate, nav: Arc<dyn Navigator> },
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::FetchMovieList => "FETCH_MOVIE_LIST",
            Intent::FetchMovieDetails { .. } => "FETCH_MOVIE_DETAILS",
            Intent::FetchGenres => "FETCH_GENRES",
            Intent::PostNewMovie { .. } => "POST_NEW_MOVIE",
            Intent::UpdateMovie { .. } => "UPDATE_MOVIE",
        }
    }
}

/// Runs every dispatched intent as its own task. Tasks never share state
/// except through `Store::apply`; two fetches of the same kind race and the
/// last one to resolve wins.
#[derive(Clone)]
pub struct Orchestrator {
    api: CatalogApi,
    store: Store,
    notifier: Arc<dyn Notifier>,
}

impl Orchestrator {
    pub fn new(api: CatalogApi, store: Store, notifier: Arc<dyn Notifier>) -> Self {
        Self { api, store, notifier }
    }

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn dispatch(&self, intent: Intent) -> JoinHandle<()> {
        debug!(intent = intent.name(), "dispatching intent");
        let this = self.clone();
        tokio::spawn(async move { this.run(intent).await })
    }

    async fn run(&self, intent: Intent) {
        match intent {
            Intent::FetchMovieList => match self.api.list_movies().await {
                Ok(movies) => self.store.apply(Action::SetMovies(movies)),
                Err(err) => warn!(error = %err, "failed to fetch movie list"),
            },
            Intent::FetchMovieDetails { id } => match self.api.movie_detail(id).await {
                Ok(detail) => self.store.apply(Action::SetDetails(detail)),
                Err(err) => warn!(movie_id = id, error = %err, "failed to fetch movie details"),
            },
            Intent::FetchGenres => match self.api.list_genres().await {
                Ok(genres) => self.store.apply(Action::SetGenres(genres)),
                Err(err) => warn!(error = %err, "failed to fetch genres"),
            },
            Intent::PostNewMovie { data, nav } => match self.api.create_movie(&data).await {
                Ok(()) => {
                    self.notifier.alert(MOVIE_ADDED);
                    nav.push(HOME);
                },
                Err(err) => {
                    warn!(title = %data.title, error = %err, "failed to add movie");
                    self.notifier.alert(ADD_FAILED);
                },
            },
            Intent::UpdateMovie { data, nav } => match self.api.update_movie(&data).await {
                Ok(()) => nav.push(HOME),
                Err(err) => {
                    warn!(movie_id = data.id, error = %err, "failed to edit movie");
                    self.notifier.alert(EDIT_FAILED);
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::{AppState, catalog::Catalog, client::store::CatalogState, db, models::MovieDetail};

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn events(&self) -> Vec<String> {
            self.events.lock().unwrap().clone()
        }
    }

    impl Navigator for Recorder {
        fn push(&self, path: &str) {
            self.events.lock().unwrap().push(format!("nav {path}"));
        }
    }

    impl Notifier for Recorder {
        fn alert(&self, message: &str) {
            self.events.lock().unwrap().push(format!("alert {message}"));
        }
    }

    async fn serve() -> (String, Catalog) {
        let db = db::connect_and_migrate("sqlite::memory:", 1).await.unwrap();
        let catalog = Catalog::new(db);
        let app = crate::router(Arc::new(AppState { catalog: catalog.clone() }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });
        (format!("http://{addr}"), catalog)
    }

    /// An address nothing listens on.
    async fn dead_url() -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}")
    }

    fn orchestrator(base_url: String) -> (Orchestrator, Arc<Recorder>) {
        let recorder = Arc::new(Recorder::default());
        let api = CatalogApi::new(reqwest::Client::new(), base_url);
        (Orchestrator::new(api, Store::new(), recorder.clone()), recorder)
    }

    fn new_movie(genre_id: i32) -> NewMovie {
        NewMovie {
            title: "Dune".to_string(),
            poster: "p.jpg".to_string(),
            description: "desc".to_string(),
            genre_id,
        }
    }

    #[tokio::test]
    async fn test_fetch_movie_list() {
        let (url, catalog) = serve().await;
        catalog.insert_movie(&new_movie(3)).await.unwrap();
        let (orch, _) = orchestrator(url);

        orch.dispatch(Intent::FetchMovieList).await.unwrap();

        let state = orch.store().snapshot();
        assert_eq!(state.movies.len(), 1);
        assert_eq!(state.movies[0].title, "Dune");
    }

    #[tokio::test]
    async fn test_fetch_genres() {
        let (url, _) = serve().await;
        let (orch, _) = orchestrator(url);

        orch.dispatch(Intent::FetchGenres).await.unwrap();

        let genres = orch.store().snapshot().genres;
        assert_eq!(genres.len(), 13);
        assert_eq!(genres[0].name, "Adventure");
    }

    #[tokio::test]
    async fn test_fetch_movie_details() {
        let (url, catalog) = serve().await;
        let id = catalog.insert_movie(&new_movie(3)).await.unwrap();
        catalog.link_genre(id, 3).await.unwrap();
        let (orch, _) = orchestrator(url);

        orch.dispatch(Intent::FetchMovieDetails { id }).await.unwrap();

        let detail = orch.store().snapshot().movie_details;
        assert_eq!(detail.movie_details.unwrap().title, "Dune");
        assert_eq!(detail.movie_genres.len(), 1);
        assert_eq!(detail.movie_genres[0].name, "Biographical");
    }

    #[tokio::test]
    async fn test_fetch_details_of_missing_movie() {
        let (url, _) = serve().await;
        let (orch, _) = orchestrator(url);

        orch.dispatch(Intent::FetchMovieDetails { id: 77 }).await.unwrap();

        let detail = orch.store().snapshot().movie_details;
        assert_eq!(detail, MovieDetail { movie_details: None, movie_genres: vec![] });
    }

    #[tokio::test]
    async fn test_failed_fetches_leave_state_alone() {
        let (orch, recorder) = orchestrator(dead_url().await);

        orch.dispatch(Intent::FetchMovieList).await.unwrap();
        orch.dispatch(Intent::FetchGenres).await.unwrap();
        orch.dispatch(Intent::FetchMovieDetails { id: 1 }).await.unwrap();

        assert_eq!(orch.store().snapshot(), CatalogState::default());
        assert!(recorder.events().is_empty());
    }

    #[tokio::test]
    async fn test_post_new_movie() {
        let (url, catalog) = serve().await;
        let (orch, recorder) = orchestrator(url);

        orch.dispatch(Intent::PostNewMovie { data: new_movie(3), nav: recorder.clone() })
            .await
            .unwrap();

        assert_eq!(recorder.events(), [format!("alert {MOVIE_ADDED}"), "nav /".to_string()]);
        assert_eq!(catalog.list_movies().await.unwrap().len(), 1);
        assert!(orch.store().snapshot().movies.is_empty());
    }

    #[tokio::test]
    async fn test_post_new_movie_failure() {
        let (url, _) = serve().await;
        let (orch, recorder) = orchestrator(url);

        orch.dispatch(Intent::PostNewMovie { data: new_movie(9_999), nav: recorder.clone() })
            .await
            .unwrap();

        assert_eq!(recorder.events(), [format!("alert {ADD_FAILED}")]);
    }

    #[tokio::test]
    async fn test_update_movie() {
        let (url, catalog) = serve().await;
        let id = catalog.insert_movie(&new_movie(3)).await.unwrap();
        let (orch, recorder) = orchestrator(url);

        let data = MovieUpdate {
            id,
            title: "Dune: Part Two".to_string(),
            poster: "p2.jpg".to_string(),
            description: "desc".to_string(),
        };
        orch.dispatch(Intent::UpdateMovie { data, nav: recorder.clone() }).await.unwrap();

        assert_eq!(recorder.events(), ["nav /"]);
        assert_eq!(catalog.find_movie(id).await.unwrap().unwrap().title, "Dune: Part Two");
    }

    #[tokio::test]
    async fn test_log_notifier_stands_in_for_alerts() {
        let (url, catalog) = serve().await;
        let api = CatalogApi::new(reqwest::Client::new(), url);
        let orch = Orchestrator::new(api, Store::new(), Arc::new(LogNotifier));
        let nav = Arc::new(Recorder::default());

        orch.dispatch(Intent::PostNewMovie { data: new_movie(9_999), nav: nav.clone() })
            .await
            .unwrap();
        assert!(nav.events().is_empty());

        orch.dispatch(Intent::PostNewMovie { data: new_movie(2), nav: nav.clone() })
            .await
            .unwrap();
        assert_eq!(nav.events(), ["nav /"]);
        assert_eq!(catalog.list_movies().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_movie_failure() {
        let (orch, recorder) = orchestrator(dead_url().await);

        let data = MovieUpdate {
            id: 1,
            title: "x".to_string(),
            poster: "x".to_string(),
            description: "x".to_string(),
        };
        orch.dispatch(Intent::UpdateMovie { data, nav: recorder.clone() }).await.unwrap();

        assert_eq!(recorder.events(), [format!("alert {EDIT_FAILED}")]);
    }

    #[tokio::test]
    async fn test_concurrent_detail_fetches_settle_on_one() {
        let (url, catalog) = serve().await;
        let first = catalog.insert_movie(&new_movie(3)).await.unwrap();
        let second = catalog
            .insert_movie(&NewMovie { title: "Arrival".to_string(), ..new_movie(11) })
            .await
            .unwrap();
        let (orch, _) = orchestrator(url);

        let a = orch.dispatch(Intent::FetchMovieDetails { id: first });
        let b = orch.dispatch(Intent::FetchMovieDetails { id: second });
        let (a, b) = tokio::join!(a, b);
        a.unwrap();
        b.unwrap();

        let title = orch.store().snapshot().movie_details.movie_details.unwrap().title;
        assert!(title == "Dune" || title == "Arrival");
    }
}
