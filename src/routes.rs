use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{
    handlers::{auth, jokes},
    AppState,
};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/jokes", get(jokes::random_joke))
        .route("/jokes/new", get(jokes::new_joke_page).post(jokes::create_joke))
        .route("/jokes/:id", get(jokes::joke_detail).post(jokes::joke_action))
        .route("/login", get(auth::login_page).post(auth::login_action))
        .route("/logout", post(auth::logout))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
