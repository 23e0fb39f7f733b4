use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    db,
    error::AppError,
    models::joke::Joke,
    session,
    validate::{validate_joke_content, validate_joke_name},
    AppState,
};

use super::bad_request;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomJokeData {
    pub random_joke: Joke,
}

/// `GET /jokes`: one joke picked uniformly at random.
pub async fn random_joke(State(state): State<AppState>) -> Result<Json<RandomJokeData>, AppError> {
    let count = db::joke_count(&state.db).await?;
    if count == 0 {
        return Err(AppError::NotFound(
            "No jokes to tell. Submit your own!".to_string(),
        ));
    }

    let offset = rand::thread_rng().gen_range(0..count);

    // The count can go stale under concurrent deletes, in which case the
    // offset lands past the end and the fetch comes back empty.
    let joke = db::joke_at_offset(&state.db, offset)
        .await?
        .ok_or_else(|| AppError::NotFound("No jokes to tell. Submit your own!".to_string()))?;

    Ok(Json(RandomJokeData { random_joke: joke }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JokeDetailData {
    pub joke: Joke,
    pub is_owner: bool,
}

/// `GET /jokes/:id`: the joke plus whether the caller owns it, so the view
/// can show the delete control.
pub async fn joke_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
) -> Result<Json<JokeDetailData>, AppError> {
    let user_id = session::get_user_id(&state.keys, &jar);

    let joke = db::find_joke(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("What a joke! Not found.".to_string()))?;

    let is_owner = match (user_id, joke.jokester_id) {
        (Some(user_id), Some(jokester_id)) => user_id == jokester_id,
        _ => false,
    };

    Ok(Json(JokeDetailData { joke, is_owner }))
}

#[derive(Debug, Deserialize)]
pub struct JokeActionForm {
    #[serde(rename = "_method")]
    pub method: Option<String>,
}

/// `POST /jokes/:id`: delete, reachable only through the `_method=delete`
/// override field. The joke is re-fetched first; it may have vanished since
/// the page was rendered.
pub async fn joke_action(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    jar: CookieJar,
    Form(form): Form<JokeActionForm>,
) -> Result<Response, AppError> {
    if form.method.as_deref() != Some("delete") {
        return Ok(bad_request(json!({
            "formError": "Invalid form data submitted.",
        })));
    }

    let user_id = session::require_user_id(&state.keys, &jar)?;

    let joke = db::find_joke(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Joke to delete! Not found.".to_string()))?;

    if joke.jokester_id != Some(user_id) {
        return Err(AppError::NotOwner);
    }

    db::delete_joke(&state.db, id).await?;
    tracing::debug!("user {} deleted joke {}", user_id, id);

    Ok(Redirect::to("/jokes").into_response())
}

#[derive(Debug, Deserialize)]
pub struct NewJokeForm {
    pub name: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewJokeActionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<JokeFieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<JokeFields>,
}

#[derive(Debug, Serialize)]
pub struct JokeFieldErrors {
    pub name: Option<&'static str>,
    pub content: Option<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct JokeFields {
    pub name: String,
    pub content: String,
}

/// `GET /jokes/new`: the submission form. Viewing it already requires a
/// login, not just submitting.
pub async fn new_joke_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<Json<NewJokeActionData>, AppError> {
    session::require_user_id(&state.keys, &jar)?;
    Ok(Json(NewJokeActionData::default()))
}

/// `POST /jokes/new`: validates and creates, then redirects to the new
/// joke's detail page.
pub async fn create_joke(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<NewJokeForm>,
) -> Result<Response, AppError> {
    let user_id = session::require_user_id(&state.keys, &jar)?;

    let (Some(name), Some(content)) = (form.name, form.content) else {
        return Ok(bad_request(NewJokeActionData {
            form_error: Some("Invalid form data submitted.".to_string()),
            ..Default::default()
        }));
    };

    let field_errors = JokeFieldErrors {
        name: validate_joke_name(&name),
        content: validate_joke_content(&content),
    };
    if field_errors.name.is_some() || field_errors.content.is_some() {
        return Ok(bad_request(NewJokeActionData {
            field_errors: Some(field_errors),
            fields: Some(JokeFields { name, content }),
            ..Default::default()
        }));
    }

    let joke = db::create_joke(&state.db, &name, &content, user_id).await?;
    tracing::debug!("user {} created joke {}", user_id, joke.id);

    Ok(Redirect::to(&format!("/jokes/{}", joke.id)).into_response())
}
