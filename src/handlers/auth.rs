use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    db,
    error::AppError,
    session,
    validate::{validate_password, validate_username},
    AppState,
};

use super::bad_request;

const DEFAULT_REDIRECT: &str = "/jokes";

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(rename = "loginType")]
    pub login_type: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(rename = "redirectTo")]
    pub redirect_to: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginActionData {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<LoginFieldErrors>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<LoginFields>,
}

#[derive(Debug, Serialize)]
pub struct LoginFieldErrors {
    pub username: Option<&'static str>,
    pub password: Option<&'static str>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginFields {
    pub login_type: String,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginPageQuery {
    #[serde(rename = "redirectTo")]
    pub redirect_to: Option<String>,
}

/// `GET /login`: echoes the redirect target the form should carry through
/// its hidden field.
pub async fn login_page(Query(query): Query<LoginPageQuery>) -> Json<serde_json::Value> {
    Json(json!({
        "redirectTo": query.redirect_to.unwrap_or_else(|| DEFAULT_REDIRECT.to_string()),
    }))
}

/// `POST /login`: one form, two modes. The `loginType` radio picks between
/// logging into an existing account and registering a new one; both end in a
/// session cookie and a redirect.
pub async fn login_action(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let (Some(login_type), Some(username), Some(password)) =
        (form.login_type, form.username, form.password)
    else {
        return Ok(bad_request(LoginActionData {
            form_error: Some("Invalid form data submitted.".to_string()),
            ..Default::default()
        }));
    };

    let redirect_to = form
        .redirect_to
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_REDIRECT.to_string());

    let fields = LoginFields {
        login_type: login_type.clone(),
        username: username.clone(),
        password: password.clone(),
    };

    let field_errors = LoginFieldErrors {
        username: validate_username(&username),
        password: validate_password(&password),
    };
    if field_errors.username.is_some() || field_errors.password.is_some() {
        return Ok(bad_request(LoginActionData {
            field_errors: Some(field_errors),
            fields: Some(fields),
            ..Default::default()
        }));
    }

    match login_type.as_str() {
        "login" => {
            let Some(user) = session::login(&state.db, &username, &password).await? else {
                return Ok(bad_request(LoginActionData {
                    form_error: Some("Username/Password combination is incorrect".to_string()),
                    fields: Some(fields),
                    ..Default::default()
                }));
            };

            tracing::debug!("user {} logged in", user.username);
            Ok(session::create_user_session(&state.keys, jar, user.id, &redirect_to)?
                .into_response())
        }
        "register" => {
            if db::username_taken(&state.db, &username).await? {
                return Ok(bad_request(LoginActionData {
                    form_error: Some(format!("User {username} already exists")),
                    fields: Some(fields),
                    ..Default::default()
                }));
            }

            let user = session::register(&state.db, &username, &password).await?;
            tracing::info!("registered user {}", user.username);
            Ok(session::create_user_session(&state.keys, jar, user.id, &redirect_to)?
                .into_response())
        }
        _ => Ok(bad_request(LoginActionData {
            form_error: Some("Invalid login type".to_string()),
            fields: Some(fields),
            ..Default::default()
        })),
    }
}

/// `POST /logout`: clears the session cookie and sends the user back to the
/// login page.
pub async fn logout(jar: CookieJar) -> impl IntoResponse {
    session::destroy_session(jar)
}
