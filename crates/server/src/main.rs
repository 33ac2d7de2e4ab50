use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use server_api::{home, home_route, result_route, show_result, FormMethod, Outcome, SearchForm};
use shared::error::{ApiError, ErrorCode};
use tower_http::limit::RequestBodyLimitLayer;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

mod app_state;
mod config;
mod session;
mod templates;

use app_state::AppState;
use config::load_settings;
use session::{load_session, session_cookie, Session, SessionConfig};
use templates::Templates;

/// The form has a single short field; anything bigger is not a browser.
const MAX_FORM_BYTES: usize = 16 * 1024;

type HttpError = (StatusCode, Json<ApiError>);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = load_settings()?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if settings.uses_default_secret() {
        warn!("using the built-in session secret; set APP__SESSION_SECRET before deploying");
    }

    let state = AppState {
        session: SessionConfig::from_settings(&settings),
        templates: Templates::new()?,
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind_addr '{}'", settings.bind_addr))?;
    info!(%addr, "server listening");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route(home_route(), get(show_form).post(submit_form))
        .route(result_route(), get(show_result_page))
        .layer(RequestBodyLimitLayer::new(MAX_FORM_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

async fn show_form(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let mut session = load_session(&state.session, &headers);
    let outcome = home(FormMethod::Get, &SearchForm::default(), &mut session.data);
    respond(&state, &session, outcome)
}

async fn submit_form(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    fields: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Result<Response, HttpError> {
    let Form(fields) = fields.map_err(|rejection| {
        debug!(%rejection, "unreadable form submission");
        (
            rejection.status(),
            Json(ApiError::new(ErrorCode::Validation, rejection.body_text())),
        )
    })?;

    let form = SearchForm::from_fields(fields);
    let mut session = load_session(&state.session, &headers);
    let outcome = home(FormMethod::Post, &form, &mut session.data);
    respond(&state, &session, outcome)
}

async fn show_result_page(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, HttpError> {
    let session = load_session(&state.session, &headers);
    let view = show_result(&session.data);
    respond(&state, &session, Outcome::Render(view))
}

fn respond(state: &AppState, session: &Session, outcome: Outcome) -> Result<Response, HttpError> {
    let mut response = match outcome {
        Outcome::Render(view) => {
            let html = state.templates.render(&view).map_err(internal)?;
            Html(html).into_response()
        }
        Outcome::Redirect(route) => Redirect::to(route).into_response(),
    };

    if session.data.is_modified() {
        let cookie = session_cookie(&state.session, session).map_err(internal)?;
        response.headers_mut().insert(header::SET_COOKIE, cookie);
        debug!(sid = %session.id, "session cookie issued");
    }

    Ok(response)
}

fn internal(err: impl std::fmt::Display) -> HttpError {
    error!(%err, "request failed");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ApiError::internal("internal server error")),
    )
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
