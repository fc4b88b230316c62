//! HTTP API exposing the translations, card templates, courses and the record endpoints.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::services::{ServeDir, ServeFile};

use crate::cards::{shape_presets, CardRenderer, Side, TemplateCatalog, TemplateCategory};
use crate::config::{MainConfig, Site};
use crate::courses::{CourseCard, CourseCatalog, CourseFilter};
use crate::debug;
use crate::error::*;
use crate::forms::{whatsapp_link, ContactForm};
use crate::i18n::{dictionary, DocumentAttributes, Lang};
use crate::log::{self, debug_message};
use crate::records::{ContactRequest, DonationRequest, JsonArrayStore};

const DONATION_INVALID: &str = "Missing or invalid donation fields.";
const DONATION_FAILED: &str = "Unable to record donation. Please try again later.";
const CONTACT_INVALID: &str = "Missing or invalid contact fields.";
const CONTACT_FAILED: &str = "Unable to record your message. Please try again later.";

#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<TemplateCatalog>,
    pub courses: Arc<CourseCatalog>,
    pub renderer: Arc<CardRenderer>,
    pub donations: Arc<JsonArrayStore>,
    pub contacts: Arc<JsonArrayStore>,
    pub site: Arc<Site>,
    pub web_dir: Option<PathBuf>,
}

impl AppState {
    pub fn new(config: &MainConfig) -> Result<Self> {
        Ok(AppState {
            catalog: Arc::new(TemplateCatalog::builtin()?),
            courses: Arc::new(CourseCatalog::builtin()?),
            renderer: Arc::new(CardRenderer::new()?),
            donations: Arc::new(JsonArrayStore::new(config.storage.donations_path()?)),
            contacts: Arc::new(JsonArrayStore::new(config.storage.contacts_path()?)),
            site: Arc::new(config.site.clone()),
            web_dir: config.server.web_dir()?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct TranslationsResponse {
    #[serde(flatten)]
    pub attributes: DocumentAttributes,
    pub strings: BTreeMap<&'static str, &'static str>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub whatsapp: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TemplateQuery {
    pub category: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SideQuery {
    pub side: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CourseQuery {
    pub category: Option<String>,
    pub lang: Option<String>,
}

fn error_response<S: Into<String>>(status: StatusCode, error: S) -> Response {
    (status, Json(ErrorResponse { error: error.into() })).into_response()
}

/// Maps a library error to a response, keeping caller mistakes apart from internal failures.
fn failure(error: Error) -> Response {
    match error {
        Error::TemplateNotFound(_) => error_response(StatusCode::NOT_FOUND, error.to_string()),
        _ if error.is_client_error() => error_response(StatusCode::BAD_REQUEST, error.to_string()),
        _ => {
            log::warn(debug_message("Request failed", format!(": {}", error)));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
        }
    }
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn translations(Path(code): Path<String>) -> Response {
    match code.parse::<Lang>() {
        Ok(lang) => Json(TranslationsResponse {
            attributes: DocumentAttributes::for_language(lang),
            strings: dictionary(lang),
        })
        .into_response(),
        Err(e) => error_response(StatusCode::NOT_FOUND, e.to_string()),
    }
}

pub async fn list_templates(
    State(state): State<AppState>,
    Query(query): Query<TemplateQuery>,
) -> Response {
    match query.category.as_deref().filter(|c| !c.trim().is_empty()) {
        None => Json(state.catalog.all()).into_response(),
        Some(category) => match category.parse::<TemplateCategory>() {
            Ok(category) => Json(state.catalog.by_category(category)).into_response(),
            Err(e) => failure(e),
        },
    }
}

pub async fn get_template(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.catalog.get(&id) {
        Some(template) => Json(template).into_response(),
        None => failure(Error::TemplateNotFound(id)),
    }
}

pub async fn render_template(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<SideQuery>,
) -> Response {
    let side = match query.side.as_deref().map(str::parse::<Side>).transpose() {
        Ok(side) => side.unwrap_or(Side::Front),
        Err(e) => return failure(e),
    };
    let Some(template) = state.catalog.get(&id) else {
        return failure(Error::TemplateNotFound(id));
    };
    match state.renderer.render(template, side) {
        Ok(svg) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "image/svg+xml")],
            svg,
        )
            .into_response(),
        Err(e) => failure(e),
    }
}

pub async fn list_shapes() -> Response {
    Json(shape_presets()).into_response()
}

pub async fn list_courses(
    State(state): State<AppState>,
    Query(query): Query<CourseQuery>,
) -> Response {
    let filter = match query.category.as_deref() {
        Some(category) => match category.parse::<CourseFilter>() {
            Ok(filter) => filter,
            Err(e) => return failure(e),
        },
        None => CourseFilter::All,
    };
    let lang = match query.lang.as_deref().map(str::parse::<Lang>).transpose() {
        Ok(lang) => lang.unwrap_or(state.site.default_language),
        Err(e) => return failure(e),
    };
    let cards: Vec<CourseCard> = state
        .courses
        .filter(filter)
        .into_iter()
        .map(|course| CourseCard::new(course, lang))
        .collect();
    Json(cards).into_response()
}

/// Appends `record` to `store` on the blocking thread pool.
async fn append_record<T>(store: Arc<JsonArrayStore>, record: T) -> Result<usize>
where
    T: Serialize + Send + 'static,
{
    tokio::task::spawn_blocking(move || store.append(&record))
        .await
        .map_err(|e| Error::Msg(format!("record task failed: {}", e)))?
}

pub async fn donate(State(state): State<AppState>, body: Bytes) -> Response {
    let donation = match serde_json::from_slice::<DonationRequest>(&body)
        .map_err(Error::from)
        .and_then(DonationRequest::validate)
    {
        Ok(donation) => donation,
        Err(e) => {
            debug!("Rejected donation: {}", e);
            return error_response(StatusCode::BAD_REQUEST, DONATION_INVALID);
        }
    };
    match append_record(state.donations.clone(), donation).await {
        Ok(count) => {
            debug!("Stored donation #{} in {}", count, state.donations.path().display());
            Json(SubmissionResponse {
                success: true,
                whatsapp: None,
            })
            .into_response()
        }
        Err(e) => {
            log::warn(debug_message(
                "Failed to record donation",
                format!(": {}", e),
            ));
            error_response(StatusCode::INTERNAL_SERVER_ERROR, DONATION_FAILED)
        }
    }
}

pub async fn contact(State(state): State<AppState>, body: Bytes) -> Response {
    let message = match serde_json::from_slice::<ContactRequest>(&body)
        .map_err(Error::from)
        .and_then(ContactRequest::validate)
    {
        Ok(message) => message,
        Err(e) => {
            debug!("Rejected contact message: {}", e);
            return error_response(StatusCode::BAD_REQUEST, CONTACT_INVALID);
        }
    };
    if let Err(e) = append_record(state.contacts.clone(), message.clone()).await {
        log::warn(debug_message(
            "Failed to record contact message",
            format!(": {}", e),
        ));
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, CONTACT_FAILED);
    }
    match whatsapp_link(
        &state.site.whatsapp_primary,
        Some(&ContactForm::from(&message).message()),
    ) {
        Ok(link) => Json(SubmissionResponse {
            success: true,
            whatsapp: Some(link.to_string()),
        })
        .into_response(),
        Err(e) => failure(e),
    }
}

pub fn router(state: AppState) -> Router {
    let mut router = Router::new()
        .route("/health", get(health))
        .route("/api/i18n/{lang}", get(translations))
        .route("/api/templates", get(list_templates))
        .route("/api/templates/{id}", get(get_template))
        .route("/api/templates/{id}/svg", get(render_template))
        .route("/api/shapes", get(list_shapes))
        .route("/api/courses", get(list_courses))
        .route("/api/donate", post(donate))
        .route("/api/contact", post(contact));

    // Unknown paths fall back to the single page app
    if let Some(ref web_dir) = state.web_dir {
        debug!("Serving static files from: {}", web_dir.display());
        router = router.fallback_service(
            ServeDir::new(web_dir).fallback(ServeFile::new(web_dir.join("index.html"))),
        );
    }

    router.with_state(state)
}

/// Binds the configured address and serves the API until the process is stopped.
pub async fn serve(config: &MainConfig) -> Result<()> {
    let app = router(AppState::new(config)?);
    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address).await?;
    eprintln!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
