use super::common::{
    DeckResponse, GenerateFromOutlineRequest, GenerateOutlineRequest, OutlineResponse,
    outline_file_name, outline_prefix, ppt_file_name,
};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::error_response;
use crate::state::AppState;
use ai::slides::{self, OutlineRequest, pptx};
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::Local;
use common::format_validation_errors;
use util::files::list_files;
use util::paths::ensure_dir;
use validator::Validate;

fn new_request_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..8].to_string()
}

/// POST /api/teacher/ppt/generate_outline
///
/// Asks the model for a Markdown outline and saves it so it can be edited
/// and turned into a deck later.
///
/// ### Request Body
/// ```json
/// {
///   "title": "Newton's laws",
///   "subject": "Physics",
///   "target_grade": "Grade 8",
///   "teaching_target": "Understand the three laws of motion",
///   "key_points": ["inertia", "F = ma", "action and reaction"],
///   "slide_count": 8,
///   "additional_info": "Include a classroom experiment"
/// }
/// ```
///
/// ### Response
/// ```json
/// {
///   "success": true,
///   "data": {
///     "request_id": "a1b2c3d4",
///     "title": "Newton's laws",
///     "outline_md": "## Slide 1: Newton's laws\n..."
///   },
///   "message": "Outline generated successfully"
/// }
/// ```
pub async fn generate_outline(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<GenerateOutlineRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let request_id = new_request_id();
    let request: OutlineRequest = req.into();
    tracing::info!(
        target: "ppt_generator",
        teacher = %claims.account_id,
        request_id = %request_id,
        title = %request.title,
        slides = request.slide_count,
        "generating outline"
    );

    let outline_md = match slides::generate_outline(app_state.llm(), &request).await {
        Ok(md) => md,
        Err(e) => {
            tracing::error!(target: "ppt_generator", request_id = %request_id, error = %e, "outline generation failed");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to generate outline: {e}"),
            );
        }
    };

    let dir = match ensure_dir(app_state.storage().ppt_outlines_dir()) {
        Ok(dir) => dir,
        Err(e) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to prepare storage: {e}"),
            );
        }
    };
    let name = outline_file_name(
        &claims.account_id,
        &request_id,
        &request.title,
        Local::now().naive_local(),
    );
    if let Err(e) = tokio::fs::write(dir.join(&name), &outline_md).await {
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to save outline: {e}"),
        );
    }

    tracing::info!(target: "ppt_generator", file = %name, "outline saved");
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            OutlineResponse {
                request_id,
                title: request.title,
                outline_md,
            },
            "Outline generated successfully",
        )),
    )
        .into_response()
}

/// POST /api/teacher/ppt/generate_from_outline
///
/// Renders the (possibly edited) outline of an earlier request into a
/// `.pptx` file. The stored outline is replaced by the edited text.
///
/// ### Request Body
/// ```json
/// {
///   "request_id": "a1b2c3d4",
///   "title": "Newton's laws",
///   "outline_md": "## Slide 1: Newton's laws\n- Content: ...",
///   "design_preference": "modern"
/// }
/// ```
///
/// `design_preference`: `default`, `modern`, `warm` or `elegant`.
///
/// ### Responses
/// - `200 OK` `{ "title", "slides": [{ "title", "content", "note" }], "file_name" }`
/// - `400 Bad Request` the outline has no slides
/// - `404 Not Found` no outline with that `request_id` for the caller
pub async fn generate_from_outline(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<GenerateFromOutlineRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let storage = app_state.storage();
    let prefix = outline_prefix(&claims.account_id, &req.request_id);
    let outline = match list_files(&storage.ppt_outlines_dir(), |name| {
        name.starts_with(&prefix) && name.ends_with(".md")
    }) {
        Ok(files) => files.into_iter().next(),
        Err(e) => {
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to read outlines: {e}"),
            );
        }
    };
    let Some(outline) = outline else {
        return error_response(StatusCode::NOT_FOUND, "Outline not found");
    };

    let deck = slides::parse_outline(&req.outline_md, &req.title);
    if deck.slides.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "The outline contains no slides");
    }

    if let Err(e) = tokio::fs::write(&outline.path, &req.outline_md).await {
        tracing::warn!(target: "ppt_generator", file = %outline.name, error = %e, "could not update outline");
    }

    let file_name = ppt_file_name(&claims.account_id, &req.request_id, &req.title);
    let path = storage.ppt_files_dir().join(&file_name);
    let theme = slides::theme(req.design_preference.as_deref());
    if let Err(e) = pptx::write_deck(&deck, &theme, &path).await {
        tracing::error!(target: "ppt_generator", file = %file_name, error = %e, "deck rendering failed");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to build presentation: {e}"),
        );
    }

    tracing::info!(
        target: "ppt_generator",
        teacher = %claims.account_id,
        file = %file_name,
        slides = deck.slides.len(),
        "presentation generated"
    );
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            DeckResponse {
                title: deck.title,
                slides: deck.slides,
                file_name,
            },
            "Presentation generated successfully",
        )),
    )
        .into_response()
}
