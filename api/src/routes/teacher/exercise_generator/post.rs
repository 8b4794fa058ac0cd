use super::common::{GenerateRequest, GenerateResponse, SaveAssignmentRequest, SavedAssignment};
use crate::auth::AuthUser;
use crate::response::ApiResponse;
use crate::routes::common::{db_error, error_response, owned_course};
use crate::state::AppState;
use ai::exercises::{self, Exercise, ExerciseRequest};
use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{Duration, Local, Utc};
use common::format_validation_errors;
use db::models::course_exercise::{ExerciseType, NewExercise};
use db::models::course_exercise_assignment::{self, NewAssignment};
use util::files::{owner_prefix, sanitize_title};
use validator::Validate;

fn file_name(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

/// POST /api/teacher/exercise_generator/generate
///
/// Asks the model for a set of exercises on the supplied material and
/// stores it as Markdown and JSON.
///
/// ### Request Body
/// ```json
/// {
///   "content": "Limits and continuity of single-variable functions",
///   "title": "Calculus week 3",
///   "count": 5,
///   "types": [1, 2]
/// }
/// ```
///
/// `types`: 1 multiple choice, 2 fill in the blank, 3 short answer.
///
/// ### Response
/// ```json
/// {
///   "success": true,
///   "data": {
///     "md_filename": "teacher_T001_20250301_101500_Calculus_week_3.md",
///     "json_filename": "teacher_T001_20250301_101500_Calculus_week_3.json",
///     "exercise_count": 5
///   },
///   "message": "Exercises generated successfully"
/// }
/// ```
///
/// A reply that cannot be decoded still writes the files, with zero
/// exercises. A failed model request returns `500`.
pub async fn generate(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<GenerateRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let title = req.title().to_string();
    let base_name = format!(
        "{}{}_{}",
        owner_prefix(&claims.account_id),
        Local::now().format("%Y%m%d_%H%M%S"),
        sanitize_title(&title)
    );
    let request = ExerciseRequest {
        content: req.content.clone(),
        title: title.clone(),
        count: req.count,
        kinds: req.kinds(),
    };

    tracing::info!(
        target: "exercise_generator",
        teacher = %claims.account_id,
        title = %title,
        count = req.count,
        "generating exercises"
    );

    let storage = app_state.storage();
    let set = match exercises::generate(
        app_state.llm(),
        &request,
        &storage.exercises_md_dir(),
        &storage.exercises_json_dir(),
        &base_name,
    )
    .await
    {
        Ok(set) => set,
        Err(e) => {
            tracing::error!(target: "exercise_generator", error = %e, "exercise generation failed");
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to generate exercises: {e}"),
            );
        }
    };

    tracing::info!(
        target: "exercise_generator",
        teacher = %claims.account_id,
        file = %base_name,
        exercises = set.exercises.len(),
        "exercises saved"
    );

    let response = GenerateResponse {
        md_filename: file_name(&set.md_path),
        json_filename: file_name(&set.json_path),
        exercise_count: set.exercises.len(),
    };
    (
        StatusCode::OK,
        Json(ApiResponse::success(response, "Exercises generated successfully")),
    )
        .into_response()
}

fn to_new_exercise(index: usize, exercise: Exercise) -> Result<NewExercise, String> {
    let exercise_type = ExerciseType::try_from(exercise.exercise_type)?;
    let sort_order = if exercise.order > 0 {
        exercise.order
    } else {
        (index as i32 + 1) * 10
    };
    Ok(NewExercise {
        title: exercise.title,
        content: exercise.content,
        answer: exercise.answer,
        explanation: exercise.explanation,
        exercise_type,
        score: exercise.score,
        sort_order,
        options: exercise.options.map(|o| serde_json::json!(o)),
    })
}

/// POST /api/teacher/exercise_generator/save_assignment
///
/// Persists (possibly edited) generated exercises as an assignment of one
/// of the caller's courses.
///
/// ### Request Body
/// ```json
/// {
///   "title": "Week 3 practice",
///   "description": "Limits",
///   "course_id": 1,
///   "exercises_data": [
///     {
///       "title": "Question 1",
///       "content": "lim x->0 sin(x)/x = ?",
///       "type": 1,
///       "options": ["A. 0", "B. 1", "C. ∞", "D. undefined"],
///       "answer": "B",
///       "explanation": "Standard limit",
///       "order": 10,
///       "score": 10
///     }
///   ],
///   "total_score": 100,
///   "is_published": false
/// }
/// ```
///
/// `start_time` defaults to now and `due_time` to seven days later.
///
/// - `201 Created` `{ "assignment_id": 7, "exercise_count": 1 }`
/// - `400 Bad Request` validation failure, unknown exercise type, or due
///   time not after start time
/// - `404 Not Found` missing or foreign course
pub async fn save_assignment(
    State(app_state): State<AppState>,
    Extension(AuthUser(claims)): Extension<AuthUser>,
    Json(req): Json<SaveAssignmentRequest>,
) -> impl IntoResponse {
    if let Err(e) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, format_validation_errors(&e));
    }

    let db = app_state.db();
    let course = match owned_course(db, req.course_id, claims.sub).await {
        Ok(course) => course,
        Err(response) => return response,
    };

    let start_time = req.start_time.unwrap_or_else(Utc::now);
    let due_time = req.due_time.unwrap_or(start_time + Duration::days(7));
    if due_time <= start_time {
        return error_response(
            StatusCode::BAD_REQUEST,
            "due_time must be after start_time",
        );
    }

    let mut new_exercises = Vec::with_capacity(req.exercises_data.len());
    for (i, exercise) in req.exercises_data.into_iter().enumerate() {
        match to_new_exercise(i, exercise) {
            Ok(e) => new_exercises.push(e),
            Err(msg) => return error_response(StatusCode::BAD_REQUEST, msg),
        }
    }

    let new = NewAssignment {
        title: req.title,
        description: req.description,
        total_score: req.total_score,
        start_time,
        due_time,
        is_published: req.is_published,
        course_id: course.id,
        creator_id: claims.sub,
    };

    match course_exercise_assignment::Model::create_with_exercises(db, new, new_exercises).await {
        Ok((assignment, saved)) => {
            tracing::info!(
                target: "exercise_generator",
                course_id = course.id,
                assignment_id = assignment.id,
                exercises = saved.len(),
                "assignment saved"
            );
            (
                StatusCode::CREATED,
                Json(ApiResponse::success(
                    SavedAssignment {
                        assignment_id: assignment.id,
                        exercise_count: saved.len(),
                    },
                    "Assignment saved successfully",
                )),
            )
                .into_response()
        }
        Err(e) => db_error(e),
    }
}
