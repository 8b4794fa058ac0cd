#[cfg(test)]
mod tests {
    use crate::helpers::app::{
        json_body, json_request, make_test_app, make_test_app_with_reply, seed_teacher,
    };
    use axum::http::{StatusCode, header};
    use db::models::{course, course_exercise_assignment, teacher};
    use sea_orm::EntityTrait;
    use serde_json::json;
    use tower::ServiceExt;

    const REPLY: &str = r#"Here you go:
[
  {"title": "Limits", "content": "lim x->0 sin(x)/x = ?", "type": 1,
   "options": ["0", "1", "inf", "undefined"], "answer": "B", "explanation": "Standard limit"},
  {"title": "Derivative", "content": "d/dx x^2 = ____", "type": "2", "answer": "2x"}
]
Good luck!"#;

    #[tokio::test]
    async fn generate_then_browse_and_delete() {
        let (app, state, _media) = make_test_app_with_reply(Some(REPLY)).await;
        let (_, token) = seed_teacher(state.db(), "T001").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/teacher/exercise_generator/generate",
                Some(&token),
                Some(json!({ "content": "Limits and derivatives", "title": "Calculus week 3", "count": 2 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["exercise_count"], 2);
        let md = json["data"]["md_filename"].as_str().unwrap().to_string();
        let json_name = json["data"]["json_filename"].as_str().unwrap().to_string();
        assert!(md.starts_with("teacher_T001_"));
        assert!(md.ends_with("_Calculus_week_3.md"));
        assert_eq!(json_name, md.replace(".md", ".json"));

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/teacher/exercise_generator/list?title_filter=CALCULUS",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["filename"], md.as_str());

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                &format!("/api/teacher/exercise_generator/file_md_content/{md}"),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let content = json["data"]["content"].as_str().unwrap();
        assert!(content.starts_with("# Calculus week 3 - Exercise Set"));
        assert!(content.contains("- B. 1"));

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                &format!("/api/teacher/exercise_generator/detail/{md}"),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"]["exercise_count"], 2);
        assert_eq!(json["data"]["exercises"][1]["type"], 2);
        assert_eq!(json["data"]["exercises"][1]["order"], 20);

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                &format!("/api/teacher/exercise_generator/download/{json_name}"),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");

        let response = app
            .clone()
            .oneshot(json_request(
                "DELETE",
                &format!("/api/teacher/exercise_generator/delete/{md}"),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!state.storage().exercises_md_dir().join(&md).exists());
        assert!(!state.storage().exercises_json_dir().join(&json_name).exists());
    }

    #[tokio::test]
    async fn other_teachers_files_are_forbidden() {
        let (app, state, _media) = make_test_app().await;
        let (_, token) = seed_teacher(state.db(), "T001").await;
        let md_dir = state.storage().exercises_md_dir();
        std::fs::write(md_dir.join("teacher_T002_20250101_000000_x.md"), "# x").unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/teacher/exercise_generator/file_md_content/teacher_T002_20250101_000000_x.md",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/teacher/exercise_generator/file_md_content/teacher_T001_notes.txt",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(json_request("GET", "/api/teacher/exercise_generator/list", Some(&token), None))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"], json!([]));
    }

    #[tokio::test]
    async fn dotted_titles_stay_readable_and_deletable() {
        let (app, state, _media) = make_test_app_with_reply(Some(REPLY)).await;
        let (_, token) = seed_teacher(state.db(), "T001").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/teacher/exercise_generator/generate",
                Some(&token),
                Some(json!({ "content": "Limits", "title": "Chapter 3.", "count": 2 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let md = json["data"]["md_filename"].as_str().unwrap().to_string();
        assert!(md.ends_with("_Chapter_3.md"));
        assert!(!md.contains(".."));

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                &format!("/api/teacher/exercise_generator/file_md_content/{md}"),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(json_request(
                "DELETE",
                &format!("/api/teacher/exercise_generator/delete/{md}"),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!state.storage().exercises_md_dir().join(&md).exists());
    }

    #[tokio::test]
    async fn renamed_teacher_follows_current_staff_id() {
        let (app, state, _media) = make_test_app_with_reply(Some(REPLY)).await;
        let (t, token) = seed_teacher(state.db(), "T001").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/teacher/exercise_generator/generate",
                Some(&token),
                Some(json!({ "content": "Limits", "title": "Private", "count": 2 })),
            ))
            .await
            .unwrap();
        let json = json_body(response).await;
        let md = json["data"]["md_filename"].as_str().unwrap().to_string();

        let changes = teacher::TeacherChanges {
            staff_id: Some("T009".into()),
            ..Default::default()
        };
        teacher::Model::apply_changes(state.db(), t.id, changes).await.unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                &format!("/api/teacher/exercise_generator/file_md_content/{md}"),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .clone()
            .oneshot(json_request("GET", "/api/teacher/exercise_generator/list", Some(&token), None))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"], json!([]));

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/teacher/exercise_generator/generate",
                Some(&token),
                Some(json!({ "content": "Limits", "title": "Again", "count": 2 })),
            ))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert!(json["data"]["md_filename"].as_str().unwrap().starts_with("teacher_T009_"));
    }

    #[tokio::test]
    async fn extensions_are_matched_exactly() {
        let (app, state, _media) = make_test_app().await;
        let (_, token) = seed_teacher(state.db(), "T001").await;
        let name = "teacher_T001_20250101_000000_x.MD";
        std::fs::write(state.storage().exercises_md_dir().join(name), "# x").unwrap();

        for (method, uri) in [
            ("GET", format!("/api/teacher/exercise_generator/detail/{name}")),
            ("DELETE", format!("/api/teacher/exercise_generator/delete/{name}")),
        ] {
            let response = app
                .clone()
                .oneshot(json_request(method, &uri, Some(&token), None))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test]
    async fn model_failure_is_a_server_error() {
        let (app, state, _media) = make_test_app_with_reply(None).await;
        let (_, token) = seed_teacher(state.db(), "T001").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/teacher/exercise_generator/generate",
                Some(&token),
                Some(json!({ "content": "Anything" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = json_body(response).await;
        assert!(json["message"].as_str().unwrap().starts_with("Failed to generate exercises"));
    }

    #[tokio::test]
    async fn save_assignment_into_own_course() {
        let (app, state, _media) = make_test_app().await;
        let db = state.db();
        let (teacher, token) = seed_teacher(db, "T001").await;
        let course = course::Model::create(
            db,
            teacher.id,
            course::NewCourse {
                name: "Calculus".to_string(),
                semester: "2025-Spring".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let exercises = json!([
            { "title": "Q1", "content": "1+1", "type": 2, "answer": "2", "order": 0, "score": 5.0 },
            { "title": "Q2", "content": "Pick one", "type": 1, "options": ["a", "b"], "answer": "A" }
        ]);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/teacher/exercise_generator/save_assignment",
                Some(&token),
                Some(json!({
                    "title": "Week 1",
                    "course_id": course.id,
                    "exercises_data": exercises,
                    "start_time": "2025-03-01T08:00:00Z",
                    "due_time": "2025-03-01T08:00:00Z"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/teacher/exercise_generator/save_assignment",
                Some(&token),
                Some(json!({
                    "title": "Week 1",
                    "course_id": course.id,
                    "exercises_data": exercises,
                    "start_time": "2025-03-01T08:00:00Z"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert_eq!(json["data"]["exercise_count"], 2);

        let id = json["data"]["assignment_id"].as_i64().unwrap();
        let assignment = course_exercise_assignment::Entity::find_by_id(id)
            .one(db)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(assignment.course_id, course.id);
        assert_eq!((assignment.due_time - assignment.start_time).num_days(), 7);
        let saved = assignment.exercises(db).await.unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0].sort_order, 10);
    }
}
