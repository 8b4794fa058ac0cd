#[cfg(test)]
mod tests {
    use crate::helpers::app::{json_body, json_request, make_test_app, seed_student, seed_teacher};
    use axum::{Router, http::StatusCode};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn create_course(app: &Router, token: &str, name: &str) -> Value {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/teacher/course/create",
                Some(token),
                Some(json!({
                    "name": name,
                    "description": "Lists, trees and graphs",
                    "semester": "2025-Spring",
                    "credit": 3.0,
                    "start_date": "2025-02-24",
                    "end_date": "2025-06-30"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        json_body(response).await["data"].clone()
    }

    #[tokio::test]
    async fn create_rejects_end_before_start() {
        let (app, state, _media) = make_test_app().await;
        let (_, token) = seed_teacher(state.db(), "T001").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/teacher/course/create",
                Some(&token),
                Some(json!({
                    "name": "Algebra",
                    "semester": "2025-Spring",
                    "start_date": "2025-06-01",
                    "end_date": "2025-05-01"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["message"], "End date cannot be earlier than start date");
    }

    #[tokio::test]
    async fn list_and_detail_are_scoped_to_owner() {
        let (app, state, _media) = make_test_app().await;
        let (_, owner) = seed_teacher(state.db(), "T001").await;
        let (_, other) = seed_teacher(state.db(), "T002").await;

        let created = create_course(&app, &owner, "Data Structures").await;
        let id = created["id"].as_i64().unwrap();
        assert_eq!(created["name"], "Data Structures");

        let response = app
            .clone()
            .oneshot(json_request("GET", "/api/teacher/course/list", Some(&other), None))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 0);

        let response = app
            .clone()
            .oneshot(json_request("GET", &format!("/api/teacher/course/{id}"), Some(&other), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .oneshot(json_request("GET", &format!("/api/teacher/course/{id}"), Some(&owner), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["semester"], "2025-Spring");
        assert_eq!(json["data"]["students"], json!([]));
    }

    #[tokio::test]
    async fn roster_add_and_remove() {
        let (app, state, _media) = make_test_app().await;
        let (_, token) = seed_teacher(state.db(), "T001").await;
        seed_student(state.db(), "S001").await;
        seed_student(state.db(), "S002").await;
        let id = create_course(&app, &token, "Data Structures").await["id"]
            .as_i64()
            .unwrap();
        let uri = format!("/api/teacher/course/{id}/students");

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &uri,
                Some(&token),
                Some(json!({ "student_ids": ["S001", "S002", "S999"] })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["added"], 2);
        assert_eq!(json["data"]["not_found"], json!(["S999"]));
        assert_eq!(json["message"], "Added 2 student(s)");

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &uri,
                Some(&token),
                Some(json!({ "student_ids": ["S001"] })),
            ))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"]["added"], 0);
        assert_eq!(json["data"]["already_enrolled"], json!(["S001"]));

        let response = app
            .clone()
            .oneshot(json_request(
                "DELETE",
                &uri,
                Some(&token),
                Some(json!({ "student_ids": ["S002"] })),
            ))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"]["removed"], 1);

        let response = app
            .oneshot(json_request("GET", &format!("/api/teacher/course/{id}"), Some(&token), None))
            .await
            .unwrap();
        let json = json_body(response).await;
        let roster = json["data"]["students"].as_array().unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0]["student_id"], "S001");
        assert_eq!(roster[0]["college"], "Engineering");
    }

    #[tokio::test]
    async fn update_checks_dates_against_stored_values() {
        let (app, state, _media) = make_test_app().await;
        let (_, token) = seed_teacher(state.db(), "T001").await;
        let id = create_course(&app, &token, "Data Structures").await["id"]
            .as_i64()
            .unwrap();
        let uri = format!("/api/teacher/course/{id}");

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &uri,
                Some(&token),
                Some(json!({ "end_date": "2025-01-01" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(json_request(
                "PUT",
                &uri,
                Some(&token),
                Some(json!({ "name": "Advanced Data Structures", "credit": 4.0 })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["name"], "Advanced Data Structures");
        assert_eq!(json["data"]["credit"], 4.0);
        assert_eq!(json["data"]["end_date"], "2025-06-30");
    }

    #[tokio::test]
    async fn delete_removes_course_and_material_dir() {
        let (app, state, _media) = make_test_app().await;
        let (_, token) = seed_teacher(state.db(), "T001").await;
        let id = create_course(&app, &token, "Data Structures").await["id"]
            .as_i64()
            .unwrap();
        let dir = state.storage().course_material_dir(id);
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("week1.pdf"), b"%PDF").unwrap();

        let response = app
            .clone()
            .oneshot(json_request("DELETE", &format!("/api/teacher/course/{id}"), Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!dir.exists());

        let response = app
            .oneshot(json_request("GET", &format!("/api/teacher/course/{id}"), Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
