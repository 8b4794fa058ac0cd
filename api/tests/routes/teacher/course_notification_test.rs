#[cfg(test)]
mod tests {
    use crate::helpers::app::{json_body, json_request, make_test_app, seed_student, seed_teacher};
    use axum::http::StatusCode;
    use db::models::{course, course_notification_read, course_student};
    use serde_json::json;
    use tower::ServiceExt;

    async fn seed_course(db: &sea_orm::DatabaseConnection, teacher_pk: i64) -> course::Model {
        course::Model::create(
            db,
            teacher_pk,
            course::NewCourse {
                name: "Operating Systems".to_string(),
                description: None,
                semester: "2025-Spring".to_string(),
                credit: 3.0,
                start_date: None,
                end_date: None,
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn publish_then_list_with_read_stats() {
        let (app, state, _media) = make_test_app().await;
        let db = state.db();
        let (teacher, token) = seed_teacher(db, "T001").await;
        let course = seed_course(db, teacher.id).await;
        let (reader, _) = seed_student(db, "S001").await;
        let (idle, _) = seed_student(db, "S002").await;
        course_student::Model::enroll(db, course.id, reader.id).await.unwrap();
        course_student::Model::enroll(db, course.id, idle.id).await.unwrap();

        let uri = format!("/api/teacher/course_notification/{}/notifications", course.id);
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &uri,
                Some(&token),
                Some(json!({ "title": "Midterm", "content": "Room 101", "notification_type": 3, "is_pinned": true })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        let id = json["data"]["id"].as_i64().unwrap();
        assert_eq!(json["data"]["notification_type"], 3);
        assert_eq!(json["data"]["is_pinned"], true);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &uri,
                Some(&token),
                Some(json!({ "title": "Welcome", "content": "Hello" })),
            ))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"]["notification_type"], 0);

        course_notification_read::Model::mark_read(db, id, reader.id).await.unwrap();

        let response = app
            .oneshot(json_request("GET", &format!("{uri}?page=1&page_size=10"), Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["total_count"], 2);
        assert_eq!(json["data"]["total_pages"], 1);
        let first = &json["data"]["notifications"][0];
        assert_eq!(first["title"], "Midterm");
        assert_eq!(first["read_count"], 1);
        assert_eq!(first["total_students"], 2);
    }

    #[tokio::test]
    async fn huge_page_number_returns_an_empty_page() {
        let (app, state, _media) = make_test_app().await;
        let (teacher, token) = seed_teacher(state.db(), "T001").await;
        let course = seed_course(state.db(), teacher.id).await;
        let uri = format!(
            "/api/teacher/course_notification/{}/notifications?page={}",
            course.id,
            u64::MAX
        );

        let response = app
            .oneshot(json_request("GET", &uri, Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["notifications"], json!([]));
        assert_eq!(json["data"]["page"], 1_000_000);
    }

    #[tokio::test]
    async fn rejects_empty_title_and_unknown_type() {
        let (app, state, _media) = make_test_app().await;
        let (teacher, token) = seed_teacher(state.db(), "T001").await;
        let course = seed_course(state.db(), teacher.id).await;
        let uri = format!("/api/teacher/course_notification/{}/notifications", course.id);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &uri,
                Some(&token),
                Some(json!({ "title": "", "content": "x" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(json_request(
                "POST",
                &uri,
                Some(&token),
                Some(json!({ "title": "t", "content": "x", "notification_type": 9 })),
            ))
            .await
            .unwrap();
        assert!(response.status().is_client_error());
    }

    #[tokio::test]
    async fn update_and_delete_within_course() {
        let (app, state, _media) = make_test_app().await;
        let db = state.db();
        let (teacher, token) = seed_teacher(db, "T001").await;
        let (other, other_token) = seed_teacher(db, "T002").await;
        let course = seed_course(db, teacher.id).await;
        let other_course = seed_course(db, other.id).await;
        let base = format!("/api/teacher/course_notification/{}/notifications", course.id);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &base,
                Some(&token),
                Some(json!({ "title": "Draft", "content": "v1" })),
            ))
            .await
            .unwrap();
        let id = json_body(response).await["data"]["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                &format!("{base}/{id}"),
                Some(&token),
                Some(json!({ "content": "v2", "is_pinned": true })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["title"], "Draft");
        assert_eq!(json["data"]["content"], "v2");
        assert_eq!(json["data"]["is_pinned"], true);

        let response = app
            .clone()
            .oneshot(json_request(
                "DELETE",
                &format!(
                    "/api/teacher/course_notification/{}/notifications/{id}",
                    other_course.id
                ),
                Some(&other_token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(json_request("DELETE", &format!("{base}/{id}"), Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(json_request("DELETE", &format!("{base}/{id}"), Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
