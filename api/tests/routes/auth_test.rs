#[cfg(test)]
mod tests {
    use crate::helpers::app::{json_body, json_request, make_test_app, seed_student, seed_teacher};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn login_infers_role_from_prefix() {
        let (app, state, _media) = make_test_app().await;
        seed_teacher(state.db(), "T001").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "user_id": "T001", "password": "teach123" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["role"], "teacher");
        assert_eq!(json["data"]["user_id"], "T001");
        assert_eq!(json["data"]["token_type"], "bearer");
        assert!(json["data"]["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    }

    #[tokio::test]
    async fn wrong_password_is_unauthorized() {
        let (app, state, _media) = make_test_app().await;
        seed_student(state.db(), "S001").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "user_id": "S001", "password": "nope", "role": "student" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let json = json_body(response).await;
        assert_eq!(json["message"], "Invalid user id or password");
    }

    #[tokio::test]
    async fn unknown_prefix_and_bad_role_are_rejected() {
        let (app, _state, _media) = make_test_app().await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "user_id": "X001", "password": "x" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/auth/login",
                None,
                Some(json!({ "user_id": "T001", "password": "x", "role": "janitor" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn token_endpoint_accepts_form() {
        let (app, state, _media) = make_test_app().await;
        seed_teacher(state.db(), "T001").await;

        let req = Request::builder()
            .method("POST")
            .uri("/api/auth/token")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from("username=T001&password=teach123"))
            .unwrap();
        let response = app.oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn current_user_requires_token() {
        let (app, state, _media) = make_test_app().await;
        let (_, token) = seed_student(state.db(), "S001").await;

        let response = app
            .clone()
            .oneshot(json_request("GET", "/api/auth/user", None, None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .clone()
            .oneshot(json_request("GET", "/api/auth/user", Some("Bearer not-a-jwt"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let response = app
            .oneshot(json_request("GET", "/api/auth/user", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["role"], "student");
    }

    #[tokio::test]
    async fn role_guards_reject_other_roles() {
        let (app, state, _media) = make_test_app().await;
        let (_, student) = seed_student(state.db(), "S001").await;
        let (_, teacher) = seed_teacher(state.db(), "T001").await;

        let response = app
            .clone()
            .oneshot(json_request("GET", "/api/teacher/course/list", Some(&student), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .oneshot(json_request(
                "GET",
                "/api/admin/user_management/list_students",
                Some(&teacher),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
