#[cfg(test)]
mod tests {
    use crate::helpers::app::{json_body, json_request, make_test_app, seed_student, seed_teacher};
    use axum::http::StatusCode;
    use db::models::{Account, Role};
    use serde_json::json;
    use tower::ServiceExt;

    #[tokio::test]
    async fn teacher_updates_own_profile() {
        let (app, state, _media) = make_test_app().await;
        let (_, token) = seed_teacher(state.db(), "T001").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/user/profile/teacher",
                Some(&token),
                Some(json!({ "office_location": "B-204", "contact_email": "t001@school.edu" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["office_location"], "B-204");
        assert_eq!(json["data"]["department"], "Maths");

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/user/profile/teacher",
                Some(&token),
                Some(json!({ "contact_email": "not-an-email" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn student_cannot_use_teacher_profile_route() {
        let (app, state, _media) = make_test_app().await;
        let (_, token) = seed_student(state.db(), "S001").await;

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/user/profile/teacher",
                Some(&token),
                Some(json!({ "intro": "hi" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn change_password_checks_old_password() {
        let (app, state, _media) = make_test_app().await;
        let (_, token) = seed_student(state.db(), "S001").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/user/change_password",
                Some(&token),
                Some(json!({ "old_password": "wrong", "new_password": "newpass1" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["message"], "Old password is incorrect");

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/user/change_password",
                Some(&token),
                Some(json!({ "old_password": "study123", "new_password": "newpass1" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let account = Account::find(state.db(), Role::Student, "S001")
            .await
            .unwrap()
            .unwrap();
        assert!(account.verify_password("newpass1"));
        assert!(!account.verify_password("study123"));
    }
}
