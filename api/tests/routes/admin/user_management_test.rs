#[cfg(test)]
mod tests {
    use crate::helpers::app::{
        json_body, json_request, make_test_app, multipart_request, seed_admin, seed_student,
    };
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use db::models::{Account, Role};
    use serde_json::json;
    use tower::ServiceExt;

    const STUDENTS_CSV: &str = "\u{feff}姓名,密码,学号,学院,专业,年级,入学年份\n\
Wang Fang,pass123,S2024001,Engineering,Software,Year 1,2024\n\
\"Li, Lei\",pass123,S2024002,Science,,Year 2,2023\n\
Dup,pass123,S2024001,Engineering,,,\n";

    #[tokio::test]
    async fn student_import_reports_failures_per_row() {
        let (app, state, _media) = make_test_app().await;
        let token = seed_admin(state.db()).await;

        let response = app
            .oneshot(multipart_request(
                "/api/admin/user_management/create_students",
                &token,
                "students.csv",
                STUDENTS_CSV.as_bytes(),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = json_body(response).await;
        assert_eq!(json["data"]["total"], 3);
        assert_eq!(json["data"]["success_count"], 2);
        assert_eq!(json["data"]["failed_count"], 1);
        assert_eq!(json["data"]["failed_records"][0]["username"], "Dup");

        let lei = Account::find(state.db(), Role::Student, "S2024002")
            .await
            .unwrap()
            .expect("imported");
        assert_eq!(lei.username(), "Li, Lei");
        assert!(lei.verify_password("pass123"));
    }

    #[tokio::test]
    async fn import_rejects_non_csv_and_missing_columns() {
        let (app, state, _media) = make_test_app().await;
        let token = seed_admin(state.db()).await;

        let response = app
            .clone()
            .oneshot(multipart_request(
                "/api/admin/user_management/create_teachers",
                &token,
                "teachers.xlsx",
                b"whatever",
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(multipart_request(
                "/api/admin/user_management/create_teachers",
                &token,
                "teachers.csv",
                "username,password\nX,y\n".as_bytes(),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert!(json["message"].as_str().unwrap().starts_with("Missing required column"));
    }

    #[tokio::test]
    async fn template_is_a_csv_attachment() {
        let (app, state, _media) = make_test_app().await;
        let token = seed_admin(state.db()).await;

        let response = app
            .oneshot(json_request(
                "GET",
                "/api/admin/user_management/teacher_template",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.starts_with("attachment"));
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&body).starts_with("username,password,staff_id,department"));
    }

    #[tokio::test]
    async fn list_detail_update_and_reset() {
        let (app, state, _media) = make_test_app().await;
        let token = seed_admin(state.db()).await;
        seed_student(state.db(), "S001").await;
        seed_student(state.db(), "S002").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/admin/user_management/list_students?page=1&page_size=1",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["total"], 2);
        assert_eq!(json["data"]["students"].as_array().unwrap().len(), 1);
        assert!(json["data"]["students"][0].get("password_hash").is_none());

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/admin/user_management/update_student/S001",
                Some(&token),
                Some(json!({ "student_id": "S002" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/api/admin/user_management/update_student/S001",
                Some(&token),
                Some(json!({ "major": "Physics" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/admin/user_management/student_detail/S001",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"]["major"], "Physics");

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/admin/user_management/reset_student_password/S001",
                Some(&token),
                Some(json!({ "new_password": "reset123" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let account = Account::find(state.db(), Role::Student, "S001")
            .await
            .unwrap()
            .unwrap();
        assert!(account.verify_password("reset123"));

        let response = app
            .oneshot(json_request(
                "GET",
                "/api/admin/user_management/teacher_detail/T404",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn staff_ids_are_limited_to_letters_and_digits() {
        let (app, state, _media) = make_test_app().await;
        let token = seed_admin(state.db()).await;
        let csv = "username,password,staff_id,department\n\
Ada,pw123456,T1,Maths\n\
Eve,pw123456,T1_X,Maths\n\
Mal,pw123456,../T9,Maths\n";

        let response = app
            .clone()
            .oneshot(multipart_request(
                "/api/admin/user_management/create_teachers",
                &token,
                "teachers.csv",
                csv.as_bytes(),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["success_count"], 1);
        assert_eq!(json["data"]["failed_count"], 2);
        assert_eq!(
            json["data"]["failed_records"][0]["error"],
            "Staff id may only contain letters and digits"
        );
        assert!(Account::find(state.db(), Role::Teacher, "T1_X").await.unwrap().is_none());

        let response = app
            .oneshot(json_request(
                "PUT",
                "/api/admin/user_management/update_teacher/T1",
                Some(&token),
                Some(json!({ "staff_id": "T1_X" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["message"], "Staff id may only contain letters and digits");
        assert!(Account::find(state.db(), Role::Teacher, "T1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn malformed_multipart_is_a_bad_request() {
        let (app, state, _media) = make_test_app().await;
        let token = seed_admin(state.db()).await;
        let boundary = "----lumino-test-boundary";

        let request = Request::builder()
            .method("POST")
            .uri("/api/admin/user_management/create_students")
            .header(header::AUTHORIZATION, &token)
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\""
            )))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert!(json["message"].as_str().unwrap().starts_with("Invalid upload"));
    }
}
