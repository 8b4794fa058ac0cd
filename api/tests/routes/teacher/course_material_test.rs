#[cfg(test)]
mod tests {
    use crate::helpers::app::{json_body, json_request, make_test_app, multipart_request, seed_teacher};
    use axum::http::{StatusCode, header};
    use db::models::course;
    use tower::ServiceExt;

    async fn seed_course(db: &sea_orm::DatabaseConnection, teacher_pk: i64) -> i64 {
        course::Model::create(
            db,
            teacher_pk,
            course::NewCourse {
                name: "Compilers".to_string(),
                semester: "2025-Autumn".to_string(),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .id
    }

    #[tokio::test]
    async fn upload_list_download_delete() {
        let (app, state, _media) = make_test_app().await;
        let (teacher, token) = seed_teacher(state.db(), "T001").await;
        let course_id = seed_course(state.db(), teacher.id).await;
        let base = format!("/api/teacher/course_material/{course_id}/materials");

        let response = app
            .clone()
            .oneshot(multipart_request(
                &base,
                &token,
                "Lecture1.PDF",
                b"%PDF-1.4 lecture",
                Some(("description", "Week one slides")),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let json = json_body(response).await;
        assert_eq!(json["data"]["filename"], "Lecture1.PDF");
        assert_eq!(json["data"]["file_extension"], ".pdf");
        assert_eq!(json["data"]["file_size"], "16 B");
        assert_eq!(json["data"]["description"], "Week one slides");

        let stored = state.storage().course_material_dir(course_id).join("Lecture1.PDF");
        assert!(stored.is_file());

        let response = app
            .clone()
            .oneshot(multipart_request(&base, &token, "Lecture1.PDF", b"again", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = app
            .clone()
            .oneshot(json_request("GET", &base, Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["course_name"], "Compilers");
        assert_eq!(json["data"]["total_count"], 1);

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                &format!("{base}/Lecture1.PDF/download"),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/octet-stream");
        let disposition = response.headers()[header::CONTENT_DISPOSITION].to_str().unwrap();
        assert!(disposition.contains("Lecture1.PDF"));
        let body = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&body[..], b"%PDF-1.4 lecture");

        let response = app
            .clone()
            .oneshot(json_request("DELETE", &format!("{base}/Lecture1.PDF"), Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(!stored.exists());

        let response = app
            .oneshot(json_request("DELETE", &format!("{base}/Lecture1.PDF"), Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn rejects_traversal_names_and_foreign_courses() {
        let (app, state, _media) = make_test_app().await;
        let (teacher, token) = seed_teacher(state.db(), "T001").await;
        let (_, other_token) = seed_teacher(state.db(), "T002").await;
        let course_id = seed_course(state.db(), teacher.id).await;
        let base = format!("/api/teacher/course_material/{course_id}/materials");

        let response = app
            .clone()
            .oneshot(multipart_request(&base, &token, "..evil.sh", b"rm", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["message"], "Invalid file name");

        let response = app
            .oneshot(multipart_request(&base, &other_token, "notes.txt", b"x", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
