#[cfg(test)]
mod tests {
    use crate::helpers::app::{json_body, json_request, make_test_app, seed_admin};
    use axum::http::StatusCode;
    use serial_test::serial;
    use std::fs;
    use tempfile::tempdir;
    use tower::ServiceExt;
    use util::config::AppConfig;

    fn write_logs(root: &std::path::Path) {
        let app = root.join("app");
        fs::create_dir_all(&app).unwrap();
        fs::write(app.join("app.log.2025-01-30"), "old\n").unwrap();
        fs::write(app.join("app.log.2025-01-31"), "first\r\nsecond\n").unwrap();
        fs::create_dir_all(root.join("request")).unwrap();
    }

    #[tokio::test]
    #[serial]
    async fn services_files_and_content() {
        let logs = tempdir().unwrap();
        write_logs(logs.path());
        AppConfig::set_log_dir(logs.path().to_string_lossy().to_string());

        let (app, state, _media) = make_test_app().await;
        let token = seed_admin(state.db()).await;

        let response = app
            .clone()
            .oneshot(json_request("GET", "/api/admin/log_management/services", Some(&token), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let names: Vec<&str> = json["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["app", "request"]);
        assert_eq!(json["data"][0]["description"], "Application log");

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/admin/log_management/files?service_name=app&start_date=2025-01-31",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"].as_array().unwrap().len(), 1);
        assert_eq!(json["data"][0]["name"], "app.log.2025-01-31");

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/admin/log_management/content?service_name=app&file_name=app.log.2025-01-31",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["lines"], serde_json::json!(["first", "second"]));

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/admin/log_management/files?service_name=app&start_date=31-01-2025",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .oneshot(json_request(
                "GET",
                "/api/admin/log_management/files?service_name=missing",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        AppConfig::reset();
        AppConfig::set_jwt_secret(crate::helpers::app::TEST_SECRET);
    }
}
