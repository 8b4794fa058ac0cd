#[cfg(test)]
mod tests {
    use crate::helpers::app::{
        json_body, json_request, make_test_app, make_test_app_with_reply, seed_teacher,
    };
    use axum::http::{StatusCode, header};
    use serde_json::{Value, json};
    use std::io::Cursor;
    use tower::ServiceExt;

    const OUTLINE: &str = "## Slide 1: Newton's laws\n- Content:\nForces and motion\n\n\
## Slide 2: First law\n- Content:\n- Objects keep their state of motion\n\n\
## Slide 3: Second law\n- Content:\n- F = ma\n\n\
## Teacher Notes\n- Slide 1: Introduce the topic\n- Slide 2: Demonstrate with a cart\n";

    fn outline_request() -> Value {
        json!({
            "title": "Newton laws",
            "subject": "Physics",
            "target_grade": "Junior High School",
            "teaching_target": "Understand the three laws",
            "key_points": ["inertia", "F = ma"],
            "slide_count": 3
        })
    }

    #[tokio::test]
    async fn outline_then_deck() {
        let (app, state, _media) = make_test_app_with_reply(Some(OUTLINE)).await;
        let (_, token) = seed_teacher(state.db(), "T001").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/teacher/ppt/generate_outline",
                Some(&token),
                Some(outline_request()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let request_id = json["data"]["request_id"].as_str().unwrap().to_string();
        assert_eq!(request_id.len(), 8);
        assert_eq!(json["data"]["outline_md"], OUTLINE);

        let response = app
            .clone()
            .oneshot(json_request("GET", "/api/teacher/ppt/outlines", Some(&token), None))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"][0]["request_id"], request_id.as_str());
        assert_eq!(json["data"][0]["title"], "Newton laws");
        assert_eq!(json["data"][0]["has_generated_ppt"], false);
        assert!(json["data"][0]["preview"].as_str().unwrap().ends_with("..."));

        let edited = OUTLINE.replace("F = ma", "F = m * a");
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/teacher/ppt/generate_from_outline",
                Some(&token),
                Some(json!({
                    "request_id": request_id,
                    "title": "Newton laws",
                    "outline_md": edited,
                    "design_preference": "modern"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        let file_name = json["data"]["file_name"].as_str().unwrap().to_string();
        assert_eq!(file_name, format!("teacher_T001_{request_id}_Newton_laws.pptx"));
        let slides = json["data"]["slides"].as_array().unwrap();
        assert_eq!(slides.len(), 3);
        assert_eq!(slides[1]["title"], "First law");
        assert_eq!(slides[1]["note"], "Demonstrate with a cart");

        let path = state.storage().ppt_files_dir().join(&file_name);
        let bytes = std::fs::read(&path).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        assert!(names.contains(&"ppt/slides/slide3.xml"));

        let response = app
            .clone()
            .oneshot(json_request("GET", "/api/teacher/ppt/outlines", Some(&token), None))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"][0]["has_generated_ppt"], true);

        let response = app
            .clone()
            .oneshot(json_request("GET", "/api/teacher/ppt/list_ppt", Some(&token), None))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"][0]["file_name"], file_name.as_str());

        let response = app
            .oneshot(json_request(
                "GET",
                &format!("/api/teacher/ppt/download/{file_name}"),
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        );
    }

    #[tokio::test]
    async fn deck_requires_known_outline_with_slides() {
        let (app, state, _media) = make_test_app_with_reply(Some(OUTLINE)).await;
        let (_, token) = seed_teacher(state.db(), "T001").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/teacher/ppt/generate_from_outline",
                Some(&token),
                Some(json!({ "request_id": "deadbeef", "title": "x", "outline_md": OUTLINE })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/api/teacher/ppt/generate_outline",
                Some(&token),
                Some(outline_request()),
            ))
            .await
            .unwrap();
        let request_id = json_body(response).await["data"]["request_id"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/teacher/ppt/generate_from_outline",
                Some(&token),
                Some(json!({ "request_id": request_id, "title": "x", "outline_md": "just prose" })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = json_body(response).await;
        assert_eq!(json["message"], "The outline contains no slides");
    }

    #[tokio::test]
    async fn download_guards_and_option_lists() {
        let (app, state, _media) = make_test_app().await;
        let (_, token) = seed_teacher(state.db(), "T001").await;

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/teacher/ppt/download/teacher_T002_abc_deck.pptx",
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
                "/api/teacher/ppt/download/teacher_T001_abc_deck.md",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app
            .clone()
            .oneshot(json_request("GET", "/api/teacher/ppt/subjects", Some(&token), None))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert!(json["data"]["options"]
            .as_array()
            .unwrap()
            .iter()
            .any(|s| s == "Mathematics"));

        let response = app
            .oneshot(json_request("GET", "/api/teacher/ppt/grades", Some(&token), None))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"]["options"][0], "Primary School");
    }

    #[tokio::test]
    async fn outline_failure_is_a_server_error() {
        let (app, state, _media) = make_test_app_with_reply(None).await;
        let (_, token) = seed_teacher(state.db(), "T001").await;

        let response = app
            .oneshot(json_request(
                "POST",
                "/api/teacher/ppt/generate_outline",
                Some(&token),
                Some(outline_request()),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
