#[cfg(test)]
mod tests {
    use crate::helpers::app::{json_body, json_request, make_test_app, seed_student, seed_teacher};
    use axum::http::StatusCode;
    use db::models::course_notification::NotificationType;
    use db::models::{course, course_notification, course_student};
    use tower::ServiceExt;

    struct Fixture {
        course_id: i64,
        notification_ids: Vec<i64>,
        enrolled: String,
        outsider: String,
    }

    async fn fixture(db: &sea_orm::DatabaseConnection) -> Fixture {
        let (teacher, _) = seed_teacher(db, "T001").await;
        let course = course::Model::create(
            db,
            teacher.id,
            course::NewCourse {
                name: "Databases".to_string(),
                semester: "2025-Spring".to_string(),
                credit: 2.0,
                ..Default::default()
            },
        )
        .await
        .unwrap();
        let (student, enrolled) = seed_student(db, "S001").await;
        let (_, outsider) = seed_student(db, "S002").await;
        course_student::Model::enroll(db, course.id, student.id).await.unwrap();

        let mut notification_ids = Vec::new();
        for title in ["Welcome", "Quiz on Friday"] {
            let n = course_notification::Model::create(
                db,
                course.id,
                teacher.id,
                title,
                "Details inside",
                NotificationType::General,
                false,
            )
            .await
            .unwrap();
            notification_ids.push(n.id);
        }

        Fixture {
            course_id: course.id,
            notification_ids,
            enrolled,
            outsider,
        }
    }

    #[tokio::test]
    async fn enrolled_courses_and_access_check() {
        let (app, state, _media) = make_test_app().await;
        let f = fixture(state.db()).await;

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/student/course_notification/courses",
                Some(&f.enrolled),
                None,
            ))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"][0]["name"], "Databases");
        assert_eq!(json["data"][0]["credit"], 2.0);

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                &format!("/api/student/course_notification/{}/notifications", f.course_id),
                Some(&f.outsider),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = app
            .oneshot(json_request(
                "POST",
                &format!(
                    "/api/student/course_notification/{}/notifications/{}/read",
                    f.course_id, f.notification_ids[0]
                ),
                Some(&f.outsider),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }

    #[tokio::test]
    async fn reading_updates_flags_and_unread_count() {
        let (app, state, _media) = make_test_app().await;
        let f = fixture(state.db()).await;
        let read_uri = format!(
            "/api/student/course_notification/{}/notifications/{}/read",
            f.course_id, f.notification_ids[0]
        );

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/student/course_notification/unread_count",
                Some(&f.enrolled),
                None,
            ))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"]["unread_count"], 2);

        let response = app
            .clone()
            .oneshot(json_request("POST", &read_uri, Some(&f.enrolled), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let first = json_body(response).await["data"]["read_at"].clone();

        let response = app
            .clone()
            .oneshot(json_request("POST", &read_uri, Some(&f.enrolled), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["read_at"], first);

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                &format!(
                    "/api/student/course_notification/{}/notifications?page=1&page_size=10",
                    f.course_id
                ),
                Some(&f.enrolled),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = json_body(response).await;
        assert_eq!(json["data"]["total_count"], 2);
        let read: Vec<bool> = json["data"]["notifications"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|n| n["id"] == f.notification_ids[0])
            .map(|n| n["is_read"].as_bool().unwrap())
            .collect();
        assert_eq!(read, vec![true]);

        let response = app
            .clone()
            .oneshot(json_request(
                "GET",
                "/api/student/course_notification/unread_count",
                Some(&f.enrolled),
                None,
            ))
            .await
            .unwrap();
        let json = json_body(response).await;
        assert_eq!(json["data"]["unread_count"], 1);

        let response = app
            .oneshot(json_request(
                "POST",
                &format!(
                    "/api/student/course_notification/{}/notifications/9999/read",
                    f.course_id
                ),
                Some(&f.enrolled),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn teachers_cannot_use_student_routes() {
        let (app, state, _media) = make_test_app().await;
        let (_, token) = seed_teacher(state.db(), "T009").await;

        let response = app
            .oneshot(json_request(
                "GET",
                "/api/student/course_notification/courses",
                Some(&token),
                None,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
    }
}
