//! Drive the real `Client` against a mock Canvas server.

use canvas_lms::{
    auth::{self, OAuthConfig, OAuthEndpoint, OAuthError},
    ApiError, Client, Loose, NewAssignment,
};
use mockito::{Matcher, Server};
use pretty_assertions::assert_eq;
use reqwest::StatusCode;
use serde_json::json;

const TOKEN: &str = "1~sekrit";

fn client(server: &Server) -> Client {
    Client::new(&server.url(), TOKEN).unwrap()
}

#[tokio::test]
async fn list_courses_sends_the_bearer_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/courses")
        .match_header("authorization", "Bearer 1~sekrit")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([
                {"id": 1, "name": "Rust 101", "course_code": "RS101", "term": {"id": 9, "name": "Fall"}},
                {"id": 2, "name": "Rust 201", "course_code": "RS201", "unknown_field": [1, 2, 3]},
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let courses = client(&server).courses().await.unwrap();

    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].id, 1);
    assert_eq!(courses[0].name, "Rust 101");
    assert_eq!(courses[0].course_code, "RS101");
    assert_eq!(
        courses[0].term.as_ref().and_then(Loose::known).map(|t| t.id),
        Some(9)
    );
    assert_eq!(courses[1].name, "Rust 201");
    mock.assert_async().await;
}

#[tokio::test]
async fn get_a_single_course() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/courses/42")
        .with_status(200)
        .with_body(r#"{"id": 42, "name": "The Answer", "workflow_state": "available"}"#)
        .create_async()
        .await;

    let course = client(&server).course(42).await.unwrap();

    assert_eq!(course.id, 42);
    assert_eq!(course.workflow_state, "available");
    mock.assert_async().await;
}

#[tokio::test]
async fn get_a_user() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/users/7")
        .with_status(200)
        .with_body(
            r#"{"id": 7, "name": "Amy Farrah Fowler", "short_name": "Amy", "last_login": "2020-01-02T03:04:05Z"}"#,
        )
        .create_async()
        .await;

    let user = client(&server).user(7).await.unwrap();

    assert_eq!(user.id, 7);
    assert_eq!(user.name, "Amy Farrah Fowler");
    assert_eq!(user.short_name, "Amy");
    assert_eq!(
        user.last_login.map(|t| t.to_rfc3339()),
        Some(String::from("2020-01-02T03:04:05+00:00"))
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn current_user_asks_for_self() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/users/self")
        .with_status(200)
        .with_body(r#"{"id": 1, "name": "Me"}"#)
        .create_async()
        .await;

    let user = client(&server).current_user().await.unwrap();

    assert_eq!(user.name, "Me");
    mock.assert_async().await;
}

#[tokio::test]
async fn list_assignments_for_a_course() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/courses/42/assignments")
        .with_status(200)
        .with_body(
            json!([{
                "id": 4,
                "name": "Essay",
                "course_id": 42,
                "points_possible": 12.5,
                "submission_types": ["online_upload"],
                "grading_type": "points",
                "muted": false,
            }])
            .to_string(),
        )
        .create_async()
        .await;

    let assignments = client(&server).assignments(42).await.unwrap();

    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0].course_id, 42);
    assert_eq!(assignments[0].points_possible, Some(12.5));
    assert_eq!(assignments[0].submission_types, vec!["online_upload"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn nulls_and_error_objects_dont_fail_the_list() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/courses")
        .with_status(200)
        .with_body(
            json!([
                {"id": 1, "name": null, "course_code": "RS101"},
                {
                    "id": 2,
                    "name": "Rust 201",
                    "course_progress": {"error": {"message": "no modules"}},
                },
            ])
            .to_string(),
        )
        .create_async()
        .await;

    let courses = client(&server).courses().await.unwrap();

    assert_eq!(courses.len(), 2);
    assert_eq!(courses[0].name, "");
    assert_eq!(courses[0].course_code, "RS101");
    assert_eq!(
        courses[1].course_progress,
        Some(Loose::Unknown(json!({"error": {"message": "no modules"}})))
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn nested_collections_use_the_nested_paths() {
    let mut server = Server::new_async().await;
    let users = server
        .mock("GET", "/api/v1/courses/3/users")
        .with_status(200)
        .with_body(r#"[{"id": 5, "name": "Raj"}, {"id": 6, "name": "Howard"}]"#)
        .create_async()
        .await;
    let courses = server
        .mock("GET", "/api/v1/users/5/courses")
        .with_status(200)
        .with_body(r#"[{"id": 3, "name": "Physics"}]"#)
        .create_async()
        .await;
    let assignments = server
        .mock("GET", "/api/v1/users/5/courses/3/assignments")
        .with_status(200)
        .with_body(r#"[{"id": 11, "name": "Problem Set", "course_id": 3}]"#)
        .create_async()
        .await;
    let client = client(&server);

    let got_users = client.users_for_course(3).await.unwrap();
    let got_courses = client.courses_for_user(5).await.unwrap();
    let got_assignments = client.assignments_for_user(5, 3).await.unwrap();

    assert_eq!(
        got_users.iter().map(|u| u.name.as_str()).collect::<Vec<_>>(),
        vec!["Raj", "Howard"]
    );
    assert_eq!(got_courses[0].id, 3);
    assert_eq!(got_assignments[0].name, "Problem Set");
    users.assert_async().await;
    courses.assert_async().await;
    assignments.assert_async().await;
}

#[tokio::test]
async fn unauthorized_includes_every_remote_message() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/users/1")
        .with_status(401)
        .with_body(
            json!({
                "status": "unauthorized",
                "errors": [
                    {"message": "Invalid access token."},
                    {"message": "Please log in again."},
                ],
            })
            .to_string(),
        )
        .create_async()
        .await;

    let err = client(&server).user(1).await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized(_)));
    let msg = err.to_string();
    assert!(msg.contains("Invalid access token."));
    assert!(msg.contains("Please log in again."));
    assert_eq!(err.status(), Some(StatusCode::UNAUTHORIZED));
    mock.assert_async().await;
}

#[tokio::test]
async fn server_errors_identify_the_status() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/courses")
        .with_status(500)
        .with_body("Internal Server Error")
        .create_async()
        .await;

    let err = client(&server).courses().await.unwrap_err();

    match &err {
        ApiError::Status { status, body } => {
            assert_eq!(*status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, "Internal Server Error");
        },
        other => panic!("Expected a status error, got {:?}", other),
    }
    assert!(err.to_string().contains("500"));
    mock.assert_async().await;
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/courses/42")
        .with_status(200)
        .with_body(r#"{"id": 42, "name": "#)
        .create_async()
        .await;

    let err = client(&server).course(42).await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)));
    mock.assert_async().await;
}

#[tokio::test]
async fn create_assignment_posts_json() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/courses/42/assignments")
        .match_header("authorization", "Bearer 1~sekrit")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "assignment": {
                "name": "Lab 1",
                "points_possible": 10.0,
                "published": true,
            }
        })))
        .with_status(201)
        .with_body(r#"{"id": 99, "name": "Lab 1", "course_id": 42, "published": true}"#)
        .create_async()
        .await;
    let mut new = NewAssignment::new("Lab 1");
    new.points_possible = Some(10.0);
    new.published = Some(true);

    let created = client(&server).create_assignment(42, &new).await.unwrap();

    assert_eq!(created.id, 99);
    assert!(created.published);
    mock.assert_async().await;
}

#[tokio::test]
async fn preview_html_posts_a_form() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/api/v1/courses/42/preview_html")
        .match_header("content-type", "application/x-www-form-urlencoded")
        .match_body(Matcher::UrlEncoded(
            "html".into(),
            "<p><script>alert(1)</script>Hi</p>".into(),
        ))
        .with_status(200)
        .with_body(r#"{"html": "<p>Hi</p>"}"#)
        .create_async()
        .await;

    let html = client(&server)
        .preview_html(42, "<p><script>alert(1)</script>Hi</p>")
        .await
        .unwrap();

    assert_eq!(html, "<p>Hi</p>");
    mock.assert_async().await;
}

#[tokio::test]
async fn trailing_slash_on_the_host_is_ignored() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/v1/courses")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let client = Client::new(&format!("{}/", server.url()), TOKEN).unwrap();

    let courses = client.courses().await.unwrap();

    assert!(courses.is_empty());
    mock.assert_async().await;
}

fn oauth_config() -> OAuthConfig {
    OAuthConfig {
        client_id: String::from("10000000000001"),
        client_secret: String::from("shhh"),
        redirect_uri: String::from("https://example.com/callback"),
    }
}

#[tokio::test]
async fn exchange_an_authorization_code() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/login/oauth2/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "authorization_code".into()),
            Matcher::UrlEncoded("client_id".into(), "10000000000001".into()),
            Matcher::UrlEncoded("client_secret".into(), "shhh".into()),
            Matcher::UrlEncoded(
                "redirect_uri".into(),
                "https://example.com/callback".into(),
            ),
            Matcher::UrlEncoded("code".into(), "abc".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"{"access_token": "1~new", "token_type": "Bearer", "refresh_token": "1~refresh", "expires_in": 3600, "user": {"id": 5, "name": "Raj"}}"#,
        )
        .create_async()
        .await;
    let endpoint = OAuthEndpoint::for_host(&server.url());

    let token = auth::exchange_code(
        &reqwest::Client::new(),
        &endpoint,
        &oauth_config(),
        "abc",
    )
    .await
    .unwrap();

    assert_eq!(token.access_token, "1~new");
    assert_eq!(token.refresh_token.as_deref(), Some("1~refresh"));
    assert_eq!(token.expires_in, Some(3600));
    assert_eq!(token.user.map(|u| u.id), Some(5));
    mock.assert_async().await;
}

#[tokio::test]
async fn refresh_an_access_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/login/oauth2/token")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("grant_type".into(), "refresh_token".into()),
            Matcher::UrlEncoded("refresh_token".into(), "1~refresh".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"access_token": "1~fresh", "token_type": "Bearer", "expires_in": 3600}"#)
        .create_async()
        .await;
    let endpoint = OAuthEndpoint::for_host(&server.url());

    let token = auth::refresh(
        &reqwest::Client::new(),
        &endpoint,
        &oauth_config(),
        "1~refresh",
    )
    .await
    .unwrap();

    assert_eq!(token.access_token, "1~fresh");
    assert_eq!(token.refresh_token, None);

    // and the new token works with the API client
    let courses_mock = server
        .mock("GET", "/api/v1/courses")
        .match_header("authorization", "Bearer 1~fresh")
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;
    let client = Client::from_token(&server.url(), &token).unwrap();
    client.courses().await.unwrap();

    mock.assert_async().await;
    courses_mock.assert_async().await;
}

#[tokio::test]
async fn rejected_authorization_code() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/login/oauth2/token")
        .with_status(400)
        .with_body(r#"{"error": "invalid_grant", "error_description": "authorization_code not found"}"#)
        .create_async()
        .await;
    let endpoint = OAuthEndpoint::for_host(&server.url());

    let err = auth::exchange_code(
        &reqwest::Client::new(),
        &endpoint,
        &oauth_config(),
        "stale",
    )
    .await
    .unwrap_err();

    match err {
        OAuthError::Rejected { error, .. } => assert_eq!(error, "invalid_grant"),
        other => panic!("Expected a rejection, got {:?}", other),
    }
    mock.assert_async().await;
}
