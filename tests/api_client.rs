//! Tests for `client/core.rs` against a mocked HTTP server.
use serial_test::serial;
use taskflow::client::{ApiClient, ApiError, NewTask, TaskUpdate};
use taskflow::model::TaskStatus;

const AUTH_BODY: &str = r#"{
    "token": "tok-1",
    "user": { "id": "u1", "username": "amy", "email": "amy@example.com" }
}"#;

#[tokio::test]
#[serial]
async fn login_success_returns_token_and_user() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/login")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(AUTH_BODY)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), false).unwrap();
    let auth = client.login("amy@example.com", "secret1").await.unwrap();
    assert_eq!(auth.token, "tok-1");
    assert_eq!(auth.user.username, "amy");
    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn login_failure_surfaces_backend_message() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth/login")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "message": "Invalid credentials" }"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), false).unwrap();
    let err = client.login("amy@example.com", "wrong").await.unwrap_err();
    // A 401 from login is bad credentials, not an expired session.
    assert_eq!(err, ApiError::Api("Invalid credentials".to_string()));
}

#[tokio::test]
#[serial]
async fn login_failure_without_message_uses_fallback() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/api/auth/login")
        .with_status(500)
        .with_body("oops")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), false).unwrap();
    let err = client.login("amy@example.com", "secret1").await.unwrap_err();
    assert_eq!(err, ApiError::Api("Login failed".to_string()));
}

#[tokio::test]
#[serial]
async fn register_posts_all_three_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/auth/register")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{ "username": "amy", "email": "amy@example.com", "password": "longenough" }"#
                .to_string(),
        ))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(AUTH_BODY)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), false).unwrap();
    let auth = client
        .register("amy", "amy@example.com", "longenough")
        .await
        .unwrap();
    assert_eq!(auth.token, "tok-1");
    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn fetch_tasks_sends_bearer_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/tasks")
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{ "tasks": [
                { "id": "t1", "title": "Ship it", "status": "pending",
                  "createdAt": "2026-03-01T10:00:00Z", "priority": "high" }
            ] }"#,
        )
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), false).unwrap();
    let tasks = client.fetch_tasks("tok-1").await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].title, "Ship it");
    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn fetch_tasks_with_missing_list_is_empty() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/tasks")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), false).unwrap();
    let tasks = client.fetch_tasks("tok-1").await.unwrap();
    assert!(tasks.is_empty());
}

#[tokio::test]
#[serial]
async fn rejected_token_maps_to_unauthorized() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/tasks")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "message": "Token expired" }"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), false).unwrap();
    let err = client.fetch_tasks("stale").await.unwrap_err();
    assert_eq!(err, ApiError::Unauthorized);
}

#[tokio::test]
#[serial]
async fn create_task_round_trips_the_created_task() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/tasks")
        .match_header("authorization", "Bearer tok-1")
        .match_body(mockito::Matcher::PartialJsonString(
            r#"{ "title": "Ship it", "status": "pending",
                 "priority": "medium", "recurrence": "none" }"#
                .to_string(),
        ))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{ "id": "t9", "title": "Ship it", "status": "pending",
                 "createdAt": "2026-03-01T10:00:00Z" }"#,
        )
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), false).unwrap();
    let task = client
        .create_task("tok-1", &NewTask::new("Ship it"))
        .await
        .unwrap();
    assert_eq!(task.id, "t9");
    assert_eq!(task.status, TaskStatus::Pending);
    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn update_task_puts_partial_body_to_the_task_url() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/tasks/t1")
        .match_header("authorization", "Bearer tok-1")
        // Only the changed field goes over the wire.
        .match_body(mockito::Matcher::JsonString(
            r#"{ "status": "in-progress" }"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{}")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), false).unwrap();
    client
        .update_task("tok-1", "t1", &TaskUpdate::status(TaskStatus::InProgress))
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn delete_task_hits_the_task_url() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("DELETE", "/api/tasks/t1")
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), false).unwrap();
    client.delete_task("tok-1", "t1").await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn profile_fetch_and_update() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/api/auth/profile")
        .match_header("authorization", "Bearer tok-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "user": { "id": "u1", "username": "amy", "email": "amy@example.com" } }"#)
        .create_async()
        .await;
    server
        .mock("PUT", "/api/auth/profile")
        .match_body(mockito::Matcher::JsonString(
            r#"{ "username": "amy2" }"#.to_string(),
        ))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "user": { "id": "u1", "username": "amy2", "email": "amy@example.com" } }"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), false).unwrap();
    let user = client.fetch_profile("tok-1").await.unwrap();
    assert_eq!(user.username, "amy");

    let updated = client
        .update_profile("tok-1", Some("amy2"), None)
        .await
        .unwrap();
    assert_eq!(updated.username, "amy2");
}

#[tokio::test]
#[serial]
async fn change_password_sends_camel_case_fields() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("PUT", "/api/auth/password")
        .match_body(mockito::Matcher::JsonString(
            r#"{ "currentPassword": "old-secret", "newPassword": "new-secret-1" }"#.to_string(),
        ))
        .with_status(200)
        .with_body(r#"{ "message": "Password updated" }"#)
        .create_async()
        .await;

    let client = ApiClient::new(&server.url(), false).unwrap();
    client
        .change_password("tok-1", "old-secret", "new-secret-1")
        .await
        .unwrap();
    mock.assert_async().await;
}

#[tokio::test]
#[serial]
async fn unreachable_server_is_a_network_error() {
    // Nothing listens on this port.
    let client = ApiClient::new("http://127.0.0.1:1", false).unwrap();
    let err = client.login("amy@example.com", "secret1").await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
#[serial]
async fn base_url_with_trailing_slash_still_works() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/api/tasks")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{ "tasks": [] }"#)
        .create_async()
        .await;

    let base = format!("{}/", server.url());
    let client = ApiClient::new(&base, false).unwrap();
    let tasks = client.fetch_tasks("tok-1").await.unwrap();
    assert!(tasks.is_empty());
    mock.assert_async().await;
}
