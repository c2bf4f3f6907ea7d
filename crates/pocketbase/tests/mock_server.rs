//! Mock server tests for the pocketbase library.
//!
//! These tests use wiremock to simulate a PocketBase server and exercise the
//! client end to end without network access or a real instance.

use pocketbase::{
    Credentials, ErrorKind, Expanded, NO_RESPONSE_STATUS, PocketBase, QuerySpec,
};
use serde_json::json;
use wiremock::matchers::{
    any, body_json, header, method, path, query_param, query_param_is_missing,
};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

/// Helper to create a client pointed at a mock server.
fn client_for(server: &MockServer) -> PocketBase {
    PocketBase::new(&server.uri()).unwrap()
}

async fn mount_user_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/collections/users/auth-with-password"))
        .and(body_json(json!({
            "identity": "user@example.com",
            "password": "secret123"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "abc",
            "record": {"id": "u1", "email": "user@example.com"}
        })))
        .mount(server)
        .await;
}

async fn login(client: &PocketBase) {
    client
        .collection("users")
        .auth_with_password(&Credentials::new("user@example.com", "secret123"))
        .await
        .unwrap();
}

// ============================================================================
// Authentication Tests
// ============================================================================

#[tokio::test]
async fn test_auth_with_password_stores_credentials() {
    let server = MockServer::start().await;
    mount_user_login(&server).await;

    let client = client_for(&server);
    let snapshot = client
        .collection("users")
        .auth_with_password(&Credentials::new("user@example.com", "secret123"))
        .await
        .unwrap();

    assert_eq!(snapshot.token().as_str(), "abc");
    let store = client.auth_store();
    assert!(store.is_valid());
    assert!(store.is_user());
    assert!(!store.is_admin());
    assert_eq!(store.token().unwrap().as_str(), "abc");
    assert_eq!(store.model().unwrap()["email"], "user@example.com");
}

#[tokio::test]
async fn test_auth_with_bad_password() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/collections/users/auth-with-password"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 400,
            "message": "Failed to authenticate.",
            "data": {}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .collection("users")
        .auth_with_password(&Credentials::new("user@example.com", "wrong"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status_code(), 400);
    assert_eq!(err.message(), "Failed to authenticate.");
    assert!(!client.auth_store().is_valid());
}

#[tokio::test]
async fn test_admin_auth_sets_admin_principal() {
    let server = MockServer::start().await;

    // Older servers put the account under `admin`.
    Mock::given(method("POST"))
        .and(path("/api/collections/_superusers/auth-with-password"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "admin-token",
            "admin": {"id": "a1", "email": "admin@example.com"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let admins = client.admins();
    admins
        .auth_with_password(&Credentials::new("admin@example.com", "secret"))
        .await
        .unwrap();

    assert!(admins.is_authenticated());
    assert!(client.auth_store().is_admin());
    assert!(!client.auth_store().is_user());
    assert_eq!(client.auth_store().model().unwrap().id(), "a1");
}

#[tokio::test]
async fn test_token_is_attached_to_requests() {
    let server = MockServer::start().await;
    mount_user_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records/p1"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "p1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    login(&client).await;

    // A handle created before login sees the new token too.
    let posts = client.collection("posts");
    let record = posts.get_one("p1", None).await.unwrap();
    assert_eq!(record.id(), "p1");
}

#[tokio::test]
async fn test_no_auth_header_when_logged_out() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records/p1"))
        .respond_with(|request: &Request| {
            assert!(!request.headers.contains_key("authorization"));
            ResponseTemplate::new(200).set_body_json(json!({"id": "p1"}))
        })
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.collection("posts").get_one("p1", None).await.unwrap();
}

#[tokio::test]
async fn test_refresh_replaces_token() {
    let server = MockServer::start().await;
    mount_user_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/collections/users/auth-refresh"))
        .and(header("Authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "def",
            "record": {"id": "u1", "email": "user@example.com", "verified": true}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    login(&client).await;

    client.refresh_auth().await.unwrap();
    assert_eq!(client.auth_store().token().unwrap().as_str(), "def");
    assert_eq!(client.auth_store().model().unwrap()["verified"], true);
}

#[tokio::test]
async fn test_refresh_without_credentials_sends_nothing() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.collection("users").auth_refresh().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);
    assert_eq!(err.status_code(), NO_RESPONSE_STATUS);

    let err = client.admins().auth_refresh().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);
}

#[tokio::test]
async fn test_refresh_for_other_collection_is_rejected() {
    let server = MockServer::start().await;
    mount_user_login(&server).await;

    let client = client_for(&server);
    login(&client).await;

    let err = client.admins().auth_refresh().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::State);
    assert!(err.message().contains("_superusers"));
    assert!(client.auth_store().is_user());
}

#[tokio::test]
async fn test_failed_refresh_leaves_state_stale() {
    let server = MockServer::start().await;
    mount_user_login(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/collections/users/auth-refresh"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 401,
            "message": "The request requires valid record authorization token.",
            "data": {}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    login(&client).await;

    let err = client.refresh_auth().await.unwrap_err();
    assert!(err.is_unauthorized());

    // The old credentials are still there; clearing is the caller's call.
    assert!(client.auth_store().is_valid());
    assert_eq!(client.auth_store().token().unwrap().as_str(), "abc");
}

#[tokio::test]
async fn test_unauthorized_is_not_retried() {
    let server = MockServer::start().await;
    mount_user_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "code": 401,
            "message": "The request requires valid record authorization token.",
            "data": {}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/collections/users/auth-refresh"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    login(&client).await;

    let err = client
        .collection("posts")
        .get_list(&QuerySpec::new())
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), 401);
    assert_eq!(client.auth_store().token().unwrap().as_str(), "abc");
}

#[tokio::test]
async fn test_password_reset_and_verification() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/collections/users/request-password-reset"))
        .and(body_json(json!({"email": "user@example.com"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/collections/users/confirm-password-reset"))
        .and(body_json(json!({
            "token": "reset-token",
            "password": "new-secret",
            "passwordConfirm": "new-secret"
        })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/collections/users/request-verification"))
        .and(body_json(json!({"email": "user@example.com"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/collections/users/confirm-verification"))
        .and(body_json(json!({"token": "verify-token"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let users = client_for(&server).collection("users");
    users.request_password_reset("user@example.com").await.unwrap();
    users
        .confirm_password_reset("reset-token", "new-secret", "new-secret")
        .await
        .unwrap();
    users.request_verification("user@example.com").await.unwrap();
    users.confirm_verification("verify-token").await.unwrap();
}

// ============================================================================
// Record Tests
// ============================================================================

#[tokio::test]
async fn test_get_one_not_found() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "not found"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .collection("posts")
        .get_one("missing", None)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.message(), "not found");
}

#[tokio::test]
async fn test_get_one_with_expand() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records/p1"))
        .and(query_param("expand", "author,tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "title": "hello",
            "expand": {
                "author": {"id": "u1", "name": "Ann"},
                "tags": [{"id": "t1"}, {"id": "t2"}]
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let record = client
        .collection("posts")
        .get_one("p1", Some("author,tags"))
        .await
        .unwrap();

    match record.expanded("author") {
        Some(Expanded::One(author)) => assert_eq!(author["name"], "Ann"),
        other => panic!("unexpected author: {:?}", other),
    }
    match record.expanded("tags") {
        Some(Expanded::Many(tags)) => {
            let ids: Vec<_> = tags.iter().map(|t| t.id().to_string()).collect();
            assert_eq!(ids, ["t1", "t2"]);
        }
        other => panic!("unexpected tags: {:?}", other),
    }
}

#[tokio::test]
async fn test_get_list_page() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records"))
        .and(query_param("perPage", "2"))
        .and(query_param_is_missing("page"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "perPage": 2,
            "totalItems": 5,
            "totalPages": 3,
            "items": [{"id": "a"}, {"id": "b"}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let list = client
        .collection("posts")
        .get_list(&QuerySpec::new().with_page(1).with_per_page(2))
        .await
        .unwrap();

    assert_eq!(list.total_pages, 3);
    assert_eq!(list.total_items, 5);
    assert_eq!(list.items.len(), 2);
    assert_eq!(list.items[0].id(), "a");
    assert_eq!(list.items[1].id(), "b");
    assert!(!list.is_last_page());
}

#[tokio::test]
async fn test_get_list_sends_filter_and_sort() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records"))
        .and(query_param("filter", "status = 'published'"))
        .and(query_param("sort", "-created"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "perPage": 30,
            "totalItems": 0,
            "totalPages": 0,
            "items": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let list = client
        .collection("posts")
        .get_list(
            &QuerySpec::new()
                .with_filter("status = 'published'")
                .with_sort("-created"),
        )
        .await
        .unwrap();
    assert!(list.items.is_empty());
}

#[tokio::test]
async fn test_get_full_list_walks_every_page() {
    let server = MockServer::start().await;

    let pages = [
        (None, json!([{"id": "a"}, {"id": "b"}])),
        (Some("2"), json!([{"id": "c"}, {"id": "d"}])),
        (Some("3"), json!([{"id": "e"}])),
    ];
    for (index, (page, items)) in pages.into_iter().enumerate() {
        let mock = Mock::given(method("GET"))
            .and(path("/api/collections/posts/records"))
            .and(query_param("perPage", "2"));
        let mock = match page {
            Some(page) => mock.and(query_param("page", page)),
            None => mock.and(query_param_is_missing("page")),
        };
        mock.respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": index + 1,
            "perPage": 2,
            "totalItems": 5,
            "totalPages": 3,
            "items": items
        })))
        .expect(1)
        .mount(&server)
        .await;
    }

    let client = client_for(&server);
    let records = client
        .collection("posts")
        .get_full_list(&QuerySpec::new().with_per_page(2))
        .await
        .unwrap();

    let ids: Vec<_> = records.iter().map(|r| r.id().to_string()).collect();
    assert_eq!(ids, ["a", "b", "c", "d", "e"]);
}

#[tokio::test]
async fn test_get_full_list_stops_at_reported_last_page() {
    let server = MockServer::start().await;

    // A full page, but the server says there are no more.
    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records"))
        .and(query_param("perPage", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "perPage": 2,
            "totalItems": 2,
            "totalPages": 1,
            "items": [{"id": "a"}, {"id": "b"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let records = client
        .collection("posts")
        .get_full_list(&QuerySpec::new().with_per_page(2))
        .await
        .unwrap();
    assert_eq!(records.len(), 2);
}

#[tokio::test]
async fn test_get_full_list_of_empty_collection() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records"))
        .and(query_param("perPage", "100"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "perPage": 100,
            "totalItems": 0,
            "totalPages": 0,
            "items": []
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let records = client
        .collection("posts")
        .get_full_list(&QuerySpec::new())
        .await
        .unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_create_returns_generated_id() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/collections/posts/records"))
        .and(body_json(json!({"title": "x"})))
        .respond_with(|request: &Request| {
            let mut body: serde_json::Value = request.body_json().unwrap();
            body["id"] = json!("gen123");
            ResponseTemplate::new(200).set_body_json(body)
        })
        .mount(&server)
        .await;

    let client = client_for(&server);
    let record = client
        .collection("posts")
        .create(&json!({"title": "x"}), None)
        .await
        .unwrap();

    assert_eq!(record.id(), "gen123");
    assert_eq!(record["title"], "x");
}

#[tokio::test]
async fn test_create_validation_failure_details() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/collections/posts/records"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "code": 400,
            "message": "Failed to create record.",
            "data": {
                "title": {"code": "validation_required", "message": "Missing required value."}
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .collection("posts")
        .create(&json!({}), None)
        .await
        .unwrap_err();

    let api = err.as_api().unwrap();
    assert_eq!(api.status(), 400);
    assert_eq!(api.field_error("title"), Some("Missing required value."));
}

#[tokio::test]
async fn test_update_uses_patch() {
    let server = MockServer::start().await;

    Mock::given(method("PATCH"))
        .and(path("/api/collections/posts/records/p1"))
        .and(body_json(json!({"title": "renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "p1",
            "title": "renamed",
            "body": "unchanged"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let record = client
        .collection("posts")
        .update("p1", &json!({"title": "renamed"}), None)
        .await
        .unwrap();
    assert_eq!(record["title"], "renamed");
    assert_eq!(record["body"], "unchanged");
}

#[tokio::test]
async fn test_delete_accepts_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/api/collections/posts/records/p1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    client.collection("posts").delete("p1").await.unwrap();
}

// ============================================================================
// Failure Handling Tests
// ============================================================================

#[tokio::test]
async fn test_invalid_input_never_reaches_server() {
    let server = MockServer::start().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let posts = client.collection("posts");

    let err = posts
        .get_list(&QuerySpec::new().with_page(0))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(err.status_code(), NO_RESPONSE_STATUS);

    let err = posts
        .get_full_list(&QuerySpec::new().with_per_page(0))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = posts.get_one("", None).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let err = client.collection("").delete("p1").await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn test_non_json_error_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(502).set_body_string("<html>Bad Gateway</html>"))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client.health().check().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status_code(), 502);
    assert!(!err.message().is_empty());
    assert!(!client.health().is_healthy().await);
}

#[tokio::test]
async fn test_truncated_error_body_keeps_status() {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    // A server that promises a long error body, then hangs up early.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 4096];
        let _ = socket.read(&mut buf).await;
        socket
            .write_all(
                b"HTTP/1.1 500 Internal Server Error\r\n\
                  Content-Type: application/json\r\n\
                  Content-Length: 200\r\n\r\n{\"message\":\"boo",
            )
            .await
            .unwrap();
        socket.shutdown().await.unwrap();
    });

    let client = PocketBase::new(&format!("http://127.0.0.1:{port}")).unwrap();
    let err = client.health().check().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status_code(), 500);
    assert!(!err.message().is_empty());
}

#[tokio::test]
async fn test_undecodable_success_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/collections/posts/records/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"title": "no id"})))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let err = client
        .collection("posts")
        .get_one("p1", None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Api);
    assert_eq!(err.status_code(), 200);
}

#[tokio::test]
async fn test_connection_refused_is_network_error() {
    // Reserve a port, then free it so nothing is listening.
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let client = PocketBase::new(&format!("http://127.0.0.1:{port}")).unwrap();

    let err = client
        .collection("posts")
        .get_list(&QuerySpec::new())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert_eq!(err.status_code(), NO_RESPONSE_STATUS);

    let err = client
        .collection("users")
        .auth_with_password(&Credentials::new("user@example.com", "secret"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
    assert!(!client.auth_store().is_valid());
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "code": 200,
            "message": "API is healthy.",
            "data": {}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server);
    let status = client.health().check().await.unwrap();
    assert_eq!(status.code, 200);
    assert_eq!(status.message, "API is healthy.");
    assert!(client.health().is_healthy().await);
}
