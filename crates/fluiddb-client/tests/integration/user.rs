//! Integration tests for users.

use fluiddb_client::{Error, User};
use serde_json::json;
use wiremock::Mock;
use wiremock::matchers::{header, method, path};

use crate::common::{AUTH_HEADER, TestHarness, error_response, json_response};

async fn mount_alice(h: &TestHarness) {
    Mock::given(method("GET"))
        .and(path("/users/alice"))
        .respond_with(json_response(200, json!({ "id": "user-alice", "name": "alice" })))
        .mount(&h.server)
        .await;
}

#[tokio::test]
async fn test_get_item() {
    let h = TestHarness::start().await;
    mount_alice(&h).await;

    let connector = h.connector();
    let mut user = User::new(&connector, "", "alice").unwrap();
    assert_eq!(user.id(), "");
    user.get_item().await.unwrap();
    assert_eq!(user.id(), "user-alice");
    assert_eq!(user.name(), "alice");
}

#[tokio::test]
async fn test_root_namespace() {
    let h = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/namespaces/alice"))
        .respond_with(json_response(
            200,
            json!({
                "id": "ns-alice",
                "description": "Object for the user named alice",
                "namespaceNames": ["private"],
                "tagNames": [],
            }),
        ))
        .expect(1)
        .mount(&h.server)
        .await;

    let connector = h.connector();
    let user = User::new(&connector, "user-alice", "alice").unwrap();
    let mut root = user.root_namespace().await.unwrap();
    assert_eq!(root.id(), "ns-alice");
    assert_eq!(root.name(), "alice");
    assert_eq!(root.namespace_names().await.unwrap(), ["private"]);
}

#[tokio::test]
async fn test_logged_in_user() {
    let h = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/users/alice"))
        .and(header("authorization", AUTH_HEADER))
        .respond_with(json_response(200, json!({ "id": "user-alice", "name": "alice" })))
        .expect(1)
        .mount(&h.server)
        .await;

    let db = h.logged_in_db();
    let user = db.logged_in_user().await.unwrap();
    assert_eq!(user.id(), "user-alice");
}

#[tokio::test]
async fn test_logged_in_user_requires_login() {
    let h = TestHarness::start().await;
    let db = h.db();
    let err = db.logged_in_user().await.unwrap_err();
    assert!(matches!(err, Error::Config { .. }));
    assert_eq!(h.request_count().await, 0);
}

#[tokio::test]
async fn test_facade_user_lookup() {
    let h = TestHarness::start().await;
    mount_alice(&h).await;
    Mock::given(method("GET"))
        .and(path("/users/nobody"))
        .respond_with(error_response(404, "TNoSuchUser", "req-5"))
        .mount(&h.server)
        .await;

    let db = h.db();
    let alice = db.user("alice").await.unwrap().unwrap();
    assert_eq!(alice.id(), "user-alice");
    assert!(db.user("nobody").await.unwrap().is_none());
}
