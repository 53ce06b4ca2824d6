//! Integration tests for objects and tag values.

use fluiddb_client::{Error, Object, TagValue};
use fluiddb_core::VALUE_CONTENT_TYPE;
use serde_json::json;
use wiremock::matchers::{body_json, body_string, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

use crate::common::{TestHarness, error_response, json_response, value_response};

const TAG_VALUE_PATH: &str = "/objects/obj-1/alice/rating";

async fn mount_round_trip(h: &TestHarness, json_text: &str) {
    Mock::given(method("PUT"))
        .and(path(TAG_VALUE_PATH))
        .and(header("content-type", VALUE_CONTENT_TYPE))
        .and(body_string(json_text))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("GET"))
        .and(path(TAG_VALUE_PATH))
        .respond_with(value_response(json_text))
        .expect(2)
        .mount(&h.server)
        .await;
}

async fn round_trip(value: TagValue, json_text: &str) {
    let h = TestHarness::start().await;
    mount_round_trip(&h, json_text).await;

    let connector = h.logged_in_connector();
    let object = Object::new(&connector, "obj-1", "").unwrap();
    object.tag("alice/rating", value.clone()).await.unwrap();

    let raw = object.tag_value("alice/rating").await.unwrap();
    assert_eq!(raw.body(), json_text);
    assert_eq!(raw.content_type(), VALUE_CONTENT_TYPE);
    assert_eq!(object.typed_tag_value("alice/rating").await.unwrap(), value);
}

#[tokio::test]
async fn test_bool_round_trip() {
    round_trip(TagValue::from(true), "true").await;
}

#[tokio::test]
async fn test_int_round_trip() {
    round_trip(TagValue::from(1), "1").await;
}

#[tokio::test]
async fn test_string_round_trip() {
    round_trip(TagValue::from("foo"), "\"foo\"").await;
}

#[tokio::test]
async fn test_set_round_trip_keeps_order() {
    round_trip(TagValue::from(vec!["foo", "bar"]), r#"["foo","bar"]"#).await;
}

#[tokio::test]
async fn test_null_and_float_values() {
    let h = TestHarness::start().await;
    Mock::given(method("PUT"))
        .and(path(TAG_VALUE_PATH))
        .and(body_string("null"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("PUT"))
        .and(path(TAG_VALUE_PATH))
        .and(body_string("1.5"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;

    let connector = h.logged_in_connector();
    let object = Object::new(&connector, "obj-1", "").unwrap();
    object.tag("alice/rating", None::<bool>).await.unwrap();
    object.tag("alice/rating", 1.5).await.unwrap();
}

#[tokio::test]
async fn test_non_finite_float_is_rejected() {
    let h = TestHarness::start().await;
    Mock::given(method("PUT"))
        .and(path(TAG_VALUE_PATH))
        .respond_with(ResponseTemplate::new(204))
        .expect(0)
        .mount(&h.server)
        .await;

    let connector = h.logged_in_connector();
    let object = Object::new(&connector, "obj-1", "").unwrap();
    for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
        let err = object.tag("alice/rating", value).await.unwrap_err();
        assert!(matches!(err, Error::Format(_)));
    }
    assert_eq!(h.request_count().await, 0);
}

#[tokio::test]
async fn test_wrapped_value_in_json_mode() {
    let h = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path(TAG_VALUE_PATH))
        .and(query_param("format", "json"))
        .respond_with(json_response(200, json!({ "value": 7 })))
        .expect(1)
        .mount(&h.server)
        .await;

    let mut connector = h.connector();
    connector.set_always_use_json(true);
    let object = Object::new(&connector, "obj-1", "").unwrap();
    assert_eq!(
        object.typed_tag_value("alice/rating").await.unwrap(),
        TagValue::Int(7)
    );
}

#[tokio::test]
async fn test_has_tag() {
    let h = TestHarness::start().await;
    Mock::given(method("HEAD"))
        .and(path(TAG_VALUE_PATH))
        .respond_with(ResponseTemplate::new(200))
        .mount(&h.server)
        .await;
    Mock::given(method("HEAD"))
        .and(path("/objects/obj-1/alice/missing"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&h.server)
        .await;

    let connector = h.connector();
    let object = Object::new(&connector, "obj-1", "").unwrap();
    assert!(object.has_tag("alice/rating").await.unwrap());
    assert!(!object.has_tag("alice/missing").await.unwrap());
}

#[tokio::test]
async fn test_delete_tag() {
    let h = TestHarness::start().await;
    Mock::given(method("DELETE"))
        .and(path(TAG_VALUE_PATH))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&h.server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/objects/obj-1/bob/rating"))
        .respond_with(error_response(401, "TPathPermissionDenied", "req-3"))
        .mount(&h.server)
        .await;

    let connector = h.logged_in_connector();
    let object = Object::new(&connector, "obj-1", "").unwrap();
    object.delete_tag("alice/rating").await.unwrap();
    assert!(object.delete_tag("bob/rating").await.unwrap_err().is_unauthorized());
}

#[tokio::test]
async fn test_lazy_about_and_tag_paths() {
    let h = TestHarness::start().await;
    Mock::given(method("GET"))
        .and(path("/objects/obj-1"))
        .and(query_param("showAbout", "True"))
        .respond_with(json_response(
            200,
            json!({ "about": "book:dune", "tagPaths": ["fluiddb/about", "alice/rating"] }),
        ))
        .expect(1)
        .mount(&h.server)
        .await;

    let connector = h.connector();
    let mut object = Object::new(&connector, "obj-1", "").unwrap();
    assert_eq!(object.about().await.unwrap(), Some("book:dune"));
    assert_eq!(
        object.tag_paths().await.unwrap(),
        ["fluiddb/about", "alice/rating"]
    );
}

#[tokio::test]
async fn test_create_object_with_about() {
    let h = TestHarness::start().await;
    Mock::given(method("POST"))
        .and(path("/objects"))
        .and(body_json(json!({ "about": "book:dune" })))
        .respond_with(json_response(
            201,
            json!({ "id": "obj-9", "URI": "http://fluiddb/objects/obj-9" }),
        ))
        .expect(1)
        .mount(&h.server)
        .await;

    let db = h.logged_in_db();
    let mut object = db.create_object(Some("book:dune")).await.unwrap();
    assert_eq!(object.id(), "obj-9");
    assert_eq!(object.about().await.unwrap(), Some("book:dune"));
    assert_eq!(h.request_count().await, 1);
}
