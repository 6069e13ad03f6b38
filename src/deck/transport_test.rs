use crate::deck::*;
use serde_json::json;

fn config() -> DeckConfig {
    DeckConfig {
        url: "https://cloud.example".to_string(),
        username: "alice".to_string(),
        password: "secret".to_string(),
    }
}

#[test]
fn test_rest_and_ocs_urls() {
    let transport = HttpTransport::new(&config());

    assert_eq!(
        transport.url(Namespace::Rest, "/boards/1"),
        "https://cloud.example/index.php/apps/deck/api/v1.0/boards/1"
    );
    assert_eq!(
        transport.url(Namespace::Ocs, "/cards/9/comments"),
        "https://cloud.example/ocs/v2.php/apps/deck/api/v1.0/cards/9/comments"
    );
}

#[test]
fn test_unwrap_ocs_envelope() {
    let wrapped = json!({
        "ocs": {
            "meta": {"status": "ok", "statuscode": 200},
            "data": [{"id": 1, "message": "hello"}]
        }
    });
    assert_eq!(unwrap_ocs(wrapped), json!([{"id": 1, "message": "hello"}]));
}

#[test]
fn test_unwrap_ocs_leaves_plain_bodies_alone() {
    let plain = json!({"id": 1, "title": "Board"});
    assert_eq!(unwrap_ocs(plain.clone()), plain);

    let list = json!([{"id": 1}]);
    assert_eq!(unwrap_ocs(list.clone()), list);
}

#[test]
fn test_request_constructors() {
    let get = RemoteRequest::get(Namespace::Rest, "/boards");
    assert_eq!(get.method, Method::Get);
    assert!(get.body.is_none());

    let put = RemoteRequest::put(Namespace::Rest, "/boards/1", json!({"title": "x"}));
    assert_eq!(put.method, Method::Put);
    assert_eq!(put.body, Some(json!({"title": "x"})));
}
