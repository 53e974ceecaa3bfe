//! End-to-end tests for the JSON API: routing, filtering, creation, and the
//! error taxonomy, all over a real server socket.

mod common;

use common::{get, json_body, parse_response, post_json, start_service};
use serde_json::json;

#[test]
fn welcome_payload_at_api_root() {
    let (handle, addr) = start_service();
    let resp = get(&addr, "/api");
    handle.stop();

    let (status, content_type, _) = parse_response(&resp);
    assert_eq!(status, 200);
    assert_eq!(content_type, "application/json; charset=utf-8");
    let body = json_body(&resp);
    assert_eq!(body["ok"], true);
    assert!(body["message"].is_string());
}

#[test]
fn lists_seed_roster_in_order() {
    let (handle, addr) = start_service();
    let resp = get(&addr, "/api/marines");
    handle.stop();

    let (status, _, _) = parse_response(&resp);
    assert_eq!(status, 200);
    let items = json_body(&resp);
    let items = items.as_array().unwrap();
    assert_eq!(items.len(), 8);
    assert_eq!(items[0]["name"], "Titus");
    assert_eq!(items[2]["status"], false);
    assert_eq!(items[7]["name"], "Klaus");
}

#[test]
fn filters_by_chapter_exactly() {
    let (handle, addr) = start_service();
    let wolves = json_body(&get(&addr, "/api/marines?chapter=Space%20Wolves"));
    let lowercase = json_body(&get(&addr, "/api/marines?chapter=space%20wolves"));
    handle.stop();

    let wolves = wolves.as_array().unwrap();
    assert_eq!(wolves.len(), 2);
    assert_eq!(wolves[0]["name"], "Dimitri");
    assert_eq!(wolves[1]["name"], "Klaus");
    // Strict string equality: case differences do not match.
    assert_eq!(lowercase.as_array().unwrap().len(), 0);
}

#[test]
fn gets_record_by_id() {
    let (handle, addr) = start_service();
    let resp = get(&addr, "/api/marines/1");
    handle.stop();

    let (status, _, _) = parse_response(&resp);
    assert_eq!(status, 200);
    assert_eq!(
        json_body(&resp),
        json!({
            "id": 1,
            "name": "Titus",
            "rank": "Captain",
            "chapter": "Ultramarines",
            "status": true
        })
    );
}

#[test]
fn unknown_id_and_non_digit_ids_are_404() {
    let (handle, addr) = start_service();
    let missing = get(&addr, "/api/marines/99");
    let non_digit = get(&addr, "/api/marines/abc");
    let mixed = get(&addr, "/api/marines/12abc");
    handle.stop();

    for resp in [missing, non_digit, mixed] {
        let (status, _, _) = parse_response(&resp);
        assert_eq!(status, 404);
        assert_eq!(json_body(&resp), json!({ "error": "Not Found" }));
    }
}

#[test]
fn end_to_end_create_then_fetch() {
    let (handle, addr) = start_service();

    let created = post_json(
        &addr,
        "/api/marines",
        r#"{"name":"Varro","rank":"Scout","chapter":"Imperial Fists"}"#,
    );
    let (status, content_type, _) = parse_response(&created);
    assert_eq!(status, 201);
    assert_eq!(content_type, "application/json; charset=utf-8");
    let expected = json!({
        "id": 9,
        "name": "Varro",
        "rank": "Scout",
        "chapter": "Imperial Fists",
        "status": true
    });
    assert_eq!(json_body(&created), expected);

    let fetched = get(&addr, "/api/marines/9");
    handle.stop();
    let (status, _, _) = parse_response(&fetched);
    assert_eq!(status, 200);
    assert_eq!(json_body(&fetched), expected);
}

#[test]
fn created_ids_increase_monotonically() {
    let (handle, addr) = start_service();
    let first = json_body(&post_json(
        &addr,
        "/api/marines",
        r#"{"name":"Aeon","rank":"Scout","chapter":"Grey Knights"}"#,
    ));
    let second = json_body(&post_json(
        &addr,
        "/api/marines",
        r#"{"name":"Brom","rank":"Marine","chapter":"Grey Knights"}"#,
    ));
    handle.stop();

    assert_eq!(first["id"], 9);
    assert_eq!(second["id"], 10);
}

#[test]
fn missing_fields_yield_400_and_leave_store_unchanged() {
    let (handle, addr) = start_service();
    let resp = post_json(&addr, "/api/marines", r#"{"name":"Varro"}"#);
    let roster = json_body(&get(&addr, "/api/marines"));
    handle.stop();

    let (status, _, _) = parse_response(&resp);
    assert_eq!(status, 400);
    assert_eq!(
        json_body(&resp),
        json!({ "error": "name, rank and chapter are required" })
    );
    assert_eq!(roster.as_array().unwrap().len(), 8);
}

#[test]
fn empty_post_body_fails_field_validation() {
    let (handle, addr) = start_service();
    let resp = post_json(&addr, "/api/marines", "");
    handle.stop();

    let (status, _, _) = parse_response(&resp);
    assert_eq!(status, 400);
    assert_eq!(
        json_body(&resp),
        json!({ "error": "name, rank and chapter are required" })
    );
}

#[test]
fn malformed_json_yields_invalid_json_error() {
    let (handle, addr) = start_service();
    let resp = post_json(&addr, "/api/marines", "{not json");
    handle.stop();

    let (status, _, _) = parse_response(&resp);
    assert_eq!(status, 400);
    assert_eq!(json_body(&resp), json!({ "error": "Invalid JSON" }));
}

#[test]
fn unknown_routes_are_404_json() {
    let (handle, addr) = start_service();
    let missing_path = get(&addr, "/nonexistent");
    let wrong_method = send_delete(&addr, "/api/marines");
    handle.stop();

    for resp in [missing_path, wrong_method] {
        let (status, content_type, _) = parse_response(&resp);
        assert_eq!(status, 404);
        assert_eq!(content_type, "application/json; charset=utf-8");
        assert_eq!(json_body(&resp), json!({ "error": "Not Found" }));
    }
}

fn send_delete(addr: &std::net::SocketAddr, path: &str) -> String {
    common::send_request(addr, &format!("DELETE {path} HTTP/1.1\r\nHost: x\r\n\r\n"))
}
