//
//  ship-cli
//  tests/api_client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Client behavior against a mock Ship server.

use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;
use serial_test::serial;

use ship_cli::api::{ApiError, ComponentScope, RelationType, SearchQuery, ShipClient};

const TOKEN: &str = "0123456789abcdef";

fn client(server: &ServerGuard) -> ShipClient {
    ShipClient::new(Some(TOKEN.to_string()), Some(server.url())).unwrap()
}

fn path(endpoint: &str) -> String {
    format!("/api/20151105/{}", endpoint)
}

#[tokio::test]
async fn test_list_without_predicate_uses_base_endpoint() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", path("components").as_str())
        .match_header("authorization", TOKEN)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"identifier": "c1", "name": "Ship"}]"#)
        .create_async()
        .await;

    let components = client(&server).components(None).await.unwrap();

    mock.assert_async().await;
    assert_eq!(components.len(), 1);
    assert_eq!(components[0]["name"], "Ship");
}

#[tokio::test]
async fn test_active_users_search_with_fixed_predicate() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", path("users/search").as_str())
        .match_query(Matcher::UrlEncoded(
            "predicate".into(),
            "inactive == NO".into(),
        ))
        .with_body(r#"[{"identifier": "u1", "name": "Alice"}]"#)
        .create_async()
        .await;

    let users = client(&server).users_active().await.unwrap();

    mock.assert_async().await;
    assert_eq!(users[0]["identifier"], "u1");
}

#[tokio::test]
async fn test_state_transitions_accepts_document_or_identifier() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", path("states/search").as_str())
        .match_query(Matcher::UrlEncoded(
            "predicate".into(),
            "ANY PreviousStates.identifier = 's1'".into(),
        ))
        .with_body(r#"[{"identifier": "s2", "name": "Closed"}]"#)
        .expect(2)
        .create_async()
        .await;

    let client = client(&server);
    let by_id = client.state_transitions("s1").await.unwrap();
    let by_doc = client
        .state_transitions(&json!({ "identifier": "s1", "name": "Open" }))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(by_id, by_doc);
}

#[tokio::test]
async fn test_component_parent_of_root_is_none() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", path("components/search").as_str())
        .match_query(Matcher::UrlEncoded(
            "predicate".into(),
            "ANY children.identifier = 'root'".into(),
        ))
        .with_body("[]")
        .create_async()
        .await;

    let parent = client(&server).component_parent("root").await.unwrap();
    assert!(parent.is_none());
}

#[tokio::test]
async fn test_milestones_active_resolves_component_identifier() {
    let mut server = Server::new_async().await;
    let lookup = server
        .mock("GET", path("components/search").as_str())
        .match_query(Matcher::UrlEncoded(
            "predicate".into(),
            "identifier = 'c9'".into(),
        ))
        .with_body(r#"[{"identifier": "c9", "fullName": "Ship/Mac"}]"#)
        .create_async()
        .await;
    let milestones = server
        .mock("GET", path("milestones/search").as_str())
        .match_query(Matcher::AllOf(vec![
            Matcher::Regex("BEGINSWITH".to_string()),
            Matcher::Regex("Ship%2FMac".to_string()),
        ]))
        .with_body(r#"[{"identifier": "m1", "name": "1.0"}]"#)
        .create_async()
        .await;

    let result = client(&server)
        .milestones_active(Some(ComponentScope::from("c9")))
        .await
        .unwrap();

    lookup.assert_async().await;
    milestones.assert_async().await;
    assert_eq!(result[0]["name"], "1.0");
}

#[tokio::test]
async fn test_milestones_active_unknown_component_is_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", path("components/search").as_str())
        .match_query(Matcher::Any)
        .with_body("[]")
        .create_async()
        .await;

    let err = client(&server)
        .milestones_active(Some(ComponentScope::from("missing")))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn test_problem_search_by_saved_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", path("problems/search").as_str())
        .match_query(Matcher::UrlEncoded(
            "savedQuery".into(),
            "ship://Query/2Kk8ww70TvWEyVO3bzYpkQ".into(),
        ))
        .with_body(r#"[{"identifier": 1, "title": "Crash"}]"#)
        .create_async()
        .await;

    let query = SearchQuery::from_parts(None, Some("ship://Query/2Kk8ww70TvWEyVO3bzYpkQ".into()))
        .unwrap();
    let problems = client(&server).problem_search(&query).await.unwrap();

    mock.assert_async().await;
    assert_eq!(problems[0]["title"], "Crash");
}

#[test]
fn test_problem_search_requires_a_term() {
    let err = SearchQuery::from_parts(None, None).unwrap_err();
    assert!(matches!(err, ApiError::MissingSearchTerm));
}

#[tokio::test]
async fn test_problem_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", path("problems/999").as_str())
        .with_status(404)
        .with_body("No such problem")
        .create_async()
        .await;

    let err = client(&server).problem(999).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(err.to_string().contains("No such problem"));
}

#[tokio::test]
async fn test_server_error_is_not_retried() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", path("priorities").as_str())
        .with_status(500)
        .expect(1)
        .create_async()
        .await;

    let err = client(&server).priorities().await.unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.status().map(|s| s.as_u16()), Some(500));
    assert!(!err.is_not_found());
}

#[tokio::test]
async fn test_problem_create_sends_json_document() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", path("problems").as_str())
        .match_header("authorization", TOKEN)
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({ "title": "Crash on launch" })))
        .with_body(r#"{"identifier": 42, "title": "Crash on launch"}"#)
        .create_async()
        .await;

    let created = client(&server)
        .problem_create(&json!({ "title": "Crash on launch" }))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(created["identifier"], 42);
}

#[tokio::test]
async fn test_problem_update_uses_patch() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PATCH", path("problems/42").as_str())
        .match_body(Matcher::Json(json!({ "state": { "identifier": 2 } })))
        .with_body(r#"{"identifier": 42}"#)
        .create_async()
        .await;

    client(&server)
        .problem_update(42, &json!({ "state": { "identifier": 2 } }))
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_keyword_is_encoded_as_single_segment() {
    let mut server = Server::new_async().await;
    let set = server
        .mock("PUT", path("problems/7/keywords/needs%2Ftriage%20now").as_str())
        .match_body(Matcher::Json(json!("high")))
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", path("problems/7/keywords/needs%2Ftriage%20now").as_str())
        .create_async()
        .await;

    let client = client(&server);
    client
        .problem_keyword_set(7, "needs/triage now", Some("high"))
        .await
        .unwrap();
    client
        .problem_keyword_delete(7, "needs/triage now")
        .await
        .unwrap();

    set.assert_async().await;
    delete.assert_async().await;
}

#[tokio::test]
async fn test_relationship_add_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", path("problems/10/relationships").as_str())
        .match_body(Matcher::Json(json!({
            "type": "BlockedBy",
            "problemIdentifier": 3
        })))
        .create_async()
        .await;

    client(&server)
        .problem_relationship_add(10, RelationType::BlockedBy, 3)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_relationship_delete_sends_relationship_verbatim() {
    let mut server = Server::new_async().await;
    let relationship = json!({ "type": "RelatedTo", "problemIdentifier": 5 });
    let mock = server
        .mock("DELETE", path("problems/10/relationships").as_str())
        .match_body(Matcher::Json(relationship.clone()))
        .create_async()
        .await;

    client(&server)
        .problem_relationship_delete(10, &relationship)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_comment_without_html_omits_field() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", path("problems/10/comments").as_str())
        .match_body(Matcher::Json(json!({ "text": "Reproduced on 10.11" })))
        .with_body("{}")
        .create_async()
        .await;

    client(&server)
        .problem_comments_append(10, "Reproduced on 10.11", None)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_watcher_email_and_identifier() {
    let mut server = Server::new_async().await;
    let by_email = server
        .mock("PUT", path("problems/10/watchers").as_str())
        .match_body(Matcher::Json(json!({ "email": "bob@example.com" })))
        .create_async()
        .await;
    let by_id = server
        .mock("PUT", path("problems/10/watchers").as_str())
        .match_body(Matcher::Json(json!({ "identifier": "u7" })))
        .create_async()
        .await;

    let client = client(&server);
    client
        .problem_watchers_add(10, "bob@example.com")
        .await
        .unwrap();
    client.problem_watchers_add(10, "u7").await.unwrap();

    by_email.assert_async().await;
    by_id.assert_async().await;
}

#[tokio::test]
async fn test_dry_run_sends_no_writes_but_reads_still_work() {
    let mut server = Server::new_async().await;
    let write = server
        .mock("POST", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let put = server
        .mock("PUT", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let read = server
        .mock("GET", path("problems/1").as_str())
        .with_body(r#"{"identifier": 1}"#)
        .create_async()
        .await;

    let client = client(&server).with_dry_run(true);
    assert!(client.is_dry_run());

    let created = client
        .problem_create(&json!({ "title": "Crash" }))
        .await
        .unwrap();
    assert_eq!(created, json!({}));
    client
        .problem_relationship_add(1, RelationType::ParentOf, 2)
        .await
        .unwrap();
    let problem = client.problem(1).await.unwrap();

    write.assert_async().await;
    put.assert_async().await;
    read.assert_async().await;
    assert_eq!(problem["identifier"], 1);
}

#[tokio::test]
async fn test_list_endpoint_returning_object_is_invalid() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", path("classifications").as_str())
        .with_body(r#"{"unexpected": true}"#)
        .create_async()
        .await;

    let err = client(&server).classifications().await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidResponse(_)));
}

#[test]
#[serial]
fn test_missing_token_is_config_error() {
    std::env::remove_var("SHIP_API_TOKEN");
    let err = ShipClient::new(None, None).unwrap_err();
    assert!(err.is_config());
}

#[test]
#[serial]
fn test_token_read_from_environment() {
    std::env::set_var("SHIP_API_TOKEN", "from-env");
    let client = ShipClient::new(None, None);
    std::env::remove_var("SHIP_API_TOKEN");
    assert_eq!(client.unwrap().token().as_str(), "from-env");
}

#[tokio::test]
async fn test_me_searches_for_api_user() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", path("users/search").as_str())
        .match_query(Matcher::UrlEncoded(
            "predicate".into(),
            "identifier == $ApiUser".into(),
        ))
        .with_body(r#"[{"identifier": "u1", "name": "Script"}]"#)
        .create_async()
        .await;

    let me = client(&server).me().await.unwrap();

    mock.assert_async().await;
    assert_eq!(me[0]["name"], "Script");
}

#[tokio::test]
async fn test_component_children_predicate() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", path("components/search").as_str())
        .match_query(Matcher::UrlEncoded(
            "predicate".into(),
            "parent.identifier = 'c1'".into(),
        ))
        .with_body(r#"[{"identifier": "c2"}, {"identifier": "c3"}]"#)
        .create_async()
        .await;

    let children = client(&server)
        .component_children(&json!({ "identifier": "c1" }))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(children.len(), 2);
}

#[tokio::test]
async fn test_milestones_active_without_scope() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", path("milestones/search").as_str())
        .match_query(Matcher::UrlEncoded(
            "predicate".into(),
            "(StartDate == nil || StartDate < NOW()) AND (EndDate == nil || EndDate > NOW())"
                .into(),
        ))
        .with_body(r#"[{"identifier": "m1"}]"#)
        .create_async()
        .await;

    let milestones = client(&server).milestones_active(None).await.unwrap();

    mock.assert_async().await;
    assert_eq!(milestones.len(), 1);
}

#[tokio::test]
async fn test_initial_states() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", path("states/search").as_str())
        .match_query(Matcher::UrlEncoded(
            "predicate".into(),
            "Initial = YES".into(),
        ))
        .with_body(r#"[{"identifier": "s1", "name": "Open"}, {"identifier": "s4"}]"#)
        .expect(2)
        .create_async()
        .await;

    let client = client(&server);
    let all = client.states_initial().await.unwrap();
    let first = client.state_initial().await.unwrap();

    mock.assert_async().await;
    assert_eq!(all.len(), 2);
    assert_eq!(first.unwrap()["name"], "Open");
}

#[tokio::test]
async fn test_state_initial_none_when_workflow_has_no_start() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", path("states/search").as_str())
        .match_query(Matcher::Any)
        .with_body("[]")
        .create_async()
        .await;

    assert!(client(&server).state_initial().await.unwrap().is_none());
}

#[tokio::test]
async fn test_problem_sub_resource_listings() {
    let mut server = Server::new_async().await;
    let relationships = server
        .mock("GET", path("problems/10/relationships").as_str())
        .with_body(r#"[{"type": "BlockedBy", "problemIdentifier": 3}]"#)
        .create_async()
        .await;
    let comments = server
        .mock("GET", path("problems/10/comments").as_str())
        .with_body(r#"[{"text": "Reproduced"}]"#)
        .create_async()
        .await;
    let watchers = server
        .mock("GET", path("problems/10/watchers").as_str())
        .with_body(r#"[{"identifier": "u1"}, {"identifier": "u2"}]"#)
        .create_async()
        .await;

    let client = client(&server);
    let rels = client.problem_relationships(10).await.unwrap();
    let notes = client.problem_comments(10).await.unwrap();
    let users = client.problem_watchers(10).await.unwrap();

    relationships.assert_async().await;
    comments.assert_async().await;
    watchers.assert_async().await;
    assert_eq!(rels[0]["type"], "BlockedBy");
    assert_eq!(notes[0]["text"], "Reproduced");
    assert_eq!(users.len(), 2);
}

#[tokio::test]
async fn test_dry_run_suppresses_patch_and_delete() {
    let mut server = Server::new_async().await;
    let patch = server
        .mock("PATCH", Matcher::Any)
        .expect(0)
        .create_async()
        .await;
    let delete = server
        .mock("DELETE", Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let client = client(&server).with_dry_run(true);
    let updated = client
        .problem_update(42, &json!({ "title": "Renamed" }))
        .await
        .unwrap();
    client.problem_keyword_delete(42, "triage").await.unwrap();
    client
        .problem_relationship_delete(42, &json!({ "type": "RelatedTo", "problemIdentifier": 5 }))
        .await
        .unwrap();

    patch.assert_async().await;
    delete.assert_async().await;
    assert_eq!(updated, json!({}));
}

#[tokio::test]
async fn test_rejected_write_is_an_error() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", path("problems/10/watchers").as_str())
        .with_status(403)
        .with_body("Forbidden")
        .expect(1)
        .create_async()
        .await;

    let err = client(&server)
        .problem_watchers_add(10, "u7")
        .await
        .unwrap_err();

    mock.assert_async().await;
    assert_eq!(err.status().map(|s| s.as_u16()), Some(403));
    assert!(err.to_string().contains("Forbidden"));
}

#[tokio::test]
async fn test_keyword_set_without_value_sends_no_body() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("PUT", path("problems/7/keywords/triage").as_str())
        .match_header("authorization", TOKEN)
        .match_body(Matcher::Exact(String::new()))
        .create_async()
        .await;

    client(&server)
        .problem_keyword_set(7, "triage", None)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_watcher_user_document_sent_verbatim() {
    let mut server = Server::new_async().await;
    let user = json!({ "identifier": "u1", "name": "Alice", "email": "alice@example.com" });
    let mock = server
        .mock("PUT", path("problems/10/watchers").as_str())
        .match_body(Matcher::Json(user.clone()))
        .create_async()
        .await;

    let map = user.as_object().unwrap().clone();
    client(&server).problem_watchers_add(10, map).await.unwrap();

    mock.assert_async().await;
}
