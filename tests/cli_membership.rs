mod common;

use common::TestContext;
use mockito::Matcher;
use predicates::prelude::*;
use serde_json::json;

const COMMIT_PATH: &str = "/projects/demo/databases/(default)/documents:commit";
const ECHO_PATH: &str = "/projects/demo/databases/(default)/documents/groups/Echo";

#[test]
fn assign_registers_user_with_array_union() {
    let mut server = mockito::Server::new();
    let commit = server
        .mock("POST", COMMIT_PATH)
        .match_body(Matcher::PartialJson(json!({
            "writes": [{
                "update": { "name": "projects/demo/databases/(default)/documents/groups/Anubis" },
                "updateTransforms": [{
                    "fieldPath": "members",
                    "appendMissingElements": { "values": [{ "stringValue": "user9" }] }
                }]
            }]
        })))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create();

    let ctx = TestContext::new();
    ctx.write_mock_config(&server.url());

    ctx.cli()
        .args(["assign", "user9", "agree", "disagree", "agree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Assigned user9 to Anubis (101)"));

    commit.assert();
}

#[test]
fn assign_with_wrong_answer_count_writes_nothing() {
    let mut server = mockito::Server::new();
    let commit = server.mock("POST", COMMIT_PATH).expect(0).create();

    let ctx = TestContext::new();
    ctx.write_mock_config(&server.url());

    ctx.cli()
        .args(["assign", "user1", "yes", "no", "yes", "no"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid response vector"));

    commit.assert();
}

#[test]
fn assign_surfaces_store_unavailable() {
    let mut server = mockito::Server::new();
    let commit = server
        .mock("POST", COMMIT_PATH)
        .with_status(503)
        .with_body(r#"{"error": {"status": "UNAVAILABLE"}}"#)
        .expect(1)
        .create();

    let ctx = TestContext::new();
    ctx.write_mock_config(&server.url());

    ctx.cli()
        .args(["assign", "user1", "no", "no", "no"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Store unavailable"));

    commit.assert();
}

#[test]
fn assign_without_project_id_fails() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["assign", "user1", "no", "no", "no"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("firestore.project_id is not set"));
}

#[test]
fn assign_input_errors_win_over_missing_store_config() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["assign", "user1", "yes", "no"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid response vector"))
        .stderr(predicate::str::contains("project_id").not());
}

#[test]
fn members_lists_sorted_ids() {
    let mut server = mockito::Server::new();
    let _get = server
        .mock("GET", ECHO_PATH)
        .with_status(200)
        .with_body(
            json!({
                "fields": { "members": { "arrayValue": { "values": [
                    { "stringValue": "zed" },
                    { "stringValue": "amy" }
                ] } } }
            })
            .to_string(),
        )
        .create();

    let ctx = TestContext::new();
    ctx.write_mock_config(&server.url());

    ctx.cli().args(["members", "Echo"]).assert().success().stdout(predicate::str::diff("amy\nzed\n"));
}

#[test]
fn members_of_missing_group_document_is_empty() {
    let mut server = mockito::Server::new();
    let _get = server.mock("GET", ECHO_PATH).with_status(404).create();

    let ctx = TestContext::new();
    ctx.write_mock_config(&server.url());

    ctx.cli()
        .args(["members", "Echo"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No members in Echo"));
}

#[test]
fn members_of_unknown_group_fails() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["members", "Pluto"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown group 'Pluto'"))
        .stderr(predicate::str::contains("project_id").not());
}
