mod common;

use common::{TestContext, gemini_questions, gemini_reply};
use mockito::Matcher;
use predicates::prelude::*;
use serde_json::json;

const GEMINI_PATH: &str = "/models/gemini-test:generateContent";
const COMMIT_PATH: &str = "/projects/demo/databases/(default)/documents:commit";
const ARCHIVE_PATH: &str =
    "/projects/demo/databases/(default)/documents/question_archive/2025-11-03";

const FIVE: [&str; 5] = [
    "Should Toronto expand bike lanes?",
    "Is remote work here to stay?",
    "Should the TTC run 24 hours?",
    "Is AI moving too fast?",
    "Should homework be banned?",
];

#[test]
fn generate_publishes_archive_then_daily() {
    let mut server = mockito::Server::new();
    let gemini = server
        .mock("POST", GEMINI_PATH)
        .match_header("x-goog-api-key", "test-key")
        .with_status(200)
        .with_body(gemini_questions(&FIVE))
        .expect(1)
        .create();
    let _archive = server.mock("GET", ARCHIVE_PATH).with_status(404).create();
    let archive_write = server
        .mock("POST", COMMIT_PATH)
        .match_body(Matcher::PartialJson(json!({
            "writes": [{ "currentDocument": { "exists": false } }]
        })))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create();
    let daily_write = server
        .mock("POST", COMMIT_PATH)
        .match_body(Matcher::PartialJson(json!({
            "writes": [{
                "update": {
                    "name": "projects/demo/databases/(default)/documents/config/daily",
                    "fields": { "date": { "stringValue": "2025-11-03" } }
                }
            }]
        })))
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create();

    let ctx = TestContext::new();
    ctx.write_mock_config(&server.url());

    ctx.cli()
        .args(["generate", "--date", "2025-11-03"])
        .env("GEMINI_API_KEY", "test-key")
        .assert()
        .success()
        .stdout(predicate::str::contains("✅ Published 5 questions for 2025-11-03"))
        .stdout(predicate::str::contains("1. Should Toronto expand bike lanes?"));

    gemini.assert();
    archive_write.assert();
    daily_write.assert();
}

#[test]
fn short_batch_writes_nothing() {
    let mut server = mockito::Server::new();
    let _gemini = server
        .mock("POST", GEMINI_PATH)
        .with_status(200)
        .with_body(gemini_questions(&FIVE[..4]))
        .create();
    let _archive = server.mock("GET", ARCHIVE_PATH).with_status(404).create();
    let commit = server.mock("POST", COMMIT_PATH).expect(0).create();

    let ctx = TestContext::new();
    ctx.write_mock_config(&server.url());

    ctx.cli()
        .args(["generate", "--date", "2025-11-03"])
        .env("GEMINI_API_KEY", "test-key")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 5 questions, got 4"));

    commit.assert();
}

#[test]
fn existing_archive_is_republished() {
    let mut server = mockito::Server::new();
    let gemini = server.mock("POST", GEMINI_PATH).expect(0).create();
    let values: Vec<_> = FIVE.iter().map(|q| json!({ "stringValue": q })).collect();
    let _archive = server
        .mock("GET", ARCHIVE_PATH)
        .with_status(200)
        .with_body(
            json!({
                "fields": {
                    "questions": { "arrayValue": { "values": values } },
                    "date": { "stringValue": "2025-11-03" },
                    "createdAt": { "timestampValue": "2025-11-03T17:00:00.000Z" }
                }
            })
            .to_string(),
        )
        .create();
    let daily_write = server
        .mock("POST", COMMIT_PATH)
        .with_status(200)
        .with_body("{}")
        .expect(1)
        .create();

    let ctx = TestContext::new();
    ctx.write_mock_config(&server.url());

    ctx.cli()
        .args(["generate", "--date", "2025-11-03"])
        .env("GEMINI_API_KEY", "test-key")
        .assert()
        .success()
        .stdout(predicate::str::contains("Republished archived questions for 2025-11-03"));

    gemini.assert();
    daily_write.assert();
}

#[test]
fn dry_run_never_touches_store() {
    let mut server = mockito::Server::new();
    let _gemini = server
        .mock("POST", GEMINI_PATH)
        .with_status(200)
        .with_body(gemini_questions(&FIVE))
        .create();
    let store = server.mock("POST", COMMIT_PATH).expect(0).create();

    let ctx = TestContext::new();
    ctx.write_mock_config(&server.url());

    ctx.cli()
        .args(["generate", "--dry-run", "--date", "2025-11-03"])
        .env("GEMINI_API_KEY", "test-key")
        .assert()
        .success()
        .stdout(predicate::str::contains("dry run, nothing written"))
        .stdout(predicate::str::contains("5. Should homework be banned?"));

    store.assert();
}

#[test]
fn headline_mode_seeds_statements() {
    let mut server = mockito::Server::new();
    let _news = server
        .mock("GET", "/v2/top-headlines")
        .match_query(Matcher::UrlEncoded("apiKey".into(), "news-key".into()))
        .with_status(200)
        .with_body(
            json!({ "articles": [{ "title": "Rent cap debate", "description": null }] })
                .to_string(),
        )
        .create();
    let _statement = server
        .mock("POST", GEMINI_PATH)
        .match_body(Matcher::PartialJson(json!({
            "generationConfig": { "responseMimeType": "text/plain" }
        })))
        .with_status(200)
        .with_body(gemini_reply("\"Ottawa should cap rent increases.\""))
        .expect(1)
        .create();
    let _fill = server
        .mock("POST", GEMINI_PATH)
        .match_body(Matcher::PartialJson(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .with_status(200)
        .with_body(gemini_questions(&FIVE[..4]))
        .expect(1)
        .create();

    let ctx = TestContext::new();
    ctx.write_mock_config(&server.url());

    ctx.cli()
        .args(["generate", "--mode", "headlines", "--dry-run", "--date", "2025-11-03"])
        .env("GEMINI_API_KEY", "test-key")
        .env("NEWS_API_KEY", "news-key")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 seeded from headlines"))
        .stdout(predicate::str::contains("1. Ottawa should cap rent increases."));
}

#[test]
fn missing_api_key_is_reported() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["generate", "--dry-run"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("GEMINI_API_KEY environment variable not set"));
}

#[test]
fn invalid_date_is_rejected_by_parser() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["generate", "--date", "03/11/2025"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected YYYY-MM-DD"));
}
