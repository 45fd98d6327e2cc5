//! End-to-end tests of `GitHubChecker` against a mock GitHub API.

use std::path::Path;
use std::process::Command;
use std::time::{Duration, Instant};

use github_checker::{
    config, ApiError, CheckRunId, CheckRunStatus, CheckerClient, CheckerError, CreateCheckRunOptions,
    GitHubChecker, RetryPolicy, UpdateCheckRunOptions,
};
use mockito::{Matcher, Mock, ServerGuard};
use octocrab::Octocrab;
use serde_json::json;

const CHECK_RUN_PATH: &str = "/repos/octo/hello/check-runs/42";

fn octocrab(server: &ServerGuard) -> Octocrab {
    config::client(&server.url(), "t0ken".to_owned()).unwrap()
}

async fn unauthorized(server: &mut ServerGuard, path: &str, message: &str, hits: usize) -> Mock {
    server
        .mock("PATCH", path)
        .match_header("authorization", Matcher::Regex("t0ken".to_owned()))
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "message": message,
                "documentation_url": "https://docs.github.com/rest"
            })
            .to_string(),
        )
        .expect(hits)
        .create_async()
        .await
}

fn api_message(err: &CheckerError) -> &str {
    match err {
        CheckerError::Api(ApiError::Response { message, .. }) => message.as_str(),
        other => panic!("expected an API response error, got {other:?}"),
    }
}

fn api_status(err: &CheckerError) -> u16 {
    match err.as_api().and_then(ApiError::status) {
        Some(status) => status,
        None => panic!("expected an API response error, got {err:?}"),
    }
}

#[tokio::test]
async fn update_recovers_after_two_unauthorized_responses() {
    let mut server = mockito::Server::new_async().await;
    let failures = unauthorized(&mut server, CHECK_RUN_PATH, "Bad credentials", 2).await;
    let success = server
        .mock("PATCH", CHECK_RUN_PATH)
        .match_body(Matcher::PartialJson(json!({ "status": "completed" })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":42,"status":"completed"}"#)
        .expect(1)
        .create_async()
        .await;
    let checker = GitHubChecker::new(octocrab(&server));

    let start = Instant::now();
    let check_run = checker
        .update_check_run(
            "octo",
            "hello",
            CheckRunId(42),
            &UpdateCheckRunOptions::new().status(CheckRunStatus::Completed),
        )
        .await
        .unwrap();
    let elapsed = start.elapsed();

    assert_eq!(check_run.id, CheckRunId(42));
    assert_eq!(check_run.status, CheckRunStatus::Completed);
    assert!(elapsed >= Duration::from_secs(2), "{elapsed:?}");
    assert!(elapsed < Duration::from_secs(3), "{elapsed:?}");
    failures.assert_async().await;
    success.assert_async().await;
}

#[tokio::test]
async fn update_returns_the_last_error_after_five_unauthorized_responses() {
    let mut server = mockito::Server::new_async().await;
    let mut mocks = Vec::new();
    for attempt in 1..=5 {
        let message = format!("Bad credentials (attempt {attempt})");
        mocks.push(unauthorized(&mut server, CHECK_RUN_PATH, &message, 1).await);
    }
    let checker = GitHubChecker::new(octocrab(&server));

    let start = Instant::now();
    let err = checker
        .update_check_run("octo", "hello", CheckRunId(42), &UpdateCheckRunOptions::new())
        .await
        .unwrap_err();
    let elapsed = start.elapsed();

    assert_eq!(api_message(&err), "Bad credentials (attempt 5)");
    assert_eq!(api_status(&err), 401);
    assert!(elapsed >= Duration::from_secs(4), "{elapsed:?}");
    for mock in &mocks {
        mock.assert_async().await;
    }
}

#[tokio::test]
async fn update_retries_permanent_failures_too() {
    let mut server = mockito::Server::new_async().await;
    let not_found = server
        .mock("PATCH", "/repos/octo/hello/check-runs/7")
        .with_status(404)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Not Found"}"#)
        .expect(3)
        .create_async()
        .await;
    let checker = GitHubChecker::new(octocrab(&server))
        .with_retry_policy(RetryPolicy::fixed(3, Duration::from_millis(10)));

    let err = checker
        .update_check_run("octo", "hello", CheckRunId(7), &UpdateCheckRunOptions::new())
        .await
        .unwrap_err();

    assert_eq!(api_message(&err), "Not Found");
    assert_eq!(api_status(&err), 404);
    not_found.assert_async().await;
}

#[tokio::test]
async fn update_survives_an_unreadable_error_body() {
    let mut server = mockito::Server::new_async().await;
    let garbage = server
        .mock("PATCH", CHECK_RUN_PATH)
        .with_status(502)
        .with_header("content-type", "text/html")
        .with_body("<html>bad gateway</html>")
        .expect(2)
        .create_async()
        .await;
    let checker = GitHubChecker::new(octocrab(&server))
        .with_retry_policy(RetryPolicy::fixed(2, Duration::from_millis(10)));

    let err = checker
        .update_check_run("octo", "hello", CheckRunId(42), &UpdateCheckRunOptions::new())
        .await
        .unwrap_err();

    assert!(matches!(err, CheckerError::Api(_)), "{err:?}");
    garbage.assert_async().await;
}

#[tokio::test]
async fn each_attempt_sends_exactly_one_request() {
    let mut server = mockito::Server::new_async().await;
    let bad_gateway = server
        .mock("PATCH", CHECK_RUN_PATH)
        .with_status(502)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Server Error"}"#)
        .expect(5)
        .create_async()
        .await;
    let checker = GitHubChecker::new(octocrab(&server))
        .with_retry_policy(RetryPolicy::fixed(5, Duration::from_millis(10)));

    let err = checker
        .update_check_run("octo", "hello", CheckRunId(42), &UpdateCheckRunOptions::new())
        .await
        .unwrap_err();

    assert_eq!(api_status(&err), 502);
    assert_eq!(api_message(&err), "Server Error");
    bad_gateway.assert_async().await;
}

#[tokio::test]
async fn create_sends_options_and_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let created = server
        .mock("POST", "/repos/octo/hello/check-runs")
        .match_body(Matcher::Json(json!({
            "name": "lint",
            "head_sha": "abc123",
            "status": "in_progress"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":99,"status":"in_progress","name":"lint","head_sha":"abc123"}"#)
        .expect(1)
        .create_async()
        .await;
    let checker = GitHubChecker::new(octocrab(&server));

    let check_run = checker
        .create_check_run(
            "octo",
            "hello",
            &CreateCheckRunOptions::new("lint", "abc123").status(CheckRunStatus::InProgress),
        )
        .await
        .unwrap();

    assert_eq!(check_run.id, CheckRunId(99));
    assert_eq!(check_run.name.as_deref(), Some("lint"));
    created.assert_async().await;
}

#[tokio::test]
async fn create_failure_is_returned_after_one_call() {
    let mut server = mockito::Server::new_async().await;
    let rejected = server
        .mock("POST", "/repos/octo/hello/check-runs")
        .with_status(401)
        .with_header("content-type", "application/json")
        .with_body(r#"{"message":"Bad credentials"}"#)
        .expect(1)
        .create_async()
        .await;
    let checker = GitHubChecker::new(octocrab(&server));

    let err = checker
        .create_check_run("octo", "hello", &CreateCheckRunOptions::new("lint", "abc123"))
        .await
        .unwrap_err();

    assert_eq!(api_message(&err), "Bad credentials");
    rejected.assert_async().await;
}

fn git(dir: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .unwrap();
    assert!(output.status.success(), "git {args:?} failed");
    String::from_utf8(output.stdout).unwrap().trim().to_owned()
}

#[tokio::test]
async fn pull_request_diff_is_computed_locally() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path();
    git(path, &["init", "--quiet"]);
    git(path, &["config", "user.email", "checker@example.com"]);
    git(path, &["config", "user.name", "Checker"]);
    git(path, &["config", "commit.gpgsign", "false"]);
    std::fs::write(path.join("old_name.txt"), "one\ntwo\nthree\nfour\nfive\n").unwrap();
    git(path, &["add", "."]);
    git(path, &["commit", "--quiet", "-m", "base"]);
    let base = git(path, &["rev-parse", "HEAD"]);
    git(path, &["mv", "old_name.txt", "new_name.txt"]);
    git(path, &["commit", "--quiet", "-m", "rename"]);
    let head = git(path, &["rev-parse", "HEAD"]);

    let mut server = mockito::Server::new_async().await;
    let pull = server
        .mock("GET", "/repos/octo/hello/pulls/7")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "number": 7,
                "head": { "sha": head, "ref": "rename" },
                "base": { "sha": base, "ref": "main" }
            })
            .to_string(),
        )
        .create_async()
        .await;
    let checker = GitHubChecker::new(octocrab(&server)).with_workdir(path);

    let diff = checker
        .get_pull_request_diff("octo", "hello", 7)
        .await
        .unwrap();

    let diff = String::from_utf8(diff).unwrap();
    assert!(diff.contains("rename from old_name.txt"), "{diff}");
    assert!(diff.contains("rename to new_name.txt"), "{diff}");
    pull.assert_async().await;
}
