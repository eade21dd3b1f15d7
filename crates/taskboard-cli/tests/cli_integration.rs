use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::{json, Value};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::{tempdir, TempDir};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
        }
    }

    fn with_token(token: &str) -> Self {
        let sandbox = Self::new();
        fs::write(
            sandbox.credentials(),
            json!({ "token": token }).to_string(),
        )
        .unwrap();
        sandbox
    }

    fn credentials(&self) -> PathBuf {
        self.dir.path().join("credentials.json")
    }

    fn taskboard(&self, api_url: &str) -> Command {
        let mut cmd = Command::cargo_bin("taskboard").unwrap();
        cmd.env("TASKBOARD_API_URL", api_url)
            .env("TASKBOARD_CREDENTIALS", self.credentials())
            .env("XDG_CONFIG_HOME", self.dir.path())
            .env("RUST_LOG", "off")
            .env_remove("TASKBOARD_DEBUG_LOG")
            .env_remove("TASKBOARD_PASSWORD");
        cmd
    }
}

fn parse_json_output(output: &[u8]) -> Value {
    serde_json::from_str(String::from_utf8_lossy(output).trim()).expect("Failed to parse JSON output")
}

fn stored_token(path: &Path) -> Option<String> {
    let contents = fs::read_to_string(path).ok()?;
    let json: Value = serde_json::from_str(&contents).ok()?;
    json["token"].as_str().map(str::to_string)
}

fn ana() -> Value {
    json!({ "id": 1, "username": "ana", "email": "ana@example.com" })
}

fn board_json() -> Value {
    json!({ "id": 1, "name": "Home", "tags": [{ "id": 5, "name": "urgent", "color": "#ff0000" }] })
}

fn lists_json() -> Value {
    json!([
        { "id": 10, "name": "Todo", "position": 1, "cards": [
            { "id": 100, "name": "Buy milk", "position": 0, "is_done": false, "tags": [] }
        ]},
        { "id": 11, "name": "Doing", "position": 0, "cards": [] }
    ])
}

async fn mount_board(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/boards"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([board_json()])))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/boards/1/lists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(lists_json()))
        .mount(server)
        .await;
}

mod auth_tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_login_stores_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "access_token": "tok", "token_type": "bearer" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ana()))
            .mount(&server)
            .await;

        let sandbox = Sandbox::new();
        let output = sandbox
            .taskboard(&server.uri())
            .args(["login", "--username", "ana", "--password", "password1"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["data"]["username"], "ana");
        assert_eq!(stored_token(&sandbox.credentials()).as_deref(), Some("tok"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_login_with_bad_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/login"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "detail": "nope" })))
            .mount(&server)
            .await;

        let sandbox = Sandbox::new();
        sandbox
            .taskboard(&server.uri())
            .args(["login", "--username", "ana", "--password", "password1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("\"success\":false"))
            .stderr(predicate::str::contains("Incorrect username or password"));
        assert!(!sandbox.credentials().exists());
    }

    #[test]
    fn test_login_rejects_empty_password_locally() {
        let sandbox = Sandbox::new();
        sandbox
            .taskboard("http://127.0.0.1:9")
            .args(["login", "--username", "ana", "--password", ""])
            .assert()
            .failure()
            .stderr(predicate::str::contains("username and password are required"));
    }

    #[test]
    fn test_whoami_without_session() {
        let sandbox = Sandbox::new();
        sandbox
            .taskboard("http://127.0.0.1:9")
            .arg("whoami")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not logged in"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_whoami_with_session() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(ana()))
            .mount(&server)
            .await;

        let sandbox = Sandbox::with_token("tok");
        sandbox
            .taskboard(&server.uri())
            .arg("whoami")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"username\":\"ana\""));
    }

    #[test]
    fn test_logout_removes_token() {
        let sandbox = Sandbox::with_token("tok");
        sandbox
            .taskboard("http://127.0.0.1:9")
            .arg("logout")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"logged_out\":true"));
        assert!(!sandbox.credentials().exists());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_expired_session_clears_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/boards"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let sandbox = Sandbox::with_token("stale");
        sandbox
            .taskboard(&server.uri())
            .args(["board", "list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Session expired"));
        assert_eq!(stored_token(&sandbox.credentials()), None);
    }
}

mod board_tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_board_list() {
        let server = MockServer::start().await;
        mount_board(&server).await;

        let sandbox = Sandbox::with_token("tok");
        let output = sandbox
            .taskboard(&server.uri())
            .args(["board", "list"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["count"], 1);
        assert_eq!(json["data"]["items"][0]["name"], "Home");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_board_show_attaches_lists() {
        let server = MockServer::start().await;
        mount_board(&server).await;

        let sandbox = Sandbox::with_token("tok");
        let output = sandbox
            .taskboard(&server.uri())
            .args(["board", "show", "--id", "1"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["lists"].as_array().unwrap().len(), 2);
        assert_eq!(json["data"]["kind"], "board");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_board_show_unknown_id() {
        let server = MockServer::start().await;
        mount_board(&server).await;

        let sandbox = Sandbox::with_token("tok");
        sandbox
            .taskboard(&server.uri())
            .args(["board", "show", "--id", "42"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Board 42 not found"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_board_create() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/boards"))
            .and(body_json(json!({ "name": "Garden" })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({ "id": 2, "name": "Garden" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let sandbox = Sandbox::with_token("tok");
        sandbox
            .taskboard(&server.uri())
            .args(["board", "create", "--name", "  Garden "])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"name\":\"Garden\""));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_inbox_show() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/inbox"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "name": "Inbox",
                "lists": [{ "id": 50, "name": "Inbox", "position": 0, "cards": [] }]
            })))
            .mount(&server)
            .await;

        let sandbox = Sandbox::with_token("tok");
        let output = sandbox
            .taskboard(&server.uri())
            .args(["inbox", "show"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["kind"], "inbox");
        assert_eq!(json["data"]["lists"][0]["id"], 50);
    }
}

mod column_tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_column_rename() {
        let server = MockServer::start().await;
        mount_board(&server).await;
        Mock::given(method("PATCH"))
            .and(path("/boards/1/lists/11"))
            .and(body_json(json!({ "name": "In progress" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({ "id": 11, "name": "In progress", "position": 0, "cards": [] }),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let sandbox = Sandbox::with_token("tok");
        sandbox
            .taskboard(&server.uri())
            .args([
                "column", "rename", "--board-id", "1", "--id", "11", "--name", "In progress",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"name\":\"In progress\""));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_column_delete() {
        let server = MockServer::start().await;
        mount_board(&server).await;
        Mock::given(method("DELETE"))
            .and(path("/boards/1/lists/10"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let sandbox = Sandbox::with_token("tok");
        sandbox
            .taskboard(&server.uri())
            .args(["column", "delete", "--board-id", "1", "--id", "10"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"deleted\":10"));
    }
}

mod task_tests {
    use super::*;

    #[tokio::test(flavor = "multi_thread")]
    async fn test_task_create_in_inbox() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/inbox"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7,
                "name": "Inbox",
                "lists": [{ "id": 50, "name": "Inbox", "position": 0, "cards": [] }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/boards/7/lists/50/cards"))
            .respond_with(ResponseTemplate::new(201).set_body_json(
                json!({ "id": 500, "name": "Call mom", "position": 0, "is_done": false }),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let sandbox = Sandbox::with_token("tok");
        let output = sandbox
            .taskboard(&server.uri())
            .args(["task", "create", "--inbox", "--name", "Call mom"])
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();

        let json = parse_json_output(&output);
        assert_eq!(json["data"]["id"], 500);
        assert_eq!(json["data"]["name"], "Call mom");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_task_done() {
        let server = MockServer::start().await;
        mount_board(&server).await;
        Mock::given(method("PATCH"))
            .and(path("/boards/1/lists/10/cards/100"))
            .and(body_json(json!({ "is_done": true })))
            .respond_with(ResponseTemplate::new(200).set_body_json(
                json!({ "id": 100, "name": "Buy milk", "position": 0, "is_done": true }),
            ))
            .expect(1)
            .mount(&server)
            .await;

        let sandbox = Sandbox::with_token("tok");
        sandbox
            .taskboard(&server.uri())
            .args([
                "task", "done", "--board-id", "1", "--column-id", "10", "--id", "100",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"is_done\":true"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_task_update_clears_due_date() {
        let server = MockServer::start().await;
        mount_board(&server).await;
        Mock::given(method("PATCH"))
            .and(path("/boards/1/lists/10/cards/100"))
            .and(body_json(json!({ "due_date": null, "tag_ids": [5] })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 100, "name": "Buy milk", "position": 0,
                "tags": [{ "id": 5, "name": "urgent", "color": "#ff0000" }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let sandbox = Sandbox::with_token("tok");
        sandbox
            .taskboard(&server.uri())
            .args([
                "task", "update", "--board-id", "1", "--column-id", "10", "--id", "100",
                "--clear-due", "--toggle-tag", "5",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"urgent\""));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_task_on_board_needs_column() {
        let server = MockServer::start().await;
        mount_board(&server).await;

        let sandbox = Sandbox::with_token("tok");
        sandbox
            .taskboard(&server.uri())
            .args(["task", "delete", "--board-id", "1", "--id", "100"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("--column-id is required"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_task_delete_unknown_task() {
        let server = MockServer::start().await;
        mount_board(&server).await;

        let sandbox = Sandbox::with_token("tok");
        sandbox
            .taskboard(&server.uri())
            .args([
                "task", "delete", "--board-id", "1", "--column-id", "10", "--id", "999",
            ])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Task 999 not found"));
    }
}

mod completions_tests {
    use super::*;

    #[test]
    fn test_bash_completions() {
        let sandbox = Sandbox::new();
        sandbox
            .taskboard("http://127.0.0.1:9")
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("taskboard"));
    }
}
