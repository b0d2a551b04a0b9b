//! Runs the therabot-chat binary in plain mode against an in-process server.

use axum::Router;
use axum::body::Body;
use axum::extract::Form;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use serde_json::json;
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

#[derive(serde::Deserialize)]
struct ChatForm {
    message: String,
}

async fn new_context() -> Response {
    let mut response = axum::Json(json!({
        "message": ["Welcome.", "Accept terms and conditions"],
        "disclaimer_url": "https://x/tc",
    }))
    .into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        "session_id=abc123; Path=/".parse().unwrap(),
    );
    response
}

async fn chat(Form(form): Form<ChatForm>) -> Response {
    match form.message.as_str() {
        "stream please" => {
            let frames = [
                "data: {\"delta\":\"Hel\"}\n\n",
                "data: {\"delta\":\"lo\"}\n\n",
                "data: {\"done\":true}\n\n",
            ];
            let body = Body::from_stream(futures::stream::iter(
                frames.map(|f| Ok::<_, std::io::Error>(f.as_bytes().to_vec())),
            ));
            ([(header::CONTENT_TYPE, "text/event-stream")], body).into_response()
        }
        "fail" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        other => axum::Json(json!({ "response": format!("You said: {}", other) })).into_response(),
    }
}

async fn start_server() -> String {
    let app = Router::new()
        .route("/new-context", post(new_context))
        .route("/chat", post(chat));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

fn write_config(dir: &Path, server: &str) -> std::path::PathBuf {
    let path = dir.join("therabot.toml");
    let prints = dir.join("prints");
    std::fs::write(
        &path,
        format!(
            "[server]\nbase_url = \"{}\"\n\n[print]\ndirectory = \"{}\"\nopen_viewer = false\n",
            server,
            prints.display()
        ),
    )
    .unwrap();
    path
}

async fn run_chat(args: &[&str], input: &str) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_therabot-chat"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true)
        .spawn()
        .unwrap();

    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(input.as_bytes()).await.unwrap();
    drop(stdin);

    tokio::time::timeout(Duration::from_secs(30), child.wait_with_output())
        .await
        .expect("therabot-chat did not exit")
        .unwrap()
}

#[tokio::test]
async fn plain_mode_chats_with_server() {
    let server = start_server().await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &server);

    let output = run_chat(
        &[
            "--plain",
            "--no-color",
            "--no-config",
            "--config",
            config.to_str().unwrap(),
        ],
        "hello\n\nstream please\nfail\nagain\n",
    )
    .await;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    assert!(stdout.contains("Welcome."));
    assert!(stdout.contains("Accept terms and conditions <https://x/tc>"));
    assert!(stdout.contains("You said: hello"));
    assert!(stdout.contains("Hello"));
    assert!(stdout.contains("Error: Unable to get response from the server."));
    assert!(stdout.contains("You said: again"));
    assert_eq!(stdout.matches("Bot:").count(), 3);
}

#[tokio::test]
async fn server_flag_overrides_config_and_print_writes_file() {
    let server = start_server().await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), "http://127.0.0.1:9");
    let print_path = dir.path().join("chat.html");

    let output = run_chat(
        &[
            "--plain",
            "--no-color",
            "--no-config",
            "--config",
            config.to_str().unwrap(),
            "--server",
            &server,
        ],
        &format!("hi there\n/print {}\n/quit\nnever sent\n", print_path.display()),
    )
    .await;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("You said: hi there"));
    assert!(stdout.contains(&format!("Print view written to {}", print_path.display())));
    assert!(!stdout.contains("never sent"));

    let html = std::fs::read_to_string(&print_path).unwrap();
    assert!(html.contains("You said: hi there"));
}

#[tokio::test]
async fn conversation_log_records_session() {
    let server = start_server().await;
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("logs").join("conversation.jsonl");

    let output = run_chat(
        &[
            "--plain",
            "--no-color",
            "--no-config",
            "--server",
            &server,
            "--log-conversation",
            log_path.to_str().unwrap(),
        ],
        "hello\n",
    )
    .await;
    assert!(output.status.success());

    let records: Vec<serde_json::Value> = std::fs::read_to_string(&log_path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();
    assert_eq!(records[0]["type"], "session_started");

    let roles: Vec<&str> = records
        .iter()
        .filter(|r| r["type"] == "message_appended")
        .filter_map(|r| r["role"].as_str())
        .collect();
    assert_eq!(roles, vec!["system", "user", "bot"]);
}

#[tokio::test]
async fn unreachable_server_reports_session_failure() {
    let output = run_chat(
        &[
            "--plain",
            "--no-color",
            "--no-config",
            "--server",
            "http://127.0.0.1:9",
        ],
        "",
    )
    .await;
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    assert!(stdout.contains("Error: Unable to start a new chat session."));
}

#[tokio::test]
async fn invalid_server_url_fails_fast() {
    let output = run_chat(&["--plain", "--no-config", "--server", "not a url"], "").await;
    assert!(!output.status.success());
}

#[tokio::test]
async fn missing_config_file_is_an_error() {
    let output = run_chat(
        &["--plain", "--config", "/definitely/not/here/therabot.toml"],
        "",
    )
    .await;
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Config file not found"));
}
