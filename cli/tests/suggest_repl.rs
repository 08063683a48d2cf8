use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::Mock;
use wiremock::MockServer;
use wiremock::ResponseTemplate;
use wiremock::matchers::method;
use wiremock::matchers::path;
use wiremock::matchers::query_param;

fn course_search(base_url: &str, extra_args: &[&str]) -> Result<Command> {
    let mut cmd = Command::cargo_bin("course-search")?;
    cmd.env("RUST_LOG", "warn")
        .arg("--base-url")
        .arg(base_url)
        .arg("--debounce-ms")
        .arg("20")
        .args(extra_args);
    Ok(cmd)
}

async fn suggestion_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/courses/search"))
        .and(query_param("query", "cse 33"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"suggestion": "CSE 3320 OPERATING SYSTEMS", "type": "course"},
            {"suggestion": "CSE 3330 DATABASE SYSTEMS", "type": "course"},
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/courses/search"))
        .and(query_param("query", "smith"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"suggestion": "Jane Smith", "type": "professor"},
        ])))
        .mount(&server)
        .await;
    server
}

#[test]
fn help_lists_flags() -> Result<()> {
    Command::cargo_bin("course-search")?
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--base-url"))
        .stdout(predicate::str::contains("--route-type"));
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn enter_on_same_course_navigates_without_reset() -> Result<()> {
    let server = suggestion_server().await;
    let uri = server.uri();
    tokio::task::spawn_blocking(move || -> Result<()> {
        course_search(&uri, &["--course", "CSE 3320", "--route-type", "course"])?
            .write_stdin("cse 33\n:sleep 1000\n:enter\n:quit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("navigate /results?course=CSE%203320"))
            .stdout(predicate::str::contains("reset").not());
        Ok(())
    })
    .await?
}

#[tokio::test(flavor = "multi_thread")]
async fn suggestions_render_while_input_is_paused() -> Result<()> {
    let server = suggestion_server().await;
    let uri = server.uri();
    tokio::task::spawn_blocking(move || -> Result<()> {
        course_search(&uri, &[])?
            .write_stdin("cse 33\n:sleep 1000\n:quit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("CSE 3320 OPERATING SYSTEMS"))
            .stdout(predicate::str::contains("CSE 3330 DATABASE SYSTEMS"));
        Ok(())
    })
    .await?
}

#[tokio::test(flavor = "multi_thread")]
async fn picking_professor_resets_and_navigates() -> Result<()> {
    let server = suggestion_server().await;
    let uri = server.uri();
    tokio::task::spawn_blocking(move || -> Result<()> {
        course_search(&uri, &["--course", "CSE 3320", "--route-type", "course"])?
            .write_stdin("smith\n:sleep 1000\n:pick 1\n:quit\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("reset\n"))
            .stdout(predicate::str::contains(
                "navigate /results?professor=Jane%20Smith",
            ));
        Ok(())
    })
    .await?
}

#[test]
fn unreachable_service_leaves_empty_list() -> Result<()> {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0")?;
        listener.local_addr()?.port()
    };
    course_search(&format!("http://127.0.0.1:{port}"), &[])?
        .write_stdin("cse 33\n:sleep 500\n:enter\n:quit\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("navigate").not());
    Ok(())
}

#[test]
fn bad_base_url_fails_fast() -> Result<()> {
    course_search("ftp://example.edu", &[])?
        .write_stdin(":quit\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
    Ok(())
}
