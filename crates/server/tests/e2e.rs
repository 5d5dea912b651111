use std::net::SocketAddr;
use std::path::PathBuf;

use configs::{AppConfig, FsCheckConfig};
use reqwest::StatusCode as HttpStatusCode;
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
}

async fn start_server(fscheck: FsCheckConfig) -> anyhow::Result<TestApp> {
    let cfg = AppConfig { fscheck, ..AppConfig::default() };
    let app = server::startup::build_app(&cfg);

    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn scratch_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("e2e_fscheck_{}", Uuid::new_v4()));
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let dir = scratch_dir();
    let app = start_server(FsCheckConfig::for_dir(&dir)).await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[tokio::test]
async fn e2e_writable_dir_report() -> anyhow::Result<()> {
    let dir = scratch_dir();
    let app = start_server(FsCheckConfig::for_dir(&dir)).await?;

    let res = reqwest::get(format!("{}/__fscheck", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(
        res.headers().get("content-type").and_then(|v| v.to_str().ok()),
        Some("text/plain; charset=utf-8")
    );
    let body = res.text().await?;
    let lines: Vec<&str> = body.lines().collect();

    // The real process always has a uid on unix.
    #[cfg(unix)]
    assert!(lines[0].starts_with("whoami (posix_geteuid): "), "got {body}");
    assert!(lines.contains(&format!("configDir: {}", dir.display()).as_str()));
    assert!(lines.contains(&"is_dir: yes"));
    assert!(lines.contains(&"is_writable(dir): yes"));
    assert_eq!(lines.last(), Some(&"write_test: OK (29 bytes)"));
    assert!(!dir.join(".php-write-test").exists());

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[tokio::test]
async fn e2e_missing_dir_report() -> anyhow::Result<()> {
    let dir = std::env::temp_dir().join(format!("e2e_fscheck_missing_{}", Uuid::new_v4()));
    let app = start_server(FsCheckConfig::for_dir(&dir)).await?;

    let body = reqwest::get(format!("{}/__fscheck", app.base_url)).await?.text().await?;
    assert!(body.contains("is_dir: no\n"));
    assert!(body.contains("is_writable(dir): no\n"));
    assert!(body.contains("realpath(configDir): \n"));
    assert!(body.contains("write_test: FAILED\nphp_error: "));
    assert!(!dir.exists());
    Ok(())
}

#[tokio::test]
async fn e2e_repeated_checks_leave_no_probe() -> anyhow::Result<()> {
    let dir = scratch_dir();
    let app = start_server(FsCheckConfig::for_dir(&dir)).await?;
    let url = format!("{}/__fscheck", app.base_url);

    let first = reqwest::get(&url).await?.text().await?;
    let second = reqwest::get(&url).await?.text().await?;
    assert_eq!(first, second);
    assert_eq!(std::fs::read_dir(&dir)?.count(), 0);

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}

#[tokio::test]
async fn e2e_post_and_unknown_format_get_text_report() -> anyhow::Result<()> {
    let dir = scratch_dir();
    let app = start_server(FsCheckConfig::for_dir(&dir)).await?;
    let client = reqwest::Client::new();

    let res = client.post(format!("{}/__fscheck", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert!(res.text().await?.ends_with("write_test: OK (29 bytes)\n"));

    for format in ["xml", "", "JSON"] {
        let res = client
            .get(format!("{}/__fscheck?format={format}", app.base_url))
            .send()
            .await?;
        assert_eq!(res.status(), HttpStatusCode::OK, "format={format}");
        assert_eq!(
            res.headers().get("content-type").and_then(|v| v.to_str().ok()),
            Some("text/plain; charset=utf-8")
        );
        assert!(res.text().await?.contains("configDir: "));
    }

    std::fs::remove_dir_all(&dir)?;
    Ok(())
}
