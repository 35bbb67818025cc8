#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;
use serde_json::json;

static SERVER: OnceLock<TestServer> = OnceLock::new();
static EMAIL_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Header carrying the raw signed token on protected requests.
pub const TOKEN_HEADER: &str = "x-auth-token";

pub struct TestServer {
    pub base_url: String,
    #[allow(dead_code)]
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary; without MONGO_URI it runs on the
        // in-memory store, so these tests need no external services.
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_ripple-api"));
        cmd.env("RIPPLE_PORT", port.to_string())
            .env_remove("MONGO_URI")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            let url = format!("{}/health", self.base_url);
            if let Ok(resp) = client.get(&url).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!(
            "server did not become ready on {} within {:?}",
            self.base_url,
            timeout
        )
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Process-unique email so concurrently running tests never collide.
pub fn unique_email(prefix: &str) -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let n = EMAIL_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!("{prefix}-{nanos}-{n}@example.com")
}

/// Register a fresh user and return (token, email).
pub async fn register_user(base_url: &str, name: &str) -> Result<(String, String)> {
    let client = reqwest::Client::new();
    let email = unique_email(name);

    let res = client
        .post(format!("{}/api/users", base_url))
        .json(&json!({
            "name": name,
            "email": email,
            "password": "secret123"
        }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "registration failed with {}",
        res.status()
    );

    let body = res.json::<serde_json::Value>().await?;
    let token = body["token"]
        .as_str()
        .context("registration response missing token")?
        .to_string();

    Ok((token, email))
}

/// Create a post as the given user and return its id.
pub async fn create_post(base_url: &str, token: &str, text: &str) -> Result<String> {
    let client = reqwest::Client::new();
    let res = client
        .post(format!("{}/api/posts", base_url))
        .header(TOKEN_HEADER, token)
        .json(&json!({ "text": text }))
        .send()
        .await?;
    anyhow::ensure!(
        res.status() == StatusCode::OK,
        "post creation failed with {}",
        res.status()
    );

    let body = res.json::<serde_json::Value>().await?;
    let id = body["_id"]
        .as_str()
        .context("post response missing _id")?
        .to_string();
    Ok(id)
}
