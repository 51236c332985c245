use std::{net::SocketAddr, sync::Arc, time::Duration};

use serde_json::Value;
use spotrec::error::SessionError;
use spotrec::server::start_api_server;
use spotrec::spotify::auth::{
    LoginNavigator, PendingLogin, Session, SharedLogin, wait_for_login,
};
use spotrec::storage::{
    ACCESS_TOKEN_KEY, EXPIRE_TIME_KEY, FileStore, REFRESH_TOKEN_KEY, TIMESTAMP_KEY, TokenStore,
};
use tempfile::TempDir;
use tokio::sync::Mutex;
use url::Url;

fn free_addr() -> SocketAddr {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap()
}

fn pending_login(dir: &TempDir, addr: SocketAddr) -> SharedLogin {
    let session = Session::new(
        FileStore::new(dir.path().join("storage.json")),
        LoginNavigator,
        "http://127.0.0.1:9/refresh_token",
        Url::parse(&format!("http://{}/", addr)).unwrap(),
    );
    Arc::new(Mutex::new(PendingLogin::new(session)))
}

async fn get_with_retry(url: &str) -> reqwest::Response {
    for _ in 0..50 {
        if let Ok(res) = reqwest::get(url).await {
            return res;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    panic!("server at {} never answered", url);
}

#[test]
fn test_health_endpoint() {
    let dir = TempDir::new().unwrap();
    let addr = free_addr();
    let rt = tokio::runtime::Runtime::new().unwrap();

    rt.block_on(async {
        let server = tokio::spawn(start_api_server(addr, pending_login(&dir, addr)));

        let res = get_with_retry(&format!("http://{}/health", addr)).await;
        assert_eq!(res.status().as_u16(), 200);

        let body: Value = res.json().await.unwrap();
        assert_eq!(body["service"], "spotrec");
        assert_eq!(body["status"], "ok");

        server.abort();
    });
}

#[test]
fn test_callback_persists_login_tokens() {
    let dir = TempDir::new().unwrap();
    let addr = free_addr();
    let rt = tokio::runtime::Runtime::new().unwrap();

    rt.block_on(async {
        let shared = pending_login(&dir, addr);
        let server = tokio::spawn(start_api_server(addr, Arc::clone(&shared)));

        let res = get_with_retry(&format!(
            "http://{}/?access_token=A&refresh_token=R&expires_in=3600",
            addr
        ))
        .await;
        assert_eq!(res.status().as_u16(), 200);
        assert!(res.text().await.unwrap().contains("successful"));

        server.abort();

        let outcome = wait_for_login(Arc::clone(&shared), Duration::from_secs(1)).await;
        assert!(matches!(outcome, Some(Ok(ref token)) if token == "A"));

        let store = FileStore::new(dir.path().join("storage.json"));
        assert_eq!(store.get_item(ACCESS_TOKEN_KEY).await.unwrap().as_deref(), Some("A"));
        assert_eq!(store.get_item(REFRESH_TOKEN_KEY).await.unwrap().as_deref(), Some("R"));
        assert_eq!(store.get_item(EXPIRE_TIME_KEY).await.unwrap().as_deref(), Some("3600"));
        assert!(store.get_item(TIMESTAMP_KEY).await.unwrap().is_some());
    });
}

#[test]
fn test_callback_without_tokens_reports_failure() {
    let dir = TempDir::new().unwrap();
    let addr = free_addr();
    let rt = tokio::runtime::Runtime::new().unwrap();

    rt.block_on(async {
        let shared = pending_login(&dir, addr);
        let server = tokio::spawn(start_api_server(addr, Arc::clone(&shared)));

        let res = get_with_retry(&format!("http://{}/", addr)).await;
        assert!(res.text().await.unwrap().contains("failed"));

        server.abort();
        let outcome = shared.lock().await.outcome.take();
        assert!(matches!(outcome, Some(Err(SessionError::NotLoggedIn))));
    });
}

#[test]
fn test_callback_error_ends_the_wait() {
    let dir = TempDir::new().unwrap();
    let addr = free_addr();
    let rt = tokio::runtime::Runtime::new().unwrap();

    rt.block_on(async {
        let shared = pending_login(&dir, addr);
        let server = tokio::spawn(start_api_server(addr, Arc::clone(&shared)));
        let waiter = tokio::spawn(wait_for_login(
            Arc::clone(&shared),
            Duration::from_secs(30),
        ));

        let res = get_with_retry(&format!("http://{}/?error=access_denied", addr)).await;
        assert!(res.text().await.unwrap().contains("failed"));

        let outcome = tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .expect("wait did not end after the failed callback")
            .unwrap();
        assert!(matches!(
            outcome,
            Some(Err(SessionError::MissingRefreshToken))
        ));

        server.abort();
    });
}

#[test]
fn test_wait_for_login_times_out_without_callback() {
    let dir = TempDir::new().unwrap();
    let addr = free_addr();
    let rt = tokio::runtime::Runtime::new().unwrap();

    rt.block_on(async {
        let outcome = wait_for_login(pending_login(&dir, addr), Duration::from_millis(300)).await;
        assert!(outcome.is_none());
    });
}
