//! Retry behaviour: rate limits and transport failures

use std::time::{Duration, Instant};

use notion_mcp_core::{ApiError, NotionApi, NotionClient};
use pretty_assertions::assert_eq;
use tests::fixtures::{client_config, fast_retry, notion_client, sample_user};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_rate_limit_honours_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "2"))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_user()))
        .expect(1)
        .mount(&server)
        .await;

    let started = Instant::now();
    let user = notion_client(&server).get_current_user().await.unwrap();

    assert!(started.elapsed() >= Duration::from_secs(2));
    assert_eq!(user, sample_user());
}

#[tokio::test]
async fn test_rate_limit_shares_attempt_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "0"))
        .expect(3)
        .mount(&server)
        .await;

    let err = notion_client(&server).get_current_user().await.unwrap_err();
    assert!(matches!(err, ApiError::RateLimited { attempts: 3 }));
    assert_eq!(err.status(), Some(429));
}

#[tokio::test]
async fn test_timeout_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_user())
                .set_delay(Duration::from_secs(2)),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_user()))
        .mount(&server)
        .await;

    let config = client_config(&server).with_timeout(Duration::from_millis(200));
    let client = NotionClient::new(config).unwrap();

    let user = client.get_current_user().await.unwrap();
    assert_eq!(user, sample_user());
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_three_connection_failures_exhaust_budget() {
    // Reserve a port, then close it so every connection is refused
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let config = notion_mcp_core::ClientConfig::new(notion_mcp_core::BearerToken::new("t"))
        .with_base_url(format!("http://127.0.0.1:{}", port))
        .with_retry(fast_retry());
    let client = NotionClient::new(config).unwrap();

    match client.get_current_user().await {
        Err(ApiError::Transport { attempts, message }) => {
            assert_eq!(attempts, 3);
            assert!(!message.is_empty());
        }
        other => panic!("unexpected result: {:?}", other),
    }
}
