//! Integration tests for the blocking client.
//!
//! The mock server runs on its own tokio runtime while the client is driven
//! from the plain test thread.

mod common;

use chessdotcom::{BlockingClient, CallOptions, Error, RateLimitHandler, RequestOptions};
use common::{capture_warnings, PUZZLE};
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn start_server(rt: &Runtime, mocks: Vec<Mock>) -> MockServer {
    rt.block_on(async {
        let server = MockServer::start().await;
        for mock in mocks {
            mock.mount(&server).await;
        }
        server
    })
}

fn client_for(server: &MockServer, handler: RateLimitHandler) -> BlockingClient {
    BlockingClient::builder()
        .base_url(server.uri())
        .unwrap()
        .user_agent("chessdotcom blocking tests")
        .unwrap()
        .rate_limit_handler(handler)
        .build_blocking()
        .unwrap()
}

#[test]
fn test_blocking_get_request() {
    let rt = Runtime::new().unwrap();
    let server = start_server(
        &rt,
        vec![Mock::given(method("GET"))
            .and(path("/puzzle"))
            .and(header("user-agent", "chessdotcom blocking tests"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PUZZLE))],
    );

    let client = client_for(&server, RateLimitHandler::default());

    let response = client.get_current_daily_puzzle(CallOptions::default()).unwrap();

    assert_eq!(response.text(), PUZZLE);
    assert_eq!(response.get("puzzle").unwrap().get("title").unwrap().as_str(), Some("Knight Fork"));
    assert_eq!(response.get("title").unwrap().as_str(), Some("Knight Fork"));
    assert_eq!(response.attempts(), 1);
}

#[test]
fn test_blocking_retry_after_429() {
    let rt = Runtime::new().unwrap();
    let server = start_server(
        &rt,
        vec![
            Mock::given(method("GET"))
                .and(path("/player/hikaru/is-online"))
                .respond_with(ResponseTemplate::new(429))
                .up_to_n_times(1),
            Mock::given(method("GET"))
                .and(path("/player/hikaru/is-online"))
                .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"online": true}"#)),
        ],
    );

    let tts = Duration::from_millis(100);
    let client = client_for(&server, RateLimitHandler::new(tts, 1));

    let mut resource = chessdotcom::endpoints::is_player_online("hikaru", CallOptions::default());
    let start = Instant::now();
    let response = client.do_get_request(&mut resource).unwrap();

    assert!(start.elapsed() >= tts);
    assert_eq!(resource.times_requested, 2);
    assert_eq!(response.get("online").unwrap().as_bool(), Some(true));
}

#[test]
fn test_blocking_retries_exhausted() {
    let rt = Runtime::new().unwrap();
    let server = start_server(
        &rt,
        vec![Mock::given(method("GET"))
            .and(path("/player/hikaru/tournaments"))
            .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
            .up_to_n_times(3)],
    );

    let client = client_for(&server, RateLimitHandler::new(Duration::from_millis(20), 1));

    let result = client.get_player_tournaments("hikaru", CallOptions::default());

    match result {
        Err(Error::HttpError { status, raw_response, .. }) => {
            assert_eq!(status.as_u16(), 429);
            assert_eq!(raw_response, "slow down");
        }
        other => panic!("Expected HttpError, got {:?}", other),
    }
    let received = rt.block_on(server.received_requests()).unwrap();
    assert_eq!(received.len(), 2);
}

#[test]
fn test_blocking_default_headers_override_call_headers() {
    let rt = Runtime::new().unwrap();
    let server = start_server(
        &rt,
        vec![Mock::given(method("GET"))
            .and(path("/player/fabianocaruana"))
            .and(header("header", "value"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)],
    );

    let client = BlockingClient::builder()
        .base_url(server.uri())
        .unwrap()
        .default_header("header", "value")
        .unwrap()
        .build_blocking()
        .unwrap();

    let options = CallOptions::from(RequestOptions::new().with_header("header", "override_value").unwrap());
    let (logs, _guard) = capture_warnings();
    let response = client.get_player_profile("fabianocaruana", options);

    assert!(response.is_ok(), "{:?}", response);
    assert!(logs.contents().contains("User-Agent"));
}

#[test]
fn test_blocking_call_by_name() {
    let rt = Runtime::new().unwrap();
    let server = start_server(
        &rt,
        vec![Mock::given(method("GET"))
            .and(path("/match/live/5833/5"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"board_scores": {}, "games": []}"#))],
    );

    let client = client_for(&server, RateLimitHandler::default());

    let response = client
        .call("get_team_match_live_board", &["5833", "5"], CallOptions::default())
        .unwrap();
    assert!(response.get("match_board").unwrap().contains("games"));

    let result = client.call("get_team_match_live_board", &["5833"], CallOptions::default());
    assert!(matches!(result, Err(Error::ConfigurationError(_))));
}

#[test]
fn test_blocking_tts_waits_before_first_request() {
    let rt = Runtime::new().unwrap();
    let server = start_server(
        &rt,
        vec![Mock::given(method("GET"))
            .and(path("/country/NO"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"code": "NO", "name": "Norway"}"#))
            .expect(1)],
    );

    let client = client_for(&server, RateLimitHandler::default());
    let tts = Duration::from_millis(150);

    let start = Instant::now();
    let response = client
        .get_country_details("NO", CallOptions::new().tts(tts))
        .unwrap();

    assert!(start.elapsed() >= tts);
    assert_eq!(response.attempts(), 1);
    assert_eq!(response.get("country").unwrap().get("name").unwrap().as_str(), Some("Norway"));
}
