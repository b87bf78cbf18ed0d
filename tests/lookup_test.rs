use mockito::Matcher;

use dirlook::api::client::{self, ClientConfig, DirectoryProvider};
use dirlook::api::devices::DeviceProvider;
use dirlook::api::types::LookupOutcome;
use dirlook::api::users::UserProvider;
use dirlook::error::LookupError;

fn test_config(server: &mockito::Server) -> ClientConfig {
    ClientConfig {
        token: "test-token".to_string(),
        base_url: server.url(),
        max_retries: 2,
        retry_base_delay: 10,
        ..Default::default()
    }
}

#[tokio::test]
async fn test_user_lookup_found() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users")
        .match_query(Matcher::UrlEncoded("netid".into(), "jsm12345".into()))
        .match_header("authorization", "Bearer test-token")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"[
                {"properties": {"cn": ["jsm12345"], "displayname": ["John Smith"]}},
                {"properties": {"cn": ["jsm12346"], "displayname": ["Jane Smith"]}}
            ]"#,
        )
        .create_async()
        .await;

    let provider = UserProvider::new(test_config(&server));
    let outcome = provider.lookup("jsm12345").await.unwrap();

    mock.assert_async().await;
    match outcome {
        LookupOutcome::Found(response) => {
            assert_eq!(response.records.len(), 2);
            assert_eq!(response.source, "users");
            assert_eq!(response.records[0].first_str("cn"), Some("jsm12345"));
        }
        LookupOutcome::NotFound => panic!("Expected a populated lookup response"),
    }
}

#[tokio::test]
async fn test_user_lookup_single_object_body() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/users")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"properties": {"cn": ["jsm12345"]}}"#)
        .create_async()
        .await;

    let provider = UserProvider::new(test_config(&server));
    let outcome = provider.lookup("jsm12345").await.unwrap();
    assert!(outcome.is_found());
}

#[tokio::test]
async fn test_user_lookup_empty_array_is_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/users")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let provider = UserProvider::new(test_config(&server));
    let outcome = provider.lookup("zzz00000").await.unwrap();
    assert!(!outcome.is_found());
}

#[tokio::test]
async fn test_user_lookup_placeholder_records_are_not_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/users")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"[{"properties": {"objectclass": ["top"]}}]"#)
        .create_async()
        .await;

    let provider = UserProvider::new(test_config(&server));
    let outcome = provider.lookup("zzz00000").await.unwrap();
    assert!(!outcome.is_found());
}

#[tokio::test]
async fn test_device_lookup_filters_stub_records() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/computers")
        .match_query(Matcher::UrlEncoded("name".into(), "LIB-KIOSK-01".into()))
        .with_status(200)
        .with_body(r#"[{"properties": {"name": ["LIB-KIOSK-01"]}}]"#)
        .create_async()
        .await;

    let provider = DeviceProvider::new(test_config(&server));
    let outcome = provider.lookup("LIB-KIOSK-01").await.unwrap();
    assert!(!outcome.is_found());
}

#[tokio::test]
async fn test_device_lookup_found() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/computers")
        .match_query(Matcher::UrlEncoded("name".into(), "LIB-KIOSK-01".into()))
        .with_status(200)
        .with_body(
            r#"[{"properties": {
                "name": ["LIB-KIOSK-01"],
                "serviceprincipalname": ["HOST/lib-kiosk-01.example.edu"],
                "dnshostname": ["lib-kiosk-01.example.edu"]
            }}]"#,
        )
        .create_async()
        .await;

    let provider = DeviceProvider::new(test_config(&server));
    let outcome = provider.lookup("LIB-KIOSK-01").await.unwrap();

    match outcome {
        LookupOutcome::Found(response) => {
            assert_eq!(response.source, "computers");
            assert_eq!(
                response.records[0].first_str("dnshostname"),
                Some("lib-kiosk-01.example.edu")
            );
        }
        LookupOutcome::NotFound => panic!("Expected a populated lookup response"),
    }
}

#[tokio::test]
async fn test_missing_token_fails_before_any_request() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = ClientConfig {
        base_url: server.url(),
        ..Default::default()
    };
    let provider = UserProvider::new(config);

    let result = provider.lookup("jsm12345").await;
    assert!(matches!(result, Err(LookupError::NoToken)));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_html_body_is_an_api_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/users")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "text/html")
        .with_body("<html><body>Sign in</body></html>")
        .create_async()
        .await;

    let provider = UserProvider::new(test_config(&server));
    let result = provider.lookup("jsm12345").await;
    assert!(matches!(result, Err(LookupError::ApiError { .. })));
}

#[tokio::test]
async fn test_garbage_body_is_a_parse_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/users")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("not json at all")
        .create_async()
        .await;

    let provider = UserProvider::new(test_config(&server));
    let result = provider.lookup("jsm12345").await;
    assert!(matches!(result, Err(LookupError::Parse(_))));
}

#[tokio::test]
async fn test_client_error_status_is_not_retried() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users")
        .match_query(Matcher::Any)
        .with_status(404)
        .expect(1)
        .create_async()
        .await;

    let provider = UserProvider::new(test_config(&server));
    let result = provider.lookup("jsm12345").await;

    assert!(matches!(result, Err(LookupError::ApiError { .. })));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_is_retried_then_surfaced() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/users")
        .match_query(Matcher::Any)
        .with_status(500)
        .expect(2)
        .create_async()
        .await;

    let provider = UserProvider::new(test_config(&server));
    let result = provider.lookup("jsm12345").await;

    assert!(matches!(result, Err(LookupError::ServerError(_))));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_self_test_reaches_live_host() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/")
        .with_status(200)
        .create_async()
        .await;

    let config = test_config(&server);
    assert!(client::self_test(&config).await.is_ok());
}

#[tokio::test]
async fn test_self_test_fails_on_unreachable_host() {
    let config = ClientConfig {
        token: "test-token".to_string(),
        // Reserved TEST-NET address; nothing answers here
        base_url: "http://192.0.2.1:9".to_string(),
        ..Default::default()
    };

    let result = client::self_test(&config).await;
    assert!(matches!(result, Err(LookupError::Unreachable(_))));
}
