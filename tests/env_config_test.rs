//! Startup configuration read from the process environment. Kept to a
//! single test so nothing else in this binary races on the variables.

use message_bridge::llm::{ API_KEY_ENV, BASE_URL_ENV };
use message_bridge::{ BridgeConfig, ChatMessage, ErrorKind, MessageBridge };
use std::env;

#[tokio::test]
async fn bridge_reads_credential_from_environment() {
    let transcript = [ChatMessage::user("hello")];

    env::remove_var(API_KEY_ENV);
    env::remove_var(BASE_URL_ENV);
    assert_eq!(BridgeConfig::from_env().api_key, None);
    let bridge = MessageBridge::from_env();
    assert!(!bridge.is_configured());
    let result = bridge.invoke("m1", &transcript, 0.0).await;
    assert_eq!(result.error_text().as_deref(), Some("Error: Library not configured"));
    assert_eq!(result.error().unwrap().kind(), ErrorKind::Configuration);

    env::set_var(API_KEY_ENV, "   ");
    assert_eq!(BridgeConfig::from_env().api_key, None);
    let bridge = MessageBridge::from_env();
    assert!(!bridge.is_configured());
    let result = bridge.invoke("m1", &transcript, 0.0).await;
    assert_eq!(result.error_text().as_deref(), Some("Error: Library not configured"));

    env::set_var(API_KEY_ENV, "test-key");
    env::set_var(BASE_URL_ENV, "http://127.0.0.1:9/v1beta");
    let config = BridgeConfig::from_env();
    assert_eq!(config.api_key.as_deref(), Some("test-key"));
    assert_eq!(config.base_url.as_deref(), Some("http://127.0.0.1:9/v1beta"));
    assert!(MessageBridge::from_env().is_configured());

    env::remove_var(API_KEY_ENV);
    env::remove_var(BASE_URL_ENV);
}
