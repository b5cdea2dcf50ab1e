use crate::config::Config;
use std::env;
use std::sync::Mutex;
use std::sync::OnceLock;
use std::time::Duration;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const VARS: &[&str] = &[
    "BINANCE_WS_URL",
    "SYMBOL",
    "KLINE_INTERVAL",
    "RECONNECT_MAX_BACKOFF_SECS",
    "RECONNECT_MAX_ATTEMPTS",
    "SERVER_BIND_ADDRESS",
    "SERVER_PORT",
    "OBSERVABILITY_ENABLED",
];

fn clear_vars() {
    for var in VARS {
        unsafe { env::remove_var(var) };
    }
}

#[test]
fn test_config_defaults() {
    let _guard = get_env_lock().lock().unwrap();
    clear_vars();

    let config = Config::from_env().unwrap();

    assert_eq!(config.stream.symbol, "btcusdt");
    assert_eq!(config.stream.interval, "1m");
    assert_eq!(config.server.port, 8000);
    assert!(config.observability.enabled);
    assert_eq!(config.reconnect_policy().max_backoff, Duration::from_secs(60));
    assert_eq!(config.reconnect_policy().max_attempts, None);
}

#[test]
fn test_config_from_env_overrides() {
    let _guard = get_env_lock().lock().unwrap();
    clear_vars();

    unsafe {
        env::set_var("SYMBOL", "ETHUSDT");
        env::set_var("KLINE_INTERVAL", "15m");
        env::set_var("SERVER_PORT", "9100");
        env::set_var("RECONNECT_MAX_BACKOFF_SECS", "10");
        env::set_var("RECONNECT_MAX_ATTEMPTS", "3");
        env::set_var("OBSERVABILITY_ENABLED", "false");
    }

    let config = Config::from_env().unwrap();

    assert_eq!(config.stream.symbol, "ethusdt");
    assert_eq!(
        config.stream.stream_url().unwrap().as_str(),
        "wss://stream.binance.com:9443/ws/ethusdt@kline_15m"
    );
    assert_eq!(config.server.port, 9100);
    assert!(!config.observability.enabled);

    let policy = config.reconnect_policy();
    assert_eq!(policy.max_backoff, Duration::from_secs(10));
    assert_eq!(policy.max_attempts, Some(3));

    clear_vars();
}

#[test]
fn test_config_rejects_invalid_interval() {
    let _guard = get_env_lock().lock().unwrap();
    clear_vars();

    unsafe { env::set_var("KLINE_INTERVAL", "2m") };
    assert!(Config::from_env().is_err());

    clear_vars();
}
