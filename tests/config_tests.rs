use appointment_bot::config::Config;
use appointment_bot::i18n::Language;
use std::env;
use std::sync::Mutex;

// Mutex to ensure config tests run sequentially to avoid environment variable conflicts
static CONFIG_TEST_MUTEX: Mutex<()> = Mutex::new(());

const VARS: [&str; 10] = [
    "BOT_TOKEN",
    "ADMIN_CHAT_ID",
    "ADMIN_LANGUAGE",
    "WEBHOOK_URL",
    "HTTP_PORT",
    "DATA_FILE",
    "SLOT_START_HOUR",
    "SLOT_END_HOUR",
    "SLOT_STEP_MINUTES",
    "BOOKING_DAYS",
];

fn clear_env() {
    for var in VARS {
        env::remove_var(var);
    }
}

#[test]
fn test_config_from_env_with_all_vars() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("BOT_TOKEN", "test_token_123");
    env::set_var("ADMIN_CHAT_ID", "123456789");
    env::set_var("ADMIN_LANGUAGE", "en");
    env::set_var("WEBHOOK_URL", "https://bot.example.com");
    env::set_var("HTTP_PORT", "8080");
    env::set_var("DATA_FILE", "data/bookings.json");
    env::set_var("SLOT_START_HOUR", "10");
    env::set_var("SLOT_END_HOUR", "18");
    env::set_var("SLOT_STEP_MINUTES", "30");
    env::set_var("BOOKING_DAYS", "5");

    let config = Config::from_env().unwrap();

    assert_eq!(config.telegram_bot_token, "test_token_123");
    assert_eq!(config.admin_chat_id, Some(123456789));
    assert_eq!(config.admin_language, Language::En);
    assert_eq!(config.webhook_url.as_deref(), Some("https://bot.example.com"));
    assert_eq!(config.http_port, 8080);
    assert_eq!(config.data_file, "data/bookings.json");
    assert_eq!(config.slot_start_hour, 10);
    assert_eq!(config.slot_end_hour, 18);
    assert_eq!(config.slot_step_minutes, 30);
    assert_eq!(config.booking_days, 5);

    clear_env();
}

#[test]
fn test_config_from_env_with_defaults() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    // Only set required token, let others use defaults
    env::set_var("BOT_TOKEN", "required_token");

    let config = Config::from_env().unwrap();

    assert_eq!(config.telegram_bot_token, "required_token");
    assert_eq!(config.admin_chat_id, None);
    assert_eq!(config.admin_language, Language::Ru);
    assert_eq!(config.webhook_url, None);
    assert_eq!(config.webhook_endpoint(), None);
    assert_eq!(config.http_port, 3000);
    assert_eq!(config.data_file, "appointments.json");
    assert_eq!(config.slot_start_hour, 12);
    assert_eq!(config.slot_end_hour, 22);
    assert_eq!(config.slot_step_minutes, 60);
    assert_eq!(config.booking_days, 3);

    clear_env();
}

#[test]
fn test_config_missing_required_token() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    let result = Config::from_env();
    assert!(result.is_err());

    let error_msg = result.unwrap_err().to_string();
    assert!(error_msg.contains("BOT_TOKEN must be set"));

    // Blank token is as good as missing
    env::set_var("BOT_TOKEN", "   ");
    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("BOT_TOKEN must be set"));

    clear_env();
}

#[test]
fn test_config_invalid_admin_chat_id() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("BOT_TOKEN", "test_token");

    for bad in ["not-a-number", "0"] {
        env::set_var("ADMIN_CHAT_ID", bad);
        let error_msg = Config::from_env().unwrap_err().to_string();
        assert!(error_msg.contains("Invalid ADMIN_CHAT_ID"), "{}", error_msg);
    }

    // Empty means not configured
    env::set_var("ADMIN_CHAT_ID", "");
    assert_eq!(Config::from_env().unwrap().admin_chat_id, None);

    // Group chats are negative
    env::set_var("ADMIN_CHAT_ID", " -1001234567890 ");
    assert_eq!(Config::from_env().unwrap().admin_chat_id, Some(-1001234567890));

    clear_env();
}

#[test]
fn test_config_invalid_port() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("HTTP_PORT", "invalid_port");

    let result = Config::from_env();
    assert!(result.is_err());

    let error_msg = result.unwrap_err().to_string();
    assert!(error_msg.contains("Invalid HTTP_PORT"));

    env::set_var("HTTP_PORT", "-1");
    assert!(Config::from_env().is_err());

    env::set_var("HTTP_PORT", "  65535  ");
    assert_eq!(Config::from_env().unwrap().http_port, 65535);

    clear_env();
}

#[test]
fn test_config_invalid_schedule() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("BOT_TOKEN", "test_token");

    env::set_var("SLOT_START_HOUR", "22");
    env::set_var("SLOT_END_HOUR", "12");
    assert!(Config::from_env().is_err());

    env::set_var("SLOT_START_HOUR", "12");
    env::set_var("SLOT_END_HOUR", "25");
    assert!(Config::from_env().is_err());

    env::set_var("SLOT_END_HOUR", "22");
    env::set_var("SLOT_STEP_MINUTES", "0");
    assert!(Config::from_env().is_err());

    env::set_var("SLOT_STEP_MINUTES", "60");
    env::set_var("BOOKING_DAYS", "0");
    assert!(Config::from_env().is_err());

    env::set_var("BOOKING_DAYS", "abc");
    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("Invalid BOOKING_DAYS"));

    env::set_var("BOOKING_DAYS", "7");
    assert_eq!(Config::from_env().unwrap().booking_days, 7);

    clear_env();
}

#[test]
fn test_config_invalid_admin_language() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("BOT_TOKEN", "test_token");
    env::set_var("ADMIN_LANGUAGE", "fr");
    let error_msg = Config::from_env().unwrap_err().to_string();
    assert!(error_msg.contains("Invalid ADMIN_LANGUAGE"));

    env::set_var("ADMIN_LANGUAGE", "KA");
    assert_eq!(Config::from_env().unwrap().admin_language, Language::Ka);

    clear_env();
}

#[test]
fn test_webhook_endpoint() {
    let _guard = CONFIG_TEST_MUTEX.lock().unwrap();
    clear_env();

    env::set_var("BOT_TOKEN", "test_token");

    env::set_var("WEBHOOK_URL", "https://bot.example.com/");
    assert_eq!(
        Config::from_env().unwrap().webhook_endpoint().as_deref(),
        Some("https://bot.example.com/webhook")
    );

    env::set_var("WEBHOOK_URL", "https://bot.example.com/webhook");
    assert_eq!(
        Config::from_env().unwrap().webhook_endpoint().as_deref(),
        Some("https://bot.example.com/webhook")
    );

    env::set_var("WEBHOOK_URL", "  ");
    assert_eq!(Config::from_env().unwrap().webhook_endpoint(), None);

    clear_env();
}
