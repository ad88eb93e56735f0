use super::*;
use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_when_nothing_is_set() {
    let cfg = ClientConfig::from_lookup(lookup(&[]));
    assert_eq!(cfg, ClientConfig::default());
    assert_eq!(cfg.api_base_url, "http://localhost:8000");
    assert_eq!(cfg.emotion_interval, Duration::from_millis(3000));
    assert_eq!(cfg.stats_refresh, Duration::from_secs(10));
    assert_eq!(cfg.question_count, 5);
}

#[test]
fn overrides_are_parsed() {
    let cfg = ClientConfig::from_lookup(lookup(&[
        ("CODERUNNER_API_BASE_URL", "https://api.example.test/"),
        ("CODERUNNER_REQUEST_TIMEOUT_SECS", "5"),
        ("CODERUNNER_CONNECT_TIMEOUT_SECS", "2"),
        ("CODERUNNER_EMOTION_INTERVAL_MS", "1500"),
        ("CODERUNNER_STATS_REFRESH_SECS", "30"),
        ("CODERUNNER_QUESTION_COUNT", " 8 "),
    ]));
    assert_eq!(cfg.api_base_url, "https://api.example.test");
    assert_eq!(cfg.request_timeout, Duration::from_secs(5));
    assert_eq!(cfg.connect_timeout, Duration::from_secs(2));
    assert_eq!(cfg.emotion_interval, Duration::from_millis(1500));
    assert_eq!(cfg.stats_refresh, Duration::from_secs(30));
    assert_eq!(cfg.question_count, 8);
}

#[test]
fn unparsable_values_fall_back_to_defaults() {
    let cfg = ClientConfig::from_lookup(lookup(&[
        ("CODERUNNER_REQUEST_TIMEOUT_SECS", "soon"),
        ("CODERUNNER_QUESTION_COUNT", "-3"),
        ("CODERUNNER_API_BASE_URL", "   "),
    ]));
    assert_eq!(cfg.request_timeout, Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    assert_eq!(cfg.question_count, DEFAULT_QUESTION_COUNT);
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn zero_periods_are_clamped() {
    let cfg = ClientConfig::from_lookup(lookup(&[
        ("CODERUNNER_EMOTION_INTERVAL_MS", "0"),
        ("CODERUNNER_STATS_REFRESH_SECS", "0"),
        ("CODERUNNER_QUESTION_COUNT", "0"),
    ]));
    assert_eq!(cfg.emotion_interval, Duration::from_millis(1));
    assert_eq!(cfg.stats_refresh, Duration::from_secs(1));
    assert_eq!(cfg.question_count, 1);
}

#[test]
fn with_base_url_strips_trailing_slash() {
    let cfg = ClientConfig::default().with_base_url("http://127.0.0.1:9000/");
    assert_eq!(cfg.api_base_url, "http://127.0.0.1:9000");
}
