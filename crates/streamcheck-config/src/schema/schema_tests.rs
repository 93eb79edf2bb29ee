use super::*;

#[test]
fn test_config_default() {
    let config = Config::default();
    assert_eq!(config.browser.debug_port, 9222);
    assert_eq!(config.site.base_url, "https://www.youtube.com");
    assert_eq!(config.ad_skip.max_attempts, 20);
    assert_eq!(config.artifacts.screenshots_dir, PathBuf::from("screenshots"));
}

#[test]
fn test_browser_config_default() {
    let browser = BrowserConfig::default();
    assert_eq!(browser.viewport_width, 1280);
    assert_eq!(browser.viewport_height, 720);
    assert!(!browser.headless);
    assert_eq!(browser.request_timeout(), Duration::from_secs(30));
}

#[test]
fn test_browser_profile_dir_default() {
    let browser = BrowserConfig::default();
    assert!(browser.profile_dir().ends_with(".streamcheck/browser-profile"));
}

#[test]
fn test_browser_profile_dir_explicit() {
    let browser = BrowserConfig {
        profile_dir: Some(PathBuf::from("/tmp/profile")),
        ..Default::default()
    };
    assert_eq!(browser.profile_dir(), PathBuf::from("/tmp/profile"));
}

#[test]
fn test_site_timeouts() {
    let site = SiteConfig::default();
    assert_eq!(site.navigation_timeout(), Duration::from_secs(30));
    assert_eq!(site.search_timeout(), Duration::from_secs(60));
    assert_eq!(site.pause_timeout(), Duration::from_secs(5));
}

#[test]
fn test_ad_skip_defaults() {
    let ad = AdSkipConfig::default();
    assert_eq!(ad.grace_wait(), Duration::from_millis(3000));
    assert_eq!(ad.marker_visibility_timeout(), Duration::from_millis(2000));
    assert_eq!(ad.probe_timeout(), Duration::from_millis(100));
    assert_eq!(ad.settle_delay(), Duration::from_millis(500));
    assert_eq!(ad.click_timeout(), Duration::from_millis(2000));
    assert_eq!(ad.round_delay(), Duration::from_millis(1000));
    assert_eq!(ad.marker_selectors.first().map(String::as_str), Some(".ytp-ad-player-overlay"));
    assert_eq!(ad.skip_selectors.first().map(String::as_str), Some(".ytp-ad-skip-button"));
    assert_eq!(ad.ad_text_markers, vec!["Ad", "Advertisement", "Skip"]);
    assert_eq!(ad.on_exhaustion, ExhaustionPolicy::WaitForAdToEnd);
    assert_eq!(ad.ad_text_match, TextMatch::Substring);
}

#[test]
fn test_polling_window() {
    let ad = AdSkipConfig {
        max_attempts: 2,
        skip_selectors: vec!["a".to_string()],
        probe_timeout_ms: 100,
        settle_delay_ms: 500,
        hover_timeout_ms: 1000,
        click_timeout_ms: 2000,
        round_delay_ms: 1000,
        ..Default::default()
    };
    // 2 rounds * (1000 + 3600)
    assert_eq!(ad.polling_window(), Duration::from_millis(9200));
}

#[test]
fn test_exhaustion_policy_serde() {
    let json = serde_json::to_string(&ExhaustionPolicy::ReturnImmediately).unwrap();
    assert_eq!(json, "\"return_immediately\"");
    let parsed: ExhaustionPolicy = serde_json::from_str("\"wait_for_ad_to_end\"").unwrap();
    assert_eq!(parsed, ExhaustionPolicy::WaitForAdToEnd);
}

#[test]
fn test_report_config_default() {
    let report = ReportConfig::default();
    assert_eq!(report.report_name, "QA Automation Report");
    assert_eq!(report.browser_name, "chromium");
    assert!(report.automatically_add_screenshots);
    assert!(report.executed_by.is_none());
}

#[test]
fn test_config_serialization() {
    let config = Config::default();
    let json = serde_json::to_string(&config).unwrap();
    assert!(json.contains("ytp-ad-skip-button"));
    assert!(json.contains("9222"));
}
