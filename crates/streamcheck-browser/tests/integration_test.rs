//! Integration tests against a real Chrome.
//!
//! Run with: cargo test -p streamcheck-browser --test integration_test -- --ignored --nocapture

use std::path::PathBuf;
use std::time::Duration;

use streamcheck_browser::BrowserManager;
use streamcheck_config::BrowserConfig;
use streamcheck_protocols::{Condition, PageHandle};

fn test_config() -> BrowserConfig {
    BrowserConfig {
        debug_port: 9333,
        headless: true,
        profile_dir: Some(PathBuf::from("/tmp/streamcheck-test-profile")),
        ..BrowserConfig::default()
    }
}

const FIXTURE: &str = "data:text/html,<title>Fixture</title>\
<input placeholder='Search'>\
<button class='ytp-ad-skip-button'>Skip Ad</button>\
<button style='display:none' class='hidden'>Skip</button>";

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_connect_and_shutdown() {
    let manager = BrowserManager::new(test_config());
    manager.connect().await.unwrap();
    manager.close().await.unwrap();
    manager.shutdown_chrome().await.unwrap();
}

#[tokio::test]
#[ignore = "requires Chrome"]
async fn test_page_operations() {
    let manager = BrowserManager::new(test_config());
    let page = manager.new_page("about:blank").await.unwrap();
    page.navigate(FIXTURE, Duration::from_secs(10)).await.unwrap();

    assert_eq!(page.title().await.unwrap(), "Fixture");
    assert!(page.is_visible(".ytp-ad-skip-button", Duration::from_secs(1)).await.unwrap());
    assert!(!page.is_visible(".hidden", Duration::from_secs(1)).await.unwrap());
    assert!(page.is_visible(r#"button:has-text("skip ad")"#, Duration::from_secs(1)).await.unwrap());
    assert_eq!(page.count("button").await.unwrap(), 2);

    page.fill(r#"input[placeholder="Search"]"#, "lofi beats").await.unwrap();
    let value = page
        .evaluate("document.querySelector('input').value")
        .await
        .unwrap();
    assert_eq!(value, "lofi beats");

    page.click(".ytp-ad-skip-button", Duration::from_secs(2)).await.unwrap();
    page.wait_for_condition(&Condition::attached("input"), Duration::from_secs(1))
        .await
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let shot = dir.path().join("fixture.png");
    page.screenshot(&shot).await.unwrap();
    assert!(shot.exists());

    manager.close_page(&page).await.unwrap();
    manager.shutdown_chrome().await.unwrap();
}
