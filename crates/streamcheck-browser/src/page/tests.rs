use std::sync::Arc;
use std::time::Duration;

use futures::{SinkExt, StreamExt};
use parking_lot::Mutex;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_tungstenite::tungstenite::Message;

use streamcheck_protocols::{Condition, PageError, PageHandle};

use super::CdpPage;
use crate::cdp::transport::Transport;
use crate::cdp::protocol::Incoming;
use crate::cdp::PageSession;

type Responder = Arc<dyn Fn(&str, &Value) -> Value + Send + Sync>;

/// Fake CDP endpoint. Every request is recorded; `respond` maps
/// `(method, params)` to the `result` payload.
async fn start_page(respond: Responder) -> (CdpPage, Arc<Mutex<Vec<Value>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let log = Arc::new(Mutex::new(Vec::new()));

    let server_log = log.clone();
    tokio::spawn(async move {
        let (stream, _) = listener.accept().await.unwrap();
        let ws = tokio_tungstenite::accept_async(stream).await.unwrap();
        let (mut sink, mut source) = ws.split();
        while let Some(Ok(Message::Text(text))) = source.next().await {
            let req: Value = serde_json::from_str(&text).unwrap();
            server_log.lock().push(req.clone());
            let method = req["method"].as_str().unwrap_or_default();
            let result = respond(method, &req["params"]);
            let body = json!({"id": req["id"], "result": result, "sessionId": "S1"});
            sink.send(Message::Text(body.to_string().into())).await.unwrap();
        }
    });

    let (ws, _) = tokio_tungstenite::connect_async(format!("ws://{}", addr))
        .await
        .unwrap();
    let (sink, mut source) = ws.split();
    let transport = Arc::new(Transport::new(sink, Duration::from_secs(5)));
    let reader = transport.clone();
    tokio::spawn(async move {
        while let Some(Ok(Message::Text(text))) = source.next().await {
            let reply: Incoming = serde_json::from_str(&text).unwrap();
            reader.resolve(reply);
        }
    });

    let session = PageSession::new("T1".to_string(), "S1".to_string(), transport);
    (CdpPage::new(Arc::new(session)), log)
}

fn evaluates_to(value: Value) -> Responder {
    Arc::new(move |method, _| {
        if method == "Runtime.evaluate" {
            json!({"result": {"type": "object", "value": value.clone()}})
        } else {
            json!({})
        }
    })
}

fn methods(log: &Mutex<Vec<Value>>) -> Vec<String> {
    log.lock()
        .iter()
        .map(|r| r["method"].as_str().unwrap_or_default().to_string())
        .collect()
}

#[tokio::test]
async fn test_is_visible_true() {
    let (page, log) = start_page(evaluates_to(json!(true))).await;
    assert!(page.is_visible(".ytp-ad-text", Duration::from_secs(1)).await.unwrap());

    let log = log.lock();
    let expression = log[0]["params"]["expression"].as_str().unwrap();
    assert!(expression.contains(r#"querySelectorAll(".ytp-ad-text")"#));
    assert_eq!(log[0]["sessionId"], "S1");
}

#[tokio::test]
async fn test_is_visible_null_is_false() {
    let (page, _) = start_page(evaluates_to(Value::Null)).await;
    assert!(!page.is_visible(".missing", Duration::from_secs(1)).await.unwrap());
}

#[tokio::test]
async fn test_count() {
    let (page, _) = start_page(evaluates_to(json!(4))).await;
    assert_eq!(page.count("ytd-video-renderer").await.unwrap(), 4);
}

#[tokio::test]
async fn test_click_dispatches_at_centre() {
    let (page, log) = start_page(evaluates_to(json!({"x": 10.0, "y": 20.0}))).await;
    page.click(".ytp-ad-skip-button", Duration::from_secs(1))
        .await
        .unwrap();

    assert_eq!(
        methods(&log),
        vec![
            "Runtime.evaluate",
            "Input.dispatchMouseEvent",
            "Input.dispatchMouseEvent",
            "Input.dispatchMouseEvent",
        ]
    );
    let log = log.lock();
    assert_eq!(log[2]["params"]["type"], "mousePressed");
    assert_eq!(log[2]["params"]["x"], 10.0);
    assert_eq!(log[3]["params"]["type"], "mouseReleased");
}

#[tokio::test]
async fn test_hover_times_out_without_visible_match() {
    let (page, log) = start_page(evaluates_to(Value::Null)).await;
    let err = page
        .hover(".ytp-ad-skip-button", Duration::from_millis(250))
        .await
        .unwrap_err();

    assert!(err.is_timeout());
    assert!(!methods(&log).iter().any(|m| m == "Input.dispatchMouseEvent"));
}

#[tokio::test]
async fn test_fill_missing_element() {
    let (page, _) = start_page(evaluates_to(json!(false))).await;
    let err = page.fill("input", "never gonna").await.unwrap_err();
    assert!(matches!(err, PageError::ElementNotFound(sel) if sel == "input"));
}

#[tokio::test]
async fn test_fill_inserts_text() {
    let (page, log) = start_page(evaluates_to(json!(true))).await;
    page.fill(r#"input[placeholder="Search"]"#, "lofi").await.unwrap();

    let log = log.lock();
    assert_eq!(log[1]["method"], "Input.insertText");
    assert_eq!(log[1]["params"]["text"], "lofi");
}

#[tokio::test]
async fn test_press_enter_sends_key_pair() {
    let (page, log) = start_page(evaluates_to(json!(true))).await;
    page.press("input", "Enter").await.unwrap();

    let log = log.lock();
    assert_eq!(log[1]["params"]["type"], "keyDown");
    assert_eq!(log[1]["params"]["windowsVirtualKeyCode"], 13);
    assert_eq!(log[1]["params"]["text"], "\r");
    assert_eq!(log[2]["params"]["type"], "keyUp");
}

#[tokio::test]
async fn test_wait_for_condition_times_out() {
    let (page, _) = start_page(evaluates_to(json!(false))).await;
    let err = page
        .wait_for_condition(&Condition::script("video.paused"), Duration::from_millis(250))
        .await
        .unwrap_err();
    assert!(matches!(err, PageError::Timeout(msg) if msg.starts_with("script(video.paused)")));
}

#[tokio::test]
async fn test_wait_for_condition_tolerates_js_exceptions() {
    let calls = Arc::new(Mutex::new(0u32));
    let counter = calls.clone();
    let respond: Responder = Arc::new(move |_, _| {
        let mut n = counter.lock();
        *n += 1;
        if *n == 1 {
            json!({"result": {}, "exceptionDetails": {"text": "Execution context was destroyed"}})
        } else {
            json!({"result": {"type": "boolean", "value": true}})
        }
    });
    let (page, _) = start_page(respond).await;

    page.wait_for_condition(&Condition::visible("video"), Duration::from_secs(2))
        .await
        .unwrap();
    assert_eq!(*calls.lock(), 2);
}

#[tokio::test]
async fn test_evaluate_exception_is_javascript_error() {
    let respond: Responder = Arc::new(|_, _| {
        json!({"result": {}, "exceptionDetails": {"text": "Uncaught ReferenceError"}})
    });
    let (page, _) = start_page(respond).await;
    let err = page.evaluate("nope()").await.unwrap_err();
    assert!(matches!(err, PageError::JavaScript(_)));
}

#[tokio::test]
async fn test_screenshot_writes_png() {
    let respond: Responder = Arc::new(|method, params| {
        assert_eq!(method, "Page.captureScreenshot");
        assert_eq!(params["format"], "png");
        json!({"data": "iVBORw0KGgo="})
    });
    let (page, _) = start_page(respond).await;

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("screenshots").join("failed_step.png");
    page.screenshot(&path).await.unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[..4], b"\x89PNG");
}
