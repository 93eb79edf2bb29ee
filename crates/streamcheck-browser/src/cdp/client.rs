//! Browser-level CDP connection.

use std::sync::Arc;
use std::time::Duration;

use futures::stream::SplitStream;
use futures::StreamExt;
use serde_json::{json, Value};
use tokio::task::JoinHandle;
use tokio_tungstenite::tungstenite::Message;
use tracing::{debug, error, trace, warn};

use super::error::CdpError;
use super::protocol::{BrowserVersion, Incoming};
use super::session::PageSession;
use super::transport::{Transport, WsStream};

/// Connection to one Chrome instance.
///
/// Page sessions are attached in flattened mode and multiplex their commands
/// over this client's WebSocket.
pub struct CdpClient {
    browser: String,
    transport: Arc<Transport>,
    reader: JoinHandle<()>,
}

impl CdpClient {
    /// Discover the browser WebSocket through `<endpoint>/json/version` and
    /// connect to it.
    pub async fn connect(endpoint: &str, request_timeout: Duration) -> Result<Self, CdpError> {
        let version_url = format!("{}/json/version", endpoint.trim_end_matches('/'));
        let unavailable = |e: reqwest::Error| CdpError::ChromeNotAvailable(format!("{}: {}", endpoint, e));

        let version: BrowserVersion = reqwest::get(&version_url)
            .await
            .map_err(unavailable)?
            .json()
            .await
            .map_err(unavailable)?;

        let ws_url = url::Url::parse(&version.web_socket_debugger_url)?;
        let (ws_stream, _) = tokio_tungstenite::connect_async(ws_url.as_str())
            .await
            .map_err(|e| CdpError::ConnectionFailed(format!("WebSocket {}: {}", ws_url, e)))?;

        let (sink, source) = ws_stream.split();
        let transport = Arc::new(Transport::new(sink, request_timeout));
        let reader = tokio::spawn(Self::read_loop(source, transport.clone()));

        debug!("Connected to {} at {}", version.browser, ws_url);
        Ok(Self {
            browser: version.browser,
            transport,
            reader,
        })
    }

    /// Product string reported by the browser, e.g. `Chrome/126.0.0.0`.
    pub fn browser(&self) -> &str {
        &self.browser
    }

    async fn read_loop(mut source: SplitStream<WsStream>, transport: Arc<Transport>) {
        while let Some(frame) = source.next().await {
            let text = match frame {
                Ok(Message::Text(text)) => text,
                Ok(Message::Close(_)) => {
                    debug!("Browser closed the CDP connection");
                    break;
                }
                Ok(_) => continue,
                Err(e) => {
                    error!("CDP connection error: {}", e);
                    break;
                }
            };

            match serde_json::from_str::<Incoming>(&text) {
                Ok(msg) if msg.id.is_some() => {
                    if !transport.resolve(msg) {
                        trace!("Dropped late CDP reply");
                    }
                }
                Ok(msg) => trace!(
                    "CDP event {} (session {:?})",
                    msg.method.as_deref().unwrap_or("?"),
                    msg.session_id
                ),
                Err(e) => warn!("Unparseable CDP message: {}", e),
            }
        }
        transport.fail_all();
    }

    /// Send a browser-level command.
    pub async fn call(&self, method: &str, params: Option<Value>) -> Result<Value, CdpError> {
        self.transport.call(method, params, None).await
    }

    /// Open a tab on `url` and attach a session to it.
    pub async fn new_page(&self, url: &str) -> Result<PageSession, CdpError> {
        let created = self
            .call("Target.createTarget", Some(json!({ "url": url })))
            .await?;
        let target_id = required_str(&created, "targetId")?;

        let attached = self
            .call(
                "Target.attachToTarget",
                Some(json!({ "targetId": target_id, "flatten": true })),
            )
            .await?;
        let session_id = required_str(&attached, "sessionId")?;

        let session = PageSession::new(target_id, session_id, self.transport.clone());
        session.enable_domains().await?;
        debug!("Attached to target {}", session.target_id());
        Ok(session)
    }

    pub async fn close_page(&self, target_id: &str) -> Result<(), CdpError> {
        self.call("Target.closeTarget", Some(json!({ "targetId": target_id })))
            .await?;
        Ok(())
    }
}

impl Drop for CdpClient {
    fn drop(&mut self) {
        self.reader.abort();
    }
}

fn required_str(value: &Value, key: &str) -> Result<String, CdpError> {
    value[key]
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| CdpError::InvalidResponse(format!("missing {}", key)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_str() {
        let value = json!({"targetId": "T1", "count": 3});
        assert_eq!(required_str(&value, "targetId").unwrap(), "T1");
        assert!(matches!(
            required_str(&value, "count"),
            Err(CdpError::InvalidResponse(msg)) if msg == "missing count"
        ));
        assert!(required_str(&value, "sessionId").is_err());
    }
}
