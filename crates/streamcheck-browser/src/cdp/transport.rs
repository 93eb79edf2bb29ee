//! Request/response plumbing shared by the browser client and page sessions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use futures::stream::SplitSink;
use futures::SinkExt;
use parking_lot::Mutex;
use serde_json::Value;
use tokio::net::TcpStream;
use tokio::sync::oneshot;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::trace;

use super::error::CdpError;
use super::protocol::{Command, Incoming};

pub(crate) type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
pub(crate) type WsSink = SplitSink<WsStream, Message>;

type Responder = oneshot::Sender<Result<Value, CdpError>>;

/// One WebSocket connection to the browser, multiplexed by request id.
pub(crate) struct Transport {
    ws_tx: tokio::sync::Mutex<WsSink>,
    pending: Mutex<HashMap<u64, Responder>>,
    request_id: AtomicU64,
    request_timeout: Duration,
}

impl Transport {
    pub(crate) fn new(ws_tx: WsSink, request_timeout: Duration) -> Self {
        Self {
            ws_tx: tokio::sync::Mutex::new(ws_tx),
            pending: Mutex::new(HashMap::new()),
            request_id: AtomicU64::new(1),
            request_timeout,
        }
    }

    /// Send a CDP command and wait for its response.
    pub(crate) async fn call(
        &self,
        method: &str,
        params: Option<Value>,
        session_id: Option<&str>,
    ) -> Result<Value, CdpError> {
        let id = self.request_id.fetch_add(1, Ordering::SeqCst);

        let json = serde_json::to_string(&Command {
            id,
            method,
            params,
            session_id,
        })?;
        trace!("CDP send: {}", json);

        let (tx, rx) = oneshot::channel();
        self.pending.lock().insert(id, tx);

        {
            let mut ws = self.ws_tx.lock().await;
            if let Err(e) = ws.send(Message::Text(json.into())).await {
                self.pending.lock().remove(&id);
                return Err(e.into());
            }
        }

        match tokio::time::timeout(self.request_timeout, rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(CdpError::SessionClosed),
            Err(_) => {
                self.pending.lock().remove(&id);
                Err(CdpError::Timeout(format!("Request {} timed out", method)))
            }
        }
    }

    /// Route an incoming response to the caller waiting on it.
    ///
    /// Returns `false` when nobody was waiting for this id.
    pub(crate) fn resolve(&self, reply: Incoming) -> bool {
        let Some(id) = reply.id else {
            return false;
        };
        let Some(tx) = self.pending.lock().remove(&id) else {
            return false;
        };
        let _ = tx.send(reply.into_result());
        true
    }

    /// Drop every pending request; their callers observe `SessionClosed`.
    pub(crate) fn fail_all(&self) {
        self.pending.lock().clear();
    }

    #[cfg(test)]
    pub(crate) fn pending_len(&self) -> usize {
        self.pending.lock().len()
    }
}

#[cfg(test)]
#[path = "transport_tests.rs"]
mod tests;
