//! CDP wire messages.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::CdpError;

/// Outgoing command. Page-level commands carry the flattened session id.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Command<'a> {
    pub id: u64,
    pub method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub session_id: Option<&'a str>,
}

/// Anything the browser sends back: a reply when `id` is set, else an event.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Incoming {
    pub id: Option<u64>,
    pub result: Option<Value>,
    pub error: Option<ProtocolFault>,
    pub method: Option<String>,
    pub session_id: Option<String>,
}

impl Incoming {
    /// The reply payload, or the protocol error it carries.
    pub fn into_result(self) -> Result<Value, CdpError> {
        match self.error {
            Some(fault) => Err(CdpError::Protocol {
                code: fault.code,
                message: fault.message,
            }),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ProtocolFault {
    pub code: i64,
    pub message: String,
}

/// `/json/version` payload. Chrome spells these keys inconsistently.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct BrowserVersion {
    #[serde(rename = "Browser")]
    pub browser: String,
    #[serde(rename = "webSocketDebuggerUrl")]
    pub web_socket_debugger_url: String,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum MouseButton {
    None,
    Left,
}

/// `Input.dispatchMouseEvent` type.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) enum MouseEvent {
    #[serde(rename = "mouseMoved")]
    Move,
    #[serde(rename = "mousePressed")]
    Press,
    #[serde(rename = "mouseReleased")]
    Release,
}

/// `Input.dispatchKeyEvent` type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub(crate) enum KeyEvent {
    #[serde(rename = "keyDown")]
    Down,
    #[serde(rename = "keyUp")]
    Up,
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
