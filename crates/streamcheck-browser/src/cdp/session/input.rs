//! Mouse and keyboard input.

use serde_json::json;
use tracing::debug;

use crate::cdp::error::CdpError;
use crate::cdp::protocol::{KeyEvent, MouseButton, MouseEvent};

use super::core::PageSession;

impl PageSession {
    async fn mouse(&self, event: MouseEvent, button: MouseButton, x: f64, y: f64) -> Result<(), CdpError> {
        self.call(
            "Input.dispatchMouseEvent",
            Some(json!({
                "type": event,
                "x": x,
                "y": y,
                "button": button,
                "clickCount": if matches!(button, MouseButton::Left) { 1 } else { 0 },
            })),
        )
        .await?;
        Ok(())
    }

    /// Left click at viewport coordinates.
    pub async fn click(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.mouse(MouseEvent::Press, MouseButton::Left, x, y).await?;
        self.mouse(MouseEvent::Release, MouseButton::Left, x, y).await?;
        debug!("Clicked at ({}, {})", x, y);
        Ok(())
    }

    /// Move the pointer; enough to trigger hover styles and player controls.
    pub async fn mouse_move(&self, x: f64, y: f64) -> Result<(), CdpError> {
        self.mouse(MouseEvent::Move, MouseButton::None, x, y).await
    }

    /// Insert text into the focused element.
    pub async fn type_text(&self, text: &str) -> Result<(), CdpError> {
        self.call("Input.insertText", Some(json!({ "text": text })))
            .await?;
        debug!("Typed {} characters", text.chars().count());
        Ok(())
    }

    /// Key down then key up on the focused element.
    pub async fn press_key(&self, key: &str) -> Result<(), CdpError> {
        let (code, key_code) = Self::key_definition(key);
        for event in [KeyEvent::Down, KeyEvent::Up] {
            let mut params = json!({
                "type": event,
                "key": key,
                "code": code,
                "windowsVirtualKeyCode": key_code,
            });
            // Enter only submits forms when the keydown carries its text.
            if key == "Enter" && event == KeyEvent::Down {
                params["text"] = json!("\r");
            }
            self.call("Input.dispatchKeyEvent", Some(params)).await?;
        }
        Ok(())
    }

    /// DOM `code` and Windows virtual key code for the keys the suite presses.
    pub(super) fn key_definition(key: &str) -> (&str, u32) {
        match key {
            "Enter" => ("Enter", 13),
            "Escape" => ("Escape", 27),
            "Tab" => ("Tab", 9),
            " " | "Space" => ("Space", 32),
            "ArrowLeft" => ("ArrowLeft", 37),
            "ArrowRight" => ("ArrowRight", 39),
            other => (other, 0),
        }
    }
}
