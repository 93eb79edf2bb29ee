//! Selector parsing and the page-side scripts built from it.
//!
//! CSS alone cannot match on rendered text, so a trailing
//! `:has-text("...")` pseudo-class is split off and applied as a
//! case-insensitive substring filter over `innerText`.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use streamcheck_protocols::Condition;

/// Visibility test run in the page: attached, non-empty box, and not
/// hidden through `display`, `visibility` or `opacity`.
const IS_VISIBLE_FN: &str = "(el) => { \
    if (!el.isConnected) return false; \
    const r = el.getBoundingClientRect(); \
    const s = window.getComputedStyle(el); \
    return r.width > 0 && r.height > 0 \
        && s.display !== 'none' && s.visibility !== 'hidden' && s.opacity !== '0'; }";

fn has_text_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r#"^(?P<base>.*?):has-text\((?:"(?P<dq>[^"]*)"|'(?P<sq>[^']*)')\)\s*$"#).ok()
        })
        .as_ref()
}

/// A parsed element selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorQuery {
    /// Plain CSS part; `*` when the selector was only a text filter.
    pub css: String,
    /// Text the element's rendered text must contain.
    pub has_text: Option<String>,
}

impl SelectorQuery {
    pub fn parse(selector: &str) -> Self {
        let selector = selector.trim();
        match has_text_pattern().and_then(|re| re.captures(selector)) {
            Some(caps) => {
                let base = caps.name("base").map(|m| m.as_str().trim()).unwrap_or("");
                let text = caps
                    .name("dq")
                    .or_else(|| caps.name("sq"))
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default();
                Self {
                    css: if base.is_empty() { "*".to_string() } else { base.to_string() },
                    has_text: Some(text),
                }
            }
            None => Self {
                css: selector.to_string(),
                has_text: None,
            },
        }
    }

    /// Expression evaluating to the array of matching elements.
    pub fn elements_js(&self) -> String {
        let css = js_string(&self.css);
        match &self.has_text {
            Some(text) => format!(
                "Array.from(document.querySelectorAll({css})).filter((el) => \
                 (el.innerText || el.textContent || '').toLowerCase().includes({}))",
                js_string(&text.to_lowercase())
            ),
            None => format!("Array.from(document.querySelectorAll({css}))"),
        }
    }

    /// Expression: is any matching element visible.
    pub fn visible_js(&self) -> String {
        format!(
            "(() => {{ const visible = {IS_VISIBLE_FN}; return ({}).some(visible); }})()",
            self.elements_js()
        )
    }

    /// Expression: number of matching elements.
    pub fn count_js(&self) -> String {
        format!("({}).length", self.elements_js())
    }

    /// Expression: scroll the first visible match into view and return the
    /// centre of its box as `{x, y}`, or `null` when nothing visible matches.
    pub fn action_point_js(&self) -> String {
        format!(
            "(() => {{ const visible = {IS_VISIBLE_FN}; \
             const el = ({}).find(visible); \
             if (!el) return null; \
             el.scrollIntoView({{block: 'center', inline: 'center'}}); \
             const r = el.getBoundingClientRect(); \
             return {{x: r.left + r.width / 2, y: r.top + r.height / 2}}; }})()",
            self.elements_js()
        )
    }

    /// Expression: focus the first match; `false` when nothing matches.
    pub fn focus_js(&self, clear: bool) -> String {
        let clear = if clear {
            "if ('value' in el) { el.value = ''; el.dispatchEvent(new Event('input', {bubbles: true})); }"
        } else {
            ""
        };
        format!(
            "(() => {{ const el = ({})[0]; if (!el) return false; el.focus(); {clear} return true; }})()",
            self.elements_js()
        )
    }

    /// Expression: rendered text of the first match, or `null`.
    pub fn text_js(&self) -> String {
        format!(
            "(() => {{ const el = ({})[0]; return el ? (el.innerText ?? el.textContent) : null; }})()",
            self.elements_js()
        )
    }
}

/// Expression evaluating to `true` once `condition` holds.
pub fn condition_js(condition: &Condition) -> String {
    match condition {
        Condition::Visible(selector) => SelectorQuery::parse(selector).visible_js(),
        Condition::Attached(selector) => {
            format!("({}) > 0", SelectorQuery::parse(selector).count_js())
        }
        Condition::AllHidden(selectors) => {
            let any_visible: Vec<String> = selectors
                .iter()
                .map(|s| SelectorQuery::parse(s).visible_js())
                .collect();
            if any_visible.is_empty() {
                "true".to_string()
            } else {
                format!("!({})", any_visible.join(" || "))
            }
        }
        Condition::Script(expression) => format!("!!({})", expression),
    }
}

/// Quote `s` as a JavaScript string literal.
fn js_string(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}
