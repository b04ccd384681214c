//! WebDriver-backed render sessions
//!
//! Drives a running chromedriver over the raw WebDriver JSON protocol:
//! session create with headless Chrome capabilities, `POST /url` to navigate,
//! `POST /execute/sync` for DOM queries, `DELETE /session/{id}` on close.
//! Element waits poll a `querySelector` probe script until a deadline.

use crate::config::RenderConfig;
use crate::render::{PageSession, RenderBackend};
use crate::{RenderError, RenderResult};
use reqwest::Client;
use serde_json::{json, Value};
use std::time::{Duration, Instant};

/// Interval between element-wait probe scripts
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Render backend connected to a WebDriver endpoint
#[derive(Debug, Clone)]
pub struct WebDriverBackend {
    client: Client,
    endpoint: String,
}

impl WebDriverBackend {
    /// Creates a backend for the configured WebDriver endpoint
    pub fn new(config: &RenderConfig) -> RenderResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(40))
            .build()
            .map_err(|e| RenderError::SessionSetup {
                endpoint: config.webdriver_url.clone(),
                message: format!("http client build failed: {}", e),
            })?;

        Ok(Self {
            client,
            endpoint: config.webdriver_url.trim_end_matches('/').to_string(),
        })
    }
}

impl RenderBackend for WebDriverBackend {
    type Page = WebDriverPage;

    async fn open_page(&self) -> RenderResult<WebDriverPage> {
        let session_endpoint = format!("{}/session", self.endpoint);
        let caps = chrome_capabilities();

        let response = self
            .client
            .post(&session_endpoint)
            .json(&caps)
            .send()
            .await
            .map_err(|e| RenderError::SessionSetup {
                endpoint: self.endpoint.clone(),
                message: format!("session create request failed: {}", e),
            })?;

        let status = response.status();
        let body: Value = response
            .json()
            .await
            .map_err(|e| RenderError::SessionSetup {
                endpoint: self.endpoint.clone(),
                message: format!("session create response parse failed: {}", e),
            })?;

        if !status.is_success() {
            return Err(RenderError::SessionSetup {
                endpoint: self.endpoint.clone(),
                message: format!("session create HTTP {}", status.as_u16()),
            });
        }

        if let Some((name, message)) = wire_error(&body) {
            return Err(RenderError::SessionSetup {
                endpoint: self.endpoint.clone(),
                message: format!("{}: {}", name, message),
            });
        }

        let session_id = body
            .pointer("/value/sessionId")
            .and_then(|v| v.as_str())
            .or_else(|| body.pointer("/sessionId").and_then(|v| v.as_str()))
            .ok_or_else(|| RenderError::SessionSetup {
                endpoint: self.endpoint.clone(),
                message: "session create response missing sessionId".to_string(),
            })?
            .to_string();

        tracing::debug!("WebDriver session {} created", session_id);

        Ok(WebDriverPage {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            session_id,
        })
    }
}

/// One live WebDriver session
#[derive(Debug)]
pub struct WebDriverPage {
    client: Client,
    endpoint: String,
    session_id: String,
}

impl WebDriverPage {
    /// Runs a synchronous script in the page and returns its result value
    async fn execute(&self, script: &str) -> RenderResult<Value> {
        let exec_endpoint = format!(
            "{}/session/{}/execute/sync",
            self.endpoint, self.session_id
        );

        let response = self
            .client
            .post(&exec_endpoint)
            .json(&json!({ "script": script, "args": [] }))
            .send()
            .await
            .map_err(|e| RenderError::SessionLost(format!("execute request failed: {}", e)))?;

        let body: Value = response
            .json()
            .await
            .map_err(|e| RenderError::SessionLost(format!("execute response parse failed: {}", e)))?;

        if let Some((name, message)) = wire_error(&body) {
            if name == "invalid session id" {
                return Err(RenderError::SessionLost(message));
            }
            return Err(RenderError::Script(format!("{}: {}", name, message)));
        }

        Ok(body.pointer("/value").cloned().unwrap_or(Value::Null))
    }
}

impl PageSession for WebDriverPage {
    async fn navigate(&mut self, url: &str) -> RenderResult<()> {
        let nav_endpoint = format!("{}/session/{}/url", self.endpoint, self.session_id);

        let response = self
            .client
            .post(&nav_endpoint)
            .json(&json!({ "url": url }))
            .send()
            .await
            .map_err(|e| RenderError::SessionLost(format!("navigate request failed: {}", e)))?;

        let status = response.status();
        let body: Value = response.json().await.unwrap_or_default();

        if let Some((name, message)) = wire_error(&body) {
            if name == "invalid session id" {
                return Err(RenderError::SessionLost(message));
            }
            return Err(RenderError::Navigate {
                url: url.to_string(),
                message: format!("{}: {}", name, message),
            });
        }

        if !status.is_success() {
            return Err(RenderError::Navigate {
                url: url.to_string(),
                message: format!("HTTP {}", status.as_u16()),
            });
        }

        Ok(())
    }

    async fn wait_for_element(&mut self, selector: &str, timeout: Duration) -> RenderResult<()> {
        let probe = format!(
            "return document.querySelector({:?}) !== null;",
            selector
        );
        let deadline = Instant::now() + timeout;

        loop {
            if self.execute(&probe).await?.as_bool() == Some(true) {
                return Ok(());
            }

            if Instant::now() >= deadline {
                return Err(RenderError::WaitTimeout {
                    selector: selector.to_string(),
                    timeout_ms: timeout.as_millis() as u64,
                });
            }

            tokio::time::sleep(WAIT_POLL_INTERVAL).await;
        }
    }

    async fn element_texts(&mut self, tag: &str) -> RenderResult<Vec<String>> {
        let script = format!(
            "return Array.from(document.getElementsByTagName({:?})).map(el => el.innerText || el.textContent || '');",
            tag
        );
        let value = self.execute(&script).await?;

        Ok(string_array(&value))
    }

    async fn link_hrefs(&mut self) -> RenderResult<Vec<String>> {
        let script = "return Array.from(document.querySelectorAll('a[href]')).map(el => el.href).filter(Boolean);";
        let value = self.execute(script).await?;

        Ok(string_array(&value))
    }

    async fn close(self) -> RenderResult<()> {
        let delete_endpoint = format!("{}/session/{}", self.endpoint, self.session_id);

        self.client
            .delete(&delete_endpoint)
            .send()
            .await
            .map_err(|e| RenderError::SessionLost(format!("session delete failed: {}", e)))?;

        tracing::debug!("WebDriver session {} closed", self.session_id);

        Ok(())
    }
}

/// Extracts a WebDriver error name and message from a response body, if any
fn wire_error(body: &Value) -> Option<(String, String)> {
    let name = body.pointer("/value/error")?.as_str()?.to_string();
    let message = body
        .pointer("/value/message")
        .and_then(|v| v.as_str())
        .unwrap_or("unknown webdriver error")
        .to_string();
    Some((name, message))
}

/// Collects string elements from a script result array
fn string_array(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|arr| {
            arr.iter()
                .filter_map(|v| v.as_str().map(|s| s.to_string()))
                .collect()
        })
        .unwrap_or_default()
}

/// Headless Chrome capabilities for the crawl session
fn chrome_capabilities() -> Value {
    json!({
        "capabilities": {
            "alwaysMatch": {
                "browserName": "chrome",
                "goog:chromeOptions": {
                    "args": [
                        "--headless",
                        "--disable-gpu",
                        "--no-sandbox",
                        "--disable-dev-shm-usage"
                    ]
                }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_error_extraction() {
        let body = json!({
            "value": { "error": "invalid session id", "message": "session deleted" }
        });
        let (name, message) = wire_error(&body).unwrap();
        assert_eq!(name, "invalid session id");
        assert_eq!(message, "session deleted");
    }

    #[test]
    fn test_wire_error_absent_on_success() {
        let body = json!({ "value": null });
        assert!(wire_error(&body).is_none());
    }

    #[test]
    fn test_string_array_filters_non_strings() {
        let value = json!(["a", 1, "b", null]);
        assert_eq!(string_array(&value), vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_string_array_of_non_array() {
        assert!(string_array(&Value::Null).is_empty());
    }
}
