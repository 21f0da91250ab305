//! Fire-and-forget webhook notification.
//!
//! Delivery failures must never affect the synchronization result: every
//! error path here is swallowed and logged, nothing propagates.

use std::time::Duration;

use serde_json::{json, Value};

const NOTIFY_TIMEOUT: Duration = Duration::from_secs(8);

/// POST the commit message to `webhook_url`. Never fails.
pub fn send(webhook_url: &str, message: &str) {
    let result = ureq::post(webhook_url)
        .timeout(NOTIFY_TIMEOUT)
        .send_json(payload(message));
    match result {
        Ok(_) => log::debug!("webhook notification delivered"),
        Err(err) => log::warn!("webhook notification failed: {err}"),
    }
}

fn payload(message: &str) -> Value {
    json!({ "text": format!("AI Commit:\n{message}") })
}
