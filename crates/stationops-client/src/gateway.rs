//! Remote gateway — single-endpoint message dispatcher.
//!
//! The remote store is fronted by one action-dispatch endpoint: reads are
//! `GET ?action=...` queries, writes are `POST` commands with a JSON body.
//! The gateway performs exactly one network call per invocation — no retry,
//! no caching, no deduplication of in-flight requests. All state mutation
//! happens in callers.

use serde_json::Value;
use url::Url;

use crate::config::ClientConfig;
use crate::error::SyncError;

/// Parsed response envelope.
///
/// A result is successful only if the body carries an explicit success
/// indicator. One legacy shape is additionally supported permanently: the
/// `getUsers` action answers with a bare JSON array, which is treated as a
/// successful envelope whose payload is that array.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// The explicit success indicator from the response body.
    pub success: bool,
    /// Optional human-readable message (`msg`) from the remote endpoint.
    pub message: Option<String>,
    /// The full parsed body; collections live under entity-specific keys.
    pub body: Value,
}

impl Envelope {
    /// Interpret a parsed response body as an envelope.
    pub fn from_value(action: &str, value: Value) -> Result<Self, SyncError> {
        match &value {
            Value::Object(map) => {
                let Some(success) = map.get("success").and_then(Value::as_bool) else {
                    return Err(SyncError::MalformedResponse {
                        action: action.to_string(),
                        detail: "missing boolean `success` indicator".into(),
                    });
                };
                let message = map.get("msg").and_then(Value::as_str).map(str::to_string);
                Ok(Envelope {
                    success,
                    message,
                    body: value,
                })
            }
            // Legacy bare-array success shape.
            Value::Array(_) => Ok(Envelope {
                success: true,
                message: None,
                body: value,
            }),
            _ => Err(SyncError::MalformedResponse {
                action: action.to_string(),
                detail: "body is neither an envelope object nor an array".into(),
            }),
        }
    }
}

/// Single-endpoint dispatcher for read queries and write commands.
#[derive(Debug, Clone)]
pub struct RemoteGateway {
    http: reqwest::Client,
    endpoint: Url,
}

impl RemoteGateway {
    /// Build a gateway from configuration. One `reqwest::Client` is
    /// constructed with the configured timeout and reused for every call.
    pub fn new(config: &ClientConfig) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SyncError::Transport {
                action: "client_init".into(),
                source: e,
            })?;
        Ok(Self {
            http,
            endpoint: config.endpoint_url.clone(),
        })
    }

    /// Issue a read query: `GET {endpoint}?action={action}[&param=value...]`.
    ///
    /// An envelope with `success: false` is returned as-is — read paths
    /// degrade to empty collections rather than erroring.
    pub async fn query(&self, action: &str, params: &[(&str, &str)]) -> Result<Envelope, SyncError> {
        let mut url = self.endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("action", action);
            for (key, value) in params {
                pairs.append_pair(key, value);
            }
        }
        tracing::debug!(action, "dispatching read query");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SyncError::Transport {
                action: action.to_string(),
                source: e,
            })?;

        let body: Value = resp.json().await.map_err(|e| SyncError::MalformedResponse {
            action: action.to_string(),
            detail: e.to_string(),
        })?;

        Envelope::from_value(action, body)
    }

    /// Issue a write command: `POST {endpoint}` with the JSON body
    /// `{ "action": action, ...payload }`.
    ///
    /// The body is transmitted under `text/plain;charset=utf-8` so the
    /// request stays a CORS simple request against the deployed proxy.
    /// An explicit `success: false` answer is converted into
    /// [`SyncError::Rejected`] with the remote message passed through.
    pub async fn command(&self, action: &str, payload: Value) -> Result<Envelope, SyncError> {
        let mut body = match payload {
            Value::Object(map) => map,
            other => {
                let mut map = serde_json::Map::new();
                map.insert("data".into(), other);
                map
            }
        };
        body.insert("action".into(), Value::String(action.to_string()));
        let body = serde_json::to_string(&Value::Object(body)).map_err(|e| {
            SyncError::MalformedResponse {
                action: action.to_string(),
                detail: format!("unserializable command payload: {e}"),
            }
        })?;
        tracing::debug!(action, "dispatching write command");

        let resp = self
            .http
            .post(self.endpoint.clone())
            .header(reqwest::header::CONTENT_TYPE, "text/plain;charset=utf-8")
            .body(body)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SyncError::Transport {
                action: action.to_string(),
                source: e,
            })?;

        let body: Value = resp.json().await.map_err(|e| SyncError::MalformedResponse {
            action: action.to_string(),
            detail: e.to_string(),
        })?;

        let envelope = Envelope::from_value(action, body)?;
        if !envelope.success {
            return Err(SyncError::Rejected {
                action: action.to_string(),
                message: envelope.message,
            });
        }
        Ok(envelope)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_reads_success_and_message() {
        let env = Envelope::from_value("x", json!({"success": false, "msg": "壞了"})).unwrap();
        assert!(!env.success);
        assert_eq!(env.message.as_deref(), Some("壞了"));
    }

    #[test]
    fn envelope_accepts_legacy_bare_array() {
        let env = Envelope::from_value("getUsers", json!([{"email": "u@x.com"}])).unwrap();
        assert!(env.success);
        assert!(env.body.is_array());
    }

    #[test]
    fn envelope_rejects_missing_indicator() {
        assert!(Envelope::from_value("x", json!({"tasks": []})).is_err());
        assert!(Envelope::from_value("x", json!("ok")).is_err());
        assert!(Envelope::from_value("x", json!(42)).is_err());
    }
}
