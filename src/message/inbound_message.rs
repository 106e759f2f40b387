use crate::constants::MESSAGE_TAG_FIELD;
use serde::de::Error as _;
use serde_json::{Map, Value};

/// One unit received from a peer.
///
/// The type tag decides which fields are read; everything else on the wire
/// object is ignored rather than validated.
#[derive(Debug, Clone, PartialEq)]
pub enum InboundMessage {
    Connect,
    Ping {
        id: Option<String>,
    },
    Method {
        id: String,
        method: String,
        params: Vec<Value>,
    },
    /// An unrecognized tag, a missing tag, or a `method` message that cannot
    /// be correlated (no `id` or no `method`).
    Unknown {
        msg: Option<String>,
    },
}

impl InboundMessage {
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        Self::from_value(serde_json::from_str(text)?)
    }

    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        Self::from_value(serde_json::from_slice(bytes)?)
    }

    /// Classifies an already-parsed JSON value.
    ///
    /// Fails only when the value is not an object.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        let Value::Object(mut fields) = value else {
            return Err(serde_json::Error::custom("message is not a JSON object"));
        };

        let msg = take_string(&mut fields, MESSAGE_TAG_FIELD);

        let message = match msg.as_deref() {
            Some("connect") => InboundMessage::Connect,
            // An empty id counts as no id, so the pong never carries `"id":""`.
            Some("ping") => InboundMessage::Ping {
                id: take_string(&mut fields, "id").filter(|id| !id.is_empty()),
            },
            Some("method") => {
                let id = take_string(&mut fields, "id");
                let method = take_string(&mut fields, "method");
                let params = match fields.remove("params") {
                    None | Some(Value::Null) => Some(Vec::new()),
                    Some(Value::Array(params)) => Some(params),
                    Some(_) => None,
                };

                match (id, method, params) {
                    (Some(id), Some(method), Some(params)) => InboundMessage::Method {
                        id,
                        method,
                        params,
                    },
                    _ => InboundMessage::Unknown { msg },
                }
            }
            _ => InboundMessage::Unknown { msg },
        };

        Ok(message)
    }

    /// The wire tag this message was decoded from, if any.
    pub fn tag(&self) -> Option<&str> {
        match self {
            InboundMessage::Connect => Some("connect"),
            InboundMessage::Ping { .. } => Some("ping"),
            InboundMessage::Method { .. } => Some("method"),
            InboundMessage::Unknown { msg } => msg.as_deref(),
        }
    }
}

fn take_string(fields: &mut Map<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key) {
        Some(Value::String(value)) => Some(value),
        _ => None,
    }
}
