use serde::Serialize;
use serde_json::Value;

/// Every message kind the server writes, tagged by `msg` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "msg", rename_all = "lowercase")]
pub enum OutboundMessage {
    Connected {
        session: String,
    },
    Pong {
        #[serde(skip_serializing_if = "Option::is_none")]
        id: Option<String>,
    },
    Result {
        id: String,
        #[serde(flatten)]
        outcome: MethodOutcome,
    },
    Updated {
        methods: Vec<String>,
    },
}

/// Exactly one of `result` or `error` on a `result` message.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodOutcome {
    Result(Value),
    Error(MethodError),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodError {
    pub error: String,
}

impl OutboundMessage {
    pub fn connected(session: impl Into<String>) -> Self {
        OutboundMessage::Connected {
            session: session.into(),
        }
    }

    pub fn pong(id: Option<String>) -> Self {
        OutboundMessage::Pong { id }
    }

    pub fn result(id: impl Into<String>, result: Value) -> Self {
        OutboundMessage::Result {
            id: id.into(),
            outcome: MethodOutcome::Result(result),
        }
    }

    pub fn error(id: impl Into<String>, error: impl Into<String>) -> Self {
        OutboundMessage::Result {
            id: id.into(),
            outcome: MethodOutcome::Error(MethodError {
                error: error.into(),
            }),
        }
    }

    pub fn updated(id: impl Into<String>) -> Self {
        OutboundMessage::Updated {
            methods: vec![id.into()],
        }
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
