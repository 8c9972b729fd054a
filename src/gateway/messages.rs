use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    platform::{Destination, InboundMessage},
    shared::AppError,
};

/// Frame types exchanged with the platform adapter
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FrameType {
    // Adapter -> Server
    Message,

    // Server -> Adapter
    Send,
    Error,
}

/// Metadata for gateway frames
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameMeta {
    pub timestamp: DateTime<Utc>,
}

/// Base structure for gateway frames
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayFrame {
    #[serde(rename = "type")]
    pub frame_type: FrameType,
    pub payload: serde_json::Value,
    pub meta: Option<FrameMeta>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SendPayload {
    pub destination: Destination,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub message: String,
}

impl GatewayFrame {
    pub fn new(frame_type: FrameType, payload: serde_json::Value) -> Self {
        Self {
            frame_type,
            payload,
            meta: Some(FrameMeta {
                timestamp: Utc::now(),
            }),
        }
    }

    /// Instruction for the adapter to deliver `content` to `destination`
    pub fn send(destination: &Destination, content: &str) -> Self {
        Self::new(
            FrameType::Send,
            serde_json::json!(SendPayload {
                destination: destination.clone(),
                content: content.to_string(),
            }),
        )
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(
            FrameType::Error,
            serde_json::json!(ErrorPayload {
                message: message.into(),
            }),
        )
    }

    pub fn parse(raw: &str) -> Result<Self, AppError> {
        serde_json::from_str(raw).map_err(|e| AppError::InvalidFrame(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, AppError> {
        serde_json::to_string(self).map_err(|e| AppError::InvalidFrame(e.to_string()))
    }

    /// Extracts the inbound message carried by a `MESSAGE` frame
    pub fn into_inbound_message(self) -> Result<InboundMessage, AppError> {
        if self.frame_type != FrameType::Message {
            return Err(AppError::InvalidFrame(format!(
                "unexpected frame type {:?} from adapter",
                self.frame_type
            )));
        }

        serde_json::from_value(self.payload).map_err(|e| AppError::InvalidFrame(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_frame_wire_shape() {
        let frame = GatewayFrame::send(&Destination::private("u1"), " [*u2*] ： hello");
        let value: serde_json::Value = serde_json::from_str(&frame.to_json().unwrap()).unwrap();

        assert_eq!(value["type"], "SEND");
        assert_eq!(value["payload"]["destination"], "private:u1");
        assert_eq!(value["payload"]["content"], " [*u2*] ： hello");
        assert!(value["meta"]["timestamp"].is_string());
    }

    #[test]
    fn test_parse_message_frame() {
        let raw = r#"{
            "type": "MESSAGE",
            "payload": {
                "platform": "iirose",
                "user_id": "u2",
                "username": "bob",
                "content": "hello",
                "channel_id": "public"
            }
        }"#;

        let message = GatewayFrame::parse(raw)
            .unwrap()
            .into_inbound_message()
            .unwrap();
        assert_eq!(message.user_id, "u2");
        assert_eq!(message.content, "hello");
    }

    #[test]
    fn test_reject_server_frame_from_adapter() {
        let frame = GatewayFrame::send(&Destination::Public, "x");
        let result = frame.into_inbound_message();
        assert!(matches!(result, Err(AppError::InvalidFrame(_))));
    }

    #[test]
    fn test_reject_malformed_json() {
        assert!(matches!(
            GatewayFrame::parse("not json"),
            Err(AppError::InvalidFrame(_))
        ));
        let missing_fields = r#"{"type":"MESSAGE","payload":{"user_id":"u1"}}"#;
        let result = GatewayFrame::parse(missing_fields)
            .unwrap()
            .into_inbound_message();
        assert!(matches!(result, Err(AppError::InvalidFrame(_))));
    }
}
