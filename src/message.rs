use crate::brush::{Brush, BrushType, RgbColor};
use crate::error::MessageError;
use serde::Deserialize;
use serde_json::Value;

const ERASER_TYPE_NAME: &str = "eraser";

/// The tool requested by a `setAnnotationBrush` message.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolSelection {
    Brush(Brush),
    Eraser { size: f32 },
}

/// A decoded host message addressed to the ink module.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    SetAnnotationMode { enable: bool },
    SetAnnotationBrush(ToolSelection),
    AnnotationUndo,
    AnnotationRedo,
    GetAnnotationBrush { message_id: String },
}

#[derive(Debug, Deserialize)]
struct BrushData {
    #[serde(rename = "type")]
    tool_type: String,
    size: f32,
    color: Option<RgbColor>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum RawMessage {
    #[serde(rename = "setAnnotationMode")]
    SetAnnotationMode { enable: bool },
    #[serde(rename = "setAnnotationBrush")]
    SetAnnotationBrush { data: BrushData },
    #[serde(rename = "annotationUndo")]
    AnnotationUndo,
    #[serde(rename = "annotationRedo")]
    AnnotationRedo,
    #[serde(rename = "getAnnotationBrush")]
    GetAnnotationBrush {
        #[serde(rename = "messageId")]
        message_id: String,
    },
}

const MESSAGE_TYPES: [&str; 5] = [
    "setAnnotationMode",
    "setAnnotationBrush",
    "annotationUndo",
    "annotationRedo",
    "getAnnotationBrush",
];

impl Message {
    /// Decodes `value`. Messages of other types are `Ok(None)`: they belong to
    /// other handlers.
    pub fn decode(value: &Value) -> Result<Option<Self>, MessageError> {
        let message_type = value
            .get("type")
            .and_then(Value::as_str)
            .ok_or(MessageError::MissingType)?;
        if !MESSAGE_TYPES.contains(&message_type) {
            return Ok(None);
        }

        let message = match RawMessage::deserialize(value)? {
            RawMessage::SetAnnotationMode { enable } => Self::SetAnnotationMode { enable },
            RawMessage::SetAnnotationBrush { data } => {
                Self::SetAnnotationBrush(ToolSelection::try_from(data)?)
            }
            RawMessage::AnnotationUndo => Self::AnnotationUndo,
            RawMessage::AnnotationRedo => Self::AnnotationRedo,
            RawMessage::GetAnnotationBrush { message_id } => {
                Self::GetAnnotationBrush { message_id }
            }
        };
        Ok(Some(message))
    }
}

impl TryFrom<BrushData> for ToolSelection {
    type Error = MessageError;

    fn try_from(data: BrushData) -> Result<Self, Self::Error> {
        // Erasers share the brush size range.
        if !Brush::is_size_in_range(data.size) {
            return Err(MessageError::SizeOutOfRange(data.size));
        }
        if data.tool_type == ERASER_TYPE_NAME {
            return Ok(Self::Eraser { size: data.size });
        }

        let brush_type = BrushType::from_name(&data.tool_type)
            .ok_or_else(|| MessageError::UnknownBrushType(data.tool_type.clone()))?;
        let color = data
            .color
            .ok_or(MessageError::MissingColor(brush_type.name()))?;
        Ok(Self::Brush(Brush::new(brush_type, color.into(), data.size)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use egui::Color32;
    use serde_json::json;

    #[test]
    fn test_decode_brush() {
        let value = json!({
            "type": "setAnnotationBrush",
            "data": {"type": "highlighter", "size": 8.0, "color": {"r": 10, "g": 20, "b": 30}},
        });
        let expected = Brush::new(BrushType::Highlighter, Color32::from_rgb(10, 20, 30), 8.0);
        assert_eq!(
            Message::decode(&value).unwrap(),
            Some(Message::SetAnnotationBrush(ToolSelection::Brush(expected)))
        );
    }

    #[test]
    fn test_decode_eraser_without_color() {
        let value = json!({"type": "setAnnotationBrush", "data": {"type": "eraser", "size": 3.0}});
        assert_eq!(
            Message::decode(&value).unwrap(),
            Some(Message::SetAnnotationBrush(ToolSelection::Eraser { size: 3.0 }))
        );
    }

    #[test]
    fn test_decode_simple_messages() {
        assert_eq!(
            Message::decode(&json!({"type": "annotationUndo"})).unwrap(),
            Some(Message::AnnotationUndo)
        );
        assert_eq!(
            Message::decode(&json!({"type": "setAnnotationMode", "enable": true})).unwrap(),
            Some(Message::SetAnnotationMode { enable: true })
        );
        assert_eq!(
            Message::decode(&json!({"type": "getAnnotationBrush", "messageId": "7"})).unwrap(),
            Some(Message::GetAnnotationBrush {
                message_id: "7".to_string()
            })
        );
    }

    #[test]
    fn test_foreign_messages_are_skipped() {
        assert!(Message::decode(&json!({"type": "zoomIn"})).unwrap().is_none());
    }

    #[test]
    fn test_rejects_bad_brushes() {
        let missing_color = json!({
            "type": "setAnnotationBrush",
            "data": {"type": "pen", "size": 3.0},
        });
        assert!(matches!(
            Message::decode(&missing_color),
            Err(MessageError::MissingColor("pen"))
        ));

        let too_big = json!({
            "type": "setAnnotationBrush",
            "data": {"type": "eraser", "size": 20.0},
        });
        assert!(matches!(
            Message::decode(&too_big),
            Err(MessageError::SizeOutOfRange(_))
        ));

        let unknown = json!({
            "type": "setAnnotationBrush",
            "data": {"type": "crayon", "size": 3.0, "color": {"r": 0, "g": 0, "b": 0}},
        });
        assert!(matches!(
            Message::decode(&unknown),
            Err(MessageError::UnknownBrushType(name)) if name == "crayon"
        ));
    }

    #[test]
    fn test_rejects_malformed_messages() {
        assert!(matches!(
            Message::decode(&json!({"type": "setAnnotationMode"})),
            Err(MessageError::Malformed(_))
        ));
        assert!(matches!(
            Message::decode(&json!({"enable": true})),
            Err(MessageError::MissingType)
        ));
    }
}
