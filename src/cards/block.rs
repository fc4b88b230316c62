use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Horizontal alignment of the text inside a text block.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TextAlign {
    Left,
    Center,
    Right,
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Pill,
    Chip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub font_size: f64,
    pub font_weight: u16,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub padding_y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    pub z_index: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeBlock {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub shape: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub background: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    pub z_index: i32,
}

/// A positioned element of a card face.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ContentBlock {
    Text(TextBlock),
    Shape(ShapeBlock),
}

impl ContentBlock {
    pub fn id(&self) -> &str {
        match self {
            ContentBlock::Text(block) => &block.id,
            ContentBlock::Shape(block) => &block.id,
        }
    }

    pub fn label(&self) -> Option<&str> {
        match self {
            ContentBlock::Text(block) => block.label.as_deref(),
            ContentBlock::Shape(block) => block.label.as_deref(),
        }
    }

    pub fn z_index(&self) -> i32 {
        match self {
            ContentBlock::Text(block) => block.z_index,
            ContentBlock::Shape(block) => block.z_index,
        }
    }

    pub fn as_text(&self) -> Option<&TextBlock> {
        match self {
            ContentBlock::Text(block) => Some(block),
            ContentBlock::Shape(_) => None,
        }
    }

    pub fn as_shape(&self) -> Option<&ShapeBlock> {
        match self {
            ContentBlock::Shape(block) => Some(block),
            ContentBlock::Text(_) => None,
        }
    }
}

impl From<TextBlock> for ContentBlock {
    fn from(block: TextBlock) -> Self {
        ContentBlock::Text(block)
    }
}

impl From<ShapeBlock> for ContentBlock {
    fn from(block: ShapeBlock) -> Self {
        ContentBlock::Shape(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_block_from_toml() {
        let block: ContentBlock = toml::from_str(
            r##"
            kind = "shape"
            id = "ribbon"
            shape = "pill"
            x = 10
            y = 20
            width = 200
            height = 60
            background = "#f97316"
            opacity = 0.22
            z_index = 3
            "##,
        )
        .unwrap();

        let shape = block.as_shape().unwrap();
        assert_eq!(shape.shape, ShapeKind::Pill);
        assert_eq!(shape.x, 10.0);
        assert_eq!(block.id(), "ribbon");
        assert_eq!(block.z_index(), 3);
        assert!(block.as_text().is_none());
    }

    #[test]
    fn test_block_json_carries_kind() {
        let block = ContentBlock::Text(TextBlock {
            id: "grade".to_string(),
            label: None,
            text: "Grade 10-A".to_string(),
            x: 200.0,
            y: 132.0,
            width: 200.0,
            height: 38.0,
            font_size: 15.0,
            font_weight: 500,
            color: "#1f2937".to_string(),
            background: None,
            align: Some(TextAlign::Center),
            padding_x: None,
            padding_y: None,
            border_radius: None,
            z_index: 7,
        });
        let json = serde_json::to_value(&block).unwrap();
        assert_eq!(json["kind"], "text");
        assert_eq!(json["align"], "center");
        assert!(json.get("background").is_none());
    }
}
