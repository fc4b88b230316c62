use once_cell::sync::Lazy;
use serde::Serialize;

use crate::cards::{ShapeBlock, ShapeKind};

/// A shape block without an id or stacking order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapeTemplate {
    pub label: String,
    pub shape: ShapeKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub background: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<f64>,
    pub border_radius: f64,
    pub opacity: f64,
}

/// A named decorative shape that can be dropped onto a card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShapePreset {
    pub id: &'static str,
    pub name: &'static str,
    pub block: ShapeTemplate,
}

impl ShapePreset {
    /// Instantiates the preset as a block of a card face.
    pub fn place<S: Into<String>>(&self, id: S, z_index: i32) -> ShapeBlock {
        let block = &self.block;
        ShapeBlock {
            id: id.into(),
            label: Some(block.label.clone()),
            shape: block.shape,
            x: block.x,
            y: block.y,
            width: block.width,
            height: block.height,
            background: block.background.clone(),
            border_color: block.border_color.clone(),
            border_width: block.border_width,
            border_radius: Some(block.border_radius),
            opacity: Some(block.opacity),
            z_index,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn preset(
    id: &'static str,
    name: &'static str,
    shape: ShapeKind,
    (x, y, width, height): (f64, f64, f64, f64),
    background: &str,
    (border_color, border_width): (Option<&str>, Option<f64>),
    border_radius: f64,
    opacity: f64,
) -> ShapePreset {
    ShapePreset {
        id,
        name,
        block: ShapeTemplate {
            label: name.to_string(),
            shape,
            x,
            y,
            width,
            height,
            background: background.to_string(),
            border_color: border_color.map(str::to_string),
            border_width,
            border_radius,
            opacity,
        },
    }
}

static SHAPE_PRESETS: Lazy<Vec<ShapePreset>> = Lazy::new(|| {
    vec![
        preset(
            "soft-rectangle",
            "Soft Rectangle",
            ShapeKind::Rectangle,
            (140.0, 220.0, 260.0, 120.0),
            "#0ea5e9",
            (None, Some(0.0)),
            24.0,
            0.16,
        ),
        preset(
            "pill-highlight",
            "Pill Highlight",
            ShapeKind::Pill,
            (200.0, 120.0, 200.0, 60.0),
            "#f97316",
            (None, Some(0.0)),
            999.0,
            0.22,
        ),
        preset(
            "outline-chip",
            "Outline Chip",
            ShapeKind::Chip,
            (160.0, 80.0, 240.0, 80.0),
            "#ffffff",
            (Some("#7c3aed"), Some(2.0)),
            28.0,
            0.0,
        ),
        preset(
            "accent-ellipse",
            "Accent Ellipse",
            ShapeKind::Ellipse,
            (300.0, 60.0, 160.0, 160.0),
            "#22c55e",
            (None, None),
            999.0,
            0.2,
        ),
    ]
});

/// The decorative shapes offered by the card editor.
pub fn shape_presets() -> &'static [ShapePreset] {
    &SHAPE_PRESETS
}
