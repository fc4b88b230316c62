use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::{ContentBlock, ShapeKind, TextAlign};

/// Something addressable by a stable identifier.
pub trait Keyed {
    fn key(&self) -> &str;
}

/// Shallow merge of a partial record onto a complete one: every field present in the
/// patch replaces the corresponding field, everything else is kept.
pub trait Merge<P> {
    fn merge(&mut self, patch: &P);
}

/// Partial [`ContentBlock`]. Fields that do not exist on the target variant are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlockOverride {
    pub label: Option<String>,
    pub text: Option<String>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub font_size: Option<f64>,
    pub font_weight: Option<u16>,
    pub color: Option<String>,
    pub background: Option<String>,
    pub align: Option<TextAlign>,
    pub padding_x: Option<f64>,
    pub padding_y: Option<f64>,
    pub border_radius: Option<f64>,
    pub shape: Option<ShapeKind>,
    pub border_color: Option<String>,
    pub border_width: Option<f64>,
    pub opacity: Option<f64>,
    pub z_index: Option<i32>,
}

/// Overrides addressed by block id.
pub type Overrides = BTreeMap<String, BlockOverride>;

impl BlockOverride {
    pub fn text<S: Into<String>>(mut self, text: S) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn color<S: Into<String>>(mut self, color: S) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn background<S: Into<String>>(mut self, background: S) -> Self {
        self.background = Some(background.into());
        self
    }

    pub fn position(mut self, x: f64, y: f64) -> Self {
        self.x = Some(x);
        self.y = Some(y);
        self
    }

    pub fn size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}

fn set<T: Clone>(target: &mut T, value: &Option<T>) {
    if let Some(value) = value {
        *target = value.clone();
    }
}

fn set_opt<T: Clone>(target: &mut Option<T>, value: &Option<T>) {
    if value.is_some() {
        target.clone_from(value);
    }
}

impl Keyed for ContentBlock {
    fn key(&self) -> &str {
        self.id()
    }
}

impl Merge<BlockOverride> for ContentBlock {
    fn merge(&mut self, patch: &BlockOverride) {
        match self {
            ContentBlock::Text(block) => {
                set_opt(&mut block.label, &patch.label);
                set(&mut block.text, &patch.text);
                set(&mut block.x, &patch.x);
                set(&mut block.y, &patch.y);
                set(&mut block.width, &patch.width);
                set(&mut block.height, &patch.height);
                set(&mut block.font_size, &patch.font_size);
                set(&mut block.font_weight, &patch.font_weight);
                set(&mut block.color, &patch.color);
                set_opt(&mut block.background, &patch.background);
                set_opt(&mut block.align, &patch.align);
                set_opt(&mut block.padding_x, &patch.padding_x);
                set_opt(&mut block.padding_y, &patch.padding_y);
                set_opt(&mut block.border_radius, &patch.border_radius);
                set(&mut block.z_index, &patch.z_index);
            }
            ContentBlock::Shape(block) => {
                set_opt(&mut block.label, &patch.label);
                set(&mut block.shape, &patch.shape);
                set(&mut block.x, &patch.x);
                set(&mut block.y, &patch.y);
                set(&mut block.width, &patch.width);
                set(&mut block.height, &patch.height);
                set(&mut block.background, &patch.background);
                set_opt(&mut block.border_color, &patch.border_color);
                set_opt(&mut block.border_width, &patch.border_width);
                set_opt(&mut block.border_radius, &patch.border_radius);
                set_opt(&mut block.opacity, &patch.opacity);
                set(&mut block.z_index, &patch.z_index);
            }
        }
    }
}

/// Returns a copy of `blocks` where every block with an entry in `overrides` has that
/// entry merged onto it.
///
/// The output has the same length, order and ids as the input. Entries for ids that
/// do not exist are ignored.
pub fn apply_overrides<B, P>(blocks: &[B], overrides: &BTreeMap<String, P>) -> Vec<B>
where
    B: Keyed + Merge<P> + Clone,
{
    blocks
        .iter()
        .map(|block| {
            let mut block = block.clone();
            if let Some(patch) = overrides.get(block.key()) {
                block.merge(patch);
            }
            block
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ShapeBlock, TextBlock};

    fn text(id: &str, text: &str) -> ContentBlock {
        ContentBlock::Text(TextBlock {
            id: id.to_string(),
            label: None,
            text: text.to_string(),
            x: 10.0,
            y: 10.0,
            width: 100.0,
            height: 40.0,
            font_size: 14.0,
            font_weight: 500,
            color: "#1f2937".to_string(),
            background: None,
            align: None,
            padding_x: None,
            padding_y: None,
            border_radius: None,
            z_index: 1,
        })
    }

    #[test]
    fn test_only_present_fields_are_replaced() {
        let blocks = vec![text("name", "Alex"), text("grade", "Grade 1")];
        let mut overrides = Overrides::new();
        overrides.insert(
            "name".to_string(),
            BlockOverride::default().text("Zoya").background("#7c3aed"),
        );

        let merged = apply_overrides(&blocks, &overrides);
        let name = merged[0].as_text().unwrap();
        assert_eq!(name.text, "Zoya");
        assert_eq!(name.background.as_deref(), Some("#7c3aed"));
        assert_eq!(name.color, "#1f2937");
        assert_eq!(name.x, 10.0);
        assert_eq!(merged[1], blocks[1]);
    }

    #[test]
    fn test_unknown_ids_are_ignored() {
        let blocks = vec![text("a", "A"), text("b", "B"), text("c", "C")];
        let mut overrides = Overrides::new();
        overrides.insert("z".to_string(), BlockOverride::default().text("Z"));
        overrides.insert("b".to_string(), BlockOverride::default().position(1.0, 2.0));

        let merged = apply_overrides(&blocks, &overrides);
        let ids: Vec<&str> = merged.iter().map(|b| b.id()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(merged[1].as_text().map(|b| (b.x, b.y)), Some((1.0, 2.0)));
    }

    #[test]
    fn test_text_fields_do_not_touch_shapes() {
        let blocks = vec![ContentBlock::Shape(ShapeBlock {
            id: "dot".to_string(),
            label: None,
            shape: ShapeKind::Ellipse,
            x: 0.0,
            y: 0.0,
            width: 20.0,
            height: 20.0,
            background: "#22c55e".to_string(),
            border_color: None,
            border_width: None,
            border_radius: None,
            opacity: Some(0.2),
            z_index: 2,
        })];
        let mut overrides = Overrides::new();
        overrides.insert(
            "dot".to_string(),
            BlockOverride {
                opacity: Some(0.5),
                ..BlockOverride::default().text("ignored").size(40.0, 40.0)
            },
        );

        let merged = apply_overrides(&blocks, &overrides);
        let shape = merged[0].as_shape().unwrap();
        assert_eq!(shape.opacity, Some(0.5));
        assert_eq!((shape.width, shape.height), (40.0, 40.0));
        assert_eq!(shape.background, "#22c55e");
    }
}
