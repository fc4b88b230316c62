use std::collections::HashMap;
use std::error::Error as StdError;
use std::str::FromStr;

use serde::Serialize;
use tera::{Context, Error as TeraError, Tera, Value};

use crate::cards::{hex_to_rgba, ChromeStyle, ContentBlock, ShapeKind, TemplateDefinition, TextAlign};
use crate::constants::card;
use crate::error::{Error, Result};

const CARD_TEMPLATE_NAME: &str = "card.svg";

const CARD_TEMPLATE: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="{{ width }}" height="{{ height }}" viewBox="0 0 {{ width }} {{ height }}">
  <defs>
    <clipPath id="card"><rect width="{{ width }}" height="{{ height }}" rx="{{ radius }}"/></clipPath>
    <linearGradient id="base" x1="0" y1="0" x2="1" y2="1">
      <stop offset="0" stop-color="{{ base.0 }}"/>
      <stop offset="0.5" stop-color="{{ base.1 }}"/>
      <stop offset="1" stop-color="{{ base.2 }}"/>
    </linearGradient>
{%- if glow %}
    <radialGradient id="glow" cx="0.85" cy="0.1" r="0.9">
      <stop offset="0" stop-color="{{ accent | rgba(alpha=glow) }}"/>
      <stop offset="1" stop-color="{{ accent | rgba(alpha=0) }}"/>
    </radialGradient>
{%- endif %}
  </defs>
  <g clip-path="url(#card)">
    <rect width="{{ width }}" height="{{ height }}" fill="url(#base)"/>
{%- if glow %}
    <rect width="{{ width }}" height="{{ height }}" fill="url(#glow)"/>
{%- endif %}
{%- if bar == "top" %}
    <rect width="{{ width }}" height="8" fill="{{ accent }}"/>
{%- elif bar == "left" %}
    <rect width="8" height="{{ height }}" fill="{{ accent }}"/>
{%- endif %}
{%- for block in blocks %}
{%- if block.kind == "text" %}
    <g id="{{ block.id }}">
{%- if block.background %}
      <rect x="{{ block.x }}" y="{{ block.y }}" width="{{ block.width }}" height="{{ block.height }}" rx="{{ block.radius }}" fill="{{ block.background }}"/>
{%- endif %}
      <text x="{{ block.text_x }}" y="{{ block.text_y }}" text-anchor="{{ block.anchor }}" dominant-baseline="middle" font-family="Inter, sans-serif" font-size="{{ block.font_size }}" font-weight="{{ block.font_weight }}" fill="{{ block.color }}">{{ block.text }}</text>
    </g>
{%- elif block.shape == "ellipse" %}
    <ellipse id="{{ block.id }}" cx="{{ block.cx }}" cy="{{ block.cy }}" rx="{{ block.rx }}" ry="{{ block.ry }}" fill="{{ block.background | rgba(alpha=block.opacity) }}"{% if block.border_color %} stroke="{{ block.border_color }}" stroke-width="{{ block.border_width }}"{% endif %}/>
{%- else %}
    <rect id="{{ block.id }}" x="{{ block.x }}" y="{{ block.y }}" width="{{ block.width }}" height="{{ block.height }}" rx="{{ block.radius }}" fill="{{ block.background | rgba(alpha=block.opacity) }}"{% if block.border_color %} stroke="{{ block.border_color }}" stroke-width="{{ block.border_width }}"{% endif %}/>
{%- endif %}
{%- endfor %}
  </g>
</svg>
"##;

/// Face of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    #[default]
    Front,
    Back,
}

impl FromStr for Side {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "front" => Ok(Side::Front),
            "back" => Ok(Side::Back),
            _ => Err(Error::ArgsProcessingError(format!(
                "unknown card side \"{}\" (expected front or back)",
                s
            ))),
        }
    }
}

/// Background treatment of one face of a chrome style.
struct Backdrop {
    base: [&'static str; 3],
    glow: Option<f64>,
    bar: Option<&'static str>,
}

fn backdrop(style: ChromeStyle, side: Side) -> Backdrop {
    match (style, side) {
        (ChromeStyle::Skyline, Side::Front) => Backdrop {
            base: ["#ffffff", "#ffffff", "#ffffff"],
            glow: Some(0.18),
            bar: Some("top"),
        },
        (ChromeStyle::Skyline, Side::Back) => Backdrop {
            base: ["#f8fafc", "#f8fafc", "#ffffff"],
            glow: None,
            bar: None,
        },
        (ChromeStyle::Midnight, Side::Front) => Backdrop {
            base: ["#020617", "#0f172a", "#1e293b"],
            glow: Some(0.35),
            bar: Some("left"),
        },
        (ChromeStyle::Midnight, Side::Back) => Backdrop {
            base: ["#020617", "#0f172a", "#1e293b"],
            glow: Some(0.25),
            bar: None,
        },
        (ChromeStyle::Sunrise, Side::Front) => Backdrop {
            base: ["#fffbeb", "#ffffff", "#ffedd5"],
            glow: Some(0.28),
            bar: Some("top"),
        },
        (ChromeStyle::Sunrise, Side::Back) => Backdrop {
            base: ["#fff1f2", "#fef3c7", "#ffffff"],
            glow: Some(0.22),
            bar: None,
        },
        (ChromeStyle::Emerald, Side::Front) => Backdrop {
            base: ["#ecfdf5", "#ffffff", "#d1fae5"],
            glow: Some(0.28),
            bar: Some("top"),
        },
        (ChromeStyle::Emerald, Side::Back) => Backdrop {
            base: ["#ecfdf5", "#d1fae5", "#ffffff"],
            glow: Some(0.22),
            bar: None,
        },
    }
}

/// Flattened block handed to the SVG template, with the derived geometry precomputed.
#[derive(Serialize)]
struct BlockView<'a> {
    kind: &'static str,
    id: &'a str,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    radius: f64,
    text: Option<&'a str>,
    text_x: f64,
    text_y: f64,
    anchor: &'static str,
    font_size: f64,
    font_weight: u16,
    color: Option<&'a str>,
    background: Option<&'a str>,
    shape: Option<String>,
    cx: f64,
    cy: f64,
    rx: f64,
    ry: f64,
    opacity: f64,
    border_color: Option<&'a str>,
    border_width: f64,
}

impl<'a> BlockView<'a> {
    fn from_block(block: &'a ContentBlock) -> Self {
        match block {
            ContentBlock::Text(text) => {
                let padding = text.padding_x.unwrap_or(0.0);
                let (anchor, text_x) = match text.align.unwrap_or(TextAlign::Left) {
                    TextAlign::Left => ("start", text.x + padding),
                    TextAlign::Center => ("middle", text.x + text.width / 2.0),
                    TextAlign::Right => ("end", text.x + text.width - padding),
                };
                BlockView {
                    kind: "text",
                    id: &text.id,
                    x: text.x,
                    y: text.y,
                    width: text.width,
                    height: text.height,
                    radius: text.border_radius.unwrap_or(0.0),
                    text: Some(&text.text),
                    text_x,
                    text_y: text.y + text.height / 2.0,
                    anchor,
                    font_size: text.font_size,
                    font_weight: text.font_weight,
                    color: Some(&text.color),
                    background: text.background.as_deref(),
                    shape: None,
                    cx: 0.0,
                    cy: 0.0,
                    rx: 0.0,
                    ry: 0.0,
                    opacity: 1.0,
                    border_color: None,
                    border_width: 0.0,
                }
            }
            ContentBlock::Shape(shape) => {
                let radius = match shape.shape {
                    ShapeKind::Pill => shape.height / 2.0,
                    _ => shape
                        .border_radius
                        .unwrap_or(0.0)
                        .min(shape.width.min(shape.height) / 2.0),
                };
                BlockView {
                    kind: "shape",
                    id: &shape.id,
                    x: shape.x,
                    y: shape.y,
                    width: shape.width,
                    height: shape.height,
                    radius,
                    text: None,
                    text_x: 0.0,
                    text_y: 0.0,
                    anchor: "start",
                    font_size: 0.0,
                    font_weight: 0,
                    color: None,
                    background: Some(&shape.background),
                    shape: Some(shape.shape.to_string()),
                    cx: shape.x + shape.width / 2.0,
                    cy: shape.y + shape.height / 2.0,
                    rx: shape.width / 2.0,
                    ry: shape.height / 2.0,
                    opacity: shape.opacity.unwrap_or(1.0),
                    border_color: shape.border_color.as_deref(),
                    border_width: shape.border_width.unwrap_or(0.0),
                }
            }
        }
    }
}

/// Create the `rgba` filter for Tera.
///
/// Turns a hex color into its `rgba(r, g, b, a)` form using the `alpha` argument
/// (defaults to `1`).
pub fn create_rgba_filter() -> impl Fn(&Value, &HashMap<String, Value>) -> tera::Result<Value> {
    move |value: &Value, args: &HashMap<String, Value>| apply_rgba(value, args)
}

fn apply_rgba(value: &Value, args: &HashMap<String, Value>) -> tera::Result<Value> {
    let hex = tera::try_get_value!("rgba", "value", String, value);
    let alpha = match args.get("alpha") {
        Some(alpha) => alpha
            .as_f64()
            .ok_or_else(|| TeraError::msg("Filter `rgba` expects a numeric `alpha`"))?,
        None => 1.0,
    };
    let color = hex_to_rgba(&hex, alpha).map_err(|e| TeraError::msg(e.to_string()))?;
    Ok(Value::String(color.to_string()))
}

/// Renders card templates to SVG.
pub struct CardRenderer {
    tera: Tera,
}

impl CardRenderer {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".svg"]);
        tera.register_filter("rgba", create_rgba_filter());
        tera.add_raw_template(CARD_TEMPLATE_NAME, CARD_TEMPLATE)?;
        Ok(CardRenderer { tera })
    }

    /// Renders one face of `template`: the chrome backdrop first, then the blocks in
    /// ascending z-index (declaration order breaks ties).
    pub fn render(&self, template: &TemplateDefinition, side: Side) -> Result<String> {
        let blocks = match side {
            Side::Front => &template.front,
            Side::Back => &template.back,
        };
        let mut ordered: Vec<&ContentBlock> = blocks.iter().collect();
        ordered.sort_by_key(|block| block.z_index());
        let views: Vec<BlockView> = ordered.into_iter().map(BlockView::from_block).collect();

        let backdrop = backdrop(template.chrome, side);
        let mut context = Context::new();
        context.insert("width", &card::WIDTH);
        context.insert("height", &card::HEIGHT);
        context.insert("radius", &card::RADIUS);
        context.insert("accent", &template.accent_color);
        context.insert("base", &backdrop.base);
        context.insert("glow", &backdrop.glow);
        context.insert("bar", &backdrop.bar);
        context.insert("blocks", &views);

        self.tera
            .render(CARD_TEMPLATE_NAME, &context)
            .map_err(|e| {
                let mut error_msg = e.to_string();
                let mut current = e.source();
                while let Some(source) = current {
                    error_msg.push_str("\nCaused by: ");
                    error_msg.push_str(&source.to_string());
                    current = source.source();
                }
                Error::TemplateRenderError(error_msg)
            })
    }
}
