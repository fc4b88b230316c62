use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::cards::{apply_overrides, BaseLayout, BlockOverride, ContentBlock, Overrides};
use crate::error::{Error, Result};

/// What a card is used for.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TemplateCategory {
    Student,
    Employee,
    Membership,
    Finance,
}

/// Visual theme family of a card. Each style has exactly one base layout.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChromeStyle {
    Skyline,
    Midnight,
    Sunrise,
    Emerald,
}

impl TemplateCategory {
    pub const ALL: [TemplateCategory; 4] = [
        TemplateCategory::Student,
        TemplateCategory::Employee,
        TemplateCategory::Membership,
        TemplateCategory::Finance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TemplateCategory::Student => "Student",
            TemplateCategory::Employee => "Employee",
            TemplateCategory::Membership => "Membership",
            TemplateCategory::Finance => "Finance",
        }
    }
}

impl ChromeStyle {
    pub const ALL: [ChromeStyle; 4] = [
        ChromeStyle::Skyline,
        ChromeStyle::Midnight,
        ChromeStyle::Sunrise,
        ChromeStyle::Emerald,
    ];
}

impl FromStr for TemplateCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        TemplateCategory::ALL
            .into_iter()
            .find(|category| category.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::ArgsProcessingError(format!("unknown template category \"{}\"", s)))
    }
}

impl FromStr for ChromeStyle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        ChromeStyle::ALL
            .into_iter()
            .find(|style| style.to_string().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::ArgsProcessingError(format!("unknown chrome style \"{}\"", s)))
    }
}

/// Copy printed on the front face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontCopy {
    pub name: String,
    pub id: String,
    pub line: String,
    pub meta: String,
    pub badge: String,
}

/// Copy printed on the back face.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackCopy {
    pub motto: String,
    pub address: String,
    pub contact: String,
    pub note: String,
}

/// Everything that distinguishes one template from the base layout it is built on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateOptions {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    pub accent_color: String,
    pub preview_gradient: String,
    pub layout: ChromeStyle,
    pub front: FrontCopy,
    pub back: BackCopy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
}

impl TemplateOptions {
    /// Every color the options carry, for validation.
    pub fn colors(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.accent_color.as_str()).chain(
            [&self.text_color, &self.primary_color, &self.secondary_color]
                .into_iter()
                .filter_map(|color| color.as_deref()),
        )
    }
}

/// A ready-to-render card design.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateDefinition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: TemplateCategory,
    pub accent_color: String,
    pub preview_gradient: String,
    pub chrome: ChromeStyle,
    pub front: Vec<ContentBlock>,
    pub back: Vec<ContentBlock>,
}

pub(crate) const SUNRISE_PRIMARY: &str = "#1f2937";
pub(crate) const SUNRISE_SECONDARY: &str = "#9f1239";
pub(crate) const EMERALD_TEXT: &str = "#064e3b";

const FRONT_COPY_IDS: [&str; 4] = ["student-name", "student-id", "grade", "validity"];
const BACK_COPY_IDS: [&str; 4] = [
    "academy-motto",
    "academy-address",
    "academy-contact",
    "academy-guidelines",
];

/// Builds the definition of a template by applying its copy and colors onto `layout`.
///
/// The chrome style of the result is the style of the layout.
pub fn build_template(layout: &BaseLayout, options: &TemplateOptions) -> TemplateDefinition {
    TemplateDefinition {
        id: options.id.clone(),
        name: options.name.clone(),
        description: options.description.clone(),
        category: options.category,
        accent_color: options.accent_color.clone(),
        preview_gradient: options.preview_gradient.clone(),
        chrome: layout.style,
        front: apply_overrides(&layout.front, &front_overrides(layout.style, options)),
        back: apply_overrides(&layout.back, &back_overrides(layout.style, options)),
    }
}

fn slot(background: &str, color: &str) -> BlockOverride {
    BlockOverride::default().background(background).color(color)
}

fn front_overrides(style: ChromeStyle, options: &TemplateOptions) -> Overrides {
    let copy = &options.front;
    let texts = [&copy.name, &copy.id, &copy.line, &copy.meta];
    let mut overrides: Overrides = FRONT_COPY_IDS
        .iter()
        .zip(texts)
        .map(|(id, text)| (id.to_string(), BlockOverride::default().text(text)))
        .collect();
    overrides.insert(
        "academy-name".to_string(),
        BlockOverride::default()
            .text(&copy.badge)
            .background(&options.accent_color),
    );

    let slots = match style {
        ChromeStyle::Skyline => [
            slot("#f1f5f9", "#64748b"),
            slot("#f8fafc", "#64748b"),
            slot("#f8fafc", "#64748b").text("QR"),
        ],
        ChromeStyle::Midnight => [
            slot("#101828", "#cbd5f5")
                .position(48.0, 40.0)
                .size(170.0, 190.0),
            slot("#0f172a", "#cbd5f5").position(420.0, 40.0),
            slot("#0f172a", "#cbd5f5").position(400.0, 230.0).text("QR"),
        ],
        ChromeStyle::Sunrise => {
            let primary = options.primary_color.as_deref().unwrap_or(SUNRISE_PRIMARY);
            let secondary = secondary_color(options);
            for (id, patch) in overrides.iter_mut() {
                match id.as_str() {
                    "student-name" => patch.color = Some(primary.to_string()),
                    "student-id" | "grade" | "validity" => {
                        patch.color = Some(secondary.to_string())
                    }
                    _ => {}
                }
            }
            [
                slot("#fff7ed", "#b45309"),
                slot("#fff7ed", "#c2410c"),
                slot("#ffedd5", "#b45309").text("Scan Code"),
            ]
        }
        ChromeStyle::Emerald => {
            let text_color = text_color(options);
            for id in FRONT_COPY_IDS {
                if let Some(patch) = overrides.get_mut(id) {
                    patch.color = Some(text_color.to_string());
                }
            }
            [
                slot("#ecfdf5", text_color),
                slot("#ecfdf5", text_color),
                slot("#d1fae5", text_color).text("QR"),
            ]
        }
    };

    for (id, patch) in ["photo-slot", "logo-slot", "qr-slot"].into_iter().zip(slots) {
        overrides.insert(id.to_string(), patch);
    }
    overrides
}

fn back_overrides(style: ChromeStyle, options: &TemplateOptions) -> Overrides {
    let copy = &options.back;
    let color = match style {
        ChromeStyle::Sunrise => Some(secondary_color(options)),
        ChromeStyle::Emerald => Some(text_color(options)),
        ChromeStyle::Skyline | ChromeStyle::Midnight => None,
    };

    BACK_COPY_IDS
        .iter()
        .zip([&copy.motto, &copy.address, &copy.contact, &copy.note])
        .map(|(id, text)| {
            let mut patch = BlockOverride::default().text(text);
            patch.color = color.map(str::to_string);
            (id.to_string(), patch)
        })
        .collect()
}

fn secondary_color(options: &TemplateOptions) -> &str {
    options
        .secondary_color
        .as_deref()
        .unwrap_or(SUNRISE_SECONDARY)
}

fn text_color(options: &TemplateOptions) -> &str {
    options.text_color.as_deref().unwrap_or(EMERALD_TEXT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_layouts;
    use crate::constants::assets;

    fn layout(style: ChromeStyle) -> BaseLayout {
        parse_layouts(assets::LAYOUTS)
            .unwrap()
            .into_iter()
            .find(|layout| layout.style == style)
            .unwrap()
    }

    fn options(style: ChromeStyle) -> TemplateOptions {
        TemplateOptions {
            id: "custom".to_string(),
            name: "Custom".to_string(),
            description: "A test card".to_string(),
            category: TemplateCategory::Finance,
            accent_color: "#f97316".to_string(),
            preview_gradient: "linear-gradient(#fff, #000)".to_string(),
            layout: style,
            front: FrontCopy {
                name: "Fatima Noor".to_string(),
                id: "FEE-66291".to_string(),
                line: "Tuition Fee Pass".to_string(),
                meta: "Valid: Spring Term 2025".to_string(),
                badge: "Finance".to_string(),
            },
            back: BackCopy {
                motto: "Integrity".to_string(),
                address: "Lahore".to_string(),
                contact: "+92".to_string(),
                note: "Return if found".to_string(),
            },
            text_color: None,
            primary_color: None,
            secondary_color: None,
        }
    }

    fn text<'a>(blocks: &'a [ContentBlock], id: &str) -> &'a crate::cards::TextBlock {
        blocks
            .iter()
            .find(|b| b.id() == id)
            .and_then(|b| b.as_text())
            .unwrap()
    }

    #[test]
    fn test_build_is_deterministic_and_keeps_ids() {
        for style in ChromeStyle::ALL {
            let base = layout(style);
            let first = build_template(&base, &options(style));
            let second = build_template(&base, &options(style));
            assert_eq!(first, second);

            let ids = |blocks: &[ContentBlock]| -> Vec<String> {
                blocks.iter().map(|b| b.id().to_string()).collect()
            };
            assert_eq!(ids(&first.front), ids(&base.front));
            assert_eq!(ids(&first.back), ids(&base.back));
            assert_eq!(first.chrome, style);
        }
    }

    #[test]
    fn test_sunrise_default_colors() {
        let card = build_template(&layout(ChromeStyle::Sunrise), &options(ChromeStyle::Sunrise));
        assert_eq!(text(&card.front, "student-name").color, SUNRISE_PRIMARY);
        assert_eq!(text(&card.front, "grade").color, SUNRISE_SECONDARY);
        assert_eq!(text(&card.front, "qr-slot").text, "Scan Code");
        assert_eq!(
            text(&card.front, "academy-name").background.as_deref(),
            Some("#f97316")
        );
        for block in &card.back {
            assert_eq!(block.as_text().unwrap().color, SUNRISE_SECONDARY);
        }
    }

    #[test]
    fn test_sunrise_custom_colors() {
        let mut options = options(ChromeStyle::Sunrise);
        options.primary_color = Some("#111111".to_string());
        options.secondary_color = Some("#222222".to_string());
        let card = build_template(&layout(ChromeStyle::Sunrise), &options);
        assert_eq!(text(&card.front, "student-name").color, "#111111");
        assert_eq!(text(&card.front, "validity").color, "#222222");
        assert_eq!(text(&card.back, "academy-motto").color, "#222222");
    }

    #[test]
    fn test_emerald_text_color_everywhere() {
        let mut options = options(ChromeStyle::Emerald);
        options.text_color = Some("#065f46".to_string());
        let card = build_template(&layout(ChromeStyle::Emerald), &options);
        for id in ["photo-slot", "logo-slot", "qr-slot", "student-name", "validity"] {
            assert_eq!(text(&card.front, id).color, "#065f46", "{}", id);
        }
        assert_eq!(text(&card.front, "qr-slot").background.as_deref(), Some("#d1fae5"));
        assert_eq!(text(&card.back, "academy-guidelines").color, "#065f46");
        // the badge keeps its own foreground
        assert_eq!(text(&card.front, "academy-name").color, "#ffffff");
    }

    #[test]
    fn test_midnight_moves_slots() {
        let card = build_template(&layout(ChromeStyle::Midnight), &options(ChromeStyle::Midnight));
        let photo = text(&card.front, "photo-slot");
        assert_eq!((photo.x, photo.y, photo.width, photo.height), (48.0, 40.0, 170.0, 190.0));
        let qr = text(&card.front, "qr-slot");
        assert_eq!((qr.x, qr.y), (400.0, 230.0));
        assert_eq!(qr.width, 128.0);
        assert_eq!(text(&card.back, "academy-motto").color, "#f1f5f9");
    }

    #[test]
    fn test_category_and_style_parsing() {
        assert_eq!("Finance".parse::<TemplateCategory>().unwrap(), TemplateCategory::Finance);
        assert_eq!("midnight".parse::<ChromeStyle>().unwrap(), ChromeStyle::Midnight);
        assert!("aurora".parse::<ChromeStyle>().is_err());
        assert_eq!(TemplateCategory::Membership.label(), "Membership");
    }
}
