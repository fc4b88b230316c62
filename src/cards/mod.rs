//! ID card designs.
//!
//! A card template is assembled from one of the four base layouts (one per chrome
//! style) by overriding a handful of blocks with the template's copy and colors. The
//! bundled catalog is built once and is read-only afterwards.

mod block;
mod catalog;
mod color;
mod layouts;
mod overrides;
mod render;
mod shapes;
mod template;

pub use block::{ContentBlock, ShapeBlock, ShapeKind, TextAlign, TextBlock};
pub use catalog::TemplateCatalog;
pub use color::{hex_to_rgba, is_hex_color, Rgba};
pub use layouts::{parse_layouts, BaseLayout};
pub use overrides::{apply_overrides, BlockOverride, Keyed, Merge, Overrides};
pub use render::{create_rgba_filter, CardRenderer, Side};
pub use shapes::{shape_presets, ShapePreset, ShapeTemplate};
pub use template::{
    build_template, BackCopy, ChromeStyle, FrontCopy, TemplateCategory, TemplateDefinition,
    TemplateOptions,
};
