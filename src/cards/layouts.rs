use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::cards::{ChromeStyle, ContentBlock};
use crate::error::{ConfigType, Error, Result};

/// Shared front and back blocks of a chrome style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseLayout {
    pub style: ChromeStyle,
    pub front: Vec<ContentBlock>,
    pub back: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct LayoutsFile {
    #[serde(rename = "layout")]
    layouts: Vec<BaseLayout>,
}

/// Parses a layouts document and checks that every chrome style has exactly one layout
/// and that block ids are unique per face.
pub fn parse_layouts(source: &str) -> Result<Vec<BaseLayout>> {
    let file: LayoutsFile = toml::from_str(source).map_err(|e| Error::SerdeTomlError {
        location: ConfigType::LAYOUTS,
        file: "layouts.toml".to_string(),
        cause: e.to_string(),
    })?;

    for style in ChromeStyle::ALL {
        let count = file.layouts.iter().filter(|l| l.style == style).count();
        if count != 1 {
            return Err(content_error(format!(
                "expected exactly one \"{}\" layout, found {}",
                style, count
            )));
        }
    }

    for layout in &file.layouts {
        check_unique_ids(layout.style, "front", &layout.front)?;
        check_unique_ids(layout.style, "back", &layout.back)?;
    }
    Ok(file.layouts)
}

fn check_unique_ids(style: ChromeStyle, face: &str, blocks: &[ContentBlock]) -> Result<()> {
    let mut seen = HashSet::new();
    match blocks.iter().find(|block| !seen.insert(block.id())) {
        Some(block) => Err(content_error(format!(
            "duplicate block id \"{}\" on the {} face of the \"{}\" layout",
            block.id(),
            face,
            style
        ))),
        None => Ok(()),
    }
}

fn content_error(cause: String) -> Error {
    Error::ContentError {
        location: ConfigType::LAYOUTS,
        cause,
    }
}
