use std::collections::{HashMap, HashSet};

use serde::Deserialize;

use crate::cards::{
    build_template, hex_to_rgba, parse_layouts, BaseLayout, ChromeStyle, TemplateCategory,
    TemplateDefinition, TemplateOptions,
};
use crate::constants::assets;
use crate::debug;
use crate::error::{ConfigType, Error, Result};

#[derive(Deserialize)]
struct TemplatesFile {
    #[serde(rename = "template")]
    templates: Vec<TemplateOptions>,
}

/// Read-only registry of built card templates.
#[derive(Debug, Clone)]
pub struct TemplateCatalog {
    layouts: Vec<BaseLayout>,
    templates: Vec<TemplateDefinition>,
    index: HashMap<String, usize>,
}

impl TemplateCatalog {
    /// Builds the catalog shipped with the crate.
    pub fn builtin() -> Result<Self> {
        Self::from_sources(assets::LAYOUTS, assets::TEMPLATES)
    }

    /// Builds a catalog from a layouts document and a templates document.
    pub fn from_sources(layouts_toml: &str, templates_toml: &str) -> Result<Self> {
        let layouts = parse_layouts(layouts_toml)?;
        let file: TemplatesFile =
            toml::from_str(templates_toml).map_err(|e| Error::SerdeTomlError {
                location: ConfigType::TEMPLATES,
                file: "templates.toml".to_string(),
                cause: e.to_string(),
            })?;

        let mut seen = HashSet::new();
        for options in &file.templates {
            if !seen.insert(options.id.as_str()) {
                return Err(content_error(format!(
                    "duplicate template id \"{}\"",
                    options.id
                )));
            }
            for color in options.colors() {
                hex_to_rgba(color, 1.0).map_err(|_| {
                    content_error(format!(
                        "template \"{}\" has an invalid color \"{}\"",
                        options.id, color
                    ))
                })?;
            }
        }

        let templates = file
            .templates
            .iter()
            .map(|options| {
                layouts
                    .iter()
                    .find(|layout| layout.style == options.layout)
                    .map(|layout| build_template(layout, options))
                    .ok_or_else(|| {
                        content_error(format!(
                            "template \"{}\" uses the missing \"{}\" layout",
                            options.id, options.layout
                        ))
                    })
            })
            .collect::<Result<Vec<_>>>()?;

        let index = templates
            .iter()
            .enumerate()
            .map(|(position, template)| (template.id.clone(), position))
            .collect();

        debug!("[cards] Built {} templates", templates.len());
        Ok(TemplateCatalog {
            layouts,
            templates,
            index,
        })
    }

    /// Looks a template up by id. Unknown ids are a normal outcome.
    pub fn get(&self, id: &str) -> Option<&TemplateDefinition> {
        self.index.get(id).map(|position| &self.templates[*position])
    }

    /// Every template in declaration order.
    pub fn all(&self) -> &[TemplateDefinition] {
        &self.templates
    }

    pub fn by_category(&self, category: TemplateCategory) -> Vec<&TemplateDefinition> {
        self.templates
            .iter()
            .filter(|template| template.category == category)
            .collect()
    }

    pub fn layout(&self, style: ChromeStyle) -> Option<&BaseLayout> {
        self.layouts.iter().find(|layout| layout.style == style)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn content_error(cause: String) -> Error {
    Error::ContentError {
        location: ConfigType::TEMPLATES,
        cause,
    }
}
