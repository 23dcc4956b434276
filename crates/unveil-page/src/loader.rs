//! TOML loading for .page.toml files
//!
//! Elements are listed in document order. An element without an explicit `y`
//! is stacked below the previous in-flow element; one with `y` is positioned
//! absolutely and does not move the flow.

use crate::element::PageElement;
use crate::page::Page;
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};
use std::path::Path;
use unveil_core::{Rect, Result, UnveilError};

/// Root structure of a page file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageFile {
    pub page: PageMeta,
    #[serde(default)]
    pub elements: Vec<ElementDef>,
}

/// Page metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageMeta {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub viewport: ViewportDef,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewportDef {
    #[serde(default = "default_viewport_width")]
    pub width: f64,
    #[serde(default = "default_viewport_height")]
    pub height: f64,
}

impl Default for ViewportDef {
    fn default() -> Self {
        Self {
            width: default_viewport_width(),
            height: default_viewport_height(),
        }
    }
}

fn default_viewport_width() -> f64 {
    1280.0
}

fn default_viewport_height() -> f64 {
    720.0
}

/// Definition of one element in a page file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ElementDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Space-separated class attribute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub classes: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    pub height: f64,
    /// Extra space below an in-flow element
    #[serde(default)]
    pub margin_bottom: f64,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// A parsed page ready for a session
#[derive(Debug)]
pub struct LoadedPage {
    pub page: Page,
    pub viewport: Viewport,
}

/// Parse a page file from a string
pub fn parse_page_str(content: &str) -> Result<LoadedPage> {
    let file: PageFile =
        toml::from_str(content).map_err(|e| UnveilError::PageParse(e.to_string()))?;
    build_page(file)
}

/// Read and parse a .page.toml file
pub fn load_page(path: &Path) -> Result<LoadedPage> {
    let content = std::fs::read_to_string(path)?;
    parse_page_str(&content).map_err(|err| match err {
        UnveilError::PageParse(msg) => {
            UnveilError::PageParse(format!("{}: {}", path.display(), msg))
        }
        other => other,
    })
}

fn build_page(file: PageFile) -> Result<LoadedPage> {
    let viewport = Viewport::new(file.page.viewport.width, file.page.viewport.height)?;
    let mut page = Page::new(file.page.title);
    let mut flow_offset = 0.0_f64;

    for (index, def) in file.elements.into_iter().enumerate() {
        let label = def
            .id
            .clone()
            .unwrap_or_else(|| format!("elements[{}]", index));

        let width = def.width.unwrap_or(viewport.width);
        let numbers = [def.height, width, def.margin_bottom, def.x.unwrap_or(0.0), def.y.unwrap_or(0.0)];
        if numbers.iter().any(|v| !v.is_finite()) || def.height < 0.0 || width < 0.0 {
            return Err(UnveilError::PageParse(format!(
                "{}: sizes must be finite and non-negative",
                label
            )));
        }

        let y = match def.y {
            Some(y) => y,
            None => {
                let y = flow_offset;
                flow_offset += def.height + def.margin_bottom;
                y
            }
        };

        let mut element = PageElement::new(Rect::new(def.x.unwrap_or(0.0), y, width, def.height));
        element.dom_id = def.id;
        element.hidden = def.hidden;
        element.href = def.href;

        let attribute_classes = def.class.iter().flat_map(|c| c.split_whitespace());
        for class in attribute_classes.chain(def.classes.iter().map(String::as_str)) {
            element.add_class(class);
        }

        page.add_element(element)?;
    }

    Ok(LoadedPage { page, viewport })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r##"
[page]
title = "Carbon dating"
viewport = { width = 800, height = 600 }

[[elements]]
id = "splash"
y = 0
height = 600

[[elements]]
id = "hero"
class = "fade-in-up hero"
height = 600

[[elements]]
classes = ["slide", "opacity-0"]
height = 400
margin_bottom = 20

[[elements]]
classes = ["slide", "opacity-0"]
height = 400

[[elements]]
id = "to-top"
href = "#hero"
y = 50
x = 700
width = 40
height = 40
"##;

    #[test]
    fn test_parse_sample() {
        let loaded = parse_page_str(SAMPLE).unwrap();
        let page = &loaded.page;
        assert_eq!(page.title, "Carbon dating");
        assert_eq!(loaded.viewport.width, 800.0);
        assert_eq!(page.len(), 5);

        let hero = page.get(page.element_by_dom_id("hero").unwrap()).unwrap();
        assert_eq!(hero.classes, vec!["fade-in-up", "hero"]);
        assert_eq!(hero.rect, Rect::new(0.0, 0.0, 800.0, 600.0));

        let slides = page.query_selector_all(".slide");
        assert_eq!(slides.len(), 2);
        assert_eq!(page.get(slides[0]).unwrap().rect.y, 600.0);
        assert_eq!(page.get(slides[1]).unwrap().rect.y, 1020.0);

        let to_top = page.get(page.element_by_dom_id("to-top").unwrap()).unwrap();
        assert_eq!(to_top.rect, Rect::new(700.0, 50.0, 40.0, 40.0));
        assert_eq!(to_top.anchor_target(), Some("hero"));

        assert_eq!(page.document_height(), 1420.0);
    }

    #[test]
    fn test_defaults() {
        let loaded = parse_page_str("[page]\n").unwrap();
        assert!(loaded.page.is_empty());
        assert_eq!(loaded.viewport.width, 1280.0);
        assert_eq!(loaded.viewport.height, 720.0);
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            parse_page_str("[page]\n[[elements]]\nheight = 10\ncolour = \"red\"\n"),
            Err(UnveilError::PageParse(_))
        ));
        assert!(matches!(
            parse_page_str("[page]\n[[elements]]\nheight = -10\n"),
            Err(UnveilError::PageParse(_))
        ));
        assert!(matches!(
            parse_page_str("[page]\nviewport = { width = 0, height = 600 }\n"),
            Err(UnveilError::InvalidViewport { .. })
        ));
        assert!(matches!(
            parse_page_str("[page]\n[[elements]]\nid = \"a\"\nheight = 1\n[[elements]]\nid = \"a\"\nheight = 1\n"),
            Err(UnveilError::DuplicateElementId(_))
        ));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(matches!(
            load_page(Path::new("/nonexistent/unveil/page.toml")),
            Err(UnveilError::IoError(_))
        ));
    }
}
