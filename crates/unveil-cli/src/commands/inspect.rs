//! Page inspection command

use crate::presets::{Presets, FADE_IN_SELECTOR, SLIDES_SELECTOR};
use anyhow::{Context, Result};
use std::path::Path;
use unveil_page::{load_page, Selector};

/// Print every element of a page and the preset that would watch it
pub fn run(page_path: &str, config: Option<&str>) -> Result<()> {
    let loaded = load_page(Path::new(page_path)).context("Failed to load page")?;
    let presets = Presets::load(config).context("Failed to load presets")?;
    let page = &loaded.page;

    let fade_in: Selector = FADE_IN_SELECTOR.parse()?;
    let slides: Selector = SLIDES_SELECTOR.parse()?;

    let title = if page.title.is_empty() { "(untitled)" } else { page.title.as_str() };
    println!("Page: {}", title);
    println!(
        "Viewport: {}x{}, document height {}",
        loaded.viewport.width,
        loaded.viewport.height,
        page.document_height()
    );
    println!("Elements: {}", page.len());
    println!();

    for element in page.elements() {
        let rect = element.rect;
        let mut line = format!(
            "  {:<24} y={:<7} h={:<6}",
            element.label(),
            rect.y,
            rect.height
        );
        if !element.classes.is_empty() {
            line.push_str(&format!(" class=\"{}\"", element.classes.join(" ")));
        }
        if let Some(href) = &element.href {
            line.push_str(&format!(" href={}", href));
        }
        if element.hidden {
            line.push_str(" hidden");
        }
        if fade_in.matches(element) {
            line.push_str(&format!(
                "  <- fade-in (threshold {}, margin {})",
                presets.fade_in.threshold, presets.fade_in.root_margin
            ));
        }
        if slides.matches(element) {
            line.push_str(&format!(
                "  <- slides (threshold {}, margin {})",
                presets.slides.threshold, presets.slides.root_margin
            ));
        }
        println!("{}", line);
    }

    Ok(())
}
