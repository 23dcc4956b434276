//! Scroll simulation command

use crate::presets::{Presets, FADE_IN_SELECTOR, SLIDES_SELECTOR};
use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;
use std::path::Path;
use tracing::info;
use unveil_observer::WatchStatus;
use unveil_page::{
    load_page, BehaviorHandle, LoadedPage, Page, PageChange, PageSession, SmoothScrollConfig,
    SplashConfig, SplashDismiss,
};

/// Upper bound on scroll steps in one simulation
pub const MAX_STEPS: f64 = 1_000_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

pub struct SimulateArgs {
    pub page: String,
    pub step: f64,
    pub tick: f64,
    pub splash: SplashDismiss,
    pub config: Option<String>,
    pub format: OutputFormat,
}

/// One visual change, labelled for output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChangeLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    pub change: String,
}

/// Changes produced by one simulation step
#[derive(Debug, Clone, Serialize)]
pub struct StepReport {
    pub step: usize,
    pub scroll_y: f64,
    pub changes: Vec<ChangeLine>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ObserverSummary {
    pub selector: String,
    pub revealed: Vec<String>,
    pub never_revealed: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub title: String,
    pub steps: Vec<StepReport>,
    pub observers: Vec<ObserverSummary>,
    pub splash_dismissed: Option<bool>,
}

/// Validate the flags, run the simulation and print the report
pub fn run(args: SimulateArgs) -> Result<()> {
    if !args.step.is_finite() || args.step <= 0.0 {
        anyhow::bail!("--step must be a positive number of pixels, got {}", args.step);
    }
    if !args.tick.is_finite() || args.tick < 0.0 {
        anyhow::bail!("--tick must be a non-negative number of seconds, got {}", args.tick);
    }

    let loaded = load_page(Path::new(&args.page)).context("Failed to load page")?;
    let presets = Presets::load(args.config.as_deref()).context("Failed to load presets")?;

    let report = simulate(loaded, &presets, args.step, args.tick, args.splash)?;
    info!(steps = report.steps.len(), "simulation finished");

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Text => print_text(&report),
    }

    Ok(())
}

/// Load the page, scroll it top to bottom in `step` increments and collect
/// every change. Steps that change nothing are omitted.
///
/// Fails when `step` would need more than [`MAX_STEPS`] steps.
pub fn simulate(
    loaded: LoadedPage,
    presets: &Presets,
    step: f64,
    tick: f64,
    splash: SplashDismiss,
) -> Result<SimulationReport> {
    let title = loaded.page.title.clone();
    let mut session = PageSession::new(loaded.page, loaded.viewport);

    let fade_in = session.install_reveal(FADE_IN_SELECTOR, presets.fade_in.clone())?;
    let slides = session.install_reveal(SLIDES_SELECTOR, presets.slides.clone())?;
    let splash_config = SplashConfig {
        dismiss: splash,
        ..SplashConfig::default()
    };
    let splash_installed = session.install_splash(&splash_config).is_some();
    session.install_menu("menu-btn", "mobile-menu");
    session.install_anchors(SmoothScrollConfig::default());

    let mut steps = Vec::new();
    let mut record = |index: usize, session: &mut PageSession| {
        let changes = session.pump();
        if !changes.is_empty() {
            steps.push(StepReport {
                step: index,
                scroll_y: session.viewport().scroll_y,
                changes: describe_all(session.page(), &changes),
            });
        }
    };

    session.load();
    record(0, &mut session);

    let max_scroll = session
        .viewport()
        .max_scroll(session.page().document_height());
    if max_scroll / step > MAX_STEPS {
        anyhow::bail!(
            "--step {} needs more than {} steps to cover {}px",
            step,
            MAX_STEPS,
            max_scroll
        );
    }

    let mut index = 0;
    let mut y = 0.0;
    while y < max_scroll {
        index += 1;
        let next = (y + step).min(max_scroll);
        if next <= y {
            anyhow::bail!("--step {} is too small to scroll past {}px", step, y);
        }
        y = next;
        session.scroll_to(y);
        session.tick(tick);
        record(index, &mut session);
    }

    let observers = vec![
        summarize(&session, fade_in, FADE_IN_SELECTOR),
        summarize(&session, slides, SLIDES_SELECTOR),
    ];
    let splash_dismissed = splash_installed.then(|| {
        session
            .page()
            .element_by_dom_id(&splash_config.element_id)
            .and_then(|id| session.page().get(id))
            .is_some_and(|el| el.hidden)
    });

    Ok(SimulationReport {
        title,
        steps,
        observers,
        splash_dismissed,
    })
}

fn summarize(session: &PageSession, handle: BehaviorHandle, selector: &str) -> ObserverSummary {
    let mut summary = ObserverSummary {
        selector: selector.to_string(),
        ..ObserverSummary::default()
    };
    let Some(observer) = session.observer(handle) else {
        return summary;
    };

    let page = session.page();
    for id in page.query_selector_all(selector) {
        match observer.status(id) {
            Some(WatchStatus::Revealed) => summary.revealed.push(page.label(id)),
            _ => summary.never_revealed.push(page.label(id)),
        }
    }
    summary
}

fn describe_all(page: &Page, changes: &[PageChange]) -> Vec<ChangeLine> {
    changes.iter().map(|change| describe(page, change)).collect()
}

fn describe(page: &Page, change: &PageChange) -> ChangeLine {
    match change {
        PageChange::ClassAdded { element, class } => ChangeLine {
            element: Some(page.label(*element)),
            change: format!("+{}", class),
        },
        PageChange::ClassRemoved { element, class } => ChangeLine {
            element: Some(page.label(*element)),
            change: format!("-{}", class),
        },
        PageChange::Hidden { element } => ChangeLine {
            element: Some(page.label(*element)),
            change: "hidden".to_string(),
        },
        PageChange::Shown { element } => ChangeLine {
            element: Some(page.label(*element)),
            change: "shown".to_string(),
        },
        PageChange::Scrolled { from, to } => ChangeLine {
            element: None,
            change: format!("scroll {} -> {}", from, to),
        },
    }
}

fn print_text(report: &SimulationReport) {
    if !report.title.is_empty() {
        println!("Simulating \"{}\"", report.title);
    }

    for step in &report.steps {
        println!("step {:>3}  scroll_y={}", step.step, step.scroll_y);
        for line in &step.changes {
            match &line.element {
                Some(element) => println!("    {:<24} {}", element, line.change),
                None => println!("    {}", line.change),
            }
        }
    }

    println!();
    for summary in &report.observers {
        println!(
            "{}: {} revealed, {} never revealed",
            summary.selector,
            summary.revealed.len(),
            summary.never_revealed.len()
        );
        for label in &summary.never_revealed {
            println!("    never revealed: {}", label);
        }
    }
    match report.splash_dismissed {
        Some(true) => println!("splash: dismissed"),
        Some(false) => println!("splash: still showing"),
        None => {}
    }
}
