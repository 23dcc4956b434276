//! Splash screen dismissal

use crate::page::Page;
use std::fmt;
use std::str::FromStr;
use tracing::debug;
use unveil_core::{ElementId, UnveilError};

/// When the splash goes away
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SplashDismiss {
    /// As soon as the page has loaded
    #[default]
    OnLoad,
    /// A fixed time after load
    Timeout { seconds: f64 },
    /// A fixed time after load, or earlier when the splash is clicked
    TimeoutOrClick { seconds: f64 },
}

impl FromStr for SplashDismiss {
    type Err = UnveilError;

    /// Parses `on-load`, `timeout:SECS` or `timeout-or-click:SECS`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || UnveilError::InvalidSplashPolicy(s.to_string());
        let seconds = |v: &str| -> Result<f64, UnveilError> {
            let secs: f64 = v.trim().parse().map_err(|_| invalid())?;
            if secs.is_finite() && secs >= 0.0 {
                Ok(secs)
            } else {
                Err(invalid())
            }
        };

        match s.trim().split_once(':') {
            None if s.trim() == "on-load" => Ok(SplashDismiss::OnLoad),
            Some(("timeout", v)) => Ok(SplashDismiss::Timeout { seconds: seconds(v)? }),
            Some(("timeout-or-click", v)) => Ok(SplashDismiss::TimeoutOrClick {
                seconds: seconds(v)?,
            }),
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for SplashDismiss {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplashDismiss::OnLoad => write!(f, "on-load"),
            SplashDismiss::Timeout { seconds } => write!(f, "timeout:{}", seconds),
            SplashDismiss::TimeoutOrClick { seconds } => write!(f, "timeout-or-click:{}", seconds),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplashConfig {
    pub element_id: String,
    pub dismiss: SplashDismiss,
}

impl Default for SplashConfig {
    fn default() -> Self {
        Self {
            element_id: "splash".to_string(),
            dismiss: SplashDismiss::OnLoad,
        }
    }
}

/// Hides the splash element once, according to its dismiss policy
#[derive(Debug, Clone)]
pub struct Splash {
    element: ElementId,
    dismiss: SplashDismiss,
    /// Seconds since load, `None` until the page has loaded
    elapsed: Option<f64>,
    dismissed: bool,
}

impl Splash {
    /// Attach to the configured element, or `None` if the page has none
    pub fn attach(page: &Page, config: &SplashConfig) -> Option<Self> {
        let Some(element) = page.element_by_dom_id(&config.element_id) else {
            debug!(element_id = %config.element_id, "no splash element");
            return None;
        };
        Some(Self {
            element,
            dismiss: config.dismiss,
            elapsed: None,
            dismissed: false,
        })
    }

    /// The splash element this behaviour hides
    pub fn element(&self) -> ElementId {
        self.element
    }

    /// Whether the splash has been hidden
    pub fn is_dismissed(&self) -> bool {
        self.dismissed
    }

    /// Start the dismiss clock; `OnLoad` hides immediately. Repeated loads are ignored.
    pub fn on_load(&mut self, page: &mut Page) {
        if self.elapsed.is_some() {
            return;
        }
        self.elapsed = Some(0.0);
        match self.dismiss {
            SplashDismiss::OnLoad => self.dismiss_now(page),
            // A zero timeout fires on load as well
            SplashDismiss::Timeout { .. } | SplashDismiss::TimeoutOrClick { .. } => {
                self.on_tick(0.0, page)
            }
        }
    }

    /// Advance time since load and hide once the timeout is reached
    pub fn on_tick(&mut self, dt: f64, page: &mut Page) {
        let seconds = match self.dismiss {
            SplashDismiss::Timeout { seconds } | SplashDismiss::TimeoutOrClick { seconds } => {
                seconds
            }
            SplashDismiss::OnLoad => return,
        };
        let Some(elapsed) = self.elapsed.as_mut() else {
            return;
        };

        *elapsed += dt.max(0.0);
        if *elapsed >= seconds {
            self.dismiss_now(page);
        }
    }

    /// Returns whether the click dismissed the splash
    pub fn on_click(&mut self, target: ElementId, page: &mut Page) -> bool {
        let clickable = matches!(self.dismiss, SplashDismiss::TimeoutOrClick { .. });
        if !clickable || target != self.element || self.dismissed {
            return false;
        }
        self.dismiss_now(page);
        true
    }

    fn dismiss_now(&mut self, page: &mut Page) {
        if self.dismissed {
            return;
        }
        page.hide(self.element);
        self.dismissed = true;
        debug!(element = %self.element, "splash dismissed");
    }
}
