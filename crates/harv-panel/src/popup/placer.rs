//! Popup placement — pure, viewport-clamped anchor positioning.

use harv_common::{Point, Rect, Viewport};
use harv_config::PopupConfig;

/// Fixed popup dimensions plus the gap kept from the anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PopupSize {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
}

impl Default for PopupSize {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 150.0,
            margin: 10.0,
        }
    }
}

impl From<&PopupConfig> for PopupSize {
    fn from(config: &PopupConfig) -> Self {
        Self {
            width: config.width,
            height: config.height,
            margin: config.margin,
        }
    }
}

/// Compute the popup position for an anchor rectangle.
///
/// `x` is the popup's horizontal center: it starts at the anchor's
/// center and is clamped so the popup never crosses either vertical
/// viewport edge. `y` prefers sitting above the anchor; when the full
/// popup would not fit above the viewport top, it flips below.
///
/// Total function: any anchor and viewport produce a position.
pub fn place(anchor: Rect, viewport: Viewport, popup: PopupSize) -> Point {
    let half = popup.width / 2.0;

    let mut x = anchor.center_x();
    if x - half < 0.0 {
        x = half;
    } else if x + half > viewport.width {
        x = viewport.width - half;
    }

    let y = if anchor.top - popup.height < 0.0 {
        anchor.bottom + popup.margin
    } else {
        anchor.top - popup.margin
    };

    Point { x, y }
}
