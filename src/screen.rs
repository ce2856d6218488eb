//! # Screen Translation
//!
//! Converts grid-unit layout results into pixel measurements for the render
//! layer: panel heights, per-panel vertical screen spans, and the offsets
//! of the printed page-break markers.

use serde::Serialize;

use crate::model::{GridRect, PageGeometry, CELL_HEIGHT, CELL_VMARGIN};

/// Viewport width in pixels below which the grid collapses into a single
/// stacked column.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Pixel height of `lines` grid lines, without the trailing cell margin.
pub fn grid_height_to_px(lines: u32) -> f64 {
    (lines as f64 * (CELL_HEIGHT + CELL_VMARGIN) - CELL_VMARGIN).max(0.0)
}

/// Vertical pixel span of one panel on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenSpan {
    pub top: f64,
    pub bottom: f64,
}

/// Assigns vertical screen positions panel by panel, in render order.
///
/// On a desktop viewport the grid position is authoritative. On a narrow
/// viewport panels stack full-width in order, so the cursor tracks the
/// bottom of the previously rendered panel. One cursor lives for exactly
/// one render pass.
#[derive(Debug, Clone)]
pub struct ScreenCursor {
    viewport_width: f64,
    last_bottom: f64,
}

impl ScreenCursor {
    pub fn new(viewport_width: f64) -> Self {
        Self {
            viewport_width,
            last_bottom: 0.0,
        }
    }

    /// Screen span of the next panel in render order.
    pub fn next_span(&mut self, rect: GridRect) -> ScreenSpan {
        let top = if self.viewport_width < MOBILE_BREAKPOINT {
            // Stacked layout: directly below the previous panel.
            self.last_bottom + CELL_VMARGIN
        } else {
            // The translation removes the trailing margin; add it back to
            // get the top edge of this panel's cell.
            grid_height_to_px(rect.y) + CELL_VMARGIN
        };
        let bottom = top + grid_height_to_px(rect.h);
        self.last_bottom = bottom;
        ScreenSpan { top, bottom }
    }
}

/// Pixel offsets, from the top of the grid, of the page-break markers that
/// fit inside a grid of `total_height_px`. One marker per whole page.
pub fn page_break_offsets(geometry: &PageGeometry, total_height_px: f64) -> Vec<f64> {
    let page_height = geometry.page_height_px();
    let pages = (total_height_px / page_height).floor() as u32;
    (1..=pages).map(|page| page as f64 * page_height).collect()
}
