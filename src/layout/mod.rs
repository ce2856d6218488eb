//! # Panel Layout Engine
//!
//! Turns the ordered panel list of a dashboard into placed rectangles on
//! the 24-column grid. Two passes are available:
//!
//! - [`build_layout`] computes the interactive arrangement: panels keep
//!   their stored positions, rows are normalized to full-width separators,
//!   and an optional title filter pins matching panels into a two-across
//!   stack.
//! - [`build_printable_layout`] computes the paginated arrangement: panels
//!   are packed top to bottom in dashboard order, and any panel that would
//!   straddle a printed page boundary restarts on the next page while the
//!   panels ending above it stretch down to fill the gap.
//!
//! The paginated pass is where the real work happens. It walks the panels
//! strictly in dashboard order, asking three questions per panel: where do
//! its columns let it start (occupancy), would it straddle a page there
//! (page break), and if so, who above it absorbs the hole it leaves behind
//! (retroactive growth). Input order is the author's layout hint, so the
//! same rectangles in a different order produce a different layout.

pub mod occupancy;
pub mod page_break;

use regex::RegexBuilder;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::LayoutError;
use crate::model::{Dashboard, GridRect, PageGeometry, Panel, PanelId, GRID_COLUMN_COUNT, ROW_HEIGHT};
use occupancy::ColumnOccupancy;
use page_break::BreakDecision;

/// A panel with its final position, ready for the render layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedPanel {
    pub id: PanelId,

    #[serde(flatten)]
    pub rect: GridRect,

    /// Whether the user may drag the panel in the interactive grid.
    #[serde(default = "default_true")]
    pub draggable: bool,

    /// Whether the user may resize the panel in the interactive grid.
    #[serde(default = "default_true")]
    pub resizable: bool,
}

impl PlacedPanel {
    fn new(id: PanelId, rect: GridRect) -> Self {
        Self {
            id,
            rect,
            draggable: true,
            resizable: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Case-insensitive title filter for the interactive pass. Matching panels
/// are pinned and restacked; everything else is dropped from the layout.
#[derive(Debug, Clone)]
pub struct PanelFilter {
    pattern: regex::Regex,
}

impl PanelFilter {
    /// Compile a filter pattern. Matching is case-insensitive, anywhere in
    /// the panel title.
    pub fn new(pattern: &str) -> Result<Self, LayoutError> {
        let pattern = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        Ok(Self { pattern })
    }

    pub fn matches(&self, panel: &Panel) -> bool {
        self.pattern.is_match(&panel.title)
    }
}

/// Normalize a panel's rectangle for layout. Rows always occupy the full
/// grid width at a fixed height of one line, whatever their stored size.
fn normalized_rect(panel: &Panel, rect: GridRect) -> GridRect {
    if panel.is_row() {
        GridRect::new(0, rect.y, GRID_COLUMN_COUNT, ROW_HEIGHT)
    } else {
        rect
    }
}

/// Interaction flags for a placed panel. An expanded row is anchored by the
/// panels below it, so only a collapsed row may be dragged; rows are never
/// resizable.
fn apply_kind_flags(panel: &Panel, placed: &mut PlacedPanel) {
    if panel.is_row() {
        placed.resizable = false;
        placed.draggable = panel.collapsed;
    }
}

/// Compute the interactive layout: stored positions pass through, rows are
/// normalized, and panels without a rectangle are skipped.
///
/// With a filter, only matching panels appear, pinned in place and stacked
/// two per band at half the grid width (each side keeps its own running
/// bottom).
pub fn build_layout(dashboard: &Dashboard, filter: Option<&PanelFilter>) -> Vec<PlacedPanel> {
    let half_width = GRID_COLUMN_COUNT / 2;
    let mut layout = Vec::with_capacity(dashboard.panels.len());
    let mut matched: u32 = 0;
    let mut side_bottoms = [0u32; 2];

    for panel in &dashboard.panels {
        let Some(rect) = panel.grid_rect else {
            debug!(panel = %panel.id, "skipping panel without a grid rectangle");
            continue;
        };

        let mut placed = PlacedPanel::new(panel.id, normalized_rect(panel, rect));
        apply_kind_flags(panel, &mut placed);

        match filter {
            None => layout.push(placed),
            Some(filter) if filter.matches(panel) => {
                let side = (matched % 2) as usize;
                placed.draggable = false;
                placed.resizable = false;
                placed.rect.x = side as u32 * half_width;
                placed.rect.y = side_bottoms[side];
                placed.rect.w = placed.rect.w.min(half_width);
                side_bottoms[side] = placed.rect.bottom();
                matched += 1;
                layout.push(placed);
            }
            Some(_) => {}
        }
    }

    layout
}

/// Compute the paginated layout: pack panels in dashboard order and keep
/// every panel that fits on one page from straddling a printed page
/// boundary.
///
/// When a panel's packed position would cross a boundary, it restarts at
/// the top of the next page; the packing floor of every column moves down
/// by the same offset, and the data panels that previously terminated each
/// column grow by the offset so the vacated space is filled instead of left
/// blank. A row separator immediately before such a panel is carried over
/// to the first line of the new page, keeping it attached to the panels it
/// introduces.
///
/// Collapsed rows must be expanded beforehand (see
/// [`Dashboard::expand_all_rows`]); this pass does not mutate the
/// dashboard.
pub fn build_printable_layout(dashboard: &Dashboard, geometry: &PageGeometry) -> Vec<PlacedPanel> {
    let lines_per_page = geometry.lines_per_page();
    let mut occupancy = ColumnOccupancy::new(GRID_COLUMN_COUNT);
    let mut placed: Vec<PlacedPanel> = Vec::with_capacity(dashboard.panels.len());

    for (idx, panel) in dashboard.panels.iter().enumerate() {
        let Some(rect) = panel.grid_rect else {
            debug!(panel = %panel.id, "skipping panel without a grid rectangle");
            continue;
        };

        let mut rect = normalized_rect(panel, rect);

        // Pack the panel at the lowest line its column span allows.
        rect.y = occupancy.peek_max_y(rect.x, rect.w);
        trace!(panel = %panel.id, y = rect.y, h = rect.h, "packed panel");

        if let BreakDecision::PushTo { y: page_start } =
            page_break::decide(rect.y, rect.h, lines_per_page)
        {
            let mut new_y = page_start;

            // A separator left at the bottom of a page would head nothing;
            // carry it to the first line of the new page, with its panel
            // directly below.
            if idx > 0 && dashboard.panels[idx - 1].is_row() {
                if let Some(prev) = placed.last_mut() {
                    if prev.id == dashboard.panels[idx - 1].id {
                        prev.rect.y += (page_start - rect.y) + 1;
                        new_y += 1;
                    }
                }
            }

            let offset = new_y - rect.y;
            debug!(
                panel = %panel.id,
                old_y = rect.y,
                new_y,
                offset,
                "panel would straddle a page boundary, pushing to next page"
            );
            rect.y = new_y;

            occupancy.raise_floor(offset);
            for owner in occupancy.owners() {
                if let Some(entry) = placed.get_mut(owner) {
                    entry.rect.h = entry.rect.h.saturating_add(offset);
                }
            }
        }

        let owner = (!panel.is_row()).then_some(placed.len());
        occupancy.commit(rect, owner);

        let mut entry = PlacedPanel::new(panel.id, rect);
        apply_kind_flags(panel, &mut entry);
        placed.push(entry);
    }

    placed
}

/// Write a layout back into the dashboard after a drag or resize, then
/// restore the canonical panel ordering. Placed entries without a matching
/// panel are ignored.
pub fn apply_layout(dashboard: &mut Dashboard, layout: &[PlacedPanel]) {
    for placed in layout {
        if let Some(panel) = dashboard.panels.iter_mut().find(|p| p.id == placed.id) {
            panel.grid_rect = Some(placed.rect);
        }
    }
    dashboard.sort_panels_by_grid_pos();
}
