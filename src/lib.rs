//! # Pagegrid
//!
//! A page-aware dashboard grid layout engine.
//!
//! Dashboards live on an infinitely tall 24-column grid. That works on a
//! screen and falls apart the moment the dashboard has to be printed: the
//! page slicer cuts wherever the page happens to end, and panels come out
//! split through the middle of a chart.
//!
//! Pagegrid treats the printed page as a hard constraint. The paginated
//! pass packs panels in dashboard order and, whenever a panel would
//! straddle a page boundary, restarts it at the top of the next page and
//! stretches the panels above to fill the gap. Nothing gets sliced after
//! the fact; panels flow *into* pages.
//!
//! ## Architecture
//!
//! ```text
//! Input (JSON/API)
//!       ↓
//!   [model]    — Dashboard tree: panels, rectangles, print options
//!       ↓
//!   [layout]   — Interactive and paginated placement passes
//!       ↓
//!   [screen]   — Grid units to pixels, page-break markers
//! ```

pub mod error;
pub mod layout;
pub mod model;
pub mod screen;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use error::LayoutError;

use layout::{PanelFilter, PlacedPanel};
use model::{Dashboard, PageGeometry, PrintOptions};
use serde::{Deserialize, Serialize};

/// A complete layout request: the dashboard plus how to lay it out.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutRequest {
    pub dashboard: Dashboard,

    /// Print configuration. When present with page breaks enabled, the
    /// paginated pass runs; otherwise the interactive pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub print: Option<PrintOptions>,

    /// Optional case-insensitive pattern matched against panel titles.
    /// Only applies to the interactive pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub panel_filter: Option<String>,
}

impl LayoutRequest {
    /// An interactive layout request with no filter.
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard,
            print: None,
            panel_filter: None,
        }
    }
}

/// Lay out a dashboard.
///
/// This is the primary entry point. In paginated mode collapsed rows are
/// expanded first so the panels they hide get positions, which is why the
/// request is taken mutably; the layout passes themselves do not touch the
/// dashboard.
pub fn layout(request: &mut LayoutRequest) -> Result<Vec<PlacedPanel>, LayoutError> {
    match &request.print {
        Some(options) if options.page_breaks => {
            let geometry = PageGeometry::from_print_options(options)?;
            request.dashboard.expand_all_rows();
            Ok(layout::build_printable_layout(&request.dashboard, &geometry))
        }
        print => {
            // Print preview without page breaks still needs the panels
            // hidden under collapsed rows to be visible.
            if print.is_some() {
                request.dashboard.expand_all_rows();
            }
            let filter = request
                .panel_filter
                .as_deref()
                .map(PanelFilter::new)
                .transpose()?;
            Ok(layout::build_layout(&request.dashboard, filter.as_ref()))
        }
    }
}

/// Lay out a dashboard described as JSON, returning the placed panels as
/// pretty-printed JSON.
pub fn layout_json(json: &str) -> Result<String, LayoutError> {
    let mut request: LayoutRequest = serde_json::from_str(json)?;
    let placed = layout(&mut request)?;
    Ok(serde_json::to_string_pretty(&placed)?)
}
