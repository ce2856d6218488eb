//! # Dashboard Model
//!
//! The input representation for the layout engine. A dashboard is an ordered
//! list of panels, each with an integer rectangle on a 24-column grid. This
//! is designed to be easily produced by a dashboard UI's state tree, a JSON
//! document store, or direct construction.
//!
//! Panel order matters: it is the author's layout hint. The paginated pass
//! consumes panels strictly in this order, so the same rectangles in a
//! different order produce a different layout.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;

/// Number of columns in the layout grid.
pub const GRID_COLUMN_COUNT: u32 = 24;

/// Height of a row separator panel, in grid lines.
pub const ROW_HEIGHT: u32 = 1;

/// Screen height of one grid line in pixels.
pub const CELL_HEIGHT: f64 = 30.0;

/// Vertical margin between grid cells in pixels.
pub const CELL_VMARGIN: f64 = 8.0;

/// Stable identity of a panel, owned by the caller's dashboard state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(pub u64);

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An integer rectangle in grid units.
///
/// `x + w` must not exceed [`GRID_COLUMN_COUNT`]; `w` and `h` must be
/// positive. The layout passes clamp out-of-range spans rather than fail,
/// since a dashboard must always render something.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridRect {
    pub fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// First grid line below the rectangle.
    pub fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// First grid column to the right of the rectangle.
    pub fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Do the column spans of the two rectangles intersect?
    pub fn columns_overlap(&self, other: &GridRect) -> bool {
        self.x < other.right() && other.x < self.right()
    }

    /// Do the two rectangles share any grid cell?
    pub fn intersects(&self, other: &GridRect) -> bool {
        self.columns_overlap(other) && self.y < other.bottom() && other.y < self.bottom()
    }
}

/// What kind of panel this is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PanelKind {
    /// A data panel: a chart, a table, a stat.
    #[default]
    Panel,

    /// A full-width separator that groups the panels below it. Rows are one
    /// line tall and can be collapsed to hide their panels.
    Row,

    /// A reserved slot that has no content yet. Laid out like a data panel.
    Placeholder,
}

/// A single dashboard panel.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Panel {
    pub id: PanelId,

    /// Display title, matched by the panel filter.
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub kind: PanelKind,

    /// Position on the grid. Panels without one are excluded from layout
    /// entirely; the caller is responsible for repairing them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_rect: Option<GridRect>,

    /// Whether this row currently hides the panels below it. Meaningless for
    /// non-row panels.
    #[serde(default)]
    pub collapsed: bool,
}

impl Panel {
    /// Create a data panel.
    pub fn new(id: u64, rect: GridRect) -> Self {
        Self {
            id: PanelId(id),
            title: String::new(),
            kind: PanelKind::Panel,
            grid_rect: Some(rect),
            collapsed: false,
        }
    }

    /// Create a row separator at the given grid line.
    pub fn row(id: u64, y: u32) -> Self {
        Self {
            id: PanelId(id),
            title: String::new(),
            kind: PanelKind::Row,
            grid_rect: Some(GridRect::new(0, y, GRID_COLUMN_COUNT, ROW_HEIGHT)),
            collapsed: false,
        }
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn is_row(&self) -> bool {
        self.kind == PanelKind::Row
    }

    /// Expand a collapsed row so the panels it hides take part in layout.
    /// One-way: the layout engine never collapses a row back.
    pub fn expand(&mut self) {
        self.collapsed = false;
    }
}

/// An ordered collection of panels.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default)]
    pub panels: Vec<Panel>,
}

impl Dashboard {
    pub fn new(panels: Vec<Panel>) -> Self {
        Self {
            title: None,
            panels,
        }
    }

    pub fn panel(&self, id: PanelId) -> Option<&Panel> {
        self.panels.iter().find(|p| p.id == id)
    }

    /// Expand every collapsed row. The paginated pass needs positions for
    /// the panels a collapsed row hides, so this runs as an explicit
    /// pre-pass before `build_printable_layout`.
    pub fn expand_all_rows(&mut self) {
        for panel in &mut self.panels {
            if panel.is_row() && panel.collapsed {
                panel.expand();
            }
        }
    }

    /// Restore the canonical panel ordering: top to bottom, left to right.
    /// Panels without a rectangle keep their relative order at the end.
    pub fn sort_panels_by_grid_pos(&mut self) {
        self.panels.sort_by_key(|panel| {
            panel
                .grid_rect
                .map_or((u32::MAX, u32::MAX), |rect| (rect.y, rect.x))
        });
    }
}

/// Printed page orientation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

impl Orientation {
    /// Grid lines that fit on one printed page at scale 1.0.
    pub fn base_line_count(&self) -> u32 {
        match self {
            Orientation::Landscape => 17,
            Orientation::Portrait => 26,
        }
    }
}

/// Print configuration supplied with a layout request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrintOptions {
    #[serde(default)]
    pub orientation: Orientation,

    /// Multiplier on the page's line capacity. Printing scaled down fits
    /// proportionally more grid lines on each page.
    #[serde(default = "default_scale")]
    pub scale_factor: f64,

    /// Whether panels are repacked so none straddles a page boundary.
    /// When false the interactive arrangement is printed as-is.
    #[serde(default = "default_true")]
    pub page_breaks: bool,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            orientation: Orientation::default(),
            scale_factor: 1.0,
            page_breaks: true,
        }
    }
}

fn default_scale() -> f64 {
    1.0
}

fn default_true() -> bool {
    true
}

/// Fixed page measurements for one paginated layout pass.
///
/// Validated at construction: the page math divides by the line count, so a
/// zero would be fatal rather than recoverable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    lines_per_page: u32,
    px_per_line: f64,
}

impl PageGeometry {
    pub fn new(lines_per_page: u32) -> Result<Self, LayoutError> {
        if lines_per_page == 0 {
            return Err(LayoutError::Geometry(
                "lines per page must be positive".to_string(),
            ));
        }
        Ok(Self {
            lines_per_page,
            px_per_line: CELL_HEIGHT + CELL_VMARGIN,
        })
    }

    /// Derive the page geometry from print options: the orientation's base
    /// line count scaled by the zoom factor, rounded to whole lines.
    pub fn from_print_options(options: &PrintOptions) -> Result<Self, LayoutError> {
        if !(options.scale_factor > 0.0) {
            return Err(LayoutError::Geometry(format!(
                "scale factor must be positive, got {}",
                options.scale_factor
            )));
        }
        let lines = options.orientation.base_line_count() as f64 * options.scale_factor;
        Self::new(lines.round() as u32)
    }

    pub fn lines_per_page(&self) -> u32 {
        self.lines_per_page
    }

    pub fn px_per_line(&self) -> f64 {
        self.px_per_line
    }

    /// Height of one printed page in pixels.
    pub fn page_height_px(&self) -> f64 {
        self.px_per_line * self.lines_per_page as f64
    }
}
