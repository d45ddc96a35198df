use crate::config::CaseConfig;
use crate::error::{CaseMkError, Result};
use crate::model::{CaseLayout, Item, Slot};

pub mod grid;
pub mod mixed;

pub use grid::{MAX_GRID_SLOTS, compute_grid_layout};
pub use mixed::compute_mixed_layout;

/// What to lay out: one item repeated on a grid, or a list of item kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutRequest {
    /// One item's (width, length, height); `count` caps the slot number, `None` fills the footprint.
    Single {
        dims: (f64, f64, f64),
        count: Option<usize>,
    },
    /// Heterogeneous items packed first-fit by row.
    Mixed(Vec<Item>),
}

/// Runs the engine matching `request`.
pub fn compute_layout(request: &LayoutRequest, config: &CaseConfig) -> Result<CaseLayout> {
    match request {
        LayoutRequest::Single { dims, count } => {
            compute_grid_layout(*dims, config, *count).map(CaseLayout::from)
        }
        LayoutRequest::Mixed(items) => compute_mixed_layout(items, config).map(CaseLayout::from),
    }
}

/// Item dimensions grown by the configured clearance.
pub(crate) fn cell_dims(dims: (f64, f64, f64), config: &CaseConfig) -> (f64, f64, f64) {
    let c = config.clearance;
    (dims.0 + c, dims.1 + c, dims.2 + c)
}

pub(crate) fn check_item_dims(width: f64, length: f64, height: f64) -> Result<()> {
    let ok = |v: f64| v > 0.0 && v.is_finite();
    if !ok(width) || !ok(length) || !ok(height) {
        return Err(CaseMkError::InvalidInput(format!(
            "item dimensions must be positive, got {}x{}x{}",
            width, length, height
        )));
    }
    Ok(())
}

/// Tight bounding box over slots and their label areas, measured from the usable origin.
pub(crate) fn tight_extent(slots: &[Slot], config: &CaseConfig) -> (f64, f64) {
    let mut max_x = 0.0_f64;
    let mut max_y = 0.0_f64;
    for slot in slots {
        let r = slot.rect();
        max_x = max_x.max(r.right());
        max_y = max_y.max(r.bottom());
        if let Some(lr) = slot.label_rect(config.label_direction, config.divider_thickness) {
            max_x = max_x.max(lr.right());
            max_y = max_y.max(lr.bottom());
        }
    }
    (max_x, max_y)
}
