use tracing::{debug, instrument, trace};

use super::{cell_dims, check_item_dims, tight_extent};
use crate::config::CaseConfig;
use crate::error::{CaseMkError, Result};
use crate::model::{GridLayout, Slot};

/// Upper bound on the number of slots one grid may hold.
pub const MAX_GRID_SLOTS: usize = 1_000_000;

/// Whole cells of size `cell` that fit in `usable` with one divider between neighbours.
fn cells_along(usable: f64, cell: f64, divider: f64) -> usize {
    (((usable + divider) / (cell + divider)).floor() as usize).max(1)
}

#[derive(Debug, Clone, Copy)]
struct Orientation {
    cell_w: f64,
    cell_l: f64,
    cols: usize,
    rows: usize,
    rotated: bool,
}

impl Orientation {
    fn try_new(cell_w: f64, cell_l: f64, rotated: bool, config: &CaseConfig) -> Option<Self> {
        let (inner_x, inner_y) = config.usable_area();
        if cell_w > inner_x || cell_l > inner_y {
            return None;
        }
        let div = config.divider_thickness;
        Some(Self {
            cell_w,
            cell_l,
            cols: cells_along(inner_x, cell_w, div),
            rows: cells_along(inner_y, cell_l, div),
            rotated,
        })
    }

    /// Saturates instead of overflowing for degenerate cell sizes.
    fn capacity(&self) -> usize {
        self.cols.checked_mul(self.rows).unwrap_or(usize::MAX)
    }
}

#[instrument(skip_all)]
/// Tiles the usable footprint with identical cells for one item.
///
/// Both the item's own orientation and the width/length swap are tried; the one
/// holding more cells wins, ties keep the item's own orientation. With `count`
/// set, at most `count` slots are placed and the last row may be short.
///
/// Errors with `OversizeItem` if one cell fits in neither orientation, and with
/// `InvalidInput` if more than [`MAX_GRID_SLOTS`] slots would be placed.
pub fn compute_grid_layout(
    item: (f64, f64, f64),
    config: &CaseConfig,
    count: Option<usize>,
) -> Result<GridLayout> {
    config.validate()?;
    let (width, length, height) = item;
    check_item_dims(width, length, height)?;
    if count == Some(0) {
        return Err(CaseMkError::InvalidInput("count must be at least 1".into()));
    }

    let (cell_w, cell_l, cell_h) = cell_dims(item, config);
    let as_is = Orientation::try_new(cell_w, cell_l, false, config);
    let swapped = Orientation::try_new(cell_l, cell_w, true, config);
    let best = match (as_is, swapped) {
        (Some(a), Some(b)) => {
            if a.capacity() >= b.capacity() {
                a
            } else {
                b
            }
        }
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => {
            return Err(CaseMkError::OversizeItem {
                width,
                length,
                height,
                max_width: config.outer_width(),
                max_length: config.outer_length(),
            });
        }
    };
    debug!(
        cols = best.cols,
        rows = best.rows,
        rotated = best.rotated,
        "grid orientation chosen"
    );

    let total_cells = match count {
        Some(n) => best.capacity().min(n),
        None => best.capacity(),
    };
    if total_cells > MAX_GRID_SLOTS {
        return Err(CaseMkError::InvalidInput(format!(
            "grid would hold {} slots, more than the limit of {}; pass a count or use larger items",
            total_cells, MAX_GRID_SLOTS
        )));
    }
    let cols = best.cols;
    let rows = total_cells.div_ceil(cols);

    let div = config.divider_thickness;
    let mut slots = Vec::with_capacity(total_cells);
    let mut widest_row = 0;
    for row in 0..rows {
        let cols_this_row = cols.min(total_cells - row * cols);
        widest_row = widest_row.max(cols_this_row);
        for col in 0..cols_this_row {
            let slot = Slot {
                x: col as f64 * (best.cell_w + div),
                y: row as f64 * (best.cell_l + div),
                width: best.cell_w,
                length: best.cell_l,
                height: cell_h,
                label_area: None,
                label_text: None,
            };
            trace!(x = slot.x, y = slot.y, "grid slot");
            slots.push(slot);
        }
    }

    let (total_width, total_length) = tight_extent(&slots, config);
    Ok(GridLayout {
        cols: widest_row,
        rows,
        cell_width: best.cell_w,
        cell_length: best.cell_l,
        cell_height: cell_h,
        rotated: best.rotated,
        slots,
        total_width,
        total_length,
    })
}
