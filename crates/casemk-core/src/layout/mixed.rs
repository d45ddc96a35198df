use tracing::{debug, instrument, trace};

use super::{cell_dims, check_item_dims, tight_extent};
use crate::config::{CaseConfig, LabelDirection};
use crate::error::{CaseMkError, Result};
use crate::model::{Item, MixedLayout, Slot};

/// One slot to place: clearance-grown cell plus its optional label.
#[derive(Debug, Clone)]
struct Entry {
    w: f64,
    l: f64,
    h: f64,
    label: Option<String>,
}

impl Entry {
    fn area(&self) -> f64 {
        self.w * self.l
    }
}

/// Horizontal advance (including one trailing divider) and row-height contribution.
fn footprint(entry: &Entry, config: &CaseConfig) -> (f64, f64) {
    let div = config.divider_thickness;
    match (&entry.label, config.label_size) {
        (Some(_), Some((lw, ll))) => match config.label_direction {
            LabelDirection::Right => (entry.w + div + lw + div, entry.l.max(ll)),
            LabelDirection::Below => (entry.w.max(lw) + div, entry.l + div + ll),
        },
        _ => (entry.w + div, entry.l),
    }
}

fn expand(items: &[Item], config: &CaseConfig) -> Result<Vec<Entry>> {
    let mut entries = Vec::new();
    for item in items {
        check_item_dims(item.width, item.length, item.height)?;
        if item.count == 0 {
            return Err(CaseMkError::InvalidInput(format!(
                "count for item {}x{}x{} must be at least 1",
                item.width, item.length, item.height
            )));
        }
        let (w, l, h) = cell_dims((item.width, item.length, item.height), config);
        for _ in 0..item.count {
            entries.push(Entry {
                w,
                l,
                h,
                label: item.label.clone(),
            });
        }
    }
    // stable: equal areas keep input order
    entries.sort_by(|a, b| b.area().total_cmp(&a.area()));
    Ok(entries)
}

#[instrument(skip_all)]
/// Packs heterogeneous items into rows, largest cell area first.
///
/// Each entry goes into the current row when it fits the remaining width and
/// height; otherwise a new row opens one divider below the tallest entry of the
/// previous row. There is no backtracking, so `DoesNotFit` means this heuristic
/// ran out of room, not that no arrangement exists.
///
/// Labeled items reserve `label_size` to the right of or below their slot.
pub fn compute_mixed_layout(items: &[Item], config: &CaseConfig) -> Result<MixedLayout> {
    config.validate()?;
    if items.is_empty() {
        return Err(CaseMkError::Empty);
    }
    if config.label_size.is_none() && items.iter().any(|it| it.label.is_some()) {
        return Err(CaseMkError::InvalidConfig(
            "label_size required when items carry labels".into(),
        ));
    }

    let entries = expand(items, config)?;
    let (inner_x, inner_y) = config.usable_area();
    let div = config.divider_thickness;
    let oversize = |e: &Entry| CaseMkError::OversizeItem {
        width: e.w,
        length: e.l,
        height: e.h,
        max_width: config.outer_width(),
        max_length: config.outer_length(),
    };

    let mut slots: Vec<Slot> = Vec::with_capacity(entries.len());
    let mut row_x = 0.0_f64;
    let mut row_y = 0.0_f64;
    let mut row_height = 0.0_f64;
    let mut rows = 1;

    for entry in entries {
        let (advance, effective_l) = footprint(&entry, config);
        if advance - div > inner_x || effective_l > inner_y {
            return Err(oversize(&entry));
        }

        let fits_row = row_x + advance <= inner_x + div && effective_l <= inner_y - row_y;
        if !fits_row {
            row_y += row_height + div;
            row_x = 0.0;
            row_height = 0.0;
            rows += 1;
            if row_y + effective_l > inner_y {
                return Err(CaseMkError::DoesNotFit {
                    max_width: config.outer_width(),
                    max_length: config.outer_length(),
                });
            }
            debug!(row = rows, y = row_y, "opened new row");
        }

        let label_area = entry.label.as_ref().and(config.label_size);
        let slot = Slot {
            x: row_x,
            y: row_y,
            width: entry.w,
            length: entry.l,
            height: entry.h,
            label_area,
            label_text: entry.label,
        };
        trace!(x = slot.x, y = slot.y, w = slot.width, l = slot.length, "mixed slot");
        slots.push(slot);
        row_x += advance;
        row_height = row_height.max(effective_l);
    }

    let (total_width, total_length) = tight_extent(&slots, config);
    debug!(slots = slots.len(), rows, total_width, total_length, "mixed layout done");
    Ok(MixedLayout {
        slots,
        total_width,
        total_length,
        rows,
    })
}
