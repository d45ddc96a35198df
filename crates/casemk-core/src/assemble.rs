use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::{CaseConfig, LabelDirection, resolve_outer_footprint};
use crate::geometry::Shape;
use crate::model::{Slot, SlotLayout};

/// Overshoot so cuts pass cleanly through the top face.
pub const CUT_EPSILON: f64 = 0.01;
/// Share of the label area the text may cover on each axis.
pub const LABEL_FILL: f64 = 0.85;
/// Average glyph advance as a fraction of glyph height.
pub const CHAR_WIDTH_RATIO: f64 = 0.6;
/// Smallest glyph size that still prints legibly.
pub const MIN_TEXT_SIZE: f64 = 2.5;

/// Outer dimensions of the finished tray, excluding any stacking lip or foot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CaseEnvelope {
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

/// Outer box size: resolved footprint, base plus the tallest cavity.
pub fn case_envelope<L: SlotLayout + ?Sized>(layout: &L, config: &CaseConfig) -> CaseEnvelope {
    let (width, length) = resolve_outer_footprint(layout.extent(), config);
    CaseEnvelope {
        width,
        length,
        height: config.base_height + layout.max_slot_height(),
    }
}

/// Inward offsets of the stacking lip opening and of the foot, in that order.
/// The foot offset is never smaller than the lip offset, so the foot of one case
/// seats inside the lip of the case below with `stack_clearance` per side.
pub fn stack_offsets(config: &CaseConfig) -> (f64, f64) {
    let lip = config.stack_lip_inner;
    (lip, lip + config.stack_clearance.max(0.0))
}

/// Glyph size for `text` inside a `label_w` x `label_l` area.
///
/// Right-of-slot labels are rotated, so the text runs along the label length.
/// The configured size is an upper bound; the result never drops below
/// [`MIN_TEXT_SIZE`].
pub fn label_text_size(text: &str, label_w: f64, label_l: f64, config: &CaseConfig) -> f64 {
    let n_chars = text.chars().count().max(1) as f64;
    let run = n_chars * CHAR_WIDTH_RATIO;
    let (by_length, by_width) = match config.label_direction {
        LabelDirection::Right => (label_l * LABEL_FILL / run, label_w * LABEL_FILL),
        LabelDirection::Below => (label_l * LABEL_FILL, label_w * LABEL_FILL / run),
    };
    config
        .label_text_size
        .min(by_length)
        .min(by_width)
        .max(MIN_TEXT_SIZE)
}

/// 2D outer outline, corners rounded by `offset` when a radius is set.
fn outline(width: f64, length: f64, radius: f64) -> Shape {
    if radius > 0.0 {
        Shape::square(width - 2.0 * radius, length - 2.0 * radius)
            .translate(radius, radius, 0.0)
            .offset(radius)
    } else {
        Shape::square(width, length)
    }
}

fn cavities(slots: &[Slot], origin: f64, base: f64, depth: f64) -> Vec<Shape> {
    slots
        .iter()
        .map(|s| {
            Shape::cube(s.width, s.length, depth + CUT_EPSILON).translate(
                origin + s.x,
                origin + s.y,
                base,
            )
        })
        .collect()
}

fn label_cuts(slots: &[Slot], config: &CaseConfig, top: f64) -> Vec<Shape> {
    let origin = config.slot_origin();
    let depth = config.label_text_depth;
    let angle = match config.label_direction {
        LabelDirection::Right => 90.0,
        LabelDirection::Below => 0.0,
    };
    let mut cuts = Vec::new();
    for slot in slots {
        let Some(text) = slot.label_text.as_deref().filter(|t| !t.is_empty()) else {
            continue;
        };
        let Some(area) = slot.label_rect(config.label_direction, config.divider_thickness) else {
            continue;
        };
        let size = label_text_size(text, area.w, area.l, config);
        let cx = origin + area.x + area.w / 2.0;
        let cy = origin + area.y + area.l / 2.0;
        debug!(text, size, cx, cy, "label placed");
        cuts.push(
            Shape::text(text, size)
                .rotate_z(angle)
                .extrude(depth + CUT_EPSILON)
                .translate(cx, cy, top - depth),
        );
    }
    cuts
}

#[instrument(skip_all)]
/// Builds the tray solid for `layout`.
///
/// Cavities share one depth (the tallest slot) and are cut in a single
/// difference; label text is engraved in a second one. With `stackable`, a lip
/// ring on top and a foot below are unioned on.
pub fn assemble_case<L: SlotLayout + ?Sized>(layout: &L, config: &CaseConfig) -> Shape {
    let env = case_envelope(layout, config);
    let radius = config.corner_radius;
    let base = config.base_height;
    let depth = layout.max_slot_height();
    debug!(
        width = env.width,
        length = env.length,
        height = env.height,
        "outer box"
    );

    let outer = if radius > 0.0 {
        outline(env.width, env.length, radius).extrude(env.height)
    } else {
        Shape::cube(env.width, env.length, env.height)
    };

    let cuts = cavities(layout.slots(), config.slot_origin(), base, depth);
    let mut tray = if cuts.is_empty() {
        outer
    } else {
        outer.difference(Shape::union(cuts))
    };

    let labels = label_cuts(layout.slots(), config, env.height);
    if !labels.is_empty() {
        tray = tray.difference(Shape::union(labels));
    }

    if config.stackable {
        let lip_height = config.stack_lip_height;
        let (lip_offset, foot_offset) = stack_offsets(config);
        let rim = outline(env.width, env.length, radius);
        let lip = rim
            .clone()
            .difference(rim.clone().offset(-lip_offset))
            .extrude(lip_height)
            .translate(0.0, 0.0, env.height);
        let foot = rim
            .offset(-foot_offset)
            .extrude(lip_height)
            .translate(0.0, 0.0, -lip_height);
        tray = Shape::union(vec![tray, lip, foot]);
    }
    tray
}
