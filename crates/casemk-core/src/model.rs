use serde::{Deserialize, Serialize};

use crate::config::LabelDirection;

/// Axis-aligned rectangle in millimeters. `x,y` is the near corner; `w,l` are sizes.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub l: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, l: f64) -> Self {
        Self { x, y, w, l }
    }
    /// Far X edge (`x + w`).
    pub fn right(&self) -> f64 {
        self.x + self.w
    }
    /// Far Y edge (`y + l`).
    pub fn bottom(&self) -> f64 {
        self.y + self.l
    }
    /// True if the interiors intersect; shared edges do not count.
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.x >= other.right()
            || other.x >= self.right()
            || self.y >= other.bottom()
            || other.y >= self.bottom())
    }
    /// True if `r` lies fully inside `self`, within `eps`.
    pub fn contains(&self, r: &Rect, eps: f64) -> bool {
        r.x >= self.x - eps
            && r.y >= self.y - eps
            && r.right() <= self.right() + eps
            && r.bottom() <= self.bottom() + eps
    }
}

/// One kind of item to store: its dimensions, how many slots it needs and an
/// optional label engraved next to each of its slots.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub width: f64,
    pub length: f64,
    pub height: f64,
    #[serde(default = "default_count")]
    pub count: usize,
    #[serde(default)]
    pub label: Option<String>,
}

fn default_count() -> usize {
    1
}

impl Item {
    pub fn new(width: f64, length: f64, height: f64) -> Self {
        Self {
            width,
            length,
            height,
            count: 1,
            label: None,
        }
    }
    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

/// A placed cavity. Position is relative to the usable-area origin.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Slot {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub length: f64,
    /// Item height plus clearance.
    pub height: f64,
    /// Reserved label area (width, length); present only for labeled slots.
    pub label_area: Option<(f64, f64)>,
    pub label_text: Option<String>,
}

impl Slot {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.length)
    }

    /// Where the reserved label area sits, one divider away from the slot.
    /// Below-slot labels are centred on the slot when narrower than it.
    pub fn label_rect(&self, direction: LabelDirection, divider: f64) -> Option<Rect> {
        let (lw, ll) = self.label_area?;
        Some(match direction {
            LabelDirection::Right => Rect::new(self.x + self.width + divider, self.y, lw, ll),
            LabelDirection::Below => Rect::new(
                self.x + ((self.width - lw) / 2.0).max(0.0),
                self.y + self.length + divider,
                lw,
                ll,
            ),
        })
    }
}

/// Result of the uniform grid layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridLayout {
    /// Widest row actually placed.
    pub cols: usize,
    pub rows: usize,
    pub cell_width: f64,
    pub cell_length: f64,
    pub cell_height: f64,
    /// True if the cell was placed with width and length swapped.
    pub rotated: bool,
    pub slots: Vec<Slot>,
    pub total_width: f64,
    pub total_length: f64,
}

/// Result of the mixed first-fit layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MixedLayout {
    pub slots: Vec<Slot>,
    pub total_width: f64,
    pub total_length: f64,
    /// Number of rows opened by the packer.
    pub rows: usize,
}

/// Common view over layout results consumed by the assembler and exporters.
pub trait SlotLayout {
    fn slots(&self) -> &[Slot];
    /// Tight (width, length) of everything placed.
    fn extent(&self) -> (f64, f64);

    /// Tallest cavity; 0 when empty.
    fn max_slot_height(&self) -> f64 {
        self.slots().iter().map(|s| s.height).fold(0.0, f64::max)
    }

    /// Computes statistics for this layout.
    fn stats(&self) -> LayoutStats {
        let slots = self.slots();
        let (w, l) = self.extent();
        let cavity_area: f64 = slots.iter().map(|s| s.width * s.length).sum();
        let label_area: f64 = slots
            .iter()
            .filter_map(|s| s.label_area)
            .map(|(lw, ll)| lw * ll)
            .sum();
        let extent_area = w * l;
        let occupancy = if extent_area > 0.0 {
            cavity_area / extent_area
        } else {
            0.0
        };
        LayoutStats {
            num_slots: slots.len(),
            num_labeled: slots.iter().filter(|s| s.label_text.is_some()).count(),
            cavity_area,
            label_area,
            extent_area,
            occupancy,
            max_height: self.max_slot_height(),
        }
    }
}

impl SlotLayout for GridLayout {
    fn slots(&self) -> &[Slot] {
        &self.slots
    }
    fn extent(&self) -> (f64, f64) {
        (self.total_width, self.total_length)
    }
}

impl SlotLayout for MixedLayout {
    fn slots(&self) -> &[Slot] {
        &self.slots
    }
    fn extent(&self) -> (f64, f64) {
        (self.total_width, self.total_length)
    }
}

/// Either layout kind, for callers that pick the engine at runtime.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CaseLayout {
    Grid(GridLayout),
    Mixed(MixedLayout),
}

impl SlotLayout for CaseLayout {
    fn slots(&self) -> &[Slot] {
        match self {
            CaseLayout::Grid(g) => g.slots(),
            CaseLayout::Mixed(m) => m.slots(),
        }
    }
    fn extent(&self) -> (f64, f64) {
        match self {
            CaseLayout::Grid(g) => g.extent(),
            CaseLayout::Mixed(m) => m.extent(),
        }
    }
}

impl From<GridLayout> for CaseLayout {
    fn from(g: GridLayout) -> Self {
        CaseLayout::Grid(g)
    }
}

impl From<MixedLayout> for CaseLayout {
    fn from(m: MixedLayout) -> Self {
        CaseLayout::Mixed(m)
    }
}

/// Statistics about how well a layout uses its extent.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LayoutStats {
    pub num_slots: usize,
    /// Slots that carry label text.
    pub num_labeled: usize,
    /// Sum of cavity areas (mm²).
    pub cavity_area: f64,
    /// Sum of reserved label areas (mm²).
    pub label_area: f64,
    /// Area of the tight extent (mm²).
    pub extent_area: f64,
    /// cavity_area / extent_area (0.0 to 1.0).
    pub occupancy: f64,
    /// Tallest cavity (mm).
    pub max_height: f64,
}

impl LayoutStats {
    /// Returns a human-readable summary of the statistics.
    pub fn summary(&self) -> String {
        format!(
            "Slots: {}, Labeled: {}, Occupancy: {:.2}%, Cavity Area: {:.1} mm², Extent Area: {:.1} mm², Max Height: {:.2} mm",
            self.num_slots,
            self.num_labeled,
            self.occupancy * 100.0,
            self.cavity_area,
            self.extent_area,
            self.max_height,
        )
    }

    /// Extent area not covered by cavities or labels (mm²).
    pub fn wasted_area(&self) -> f64 {
        (self.extent_area - self.cavity_area - self.label_area).max(0.0)
    }
}
