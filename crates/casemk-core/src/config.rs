use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Extra margin kept between cavities and a rounded outer corner, on top of the radius.
pub const CORNER_SAFETY_MARGIN: f64 = 1.0;

/// Where the reserved label area sits relative to its slot.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LabelDirection {
    /// Label area to the right of the slot (+X); text is rotated to run along Y.
    #[default]
    Right,
    /// Label area below the slot (+Y); text runs along X.
    Below,
}

impl FromStr for LabelDirection {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "right" | "x" | "right-of-slot" => Ok(Self::Right),
            "below" | "y" | "below-slot" => Ok(Self::Below),
            _ => Err(()),
        }
    }
}

/// Manufacturing parameters for a case. All lengths are millimeters.
///
/// Key notes:
///   - `case_size` fixes the outer dimensions and overrides `max_footprint`
///   - `corner_radius` > 0 rounds the outer corners and shrinks the usable area by
///     `corner_radius + CORNER_SAFETY_MARGIN` on every side
///   - stacking parameters are only checked when `stackable` is set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CaseConfig {
    /// Maximum outer footprint (width, length).
    pub max_footprint: (f64, f64),
    /// Fixed outer case dimensions (width, length).
    pub case_size: Option<(f64, f64)>,
    /// Added to every item dimension so the object sits loosely.
    pub clearance: f64,
    pub wall_thickness: f64,
    /// Material between adjacent slots.
    pub divider_thickness: f64,
    /// Floor height below the cavities.
    pub base_height: f64,
    /// Outer corner radius, 0 = sharp.
    pub corner_radius: f64,

    pub stackable: bool,
    /// How far the stacking lip extends inward from the outer outline.
    pub stack_lip_inner: f64,
    pub stack_lip_height: f64,
    /// Per-side fit gap between the foot and the lip opening.
    pub stack_clearance: f64,

    /// Label area (width, length) reserved next to slots that carry label text.
    pub label_size: Option<(f64, f64)>,
    pub label_direction: LabelDirection,
    /// Preferred glyph size for engraved labels.
    pub label_text_size: f64,
    /// Engrave depth into the top surface.
    pub label_text_depth: f64,
}

impl Default for CaseConfig {
    fn default() -> Self {
        Self {
            max_footprint: (350.0, 300.0),
            case_size: None,
            clearance: 1.5,
            wall_thickness: 2.0,
            divider_thickness: 1.5,
            base_height: 2.0,
            corner_radius: 0.0,
            stackable: false,
            stack_lip_inner: 2.0,
            stack_lip_height: 2.0,
            stack_clearance: 0.3,
            label_size: None,
            label_direction: LabelDirection::Right,
            label_text_size: 4.0,
            label_text_depth: 0.5,
        }
    }
}

fn positive(v: f64) -> bool {
    v > 0.0 && v.is_finite()
}

fn non_negative(v: f64) -> bool {
    v >= 0.0 && v.is_finite()
}

impl CaseConfig {
    /// Validates the configuration parameters.
    ///
    /// Returns `InvalidConfig` if:
    /// - A footprint, case size or label size has a non-positive side
    /// - The case size leaves no room inside the walls
    /// - A thickness, height or text parameter is not strictly positive
    /// - Clearance, corner radius or stack clearance is negative
    /// - `stackable` is set without positive lip dimensions
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::CaseMkError;

        let (mw, ml) = self.max_footprint;
        if !positive(mw) || !positive(ml) {
            return Err(CaseMkError::InvalidConfig(
                "max_footprint must have positive dimensions".into(),
            ));
        }
        if let Some((cw, cl)) = self.case_size {
            if !positive(cw) || !positive(cl) {
                return Err(CaseMkError::InvalidConfig(
                    "case_size must have positive dimensions".into(),
                ));
            }
            let inner_x = cw - 2.0 * self.wall_thickness;
            let inner_y = cl - 2.0 * self.wall_thickness;
            if inner_x <= 0.0 || inner_y <= 0.0 {
                return Err(CaseMkError::InvalidConfig(format!(
                    "case_size {}x{} too small for wall thickness {} (need room for slots)",
                    cw, cl, self.wall_thickness
                )));
            }
        }
        if !non_negative(self.clearance) {
            return Err(CaseMkError::InvalidConfig(
                "clearance must be non-negative".into(),
            ));
        }
        if !positive(self.wall_thickness) {
            return Err(CaseMkError::InvalidConfig(
                "wall_thickness must be positive".into(),
            ));
        }
        if !positive(self.divider_thickness) {
            return Err(CaseMkError::InvalidConfig(
                "divider_thickness must be positive".into(),
            ));
        }
        if !positive(self.base_height) {
            return Err(CaseMkError::InvalidConfig(
                "base_height must be positive".into(),
            ));
        }
        if !non_negative(self.corner_radius) {
            return Err(CaseMkError::InvalidConfig(
                "corner_radius must be non-negative".into(),
            ));
        }
        if self.stackable {
            if !positive(self.stack_lip_inner) {
                return Err(CaseMkError::InvalidConfig(
                    "stack_lip_inner must be positive when stackable".into(),
                ));
            }
            if !positive(self.stack_lip_height) {
                return Err(CaseMkError::InvalidConfig(
                    "stack_lip_height must be positive when stackable".into(),
                ));
            }
            if !non_negative(self.stack_clearance) {
                return Err(CaseMkError::InvalidConfig(
                    "stack_clearance must be non-negative".into(),
                ));
            }
        }
        if let Some((lw, ll)) = self.label_size {
            if !positive(lw) || !positive(ll) {
                return Err(CaseMkError::InvalidConfig(
                    "label_size must have positive dimensions".into(),
                ));
            }
        }
        if !positive(self.label_text_size) {
            return Err(CaseMkError::InvalidConfig(
                "label_text_size must be positive".into(),
            ));
        }
        if !positive(self.label_text_depth) {
            return Err(CaseMkError::InvalidConfig(
                "label_text_depth must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Outer width: fixed case size if set, otherwise the max footprint.
    pub fn outer_width(&self) -> f64 {
        match self.case_size {
            Some((w, _)) => w,
            None => self.max_footprint.0,
        }
    }

    /// Outer length: fixed case size if set, otherwise the max footprint.
    pub fn outer_length(&self) -> f64 {
        match self.case_size {
            Some((_, l)) => l,
            None => self.max_footprint.1,
        }
    }

    /// Margin between the inner wall face and the first cavity, per side.
    /// Zero for sharp corners.
    pub fn corner_inset(&self) -> f64 {
        if self.corner_radius > 0.0 {
            self.corner_radius + CORNER_SAFETY_MARGIN
        } else {
            0.0
        }
    }

    /// Area available to slots: outer size minus walls and corner insets, clamped at 0.
    pub fn usable_area(&self) -> (f64, f64) {
        let inset = 2.0 * (self.wall_thickness + self.corner_inset());
        (
            (self.outer_width() - inset).max(0.0),
            (self.outer_length() - inset).max(0.0),
        )
    }

    /// Offset from the outer origin to the usable-area origin, per axis.
    pub fn slot_origin(&self) -> f64 {
        self.wall_thickness + self.corner_inset()
    }

    /// Create a fluent builder for `CaseConfig`.
    pub fn builder() -> CaseConfigBuilder {
        CaseConfigBuilder::new()
    }
}

/// Outer (width, length) of the finished case.
///
/// A fixed `case_size` wins; otherwise the layout extent grows by two walls and,
/// for rounded corners, two corner insets.
pub fn resolve_outer_footprint(extent: (f64, f64), config: &CaseConfig) -> (f64, f64) {
    if let Some(size) = config.case_size {
        return size;
    }
    let pad = 2.0 * config.slot_origin();
    (extent.0 + pad, extent.1 + pad)
}

/// Builder for `CaseConfig` for ergonomic construction.
#[derive(Debug, Default, Clone)]
pub struct CaseConfigBuilder {
    cfg: CaseConfig,
}

impl CaseConfigBuilder {
    pub fn new() -> Self {
        Self {
            cfg: CaseConfig::default(),
        }
    }
    pub fn max_footprint(mut self, w: f64, l: f64) -> Self {
        self.cfg.max_footprint = (w, l);
        self
    }
    pub fn case_size(mut self, v: Option<(f64, f64)>) -> Self {
        self.cfg.case_size = v;
        self
    }
    pub fn clearance(mut self, v: f64) -> Self {
        self.cfg.clearance = v;
        self
    }
    pub fn wall_thickness(mut self, v: f64) -> Self {
        self.cfg.wall_thickness = v;
        self
    }
    pub fn divider_thickness(mut self, v: f64) -> Self {
        self.cfg.divider_thickness = v;
        self
    }
    pub fn base_height(mut self, v: f64) -> Self {
        self.cfg.base_height = v;
        self
    }
    pub fn corner_radius(mut self, v: f64) -> Self {
        self.cfg.corner_radius = v;
        self
    }
    pub fn stackable(mut self, v: bool) -> Self {
        self.cfg.stackable = v;
        self
    }
    pub fn stack_lip_inner(mut self, v: f64) -> Self {
        self.cfg.stack_lip_inner = v;
        self
    }
    pub fn stack_lip_height(mut self, v: f64) -> Self {
        self.cfg.stack_lip_height = v;
        self
    }
    pub fn stack_clearance(mut self, v: f64) -> Self {
        self.cfg.stack_clearance = v;
        self
    }
    pub fn label_size(mut self, v: Option<(f64, f64)>) -> Self {
        self.cfg.label_size = v;
        self
    }
    pub fn label_direction(mut self, v: LabelDirection) -> Self {
        self.cfg.label_direction = v;
        self
    }
    pub fn label_text_size(mut self, v: f64) -> Self {
        self.cfg.label_text_size = v;
        self
    }
    pub fn label_text_depth(mut self, v: f64) -> Self {
        self.cfg.label_text_depth = v;
        self
    }
    pub fn build(self) -> CaseConfig {
        self.cfg
    }
}
