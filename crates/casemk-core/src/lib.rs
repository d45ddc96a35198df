//! Core library for generating 3D-printable divided storage cases.
//!
//! - Layout engines: uniform grid (`compute_grid_layout`) and first-fit row packing for mixed items (`compute_mixed_layout`)
//! - Assembly: `assemble_case` turns a layout into a [`geometry::Shape`] tree (tray, cavities, labels, stacking lip/foot)
//! - Output: `render_scad` / `write_scad` serialize the tree to OpenSCAD; `layout_to_json` exports the layout
//!
//! Quick example:
//! ```no_run
//! use casemk_core::prelude::*;
//! # fn main() -> casemk_core::Result<()> {
//! let cfg = CaseConfig::builder().max_footprint(350.0, 300.0).build();
//! let layout = compute_grid_layout((30.0, 20.0, 15.0), &cfg, Some(12))?;
//! let case = assemble_case(&layout, &cfg);
//! write_scad(&case, "case.scad")?;
//! println!("slots: {}", layout.slots.len());
//! # Ok(()) }
//! ```

pub mod assemble;
pub mod config;
pub mod error;
pub mod export;
pub mod geometry;
pub mod layout;
pub mod model;
pub mod parse;
pub mod scad;

pub use assemble::*;
pub use config::*;
pub use error::*;
pub use export::*;
pub use layout::*;
pub use model::*;
pub use parse::*;
pub use scad::*;

/// Convenience prelude for common types and functions.
/// Importing `casemk_core::prelude::*` brings the primary APIs into scope.
pub mod prelude {
    pub use crate::assemble::{CaseEnvelope, assemble_case, case_envelope, stack_offsets};
    pub use crate::config::{CaseConfig, CaseConfigBuilder, LabelDirection, resolve_outer_footprint};
    pub use crate::geometry::Shape;
    pub use crate::layout::{LayoutRequest, compute_grid_layout, compute_layout, compute_mixed_layout};
    pub use crate::model::{
        CaseLayout, GridLayout, Item, LayoutStats, MixedLayout, Rect, Slot, SlotLayout,
    };
    pub use crate::parse::{parse_dimensions, parse_footprint, parse_items};
    pub use crate::scad::{render_scad, write_scad};
    pub use crate::{CaseMkError, layout_to_json};
}
