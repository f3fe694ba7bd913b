//! Warp grid core
//!
//! Pure and platform-independent, like a simulation step:
//! - `line`: viewport and immutable line descriptors
//! - `model`: line set rebuilt on resize, pointer influence window
//! - `profile`: named control-point layout of the bulge
//! - `distort`: line + pointer → structured path
//! - `warp`: event-driven state machine producing frames

pub mod distort;
pub mod line;
pub mod model;
pub mod profile;
pub mod warp;

pub use distort::{ControlPoint, DistortionParams, LinePath, PointerState, bulge_weight, distort};
pub use line::{Axis, GridLine, Viewport};
pub use model::{AffectedWindow, GridModel, line_count};
pub use profile::{ArcKnot, BulgeProfile, CurveRole, KnotOffset};
pub use warp::{Frame, WarpEvent, WarpGrid};
