//! Pointer-driven line distortion
//!
//! `distort` is a pure function of the line, the pointer, and the parameters.
//! A line is either exactly flat or carries the full seven-point bulge;
//! nothing from an earlier pointer position survives into a new path.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::line::GridLine;
use super::model::AffectedWindow;
use super::profile::{BulgeProfile, CurveRole, KnotOffset};
use crate::consts::{DEFAULT_GAP, DEFAULT_MASS};

/// Pointer position in viewport coordinates, or absent when outside the surface
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PointerState {
    #[default]
    Absent,
    At(Vec2),
}

impl PointerState {
    pub fn at(x: f32, y: f32) -> Self {
        PointerState::At(Vec2::new(x, y))
    }

    pub fn position(&self) -> Option<Vec2> {
        match self {
            PointerState::Absent => None,
            PointerState::At(p) => Some(*p),
        }
    }

    pub fn is_present(&self) -> bool {
        matches!(self, PointerState::At(_))
    }
}

/// Influence radius, grid spacing, and bulge shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DistortionParams {
    pub mass: f32,
    pub gap: f32,
    pub profile: BulgeProfile,
}

impl Default for DistortionParams {
    fn default() -> Self {
        Self {
            mass: DEFAULT_MASS,
            gap: DEFAULT_GAP,
            profile: BulgeProfile::default(),
        }
    }
}

/// Signed distortion weight for a line at `position` with the pointer at `pointer`
///
/// Returns `None` outside the influence radius (the boundary itself included).
/// Inside, the magnitude is `mass - |position - pointer|` and the sign is such
/// that `-weight` points away from the pointer.
pub fn bulge_weight(position: f32, pointer: f32, mass: f32) -> Option<f32> {
    let delta = position - pointer;
    if !(delta.abs() < mass) {
        return None;
    }
    let side = if position > pointer { -1.0 } else { 1.0 };
    Some(side * mass + delta)
}

/// A labeled point on a line path
///
/// `control` is the quadratic control point of the segment ending at `at`;
/// `None` means the segment is straight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub role: CurveRole,
    pub at: Vec2,
    pub control: Option<Vec2>,
}

impl ControlPoint {
    fn straight(role: CurveRole, at: Vec2) -> Self {
        Self {
            role,
            at,
            control: None,
        }
    }
}

/// The drawable shape of one grid line
#[derive(Debug, Clone, PartialEq)]
pub struct LinePath {
    pub line: GridLine,
    pub points: Vec<ControlPoint>,
}

impl LinePath {
    /// Straight run across the full length
    pub fn flat(line: &GridLine) -> Self {
        Self {
            line: *line,
            points: vec![
                ControlPoint::straight(CurveRole::Start, line.start()),
                ControlPoint::straight(CurveRole::End, line.end()),
            ],
        }
    }

    pub fn is_deformed(&self) -> bool {
        self.points.len() > 2
    }

    pub fn point(&self, role: CurveRole) -> Option<&ControlPoint> {
        self.points.iter().find(|p| p.role == role)
    }
}

/// Path for `line` given the current pointer
pub fn distort(line: &GridLine, pointer: PointerState, params: &DistortionParams) -> LinePath {
    let Some(pos) = pointer.position() else {
        return LinePath::flat(line);
    };

    // m: pointer on the same axis as the line's fixed coordinate
    // n: pointer along the line's run
    let (m, n) = line.axis.split(pos);

    if !AffectedWindow::around(m, params.mass, params.gap).contains(line.index) {
        return LinePath::flat(line);
    }
    let Some(weight) = bulge_weight(line.position, m, params.mass) else {
        return LinePath::flat(line);
    };

    let place = |offset: KnotOffset| {
        line.axis
            .compose(line.position - weight * offset.lateral, n + offset.along)
    };

    let mut points = Vec::with_capacity(CurveRole::ORDER.len());
    points.push(ControlPoint::straight(CurveRole::Start, line.start()));
    points.push(ControlPoint::straight(
        CurveRole::PreArc,
        line.axis.compose(line.position, n - params.mass),
    ));
    for knot in params.profile.knots(params.mass, params.gap) {
        points.push(ControlPoint {
            role: knot.role,
            at: place(knot.to),
            control: Some(place(knot.control)),
        });
    }
    points.push(ControlPoint::straight(CurveRole::End, line.end()));

    LinePath { line: *line, points }
}
