/// Edge Path Data Types

use std::fmt;

// ========== Units and Tolerances ==========

/// Native source units per pixel (TWIPS).
pub const TWIPS_PER_PIXEL: f64 = 20.0;

/// Largest accepted coordinate magnitude, in TWIPS.
pub const MAX_COORD_TWIPS: f64 = 4_000_000.0;

/// Largest accepted coordinate magnitude, in pixels.
pub const MAX_COORD: f64 = MAX_COORD_TWIPS / TWIPS_PER_PIXEL;

/// Two points closer than this (in pixels) are the same point.
pub const POINT_EPSILON: f64 = 0.05;

/// A decoded subpath whose pen ends this close to its start gets a `Close`.
pub const AUTO_CLOSE_EPSILON: f64 = 0.5;

/// Join tolerance used by the repair pipeline.
pub const DEFAULT_CHAIN_EPSILON: f64 = 0.5;

/// Coordinates are compared at 1/QUANTIZE_SCALE pixel resolution.
pub const QUANTIZE_SCALE: f64 = 100.0;

// ========== Points ==========

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn approx_eq(&self, other: Point, epsilon: f64) -> bool {
        self.distance(other) < epsilon
    }

    pub fn lerp(&self, other: Point, t: f64) -> Point {
        Point::new(self.x + (other.x - self.x) * t, self.y + (other.y - self.y) * t)
    }
}

pub fn quantize(value: f64) -> i64 {
    (value * QUANTIZE_SCALE).round() as i64
}

// ========== Path Commands ==========

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
    QuadraticTo { cx: f64, cy: f64, x: f64, y: f64 },
    CubicTo { c1x: f64, c1y: f64, c2x: f64, c2y: f64, x: f64, y: f64 },
    Close,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathCommandKind {
    MoveTo,
    LineTo,
    QuadraticTo,
    CubicTo,
    Close,
}

impl fmt::Display for PathCommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PathCommandKind::MoveTo => "moveTo",
            PathCommandKind::LineTo => "lineTo",
            PathCommandKind::QuadraticTo => "quadraticCurveTo",
            PathCommandKind::CubicTo => "bezierCurveTo",
            PathCommandKind::Close => "closePath",
        };
        f.write_str(name)
    }
}

impl PathCommand {
    pub fn move_to(p: Point) -> Self {
        PathCommand::MoveTo { x: p.x, y: p.y }
    }

    pub fn line_to(p: Point) -> Self {
        PathCommand::LineTo { x: p.x, y: p.y }
    }

    pub fn quadratic_to(c: Point, p: Point) -> Self {
        PathCommand::QuadraticTo { cx: c.x, cy: c.y, x: p.x, y: p.y }
    }

    pub fn cubic_to(c1: Point, c2: Point, p: Point) -> Self {
        PathCommand::CubicTo { c1x: c1.x, c1y: c1.y, c2x: c2.x, c2y: c2.y, x: p.x, y: p.y }
    }

    pub fn kind(&self) -> PathCommandKind {
        match self {
            PathCommand::MoveTo { .. } => PathCommandKind::MoveTo,
            PathCommand::LineTo { .. } => PathCommandKind::LineTo,
            PathCommand::QuadraticTo { .. } => PathCommandKind::QuadraticTo,
            PathCommand::CubicTo { .. } => PathCommandKind::CubicTo,
            PathCommand::Close => PathCommandKind::Close,
        }
    }

    /// Where the pen rests after this command. `None` for `Close`, whose
    /// target depends on the enclosing subpath.
    pub fn end_point(&self) -> Option<Point> {
        match *self {
            PathCommand::MoveTo { x, y }
            | PathCommand::LineTo { x, y }
            | PathCommand::QuadraticTo { x, y, .. }
            | PathCommand::CubicTo { x, y, .. } => Some(Point::new(x, y)),
            PathCommand::Close => None,
        }
    }

    /// Every coordinate the command carries, control points first.
    pub fn points(&self) -> Vec<Point> {
        match *self {
            PathCommand::MoveTo { x, y } | PathCommand::LineTo { x, y } => vec![Point::new(x, y)],
            PathCommand::QuadraticTo { cx, cy, x, y } => {
                vec![Point::new(cx, cy), Point::new(x, y)]
            }
            PathCommand::CubicTo { c1x, c1y, c2x, c2y, x, y } => vec![
                Point::new(c1x, c1y),
                Point::new(c2x, c2y),
                Point::new(x, y),
            ],
            PathCommand::Close => Vec::new(),
        }
    }

    pub fn is_drawing(&self) -> bool {
        matches!(
            self,
            PathCommand::LineTo { .. } | PathCommand::QuadraticTo { .. } | PathCommand::CubicTo { .. }
        )
    }

    pub fn quantized(&self) -> QuantizedCommand {
        let coords = self
            .points()
            .iter()
            .flat_map(|p| vec![quantize(p.x), quantize(p.y)])
            .collect();
        QuantizedCommand { kind: self.kind(), coords }
    }
}

/// Hashable, tolerance-free form of a command used for identity checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QuantizedCommand {
    pub kind: PathCommandKind,
    pub coords: Vec<i64>,
}

pub fn quantize_commands(commands: &[PathCommand]) -> Vec<QuantizedCommand> {
    commands.iter().map(PathCommand::quantized).collect()
}

/// First point of a command sequence (a leading move, or the origin the first
/// drawing command implicitly starts from) and the final pen position.
pub fn path_endpoints(commands: &[PathCommand]) -> Option<(Point, Point)> {
    if !commands.iter().any(|cmd| cmd.end_point().is_some()) {
        return None;
    }
    let start = match commands.first() {
        Some(PathCommand::MoveTo { x, y }) => Point::new(*x, *y),
        _ => Point::ORIGIN,
    };
    Some((start, pen_after(commands, start)))
}

/// Pen position after replaying `commands` from `origin`.
pub fn pen_after(commands: &[PathCommand], origin: Point) -> Point {
    let mut pen = origin;
    let mut subpath_start = origin;
    for cmd in commands {
        match cmd {
            PathCommand::MoveTo { x, y } => {
                pen = Point::new(*x, *y);
                subpath_start = pen;
            }
            PathCommand::Close => pen = subpath_start,
            other => {
                if let Some(p) = other.end_point() {
                    pen = p;
                }
            }
        }
    }
    pen
}

// ========== Edges ==========

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Edge {
    pub commands: Vec<PathCommand>,
    pub fill_style0: Option<u32>,
    pub fill_style1: Option<u32>,
    pub stroke_style: Option<u32>,
}

impl Edge {
    pub fn new(commands: Vec<PathCommand>) -> Self {
        Self {
            commands,
            fill_style0: None,
            fill_style1: None,
            stroke_style: None,
        }
    }

    pub fn with_styles(
        commands: Vec<PathCommand>,
        fill_style0: Option<u32>,
        fill_style1: Option<u32>,
        stroke_style: Option<u32>,
    ) -> Self {
        Self { commands, fill_style0, fill_style1, stroke_style }
    }

    /// Same styles, different geometry.
    pub fn restyled(&self, commands: Vec<PathCommand>) -> Self {
        Self {
            commands,
            fill_style0: self.fill_style0,
            fill_style1: self.fill_style1,
            stroke_style: self.stroke_style,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self.commands.last(), Some(PathCommand::Close))
    }
}

/// Inline `S<n>` marker: from `command_index` on, the right-side fill is `fill_style1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleChange {
    pub command_index: usize,
    pub fill_style1: u32,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedPath {
    pub commands: Vec<PathCommand>,
    pub style_changes: Vec<StyleChange>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Shape {
    pub edges: Vec<Edge>,
}

impl Shape {
    pub fn new(edges: Vec<Edge>) -> Self {
        Self { edges }
    }
}
