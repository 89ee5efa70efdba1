/// Winding Analysis
///
/// Signed area via the Shoelace formula in screen space (Y down), so a
/// positive area means the outline runs clockwise on screen.

use itertools::Itertools;

use super::types::*;

const QUADRATIC_STEPS: usize = 4;
const CUBIC_STEPS: usize = 8;

fn quadratic_point(p0: Point, c: Point, p1: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    Point::new(
        mt * mt * p0.x + 2.0 * mt * t * c.x + t * t * p1.x,
        mt * mt * p0.y + 2.0 * mt * t * c.y + t * t * p1.y,
    )
}

fn cubic_point(p0: Point, c1: Point, c2: Point, p1: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let a = mt * mt * mt;
    let b = 3.0 * mt * mt * t;
    let c = 3.0 * mt * t * t;
    let d = t * t * t;
    Point::new(
        a * p0.x + b * c1.x + c * c2.x + d * p1.x,
        a * p0.y + b * c1.y + c * c2.y + d * p1.y,
    )
}

/// Flatten each subpath into a closed polygon ring.
fn polygon_rings(commands: &[PathCommand]) -> Vec<Vec<Point>> {
    let mut rings = Vec::new();
    let mut ring: Vec<Point> = Vec::new();
    let mut pen = Point::ORIGIN;
    let mut start = Point::ORIGIN;

    for cmd in commands {
        match *cmd {
            PathCommand::MoveTo { x, y } => {
                if ring.len() > 1 {
                    rings.push(std::mem::take(&mut ring));
                }
                ring.clear();
                pen = Point::new(x, y);
                start = pen;
                ring.push(pen);
            }
            PathCommand::LineTo { x, y } => {
                if ring.is_empty() {
                    ring.push(pen);
                }
                pen = Point::new(x, y);
                ring.push(pen);
            }
            PathCommand::QuadraticTo { cx, cy, x, y } => {
                if ring.is_empty() {
                    ring.push(pen);
                }
                let control = Point::new(cx, cy);
                let end = Point::new(x, y);
                for step in 1..=QUADRATIC_STEPS {
                    let t = step as f64 / QUADRATIC_STEPS as f64;
                    ring.push(quadratic_point(pen, control, end, t));
                }
                pen = end;
            }
            PathCommand::CubicTo { c1x, c1y, c2x, c2y, x, y } => {
                if ring.is_empty() {
                    ring.push(pen);
                }
                let c1 = Point::new(c1x, c1y);
                let c2 = Point::new(c2x, c2y);
                let end = Point::new(x, y);
                for step in 1..=CUBIC_STEPS {
                    let t = step as f64 / CUBIC_STEPS as f64;
                    ring.push(cubic_point(pen, c1, c2, end, t));
                }
                pen = end;
            }
            PathCommand::Close => {
                if ring.len() > 1 {
                    rings.push(std::mem::take(&mut ring));
                }
                ring.clear();
                pen = start;
            }
        }
    }
    if ring.len() > 1 {
        rings.push(ring);
    }

    rings
}

/// Signed area of the outline; subpaths are implicitly closed.
pub fn area(commands: &[PathCommand]) -> f64 {
    let twice_area: f64 = polygon_rings(commands)
        .iter()
        .map(|ring| {
            ring.iter()
                .chain(ring.first())
                .tuple_windows()
                .map(|(a, b)| a.x * b.y - b.x * a.y)
                .sum::<f64>()
        })
        .sum();
    twice_area / 2.0
}

pub fn is_clockwise(commands: &[PathCommand]) -> bool {
    area(commands) > 0.0
}

// ========== Reversal ==========

struct Subpath {
    start: Point,
    segments: Vec<PathCommand>,
    closed: bool,
}

fn split_subpaths(commands: &[PathCommand]) -> Vec<Subpath> {
    let mut subpaths: Vec<Subpath> = Vec::new();
    let mut current: Option<Subpath> = None;
    let mut last_start = Point::ORIGIN;

    for cmd in commands {
        match *cmd {
            PathCommand::MoveTo { x, y } => {
                subpaths.extend(current.take());
                last_start = Point::new(x, y);
                current = Some(Subpath { start: last_start, segments: Vec::new(), closed: false });
            }
            PathCommand::Close => {
                let mut sub = current
                    .take()
                    .unwrap_or(Subpath { start: last_start, segments: Vec::new(), closed: false });
                sub.closed = true;
                subpaths.push(sub);
            }
            segment => current
                .get_or_insert_with(|| Subpath { start: last_start, segments: Vec::new(), closed: false })
                .segments
                .push(segment),
        }
    }
    subpaths.extend(current);

    subpaths
}

fn reverse_subpath(sub: &Subpath, out: &mut Vec<PathCommand>) {
    // Point each segment starts from, in forward order.
    let mut froms = Vec::with_capacity(sub.segments.len());
    let mut pen = sub.start;
    for seg in &sub.segments {
        froms.push(pen);
        if let Some(p) = seg.end_point() {
            pen = p;
        }
    }

    out.push(PathCommand::move_to(pen));
    for (seg, from) in sub.segments.iter().zip(froms).rev() {
        let reversed = match *seg {
            PathCommand::LineTo { .. } => PathCommand::line_to(from),
            PathCommand::QuadraticTo { cx, cy, .. } => {
                PathCommand::quadratic_to(Point::new(cx, cy), from)
            }
            PathCommand::CubicTo { c1x, c1y, c2x, c2y, .. } => {
                PathCommand::cubic_to(Point::new(c2x, c2y), Point::new(c1x, c1y), from)
            }
            PathCommand::MoveTo { .. } | PathCommand::Close => continue,
        };
        out.push(reversed);
    }
    if sub.closed {
        out.push(PathCommand::Close);
    }
}

/// Reverse drawing direction. Subpath order is reversed too, and a subpath
/// that ended in `Close` still ends in `Close`.
pub fn reverse(commands: &[PathCommand]) -> Vec<PathCommand> {
    let mut out = Vec::with_capacity(commands.len() + 1);
    for sub in split_subpaths(commands).iter().rev() {
        reverse_subpath(sub, &mut out);
    }
    out
}

// ========== Fill sides ==========

/// Normalize edges that carry fills on both sides so they wind clockwise,
/// swapping the fills to keep each one on the same geometric side.
pub fn correct_fill_sides(edges: &[Edge]) -> Vec<Edge> {
    edges
        .iter()
        .map(|edge| match (edge.fill_style0, edge.fill_style1) {
            (Some(left), Some(right)) if area(&edge.commands) < 0.0 => Edge::with_styles(
                reverse(&edge.commands),
                Some(right),
                Some(left),
                edge.stroke_style,
            ),
            _ => edge.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square_cw() -> Vec<PathCommand> {
        vec![
            PathCommand::MoveTo { x: 0.0, y: 0.0 },
            PathCommand::LineTo { x: 10.0, y: 0.0 },
            PathCommand::LineTo { x: 10.0, y: 10.0 },
            PathCommand::LineTo { x: 0.0, y: 10.0 },
            PathCommand::Close,
        ]
    }

    #[test]
    fn test_area_of_square() {
        assert_eq!(area(&square_cw()), 100.0);
        assert!(is_clockwise(&square_cw()));
    }

    #[test]
    fn test_area_without_close_is_same() {
        let mut open = square_cw();
        open.pop();
        assert_eq!(area(&open), 100.0);
    }

    #[test]
    fn test_reverse_square() {
        let reversed = reverse(&square_cw());
        assert_eq!(
            reversed,
            vec![
                PathCommand::MoveTo { x: 0.0, y: 10.0 },
                PathCommand::LineTo { x: 10.0, y: 10.0 },
                PathCommand::LineTo { x: 10.0, y: 0.0 },
                PathCommand::LineTo { x: 0.0, y: 0.0 },
                PathCommand::Close,
            ]
        );
        assert_eq!(area(&reversed), -100.0);
        assert!(!is_clockwise(&reversed));
    }

    #[test]
    fn test_reverse_twice_is_identity() {
        let cmds = vec![
            PathCommand::MoveTo { x: 0.0, y: 0.0 },
            PathCommand::CubicTo { c1x: 1.0, c1y: 5.0, c2x: 4.0, c2y: 5.0, x: 5.0, y: 0.0 },
            PathCommand::QuadraticTo { cx: 7.0, cy: -3.0, x: 9.0, y: 0.0 },
            PathCommand::LineTo { x: 9.0, y: 9.0 },
            PathCommand::Close,
            PathCommand::MoveTo { x: 20.0, y: 20.0 },
            PathCommand::LineTo { x: 30.0, y: 20.0 },
        ];
        assert_eq!(reverse(&reverse(&cmds)), cmds);
    }

    #[test]
    fn test_reverse_swaps_cubic_controls() {
        let cmds = vec![
            PathCommand::MoveTo { x: 0.0, y: 0.0 },
            PathCommand::CubicTo { c1x: 1.0, c1y: 2.0, c2x: 3.0, c2y: 4.0, x: 5.0, y: 6.0 },
        ];
        assert_eq!(
            reverse(&cmds),
            vec![
                PathCommand::MoveTo { x: 5.0, y: 6.0 },
                PathCommand::CubicTo { c1x: 3.0, c1y: 4.0, c2x: 1.0, c2y: 2.0, x: 0.0, y: 0.0 },
            ]
        );
    }

    #[test]
    fn test_curved_area_flips_with_reverse() {
        let cmds = vec![
            PathCommand::MoveTo { x: 0.0, y: 0.0 },
            PathCommand::CubicTo { c1x: 0.0, c1y: -10.0, c2x: 10.0, c2y: -10.0, x: 10.0, y: 0.0 },
            PathCommand::QuadraticTo { cx: 5.0, cy: 10.0, x: 0.0, y: 0.0 },
        ];
        let a = area(&cmds);
        assert!(a != 0.0);
        assert_eq!(is_clockwise(&reverse(&cmds)), !is_clockwise(&cmds));
        assert!((area(&reverse(&cmds)) + a).abs() < 1e-9);
    }

    #[test]
    fn test_correct_fill_sides() {
        let ccw = Edge::with_styles(reverse(&square_cw()), Some(1), Some(2), Some(9));
        let cw = Edge::with_styles(square_cw(), Some(1), Some(2), None);
        let one_sided = Edge::with_styles(reverse(&square_cw()), Some(1), None, None);

        let fixed = correct_fill_sides(&[ccw, cw.clone(), one_sided.clone()]);
        assert_eq!(fixed[0].fill_style0, Some(2));
        assert_eq!(fixed[0].fill_style1, Some(1));
        assert_eq!(fixed[0].stroke_style, Some(9));
        assert!(area(&fixed[0].commands) > 0.0);
        assert_eq!(fixed[1], cw);
        assert_eq!(fixed[2], one_sided);
    }
}
