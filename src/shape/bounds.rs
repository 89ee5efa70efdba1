/// Path Bounds
///
/// Control points are included, so the result may be larger than the
/// rendered curve but never smaller.

use super::types::{Edge, PathCommand, Point};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    fn at(p: Point) -> Self {
        Self { min_x: p.x, min_y: p.y, max_x: p.x, max_y: p.y }
    }

    fn include(&mut self, p: Point) {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

pub fn calculate_path_bounds(commands: &[PathCommand]) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for p in commands.iter().flat_map(PathCommand::points) {
        match bounds.as_mut() {
            Some(b) => b.include(p),
            None => bounds = Some(Bounds::at(p)),
        }
    }
    bounds
}

pub fn calculate_shape_bounds(edges: &[Edge]) -> Option<Bounds> {
    edges
        .iter()
        .filter_map(|edge| calculate_path_bounds(&edge.commands))
        .fold(None, |acc: Option<Bounds>, b| match acc {
            Some(a) => Some(a.union(&b)),
            None => Some(b),
        })
}
