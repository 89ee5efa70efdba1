/// Shape Repair Pipeline
///
/// dedup -> fill-side normalization -> chain reconstruction -> auto-close ->
/// dedup.
/// Every stage returns fresh edges, and running the whole pipeline on its own
/// output changes nothing.

use fxhash::FxHashMap;
use log::debug;

use super::chains::{auto_close_paths, connect_broken_chains};
use super::types::*;
use super::winding::correct_fill_sides;

/// Merge edges whose quantized commands are identical. The first occurrence
/// wins; style fields it leaves undefined are filled from later duplicates.
pub fn remove_duplicate_edges(edges: &[Edge]) -> Vec<Edge> {
    let mut index: FxHashMap<Vec<QuantizedCommand>, usize> = FxHashMap::default();
    let mut unique: Vec<Edge> = Vec::with_capacity(edges.len());

    for edge in edges {
        let key = quantize_commands(&edge.commands);
        match index.get(&key) {
            Some(&existing) => {
                let kept = &mut unique[existing];
                kept.fill_style0 = kept.fill_style0.or(edge.fill_style0);
                kept.fill_style1 = kept.fill_style1.or(edge.fill_style1);
                kept.stroke_style = kept.stroke_style.or(edge.stroke_style);
            }
            None => {
                index.insert(key, unique.len());
                unique.push(edge.clone());
            }
        }
    }

    if unique.len() < edges.len() {
        debug!("shape repair: merged {} duplicate edges", edges.len() - unique.len());
    }
    unique
}

pub fn fix_shape(shape: &Shape) -> Shape {
    fix_shape_with_epsilon(shape, DEFAULT_CHAIN_EPSILON)
}

pub fn fix_shape_with_epsilon(shape: &Shape, epsilon: f64) -> Shape {
    let unique = remove_duplicate_edges(&shape.edges);
    let oriented = correct_fill_sides(&unique);
    let chains = connect_broken_chains(&oriented, epsilon);
    // Joined chains can wind differently from their fragments.
    let chains = correct_fill_sides(&chains);

    let edges: Vec<Edge> = chains
        .iter()
        .map(|edge| edge.restyled(auto_close_paths(&edge.commands, epsilon)))
        .collect();
    // Reorienting and closing can turn distinct edges into copies.
    Shape::new(remove_duplicate_edges(&edges))
}

/// Equality at quantization resolution, for comparing repaired shapes.
pub fn shapes_equivalent(a: &Shape, b: &Shape) -> bool {
    a.edges.len() == b.edges.len()
        && a.edges.iter().zip(&b.edges).all(|(x, y)| {
            x.fill_style0 == y.fill_style0
                && x.fill_style1 == y.fill_style1
                && x.stroke_style == y.stroke_style
                && quantize_commands(&x.commands) == quantize_commands(&y.commands)
        })
}
