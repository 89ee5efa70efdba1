/// Morph Shape Compatibility
///
/// Two edge sets can only be interpolated when they line up edge-for-edge
/// and command-for-command.

use super::types::Edge;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MorphValidation {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

pub fn validate_morph_shape(start_edges: &[Edge], end_edges: &[Edge]) -> MorphValidation {
    let mut errors = Vec::new();

    if start_edges.len() != end_edges.len() {
        errors.push(format!(
            "Edge count mismatch: start has {}, end has {}",
            start_edges.len(),
            end_edges.len()
        ));
    }

    for (edge_idx, (start, end)) in start_edges.iter().zip(end_edges).enumerate() {
        if start.commands.len() != end.commands.len() {
            errors.push(format!(
                "Edge {}: command count mismatch (start {}, end {})",
                edge_idx,
                start.commands.len(),
                end.commands.len()
            ));
        }
        for (cmd_idx, (a, b)) in start.commands.iter().zip(&end.commands).enumerate() {
            if a.kind() != b.kind() {
                errors.push(format!(
                    "Edge {}, command {}: type mismatch ({} vs {})",
                    edge_idx,
                    cmd_idx,
                    a.kind(),
                    b.kind()
                ));
            }
        }
    }

    MorphValidation {
        is_valid: errors.is_empty(),
        errors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::types::PathCommand;

    fn edge(cmds: Vec<PathCommand>) -> Edge {
        Edge::new(cmds)
    }

    #[test]
    fn test_matching_shapes_are_valid() {
        let a = vec![edge(vec![PathCommand::MoveTo { x: 0.0, y: 0.0 }, PathCommand::LineTo { x: 1.0, y: 1.0 }])];
        let b = vec![edge(vec![PathCommand::MoveTo { x: 5.0, y: 5.0 }, PathCommand::LineTo { x: 9.0, y: 2.0 }])];
        let result = validate_morph_shape(&a, &b);
        assert!(result.is_valid);
        assert!(result.errors.is_empty());
    }

    #[test]
    fn test_collects_every_mismatch() {
        let a = vec![
            edge(vec![PathCommand::MoveTo { x: 0.0, y: 0.0 }, PathCommand::LineTo { x: 1.0, y: 1.0 }]),
            edge(vec![PathCommand::MoveTo { x: 0.0, y: 0.0 }]),
        ];
        let b = vec![
            edge(vec![
                PathCommand::MoveTo { x: 0.0, y: 0.0 },
                PathCommand::QuadraticTo { cx: 0.0, cy: 1.0, x: 1.0, y: 1.0 },
                PathCommand::Close,
            ]),
            edge(vec![PathCommand::MoveTo { x: 0.0, y: 0.0 }]),
            edge(vec![]),
        ];
        let result = validate_morph_shape(&a, &b);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 3);
        assert_eq!(result.errors[0], "Edge count mismatch: start has 2, end has 3");
        assert_eq!(result.errors[1], "Edge 0: command count mismatch (start 2, end 3)");
        assert_eq!(
            result.errors[2],
            "Edge 0, command 1: type mismatch (lineTo vs quadraticCurveTo)"
        );
    }
}
