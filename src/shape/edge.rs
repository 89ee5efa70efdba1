/// Edge Record Reader
///
/// Builds `Edge` values from a host-provided attribute lookup. The host owns
/// the document format; this side only asks for attributes by name.

use std::collections::HashMap;

use log::debug;

use super::decoder::{decode_with_options, decode_with_style_changes_and_options};
use super::options::DecoderOptions;
use super::types::*;

pub const ATTR_CUBICS: &str = "cubics";
pub const ATTR_EDGES: &str = "edges";
pub const ATTR_FILL_STYLE0: &str = "fillStyle0";
pub const ATTR_FILL_STYLE1: &str = "fillStyle1";
pub const ATTR_STROKE_STYLE: &str = "strokeStyle";

pub trait AttributeSource {
    fn get_attribute(&self, name: &str) -> Option<String>;
}

impl AttributeSource for HashMap<String, String> {
    fn get_attribute(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl AttributeSource for HashMap<&str, &str> {
    fn get_attribute(&self, name: &str) -> Option<String> {
        self.get(name).map(|v| v.to_string())
    }
}

impl<F> AttributeSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get_attribute(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// The `cubics` data when present and non-empty, else `edges`.
fn path_data(source: &dyn AttributeSource) -> Option<String> {
    source
        .get_attribute(ATTR_CUBICS)
        .filter(|s| !s.trim().is_empty())
        .or_else(|| source.get_attribute(ATTR_EDGES))
}

fn style_attribute(source: &dyn AttributeSource, name: &str) -> Option<u32> {
    source.get_attribute(name).and_then(|v| v.trim().parse::<u32>().ok())
}

fn styled_edge(source: &dyn AttributeSource, commands: Vec<PathCommand>) -> Edge {
    Edge::with_styles(
        commands,
        style_attribute(source, ATTR_FILL_STYLE0),
        style_attribute(source, ATTR_FILL_STYLE1),
        style_attribute(source, ATTR_STROKE_STYLE),
    )
}

pub fn parse_edge(source: &dyn AttributeSource) -> Edge {
    parse_edge_with_options(source, DecoderOptions::global())
}

pub fn parse_edge_with_options(source: &dyn AttributeSource, options: DecoderOptions) -> Edge {
    let commands = path_data(source)
        .map(|data| decode_with_options(&data, options))
        .unwrap_or_default();
    styled_edge(source, commands)
}

pub fn parse_edge_with_style_changes(source: &dyn AttributeSource) -> Vec<Edge> {
    parse_edge_with_style_changes_and_options(source, DecoderOptions::global())
}

pub fn parse_edge_with_style_changes_and_options(
    source: &dyn AttributeSource,
    options: DecoderOptions,
) -> Vec<Edge> {
    let decoded = path_data(source)
        .map(|data| decode_with_style_changes_and_options(&data, options))
        .unwrap_or_default();
    let base = styled_edge(source, Vec::new());

    if !options.split_on_style_change || decoded.style_changes.is_empty() {
        return vec![base.restyled(decoded.commands)];
    }

    let edges = split_at_style_changes(&base, &decoded.commands, &decoded.style_changes);
    if options.debug {
        debug!(
            "edge split: {} style changes produced {} edges",
            decoded.style_changes.len(),
            edges.len()
        );
    }
    edges
}

/// Cut `commands` at each change boundary. Each piece keeps the styles of the
/// previous piece except `fill_style1`, and starts with a move so it can be
/// drawn on its own.
pub fn split_at_style_changes(
    base: &Edge,
    commands: &[PathCommand],
    changes: &[StyleChange],
) -> Vec<Edge> {
    let mut edges = Vec::new();
    let mut current = base.clone();
    let mut segment_start = 0;

    for change in changes {
        let boundary = change.command_index.min(commands.len());
        if boundary > segment_start {
            edges.push(current.restyled(segment(commands, segment_start, boundary)));
            segment_start = boundary;
        }
        current.fill_style1 = Some(change.fill_style1);
    }
    if segment_start < commands.len() {
        edges.push(current.restyled(segment(commands, segment_start, commands.len())));
    }

    edges
}

fn segment(commands: &[PathCommand], from: usize, to: usize) -> Vec<PathCommand> {
    let piece = &commands[from..to];
    let mut out = Vec::with_capacity(piece.len() + 1);
    if from > 0 && !matches!(piece.first(), Some(PathCommand::MoveTo { .. })) {
        let start = match commands.first() {
            Some(PathCommand::MoveTo { x, y }) => Point::new(*x, *y),
            _ => Point::ORIGIN,
        };
        out.push(PathCommand::move_to(pen_after(&commands[..from], start)));
    }
    out.extend_from_slice(piece);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&'static str, &'static str)]) -> HashMap<&'static str, &'static str> {
        pairs.iter().cloned().collect()
    }

    #[test]
    fn test_parse_edge_reads_styles() {
        let source = attrs(&[
            ("edges", "!0 0|200 0"),
            ("fillStyle0", "1"),
            ("strokeStyle", "3"),
        ]);
        let edge = parse_edge_with_options(&source, DecoderOptions::default());
        assert_eq!(edge.commands.len(), 2);
        assert_eq!(edge.fill_style0, Some(1));
        assert_eq!(edge.fill_style1, None);
        assert_eq!(edge.stroke_style, Some(3));
    }

    #[test]
    fn test_cubics_preferred_over_edges() {
        let source = attrs(&[
            ("edges", "!0 0|200 0"),
            ("cubics", "!0 0(;0 100 100 100 100 0);"),
        ]);
        let edge = parse_edge_with_options(&source, DecoderOptions::default());
        assert_eq!(edge.commands[1].kind(), PathCommandKind::CubicTo);
    }

    #[test]
    fn test_empty_cubics_falls_back() {
        let source = attrs(&[("edges", "!0 0|200 0"), ("cubics", "  ")]);
        let edge = parse_edge_with_options(&source, DecoderOptions::default());
        assert_eq!(edge.commands[1], PathCommand::LineTo { x: 10.0, y: 0.0 });
    }

    #[test]
    fn test_missing_path_data() {
        let source = attrs(&[("fillStyle1", "x")]);
        let edge = parse_edge_with_options(&source, DecoderOptions::default());
        assert!(edge.commands.is_empty());
        assert_eq!(edge.fill_style1, None);
    }

    #[test]
    fn test_closure_source() {
        let source = |name: &str| match name {
            "edges" => Some("!0 0|200 0".to_string()),
            "fillStyle1" => Some("4".to_string()),
            _ => None,
        };
        let edge = parse_edge_with_options(&source, DecoderOptions::default());
        assert_eq!(edge.fill_style1, Some(4));
    }

    #[test]
    fn test_split_disabled_returns_single_edge() {
        let source = attrs(&[("edges", "!0 0|200 0S2|200 200"), ("fillStyle1", "1")]);
        let edges = parse_edge_with_style_changes_and_options(&source, DecoderOptions::default());
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].fill_style1, Some(1));
        assert_eq!(edges[0].commands.len(), 3);
    }

    #[test]
    fn test_split_on_style_change() {
        let source = attrs(&[
            ("edges", "!0 0|200 0S2|200 200"),
            ("fillStyle0", "5"),
            ("fillStyle1", "1"),
        ]);
        let options = DecoderOptions { split_on_style_change: true, ..Default::default() };
        let edges = parse_edge_with_style_changes_and_options(&source, options);
        assert_eq!(edges.len(), 2);

        assert_eq!(edges[0].fill_style1, Some(1));
        assert_eq!(
            edges[0].commands,
            vec![PathCommand::MoveTo { x: 0.0, y: 0.0 }, PathCommand::LineTo { x: 10.0, y: 0.0 }]
        );

        assert_eq!(edges[1].fill_style0, Some(5));
        assert_eq!(edges[1].fill_style1, Some(2));
        assert_eq!(
            edges[1].commands,
            vec![PathCommand::MoveTo { x: 10.0, y: 0.0 }, PathCommand::LineTo { x: 10.0, y: 10.0 }]
        );
    }

    #[test]
    fn test_split_change_at_start_skips_empty_piece() {
        let base = Edge::new(Vec::new());
        let commands = vec![
            PathCommand::MoveTo { x: 0.0, y: 0.0 },
            PathCommand::LineTo { x: 1.0, y: 0.0 },
        ];
        let changes = [StyleChange { command_index: 0, fill_style1: 7 }];
        let edges = split_at_style_changes(&base, &commands, &changes);
        assert_eq!(edges.len(), 1);
        assert_eq!(edges[0].fill_style1, Some(7));
        assert_eq!(edges[0].commands, commands);
    }
}
