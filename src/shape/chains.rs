/// Boundary Reconstruction
///
/// Authored edges arrive as disconnected fragments. Chains are grown greedily
/// from the first unused fragment by attaching whichever unused fragment
/// starts (or, reversed, ends) nearest to the chain's end.

use bitvec::prelude::*;
use log::debug;

use super::types::*;
use super::winding::reverse;

struct Fragment {
    start: Point,
    end: Point,
    closed: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Attach {
    Forward,
    Reversed,
}

struct Chain {
    commands: Vec<PathCommand>,
    start: Point,
    end: Point,
}

impl Chain {
    fn append(&mut self, commands: &[PathCommand], end: Point) {
        let body = match commands.first() {
            Some(PathCommand::MoveTo { .. }) => &commands[1..],
            _ => commands,
        };
        self.commands.extend_from_slice(body);
        self.end = end;
    }

    fn close_loop(&mut self, epsilon: f64) -> bool {
        let has_drawing = self.commands.iter().any(PathCommand::is_drawing);
        let closed = matches!(self.commands.last(), Some(PathCommand::Close));
        if has_drawing && !closed && self.end.distance(self.start) <= epsilon {
            self.commands.push(PathCommand::Close);
            self.end = self.start;
            return true;
        }
        false
    }
}

fn find_continuation(
    end: Point,
    fragments: &[Option<Fragment>],
    used: &BitSlice,
    epsilon: f64,
) -> Option<(usize, Attach)> {
    let mut best: Option<(usize, Attach, f64)> = None;

    for (idx, fragment) in fragments.iter().enumerate() {
        let fragment = match fragment {
            Some(f) if !used[idx] && !f.closed => f,
            _ => continue,
        };
        let forward = end.distance(fragment.start);
        let backward = end.distance(fragment.end);
        let candidate = if forward <= backward {
            (Attach::Forward, forward)
        } else {
            (Attach::Reversed, backward)
        };
        if candidate.1 > epsilon {
            continue;
        }
        if best.map_or(true, |(_, _, d)| candidate.1 < d) {
            best = Some((idx, candidate.0, candidate.1));
        }
    }

    best.map(|(idx, attach, _)| (idx, attach))
}

/// Join fragments whose endpoints meet within `epsilon` into continuous
/// chains. Each chain keeps the styles of the fragment it grew from.
pub fn connect_broken_chains(edges: &[Edge], epsilon: f64) -> Vec<Edge> {
    if edges.len() < 2 {
        return edges.to_vec();
    }

    let fragments: Vec<Option<Fragment>> = edges
        .iter()
        .map(|edge| {
            path_endpoints(&edge.commands).map(|(start, end)| Fragment {
                start,
                end,
                closed: edge.is_closed(),
            })
        })
        .collect();
    let mut used = bitvec![0; edges.len()];
    let mut output = Vec::new();

    for seed in 0..edges.len() {
        if used[seed] {
            continue;
        }
        used.set(seed, true);

        let fragment = match &fragments[seed] {
            Some(f) => f,
            None => {
                output.push(edges[seed].clone());
                continue;
            }
        };

        let mut chain = Chain {
            commands: edges[seed].commands.clone(),
            start: fragment.start,
            end: fragment.end,
        };
        let mut joined = 1;

        if !fragment.closed {
            while let Some((idx, attach)) = find_continuation(chain.end, &fragments, &used, epsilon) {
                used.set(idx, true);
                joined += 1;
                let next = match &fragments[idx] {
                    Some(f) => f,
                    None => continue,
                };
                match attach {
                    Attach::Forward => chain.append(&edges[idx].commands, next.end),
                    Attach::Reversed => chain.append(&reverse(&edges[idx].commands), next.start),
                }
            }
            chain.close_loop(epsilon);
        }

        if joined > 1 {
            debug!("chain from edge {}: joined {} fragments", seed, joined);
        }
        output.push(edges[seed].restyled(chain.commands));
    }

    output
}

/// Insert `Close` at the end of every subpath that returns to its start
/// within `epsilon` and is not already closed.
pub fn auto_close_paths(commands: &[PathCommand], epsilon: f64) -> Vec<PathCommand> {
    let mut out = Vec::with_capacity(commands.len() + 1);
    let mut start: Option<Point> = None;
    let mut pen = Point::ORIGIN;
    let mut drawn = false;
    let mut closed = false;

    let finish = |out: &mut Vec<PathCommand>, start: Option<Point>, pen: Point, drawn: bool, closed: bool| {
        if let Some(start) = start {
            if drawn && !closed && pen.distance(start) <= epsilon {
                out.push(PathCommand::Close);
            }
        }
    };

    for cmd in commands {
        match *cmd {
            PathCommand::MoveTo { x, y } => {
                finish(&mut out, start, pen, drawn, closed);
                pen = Point::new(x, y);
                start = Some(pen);
                drawn = false;
                closed = false;
            }
            PathCommand::Close => {
                closed = true;
                if let Some(s) = start {
                    pen = s;
                }
            }
            other => {
                if let Some(p) = other.end_point() {
                    pen = p;
                }
                drawn = true;
            }
        }
        out.push(*cmd);
    }
    finish(&mut out, start, pen, drawn, closed);

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(x0: f64, y0: f64, x1: f64, y1: f64) -> Edge {
        Edge::new(vec![
            PathCommand::MoveTo { x: x0, y: y0 },
            PathCommand::LineTo { x: x1, y: y1 },
        ])
    }

    #[test]
    fn test_singleton_passes_through() {
        let edges = vec![line(0.0, 0.0, 5.0, 5.0)];
        assert_eq!(connect_broken_chains(&edges, 0.5), edges);
    }

    #[test]
    fn test_joins_square_from_fragments() {
        let mut first = line(0.0, 0.0, 10.0, 0.0);
        first.fill_style0 = Some(3);
        let edges = vec![
            first,
            line(10.0, 10.0, 0.0, 10.0),
            line(10.0, 0.0, 10.0, 10.0),
            // Authored backwards: joins reversed.
            line(0.0, 0.0, 0.0, 10.0),
        ];
        let chains = connect_broken_chains(&edges, 0.5);
        assert_eq!(chains.len(), 1);
        assert_eq!(chains[0].fill_style0, Some(3));
        assert_eq!(
            chains[0].commands,
            vec![
                PathCommand::MoveTo { x: 0.0, y: 0.0 },
                PathCommand::LineTo { x: 10.0, y: 0.0 },
                PathCommand::LineTo { x: 10.0, y: 10.0 },
                PathCommand::LineTo { x: 0.0, y: 10.0 },
                PathCommand::LineTo { x: 0.0, y: 0.0 },
                PathCommand::Close,
            ]
        );
    }

    #[test]
    fn test_tolerant_match_prefers_nearest() {
        let edges = vec![
            line(0.0, 0.0, 10.0, 0.0),
            line(10.4, 0.0, 20.0, 0.0),
            line(10.1, 0.0, 10.0, 30.0),
        ];
        let chains = connect_broken_chains(&edges, 0.5);
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0].commands.last(), Some(&PathCommand::LineTo { x: 10.0, y: 30.0 }));
        assert_eq!(chains[1], edges[1]);
    }

    #[test]
    fn test_disconnected_fragments_stay_apart() {
        let edges = vec![line(0.0, 0.0, 1.0, 0.0), line(50.0, 50.0, 60.0, 50.0)];
        assert_eq!(connect_broken_chains(&edges, 0.5), edges);
    }

    #[test]
    fn test_closed_fragment_not_extended() {
        let closed = Edge::new(vec![
            PathCommand::MoveTo { x: 0.0, y: 0.0 },
            PathCommand::LineTo { x: 10.0, y: 0.0 },
            PathCommand::LineTo { x: 10.0, y: 10.0 },
            PathCommand::Close,
        ]);
        let edges = vec![closed.clone(), line(0.0, 0.0, -5.0, 0.0)];
        let chains = connect_broken_chains(&edges, 0.5);
        assert_eq!(chains.len(), 2);
        assert_eq!(chains[0], closed);
    }

    #[test]
    fn test_auto_close_paths() {
        let cmds = vec![
            PathCommand::MoveTo { x: 0.0, y: 0.0 },
            PathCommand::LineTo { x: 10.0, y: 0.0 },
            PathCommand::LineTo { x: 0.2, y: 0.0 },
            PathCommand::MoveTo { x: 50.0, y: 50.0 },
            PathCommand::LineTo { x: 60.0, y: 50.0 },
        ];
        let closed = auto_close_paths(&cmds, 0.5);
        assert_eq!(closed.len(), 6);
        assert_eq!(closed[3], PathCommand::Close);
        assert_eq!(closed[4], PathCommand::MoveTo { x: 50.0, y: 50.0 });
        assert_eq!(auto_close_paths(&closed, 0.5), closed);
    }

    #[test]
    fn test_auto_close_skips_bare_move() {
        let cmds = vec![PathCommand::MoveTo { x: 1.0, y: 1.0 }];
        assert_eq!(auto_close_paths(&cmds, 0.5), cmds);
    }
}
