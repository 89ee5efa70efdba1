/// Edge Command Assembler
///
/// Turns a token stream into path commands. Malformed input never fails the
/// call: a truncated command stops decoding, an invalid coordinate drops its
/// command, and unknown tokens are skipped.

use itertools::Itertools;
use log::{debug, info};

use super::coord::decode_coordinate;
use super::options::DecoderOptions;
use super::tokenizer::{tokenize, FusedGlyph, Glyph, Token};
use super::types::*;

const CUBIC_GROUP: usize = 6;
const QUAD_HINT_OPERANDS: usize = 4;

/// Outcome of reading a fixed number of coordinates.
enum Operands<const N: usize> {
    Valid([f64; N]),
    /// Coordinates were present but unusable; the command is dropped.
    Invalid,
    /// The stream ended first; nothing more can be decoded.
    Truncated,
}

struct Assembler<'t, 'a> {
    tokens: &'t [Token<'a>],
    pos: usize,
    options: DecoderOptions,
    track_styles: bool,
    commands: Vec<PathCommand>,
    style_changes: Vec<StyleChange>,
    pen: Option<Point>,
    subpath_start: Option<Point>,
    reopen_at: Option<Point>,
    aborted: bool,
}

impl<'t, 'a> Assembler<'t, 'a> {
    fn new(tokens: &'t [Token<'a>], options: DecoderOptions, track_styles: bool) -> Self {
        Self {
            tokens,
            pos: 0,
            options,
            track_styles,
            commands: Vec::new(),
            style_changes: Vec::new(),
            pen: None,
            subpath_start: None,
            reopen_at: None,
            aborted: false,
        }
    }

    fn run(mut self) -> DecodedPath {
        while !self.aborted && self.pos < self.tokens.len() {
            let token = self.tokens[self.pos];
            self.pos += 1;
            self.step(token);
        }
        self.finish()
    }

    fn step(&mut self, token: Token<'a>) {
        match token {
            Token::Command(Glyph::MoveTo) => self.move_to(),
            Token::Command(Glyph::LineTo) => self.line_to(),
            Token::Command(Glyph::QuadTo) => self.quad_to(),
            Token::Command(Glyph::CubicOpen) => self.cubic_block(true),
            Token::Fused(FusedGlyph::CubicOpenDirect) => self.cubic_block(false),
            Token::Command(Glyph::ClosePath) => self.close_path(),
            Token::Style(fill_style1) => {
                if self.track_styles {
                    self.style_changes.push(StyleChange {
                        command_index: self.commands.len(),
                        fill_style1,
                    });
                }
            }
            Token::Command(Glyph::CubicEnd)
            | Token::Fused(FusedGlyph::CubicEndTerminated)
            | Token::Command(Glyph::Separator)
            | Token::Command(Glyph::QuadHint)
            | Token::Number(_)
            | Token::Unknown(_) => {}
        }
    }

    // ========== Operand reading ==========

    fn read_operands<const N: usize>(&mut self) -> Operands<N> {
        let run = self.tokens[self.pos..]
            .iter()
            .take(N)
            .take_while(|t| t.is_number())
            .count();

        if run < N {
            if self.pos + run >= self.tokens.len() {
                self.pos = self.tokens.len();
                return Operands::Truncated;
            }
            // A glyph interrupted the operands: consume the numbers we saw and
            // let the glyph be handled by the main loop.
            self.pos += run;
            return Operands::Invalid;
        }

        let mut values = [0.0; N];
        let mut valid = true;
        for (slot, token) in values.iter_mut().zip(&self.tokens[self.pos..self.pos + N]) {
            match token {
                Token::Number(text) => match decode_coordinate(text) {
                    Some(v) => *slot = v,
                    None => valid = false,
                },
                _ => valid = false,
            }
        }
        self.pos += N;

        if valid {
            Operands::Valid(values)
        } else {
            Operands::Invalid
        }
    }

    fn numbers_ahead(&self, limit: usize) -> usize {
        self.tokens[self.pos..]
            .iter()
            .take(limit)
            .take_while(|t| t.is_number())
            .count()
    }

    fn abort(&mut self, what: &str) {
        if self.options.debug {
            debug!("edge decode: incomplete {}, stopping at token {}", what, self.pos);
        }
        self.aborted = true;
    }

    fn drop_command(&mut self, what: &str) {
        if self.options.debug {
            debug!("edge decode: dropped {} with invalid coordinates", what);
        }
    }

    // ========== Commands ==========

    fn move_to(&mut self) {
        let [x, y] = match self.read_operands::<2>() {
            Operands::Valid(v) => v,
            Operands::Invalid => return self.drop_command("moveTo"),
            Operands::Truncated => return self.abort("moveTo"),
        };
        let target = Point::new(x, y);
        self.reopen_at = None;

        if let (Some(pen), Some(_)) = (self.pen, self.subpath_start) {
            if pen.approx_eq(target, POINT_EPSILON) {
                // Continuation of the current subpath.
                return;
            }
        }

        self.commands.push(PathCommand::move_to(target));
        self.pen = Some(target);
        self.subpath_start = Some(target);
    }

    fn line_to(&mut self) {
        let [x, y] = match self.read_operands::<2>() {
            Operands::Valid(v) => v,
            Operands::Invalid => return self.drop_command("lineTo"),
            Operands::Truncated => return self.abort("lineTo"),
        };
        let target = Point::new(x, y);
        self.reopen_subpath();
        if self.current_pen().approx_eq(target, POINT_EPSILON) {
            return;
        }
        self.commands.push(PathCommand::line_to(target));
        self.pen = Some(target);
    }

    fn quad_to(&mut self) {
        let [cx, cy, x, y] = match self.read_operands::<4>() {
            Operands::Valid(v) => v,
            Operands::Invalid => return self.drop_command("quadraticCurveTo"),
            Operands::Truncated => return self.abort("quadraticCurveTo"),
        };
        let control = Point::new(cx, cy);
        let target = Point::new(x, y);
        self.reopen_subpath();
        if self.is_degenerate(&[control, target]) {
            return;
        }
        self.commands.push(PathCommand::quadratic_to(control, target));
        self.pen = Some(target);
    }

    fn cubic_block(&mut self, with_anchor: bool) {
        if with_anchor {
            match self.read_operands::<2>() {
                Operands::Truncated => return self.abort("cubic anchor"),
                Operands::Valid(_) | Operands::Invalid => {}
            }
            if let Some(Token::Command(Glyph::Separator)) = self.tokens.get(self.pos) {
                self.pos += 1;
            }
        }

        while let Some(&token) = self.tokens.get(self.pos) {
            match token {
                Token::Command(Glyph::QuadHint) => {
                    self.pos += 1;
                    self.pos += self.numbers_ahead(QUAD_HINT_OPERANDS);
                }
                Token::Command(Glyph::Separator) => self.pos += 1,
                t if t.ends_cubic_block() => {
                    self.pos += 1;
                    return;
                }
                Token::Number(_) if self.numbers_ahead(CUBIC_GROUP) == CUBIC_GROUP => {
                    match self.read_operands::<CUBIC_GROUP>() {
                        Operands::Valid(v) => self.cubic_to(v),
                        Operands::Invalid => self.drop_command("bezierCurveTo"),
                        Operands::Truncated => return,
                    }
                }
                _ => return,
            }
        }
    }

    fn cubic_to(&mut self, [c1x, c1y, c2x, c2y, x, y]: [f64; CUBIC_GROUP]) {
        let c1 = Point::new(c1x, c1y);
        let c2 = Point::new(c2x, c2y);
        let target = Point::new(x, y);
        self.reopen_subpath();
        if self.is_degenerate(&[c1, c2, target]) {
            return;
        }
        self.commands.push(PathCommand::cubic_to(c1, c2, target));
        self.pen = Some(target);
    }

    fn close_path(&mut self) {
        if let Some(start) = self.subpath_start.take() {
            self.commands.push(PathCommand::Close);
            self.pen = Some(start);
            if self.options.implicit_move_after_close {
                self.reopen_at = Some(start);
            }
        }
    }

    // ========== Pen state ==========

    fn current_pen(&self) -> Point {
        self.pen.unwrap_or(Point::ORIGIN)
    }

    /// A curve is degenerate when every point it carries sits on the pen.
    fn is_degenerate(&self, points: &[Point]) -> bool {
        let pen = self.current_pen();
        points.iter().all(|p| pen.approx_eq(*p, POINT_EPSILON))
    }

    fn reopen_subpath(&mut self) {
        if let Some(start) = self.reopen_at.take() {
            self.commands.push(PathCommand::move_to(start));
            self.pen = Some(start);
            self.subpath_start = Some(start);
        }
    }

    fn finish(mut self) -> DecodedPath {
        if let (false, Some(start), Some(pen)) = (self.aborted, self.subpath_start, self.pen) {
            let already_closed = matches!(self.commands.last(), Some(PathCommand::Close));
            if !already_closed && pen.distance(start) <= AUTO_CLOSE_EPSILON {
                self.commands.push(PathCommand::Close);
            }
        }

        if self.options.debug {
            log_summary(&self.commands, self.track_styles.then(|| self.style_changes.len()));
        }

        DecodedPath {
            commands: self.commands,
            style_changes: self.style_changes,
        }
    }
}

fn log_summary(commands: &[PathCommand], style_changes: Option<usize>) {
    let counts = commands.iter().map(PathCommand::kind).counts();
    let count = |kind: PathCommandKind| counts.get(&kind).copied().unwrap_or(0);
    let mut line = format!(
        "edge decode: {} commands ({}={}, {}={}, {}={}, {}={}, {}={})",
        commands.len(),
        PathCommandKind::MoveTo,
        count(PathCommandKind::MoveTo),
        PathCommandKind::LineTo,
        count(PathCommandKind::LineTo),
        PathCommandKind::QuadraticTo,
        count(PathCommandKind::QuadraticTo),
        PathCommandKind::CubicTo,
        count(PathCommandKind::CubicTo),
        PathCommandKind::Close,
        count(PathCommandKind::Close),
    );
    if let Some(n) = style_changes {
        line.push_str(&format!(", {} style changes", n));
    }
    info!("{}", line);
}

// ========== Public entry points ==========

pub fn decode(text: &str, debug: Option<bool>) -> Vec<PathCommand> {
    decode_with_options(text, DecoderOptions::global().with_debug_override(debug))
}

pub fn decode_with_options(text: &str, options: DecoderOptions) -> Vec<PathCommand> {
    let tokens = tokenize(text);
    Assembler::new(&tokens, options, false).run().commands
}

pub fn decode_with_style_changes(text: &str, debug: Option<bool>) -> DecodedPath {
    decode_with_style_changes_and_options(text, DecoderOptions::global().with_debug_override(debug))
}

pub fn decode_with_style_changes_and_options(text: &str, options: DecoderOptions) -> DecodedPath {
    let tokens = tokenize(text);
    Assembler::new(&tokens, options, true).run()
}
