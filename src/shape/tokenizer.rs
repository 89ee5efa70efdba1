/// Edge String Tokenizer
///
/// Splits an edge string into typed tokens. Whitespace is optional between a
/// command glyph and its operands, so `!0 0|300 0(;` and `! 0 0 | 300 0 (;`
/// produce the same stream.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    /// `!`
    MoveTo,
    /// `|`
    LineTo,
    /// `[`
    QuadTo,
    /// `(` followed by an anchor point
    CubicOpen,
    /// `)`
    CubicEnd,
    /// `;`
    Separator,
    /// `/`
    ClosePath,
    /// `q` / `Q`: legacy quadratic approximation inside a cubic block
    QuadHint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FusedGlyph {
    /// `(;`: cubic block without an anchor
    CubicOpenDirect,
    /// `);`: same meaning as `)`
    CubicEndTerminated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Number(&'a str),
    Command(Glyph),
    Fused(FusedGlyph),
    /// `S<digits>`
    Style(u32),
    Unknown(&'a str),
}

impl<'a> Token<'a> {
    pub fn is_number(&self) -> bool {
        matches!(self, Token::Number(_))
    }

    pub fn ends_cubic_block(&self) -> bool {
        matches!(
            self,
            Token::Command(Glyph::CubicEnd) | Token::Fused(FusedGlyph::CubicEndTerminated)
        )
    }
}

fn glyph_for(c: char) -> Option<Glyph> {
    match c {
        '!' => Some(Glyph::MoveTo),
        '|' => Some(Glyph::LineTo),
        '[' => Some(Glyph::QuadTo),
        '(' => Some(Glyph::CubicOpen),
        ')' => Some(Glyph::CubicEnd),
        ';' => Some(Glyph::Separator),
        '/' => Some(Glyph::ClosePath),
        // Only meaningful inside a cubic block; elsewhere it is skipped.
        'q' | 'Q' => Some(Glyph::QuadHint),
        _ => None,
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || c == ','
}

pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let bytes = text.as_bytes();
    let mut chars = text.char_indices().peekable();
    let mut literal_start: Option<usize> = None;

    while let Some((idx, c)) = chars.next() {
        if is_separator(c) {
            flush_literal(text, &mut literal_start, idx, &mut tokens);
            continue;
        }

        if c == 'S' {
            flush_literal(text, &mut literal_start, idx, &mut tokens);
            let digits_start = idx + 1;
            let mut digits_end = digits_start;
            while digits_end < bytes.len() && bytes[digits_end].is_ascii_digit() {
                digits_end += 1;
                chars.next();
            }
            let digits = &text[digits_start..digits_end];
            match digits.parse::<u32>() {
                Ok(value) => tokens.push(Token::Style(value)),
                Err(_) => tokens.push(Token::Unknown(&text[idx..digits_end])),
            }
            continue;
        }

        if let Some(glyph) = glyph_for(c) {
            flush_literal(text, &mut literal_start, idx, &mut tokens);
            let fused = match (glyph, chars.peek()) {
                (Glyph::CubicOpen, Some(&(_, ';'))) => Some(FusedGlyph::CubicOpenDirect),
                (Glyph::CubicEnd, Some(&(_, ';'))) => Some(FusedGlyph::CubicEndTerminated),
                _ => None,
            };
            match fused {
                Some(fused) => {
                    chars.next();
                    tokens.push(Token::Fused(fused));
                }
                None => tokens.push(Token::Command(glyph)),
            }
            continue;
        }

        if literal_start.is_none() {
            literal_start = Some(idx);
        }
    }
    flush_literal(text, &mut literal_start, text.len(), &mut tokens);

    tokens
}

fn flush_literal<'a>(
    text: &'a str,
    literal_start: &mut Option<usize>,
    end: usize,
    tokens: &mut Vec<Token<'a>>,
) {
    if let Some(start) = literal_start.take() {
        tokens.push(Token::Number(&text[start..end]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_splits_glyph_from_number() {
        assert_eq!(
            tokenize("0(;"),
            vec![Token::Number("0"), Token::Fused(FusedGlyph::CubicOpenDirect)]
        );
        assert_eq!(
            tokenize("300)"),
            vec![Token::Number("300"), Token::Command(Glyph::CubicEnd)]
        );
    }

    #[test]
    fn test_dense_edge_string() {
        let tokens = tokenize("!0 0|300 0[10 20 30 40/");
        assert_eq!(
            tokens,
            vec![
                Token::Command(Glyph::MoveTo),
                Token::Number("0"),
                Token::Number("0"),
                Token::Command(Glyph::LineTo),
                Token::Number("300"),
                Token::Number("0"),
                Token::Command(Glyph::QuadTo),
                Token::Number("10"),
                Token::Number("20"),
                Token::Number("30"),
                Token::Number("40"),
                Token::Command(Glyph::ClosePath),
            ]
        );
    }

    #[test]
    fn test_fused_close() {
        assert_eq!(
            tokenize(");"),
            vec![Token::Fused(FusedGlyph::CubicEndTerminated)]
        );
        assert_eq!(
            tokenize(") ;"),
            vec![Token::Command(Glyph::CubicEnd), Token::Command(Glyph::Separator)]
        );
    }

    #[test]
    fn test_commas_separate() {
        assert_eq!(
            tokenize("10,20"),
            vec![Token::Number("10"), Token::Number("20")]
        );
    }

    #[test]
    fn test_style_token() {
        assert_eq!(
            tokenize("!0 0S2|1 1"),
            vec![
                Token::Command(Glyph::MoveTo),
                Token::Number("0"),
                Token::Number("0"),
                Token::Style(2),
                Token::Command(Glyph::LineTo),
                Token::Number("1"),
                Token::Number("1"),
            ]
        );
        assert_eq!(tokenize("S"), vec![Token::Unknown("S")]);
    }

    #[test]
    fn test_hex_literals_and_hint() {
        assert_eq!(
            tokenize("#FFFF9C.8 #64q"),
            vec![
                Token::Number("#FFFF9C.8"),
                Token::Number("#64"),
                Token::Command(Glyph::QuadHint),
            ]
        );
    }
}
