//! Style document scanner: a YAML-subset tokenizer built on logos.
//!
//! Produces the token stream the style parser's state machine consumes. The
//! supported subset is what style sheets use: block mappings nested by
//! indentation, single-line flow mappings (`{ key: value, ... }`), plain and
//! quoted scalars, and `#` comments. Sequences, anchors, tags, block scalars
//! and document markers are rejected.
//!
//! Plain values in block context run to the end of the line, so
//! `background_colour: 1, 0, 0, 1` yields the single scalar `"1, 0, 0, 1"`.
//! Inside a flow mapping, commas separate entries and such values must be quoted.

use logos::Logos;

/// Errors from scanning a style document. Lines are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScanError {
    #[error("line {line}: tabs are not allowed in indentation")]
    TabIndent { line: usize },
    #[error("line {line}: indentation does not match any enclosing mapping")]
    BadIndent { line: usize },
    #[error("line {line}: expected `key: value`")]
    MissingColon { line: usize },
    #[error("line {line}: unterminated quoted scalar")]
    UnterminatedQuote { line: usize },
    #[error("line {line}: flow mapping is not closed on the same line")]
    UnterminatedFlow { line: usize },
    #[error("line {line}: unexpected `{found}` in flow mapping")]
    UnexpectedToken { line: usize, found: String },
    #[error("line {line}: {construct} are not supported in style documents")]
    Unsupported {
        line: usize,
        construct: &'static str,
    },
}

/// Tokens handed to the style parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocToken {
    StreamStart,
    StreamEnd,
    /// A block or flow mapping begins.
    MappingStart,
    /// The innermost open mapping ends.
    MappingEnd,
    /// The next scalar is a key.
    Key,
    /// The next scalar (or mapping) is a value.
    Value,
    Scalar(String),
}

/// In-line lexemes. Whitespace between lexemes is skipped.
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
#[logos(skip r"[ \t]+")]
enum Lexeme {
    #[token("{")]
    FlowOpen,

    #[token("}")]
    FlowClose,

    #[token(",")]
    Comma,

    #[token(":")]
    Colon,

    #[regex(r#""([^"\\]|\\.)*""#)]
    DoubleQuoted,

    #[regex(r"'([^']|'')*'")]
    SingleQuoted,

    /// Plain scalar; may contain inner spaces, trailing ones are trimmed.
    #[regex(r#"[^ \t{},:'"][^{},:]*"#)]
    Plain,
}

/// Scan a whole document into tokens.
///
/// Nothing is returned unless the entire document scans cleanly.
pub fn scan(source: &str) -> Result<Vec<DocToken>, ScanError> {
    let mut tokens = vec![DocToken::StreamStart];
    let mut indents: Vec<usize> = Vec::new();
    let mut expect_nested = false;

    for (index, raw) in source.lines().enumerate() {
        let line = index + 1;
        let text = strip_comment(raw, line)?;
        if text.trim().is_empty() {
            continue;
        }

        let indent = text.len() - text.trim_start().len();
        if text[..indent].contains('\t') {
            return Err(ScanError::TabIndent { line });
        }
        let content = text.trim();
        reject_unsupported(content, line)?;

        let mut closed = false;
        while indents.last().is_some_and(|&top| indent < top) {
            indents.pop();
            tokens.push(DocToken::MappingEnd);
            closed = true;
        }

        match indents.last() {
            Some(&top) if top == indent => {}
            Some(_) if closed || !expect_nested => return Err(ScanError::BadIndent { line }),
            None if closed => return Err(ScanError::BadIndent { line }),
            _ => {
                tokens.push(DocToken::MappingStart);
                indents.push(indent);
            }
        }

        let (key, rest) = split_entry(content, line)?;
        tokens.push(DocToken::Key);
        tokens.push(DocToken::Scalar(key));
        tokens.push(DocToken::Value);

        expect_nested = rest.is_empty();
        if rest.starts_with('{') {
            scan_flow(rest, line, &mut tokens)?;
        } else if !rest.is_empty() {
            tokens.push(DocToken::Scalar(unquote(rest, line)?));
        }
    }

    for _ in indents.drain(..) {
        tokens.push(DocToken::MappingEnd);
    }
    tokens.push(DocToken::StreamEnd);
    Ok(tokens)
}

/// Cut a trailing `#` comment. A `#` only starts a comment at the start of the
/// line or after whitespace, and never inside quotes.
fn strip_comment(raw: &str, line: usize) -> Result<&str, ScanError> {
    let mut quote: Option<char> = None;
    let mut prev_blank = true;
    let mut escaped = false;

    for (at, c) in raw.char_indices() {
        match quote {
            Some('"') if escaped => escaped = false,
            Some('"') if c == '\\' => escaped = true,
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '#' && prev_blank => return Ok(&raw[..at]),
            None if (c == '"' || c == '\'') && prev_blank_or_indicator(raw, at) => quote = Some(c),
            None => {}
        }
        prev_blank = c.is_whitespace();
    }

    if quote.is_some() {
        return Err(ScanError::UnterminatedQuote { line });
    }
    Ok(raw)
}

/// Quotes only open a scalar at its start: after whitespace or an indicator.
fn prev_blank_or_indicator(raw: &str, at: usize) -> bool {
    raw[..at]
        .chars()
        .next_back()
        .map_or(true, |p| p.is_whitespace() || matches!(p, ':' | '{' | ','))
}

fn reject_unsupported(content: &str, line: usize) -> Result<(), ScanError> {
    let construct = if content.starts_with("---") || content.starts_with("...") {
        "document markers"
    } else if content == "-" || content.starts_with("- ") {
        "sequences"
    } else if content.starts_with('[') {
        "flow sequences"
    } else if content.starts_with('&') || content.starts_with('*') {
        "anchors and aliases"
    } else if content.starts_with('!') {
        "tags"
    } else if content.starts_with('?') {
        "complex keys"
    } else {
        return Ok(());
    };
    Err(ScanError::Unsupported { line, construct })
}

/// Split `key: rest` at the key's colon. `rest` is trimmed and may be empty.
fn split_entry(content: &str, line: usize) -> Result<(String, &str), ScanError> {
    let mut lexer = Lexeme::lexer(content);

    let key = match lexer.next() {
        Some(Ok(lexeme @ (Lexeme::Plain | Lexeme::DoubleQuoted | Lexeme::SingleQuoted))) => {
            scalar_text(lexeme, lexer.slice(), line)?
        }
        _ => return Err(ScanError::MissingColon { line }),
    };

    match lexer.next() {
        Some(Ok(Lexeme::Colon)) => Ok((key, content[lexer.span().end..].trim())),
        _ => Err(ScanError::MissingColon { line }),
    }
}

/// Emit the tokens of a single-line flow mapping starting at `text`.
fn scan_flow(text: &str, line: usize, tokens: &mut Vec<DocToken>) -> Result<(), ScanError> {
    let mut lexer = Lexeme::lexer(text);
    let mut depth = 0usize;
    let mut awaiting_key = true;

    while let Some(result) = lexer.next() {
        let lexeme = result.map_err(|_| ScanError::UnexpectedToken {
            line,
            found: lexer.slice().to_owned(),
        })?;

        match lexeme {
            Lexeme::FlowOpen => {
                if depth > 0 && awaiting_key {
                    return Err(unexpected(line, lexer.slice()));
                }
                depth += 1;
                awaiting_key = true;
                tokens.push(DocToken::MappingStart);
            }
            Lexeme::FlowClose => {
                if depth == 0 {
                    return Err(unexpected(line, lexer.slice()));
                }
                depth -= 1;
                awaiting_key = false;
                tokens.push(DocToken::MappingEnd);
                if depth == 0 {
                    let trailing = lexer.remainder().trim();
                    if !trailing.is_empty() {
                        return Err(unexpected(line, trailing));
                    }
                    return Ok(());
                }
            }
            Lexeme::Comma => awaiting_key = true,
            Lexeme::Colon => {
                if !awaiting_key {
                    return Err(unexpected(line, lexer.slice()));
                }
                awaiting_key = false;
                tokens.push(DocToken::Value);
            }
            Lexeme::Plain | Lexeme::DoubleQuoted | Lexeme::SingleQuoted => {
                if depth == 0 {
                    return Err(unexpected(line, lexer.slice()));
                }
                if awaiting_key {
                    tokens.push(DocToken::Key);
                }
                tokens.push(DocToken::Scalar(scalar_text(lexeme, lexer.slice(), line)?));
            }
        }
    }

    Err(ScanError::UnterminatedFlow { line })
}

fn unexpected(line: usize, found: &str) -> ScanError {
    ScanError::UnexpectedToken {
        line,
        found: found.to_owned(),
    }
}

fn scalar_text(lexeme: Lexeme, slice: &str, line: usize) -> Result<String, ScanError> {
    match lexeme {
        Lexeme::Plain => Ok(slice.trim_end().to_owned()),
        _ => unquote(slice, line),
    }
}

/// Resolve a scalar as written: quoted scalars are unescaped, plain ones kept.
fn unquote(text: &str, line: usize) -> Result<String, ScanError> {
    let text = text.trim();
    if let Some(inner) = text.strip_prefix('\'') {
        let inner = inner
            .strip_suffix('\'')
            .ok_or(ScanError::UnterminatedQuote { line })?;
        return Ok(inner.replace("''", "'"));
    }
    if let Some(inner) = text.strip_prefix('"') {
        let inner = inner
            .strip_suffix('"')
            .ok_or(ScanError::UnterminatedQuote { line })?;
        let mut out = String::with_capacity(inner.len());
        let mut chars = inner.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some(other) => out.push(other),
                None => return Err(ScanError::UnterminatedQuote { line }),
            }
        }
        return Ok(out);
    }
    Ok(text.to_owned())
}
