//! Response rendering
//!
//! Templates use positional placeholders only: `{}` takes the next argument,
//! `{N}` takes argument `N`, and `{{` / `}}` produce literal braces.

use thiserror::Error;

/// Errors raised while rendering a template
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("template needs {expected} argument(s), got {supplied}")]
    MissingArgument { expected: usize, supplied: usize },

    #[error("unmatched brace at position {position}")]
    UnmatchedBrace { position: usize },

    #[error("cannot mix automatic and explicit field numbering")]
    MixedNumbering,

    #[error("invalid placeholder '{{{0}}}'")]
    InvalidField(String),
}

/// Turns a stored template and invocation arguments into response text
pub trait ResponseRenderer: Send + Sync {
    fn render(&self, template: &str, args: &[String]) -> Result<String, RenderError>;
}

#[derive(Debug, Clone, PartialEq)]
enum Piece {
    Text(String),
    Arg(usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Numbering {
    Auto,
    Explicit,
}

/// Default renderer with positional substitution
///
/// Arguments beyond the highest placeholder are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct PositionalRenderer;

impl PositionalRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Number of arguments `template` needs
    pub fn required_arguments(template: &str) -> Result<usize, RenderError> {
        Ok(required(&parse(template)?))
    }
}

impl ResponseRenderer for PositionalRenderer {
    fn render(&self, template: &str, args: &[String]) -> Result<String, RenderError> {
        let pieces = parse(template)?;
        let expected = required(&pieces);
        if args.len() < expected {
            return Err(RenderError::MissingArgument {
                expected,
                supplied: args.len(),
            });
        }

        let mut out = String::with_capacity(template.len());
        for piece in &pieces {
            match piece {
                Piece::Text(text) => out.push_str(text),
                Piece::Arg(index) => out.push_str(&args[*index]),
            }
        }
        Ok(out)
    }
}

fn required(pieces: &[Piece]) -> usize {
    pieces
        .iter()
        .filter_map(|piece| match piece {
            Piece::Arg(index) => Some(index + 1),
            Piece::Text(_) => None,
        })
        .max()
        .unwrap_or(0)
}

fn parse(template: &str) -> Result<Vec<Piece>, RenderError> {
    let mut pieces = Vec::new();
    let mut text = String::new();
    let mut numbering: Option<Numbering> = None;
    let mut next_auto = 0usize;
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' if chars.peek().is_some_and(|(_, next)| *next == '{') => {
                chars.next();
                text.push('{');
            }
            '{' => {
                let mut field = String::new();
                let mut closed = false;
                for (_, c) in chars.by_ref() {
                    match c {
                        '}' => {
                            closed = true;
                            break;
                        }
                        '{' => return Err(RenderError::UnmatchedBrace { position }),
                        _ => field.push(c),
                    }
                }
                if !closed {
                    return Err(RenderError::UnmatchedBrace { position });
                }

                let index = if field.is_empty() {
                    if numbering == Some(Numbering::Explicit) {
                        return Err(RenderError::MixedNumbering);
                    }
                    numbering = Some(Numbering::Auto);
                    next_auto += 1;
                    next_auto - 1
                } else {
                    let index = field
                        .parse::<usize>()
                        .map_err(|_| RenderError::InvalidField(field.clone()))?;
                    if numbering == Some(Numbering::Auto) {
                        return Err(RenderError::MixedNumbering);
                    }
                    numbering = Some(Numbering::Explicit);
                    index
                };

                if !text.is_empty() {
                    pieces.push(Piece::Text(std::mem::take(&mut text)));
                }
                pieces.push(Piece::Arg(index));
            }
            '}' if chars.peek().is_some_and(|(_, next)| *next == '}') => {
                chars.next();
                text.push('}');
            }
            '}' => return Err(RenderError::UnmatchedBrace { position }),
            _ => text.push(c),
        }
    }

    if !text.is_empty() {
        pieces.push(Piece::Text(text));
    }
    Ok(pieces)
}
