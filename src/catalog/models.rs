//! Supported-model list embedded in distribution scripts.
//!
//! BootCamp distributions declare the Macs they support in their
//! installation-check JavaScript:
//!
//! ```text
//! var models = ['MacBookPro9,1','MacBookPro9,2',];
//! ```
//!
//! We do not interpret JavaScript. The first line mentioning `var models`
//! is located and the array literal assigned there is tokenized: single or
//! double quoted strings, commas, an optional trailing comma and an optional
//! semicolon. Anything else inside the brackets is an error.

use crate::utils::error::ModelListError;
use log::{debug, warn};
use std::iter::Peekable;
use std::str::CharIndices;

/// Marker of the declaration we look for
pub const MODELS_MARKER: &str = "var models";

/// Extract the supported models declared in a distribution script.
///
/// A script without a `var models` line yields an empty list: such a
/// package is treated as supporting no Mac at all.
pub fn extract_supported_models(script: &str) -> Result<Vec<String>, ModelListError> {
    match find_declaration(script) {
        Some(offset) => {
            let models = parse_models_declaration(&script[offset..])?;
            debug!("Distribution declares {} supported models", models.len());
            Ok(models)
        }
        None => {
            warn!(
                "Distribution script has no '{}' declaration; assuming no supported models",
                MODELS_MARKER
            );
            Ok(Vec::new())
        }
    }
}

/// Byte offset of the marker on the first line containing it
fn find_declaration(script: &str) -> Option<usize> {
    let mut line_start = 0;
    for line in script.split('\n') {
        if let Some(pos) = line.find(MODELS_MARKER) {
            return Some(line_start + pos);
        }
        line_start += line.len() + 1;
    }
    None
}

/// Parse `var models = [ ... ];` starting exactly at the marker.
///
/// The literal may span several lines; text after the closing bracket
/// (and optional semicolon) is ignored.
pub fn parse_models_declaration(input: &str) -> Result<Vec<String>, ModelListError> {
    let rest = input.strip_prefix(MODELS_MARKER).ok_or(ModelListError::UnexpectedEnd(
        "'var models' declaration",
    ))?;

    let mut tokens = Tokenizer::new(rest, MODELS_MARKER.len());
    tokens.expect('=', "'='")?;
    tokens.expect('[', "'['")?;

    let mut models = Vec::new();
    loop {
        tokens.skip_whitespace();
        match tokens.peek() {
            Some((_, ']')) => {
                tokens.bump();
                break;
            }
            Some((_, '\'' | '"')) => {
                models.push(tokens.string()?);
                tokens.skip_whitespace();
                match tokens.bump() {
                    Some((_, ',')) => continue,
                    Some((_, ']')) => break,
                    Some((offset, found)) => {
                        return Err(ModelListError::UnexpectedToken {
                            offset,
                            expected: "',' or ']'",
                            found,
                        })
                    }
                    None => return Err(ModelListError::UnexpectedEnd("',' or ']'")),
                }
            }
            Some((offset, found)) => {
                return Err(ModelListError::UnexpectedToken {
                    offset,
                    expected: "quoted model or ']'",
                    found,
                })
            }
            None => return Err(ModelListError::UnexpectedEnd("quoted model or ']'")),
        }
    }

    Ok(models)
}

struct Tokenizer<'a> {
    chars: Peekable<CharIndices<'a>>,
    base: usize,
}

impl<'a> Tokenizer<'a> {
    fn new(input: &'a str, base: usize) -> Self {
        Self {
            chars: input.char_indices().peekable(),
            base,
        }
    }

    fn peek(&mut self) -> Option<(usize, char)> {
        let base = self.base;
        self.chars.peek().map(|&(i, c)| (base + i, c))
    }

    fn bump(&mut self) -> Option<(usize, char)> {
        let base = self.base;
        self.chars.next().map(|(i, c)| (base + i, c))
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.chars.peek(), Some((_, c)) if c.is_whitespace()) {
            self.chars.next();
        }
    }

    fn expect(&mut self, wanted: char, expected: &'static str) -> Result<(), ModelListError> {
        self.skip_whitespace();
        match self.bump() {
            Some((_, c)) if c == wanted => Ok(()),
            Some((offset, found)) => Err(ModelListError::UnexpectedToken {
                offset,
                expected,
                found,
            }),
            None => Err(ModelListError::UnexpectedEnd(expected)),
        }
    }

    /// Read a quoted string; the opening quote is the next character
    fn string(&mut self) -> Result<String, ModelListError> {
        let (start, quote) = self
            .bump()
            .ok_or(ModelListError::UnexpectedEnd("quoted model"))?;
        let mut value = String::new();

        loop {
            match self.bump() {
                Some((_, c)) if c == quote => return Ok(value),
                Some((_, '\\')) => match self.bump() {
                    Some((_, 'n')) => value.push('\n'),
                    Some((_, 't')) => value.push('\t'),
                    Some((_, escaped)) => value.push(escaped),
                    None => return Err(ModelListError::UnterminatedString(start)),
                },
                Some((_, '\n')) | None => return Err(ModelListError::UnterminatedString(start)),
                Some((_, c)) => value.push(c),
            }
        }
    }
}
