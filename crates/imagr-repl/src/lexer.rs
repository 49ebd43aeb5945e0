//! Shell-like splitting of a command line into words.
//!
//! Quotes group words and are removed; a backslash escapes the next character
//! outside single quotes. Unlike a real shell there is no expansion of any kind.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LexError {
  #[error("unterminated {0} quote")]
  UnterminatedQuote(&'static str),

  #[error("trailing backslash")]
  TrailingEscape,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
  None,
  Single,
  Double,
}

/// Split `input` into words.
///
/// ```rust
/// use imagr_repl::lexer::split_words;
///
/// let words = split_words("set-description --workflow alpha --desc 'Base install'").unwrap();
/// assert_eq!(words, vec!["set-description", "--workflow", "alpha", "--desc", "Base install"]);
/// ```
pub fn split_words(input: &str) -> Result<Vec<String>, LexError> {
  let mut words = Vec::new();
  let mut current = String::new();
  // Distinguishes `''` (an empty word) from no word at all.
  let mut in_word = false;
  let mut quote = Quote::None;
  let mut chars = input.chars();

  while let Some(c) = chars.next() {
    match (quote, c) {
      (Quote::Single, '\'') => quote = Quote::None,
      (Quote::Single, c) => current.push(c),
      (Quote::Double, '"') => quote = Quote::None,
      (Quote::Double, '\\') => match chars.next() {
        Some(next @ ('"' | '\\')) => current.push(next),
        Some(next) => {
          current.push('\\');
          current.push(next);
        }
        None => return Err(LexError::TrailingEscape),
      },
      (Quote::Double, c) => current.push(c),
      (Quote::None, '\'') => {
        quote = Quote::Single;
        in_word = true;
      }
      (Quote::None, '"') => {
        quote = Quote::Double;
        in_word = true;
      }
      (Quote::None, '\\') => match chars.next() {
        Some(next) => {
          current.push(next);
          in_word = true;
        }
        None => return Err(LexError::TrailingEscape),
      },
      (Quote::None, c) if c.is_whitespace() => {
        if in_word {
          words.push(std::mem::take(&mut current));
          in_word = false;
        }
      }
      (Quote::None, c) => {
        current.push(c);
        in_word = true;
      }
    }
  }

  match quote {
    Quote::Single => Err(LexError::UnterminatedQuote("single")),
    Quote::Double => Err(LexError::UnterminatedQuote("double")),
    Quote::None => {
      if in_word {
        words.push(current);
      }
      Ok(words)
    }
  }
}
