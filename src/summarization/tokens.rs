use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use tokenizers::Tokenizer;

use crate::errors::SummarizationError;

static WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").expect("static regex is valid"));

/// Counts and truncates text in model tokens
///
/// The pretrained variant uses the model's own tokenizer. The whitespace
/// variant counts one token per whitespace-separated word, which
/// undercounts subword tokens and is only an approximation.
#[derive(Debug)]
pub enum TokenBudget {
    Pretrained(Box<Tokenizer>),
    Whitespace,
}

impl TokenBudget {
    /// Load a tokenizer.json, or fall back to whitespace counting when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, SummarizationError> {
        match path {
            Some(path) => {
                let tokenizer = Tokenizer::from_file(path).map_err(|e| {
                    SummarizationError::Tokenizer(format!("Cannot load tokenizer from {:?}: {}", path, e))
                })?;
                Ok(Self::Pretrained(Box::new(tokenizer)))
            }
            None => {
                warn!("No tokenizer configured, approximating tokens by whitespace-separated words");
                Ok(Self::Whitespace)
            }
        }
    }

    /// Byte spans of every token in the text
    fn spans(&self, text: &str) -> Result<Vec<(usize, usize)>, SummarizationError> {
        match self {
            Self::Pretrained(tokenizer) => {
                let encoding = tokenizer.encode(text, false)
                    .map_err(|e| SummarizationError::Tokenizer(e.to_string()))?;
                Ok(encoding.get_offsets().to_vec())
            }
            Self::Whitespace => Ok(WORD.find_iter(text).map(|m| (m.start(), m.end())).collect()),
        }
    }

    /// Number of tokens in the text
    pub fn count(&self, text: &str) -> Result<usize, SummarizationError> {
        Ok(self.spans(text)?.len())
    }

    /// Keep at most `max_tokens` tokens of the text
    ///
    /// Returns the kept prefix and the number of tokens dropped.
    pub fn truncate<'a>(&self, text: &'a str, max_tokens: usize) -> Result<(&'a str, usize), SummarizationError> {
        let spans = self.spans(text)?;
        if spans.len() <= max_tokens {
            return Ok((text, 0));
        }

        let dropped = spans.len() - max_tokens;
        let end = match max_tokens {
            0 => 0,
            n => spans[n - 1].1,
        };

        Ok((&text[..floor_char_boundary(text, end)], dropped))
    }
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
    let mut index = index.min(text.len());
    while !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}
