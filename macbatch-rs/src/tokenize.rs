//! Macro line tokenizer.
//!
//! Splits one logical line into space-delimited tokens.  A token that starts
//! with `"` or `'` runs to the matching closing quote (inclusive), or to the
//! end of the line when the quote is never closed.  Quote characters are kept
//! and nothing is unescaped; the dispatcher forwards tokens verbatim.
//!
//! Only ASCII space is a delimiter.  Callers convert tabs beforehand.

/// Token delimiter.
pub const DELIMITER: u8 = b' ';

/// Split `line` into tokens, left to right.
///
/// Tokens borrow from `line`.  All delimiter and quote bytes are ASCII, so
/// every slice boundary falls on a UTF-8 character boundary.
pub fn tokenize(line: &str) -> Vec<&str> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut start = skip_delimiters(bytes, 0);

    while let Some(pos0) = start {
        let end = match bytes[pos0] {
            quote @ (b'"' | b'\'') => find_from(bytes, pos0 + 1, quote).map(|p| p + 1),
            _ => find_from(bytes, pos0, DELIMITER),
        };
        match end {
            Some(end) => {
                tokens.push(&line[pos0..end]);
                start = skip_delimiters(bytes, end);
            }
            None => {
                tokens.push(&line[pos0..]);
                break;
            }
        }
    }
    tokens
}

/// First index at or after `from` holding `needle`.
fn find_from(bytes: &[u8], from: usize, needle: u8) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b == needle)
        .map(|p| p + from)
}

/// First non-delimiter index at or after `from`.
fn skip_delimiters(bytes: &[u8], from: usize) -> Option<usize> {
    bytes
        .get(from..)?
        .iter()
        .position(|&b| b != DELIMITER)
        .map(|p| p + from)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
