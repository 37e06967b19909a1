//! Tokenizer: split markup into literal text and `[...]` directives.

/// One markup token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    /// Literal text with escapes already resolved.
    Text(String),
    /// The inside of a `[...]` directive.
    Directive(&'a str),
}

/// Split `input` into tokens.
///
/// `\[` produces a literal `[` and `\\` a literal backslash. Any other
/// backslash is kept as is. A `[` opens a directive only when it is not
/// escaped and a non-empty body follows, closed by a `]` that is not
/// itself preceded by a backslash. Otherwise the bracket is literal.
/// Empty text runs are never produced.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    let mut tokens = Vec::new();
    let mut text = String::new();
    let bytes = input.as_bytes();
    let mut i = 0;

    while i < input.len() {
        match bytes[i] {
            b'\\' if matches!(bytes.get(i + 1), Some(b'[' | b'\\')) => {
                text.push(char::from(bytes[i + 1]));
                i += 2;
            }
            b'[' => {
                if let Some(end) = directive_end(input, i) {
                    if !text.is_empty() {
                        tokens.push(Token::Text(std::mem::take(&mut text)));
                    }
                    tokens.push(Token::Directive(&input[i + 1..end]));
                    i = end + 1;
                } else {
                    text.push('[');
                    i += 1;
                }
            }
            _ => {
                // Copy the whole UTF-8 run up to the next special byte.
                let from = i + input[i..].chars().next().map_or(1, char::len_utf8);
                let next = input[from..]
                    .find(['\\', '['])
                    .map_or(input.len(), |offset| from + offset);
                text.push_str(&input[i..next]);
                i = next;
            }
        }
    }

    if !text.is_empty() {
        tokens.push(Token::Text(text));
    }
    tokens
}

/// Index of the `]` closing a directive opened at `start`.
fn directive_end(input: &str, start: usize) -> Option<usize> {
    let end = start + 1 + input[start + 1..].find(']')?;
    let body = &input[start + 1..end];
    (!body.is_empty() && !body.ends_with('\\')).then_some(end)
}
