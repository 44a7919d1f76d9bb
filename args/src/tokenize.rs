//! Raw command-line tokenizer.
//!
//! Converts a raw, unparsed command-line string into an ordered sequence
//! of tagged value lists in a single left-to-right scan with no
//! backtracking. The scan works on a char vector so every reported
//! position is a char offset usable by [`context`](crate::context).
//!
//! Grammar handled here:
//!
//! - Tags are `-x` or `--word`: one leading ASCII letter, then ASCII
//!   letters or digits, terminated by whitespace, `=`, or end of input.
//! - Values are comma-delimited; each segment is trimmed and empty
//!   segments are dropped.
//! - `"`, `'`, and `` ` `` open a quoted region closed by the same
//!   character; commas and hyphens inside are literal.
//! - A `-` inside a value region opens a new tag only when immediately
//!   preceded by whitespace, which keeps negative numbers and hyphenated
//!   words usable as `=`-bound values.

use std::collections::HashSet;

use crate::error::TokenizeError;

/// One tag with its values and the char offset of its leading `-`.
///
/// Produced by [`tokenize`], consumed once by the binder, then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawToken {
    /// Key text without the `-`/`--` prefix.
    pub key: String,
    /// Trimmed, non-empty value segments in source order.
    pub values: Vec<String>,
    /// Char offset of the tag's leading `-` in the raw line.
    pub position: usize,
}

/// Scans a raw command line into tokens.
///
/// Leading text up to the first tag is treated as the invoked program
/// path and skipped. A tag starts at a `-` that sits at the very start
/// of the line or immediately after whitespace.
///
/// # Examples
///
/// ```
/// use hashwalk_args::tokenize;
///
/// let tokens = tokenize("hashwalk -i=a,b,c -s").unwrap();
/// assert_eq!(tokens.len(), 2);
/// assert_eq!(tokens[0].key, "i");
/// assert_eq!(tokens[0].values, ["a", "b", "c"]);
/// assert_eq!(tokens[1].key, "s");
/// assert!(tokens[1].values.is_empty());
/// ```
pub fn tokenize(line: &str) -> Result<Vec<RawToken>, TokenizeError> {
    let chars: Vec<char> = line.chars().collect();
    let mut tokens = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    let mut i = 0;
    while i < chars.len() {
        if is_tag_start(&chars, i) {
            i = scan_tag(&chars, i, &mut tokens, &mut seen)?;
        } else {
            i += 1;
        }
    }

    tracing::debug!(tokens = tokens.len(), "tokenized command line");
    Ok(tokens)
}

/// A `-` opens a tag at the start of the line or right after whitespace.
fn is_tag_start(chars: &[char], i: usize) -> bool {
    chars[i] == '-' && (i == 0 || chars[i - 1].is_whitespace())
}

/// Scans one tag plus its value list starting at the leading `-`.
/// Returns the index the outer scan resumes from.
fn scan_tag(
    chars: &[char],
    start: usize,
    tokens: &mut Vec<RawToken>,
    seen: &mut HashSet<String>,
) -> Result<usize, TokenizeError> {
    let mut i = start + 1;
    if i < chars.len() && chars[i] == '-' {
        i += 1;
    }
    if i >= chars.len() {
        return Err(TokenizeError::DanglingDash { position: start });
    }
    if !chars[i].is_ascii_alphabetic() {
        return Err(TokenizeError::MalformedTag {
            found: chars[i],
            position: i,
        });
    }

    let key_start = i;
    while i < chars.len() && chars[i].is_ascii_alphanumeric() {
        i += 1;
    }
    if i < chars.len() && chars[i] != '=' && !chars[i].is_whitespace() {
        return Err(TokenizeError::MalformedTag {
            found: chars[i],
            position: i,
        });
    }

    let key: String = chars[key_start..i].iter().collect();
    if !seen.insert(key.clone()) {
        return Err(TokenizeError::DuplicateTag {
            key,
            position: start,
        });
    }

    let mut values = Vec::new();
    if i < chars.len() {
        // Values begin immediately after the single terminator char.
        i = scan_values(chars, i + 1, &mut values)?;
    }

    tokens.push(RawToken {
        key,
        values,
        position: start,
    });
    Ok(i)
}

/// Collects the comma-delimited value list starting at `start`, stopping
/// at the next tag boundary or end of input. Returns the stop index.
fn scan_values(
    chars: &[char],
    start: usize,
    values: &mut Vec<String>,
) -> Result<usize, TokenizeError> {
    let mut segment = String::new();
    let mut i = start;

    while i < chars.len() {
        let c = chars[i];
        if c == '-' && i > 0 && chars[i - 1].is_whitespace() {
            break;
        }
        match c {
            '"' | '\'' | '`' => {
                let open = i;
                i += 1;
                loop {
                    match chars.get(i) {
                        None => return Err(TokenizeError::UnterminatedQuote { position: open }),
                        Some(&q) if q == c => break,
                        Some(&other) => {
                            segment.push(other);
                            i += 1;
                        }
                    }
                }
                i += 1;
            }
            ',' => {
                push_segment(values, &mut segment);
                i += 1;
            }
            _ => {
                segment.push(c);
                i += 1;
            }
        }
    }

    push_segment(values, &mut segment);
    Ok(i)
}

/// Trims a finished segment and keeps it unless empty.
fn push_segment(values: &mut Vec<String>, segment: &mut String) {
    let trimmed = segment.trim();
    if !trimmed.is_empty() {
        values.push(trimmed.to_string());
    }
    segment.clear();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skips_program_name() {
        let tokens = tokenize("/usr/local/bin/my-tool -v").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].key, "v");
    }

    #[test]
    fn test_hyphen_inside_program_path_does_not_open_a_tag() {
        let tokens = tokenize("my-tool").unwrap();
        assert!(tokens.is_empty());
    }

    #[test]
    fn test_equals_bound_comma_list() {
        let tokens = tokenize("-i=a,b,c").unwrap();
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].key, "i");
        assert_eq!(tokens[0].values, ["a", "b", "c"]);
    }

    #[test]
    fn test_whitespace_bound_values() {
        let tokens = tokenize("-i a, b ,c").unwrap();
        assert_eq!(tokens[0].values, ["a", "b", "c"]);
    }

    #[test]
    fn test_flag_then_quoted_list() {
        let tokens = tokenize(r#"-s -i="folder one","folder two""#).unwrap();
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].key, "s");
        assert!(tokens[0].values.is_empty());
        assert_eq!(tokens[1].key, "i");
        assert_eq!(tokens[1].values, ["folder one", "folder two"]);
    }

    #[test]
    fn test_all_three_quote_characters() {
        let tokens = tokenize("-i='a b',`c d`,\"e f\"").unwrap();
        assert_eq!(tokens[0].values, ["a b", "c d", "e f"]);
    }

    #[test]
    fn test_quoted_commas_and_hyphens_are_literal() {
        let tokens = tokenize("-i=\"a,b -c\"").unwrap();
        assert_eq!(tokens[0].values, ["a,b -c"]);
    }

    #[test]
    fn test_embedded_hyphen_is_part_of_the_value() {
        let tokens = tokenize("-i=some-folder,-5").unwrap();
        assert_eq!(tokens[0].values, ["some-folder", "-5"]);
    }

    #[test]
    fn test_long_tag_with_equals() {
        let tokens = tokenize("--input=x").unwrap();
        assert_eq!(tokens[0].key, "input");
        assert_eq!(tokens[0].values, ["x"]);
    }

    #[test]
    fn test_empty_segments_are_dropped() {
        let tokens = tokenize("-i=a,,b,  ,").unwrap();
        assert_eq!(tokens[0].values, ["a", "b"]);
    }

    #[test]
    fn test_position_is_the_leading_dash() {
        let tokens = tokenize("tool -a=1 --bee=2").unwrap();
        assert_eq!(tokens[0].position, 5);
        assert_eq!(tokens[1].position, 10);
    }

    #[test]
    fn test_duplicate_tag_is_fatal() {
        let err = tokenize("-i=a -i=b").unwrap_err();
        assert_eq!(
            err,
            TokenizeError::DuplicateTag {
                key: "i".to_string(),
                position: 5,
            }
        );
    }

    #[test]
    fn test_short_and_long_forms_are_distinct_to_the_tokenizer() {
        // Key text differs, so this passes tokenizing; the binder catches it.
        let tokens = tokenize("-i=a --input=b").unwrap();
        assert_eq!(tokens.len(), 2);
    }

    #[test]
    fn test_tag_must_start_with_a_letter() {
        let err = tokenize("-9").unwrap_err();
        assert_eq!(
            err,
            TokenizeError::MalformedTag {
                found: '9',
                position: 1,
            }
        );
    }

    #[test]
    fn test_tag_body_rejects_punctuation() {
        let err = tokenize("--in.put=x").unwrap_err();
        assert_eq!(
            err,
            TokenizeError::MalformedTag {
                found: '.',
                position: 4,
            }
        );
    }

    #[test]
    fn test_unterminated_quote_cites_the_opening_index() {
        let err = tokenize("-i=\"abc").unwrap_err();
        assert_eq!(err, TokenizeError::UnterminatedQuote { position: 3 });
    }

    #[test]
    fn test_trailing_bare_dash_is_fatal() {
        let err = tokenize("-i=a -").unwrap_err();
        assert_eq!(err, TokenizeError::DanglingDash { position: 5 });
    }

    #[test]
    fn test_zero_value_tag_at_end_of_line() {
        let tokens = tokenize("-s").unwrap();
        assert_eq!(tokens[0].key, "s");
        assert!(tokens[0].values.is_empty());
    }

    #[test]
    fn test_equals_with_no_value_yields_empty_list() {
        let tokens = tokenize("-o=").unwrap();
        assert!(tokens[0].values.is_empty());
    }

    #[test]
    fn test_hyphen_directly_after_equals_is_literal() {
        let tokens = tokenize("-i=-5").unwrap();
        assert_eq!(tokens[0].values, ["-5"]);
    }
}
