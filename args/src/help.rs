//! Help text rendering.
//!
//! Turns a [`Schema`] into the classic NAME / SYNOPSIS / DESCRIPTION
//! layout followed by one paragraph per option in declaration order.
//! Rendering reads nothing but the schema, so it is independent of any
//! parse state.

use crate::schema::{OptKind, OptSpec, Schema};

/// Indent for block bodies and option headers.
const BLOCK_INDENT: usize = 4;
/// Indent for option description paragraphs.
const OPT_DESC_INDENT: usize = 8;

/// Renders `schema` as help text word-wrapped at `max_width` columns.
///
/// Option headers list every key form plus the coercion target:
/// `-i,--input=Path,...` for an array, `-c,--count=Number` for a single,
/// bare keys for a flag. Descriptions of non-required options are
/// prefixed with `[Optional] - `.
///
/// # Examples
///
/// ```
/// use hashwalk_args::{Schema, render_help};
///
/// #[derive(Default)]
/// struct Opts {
///     verbose: bool,
/// }
///
/// let schema = Schema::builder("demo", "demo [-v]", "A demo tool.")
///     .flag('v', Some("verbose"), "Chatty output.", |o: &mut Opts| o.verbose = true)
///     .build()
///     .unwrap();
///
/// let text = render_help(&schema, 80);
/// assert!(text.starts_with("NAME\n    demo\n"));
/// assert!(text.contains("-v,--verbose\n"));
/// assert!(text.contains("[Optional] - Chatty output."));
/// ```
pub fn render_help<C>(schema: &Schema<C>, max_width: usize) -> String {
    let mut out = String::new();

    out.push_str("NAME\n");
    wrap_into(&mut out, schema.name(), BLOCK_INDENT, max_width);
    out.push('\n');

    out.push_str("SYNOPSIS\n");
    wrap_into(&mut out, schema.usage(), BLOCK_INDENT, max_width);
    out.push('\n');

    out.push_str("DESCRIPTION\n");
    wrap_into(&mut out, schema.about(), BLOCK_INDENT, max_width);

    for spec in schema.specs() {
        out.push('\n');
        wrap_into(&mut out, &header_line(spec), BLOCK_INDENT, max_width);
        let desc = if spec.required {
            spec.help.clone()
        } else {
            format!("[Optional] - {}", spec.help)
        };
        wrap_into(&mut out, &desc, OPT_DESC_INDENT, max_width);
    }

    out
}

/// Builds the key header for one option, e.g. `-a,--algorithm=Algorithm`.
fn header_line<C>(spec: &OptSpec<C>) -> String {
    let mut header = format!("-{}", spec.short);
    if let Some(long) = &spec.long {
        header.push_str(",--");
        header.push_str(long);
    }
    match spec.kind {
        OptKind::Flag => {}
        OptKind::Single => {
            header.push('=');
            header.push_str(spec.value_name);
        }
        OptKind::Array => {
            header.push('=');
            header.push_str(spec.value_name);
            header.push_str(",...");
        }
    }
    header
}

/// Word-wraps `text` into `out`, indenting every line by `indent` spaces
/// and keeping total line width within `max_width`.
///
/// Breaks at the last space that fits; a word longer than the line is
/// force-split at `width - 1` chars with a trailing `-`. When the indent
/// leaves no room for even one char plus a hyphen, the remainder is
/// emitted unsplit on a single line, the only case allowed to exceed
/// `max_width`.
fn wrap_into(out: &mut String, text: &str, indent: usize, max_width: usize) {
    let pad = " ".repeat(indent);
    let chars: Vec<char> = text.trim().chars().collect();
    let avail = max_width.saturating_sub(indent);

    let mut start = 0;
    while start < chars.len() {
        while start < chars.len() && chars[start] == ' ' {
            start += 1;
        }
        if start >= chars.len() {
            return;
        }

        let left = chars.len() - start;
        if left <= avail || avail < 2 {
            let rest: String = chars[start..].iter().collect();
            out.push_str(&pad);
            out.push_str(rest.trim_end());
            out.push('\n');
            return;
        }

        let window_end = start + avail;
        let break_at = if chars[window_end] == ' ' {
            Some(window_end)
        } else {
            chars[start..window_end]
                .iter()
                .rposition(|c| *c == ' ')
                .map(|offset| start + offset)
        };

        match break_at {
            Some(space) => {
                let line: String = chars[start..space].iter().collect();
                out.push_str(&pad);
                out.push_str(line.trim_end());
                out.push('\n');
                start = space + 1;
            }
            None => {
                let line: String = chars[start..start + avail - 1].iter().collect();
                out.push_str(&pad);
                out.push_str(&line);
                out.push_str("-\n");
                start += avail - 1;
            }
        }
    }
}
