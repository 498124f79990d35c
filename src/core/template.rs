//! Runtime message rendering
//!
//! A log call either carries no template, in which case its arguments are
//! concatenated using their default string forms (with a space between two
//! neighbours when neither is a string), or a template whose placeholders are
//! substituted positionally:
//!
//! - `{}` takes the next unused argument
//! - `{N}` takes argument `N` (zero based) without advancing
//! - `{{` and `}}` write a literal brace
//!
//! A placeholder with no matching argument is written out literally and
//! surplus arguments are ignored.

use super::field_value::FieldValue;
use std::fmt::Write;

/// Render a message into `out`. An empty template means plain concatenation.
pub fn render(template: &str, args: &[FieldValue], out: &mut String) {
    if template.is_empty() {
        concat(args, out);
    } else {
        substitute(template, args, out);
    }
}

/// Render a message into a new string
#[must_use]
pub fn render_to_string(template: &str, args: &[FieldValue]) -> String {
    let mut out = String::new();
    render(template, args, &mut out);
    out
}

/// Concatenate the default string forms. Two adjacent operands are
/// separated by a space when neither of them is a string.
pub fn concat(args: &[FieldValue], out: &mut String) {
    let mut previous: Option<&FieldValue> = None;
    for arg in args {
        if previous.is_some_and(|prev| !prev.is_string() && !arg.is_string()) {
            out.push(' ');
        }
        // fmt::Write for String never fails
        let _ = write!(out, "{}", arg);
        previous = Some(arg);
    }
}

/// Substitute `args` into `template`
pub fn substitute(template: &str, args: &[FieldValue], out: &mut String) {
    let mut next = 0usize;
    let mut rest = template;

    while let Some(pos) = rest.find(&['{', '}'][..]) {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        if tail.starts_with("{{") {
            out.push('{');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with("}}") {
            out.push('}');
            rest = &tail[2..];
            continue;
        }
        if tail.starts_with('}') {
            out.push('}');
            rest = &tail[1..];
            continue;
        }

        let Some(close) = tail.find('}') else {
            // unterminated placeholder, keep the remainder verbatim
            out.push_str(tail);
            return;
        };
        let inner = &tail[1..close];
        let placeholder = &tail[..=close];
        rest = &tail[close + 1..];

        let index = if inner.is_empty() {
            let index = next;
            next += 1;
            Some(index)
        } else {
            inner.trim().parse::<usize>().ok()
        };

        match index.and_then(|i| args.get(i)) {
            Some(arg) => {
                let _ = write!(out, "{}", arg);
            }
            None => out.push_str(placeholder),
        }
    }

    out.push_str(rest);
}
