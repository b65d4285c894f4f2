//! Command-line quoting.
//!
//! Joins an argument vector into the single string `CreateProcessW` expects,
//! escaped so that the child's C runtime splits it back into the same
//! arguments (see [`crate::split`]).

use std::borrow::Cow;

/// Characters that force an argument to be wrapped in quotes.
const MAGIC: &[char] = &[' ', '\t', '\n', '\u{0b}', '"'];

/// Build a command line out of `args`, separated by single spaces.
pub fn quote<I, S>(args: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut buf = String::new();
    for (i, arg) in args.into_iter().enumerate() {
        if i > 0 {
            buf.push(' ');
        }
        push_arg(&mut buf, arg.as_ref());
    }
    buf
}

/// Quote a single argument. Arguments that need no quoting are borrowed.
pub fn quote_arg(arg: &str) -> Cow<'_, str> {
    if !needs_quotes(arg) {
        return Cow::Borrowed(arg);
    }
    let mut buf = String::with_capacity(arg.len() + 2);
    push_quoted(&mut buf, arg);
    Cow::Owned(buf)
}

fn needs_quotes(arg: &str) -> bool {
    arg.is_empty() || arg.contains(MAGIC)
}

fn push_arg(buf: &mut String, arg: &str) {
    if needs_quotes(arg) {
        push_quoted(buf, arg);
    } else {
        buf.push_str(arg);
    }
}

fn push_quoted(buf: &mut String, arg: &str) {
    buf.push('"');

    let mut chars = arg.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                let mut run = 1;
                while chars.next_if_eq(&'\\').is_some() {
                    run += 1;
                }
                match chars.peek() {
                    // The closing quote we append must stay unescaped.
                    None => push_backslashes(buf, run * 2),
                    Some(&'"') => {
                        chars.next();
                        push_backslashes(buf, run * 2 + 1);
                        buf.push('"');
                    }
                    Some(_) => push_backslashes(buf, run),
                }
            }
            '"' => buf.push_str("\\\""),
            c => buf.push(c),
        }
    }

    buf.push('"');
}

fn push_backslashes(buf: &mut String, count: usize) {
    buf.extend(std::iter::repeat('\\').take(count));
}
