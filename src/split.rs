//! Command-line splitting, the way the Microsoft C runtime builds `argv`.
//!
//! This is the inverse of [`crate::quote::quote`]: for any argument list
//! without NUL characters, `split(&quote(args)) == args`.

/// Split `cmdline` into arguments.
///
/// Rules:
/// - space and tab separate arguments outside quotes
/// - `2n` backslashes before `"` yield `n` backslashes and the quote toggles
///   quoted mode
/// - `2n+1` backslashes before `"` yield `n` backslashes and a literal `"`
/// - backslashes anywhere else are literal
/// - `""` inside quotes yields a literal `"` and stays quoted
pub fn split(cmdline: &str) -> Vec<String> {
    let mut args = Vec::new();
    let mut chars = cmdline.chars().peekable();

    loop {
        while chars.next_if(|c| is_separator(*c)).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let mut arg = String::new();
        let mut quoted = false;
        while let Some(&c) = chars.peek() {
            match c {
                c if is_separator(c) && !quoted => break,
                '\\' => {
                    let mut run = 0;
                    while chars.next_if_eq(&'\\').is_some() {
                        run += 1;
                    }
                    if chars.peek() == Some(&'"') {
                        push_backslashes(&mut arg, run / 2);
                        if run % 2 == 1 {
                            chars.next();
                            arg.push('"');
                        }
                    } else {
                        push_backslashes(&mut arg, run);
                    }
                }
                '"' => {
                    chars.next();
                    if quoted && chars.next_if_eq(&'"').is_some() {
                        arg.push('"');
                    } else {
                        quoted = !quoted;
                    }
                }
                c => {
                    chars.next();
                    arg.push(c);
                }
            }
        }
        args.push(arg);
    }

    args
}

fn is_separator(c: char) -> bool {
    c == ' ' || c == '\t'
}

fn push_backslashes(buf: &mut String, count: usize) {
    buf.extend(std::iter::repeat('\\').take(count));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_whitespace() {
        assert_eq!(split("foo bar"), vec!["foo", "bar"]);
        assert_eq!(split("  foo \t bar  "), vec!["foo", "bar"]);
    }

    #[test]
    fn empty_input_has_no_args() {
        assert!(split("").is_empty());
        assert!(split(" \t ").is_empty());
    }

    #[test]
    fn quotes_group_and_vanish() {
        assert_eq!(split(r#""foo bar" baz"#), vec!["foo bar", "baz"]);
        assert_eq!(split(r#"a"b c"d"#), vec!["ab cd"]);
    }

    #[test]
    fn empty_quotes_are_an_argument() {
        assert_eq!(split(r#""""#), vec![""]);
        assert_eq!(split(r#"a "" b"#), vec!["a", "", "b"]);
    }

    #[test]
    fn backslashes_before_quote() {
        assert_eq!(split(r#"a\"b"#), vec![r#"a"b"#]);
        assert_eq!(split(r#""a\\" b"#), vec![r"a\", "b"]);
        assert_eq!(split(r#""a\\\\\"b""#), vec![r#"a\\"b"#]);
    }

    #[test]
    fn lone_backslashes_are_literal() {
        assert_eq!(split(r"C:\path\ x"), vec![r"C:\path\", "x"]);
        assert_eq!(split(r"\\server\share"), vec![r"\\server\share"]);
    }

    #[test]
    fn doubled_quote_inside_quotes_is_literal() {
        assert_eq!(split(r#""a""b""#), vec![r#"a"b"#]);
    }

    #[test]
    fn newline_is_not_a_separator() {
        assert_eq!(split("a\nb"), vec!["a\nb"]);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        assert_eq!(split(r#""a b"#), vec!["a b"]);
    }
}
