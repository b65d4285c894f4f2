//! Property tests: splitting a quoted command line gives back the arguments.

use proptest::prelude::*;
use wincmdline::{quote, quote_arg, split};

/// Characters that exercise the escaping rules, plus anything else but NUL.
fn arg_char() -> impl Strategy<Value = char> {
    prop_oneof![
        4 => Just('\\'),
        3 => Just('"'),
        2 => Just(' '),
        1 => Just('\t'),
        1 => Just('\n'),
        1 => Just('\u{0b}'),
        2 => prop::char::range('a', 'z'),
        1 => any::<char>().prop_filter("no NUL", |c| *c != '\0'),
    ]
}

fn arg() -> impl Strategy<Value = String> {
    prop::collection::vec(arg_char(), 0..24).prop_map(|chars| chars.into_iter().collect())
}

fn args() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arg(), 0..6)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(2000))]

    #[test]
    fn split_inverts_quote(args in args()) {
        prop_assert_eq!(split(&quote(&args)), args);
    }

    #[test]
    fn single_argument_round_trips(arg in arg()) {
        let got = split(&quote_arg(&arg));
        prop_assert_eq!(got, vec![arg]);
    }

    #[test]
    fn plain_arguments_are_untouched(arg in "[^ \\t\\n\\x0B\"\\x00]{1,32}") {
        prop_assert_eq!(quote([arg.as_str()]), arg);
    }

    #[test]
    fn backslash_runs_of_any_length(run in 1usize..40, before_quote in any::<bool>(), spaced in any::<bool>()) {
        let mut arg = String::from("x");
        if spaced {
            arg.push(' ');
        }
        arg.push_str(&"\\".repeat(run));
        if before_quote {
            arg.push('"');
        }
        let args = vec![arg.clone(), arg];
        prop_assert_eq!(split(&quote(&args)), args);
    }
}

#[test]
fn documented_examples_round_trip() {
    let cases: &[&[&str]] = &[
        &["foo", "bar"],
        &["foo bar"],
        &[""],
        &[r#"a"b"#],
        &[r"C:\path\"],
        &[r"C:\path with spaces\"],
        &[r#"a\\"b"#],
        &["", "", ""],
        &[r"\\", r#"\""#, r#"\\""#],
    ];
    for &case in cases {
        assert_eq!(split(&quote(case)), case, "cmdline {:?}", quote(case));
    }
}
