//! `{}` placeholder substitution for message templates.
//!
//! Each `{}` takes the next argument in order. Surplus placeholders are left
//! in place and surplus arguments are ignored. `\{}` produces a literal `{}`
//! without consuming an argument; `\\{}` produces a literal backslash followed
//! by the substituted argument. Once every argument is used, the rest of the
//! template is copied as written, escapes included.

use std::fmt::Write;

use crate::argument::Argument;

const PLACEHOLDER: &str = "{}";
const ESCAPE: u8 = b'\\';

/// Substitute `args` into `template`.
pub fn format_message(template: &str, args: &[Argument]) -> String {
    if args.is_empty() {
        return template.to_owned();
    }
    let bytes = template.as_bytes();
    let mut out = String::with_capacity(template.len() + 16 * args.len());
    let mut next_arg = args.iter();
    let mut start = 0;

    while next_arg.len() > 0
        && let Some(offset) = template[start..].find(PLACEHOLDER)
    {
        let at = start + offset;
        let escaped = at >= 1 && bytes[at - 1] == ESCAPE;
        let double_escaped = escaped && at >= 2 && bytes[at - 2] == ESCAPE;

        if escaped && !double_escaped {
            out.push_str(&template[start..at - 1]);
            out.push('{');
            start = at + 1;
            continue;
        }

        let Some(arg) = next_arg.next() else {
            break;
        };
        let literal_end = if double_escaped { at - 1 } else { at };
        out.push_str(&template[start..literal_end]);
        let _ = write!(out, "{arg}");
        start = at + PLACEHOLDER.len();
    }
    out.push_str(&template[start..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use rstest::rstest;

    #[rstest]
    #[case("message with {}", args!["argument"], "message with argument")]
    #[case("{} and {}", args![1, 2], "1 and 2")]
    #[case("{} and {}", args![1], "1 and {}")]
    #[case("only {}", args![1, 2, 3], "only 1")]
    #[case("no placeholders", args![1], "no placeholders")]
    #[case("value {}", args![None::<&str>], "value null")]
    #[case("{}{}", args!["a", "b"], "ab")]
    #[case("brace {", args![1], "brace {")]
    #[case("日本 {} 語", args!["x"], "日本 x 語")]
    #[case(r"{} \{}", args![1], r"1 \{}")]
    #[case(r"{} \\{}", args![1], r"1 \\{}")]
    fn substitutes_positional_arguments(
        #[case] template: &str,
        #[case] args: Vec<Argument>,
        #[case] expected: &str,
    ) {
        assert_eq!(format_message(template, &args), expected);
    }

    #[test]
    fn escaped_placeholder_is_literal() {
        assert_eq!(format_message(r"set \{} to {}", &args![5]), "set {} to 5");
    }

    #[test]
    fn double_escape_keeps_backslash_and_substitutes() {
        assert_eq!(format_message(r"path C:\\{}", &args!["dir"]), r"path C:\dir");
    }

    #[test]
    fn empty_arguments_leave_template_untouched() {
        assert_eq!(format_message(r"raw \{} {}", &[]), r"raw \{} {}");
    }
}
