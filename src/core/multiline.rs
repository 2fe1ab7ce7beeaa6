//! Injection-safe splitting of message text into log lines
//!
//! Message text may be influenced by whoever supplied the data being logged, so it
//! must never be able to produce something that looks like a second, separate log
//! record. [`split_lines`] turns arbitrary text into a sequence of lines where:
//!
//! - no line contains a line break (`\n`, `\r`, `\r\n` and `\n\r` each end a line);
//! - control characters and everything outside printable ASCII are written as
//!   `\uXXXX` (lowercase hex, one escape per UTF-16 unit);
//! - tabs are expanded with spaces to the next multiple of [`TAB_WIDTH`];
//! - trailing spaces are removed from every line.
//!
//! ```
//! use log_front::core::multiline::split_lines;
//!
//! let lines: Vec<_> = split_lines("First line\r\n\tSecond line   ").collect();
//! assert_eq!(lines, ["First line", "    Second line"]);
//! ```

use std::borrow::Cow;
use std::fmt::Write;
use std::iter::FusedIterator;

pub const TAB_WIDTH: usize = 4;

/// Split `text` into sanitized lines.
///
/// Empty text yields a single empty line. Text made only of printable ASCII that
/// does not end in a space is yielded unchanged as one borrowed line.
pub fn split_lines(text: &str) -> SplitLines<'_> {
    let single = text.is_empty() || (is_all_ascii(text) && !text.ends_with(' '));
    SplitLines {
        text,
        pos: 0,
        single,
        done: false,
    }
}

/// Check whether a string is all printable ASCII (0x20..=0x7E).
pub fn is_all_ascii(text: &str) -> bool {
    text.bytes().all(|b| (0x20..0x7F).contains(&b))
}

/// Remove trailing spaces, tabs and line breaks.
pub fn trimmed(text: &str) -> &str {
    text.trim_end_matches([' ', '\t', '\n', '\r'])
}

/// Sanitize `text` into a single line, joining the lines [`split_lines`] would
/// produce with a space.
pub fn flatten(text: &str) -> Cow<'_, str> {
    let mut lines = split_lines(text);
    let first = lines.next().unwrap_or(Cow::Borrowed(""));
    match lines.next() {
        None => first,
        Some(second) => {
            let mut joined = first.into_owned();
            joined.push(' ');
            joined.push_str(&second);
            for line in lines {
                joined.push(' ');
                joined.push_str(&line);
            }
            Cow::Owned(joined)
        }
    }
}

/// Lazy iterator returned by [`split_lines`]
#[derive(Debug, Clone)]
pub struct SplitLines<'a> {
    text: &'a str,
    pos: usize,
    single: bool,
    done: bool,
}

impl<'a> Iterator for SplitLines<'a> {
    type Item = Cow<'a, str>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if self.single {
            self.done = true;
            return Some(Cow::Borrowed(self.text));
        }

        let rest = &self.text[self.pos..];
        let mut line = String::with_capacity(rest.len().min(120));
        let mut chars = rest.char_indices().peekable();

        while let Some((offset, ch)) = chars.next() {
            match ch {
                '\n' | '\r' => {
                    let partner = if ch == '\n' { '\r' } else { '\n' };
                    let mut consumed = offset + 1;
                    if let Some(&(_, next)) = chars.peek() {
                        if next == partner {
                            consumed += 1;
                        }
                    }
                    self.pos += consumed;
                    if self.pos >= self.text.len() {
                        self.done = true;
                    }
                    return Some(Cow::Owned(finish(line)));
                }
                ' '..='~' => line.push(ch),
                '\t' => loop {
                    line.push(' ');
                    if line.len() % TAB_WIDTH == 0 {
                        break;
                    }
                },
                _ => push_escaped(&mut line, ch),
            }
        }

        self.done = true;
        Some(Cow::Owned(finish(line)))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (1, Some(self.text.len() - self.pos + 1))
        }
    }
}

impl FusedIterator for SplitLines<'_> {}

fn finish(mut line: String) -> String {
    let len = trimmed(&line).len();
    line.truncate(len);
    line
}

fn push_escaped(line: &mut String, ch: char) {
    let mut units = [0u16; 2];
    for unit in ch.encode_utf16(&mut units) {
        // writing to a String cannot fail
        let _ = write!(line, "\\u{:04x}", unit);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<String> {
        split_lines(text).map(Cow::into_owned).collect()
    }

    #[test]
    fn test_single_line_is_borrowed() {
        let message = "Single line";
        let mut iter = split_lines(message);
        match iter.next() {
            Some(Cow::Borrowed(line)) => assert!(std::ptr::eq(line, message)),
            other => panic!("expected borrowed line, got {:?}", other),
        }
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_empty_text_yields_one_empty_line() {
        assert_eq!(lines(""), [""]);
    }

    #[test]
    fn test_escapes_non_ascii() {
        assert_eq!(lines("\u{00A1}Single line!"), ["\\u00a1Single line!"]);
        assert_eq!(lines("\u{00A1}Hi"), ["\\u00a1Hi"]);
    }

    #[test]
    fn test_escapes_control_characters_and_nul() {
        assert_eq!(lines("a\u{1b}[31mb"), ["a\\u001b[31mb"]);
        assert_eq!(lines("a\u{0}b"), ["a\\u0000b"]);
        assert_eq!(lines("del\u{7f}"), ["del\\u007f"]);
    }

    #[test]
    fn test_escapes_astral_as_surrogates() {
        assert_eq!(lines("\u{1F600}"), ["\\ud83d\\ude00"]);
    }

    #[test]
    fn test_tab_expansion() {
        assert_eq!(lines("\tx"), ["    x"]);
        assert_eq!(lines("ab\tx"), ["ab  x"]);
        assert_eq!(lines("1.\tSingle line"), ["1.  Single line"]);
        assert_eq!(lines("abcd\tx"), ["abcd    x"]);
    }

    #[test]
    fn test_split_multi_line() {
        assert_eq!(
            lines("First line\nSecond line\n"),
            ["First line", "Second line"]
        );
        assert_eq!(
            lines("First line\n\tSecond line\n"),
            ["First line", "    Second line"]
        );
    }

    #[test]
    fn test_line_ending_equivalence() {
        for text in ["a\nb", "a\r\nb", "a\rb", "a\n\rb"] {
            assert_eq!(lines(text), ["a", "b"], "input {:?}", text);
        }
    }

    #[test]
    fn test_consecutive_breaks_keep_empty_lines() {
        assert_eq!(lines("a\n\nb"), ["a", "", "b"]);
        assert_eq!(lines("a\r\n\r\nb"), ["a", "", "b"]);
        assert_eq!(lines("\n"), [""]);
    }

    #[test]
    fn test_trailing_whitespace_trimmed() {
        assert_eq!(lines("abc   \n"), ["abc"]);
        assert_eq!(lines("abc   "), ["abc"]);
        assert_eq!(
            lines("First line    \n\tSecond line\t\n"),
            ["First line", "    Second line"]
        );
        assert_eq!(lines("    "), [""]);
    }

    #[test]
    fn test_is_all_ascii() {
        assert!(is_all_ascii("ABC"));
        assert!(is_all_ascii(""));
        assert!(is_all_ascii("!@#$%^&*()_+\\"));
        assert!(!is_all_ascii("ABC\n"));
        assert!(!is_all_ascii("\u{00A1}Hola!"));
    }

    #[test]
    fn test_trimmed() {
        assert_eq!(trimmed(""), "");
        assert_eq!(trimmed("          "), "");
        assert_eq!(trimmed("abc        "), "abc");
        assert_eq!(trimmed(" abc "), " abc");
    }

    #[test]
    fn test_flatten() {
        assert_eq!(flatten("one line"), "one line");
        assert_eq!(flatten("one\ntwo\r\nthree"), "one two three");
        assert_eq!(flatten(""), "");
    }
}
