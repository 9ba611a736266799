//! Parser for calibration directives embedded in line names.
//!
//! A line named `X: 0 100` or `Y: 1 1e4 L` defines an axis; a line named
//! `bar: 2.5` defines a scale. Any other name is an ordinary label.
//!
//! ```text
//! axis   := word ':' ws* number ws+ number ws* ['L']
//! scale  := word ':' ws* number
//! word   := (alphanumeric | '_')+
//! number := [+-]? (digits ['.' digits*] | '.' digits) [('e' | 'E') [+-]? digits]
//! ```
//!
//! What may follow the grammar is governed by [`NameMatch`].

use clap::ValueEnum;

/// How much of a line name a directive has to cover.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum NameMatch {
    /// The directive must span the whole name; only trailing whitespace is
    /// tolerated.
    #[default]
    Strict,
    /// The directive only has to be a prefix of the name; anything after it
    /// is ignored.
    Prefix,
}

/// A parsed `NAME: A B [L]` axis directive. Bounds are as written, not
/// log-transformed.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisDirective {
    pub name: String,
    pub a: f64,
    pub b: f64,
    pub log: bool,
}

/// A parsed `NAME: LENGTH` scale directive.
#[derive(Clone, Debug, PartialEq)]
pub struct ScaleDirective {
    pub name: String,
    pub length: f64,
}

/// Parses a line name as an axis directive.
pub fn parse_axis(text: &str, mode: NameMatch) -> Option<AxisDirective> {
    let mut cur = Cursor::new(text);
    let name = cur.word()?;
    cur.expect(':')?;
    cur.skip_ws();
    let a = cur.number()?;
    if cur.skip_ws() == 0 {
        return None;
    }
    let b = cur.number()?;
    cur.skip_ws();
    let log = cur.eat('L');
    cur.finish(mode)?;

    Some(AxisDirective {
        name: name.to_string(),
        a,
        b,
        log,
    })
}

/// Parses a line name as a scale directive.
pub fn parse_scale(text: &str, mode: NameMatch) -> Option<ScaleDirective> {
    let mut cur = Cursor::new(text);
    let name = cur.word()?;
    cur.expect(':')?;
    cur.skip_ws();
    let length = cur.number()?;
    cur.finish(mode)?;

    Some(ScaleDirective {
        name: name.to_string(),
        length,
    })
}

/// Returns true if the name starts like a directive (`word:`), whether or
/// not the rest of it parses.
pub fn looks_like_directive(text: &str) -> bool {
    let mut cur = Cursor::new(text);
    cur.word().is_some() && cur.expect(':').is_some()
}

/// Fuzz-only entrypoint for directive parsing.
///
/// Panics if a name parses strictly but the prefix parse disagrees.
#[cfg(feature = "fuzzing")]
pub fn fuzz_parse_directive(input: &str) {
    if let Some(strict) = parse_axis(input, NameMatch::Strict) {
        assert_eq!(parse_axis(input, NameMatch::Prefix), Some(strict));
    }
    if let Some(strict) = parse_scale(input, NameMatch::Strict) {
        assert_eq!(parse_scale(input, NameMatch::Prefix), Some(strict));
    }
    let _ = looks_like_directive(input);
}

/// Forward-only scanner over a line name.
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { rest: text }
    }

    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.rest = &self.rest[c.len_utf8()..];
        Some(c)
    }

    fn eat(&mut self, want: char) -> bool {
        if self.peek() == Some(want) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, want: char) -> Option<()> {
        self.eat(want).then_some(())
    }

    /// Consumes whitespace and returns how many characters were skipped.
    fn skip_ws(&mut self) -> usize {
        let mut n = 0;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
            n += 1;
        }
        n
    }

    fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let end = self
            .rest
            .char_indices()
            .find(|&(_, c)| !pred(c))
            .map_or(self.rest.len(), |(i, _)| i);
        let (taken, rest) = self.rest.split_at(end);
        self.rest = rest;
        taken
    }

    fn word(&mut self) -> Option<&'a str> {
        let w = self.take_while(|c| c.is_alphanumeric() || c == '_');
        (!w.is_empty()).then_some(w)
    }

    fn number(&mut self) -> Option<f64> {
        let start = self.rest;
        let mut len = 0;

        if matches!(self.peek(), Some('+' | '-')) {
            self.bump();
            len += 1;
        }

        let int_digits = self.take_while(|c| c.is_ascii_digit()).len();
        len += int_digits;
        let mut frac_digits = 0;
        if self.eat('.') {
            len += 1;
            frac_digits = self.take_while(|c| c.is_ascii_digit()).len();
            len += frac_digits;
        }
        if int_digits == 0 && frac_digits == 0 {
            return None;
        }

        // Only commit to an exponent if digits follow it
        if matches!(self.peek(), Some('e' | 'E')) {
            let rest = self.rest;
            let mut probe = Cursor::new(&rest[1..]);
            let mut exp_len = 1;
            if matches!(probe.peek(), Some('+' | '-')) {
                probe.bump();
                exp_len += 1;
            }
            let exp_digits = probe.take_while(|c| c.is_ascii_digit()).len();
            if exp_digits > 0 {
                self.rest = probe.rest;
                len += exp_len + exp_digits;
            }
        }

        start[..len].parse().ok()
    }

    fn finish(&self, mode: NameMatch) -> Option<()> {
        match mode {
            NameMatch::Prefix => Some(()),
            NameMatch::Strict => self.rest.trim().is_empty().then_some(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis(text: &str) -> Option<AxisDirective> {
        parse_axis(text, NameMatch::Strict)
    }

    fn scale(text: &str) -> Option<ScaleDirective> {
        parse_scale(text, NameMatch::Strict)
    }

    #[test]
    fn test_parse_linear_axis() {
        let d = axis("X: 0 100").expect("axis");
        assert_eq!(d.name, "X");
        assert_eq!(d.a, 0.0);
        assert_eq!(d.b, 100.0);
        assert!(!d.log);
    }

    #[test]
    fn test_parse_log_axis_with_and_without_space() {
        let spaced = axis("Y: 1 1e4 L").expect("axis");
        assert!(spaced.log);
        assert_eq!(spaced.b, 1e4);

        let tight = axis("Y:1 1e4L").expect("axis");
        assert!(tight.log);
        assert_eq!(tight.a, 1.0);
    }

    #[test]
    fn test_number_forms() {
        let d = axis("time_s: -2.5e-3 +.5").expect("axis");
        assert_eq!(d.name, "time_s");
        assert_eq!(d.a, -2.5e-3);
        assert_eq!(d.b, 0.5);

        assert_eq!(scale("s: 5.").map(|d| d.length), Some(5.0));
        assert_eq!(scale("s: 1E2").map(|d| d.length), Some(100.0));
    }

    #[test]
    fn test_unicode_word_names() {
        assert_eq!(axis("température: 0 40").map(|d| d.name), Some("température".into()));
    }

    #[test]
    fn test_plain_labels_are_not_directives() {
        assert_eq!(axis("series 1"), None);
        assert_eq!(axis(""), None);
        assert_eq!(axis(": 0 1"), None);
        assert_eq!(axis("X 0 1"), None);
        assert_eq!(axis("X: 0"), None);
        assert_eq!(axis("X: 01"), None);
        assert_eq!(axis("X: 0 . "), None);
        assert_eq!(scale("bar: -"), None);
        assert_eq!(scale("bar: e5"), None);
    }

    #[test]
    fn test_strict_rejects_trailing_content() {
        assert_eq!(axis("X: 0 10 foo"), None);
        assert_eq!(axis("X: 0 10 Log"), None);
        assert_eq!(scale("bar: 10 mm"), None);
        // An axis name is not a scale in strict mode
        assert_eq!(scale("X: 0 100"), None);
        // Trailing whitespace is fine
        assert!(axis("X: 0 10 L  ").is_some());
        assert!(scale("bar: 10\t").is_some());
    }

    #[test]
    fn test_prefix_ignores_trailing_content() {
        let d = parse_axis("X: 0 10 Log", NameMatch::Prefix).expect("axis");
        assert!(d.log);

        let d = parse_scale("bar: 10 mm", NameMatch::Prefix).expect("scale");
        assert_eq!(d.length, 10.0);

        // The leading number of an axis reads as a scale length
        let d = parse_scale("X: 0 100", NameMatch::Prefix).expect("scale");
        assert_eq!(d.length, 0.0);
    }

    #[test]
    fn test_dangling_exponent_is_not_consumed() {
        // "1e" is the number 1 followed by a stray 'e'
        assert_eq!(scale("s: 1e"), None);
        assert_eq!(
            parse_scale("s: 1e", NameMatch::Prefix).map(|d| d.length),
            Some(1.0)
        );
    }

    #[test]
    fn test_looks_like_directive() {
        assert!(looks_like_directive("X: 0 100"));
        assert!(looks_like_directive("X: oops"));
        assert!(!looks_like_directive("just a label"));
        assert!(!looks_like_directive(":"));
    }
}
