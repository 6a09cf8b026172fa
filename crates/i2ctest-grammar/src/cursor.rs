use crate::ParseError;

/// Character-level reader over one console line.
///
/// Every accessor skips leading whitespace first. Methods that fail leave
/// the cursor where the failing item begins.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    pub fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    #[cfg(test)]
    pub(crate) fn rest(&self) -> &'a str {
        self.rest
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
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

    /// Next whitespace-delimited word, or `None` at end of line.
    pub fn word(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let word = self.take_while(|c| !c.is_whitespace());
        (!word.is_empty()).then_some(word)
    }

    /// Consume `delim`, failing if anything else comes first.
    pub fn expect(&mut self, delim: char) -> Result<(), ParseError> {
        self.skip_whitespace();
        match self.rest.strip_prefix(delim) {
            Some(rest) => {
                self.rest = rest;
                Ok(())
            }
            None => Err(ParseError::Expected(delim)),
        }
    }

    /// Next run of hex digits, with an optional `0x` prefix.
    ///
    /// Returns the digits without the prefix. Nothing is consumed when the
    /// next item is not hexadecimal.
    pub fn hex_digits(&mut self) -> Option<&'a str> {
        self.skip_whitespace();
        let saved = self.rest;
        if let Some(rest) = self
            .rest
            .strip_prefix("0x")
            .or_else(|| self.rest.strip_prefix("0X"))
        {
            if rest.starts_with(|c: char| c.is_ascii_hexdigit()) {
                self.rest = rest;
            }
        }
        let digits = self.take_while(|c| c.is_ascii_hexdigit());
        if digits.is_empty() {
            self.rest = saved;
            return None;
        }
        Some(digits)
    }

    /// Next run of decimal digits.
    pub fn decimal_digits(&mut self) -> Result<&'a str, ParseError> {
        self.skip_whitespace();
        let digits = self.take_while(|c| c.is_ascii_digit());
        if digits.is_empty() {
            return Err(ParseError::ExpectedInteger);
        }
        Ok(digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn words_split_on_any_whitespace() {
        let mut cursor = Cursor::new("  write\t{ 01 }  ");
        assert_eq!(cursor.word(), Some("write"));
        assert_eq!(cursor.word(), Some("{"));
        assert_eq!(cursor.word(), Some("01"));
        assert_eq!(cursor.word(), Some("}"));
        assert_eq!(cursor.word(), None);
    }

    #[test]
    fn hex_digits_stop_at_delimiters() {
        let mut cursor = Cursor::new("0xAb}");
        assert_eq!(cursor.hex_digits(), Some("Ab"));
        assert_eq!(cursor.rest(), "}");
        assert_eq!(cursor.hex_digits(), None);
        assert_eq!(cursor.rest(), "}");
    }

    #[test]
    fn bare_zero_x_is_a_zero() {
        let mut cursor = Cursor::new("0x }");
        assert_eq!(cursor.hex_digits(), Some("0"));
        assert_eq!(cursor.rest(), "x }");
    }

    #[test]
    fn expect_reports_the_missing_delimiter() {
        let mut cursor = Cursor::new("  ( 01");
        assert_eq!(cursor.expect('{'), Err(ParseError::Expected('{')));
        assert_eq!(cursor.rest(), "( 01");
    }

    #[test]
    fn decimal_digits_require_a_digit() {
        assert_eq!(Cursor::new(" 42 rest").decimal_digits(), Ok("42"));
        assert_eq!(
            Cursor::new(" four").decimal_digits(),
            Err(ParseError::ExpectedInteger)
        );
    }
}
