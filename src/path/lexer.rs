/// A token of an SVG path `d` string.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum PathToken {
    Command(u8),
    Number(f64),
}

/// Byte-level tokenizer for SVG path data.
///
/// Separators (whitespace, commas) are skipped, as is any byte that is neither a command
/// letter nor the start of a number. Numbers follow the SVG grammar: optional sign, digits,
/// optional fraction (a leading `.` is allowed) and optional exponent. A second `.` or a sign
/// starts a new number, so `1.5.5` and `1-2` are two numbers each.
pub(crate) struct PathLexer<'a> {
    bytes: &'a [u8],
    src: &'a str,
    pos: usize,
}

const COMMANDS: &[u8] = b"MmLlHhVvCcSsQqTtAaZz";

impl<'a> PathLexer<'a> {
    pub(crate) fn new(src: &'a str) -> Self {
        Self {
            bytes: src.as_bytes(),
            src,
            pos: 0,
        }
    }

    fn skip_separators(&mut self) {
        while let Some(&b) = self.bytes.get(self.pos) {
            if b.is_ascii_whitespace() || b == b',' {
                self.pos += 1;
            } else {
                break;
            }
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn starts_number(&self) -> bool {
        match self.peek() {
            Some(b'0'..=b'9') => true,
            Some(b'.') => matches!(self.bytes.get(self.pos + 1), Some(b'0'..=b'9')),
            Some(b'+' | b'-') => match self.bytes.get(self.pos + 1) {
                Some(b'0'..=b'9') => true,
                Some(b'.') => matches!(self.bytes.get(self.pos + 2), Some(b'0'..=b'9')),
                _ => false,
            },
            _ => false,
        }
    }

    fn eat_digits(&mut self) -> usize {
        let start = self.pos;
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.pos += 1;
        }
        self.pos - start
    }

    fn number(&mut self) -> Option<f64> {
        let start = self.pos;
        if matches!(self.peek(), Some(b'+' | b'-')) {
            self.pos += 1;
        }
        self.eat_digits();
        if self.peek() == Some(b'.') {
            self.pos += 1;
            self.eat_digits();
        }
        if matches!(self.peek(), Some(b'e' | b'E')) {
            let save = self.pos;
            self.pos += 1;
            if matches!(self.peek(), Some(b'+' | b'-')) {
                self.pos += 1;
            }
            if self.eat_digits() == 0 {
                self.pos = save;
            }
        }
        self.src[start..self.pos].parse::<f64>().ok()
    }

    /// Read an arc flag: a single `0` or `1`, which may be glued to the next number.
    pub(crate) fn flag(&mut self) -> Option<f64> {
        self.skip_separators();
        match self.peek() {
            Some(b @ (b'0' | b'1')) => {
                self.pos += 1;
                Some(f64::from(b - b'0'))
            }
            _ => None,
        }
    }

    /// Whether the next token is a number (without consuming it).
    pub(crate) fn at_number(&mut self) -> bool {
        self.skip_separators();
        self.starts_number()
    }
}

impl Iterator for PathLexer<'_> {
    type Item = PathToken;

    fn next(&mut self) -> Option<PathToken> {
        loop {
            self.skip_separators();
            let b = self.peek()?;
            if COMMANDS.contains(&b) {
                self.pos += 1;
                return Some(PathToken::Command(b));
            }
            if self.starts_number() {
                let start = self.pos;
                if let Some(v) = self.number() {
                    return Some(PathToken::Number(v));
                }
                // Unparsable run: skip past it.
                self.pos = start + 1;
                continue;
            }
            self.pos += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/lexer.rs"]
mod tests;
