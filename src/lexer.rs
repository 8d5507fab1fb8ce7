/// Returns true for characters that may appear in an unquoted string (a bareword).
///
/// The serializer decides whether a string needs quotes against this exact set,
/// so the two must never drift apart.
pub fn is_bareword_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '$' | '/' | '-')
}

/// A cursor over the raw input text.
///
/// The tokenizer never decides what comes next on its own: the parser peeks at
/// the upcoming character and asks for the matching lexeme. There is no
/// lookahead beyond [`Tokenizer::peek`] and no backtracking.
#[derive(Debug, Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    position: usize,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, position: 0 }
    }

    /// Current byte offset into the input.
    pub fn offset(&self) -> usize {
        self.position
    }

    pub fn at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    fn rest(&self) -> &'a str {
        &self.input[self.position..]
    }

    /// Returns the next `count` characters without consuming them, or fewer
    /// if the input runs out.
    pub fn peek(&self, count: usize) -> &'a str {
        let rest = self.rest();
        let end = rest
            .char_indices()
            .nth(count)
            .map_or(rest.len(), |(i, _)| i);
        &rest[..end]
    }

    pub fn peek_char(&self) -> Option<char> {
        self.rest().chars().next()
    }

    /// Consumes one character.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek_char()?;
        self.position += c.len_utf8();
        Some(c)
    }

    fn advance_while(&mut self, mut pred: impl FnMut(char) -> bool) {
        while let Some(c) = self.peek_char() {
            if !pred(c) {
                break;
            }
            self.position += c.len_utf8();
        }
    }

    /// Skips any run of whitespace, `/* block */` comments and `// line` comments.
    pub fn skip_insignificant(&mut self) {
        loop {
            let start = self.position;
            self.advance_while(char::is_whitespace);
            if self.rest().starts_with("/*") {
                self.position += 2;
                match self.rest().find("*/") {
                    Some(end) => self.position += end + 2,
                    // Unterminated: the comment swallows the remaining input.
                    None => self.position = self.input.len(),
                }
            } else if self.rest().starts_with("//") {
                self.position += 2;
                self.advance_while(|c| c != '\n');
            }
            if self.position == start {
                break;
            }
        }
    }

    /// Reads a double-quoted string and decodes its escapes.
    ///
    /// The cursor must be on the opening quote. `\n`, `\t`, `\r`, `\\` and `\"`
    /// map to their usual characters; any other escaped character is kept and
    /// the backslash dropped. If the input ends before the closing quote, the
    /// text decoded so far is returned.
    pub fn read_quoted_string(&mut self) -> String {
        debug_assert_eq!(self.peek_char(), Some('"'));
        self.advance();

        let mut value = String::new();
        while let Some(c) = self.advance() {
            match c {
                '"' => return value,
                '\\' => match self.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some(other) => value.push(other),
                    None => break,
                },
                _ => value.push(c),
            }
        }
        value
    }

    /// Reads the longest run of bareword characters. May return an empty string.
    pub fn read_unquoted_string(&mut self) -> String {
        let start = self.position;
        self.advance_while(is_bareword_char);
        self.input[start..self.position].to_string()
    }

    /// Reads a quoted string if the cursor is on `"`, otherwise a bareword.
    pub fn read_string(&mut self) -> String {
        if self.peek_char() == Some('"') {
            self.read_quoted_string()
        } else {
            self.read_unquoted_string()
        }
    }

    /// Reads `-?digits(.digits)?` and returns it as a float.
    ///
    /// Returns `0.0` when no digits are present.
    pub fn read_bareword_number(&mut self) -> f64 {
        let start = self.position;
        if self.peek_char() == Some('-') {
            self.advance();
        }
        self.advance_while(|c| c.is_ascii_digit());
        if self.peek_char() == Some('.') {
            self.advance();
            self.advance_while(|c| c.is_ascii_digit());
        }
        let text = self.input[start..self.position].trim_end_matches('.');
        text.parse::<f64>().unwrap_or(0.0)
    }
}
