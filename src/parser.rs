use crate::error::{DepthExceeded, PbxError, SyntaxError};
use crate::lexer::{is_bareword_char, Tokenizer};
use crate::value::{looks_numeric, Dictionary, Value};
use log::debug;
use miette::NamedSource;

/// Default limit on dictionary/array nesting.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Options controlling how text is parsed.
///
/// # Examples
///
/// ```rust
/// use pbxproj_core::ParseOptions;
///
/// let options = ParseOptions::new()
///     .with_file_name("App.xcodeproj/project.pbxproj")
///     .with_max_depth(64);
/// assert_eq!(options.max_depth, 64);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Name shown in diagnostics.
    pub file_name: String,
    /// Deepest dictionary/array nesting accepted before failing with `DepthExceeded`.
    pub max_depth: usize,
    /// Whether a quoted token such as `"42"` is reinterpreted as a number like
    /// its bareword counterpart.
    pub coerce_quoted_numbers: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            file_name: "project.pbxproj".to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            coerce_quoted_numbers: true,
        }
    }
}

impl ParseOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = name.into();
        self
    }

    #[must_use]
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    #[must_use]
    pub fn with_coerce_quoted_numbers(mut self, coerce: bool) -> Self {
        self.coerce_quoted_numbers = coerce;
        self
    }
}

/// Turns a scalar token into a value. This is the only place where a string
/// may become a number.
fn classify_scalar(token: String, quoted: bool, options: &ParseOptions) -> Value {
    if (!quoted || options.coerce_quoted_numbers) && looks_numeric(&token) {
        Value::Number(Tokenizer::new(&token).read_bareword_number())
    } else {
        Value::String(token)
    }
}

/// A recursive descent parser for the ASCII plist grammar.
#[derive(Debug)]
pub struct Parser<'a> {
    source_text: &'a str,
    tokenizer: Tokenizer<'a>,
    options: ParseOptions,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source_text: &'a str) -> Self {
        Self::with_options(source_text, ParseOptions::default())
    }

    pub fn with_options(source_text: &'a str, options: ParseOptions) -> Self {
        Self {
            source_text,
            tokenizer: Tokenizer::new(source_text),
            options,
            depth: 0,
        }
    }

    // === Main Parsing Methods ===

    ///    Document ::= "{" { Assignment } "}" | { Assignment }
    pub fn parse_fields(&mut self) -> Result<Dictionary, PbxError> {
        debug!(
            "parsing {} ({} bytes)",
            self.options.file_name,
            self.source_text.len()
        );
        self.tokenizer.skip_insignificant();

        let fields = if self.tokenizer.peek_char() == Some('{') {
            let fields = self.parse_dictionary()?;
            self.tokenizer.skip_insignificant();
            if let Some(c) = self.tokenizer.peek_char() {
                return Err(self.err_unexpected(c, "end of input after the root dictionary"));
            }
            fields
        } else {
            let mut fields = Dictionary::new();
            loop {
                self.tokenizer.skip_insignificant();
                if self.tokenizer.at_end() {
                    break;
                }
                self.parse_assignment(&mut fields)?;
            }
            fields
        };

        debug!("parsed {} top-level fields", fields.len());
        Ok(fields)
    }

    /// Value ::= Dictionary | Array | String | Number
    pub fn parse_value(&mut self) -> Result<Value, PbxError> {
        self.tokenizer.skip_insignificant();

        let Some(c) = self.tokenizer.peek_char() else {
            return Ok(Value::Null);
        };

        match c {
            '{' => self.parse_dictionary().map(Value::Dictionary),
            '(' => self.parse_array().map(Value::Array),
            '"' => {
                let token = self.tokenizer.read_quoted_string();
                Ok(classify_scalar(token, true, &self.options))
            }
            // Digits and '-' are bareword characters, so numbers are read as
            // barewords and recognized afterwards.
            c if is_bareword_char(c) => {
                let token = self.tokenizer.read_unquoted_string();
                Ok(classify_scalar(token, false, &self.options))
            }
            c => Err(self.err_unexpected(c, "a dictionary, array, string or number")),
        }
    }

    /// Dictionary ::= "{" { Assignment } "}"
    fn parse_dictionary(&mut self) -> Result<Dictionary, PbxError> {
        let start = self.tokenizer.offset();
        self.enter(start)?;
        self.expect('{')?;

        let mut dict = Dictionary::new();
        loop {
            self.tokenizer.skip_insignificant();
            match self.tokenizer.peek_char() {
                None => {
                    return Err(SyntaxError::UnterminatedDictionary {
                        src: self.named_source(),
                        span: (start, 1).into(),
                    }
                    .into())
                }
                Some('}') => {
                    self.tokenizer.advance();
                    break;
                }
                Some(_) => self.parse_assignment(&mut dict)?,
            }
        }

        self.depth -= 1;
        Ok(dict)
    }

    /// Array ::= "(" [ Value { [ "," ] Value } [ "," ] ] ")"
    fn parse_array(&mut self) -> Result<Vec<Value>, PbxError> {
        let start = self.tokenizer.offset();
        self.enter(start)?;
        self.expect('(')?;

        let mut items = Vec::new();
        loop {
            self.tokenizer.skip_insignificant();
            match self.tokenizer.peek_char() {
                None => {
                    return Err(SyntaxError::UnterminatedArray {
                        src: self.named_source(),
                        span: (start, 1).into(),
                    }
                    .into())
                }
                Some(')') => {
                    self.tokenizer.advance();
                    break;
                }
                Some(_) => {
                    items.push(self.parse_value()?);
                    self.tokenizer.skip_insignificant();
                    if self.tokenizer.peek_char() == Some(',') {
                        self.tokenizer.advance();
                    }
                }
            }
        }

        self.depth -= 1;
        Ok(items)
    }

    /// Assignment ::= Key "=" Value [ ";" ]
    ///
    /// The cursor must be on the first character of the key. A repeated key
    /// replaces the earlier value in place.
    fn parse_assignment(&mut self, target: &mut Dictionary) -> Result<(), PbxError> {
        let key = self.parse_key()?;

        self.tokenizer.skip_insignificant();
        if self.tokenizer.peek_char() != Some('=') {
            return Err(SyntaxError::MissingEquals {
                src: self.named_source(),
                span: (self.tokenizer.offset(), 0).into(),
                key,
            }
            .into());
        }
        self.tokenizer.advance();

        let value = self.parse_value()?;
        target.insert(key, value);

        self.tokenizer.skip_insignificant();
        if self.tokenizer.peek_char() == Some(';') {
            self.tokenizer.advance();
        }
        Ok(())
    }

    /// Key ::= QuotedString | Bareword
    fn parse_key(&mut self) -> Result<String, PbxError> {
        match self.tokenizer.peek_char() {
            Some(c) if c == '"' || is_bareword_char(c) => Ok(self.tokenizer.read_string()),
            Some(c) => Err(self.err_unexpected(c, "a key")),
            None => Ok(String::new()),
        }
    }

    // === Helper Methods ===

    fn enter(&mut self, offset: usize) -> Result<(), PbxError> {
        if self.depth >= self.options.max_depth {
            return Err(DepthExceeded {
                src: self.named_source(),
                span: (offset, 1).into(),
                limit: self.options.max_depth,
            }
            .into());
        }
        self.depth += 1;
        Ok(())
    }

    fn expect(&mut self, expected: char) -> Result<(), PbxError> {
        self.tokenizer.skip_insignificant();
        match self.tokenizer.peek_char() {
            Some(c) if c == expected => {
                self.tokenizer.advance();
                Ok(())
            }
            Some(c) => Err(self.err_unexpected(c, &format!("'{expected}'"))),
            None => Err(self.err_unexpected('\0', &format!("'{expected}'"))),
        }
    }

    fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(self.options.file_name.clone(), self.source_text.to_string())
    }

    fn err_unexpected(&self, found: char, expected: &str) -> PbxError {
        let offset = self.tokenizer.offset();
        debug!("unexpected '{found}' at byte {offset}, expected {expected}");
        SyntaxError::UnexpectedCharacter {
            src: self.named_source(),
            span: (offset, found.len_utf8()).into(),
            found,
            expected: expected.to_string(),
        }
        .into()
    }
}
