use crate::utils::line_and_column;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PbxError>;

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum PbxError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Syntax(#[from] SyntaxError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    DepthExceeded(#[from] DepthExceeded),
}

impl PbxError {
    /// Byte offset into the source where the error was detected.
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            PbxError::Syntax(err) => err.offset(),
            PbxError::DepthExceeded(err) => err.span.offset(),
        }
    }
}

#[derive(Error, Debug, Diagnostic, Clone)]
pub enum SyntaxError {
    #[error("Unexpected character '{found}'")]
    #[diagnostic(
        code(parser::unexpected_character),
        help("Expected {expected}.")
    )]
    UnexpectedCharacter {
        #[source_code]
        src: NamedSource<String>,
        #[label("unexpected '{found}'")]
        span: SourceSpan,
        found: char,
        expected: String,
    },

    #[error("Unterminated dictionary")]
    #[diagnostic(
        code(parser::unterminated_dictionary),
        help("The input ended before the closing '}}' of this dictionary.")
    )]
    UnterminatedDictionary {
        #[source_code]
        src: NamedSource<String>,
        #[label("dictionary opened here")]
        span: SourceSpan,
    },

    #[error("Unterminated array")]
    #[diagnostic(
        code(parser::unterminated_array),
        help("The input ended before the closing ')' of this array.")
    )]
    UnterminatedArray {
        #[source_code]
        src: NamedSource<String>,
        #[label("array opened here")]
        span: SourceSpan,
    },

    #[error("Expected '=' after key '{key}'")]
    #[diagnostic(
        code(parser::missing_equals),
        help("Every assignment has the form `key = value;`.")
    )]
    MissingEquals {
        #[source_code]
        src: NamedSource<String>,
        #[label("expected '=' here")]
        span: SourceSpan,
        key: String,
    },
}

impl SyntaxError {
    fn parts(&self) -> (&NamedSource<String>, SourceSpan) {
        match self {
            SyntaxError::UnexpectedCharacter { src, span, .. }
            | SyntaxError::UnterminatedDictionary { src, span }
            | SyntaxError::UnterminatedArray { src, span }
            | SyntaxError::MissingEquals { src, span, .. } => (src, *span),
        }
    }

    /// Byte offset of the offending position.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.parts().1.offset()
    }

    /// 1-based line and column of the offending position.
    #[must_use]
    pub fn line_column(&self) -> (usize, usize) {
        let (src, span) = self.parts();
        line_and_column(src.inner(), span.offset())
    }
}

#[derive(Error, Debug, Diagnostic, Clone)]
#[error("Maximum nesting depth of {limit} exceeded")]
#[diagnostic(
    code(parser::depth_exceeded),
    help("Raise the limit with `ParseOptions::with_max_depth` if this input is legitimate.")
)]
pub struct DepthExceeded {
    #[source_code]
    pub src: NamedSource<String>,
    #[label("nesting too deep here")]
    pub span: SourceSpan,
    pub limit: usize,
}
