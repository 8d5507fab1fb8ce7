pub mod api;
pub mod comments;
pub mod document;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod serializer;
pub mod utils;
pub mod value;

pub use api::{parse, parse_with_options, serialize, stringify};
#[allow(deprecated)]
pub use api::build;
pub use comments::label_for;
pub use document::Document;
pub use error::{DepthExceeded, PbxError, SyntaxError};
pub use parser::ParseOptions;
pub use serializer::{CommentStrategy, SerializeOptions};
pub use value::{Dictionary, Value};
