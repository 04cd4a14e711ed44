//! CSV tokenizing primitives

mod chars;
mod tokenizer;

pub use chars::{CharRead, Utf8Chars};
pub use tokenizer::LineTokenizer;
