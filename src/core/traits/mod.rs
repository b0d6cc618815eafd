pub mod cipher;
pub mod word_source;
