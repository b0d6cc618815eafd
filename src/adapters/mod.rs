pub mod cipher;
pub mod wordlist;
