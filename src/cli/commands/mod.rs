pub mod decrypt;
pub mod encrypt;
pub mod handle;
pub mod io_helpers;
pub mod keygen;
pub mod passphrase;
