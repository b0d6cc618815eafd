pub mod credential_resolver;
pub mod dispatcher;
pub mod encryption_service;
pub mod passphrase_generator;
