pub mod age_backend;
pub mod armor;
