pub mod descriptor;
pub mod messages;
pub mod scheme;
