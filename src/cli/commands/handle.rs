use crate::cli::commands::io_helpers::{CliService, read_input};
use crate::core::errors::Result;
use crate::core::services::dispatcher::Dispatcher;

/// Execute the `sealpost handle` command.
///
/// Runs one request through the dispatcher exactly as the hosting
/// runtime would. Prints the status on stderr and the body on stdout.
/// Returns whether the status was 2xx.
pub fn execute(service: CliService, path: &str, body: Option<&str>) -> Result<bool> {
    let body = match body {
        Some(source) => read_input(Some(source))?,
        None => String::new(),
    };

    let dispatcher = Dispatcher::new(service);
    let response = dispatcher.dispatch(path, &body);

    eprintln!("status: {}", response.status);
    if !response.body.is_empty() {
        println!("{}", response.body);
    }

    Ok(response.is_success())
}
