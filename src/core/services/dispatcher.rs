use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::core::errors::{Result, SealpostError};
use crate::core::models::messages::{DecryptRequest, EncryptRequest};
use crate::core::services::encryption_service::EncryptionService;
use crate::core::traits::cipher::CipherBackend;
use crate::core::traits::word_source::WordSource;

/// The endpoints the dispatcher knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Keygen,
    Encrypt,
    Decrypt,
}

impl Route {
    /// Match an inbound resource path. A single trailing `/` is ignored.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };
        match path {
            "/keygen" => Some(Route::Keygen),
            "/encrypt" => Some(Route::Encrypt),
            "/decrypt" => Some(Route::Decrypt),
            _ => None,
        }
    }
}

/// Status code and body handed back to the hosting runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

impl Response {
    fn ok(body: String) -> Self {
        Self { status: 200, body }
    }

    fn not_found() -> Self {
        Self {
            status: 404,
            body: String::new(),
        }
    }

    /// Every pipeline failure is a 500 with the raw error text; 4xx is
    /// reserved for unknown endpoints.
    fn failure(err: &SealpostError) -> Self {
        Self {
            status: 500,
            body: err.to_string(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Maps a resource path and JSON body to one pipeline run.
pub struct Dispatcher<C: CipherBackend, W: WordSource> {
    service: EncryptionService<C, W>,
}

impl<C: CipherBackend, W: WordSource> Dispatcher<C, W> {
    pub fn new(service: EncryptionService<C, W>) -> Self {
        Self { service }
    }

    pub fn dispatch(&self, path: &str, body: &str) -> Response {
        let Some(route) = Route::from_path(path) else {
            tracing::info!(path, status = 404, "unknown route");
            return Response::not_found();
        };

        let outcome = match route {
            Route::Keygen => self.service.generate_key_pair().and_then(|pair| to_json(&pair)),
            Route::Encrypt => parse::<EncryptRequest>(body)
                .and_then(|req| self.service.encrypt(&req))
                .and_then(|result| to_json(&result)),
            Route::Decrypt => parse::<DecryptRequest>(body)
                .and_then(|req| self.service.decrypt(&req))
                .and_then(|result| to_json(&result)),
        };

        match outcome {
            Ok(json) => {
                tracing::info!(path, status = 200, "request handled");
                Response::ok(json)
            }
            Err(e) => {
                let response = Response::failure(&e);
                tracing::warn!(path, status = response.status, kind = %e.kind(), "request failed");
                response
            }
        }
    }
}

fn parse<T: DeserializeOwned>(body: &str) -> Result<T> {
    Ok(serde_json::from_str(body)?)
}

fn to_json<T: Serialize>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}
