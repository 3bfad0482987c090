//! HTTP verb and path extraction from `google.api.http` annotations.

use std::fmt;

use postman_gen_core::descriptor::{self, MethodDescriptorProto};

use crate::error::{Error, Result};

/// HTTP verbs a collection request can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpVerb {
    /// Query-string request.
    Get,
    /// JSON body request.
    Post,
}

impl HttpVerb {
    /// Upper-case method name as it appears in the collection.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The REST mapping of one RPC.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Request verb.
    pub verb: HttpVerb,
    /// Path template exactly as written in the annotation (e.g., `/v1/items/{id}`).
    pub path: String,
}

impl Binding {
    /// `POST` to an empty path, used when a method has no usable annotation.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            verb: HttpVerb::Post,
            path: String::new(),
        }
    }
}

/// Read the binding of `method` from its `google.api.http` option.
///
/// A non-empty `post` pattern yields `POST`, a non-empty `get` pattern yields
/// `GET`. Anything else (no options, no HTTP rule, an empty path, or a
/// `put`/`patch`/`delete` pattern) falls back to [`Binding::fallback`] and
/// logs a warning.
///
/// # Errors
///
/// Returns [`Error::MissingAnnotation`] if the method's option bytes cannot be
/// decoded as `MethodOptions`.
pub fn extract_binding(method: &MethodDescriptorProto, qualified_name: &str) -> Result<Binding> {
    let options = method
        .decode_options()
        .map_err(|source| Error::MissingAnnotation {
            method: qualified_name.to_string(),
            source,
        })?;

    let pattern = options.as_ref().and_then(descriptor::extract_http_pattern);

    Ok(match pattern {
        Some(("post", path)) if !path.is_empty() => Binding {
            verb: HttpVerb::Post,
            path: path.to_string(),
        },
        Some(("get", path)) if !path.is_empty() => Binding {
            verb: HttpVerb::Get,
            path: path.to_string(),
        },
        other => {
            tracing::warn!(
                method = qualified_name,
                pattern = other.map(|(verb, _)| verb),
                "no GET/POST http binding, using POST with an empty path"
            );
            Binding::fallback()
        }
    })
}
