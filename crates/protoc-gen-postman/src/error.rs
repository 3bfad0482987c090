//! Typed error enum for the `protoc-gen-postman` library API.
//!
//! Library consumers can match on specific variants. The CLI (`main.rs`)
//! converts these to `anyhow::Error` at the binary boundary for richer
//! context messages.

/// Errors produced by `protoc-gen-postman` library operations.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// File I/O failure (reading config or descriptor files).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML project config parsing failure.
    #[error(transparent)]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Plugin request or `FileDescriptorSet` decoding failure.
    #[error("failed to decode proto descriptor: {0}")]
    ProtoDecode(#[from] prost::DecodeError),

    /// A method's option set could not be decoded into `MethodOptions`.
    ///
    /// Aborts the whole run: emitting the collection without this method
    /// would silently produce an incomplete artifact.
    #[error("method '{method}': option set is not a decodable MethodOptions message")]
    MissingAnnotation {
        /// Fully-qualified method name (`pkg.Service.Method`).
        method: String,
        /// Underlying decode failure.
        #[source]
        source: prost::DecodeError,
    },

    /// A method's input type is not defined in any file of the request.
    #[error("method '{method}': input type '{type_name}' not found in proto descriptors")]
    UnknownMessage {
        /// Fully-qualified method name (`pkg.Service.Method`).
        method: String,
        /// The unresolved fully-qualified message name.
        type_name: String,
    },

    /// A plugin parameter had a malformed value.
    #[error("invalid plugin parameter '{key}={value}'")]
    InvalidParameter {
        /// Parameter key (e.g., `max_depth`).
        key: String,
        /// The rejected value.
        value: String,
    },

    /// The collection document could not be encoded as JSON.
    #[error("failed to serialize collection: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Convenience alias used throughout the library's public API.
pub type Result<T> = std::result::Result<T, Error>;
