//! Method description and header declarations from leading comments.
//!
//! A line of the form `@reqMetadata <name>` declares a gRPC metadata header
//! the request should send. Every other line is description text.

use crate::collection::Header;

/// Marker token that opens a header declaration line.
pub const REQ_METADATA_MARKER: &str = "@reqMetadata";

/// Prefix grpc-gateway uses to forward HTTP headers as gRPC metadata.
pub const GRPC_METADATA_PREFIX: &str = "Grpc-Metadata-";

/// Description and declared headers parsed from one method comment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MethodMetadata {
    /// Non-marker lines concatenated as-is.
    pub description: String,
    /// Declared headers, in comment order.
    pub headers: Vec<Header>,
}

/// Split `comment` into description text and `@reqMetadata` headers.
///
/// Non-marker lines are appended verbatim with no separator, so a
/// multi-line comment collapses into a single line of text.
#[must_use]
pub fn parse_comment(comment: &str) -> MethodMetadata {
    let mut meta = MethodMetadata::default();

    for line in comment.split('\n') {
        let mut tokens = line.split_whitespace();
        match (tokens.next(), tokens.next()) {
            (Some(REQ_METADATA_MARKER), Some(name)) => {
                let name = name.strip_prefix('*').unwrap_or(name);
                meta.headers.push(Header::text(
                    format!("{GRPC_METADATA_PREFIX}{name}"),
                    name.to_string(),
                ));
            }
            _ => meta.description.push_str(line),
        }
    }

    meta
}
