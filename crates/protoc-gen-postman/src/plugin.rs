//! `protoc` plugin protocol: `CodeGeneratorRequest` in, `CodeGeneratorResponse` out.

use postman_gen_core::descriptor::CodeGeneratorRequest;
use prost::Message as _;
use prost_types::compiler::{code_generator_response, CodeGeneratorResponse};

use crate::assemble::build_collection;
use crate::config::CollectionConfig;
use crate::error::{Error, Result};

/// Decode a serialized plugin request.
///
/// # Errors
///
/// Returns [`Error::ProtoDecode`] if the bytes are not a `CodeGeneratorRequest`.
pub fn decode_request(bytes: &[u8]) -> Result<CodeGeneratorRequest> {
    Ok(CodeGeneratorRequest::decode(bytes)?)
}

/// Generate the response for one plugin request.
///
/// The request's parameter string is applied on top of `base`. A request
/// with no files to generate yields an empty response; otherwise the
/// response carries exactly one file, the compact-JSON collection.
///
/// # Errors
///
/// Propagates parameter, assembly and serialization errors. Callers usually
/// turn them into [`error_response`] so `protoc` can report them.
pub fn respond(
    request: &CodeGeneratorRequest,
    base: CollectionConfig,
) -> Result<CodeGeneratorResponse> {
    let config = match request.parameter.as_deref() {
        Some(parameter) => base.with_parameter(parameter)?,
        None => base,
    };

    let mut response = CodeGeneratorResponse {
        supported_features: Some(code_generator_response::Feature::Proto3Optional as u64),
        ..Default::default()
    };

    if request.file_to_generate.is_empty() {
        return Ok(response);
    }

    let collection = build_collection(&request.proto_file, &request.file_to_generate, &config)?;
    let content = serde_json::to_string(&collection)?;
    tracing::info!(
        output = config.output_name(),
        folders = collection.item.len(),
        "collection generated"
    );

    response.file.push(code_generator_response::File {
        name: Some(config.output_name().to_string()),
        content: Some(content),
        ..Default::default()
    });
    Ok(response)
}

/// A response reporting `err` to `protoc`, which prints it and fails the run.
#[must_use]
pub fn error_response(err: &Error) -> CodeGeneratorResponse {
    CodeGeneratorResponse {
        error: Some(err.to_string()),
        ..Default::default()
    }
}

/// Decode `request_bytes`, generate, and encode the response.
///
/// Generation failures are folded into the response's `error` field;
/// only an undecodable request is returned as `Err`.
///
/// # Errors
///
/// Returns [`Error::ProtoDecode`] if `request_bytes` is not a valid request.
pub fn run(request_bytes: &[u8], base: CollectionConfig) -> Result<Vec<u8>> {
    let request = decode_request(request_bytes)?;
    let response = respond(&request, base).unwrap_or_else(|err| {
        tracing::error!(error = %err, "generation failed");
        error_response(&err)
    });
    Ok(response.encode_to_vec())
}
