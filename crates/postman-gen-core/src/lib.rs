//! Shared protobuf descriptor types for `protoc-gen-postman`.
//!
//! This crate provides custom [`prost::Message`] types that keep the parts of
//! a descriptor the collection generator needs and that standard
//! `prost_types` either drops or decodes eagerly:
//!
//! - the `google.api.http` method extension (field 72295728),
//! - `SourceCodeInfo` leading comments,
//! - the `go_package` file option used for folder naming.
//!
//! You should not need to depend on this crate directly; use
//! `protoc-gen-postman` instead.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod descriptor;
