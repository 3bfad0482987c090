#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! ## API Reference

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assemble;
mod binding;
mod collection;
mod comment;
mod config;
mod error;
mod example;
mod flatten;
pub mod plugin;
mod synthesize;

pub use postman_gen_core::descriptor;

pub use assemble::build_collection;
pub use binding::{extract_binding, Binding, HttpVerb};
pub use collection::{
    Body, BodyOptions, Collection, Header, Info, Item, Query, RawOptions, Request, Url,
    COLLECTION_SCHEMA,
};
pub use comment::{parse_comment, MethodMetadata, GRPC_METADATA_PREFIX, REQ_METADATA_MARKER};
pub use config::{CollectionConfig, ProjectConfig, StaticHeader, DEFAULT_DOMAIN_VARIABLE, DEFAULT_OUTPUT};
pub use error::{Error, Result};
pub use example::Example;
pub use flatten::{flatten, query_string};
pub use synthesize::{synthesize, MessageIndex, DEFAULT_MAX_DEPTH};
