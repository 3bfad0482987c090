//! Minimal protobuf descriptor types for collection generation.
//!
//! Standard [`prost_types::MethodOptions`] drops the `google.api.http` extension
//! (field 72295728) during decoding because prost doesn't retain unknown fields.
//! These custom types preserve it, along with the `SourceCodeInfo` comments and
//! the `go_package` option.
//!
//! Method options are kept as raw bytes and decoded on demand with
//! [`MethodDescriptorProto::decode_options`], so a malformed option set is
//! attributed to the method that carries it instead of failing the whole
//! request decode.

#[allow(missing_docs, clippy::all, clippy::pedantic, clippy::nursery)]
mod types {
    use prost::Message;

    /// `google.protobuf.compiler.CodeGeneratorRequest` as sent by `protoc` on stdin.
    #[derive(Clone, PartialEq, Message)]
    pub struct CodeGeneratorRequest {
        /// Files explicitly listed on the command line, in order.
        #[prost(string, repeated, tag = "1")]
        pub file_to_generate: Vec<String>,
        /// The `--postman_opt` parameter string, if any.
        #[prost(string, optional, tag = "2")]
        pub parameter: Option<String>,
        /// Every file in `file_to_generate` plus everything they import,
        /// in topological order.
        #[prost(message, repeated, tag = "15")]
        pub proto_file: Vec<FileDescriptorProto>,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct FileDescriptorSet {
        #[prost(message, repeated, tag = "1")]
        pub file: Vec<FileDescriptorProto>,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct FileDescriptorProto {
        #[prost(string, optional, tag = "1")]
        pub name: Option<String>,
        #[prost(string, optional, tag = "2")]
        pub package: Option<String>,
        #[prost(message, repeated, tag = "4")]
        pub message_type: Vec<DescriptorProto>,
        #[prost(message, repeated, tag = "6")]
        pub service: Vec<ServiceDescriptorProto>,
        #[prost(message, optional, tag = "8")]
        pub options: Option<FileOptions>,
        /// Only present when the compiler was asked to retain source info.
        #[prost(message, optional, tag = "9")]
        pub source_code_info: Option<SourceCodeInfo>,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct FileOptions {
        /// `option go_package = "example.com/foo/bar;bar";`
        #[prost(string, optional, tag = "11")]
        pub go_package: Option<String>,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct SourceCodeInfo {
        #[prost(message, repeated, tag = "1")]
        pub location: Vec<Location>,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct Location {
        /// Field-number/index path from the file root to the element.
        #[prost(int32, repeated, packed = "true", tag = "1")]
        pub path: Vec<i32>,
        #[prost(string, optional, tag = "3")]
        pub leading_comments: Option<String>,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct DescriptorProto {
        #[prost(string, optional, tag = "1")]
        pub name: Option<String>,
        #[prost(message, repeated, tag = "2")]
        pub field: Vec<FieldDescriptorProto>,
        #[prost(message, repeated, tag = "3")]
        pub nested_type: Vec<DescriptorProto>,
        #[prost(message, optional, tag = "7")]
        pub options: Option<MessageOptions>,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct MessageOptions {
        /// Set by the compiler on the synthesized `FooEntry` type behind a `map<K, V>` field.
        #[prost(bool, optional, tag = "7")]
        pub map_entry: Option<bool>,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct FieldDescriptorProto {
        #[prost(string, optional, tag = "1")]
        pub name: Option<String>,
        /// 1=optional, 2=required, 3=repeated.
        #[prost(int32, optional, tag = "4")]
        pub label: Option<i32>,
        /// Protobuf field type enum: 1=double, 5=int32, 9=string, 11=message, 14=enum, …
        #[prost(int32, optional, tag = "5")]
        pub r#type: Option<i32>,
        /// Fully-qualified type name for message/enum fields (e.g., `.shop.v1.Item`).
        #[prost(string, optional, tag = "6")]
        pub type_name: Option<String>,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct ServiceDescriptorProto {
        #[prost(string, optional, tag = "1")]
        pub name: Option<String>,
        #[prost(message, repeated, tag = "2")]
        pub method: Vec<MethodDescriptorProto>,
    }

    #[derive(Clone, PartialEq, Message)]
    pub struct MethodDescriptorProto {
        #[prost(string, optional, tag = "1")]
        pub name: Option<String>,
        #[prost(string, optional, tag = "2")]
        pub input_type: Option<String>,
        #[prost(string, optional, tag = "3")]
        pub output_type: Option<String>,
        /// Encoded `MethodOptions`; see [`MethodDescriptorProto::decode_options`].
        #[prost(bytes = "vec", optional, tag = "4")]
        pub options: Option<Vec<u8>>,
        #[prost(bool, optional, tag = "5")]
        pub client_streaming: Option<bool>,
        #[prost(bool, optional, tag = "6")]
        pub server_streaming: Option<bool>,
    }

    /// Method options with the `google.api.http` extension (field 72295728).
    #[derive(Clone, PartialEq, Message)]
    pub struct MethodOptions {
        #[prost(message, optional, tag = "72295728")]
        pub http: Option<HttpRule>,
    }

    /// [`google.api.HttpRule`]: defines REST mapping for an RPC.
    #[derive(Clone, PartialEq, Message)]
    pub struct HttpRule {
        #[prost(oneof = "HttpPattern", tags = "2, 3, 4, 5, 6")]
        pub pattern: Option<HttpPattern>,
        #[prost(string, tag = "7")]
        pub body: String,
    }

    #[derive(Clone, PartialEq, prost::Oneof)]
    pub enum HttpPattern {
        #[prost(string, tag = "2")]
        Get(String),
        #[prost(string, tag = "3")]
        Put(String),
        #[prost(string, tag = "4")]
        Post(String),
        #[prost(string, tag = "5")]
        Delete(String),
        #[prost(string, tag = "6")]
        Patch(String),
    }
}

pub use types::*;

/// Proto field type constants (from `google.protobuf.FieldDescriptorProto.Type`).
pub mod field_type {
    /// `TYPE_DOUBLE = 1`
    pub const DOUBLE: i32 = 1;
    /// `TYPE_FLOAT = 2`
    pub const FLOAT: i32 = 2;
    /// `TYPE_INT64 = 3`
    pub const INT64: i32 = 3;
    /// `TYPE_UINT64 = 4`
    pub const UINT64: i32 = 4;
    /// `TYPE_INT32 = 5`
    pub const INT32: i32 = 5;
    /// `TYPE_FIXED64 = 6`
    pub const FIXED64: i32 = 6;
    /// `TYPE_FIXED32 = 7`
    pub const FIXED32: i32 = 7;
    /// `TYPE_BOOL = 8`
    pub const BOOL: i32 = 8;
    /// `TYPE_STRING = 9`
    pub const STRING: i32 = 9;
    /// `TYPE_GROUP = 10`
    pub const GROUP: i32 = 10;
    /// `TYPE_MESSAGE = 11`
    pub const MESSAGE: i32 = 11;
    /// `TYPE_BYTES = 12`
    pub const BYTES: i32 = 12;
    /// `TYPE_UINT32 = 13`
    pub const UINT32: i32 = 13;
    /// `TYPE_ENUM = 14`
    pub const ENUM: i32 = 14;
    /// `TYPE_SFIXED32 = 15`
    pub const SFIXED32: i32 = 15;
    /// `TYPE_SFIXED64 = 16`
    pub const SFIXED64: i32 = 16;
    /// `TYPE_SINT32 = 17`
    pub const SINT32: i32 = 17;
    /// `TYPE_SINT64 = 18`
    pub const SINT64: i32 = 18;
}

/// `LABEL_REPEATED = 3` from `google.protobuf.FieldDescriptorProto.Label`.
pub const LABEL_REPEATED: i32 = 3;

/// `FileDescriptorProto.service` field number, first element of a service location path.
const FILE_SERVICE_FIELD: i32 = 6;
/// `ServiceDescriptorProto.method` field number.
const SERVICE_METHOD_FIELD: i32 = 2;

/// Closed classification of a field's wire type, as far as example
/// synthesis cares about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// `bool`
    Bool,
    /// Every integer and floating-point type.
    Numeric,
    /// `string`, `bytes` and enums.
    StringLike,
    /// A nested message.
    Message,
    /// A proto2 group.
    Group,
    /// A type id outside the known range (or absent).
    Unknown(i32),
}

impl FieldKind {
    /// Classify a `FieldDescriptorProto.Type` id.
    #[must_use]
    pub fn from_type_id(type_id: i32) -> Self {
        use field_type as t;
        match type_id {
            t::BOOL => Self::Bool,
            t::DOUBLE | t::FLOAT | t::INT64 | t::UINT64 | t::INT32 | t::FIXED64 | t::FIXED32
            | t::UINT32 | t::SFIXED32 | t::SFIXED64 | t::SINT32 | t::SINT64 => Self::Numeric,
            t::STRING | t::BYTES | t::ENUM => Self::StringLike,
            t::MESSAGE => Self::Message,
            t::GROUP => Self::Group,
            other => Self::Unknown(other),
        }
    }
}

impl FieldDescriptorProto {
    /// The field's [`FieldKind`]; a missing type id is [`FieldKind::Unknown`].
    #[must_use]
    pub fn kind(&self) -> FieldKind {
        FieldKind::from_type_id(self.r#type.unwrap_or(0))
    }

    /// Whether the field is declared `repeated`.
    #[must_use]
    pub fn is_repeated(&self) -> bool {
        self.label == Some(LABEL_REPEATED)
    }
}

impl DescriptorProto {
    /// Whether this is the compiler-generated entry type of a `map<K, V>` field.
    #[must_use]
    pub fn is_map_entry(&self) -> bool {
        self.options
            .as_ref()
            .and_then(|o| o.map_entry)
            .unwrap_or(false)
    }
}

impl MethodDescriptorProto {
    /// Decode the method's option set.
    ///
    /// Returns `Ok(None)` when the method declares no options at all.
    ///
    /// # Errors
    ///
    /// Returns the decode error when the option bytes are not a valid
    /// `MethodOptions` message.
    pub fn decode_options(&self) -> Result<Option<MethodOptions>, prost::DecodeError> {
        use prost::Message as _;

        self.options
            .as_deref()
            .map(|bytes| MethodOptions::decode(bytes))
            .transpose()
    }
}

impl FileDescriptorProto {
    /// Leading comment attached to `service[service_index].method[method_index]`.
    ///
    /// Only available when the descriptor carries `SourceCodeInfo`.
    #[must_use]
    pub fn method_leading_comments(
        &self,
        service_index: usize,
        method_index: usize,
    ) -> Option<&str> {
        let service_index = i32::try_from(service_index).ok()?;
        let method_index = i32::try_from(method_index).ok()?;
        let wanted = [
            FILE_SERVICE_FIELD,
            service_index,
            SERVICE_METHOD_FIELD,
            method_index,
        ];

        self.source_code_info
            .as_ref()?
            .location
            .iter()
            .find(|loc| loc.path == wanted)
            .and_then(|loc| loc.leading_comments.as_deref())
    }
}

/// Extract `(http_method, path)` from a decoded `google.api.http` annotation.
#[must_use]
pub fn extract_http_pattern(options: &MethodOptions) -> Option<(&'static str, &str)> {
    let pattern = options.http.as_ref().and_then(|h| h.pattern.as_ref())?;

    Some(match pattern {
        HttpPattern::Get(p) => ("get", p.as_str()),
        HttpPattern::Put(p) => ("put", p.as_str()),
        HttpPattern::Post(p) => ("post", p.as_str()),
        HttpPattern::Delete(p) => ("delete", p.as_str()),
        HttpPattern::Patch(p) => ("patch", p.as_str()),
    })
}
