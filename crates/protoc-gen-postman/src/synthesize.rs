//! Example value synthesis from message descriptors.
//!
//! Walks a message's fields and produces a placeholder [`Example`] for each
//! one, recursing into nested messages. Self-referential schemas are cut off
//! by a depth budget that is passed down by value: once it reaches zero,
//! nested message fields are left out of the result instead of expanded.

use std::collections::HashMap;

use postman_gen_core::descriptor::{DescriptorProto, FieldKind, FileDescriptorProto};

use crate::example::Example;

/// Nesting levels expanded below the request message.
pub const DEFAULT_MAX_DEPTH: u32 = 3;

/// Lookup table: fully-qualified message name (`.pkg.Outer.Inner`) → descriptor.
///
/// Built over every file in the request, imports included, so that fields
/// referencing types from other files resolve.
#[derive(Debug, Default)]
pub struct MessageIndex<'a> {
    messages: HashMap<String, &'a DescriptorProto>,
}

impl<'a> MessageIndex<'a> {
    /// Index every message (and nested message) in `files`.
    #[must_use]
    pub fn new(files: &'a [FileDescriptorProto]) -> Self {
        let mut messages = HashMap::new();

        for file in files {
            let scope = match file.package.as_deref() {
                Some(package) if !package.is_empty() => format!(".{package}"),
                _ => String::new(),
            };
            for msg in &file.message_type {
                index_message(&mut messages, &scope, msg);
            }
        }

        Self { messages }
    }

    /// Resolve a fully-qualified type name as written in `type_name`/`input_type`.
    #[must_use]
    pub fn get(&self, fqn: &str) -> Option<&'a DescriptorProto> {
        self.messages.get(fqn).copied()
    }

    /// Number of indexed messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    /// Whether no messages were indexed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// Recursively register a message and its nested types.
fn index_message<'a>(
    map: &mut HashMap<String, &'a DescriptorProto>,
    scope: &str,
    msg: &'a DescriptorProto,
) {
    let fqn = format!("{scope}.{}", msg.name.as_deref().unwrap_or(""));

    for nested in &msg.nested_type {
        index_message(map, &fqn, nested);
    }
    map.insert(fqn, msg);
}

/// Produce an example object for `message`.
///
/// | field kind | value |
/// |---|---|
/// | `bool` | `false` |
/// | integer / floating | `0` |
/// | enum / string / bytes | `""` |
/// | group | `"group"` |
/// | unknown | `"other"` |
/// | message | nested object while `depth > 0`, otherwise omitted |
///
/// Repeated fields become a one-element list of the value above. A
/// `map<K, V>` field is a single `{key, value}` object instead.
#[must_use]
pub fn synthesize(message: &DescriptorProto, index: &MessageIndex<'_>, depth: u32) -> Example {
    let mut entries = Vec::with_capacity(message.field.len());

    for field in &message.field {
        let name = field.name.as_deref().unwrap_or("");
        let mut map_entry = false;

        let value = match field.kind() {
            FieldKind::Bool => Example::Bool(false),
            FieldKind::Numeric => Example::Number(0),
            FieldKind::StringLike => Example::String(String::new()),
            FieldKind::Group => Example::String("group".to_string()),
            FieldKind::Unknown(_) => Example::String("other".to_string()),
            FieldKind::Message => {
                if depth == 0 {
                    continue;
                }
                let type_name = field.type_name.as_deref().unwrap_or("");
                let Some(nested) = index.get(type_name) else {
                    tracing::warn!(
                        field = name,
                        type_name,
                        "nested message type not found, field omitted"
                    );
                    continue;
                };
                map_entry = nested.is_map_entry();
                synthesize(nested, index, depth - 1)
            }
        };

        let value = if field.is_repeated() && !map_entry {
            Example::List(vec![value])
        } else {
            value
        };
        entries.push((name.to_string(), value));
    }

    Example::Object(entries)
}
