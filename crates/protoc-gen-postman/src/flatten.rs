//! Flattening of example objects into query-string parameters.

use crate::collection::Query;
use crate::example::Example;

/// Flatten an example object into `key=value` pairs.
///
/// Nested objects contribute their leaves under dotted keys
/// (`filter.range.min`). Lists are not descended into; they are rendered with
/// the bracketed [`Display`](std::fmt::Display) form of [`Example`]. Keys are
/// not deduplicated.
///
/// A non-object value flattens to nothing.
#[must_use]
pub fn flatten(value: &Example) -> Vec<Query> {
    let mut out = Vec::new();
    if let Some(entries) = value.as_object() {
        flatten_into(&mut out, None, entries);
    }
    out
}

fn flatten_into(out: &mut Vec<Query>, prefix: Option<&str>, entries: &[(String, Example)]) {
    for (key, value) in entries {
        let key = match prefix {
            Some(prefix) => format!("{prefix}.{key}"),
            None => key.clone(),
        };

        match value {
            Example::Object(children) => flatten_into(out, Some(&key), children),
            leaf => out.push(Query {
                key,
                value: leaf.to_string(),
            }),
        }
    }
}

/// Render pairs as `?k=v&k2=v2`, values inserted without percent-encoding.
///
/// The leading `?` is always present, even when `params` is empty.
#[must_use]
pub fn query_string(params: &[Query]) -> String {
    let pairs: Vec<String> = params
        .iter()
        .map(|q| format!("{}={}", q.key, q.value))
        .collect();
    format!("?{}", pairs.join("&"))
}
