//! Collection assembly: package → service → method → request.
//!
//! Files are grouped into package folders in the order the compiler
//! delivered them; services and methods keep declaration order. Every method
//! becomes one leaf request whose body (POST) or query string (GET) is built
//! from an example of its input message.

use postman_gen_core::descriptor::{FileDescriptorProto, MethodDescriptorProto};

use crate::binding::{extract_binding, HttpVerb};
use crate::collection::{Body, Collection, Info, Item, Request, Url, COLLECTION_SCHEMA};
use crate::comment::parse_comment;
use crate::config::CollectionConfig;
use crate::error::{Error, Result};
use crate::flatten::{flatten, query_string};
use crate::synthesize::{synthesize, MessageIndex};

/// Build the collection for `targets` (file names) out of `files`.
///
/// `files` must contain every file the targets import, so that message types
/// referenced across files resolve. Files not named in `targets` only serve as
/// type sources.
///
/// # Errors
///
/// Returns [`Error::MissingAnnotation`] for a method with undecodable
/// options, [`Error::UnknownMessage`] for an unresolvable input type, and
/// [`Error::Serialization`] if a request body cannot be rendered.
pub fn build_collection(
    files: &[FileDescriptorProto],
    targets: &[String],
    config: &CollectionConfig,
) -> Result<Collection> {
    let index = MessageIndex::new(files);
    tracing::debug!(messages = index.len(), targets = targets.len(), "indexed messages");

    let mut item = Vec::new();
    for (folder, group) in group_by_package(files, targets) {
        let mut package_item = Item::folder(folder);
        for file in group {
            for (service_index, service) in file.service.iter().enumerate() {
                let service_name = service.name.as_deref().unwrap_or("");
                let mut service_item = Item::folder(go_camel_case(service_name));

                for (method_index, method) in service.method.iter().enumerate() {
                    let site = MethodSite {
                        file,
                        service_name,
                        service_index,
                        method,
                        method_index,
                    };
                    service_item.item.push(method_item(&site, &index, config)?);
                }

                package_item.item.push(service_item);
            }
        }
        item.push(package_item);
    }

    Ok(Collection {
        info: Info {
            name: document_name(config),
            schema: COLLECTION_SCHEMA.to_string(),
        },
        item,
    })
}

/// `info.name`: the configured name, or `version.` + local time as
/// `YYYYMMDDhhmmss` with a 12-hour clock hour.
fn document_name(config: &CollectionConfig) -> String {
    match &config.document_name {
        Some(name) => name.clone(),
        None => format!("version.{}", chrono::Local::now().format("%Y%m%d%I%M%S")),
    }
}

/// Target files grouped by folder name, in first-appearance order.
pub(crate) fn group_by_package<'a>(
    files: &'a [FileDescriptorProto],
    targets: &[String],
) -> Vec<(String, Vec<&'a FileDescriptorProto>)> {
    let mut groups: Vec<(String, Vec<&'a FileDescriptorProto>)> = Vec::new();

    for file in files {
        let file_name = file.name.as_deref().unwrap_or("");
        if !targets.iter().any(|t| t == file_name) {
            continue;
        }

        let folder = package_folder_name(file);
        match groups.iter_mut().find(|(name, _)| *name == folder) {
            Some((_, group)) => group.push(file),
            None => groups.push((folder, vec![file])),
        }
    }

    groups
}

/// Folder name for a file's package.
///
/// Uses the Go package name so collections match what the Go toolchain
/// users of the same protos see: the part of `go_package` after `;`, else
/// its last path segment, else the proto package with `.` → `_`.
pub(crate) fn package_folder_name(file: &FileDescriptorProto) -> String {
    let go_package = file
        .options
        .as_ref()
        .and_then(|o| o.go_package.as_deref())
        .filter(|p| !p.is_empty());

    let raw = match go_package {
        Some(gp) => match gp.split_once(';') {
            Some((_, name)) => name,
            None => gp.rsplit('/').next().unwrap_or(gp),
        },
        None => match file.package.as_deref() {
            Some(package) if !package.is_empty() => package,
            _ => file
                .name
                .as_deref()
                .unwrap_or("")
                .rsplit('/')
                .next()
                .unwrap_or("")
                .trim_end_matches(".proto"),
        },
    };

    raw.chars()
        .map(|c| if c.is_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Identifier as the Go generator spells it: `get_item` → `GetItem`,
/// `_x` → `XX`, `a.B` → `A_B`.
///
/// So item names match the Go client for the same protos.
pub(crate) fn go_camel_case(name: &str) -> String {
    let bytes = name.as_bytes();
    let is_lower = |i: usize| bytes.get(i).is_some_and(u8::is_ascii_lowercase);
    let mut out = String::with_capacity(name.len());

    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i];
        match c {
            b'.' if is_lower(i + 1) => {}
            b'.' => out.push('_'),
            b'_' if i == 0 || bytes[i - 1] == b'.' => out.push('X'),
            b'_' if is_lower(i + 1) => {}
            b'0'..=b'9' => out.push(char::from(c)),
            _ => {
                out.push(char::from(c.to_ascii_uppercase()));
                while is_lower(i + 1) {
                    i += 1;
                    out.push(char::from(bytes[i]));
                }
            }
        }
        i += 1;
    }

    out
}

/// Where a method sits in its file, for comment lookup and naming.
struct MethodSite<'a> {
    file: &'a FileDescriptorProto,
    service_name: &'a str,
    service_index: usize,
    method: &'a MethodDescriptorProto,
    method_index: usize,
}

impl MethodSite<'_> {
    /// `pkg.Service.Method`, used in logs and errors.
    fn qualified_name(&self) -> String {
        let method = self.method.name.as_deref().unwrap_or("");
        match self.file.package.as_deref() {
            Some(package) if !package.is_empty() => {
                format!("{package}.{}.{method}", self.service_name)
            }
            _ => format!("{}.{method}", self.service_name),
        }
    }
}

fn method_item(
    site: &MethodSite<'_>,
    index: &MessageIndex<'_>,
    config: &CollectionConfig,
) -> Result<Item> {
    let qualified = site.qualified_name();
    let binding = extract_binding(site.method, &qualified)?;

    let input_type = site.method.input_type.as_deref().unwrap_or("");
    let input = index.get(input_type).ok_or_else(|| Error::UnknownMessage {
        method: qualified.clone(),
        type_name: input_type.to_string(),
    })?;
    let example = synthesize(input, index, config.max_depth);

    let comment = site
        .file
        .method_leading_comments(site.service_index, site.method_index)
        .unwrap_or("");
    let meta = parse_comment(comment);

    let mut header = meta.headers;
    header.extend(config.static_headers.iter().cloned());

    let host = config.host();
    let path: Vec<String> = binding
        .path
        .strip_prefix('/')
        .unwrap_or(&binding.path)
        .split('/')
        .map(ToString::to_string)
        .collect();

    let (body, url) = match binding.verb {
        HttpVerb::Post => (
            Some(Body::json(example.to_pretty_json()?)),
            Url {
                raw: format!("{host}{}", binding.path),
                host: vec![host],
                path,
                query: Vec::new(),
            },
        ),
        HttpVerb::Get => {
            let query = flatten(&example);
            (
                None,
                Url {
                    raw: format!("{host}{}{}", binding.path, query_string(&query)),
                    host: vec![host],
                    path,
                    query,
                },
            )
        }
    };

    tracing::debug!(
        method = %qualified,
        verb = %binding.verb,
        path = %binding.path,
        "built request"
    );

    let method_name = go_camel_case(site.method.name.as_deref().unwrap_or(""));
    Ok(Item::leaf(
        format!("{method_name}({})", meta.description),
        Request {
            method: binding.verb.as_str().to_string(),
            header,
            body,
            url,
        },
    ))
}
