//! Generation settings: builder, plugin parameter string and YAML project file.
//!
//! Settings come from three layers, later ones overriding earlier ones:
//!
//! 1. [`CollectionConfig::default`],
//! 2. a YAML [`ProjectConfig`] named by the `config=` plugin parameter,
//! 3. the remaining plugin parameters.
//!
//! # Plugin parameters
//!
//! ```text
//! protoc --postman_out=. \
//!   --postman_opt=output=api.postman_collection.json,max_depth=2,header=Authorization:Bearer {{token}} \
//!   api/shop/v1/shop.proto
//! ```
//!
//! # File format
//!
//! ```yaml
//! # postman.yaml
//! output: ./api.postman_collection.json
//! max_depth: 3
//! domain: base_url
//! headers:
//!   - key: Authorization
//!     value: "Bearer {{token}}"
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::collection::Header;
use crate::error::{Error, Result};
use crate::synthesize::DEFAULT_MAX_DEPTH;

/// File name used when `output` is not configured.
pub const DEFAULT_OUTPUT: &str = "./source.postman_collection.json";

/// Postman variable every request URL is rooted at.
pub const DEFAULT_DOMAIN_VARIABLE: &str = "domain";

/// Configuration for collection generation.
///
/// # Examples
///
/// ```
/// use protoc_gen_postman::CollectionConfig;
///
/// let config = CollectionConfig::new()
///     .output("./shop.postman_collection.json")
///     .max_depth(2)
///     .static_header("Authorization", "Bearer {{token}}");
/// # let _ = config;
/// ```
#[derive(Clone, Debug)]
pub struct CollectionConfig {
    /// Output file name handed back to `protoc`.
    pub(crate) output: String,

    /// Nesting levels expanded below each request message (default: 3).
    pub(crate) max_depth: u32,

    /// Fixed `info.name`; when `None`, a `version.<timestamp>` name is stamped.
    pub(crate) document_name: Option<String>,

    /// Postman variable used as URL host (default: `domain` → `{{domain}}`).
    pub(crate) domain_variable: String,

    /// Headers appended to every request after the comment-declared ones.
    pub(crate) static_headers: Vec<Header>,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            output: DEFAULT_OUTPUT.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            document_name: None,
            domain_variable: DEFAULT_DOMAIN_VARIABLE.to_string(),
            static_headers: Vec::new(),
        }
    }
}

impl CollectionConfig {
    /// Create a new config with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the generated file name.
    #[must_use]
    pub fn output(mut self, name: &str) -> Self {
        self.output = name.to_string();
        self
    }

    /// Set how many nested message levels are expanded.
    #[must_use]
    pub fn max_depth(mut self, depth: u32) -> Self {
        self.max_depth = depth;
        self
    }

    /// Use a fixed collection name instead of the `version.<timestamp>` stamp.
    #[must_use]
    pub fn document_name(mut self, name: &str) -> Self {
        self.document_name = Some(name.to_string());
        self
    }

    /// Set the Postman variable used as URL host, without braces.
    #[must_use]
    pub fn domain_variable(mut self, name: &str) -> Self {
        self.domain_variable = name.to_string();
        self
    }

    /// Add a header sent with every request.
    #[must_use]
    pub fn static_header(mut self, key: &str, value: &str) -> Self {
        self.static_headers
            .push(Header::text(key.to_string(), value.to_string()));
        self
    }

    /// Output file name.
    #[must_use]
    pub fn output_name(&self) -> &str {
        &self.output
    }

    /// `{{<domain variable>}}`.
    pub(crate) fn host(&self) -> String {
        format!("{{{{{}}}}}", self.domain_variable)
    }

    /// Apply a YAML project config on top of this one.
    #[must_use]
    pub fn with_project_config(mut self, project: &ProjectConfig) -> Self {
        if let Some(output) = &project.output {
            self.output.clone_from(output);
        }
        if let Some(depth) = project.max_depth {
            self.max_depth = depth;
        }
        if let Some(name) = &project.name {
            self.document_name = Some(name.clone());
        }
        if let Some(domain) = &project.domain {
            self.domain_variable.clone_from(domain);
        }
        for header in &project.headers {
            self = self.static_header(&header.key, &header.value);
        }
        self
    }

    /// Apply a `protoc` plugin parameter string (`k=v,k=v`).
    ///
    /// Recognised keys: `output`, `max_depth`, `name`, `domain`,
    /// `header=Key:Value` (repeatable) and `config=<yaml path>`. A `config`
    /// file is applied before every other key regardless of position.
    /// Unknown keys are ignored with a warning.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] for a malformed value, or an I/O /
    /// YAML error if the `config` file cannot be loaded.
    pub fn with_parameter(mut self, parameter: &str) -> Result<Self> {
        let pairs: Vec<(&str, &str)> = parameter
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(|p| p.split_once('=').unwrap_or((p, "")))
            .collect();

        if let Some((_, path)) = pairs.iter().find(|(k, _)| *k == "config") {
            let project = ProjectConfig::load(Path::new(path))?;
            self = self.with_project_config(&project);
        }

        for (key, value) in pairs {
            let invalid = || Error::InvalidParameter {
                key: key.to_string(),
                value: value.to_string(),
            };

            self = match key {
                "config" => self,
                "output" if !value.is_empty() => self.output(value),
                "max_depth" => self.max_depth(value.parse().map_err(|_| invalid())?),
                "name" => self.document_name(value),
                "domain" if !value.is_empty() => self.domain_variable(value),
                "header" => {
                    let (k, v) = value.split_once(':').ok_or_else(invalid)?;
                    self.static_header(k.trim(), v.trim())
                }
                "output" | "domain" => return Err(invalid()),
                other => {
                    tracing::warn!(key = other, "ignoring unknown plugin parameter");
                    self
                }
            };
        }

        Ok(self)
    }
}

/// Project-level generation config loaded from YAML.
///
/// Every key is optional; absent keys leave the builder value untouched.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// Output file name.
    pub output: Option<String>,

    /// Nesting levels expanded below each request message.
    pub max_depth: Option<u32>,

    /// Fixed collection name.
    pub name: Option<String>,

    /// Postman variable used as URL host.
    pub domain: Option<String>,

    /// Headers added to every request.
    pub headers: Vec<StaticHeader>,
}

/// A header added to every request.
#[derive(Debug, Clone, Deserialize)]
pub struct StaticHeader {
    /// Header name.
    pub key: String,
    /// Header value (may reference Postman variables, e.g. `{{token}}`).
    pub value: String,
}

impl ProjectConfig {
    /// Load config from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_yaml_ng::from_str(&content)?;
        Ok(config)
    }
}
