//! CLI for `protoc-gen-postman`.
//!
//! Without a subcommand the binary speaks the `protoc` plugin protocol:
//! a `CodeGeneratorRequest` on stdin, a `CodeGeneratorResponse` on stdout.
//!
//! ```text
//! # As a protoc plugin
//! protoc --postman_out=. --postman_opt=max_depth=2 api/shop/v1/shop.proto
//!
//! # Directly from a compiled descriptor set
//! protoc-gen-postman generate \
//!   --descriptor shop.bin \
//!   --files api/shop/v1/shop.proto \
//!   --output shop.postman_collection.json
//! ```
//!
//! Logs go to stderr; filter with `RUST_LOG` (default `warn`).

#![forbid(unsafe_code)]

use std::fs;
use std::io::{Read, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use prost::Message as _;
use protoc_gen_postman::descriptor::FileDescriptorSet;
use protoc_gen_postman::{plugin, CollectionConfig, ProjectConfig};
use tracing_subscriber::EnvFilter;

/// Postman collection generator for `google.api.http` annotated gRPC services.
#[derive(Parser)]
#[command(name = "protoc-gen-postman", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Generate a collection from a compiled `FileDescriptorSet` instead of
    /// a plugin request on stdin.
    ///
    /// Build the set with source info to keep comment-derived names and
    /// headers (`buf build --as-file-descriptor-set --include-source-info`).
    Generate(GenerateArgs),
}

#[derive(clap::Args)]
struct GenerateArgs {
    /// Path to the compiled proto `FileDescriptorSet` (binary).
    #[arg(short, long)]
    descriptor: PathBuf,

    /// Comma-separated proto file names to generate for.
    /// Defaults to every file in the set.
    #[arg(long, value_delimiter = ',')]
    files: Vec<String>,

    /// Output path. Overrides `output` from the config file.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Path to a project config YAML file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Nested message levels to expand.
    /// Overrides `max_depth` from the config file.
    #[arg(long)]
    max_depth: Option<u32>,

    /// Fixed collection name. Overrides `name` from the config file.
    #[arg(long)]
    name: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => run_plugin(),
        Some(Command::Generate(args)) => run_generate(&args),
    }
}

fn run_plugin() -> anyhow::Result<()> {
    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .context("Failed to read CodeGeneratorRequest from stdin")?;

    let output = plugin::run(&input, CollectionConfig::new())
        .context("Failed to decode CodeGeneratorRequest")?;

    std::io::stdout()
        .write_all(&output)
        .context("Failed to write CodeGeneratorResponse to stdout")?;
    Ok(())
}

fn run_generate(args: &GenerateArgs) -> anyhow::Result<()> {
    let mut config = CollectionConfig::new();
    if let Some(path) = &args.config {
        eprintln!("Loading config: {}", path.display());
        let project = ProjectConfig::load(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?;
        config = config.with_project_config(&project);
    }
    config = apply_cli_overrides(config, args);

    let descriptor_bytes = fs::read(&args.descriptor)
        .with_context(|| format!("Failed to read descriptor: {}", args.descriptor.display()))?;
    let fdset = FileDescriptorSet::decode(descriptor_bytes.as_slice())
        .with_context(|| format!("Failed to decode descriptor: {}", args.descriptor.display()))?;

    let targets: Vec<String> = if args.files.is_empty() {
        fdset.file.iter().filter_map(|f| f.name.clone()).collect()
    } else {
        args.files.clone()
    };

    let collection = protoc_gen_postman::build_collection(&fdset.file, &targets, &config)
        .context("Failed to build collection")?;
    let json = serde_json::to_string(&collection).context("Failed to serialize collection")?;

    let output_path = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(config.output_name()));
    fs::write(&output_path, json)
        .with_context(|| format!("Failed to write output: {}", output_path.display()))?;
    eprintln!(
        "Wrote {} package folders to {}",
        collection.item.len(),
        output_path.display()
    );

    Ok(())
}

/// Apply CLI flags that override config file values.
fn apply_cli_overrides(mut config: CollectionConfig, args: &GenerateArgs) -> CollectionConfig {
    if let Some(depth) = args.max_depth {
        config = config.max_depth(depth);
    }
    if let Some(name) = &args.name {
        config = config.document_name(name);
    }
    config
}
