//! protoc-gen-rust-grpc - protoc plugin generating tonic service code
//!
//! Modes:
//! - no subcommand: protoc plugin, reading a `CodeGeneratorRequest` from stdin
//!   and writing a `CodeGeneratorResponse` to stdout
//! - `protoc-gen-rust-grpc generate` - generate from a descriptor set on disk
//!
//! Parameters are passed through protoc, e.g.
//! `--rust-grpc_opt=message_module_path=crate::pb,crate_mapping=mapping.txt`.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use prost::Message;
use prost_types::compiler::CodeGeneratorRequest;
use std::io::{Read, Write};
use std::path::PathBuf;

mod descriptors;
mod generate;
mod logging;
mod plugin;

#[derive(Parser)]
#[command(name = "protoc-gen-rust-grpc")]
#[command(author, version, about = "protoc plugin generating tonic gRPC services", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate service code from a serialized FileDescriptorSet
    Generate {
        /// Path to the descriptor set (protoc --descriptor_set_out)
        #[arg(short, long)]
        descriptor_set: PathBuf,

        /// Output directory for generated code
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Proto file to generate, as named in the set (repeatable; default: all)
        #[arg(short, long = "file")]
        files: Vec<String>,

        /// Generator parameters (comma-separated key=value pairs)
        #[arg(short, long, default_value = "")]
        param: String,
    },
}

fn main() -> Result<()> {
    logging::init_logging();
    let cli = Cli::parse();

    match cli.command {
        None => run_plugin()?,
        Some(Commands::Generate {
            descriptor_set,
            out_dir,
            files,
            param,
        }) => {
            generate::run(&descriptor_set, &out_dir, &files, &param)?;
        }
    }

    Ok(())
}

fn run_plugin() -> Result<()> {
    let mut input = Vec::new();
    std::io::stdin()
        .read_to_end(&mut input)
        .context("Failed to read request from stdin")?;
    let request =
        CodeGeneratorRequest::decode(input.as_slice()).context("Invalid CodeGeneratorRequest")?;
    tracing::debug!(
        files = request.file_to_generate.len(),
        parameter = request.parameter(),
        "received request"
    );

    let response = plugin::handle_request(&request);

    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(&response.encode_to_vec())
        .context("Failed to write response to stdout")?;
    stdout.flush().context("Failed to flush stdout")?;

    Ok(())
}
