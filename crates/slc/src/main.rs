use std::env;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use slc::{
    diagnostics::{render_io_error, render_parse_error},
    driver::{self, Compilation, DriverError},
    parser::ParseError,
    tokenizer, tree_printer,
};

fn main() -> anyhow::Result<()> {
    initialize_logging();

    let slc = Slc::parse();

    match slc.subcmd {
        SlcSubcommand::Build(build) => run_build(build)?,
        SlcSubcommand::Tokens(input) => {
            let source = read_or_exit(&input.source);
            print!("{}", tokenizer::tokenize(&source).dump());
        }
        SlcSubcommand::Ast(input) => {
            let source = read_or_exit(&input.source);
            let compilation = compile_or_exit(&source, &input.source);
            print!("{}", tree_printer::render_tree(&compilation.program));
        }
        SlcSubcommand::Asm(input) => {
            let source = read_or_exit(&input.source);
            let compilation = compile_or_exit(&source, &input.source);
            print!("{}", compilation.asm);
        }
    }

    Ok(())
}

fn run_build(build: Build) -> anyhow::Result<()> {
    debug!(source = %build.source.display(), out_dir = %build.out_dir.display(), "Building");

    match driver::compile(&build.source, &build.out_dir) {
        Ok(artifacts) => {
            info!(assembly_path = %artifacts.assembly.display(), "Build finished");
            Ok(())
        }
        Err(DriverError::Parse { source_text, error }) => {
            exit_with_parse_error(&source_text, &build.source, &error)
        }
        Err(DriverError::Read { path, source }) => {
            eprintln!("{}", render_io_error(&path, &source));
            std::process::exit(1);
        }
        Err(other) => Err(other.into()),
    }
}

fn read_or_exit(path: &Path) -> String {
    match driver::read_source(path) {
        Ok(source) => source,
        Err(DriverError::Read { path, source }) => {
            eprintln!("{}", render_io_error(&path, &source));
            std::process::exit(1);
        }
        Err(other) => {
            eprintln!("{other}");
            std::process::exit(1);
        }
    }
}

fn compile_or_exit(source: &str, path: &Path) -> Compilation {
    match driver::compile_source(source) {
        Ok(compilation) => compilation,
        Err(error) => exit_with_parse_error(source, path, &error),
    }
}

fn exit_with_parse_error(source: &str, path: &Path, error: &ParseError) -> ! {
    let use_color = io::stderr().is_terminal();
    eprintln!("{}", render_parse_error(source, Some(path), error, use_color));
    std::process::exit(1);
}

fn initialize_logging() {
    let env_filter = env::var("RUST_LOG").unwrap_or_default();

    tracing_subscriber::registry()
        .with(fmt::layer().with_filter(EnvFilter::builder().parse_lossy(env_filter)))
        .init();
}

#[derive(clap::Parser)]
#[clap(name = "slc", about = "Compile SimpleLang to 8-bit accumulator assembly.")]
struct Slc {
    #[clap(subcommand)]
    subcmd: SlcSubcommand,
}

#[derive(clap::Subcommand)]
enum SlcSubcommand {
    /// Write tokens, syntax tree and assembly into the output directory
    Build(Build),
    /// Print the token stream
    Tokens(Input),
    /// Print the syntax tree
    Ast(Input),
    /// Print the generated assembly
    Asm(Input),
}

#[derive(clap::Parser)]
struct Build {
    source: PathBuf,

    /// Directory the artifacts are written to
    #[clap(short, long, default_value = "target/slc")]
    out_dir: PathBuf,
}

#[derive(clap::Parser)]
struct Input {
    source: PathBuf,
}
