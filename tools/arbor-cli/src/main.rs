use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use arbor_labeler::{LabelerConfig, WindowProcessor};
use arbor_parser::parse_conll;
use arbor_protocol::{ModelKind, ModelResource, PredicateModel, RolesetModel, SrlModel, Window, DEFAULT_LANGUAGE};
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod output;

use output::{JsonSink, TextSink};

#[derive(Parser)]
#[command(name = "arbor", author, version, about = "Semantic role labeling over dependency parses")]
struct Cli {
    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Label every span of a CoNLL document
    Label(LabelArgs),
    /// Compile a JSON model into its binary resource
    CompileModel {
        #[arg(long, value_enum)]
        kind: KindArg,

        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },
    /// Write a bundled model as JSON
    DumpModel {
        #[arg(long, value_enum)]
        kind: KindArg,

        #[arg(long, default_value = DEFAULT_LANGUAGE)]
        language: String,

        /// Defaults to stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

#[derive(Args)]
struct LabelArgs {
    /// CoNLL-U or CoNLL-X input
    #[arg(value_name = "FILE")]
    input: PathBuf,

    /// TOML labeler configuration
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long)]
    language: Option<String>,

    #[arg(long, value_name = "FILE")]
    predicate_model: Option<PathBuf>,

    #[arg(long, value_name = "FILE")]
    roleset_model: Option<PathBuf>,

    #[arg(long, value_name = "FILE")]
    srl_model: Option<PathBuf>,

    /// Span granularity: sentence or document
    #[arg(long, value_name = "WINDOW")]
    window: Option<Window>,

    #[arg(long, value_enum, default_value_t = Format::Json)]
    format: Format,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Predicate,
    Roleset,
    Srl,
}

impl From<KindArg> for ModelKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Predicate => ModelKind::PredicateId,
            KindArg::Roleset => ModelKind::Roleset,
            KindArg::Srl => ModelKind::Srl,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Json,
    Text,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Label(args) => label(args),
        Command::CompileModel { kind, input, output } => compile_model(kind.into(), &input, &output),
        Command::DumpModel { kind, language, output } => dump_model(kind.into(), &language, output.as_deref()),
    }
}

fn labeler_config(args: &LabelArgs) -> anyhow::Result<LabelerConfig> {
    let mut config = match &args.config {
        Some(path) => LabelerConfig::load(path)?,
        None => LabelerConfig::default(),
    };

    // Flags win over the config file
    if let Some(language) = &args.language {
        config.language = language.clone();
    }
    if let Some(path) = &args.predicate_model {
        config.predicate_model = Some(path.clone());
    }
    if let Some(path) = &args.roleset_model {
        config.roleset_model = Some(path.clone());
    }
    if let Some(path) = &args.srl_model {
        config.srl_model = Some(path.clone());
    }
    if let Some(window) = args.window {
        config.window = window;
    }
    Ok(config)
}

fn label(args: LabelArgs) -> anyhow::Result<()> {
    let config = labeler_config(&args)?;
    let mut processor = WindowProcessor::from_config(&config).context("failed to initialize the annotation cascade")?;

    let text = fs::read_to_string(&args.input).with_context(|| format!("failed to read {}", args.input.display()))?;
    let document = parse_conll(&text).with_context(|| format!("invalid CoNLL in {}", args.input.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        Format::Json => {
            let mut sink = JsonSink::default();
            processor.process_document(&document, &mut sink);
            serde_json::to_writer_pretty(&mut out, &sink.spans)?;
            writeln!(out)?;
        }
        Format::Text => {
            let mut sink = TextSink::default();
            processor.process_document(&document, &mut sink);
            for line in &sink.lines {
                writeln!(out, "{}", line)?;
            }
        }
    }
    Ok(())
}

fn compile_model(kind: ModelKind, input: &Path, output: &Path) -> anyhow::Result<()> {
    let json = fs::read_to_string(input).with_context(|| format!("failed to read {}", input.display()))?;

    let bytes = match kind {
        ModelKind::PredicateId => compile::<PredicateModel>(&json)?,
        ModelKind::Roleset => compile::<RolesetModel>(&json)?,
        ModelKind::Srl => compile::<SrlModel>(&json)?,
    };

    fs::write(output, &bytes).with_context(|| format!("failed to write {}", output.display()))?;
    info!(%kind, bytes = bytes.len(), output = %output.display(), "model compiled");
    Ok(())
}

fn compile<M: ModelResource + DeserializeOwned>(json: &str) -> anyhow::Result<Vec<u8>> {
    let model: M = serde_json::from_str(json)?;
    let bytes = model.to_bytes()?;
    // The written resource must load back
    M::from_bytes(&bytes)?;
    Ok(bytes)
}

fn dump_model(kind: ModelKind, language: &str, output: Option<&Path>) -> anyhow::Result<()> {
    let json = match kind {
        ModelKind::PredicateId => dump::<PredicateModel>(language)?,
        ModelKind::Roleset => dump::<RolesetModel>(language)?,
        ModelKind::Srl => dump::<SrlModel>(language)?,
    };

    match output {
        Some(path) => fs::write(path, json + "\n").with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", json),
    }
    Ok(())
}

fn dump<M: ModelResource + Serialize>(language: &str) -> anyhow::Result<String> {
    let model = M::bundled(language)?;
    Ok(serde_json::to_string_pretty(&model)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_flags_override_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "window = \"document\"\nsrl_model = \"/models/srl.rkyv\"").unwrap();
        let config_path = file.path().to_str().unwrap().to_string();

        let cli = Cli::parse_from([
            "arbor",
            "label",
            "input.conll",
            "--config",
            config_path.as_str(),
            "--window",
            "sentence",
            "--roleset-model",
            "/models/roleset.rkyv",
        ]);
        let Command::Label(args) = cli.command else {
            panic!("expected label");
        };

        let config = labeler_config(&args).unwrap();
        assert_eq!(config.window, Window::Sentence);
        assert_eq!(config.roleset_model, Some(PathBuf::from("/models/roleset.rkyv")));
        assert_eq!(config.srl_model, Some(PathBuf::from("/models/srl.rkyv")));
        assert_eq!(config.language, "en");
        assert_eq!(args.format, Format::Json);
    }

    #[test]
    fn test_window_flag_parses_through_window() {
        let cli = Cli::parse_from(["arbor", "label", "input.conll", "--window", "document"]);
        let Command::Label(args) = cli.command else {
            panic!("expected label");
        };
        assert_eq!(args.window, Some(Window::Document));

        let err = Cli::try_parse_from(["arbor", "label", "input.conll", "--window", "paragraph"])
            .err()
            .unwrap();
        assert!(err.to_string().contains("unknown window 'paragraph'"));
    }

    #[test]
    fn test_dump_then_compile() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("srl.json");
        let bin_path = dir.path().join("srl.rkyv");

        dump_model(ModelKind::Srl, "en", Some(&json_path)).unwrap();
        compile_model(ModelKind::Srl, &json_path, &bin_path).unwrap();

        let bytes = fs::read(&bin_path).unwrap();
        assert_eq!(SrlModel::from_bytes(&bytes).unwrap(), SrlModel::english());
    }

    #[test]
    fn test_dump_unknown_language_fails() {
        assert!(dump::<RolesetModel>("xx").is_err());
    }
}
