use std::io::{self, BufRead};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use inflect_lib::output::{to_json, to_table};
use inflect_lib::{
    DirectoryModels, EmbeddedModels, InflectConfig, InflectError, Inflector, Language,
    PartOfSpeech,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "inflect", about = "Inflectional paradigm generator")]
struct Cli {
    /// Lemma to inflect. If omitted, reads one lemma per line from stdin.
    lemma: Option<String>,

    /// Part of speech of the lemma (NOUN, ADJ, VERB, AUX).
    #[arg(long)]
    pos: PartOfSpeech,

    /// ISO 639-1 language code (ru, it, fr, es, pt, ro).
    #[arg(long = "lang")]
    language: Language,

    /// Minimum analyzer confidence for declension, in [0, 1].
    #[arg(long, env = "INFLECT_CONFIDENCE_THRESHOLD")]
    threshold: Option<f64>,

    /// Mood for conjugation (indicative, subjunctive, ...).
    #[arg(long, env = "INFLECT_MOOD")]
    mood: Option<String>,

    /// Tense for conjugation (present, imperfect, future, ...).
    #[arg(long, env = "INFLECT_TENSE")]
    tense: Option<String>,

    /// Load models from <DIR>/<lang>.json instead of the built-in ones.
    #[arg(long, env = "INFLECT_MODEL_DIR")]
    model_dir: Option<PathBuf>,

    /// JSON config file; command-line options override it.
    #[arg(long, env = "INFLECT_CONFIG")]
    config: Option<PathBuf>,

    /// Print a plain-text table instead of JSON.
    #[arg(long)]
    table: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Log filter used when RUST_LOG is unset.
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    let inflector = match build_inflector(&cli) {
        Ok(inflector) => inflector,
        Err(e) => return report(&e),
    };

    let mut status = ExitCode::SUCCESS;
    match cli.lemma {
        Some(ref lemma) => {
            if let Err(e) = process_lemma(lemma, &inflector, &cli) {
                status = report(&e);
            }
        }
        None => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = line.expect("failed to read stdin");
                if line.trim().is_empty() {
                    continue;
                }
                if let Err(e) = process_lemma(&line, &inflector, &cli) {
                    status = report(&e);
                }
            }
        }
    }
    status
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Config file, then environment and command-line overrides.
fn build_config(cli: &Cli) -> Result<InflectConfig, InflectError> {
    let mut config = match &cli.config {
        Some(path) => InflectConfig::load(path)?,
        None => InflectConfig::default(),
    };
    if let Some(threshold) = cli.threshold {
        config.confidence_threshold = threshold;
    }
    if let Some(mood) = &cli.mood {
        config.mood = mood.clone();
    }
    if let Some(tense) = &cli.tense {
        config.tense = tense.clone();
    }
    Ok(config)
}

fn build_inflector(cli: &Cli) -> Result<Inflector, InflectError> {
    let config = build_config(cli)?;
    match &cli.model_dir {
        Some(dir) => Inflector::new(DirectoryModels::new(dir), config),
        None => Inflector::new(EmbeddedModels::new(), config),
    }
}

fn process_lemma(lemma: &str, inflector: &Inflector, cli: &Cli) -> Result<(), InflectError> {
    let paradigm = inflector.produce_paradigm(lemma, cli.pos, cli.language)?;
    if cli.table {
        print!("{}", to_table(&paradigm));
    } else {
        let json = to_json(&paradigm, cli.pretty).expect("JSON serialization failed");
        println!("{json}");
    }
    Ok(())
}

/// Print the error and pick the exit status: 2 when the request was at
/// fault, 1 when an engine failed.
fn report(err: &InflectError) -> ExitCode {
    let kind = err.kind();
    tracing::debug!(?kind, "request failed");
    eprintln!("error: {err}");
    if kind.is_caller_error() {
        ExitCode::from(2)
    } else {
        ExitCode::from(1)
    }
}
