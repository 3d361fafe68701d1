//! storyvoice CLI - Long-form narration through a remote speech service
//!
//! Command-line interface for the storyvoice pipeline

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use storyvoice::{
    progress::{ProgressBarObserver, SuspendingLogger},
    text::{segment_text, TextStats},
    Config, Error, Narrator, OpenAiSynthesizer, Result,
};

#[derive(Parser)]
#[command(
    name = "storyvoice",
    about = "Narrate long texts with a remote text-to-speech service",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Narrate a text file into a single audio file
    Narrate {
        /// Input text file
        #[arg(short, long)]
        input: PathBuf,

        /// Voice name (see `storyvoice voices`)
        #[arg(short = 'v', long)]
        voice: String,

        /// Language of the text (see `storyvoice languages`)
        #[arg(short, long, default_value = "English")]
        language: String,

        /// Output audio file path (overrides the configuration)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum number of synthesis requests in flight
        #[arg(long)]
        concurrency: Option<usize>,

        /// Maximum chunk length in characters
        #[arg(long)]
        max_chunk_size: Option<usize>,

        /// Skip the API key check before starting
        #[arg(long)]
        skip_verify: bool,

        /// Print the chunk plan without synthesizing anything
        #[arg(long)]
        dry_run: bool,
    },

    /// Generate default configuration file
    InitConfig {
        /// Output path for config file
        #[arg(short, long, default_value = "config.yaml")]
        output: PathBuf,
    },

    /// List available voices
    Voices {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// List available languages
    Languages {
        /// Configuration file path
        #[arg(short, long)]
        config: Option<PathBuf>,
    },

    /// Show information about the system
    Info,
}

#[tokio::main]
async fn main() {
    let observer = ProgressBarObserver::new();

    // Initialize logger; records clear the progress bar while they print
    let logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).build();
    let max_level = logger.filter();
    if log::set_boxed_logger(Box::new(SuspendingLogger::new(logger, observer.bar()))).is_ok() {
        log::set_max_level(max_level);
    }

    let cli = Cli::parse();

    if let Err(err) = run(cli, &observer).await {
        match err.chunk_index() {
            Some(index) => log::error!("Aborted at chunk {} ({})", index, err.kind()),
            None => log::error!("Aborted ({})", err.kind()),
        }
        eprintln!("✗ {}", err);
        std::process::exit(1);
    }
}

fn load_config(path: Option<PathBuf>) -> Result<Config> {
    match path {
        Some(path) => Config::load_file(path),
        None => Ok(Config::default()),
    }
}

async fn run(cli: Cli, observer: &ProgressBarObserver) -> Result<()> {
    match cli.command {
        Commands::Narrate {
            input,
            voice,
            language,
            output,
            config,
            concurrency,
            max_chunk_size,
            skip_verify,
            dry_run,
        } => {
            log::info!("storyvoice Narrator");
            log::info!("===================");

            let mut cfg = load_config(config)?;
            if let Some(path) = output {
                cfg.output.path = path;
            }
            if let Some(concurrency) = concurrency {
                cfg.scheduler.concurrency = concurrency;
            }
            if let Some(max_chunk_size) = max_chunk_size {
                cfg.chunking.max_chunk_size = max_chunk_size;
            }
            cfg.validate()?;

            if !input.is_file() {
                return Err(Error::FileNotFound(input.display().to_string()));
            }
            let voice = cfg.catalog.voice(&voice)?;
            let language = cfg.catalog.language(&language)?;

            log::info!("Text file: {}", input.display());
            log::info!("Voice: {}", voice);
            log::info!("Language: {}", language);

            let text = std::fs::read_to_string(&input)?;
            let stats = TextStats::of(&text);
            log::info!(
                "Text loaded ({} characters, {} words, {} sentences)",
                stats.characters,
                stats.words,
                stats.sentences
            );

            if dry_run {
                let chunks = segment_text(&text, cfg.chunking.max_chunk_size);
                if chunks.is_empty() {
                    println!("Dry run: no chunks would be synthesized.");
                } else {
                    println!("Dry run: would synthesize {} chunk(s):", chunks.len());
                    for chunk in &chunks {
                        println!(
                            "  {} ({} chars)",
                            cfg.chunk_file(Path::new("."), chunk.index).display(),
                            chunk.len()
                        );
                    }
                }
                return Ok(());
            }

            let synthesizer = OpenAiSynthesizer::new(cfg.synthesis.clone())?;
            if !skip_verify {
                log::info!("Checking API key...");
                synthesizer.verify().await?;
                log::info!("API key valid");
            }

            let output = cfg.output.path.clone();
            let narrator = Narrator::new(cfg, Arc::new(synthesizer))?;
            let result = narrator.narrate(&text, &voice, &output, observer).await?;

            log::info!("Chunks: {}", result.chunks);
            log::info!("Size: {} bytes", result.bytes);
            log::info!("Processing time: {}", result.processing_time_formatted());

            println!("✓ Narration complete: {}", result.output.display());
        }

        Commands::InitConfig { output } => {
            log::info!("Creating default configuration...");

            Config::create_default(&output)?;

            println!("✓ Configuration saved to: {}", output.display());
        }

        Commands::Voices { config } => {
            let cfg = load_config(config)?;
            for voice in &cfg.catalog.voices {
                println!("{}", voice);
            }
        }

        Commands::Languages { config } => {
            let cfg = load_config(config)?;
            for language in &cfg.catalog.languages {
                println!("{}", language);
            }
        }

        Commands::Info => {
            let cfg = Config::default();
            println!("storyvoice - Long-form narration");
            println!("================================");
            println!("Version: {}", storyvoice::VERSION);
            println!("Platform: {}", std::env::consts::OS);
            println!("Architecture: {}", std::env::consts::ARCH);
            println!();
            println!("Speech endpoint: {}", cfg.synthesis.api_base);
            println!("Model: {}", cfg.synthesis.model);
            println!("Max chunk size: {} chars", storyvoice::DEFAULT_MAX_CHUNK_SIZE);
            println!("Concurrency: {}", storyvoice::DEFAULT_CONCURRENCY);
            println!("Voices: {}", cfg.catalog.voices.len());
            println!("Languages: {}", cfg.catalog.languages.len());
            println!();
            println!("CPU Cores: {}", num_cpus::get());
        }
    }

    Ok(())
}
