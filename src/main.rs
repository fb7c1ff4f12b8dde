use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use hilite_lib::config as hilite_config;
use hilite_lib::{Density, HighlightEngine, RenderMode, estimate_token_cost};

#[derive(Parser, Debug)]
#[command(
    name = "hilite",
    version,
    about = "Render semantic annotation markers in AI responses as styled spans"
)]
struct Cli {
    /// Input file; stdin is used when absent or "-"
    file: Option<PathBuf>,

    /// Render mode: none, underline, highlights, both
    #[arg(long)]
    mode: Option<String>,

    /// Palette name (built-in: vibrant, natural; more via config)
    #[arg(long)]
    palette: Option<String>,

    /// Annotation density hint: auto or explicit
    #[arg(long)]
    density: Option<String>,

    /// Path to a config file (default: hilite.toml / .hilite.toml in the
    /// working directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Strip all annotation markers instead of styling them (mode none)
    #[arg(long)]
    strip: bool,

    /// Print the prompting-overhead estimate for the selected mode/density
    /// as JSON and exit
    #[arg(long)]
    estimate: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        }
        _ => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read from stdin")?;
            Ok(buffer)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => hilite_config::Config::load(path)?,
        None => hilite_config::Config::discover()?.unwrap_or_default(),
    };

    let mode = if cli.strip {
        RenderMode::None
    } else {
        cli.mode
            .as_deref()
            .map(RenderMode::from_name)
            .unwrap_or_else(|| config.global.render_mode())
    };
    let density = cli
        .density
        .as_deref()
        .map(Density::from_name)
        .unwrap_or_else(|| config.global.density());

    if cli.estimate {
        let estimate = estimate_token_cost(mode, density);
        println!("{}", serde_json::to_string_pretty(&estimate)?);
        return Ok(());
    }

    let mut engine = HighlightEngine::from_config(&config)?;
    if let Some(palette) = &cli.palette {
        engine = engine.with_palette(palette);
    }

    let input = read_input(cli.file.as_ref())?;
    let output = engine.render(&input, mode, density);

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    handle.write_all(output.as_bytes()).context("failed to write output")?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    if let Err(err) = run(cli) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
