mod cli;

use mediaprep::config;
use mediaprep::engine::{BatchEvent, EventCallback};
use mediaprep::jobs::{self, JobKind};

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mediaprep=trace,mediaprep_av=trace,mediaprep_common=debug".to_string()
        } else {
            "mediaprep=info,mediaprep_av=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Run { job, dry_run, json } => {
            run_jobs(job, cli.config.as_deref(), dry_run, json)
        }
        Commands::CheckTools => check_tools(cli.config.as_deref()),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Init { path } => init_config(&path),
        Commands::Version => {
            println!("mediaprep {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

/// Prints progress as the runner reports it.
fn printer(kind: JobKind) -> EventCallback {
    Box::new(move |event: &BatchEvent<'_>| match event {
        BatchEvent::DiscoveryFailed(e) => println!("Error reading directory: {}", e),
        BatchEvent::FilesFound(n) => println!("Found {} {} files", n, kind.noun()),
        BatchEvent::FileStarted { index, total, path } => {
            println!("\nProcessing {} ({}/{})", path.display(), index, total)
        }
        BatchEvent::VariantFinished(outcome) => println!("{}", outcome),
        BatchEvent::VariantPlanned { variant, exists } => {
            if *exists {
                println!(
                    "[DRY RUN] Would skip {} - already exists",
                    variant.destination.display()
                );
            } else {
                println!(
                    "[DRY RUN] Would create {} ({})",
                    variant.destination.display(),
                    variant.params
                );
            }
        }
    })
}

fn run_jobs(
    only: Option<JobKind>,
    config_path: Option<&Path>,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;

    let kinds: Vec<JobKind> = match only {
        Some(kind) => vec![kind],
        None => JobKind::ALL
            .into_iter()
            .filter(|kind| kind.enabled(&config))
            .collect(),
    };

    if kinds.is_empty() {
        println!("All jobs are disabled. Nothing to do.");
        return Ok(());
    }

    let report = jobs::run_jobs(&kinds, &config, dry_run, |kind| -> EventCallback {
        if json {
            Box::new(|_: &BatchEvent<'_>| {})
        } else {
            println!("Starting {} conversion...", kind.noun());
            printer(kind)
        }
    });

    if json {
        println!("{}", serde_json::to_string_pretty(&report.summaries)?);
    } else {
        for summary in &report.summaries {
            println!("\n{}", summary);
        }
        if dry_run {
            println!("\n[DRY RUN] No files were written");
        }
    }

    if let Some((kind, fault)) = report.faults.into_iter().next() {
        return Err(fault.context(format!("{} job could not run", kind.name())));
    }

    Ok(())
}

fn check_tools(config_path: Option<&Path>) -> Result<()> {
    println!("Checking external tools...\n");

    let config = config::load_config_or_default(config_path)?;
    let tools = mediaprep_av::check_tools(
        config.tools.convert_path.as_deref(),
        config.tools.ffmpeg_path.as_deref(),
    );
    let mut all_ok = true;

    for tool in &tools {
        let status = if tool.available {
            "✓"
        } else {
            all_ok = false;
            "✗"
        };

        print!("{} {}", status, tool.name);

        if let Some(ref version) = tool.version {
            print!(" ({})", version.lines().next().unwrap_or(""));
        }

        if let Some(ref path) = tool.path {
            print!(" - {}", path.display());
        }

        println!();
    }

    println!();
    if all_ok {
        println!("All required tools are available!");
    } else {
        println!("Some tools are missing. Install them before running conversions.");
    }

    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            let config = config::load_config(p)?;
            println!("✓ Configuration is valid");
            config
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    let images = &config.images;
    println!("  Images enabled: {}", images.enabled);
    println!("    Roots: {}", images.roots.len());
    println!(
        "    {} -> {} (quality {})",
        images.extensions.join(", "),
        images.target_extension,
        images.quality
    );

    let videos = &config.videos;
    println!("  Videos enabled: {}", videos.enabled);
    println!("    Roots: {}", videos.roots.len());
    println!("    Output: {}", videos.output_dir.display());
    println!(
        "    Variants per file: {} ({} formats x {} resolutions)",
        videos.formats.len() * videos.resolutions.len(),
        videos.formats.len(),
        videos.resolutions.len()
    );

    Ok(())
}

fn init_config(path: &Path) -> Result<()> {
    config::persist::save_new_config(path, &config::Config::default())?;
    println!("Wrote default config to {}", path.display());
    Ok(())
}
