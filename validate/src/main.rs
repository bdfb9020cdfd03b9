use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::filter::EnvFilter;

mod scenario;

use lumen_core::rules::{self, RuleStore};

#[derive(Parser)]
#[command(version, about = "Validate Lumen swap rules and simulate reconciliations")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse every rule file and report problems
    Check {
        /// Builtin rules directory (defaults to the one next to the executable)
        #[arg(short, long)]
        builtin: Option<PathBuf>,
        /// Custom rules directory (defaults to the user config directory)
        #[arg(short, long)]
        custom: Option<PathBuf>,
    },
    /// Run reconciliation passes for the actor described in a scenario file
    Simulate {
        /// Rules directory
        #[arg(short, long)]
        rules: PathBuf,
        /// Scenario TOML file (forms, actor, pass count)
        #[arg(short, long)]
        scenario: PathBuf,
    },
}

/// Filter from a `RUST_LOG`-style directive, `info` when unset or invalid.
fn log_filter(directive: Option<&str>) -> EnvFilter {
    directive
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new("info"))
}

/// Log to stderr so stdout carries only the report.
fn init_logging() {
    let directive = std::env::var("RUST_LOG").ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(directive.as_deref()))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let result = match cli.command {
        Commands::Check { builtin, custom } => {
            let builtin = builtin.or_else(rules::default_builtin_dir);
            let custom = custom.or_else(rules::default_custom_dir);
            check(builtin.as_deref(), custom.as_deref())
        }
        Commands::Simulate { rules, scenario } => scenario::simulate(&rules, &scenario),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn rule_files(dir: &Path) -> Result<Vec<PathBuf>, String> {
    let entries = std::fs::read_dir(dir).map_err(|e| format!("Cannot read {}: {e}", dir.display()))?;
    let mut files: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "toml"))
        .collect();
    files.sort();
    Ok(files)
}

fn check(builtin: Option<&Path>, custom: Option<&Path>) -> Result<(), String> {
    let mut failures = 0usize;

    for dir in [builtin, custom].into_iter().flatten() {
        if !dir.exists() {
            tracing::info!(dir = %dir.display(), "Rules directory does not exist, skipping");
            continue;
        }
        for path in rule_files(dir)? {
            match rules::load_file(&path) {
                Ok(config) => {
                    println!("ok    {} ({} rules)", path.display(), config.swaps.len());
                    for rule in config.swaps.iter().filter(|r| r.abilities().next().is_none()) {
                        println!("warn  {}: rule '{}' grants no ability", path.display(), rule.id);
                    }
                    for rule in config.swaps.iter().filter(|r| r.enchantments.is_empty()) {
                        println!("warn  {}: rule '{}' lists no enchantment", path.display(), rule.id);
                    }
                }
                Err(e) => {
                    failures += 1;
                    println!("error {e}");
                }
            }
        }
    }

    let set = rules::load_rules(builtin, custom).map_err(|e| e.to_string())?;
    let settings = set.settings();
    let light = set.light_aura();

    println!();
    println!("rules:                {}", set.len());
    println!("known abilities:      {}", set.all_abilities().len());
    println!("add light:            {}", settings.add_light);
    println!("require weapon drawn: {}", settings.require_weapon_drawn);

    if settings.add_light {
        if light.variants().next().is_none() {
            println!("warn  add_light is set but no aura variants are configured");
        }
        if light.light_form.is_none() {
            println!("warn  add_light is set but no light form is configured");
        }
    }
    for aura in light.variants() {
        if set.all_abilities().contains(&aura) {
            println!("warn  aura spell {aura} is also a swap ability");
        }
    }

    if failures > 0 {
        return Err(format!("{failures} rule file(s) failed to load"));
    }
    Ok(())
}
