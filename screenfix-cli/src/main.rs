mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::{Parser, Subcommand};
use fs_err as fs;
use screenfix_edit::{SweepConfig, SweepError, sweep};
use screenfix_render::render_run_md;
use screenfix_rules::{
    DEFAULT_API_IMPORT, MigrateRule, PatchRule, RULE_REGISTRY, RetrofitRule,
};
use screenfix_types::report::ToolInfo;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "screenfix",
    version,
    about = "Batch patcher that splices wallet-balance fetching into screen files."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Inject the balance state, fetch function, imports, and display update.
    Migrate(MigrateArgs),
    /// Rewrite old one-argument getWalletBalance call sites in place.
    Retrofit(SweepArgs),
    /// List the available patch rules.
    ListRules(ListRulesArgs),
}

#[derive(Debug, Parser)]
struct SweepArgs {
    /// Directory containing the screen files
    /// (default: [scan].dir from screenfix.toml, else the current directory).
    #[arg(long)]
    screens_dir: Option<Utf8PathBuf>,

    /// Candidate file extension (default: ".js").
    #[arg(long)]
    ext: Option<String>,

    /// Run the full sweep without writing any screen file.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Directory to write run artifacts (run.json, run.md, patch.diff).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    /// Config file path (default: ./screenfix.toml when present).
    #[arg(long)]
    config: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct MigrateArgs {
    #[command(flatten)]
    sweep: SweepArgs,

    /// Module path for the injected getWalletBalance import.
    #[arg(long)]
    api_import: Option<String>,
}

#[derive(Debug, Parser)]
struct ListRulesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        eprintln!("error: {e}");
        return ExitCode::from(e.exit_code());
    }
    ExitCode::from(0)
}

fn real_main() -> Result<(), SweepError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Migrate(args) => cmd_migrate(args),
        Command::Retrofit(args) => cmd_retrofit(args),
        Command::ListRules(args) => cmd_list_rules(args),
    }
}

fn cmd_migrate(args: MigrateArgs) -> Result<(), SweepError> {
    let file_config =
        config::load_or_default(args.sweep.config.as_deref()).context("load screenfix config")?;

    let api_import = args
        .api_import
        .or_else(|| file_config.migrate.api_import.clone())
        .unwrap_or_else(|| DEFAULT_API_IMPORT.to_string());
    let rule = MigrateRule::new(&api_import).context("construct migrate rule")?;

    run_sweep(&file_config, &args.sweep, &rule)
}

fn cmd_retrofit(args: SweepArgs) -> Result<(), SweepError> {
    let file_config =
        config::load_or_default(args.config.as_deref()).context("load screenfix config")?;
    let rule = RetrofitRule::new().context("construct retrofit rule")?;

    run_sweep(&file_config, &args, &rule)
}

fn run_sweep(
    file_config: &config::ScreenfixConfig,
    args: &SweepArgs,
    rule: &dyn PatchRule,
) -> Result<(), SweepError> {
    let merged = config::merge_sweep(
        file_config,
        args.screens_dir.as_deref(),
        args.ext.as_deref(),
    );

    let sweep_config = SweepConfig {
        screens_dir: merged.screens_dir,
        extension: merged.extension,
        dry_run: args.dry_run,
    };

    let outcome = sweep(&sweep_config, rule, tool_info())?;

    for result in &outcome.report.results {
        println!("{}", result.outcome.status_line(&result.file));
    }

    info!(
        rule = rule.name(),
        scanned = outcome.report.summary.scanned,
        updated = outcome.report.summary.updated,
        patched_legacy = outcome.report.summary.patched_legacy,
        skipped = outcome.report.summary.skipped,
        dry_run = args.dry_run,
        "sweep complete"
    );

    if let Some(out_dir) = &args.out_dir {
        fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir))?;

        write_json(&out_dir.join("run.json"), &outcome.report)?;
        fs::write(out_dir.join("run.md"), render_run_md(&outcome.report))
            .with_context(|| format!("write {}", out_dir.join("run.md")))?;
        fs::write(out_dir.join("patch.diff"), &outcome.patch)
            .with_context(|| format!("write {}", out_dir.join("patch.diff")))?;

        info!("wrote run artifacts to {}", out_dir);
    }

    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Utf8Path, v: &T) -> Result<(), SweepError> {
    let s = serde_json::to_string_pretty(v).context("serialize json")?;
    fs::write(path, s).with_context(|| format!("write {}", path))?;
    Ok(())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "screenfix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
    }
}

fn cmd_list_rules(args: ListRulesArgs) -> Result<(), SweepError> {
    match args.format {
        OutputFormat::Text => {
            println!("Available rules:\n");
            for rule in RULE_REGISTRY {
                println!("  {:<10} {}", rule.name, rule.title);
                println!("  {:<10} {}", "", rule.description);
                println!();
            }
        }
        OutputFormat::Json => {
            let rules: Vec<_> = RULE_REGISTRY
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "name": r.name,
                        "title": r.title,
                        "description": r.description,
                    })
                })
                .collect();
            let rendered =
                serde_json::to_string_pretty(&rules).context("serialize rule listing")?;
            println!("{rendered}");
        }
    }
    Ok(())
}
