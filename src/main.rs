use anyhow::Result;
use circq::config::Config;
use circq::script::{self, Report, Script};
use circq::util::op_log;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "circq", about = "Replay operations against a bounded circular queue", version = "0.1")]
struct Cli {
    /// TOML script of queue operations (default: built-in wraparound demo)
    #[arg(short, long)]
    script: Option<PathBuf>,

    /// Queue capacity, overrides the script and config
    #[arg(short, long, allow_negative_numbers = true)]
    capacity: Option<i64>,

    /// Print the replay report as JSON
    #[arg(long)]
    json: bool,

    /// Append every replayed step to the op log
    #[arg(long)]
    log: bool,

    /// Print recent op log entries and exit
    #[arg(long)]
    history: bool,

    /// Number of op log entries to show (used with --history)
    #[arg(long, default_value_t = 50)]
    last: usize,

    /// Print config file path and current values, then exit
    #[arg(long)]
    config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = Config::load();

    if cli.config {
        return run_print_config(&cfg);
    }
    if cli.history {
        return run_history(cli.last);
    }

    let script = match &cli.script {
        Some(path) => Script::load(path)?,
        None       => Script::wraparound_demo(),
    };
    let capacity = cli.capacity.or(script.capacity).unwrap_or(cfg.general.default_capacity);
    let report = script::replay(&script, Some(capacity))?;

    if cli.log || cfg.general.log_ops {
        op_log::append(&report.steps);
    }

    if cli.json {
        let text = if cfg.output.pretty_json {
            serde_json::to_string_pretty(&report)?
        } else {
            serde_json::to_string(&report)?
        };
        println!("{}", text);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn print_report(report: &Report) {
    println!("capacity {}", report.capacity);
    for step in &report.steps {
        let marker = if step.outcome.is_error() { "!" } else { " " };
        println!(
            "{}{:>4}  {:<16} {:<40} len {}",
            marker, step.index, step.op, step.outcome.describe(), step.len
        );
    }
    println!("remaining {:?}", report.remaining);
    let errors = report.error_count();
    if errors > 0 {
        println!("{} step(s) failed", errors);
    }
}

fn run_print_config(cfg: &Config) -> Result<()> {
    let path = Config::config_path()
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|| "(unknown)".to_string());
    println!("Config: {}", path);
    println!();
    println!("[general]");
    println!("  default_capacity = {}", cfg.general.default_capacity);
    println!("  log_ops          = {}", cfg.general.log_ops);
    println!();
    println!("[output]");
    println!("  pretty_json      = {}", cfg.output.pretty_json);
    Ok(())
}

fn run_history(n: usize) -> Result<()> {
    let entries = op_log::load_recent(n);
    if entries.is_empty() {
        println!("No operations in log.");
        return Ok(());
    }
    for line in &entries {
        println!("{}", line);
    }
    Ok(())
}
