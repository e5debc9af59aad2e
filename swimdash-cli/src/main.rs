//! swimdash CLI - swim workout dashboard over two CSV exports
//!
//! Every dashboard panel is available as a subcommand:
//! - Workout picker, workout cards and stroke breakdown (`workouts`, `summary`, `strokes`)
//! - Year picker and period totals (`years`, `totals`)
//! - The paged records table (`records`)
//! - The HTTP API for all of the above (`serve`, with the `server` feature)

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

mod commands;
mod tracing_setup;

use commands::GlobalArgs;
use tracing_setup::{init_tracing, TracingConfig};

#[derive(Parser, Debug)]
#[command(
    name = "swimdash",
    author,
    version,
    about = "Swim workout dashboard: per-workout cards, stroke breakdowns and yearly totals",
    long_about = "Load a per-workout summary CSV and a per-stroke aggregate CSV once, then \
                  query workouts, stroke breakdowns and period totals from the terminal or \
                  over HTTP."
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Distance and duration of one workout
    Summary(commands::workout::SummaryArgs),
    /// Distance per stroke for one workout, or all of them
    Strokes(commands::workout::StrokesArgs),
    /// Count, time, distance and averages for a year or all years
    Totals(commands::totals::TotalsArgs),
    /// List workout dates
    Workouts,
    /// List the year choices
    Years,
    /// Show the records table, sorted and paged
    Records(commands::records::RecordsArgs),
    /// Run the dashboard HTTP API
    #[cfg(feature = "server")]
    Serve(commands::serve::ServeArgs),
    /// Manage swimdash configuration (init, show, validate, path)
    Config(commands::config::ConfigArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: Shell,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
#[allow(clippy::enum_variant_names)] // PowerShell is a proper noun, not a suffix
enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

/// `log_level` from the config file, if one is readable. Problems with the
/// file surface later, from the command that needs it.
fn configured_log_level(global: &GlobalArgs) -> Option<String> {
    global.load_config().ok().and_then(|config| config.log_level)
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(&TracingConfig {
        debug: cli.global.debug,
        quiet: cli.global.quiet,
        level: configured_log_level(&cli.global),
    })
    .ok();

    let global = &cli.global;
    match cli.command {
        Commands::Summary(args) => commands::run_summary(args, global)?,
        Commands::Strokes(args) => commands::run_strokes(args, global)?,
        Commands::Totals(args) => commands::run_totals(args, global)?,
        Commands::Workouts => commands::run_workouts(global)?,
        Commands::Years => commands::run_years(global)?,
        Commands::Records(args) => commands::run_records(args, global)?,
        #[cfg(feature = "server")]
        Commands::Serve(args) => commands::run_serve(args, global).await?,
        Commands::Config(args) => commands::run_config(args, global)?,
        Commands::Completions(args) => run_completions(args)?,
    }

    Ok(())
}

fn run_completions(args: CompletionsArgs) -> Result<()> {
    use clap::CommandFactory;
    use clap_complete::{generate, Shell as CompletionShell};
    use std::io;

    let mut cmd = Cli::command();
    let bin_name = cmd.get_name().to_string();

    let shell = match args.shell {
        Shell::Bash => CompletionShell::Bash,
        Shell::Zsh => CompletionShell::Zsh,
        Shell::Fish => CompletionShell::Fish,
        Shell::PowerShell => CompletionShell::PowerShell,
        Shell::Elvish => CompletionShell::Elvish,
    };

    generate(shell, &mut cmd, bin_name, &mut io::stdout());

    Ok(())
}
