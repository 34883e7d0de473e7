use clap::Parser;
use docs_link_checker::config::{CliConfig, Config, IgnoredConfig};
use docs_link_checker::core::constants::defaults;
use docs_link_checker::core::error::Result;
use docs_link_checker::discovery::{expand_named_files, find_candidate_files};
use docs_link_checker::reporting::logging;
use docs_link_checker::ui::output;
use docs_link_checker::ui::{Cli, Commands, ProgressReporter, cli_to_config, print_completions};
use docs_link_checker::validation::{Checker, RunSummary, Validator};

use std::path::{Path, PathBuf};
use std::time::Instant;
use tokio::io::AsyncReadExt;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    match run(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Handle completion commands and return exit code if a completion command was processed
fn handle_completion_commands(cli: &Cli) -> Option<i32> {
    match cli.command {
        Commands::Completion { shell } => {
            print_completions(shell);
            Some(0)
        }
        _ => None,
    }
}

async fn run(cli: &Cli) -> Result<i32> {
    let cli_config = cli_to_config(cli);
    let (config, ignored) = load_and_merge_config(&cli_config)?;

    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);
    ignored.iter().for_each(logging::log_ignored_config);
    logging::log_config_info(&config);

    let checker = Checker::from_config(&config)?;
    let started = Instant::now();

    let summary = match &cli.command {
        Commands::Dir { path } => {
            let paths = find_candidate_files(Path::new(path), &config.file_types_as_set())?;
            check_paths(&checker, paths, &cli_config).await
        }
        Commands::File { paths } => {
            let paths: Vec<PathBuf> = paths.iter().map(PathBuf::from).collect();
            let paths = expand_named_files(&paths)?;
            check_paths(&checker, paths, &cli_config).await
        }
        Commands::Stdin { text } => {
            let text = match text {
                Some(text) => text.clone(),
                None => read_stdin().await?,
            };
            RunSummary {
                report: checker.check_text(defaults::STDIN_FILE, &text).await,
                files_checked: 1,
                ..Default::default()
            }
        }
        Commands::Completion { .. } => return Ok(0),
    };

    logging::log_run_complete(
        summary.files_checked,
        summary.report.warning_count(),
        started.elapsed().as_millis(),
    );

    output::emit_report(
        &summary.report,
        config.output.as_deref().map(Path::new),
        &mut std::io::stdout().lock(),
    )?;
    output::display_file_problems(&summary, &mut std::io::stderr().lock())?;

    Ok(output::determine_exit_code(&summary))
}

/// Load configuration from file or standard locations and merge with CLI config
fn load_and_merge_config(cli_config: &CliConfig) -> Result<(Config, Vec<IgnoredConfig>)> {
    let (mut config, ignored) = if cli_config.no_config {
        (Config::default(), Vec::new())
    } else if let Some(ref config_file) = cli_config.config_file {
        let config = Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?;
        (config, Vec::new())
    } else {
        Config::load_from_standard_locations()
    };

    // CLI takes precedence
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok((config, ignored))
}

async fn check_paths(
    checker: &Checker<Validator>,
    paths: Vec<PathBuf>,
    cli_config: &CliConfig,
) -> RunSummary {
    logging::log_file_info(paths.len(), &paths);

    let mut progress = ProgressReporter::for_terminal(!cli_config.quiet && !cli_config.no_progress);
    progress.start_file_processing(paths.len());
    progress.start_reference_counter();

    let summary = checker.check_files(paths, Some(&progress)).await;

    progress.finish(summary.report.warning_count());
    progress.finish_and_clear();
    summary
}

/// Read all of standard input, replacing invalid UTF-8 like file input does
async fn read_stdin() -> Result<String> {
    let mut bytes = Vec::new();
    tokio::io::stdin().read_to_end(&mut bytes).await?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
