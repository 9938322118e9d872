use clap::{CommandFactory, Parser};
use kafka_dashboard::config::{CliConfig, Config};
use kafka_dashboard::discovery::{ReportLocator, inventory};
use kafka_dashboard::reporting::logging;
use kafka_dashboard::reporting::{HtmlDashboard, RenderOptions};
use kafka_dashboard::server::{DashboardServer, RefreshPipeline};
use kafka_dashboard::ui::completion::{install_completion, print_completions};
use kafka_dashboard::ui::output;
use kafka_dashboard::ui::{Cli, Commands, cli_to_config, validate_cli_args};

use std::path::Path;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Handle completion commands first
    if let Some(exit_code) = handle_completion_commands(&cli) {
        std::process::exit(exit_code);
    }

    if let Err(e) = validate_cli_args(&cli) {
        eprintln!("Error: {e}");
        eprintln!("\nFor more information, try '--help'.");
        std::process::exit(1);
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
        Some(Commands::CompletionGenerate { shell }) => {
            let mut app = Cli::command();
            print_completions(shell, &mut app);
            Some(0)
        }
        Some(Commands::CompletionInstall { shell }) => match install_completion(shell) {
            Ok(message) => {
                println!("{message}");
                Some(0)
            }
            Err(e) => {
                eprintln!("Error: {e}");
                Some(1)
            }
        },
        _ => None,
    }
}

async fn run(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    logging::init_logger(config.is_debug(), cli_config.quiet);

    let data_dir = config.resolved_data_dir();
    let locator = ReportLocator::new(&data_dir);
    let pipeline = RefreshPipeline::new(locator.clone(), config.status_mapping_kind()?.build());

    match &cli.command {
        Some(Commands::Check { fail_under, format }) => {
            let snapshot = pipeline.refresh();
            let passed = output::display_check(&snapshot, *fail_under, format)?;
            Ok(if passed { 0 } else { 1 })
        }
        Some(Commands::Export { output: path }) => {
            let snapshot = pipeline.refresh();
            HtmlDashboard::generate_dashboard(&snapshot, &RenderOptions::static_export(), path)
                .inspect_err(|e| {
                    logging::log_error(&format!("Could not write dashboard to '{path}'"), Some(e));
                })?;
            if !cli_config.quiet {
                output::display_export_complete(Path::new(path), &snapshot);
            }
            Ok(0)
        }
        _ => {
            if !cli_config.quiet {
                output::display_startup_banner(&inventory(&locator), &config);
            }
            logging::log_config_info(&config, &data_dir);

            let render_options = RenderOptions {
                refresh_interval_secs: config.refresh_interval_duration().as_secs(),
                live: true,
            };
            DashboardServer::new(pipeline, render_options)
                .run(&config.bind_address())
                .await?;
            Ok(0)
        }
    }
}

/// Load configuration from file or standard locations and merge with CLI config
fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations()
    };

    // CLI takes precedence over file values
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}
