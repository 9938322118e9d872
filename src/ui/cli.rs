// Command-line interface definitions and parsing for kafka-dashboard

use crate::config::CliConfig;
use crate::core::constants::{output_formats, status_mappings};
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:
  kafka-dashboard                              # Auto-detect the data directory and serve
  kafka-dashboard --data-dir ./reports         # Use a custom data directory
  kafka-dashboard --port 8080                  # Serve on a different port
  kafka-dashboard check --fail-under 90        # One-shot health check for CI
  kafka-dashboard export --output report.html  # Write a static HTML page")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    // Data
    /// Directory containing Kafka analysis reports
    #[arg(long, value_name = "DIR", global = true, help_heading = "Data")]
    pub data_dir: Option<String>,

    /// How health check statuses are shown
    #[arg(
        long,
        value_name = "MAPPING",
        value_parser = status_mappings::ALL,
        global = true,
        help_heading = "Data"
    )]
    pub status_mapping: Option<String>,

    // Server
    /// Host to bind to (default: 127.0.0.1)
    #[arg(long, value_name = "HOST", global = true, help_heading = "Server")]
    pub host: Option<String>,

    /// Port to run the dashboard on (default: 8050)
    #[arg(short = 'p', long, value_name = "PORT", global = true, help_heading = "Server")]
    pub port: Option<u16>,

    /// Seconds between automatic refreshes (default: 30)
    #[arg(long, value_name = "SECONDS", global = true, help_heading = "Server")]
    pub refresh_interval: Option<u64>,

    // Output & Verbosity
    /// Enable debug logging
    #[arg(long, global = true, help_heading = "Output & Verbosity")]
    pub debug: bool,

    /// Suppress banner and log output
    #[arg(short = 'q', long, global = true, help_heading = "Output & Verbosity")]
    pub quiet: bool,

    // Configuration
    /// Use specific config file
    #[arg(long, value_name = "FILE", global = true, help_heading = "Configuration")]
    pub config: Option<String>,

    /// Ignore config files
    #[arg(long, global = true, help_heading = "Configuration")]
    pub no_config: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Serve the dashboard (default)
    Serve,
    /// Load the latest report once and print a health summary
    Check {
        /// Exit with status 1 when the health score is below this value (0-100)
        #[arg(long, value_name = "SCORE")]
        fail_under: Option<f64>,

        /// Output format
        #[arg(
            long,
            value_name = "FORMAT",
            value_parser = output_formats::ALL,
            default_value = output_formats::DEFAULT
        )]
        format: String,
    },
    /// Render the dashboard once and write it as a static HTML file
    Export {
        /// Path of the HTML file to write
        #[arg(short = 'o', long, value_name = "PATH")]
        output: String,
    },
    /// Generate shell completions
    #[command(name = "completion-generate", arg_required_else_help = true)]
    CompletionGenerate {
        /// The shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
    /// Install shell completions to standard location
    #[command(name = "completion-install", arg_required_else_help = true)]
    CompletionInstall {
        /// The shell to install completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

/// Convert the derived CLI structure into CliConfig
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        data_dir: cli
            .data_dir
            .as_ref()
            .map(|dir| dir.trim().to_string())
            .filter(|dir| !dir.is_empty()),
        host: cli
            .host
            .as_ref()
            .map(|host| host.trim().to_string())
            .filter(|host| !host.is_empty()),
        port: cli.port,
        debug: cli.debug,
        refresh_interval: cli.refresh_interval,
        status_mapping: cli.status_mapping.clone(),
        quiet: cli.quiet,
        config_file: cli.config.clone(),
        no_config: cli.no_config,
    }
}

/// Reject argument values clap cannot express as a type constraint
pub fn validate_cli_args(cli: &Cli) -> Result<(), String> {
    if let Some(Commands::Check {
        fail_under: Some(score),
        ..
    }) = cli.command
        && !(0.0..=100.0).contains(&score)
    {
        return Err(format!(
            "--fail-under {score} is invalid. Expected a value between 0-100."
        ));
    }

    if cli.config.is_some() && cli.no_config {
        return Err("--config and --no-config cannot be used together".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("kafka-dashboard").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_cli_to_config_default() {
        let cli_config = cli_to_config(&parse(&[]));

        assert_eq!(cli_config.data_dir, None);
        assert_eq!(cli_config.host, None);
        assert_eq!(cli_config.port, None);
        assert!(!cli_config.debug);
        assert!(!cli_config.quiet);
        assert_eq!(cli_config.refresh_interval, None);
        assert_eq!(cli_config.status_mapping, None);
        assert!(!cli_config.no_config);
    }

    #[test]
    fn test_cli_to_config_all_options() {
        let cli = parse(&[
            "--data-dir",
            " ./reports ",
            "--host",
            "0.0.0.0",
            "--port",
            "9000",
            "--debug",
            "--refresh-interval",
            "10",
            "--status-mapping",
            "reported",
            "--config",
            "dash.toml",
        ]);

        let cli_config = cli_to_config(&cli);

        assert_eq!(cli_config.data_dir.as_deref(), Some("./reports"));
        assert_eq!(cli_config.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(cli_config.port, Some(9000));
        assert!(cli_config.debug);
        assert_eq!(cli_config.refresh_interval, Some(10));
        assert_eq!(cli_config.status_mapping.as_deref(), Some("reported"));
        assert_eq!(cli_config.config_file.as_deref(), Some("dash.toml"));
    }

    #[test]
    fn test_cli_to_config_empty_strings() {
        let cli_config = cli_to_config(&parse(&["--data-dir", "  ", "--host", ""]));

        assert_eq!(cli_config.data_dir, None);
        assert_eq!(cli_config.host, None);
    }

    #[test]
    fn test_subcommands_parse() {
        assert!(parse(&[]).command.is_none());
        assert!(matches!(parse(&["serve"]).command, Some(Commands::Serve)));

        match parse(&["check", "--fail-under", "80", "--format", "json"]).command {
            Some(Commands::Check { fail_under, format }) => {
                assert_eq!(fail_under, Some(80.0));
                assert_eq!(format, "json");
            }
            _ => panic!("expected check command"),
        }

        match parse(&["export", "-o", "out.html"]).command {
            Some(Commands::Export { output }) => assert_eq!(output, "out.html"),
            _ => panic!("expected export command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = parse(&["check", "--data-dir", "reports", "--quiet"]);

        assert_eq!(cli.data_dir.as_deref(), Some("reports"));
        assert!(cli.quiet);

        let serve = parse(&[
            "serve",
            "--port",
            "9000",
            "--host",
            "0.0.0.0",
            "--refresh-interval",
            "5",
        ]);
        assert!(matches!(serve.command, Some(Commands::Serve)));
        assert_eq!(serve.port, Some(9000));
        assert_eq!(serve.host.as_deref(), Some("0.0.0.0"));
        assert_eq!(serve.refresh_interval, Some(5));
    }

    #[test]
    fn test_invalid_values_rejected_by_clap() {
        let base = ["kafka-dashboard"];
        let with = |extra: &[&str]| Cli::try_parse_from(base.iter().chain(extra.iter()));

        assert!(with(&["--status-mapping", "sometimes"]).is_err());
        assert!(with(&["--port", "70000"]).is_err());
        assert!(with(&["check", "--format", "xml"]).is_err());
    }

    #[test]
    fn test_validate_cli_args() {
        assert!(validate_cli_args(&parse(&["check", "--fail-under", "90"])).is_ok());
        assert!(validate_cli_args(&parse(&["check", "--fail-under", "0"])).is_ok());
        assert!(validate_cli_args(&parse(&["check", "--fail-under", "100"])).is_ok());
        assert!(validate_cli_args(&parse(&["check", "--fail-under", "101"])).is_err());
        assert!(validate_cli_args(&parse(&["check", "--fail-under=-1"])).is_err());
        assert!(validate_cli_args(&parse(&["--config", "a.toml", "--no-config"])).is_err());
    }
}
