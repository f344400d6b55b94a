use anyhow::Context;
use chrono::Utc;
use clap::Parser;
use log::{error, info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use wxalerts::alerts::NwsAlertSource;
use wxalerts::config::{Config, OutputFormat};
use wxalerts::display::{html_document, DisplayRegion, InputField};
use wxalerts::error::ConfigError;
use wxalerts::{AlertHandler, TriggerOutcome};

/// Title used for standalone HTML output
const PAGE_TITLE: &str = "Active Weather Alerts";

/// Command-line arguments for the weather alerts viewer
#[derive(Parser)]
#[command(
    name = "wxalerts",
    about = "Show active National Weather Service alerts for a US state",
    long_about = "Fetches active watches, warnings and advisories for a two-letter US state \
                  or territory code from the National Weather Service and prints them. \
                  Without a STATE argument, reads one state code per line from stdin."
)]
struct Cli {
    /// Two-letter state code; omit for interactive mode
    #[arg(value_name = "STATE")]
    state: Option<String>,

    /// Path to configuration file
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "Configuration file path (TOML format)"
    )]
    config: Option<PathBuf>,

    /// Output format for stdout
    #[arg(short, long, value_enum, help = "Output format (overrides config)")]
    format: Option<OutputFormat>,

    /// Write a standalone HTML page of the final display
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(
        short,
        long,
        help = "Enable verbose logging output (sets RUST_LOG=debug)"
    )]
    verbose: bool,
}

impl Cli {
    /// Check path arguments before any work starts
    ///
    /// A config path may be missing (defaults are used) but never a
    /// directory. An output path must name a file in an existing directory.
    fn validate(&self) -> Result<(), String> {
        if let Some(config_path) = self.config.as_deref() {
            ensure_not_directory(config_path, "Configuration")?;

            if config_path.is_file() && config_path.extension().is_some_and(|ext| ext != "toml") {
                warn!(
                    "Reading {} as TOML despite its extension",
                    config_path.display()
                );
            }
        }

        if let Some(output_path) = self.output.as_deref() {
            ensure_not_directory(output_path, "Output")?;

            let missing_parent = output_path
                .parent()
                .filter(|parent| !parent.as_os_str().is_empty() && !parent.is_dir());
            if let Some(parent) = missing_parent {
                return Err(format!(
                    "Output directory does not exist: {}",
                    parent.display()
                ));
            }
        }

        Ok(())
    }
}

/// Fail when a file argument points at a directory
fn ensure_not_directory(path: &Path, label: &str) -> Result<(), String> {
    if path.is_dir() {
        Err(format!("{} path is a directory: {}", label, path.display()))
    } else {
        Ok(())
    }
}

/// Load configuration from file or use defaults
///
/// A missing or unreadable file and an invalid file both fall back to the
/// defaults; only the log level differs.
fn load_config(config_path: Option<&Path>) -> Config {
    match config_path {
        Some(path) => {
            info!("Loading configuration from: {}", path.display());
            match Config::from_file(path) {
                Ok(config) => config,
                Err(ConfigError::ReadError(e)) => {
                    warn!(
                        "Configuration file '{}' not found or unreadable ({}), using defaults",
                        path.display(),
                        e
                    );
                    Config::default()
                }
                Err(e) => {
                    error!("Configuration error in '{}': {}", path.display(), e);
                    warn!("Using default configuration due to invalid config file");
                    Config::default()
                }
            }
        }
        None => {
            info!("Using default configuration");
            Config::default()
        }
    }
}

/// Render the display region in the requested format
fn format_region(region: &DisplayRegion, format: OutputFormat) -> String {
    match format {
        OutputFormat::Text => region.to_text(),
        OutputFormat::Html => {
            let mut html = region.to_html();
            html.push('\n');
            html
        }
    }
}

fn print_region(region: &DisplayRegion, format: OutputFormat) -> anyhow::Result<()> {
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(format_region(region, format).as_bytes())
        .context("Failed to write to stdout")?;
    stdout.flush().context("Failed to flush stdout")?;
    Ok(())
}

/// Read state codes from stdin, one per line, until EOF
async fn run_interactive(
    handler: &AlertHandler,
    region: &DisplayRegion,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        eprint!("State (two letters): ");
        let line = match lines.next_line().await.context("Failed to read stdin")? {
            Some(line) => line,
            None => break,
        };

        handler.input().set_value(line);
        handler.trigger().await;
        print_region(region, format)?;
    }

    info!("End of input, exiting");
    Ok(())
}

/// Wire up the handler and run one-shot or interactive mode
///
/// Returns whether the last one-shot query succeeded; interactive mode
/// always reports success.
async fn run(cli: &Cli, config: Config) -> anyhow::Result<bool> {
    let format = cli.format.unwrap_or(config.output.format);

    let source =
        NwsAlertSource::from_config(&config.api).context("Failed to create alerts client")?;
    info!("Using alerts endpoint {}", source.base_url());

    let input = InputField::new();
    let region = DisplayRegion::new();
    let handler = AlertHandler::new(input.clone(), Arc::new(region.clone()), Arc::new(source))
        .with_sequencing(config.handler.sequence_responses);

    let succeeded = match cli.state {
        Some(ref state) => {
            input.set_value(state.clone());
            let outcome = handler.trigger().await;
            print_region(&region, format)?;
            matches!(outcome, TriggerOutcome::NoAlerts | TriggerOutcome::Rendered(_))
        }
        None => {
            run_interactive(&handler, &region, format).await?;
            true
        }
    };

    if let Some(ref path) = cli.output {
        let page = html_document(PAGE_TITLE, &region, Utc::now());
        std::fs::write(path, page)
            .with_context(|| format!("Failed to write HTML page to {}", path.display()))?;
        info!("Wrote HTML page to {}", path.display());
    }

    Ok(succeeded)
}

#[tokio::main]
async fn main() {
    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    if cli.verbose {
        std::env::set_var("RUST_LOG", "debug");
    }
    env_logger::init();

    if let Err(e) = cli.validate() {
        error!("Invalid arguments: {}", e);
        std::process::exit(2);
    }

    let config = load_config(cli.config.as_deref());

    match run(&cli, config).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            error!("{:#}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;
    use wxalerts::display::{Node, Surface};

    fn cli() -> Cli {
        Cli {
            state: None,
            config: None,
            format: None,
            output: None,
            verbose: false,
        }
    }

    #[test]
    fn test_cli_parses_arguments() {
        let cli = Cli::try_parse_from([
            "wxalerts",
            "tx",
            "--format",
            "html",
            "-o",
            "alerts.html",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.state.as_deref(), Some("tx"));
        assert_eq!(cli.format, Some(OutputFormat::Html));
        assert_eq!(cli.output, Some(PathBuf::from("alerts.html")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_cli_rejects_unknown_format() {
        assert!(Cli::try_parse_from(["wxalerts", "--format", "pdf"]).is_err());
    }

    #[test]
    fn test_cli_validation_with_existing_file() {
        let file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            ..cli()
        };

        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_cli_validation_with_missing_file() {
        let cli = Cli {
            config: Some(PathBuf::from("/nonexistent/config.toml")),
            ..cli()
        };

        // Missing files are handled by falling back to defaults
        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_cli_validation_with_directory() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli {
            config: Some(dir.path().to_path_buf()),
            ..cli()
        };

        let message = cli.validate().unwrap_err();
        assert!(message.starts_with("Configuration path is a directory: "));
    }

    #[test]
    fn test_cli_validation_accepts_other_config_extension() {
        let file = tempfile::Builder::new().suffix(".conf").tempfile().unwrap();
        let cli = Cli {
            config: Some(file.path().to_path_buf()),
            ..cli()
        };

        assert!(cli.validate().is_ok());
    }

    #[test]
    fn test_cli_validation_output_paths() {
        let dir = tempfile::tempdir().unwrap();

        let ok = Cli {
            output: Some(dir.path().join("alerts.html")),
            ..cli()
        };
        assert!(ok.validate().is_ok());

        let relative = Cli {
            output: Some(PathBuf::from("alerts.html")),
            ..cli()
        };
        assert!(relative.validate().is_ok());

        let is_dir = Cli {
            output: Some(dir.path().to_path_buf()),
            ..cli()
        };
        assert_eq!(
            is_dir.validate().unwrap_err(),
            format!("Output path is a directory: {}", dir.path().display())
        );

        let missing_parent = Cli {
            output: Some(dir.path().join("missing").join("alerts.html")),
            ..cli()
        };
        assert!(missing_parent.validate().is_err());
    }

    #[test]
    fn test_load_config_defaults() {
        assert_eq!(load_config(None), Config::default());
        assert_eq!(
            load_config(Some(Path::new("/nonexistent/config.toml"))),
            Config::default()
        );
    }

    #[test]
    fn test_load_config_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[output]\nformat = \"html\"").unwrap();

        let config = load_config(Some(file.path()));
        assert_eq!(config.output.format, OutputFormat::Html);
    }

    #[test]
    fn test_load_config_invalid_file_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[api]\nbase_url = \"nope\"").unwrap();

        assert_eq!(load_config(Some(file.path())), Config::default());
    }

    #[test]
    fn test_format_region() {
        let region = DisplayRegion::new();
        region.replace(vec![Node::Heading("Heading & more".to_string())]);

        assert_eq!(format_region(&region, OutputFormat::Text), "Heading & more\n");
        assert_eq!(
            format_region(&region, OutputFormat::Html),
            "<h3>Heading &amp; more</h3>\n"
        );
    }
}
