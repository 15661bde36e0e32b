//! tgkit CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use tgkit_cli::cli::{BytesAction, Cli, Command, ConfigAction};
use tgkit_cli::commands::text::{self, Output};
use tgkit_cli::commands;
use tgkit_cli::config::Config;
use tgkit_cli::error::CliResult;
use tgkit_core::tracing::{TracingConfig, init_tracing};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_tracing(TracingConfig::cli(cli.debug)) {
        eprintln!("warning: {}", e);
    }

    match run(cli) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<String> {
    let config_path = cli.config.clone().unwrap_or_else(Config::default_path);
    let config = match cli.config {
        Some(ref path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    let output = Output::from_flag(cli.json);

    match cli.command {
        Command::Dates {
            format,
            first,
            text: words,
        } => {
            let format = format.unwrap_or_else(|| config.dates.output_format.clone());
            text::dates(&words.join(" "), &format, first, output)
        }
        Command::Link { link } => text::link(&link, output),
        Command::Bytes { action } => match action {
            BytesAction::Format { precision, size } => {
                text::format_size(size, precision.unwrap_or(config.bytes.precision), output)
            }
            BytesAction::Parse { text: input } => text::parse_size(&input, output),
        },
        Command::Filename { limit, path } => {
            text::filename(&path, limit.unwrap_or(config.files.byte_limit), output)
        }
        Command::Title { collapse, title } => text::title(
            &title,
            collapse || config.titles.collapse_underscores,
            output,
        ),
        Command::Progress { width, percent } => {
            text::progress(percent, width.unwrap_or(config.progress.width), output)
        }
        Command::Config { action } => match action {
            ConfigAction::Dump => commands::config::dump(&config, &config_path),
            ConfigAction::Validate => commands::config::validate(&config),
            ConfigAction::Path => commands::config::path(&config_path),
        },
    }
}
