mod cli;

use about_this_mac::config::load_config;
use about_this_mac::display::Palette;
use about_this_mac::utils::command::{is_elevated, stdout_is_tty};
use about_this_mac::utils::file::{default_markdown_filename, expand_path, write_output};
use about_this_mac::{collect_report, raw, render, Hint, OutputFormat, RenderOptions, Result, Section, SystemCommandRunner};
use chrono::{Local, Utc};
use clap::Parser;
use cli::{color_enabled, Cli, ColorEnv};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref())?;
    let runner = SystemCommandRunner::new(config.runner.timeout());

    let raw_domains = cli.raw_domains();
    if !raw_domains.is_empty() {
        println!("{}", raw::dump(&runner, &raw_domains));
        return Ok(());
    }

    let format = cli.format.or(config.display.format).unwrap_or_default();
    let sections = cli
        .selected_sections()
        .or_else(|| config.display.section.clone())
        .unwrap_or_else(|| Section::ALL.to_vec());
    debug!(%format, ?sections, "collecting report");

    let collection = collect_report(&runner, &sections, Utc::now());
    let elevated = is_elevated();
    for hint in &collection.hints {
        match hint {
            Hint::RequiresPrivileges { .. } if elevated => {}
            hint => eprintln!("Note: {}", hint),
        }
    }

    let destination: Option<PathBuf> = match cli.output.as_deref() {
        Some("-") => None,
        Some(path) => Some(expand_path(path)),
        None if format == OutputFormat::Markdown => {
            let model = collection
                .report
                .hardware
                .as_ref()
                .and_then(|hw| hw.model_name.as_deref());
            Some(PathBuf::from(default_markdown_filename(model, Local::now().date_naive())))
        }
        None => None,
    };

    let no_color = std::env::var("NO_COLOR").ok();
    let term = std::env::var("TERM").ok();
    let env = ColorEnv {
        no_color: no_color.as_deref(),
        term: term.as_deref(),
        stdout_tty: stdout_is_tty(),
    };
    let options = RenderOptions {
        color: format == OutputFormat::Text && color_enabled(cli, env, destination.is_some()),
        palette: Palette::from_config(&config.colors),
        separator: config
            .display
            .separator
            .clone()
            .unwrap_or_else(|| RenderOptions::default().separator),
    };

    let rendered = render(&collection.report, format, &options)?;
    match destination {
        Some(path) => {
            write_output(&path, &rendered)?;
            println!("Output written to {}", path.display());
        }
        None => println!("{}", rendered),
    }
    Ok(())
}
