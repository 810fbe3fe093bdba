use std::fs;
use std::io::{self, Read, Write};

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::{debug, info};

use tmpl::Template;
use tmpl::cli::{self, Cli};
use tmpl::config::Config;
use tmpl::varsfile;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // Determine log level with priority: CLI --log-level > config file > default (WARN)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("{} Unknown log-level '{}', defaulting to WARN", "Warning:".yellow(), s);
                tracing::Level::WARN
            }
        },
        None => tracing::Level::WARN,
    };

    // stdout carries the rendered document
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    debug!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn read_source(path: Option<&str>) -> Result<(Option<&str>, String)> {
    match path {
        Some(path) => {
            let body = fs::read_to_string(path).with_context(|| format!("Failed to read template {}", path))?;
            Ok((Some(path), body))
        }
        None => {
            debug!("read_source: reading template from stdin");
            let mut body = String::new();
            io::stdin().read_to_string(&mut body).context("Failed to read template from stdin")?;
            Ok((None, body))
        }
    }
}

fn build_template(cli: &Cli, config: &Config) -> Result<Template> {
    let (name, body) = read_source(cli.template_path())?;
    let mut template = Template::new(body).with_strict(config.strict);
    if let Some(name) = name {
        template = template.with_name(name);
    }

    for path in config.includes.iter().chain(&cli.include) {
        let source = fs::read_to_string(path).with_context(|| format!("Failed to read include {}", path.display()))?;
        debug!(path = %path.display(), "build_template: adding include");
        template = template.with_include(source);
    }

    // Precedence: vars file, then --var, then --num
    if let Some(path) = &cli.vars {
        for (key, value) in varsfile::load(path)? {
            template.set_var(key, value);
        }
    }
    for (key, value) in cli::parse_assignments(&cli.var) {
        template.set_var(key, value);
    }
    for (key, value) in cli::parse_numbers(&cli.num)? {
        template.set_var(key, value);
    }

    Ok(template)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;
    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    let template = build_template(&cli, &config)?;

    // Render fully before touching the destination so failures leave no partial output
    let mut rendered = Vec::new();
    template
        .process(&mut rendered)
        .with_context(|| format!("Failed to render {}", template.name()))?;

    match &cli.output {
        Some(path) => {
            fs::write(path, &rendered).with_context(|| format!("Failed to write output {}", path.display()))?;
            info!("Wrote {} bytes to {}", rendered.len(), path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&rendered).context("Failed to write output")?;
            stdout.flush().context("Failed to flush output")?;
        }
    }

    Ok(())
}
