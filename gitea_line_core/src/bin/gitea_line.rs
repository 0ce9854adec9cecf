use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use camino::Utf8PathBuf;
use clap::{Parser, ValueEnum};
use gitea_line_core::{
    default_registry, logging, ActionContext, Availability, AutoConfirm, ConfirmPrompt, GitVcs,
    LinkConfig, OpenService, PermalinkService, TerminalPrompt,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

/// Open the Gitea web page for a line of a file in a local checkout.
#[derive(Debug, Parser)]
#[command(name = "gitea-line", version)]
struct Cli {
    /// File inside a git working tree
    file: Utf8PathBuf,

    /// 1-based line number
    #[arg(default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    line: u32,

    /// Only report whether a permalink is available (exit status 1 when not)
    #[arg(long)]
    check: bool,

    /// Print the URL instead of opening it
    #[arg(long, conflicts_with = "check")]
    print: bool,

    /// Output format used with --print
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Open without asking for confirmation
    #[arg(short, long)]
    yes: bool,

    /// Browser launcher id (system, print)
    #[arg(long)]
    launcher: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(err) = logging::init(cli.verbose) {
        eprintln!("gitea-line: failed to initialise logging: {err}");
    }

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("gitea-line: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = apply_overrides(LinkConfig::from_env()?, cli);

    let file = cli
        .file
        .canonicalize_utf8()
        .with_context(|| format!("failed to resolve {}", cli.file))?;
    let project = file.parent().map_or_else(String::new, ToString::to_string);
    let context = ActionContext::for_file(project, file.as_str(), cli.line - 1);

    let service = PermalinkService::new(GitVcs::new(), &config)
        .context("failed to start resolution workers")?;

    let availability = service.availability(&context);
    if cli.check {
        return Ok(match availability {
            Availability::Available => {
                println!("available");
                ExitCode::SUCCESS
            }
            Availability::Unavailable(reason) => {
                println!("unavailable: {reason}");
                ExitCode::FAILURE
            }
        });
    }
    if let Availability::Unavailable(reason) = availability {
        bail!("no permalink for {file}: {reason}");
    }

    let permalink = service
        .resolve_in_background(context)?
        .wait()
        .with_context(|| format!("failed to resolve permalink for {file}"))?;

    if cli.print {
        match cli.format {
            OutputFormat::Text => println!("{}", permalink.url),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&permalink)?),
        }
        return Ok(ExitCode::SUCCESS);
    }

    let opener = OpenService::new(default_registry(config.browser_timeout));
    let prompt: Box<dyn ConfirmPrompt> = if config.confirm {
        Box::new(TerminalPrompt::stdio())
    } else {
        Box::new(AutoConfirm)
    };
    opener.confirm_and_open(&config.launcher, prompt.as_ref(), &permalink)?;
    Ok(ExitCode::SUCCESS)
}

fn apply_overrides(mut config: LinkConfig, cli: &Cli) -> LinkConfig {
    if cli.yes {
        config.confirm = false;
    }
    if let Some(launcher) = &cli.launcher {
        config.launcher.clone_from(launcher);
    }
    config
}
