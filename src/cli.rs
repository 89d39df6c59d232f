use crate::commands::{configure, trace};
use crate::config::{Config, OutputFormat};
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "tracesift")]
#[command(about = "Clean exception backtraces and separate application frames from framework frames")]
#[command(version)]
pub struct Cli {
    #[arg(short, long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable debug logging on stderr")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Commands {
    pub fn execute(self, config: Config, config_path: Option<PathBuf>) -> Result<()> {
        match self {
            Commands::Clean(args) => trace::handle_trace_command(&config, &args, View::Clean)?,
            Commands::App(args) => trace::handle_trace_command(&config, &args, View::Application)?,
            Commands::Framework(args) => {
                trace::handle_trace_command(&config, &args, View::Framework)?
            }
            Commands::Classify(args) => trace::handle_trace_command(&config, &args, View::Classify)?,
            Commands::Config(args) => {
                configure::handle_config_command(config, config_path, args.command)?
            }
        }
        Ok(())
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the cleaned trace
    Clean(TraceArgs),

    /// Print only application frames
    App(TraceArgs),

    /// Print only framework frames
    Framework(TraceArgs),

    /// Print every frame tagged as app or framework, with a summary
    Classify(TraceArgs),

    /// Configuration management
    Config(ConfigArgs),
}

/// Which part of the cleaned trace to print
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Clean,
    Application,
    Framework,
    Classify,
}

impl View {
    pub fn name(&self) -> &'static str {
        match self {
            View::Clean => "clean",
            View::Application => "application",
            View::Framework => "framework",
            View::Classify => "classify",
        }
    }
}

#[derive(Args, Debug, Default)]
pub struct TraceArgs {
    #[arg(help = "File holding the trace, one frame per line (stdin when omitted or '-')")]
    pub file: Option<PathBuf>,

    #[arg(
        short = 's',
        long = "sub",
        value_name = "PATTERN=REPLACEMENT",
        help = "Extra substitution rule, applied after the configured ones (repeatable)"
    )]
    pub substitutions: Vec<String>,

    #[arg(short, long, help = "Output format (overrides config)")]
    pub format: Option<OutputFormat>,

    #[arg(long, help = "Disable colored output")]
    pub no_color: bool,
}

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: Option<ConfigCommands>,
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show current configuration
    Show,

    /// Print the configuration file location
    Path,

    /// Write a default configuration file
    Init {
        #[arg(short, long, help = "Overwrite an existing file")]
        force: bool,
    },
}
