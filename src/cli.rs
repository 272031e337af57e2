use crate::audit::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aks-audit")]
#[command(version = crate::VERSION)]
#[command(about = "Audit Azure Kubernetes Service clusters against security best practices")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (-v for info, -vv for debug, -vvv for trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Fetch clusters and evaluate the audit controls against them
    Run {
        /// Cluster to audit as <resource-group>/<cluster-name> (repeatable)
        #[arg(long = "cluster", value_name = "RG/NAME")]
        clusters: Vec<String>,

        /// Azure subscription id (overrides config and AZURE_SUBSCRIPTION_ID)
        #[arg(long, value_name = "ID")]
        subscription: Option<String>,

        /// Management API endpoint
        #[arg(long, value_name = "URL")]
        endpoint: Option<String>,

        /// Only run these control ids
        #[arg(long, value_delimiter = ',')]
        include: Vec<String>,

        /// Skip these control ids
        #[arg(long, value_delimiter = ',')]
        exclude: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value = "plain")]
        format: OutputFormat,

        /// Write the report to a file instead of stdout
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Always exit 0, even when controls fail
        #[arg(long)]
        no_fail: bool,
    },

    /// List the available controls
    Controls {
        /// Output the catalog as JSON
        #[arg(long)]
        json: bool,
    },
}

impl Cli {
    /// Initialize logging based on verbosity level
    pub fn init_logging(&self) {
        env_logger::Builder::from_default_env()
            .filter_level(self.log_level())
            .init();
    }

    /// Level for the logger; `--quiet` keeps errors only
    pub fn log_level(&self) -> log::LevelFilter {
        if self.quiet {
            return log::LevelFilter::Error;
        }

        match self.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    }
}
