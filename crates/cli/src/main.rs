//! kubestate CLI
//!
//! Reads kube-state-metrics through the cluster API proxy and reports
//! resource requests, limits and load by pod, node and deployment.

mod commands;
mod output;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use commands::{get, list, top};
use kubestate_lib::error::EXIT_FAILURE;
use kubestate_lib::observability::init_logging;
use kubestate_lib::{ExporterClient, KubestateError, Selector, Settings};
use output::OutputFormat;

/// kube-state-metrics reporting CLI
#[derive(Parser)]
#[command(name = "kubestate")]
#[command(author, version, about = "Kubernetes state metrics by pod, node and deployment", long_about = None)]
pub struct Cli {
    /// Path to kubeconfig file
    #[arg(long, short = 'c', global = true, env = "KUBECONFIG")]
    pub config: Option<String>,

    /// Namespace to report on, `*` for all
    #[arg(long, short, global = true, default_value = "*")]
    pub namespace: String,

    /// Enable debug logging on stderr
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Get metric families
    Get {
        /// Output format
        #[arg(long, short, value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,

        /// Exact metric family name, `*` for all
        #[arg(long, short, visible_alias = "metric", default_value = "*")]
        filter: String,
    },

    /// Rank resource usage
    #[command(subcommand)]
    Top(TopCommands),

    /// List metric families with type and help
    List,
}

#[derive(Subcommand)]
pub enum TopCommands {
    /// Containers by load on their node
    Pods,
    /// Nodes by load
    Nodes,
    /// Deployments by requested replicas
    Deployments,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        output::print_error(&format!("{err:#}"));
        std::process::exit(exit_code(&err));
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load()?;
    if let Some(path) = cli.config.as_deref().and_then(first_kubeconfig) {
        settings.kubeconfig = path;
    }
    init_logging(cli.verbose, settings.log_format);

    let namespace = Selector::from_flag(&cli.namespace);
    let format = match &cli.command {
        Commands::Get { output, .. } => Some(*output),
        _ => None,
    };
    let source = ExporterClient::connect(&settings).await?;

    let report = match cli.command {
        Commands::Get { output, filter } => {
            if output == OutputFormat::Json && !namespace.is_all() {
                output::print_warning("--namespace is ignored for json output");
            }
            get::get_metrics(&source, output, &Selector::from_flag(&filter), &namespace).await?
        }
        Commands::Top(TopCommands::Pods) => top::top_pods(&source, &namespace).await?,
        Commands::Top(TopCommands::Nodes) => top::top_nodes(&source, &namespace).await?,
        Commands::Top(TopCommands::Deployments) => {
            top::top_deployments(&source, &namespace).await?
        }
        Commands::List => list::list_families(&source).await?,
    };

    output::print_report(&report, format).context("Failed to write report")?;
    Ok(())
}

/// `KUBECONFIG` may hold a path list; the first entry is used
fn first_kubeconfig(value: &str) -> Option<String> {
    std::env::split_paths(value)
        .find(|path| !path.as_os_str().is_empty())
        .map(|path| path.display().to_string())
}

fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<KubestateError>()
        .map(KubestateError::exit_code)
        .unwrap_or(EXIT_FAILURE)
}
