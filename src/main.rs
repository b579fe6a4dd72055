//! kubectl-marimo - deploy marimo notebooks to Kubernetes
//!
//! Usage: kubectl marimo <COMMAND>
//!
//! Commands:
//!   deploy  Deploy, copy local mounts, port-forward and sync back (alias: edit)
//!   run     Deploy as a read-only app
//!   apply   Deploy and print access instructions
//!   sync    Pull changes from the pod back to the local file
//!   delete  Sync changes, then delete cluster resources
//!   status  List active notebook deployments

use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kubectl_marimo::application::{
    DeleteOptions, DeleteOutcome, DeployOptions, DeployOutcome, Deployment, SyncOptions,
    SyncOutcome,
};
use kubectl_marimo::config::Config;
use kubectl_marimo::domain::value_objects::NotebookMode;
use kubectl_marimo::presentation::cli::{Cli, Commands};
use kubectl_marimo::presentation::factory;
use kubectl_marimo::presentation::output::{
    render_access_info, render_dry_run, render_status_json, render_status_text,
    ConsoleProgressSink, OutputFormat,
};
use kubectl_marimo::MarimoError;

/// What happens after the resource is applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AfterApply {
    /// Print port-forward instructions
    AccessInfo,
    /// Port-forward, open the browser, sync back on exit
    Connect,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = Config::load_or_default();

    match cli.command {
        Commands::Deploy {
            file,
            mode,
            namespace,
            source,
            dry_run,
            headless,
            force,
        } => {
            let namespace = namespace.unwrap_or_else(|| config.defaults.namespace.clone());
            let options = DeployOptions::new(namespace)
                .with_mode(mode)
                .with_source(source)
                .with_dry_run(dry_run)
                .with_force(force);
            cmd_deploy(&config, &file, &options, after_apply(headless), "Deploy")
        }
        Commands::Run {
            file,
            namespace,
            source,
            dry_run,
            headless,
            force,
        } => {
            let namespace = namespace.unwrap_or_else(|| config.defaults.namespace.clone());
            let options = DeployOptions::new(namespace)
                .with_mode(NotebookMode::Run)
                .with_source(source)
                .with_dry_run(dry_run)
                .with_force(force);
            cmd_deploy(&config, &file, &options, after_apply(headless), "Deploy")
        }
        Commands::Apply {
            file,
            namespace,
            dry_run,
            force,
        } => {
            let namespace = namespace.unwrap_or_else(|| config.defaults.namespace.clone());
            let options = DeployOptions::new(namespace)
                .with_dry_run(dry_run)
                .with_force(force)
                .with_copy_local_mounts(false);
            cmd_deploy(&config, &file, &options, AfterApply::AccessInfo, "Apply")
        }
        Commands::Sync {
            file,
            namespace,
            force,
        } => cmd_sync(&config, &file, SyncOptions { namespace, force }),
        Commands::Delete {
            file,
            namespace,
            keep_pvc,
            no_sync,
            force,
        } => cmd_delete(
            &config,
            &file,
            &DeleteOptions {
                namespace,
                force,
                no_sync,
                keep_pvc,
            },
        ),
        Commands::Status { directory } => {
            cmd_status(&config, &directory, OutputFormat::from_flag(cli.json))
        }
    }
}

/// RUST_LOG wins; otherwise -v raises the level for this crate.
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "warn,kubectl_marimo=info",
        2 => "warn,kubectl_marimo=debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn after_apply(headless: bool) -> AfterApply {
    if headless {
        AfterApply::AccessInfo
    } else {
        AfterApply::Connect
    }
}

fn cmd_deploy(
    config: &Config,
    file: &Path,
    options: &DeployOptions,
    after: AfterApply,
    verb: &str,
) -> Result<()> {
    let outcome = factory::create_deploy_use_case(config)
        .execute(file, options, &ConsoleProgressSink)
        .with_context(|| format!("failed to deploy '{}'", file.display()))?;

    let deployment = match outcome {
        DeployOutcome::DryRun {
            manifest,
            local_mounts,
        } => {
            print!("{}", render_dry_run(&manifest, &local_mounts));
            return Ok(());
        }
        DeployOutcome::Cancelled => {
            println!("{} cancelled", verb);
            return Ok(());
        }
        DeployOutcome::Deployed(deployment) => deployment,
    };

    match after {
        AfterApply::AccessInfo => {
            println!();
            print!("{}", render_access_info(&deployment));
            Ok(())
        }
        AfterApply::Connect => connect_and_sync(config, &deployment),
    }
}

fn connect_and_sync(config: &Config, deployment: &Deployment) -> Result<()> {
    let connect = factory::create_connect_use_case(config);

    println!("Waiting for {} to be ready...", deployment.name);
    let (connection, ready) = connect.prepare(deployment);
    if !ready {
        eprintln!("Warning: Pod may not be ready, continuing anyway...");
    }

    println!("Opening {}", connection.url);
    println!("Press Ctrl+C to stop port-forward and sync changes");
    println!();

    if let Err(e) = open::that(&connection.url) {
        warn!(url = %connection.url, "could not open browser: {}", e);
    }

    // kubectl gets the SIGINT too; we only need to survive it.
    ctrlc::set_handler(|| {}).context("failed to install Ctrl+C handler")?;

    if let Err(e) = connect.forward(deployment, &connection) {
        eprintln!("Warning: port-forward failed: {}", e);
    }

    if !deployment.is_directory {
        println!("\nSyncing changes...");
        let options = SyncOptions {
            namespace: Some(deployment.namespace.clone()),
            force: true,
        };
        let sync = factory::create_sync_use_case(config);
        if let Err(e) = sync.execute(&deployment.path, &options) {
            eprintln!("Warning: Sync failed: {}", e);
        }
    }
    println!("Done");
    Ok(())
}

fn cmd_sync(config: &Config, file: &Path, options: SyncOptions) -> Result<()> {
    match factory::create_sync_use_case(config).execute(file, &options) {
        Ok(SyncOutcome::Synced { name, namespace }) => {
            println!("Synced from {}/{} to {}", namespace, name, file.display());
            Ok(())
        }
        Ok(SyncOutcome::Cancelled) => {
            println!("Sync cancelled");
            Ok(())
        }
        Err(e @ MarimoError::NotDeployed { .. }) => {
            eprintln!("Error: {}", e);
            eprintln!("Hint: Run 'kubectl marimo apply' first");
            std::process::exit(1);
        }
        Err(e) => Err(e).with_context(|| format!("failed to sync '{}'", file.display())),
    }
}

fn cmd_delete(config: &Config, file: &Path, options: &DeleteOptions) -> Result<()> {
    let outcome = factory::create_delete_use_case(config)
        .execute(file, options, &ConsoleProgressSink)
        .with_context(|| format!("failed to delete '{}'", file.display()))?;

    match outcome {
        DeleteOutcome::Deleted {
            name,
            namespace,
            synced,
        } => {
            if synced {
                println!("Synced content to {}", file.display());
            }
            println!("Deleted {}/{}", namespace, name);
        }
        DeleteOutcome::Cancelled => {
            println!("Delete cancelled. Use --no-sync to delete without syncing.");
        }
    }
    Ok(())
}

fn cmd_status(config: &Config, directory: &Path, format: OutputFormat) -> Result<()> {
    let entries = factory::create_status_use_case(config)
        .execute(directory)
        .with_context(|| format!("failed to scan '{}'", directory.display()))?;

    match format {
        OutputFormat::Json => println!("{}", render_status_json(&entries)?),
        OutputFormat::Text => print!(
            "{}",
            render_status_text(&entries, &directory.display().to_string())
        ),
    }
    Ok(())
}
