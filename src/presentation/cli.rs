//! CLI Argument Parsing
//!
//! This module defines the CLI interface using clap.
//!
//! ## Design Notes
//!
//! - Global flags (--json, --verbose) are inherited by all subcommands
//! - `-n/--namespace` is optional everywhere; unset falls back to the
//!   tracking record, then to the configured default namespace

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::value_objects::NotebookMode;

/// kubectl-marimo - deploy marimo notebooks to Kubernetes
#[derive(Parser, Debug)]
#[command(name = "kubectl-marimo")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Examples:
  kubectl marimo edit notebook.py
  kubectl marimo apply notebook.md
  kubectl marimo sync notebook.py
  kubectl marimo delete notebook.py
  kubectl marimo status")]
pub struct Cli {
    /// Machine-readable output (status)
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy a notebook, copy local mounts and open it in the browser
    #[command(visible_alias = "edit")]
    Deploy {
        /// Notebook file (.py, .md) or directory
        file: PathBuf,

        /// Server mode inside the pod
        #[arg(long, value_enum, default_value_t = NotebookMode::Edit)]
        mode: NotebookMode,

        /// Kubernetes namespace
        #[arg(short, long)]
        namespace: Option<String>,

        /// Primary mount (e.g. rsync://./data, sshfs://user@host:/srv)
        #[arg(long, value_name = "URI")]
        source: Option<String>,

        /// Print the resource YAML without applying
        #[arg(long)]
        dry_run: bool,

        /// Print access instructions instead of opening a browser
        #[arg(long)]
        headless: bool,

        /// Overwrite without prompting
        #[arg(short, long)]
        force: bool,
    },

    /// Deploy a notebook as a read-only app
    Run {
        /// Notebook file (.py, .md) or directory
        file: PathBuf,

        /// Kubernetes namespace
        #[arg(short, long)]
        namespace: Option<String>,

        /// Primary mount (e.g. rsync://./data, sshfs://user@host:/srv)
        #[arg(long, value_name = "URI")]
        source: Option<String>,

        /// Print the resource YAML without applying
        #[arg(long)]
        dry_run: bool,

        /// Print access instructions instead of opening a browser
        #[arg(long)]
        headless: bool,

        /// Overwrite without prompting
        #[arg(short, long)]
        force: bool,
    },

    /// Deploy a notebook to the cluster and print access instructions
    Apply {
        /// Notebook file (.py, .md) or directory
        file: PathBuf,

        /// Kubernetes namespace
        #[arg(short, long)]
        namespace: Option<String>,

        /// Print the resource YAML without applying
        #[arg(long)]
        dry_run: bool,

        /// Overwrite without prompting
        #[arg(short, long)]
        force: bool,
    },

    /// Pull changes from the pod back to the local file
    Sync {
        /// Local notebook that was previously deployed
        file: PathBuf,

        /// Kubernetes namespace (default: from the tracking file)
        #[arg(short, long)]
        namespace: Option<String>,

        /// Overwrite the local file without prompting
        #[arg(short, long)]
        force: bool,
    },

    /// Sync changes, then delete cluster resources
    Delete {
        /// Local notebook that was previously deployed
        file: PathBuf,

        /// Kubernetes namespace (default: from the tracking file)
        #[arg(short, long)]
        namespace: Option<String>,

        /// Keep the PersistentVolumeClaim (preserve data)
        #[arg(long)]
        keep_pvc: bool,

        /// Delete without syncing changes back
        #[arg(long)]
        no_sync: bool,

        /// Skip the local-modification prompt
        #[arg(short, long)]
        force: bool,
    },

    /// List active notebook deployments
    Status {
        /// Directory to scan for tracking files
        #[arg(default_value = ".")]
        directory: PathBuf,
    },
}
