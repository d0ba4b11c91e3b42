//! Command-line arguments.

use clap::Parser;
use std::path::PathBuf;

use crate::config::{AuditConfig, Settings};

/// Slurmify - turn a list of shell commands into Slurm batch scripts
#[derive(Debug, Parser)]
#[command(name = "slurmify")]
#[command(about = "Generate one .sbatch script per command in a text file")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Input text file with commands (Required)
    #[arg(short = 'I', long)]
    pub input: Option<PathBuf>,

    /// Output directory for .sbatch files [default: ./Sbatch]
    #[arg(short = 'O', long)]
    pub output_dir: Option<PathBuf>,

    /// Directory for Slurm logs [default: ./Logs]
    #[arg(short = 'L', long)]
    pub logs_dir: Option<PathBuf>,

    /// Slurm partition [default: standard]
    #[arg(short = 'P', long)]
    pub partition: Option<String>,

    /// Slurm account (Required)
    #[arg(short = 'A', long)]
    pub account: Option<String>,

    /// GPU GRES string
    #[arg(short = 'G', long)]
    pub gres: Option<String>,

    /// CPUs per task [default: 1]
    #[arg(short = 'C', long)]
    pub cpus: Option<u32>,

    /// Memory per task [default: 4G]
    #[arg(short = 'M', long)]
    pub mem: Option<String>,

    /// Walltime [default: 01:00:00]
    #[arg(short = 'T', long)]
    pub time: Option<String>,

    /// Email for notifications
    #[arg(short = 'E', long)]
    pub email: Option<String>,

    /// Job name prefix [default: job]
    #[arg(short = 'J', long)]
    pub job_prefix: Option<String>,

    /// Module to load
    #[arg(short = 'm', long)]
    pub module: Option<String>,

    /// TOML file with default settings (overrides user and project config)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Append a JSON line per generated script to this file
    #[arg(long)]
    pub audit_log: Option<PathBuf>,

    /// Show version and exit
    #[arg(short = 'V', long)]
    pub version: bool,
}

impl Cli {
    /// The settings given on the command line, as the highest-precedence layer.
    pub fn overrides(&self) -> Settings {
        Settings {
            output_dir: self.output_dir.clone(),
            logs_dir: self.logs_dir.clone(),
            partition: self.partition.clone(),
            account: self.account.clone(),
            gres: self.gres.clone(),
            cpus: self.cpus,
            mem: self.mem.clone(),
            time: self.time.clone(),
            email: self.email.clone(),
            job_prefix: self.job_prefix.clone(),
            module: self.module.clone(),
            audit: AuditConfig {
                enabled: self.audit_log.is_some(),
                path: self.audit_log.clone(),
            },
        }
    }
}
