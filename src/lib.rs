//! Slurmify - turn a list of shell commands into Slurm batch scripts.
//!
//! Each command is re-tokenized, re-quoted and laid out one flag per line,
//! given a job name derived from its output file, and wrapped in an
//! `#SBATCH` header built from the run's [`Config`].

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod job;
pub mod output;
pub mod runner;
pub mod shell;

pub use config::{Config, ConfigError, Settings};
pub use error::SlurmifyError;
pub use job::{derive_job_name, resolve_script_path};
pub use output::render_script;
pub use runner::{Summary, run};
pub use shell::{format_command, is_shell_operator, quote_arg, tokenize};
