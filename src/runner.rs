//! The batch loop: one input line in, one script out.

use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::audit::AuditLogger;
use crate::config::Config;
use crate::error::{Result, SlurmifyError};
use crate::input::{CommandLine, CommandLines};
use crate::job::{derive_job_name, resolve_script_path};
use crate::output::{render_script, write_script};
use crate::shell::format_command;

/// Outcome of processing one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedScript {
    /// 1-based sequence index among the input's commands.
    pub index: usize,
    pub job_name: String,
    pub path: PathBuf,
    /// The command body is the raw line (unbalanced quoting).
    pub passthrough: bool,
    /// Set when the script could not be persisted.
    pub write_error: Option<String>,
}

/// Totals for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    /// Commands processed, including those whose script failed to write.
    pub generated: usize,
    /// Scripts that could not be written.
    pub warnings: usize,
    /// Commands emitted verbatim instead of formatted.
    pub passthrough: usize,
}

/// Create the output directories, then turn every command in the input
/// file into a script.
pub fn run(config: &Config, audit: Option<&mut AuditLogger>) -> Result<Summary> {
    create_dir(&config.output_dir)?;
    create_dir(&config.logs_dir)?;

    let file = File::open(&config.input).map_err(|source| SlurmifyError::OpenInput {
        path: config.input.clone(),
        source,
    })?;
    process(BufReader::new(file), config, audit)
}

/// Generate scripts for each command read from `reader`.
///
/// Commands are handled strictly in order; a failed write is reported and
/// skipped, a read fault aborts.
pub fn process<R: BufRead>(
    reader: R,
    config: &Config,
    mut audit: Option<&mut AuditLogger>,
) -> Result<Summary> {
    let mut summary = Summary::default();

    for line in CommandLines::new(reader) {
        let line = line.map_err(|source| SlurmifyError::ReadInput {
            produced: summary.generated,
            source,
        })?;
        summary.generated += 1;

        let script = generate(&line, summary.generated, config);
        if script.passthrough {
            summary.passthrough += 1;
        }
        if script.write_error.is_some() {
            summary.warnings += 1;
        }

        if let Some(logger) = audit.as_deref_mut() {
            if let Err(e) = logger.log_script(&line, &script) {
                warn(format_args!("could not write audit entry: {e}"));
            }
        }
    }

    Ok(summary)
}

/// Name, format, place and write the script for one command.
fn generate(line: &CommandLine, index: usize, config: &Config) -> GeneratedScript {
    let job_name = derive_job_name(&line.text, &config.job_prefix, index);

    let formatted = format_command(&line.text);
    if let Some(err) = &formatted.passthrough {
        warn(format_args!(
            "line {}: {err}; command kept verbatim",
            line.number
        ));
    }

    let content = render_script(&formatted.text, &job_name, config);
    let path = resolve_script_path(&config.output_dir, &job_name, index);

    let write_error = match write_script(&path, &content) {
        Ok(()) => None,
        Err(e) => {
            warn(format_args!("Could not write {}: {e}", path.display()));
            Some(e.to_string())
        }
    };

    GeneratedScript {
        index,
        job_name,
        path,
        passthrough: formatted.passthrough.is_some(),
        write_error,
    }
}

fn create_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| SlurmifyError::CreateDir {
        path: path.to_path_buf(),
        source,
    })
}

fn warn(message: std::fmt::Arguments<'_>) {
    eprintln!("[slurmify] Warning: {message}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor, Read};
    use tempfile::TempDir;

    fn config(dir: &TempDir) -> Config {
        Config {
            input: dir.path().join("commands.txt"),
            output_dir: dir.path().join("Sbatch"),
            logs_dir: dir.path().join("Logs"),
            partition: "standard".to_string(),
            account: "lab".to_string(),
            gres: None,
            cpus: 1,
            mem: "4G".to_string(),
            time: "01:00:00".to_string(),
            email: None,
            job_prefix: "job".to_string(),
            module: None,
        }
    }

    fn script_names(dir: &Path) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn test_skips_blank_and_comment_lines() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        fs::write(
            &config.input,
            "\n# alignment jobs\nsamtools sort -o s1.sorted.bam s1.sam\n\nfastqc --outdir ./QC s2.fastq.gz\n",
        )
        .unwrap();

        let summary = run(&config, None).unwrap();
        assert_eq!(summary.generated, 2);
        assert_eq!(summary.warnings, 0);
        assert!(config.logs_dir.is_dir());
        assert_eq!(
            script_names(&config.output_dir),
            vec!["job_s1.sbatch", "job_s2.sbatch"]
        );
    }

    #[test]
    fn test_duplicate_names_get_index_suffix() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        fs::write(
            &config.input,
            "gzip -k reads.fq\n# again\ngzip -c reads.fq > reads.fq.gz\n",
        )
        .unwrap();

        let summary = run(&config, None).unwrap();
        assert_eq!(summary.generated, 2);
        assert_eq!(
            script_names(&config.output_dir),
            vec!["job_reads.sbatch", "job_reads_002.sbatch"]
        );
    }

    #[test]
    fn test_unbalanced_quote_is_passthrough() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        fs::write(&config.input, "echo \"unterminated > log.txt\n").unwrap();

        let summary = run(&config, None).unwrap();
        assert_eq!(summary.generated, 1);
        assert_eq!(summary.passthrough, 1);

        let script = fs::read_to_string(config.output_dir.join("job_log.sbatch")).unwrap();
        assert!(script.ends_with("# Command\necho \"unterminated > log.txt\n"));
    }

    #[test]
    fn test_write_failure_is_counted_not_fatal() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        fs::create_dir_all(&config.output_dir).unwrap();
        // A directory squatting on both candidate paths makes the write fail
        fs::create_dir(config.output_dir.join("job_a.sbatch")).unwrap();
        fs::create_dir(config.output_dir.join("job_a_001.sbatch")).unwrap();

        let summary = process(Cursor::new("touch a\nhostname\n"), &config, None).unwrap();
        assert_eq!(summary.generated, 2);
        assert_eq!(summary.warnings, 1);
        assert!(config.output_dir.join("job_hostname.sbatch").is_file());
    }

    #[test]
    fn test_non_utf8_comment_does_not_abort() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        fs::create_dir_all(&config.output_dir).unwrap();

        let input: &[u8] = b"hostname\n# r\xe9sum\xe9\npwd\n";
        let summary = process(Cursor::new(input), &config, None).unwrap();
        assert_eq!(summary.generated, 2);
        assert_eq!(
            script_names(&config.output_dir),
            vec!["job_hostname.sbatch", "job_pwd.sbatch"]
        );
    }

    #[test]
    fn test_missing_input_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        assert!(matches!(
            run(&config, None),
            Err(SlurmifyError::OpenInput { .. })
        ));
    }

    #[test]
    fn test_output_dir_blocked_is_fatal() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        fs::write(&config.output_dir, "not a directory").unwrap();
        assert!(matches!(
            run(&config, None),
            Err(SlurmifyError::CreateDir { .. })
        ));
    }

    struct FailingReader {
        served: bool,
    }

    impl Read for FailingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            if self.served {
                return Err(io::Error::other("disk went away"));
            }
            self.served = true;
            let data = b"hostname\n";
            buf[..data.len()].copy_from_slice(data);
            Ok(data.len())
        }
    }

    #[test]
    fn test_read_fault_reports_progress() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        fs::create_dir_all(&config.output_dir).unwrap();

        let reader = BufReader::new(FailingReader { served: false });
        match process(reader, &config, None) {
            Err(SlurmifyError::ReadInput { produced, .. }) => assert_eq!(produced, 1),
            other => panic!("expected read error, got {other:?}"),
        }
    }

    #[test]
    fn test_audit_entries_written() {
        let dir = TempDir::new().unwrap();
        let config = config(&dir);
        fs::create_dir_all(&config.output_dir).unwrap();
        let audit_path = dir.path().join("audit.jsonl");
        let mut logger = AuditLogger::open(&audit_path).unwrap();

        process(Cursor::new("ls\npwd\n"), &config, Some(&mut logger)).unwrap();

        let content = fs::read_to_string(&audit_path).unwrap();
        assert_eq!(content.lines().count(), 2);
        assert!(content.contains("\"job_name\":\"job_pwd\""));
    }
}
