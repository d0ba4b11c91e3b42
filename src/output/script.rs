//! Batch script rendering.

use crate::config::Config;

/// Build the full text of a `.sbatch` file.
///
/// `command` is the already formatted command block.
pub fn render_script(command: &str, job_name: &str, config: &Config) -> String {
    let mut script = render_header(job_name, config);

    script.push_str("\nset -euo pipefail\n");
    script.push_str("echo \"[$(date)] Job $SLURM_JOB_ID running on $(hostname)\"\n");
    if config.gres.is_some() {
        script.push_str("echo \"[$(date)] CUDA_VISIBLE_DEVICES=${CUDA_VISIBLE_DEVICES:-unset}\"\n");
    }
    script.push('\n');

    if let Some(module) = &config.module {
        script.push_str(&format!("module load {module}\n\n"));
    }

    script.push_str("# Command\n");
    script.push_str(command);
    script.push('\n');
    script
}

/// The `#SBATCH` directive block.
fn render_header(job_name: &str, config: &Config) -> String {
    let logs = config.logs_dir.display();
    let mut header = String::from("#!/bin/bash\n");

    let directives = [
        format!("--job-name={job_name}"),
        format!("--account={}", config.account),
        format!("--partition={}", config.partition),
        "--nodes=1".to_string(),
        "--ntasks=1".to_string(),
        format!("--cpus-per-task={}", config.cpus),
        format!("--mem={}", config.mem),
        format!("--time={}", config.time),
        format!("--output={logs}/{job_name}_%j.out"),
        format!("--error={logs}/{job_name}_%j.err"),
    ];
    for directive in &directives {
        header.push_str(&format!("#SBATCH {directive}\n"));
    }

    if let Some(gres) = &config.gres {
        header.push_str(&format!("#SBATCH --gres={gres}\n"));
    }
    if let Some(email) = &config.email {
        header.push_str(&format!("#SBATCH --mail-user={email}\n"));
        header.push_str("#SBATCH --mail-type=BEGIN,END,FAIL\n");
    }

    header
}
