//! Output path selection for generated scripts.

use std::path::{Path, PathBuf};

/// Extension of every generated script.
pub const SCRIPT_EXTENSION: &str = "sbatch";

/// Pick the path a job's script is written to.
///
/// Uses `<dir>/<job>.sbatch` unless that already exists, in which case
/// `<dir>/<job>_<index:03>.sbatch` is returned without a further check.
pub fn resolve_script_path(dir: &Path, job_name: &str, index: usize) -> PathBuf {
    let path = dir.join(format!("{job_name}.{SCRIPT_EXTENSION}"));
    if path.exists() {
        dir.join(format!("{job_name}_{index:03}.{SCRIPT_EXTENSION}"))
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_fresh_path() {
        let dir = TempDir::new().unwrap();
        let path = resolve_script_path(dir.path(), "job_sample1", 1);
        assert_eq!(path, dir.path().join("job_sample1.sbatch"));
    }

    #[test]
    fn test_collision_uses_index() {
        let dir = TempDir::new().unwrap();
        let first = resolve_script_path(dir.path(), "job_sample1", 1);
        fs::write(&first, "#!/bin/bash\n").unwrap();

        let second = resolve_script_path(dir.path(), "job_sample1", 2);
        assert_ne!(first, second);
        assert_eq!(second, dir.path().join("job_sample1_002.sbatch"));
    }

    #[test]
    fn test_second_collision_is_not_resolved() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("job_x.sbatch"), "").unwrap();
        fs::write(dir.path().join("job_x_003.sbatch"), "").unwrap();

        let path = resolve_script_path(dir.path(), "job_x", 3);
        assert_eq!(path, dir.path().join("job_x_003.sbatch"));
    }

    #[test]
    fn test_wide_index() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("j.sbatch"), "").unwrap();
        let path = resolve_script_path(dir.path(), "j", 1234);
        assert_eq!(path, dir.path().join("j_1234.sbatch"));
    }
}
