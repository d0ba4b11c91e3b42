//! Job name derivation.

/// Words whose successor names the command's output file.
const OUTPUT_MARKERS: &[&str] = &[">", "-o", "-O", "--output"];

/// Extensions stripped (repeatedly) from the candidate name.
pub const TRIMMED_EXTENSIONS: &[&str] = &[
    ".bam", ".sam", ".cram", ".bai", ".gz", ".bed", ".bw", ".txt", ".sorted", ".csi", ".tbi",
    ".fq", ".fastq", ".fa", ".fasta", ".fai", ".vcf", ".csv", ".tsv", ".log", ".out", ".err",
    ".json", ".yaml", ".yml",
];

/// Derive a job name for `command`.
///
/// The candidate is the file following the first output marker, or else
/// the last word of the command. Known data extensions and wildcards are
/// removed; if nothing is left the zero-padded `index` is used instead.
///
/// Examples:
/// - `samtools sort -o sample1.sorted.bam sample1.sam` -> `job_sample1`
/// - `fastqc --outdir ./QC sample2.fastq.gz` -> `job_sample2`
pub fn derive_job_name(command: &str, prefix: &str, index: usize) -> String {
    let words: Vec<&str> = command.split_whitespace().collect();

    let target = words
        .windows(2)
        .find(|pair| OUTPUT_MARKERS.contains(&pair[0]))
        .map(|pair| pair[1])
        .or_else(|| words.last().copied());

    let candidate = target
        .map(|word| strip_extensions(base_name(word)).replace(['*', '?'], ""))
        .unwrap_or_default();

    if candidate.is_empty() {
        format!("{prefix}_{index:04}")
    } else {
        format!("{prefix}_{candidate}")
    }
}

/// Final path segment of `word`, ignoring trailing slashes.
fn base_name(word: &str) -> &str {
    let name = word.trim_end_matches('/').rsplit('/').next().unwrap_or("");
    match name {
        "." | ".." => "",
        _ => name,
    }
}

fn strip_extensions(mut name: &str) -> &str {
    while let Some(dot) = name.rfind('.') {
        if !TRIMMED_EXTENSIONS.contains(&&name[dot..]) {
            break;
        }
        name = &name[..dot];
    }
    name
}
