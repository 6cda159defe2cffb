//! Run configuration: defaults and validation on top of the parsed arguments.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    cli::Args,
    error::FindKmerError,
    estimate::node_budget,
    histogram::RecordFilter,
    input::Input,
    kmer::KmerLength,
    output::OutputFormat,
};

const OUTPUT_STEM: &str = "mer_Histogram_Of_";
const Z_FILTERED_SUFFIX: &str = "zScoreFiltered";

/// Where records are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    File(PathBuf),
}

impl std::fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Stdout => write!(f, "<stdout>"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// A validated run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub k: KmerLength,
    pub input: Input,
    pub output: OutputTarget,
    pub format: OutputFormat,
    pub filter: RecordFilter,
    pub memory_budget_bytes: u64,
}

impl Config {
    /// Builds a configuration from parsed arguments.
    ///
    /// # Errors
    ///
    /// Returns [`FindKmerError::Config`] if the input file does not exist, the
    /// Z threshold is not finite, or `min_count` is zero.
    pub fn from_args(args: Args) -> Result<Self, FindKmerError> {
        if let Some(z) = args.z_threshold {
            if !z.is_finite() {
                return Err(FindKmerError::Config {
                    details: format!("Z threshold must be a finite number, got {z}"),
                });
            }
        }
        if args.min_count == 0 {
            return Err(FindKmerError::Config {
                details: "minimum count must be at least 1".to_string(),
            });
        }

        let input = Input::from_option(args.path.as_deref());
        if let Some(path) = input.as_path() {
            if let Err(e) = fs::metadata(path) {
                return Err(FindKmerError::Config {
                    details: format!("issue with file path '{}': {e}", path.display()),
                });
            }
        }

        let output = match args.output {
            Some(path) if path.as_os_str() == "-" => OutputTarget::Stdout,
            Some(path) => OutputTarget::File(path),
            None => input.as_path().map_or(OutputTarget::Stdout, |path| {
                OutputTarget::File(default_output_name(
                    args.k,
                    path,
                    args.format,
                    args.z_threshold.is_some(),
                ))
            }),
        };

        Ok(Self {
            k: args.k,
            input,
            output,
            format: args.format,
            filter: RecordFilter {
                min_count: args.min_count,
                z_threshold: args.z_threshold,
            },
            memory_budget_bytes: args.max_memory.saturating_mul(1024 * 1024),
        })
    }

    /// The trie node limit implied by the memory budget.
    #[must_use]
    pub fn node_limit(&self) -> usize {
        node_budget(self.memory_budget_bytes)
    }
}

/// Default output file name: `{k}mer_Histogram_Of_{file_name}[zScoreFiltered].{ext}`,
/// placed in the current directory.
#[must_use]
pub fn default_output_name(
    k: KmerLength,
    input: &Path,
    format: OutputFormat,
    z_filtered: bool,
) -> PathBuf {
    let file_name = input
        .file_name()
        .map_or_else(|| "input".into(), |name| name.to_string_lossy());
    let suffix = if z_filtered { Z_FILTERED_SUFFIX } else { "" };
    PathBuf::from(format!(
        "{k}{OUTPUT_STEM}{file_name}{suffix}.{}",
        format.extension()
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::NamedTempFile;

    fn args(extra: &[&str]) -> Args {
        let mut argv = vec!["findkmer"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn default_output_name_for_file() {
        let name = default_output_name(
            KmerLength::new(7).unwrap(),
            Path::new("data/genome.fa"),
            OutputFormat::Csv,
            false,
        );
        assert_eq!(name, PathBuf::from("7mer_Histogram_Of_genome.fa.csv"));
    }

    #[test]
    fn default_output_name_when_filtered() {
        let name = default_output_name(
            KmerLength::new(3).unwrap(),
            Path::new("x.fa"),
            OutputFormat::Json,
            true,
        );
        assert_eq!(name, PathBuf::from("3mer_Histogram_Of_x.fazScoreFiltered.json"));
    }

    #[test]
    fn stdin_defaults_to_stdout() {
        let config = Config::from_args(args(&["4"])).unwrap();
        assert!(config.input.is_stdin());
        assert_eq!(config.output, OutputTarget::Stdout);
    }

    #[test]
    fn file_input_defaults_to_named_file() {
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().to_str().unwrap();
        let config = Config::from_args(args(&["4", path])).unwrap();
        let OutputTarget::File(out) = &config.output else {
            panic!("expected a file output");
        };
        assert!(out.to_string_lossy().starts_with("4mer_Histogram_Of_"));
    }

    #[test]
    fn explicit_dash_output_is_stdout() {
        let temp = NamedTempFile::new().unwrap();
        let path = temp.path().to_str().unwrap();
        let config = Config::from_args(args(&["4", path, "-o", "-"])).unwrap();
        assert_eq!(config.output, OutputTarget::Stdout);
    }

    #[test]
    fn missing_input_is_rejected() {
        let err = Config::from_args(args(&["4", "/nonexistent/genome.fa"])).unwrap_err();
        assert!(matches!(err, FindKmerError::Config { .. }));
    }

    #[test]
    fn zero_min_count_is_rejected() {
        let err = Config::from_args(args(&["4", "-m", "0"])).unwrap_err();
        assert!(matches!(err, FindKmerError::Config { .. }));
    }

    #[test]
    fn filter_and_budget_are_carried() {
        let config = Config::from_args(args(&["4", "-z", "2.5", "-m", "3", "--max-memory", "1"])).unwrap();
        assert_eq!(config.filter.min_count, 3);
        assert_eq!(config.filter.z_threshold, Some(2.5));
        assert_eq!(config.memory_budget_bytes, 1024 * 1024);
        assert_eq!(config.node_limit(), node_budget(1024 * 1024));
    }
}
