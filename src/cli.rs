//! Command-line interface definition.

use clap::Parser;
use std::path::PathBuf;

use crate::{
    kmer::{KmerLength, MAX_K},
    output::OutputFormat,
};

/// Default trie memory budget, in MiB.
pub const DEFAULT_MAX_MEMORY_MIB: u64 = 4096;

/// Builds a k-mer frequency histogram with Shannon entropy and Z-scores from DNA sequence files.
#[derive(Parser, Debug)]
#[command(name = "findkmer")]
#[command(version, author, about, long_about = None)]
#[command(allow_negative_numbers = true)]
pub struct Args {
    /// K-mer length (1-20)
    #[arg(value_parser = parse_k)]
    pub k: KmerLength,

    /// Path to a sequence file (omit or use '-' for stdin)
    pub path: Option<PathBuf>,

    /// Output file ('-' for stdout) [default: "{k}mer_Histogram_Of_{file}.csv", or stdout for stdin input]
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    pub format: OutputFormat,

    /// Only output k-mers whose Z score is at least this value
    #[arg(short, long, allow_negative_numbers = true)]
    pub z_threshold: Option<f64>,

    /// Minimum count threshold (k-mers below this are excluded)
    #[arg(short, long, default_value = "1")]
    pub min_count: u32,

    /// Memory budget for the k-mer trie, in MiB
    #[arg(long, default_value_t = DEFAULT_MAX_MEMORY_MIB)]
    pub max_memory: u64,

    /// Suppress informational output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Show every sequence identifier line as it is read
    #[arg(short, long)]
    pub verbose: bool,
}

fn parse_k(s: &str) -> Result<KmerLength, String> {
    let k: i64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;
    if k < 1 {
        return Err("k-mer length must be at least 1".to_string());
    }
    KmerLength::try_from(k).map_err(|_| format!("k-mer length must be at most {MAX_K}"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_k_accepts_range() {
        assert_eq!(parse_k("1").unwrap().get(), 1);
        assert_eq!(parse_k("20").unwrap().get(), 20);
    }

    #[test]
    fn parse_k_rejects_out_of_range() {
        assert_eq!(parse_k("0").unwrap_err(), "k-mer length must be at least 1");
        assert_eq!(parse_k("-4").unwrap_err(), "k-mer length must be at least 1");
        assert_eq!(parse_k("21").unwrap_err(), "k-mer length must be at most 20");
        assert_eq!(parse_k("abc").unwrap_err(), "'abc' is not a valid number");
    }

    #[test]
    fn args_parse() {
        let args = Args::try_parse_from([
            "findkmer", "5", "genome.fa", "-z", "-1.5", "-f", "json", "-q",
        ])
        .unwrap();
        assert_eq!(args.k.get(), 5);
        assert_eq!(args.path, Some(PathBuf::from("genome.fa")));
        assert_eq!(args.z_threshold, Some(-1.5));
        assert_eq!(args.format, OutputFormat::Json);
        assert_eq!(args.min_count, 1);
        assert_eq!(args.max_memory, DEFAULT_MAX_MEMORY_MIB);
        assert!(args.quiet);
    }

    #[test]
    fn args_reject_negative_k() {
        assert!(Args::try_parse_from(["findkmer", "-3", "genome.fa"]).is_err());
    }

    #[test]
    fn args_verify() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
