//! Output sinks for histogram records.
//!
//! Records are serialized as soon as the traversal produces them; nothing is
//! buffered beyond the underlying writer.

use std::io::Write;

use clap::ValueEnum;

use crate::{error::FindKmerError, stats::KmerRecord};

/// Column headers of the CSV output.
pub const CSV_HEADER: &str = "Sequence, Shannon Entropy h, Shannon Entropy H, Frequency, Z score";

/// Column headers of the TSV output.
pub const TSV_HEADER: &str = "sequence\tentropy_h\tentropy_total\tfrequency\tz_score";

/// Output format for histogram records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Comma separated, one header line (`Sequence, Shannon Entropy h, ...`).
    #[default]
    Csv,
    /// Tab-separated values with a header line.
    Tsv,
    /// A JSON array of record objects.
    Json,
}

impl OutputFormat {
    /// File extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Tsv => "tsv",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Receives histogram records in traversal order.
pub trait RecordSink {
    /// Called once before the first record.
    fn begin(&mut self) -> Result<(), FindKmerError> {
        Ok(())
    }

    /// Called once per emitted record.
    fn write_record(&mut self, record: &KmerRecord) -> Result<(), FindKmerError>;

    /// Called once after the last record.
    fn finish(&mut self) -> Result<(), FindKmerError> {
        Ok(())
    }
}

impl RecordSink for Vec<KmerRecord> {
    fn write_record(&mut self, record: &KmerRecord) -> Result<(), FindKmerError> {
        self.push(record.clone());
        Ok(())
    }
}

/// Serializes records to a writer in one of the [`OutputFormat`]s.
#[derive(Debug)]
pub struct RecordWriter<W: Write> {
    out: W,
    format: OutputFormat,
    written: u64,
}

impl<W: Write> RecordWriter<W> {
    pub const fn new(out: W, format: OutputFormat) -> Self {
        Self {
            out,
            format,
            written: 0,
        }
    }

    /// Records written so far.
    pub const fn written(&self) -> u64 {
        self.written
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

fn format_z(record: &KmerRecord) -> String {
    record
        .z_score
        .value()
        .map_or_else(|| crate::stats::ZScore::NOT_APPLICABLE.to_string(), |z| format!("{z:.6}"))
}

impl<W: Write> RecordSink for RecordWriter<W> {
    fn begin(&mut self) -> Result<(), FindKmerError> {
        match self.format {
            OutputFormat::Csv => writeln!(self.out, "{CSV_HEADER}")?,
            OutputFormat::Tsv => writeln!(self.out, "{TSV_HEADER}")?,
            OutputFormat::Json => write!(self.out, "[")?,
        }
        Ok(())
    }

    fn write_record(&mut self, record: &KmerRecord) -> Result<(), FindKmerError> {
        match self.format {
            OutputFormat::Csv => writeln!(
                self.out,
                "{}, {:.6}, {:.6}, {}, {}",
                record.sequence,
                record.entropy_h,
                record.entropy_total,
                record.frequency,
                format_z(record)
            )?,
            OutputFormat::Tsv => writeln!(
                self.out,
                "{}\t{:.6}\t{:.6}\t{}\t{}",
                record.sequence,
                record.entropy_h,
                record.entropy_total,
                record.frequency,
                format_z(record)
            )?,
            OutputFormat::Json => {
                let separator = if self.written == 0 { "\n  " } else { ",\n  " };
                write!(self.out, "{separator}")?;
                serde_json::to_writer(&mut self.out, record)?;
            }
        }
        self.written += 1;
        Ok(())
    }

    fn finish(&mut self) -> Result<(), FindKmerError> {
        if self.format == OutputFormat::Json {
            if self.written > 0 {
                writeln!(self.out)?;
            }
            writeln!(self.out, "]")?;
        }
        self.out.flush()?;
        Ok(())
    }
}
