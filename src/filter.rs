use crate::activity::{ActivityReader, COLUMNS};
use crate::config::Config;
use crate::nace::NaceCode;
use anyhow::{Context, Result, anyhow};
use csv::ByteRecord;
use log::{debug, info};
use std::fmt;
use std::fs::File;
use std::io::{Read, Write};
use std::time::Instant;

/// Rows scanned between two progress lines.
const PROGRESS_EVERY: usize = 100_000;

/// Outcome of a completed run.
#[derive(Debug, PartialEq)]
pub struct Summary {
    pub file_name: String,
    pub count: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "✅ {} created ({} rows)", self.file_name, self.count)
    }
}

/// Rows seen and rows written by one pass.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Tally {
    pub scanned: usize,
    pub matched: usize,
}

fn rows_per_sec(rows: usize, started: Instant) -> f64 {
    let secs = started.elapsed().as_secs_f64();
    if secs > 0.0 { rows as f64 / secs } else { 0.0 }
}

#[derive(Debug, Clone)]
pub struct ActivityFilter {
    code: NaceCode,
}

impl ActivityFilter {
    pub fn new(code: NaceCode) -> Self {
        Self { code }
    }

    pub fn code(&self) -> &NaceCode {
        &self.code
    }

    /// Reads `<data_dir>/activity.csv` and writes the matching rows to
    /// `<output_dir>/filtre_<code>.csv`.
    ///
    /// The input and its header row are checked before the output is
    /// created, so a missing or unusable input leaves no file behind. A
    /// failure while streaming leaves the partial output on disk.
    pub fn run(&self, config: &Config) -> Result<Summary> {
        let started = Instant::now();
        let input_path = config.input_path();
        let output_path = config.output_path(&self.code);

        debug!("Opening input {}", input_path.display());
        let input = File::open(&input_path)
            .with_context(|| format!("Failed to open {}", input_path.display()))?;
        let mut input = ActivityReader::from_reader(input)
            .with_context(|| format!("Unusable input {}", input_path.display()))?;
        debug!("Creating output {}", output_path.display());
        let output = File::create(&output_path)
            .with_context(|| format!("Failed to create {}", output_path.display()))?;

        let mut sink = Self::open_output(output)?;
        let tally = self.process(&mut input, &mut sink)?;
        Self::finalize(sink, tally.matched)?;

        info!(
            "Scanned {} rows in {:.2} sec ({:.0} rows/sec), {} matched NACE code {}",
            tally.scanned,
            started.elapsed().as_secs_f64(),
            rows_per_sec(tally.scanned, started),
            tally.matched,
            self.code
        );
        Ok(Summary {
            file_name: Config::output_file_name(&self.code),
            count: tally.matched,
        })
    }

    pub fn stream_csv<R: Read, W: Write>(&self, reader: R, writer: W) -> Result<Tally> {
        let mut input = ActivityReader::from_reader(reader)?;
        let mut sink = Self::open_output(writer)?;
        let tally = self.process(&mut input, &mut sink)?;
        Self::finalize(sink, tally.matched)?;
        Ok(tally)
    }

    /// Wraps `writer` and writes the header line straight away, so even a run
    /// without matches produces it.
    pub fn open_output<W: Write>(writer: W) -> Result<csv::Writer<W>> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Always)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(writer);
        writer
            .write_record(COLUMNS)
            .context("Failed to write CSV header")?;
        Ok(writer)
    }

    /// Single forward pass over `input`, appending every row whose
    /// `NaceCode` is byte-for-byte the filter code.
    pub fn process<R: Read, W: Write>(
        &self,
        input: &mut ActivityReader<R>,
        sink: &mut csv::Writer<W>,
    ) -> Result<Tally> {
        let code = self.code.as_str().as_bytes();
        let started = Instant::now();
        let mut record = ByteRecord::new();
        let mut tally = Tally::default();
        while input.read(&mut record)? {
            tally.scanned += 1;
            if tally.scanned % PROGRESS_EVERY == 0 {
                info!(
                    "Scanned {} rows ({:.0} rows/sec), {} matched",
                    tally.scanned,
                    rows_per_sec(tally.scanned, started),
                    tally.matched
                );
            }
            let columns = input.columns();
            if columns.nace_code(&record) != code {
                continue;
            }
            sink.serialize(columns.project(&record)).context("Failed to write to CSV")?;
            tally.matched += 1;
        }
        Ok(tally)
    }

    pub fn finalize<W: Write>(sink: csv::Writer<W>, count: usize) -> Result<W> {
        let writer = sink
            .into_inner()
            .map_err(|err| anyhow!("Failed to flush CSV: {}", err.error()))?;
        debug!("Closed output after {count} rows");
        Ok(writer)
    }
}
