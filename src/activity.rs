use anyhow::{Context, Result, anyhow};
use csv::ByteRecord;
use serde::Serialize;
use std::borrow::Cow;
use std::io::Read;

/// Output columns, in the order they are written.
pub const COLUMNS: [&str; 5] = [
    "EntityNumber",
    "ActivityGroup",
    "NaceVersion",
    "NaceCode",
    "Classification",
];

const BOM: &[u8] = "\u{feff}".as_bytes();

/// One matching row, projected onto the output columns.
///
/// Fields are decoded lossily: a byte sequence that is not UTF-8 becomes
/// U+FFFD instead of rejecting the row.
#[derive(Debug, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Activity<'r> {
    pub entity_number: Cow<'r, str>,
    pub activity_group: Cow<'r, str>,
    pub nace_version: Cow<'r, str>,
    pub nace_code: Cow<'r, str>,
    pub classification: Cow<'r, str>,
}

/// Positions of the projected columns in the input header row.
#[derive(Debug, Clone, PartialEq)]
pub struct Columns {
    entity_number: usize,
    activity_group: Option<usize>,
    nace_version: Option<usize>,
    nace_code: usize,
    classification: Option<usize>,
}

impl Columns {
    pub fn from_headers(headers: &ByteRecord) -> Result<Self> {
        let position = |name: &str| {
            headers.iter().position(|header| {
                header.strip_prefix(BOM).unwrap_or(header) == name.as_bytes()
            })
        };
        let required =
            |name: &str| position(name).ok_or_else(|| anyhow!("Input has no {name} column"));
        Ok(Self {
            entity_number: required("EntityNumber")?,
            activity_group: position("ActivityGroup"),
            nace_version: position("NaceVersion"),
            nace_code: required("NaceCode")?,
            classification: position("Classification"),
        })
    }

    /// Raw `NaceCode` bytes of a record, empty when the row is too short.
    pub fn nace_code<'r>(&self, record: &'r ByteRecord) -> &'r [u8] {
        record.get(self.nace_code).unwrap_or_default()
    }

    pub fn project<'r>(&self, record: &'r ByteRecord) -> Activity<'r> {
        let field = move |index: Option<usize>| {
            String::from_utf8_lossy(index.and_then(|i| record.get(i)).unwrap_or_default())
        };
        Activity {
            entity_number: field(Some(self.entity_number)),
            activity_group: field(self.activity_group),
            nace_version: field(self.nace_version),
            nace_code: field(Some(self.nace_code)),
            classification: field(self.classification),
        }
    }
}

/// Activity table opened for a single forward pass, with its header row
/// already resolved.
pub struct ActivityReader<R> {
    reader: csv::Reader<R>,
    columns: Columns,
}

impl<R: Read> ActivityReader<R> {
    pub fn from_reader(reader: R) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(b',')
            .quote(b'"')
            .flexible(true)
            .from_reader(reader);
        let headers = reader.byte_headers().context("Failed to read CSV header")?;
        let columns = Columns::from_headers(headers)?;
        Ok(Self { reader, columns })
    }

    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    /// Reads the next row into `record`; `false` at the end of the input.
    pub fn read(&mut self, record: &mut ByteRecord) -> Result<bool> {
        self.reader
            .read_byte_record(record)
            .context("Failed to read CSV input")
    }
}
