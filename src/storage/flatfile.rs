use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use csv::{QuoteStyle, ReaderBuilder, StringRecord, Terminator, WriterBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Field separator for the library and hotel files.
pub const PIPE: u8 = b'|';
/// Field separator for the bank file.
pub const SPACE: u8 = b' ';

/// Writes a sectioned record file: a `Name:` header line, then one
/// delimiter-separated record per line. Fields that contain the delimiter,
/// a quote or a line break are quoted; everything else is written bare.
pub struct SectionWriter<W: Write> {
    inner: csv::Writer<W>,
}

impl<W: Write> SectionWriter<W> {
    pub fn new(writer: W, delimiter: u8) -> Self {
        let inner = WriterBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(delimiter)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(writer);
        Self { inner }
    }

    pub fn section(&mut self, name: &str) -> Result<()> {
        self.inner
            .write_record([format!("{}:", name)])
            .with_context(|| format!("Failed to write section header '{}'", name))
    }

    pub fn row<T: Serialize>(&mut self, row: &T) -> Result<()> {
        self.inner.serialize(row).context("Failed to write record")
    }

    pub fn fields<I, F>(&mut self, fields: I) -> Result<()>
    where
        I: IntoIterator<Item = F>,
        F: AsRef<[u8]>,
    {
        self.inner.write_record(fields).context("Failed to write record")
    }

    pub fn finish(mut self) -> Result<()> {
        self.inner.flush().context("Failed to flush records")
    }
}

/// One data line of a sectioned file.
#[derive(Debug, Clone)]
pub struct SectionRecord {
    /// Header the line appeared under, without the trailing colon.
    pub section: Option<String>,
    pub line: u64,
    pub record: StringRecord,
}

impl SectionRecord {
    /// Decode the record positionally into `T`.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        self.record
            .deserialize(None)
            .with_context(|| format!("line {}: malformed record", self.line))
    }

    pub fn field(&self, index: usize, name: &str) -> Result<&str> {
        self.record
            .get(index)
            .ok_or_else(|| anyhow!("line {}: missing field '{}'", self.line, name))
    }

    pub fn parse_field<T>(&self, index: usize, name: &str) -> Result<T>
    where
        T: std::str::FromStr,
        T::Err: std::fmt::Display,
    {
        let raw = self.field(index, name)?;
        raw.parse()
            .map_err(|e| anyhow!("line {}: invalid {} '{}': {}", self.line, name, raw, e))
    }

    /// Fail with the line number when the record sits outside any section.
    pub fn require_section(&self) -> Result<&str> {
        match &self.section {
            Some(name) => Ok(name),
            None => bail!("line {}: record appears before any section header", self.line),
        }
    }
}

/// Read every data line of a sectioned file, tagging it with its section.
/// Only header names listed in `sections` are recognised.
pub fn read_sections<R: Read>(
    reader: R,
    delimiter: u8,
    sections: &[&str],
) -> Result<Vec<SectionRecord>> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(reader);

    let mut current: Option<String> = None;
    let mut records = Vec::new();

    for result in csv_reader.records() {
        let record = result.context("Failed to read record")?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        if record.len() == 1 {
            let only = &record[0];
            if only.is_empty() {
                continue;
            }
            if let Some(name) = only.strip_suffix(':') {
                if !sections.contains(&name) {
                    bail!("line {}: unknown section '{}'", line, name);
                }
                current = Some(name.to_string());
                continue;
            }
        }

        records.push(SectionRecord {
            section: current.clone(),
            line,
            record,
        });
    }

    Ok(records)
}

/// Rewrite the file at `path` with whatever `write` produces.
pub fn save_file<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(BufWriter<File>) -> Result<()>,
{
    let file = File::create(path)
        .with_context(|| format!("Failed to open {} for writing", path.display()))?;
    write(BufWriter::new(file)).with_context(|| format!("Failed to save {}", path.display()))
}

pub fn load_file<T, F>(path: &Path, read: F) -> Result<T>
where
    F: FnOnce(BufReader<File>) -> Result<T>,
{
    let file = File::open(path)
        .with_context(|| format!("Failed to open {} for reading", path.display()))?;
    read(BufReader::new(file)).with_context(|| format!("Failed to load {}", path.display()))
}

/// `1`/`0` encoding for flags.
pub mod flag {
    use serde::{Deserialize, Deserializer, Serializer, de::Error};

    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(if *value { "1" } else { "0" })
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.as_str() {
            "1" => Ok(true),
            "0" => Ok(false),
            other => Err(D::Error::custom(format!("expected 1 or 0, got '{}'", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Pair {
        id: i64,
        name: String,
        #[serde(with = "flag")]
        open: bool,
    }

    fn write_pairs(delimiter: u8, pairs: &[Pair]) -> String {
        let mut buf = Vec::new();
        let mut writer = SectionWriter::new(&mut buf, delimiter);
        writer.section("Pairs").unwrap();
        for pair in pairs {
            writer.row(pair).unwrap();
        }
        writer.finish().unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_plain_fields_are_written_bare() {
        let text = write_pairs(
            PIPE,
            &[Pair {
                id: 1,
                name: "Ada Lovelace".into(),
                open: true,
            }],
        );
        assert_eq!(text, "Pairs:\n1|Ada Lovelace|1\n");
    }

    #[test]
    fn test_delimiter_inside_field_is_quoted_and_read_back() {
        let pair = Pair {
            id: 2,
            name: "Either|Or".into(),
            open: false,
        };
        let text = write_pairs(PIPE, &[pair]);
        assert_eq!(text, "Pairs:\n2|\"Either|Or\"|0\n");

        let records = read_sections(text.as_bytes(), PIPE, &["Pairs"]).unwrap();
        let decoded: Pair = records[0].decode().unwrap();
        assert_eq!(decoded.name, "Either|Or");
        assert!(!decoded.open);
    }

    #[test]
    fn test_records_are_tagged_with_section_and_line() {
        let text = "A:\n1|x|1\nB:\n2|y|0\n3|z|1\n";
        let records = read_sections(text.as_bytes(), PIPE, &["A", "B"]).unwrap();

        assert_eq!(records.len(), 3);
        assert_eq!(records[0].section.as_deref(), Some("A"));
        assert_eq!(records[2].section.as_deref(), Some("B"));
        assert_eq!(records[2].line, 5);
    }

    #[test]
    fn test_unknown_section_is_rejected() {
        let text = "Wallets:\n1|x|1\n";
        let err = read_sections(text.as_bytes(), PIPE, &["Books"]).unwrap_err();
        assert!(err.to_string().contains("unknown section"));
    }

    #[test]
    fn test_bad_flag_reports_line() {
        let text = "Pairs:\n1|x|yes\n";
        let records = read_sections(text.as_bytes(), PIPE, &["Pairs"]).unwrap();
        let err = records[0].decode::<Pair>().unwrap_err();
        assert!(err.to_string().contains("line 2"));
    }

    #[test]
    fn test_records_before_header_have_no_section() {
        let text = "S 1 Alice 10.00\n";
        let records = read_sections(text.as_bytes(), SPACE, &["Customers"]).unwrap();
        assert!(records[0].section.is_none());
        assert!(records[0].require_section().is_err());
    }
}
