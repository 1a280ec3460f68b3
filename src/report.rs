use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::debug;

use crate::error::CountError;
use crate::freq_list::FrequencyList;

/// Between count and word on every report line.
pub const SEPARATOR: &str = "   ";

/// Writes report blocks: an optional header line followed by one
/// `<count><SEPARATOR><word>` line per entry.
pub struct ReportWriter<W> {
    out: W,
    target: String,
    blocks: usize,
}

impl<W: Write> ReportWriter<W> {
    pub fn new<S: Into<String>>(out: W, target: S) -> Self {
        ReportWriter {
            out,
            target: target.into(),
            blocks: 0,
        }
    }

    pub fn write_block(&mut self, header: Option<&str>, list: &FrequencyList) -> Result<(), CountError> {
        self.write_lines(header, list)
            .map_err(|err| CountError::output_unwritable(self.target.clone(), err))?;
        self.blocks += 1;
        debug!(
            "{}: block {} with {} words ({} occurrences)",
            self.target,
            self.blocks,
            list.len(),
            list.total()
        );
        Ok(())
    }

    pub fn flush(&mut self) -> Result<(), CountError> {
        self.out
            .flush()
            .map_err(|err| CountError::output_unwritable(self.target.clone(), err))
    }

    pub fn blocks(&self) -> usize {
        self.blocks
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_lines(&mut self, header: Option<&str>, list: &FrequencyList) -> io::Result<()> {
        if let Some(header) = header {
            writeln!(self.out, "{}", header)?;
        }
        for entry in list {
            writeln!(self.out, "{}{}{}", entry.count(), SEPARATOR, entry.word())?;
        }
        Ok(())
    }
}

/// Create (or truncate) a report file.
pub fn create_report(path: &Path) -> Result<ReportWriter<BufWriter<File>>, CountError> {
    let target = path.display().to_string();
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|err| CountError::output_unwritable(target.clone(), err))?;
    Ok(ReportWriter::new(BufWriter::new(file), target))
}
