//! Per-document and running-total word counting.
//!
//! Every document is read exactly once. Each accepted word goes into a fresh
//! table for that document and into the shared total, so the total report is
//! the per-word sum over all documents without a second pass.

use std::io::{self, BufRead, Write};

use log::{debug, info, warn};

use crate::error::CountError;
use crate::freq_table::FrequencyTable;
use crate::report::ReportWriter;
use crate::tokenizer::{Word, Words};

/// Something with a name that can be opened for reading.
pub trait Document {
    type Reader: BufRead;

    fn id(&self) -> &str;
    fn open(&self) -> io::Result<Self::Reader>;
}

/// In-memory document: `(identifier, contents)`.
impl<'a> Document for (&'a str, &'a [u8]) {
    type Reader = &'a [u8];

    fn id(&self) -> &str {
        self.0
    }

    fn open(&self) -> io::Result<&'a [u8]> {
        Ok(self.1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    Idle,
    ProcessingDocument(usize),
    EmittingTotal,
    Done,
    /// A document or report failed; no further documents and no total.
    Failed,
}

/// What to do with a document that can't be opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnreadablePolicy {
    /// Stop the run. Blocks already written stay.
    Abort,
    /// Log a warning and go on with the next document.
    Skip,
}

impl Default for UnreadablePolicy {
    fn default() -> Self {
        UnreadablePolicy::Abort
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub documents: usize,
    pub skipped: usize,
    pub distinct_words: usize,
    pub total_words: u64,
}

pub struct Aggregator<E, T> {
    each: ReportWriter<E>,
    totals: ReportWriter<T>,
    total: FrequencyTable,
    policy: UnreadablePolicy,
    state: State,
    summary: RunSummary,
}

impl<E: Write, T: Write> Aggregator<E, T> {
    pub fn new(each: ReportWriter<E>, totals: ReportWriter<T>) -> Self {
        Aggregator {
            each,
            totals,
            total: FrequencyTable::new(),
            policy: UnreadablePolicy::default(),
            state: State::Idle,
            summary: RunSummary::default(),
        }
    }

    pub fn with_policy(mut self, policy: UnreadablePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> State {
        self.state
    }

    /// The running total so far.
    pub fn total(&self) -> &FrequencyTable {
        &self.total
    }

    /// Count one document and write its block to the per-document report.
    ///
    /// Any error leaves the aggregator `Failed`: later `process` and `finish`
    /// calls return `CountError::Aborted`.
    pub fn process<D: Document>(&mut self, document: &D) -> Result<(), CountError> {
        if self.state == State::Failed {
            return Err(CountError::Aborted);
        }
        let res = self.process_document(document);
        if res.is_err() {
            self.transition(State::Failed);
        }
        res
    }

    fn process_document<D: Document>(&mut self, document: &D) -> Result<(), CountError> {
        let index = self.summary.documents + self.summary.skipped;
        self.transition(State::ProcessingDocument(index));

        let reader = match document.open() {
            Ok(reader) => reader,
            Err(err) => match self.policy {
                UnreadablePolicy::Abort => {
                    return Err(CountError::document_unreadable(document.id(), err));
                }
                UnreadablePolicy::Skip => {
                    warn!("skipping \"{}\": {}", document.id(), err);
                    self.summary.skipped += 1;
                    return Ok(());
                }
            },
        };

        let mut table = FrequencyTable::new();
        // words read so far are already in the total, so a read error is
        // fatal whatever the policy
        let accepted = count_words(reader, &mut table, &mut self.total)
            .map_err(|err| CountError::document_unreadable(document.id(), err))?;

        let list = table.extract().sorted();
        self.each.write_block(Some(document.id()), &list)?;

        let released = table.destroy();
        debug!(
            "{}: {} words, {} distinct, {} trie nodes released",
            document.id(),
            accepted,
            list.len(),
            released
        );
        self.summary.documents += 1;
        Ok(())
    }

    /// Write the total report and flush both reports.
    pub fn finish(mut self) -> Result<RunSummary, CountError> {
        if self.state == State::Failed {
            return Err(CountError::Aborted);
        }
        self.transition(State::EmittingTotal);

        let list = self.total.extract().sorted();
        self.totals.write_block(None, &list)?;
        self.each.flush()?;
        self.totals.flush()?;

        self.summary.distinct_words = self.total.len();
        self.summary.total_words = self.total.total();
        self.transition(State::Done);
        info!(
            "{} documents counted, {} skipped, {} distinct words, {} words",
            self.summary.documents,
            self.summary.skipped,
            self.summary.distinct_words,
            self.summary.total_words
        );
        Ok(self.summary)
    }

    /// Process `documents` in order, then emit the total.
    pub fn run<I, D>(mut self, documents: I) -> Result<RunSummary, CountError>
    where
        I: IntoIterator<Item = D>,
        D: Document,
    {
        for document in documents {
            if let Err(err) = self.process(&document) {
                // keep what was reported before the failure
                self.each.flush()?;
                return Err(err);
            }
        }
        self.finish()
    }

    fn transition(&mut self, next: State) {
        debug!("{:?} -> {:?}", self.state, next);
        self.state = next;
    }
}

/// Feed every accepted word of `reader` into both tables. Returns the number
/// of words counted.
pub fn count_words<R: BufRead>(
    reader: R,
    document: &mut FrequencyTable,
    total: &mut FrequencyTable,
) -> io::Result<u64> {
    let mut accepted = 0;
    for token in Words::new(reader) {
        let token = token?;
        if let Some(word) = Word::new(&token) {
            document.insert(word);
            total.insert(word);
            accepted += 1;
        }
    }
    Ok(accepted)
}
