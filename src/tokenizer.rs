//! Splitting raw document bytes into words.
//!
//! `WordCodec` cuts a byte buffer into candidate tokens at delimiter bytes,
//! `Tokens` drives the codec from any `BufRead`, and `Words` keeps only the
//! candidates that pass the accept test. A word is a non-empty run of ASCII
//! lowercase letters; anything else is dropped without complaint.

use std::{cmp, fmt, io, str};
use std::io::BufRead;

use bytes::{Buf, BytesMut};
use tokio_util::codec::Decoder;

/// Longest candidate the codec will hand out. Longer runs without a
/// delimiter are skipped up to the next delimiter.
pub const MAX_WORD_LEN: usize = 64 * 1024;

const INITIAL_CAPACITY: usize = 8 * 1024;

#[inline]
pub fn is_delimiter(b: u8) -> bool {
    matches!(b, b' ' | b'\n' | b'\t' | b'.' | b':' | b';' | b',' | b'\r' | b'\0')
}

/// The accept test: non-empty and lowercase `a`-`z` only.
#[inline]
pub fn is_word(candidate: &[u8]) -> bool {
    !candidate.is_empty() && candidate.iter().all(|b| b.is_ascii_lowercase())
}

/// A byte string that passed the accept test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Word<'a>(&'a [u8]);

impl<'a> Word<'a> {
    pub fn new(candidate: &'a [u8]) -> Option<Word<'a>> {
        if is_word(candidate) {
            Some(Word(candidate))
        } else {
            None
        }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.0
    }

    /// Letter indices, `a` = 0 through `z` = 25.
    pub(crate) fn letters(&self) -> impl Iterator<Item = usize> + 'a {
        self.0.iter().map(|&b| usize::from(b - b'a'))
    }
}

impl fmt::Display for Word<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(str::from_utf8(self.0).map_err(|_| fmt::Error)?)
    }
}

pub struct WordCodec {
    max_length: usize,
    // where to resume the delimiter search on the next call
    next_index: usize,
    discarding: bool,
}

impl WordCodec {
    pub fn new() -> Self {
        WordCodec::with_max_length(MAX_WORD_LEN)
    }

    pub fn with_max_length(max_length: usize) -> Self {
        WordCodec {
            max_length,
            next_index: 0,
            discarding: false,
        }
    }
}

impl Default for WordCodec {
    fn default() -> Self {
        WordCodec::new()
    }
}

impl Decoder for WordCodec {
    type Item = BytesMut;
    type Error = io::Error;

    fn decode(&mut self, buf: &mut BytesMut) -> Result<Option<BytesMut>, io::Error> {
        loop {
            let read_to = cmp::min(self.max_length.saturating_add(1), buf.len());
            let delimiter = buf[self.next_index..read_to]
                .iter()
                .position(|&b| is_delimiter(b));

            match (self.discarding, delimiter) {
                (true, Some(offset)) => {
                    // drop the tail of the over-long candidate and its delimiter
                    buf.advance(self.next_index + offset + 1);
                    self.discarding = false;
                    self.next_index = 0;
                }
                (true, None) => {
                    buf.advance(read_to);
                    self.next_index = 0;
                    if buf.is_empty() {
                        return Ok(None);
                    }
                }
                (false, Some(offset)) => {
                    let end = self.next_index + offset;
                    self.next_index = 0;
                    let mut token = buf.split_to(end + 1);
                    token.truncate(end);
                    return Ok(Some(token));
                }
                (false, None) if buf.len() > self.max_length => {
                    self.discarding = true;
                }
                (false, None) => {
                    self.next_index = read_to;
                    return Ok(None);
                }
            }
        }
    }

    fn decode_eof(&mut self, buf: &mut BytesMut) -> Result<Option<BytesMut>, io::Error> {
        Ok(match self.decode(buf)? {
            Some(token) => Some(token),
            None => {
                self.next_index = 0;
                if self.discarding {
                    self.discarding = false;
                    buf.clear();
                    None
                } else if buf.is_empty() {
                    None
                } else {
                    // No terminating delimiter - the rest is the last candidate
                    Some(buf.split())
                }
            }
        })
    }
}

/// Candidate tokens of one document, in document order.
///
/// Empty candidates (two adjacent delimiters) are yielded as well; the
/// accept test is left to `Words`.
pub struct Tokens<R> {
    reader: R,
    codec: WordCodec,
    buf: BytesMut,
    eof: bool,
}

impl<R: BufRead> Tokens<R> {
    pub fn new(reader: R) -> Self {
        Tokens::with_codec(reader, WordCodec::new())
    }

    pub fn with_codec(reader: R, codec: WordCodec) -> Self {
        Tokens {
            reader,
            codec,
            buf: BytesMut::with_capacity(INITIAL_CAPACITY),
            eof: false,
        }
    }

    fn fill(&mut self) -> io::Result<usize> {
        let amount = loop {
            match self.reader.fill_buf() {
                Ok(raw) => {
                    self.buf.extend_from_slice(raw);
                    break raw.len();
                }
                Err(ref err) if err.kind() == io::ErrorKind::Interrupted => continue,
                Err(err) => return Err(err),
            }
        };
        self.reader.consume(amount);
        Ok(amount)
    }
}

impl<R: BufRead> Iterator for Tokens<R> {
    type Item = io::Result<BytesMut>;

    fn next(&mut self) -> Option<io::Result<BytesMut>> {
        loop {
            if self.eof {
                return self.codec.decode_eof(&mut self.buf).transpose();
            }
            match self.codec.decode(&mut self.buf) {
                Ok(Some(token)) => return Some(Ok(token)),
                Ok(None) => match self.fill() {
                    Ok(0) => self.eof = true,
                    Ok(_) => {}
                    Err(err) => return Some(Err(err)),
                },
                Err(err) => return Some(Err(err)),
            }
        }
    }
}

/// Accepted words of one document, in document order.
pub struct Words<R> {
    tokens: Tokens<R>,
}

impl<R: BufRead> Words<R> {
    pub fn new(reader: R) -> Self {
        Words { tokens: Tokens::new(reader) }
    }

    pub fn with_codec(reader: R, codec: WordCodec) -> Self {
        Words { tokens: Tokens::with_codec(reader, codec) }
    }
}

impl<R: BufRead> Iterator for Words<R> {
    type Item = io::Result<BytesMut>;

    fn next(&mut self) -> Option<io::Result<BytesMut>> {
        loop {
            match self.tokens.next()? {
                Ok(token) if !is_word(&token) => continue,
                other => return Some(other),
            }
        }
    }
}
