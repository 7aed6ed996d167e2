//! Tab-separated edge file reader
//!
//! Each line is `source<TAB>target`. Extra columns are ignored, tokens are
//! trimmed, blank lines are skipped. Ids are parsed with the run's [`IdKind`].

use crate::error::{DankerError, DankerResult};
use crate::graph::{Edge, IdKind};
use std::fs::File;
use std::io::{BufRead, BufReader, Cursor};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Streaming parser over one edge file
pub struct EdgeReader<R> {
    reader: R,
    name: String,
    kind: IdKind,
    line: u64,
    buf: String,
}

impl<R: BufRead> EdgeReader<R> {
    pub fn new(reader: R, name: impl Into<String>, kind: IdKind) -> Self {
        Self {
            reader,
            name: name.into(),
            kind,
            line: 0,
            buf: String::new(),
        }
    }

    /// Name used in error messages
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Id kind tokens are parsed with
    pub fn kind(&self) -> IdKind {
        self.kind
    }

    /// Read the next edge, or `None` at end of input.
    pub fn next_edge(&mut self) -> DankerResult<Option<Edge>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line += 1;
            if self.buf.trim().is_empty() {
                continue;
            }

            let (source, target) = split_fields(&self.buf)
                .ok_or_else(|| self.malformed("expected two tab-separated fields"))?;
            let source = self
                .kind
                .parse(source)
                .ok_or_else(|| self.malformed(&format!("\"{}\" is not an integer id", source)))?;
            let target = self
                .kind
                .parse(target)
                .ok_or_else(|| self.malformed(&format!("\"{}\" is not an integer id", target)))?;

            return Ok(Some(Edge { source, target }));
        }
    }

    fn malformed(&self, reason: &str) -> DankerError {
        DankerError::MalformedLine {
            file: self.name.clone(),
            line: self.line,
            reason: reason.to_string(),
        }
    }
}

impl<R: BufRead> Iterator for EdgeReader<R> {
    type Item = DankerResult<Edge>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_edge().transpose()
    }
}

/// First two trimmed, non-empty tab-separated fields of a line
fn split_fields(line: &str) -> Option<(&str, &str)> {
    let mut fields = line.split('\t');
    let source = fields.next()?.trim();
    let target = fields.next()?.trim();
    if source.is_empty() || target.is_empty() {
        return None;
    }
    Some((source, target))
}

/// Something that can be opened (and re-opened) as a fresh edge stream.
///
/// The streaming iterator opens its source once per iteration; every call to
/// [`EdgeSource::open`] must start from the first line.
pub trait EdgeSource {
    type Reader: BufRead;

    /// Name used in logs and error messages
    fn name(&self) -> &str;

    /// Open a new buffered reader positioned at the start
    fn open_reader(&self) -> DankerResult<Self::Reader>;

    /// Open a parsing reader for the given id kind
    fn open(&self, kind: IdKind) -> DankerResult<EdgeReader<Self::Reader>> {
        Ok(EdgeReader::new(self.open_reader()?, self.name(), kind))
    }

    /// Decide the id kind from every edge of the source.
    ///
    /// The run is integer only if both tokens of every line are digit strings
    /// that fit in an i64; the scan stops at the first edge that is not.
    /// Input without any edge defaults to [`IdKind::Integer`]. Malformed
    /// lines are skipped here and reported by the real scan.
    fn sniff_kind(&self) -> DankerResult<IdKind> {
        let mut reader = self.open_reader()?;
        let mut line = String::new();
        let mut scanned = 0u64;
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                debug!("{}: {} integer edges, integer ids", self.name(), scanned);
                return Ok(IdKind::Integer);
            }
            if let Some((source, target)) = split_fields(&line) {
                if IdKind::sniff(source, target) == IdKind::Text {
                    debug!("{}: text id after {} integer edges", self.name(), scanned);
                    return Ok(IdKind::Text);
                }
                scanned += 1;
            }
        }
    }
}

/// An edge file on disk
#[derive(Debug, Clone)]
pub struct EdgeFile {
    path: PathBuf,
    name: String,
}

impl EdgeFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let name = path.display().to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EdgeSource for EdgeFile {
    type Reader = BufReader<File>;

    fn name(&self) -> &str {
        &self.name
    }

    fn open_reader(&self) -> DankerResult<Self::Reader> {
        debug!("Opening edge file: {:?}", self.path);
        let file = File::open(&self.path)?;
        Ok(BufReader::with_capacity(1 << 20, file))
    }
}

/// Edges held in memory as the text of an edge file
#[derive(Debug, Clone)]
pub struct InMemoryEdges {
    name: String,
    text: String,
}

impl InMemoryEdges {
    pub fn new(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
        }
    }
}

impl EdgeSource for InMemoryEdges {
    type Reader = Cursor<Vec<u8>>;

    fn name(&self) -> &str {
        &self.name
    }

    fn open_reader(&self) -> DankerResult<Self::Reader> {
        Ok(Cursor::new(self.text.clone().into_bytes()))
    }
}
