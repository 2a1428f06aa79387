use crate::{
    error::{Error, FileAccessError},
    trace::trace_line::{FormatError, TraceFormat, TraceLine},
};

use std::{
    fs::File,
    io::{BufRead, BufReader},
    ops::Index,
    path::Path,
};
use tracing::debug;

/// All lines of one trace, in retirement order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TraceLog {
    pub lines: Vec<TraceLine>,
}

impl TraceLog {
    pub fn new(lines: Vec<TraceLine>) -> Self {
        Self { lines }
    }

    /// Reads and parses the whole file. The first malformed line aborts the load.
    pub fn load<P>(path: P, format: TraceFormat) -> Result<Self, Error>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| FileAccessError {
            path: Some(path.to_owned()),
            source,
        })?;

        let log = Self::from_reader_inner(BufReader::new(file), format, Some(path))?;
        debug!(path = %path.display(), ?format, lines = log.len(), "loaded trace");

        Ok(log)
    }

    pub fn from_reader<R>(reader: R, format: TraceFormat) -> Result<Self, Error>
    where
        R: BufRead,
    {
        Self::from_reader_inner(reader, format, None)
    }

    /// Parses lines already held in memory.
    pub fn from_lines<I, S>(lines: I, format: TraceFormat) -> Result<Self, FormatError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        lines
            .into_iter()
            .enumerate()
            .map(|(index, line)| {
                TraceLine::parse(line.as_ref(), format).map_err(|kind| FormatError {
                    path: None,
                    line: index,
                    kind,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    fn from_reader_inner<R>(
        reader: R,
        format: TraceFormat,
        path: Option<&Path>,
    ) -> Result<Self, Error>
    where
        R: BufRead,
    {
        let mut lines = Vec::new();

        for (index, line) in reader.lines().enumerate() {
            let line = line.map_err(|source| FileAccessError {
                path: path.map(|path| path.to_owned()),
                source,
            })?;

            let line = TraceLine::parse(&line, format).map_err(|kind| FormatError {
                path: path.map(|path| path.to_owned()),
                line: index,
                kind,
            })?;
            lines.push(line);
        }

        Ok(Self::new(lines))
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TraceLine> {
        self.lines.iter()
    }
}

impl Index<usize> for TraceLog {
    type Output = TraceLine;

    fn index(&self, index: usize) -> &Self::Output {
        &self.lines[index]
    }
}

impl<'a> IntoIterator for &'a TraceLog {
    type Item = &'a TraceLine;
    type IntoIter = std::slice::Iter<'a, TraceLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
