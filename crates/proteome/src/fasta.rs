// Standard Library Imports
use std::{
    fs::File,
    io::{BufRead, BufReader, Lines},
    path::Path,
};

// Local Crate Imports
use crate::{ProteomeError, Result, SequenceRecord};

// Public API ==========================================================================================================

/// Streams [`SequenceRecord`]s out of FASTA text, one record at a time
///
/// Nothing is held in memory beyond the record currently being assembled, so this scales to reference collections
/// of any size. Re-reading a collection means constructing a new reader.
#[derive(Debug)]
pub struct FastaReader<R> {
    lines: Lines<R>,
    line_number: usize,
    next_header: Option<String>,
}

impl FastaReader<BufReader<File>> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| ProteomeError::open(path, e))?;

        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> FastaReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
            next_header: None,
        }
    }
}

impl<R: BufRead> Iterator for FastaReader<R> {
    type Item = Result<SequenceRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        let description = match self.next_header.take() {
            Some(description) => description,
            None => match self.first_header()? {
                Ok(description) => description,
                Err(e) => return Some(Err(e)),
            },
        };

        let mut residues = String::new();
        while let Some(line) = self.next_line() {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(e)),
            };

            if let Some(header) = line.strip_prefix('>') {
                self.next_header = Some(header.trim().to_owned());
                break;
            }

            residues.extend(
                line.chars()
                    .filter(|c| !c.is_whitespace())
                    .map(|c| c.to_ascii_uppercase()),
            );
        }

        Some(Ok(SequenceRecord::new(description, residues)))
    }
}

// Private Methods =====================================================================================================

impl<R: BufRead> FastaReader<R> {
    // NOTE: Blank lines are skipped here, so callers only ever see lines with some content
    fn next_line(&mut self) -> Option<Result<String>> {
        for line in self.lines.by_ref() {
            self.line_number += 1;
            match line {
                Ok(line) if line.trim().is_empty() => (),
                Ok(line) => return Some(Ok(line.trim().to_owned())),
                Err(e) => return Some(Err(ProteomeError::read(self.line_number, e))),
            }
        }
        None
    }

    fn first_header(&mut self) -> Option<Result<String>> {
        let line = match self.next_line()? {
            Ok(line) => line,
            Err(e) => return Some(Err(e)),
        };

        Some(line.strip_prefix('>').map_or_else(
            || {
                Err(ProteomeError::OrphanResidues {
                    line: self.line_number,
                })
            },
            |header| Ok(header.trim().to_owned()),
        ))
    }
}

// Module Tests ========================================================================================================
