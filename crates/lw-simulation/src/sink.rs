use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::aggregate::{OreCounts, SimulationResult};
use crate::census::{CensusSink, ChunkRow};
use crate::error::{SimError, SimResult};
use crate::sweep::RowSink;

/// Header of a sweep result file.
pub const RESULT_HEADER: &str =
    "y,blocks mined,lava,coal,copper,iron,lapis,redstone,gold,emeralds,diamonds";

/// Header of a chunk census file.
pub const CHUNK_HEADER: &str =
    "chunk_x,chunk_z,y,air,lava,coal,copper,iron,lapis,redstone,gold,emeralds,diamonds";

/// Line-oriented CSV output that flushes after every line.
#[derive(Debug)]
struct CsvLines<W: Write> {
    writer: W,
    target: String,
}

impl<W: Write> CsvLines<W> {
    fn new(writer: W, target: String, header: &str) -> SimResult<Self> {
        let mut lines = Self { writer, target };
        lines.line(header)?;
        Ok(lines)
    }

    fn line(&mut self, text: &str) -> SimResult<()> {
        writeln!(self.writer, "{text}")
            .and_then(|()| self.writer.flush())
            .map_err(|source| SimError::Sink {
                target: self.target.clone(),
                source,
            })
    }
}

fn create_file(path: &Path) -> SimResult<BufWriter<File>> {
    let target = path.display().to_string();
    let sink_error = |source| SimError::Sink {
        target: target.clone(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(sink_error)?;
    }
    let file = File::create(path).map_err(sink_error)?;
    Ok(BufWriter::new(file))
}

fn ore_columns(ores: &OreCounts) -> String {
    ores.iter()
        .map(|(_, count)| count.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Writes sweep results as CSV, one flushed row per level.
#[derive(Debug)]
pub struct CsvSink<W: Write> {
    lines: CsvLines<W>,
}

impl CsvSink<BufWriter<File>> {
    /// Create (or truncate) `path`, making parent directories as needed, and
    /// write the header.
    pub fn create(path: &Path) -> SimResult<Self> {
        let writer = create_file(path)?;
        Self::new(writer, path.display().to_string())
    }
}

impl<W: Write> CsvSink<W> {
    /// Wrap a writer and write the header. `target` names it in errors.
    pub fn new(writer: W, target: impl Into<String>) -> SimResult<Self> {
        Ok(Self {
            lines: CsvLines::new(writer, target.into(), RESULT_HEADER)?,
        })
    }

    /// The underlying writer.
    pub fn into_inner(self) -> W {
        self.lines.writer
    }
}

impl<W: Write> RowSink for CsvSink<W> {
    fn record(&mut self, y: i32, result: &SimulationResult) -> SimResult<()> {
        let row = format!(
            "{y},{},{},{}",
            result.mined,
            result.lava,
            ore_columns(&result.ores)
        );
        self.lines.line(&row)
    }
}

/// Writes chunk census rows as CSV.
#[derive(Debug)]
pub struct ChunkCsvSink<W: Write> {
    lines: CsvLines<W>,
}

impl ChunkCsvSink<BufWriter<File>> {
    /// Create (or truncate) `path`, making parent directories as needed, and
    /// write the header.
    pub fn create(path: &Path) -> SimResult<Self> {
        let writer = create_file(path)?;
        Self::new(writer, path.display().to_string())
    }
}

impl<W: Write> ChunkCsvSink<W> {
    /// Wrap a writer and write the header. `target` names it in errors.
    pub fn new(writer: W, target: impl Into<String>) -> SimResult<Self> {
        Ok(Self {
            lines: CsvLines::new(writer, target.into(), CHUNK_HEADER)?,
        })
    }

    /// The underlying writer.
    pub fn into_inner(self) -> W {
        self.lines.writer
    }
}

impl<W: Write> CensusSink for ChunkCsvSink<W> {
    fn record(&mut self, row: &ChunkRow) -> SimResult<()> {
        let line = format!(
            "{},{},{},{},{},{}",
            row.chunk.x,
            row.chunk.z,
            row.y,
            row.air,
            row.lava,
            ore_columns(&row.ores)
        );
        self.lines.line(&line)
    }
}
