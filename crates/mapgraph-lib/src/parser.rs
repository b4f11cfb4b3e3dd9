//! Staged reader for raw map sources.
//!
//! A map source is a UTF-8 text file with one JSON record per non-empty
//! line: a single bounds record, then point records, then way records.
//! [`MapParser`] reads the three sections through a strict one-time, ordered
//! protocol (bounds before points, points before ways) and exposes the raw
//! records for [`crate::graph::GraphBuilder`] to consume.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::{Bounds, PointId};

/// The three sections of a map source, in required read order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Bounds,
    Points,
    Ways,
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Section::Bounds => "bounds",
            Section::Points => "points",
            Section::Ways => "ways",
        };
        f.write_str(value)
    }
}

/// Raw point record as it appears in the source, pre-graph.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawPoint {
    pub id: PointId,
    pub lat: f64,
    pub lon: f64,
}

/// Raw connectivity record: an ordered polyline of point identifiers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawWay {
    pub points: Vec<PointId>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RawRecord {
    Bounds(Bounds),
    Point(RawPoint),
    Way(RawWay),
}

impl RawRecord {
    fn section(&self) -> Section {
        match self {
            RawRecord::Bounds(_) => Section::Bounds,
            RawRecord::Point(_) => Section::Points,
            RawRecord::Way(_) => Section::Ways,
        }
    }
}

/// Read progress through the section protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum ParseState {
    Opened,
    BoundsRead,
    PointsRead,
    WaysRead,
}

/// Staged map source reader.
///
/// Each read step either completes with a populated result or fails leaving
/// prior results unchanged. A failed session is abandoned and a new parser
/// opened; partially read sessions are never resumed.
#[derive(Debug)]
pub struct MapParser<R> {
    reader: R,
    state: ParseState,
    line: usize,
    lookahead: Option<(usize, RawRecord)>,
    bounds: Option<Bounds>,
    points: Option<Vec<RawPoint>>,
    ways: Option<Vec<RawWay>>,
}

impl MapParser<BufReader<File>> {
    /// Open a map source on disk.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => Error::SourceNotFound {
                path: path.to_path_buf(),
            },
            _ => Error::Io(err),
        })?;
        Ok(Self::from_reader(BufReader::new(file)))
    }
}

impl<R: BufRead> MapParser<R> {
    /// Wrap an already-open source, for in-memory readers.
    pub fn from_reader(reader: R) -> Self {
        Self {
            reader,
            state: ParseState::Opened,
            line: 0,
            lookahead: None,
            bounds: None,
            points: None,
            ways: None,
        }
    }

    /// Parse the bounding box record. Must be the first read step.
    pub fn read_bounds(&mut self) -> Result<()> {
        self.expect_state(Section::Bounds, ParseState::Opened, None)?;

        let (line, record) = self
            .next_record()?
            .ok_or(Error::UnexpectedEof {
                section: Section::Bounds,
            })?;
        let bounds = match record {
            RawRecord::Bounds(bounds) => bounds,
            other => {
                return Err(Error::MalformedRecord {
                    line,
                    message: format!("expected a bounds record, found a {} record", other.section()),
                })
            }
        };

        self.bounds = Some(bounds);
        self.state = ParseState::BoundsRead;
        Ok(())
    }

    /// Parse the point records. Requires bounds to have been read.
    pub fn read_points(&mut self) -> Result<()> {
        self.expect_state(
            Section::Points,
            ParseState::BoundsRead,
            Some(Section::Bounds),
        )?;

        let mut points = Vec::new();
        loop {
            match self.next_record()? {
                Some((_, RawRecord::Point(point))) => points.push(point),
                Some(pending) => {
                    // First record of the next section; leave it for read_ways.
                    self.lookahead = Some(pending);
                    break;
                }
                None => break,
            }
        }

        debug!(points = points.len(), "read point records");
        self.points = Some(points);
        self.state = ParseState::PointsRead;
        Ok(())
    }

    /// Parse the way records. Requires points to have been read.
    pub fn read_ways(&mut self) -> Result<()> {
        self.expect_state(Section::Ways, ParseState::PointsRead, Some(Section::Points))?;

        let mut ways = Vec::new();
        loop {
            match self.next_record()? {
                Some((_, RawRecord::Way(way))) => ways.push(way),
                Some((line, other)) => {
                    return Err(Error::MalformedRecord {
                        line,
                        message: format!(
                            "expected a way record, found a {} record",
                            other.section()
                        ),
                    })
                }
                None => break,
            }
        }

        debug!(ways = ways.len(), "read way records");
        self.ways = Some(ways);
        self.state = ParseState::WaysRead;
        Ok(())
    }

    /// Bounding box of the source.
    pub fn bounds(&self) -> Result<Bounds> {
        self.bounds.ok_or(Error::SectionNotYetRead {
            section: Section::Bounds,
        })
    }

    /// Point records read from the source.
    pub fn points(&self) -> Result<&[RawPoint]> {
        self.points
            .as_deref()
            .ok_or(Error::SectionNotYetRead {
                section: Section::Points,
            })
    }

    /// Way records read from the source.
    pub fn ways(&self) -> Result<&[RawWay]> {
        self.ways.as_deref().ok_or(Error::SectionNotYetRead {
            section: Section::Ways,
        })
    }

    /// Consume the parser after a complete session, yielding all raw results.
    pub fn into_records(self) -> Result<(Bounds, Vec<RawPoint>, Vec<RawWay>)> {
        match (self.bounds, self.points, self.ways) {
            (Some(bounds), Some(points), Some(ways)) => Ok((bounds, points, ways)),
            (None, _, _) => Err(Error::SectionNotYetRead {
                section: Section::Bounds,
            }),
            (_, None, _) => Err(Error::SectionNotYetRead {
                section: Section::Points,
            }),
            (_, _, None) => Err(Error::SectionNotYetRead {
                section: Section::Ways,
            }),
        }
    }

    fn expect_state(
        &self,
        section: Section,
        required: ParseState,
        predecessor: Option<Section>,
    ) -> Result<()> {
        if self.state == required {
            return Ok(());
        }
        if self.state > required {
            return Err(Error::SectionAlreadyRead { section });
        }
        Err(Error::SectionOutOfOrder {
            section,
            expected: predecessor.unwrap_or(Section::Bounds),
        })
    }

    fn next_record(&mut self) -> Result<Option<(usize, RawRecord)>> {
        if let Some(pending) = self.lookahead.take() {
            return Ok(Some(pending));
        }

        let mut buffer = String::new();
        loop {
            buffer.clear();
            let read = self.reader.read_line(&mut buffer)?;
            if read == 0 {
                return Ok(None);
            }
            self.line += 1;

            let trimmed = buffer.trim();
            if trimmed.is_empty() {
                continue;
            }

            let record =
                serde_json::from_str::<RawRecord>(trimmed).map_err(|err| Error::MalformedRecord {
                    line: self.line,
                    message: err.to_string(),
                })?;
            return Ok(Some((self.line, record)));
        }
    }
}
