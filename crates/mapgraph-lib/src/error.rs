use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::PointId;
use crate::parser::Section;

/// Convenient result alias for the MapGraph library.
pub type Result<T> = std::result::Result<T, Error>;

/// Identifies which end of a query an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Endpoint::Start => "start",
            Endpoint::Goal => "goal",
        };
        f.write_str(value)
    }
}

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Map source could not be located or opened.
    #[error("map source not found at {path}")]
    SourceNotFound { path: PathBuf },

    /// A parse step was invoked twice on the same session.
    #[error("the {section} section has already been read")]
    SectionAlreadyRead { section: Section },

    /// A parse step was invoked before its predecessor completed.
    #[error("the {section} section cannot be read before the {expected} section")]
    SectionOutOfOrder { section: Section, expected: Section },

    /// A section accessor was used before the corresponding read step.
    #[error("the {section} section has not been read yet")]
    SectionNotYetRead { section: Section },

    /// A source line could not be parsed as a record of the expected kind.
    #[error("malformed record on line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    /// The source ended before a required section was read.
    #[error("map source ended before the {section} section")]
    UnexpectedEof { section: Section },

    /// `graph()` was called before a successful `build()`.
    #[error("graph has not been built yet")]
    NotYetBuilt,

    /// `build()` was called a second time on the same builder.
    #[error("graph has already been built")]
    AlreadyBuilt,

    /// A query referenced a point identifier absent from the graph.
    #[error("unknown {endpoint} point {id}")]
    UnknownPoint { endpoint: Endpoint, id: PointId },

    /// A search result was requested before any search was run.
    #[error("no search has been run yet")]
    NoQueryRun,

    /// An algorithm name could not be parsed.
    #[error("unknown algorithm {name:?} (expected \"dijkstra\" or \"a-star\")")]
    UnknownAlgorithm { name: String },

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
