//! Error types for refbed_fmt
//!
//! Per-line parsing produces a [`RecordError`] which knows nothing about where
//! the line came from.  The driver attaches the input name and line number when
//! turning it into a [`RefbedError`].

use std::io;
use thiserror::Error;

/// Failure parsing a single input line
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordError {
	#[error("expected at least {expected} tab separated fields, found {found}")]
	TooFewFields { expected: usize, found: usize },

	#[error("could not parse field {field} value '{value}' as an integer")]
	NotAnInteger { field: usize, value: String },

	#[error("exon start list has {starts} entries but exon size list has {sizes}")]
	ExonCountMismatch { starts: usize, sizes: usize },

	#[error("coordinate {base} + {offset} is out of range")]
	CoordinateOverflow { base: u64, offset: u64 },
}

#[derive(Error, Debug)]
pub enum RefbedError {
	/// Input file could not be opened
	#[error("Could not open input file {path}: {source}")]
	MissingFile {
		path: String,
		#[source]
		source: io::Error,
	},

	/// Line has too few fields
	#[error("{source_name}:{line}: malformed record: expected at least {expected} fields, found {found}")]
	MalformedRecord { source_name: String, line: usize, expected: usize, found: usize },

	/// Integer field could not be parsed
	#[error("{source_name}:{line}: could not parse field {field} value '{value}' as an integer")]
	NumericParseFailure { source_name: String, line: usize, field: usize, value: String },

	/// Exon starts and sizes have different lengths
	#[error("{source_name}:{line}: {starts} exon starts but {sizes} exon sizes")]
	ExonListLengthMismatch { source_name: String, line: usize, starts: usize, sizes: usize },

	/// Absolute exon coordinate does not fit in 64 bits
	#[error("{source_name}:{line}: exon coordinate {base} + {offset} is out of range")]
	CoordinateOverflow { source_name: String, line: usize, base: u64, offset: u64 },

	/// Type map file unreadable or not a JSON object of strings
	#[error("Error reading type map {path}: {msg}")]
	TypeMap { path: String, msg: String },

	#[error("I/O error: {0}")]
	Io(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, RefbedError>;

impl RefbedError {
	/// Attach location information to a line level error
	pub fn at_line(e: RecordError, source_name: &str, line: usize) -> Self {
		let source_name = source_name.to_owned();
		match e {
			RecordError::TooFewFields { expected, found } => RefbedError::MalformedRecord { source_name, line, expected, found },
			RecordError::NotAnInteger { field, value } => RefbedError::NumericParseFailure { source_name, line, field, value },
			RecordError::ExonCountMismatch { starts, sizes } => RefbedError::ExonListLengthMismatch { source_name, line, starts, sizes },
			RecordError::CoordinateOverflow { base, offset } => RefbedError::CoordinateOverflow { source_name, line, base, offset },
		}
	}

	/// Classify an error from opening an input file
	pub fn open_input(path: &str, e: io::Error) -> Self {
		if e.kind() == io::ErrorKind::NotFound {
			RefbedError::MissingFile { path: path.to_owned(), source: e }
		} else {
			RefbedError::Io(e)
		}
	}
}
