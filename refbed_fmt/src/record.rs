use std::borrow::Cow;
use std::fmt;
use std::io::{self, Write};
use std::str::FromStr;

use crate::error::RecordError;
use crate::type_map::TypeMap;
use crate::xref::{trim_eol, DescIndex};

// Columns of the input annotation file
pub const CHROM_FIELD: usize = 0;
pub const START_FIELD: usize = 1;
pub const END_FIELD: usize = 2;
pub const GENE_ID_FIELD: usize = 3;
pub const SCORE_FIELD: usize = 5;
pub const THICK_START_FIELD: usize = 6;
pub const THICK_END_FIELD: usize = 7;
pub const EXON_SIZES_FIELD: usize = 10;
pub const EXON_STARTS_FIELD: usize = 11;
pub const SYMBOL_FIELD: usize = 12;
pub const GENE_TYPE_FIELD: usize = 17;
pub const VERSIONED_ID_FIELD: usize = 20;
pub const ANNOTATION_MIN_FIELDS: usize = VERSIONED_ID_FIELD + 1;

fn parse_int(field: usize, s: &str) -> Result<u64, RecordError> {
	<u64>::from_str(s).map_err(|_| RecordError::NotAnInteger { field, value: s.to_owned() })
}

// Comma separated list, trailing commas ignored
fn parse_int_list(field: usize, s: &str) -> Result<Vec<u64>, RecordError> {
	s.trim_end_matches(',').split(',').map(|x| parse_int(field, x)).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Exon {
	pub start: u64,
	pub end: u64,
}

/// One line of the annotation (BED-like) input.  Fields borrow from the line.
#[derive(Debug)]
pub struct AnnotationRecord<'a> {
	fields: Vec<&'a str>,
	start: u64,
	end: u64,
}

impl <'a> AnnotationRecord<'a> {
	pub fn parse(line: &'a str) -> Result<Self, RecordError> {
		let fields: Vec<&str> = trim_eol(line).split('\t').collect();
		if fields.len() < ANNOTATION_MIN_FIELDS {
			return Err(RecordError::TooFewFields { expected: ANNOTATION_MIN_FIELDS, found: fields.len() })
		}
		let start = parse_int(START_FIELD, fields[START_FIELD])?;
		let end = parse_int(END_FIELD, fields[END_FIELD])?;
		Ok(Self { fields, start, end })
	}

	pub fn chrom(&self) -> &'a str { self.fields[CHROM_FIELD] }
	pub fn start(&self) -> u64 { self.start }
	pub fn end(&self) -> u64 { self.end }
	pub fn gene_id(&self) -> &'a str { self.fields[GENE_ID_FIELD] }
	pub fn score(&self) -> &'a str { self.fields[SCORE_FIELD] }
	pub fn thick_start(&self) -> &'a str { self.fields[THICK_START_FIELD] }
	pub fn thick_end(&self) -> &'a str { self.fields[THICK_END_FIELD] }
	pub fn symbol(&self) -> &'a str { self.fields[SYMBOL_FIELD] }
	pub fn gene_type(&self) -> &'a str { self.fields[GENE_TYPE_FIELD] }

	/// Thick end, replaced by the record end if it is textually equal to thick start
	pub fn cend(&self) -> Cow<'a, str> {
		if self.thick_end() == self.thick_start() { Cow::Owned(self.end.to_string()) }
		else { Cow::Borrowed(self.thick_end()) }
	}

	/// Versioned gene id with everything from the first '.' removed
	pub fn description_key(&self) -> &'a str {
		let s = self.fields[VERSIONED_ID_FIELD];
		match s.find('.') {
			Some(i) => &s[..i],
			None => s,
		}
	}

	/// Absolute exon coordinates in input order
	pub fn exons(&self) -> Result<Vec<Exon>, RecordError> {
		let starts = parse_int_list(EXON_STARTS_FIELD, self.fields[EXON_STARTS_FIELD])?;
		let sizes = parse_int_list(EXON_SIZES_FIELD, self.fields[EXON_SIZES_FIELD])?;
		if starts.len() != sizes.len() {
			return Err(RecordError::ExonCountMismatch { starts: starts.len(), sizes: sizes.len() })
		}
		starts.iter().zip(sizes.iter()).map(|(rel, size)| -> Result<Exon, RecordError> {
			let start = self.start.checked_add(*rel).ok_or(RecordError::CoordinateOverflow { base: self.start, offset: *rel })?;
			let end = start.checked_add(*size).ok_or(RecordError::CoordinateOverflow { base: start, offset: *size })?;
			Ok(Exon { start, end })
		}).collect()
	}
}

/// Output line
#[derive(Debug)]
pub struct RefbedRecord<'a> {
	chrom: &'a str,
	start: u64,
	end: u64,
	thick_start: &'a str,
	cend: Cow<'a, str>,
	score: &'a str,
	symbol: &'a str,
	gene_id: &'a str,
	gene_type: &'a str,
	exons: Vec<Exon>,
	description: &'a str,
	has_description: bool,
	type_remapped: bool,
}

impl <'a> RefbedRecord<'a> {
	pub fn from_annotation(rec: &AnnotationRecord<'a>, idx: &'a DescIndex, tmap: &'a TypeMap) -> Result<Self, RecordError> {
		let exons = rec.exons()?;
		let desc = idx.get(rec.description_key());
		Ok(Self {
			chrom: rec.chrom(),
			start: rec.start(),
			end: rec.end(),
			thick_start: rec.thick_start(),
			cend: rec.cend(),
			score: rec.score(),
			symbol: rec.symbol(),
			gene_id: rec.gene_id(),
			gene_type: tmap.normalize(rec.gene_type()),
			exons,
			description: desc.unwrap_or(""),
			has_description: desc.is_some(),
			type_remapped: tmap.get(rec.gene_type()).is_some(),
		})
	}

	pub fn chrom(&self) -> &str { self.chrom }
	pub fn start(&self) -> u64 { self.start }
	pub fn end(&self) -> u64 { self.end }
	pub fn cend(&self) -> &str { &self.cend }
	pub fn gene_type(&self) -> &str { self.gene_type }
	pub fn exons(&self) -> &[Exon] { &self.exons }
	pub fn description(&self) -> &str { self.description }
	pub fn has_description(&self) -> bool { self.has_description }
	pub fn type_remapped(&self) -> bool { self.type_remapped }

	pub fn exon_starts(&self) -> String { join_coords(self.exons.iter().map(|e| e.start)) }
	pub fn exon_ends(&self) -> String { join_coords(self.exons.iter().map(|e| e.end)) }

	pub fn write_to<W: Write>(&self, w: &mut W) -> io::Result<()> {
		writeln!(w, "{}", self)
	}
}

fn join_coords<I: Iterator<Item = u64>>(it: I) -> String {
	it.map(|x| x.to_string()).collect::<Vec<_>>().join(",")
}

impl <'a> fmt::Display for RefbedRecord<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}",
			self.chrom, self.start, self.end, self.thick_start, self.cend, self.score,
			self.symbol, self.gene_id, self.gene_type, self.exon_starts(), self.exon_ends(), self.description)
	}
}

/// Convert one annotation line to its output record
pub fn transform_line<'a>(line: &'a str, idx: &'a DescIndex, tmap: &'a TypeMap) -> Result<RefbedRecord<'a>, RecordError> {
	let rec = AnnotationRecord::parse(line)?;
	RefbedRecord::from_annotation(&rec, idx, tmap)
}
