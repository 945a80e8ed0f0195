use std::collections::HashMap;
use std::io::BufRead;

use utils::compress;

use crate::error::{RecordError, RefbedError, Result};

// kgXref columns: kgID, mRNA, spID, spDisplayID, geneSymbol, refseq, protAcc, description, rfamAcc, tRnaName
pub const XREF_SYMBOL_FIELD: usize = 4;
pub const XREF_DESC_FIELD: usize = 7;
const XREF_MIN_FIELDS: usize = XREF_DESC_FIELD + 1;

/// Gene symbol to description lookup built from a kgXref file
#[derive(Debug, Default)]
pub struct DescIndex {
	desc: HashMap<String, String>,
}

pub(crate) fn trim_eol(s: &str) -> &str {
	s.trim_end_matches(&['\n', '\r'][..])
}

impl DescIndex {
	pub fn new() -> Self { Self::default() }

	/// Later entries for the same symbol replace earlier ones
	pub fn insert<S: Into<String>, T: Into<String>>(&mut self, symbol: S, desc: T) -> Option<String> {
		self.desc.insert(symbol.into(), desc.into())
	}

	pub fn get<S: AsRef<str>>(&self, symbol: S) -> Option<&str> { self.desc.get(symbol.as_ref()).map(|s| s.as_str()) }

	/// Description for `symbol`, or the empty string if not present
	pub fn description<S: AsRef<str>>(&self, symbol: S) -> &str { self.get(symbol).unwrap_or("") }

	pub fn len(&self) -> usize { self.desc.len() }
	pub fn is_empty(&self) -> bool { self.desc.is_empty() }

	pub fn from_reader<R: BufRead>(mut rdr: R, source_name: &str) -> Result<Self> {
		let mut idx = Self::new();
		let mut buf = String::with_capacity(256);
		let mut line = 0;
		let mut replaced = 0;
		loop {
			buf.clear();
			if rdr.read_line(&mut buf)? == 0 { break }
			line += 1;
			let s = trim_eol(&buf);
			if s.is_empty() { continue }
			let fields: Vec<&str> = s.split('\t').collect();
			if fields.len() < XREF_MIN_FIELDS {
				return Err(RefbedError::at_line(RecordError::TooFewFields { expected: XREF_MIN_FIELDS, found: fields.len() }, source_name, line))
			}
			if idx.insert(fields[XREF_SYMBOL_FIELD], fields[XREF_DESC_FIELD]).is_some() { replaced += 1 }
		}
		debug!("Read {} lines from {}: {} symbols, {} replaced by later entries", line, source_name, idx.len(), replaced);
		Ok(idx)
	}

	/// Read from file (possibly compressed).  `None` or "-" reads from stdin
	pub fn from_file(path: Option<&str>) -> Result<Self> {
		let name = path.unwrap_or("<stdin>");
		let rdr = compress::get_reader(path).map_err(|e| RefbedError::open_input(name, e))?;
		info!("Reading cross reference descriptions from {}", name);
		let idx = Self::from_reader(rdr, name)?;
		info!("Read {} descriptions from {}", idx.len(), name);
		Ok(idx)
	}
}
