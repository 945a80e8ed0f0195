use std::collections::HashMap;
use std::io::Read;

use lazy_static::lazy_static;

use crate::error::{RefbedError, Result};

// GENCODE / Ensembl biotype to transcript class
const GENCODE_CLASSES: [(&str, &[&str]); 4] = [
	("coding", &[
		"protein_coding", "nonsense_mediated_decay", "non_stop_decay",
		"IG_C_gene", "IG_D_gene", "IG_J_gene", "IG_V_gene", "IG_LV_gene",
		"TR_C_gene", "TR_D_gene", "TR_J_gene", "TR_V_gene",
	]),
	("pseudo", &[
		"pseudogene", "processed_pseudogene", "unprocessed_pseudogene", "polymorphic_pseudogene", "unitary_pseudogene",
		"transcribed_processed_pseudogene", "transcribed_unprocessed_pseudogene", "transcribed_unitary_pseudogene",
		"translated_processed_pseudogene", "translated_unprocessed_pseudogene", "rRNA_pseudogene",
		"IG_C_pseudogene", "IG_J_pseudogene", "IG_V_pseudogene", "IG_pseudogene", "TR_J_pseudogene", "TR_V_pseudogene",
	]),
	("nonCoding", &[
		"lncRNA", "lincRNA", "antisense", "sense_intronic", "sense_overlapping", "3prime_overlapping_ncRNA",
		"bidirectional_promoter_lncRNA", "macro_lncRNA", "non_coding", "processed_transcript",
		"miRNA", "misc_RNA", "Mt_rRNA", "Mt_tRNA", "rRNA", "ribozyme", "sRNA", "scRNA", "scaRNA",
		"snRNA", "snoRNA", "vault_RNA", "vaultRNA", "Y_RNA",
	]),
	("problem", &[
		"retained_intron", "TEC", "artifact", "disrupted_domain", "ambiguous_orf",
	]),
];

lazy_static! {
	static ref GENCODE_TYPE_MAP: HashMap<&'static str, &'static str> = {
		let mut m = HashMap::new();
		for (class, biotypes) in GENCODE_CLASSES.iter() {
			for bt in biotypes.iter() { m.insert(*bt, *class); }
		}
		m
	};
}

/// Lookup from raw gene type code to normalized label.
/// Codes without an entry pass through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypeMap {
	map: HashMap<String, String>,
}

impl TypeMap {
	pub fn new() -> Self { Self::default() }

	/// Built in GENCODE biotype table
	pub fn gencode() -> Self {
		let map = GENCODE_TYPE_MAP.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
		Self { map }
	}

	pub fn insert<S: Into<String>, T: Into<String>>(&mut self, code: S, label: T) -> Option<String> {
		self.map.insert(code.into(), label.into())
	}

	pub fn get<S: AsRef<str>>(&self, code: S) -> Option<&str> { self.map.get(code.as_ref()).map(|s| s.as_str()) }

	pub fn normalize<'a>(&'a self, code: &'a str) -> &'a str {
		self.get(code).unwrap_or(code)
	}

	pub fn len(&self) -> usize { self.map.len() }
	pub fn is_empty(&self) -> bool { self.map.is_empty() }

	/// Add entries from a JSON object of strings.  Existing entries are overwritten.
	pub fn extend_from_json<R: Read>(&mut self, rdr: R, name: &str) -> Result<usize> {
		let m: HashMap<String, String> = serde_json::from_reader(rdr)
			.map_err(|e| RefbedError::TypeMap { path: name.to_owned(), msg: e.to_string() })?;
		let n = m.len();
		self.map.extend(m);
		Ok(n)
	}

	pub fn extend_from_json_file(&mut self, path: &str) -> Result<usize> {
		let rdr = utils::compress::open_bufreader(path)
			.map_err(|e| RefbedError::TypeMap { path: path.to_owned(), msg: e.to_string() })?;
		debug!("Reading type map from {}", path);
		let n = self.extend_from_json(rdr, path)?;
		debug!("Read {} type mappings from {}", n, path);
		Ok(n)
	}

	pub fn from_json_file(path: &str) -> Result<Self> {
		let mut tm = Self::new();
		tm.extend_from_json_file(path)?;
		Ok(tm)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::io::Write;
	use tempfile::NamedTempFile;

	#[test]
	fn mapped_code_is_replaced() {
		let mut tm = TypeMap::new();
		tm.insert("coding", "protein_coding");
		assert_eq!(tm.normalize("coding"), "protein_coding");
	}

	#[test]
	fn unknown_code_passes_through() {
		let mut tm = TypeMap::new();
		tm.insert("coding", "protein_coding");
		assert_eq!(tm.normalize("unknownX"), "unknownX");
		assert_eq!(TypeMap::new().normalize(""), "");
	}

	#[test]
	fn gencode_table() {
		let tm = TypeMap::gencode();
		assert_eq!(tm.normalize("protein_coding"), "coding");
		assert_eq!(tm.normalize("processed_pseudogene"), "pseudo");
		assert_eq!(tm.normalize("lncRNA"), "nonCoding");
		assert_eq!(tm.normalize("retained_intron"), "problem");
		assert_eq!(tm.normalize("coding"), "coding");
	}

	#[test]
	fn json_overrides_builtin() {
		let mut tm = TypeMap::gencode();
		let n = tm.extend_from_json(r#"{"lncRNA": "lnc", "novel": "other"}"#.as_bytes(), "inline").unwrap();
		assert_eq!(n, 2);
		assert_eq!(tm.normalize("lncRNA"), "lnc");
		assert_eq!(tm.normalize("novel"), "other");
		assert_eq!(tm.normalize("protein_coding"), "coding");
	}

	#[test]
	fn json_must_be_object_of_strings() {
		let mut tm = TypeMap::new();
		let e = tm.extend_from_json(r#"{"a": 1}"#.as_bytes(), "bad.json").unwrap_err();
		assert!(matches!(e, RefbedError::TypeMap { .. }));
		assert!(tm.is_empty());
	}

	#[test]
	fn loads_from_file() {
		let mut f = NamedTempFile::new().unwrap();
		write!(f, r#"{{"coding": "protein_coding"}}"#).unwrap();
		f.flush().unwrap();
		let tm = TypeMap::from_json_file(f.path().to_str().unwrap()).unwrap();
		assert_eq!(tm.len(), 1);
		assert_eq!(tm.get("coding"), Some("protein_coding"));
	}
}
