use std::io::{BufRead, Write};

use serde::Serialize;
use utils::compress;

use crate::config::Config;
use crate::error::{RefbedError, Result};
use crate::record::transform_line;
use crate::type_map::TypeMap;
use crate::xref::DescIndex;

const PROGRESS_INTERVAL: usize = 100_000;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Stats {
	xref_symbols: usize,
	records: usize,
	descriptions_found: usize,
	descriptions_missing: usize,
	types_remapped: usize,
}

impl Stats {
	pub fn xref_symbols(&self) -> usize { self.xref_symbols }
	pub fn records(&self) -> usize { self.records }
	pub fn descriptions_found(&self) -> usize { self.descriptions_found }
	pub fn descriptions_missing(&self) -> usize { self.descriptions_missing }
	pub fn types_remapped(&self) -> usize { self.types_remapped }

	pub fn to_writer<W: Write>(&self, wrt: W) -> Result<()> {
		serde_json::to_writer_pretty(wrt, self).map_err(|e| RefbedError::Io(e.into()))
	}
}

/// Convert every line of `rdr`, writing one output line per input line.
/// Stops at the first error; anything already written stays written.
pub fn transform<R: BufRead, W: Write>(mut rdr: R, wrt: &mut W, source_name: &str, idx: &DescIndex, tmap: &TypeMap) -> Result<Stats> {
	let mut stats = Stats { xref_symbols: idx.len(), ..Default::default() };
	let mut buf = String::with_capacity(1024);
	loop {
		buf.clear();
		if rdr.read_line(&mut buf)? == 0 { break }
		let line = stats.records + 1;
		let rec = transform_line(&buf, idx, tmap).map_err(|e| RefbedError::at_line(e, source_name, line))?;
		rec.write_to(wrt)?;
		stats.records = line;
		if rec.has_description() { stats.descriptions_found += 1 } else { stats.descriptions_missing += 1 }
		if rec.type_remapped() { stats.types_remapped += 1 }
		if stats.records % PROGRESS_INTERVAL == 0 { debug!("Processed {} records from {}", stats.records, source_name) }
	}
	Ok(stats)
}

pub fn process(conf: &Config) -> Result<Stats> {
	// Pass one: description index
	let idx = DescIndex::from_file(conf.xref())?;

	// Pass two: annotation records
	let in_name = conf.input().unwrap_or("<stdin>");
	let rdr = compress::get_reader(conf.input()).map_err(|e| RefbedError::open_input(in_name, e))?;
	let out_name = conf.output().filename().unwrap_or("<stdout>");
	let mut wrt = compress::get_writer(conf.output().filename(), conf.output().compress())?;
	info!("Converting {} to {}", in_name, out_name);
	debug!("Using gene type map with {} entries", conf.type_map().len());
	let stats = transform(rdr, &mut wrt, in_name, &idx, conf.type_map())?;
	wrt.finish()?;
	info!("Wrote {} records to {}", stats.records, out_name);
	info!("Descriptions found for {} records, missing for {}; gene type remapped for {}",
		stats.descriptions_found, stats.descriptions_missing, stats.types_remapped);
	if let Some(sfile) = conf.stats_file() {
		debug!("Writing JSON stats to {}", sfile);
		let mut w = compress::open_bufwriter(sfile)?;
		stats.to_writer(&mut w)?;
		w.flush()?;
	}
	Ok(stats)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::OutputOpt;
	use crate::record::tests::bed_line;
	use tempfile::TempDir;

	fn index() -> DescIndex {
		let mut idx = DescIndex::new();
		idx.insert("ENSG00000001", "first gene");
		idx
	}

	#[test]
	fn one_output_line_per_input_line() {
		let input = format!("{}{}",
			bed_line(100, 1000, ("500", "500"), "50,30,", "0,60,", "protein_coding", "ENSG00000001.5"),
			bed_line(2000, 3000, ("2100", "2900"), "100", "0", "mystery", "ENSG00000009.1"));
		let mut out: Vec<u8> = Vec::new();
		let stats = transform(input.as_bytes(), &mut out, "test.bed", &index(), &TypeMap::gencode()).unwrap();
		let out = String::from_utf8(out).unwrap();
		let lines: Vec<&str> = out.lines().collect();
		assert_eq!(lines.len(), 2);
		assert_eq!(lines[0], "chr1\t100\t1000\t500\t1000\t+\tGENE1\tCAT_gene_1\tcoding\t100,160\t150,190\tfirst gene");
		assert_eq!(lines[1], "chr1\t2000\t3000\t2100\t2900\t+\tGENE1\tCAT_gene_1\tmystery\t2000\t2100\t");
		assert!(out.ends_with("\t\n"));
		assert_eq!(stats.records(), 2);
		assert_eq!(stats.descriptions_found(), 1);
		assert_eq!(stats.descriptions_missing(), 1);
		assert_eq!(stats.types_remapped(), 1);
		assert_eq!(stats.xref_symbols(), 1);
	}

	#[test]
	fn stops_at_first_bad_line() {
		let input = format!("{}chr1\t1\t2\n{}",
			bed_line(100, 1000, ("500", "500"), "50", "0", "x", "g"),
			bed_line(100, 1000, ("500", "500"), "50", "0", "x", "g"));
		let mut out: Vec<u8> = Vec::new();
		let e = transform(input.as_bytes(), &mut out, "test.bed", &index(), &TypeMap::new()).unwrap_err();
		assert!(matches!(e, RefbedError::MalformedRecord { line: 2, .. }));
		assert_eq!(String::from_utf8(out).unwrap().lines().count(), 1);
	}

	#[test]
	fn exon_mismatch_reported_with_line() {
		let input = bed_line(100, 1000, ("500", "500"), "50,20", "0", "x", "g");
		let mut out: Vec<u8> = Vec::new();
		let e = transform(input.as_bytes(), &mut out, "genes.bed", &index(), &TypeMap::new()).unwrap_err();
		assert_eq!(e.to_string(), "genes.bed:1: 1 exon starts but 2 exon sizes");
	}

	#[test]
	fn end_to_end_with_files() {
		let dir = TempDir::new().unwrap();
		let xref = dir.path().join("kgXref.txt");
		let bed = dir.path().join("catLiftOffGenesV1.bed");
		let output = dir.path().join("catLiftOffGenesV1.refbed");
		let stats_file = dir.path().join("stats.json");
		std::fs::write(&xref, "uc1\tm\tsp\tspd\tENSG00000001\trs\tpa\tfrom xref\t\t\n").unwrap();
		std::fs::write(&bed, bed_line(100, 1000, ("500", "600"), "50,30", "0,60", "coding", "ENSG00000001.5")).unwrap();
		std::fs::write(&output, "stale contents\nstale contents\nstale contents\n").unwrap();

		let mut tm = TypeMap::new();
		tm.insert("coding", "protein_coding");
		let mut opt = OutputOpt::new();
		opt.set_filename(output.to_str().unwrap()).fix_opts();
		let mut conf = Config::new(opt, tm);
		conf.set_xref(xref.to_str().unwrap())
			.set_input(bed.to_str().unwrap())
			.set_stats_file(stats_file.to_str().unwrap());
		let stats = process(&conf).unwrap();
		assert_eq!(stats.records(), 1);

		let out = std::fs::read_to_string(&output).unwrap();
		assert_eq!(out, "chr1\t100\t1000\t500\t600\t+\tGENE1\tCAT_gene_1\tprotein_coding\t100,160\t150,190\tfrom xref\n");
		let json: serde_json::Value = serde_json::from_str(&std::fs::read_to_string(&stats_file).unwrap()).unwrap();
		assert_eq!(json["Records"], 1);
		assert_eq!(json["DescriptionsFound"], 1);
	}

	fn conf_for(dir: &TempDir, input: &std::path::Path, output: &std::path::Path, compress: bool) -> Config {
		let xref = dir.path().join("kgXref.txt");
		std::fs::write(&xref, "uc1\tm\tsp\tspd\tENSG00000001\trs\tpa\tfrom xref\t\t\n").unwrap();
		let mut opt = OutputOpt::new();
		opt.set_filename(output.to_str().unwrap()).set_compress(compress).fix_opts();
		let mut conf = Config::new(opt, TypeMap::gencode());
		conf.set_xref(xref.to_str().unwrap()).set_input(input.to_str().unwrap());
		conf
	}

	fn write_gzipped_bed(path: &std::path::Path, n: u64) {
		let mut w = compress::get_writer(path.to_str(), true).unwrap();
		for i in 0..n {
			w.write_all(bed_line(i * 1000, i * 1000 + 500, ("1", "1"), "50,30", "0,60", "lncRNA", "ENSG00000001.5").as_bytes()).unwrap();
		}
		w.finish().unwrap();
	}

	#[test]
	fn truncated_compressed_input_fails_run() {
		let dir = TempDir::new().unwrap();
		let bed = dir.path().join("genes.bed.gz");
		write_gzipped_bed(&bed, 20000);
		let data = std::fs::read(&bed).unwrap();
		std::fs::write(&bed, &data[..data.len() / 2]).unwrap();
		let conf = conf_for(&dir, &bed, &dir.path().join("out.refbed"), false);
		let e = process(&conf).unwrap_err();
		assert!(matches!(e, RefbedError::Io(_)), "unexpected error {:?}", e);
	}

	#[test]
	fn compressed_input_and_output() {
		let dir = TempDir::new().unwrap();
		let bed = dir.path().join("genes.bed.gz");
		write_gzipped_bed(&bed, 300);
		let conf = conf_for(&dir, &bed, &dir.path().join("out.refbed"), true);
		assert_eq!(conf.output().filename(), dir.path().join("out.refbed.gz").to_str());
		let stats = process(&conf).unwrap();
		assert_eq!(stats.records(), 300);
		assert_eq!(stats.types_remapped(), 300);

		// process() has returned, so the gzip output must be complete
		let rdr = compress::get_reader(conf.output().filename()).unwrap();
		let lines: Vec<String> = rdr.lines().map(|l| l.unwrap()).collect();
		assert_eq!(lines.len(), 300);
		assert_eq!(lines[299], "chr1\t299000\t299500\t1\t299500\t+\tGENE1\tCAT_gene_1\tnonCoding\t299000,299060\t299050,299090\tfrom xref");
	}

	#[test]
	fn missing_annotation_file() {
		let dir = TempDir::new().unwrap();
		let xref = dir.path().join("kgXref.txt");
		std::fs::write(&xref, "").unwrap();
		let mut opt = OutputOpt::new();
		opt.set_filename(dir.path().join("out.refbed").to_str().unwrap());
		let mut conf = Config::new(opt, TypeMap::new());
		conf.set_xref(xref.to_str().unwrap()).set_input(dir.path().join("absent.bed").to_str().unwrap());
		let e = process(&conf).unwrap_err();
		assert!(matches!(e, RefbedError::MissingFile { .. }));
	}
}
