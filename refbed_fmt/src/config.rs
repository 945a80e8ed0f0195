use crate::type_map::TypeMap;

pub const DEFAULT_XREF: &str = "kgXref.txt";
pub const DEFAULT_INPUT: &str = "catLiftOffGenesV1.bed";
pub const DEFAULT_OUTPUT: &str = "catLiftOffGenesV1.refbed";

#[derive(Debug, Default)]
pub struct OutputOpt {
	filename: Option<String>,
	compress: bool,
}

impl OutputOpt {
	pub fn new() -> Self { Default::default() }
	pub fn set_filename<S: AsRef<str>>(&mut self, fname: S) -> &mut Self {
		let s = fname.as_ref();
		self.filename = if s == "-" { None } else { Some(s.to_owned()) };
		self
	}
	pub fn filename(&self) -> Option<&str> { self.filename.as_deref() }
	pub fn set_compress(&mut self, b: bool) -> &mut Self { self.compress = b; self }
	pub fn compress(&self) -> bool { self.compress }
	// If filename & compress are set, add .gz as suffix unless already present
	// If no filename is set and stdout is a terminal, compress is switched off
	//
	// fix_opts() should be run last
	pub fn fix_opts(&mut self) {
		if let Some(fname) = &mut self.filename {
			if self.compress && !fname.ends_with(".gz") { fname.push_str(".gz") }
		} else if self.compress && utils::stdout_isatty() {
			warn!("Will not send compressed output to terminal");
			self.compress = false;
		}
	}
}

#[derive(Debug)]
pub struct Config {
	xref: Option<String>,
	input: Option<String>,
	output: OutputOpt,
	type_map: TypeMap,
	stats_file: Option<String>,
}

impl Config {
	pub fn new(output: OutputOpt, type_map: TypeMap) -> Self {
		Self { xref: Some(DEFAULT_XREF.to_owned()), input: Some(DEFAULT_INPUT.to_owned()), output, type_map, stats_file: None }
	}
	// "-" means stdin
	pub fn set_xref<S: AsRef<str>>(&mut self, s: S) -> &mut Self { self.xref = stdio_name(s.as_ref()); self }
	pub fn set_input<S: AsRef<str>>(&mut self, s: S) -> &mut Self { self.input = stdio_name(s.as_ref()); self }
	pub fn set_stats_file<S: AsRef<str>>(&mut self, s: S) -> &mut Self { self.stats_file = Some(s.as_ref().to_owned()); self }
	pub fn xref(&self) -> Option<&str> { self.xref.as_deref() }
	pub fn input(&self) -> Option<&str> { self.input.as_deref() }
	pub fn output(&self) -> &OutputOpt { &self.output }
	pub fn type_map(&self) -> &TypeMap { &self.type_map }
	pub fn stats_file(&self) -> Option<&str> { self.stats_file.as_deref() }
}

fn stdio_name(s: &str) -> Option<String> {
	if s == "-" { None } else { Some(s.to_owned()) }
}
