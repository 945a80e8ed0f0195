use clap::ArgMatches;

use crate::config::{Config, OutputOpt};
use crate::error::Result;
use crate::type_map::TypeMap;

pub fn handle_options(m: &ArgMatches) -> Result<Config> {
	trace!("Handle command line options");
	let mut output_opt = OutputOpt::new();
	match m.value_of("output") {
		Some(s) => output_opt.set_filename(s),
		None => &mut output_opt,
	}
	.set_compress(m.is_present("compress"))
	.fix_opts();

	let mut type_map = if m.is_present("no_default_types") { TypeMap::new() } else { TypeMap::gencode() };
	if let Some(s) = m.value_of("type_map") {
		let n = type_map.extend_from_json_file(s)?;
		info!("Added {} gene type mappings from {}", n, s);
	}

	let mut conf = Config::new(output_opt, type_map);
	if let Some(s) = m.value_of("xref") { conf.set_xref(s); }
	if let Some(s) = m.value_of("input") { conf.set_input(s); }
	if let Some(s) = m.value_of("stats") { conf.set_stats_file(s); }
	trace!("Finished handling command line options");
	Ok(conf)
}
