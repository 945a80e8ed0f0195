use utils::log_level::init_log;
mod cli_model;
mod options;

use crate::config::Config;
use crate::error::Result;

pub fn process_cli() -> Result<Config> {
	let app = cli_model::cli_model();

	// Setup logging
	let m = app.get_matches();
	init_log(&m)?;
	// Process arguments
	options::handle_options(&m)
}
