#[macro_use]
extern crate log;

mod cli;
pub mod config;
pub mod error;
pub mod process;
pub mod record;
pub mod type_map;
pub mod xref;

fn main() -> Result<(), String> {
	let conf = cli::process_cli().map_err(|e| format!("refbed_fmt initialization failed with error: {}", e))?;
	match process::process(&conf) {
		Ok(_) => Ok(()),
		Err(e) => {
			error!("refbed_fmt failed with error: {}", e);
			Err("Failed".to_string())
		}
	}
}
