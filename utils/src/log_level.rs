use std::str::FromStr;
use std::fmt;
use std::io::{self, Error, ErrorKind};

use clap::ArgMatches;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogLevel {
	pub level: usize,
}

impl FromStr for LogLevel {
	type Err = &'static str;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_lowercase().as_str() {
			"error" => Ok(LogLevel{level: 0}),
			"warn" => Ok(LogLevel{level: 1}),
			"info" => Ok(LogLevel{level: 2}),
			"debug" => Ok(LogLevel{level: 3}),
			"trace" => Ok(LogLevel{level: 4}),
			"none" => Ok(LogLevel{level: 5}),
			_ => Err("no match"),
		}
	}
}

impl LogLevel {
	pub fn is_none(&self) -> bool {
		self.level > 4
	}
	pub fn get_level(&self) -> usize {
		if self.level > 4 { 0 } else { self.level }
	}
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		let level_str = ["error", "warn", "info", "debug", "trace", "none" ];
		if self.level < 6 { write!(f, "{}", level_str[self.level]) }
		else { write!(f, "unknown") }
	}
}

/// Set up stderrlog from the loglevel, quiet and timestamp options
pub fn init_log(m: &ArgMatches) -> io::Result<(LogLevel, bool)> {
	let verbose = m.value_of("loglevel").and_then(|s| LogLevel::from_str(s).ok()).unwrap_or(LogLevel{level: 1});
	let quiet = verbose.is_none() || m.is_present("quiet");
	let ts = match m.value_of("timestamp") {
		Some(v) => stderrlog::Timestamp::from_str(v).map_err(|_| Error::new(ErrorKind::InvalidInput, format!("invalid value for 'timestamp': {}", v)))?,
		None => stderrlog::Timestamp::Off,
	};
	stderrlog::new()
		.quiet(quiet)
		.verbosity(verbose.get_level())
		.timestamp(ts)
		.init()
		.map_err(|e| Error::new(ErrorKind::Other, format!("Could not initialize logging: {}", e)))?;
	Ok((verbose, quiet))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_levels_case_insensitively() {
		assert_eq!(LogLevel::from_str("INFO").unwrap().level, 2);
		assert_eq!(LogLevel::from_str("trace").unwrap().level, 4);
		assert!(LogLevel::from_str("loud").is_err());
	}

	#[test]
	fn none_level_is_quiet() {
		let l = LogLevel::from_str("none").unwrap();
		assert!(l.is_none());
		assert_eq!(l.get_level(), 0);
		assert_eq!(l.to_string(), "none");
	}
}
