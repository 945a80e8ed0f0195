use clap::{crate_version, App, Arg, Command};

use crate::config::{DEFAULT_INPUT, DEFAULT_OUTPUT, DEFAULT_XREF};

pub(super) fn cli_model() -> App<'static> {
    Command::new("refbed_fmt")
        .version(crate_version!())
        .author("Simon Heath <simon.heath@gmail.com>")
        .about("refbed_fmt converts a CAT/Liftoff gene annotation BED file and a kgXref table into refbed format for bulk loading")
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .help("Silence all output"),
        )
        .arg(
            Arg::new("timestamp")
                .short('T')
                .long("timestamp")
                .takes_value(true)
                .value_name("GRANULARITY")
                .possible_values(&["none", "sec", "ms", "us", "ns"])
                .default_value("none")
                .help("Prepend log entries with a timestamp"),
        )
        .arg(
            Arg::new("loglevel")
                .short('v')
                .long("loglevel")
                .takes_value(true)
                .value_name("LOGLEVEL")
                .possible_values(&["none", "error", "warn", "info", "debug", "trace"])
                .ignore_case(true)
                .default_value("warn")
                .help("Set log level"),
        )
        .arg(
            Arg::new("xref")
                .short('x')
                .long("xref")
                .takes_value(true)
                .value_name("PATH")
                .default_value(DEFAULT_XREF)
                .help("kgXref file with gene symbol descriptions"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .takes_value(true)
                .value_name("PATH")
                .default_value(DEFAULT_OUTPUT)
                .help("Output file (- for stdout)"),
        )
        .arg(
            Arg::new("type_map")
                .short('m')
                .long("type-map")
                .takes_value(true)
                .value_name("PATH")
                .help("JSON file with additional gene type mappings (overrides built in table)"),
        )
        .arg(
            Arg::new("no_default_types")
                .short('M')
                .long("no-default-types")
                .help("Do not use the built in GENCODE gene type table"),
        )
        .arg(
            Arg::new("compress")
                .short('z')
                .long("compress")
                .help("Compress output with gzip"),
        )
        .arg(
            Arg::new("stats")
                .short('s')
                .long("stats")
                .takes_value(true)
                .value_name("PATH")
                .help("Write summary statistics in JSON format"),
        )
        .arg(
            Arg::new("input")
                .takes_value(true)
                .value_name("FILE")
                .default_value(DEFAULT_INPUT)
                .help("Input annotation BED file (- for stdin)"),
        )
}
