use std::{env, path::Path};

use log::LevelFilter;
use postman_derive::{CliOptions, CliValue, KvDisplay};

use crate::{Error, Result, graph::VertexId};

/// Command-line options for one route computation.
#[derive(Clone, Debug, CliOptions, KvDisplay)]
pub struct RouteOptions {
    /// Street list to read.
    #[cli(short = 'i', long = "input", required)]
    pub input: String,
    /// Intersection the route starts and ends at.
    #[cli(short = 'p', long = "start", required)]
    #[kv(fmt = "opt")]
    pub start: Option<VertexId>,
    /// File receiving the route, one traversed street per line.
    #[cli(short = 'o', long = "output", required)]
    pub output: String,
    /// Structured logging level.
    #[cli(long = "log-level")]
    pub log_level: LogLevel,
    /// Logging output format.
    #[cli(long = "log-format")]
    pub log_format: LogFormat,
    /// Include timestamps in log lines.
    pub log_timestamp: bool,
    /// Optional output file path for logs. Empty means stderr.
    #[cli(long = "log-output")]
    pub log_output: String,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
pub enum LogLevel {
    Error,
    #[cli(alias = "warning", default)]
    Warn,
    Info,
    Debug,
    Trace,
    Off,
}

impl LogLevel {
    pub fn to_filter(self) -> LevelFilter {
        match self {
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
            Self::Off => LevelFilter::Off,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, CliValue)]
pub enum LogFormat {
    #[cli(default)]
    Compact,
    Pretty,
}

impl Default for RouteOptions {
    fn default() -> Self {
        Self {
            input: String::new(),
            start: None,
            output: String::new(),
            log_level: LogLevel::default(),
            log_format: LogFormat::default(),
            log_timestamp: true,
            log_output: String::new(),
        }
    }
}

impl RouteOptions {
    pub fn from_args() -> Result<Self> {
        Self::parse_from_iter(env::args().skip(1))
    }

    /// Parses and validates arguments; every required option must be present.
    pub fn parse_from_iter<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut options = Self::default();
        let mut args = args
            .into_iter()
            .map(|arg| arg.as_ref().to_owned())
            .peekable();

        while let Some(arg) = args.next() {
            if arg == "--help" || arg == "-h" {
                return Err(Error::invalid_input(Self::usage()));
            }

            let raw_name = match arg.strip_prefix("--") {
                Some(long) => long,
                None if Self::is_option_token(&arg) => &arg[1..],
                None => {
                    return Err(Error::invalid_input(format!(
                        "Unexpected argument: {arg}\n\n{}",
                        Self::usage()
                    )));
                }
            };

            if raw_name.is_empty() {
                return Err(Error::invalid_input(format!(
                    "Invalid option name: {arg}\n\n{}",
                    Self::usage()
                )));
            }

            let (name, value) = Self::split_arg(raw_name, &mut args);

            if options.apply_cli_option(&name, value.clone())? {
                continue;
            }

            match name.as_str() {
                "log-timestamp" => {
                    options.log_timestamp = match value {
                        Some(v) => parse_bool(&name, &v)?,
                        None => true,
                    };
                }
                "no-log-timestamp" => {
                    if value.is_some() {
                        return Err(Error::invalid_input(format!(
                            "Flag --{name} does not take a value"
                        )));
                    }
                    options.log_timestamp = false;
                }
                _ => {
                    return Err(Error::invalid_input(format!(
                        "Unknown option: {arg}\n\n{}",
                        Self::usage()
                    )));
                }
            }
        }

        let missing = options.missing_required();
        if !missing.is_empty() {
            return Err(Error::invalid_input(format!(
                "Missing required option(s): {}\n\n{}",
                missing.join(", "),
                Self::usage()
            )));
        }

        Ok(options)
    }

    pub fn usage() -> String {
        format!(
            "Usage:
  postman -i <streets.txt> -p <start> -o <route.txt> [options]

Required:
  -i, --input <path>     Street list: <a> <b> <length> <name> per line
  -p, --start <int>      Intersection the route starts and ends at
  -o, --output <path>    Route file: <from> <to> <name> per line

Options:
  --log-level <{levels}>
  --log-format <{formats}>
  --log-timestamp[=<bool>]
  --no-log-timestamp
  --log-output <path>
  -h, --help

Examples:
  postman -i streets.txt -p 1 -o route.txt
  postman --input=streets.txt --start=-3 --output=route.txt --log-level=info
",
            levels = LogLevel::VARIANTS.join("|"),
            formats = LogFormat::VARIANTS.join("|"),
        )
    }

    pub fn input_path(&self) -> &Path {
        Path::new(self.input.trim())
    }

    pub fn output_path(&self) -> &Path {
        Path::new(self.output.trim())
    }

    pub fn start_vertex(&self) -> Result<VertexId> {
        self.start
            .ok_or_else(|| Error::invalid_input("Missing required option: -p/--start"))
    }

    pub fn log_output_path(&self) -> Option<&Path> {
        let log_output = self.log_output.trim();
        if log_output.is_empty() || log_output == "-" {
            None
        } else {
            Some(Path::new(log_output))
        }
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value {
        "1" | "true" | "TRUE" | "True" | "yes" | "YES" | "on" | "ON" => Ok(true),
        "0" | "false" | "FALSE" | "False" | "no" | "NO" | "off" | "OFF" => Ok(false),
        _ => Err(Error::invalid_input(format!(
            "Invalid boolean for --{name}: {value} (expected true/false)"
        ))),
    }
}
