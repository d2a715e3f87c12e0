use std::{
    fmt::{Arguments, Display},
    fs::File,
    io::{self, Write},
};

use env_logger::{Builder, Target, WriteStyle};
use log::Level;

use crate::{
    Error, Result,
    options::{LogFormat, RouteOptions},
};

/// Installs the global logger described by the `--log-*` options.
pub fn init_logger(options: &RouteOptions) -> Result<()> {
    let format = options.log_format;
    let timestamp = options.log_timestamp;

    Builder::new()
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .target(log_target(options)?)
        .format(move |buf, record| {
            let stamp = timestamp.then(|| buf.timestamp_millis());
            write_line(
                buf,
                format,
                stamp,
                record.level(),
                record.target(),
                record.args(),
            )
        })
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn log_target(options: &RouteOptions) -> Result<Target> {
    let Some(path) = options.log_output_path() else {
        return Ok(Target::Stderr);
    };
    let file = File::create(path).map_err(|e| {
        Error::other(format!("cannot create log file {}: {e}", path.display()))
    })?;
    Ok(Target::Pipe(Box::new(file)))
}

/// `[<stamp> ]<LEVEL> <message>` for compact lines, with the level padded and
/// the module path appended for pretty ones.
fn write_line(
    out: &mut impl Write,
    format: LogFormat,
    stamp: Option<impl Display>,
    level: Level,
    target: &str,
    args: &Arguments<'_>,
) -> io::Result<()> {
    if let Some(stamp) = stamp {
        write!(out, "{stamp} ")?;
    }
    match format {
        LogFormat::Compact => writeln!(out, "{} {args}", level.as_str()),
        LogFormat::Pretty => writeln!(
            out,
            "{:<5} [{}] {args}",
            level.as_str(),
            short_target(target)
        ),
    }
}

/// `postman_core::algo::circuit` logs as `algo::circuit`.
fn short_target(target: &str) -> &str {
    target
        .strip_prefix(concat!(env!("CARGO_CRATE_NAME"), "::"))
        .unwrap_or(target)
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::{short_target, write_line};
    use crate::options::LogFormat;

    fn render(format: LogFormat, stamp: Option<&str>, level: Level) -> String {
        let mut out = Vec::new();
        write_line(
            &mut out,
            format,
            stamp,
            level,
            "postman_core::solver",
            &format_args!("solver: complete steps=4"),
        )
        .expect("write to memory");
        String::from_utf8(out).expect("utf8")
    }

    #[test]
    fn compact_line_has_level_and_message() {
        assert_eq!(
            render(LogFormat::Compact, None, Level::Info),
            "INFO solver: complete steps=4\n"
        );
    }

    #[test]
    fn pretty_line_pads_level_and_shows_module() {
        assert_eq!(
            render(LogFormat::Pretty, Some("1700000000000"), Level::Warn),
            "1700000000000 WARN  [solver] solver: complete steps=4\n"
        );
    }

    #[test]
    fn short_target_drops_the_crate_prefix() {
        assert_eq!(short_target("postman_core::algo::circuit"), "algo::circuit");
        assert_eq!(short_target("postman"), "postman");
    }
}
