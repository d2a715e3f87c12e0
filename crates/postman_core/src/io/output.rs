use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{Error, Result, route::Route};

/// Writes the route to `path`, one `<from> <to> <name>` line per step.
///
/// The file is created (or truncated) only here, after the route exists.
pub fn write_route(path: &Path, route: &Route) -> Result<()> {
    let file = File::create(path).map_err(|source| Error::OutputUnavailable {
        path: path.to_path_buf(),
        source,
    })?;
    let mut writer = BufWriter::new(file);
    write_route_to(&mut writer, route)?;
    writer.flush()?;
    log::debug!("output: path={} steps={}", path.display(), route.len());
    Ok(())
}

pub fn write_route_to(writer: &mut impl Write, route: &Route) -> Result<()> {
    for step in route.steps() {
        writeln!(writer, "{step}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::{
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::{write_route, write_route_to};
    use crate::{
        Error,
        route::{Route, RouteStep},
    };

    fn unique_temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("postman-tests-{name}-{nanos}"))
    }

    fn sample_route() -> Route {
        Route::new(vec![
            RouteStep {
                from: 1,
                to: 2,
                length: 1.0,
                label: "A".to_string(),
            },
            RouteStep {
                from: 2,
                to: 1,
                length: 1.0,
                label: "A".to_string(),
            },
        ])
    }

    #[test]
    fn write_route_to_emits_one_line_per_step() {
        let mut buf = Vec::new();
        write_route_to(&mut buf, &sample_route()).expect("write to memory");
        assert_eq!(String::from_utf8(buf).expect("utf8"), "1 2 A\n2 1 A\n");
    }

    #[test]
    fn write_route_creates_the_file() {
        let dir = unique_temp_dir("output");
        std::fs::create_dir_all(&dir).expect("create dir");
        let path = dir.join("route.txt");

        write_route(&path, &sample_route()).expect("write route");
        assert_eq!(
            std::fs::read_to_string(&path).expect("read back"),
            "1 2 A\n2 1 A\n"
        );

        std::fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }

    #[test]
    fn write_route_reports_unopenable_output() {
        let path = unique_temp_dir("no-such-dir").join("route.txt");
        let err = write_route(&path, &sample_route()).expect_err("parent dir is missing");
        assert!(matches!(err, Error::OutputUnavailable { .. }));
    }
}
