use crate::{
    Result,
    input::load_graph,
    options::RouteOptions,
    output::write_route,
    route::RouteMetrics,
    solver::solve_route,
};

/// Loads the network, solves the route and writes it out.
///
/// Nothing is written unless every earlier step succeeds.
pub fn run(options: &RouteOptions) -> Result<RouteMetrics> {
    let start = options.start_vertex()?;
    let graph = load_graph(options.input_path())?;
    log::info!(
        "input: path={} vertices={} streets={}",
        options.input_path().display(),
        graph.vertex_count(),
        graph.street_count()
    );

    let route = solve_route(&graph, start)?;
    let metrics = route.metrics(&graph);
    write_route(options.output_path(), &route)?;
    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::run;
    use crate::{Error, options::RouteOptions};

    fn unique_temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        let dir = std::env::temp_dir().join(format!("postman-tests-{name}-{nanos}"));
        fs::create_dir_all(&dir).expect("create temp dir");
        dir
    }

    fn options_for(dir: &std::path::Path, start: i64) -> RouteOptions {
        RouteOptions {
            input: dir.join("streets.txt").display().to_string(),
            start: Some(start),
            output: dir.join("route.txt").display().to_string(),
            ..RouteOptions::default()
        }
    }

    #[test]
    fn run_writes_the_route_file() {
        let dir = unique_temp_dir("run-ok");
        fs::write(dir.join("streets.txt"), "1 2 1.0 A\n2 3 1.0 B\n").expect("fixture");

        let metrics = run(&options_for(&dir, 1)).expect("run");
        assert_eq!(metrics.steps, 4);
        assert_eq!(metrics.deadhead_length, 2.0);
        let written = fs::read_to_string(dir.join("route.txt")).expect("route file");
        assert_eq!(written, "1 2 A\n2 3 B\n3 2 B\n2 1 A\n");

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }

    #[test]
    fn disconnected_input_writes_nothing() {
        let dir = unique_temp_dir("run-disconnected");
        fs::write(
            dir.join("streets.txt"),
            "1 2 1.0 A\n2 3 1.0 B\n3 1 1.0 C\n4 5 1.0 D\n5 6 1.0 E\n6 4 1.0 F\n",
        )
        .expect("fixture");

        let err = run(&options_for(&dir, 1)).expect_err("disconnected");
        assert!(matches!(err, Error::DisconnectedGraph));
        assert!(!dir.join("route.txt").exists());

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }

    #[test]
    fn missing_input_is_input_unavailable() {
        let dir = unique_temp_dir("run-missing");
        let err = run(&options_for(&dir, 1)).expect_err("no input file");
        assert!(matches!(err, Error::InputUnavailable { .. }));
        assert!(!dir.join("route.txt").exists());

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }
}
