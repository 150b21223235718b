//! Spincube: a window with one rotating, textured, vertex-colored cube.

mod app;
mod config;
mod report;
mod startup;

use std::process::ExitCode;

use spincube_engine::logging::init_logging;

use crate::config::DemoConfig;
use crate::report::{default_sink, describe, ErrorSink, ERROR_TITLE};

fn main() -> ExitCode {
    let config = DemoConfig::default();
    init_logging(config.logging.clone());

    finish(startup::run(config), &*default_sink())
}

/// Maps the run result to the process exit code, reporting any failure to `sink`.
fn finish(result: anyhow::Result<()>, sink: &dyn ErrorSink) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            sink.report(ERROR_TITLE, &describe(&err));
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;

    use crate::report::CaptureSink;

    #[test]
    fn bad_shader_is_reported_and_exits_with_failure() {
        let config = DemoConfig {
            vertex_wgsl: Cow::Borrowed("@vertex fn vs_main( -> {"),
            ..DemoConfig::default()
        };
        let sink = CaptureSink::default();

        let code = finish(startup::run(config), &sink);

        assert_eq!(code, ExitCode::FAILURE);
        let reports = sink.0.borrow();
        assert_eq!(reports.len(), 1);
        let (title, message) = &reports[0];
        assert_eq!(title, "Error");
        assert!(message.starts_with("shader compile error"));
        assert!(message.contains("vertex stage"));
    }

    #[test]
    fn success_reports_nothing() {
        let sink = CaptureSink::default();
        assert_eq!(finish(Ok(()), &sink), ExitCode::SUCCESS);
        assert!(sink.0.borrow().is_empty());
    }
}
