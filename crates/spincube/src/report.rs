//! Fatal-error reporting.

use spincube_engine::StartupError;

/// Title used for every fatal-error report.
pub const ERROR_TITLE: &str = "Error";

/// Where fatal errors go before the process exits.
pub trait ErrorSink {
    fn report(&self, title: &str, message: &str);
}

/// Writes the error to the log only.
pub struct LogSink;

impl ErrorSink for LogSink {
    fn report(&self, title: &str, message: &str) {
        log::error!("{title}: {message}");
    }
}

/// Logs the error, then blocks on a native modal message box.
#[cfg(feature = "dialog")]
pub struct DialogSink;

#[cfg(feature = "dialog")]
impl ErrorSink for DialogSink {
    fn report(&self, title: &str, message: &str) {
        LogSink.report(title, message);
        let _ = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title(title)
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();
    }
}

/// The sink for this build: a dialog when the `dialog` feature is on.
pub fn default_sink() -> Box<dyn ErrorSink> {
    #[cfg(feature = "dialog")]
    {
        Box::new(DialogSink)
    }
    #[cfg(not(feature = "dialog"))]
    {
        Box::new(LogSink)
    }
}

/// Text shown to the user: the compiler/link log or decode reason for known
/// startup failures, the full context chain otherwise.
pub fn describe(err: &anyhow::Error) -> String {
    match err.chain().find_map(|e| e.downcast_ref::<StartupError>()) {
        Some(startup) => startup.to_string(),
        None => format!("{err:#}"),
    }
}

/// Records reports instead of showing them.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct CaptureSink(pub std::cell::RefCell<Vec<(String, String)>>);

#[cfg(test)]
impl ErrorSink for CaptureSink {
    fn report(&self, title: &str, message: &str) {
        self.0.borrow_mut().push((title.into(), message.into()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    use anyhow::Context;

    #[test]
    fn describe_unwraps_context_to_the_startup_error() {
        let err = Err::<(), _>(StartupError::AssetDecode {
            path: PathBuf::from("Grass_01.png"),
            reason: "No such file or directory".into(),
        })
        .context("application setup failed")
        .unwrap_err();

        let text = describe(&err);
        assert!(text.starts_with("texture load error"));
        assert!(text.contains("Grass_01.png"));
    }

    #[test]
    fn describe_falls_back_to_the_chain() {
        let err = anyhow::anyhow!("inner").context("outer");
        assert_eq!(describe(&err), "outer: inner");
    }

    #[test]
    fn sink_receives_title_and_message() {
        let sink = CaptureSink::default();
        sink.report(ERROR_TITLE, "boom");
        assert_eq!(sink.0.borrow().as_slice(), &[("Error".to_string(), "boom".to_string())]);
    }
}
