//! Logging integration for the formflow engine.
//!
//! Provides a helper for configuring [`tracing`]-based logging and for
//! creating per-form spans so log entries from different forms on the same
//! screen stay distinguishable.

/// Sets up the global tracing subscriber.
///
/// `filter` is an env-filter directive string (e.g. "debug",
/// "formflow_engine=debug"). When `pretty` is set a human-readable format is
/// used; otherwise a structured JSON format suited to log collection.
///
/// Installation is best-effort: if a subscriber is already installed the
/// call is a no-op, so tests and embedding applications can both call it.
pub fn setup_logging(filter: &str, pretty: bool) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info"));

    if pretty {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for one form instance.
///
/// # Examples
///
/// ```
/// use formflow_core::logging::form_span;
///
/// let span = form_span("signup");
/// let _guard = span.enter();
/// tracing::info!("form initialized");
/// ```
pub fn form_span(form_name: &str) -> tracing::Span {
    tracing::info_span!("form", name = form_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_logging_is_idempotent() {
        setup_logging("debug", true);
        setup_logging("info", false);
    }

    #[test]
    fn test_form_span_enter() {
        let span = form_span("signup");
        let _guard = span.enter();
        tracing::debug!("inside form span");
    }
}
