use anyhow::Error;

/// Format an error for the status line - show the most informative cause
///
/// Network failures surface the reqwest error (it names the URL); anything
/// else surfaces the root cause rather than the outermost context.
pub fn format_error_message(error: &Error) -> String {
    // Walk the error chain to find reqwest::Error (most informative for network errors)
    let mut current: Option<&dyn std::error::Error> = Some(error.as_ref());

    while let Some(err) = current {
        if let Some(reqwest_err) = err.downcast_ref::<reqwest::Error>() {
            return reqwest_err.to_string();
        }
        current = err.source();
    }

    error
        .chain()
        .last()
        .map(|root| root.to_string())
        .unwrap_or_else(|| error.to_string())
}
