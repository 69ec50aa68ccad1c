use std::fmt::Display;

use tracing::error;

/// Runs a host entry point and reports its failure instead of returning it.
///
/// Failures are logged and printed to stderr as `Failed (<label>): <error>`, then `None` is
/// returned so the caller can stop.
pub fn with_error_reporting<T, E, F>(label: &str, op: F) -> Option<T>
where
    E: Display,
    F: FnOnce() -> Result<T, E>,
{
    match op() {
        Ok(value) => Some(value),
        Err(e) => {
            error!(operation = label, "{}", e);
            eprintln!("{}", failure_message(label, &e));
            None
        }
    }
}

fn failure_message(label: &str, err: &impl Display) -> String {
    format!("Failed ({}): {}", label, err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProserError;

    #[test]
    fn passes_successful_results_through() {
        let result = with_error_reporting("InsertParagraph", || Ok::<_, ProserError>(42));
        assert_eq!(result, Some(42));
    }

    #[test]
    fn reports_failures_as_none() {
        let mut ran = false;
        let result: Option<()> = with_error_reporting("InsertSentence", || {
            ran = true;
            Err(ProserError::NoSentencesFound {
                text: String::new(),
            })
        });
        assert!(ran);
        assert_eq!(result, None);
    }

    #[test]
    fn labels_failure_messages() {
        let message = failure_message("ChangeTheme", &ProserError::UnknownTheme("x".into()));
        assert_eq!(message, "Failed (ChangeTheme): Unknown theme: x");
    }
}
