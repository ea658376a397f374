//! Panic isolation for pipeline stages

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Run `f`, turning a panic into an error message.
///
/// State touched by a panicking stage must be discarded by the caller.
pub(crate) fn run_isolated<T>(f: impl FnOnce() -> T) -> Result<T, String> {
    catch_unwind(AssertUnwindSafe(f)).map_err(|payload| panic_message(payload.as_ref()))
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "stage panicked".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_passes_through() {
        assert_eq!(run_isolated(|| 41 + 1), Ok(42));
    }

    #[test]
    fn test_panic_becomes_message() {
        let result: Result<(), String> = run_isolated(|| panic!("parser blew up"));
        assert_eq!(result, Err("parser blew up".to_string()));

        let code = 7;
        let result: Result<(), String> = run_isolated(|| panic!("code {}", code));
        assert_eq!(result, Err("code 7".to_string()));
    }
}
