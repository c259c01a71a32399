//! Error handling foundation for flowdex.
//!
//! Only the `Result` alias lives here. Each crate owns its error enum in its
//! own `error` module and converts lower-layer failures at its boundary.

use rootcause::Report;

/// A `Result` whose error is a rootcause [`Report`] over the layer's error
/// enum, e.g. `Result<WorkflowRecord, NormalizationError>`.
pub type Result<T, C = ()> = std::result::Result<T, Report<C>>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Missing;

    impl fmt::Display for Missing {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("missing")
        }
    }

    impl std::error::Error for Missing {}

    fn lookup(found: bool) -> Result<u32, Missing> {
        if found { Ok(7) } else { Err(Missing.into()) }
    }

    #[test]
    fn question_mark_lifts_layer_errors() {
        fn outer() -> Result<u32, Missing> {
            let raw: std::result::Result<u32, Missing> = Err(Missing);
            Ok(raw?)
        }
        assert!(outer().is_err());
        assert_eq!(lookup(true).expect("found"), 7);
        assert!(lookup(false).expect_err("missing").to_string().contains("missing"));
    }
}
