//! Form behavior options.

use serde::{Deserialize, Serialize};

/// When the engine revalidates on its own, beyond explicit
/// [`SetValueOpts`](crate::form::SetValueOpts) requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidateMode {
    /// Validate only on submit (and on explicit request). The default.
    #[default]
    OnSubmit,
    /// Additionally validate a field every time its value changes.
    OnChange,
    /// Additionally validate a field when it is marked touched (blur).
    OnBlur,
}

/// Options controlling a form's runtime behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormOptions {
    /// The revalidation mode.
    #[serde(default)]
    pub mode: ValidateMode,
}

impl FormOptions {
    /// Options with the given revalidation mode.
    pub const fn with_mode(mode: ValidateMode) -> Self {
        Self { mode }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_on_submit() {
        assert_eq!(FormOptions::default().mode, ValidateMode::OnSubmit);
    }

    #[test]
    fn test_serde_snake_case() {
        let opts = FormOptions::with_mode(ValidateMode::OnChange);
        let json = serde_json::to_string(&opts).unwrap();
        assert_eq!(json, r#"{"mode":"on_change"}"#);
        let back: FormOptions = serde_json::from_str(&json).unwrap();
        assert_eq!(back, opts);
    }

    #[test]
    fn test_missing_mode_defaults() {
        let opts: FormOptions = serde_json::from_str("{}").unwrap();
        assert_eq!(opts.mode, ValidateMode::OnSubmit);
    }
}
