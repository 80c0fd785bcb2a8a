//! Typed access to validated tool arguments.
//!
//! Arguments reaching a handler were already coerced by the validator, so a
//! wrong type here means the descriptor and the handler disagree.

use toolcall_domain::{ToolArguments, ToolError};

/// Required non-blank string argument.
pub fn require_str<'a>(args: &'a ToolArguments, key: &str) -> Result<&'a str, ToolError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ToolError::invalid_argument(format!("'{}' must be a non-empty string", key)))
}

pub fn opt_str<'a>(args: &'a ToolArguments, key: &str) -> Option<&'a str> {
    args.get(key)
        .and_then(|v| v.as_str())
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

pub fn opt_u64(args: &ToolArguments, key: &str) -> Option<u64> {
    args.get(key).and_then(|v| v.as_u64())
}

pub fn opt_f64(args: &ToolArguments, key: &str) -> Option<f64> {
    args.get(key).and_then(|v| v.as_f64())
}

pub fn opt_bool(args: &ToolArguments, key: &str) -> Option<bool> {
    args.get(key).and_then(|v| v.as_bool())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_str_rejects_blank() {
        let mut args = ToolArguments::new();
        args.insert("query".into(), json!("   "));
        let err = require_str(&args, "query").unwrap_err();
        assert_eq!(err.code, ToolError::INVALID_ARGUMENT);

        args.insert("query".into(), json!(" rust "));
        assert_eq!(require_str(&args, "query").unwrap(), "rust");
    }

    #[test]
    fn test_optional_accessors() {
        let mut args = ToolArguments::new();
        args.insert("n".into(), json!(3));
        args.insert("flag".into(), json!(true));
        assert_eq!(opt_u64(&args, "n"), Some(3));
        assert_eq!(opt_f64(&args, "n"), Some(3.0));
        assert_eq!(opt_bool(&args, "flag"), Some(true));
        assert_eq!(opt_str(&args, "missing"), None);
    }
}
