//! Settings validation.
//!
//! # Responsibilities
//! - Check every declared setting name against the known settings
//!
//! # Design Decisions
//! - Returns all unknown keys, not just the first
//! - Runs before any setting is applied, so a rejected document changes nothing

use crate::config::schema::Settings;
use crate::properties::PropertyBag;

/// Unknown setting names in declaration order. `Ok` when all are known.
pub fn validate_setting_keys(settings: &PropertyBag) -> Result<(), Vec<String>> {
    let unknown: Vec<String> = settings
        .keys()
        .filter(|key| !Settings::is_known(key))
        .map(str::to_string)
        .collect();
    if unknown.is_empty() {
        Ok(())
    } else {
        Err(unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_every_unknown_key() {
        let settings: PropertyBag = [
            ("cacheEnabled", "true"),
            ("cacheEnable", "true"),
            ("LazyLoadingEnabled", "false"),
        ]
        .into_iter()
        .collect();
        let unknown = validate_setting_keys(&settings).unwrap_err();
        assert_eq!(unknown, vec!["cacheEnable".to_string(), "LazyLoadingEnabled".to_string()]);
    }

    #[test]
    fn test_known_keys_pass() {
        let settings: PropertyBag = [("logImpl", "TRACING"), ("vfsImpl", "a.B")].into_iter().collect();
        assert!(validate_setting_keys(&settings).is_ok());
    }
}
