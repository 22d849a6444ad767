//! Enumerated-domain checks shared by both stores.

use configs::DomainConfig;

use crate::errors::StoreError;

pub fn check_role(domains: &DomainConfig, role: &str) -> Result<(), StoreError> {
    if domains.has_role(role) {
        Ok(())
    } else {
        Err(StoreError::InvalidRole(role.to_string()))
    }
}

/// First level is checked before second level.
pub fn check_levels(domains: &DomainConfig, first_level: &str, second_level: &str) -> Result<(), StoreError> {
    if !domains.has_first_level(first_level) {
        return Err(StoreError::InvalidLevel { tier: "first level", value: first_level.to_string() });
    }
    if !domains.has_second_level(second_level) {
        return Err(StoreError::InvalidLevel { tier: "second level", value: second_level.to_string() });
    }
    Ok(())
}

/// Returns the value as given, or `MissingField` when absent or whitespace-only.
pub fn require<'a>(field: &'static str, value: Option<&'a str>) -> Result<&'a str, StoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(StoreError::MissingField(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_and_levels() {
        let d = DomainConfig::default();
        assert!(check_role(&d, "admin").is_ok());
        assert!(matches!(check_role(&d, "root"), Err(StoreError::InvalidRole(r)) if r == "root"));

        assert!(check_levels(&d, "level1", "level3").is_ok());
        assert!(matches!(
            check_levels(&d, "level9", "level9"),
            Err(StoreError::InvalidLevel { tier: "first level", .. })
        ));
        assert!(matches!(
            check_levels(&d, "level1", "level9"),
            Err(StoreError::InvalidLevel { tier: "second level", .. })
        ));
    }

    #[test]
    fn require_rejects_blank() {
        // padding is kept, keys are stored exactly as supplied
        assert_eq!(require("username", Some(" amy ")).ok(), Some(" amy "));
        assert!(matches!(require("username", Some("   ")), Err(StoreError::MissingField("username"))));
        assert!(matches!(require("role", None), Err(StoreError::MissingField("role"))));
    }
}
