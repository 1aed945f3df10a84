//! Mapping options.

/// Disables `dc:date` mirroring of event dates when set to a false value.
pub const DC_DATE_ENV: &str = "GEDRDF_DC_DATE";
/// Disables child-to-family inference in the reverse direction.
pub const INFER_PARENTAGE_ENV: &str = "GEDRDF_INFER_PARENTAGE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapOptions {
    /// Forward: emit every event date as `dc:date` in addition to `bio:date`.
    pub mirror_dc_date: bool,
    /// Reverse: attach children to the single marriage their parents share.
    pub infer_parentage: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            mirror_dc_date: true,
            infer_parentage: true,
        }
    }
}

impl MapOptions {
    /// Load from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            mirror_dc_date: flag(lookup(DC_DATE_ENV), defaults.mirror_dc_date),
            infer_parentage: flag(lookup(INFER_PARENTAGE_ENV), defaults.infer_parentage),
        }
    }
}

fn flag(value: Option<String>, default: bool) -> bool {
    match value.as_deref().map(str::trim) {
        Some(v) if ["0", "false", "no", "off"].iter().any(|f| v.eq_ignore_ascii_case(f)) => false,
        Some(v) if ["1", "true", "yes", "on"].iter().any(|t| v.eq_ignore_ascii_case(t)) => true,
        _ => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_enable_everything() {
        let opts = MapOptions::from_lookup(|_| None);
        assert_eq!(opts, MapOptions::default());
        assert!(opts.mirror_dc_date);
        assert!(opts.infer_parentage);
    }

    #[test]
    fn false_values_disable() {
        let opts = MapOptions::from_lookup(|key| match key {
            DC_DATE_ENV => Some("off".to_string()),
            INFER_PARENTAGE_ENV => Some("FALSE".to_string()),
            _ => None,
        });
        assert!(!opts.mirror_dc_date);
        assert!(!opts.infer_parentage);
    }

    #[test]
    fn unparseable_values_keep_default() {
        let opts = MapOptions::from_lookup(|_| Some("maybe".to_string()));
        assert_eq!(opts, MapOptions::default());
    }
}
