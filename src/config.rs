// ⚙️ Builder Configuration

use crate::error::ValueError;
use crate::timestamp::DefaultZone;
use serde::{Deserialize, Serialize};

/// Default bound on how deep the builder will descend into a tree
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Options for a `DocumentBuilder`
///
/// All fields have defaults, so a partial JSON object is enough:
/// `{"server_zone": "Utc"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Zone for offset-less server-side times (`DTSERVER`, `DTASOF`)
    ///
    /// Every other datetime without an offset is read as UTC.
    pub server_zone: DefaultZone,

    /// Depth guard against pathological nesting
    pub max_depth: usize,

    /// Fail with `UnsupportedDocumentShape` when the document carries
    /// no bank and no credit-card message set
    pub require_statement: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        BuildOptions {
            server_zone: DefaultZone::Local,
            max_depth: DEFAULT_MAX_DEPTH,
            require_statement: false,
        }
    }
}

impl BuildOptions {
    /// Builder pattern: set the server zone
    pub fn with_server_zone(mut self, zone: DefaultZone) -> Self {
        self.server_zone = zone;
        self
    }

    /// Builder pattern: set the depth guard
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Builder pattern: require a statement message set
    pub fn requiring_statement(mut self) -> Self {
        self.require_statement = true;
        self
    }

    /// Catch a hand-built `DefaultZone::Fixed` outside ±14h
    pub fn validate(&self) -> Result<(), ValueError> {
        self.server_zone.validate().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = BuildOptions::default();
        assert_eq!(options.server_zone, DefaultZone::Local);
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!options.require_statement);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let options: BuildOptions =
            serde_json::from_str(r#"{"server_zone": {"Fixed": -18000}}"#).unwrap();

        assert_eq!(options.server_zone, DefaultZone::Fixed(-18000));
        assert_eq!(options.max_depth, DEFAULT_MAX_DEPTH);
    }

    #[test]
    fn test_out_of_range_server_zone() {
        let options = BuildOptions::default().with_server_zone(DefaultZone::Fixed(15 * 3600));
        assert_eq!(
            options.validate(),
            Err(ValueError::InvalidZoneOffset(15 * 3600))
        );

        let parsed = serde_json::from_str::<BuildOptions>(r#"{"server_zone": {"Fixed": -54000}}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_builder_methods() {
        let options = BuildOptions::default()
            .with_server_zone(DefaultZone::Utc)
            .with_max_depth(8)
            .requiring_statement();

        assert_eq!(options.server_zone, DefaultZone::Utc);
        assert_eq!(options.max_depth, 8);
        assert!(options.require_statement);
    }
}
