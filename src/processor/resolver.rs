//! Turns version tokens (`SLV_97`, `SLV_EXTEND_CARGOTYPES`, `SL_MAX_VERSION`,
//! or a bare `123`) into integers.

use crate::config::VersionTable;
use crate::error::{GenError, GenResult};

/// Prefix of directly-numbered version symbols.
const NUMBERED_PREFIX: &str = "SLV_";

pub struct VersionResolver<'a> {
    table: &'a VersionTable,
}

impl<'a> VersionResolver<'a> {
    pub fn new(table: &'a VersionTable) -> Self {
        Self { table }
    }

    pub fn resolve(&self, token: &str) -> GenResult<u32> {
        let resolved = token
            .strip_prefix(NUMBERED_PREFIX)
            .and_then(parse_digits)
            .or_else(|| parse_digits(token))
            .or_else(|| self.table.lookup(token));

        resolved.ok_or_else(|| GenError::UnresolvedVersionToken {
            token: token.to_string(),
        })
    }
}

/// Digits only, no sign, must fit in `u32`.
fn parse_digits(s: &str) -> Option<u32> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolution_order() {
        let table = VersionTable::default();
        let r = VersionResolver::new(&table);

        assert_eq!(r.resolve("SLV_97").unwrap(), 97);
        assert_eq!(r.resolve("SLV_0").unwrap(), 0);
        assert_eq!(r.resolve("42").unwrap(), 42);
        assert_eq!(r.resolve("SLV_EXTEND_RAILTYPES").unwrap(), 200);
        assert_eq!(r.resolve("SL_MIN_VERSION").unwrap(), 0);
        assert_eq!(r.resolve("SL_MAX_VERSION").unwrap(), 65535);
    }

    #[test]
    fn test_sentinel_follows_table() {
        let table = VersionTable {
            min_version: 0,
            max_version: 255,
            milestones: vec![],
        };
        let r = VersionResolver::new(&table);
        assert_eq!(r.resolve("SL_MAX_VERSION").unwrap(), 255);
        assert!(r.resolve("SLV_EXTEND_CARGOTYPES").is_err());
    }

    #[test]
    fn test_unresolved_tokens() {
        let table = VersionTable::default();
        let r = VersionResolver::new(&table);

        for token in ["SLV_", "SLV_12a", "SLV_SOMETHING_NEW", "slv_12", "-4", "SLV_99999999999"] {
            let err = r.resolve(token).unwrap_err();
            assert_eq!(
                err.to_string(),
                format!("unknown saveload version {token}, check src/saveload/saveload.h")
            );
        }
    }
}
