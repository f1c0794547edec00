//! Offset/limit pagination shared by every list endpoint.

use serde::Deserialize;

pub const DEFAULT_LIMIT: u64 = 100;
pub const MAX_LIMIT: u64 = 100;

/// Query parameters `?skip=&limit=`
#[derive(Clone, Copy, Debug, Deserialize)]
pub struct Pagination {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_limit() -> u64 { DEFAULT_LIMIT }

impl Pagination {
    /// Clamp to sane bounds and return `(offset, limit)`
    pub fn normalize(self) -> (u64, u64) {
        (self.skip, self.limit.clamp(1, MAX_LIMIT))
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { skip: 0, limit: DEFAULT_LIMIT } }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn normalize_clamps_zero_limit() {
        let (offset, limit) = Pagination { skip: 0, limit: 0 }.normalize();
        assert_eq!(offset, 0);
        assert_eq!(limit, 1);
    }

    #[test]
    fn normalize_clamps_upper_bound() {
        let (offset, limit) = Pagination { skip: 5, limit: 1000 }.normalize();
        assert_eq!(offset, 5);
        assert_eq!(limit, 100);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let p: Pagination = serde_json::from_str("{}").unwrap();
        assert_eq!(p.skip, 0);
        assert_eq!(p.limit, 100);
    }
}
