//! Classification of floor-map codes into real storage locations and
//! administrative markers (aisle labels, legends, pillars, gates).
//!
//! The floor map exported from the warehouse spreadsheet contains every
//! labelled cell, not just shelves. Only real storage locations count
//! toward occupancy statistics.

use regex::Regex;

use crate::error::CoreError;

/// Default exclusion pattern: aisle labels (`走道...`), diagram legends
/// (`...儲位圖`), single uppercase column letters, pillars (`柱`) and
/// gates (`大門`).
pub const DEFAULT_ADMIN_PATTERN: &str = r"^(走道.*|.*儲位圖|[A-Z]|柱|大門)$";

/// Marker prefix on some map codes.
const CODE_PREFIX: char = '#';

/// Variant suffix appended to duplicated map cells, e.g. `A-01#V_2`.
const VARIANT_SUFFIX: &str = "#V_";

/// Strip the leading `#` marker and any trailing `#V_...` variant suffix,
/// then trim surrounding whitespace.
pub fn normalize_code(code: &str) -> &str {
    let code = code.strip_prefix(CODE_PREFIX).unwrap_or(code);
    let code = match code.find(VARIANT_SUFFIX) {
        Some(idx) => &code[..idx],
        None => code,
    };
    code.trim()
}

/// Decides whether a location code names a real storage location.
#[derive(Debug, Clone)]
pub struct LocationClassifier {
    admin_pattern: Regex,
}

impl Default for LocationClassifier {
    fn default() -> Self {
        Self {
            admin_pattern: Regex::new(DEFAULT_ADMIN_PATTERN)
                .expect("default admin pattern is a valid regex"),
        }
    }
}

impl LocationClassifier {
    /// Build a classifier from a custom administrative-code pattern.
    pub fn new(admin_pattern: &str) -> Result<Self, CoreError> {
        let admin_pattern = Regex::new(admin_pattern).map_err(|e| {
            CoreError::Config(format!("invalid admin location pattern: {e}"))
        })?;
        Ok(Self { admin_pattern })
    }

    pub fn pattern(&self) -> &str {
        self.admin_pattern.as_str()
    }

    /// `true` when `code`, once normalized, does not match the
    /// administrative pattern.
    pub fn is_storage(&self, code: &str) -> bool {
        !self.admin_pattern.is_match(normalize_code(code))
    }
}
