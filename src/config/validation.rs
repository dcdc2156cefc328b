// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Configuration validation.
//!
//! Structural problems are collected rather than reported one at a time, so a
//! user fixing a config sees every issue in one pass. Out-of-range numeric
//! options are not errors; they are clamped where they are read.
//!
//! # Examples
//!
//! ```rust
//! use the_grafter::config::{parse_yaml, validate_config, ValidationError};
//!
//! let config = parse_yaml("host:\n  application: ''\nkits:\n  default: ''").unwrap();
//!
//! let errors = validate_config(&config).unwrap_err();
//! assert_eq!(errors.len(), 2);
//! assert!(errors.contains(&ValidationError::BlankApplication));
//! ```

use std::fmt;

use crate::config::GrafterConfig;

/// Problems found in an otherwise well-formed configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// `host.application` is empty or whitespace.
    BlankApplication,
    /// `host.document` is present but blank.
    BlankDocument,
    /// `kits.default` is present but blank.
    BlankDefaultKit,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::BlankApplication => {
                write!(f, "host.application must name the host application")
            }
            ValidationError::BlankDocument => {
                write!(f, "host.document is set but blank; omit it when there is no document")
            }
            ValidationError::BlankDefaultKit => {
                write!(f, "kits.default is set but blank; omit it to use the first registered kit")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Validates a configuration.
///
/// # Returns
///
/// * `Ok(())` - Configuration is usable
/// * `Err(Vec<ValidationError>)` - Every problem found
pub fn validate_config(config: &GrafterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.host.application.trim().is_empty() {
        errors.push(ValidationError::BlankApplication);
    }

    if matches!(config.host.document.as_deref(), Some(doc) if doc.trim().is_empty()) {
        errors.push(ValidationError::BlankDocument);
    }

    if matches!(config.kits.default.as_deref(), Some(kit) if kit.trim().is_empty()) {
        errors.push(ValidationError::BlankDefaultKit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_yaml;

    #[test]
    fn test_validate_config_table_driven() {
        struct TestCase {
            name: &'static str,
            yaml: &'static str,
            expected: Vec<ValidationError>,
        }

        let test_cases = vec![
            TestCase {
                name: "defaults are valid",
                yaml: "{}",
                expected: vec![],
            },
            TestCase {
                name: "fully specified",
                yaml: "host:\n  application: rhino\n  document: a.3dm\nkits:\n  default: Objects",
                expected: vec![],
            },
            TestCase {
                name: "blank application",
                yaml: "host:\n  application: ' '",
                expected: vec![ValidationError::BlankApplication],
            },
            TestCase {
                name: "blank document",
                yaml: "host:\n  application: rhino\n  document: ''",
                expected: vec![ValidationError::BlankDocument],
            },
            TestCase {
                name: "everything blank",
                yaml: "host:\n  application: ''\n  document: ''\nkits:\n  default: ''",
                expected: vec![
                    ValidationError::BlankApplication,
                    ValidationError::BlankDocument,
                    ValidationError::BlankDefaultKit,
                ],
            },
        ];

        for test_case in test_cases {
            let config = parse_yaml(test_case.yaml).unwrap();
            let result = validate_config(&config);
            if test_case.expected.is_empty() {
                assert!(result.is_ok(), "case '{}': {:?}", test_case.name, result);
            } else {
                assert_eq!(result.unwrap_err(), test_case.expected, "case '{}'", test_case.name);
            }
        }
    }
}
