// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies one branch of a [`Tree`](super::Tree).
///
/// A path is an immutable sequence of non-negative indices. Paths order
/// lexicographically, so `{0}` < `{0;0}` < `{0;1}` < `{1}`.
///
/// ```
/// use the_grafter::tree::Path;
///
/// let a = Path::new(vec![0, 1]);
/// let b: Path = "{1}".parse().unwrap();
/// assert!(a < b);
/// assert_eq!(a.to_string(), "{0;1}");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Path(Vec<u32>);

impl Path {
    pub fn new(indices: Vec<u32>) -> Self {
        Self(indices)
    }

    pub fn indices(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u32>> for Path {
    fn from(indices: Vec<u32>) -> Self {
        Self(indices)
    }
}

impl<const N: usize> From<[u32; N]> for Path {
    fn from(indices: [u32; N]) -> Self {
        Self(indices.to_vec())
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, index) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ";")?;
            }
            write!(f, "{}", index)?;
        }
        write!(f, "}}")
    }
}

/// Error returned when a path literal such as `{0;1}` cannot be parsed.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Invalid path literal '{literal}': {reason}")]
pub struct ParsePathError {
    pub literal: String,
    pub reason: String,
}

impl FromStr for Path {
    type Err = ParsePathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let inner = trimmed
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(|| ParsePathError {
                literal: s.to_string(),
                reason: "expected surrounding braces".to_string(),
            })?;

        if inner.trim().is_empty() {
            return Ok(Path::default());
        }

        inner
            .split(';')
            .map(|part| {
                part.trim().parse::<u32>().map_err(|e| ParsePathError {
                    literal: s.to_string(),
                    reason: format!("'{}' is not a non-negative index ({})", part.trim(), e),
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lexicographic_ordering() {
        let mut paths = vec![
            Path::from([1]),
            Path::from([0, 1]),
            Path::from([0]),
            Path::from([0, 0]),
            Path::from([0, 10]),
            Path::from([0, 2]),
        ];
        paths.sort();

        let rendered: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
        assert_eq!(rendered, vec!["{0}", "{0;0}", "{0;1}", "{0;2}", "{0;10}", "{1}"]);
    }

    #[test]
    fn test_parse_path_literals() {
        struct TestCase {
            literal: &'static str,
            expected: Option<Vec<u32>>,
        }

        let test_cases = vec![
            TestCase { literal: "{0}", expected: Some(vec![0]) },
            TestCase { literal: "{0;1;2}", expected: Some(vec![0, 1, 2]) },
            TestCase { literal: " { 3 ; 4 } ", expected: Some(vec![3, 4]) },
            TestCase { literal: "{}", expected: Some(vec![]) },
            TestCase { literal: "0;1", expected: None },
            TestCase { literal: "{0;-1}", expected: None },
            TestCase { literal: "{a}", expected: None },
        ];

        for test_case in test_cases {
            let parsed = test_case.literal.parse::<Path>();
            match test_case.expected {
                Some(indices) => assert_eq!(
                    parsed.expect("literal should parse"),
                    Path::new(indices),
                    "literal '{}'",
                    test_case.literal
                ),
                None => assert!(parsed.is_err(), "literal '{}' should fail", test_case.literal),
            }
        }
    }
}
