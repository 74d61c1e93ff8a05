//! Dotted numeric driver version handling
//!
//! A driver version is an ordered sequence of non-negative integer
//! components ("551.23", "560.35.03"). Versions are never represented
//! as floating-point numbers: a float collapses "551.04" and "551.4"
//! into the same value and cannot round-trip three components at all.
//!
//! Ordering is component-wise, most significant first, with absent
//! trailing components reading as zero, so `551.23 == 551.23.0`.

use crate::error::VersionParseError;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// An installed or published driver version
#[derive(Debug, Clone)]
pub struct DriverVersion {
    /// Version components, most significant first; never empty
    components: Vec<u64>,
}

impl DriverVersion {
    /// Creates a version from raw components
    ///
    /// Returns `VersionParseError::Empty` when no components are given.
    pub fn new(components: Vec<u64>) -> Result<Self, VersionParseError> {
        if components.is_empty() {
            return Err(VersionParseError::Empty);
        }
        Ok(Self { components })
    }

    /// Parses a dotted numeric version string
    ///
    /// Non-numeric components are an error, never silently coerced to
    /// zero.
    pub fn parse(text: &str) -> Result<Self, VersionParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(VersionParseError::Empty);
        }

        let mut components = Vec::new();
        for part in text.split('.') {
            let value: u64 =
                part.parse()
                    .map_err(|_| VersionParseError::InvalidComponent {
                        component: part.to_string(),
                    })?;
            components.push(value);
        }

        Self::new(components)
    }

    /// Returns the version components, most significant first
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Renders the components joined by underscores, for use in the
    /// destination filename (`560.10` becomes `560_10`)
    pub fn underscored(&self) -> String {
        self.components
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join("_")
    }
}

/// Decides whether the remote version warrants a download
///
/// An absent local version (no driver installed) always upgrades.
pub fn should_upgrade(local: Option<&DriverVersion>, remote: &DriverVersion) -> bool {
    match local {
        Some(local) => remote > local,
        None => true,
    }
}

impl FromStr for DriverVersion {
    type Err = VersionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DriverVersion::parse(s)
    }
}

impl fmt::Display for DriverVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dotted = self
            .components
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(".");
        write!(f, "{}", dotted)
    }
}

impl Ord for DriverVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.components.len().max(other.components.len());
        for i in 0..len {
            let a = self.components.get(i).copied().unwrap_or(0);
            let b = other.components.get(i).copied().unwrap_or(0);
            match a.cmp(&b) {
                Ordering::Equal => continue,
                unequal => return unequal,
            }
        }
        Ordering::Equal
    }
}

impl PartialOrd for DriverVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for DriverVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for DriverVersion {}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(text: &str) -> DriverVersion {
        DriverVersion::parse(text).unwrap()
    }

    #[test]
    fn test_parse_two_components() {
        assert_eq!(v("12.34").components(), &[12, 34]);
    }

    #[test]
    fn test_parse_three_components() {
        assert_eq!(v("12.34.5").components(), &[12, 34, 5]);
    }

    #[test]
    fn test_parse_single_component() {
        assert_eq!(v("560").components(), &[560]);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(v(" 551.23\n").components(), &[551, 23]);
    }

    #[test]
    fn test_parse_leading_zero_component() {
        // "560.35.03" must not collide with "560.35.3" at parse time by
        // going through a float; both parse to the same components.
        assert_eq!(v("560.35.03").components(), &[560, 35, 3]);
    }

    #[test]
    fn test_parse_non_numeric_is_error() {
        assert_eq!(
            DriverVersion::parse("12.x"),
            Err(VersionParseError::InvalidComponent {
                component: "x".to_string()
            })
        );
    }

    #[test]
    fn test_parse_empty_is_error() {
        assert_eq!(DriverVersion::parse(""), Err(VersionParseError::Empty));
        assert_eq!(DriverVersion::parse("   "), Err(VersionParseError::Empty));
    }

    #[test]
    fn test_parse_trailing_dot_is_error() {
        assert!(matches!(
            DriverVersion::parse("12."),
            Err(VersionParseError::InvalidComponent { .. })
        ));
    }

    #[test]
    fn test_parse_negative_is_error() {
        assert!(matches!(
            DriverVersion::parse("-1.2"),
            Err(VersionParseError::InvalidComponent { .. })
        ));
    }

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(DriverVersion::new(vec![]), Err(VersionParseError::Empty));
    }

    #[test]
    fn test_display_round_trip() {
        assert_eq!(v("551.23").to_string(), "551.23");
        assert_eq!(v("560.35.3").to_string(), "560.35.3");
    }

    #[test]
    fn test_underscored() {
        assert_eq!(v("560.10").underscored(), "560_10");
        assert_eq!(v("551.23.5").underscored(), "551_23_5");
    }

    #[test]
    fn test_ordering_first_unequal_component_decides() {
        assert!(v("12.35") > v("12.34"));
        assert!(v("13.0") > v("12.99"));
        assert!(v("12.34") < v("12.34.1"));
    }

    #[test]
    fn test_ordering_multi_digit_minor() {
        // The float encoding would order 551.4 above 551.04 incorrectly
        // as equal; the component encoding keeps them distinct.
        assert!(v("551.4") != v("551.04"));
        assert!(v("551.4") < v("551.40"));
    }

    #[test]
    fn test_trailing_zero_equivalence() {
        assert_eq!(v("12.34"), v("12.34.0"));
        assert_eq!(v("12.34"), v("12.34.0.0"));
        assert_eq!(v("12"), v("12.0"));
    }

    #[test]
    fn test_compare_is_reflexive() {
        for text in ["1", "12.34", "551.23.5"] {
            assert_eq!(v(text).cmp(&v(text)), Ordering::Equal);
        }
    }

    #[test]
    fn test_compare_is_antisymmetric() {
        let a = v("551.23");
        let b = v("551.24");
        assert_eq!(a.cmp(&b), Ordering::Less);
        assert_eq!(b.cmp(&a), Ordering::Greater);
    }

    #[test]
    fn test_compare_is_transitive() {
        let a = v("550.1");
        let b = v("551.0");
        let c = v("551.0.1");
        assert!(a < b);
        assert!(b < c);
        assert!(a < c);
    }

    #[test]
    fn test_should_upgrade_newer_remote() {
        assert!(should_upgrade(Some(&v("12.34")), &v("12.35")));
    }

    #[test]
    fn test_should_upgrade_equal_versions() {
        assert!(!should_upgrade(Some(&v("12.34")), &v("12.34")));
    }

    #[test]
    fn test_should_upgrade_trailing_zero_equivalence() {
        assert!(!should_upgrade(Some(&v("12.34")), &v("12.34.0")));
    }

    #[test]
    fn test_should_upgrade_older_remote() {
        assert!(!should_upgrade(Some(&v("12.35")), &v("12.34")));
    }

    #[test]
    fn test_should_upgrade_absent_local() {
        assert!(should_upgrade(None, &v("560.10")));
    }
}
