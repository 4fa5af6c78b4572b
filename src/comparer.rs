use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::version::Version;

/// How strictly two [`Version`] values are compared.
///
/// The three modes form an ascending strictness chain: each widens the set
/// of fields considered significant, so a pair equal under a stricter mode
/// is also equal under every looser one, but not vice versa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparisonMode {
    /// Compare numeric core components only; release labels and metadata
    /// are ignored entirely.
    Version,
    /// Compare the numeric core and release labels. This is the mode used
    /// by `Version`'s own `Ord`/`Eq`/`Hash` implementations.
    VersionRelease,
    /// Compare the numeric core, release labels, and build metadata.
    VersionReleaseMetadata,
}

impl Default for ComparisonMode {
    fn default() -> Self {
        ComparisonMode::VersionRelease
    }
}

/// Stateless comparison and hashing for [`Version`], parameterized by a
/// [`ComparisonMode`].
///
/// A single `Hash` implementation cannot vary at runtime, so mode-aware
/// hashing lives here as an associated function rather than on `Version`
/// itself; callers who need a `HashMap` keyed by a non-default mode should
/// hash via [`VersionComparer::hash`] and use the result as the key.
pub struct VersionComparer;

impl VersionComparer {
    /// Returns negative/zero/positive as `a` is less than, equal to, or
    /// greater than `b` under `mode`.
    pub fn compare(a: &Version, b: &Version, mode: ComparisonMode) -> i32 {
        let core = cmp_chain(&[
            compare_u64(a.major, b.major),
            compare_u64(a.minor, b.minor),
            compare_u64(a.patch, b.patch),
            compare_u64(a.revision, b.revision),
        ]);

        if core != 0 {
            return core;
        }

        if mode == ComparisonMode::Version {
            return 0;
        }

        let release = compare_release(&a.release_labels, &b.release_labels);
        if release != 0 || mode == ComparisonMode::VersionRelease {
            return release;
        }

        compare_metadata(&a.metadata, &b.metadata)
    }

    pub fn equals(a: &Version, b: &Version, mode: ComparisonMode) -> bool {
        VersionComparer::compare(a, b, mode) == 0
    }

    /// A hash consistent with [`VersionComparer::equals`] under the same
    /// `mode`: two versions equal under `mode` always hash equal under it.
    pub fn hash(v: &Version, mode: ComparisonMode) -> u64 {
        let mut hasher = DefaultHasher::new();
        v.major.hash(&mut hasher);
        v.minor.hash(&mut hasher);
        v.patch.hash(&mut hasher);
        v.revision.hash(&mut hasher);

        if mode != ComparisonMode::Version {
            hash_ascii_lowercase(&v.release_labels, &mut hasher);
        }
        if mode == ComparisonMode::VersionReleaseMetadata {
            hash_ascii_lowercase(&v.metadata, &mut hasher);
        }

        hasher.finish()
    }
}

/// Hashes an identifier list the same way it is compared: case-insensitively.
/// Hashing the raw strings would let two labels equal under
/// [`compare_label`]/[`compare_metadata`] (e.g. `"Alpha"` and `"alpha"`) hash
/// differently, breaking the `Eq`/`Hash` contract.
fn hash_ascii_lowercase(labels: &[String], hasher: &mut DefaultHasher) {
    labels.len().hash(hasher);
    for label in labels {
        label.to_ascii_lowercase().hash(hasher);
    }
}

pub(crate) fn compare_u64(a: u64, b: u64) -> i32 {
    match a.cmp(&b) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// Returns the first non-zero entry in `results`, or `0` if every
/// comparison in the chain was equal. A free function rather than a
/// `.then()` chain since our signed comparisons are plain `i32`, not
/// `std::cmp::Ordering`.
pub(crate) fn cmp_chain(results: &[i32]) -> i32 {
    for &r in results {
        if r != 0 {
            return r;
        }
    }
    0
}

/// A present release label set sorts before an absent one (a prerelease
/// precedes its corresponding stable release), and otherwise labels compare
/// identifier-by-identifier: numeric identifiers compare numerically,
/// alphanumeric ones lexically, numeric always sorting lower than
/// alphanumeric, with the longer label winning ties on a common prefix.
fn compare_release(a: &[String], b: &[String]) -> i32 {
    match (a.is_empty(), b.is_empty()) {
        (true, true) => return 0,
        (true, false) => return 1,
        (false, true) => return -1,
        (false, false) => {}
    }

    for (x, y) in a.iter().zip(b.iter()) {
        let c = compare_label(x, y);
        if c != 0 {
            return c;
        }
    }

    compare_u64(a.len() as u64, b.len() as u64)
}

pub(crate) fn compare_label(a: &str, b: &str) -> i32 {
    let a_numeric = is_numeric_label(a);
    let b_numeric = is_numeric_label(b);

    match (a_numeric, b_numeric) {
        (true, true) => {
            let a_val: u128 = a.parse().unwrap_or(0);
            let b_val: u128 = b.parse().unwrap_or(0);
            compare_u64(a_val as u64, b_val as u64)
        }
        (true, false) => -1,
        (false, true) => 1,
        (false, false) => match a.to_ascii_lowercase().cmp(&b.to_ascii_lowercase()) {
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
            std::cmp::Ordering::Greater => 1,
        },
    }
}

fn is_numeric_label(label: &str) -> bool {
    !label.is_empty() && label.chars().all(|c| c.is_ascii_digit())
}

/// Metadata carries no ordering significance per se, but still needs a
/// deterministic tiebreak under `VersionReleaseMetadata` so that `Ord`
/// remains a total order: case-insensitive lexical comparison of the
/// joined identifiers.
fn compare_metadata(a: &[String], b: &[String]) -> i32 {
    let a_joined = a.join(".").to_ascii_lowercase();
    let b_joined = b.join(".").to_ascii_lowercase();
    match a_joined.cmp(&b_joined) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn version_mode_ignores_release_and_metadata() {
        let a = v("1.2.3-alpha+x");
        let b = v("1.2.3-beta+y");
        assert_eq!(VersionComparer::compare(&a, &b, ComparisonMode::Version), 0);
        assert_ne!(VersionComparer::compare(&a, &b, ComparisonMode::VersionRelease), 0);
    }

    #[test]
    fn version_release_mode_ignores_metadata() {
        let a = v("1.2.3-alpha+x");
        let b = v("1.2.3-alpha+y");
        assert_eq!(VersionComparer::compare(&a, &b, ComparisonMode::VersionRelease), 0);
        assert_ne!(
            VersionComparer::compare(&a, &b, ComparisonMode::VersionReleaseMetadata),
            0
        );
    }

    #[test]
    fn prerelease_precedes_stable() {
        let pre = v("1.0.0-rc.1");
        let stable = v("1.0.0");
        assert!(VersionComparer::compare(&pre, &stable, ComparisonMode::VersionRelease) < 0);
    }

    #[test]
    fn numeric_labels_compare_numerically() {
        assert!(compare_label("2", "10") < 0);
        assert!(compare_label("10", "2") > 0);
    }

    #[test]
    fn numeric_labels_sort_before_alphanumeric() {
        assert!(compare_label("9", "alpha") < 0);
        assert!(compare_label("alpha", "9") > 0);
    }

    #[test]
    fn longer_label_list_wins_on_common_prefix() {
        let a = v("1.0.0-alpha");
        let b = v("1.0.0-alpha.1");
        assert!(VersionComparer::compare(&a, &b, ComparisonMode::VersionRelease) < 0);
    }

    #[test]
    fn non_numeric_labels_compare_case_insensitively() {
        assert_eq!(compare_label("Alpha", "alpha"), 0);
        assert!(compare_label("Alpha", "beta") < 0);
        let a = v("1.0.0-Alpha");
        let b = v("1.0.0-alpha");
        assert_eq!(VersionComparer::compare(&a, &b, ComparisonMode::VersionRelease), 0);
        assert_eq!(a, b);
        assert_eq!(
            VersionComparer::hash(&a, ComparisonMode::VersionRelease),
            VersionComparer::hash(&b, ComparisonMode::VersionRelease)
        );
    }

    #[test]
    fn metadata_compares_case_insensitively() {
        let a = v("1.0.0+BUILD");
        let b = v("1.0.0+build");
        assert_eq!(
            VersionComparer::compare(&a, &b, ComparisonMode::VersionReleaseMetadata),
            0
        );
    }

    #[test]
    fn hash_matches_equality_under_mode() {
        let a = v("1.2.3-alpha+x");
        let b = v("1.2.3-alpha+y");
        assert_eq!(
            VersionComparer::hash(&a, ComparisonMode::VersionRelease),
            VersionComparer::hash(&b, ComparisonMode::VersionRelease)
        );
    }
}
