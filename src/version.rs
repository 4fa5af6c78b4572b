use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use crate::comparer::{ComparisonMode, VersionComparer};
use crate::error::Error;

/// A parsed semantic version: `major.minor.patch[.revision][-release][+metadata]`.
///
/// `revision` is a four-part extension beyond strict SemVer 2.0; it defaults
/// to zero and is only emitted by [`Version::format`] when positive.
///
/// Two versions parsed from equivalent text are equal, ordered, and hashed
/// under the default [`ComparisonMode::VersionRelease`] mode - see
/// [`VersionComparer`] for the other modes.
///
/// ```
/// use verspec::Version;
///
/// let version = Version::parse("1.2.3-alpha.1+build.5").unwrap();
/// assert_eq!(version.major, 1);
/// assert!(version.is_prerelease());
/// assert_eq!(version.format("N"), "1.2.3-alpha.1+build.5");
/// ```
#[derive(Debug, Clone)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub revision: u64,
    pub release_labels: Vec<String>,
    pub metadata: Vec<String>,
}

impl Default for Version {
    fn default() -> Self {
        Version {
            major: 0,
            minor: 0,
            patch: 0,
            revision: 0,
            release_labels: Vec::new(),
            metadata: Vec::new(),
        }
    }
}

impl Version {
    /// Parses `input`, returning `None` rather than an error on malformed text.
    pub fn try_parse(input: &str) -> Option<Version> {
        Version::parse(input).ok()
    }

    /// Parses `input` according to the grammar in the crate's top-level docs.
    pub fn parse(input: &str) -> Result<Version, Error> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyInput);
        }

        // A `-` only starts the release section when it appears before the
        // first `+`; metadata identifiers may themselves contain `-`
        // (`[0-9A-Za-z-]+`), so a hyphen found only inside the metadata
        // section must not be mistaken for the release separator.
        let plus_idx = trimmed.find('+');
        let search_region = match plus_idx {
            Some(j) => &trimmed[..j],
            None => trimmed,
        };
        let dash_idx = search_region.find('-');

        let (core_part, release_part, metadata_part): (&str, Option<&str>, Option<&str>) = match dash_idx {
            Some(i) => match plus_idx {
                Some(j) => (&trimmed[..i], Some(&trimmed[i + 1..j]), Some(&trimmed[j + 1..])),
                None => (&trimmed[..i], Some(&trimmed[i + 1..]), None),
            },
            None => match plus_idx {
                Some(j) => (&trimmed[..j], None, Some(&trimmed[j + 1..])),
                None => (trimmed, None, None),
            },
        };

        if let Some(r) = release_part {
            if r.is_empty() {
                return Err(Error::invalid("release section", ""));
            }
        }
        if let Some(m) = metadata_part {
            if m.is_empty() {
                return Err(Error::invalid("metadata section", ""));
            }
        }

        let (major, minor, patch, revision) = parse_numeric_core(core_part)?;

        let release_labels = match release_part {
            Some(r) => {
                let mut labels = Vec::new();
                for id in r.split('.') {
                    validate_identifier(id, false, "release identifier")?;
                    labels.push(id.to_string());
                }
                labels
            }
            None => Vec::new(),
        };

        let metadata = match metadata_part {
            Some(m) => {
                let mut parts = Vec::new();
                for id in m.split('.') {
                    validate_identifier(id, true, "metadata identifier")?;
                    parts.push(id.to_string());
                }
                parts
            }
            None => Vec::new(),
        };

        Ok(Version {
            major,
            minor,
            patch,
            revision,
            release_labels,
            metadata,
        })
    }

    pub fn is_prerelease(&self) -> bool {
        !self.release_labels.is_empty()
    }

    pub fn has_metadata(&self) -> bool {
        !self.metadata.is_empty()
    }

    /// Formats this version using a small mini-language: `N` for the full
    /// normalized string, `V` for the numeric core, `R`/`M` for the joined
    /// release/metadata text, and `x`/`y`/`z`/`r` for the individual numeric
    /// components. Any other character passes through literally.
    pub fn format(&self, spec: &str) -> String {
        let mut out = String::new();
        for ch in spec.chars() {
            match ch {
                'N' => out.push_str(&self.normalized()),
                'V' => out.push_str(&self.numeric_core()),
                'R' => out.push_str(&self.release_labels.join(".")),
                'M' => out.push_str(&self.metadata.join(".")),
                'x' => out.push_str(&self.major.to_string()),
                'y' => out.push_str(&self.minor.to_string()),
                'z' => out.push_str(&self.patch.to_string()),
                'r' => out.push_str(&self.revision.to_string()),
                other => out.push(other),
            }
        }
        out
    }

    fn numeric_core(&self) -> String {
        if self.revision > 0 {
            format!("{}.{}.{}.{}", self.major, self.minor, self.patch, self.revision)
        } else {
            format!("{}.{}.{}", self.major, self.minor, self.patch)
        }
    }

    fn normalized(&self) -> String {
        let mut s = self.numeric_core();
        if self.is_prerelease() {
            s.push('-');
            s.push_str(&self.release_labels.join("."));
        }
        if self.has_metadata() {
            s.push('+');
            s.push_str(&self.metadata.join("."));
        }
        s
    }
}

/// Parses a 1-4 part dot-separated non-negative integer core, defaulting any
/// missing trailing component to zero (rule 3 of the version grammar: a bare
/// `"5"` parses the same as `"5.0"`).
pub(crate) fn parse_numeric_core(core: &str) -> Result<(u64, u64, u64, u64), Error> {
    if core.is_empty() {
        return Err(Error::invalid("version core", core));
    }

    let fields: Vec<&str> = core.split('.').collect();
    if fields.is_empty() || fields.len() > 4 || fields.iter().any(|f| f.is_empty()) {
        return Err(Error::invalid("version core", core));
    }

    let mut nums = [0u64; 4];
    for (i, f) in fields.iter().enumerate() {
        nums[i] = parse_core_part(f)?;
    }

    Ok((nums[0], nums[1], nums[2], nums[3]))
}

pub(crate) fn parse_core_part(part: &str) -> Result<u64, Error> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(Error::invalid("version core component", part));
    }
    if part.len() > 1 && part.starts_with('0') {
        return Err(Error::invalid("version core component", part));
    }
    part.parse::<u64>()
        .map_err(|_| Error::out_of_range("version core component", part))
}

pub(crate) fn validate_identifier(part: &str, allow_leading_zero: bool, context: &'static str) -> Result<(), Error> {
    if part.is_empty() {
        return Err(Error::invalid(context, part));
    }
    if !part.is_ascii() {
        return Err(Error::invalid(context, part));
    }
    if !part.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
        return Err(Error::invalid(context, part));
    }
    if !allow_leading_zero {
        let is_numeric = part.chars().all(|c| c.is_ascii_digit());
        if is_numeric && part.len() > 1 && part.starts_with('0') {
            return Err(Error::invalid(context, part));
        }
    }
    Ok(())
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Version::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.normalized())
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        VersionComparer::compare(self, other, ComparisonMode::VersionRelease) == 0
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        match VersionComparer::compare(self, other, ComparisonMode::VersionRelease) {
            n if n < 0 => Ordering::Less,
            n if n > 0 => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }
}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(VersionComparer::hash(self, ComparisonMode::VersionRelease));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_version() {
        let version = Version::parse("1").unwrap();
        assert_eq!(version.major, 1);
        assert_eq!(version.minor, 0);
        assert_eq!(version.patch, 0);
        assert_eq!(version.revision, 0);
    }

    #[test]
    fn parses_four_part_version() {
        let version = Version::parse("1.2.3.4").unwrap();
        assert_eq!((version.major, version.minor, version.patch, version.revision), (1, 2, 3, 4));
        assert_eq!(version.format("N"), "1.2.3.4");
    }

    #[test]
    fn round_trips_release_and_metadata() {
        let version = Version::parse("1.2.3-X.yZ.3+METADATA").unwrap();
        assert_eq!(version.format("N"), "1.2.3-X.yZ.3+METADATA");
        assert_eq!(Version::parse(&version.format("N")).unwrap(), version);
    }

    #[test]
    fn revision_zero_is_not_emitted() {
        let version = Version::parse("1.2.3.0").unwrap();
        assert_eq!(version.format("N"), "1.2.3");
    }

    #[test]
    fn rejects_leading_zero_in_core() {
        assert!(Version::parse("1.02.3").is_err());
        assert!(Version::try_parse("1.02.3").is_none());
    }

    #[test]
    fn rejects_leading_zero_in_numeric_release_label() {
        assert!(Version::parse("1.0.0-01").is_err());
        assert!(Version::parse("1.0.0-0").is_ok());
    }

    #[test]
    fn allows_leading_zero_in_metadata() {
        let version = Version::parse("1.0.0+007").unwrap();
        assert_eq!(version.metadata, vec!["007".to_string()]);
    }

    #[test]
    fn rejects_non_ascii_identifiers() {
        assert!(Version::parse("1.0.0-résumé").is_err());
        assert!(Version::parse("1.0.0+résumé").is_err());
    }

    #[test]
    fn rejects_trailing_separators() {
        assert!(Version::parse("1.0.0-").is_err());
        assert!(Version::parse("1.0.0+").is_err());
        assert!(Version::parse("1.0.0-alpha+").is_err());
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(Version::parse("").unwrap_err(), Error::EmptyInput);
        assert_eq!(Version::parse("   ").unwrap_err(), Error::EmptyInput);
    }

    #[test]
    fn format_mini_language() {
        let version = Version::parse("1.2.3-alpha.1+build").unwrap();
        assert_eq!(version.format("V"), "1.2.3");
        assert_eq!(version.format("R"), "alpha.1");
        assert_eq!(version.format("M"), "build");
        assert_eq!(version.format("x.y.z"), "1.2.3");
    }

    #[test]
    fn prerelease_sorts_before_stable() {
        let pre = Version::parse("1.2.3-alpha").unwrap();
        let stable = Version::parse("1.2.3").unwrap();
        assert!(pre < stable);
    }

    #[test]
    fn hyphen_inside_metadata_does_not_start_a_release_section() {
        let version = Version::parse("2.3.4+build-5").unwrap();
        assert!(!version.is_prerelease());
        assert_eq!(version.metadata, vec!["build-5".to_string()]);
        assert_eq!(version.format("N"), "2.3.4+build-5");
    }

    #[test]
    fn hyphen_before_plus_still_starts_release_section() {
        let version = Version::parse("1.2.3-alpha-1+build-5").unwrap();
        assert_eq!(version.release_labels, vec!["alpha-1".to_string()]);
        assert_eq!(version.metadata, vec!["build-5".to_string()]);
    }
}
