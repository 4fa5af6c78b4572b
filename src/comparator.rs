use std::fmt;

use crate::comparer::{cmp_chain, compare_label, ComparisonMode, VersionComparer};
use crate::error::Error;
use crate::version::{validate_identifier, Version};

/// Which trailing components of a reference version are treated as
/// wildcards (`x`/`*`) when matching a candidate.
///
/// A comparator like `1.2.x` floats the patch component: any patch value
/// satisfies it as long as major and minor match exactly. `Prerelease`
/// floats the release label list itself, matching any candidate whose
/// numeric core equals the reference and whose release labels start with
/// the reference's labels as a prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FloatBehavior {
    None,
    Major,
    Minor,
    Patch,
    Revision,
    Prerelease,
}

/// The relational operator carried by a single comparator, e.g. the `>=`
/// in `>=1.2.3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl Operator {
    fn as_str(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Lt => "<",
            Operator::Le => "<=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
        }
    }

    fn satisfied_by(self, signed_cmp: i32) -> bool {
        match self {
            Operator::Eq => signed_cmp == 0,
            Operator::Ne => signed_cmp != 0,
            Operator::Lt => signed_cmp < 0,
            Operator::Le => signed_cmp <= 0,
            Operator::Gt => signed_cmp > 0,
            Operator::Ge => signed_cmp >= 0,
        }
    }
}

/// A single version comparator: an operator plus a reference version, with
/// an optional floated component (`1.2.x`, `1.2.*`, `1.2.3-*`).
///
/// `VersionComparator` models exact and relational comparisons only; range
/// syntax (`~`, `^`, bracket and hyphen ranges, `||`/`&&`) is the domain of
/// [`crate::composite::CompositeComparator`].
#[derive(Debug, Clone)]
pub struct VersionComparator {
    pub operator: Operator,
    pub reference: Version,
    pub float: FloatBehavior,
    /// The release-label prefix a `Prerelease`-floated reference matches
    /// against (`1.2.3-alpha*` carries `Some("alpha")`; bare `1.2.3-*`
    /// carries `Some("")`, matching any prerelease). Always `None` for
    /// every other float behavior.
    pub release_prefix: Option<String>,
}

impl VersionComparator {
    pub fn try_parse(input: &str) -> Option<VersionComparator> {
        VersionComparator::parse(input).ok()
    }

    pub fn parse(input: &str) -> Result<VersionComparator, Error> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyInput);
        }

        let (operator, rest) = strip_operator(trimmed);
        let rest = strip_leading_v(rest);
        let (operator, rest) = apply_suffix_sugar(operator, rest);
        let (reference, float, release_prefix) = parse_floatable_reference(rest)?;

        Ok(VersionComparator {
            operator,
            reference,
            float,
            release_prefix,
        })
    }

    /// Reports whether `candidate` satisfies this comparator.
    pub fn matches(&self, candidate: &Version) -> bool {
        match self.float {
            FloatBehavior::None => {
                let cmp = VersionComparer::compare(candidate, &self.reference, ComparisonMode::VersionRelease);
                self.operator.satisfied_by(cmp)
            }
            // Non-`None`/`Prerelease` floats only ever admit stable candidates; a
            // prerelease candidate fails the comparator outright regardless of
            // operator (see the float-behavior table).
            FloatBehavior::Major => {
                if candidate.is_prerelease() {
                    return false;
                }
                self.operator.satisfied_by(0)
            }
            FloatBehavior::Minor => {
                if candidate.is_prerelease() {
                    return false;
                }
                let cmp = compare_u64(candidate.major, self.reference.major);
                self.operator.satisfied_by(cmp)
            }
            FloatBehavior::Patch => {
                if candidate.is_prerelease() {
                    return false;
                }
                let cmp = cmp_chain(&[
                    compare_u64(candidate.major, self.reference.major),
                    compare_u64(candidate.minor, self.reference.minor),
                ]);
                self.operator.satisfied_by(cmp)
            }
            FloatBehavior::Revision => {
                if candidate.is_prerelease() {
                    return false;
                }
                let cmp = cmp_chain(&[
                    compare_u64(candidate.major, self.reference.major),
                    compare_u64(candidate.minor, self.reference.minor),
                    compare_u64(candidate.patch, self.reference.patch),
                ]);
                self.operator.satisfied_by(cmp)
            }
            FloatBehavior::Prerelease => {
                let core_cmp = cmp_chain(&[
                    compare_u64(candidate.major, self.reference.major),
                    compare_u64(candidate.minor, self.reference.minor),
                    compare_u64(candidate.patch, self.reference.patch),
                    compare_u64(candidate.revision, self.reference.revision),
                ]);
                if core_cmp != 0 {
                    return self.operator.satisfied_by(core_cmp);
                }

                // Numerics match: a stable candidate never satisfies a floated
                // prerelease reference, no matter the operator.
                if !candidate.is_prerelease() {
                    return false;
                }

                let prefix: Vec<String> = match &self.release_prefix {
                    Some(p) if !p.is_empty() => p.split('.').map(|s| s.to_string()).collect(),
                    _ => Vec::new(),
                };

                if prefix_matches(&prefix, &candidate.release_labels) {
                    return matches!(self.operator, Operator::Eq | Operator::Le | Operator::Ge);
                }

                let cmp = compare_release_lists(&prefix, &candidate.release_labels);
                self.operator.satisfied_by(cmp)
            }
        }
    }
}

fn compare_u64(a: u64, b: u64) -> i32 {
    match a.cmp(&b) {
        std::cmp::Ordering::Less => -1,
        std::cmp::Ordering::Equal => 0,
        std::cmp::Ordering::Greater => 1,
    }
}

/// `prefix`'s labels form a case-insensitive prefix of `full`'s: every
/// float-prerelease comparator matches any candidate whose release labels
/// extend its own, ignoring ASCII case.
fn prefix_matches(prefix: &[String], full: &[String]) -> bool {
    if prefix.len() > full.len() {
        return false;
    }
    prefix.iter().zip(full.iter()).all(|(p, f)| p.eq_ignore_ascii_case(f))
}

/// Ordinal, case-sensitive comparison of two release-label lists, used as
/// the fallback when a float-prerelease reference is not a prefix of the
/// candidate. Named `prefix`-first to mirror the comparator's own reference
/// labels leading the comparison.
fn compare_release_lists(prefix: &[String], full: &[String]) -> i32 {
    for (p, f) in prefix.iter().zip(full.iter()) {
        let c = compare_label(p, f);
        if c != 0 {
            return -c;
        }
    }
    compare_u64(prefix.len() as u64, full.len() as u64) * -1
}

/// Strips a leading relational operator, trying longer prefixes first so
/// `==` and `<>` are not mistaken for `=` followed by stray text. Returns
/// `None` when no prefix matches, so the caller can distinguish "no operator
/// was written" (where the `+`/`-` suffix sugar still applies) from an
/// explicit `=`.
pub(crate) fn strip_operator(input: &str) -> (Option<Operator>, &str) {
    for (prefix, op) in [
        ("==", Operator::Eq),
        ("!=", Operator::Ne),
        ("<>", Operator::Ne),
        (">=", Operator::Ge),
        ("<=", Operator::Le),
        (">", Operator::Gt),
        ("<", Operator::Lt),
        ("=", Operator::Eq),
    ] {
        if let Some(rest) = input.strip_prefix(prefix) {
            return (Some(op), rest.trim_start());
        }
    }
    (None, input)
}

/// Applies the `+`/`-` trailing-suffix sugar (`1.2.3+` means `>=1.2.3`,
/// `1.2.3-` means `<=1.2.3`) when no operator prefix was found. A `None`
/// from [`strip_operator`] means the text could still carry one of these
/// suffixes; anything else keeps its explicit operator untouched.
fn apply_suffix_sugar(operator: Option<Operator>, rest: &str) -> (Operator, &str) {
    match operator {
        Some(op) => (op, rest),
        None => {
            if let Some(stripped) = rest.strip_suffix('+') {
                (Operator::Ge, stripped)
            } else if let Some(stripped) = rest.strip_suffix('-') {
                (Operator::Le, stripped)
            } else {
                (Operator::Eq, rest)
            }
        }
    }
}

pub(crate) fn strip_leading_v(input: &str) -> &str {
    input
        .strip_prefix('v')
        .or_else(|| input.strip_prefix('V'))
        .unwrap_or(input)
}

/// Parses a version that may carry a wildcard marker (`x`, `X`, or `*`) in
/// place of one or more trailing numeric components, or a `-*`/`-<prefix>*`
/// release wildcard suffix, returning the concrete reference, which
/// component floated, and (for a `Prerelease` float) the release-label
/// prefix text the candidate's own labels must start with.
pub(crate) fn parse_floatable_reference(
    input: &str,
) -> Result<(Version, FloatBehavior, Option<String>), Error> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(Error::EmptyInput);
    }

    if let Some(without_star) = trimmed.strip_suffix('*') {
        if let Some(dash_i) = without_star.find('-') {
            let core_text = &without_star[..dash_i];
            let prefix_text = &without_star[dash_i + 1..];
            if !prefix_text.is_empty() {
                for id in prefix_text.split('.') {
                    validate_identifier(id, false, "release identifier")?;
                }
            }
            let version = Version::parse(core_text)?;
            return Ok((version, FloatBehavior::Prerelease, Some(prefix_text.to_string())));
        }
    }

    let is_wild = |s: &str| s == "x" || s == "X" || s == "*";

    let dash_pos = trimmed.find('-');
    let core_text = match dash_pos {
        Some(i) => &trimmed[..i],
        None => trimmed,
    };
    let core_fields: Vec<&str> = core_text.split('.').collect();

    let wild_index = core_fields.iter().position(|f| is_wild(f));

    match wild_index {
        None => {
            let version = Version::parse(trimmed)?;
            Ok((version, FloatBehavior::None, None))
        }
        Some(idx) => {
            if dash_pos.is_some() || core_fields[idx + 1..].iter().any(|f| !is_wild(f)) {
                return Err(Error::invalid("floated version", trimmed));
            }

            let concrete: Vec<&str> = core_fields[..idx].to_vec();
            let behavior = match idx {
                0 => FloatBehavior::Major,
                1 => FloatBehavior::Minor,
                2 => FloatBehavior::Patch,
                3 => FloatBehavior::Revision,
                _ => return Err(Error::invalid("floated version", trimmed)),
            };

            let core_joined = if concrete.is_empty() {
                "0".to_string()
            } else {
                concrete.join(".")
            };

            let version = Version::parse(&core_joined)?;
            Ok((version, behavior, None))
        }
    }
}

impl fmt::Display for VersionComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.float {
            FloatBehavior::None => write!(f, "{}{}", self.operator.as_str(), self.reference),
            FloatBehavior::Major => write!(f, "{}x", self.operator.as_str()),
            FloatBehavior::Minor => write!(f, "{}{}.x", self.operator.as_str(), self.reference.major),
            FloatBehavior::Patch => write!(
                f,
                "{}{}.{}.x",
                self.operator.as_str(),
                self.reference.major,
                self.reference.minor
            ),
            FloatBehavior::Revision => write!(
                f,
                "{}{}.{}.{}.x",
                self.operator.as_str(),
                self.reference.major,
                self.reference.minor,
                self.reference.patch
            ),
            FloatBehavior::Prerelease => write!(
                f,
                "{}{}-{}*",
                self.operator.as_str(),
                self.reference.format("V"),
                self.release_prefix.as_deref().unwrap_or("")
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn parses_bare_exact_comparator() {
        let c = VersionComparator::parse("1.2.3").unwrap();
        assert_eq!(c.operator, Operator::Eq);
        assert!(c.matches(&v("1.2.3")));
        assert!(!c.matches(&v("1.2.4")));
    }

    #[test]
    fn parses_relational_operators() {
        let c = VersionComparator::parse(">=1.2.3").unwrap();
        assert!(c.matches(&v("1.2.3")));
        assert!(c.matches(&v("1.2.4")));
        assert!(!c.matches(&v("1.2.2")));
    }

    #[test]
    fn strips_leading_v() {
        let c = VersionComparator::parse("v1.2.3").unwrap();
        assert_eq!(c.reference.major, 1);
    }

    #[test]
    fn minor_float_matches_any_patch() {
        let c = VersionComparator::parse("=1.2.x").unwrap();
        assert!(c.matches(&v("1.2.0")));
        assert!(c.matches(&v("1.2.99")));
        assert!(!c.matches(&v("1.3.0")));
    }

    #[test]
    fn major_float_matches_any_minor_patch() {
        let c = VersionComparator::parse("=x").unwrap();
        assert!(c.matches(&v("0.0.0")));
        assert!(c.matches(&v("9.9.9")));
    }

    #[test]
    fn prerelease_float_matches_prefixed_labels() {
        let c = VersionComparator::parse("=1.2.3-*").unwrap();
        assert!(c.matches(&v("1.2.3-alpha")));
        assert!(c.matches(&v("1.2.3-alpha.1")));
        assert!(!c.matches(&v("1.2.3")));
        assert!(!c.matches(&v("1.2.4-alpha")));
    }

    #[test]
    fn rejects_wildcard_before_concrete_component() {
        assert!(VersionComparator::parse("1.x.3").is_err());
    }

    #[test]
    fn prerelease_float_with_label_prefix_matches_extensions_of_it() {
        let c = VersionComparator::parse("=1.2.3-alpha*").unwrap();
        assert_eq!(c.release_prefix.as_deref(), Some("alpha"));
        assert!(c.matches(&v("1.2.3-alpha")));
        assert!(c.matches(&v("1.2.3-alpha.1")));
        assert!(!c.matches(&v("1.2.3-beta")));
        assert!(!c.matches(&v("1.2.3")));
        assert!(!c.matches(&v("1.2.4-alpha")));
    }

    #[test]
    fn prerelease_float_prefix_is_case_insensitive() {
        let c = VersionComparator::parse("=1.2.3-ALPHA*").unwrap();
        assert!(c.matches(&v("1.2.3-alpha")));
        assert!(c.matches(&v("1.2.3-Alpha.2")));
    }

    #[test]
    fn prerelease_float_with_dotted_prefix() {
        let c = VersionComparator::parse("=1.2.3-alpha.1*").unwrap();
        assert_eq!(c.release_prefix.as_deref(), Some("alpha.1"));
        assert!(c.matches(&v("1.2.3-alpha.1")));
        assert!(c.matches(&v("1.2.3-alpha.1.rc")));
        assert!(!c.matches(&v("1.2.3-alpha.2")));
    }

    #[test]
    fn accepts_double_equals_and_diamond_operators() {
        let eq = VersionComparator::parse("==1.2.3").unwrap();
        assert_eq!(eq.operator, Operator::Eq);
        let ne = VersionComparator::parse("<>1.2.3").unwrap();
        assert_eq!(ne.operator, Operator::Ne);
        assert!(ne.matches(&v("1.2.4")));
        assert!(!ne.matches(&v("1.2.3")));
    }

    #[test]
    fn trailing_plus_and_minus_are_operator_sugar() {
        let ge = VersionComparator::parse("1.2.3+").unwrap();
        assert_eq!(ge.operator, Operator::Ge);
        assert!(ge.matches(&v("1.2.3")));
        assert!(ge.matches(&v("1.2.4")));
        assert!(!ge.matches(&v("1.2.2")));

        let le = VersionComparator::parse("1.2.3-").unwrap();
        assert_eq!(le.operator, Operator::Le);
        assert!(le.matches(&v("1.2.3")));
        assert!(!le.matches(&v("1.2.4")));
    }

    #[test]
    fn suffix_sugar_does_not_apply_when_operator_prefix_present() {
        let c = VersionComparator::parse(">=1.2.3").unwrap();
        assert_eq!(c.operator, Operator::Ge);
        assert_eq!(c.reference.major, 1);
    }

    #[test]
    fn non_prerelease_floats_reject_prerelease_candidates() {
        let minor = VersionComparator::parse("=1.x").unwrap();
        assert!(!minor.matches(&v("1.5.0-alpha")));
        let major = VersionComparator::parse("=x").unwrap();
        assert!(!major.matches(&v("9.9.9-rc.1")));
    }
}
