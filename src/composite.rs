use std::fmt;

use crate::comparator::{strip_leading_v, FloatBehavior, Operator, VersionComparator};
use crate::error::Error;
use crate::version::Version;

/// How two comparators inside a [`CompositeComparator`] combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Compositor {
    And,
    Or,
}

/// A node in a composite range expression tree: either a leaf comparator or
/// a nested sub-expression, so that `1.0.0 || (2.0.0 && <3.0.0)` can be
/// represented without flattening precedence.
#[derive(Debug, Clone)]
pub enum Comparator {
    Single(VersionComparator),
    Composite(Box<CompositeComparator>),
}

impl Comparator {
    fn matches(&self, candidate: &Version) -> bool {
        match self {
            Comparator::Single(c) => c.matches(candidate),
            Comparator::Composite(c) => c.matches(candidate),
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Comparator::Single(c) => write!(f, "{}", c),
            Comparator::Composite(c) => write!(f, "({})", c),
        }
    }
}

/// A range expression built from [`VersionComparator`] leaves joined by
/// `&&`/`||`, parsed from NuGet/npm-style range syntax: bracket ranges
/// (`[1.0,2.0)`), hyphen ranges (`1.0 - 2.0`), tilde (`~1.2.3`), caret
/// (`^1.2.3`), and parenthesized sub-expressions.
#[derive(Debug, Clone)]
pub struct CompositeComparator {
    pub compositor: Compositor,
    pub comparators: Vec<Comparator>,
}

impl CompositeComparator {
    pub fn try_parse(input: &str) -> Option<CompositeComparator> {
        CompositeComparator::parse(input).ok()
    }

    pub fn parse(input: &str) -> Result<CompositeComparator, Error> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyInput);
        }
        parse_or(trimmed)
    }

    /// Reports whether `candidate` satisfies every branch required by this
    /// node's compositor.
    pub fn matches(&self, candidate: &Version) -> bool {
        match self.compositor {
            Compositor::And => self.comparators.iter().all(|c| c.matches(candidate)),
            Compositor::Or => self.comparators.iter().any(|c| c.matches(candidate)),
        }
    }
}

impl PartialEq for CompositeComparator {
    /// Structural equality treats the comparator list as a multiset: order
    /// does not change what a range expression matches.
    fn eq(&self, other: &Self) -> bool {
        if self.compositor != other.compositor || self.comparators.len() != other.comparators.len() {
            return false;
        }
        let self_text: Vec<String> = self.comparators.iter().map(|c| c.to_string()).collect();
        let mut other_text: Vec<String> = other.comparators.iter().map(|c| c.to_string()).collect();
        for s in &self_text {
            match other_text.iter().position(|o| o == s) {
                Some(idx) => {
                    other_text.remove(idx);
                }
                None => return false,
            }
        }
        other_text.is_empty()
    }
}

impl fmt::Display for CompositeComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sep = match self.compositor {
            Compositor::And => " && ",
            Compositor::Or => " || ",
        };
        let parts: Vec<String> = self.comparators.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(sep))
    }
}

fn and2(a: VersionComparator, b: VersionComparator) -> CompositeComparator {
    CompositeComparator {
        compositor: Compositor::And,
        comparators: vec![Comparator::Single(a), Comparator::Single(b)],
    }
}

fn single(c: CompositeComparator) -> CompositeComparator {
    if c.comparators.len() == 1 {
        if let Comparator::Composite(inner) = &c.comparators[0] {
            return (**inner).clone();
        }
    }
    c
}

fn parse_or(input: &str) -> Result<CompositeComparator, Error> {
    let parts = split_top_level(input, "||");
    if parts.len() > 1 {
        let mut comparators = Vec::with_capacity(parts.len());
        for part in parts {
            comparators.push(Comparator::Composite(Box::new(parse_and(part.trim())?)));
        }
        return Ok(single(CompositeComparator {
            compositor: Compositor::Or,
            comparators,
        }));
    }
    parse_and(input)
}

fn parse_and(input: &str) -> Result<CompositeComparator, Error> {
    let trimmed = input.trim();

    if let Some(range) = try_parse_bracket_range(trimmed)? {
        return Ok(range);
    }
    if let Some(range) = try_parse_hyphen_range(trimmed)? {
        return Ok(range);
    }
    if let Some(range) = try_parse_tilde(trimmed)? {
        return Ok(range);
    }
    if let Some(range) = try_parse_caret(trimmed)? {
        return Ok(range);
    }

    if is_fully_parenthesized(trimmed) {
        return parse_or(&trimmed[1..trimmed.len() - 1]);
    }

    let explicit = split_top_level(trimmed, "&&");
    let atoms: Vec<&str> = if explicit.len() > 1 {
        explicit
    } else {
        split_whitespace_top_level(trimmed)
    };

    if atoms.len() <= 1 {
        let comparator = parse_atom(trimmed)?;
        return Ok(CompositeComparator {
            compositor: Compositor::And,
            comparators: vec![comparator],
        });
    }

    let mut comparators = Vec::with_capacity(atoms.len());
    for atom in atoms {
        comparators.push(parse_atom(atom.trim())?);
    }
    Ok(CompositeComparator {
        compositor: Compositor::And,
        comparators,
    })
}

fn parse_atom(input: &str) -> Result<Comparator, Error> {
    let trimmed = input.trim();
    if is_fully_parenthesized(trimmed) {
        return Ok(Comparator::Composite(Box::new(parse_or(&trimmed[1..trimmed.len() - 1])?)));
    }
    Ok(Comparator::Single(VersionComparator::parse(trimmed)?))
}

/// Splits `input` on every top-level occurrence of `needle`, tracking
/// parenthesis and bracket depth so operators inside a nested range or
/// sub-expression are not mistaken for a split point.
pub(crate) fn split_top_level<'a>(input: &'a str, needle: &str) -> Vec<&'a str> {
    let bytes = input.as_bytes();
    let needle_bytes = needle.as_bytes();
    let mut depth = 0i32;
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth -= 1,
            _ => {}
        }
        if depth == 0 && input[i..].starts_with(needle) && !needle_bytes.is_empty() {
            parts.push(&input[start..i]);
            i += needle_bytes.len();
            start = i;
            continue;
        }
        i += 1;
    }
    parts.push(&input[start..]);

    if parts.len() > 1 {
        parts
    } else {
        split_top_level_at_depth(input, needle)
    }
}

/// Fallback splitter ignoring parenthesis depth entirely, used when a
/// depth-aware split finds nothing - some inputs legitimately have
/// unbalanced-looking bracket text inside a single hyphen range.
fn split_top_level_at_depth(input: &str, needle: &str) -> Vec<&str> {
    if needle.is_empty() {
        return vec![input];
    }
    input.split(needle).collect()
}

fn split_whitespace_top_level(input: &str) -> Vec<&str> {
    let bytes = input.as_bytes();
    let mut depth = 0i32;
    let mut parts = Vec::new();
    let mut start: Option<usize> = None;

    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' | b'[' => depth += 1,
            b')' | b']' => depth -= 1,
            _ => {}
        }
        if depth == 0 && b == b' ' {
            if let Some(s) = start.take() {
                parts.push(&input[s..i]);
            }
        } else if start.is_none() {
            start = Some(i);
        }
    }
    if let Some(s) = start {
        parts.push(&input[s..]);
    }
    parts
}

fn is_fully_parenthesized(input: &str) -> bool {
    if !input.starts_with('(') || !input.ends_with(')') {
        return false;
    }
    let bytes = input.as_bytes();
    let mut depth = 0i32;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'(' => depth += 1,
            b')' => depth -= 1,
            _ => {}
        }
        if depth == 0 && i != bytes.len() - 1 {
            return false;
        }
    }
    depth == 0
}

/// Parses `[lo,hi]`, `[lo,hi)`, `(lo,hi]`, `(lo,hi)`, and one-sided forms
/// like `[1.0,)` or `(,2.0)`, where `[`/`]` are inclusive and `(`/`)` are
/// exclusive bounds.
///
/// `[` is unambiguous, but `(` also opens a parenthesized sub-expression
/// (`(>=1.0.0 <2.0.0)`), so when the opener is `(` a failure to read the
/// interior as bound text is reported as "not a bracket range" (`Ok(None)`)
/// rather than as a parse error, letting the caller fall through to
/// parenthesized-expression handling instead.
fn try_parse_bracket_range(input: &str) -> Result<Option<CompositeComparator>, Error> {
    let bytes = input.as_bytes();
    if bytes.len() < 2 {
        return Ok(None);
    }
    let open = bytes[0];
    if open != b'[' && open != b'(' {
        return Ok(None);
    }
    let close = bytes[bytes.len() - 1];
    if close != b']' && close != b')' {
        return Ok(None);
    }

    let inclusive_lo = open == b'[';
    let inclusive_hi = close == b']';
    let ambiguous = open == b'(';
    let inner = &input[1..input.len() - 1];

    macro_rules! bound {
        ($text:expr) => {
            match Version::parse(strip_leading_v($text)) {
                Ok(v) => v,
                Err(e) => {
                    return if ambiguous { Ok(None) } else { Err(e) };
                }
            }
        };
    }

    let comma = match inner.find(',') {
        Some(idx) => idx,
        None => {
            let version = bound!(inner.trim());
            return Ok(Some(CompositeComparator {
                compositor: Compositor::And,
                comparators: vec![Comparator::Single(VersionComparator {
                    operator: Operator::Eq,
                    reference: version,
                    float: FloatBehavior::None,
                    release_prefix: None,
                })],
            }));
        }
    };

    let lo_text = inner[..comma].trim();
    let hi_text = inner[comma + 1..].trim();

    let lo = if lo_text.is_empty() { None } else { Some(bound!(lo_text)) };
    let hi = if hi_text.is_empty() { None } else { Some(bound!(hi_text)) };

    let mut comparators = Vec::new();
    if let Some(lo) = lo {
        let op = if inclusive_lo { Operator::Ge } else { Operator::Gt };
        comparators.push(Comparator::Single(VersionComparator {
            operator: op,
            reference: lo,
            float: FloatBehavior::None,
            release_prefix: None,
        }));
    }
    if let Some(hi) = hi {
        let op = if inclusive_hi { Operator::Le } else { Operator::Lt };
        comparators.push(Comparator::Single(VersionComparator {
            operator: op,
            reference: hi,
            float: FloatBehavior::None,
            release_prefix: None,
        }));
    }

    if comparators.is_empty() {
        return if ambiguous {
            Ok(None)
        } else {
            Err(Error::invalid("bracket range", input))
        };
    }

    Ok(Some(CompositeComparator {
        compositor: Compositor::And,
        comparators,
    }))
}

/// Parses `lo - hi` (both bounds inclusive). A bare hyphen is also the
/// release-label separator, so the preferred `" - "` separator is tried
/// first; only when that is absent does a bare leading/trailing `-` kick in
/// (`-2.0` means "no lower bound", `1.0-` means "no upper bound"), and even
/// then only at the very start/end of the text, to avoid mistaking
/// `1.0.0-alpha` for a range.
fn try_parse_hyphen_range(input: &str) -> Result<Option<CompositeComparator>, Error> {
    let parts = split_top_level(input, " - ");
    if parts.len() == 2 {
        let lo = Version::parse(strip_leading_v(parts[0].trim()))?;
        let hi = Version::parse(strip_leading_v(parts[1].trim()))?;

        return Ok(Some(and2(
            VersionComparator {
                operator: Operator::Ge,
                reference: lo,
                float: FloatBehavior::None,
                release_prefix: None,
            },
            VersionComparator {
                operator: Operator::Le,
                reference: hi,
                float: FloatBehavior::None,
                release_prefix: None,
            },
        )));
    }

    if let Some(rest) = input.strip_prefix('-') {
        if !rest.is_empty() {
            let hi = Version::parse(strip_leading_v(rest.trim()))?;
            return Ok(Some(CompositeComparator {
                compositor: Compositor::And,
                comparators: vec![Comparator::Single(VersionComparator {
                    operator: Operator::Le,
                    reference: hi,
                    float: FloatBehavior::None,
                    release_prefix: None,
                })],
            }));
        }
    }

    if let Some(rest) = input.strip_suffix('-') {
        if !rest.is_empty() && !rest.ends_with('-') {
            let lo = Version::parse(strip_leading_v(rest.trim()))?;
            return Ok(Some(CompositeComparator {
                compositor: Compositor::And,
                comparators: vec![Comparator::Single(VersionComparator {
                    operator: Operator::Ge,
                    reference: lo,
                    float: FloatBehavior::None,
                    release_prefix: None,
                })],
            }));
        }
    }

    Ok(None)
}

/// Returns how many dot-separated fields the caller actually wrote in the
/// numeric core, before `Version::parse`'s zero-padding - the count that
/// decides how wide a `~`/`^` range floats.
fn explicit_core_field_count(s: &str) -> usize {
    let dash = s.find('-');
    let end = match dash {
        Some(i) => i,
        None => s.find('+').unwrap_or(s.len()),
    };
    s[..end].split('.').count()
}

fn stable_core(version: &Version) -> Version {
    Version {
        release_labels: Vec::new(),
        metadata: Vec::new(),
        ..version.clone()
    }
}

/// `~X` floats the minor component (`X.x`), `~X.Y` floats the patch
/// component (`X.Y.x`), and `~X.Y.Z` (or deeper) allows patch-level bumps
/// only: `[X.Y.Z, X.Y.x]`, i.e. `>=X.Y.Z` intersected with a patch-floated
/// `<=X.Y.x`. A prerelease reference (`~X.Y.Z-pre`) additionally admits
/// same-numeric prereleases at or after `-pre`: `(>=X.Y.Z-pre <X.Y.Z) ||
/// ~X.Y.Z`.
fn try_parse_tilde(input: &str) -> Result<Option<CompositeComparator>, Error> {
    let rest = match input.strip_prefix('~') {
        Some(r) => r,
        None => return Ok(None),
    };
    let rest = strip_leading_v(rest.trim());
    let version = Version::parse(rest)?;

    if version.is_prerelease() {
        let stable = stable_core(&version);
        let lower_bound = and2(
            VersionComparator {
                operator: Operator::Ge,
                reference: version,
                float: FloatBehavior::None,
                release_prefix: None,
            },
            VersionComparator {
                operator: Operator::Lt,
                reference: stable.clone(),
                float: FloatBehavior::None,
                release_prefix: None,
            },
        );
        let stable_range = try_parse_tilde(&format!("~{}", stable.format("V")))?
            .expect("a stable numeric core always produces a tilde range");

        return Ok(Some(single(CompositeComparator {
            compositor: Compositor::Or,
            comparators: vec![
                Comparator::Composite(Box::new(lower_bound)),
                Comparator::Composite(Box::new(stable_range)),
            ],
        })));
    }

    let comp = match explicit_core_field_count(rest) {
        1 => CompositeComparator {
            compositor: Compositor::And,
            comparators: vec![Comparator::Single(VersionComparator {
                operator: Operator::Eq,
                reference: Version {
                    major: version.major,
                    ..Version::default()
                },
                float: FloatBehavior::Minor,
                release_prefix: None,
            })],
        },
        2 => CompositeComparator {
            compositor: Compositor::And,
            comparators: vec![Comparator::Single(VersionComparator {
                operator: Operator::Eq,
                reference: Version {
                    major: version.major,
                    minor: version.minor,
                    ..Version::default()
                },
                float: FloatBehavior::Patch,
                release_prefix: None,
            })],
        },
        _ => and2(
            VersionComparator {
                operator: Operator::Ge,
                reference: version.clone(),
                float: FloatBehavior::None,
                release_prefix: None,
            },
            VersionComparator {
                operator: Operator::Le,
                reference: Version {
                    major: version.major,
                    minor: version.minor,
                    ..Version::default()
                },
                float: FloatBehavior::Patch,
                release_prefix: None,
            },
        ),
    };

    Ok(Some(comp))
}

/// `^X.Y.Z` locks the left-most non-zero component: `^1.2.3` is
/// `[1.2.3, 1.x]`, `^0.2.3` is `[0.2.3, 0.2.x]`, `^0.0.3` is
/// `[0.0.3, 0.0.3.x]`, and `^0.0.0.R` (nothing left to lock onto) is the
/// exact version `0.0.0.R`. A prerelease reference behaves like tilde's:
/// `(>=X.Y.Z-pre <X.Y.Z) || ^X.Y.Z`.
fn try_parse_caret(input: &str) -> Result<Option<CompositeComparator>, Error> {
    let rest = match input.strip_prefix('^') {
        Some(r) => r,
        None => return Ok(None),
    };
    let rest = strip_leading_v(rest.trim());
    let version = Version::parse(rest)?;

    if version.is_prerelease() {
        let stable = stable_core(&version);
        let lower_bound = and2(
            VersionComparator {
                operator: Operator::Ge,
                reference: version,
                float: FloatBehavior::None,
                release_prefix: None,
            },
            VersionComparator {
                operator: Operator::Lt,
                reference: stable.clone(),
                float: FloatBehavior::None,
                release_prefix: None,
            },
        );
        let stable_range = try_parse_caret(&format!("^{}", stable.format("V")))?
            .expect("a stable numeric core always produces a caret range");

        return Ok(Some(single(CompositeComparator {
            compositor: Compositor::Or,
            comparators: vec![
                Comparator::Composite(Box::new(lower_bound)),
                Comparator::Composite(Box::new(stable_range)),
            ],
        })));
    }

    let comp = if version.major > 0 {
        and2(
            VersionComparator {
                operator: Operator::Ge,
                reference: version.clone(),
                float: FloatBehavior::None,
                release_prefix: None,
            },
            VersionComparator {
                operator: Operator::Le,
                reference: Version {
                    major: version.major,
                    ..Version::default()
                },
                float: FloatBehavior::Minor,
                release_prefix: None,
            },
        )
    } else if version.minor > 0 {
        and2(
            VersionComparator {
                operator: Operator::Ge,
                reference: version.clone(),
                float: FloatBehavior::None,
                release_prefix: None,
            },
            VersionComparator {
                operator: Operator::Le,
                reference: Version {
                    minor: version.minor,
                    ..Version::default()
                },
                float: FloatBehavior::Patch,
                release_prefix: None,
            },
        )
    } else if version.patch > 0 {
        and2(
            VersionComparator {
                operator: Operator::Ge,
                reference: version.clone(),
                float: FloatBehavior::None,
                release_prefix: None,
            },
            VersionComparator {
                operator: Operator::Le,
                reference: Version {
                    patch: version.patch,
                    ..Version::default()
                },
                float: FloatBehavior::Revision,
                release_prefix: None,
            },
        )
    } else {
        CompositeComparator {
            compositor: Compositor::And,
            comparators: vec![Comparator::Single(VersionComparator {
                operator: Operator::Eq,
                reference: version,
                float: FloatBehavior::None,
                release_prefix: None,
            })],
        }
    };

    Ok(Some(comp))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn caret_allows_minor_and_patch_bumps() {
        let c = CompositeComparator::parse("^1.2.3").unwrap();
        assert!(c.matches(&v("1.2.3")));
        assert!(c.matches(&v("1.9.0")));
        assert!(!c.matches(&v("2.0.0")));
    }

    #[test]
    fn caret_zero_major_locks_to_minor() {
        let c = CompositeComparator::parse("^0.2.3").unwrap();
        assert!(c.matches(&v("0.2.9")));
        assert!(!c.matches(&v("0.3.0")));
    }

    #[test]
    fn caret_all_zero_locks_to_patch() {
        let c = CompositeComparator::parse("^0.0.3").unwrap();
        assert!(c.matches(&v("0.0.3")));
        assert!(!c.matches(&v("0.0.4")));
    }

    #[test]
    fn tilde_allows_patch_bumps_only() {
        let c = CompositeComparator::parse("~1.2.3").unwrap();
        assert!(c.matches(&v("1.2.9")));
        assert!(!c.matches(&v("1.3.0")));
    }

    #[test]
    fn bracket_range_respects_inclusivity() {
        let c = CompositeComparator::parse("[1.0.0,2.9.0)").unwrap();
        assert!(c.matches(&v("1.0.0")));
        assert!(c.matches(&v("2.8.5")));
        assert!(!c.matches(&v("2.9.0")));
    }

    #[test]
    fn bracket_range_one_sided() {
        let c = CompositeComparator::parse("[1.0.0,)").unwrap();
        assert!(c.matches(&v("5.0.0")));
        assert!(!c.matches(&v("0.9.0")));
    }

    #[test]
    fn exact_bracket_with_no_comma() {
        let c = CompositeComparator::parse("[1.2.3]").unwrap();
        assert!(c.matches(&v("1.2.3")));
        assert!(!c.matches(&v("1.2.4")));
    }

    #[test]
    fn and_compositor_formats_with_double_ampersand() {
        let c = CompositeComparator::parse(">=1.0.0 <2.0.0").unwrap();
        assert_eq!(c.to_string(), ">=1.0.0 && <2.0.0");
    }

    #[test]
    fn or_compositor_formats_with_double_pipe() {
        let c = CompositeComparator::parse(">=1.0.0 || <0.5.0").unwrap();
        assert_eq!(c.to_string(), ">=1.0.0 || <0.5.0");
    }

    #[test]
    fn hyphen_range_is_inclusive_both_sides() {
        let c = CompositeComparator::parse("1.0.0 - 2.0.0").unwrap();
        assert!(c.matches(&v("1.0.0")));
        assert!(c.matches(&v("2.0.0")));
        assert!(!c.matches(&v("2.0.1")));
    }

    #[test]
    fn or_splits_top_level_only() {
        let c = CompositeComparator::parse("1.0.0 || (2.0.0 && <3.0.0)").unwrap();
        assert!(c.matches(&v("1.0.0")));
        assert!(c.matches(&v("2.0.0")));
        assert!(!c.matches(&v("1.5.0")));
    }

    #[test]
    fn parenthesized_expression_parses() {
        let c = CompositeComparator::parse("(>=1.0.0 <2.0.0)").unwrap();
        assert!(c.matches(&v("1.5.0")));
        assert!(!c.matches(&v("2.0.0")));
    }

    #[test]
    fn tilde_rejects_out_of_range_boundary_prerelease() {
        // A prerelease of the excluded next minor must not sneak in just
        // because it numerically sorts below the stable boundary version.
        let c = CompositeComparator::parse("~1.2.3").unwrap();
        assert!(!c.matches(&v("1.3.0-alpha")));
    }

    #[test]
    fn caret_rejects_out_of_range_boundary_prerelease() {
        let c = CompositeComparator::parse("^1.2.3").unwrap();
        assert!(!c.matches(&v("2.0.0-alpha")));
    }

    #[test]
    fn tilde_widens_with_fewer_components() {
        let minor = CompositeComparator::parse("~1").unwrap();
        assert!(minor.matches(&v("1.9.9")));
        assert!(!minor.matches(&v("2.0.0")));

        let patch = CompositeComparator::parse("~1.2").unwrap();
        assert!(patch.matches(&v("1.2.9")));
        assert!(!patch.matches(&v("1.3.0")));
    }

    #[test]
    fn caret_all_zero_is_exact() {
        let c = CompositeComparator::parse("^0.0.0.5").unwrap();
        assert!(c.matches(&v("0.0.0.5")));
        assert!(!c.matches(&v("0.0.0.6")));
    }

    #[test]
    fn tilde_prerelease_admits_same_numeric_prereleases_from_prefix() {
        let c = CompositeComparator::parse("~1.2.3-alpha").unwrap();
        assert!(c.matches(&v("1.2.3-alpha")));
        assert!(c.matches(&v("1.2.3-beta")));
        assert!(c.matches(&v("1.2.3")));
        assert!(c.matches(&v("1.2.9")));
        assert!(!c.matches(&v("1.2.3-0")));
        assert!(!c.matches(&v("1.3.0")));
    }

    #[test]
    fn caret_prerelease_admits_same_numeric_prereleases_from_prefix() {
        let c = CompositeComparator::parse("^1.2.3-alpha").unwrap();
        assert!(c.matches(&v("1.2.3-alpha")));
        assert!(c.matches(&v("1.2.3")));
        assert!(c.matches(&v("1.9.0")));
        assert!(!c.matches(&v("2.0.0")));
    }

    #[test]
    fn hyphen_range_bare_prefix_and_suffix() {
        let upper_only = CompositeComparator::parse("-2.0.0").unwrap();
        assert!(upper_only.matches(&v("0.1.0")));
        assert!(upper_only.matches(&v("2.0.0")));
        assert!(!upper_only.matches(&v("2.0.1")));

        let lower_only = CompositeComparator::parse("1.0.0-").unwrap();
        assert!(lower_only.matches(&v("1.0.0")));
        assert!(lower_only.matches(&v("9.0.0")));
        assert!(!lower_only.matches(&v("0.9.0")));
    }

    #[test]
    fn bare_hyphen_does_not_fire_inside_a_prerelease_label() {
        // "1.0.0-alpha" must parse as an exact comparator on a prerelease
        // version, not as a hyphen range with a missing upper bound.
        let c = CompositeComparator::parse("1.0.0-alpha").unwrap();
        assert!(c.matches(&v("1.0.0-alpha")));
        assert!(!c.matches(&v("1.0.0")));
    }

    #[test]
    fn double_equals_and_diamond_operators_parse_through_composite() {
        let c = CompositeComparator::parse("==1.2.3 || <>2.0.0").unwrap();
        assert!(c.matches(&v("1.2.3")));
        assert!(c.matches(&v("5.0.0")));
        assert!(!c.matches(&v("2.0.0")));
    }
}
