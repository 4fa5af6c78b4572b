//! # verspec
//!
//! Semantic version parsing, comparison, and range matching, plus a parser
//! for .NET-style assembly identity strings.
//!
//! Two families of functionality live here, independent of one another:
//!
//! * [`Version`] and friends: parsing and comparing
//!   `major.minor.patch[.revision][-release][+metadata]` strings, matching a
//!   single version against a comparator (`>=1.2.3`, `1.2.x`), and matching
//!   against a composite range expression (`^1.2.3`, `[1.0,2.0)`,
//!   `1.0 - 2.0`, `>=1.0 <2.0 || >=3.0`).
//! * [`AssemblyIdentity`]: parsing and comparing
//!   `Name, Version=X.Y.Z.R, Culture=xx, PublicKeyToken=hex16` strings.
//!
//! Every fallible `parse` has a `try_parse` counterpart that returns `None`
//! instead of propagating an [`Error`].
//!
//! ```
//! use verspec::{CompositeComparator, Version};
//!
//! let range = CompositeComparator::parse("^1.2.3").unwrap();
//! assert!(range.matches(&Version::parse("1.9.0").unwrap()));
//! assert!(!range.matches(&Version::parse("2.0.0").unwrap()));
//! ```

mod comparator;
mod comparer;
mod composite;
mod error;
mod identity;
mod version;

pub use comparator::{FloatBehavior, Operator, VersionComparator};
pub use comparer::{ComparisonMode, VersionComparer};
pub use composite::{Comparator, Compositor, CompositeComparator};
pub use error::Error;
pub use identity::{Architecture, AssemblyIdentity, AssemblyIdentityComparer, IdentityComparisonMode};
pub use version::Version;
