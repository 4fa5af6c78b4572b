use std::collections::hash_map::DefaultHasher;
use std::fmt;
use std::hash::{Hash, Hasher};

use lazy_static::lazy_static;
use regex::Regex;

use crate::error::Error;
use crate::version::Version;

lazy_static! {
    /// RFC 4646-ish structural check: a primary subtag of 2-8 letters
    /// followed by any number of `-`-separated alphanumeric subtags. There
    /// is no locale database backing this, so it accepts any tag shaped
    /// like a culture name rather than validating against a known list.
    static ref CULTURE_RE: Regex =
        Regex::new(r"^[A-Za-z]{2,8}(-[A-Za-z0-9]{1,8})*$").unwrap();

    /// A public key token is always exactly 16 hex digits (an 8-byte SHA-1
    /// prefix), or the literal `null` when the assembly is unsigned.
    static ref PUBLIC_KEY_TOKEN_RE: Regex = Regex::new(r"^[0-9A-Fa-f]{16}$").unwrap();
}

/// Target processor architecture carried by an assembly identity's
/// `processorArchitecture` attribute. `None` means the attribute was absent
/// or empty, which is the common case for portable, architecture-agnostic
/// assemblies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    None,
    MSIL,
    X86,
    Amd64,
    Arm,
    IA64,
}

impl Default for Architecture {
    fn default() -> Self {
        Architecture::None
    }
}

impl Architecture {
    pub fn as_str(self) -> &'static str {
        match self {
            Architecture::None => "None",
            Architecture::MSIL => "MSIL",
            Architecture::X86 => "X86",
            Architecture::Amd64 => "AMD64",
            Architecture::Arm => "ARM",
            Architecture::IA64 => "IA64",
        }
    }

    fn parse(input: &str) -> Result<Architecture, Error> {
        if input.is_empty() {
            return Ok(Architecture::None);
        }
        match input.to_ascii_lowercase().as_str() {
            "none" => Ok(Architecture::None),
            "msil" => Ok(Architecture::MSIL),
            "x86" => Ok(Architecture::X86),
            "amd64" => Ok(Architecture::Amd64),
            "arm" => Ok(Architecture::Arm),
            "ia64" => Ok(Architecture::IA64),
            _ => Err(Error::invalid("processorArchitecture", input)),
        }
    }
}

/// A parsed .NET-style assembly identity:
/// `Name, Version=X.Y.Z.R, Culture=xx, PublicKeyToken=hex16, processorArchitecture=ARCH`.
///
/// Every attribute after the bare name is optional and order-independent.
/// `raw` caches the original trimmed input so [`AssemblyIdentity::to_string`]
/// can echo it back exactly; use [`AssemblyIdentity::format`] when a
/// canonical reconstruction from fields is required instead.
#[derive(Debug, Clone)]
pub struct AssemblyIdentity {
    pub short_name: String,
    pub version: Option<Version>,
    pub culture: Option<String>,
    pub public_key_token: Option<[u8; 8]>,
    pub architecture: Architecture,
    raw: Option<String>,
}

impl AssemblyIdentity {
    pub fn try_parse(input: &str) -> Option<AssemblyIdentity> {
        AssemblyIdentity::parse(input).ok()
    }

    pub fn parse(input: &str) -> Result<AssemblyIdentity, Error> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(Error::EmptyInput);
        }

        let mut segments = trimmed.split(',');
        let short_name = segments.next().unwrap_or("").trim();
        if short_name.is_empty() {
            return Err(Error::invalid("assembly short name", trimmed));
        }

        let mut version = None;
        let mut culture = None;
        let mut public_key_token = None;
        let mut architecture = Architecture::None;

        for segment in segments {
            let segment = segment.trim();
            if segment.is_empty() {
                return Err(Error::invalid("assembly identity attribute", trimmed));
            }
            let eq = segment
                .find('=')
                .ok_or_else(|| Error::invalid("assembly identity attribute", segment))?;
            let key = segment[..eq].trim();
            let value = segment[eq + 1..].trim();

            match key.to_ascii_lowercase().as_str() {
                "version" => {
                    version = Some(parse_identity_version(value)?);
                }
                "culture" => {
                    culture = parse_culture(value)?;
                }
                "publickeytoken" => {
                    public_key_token = parse_public_key_token(value)?;
                }
                "processorarchitecture" => {
                    architecture = Architecture::parse(value)?;
                }
                other => return Err(Error::invalid("assembly identity attribute", other)),
            }
        }

        Ok(AssemblyIdentity {
            short_name: short_name.to_string(),
            version,
            culture,
            public_key_token,
            architecture,
            raw: Some(trimmed.to_string()),
        })
    }

    /// Canonically reconstructs the identity string from its fields,
    /// independent of how (or whether) it was parsed: `short_name`, then the
    /// `Version`/`Culture`/`PublicKeyToken` triplet when either a version or
    /// a token is present, then `processorArchitecture` when set.
    pub fn format(&self) -> String {
        let mut out = self.short_name.clone();

        if self.version.is_some() || self.public_key_token.is_some() {
            let version = self.version.clone().unwrap_or_default();
            let culture = self.culture.as_deref().unwrap_or("neutral");
            let token = self
                .public_key_token
                .map(format_token)
                .unwrap_or_else(|| "null".to_string());
            out.push_str(&format!(
                ", Version={}.{}.{}.{}, Culture={}, PublicKeyToken={}",
                version.major, version.minor, version.patch, version.revision, culture, token
            ));
        }

        if self.architecture != Architecture::None {
            out.push_str(&format!(", processorArchitecture={}", self.architecture.as_str()));
        }

        out
    }
}

/// The identity's `Version` attribute is the strict four-dot numeric form;
/// prerelease labels and build metadata have no meaning here and are
/// rejected rather than silently dropped.
fn parse_identity_version(value: &str) -> Result<Version, Error> {
    let version = Version::parse(value)?;
    if version.is_prerelease() || version.has_metadata() {
        return Err(Error::invalid("assembly version", value));
    }
    Ok(version)
}

/// The literal `neutral` means "no culture", represented as `None` rather
/// than the string `"neutral"` so that equality and hashing only ever see
/// one representation of "absent".
fn parse_culture(value: &str) -> Result<Option<String>, Error> {
    if value.eq_ignore_ascii_case("neutral") {
        return Ok(None);
    }
    if !CULTURE_RE.is_match(value) {
        return Err(Error::invalid("culture tag", value));
    }
    Ok(Some(value.to_string()))
}

fn parse_public_key_token(value: &str) -> Result<Option<[u8; 8]>, Error> {
    if value.eq_ignore_ascii_case("null") {
        return Ok(None);
    }
    if !PUBLIC_KEY_TOKEN_RE.is_match(value) {
        return Err(Error::invalid("public key token", value));
    }
    let mut bytes = [0u8; 8];
    for (i, byte) in bytes.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&value[i * 2..i * 2 + 2], 16)
            .map_err(|_| Error::invalid("public key token", value))?;
    }
    Ok(Some(bytes))
}

fn format_token(token: [u8; 8]) -> String {
    token.iter().map(|b| format!("{:02X}", b)).collect()
}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.raw {
            Some(raw) => write!(f, "{}", raw),
            None => write!(f, "{}", self.format()),
        }
    }
}

/// How strictly two [`AssemblyIdentity`] values are compared.
///
/// Ascending strictness: each mode compares every field at its own level
/// plus every field of the modes before it. `Default` compares the same
/// fields as `Architecture` - there is nothing left to add - but is kept as
/// a distinct variant since it is the mode callers reach for by default
/// rather than naming the strictest field explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityComparisonMode {
    ShortName,
    Version,
    Culture,
    PublicKeyToken,
    Architecture,
    Default,
}

impl Default for IdentityComparisonMode {
    fn default() -> Self {
        IdentityComparisonMode::Default
    }
}

/// Stateless equality and hashing for [`AssemblyIdentity`], parameterized by
/// an [`IdentityComparisonMode`]. `short_name` is always compared
/// case-sensitively: .NET assembly short names are case-sensitive, and
/// nothing in this type's grammar implies otherwise.
pub struct AssemblyIdentityComparer;

impl AssemblyIdentityComparer {
    pub fn equals(a: &AssemblyIdentity, b: &AssemblyIdentity, mode: IdentityComparisonMode) -> bool {
        if a.short_name != b.short_name {
            return false;
        }
        if mode == IdentityComparisonMode::ShortName {
            return true;
        }
        if a.version != b.version {
            return false;
        }
        if mode == IdentityComparisonMode::Version {
            return true;
        }
        if a.culture != b.culture {
            return false;
        }
        if mode == IdentityComparisonMode::Culture {
            return true;
        }
        if a.public_key_token != b.public_key_token {
            return false;
        }
        if mode == IdentityComparisonMode::PublicKeyToken {
            return true;
        }
        a.architecture == b.architecture
    }

    pub fn hash(identity: &AssemblyIdentity, mode: IdentityComparisonMode) -> u64 {
        let mut hasher = DefaultHasher::new();
        identity.short_name.hash(&mut hasher);

        if mode == IdentityComparisonMode::ShortName {
            return hasher.finish();
        }

        identity
            .version
            .as_ref()
            .map(|v| v.format("N"))
            .hash(&mut hasher);

        if mode == IdentityComparisonMode::Version {
            return hasher.finish();
        }

        identity.culture.hash(&mut hasher);

        if mode == IdentityComparisonMode::Culture {
            return hasher.finish();
        }

        identity.public_key_token.hash(&mut hasher);

        if mode == IdentityComparisonMode::PublicKeyToken {
            return hasher.finish();
        }

        identity.architecture.hash(&mut hasher);

        hasher.finish()
    }
}
