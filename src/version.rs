use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// A release version: `major.minor.patch` with an optional `-rc.N` suffix.
///
/// No other prerelease formats are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub rc: Option<u32>,
}

impl Version {
    /// Creates a final (non-rc) version.
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
            rc: None,
        }
    }

    /// Returns the same base with the given rc ordinal.
    pub fn with_rc(self, rc: u32) -> Self {
        Version {
            rc: Some(rc),
            ..self
        }
    }

    /// Parses a base version `X.Y.Z`, optionally prefixed with a single `v`.
    ///
    /// Each component must be a non-empty run of ASCII digits. Anything else,
    /// including a prerelease suffix, is rejected.
    pub fn parse_base(s: &str) -> Result<Self> {
        let clean = s.strip_prefix('v').unwrap_or(s);

        let parts: Vec<&str> = clean.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseError::invalid_version(clean));
        }

        let mut numbers = [0u32; 3];
        for (slot, part) in numbers.iter_mut().zip(&parts) {
            if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                return Err(ReleaseError::invalid_version(clean));
            }
            *slot = part
                .parse::<u32>()
                .map_err(|_| ReleaseError::invalid_version(clean))?;
        }

        Ok(Version::new(numbers[0], numbers[1], numbers[2]))
    }

    /// Applies a release bump (patch, minor or major) to the base, dropping any rc.
    fn bump_base(&self, level: BaseLevel) -> Result<Self> {
        let overflow = || ReleaseError::invalid_version(self.to_string());
        let bumped = match level {
            BaseLevel::Patch => Version::new(
                self.major,
                self.minor,
                self.patch.checked_add(1).ok_or_else(overflow)?,
            ),
            BaseLevel::Minor => {
                Version::new(self.major, self.minor.checked_add(1).ok_or_else(overflow)?, 0)
            }
            BaseLevel::Major => Version::new(self.major.checked_add(1).ok_or_else(overflow)?, 0, 0),
        };
        Ok(bumped)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(rc) = self.rc {
            write!(f, "-rc.{}", rc)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseLevel {
    Patch,
    Minor,
    Major,
}

/// The kind of version bump requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BumpKind {
    #[default]
    Patch,
    Minor,
    Major,
    Rc,
    PatchRc,
    MinorRc,
    MajorRc,
}

impl BumpKind {
    /// Every bump kind, in the order they are documented.
    pub const ALL: [BumpKind; 7] = [
        BumpKind::Patch,
        BumpKind::Minor,
        BumpKind::Major,
        BumpKind::Rc,
        BumpKind::PatchRc,
        BumpKind::MinorRc,
        BumpKind::MajorRc,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Patch => "patch",
            BumpKind::Minor => "minor",
            BumpKind::Major => "major",
            BumpKind::Rc => "rc",
            BumpKind::PatchRc => "patch-rc",
            BumpKind::MinorRc => "minor-rc",
            BumpKind::MajorRc => "major-rc",
        }
    }

    fn base_level(&self) -> Option<BaseLevel> {
        match self {
            BumpKind::Patch | BumpKind::PatchRc => Some(BaseLevel::Patch),
            BumpKind::Minor | BumpKind::MinorRc => Some(BaseLevel::Minor),
            BumpKind::Major | BumpKind::MajorRc => Some(BaseLevel::Major),
            BumpKind::Rc => None,
        }
    }

    /// Whether this kind produces a release candidate (`-rc.N`).
    pub fn is_prerelease(&self) -> bool {
        matches!(
            self,
            BumpKind::Rc | BumpKind::PatchRc | BumpKind::MinorRc | BumpKind::MajorRc
        )
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpKind {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        let lowered = s.trim().to_lowercase();
        BumpKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == lowered)
            .ok_or_else(|| ReleaseError::unknown_bump(s))
    }
}

/// Computes the next version string.
///
/// `old` is `X.Y.Z` or `vX.Y.Z`. `rc` is the current rc ordinal and is only
/// consulted by [`BumpKind::Rc`]:
/// - **patch / minor / major**: bump the base, drop any rc
/// - **rc**: keep the base, `rc + 1` or `1` when there is no current rc
/// - **patch-rc / minor-rc / major-rc**: bump the base, then append `-rc.1`
///
/// The `*-rc` kinds discard any `-suffix` on `old` before validating it.
/// The result never carries a `v` prefix.
///
/// # Example
/// ```
/// use weavegitops_tooling::version::{next_version, BumpKind};
///
/// assert_eq!(next_version("0.39.0", BumpKind::Rc, Some(2)).unwrap(), "0.39.0-rc.3");
/// assert_eq!(next_version("v0.39.0-rc.2", BumpKind::MinorRc, None).unwrap(), "0.40.0-rc.1");
/// ```
pub fn next_version(old: &str, kind: BumpKind, rc: Option<u32>) -> Result<String> {
    let next = match kind.base_level() {
        None => {
            let base = Version::parse_base(old)?;
            let ordinal = match rc {
                Some(n) => n
                    .checked_add(1)
                    .ok_or_else(|| ReleaseError::invalid_version(base.with_rc(n).to_string()))?,
                None => 1,
            };
            base.with_rc(ordinal)
        }
        Some(level) if kind.is_prerelease() => {
            let unprefixed = old.strip_prefix('v').unwrap_or(old);
            let core = unprefixed.split('-').next().unwrap_or(unprefixed);
            Version::parse_base(core)?.bump_base(level)?.with_rc(1)
        }
        Some(level) => Version::parse_base(old)?.bump_base(level)?,
    };
    Ok(next.to_string())
}
