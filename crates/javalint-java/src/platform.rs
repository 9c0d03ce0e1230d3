//! Host Java platform capabilities.

use std::fmt;
use std::path::Path;

/// `@Generated` in the `javax.annotation` namespace (Java 8 and earlier,
/// still produced by many processors).
pub const LEGACY_GENERATED: &str = "javax.annotation.Generated";

/// `@Generated` introduced with the module system in Java 9.
pub const PROCESSING_GENERATED: &str = "javax.annotation.processing.Generated";

const GENERATED_SINCE_9: &[&str] = &[PROCESSING_GENERATED, LEGACY_GENERATED];
const GENERATED_BEFORE_9: &[&str] = &[LEGACY_GENERATED, PROCESSING_GENERATED];

/// Java feature release of the analyzed platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlatformVersion {
    release: u32,
}

impl PlatformVersion {
    /// Release assumed when nothing is configured or detected.
    pub const DEFAULT: Self = Self { release: 17 };

    /// Creates a version from a feature release number.
    #[must_use]
    pub const fn new(release: u32) -> Self {
        Self { release }
    }

    /// Feature release number.
    #[must_use]
    pub const fn release(self) -> u32 {
        self.release
    }

    /// Parses a `java.version` string: `1.8.0_292` is 8, `17.0.2` is 17.
    #[must_use]
    pub fn parse(version: &str) -> Option<Self> {
        let mut parts = version.trim().split(|c: char| !c.is_ascii_digit());
        let first: u32 = parts.next()?.parse().ok()?;
        let release = if first == 1 {
            parts.next()?.parse().ok()?
        } else {
            first
        };
        Some(Self::new(release))
    }

    /// Reads `JAVA_VERSION` from a JDK's `release` file.
    #[must_use]
    pub fn from_java_home(java_home: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(java_home.join("release")).ok()?;
        content.lines().find_map(|line| {
            let value = line.trim().strip_prefix("JAVA_VERSION=")?;
            Self::parse(value.trim_matches('"'))
        })
    }

    /// Detects the version from `$JAVA_HOME`.
    #[must_use]
    pub fn detect() -> Option<Self> {
        let java_home = std::env::var_os("JAVA_HOME")?;
        let version = Self::from_java_home(Path::new(&java_home));
        if let Some(v) = version {
            tracing::debug!("Detected Java {v} from JAVA_HOME");
        }
        version
    }

    /// Uses the configured release, then detection, then [`Self::DEFAULT`].
    #[must_use]
    pub fn resolve(configured: Option<u32>) -> Self {
        configured
            .map(Self::new)
            .or_else(Self::detect)
            .unwrap_or(Self::DEFAULT)
    }

    /// The `@Generated` identity this platform's own tooling emits.
    #[must_use]
    pub fn native_generated_annotation(self) -> &'static str {
        self.generated_annotations()[0]
    }

    /// Annotation identities that mark generated code on this platform,
    /// native identity first.
    ///
    /// Both namespaces are always accepted so that units compiled against
    /// an older or newer release are recognised when analyzed together.
    #[must_use]
    pub fn generated_annotations(self) -> &'static [&'static str] {
        if self.release >= 9 {
            GENERATED_SINCE_9
        } else {
            GENERATED_BEFORE_9
        }
    }
}

impl Default for PlatformVersion {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for PlatformVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.release)
    }
}
