//! Assembly identity used to bound cross-reference scopes.
//!
//! Type references in .NET metadata name the assembly that defines the referenced type by its
//! simple name. The scope resolver and the reference resolver therefore key assemblies on the
//! simple name, while the version is kept for display and for telling side-by-side copies apart.

use std::fmt;

/// Four-part assembly version (major.minor.build.revision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct AssemblyVersion {
    /// Major version number
    pub major: u16,
    /// Minor version number
    pub minor: u16,
    /// Build number
    pub build: u16,
    /// Revision number
    pub revision: u16,
}

impl AssemblyVersion {
    /// Creates a new version from its four components
    #[must_use]
    pub const fn new(major: u16, minor: u16, build: u16, revision: u16) -> Self {
        Self {
            major,
            minor,
            build,
            revision,
        }
    }
}

impl fmt::Display for AssemblyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{}.{}.{}",
            self.major, self.minor, self.build, self.revision
        )
    }
}

/// Identity of an assembly inside a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssemblyIdentity {
    /// Simple name, e.g. `System.Runtime`
    pub name: String,
    /// Assembly version
    pub version: AssemblyVersion,
}

impl AssemblyIdentity {
    /// Creates a new identity
    #[must_use]
    pub fn new(name: &str, version: AssemblyVersion) -> Self {
        Self {
            name: name.to_string(),
            version,
        }
    }

    /// Returns the simple name used by type references to address this assembly
    #[must_use]
    pub fn simple_name(&self) -> &str {
        &self.name
    }

    /// Returns the display name in the `Name, Version=x.y.z.w` form
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{}, Version={}", self.name, self.version)
    }
}

impl fmt::Display for AssemblyIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name() {
        let identity = AssemblyIdentity::new("Shapes", AssemblyVersion::new(1, 2, 3, 4));
        assert_eq!(identity.display_name(), "Shapes, Version=1.2.3.4");
        assert_eq!(identity.simple_name(), "Shapes");
    }

    #[test]
    fn test_versions_order() {
        assert!(AssemblyVersion::new(1, 0, 0, 0) < AssemblyVersion::new(1, 0, 0, 1));
        assert!(AssemblyVersion::new(2, 0, 0, 0) > AssemblyVersion::new(1, 9, 9, 9));
    }
}
