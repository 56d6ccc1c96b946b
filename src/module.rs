//! Identity of the Go module being traced.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Result, TraceError};

/// File declaring a module's name at its root directory
pub const GO_MOD: &str = "go.mod";

static MODULE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?m)^\s*module\s+(?:"([^"]+)"|(\S+))"#).expect("module directive regex")
});

/// Name and root directory of a Go module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoModule {
    /// Module path from the `module` directive, e.g. `github.com/acme/app`
    pub name: String,
    /// Directory containing `go.mod`
    pub root: PathBuf,
}

impl GoModule {
    pub fn new(name: impl Into<String>, root: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            root: root.into(),
        }
    }

    /// Reads the module name from `<root>/go.mod`
    pub fn from_go_mod(root: &Path) -> Result<Self> {
        let go_mod = root.join(GO_MOD);
        let content = fs::read_to_string(&go_mod).map_err(|e| TraceError::ModuleIdentity {
            reason: format!("failed to read {}: {}", go_mod.display(), e),
        })?;

        let name = parse_module_name(&content).ok_or_else(|| TraceError::ModuleIdentity {
            reason: format!("no module directive in {}", go_mod.display()),
        })?;

        tracing::debug!("Module {} rooted at {}", name, root.display());
        Ok(Self::new(name, root))
    }

    /// Finds the nearest `go.mod` in `start` or one of its ancestors
    pub fn discover(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| dir.join(GO_MOD).is_file())
            .ok_or_else(|| TraceError::ModuleIdentity {
                reason: format!("no {} found in {} or its parents", GO_MOD, start.display()),
            })
            .and_then(Self::from_go_mod)
    }

    /// Directory, relative to the module root, of a package inside this module
    ///
    /// Returns `None` for import paths outside the module. The check is made
    /// on whole path segments, so `app` does not claim `apple/x`.
    pub fn package_dir(&self, import_path: &str) -> Option<PathBuf> {
        let rest = import_path.strip_prefix(self.name.as_str())?;
        if !rest.is_empty() && !rest.starts_with('/') {
            return None;
        }
        Some(rest.split('/').filter(|s| !s.is_empty()).collect())
    }
}

/// Extracts the module path from the contents of a `go.mod` file
pub fn parse_module_name(go_mod: &str) -> Option<String> {
    let captures = MODULE_DIRECTIVE.captures(go_mod)?;
    captures
        .get(1)
        .or_else(|| captures.get(2))
        .map(|m| m.as_str().to_string())
}

/// Source of the module identity used by the resolver
pub trait ModuleProvider {
    fn module(&self) -> Result<GoModule>;
}

impl ModuleProvider for GoModule {
    fn module(&self) -> Result<GoModule> {
        Ok(self.clone())
    }
}

/// Looks the module up from a starting directory when asked
#[derive(Debug, Clone)]
pub struct GoModDiscovery {
    start: PathBuf,
}

impl GoModDiscovery {
    pub fn new(start: impl Into<PathBuf>) -> Self {
        Self {
            start: start.into(),
        }
    }
}

impl ModuleProvider for GoModDiscovery {
    fn module(&self) -> Result<GoModule> {
        GoModule::discover(&self.start)
    }
}
