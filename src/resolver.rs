//! Resolution of package-qualified calls to their declarations.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::{Result, TraceError};
use crate::file_search::package_files;
use crate::language::Language;
use crate::module::{GoModule, ModuleProvider};
use crate::parser::parse_file;
use crate::query::find_function;

/// Where a function is declared
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    /// File path relative to the module root
    pub file: PathBuf,
    /// Zero-based row of the declaration
    pub line: usize,
}

/// Resolves `alias.Function` calls to the file declaring `Function`
///
/// Only packages of the current module are resolved, and only one level
/// deep: the package directory named by the import is scanned, never the
/// packages it imports in turn. Nothing is cached between calls.
pub struct Resolver<L: Language> {
    language: L,
    module: std::result::Result<GoModule, String>,
}

impl<L: Language> Resolver<L> {
    /// Creates a resolver, asking `provider` for the module identity once
    ///
    /// A provider failure is kept and reported by every later `resolve`.
    pub fn new(language: L, provider: &impl ModuleProvider) -> Self {
        let module = provider.module().map_err(|e| match e {
            TraceError::ModuleIdentity { reason } => reason,
            other => other.to_string(),
        });

        match &module {
            Ok(module) => tracing::debug!("Resolving against module {}", module.name),
            Err(reason) => tracing::error!("Cannot determine module identity: {}", reason),
        }

        Self { language, module }
    }

    pub fn language(&self) -> L {
        self.language
    }

    pub fn module(&self) -> Option<&GoModule> {
        self.module.as_ref().ok()
    }

    /// Finds the declaration of `function` in the package imported as `import_path`
    ///
    /// # Returns
    /// * `Ok(Some(location))` - the first declaration, scanning files in name order
    /// * `Ok(None)` - the package is outside the module; the filesystem is not touched
    /// * `Err(_)` - module identity unknown, package directory unreadable, or
    ///   no file of the package declares `function`
    pub fn resolve(&self, import_path: &str, function: &str) -> Result<Option<Location>> {
        let module = self
            .module
            .as_ref()
            .map_err(|reason| TraceError::ModuleIdentity {
                reason: reason.clone(),
            })?;

        let Some(package_dir) = module.package_dir(import_path) else {
            tracing::debug!("Skipping external package {}", import_path);
            return Ok(None);
        };

        let candidates = package_files(&module.root.join(&package_dir), self.language)?;

        for candidate in candidates {
            // A broken sibling file must not hide declarations in the others
            let file = match parse_file(&candidate, self.language) {
                Ok(file) => file,
                Err(e) => {
                    tracing::debug!("Skipping candidate: {}", e);
                    continue;
                }
            };

            if let Some(handle) = find_function(&file, function)
                && let Some(file_name) = candidate.file_name()
            {
                let location = Location {
                    file: package_dir.join(file_name),
                    line: handle.start_line(),
                };
                tracing::debug!(
                    "Resolved {}.{} to {}:{}",
                    import_path,
                    function,
                    location.file.display(),
                    location.line
                );
                return Ok(Some(location));
            }
        }

        Err(TraceError::NotFound {
            function: function.to_string(),
            import_path: import_path.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GoLang;
    use std::fs;
    use tempfile::TempDir;

    struct FailingProvider;

    impl ModuleProvider for FailingProvider {
        fn module(&self) -> Result<GoModule> {
            Err(TraceError::ModuleIdentity {
                reason: "no go.mod found".to_string(),
            })
        }
    }

    fn module_fixture() -> anyhow::Result<TempDir> {
        let temp_dir = TempDir::new()?;
        let root = temp_dir.path();
        fs::create_dir_all(root.join("internal/cli"))?;
        fs::create_dir_all(root.join("internal/cli/sub"))?;
        fs::write(root.join("go.mod"), "module root\n")?;
        fs::write(
            root.join("internal/cli/b_root.go"),
            "package cli\n\n// Execute runs the root command.\nfunc Execute() {\n}\n",
        )?;
        // Unreadable as UTF-8, so parsing it fails
        fs::write(
            root.join("internal/cli/a_broken.go"),
            b"package cli\n\nfunc Execute() {}\n\xff\xfe\n",
        )?;
        fs::write(
            root.join("internal/cli/c_dup.go"),
            "package cli\n\nfunc Execute() {}\n",
        )?;
        fs::write(
            root.join("internal/cli/root_test.go"),
            "package cli\n\nfunc Helper() {}\n",
        )?;
        fs::write(
            root.join("internal/cli/sub/deep.go"),
            "package sub\n\nfunc Deep() {}\n",
        )?;
        Ok(temp_dir)
    }

    #[test]
    fn test_resolve_internal_package() -> anyhow::Result<()> {
        let temp_dir = module_fixture()?;
        let resolver = Resolver::new(GoLang, &GoModule::new("root", temp_dir.path()));

        let location = resolver.resolve("root/internal/cli", "Execute")?;
        assert_eq!(
            location,
            Some(Location {
                file: PathBuf::from("internal/cli/b_root.go"),
                line: 3,
            })
        );

        Ok(())
    }

    #[test]
    fn test_external_package_short_circuits() {
        let resolver = Resolver::new(GoLang, &GoModule::new("root", "/nonexistent/module"));

        assert!(matches!(resolver.resolve("fmt", "Println"), Ok(None)));
        assert!(matches!(
            resolver.resolve("github.com/spf13/cobra", "Command"),
            Ok(None)
        ));
    }

    #[test]
    fn test_resolution_is_one_level_only() -> anyhow::Result<()> {
        let temp_dir = module_fixture()?;
        let resolver = Resolver::new(GoLang, &GoModule::new("root", temp_dir.path()));

        let err = resolver.resolve("root/internal/cli", "Deep").unwrap_err();
        assert!(matches!(err, TraceError::NotFound { .. }));

        // Test-only files are not candidates
        let err = resolver.resolve("root/internal/cli", "Helper").unwrap_err();
        assert_eq!(err.to_string(), "function Helper not found in root/internal/cli");

        Ok(())
    }

    #[test]
    fn test_missing_package_directory() -> anyhow::Result<()> {
        let temp_dir = module_fixture()?;
        let resolver = Resolver::new(GoLang, &GoModule::new("root", temp_dir.path()));

        let err = resolver.resolve("root/internal/gone", "Execute").unwrap_err();
        assert!(matches!(err, TraceError::Directory { .. }));

        Ok(())
    }

    #[test]
    fn test_module_identity_failure_is_repeated() {
        let resolver = Resolver::new(GoLang, &FailingProvider);
        assert!(resolver.module().is_none());

        for import_path in ["root/internal/cli", "fmt"] {
            let err = resolver.resolve(import_path, "Execute").unwrap_err();
            assert_eq!(err.to_string(), "failed to get module name: no go.mod found");
        }
    }
}
