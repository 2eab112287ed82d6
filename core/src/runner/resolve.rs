use std::path::{Path, PathBuf};

use crate::error::{AiresError, Result};

/// Default simulator executable name.
pub const AIRES_PROGRAM: &str = "Aires";

/// Table exporter shipped with AIRES.
pub const EXPORT_PROGRAM: &str = "AiresExport";

/// Resolves the executable to launch.
///
/// Priority:
/// 1. `explicit` given as a path (absolute or containing a separator): must exist
/// 2. `explicit` given as a bare name: searched on PATH
/// 3. `default_name` searched on PATH
pub fn resolve_executable(explicit: Option<&str>, default_name: &str) -> Result<PathBuf> {
    let explicit = explicit.map(str::trim).filter(|s| !s.is_empty());

    if let Some(program) = explicit {
        let path = Path::new(program);
        if path.is_absolute() || path.components().count() > 1 {
            if path.is_file() {
                tracing::debug!("Using explicit path: {}", path.display());
                return Ok(path.to_path_buf());
            }
            return Err(AiresError::ExecutableNotFound {
                program: program.to_string(),
            });
        }
    }

    let name = explicit.unwrap_or(default_name);
    match find_in_system_path(name) {
        Some(path) => {
            tracing::debug!("Found in system PATH: {} -> {}", name, path.display());
            Ok(path)
        }
        None => Err(AiresError::ExecutableNotFound {
            program: name.to_string(),
        }),
    }
}

/// Finds a binary executable named `cmd` on PATH.
fn find_in_system_path(cmd: &str) -> Option<PathBuf> {
    let path_env = std::env::var_os("PATH")?;

    for dir in std::env::split_paths(&path_env) {
        #[cfg(target_os = "windows")]
        {
            let candidate = dir.join(format!("{}.exe", cmd));
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        #[cfg(not(target_os = "windows"))]
        {
            let candidate = dir.join(cmd);
            if candidate.is_file() && is_executable(&candidate) {
                return Some(candidate);
            }
        }
    }

    None
}

#[cfg(not(target_os = "windows"))]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;

    std::fs::metadata(path)
        .map(|m| m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_explicit_path_is_not_found() {
        let err = resolve_executable(Some("/definitely/not/here/Aires"), AIRES_PROGRAM).unwrap_err();
        match err {
            AiresError::ExecutableNotFound { program } => {
                assert_eq!(program, "/definitely/not/here/Aires")
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn existing_explicit_path_is_used() {
        let dir = tempfile::tempdir().unwrap();
        let exe = dir.path().join("Aires");
        std::fs::write(&exe, "#!/bin/sh\n").unwrap();

        let resolved = resolve_executable(exe.to_str(), AIRES_PROGRAM).unwrap();
        assert_eq!(resolved, exe);
    }

    #[test]
    fn unknown_name_is_not_found_on_path() {
        let err = resolve_executable(None, "zhaires-no-such-binary-4242").unwrap_err();
        assert!(matches!(err, AiresError::ExecutableNotFound { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn resolves_bare_names_via_path() {
        // `sh` is present on every unix system we target.
        let resolved = resolve_executable(Some("sh"), AIRES_PROGRAM).unwrap();
        assert!(resolved.ends_with("sh"));
    }
}
