//! Path helpers for config and data directory overrides

use std::path::PathBuf;

/// Resolve a user-supplied path to an absolute path.
///
/// `~` and `~/...` resolve against the home directory. Relative paths
/// resolve against the current working directory. Absolute paths pass through.
pub fn expand_path(path: &str) -> PathBuf {
    let path = path.trim();
    let cwd = || std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    if path.is_empty() {
        return cwd();
    }

    let expanded = match path.strip_prefix('~') {
        Some("") => dirs::home_dir().unwrap_or_else(|| PathBuf::from(path)),
        Some(rest) if rest.starts_with('/') || rest.starts_with('\\') => dirs::home_dir()
            .map(|home| home.join(&rest[1..]))
            .unwrap_or_else(|| PathBuf::from(path)),
        _ => PathBuf::from(path),
    };

    if expanded.is_relative() {
        cwd().join(expanded)
    } else {
        expanded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(unix)]
    #[test]
    fn test_expand_path_absolute_unix() {
        assert_eq!(expand_path("/var/lib/fleet"), PathBuf::from("/var/lib/fleet"));
    }

    #[test]
    fn test_expand_path_relative() {
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("data/db"), cwd.join("data/db"));
        assert_eq!(expand_path(".."), cwd.join(".."));
    }

    #[test]
    fn test_expand_path_empty_is_cwd() {
        assert_eq!(expand_path("  "), std::env::current_dir().unwrap());
    }

    #[test]
    fn test_expand_path_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_path("~"), home);
            assert_eq!(expand_path("~/.fleetwatch"), home.join(".fleetwatch"));
        }
    }

    #[test]
    fn test_expand_path_tilde_user_is_relative() {
        // ~otheruser is not expanded
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(expand_path("~bob/x"), cwd.join("~bob/x"));
    }
}
