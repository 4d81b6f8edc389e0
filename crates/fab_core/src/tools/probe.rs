//! Locating the kicad-cli executable.

use std::path::Path;

use super::kicad::KICAD_CLI;

/// Return the first probe path that is an existing file.
///
/// Falls back to the bare `kicad-cli` command name, leaving the lookup to
/// the search path.
pub fn probe_kicad_path<S: AsRef<str>>(probe_paths: &[S]) -> String {
    probe_paths
        .iter()
        .map(AsRef::<str>::as_ref)
        .find(|candidate| Path::new(candidate).is_file())
        .map(String::from)
        .unwrap_or_else(|| KICAD_CLI.to_string())
}

/// Pick the kicad-cli to use for a run.
///
/// Precedence: command-line override, config override, probing.
pub fn resolve_kicad_path<S: AsRef<str>>(
    cli_override: Option<&str>,
    config_override: Option<&str>,
    probe_paths: &[S],
) -> String {
    if let Some(path) = cli_override.or(config_override) {
        return path.to_string();
    }

    let found = probe_kicad_path(probe_paths);
    tracing::debug!("Probed kicad-cli: {}", found);
    found
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn falls_back_to_command_name() {
        let probes = ["/definitely/not/here/kicad-cli"];
        assert_eq!(probe_kicad_path(&probes), "kicad-cli");
    }

    #[test]
    fn picks_first_existing_file() {
        let dir = tempdir().unwrap();
        let installed = dir.path().join("kicad-cli");
        fs::write(&installed, "").unwrap();
        let installed = installed.to_string_lossy().to_string();

        let probes = vec!["/missing/kicad-cli".to_string(), installed.clone()];

        assert_eq!(probe_kicad_path(&probes), installed);
    }

    #[test]
    fn directories_are_not_matches() {
        let dir = tempdir().unwrap();
        let probes = [dir.path().to_string_lossy().to_string()];
        assert_eq!(probe_kicad_path(&probes), "kicad-cli");
    }

    #[test]
    fn overrides_take_precedence() {
        let probes: [&str; 0] = [];
        assert_eq!(
            resolve_kicad_path(Some("/cli/kicad-cli"), Some("/cfg/kicad-cli"), &probes),
            "/cli/kicad-cli"
        );
        assert_eq!(
            resolve_kicad_path(None, Some("/cfg/kicad-cli"), &probes),
            "/cfg/kicad-cli"
        );
        assert_eq!(resolve_kicad_path(None, None, &probes), "kicad-cli");
    }
}
