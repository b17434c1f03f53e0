//! Loading launch constants from disk.

use std::path::Path;

use anyhow::Context;
use archer_core::LaunchConfig;

/// Read and validate a JSON config file.
pub fn load(path: &Path) -> anyhow::Result<LaunchConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    LaunchConfig::from_json(&text).with_context(|| format!("invalid config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn loads_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "hit_tolerance_m": 0.03 }}"#).unwrap();
        let cfg = load(file.path()).unwrap();
        assert_eq!(cfg.hit_tolerance_m, 0.03);
        assert_eq!(cfg.mass_kg, LaunchConfig::default().mass_kg);
    }

    #[test]
    fn reports_missing_and_invalid_files() {
        let err = load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"{{ "mass_kg": -1 }}"#).unwrap();
        let err = load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("mass_kg"), "{err:#}");
    }
}
