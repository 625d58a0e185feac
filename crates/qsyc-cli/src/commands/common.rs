//! Shared helpers for CLI commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use qsyc_compile::{CompilerConfig, DeviceSpec, MatchPolicy};
use qsyc_ir::Unitary;

/// Load a unitary from a JSON file of `[re, im]` rows.
pub fn load_matrix(path: &str) -> Result<Unitary> {
    let source = read_file(path)?;
    serde_json::from_str(&source).with_context(|| format!("Invalid matrix in {path}"))
}

/// Load a compiler configuration from YAML, or the defaults when no
/// file is given.
pub fn load_config(path: Option<&str>) -> Result<CompilerConfig> {
    let Some(path) = path else {
        return Ok(CompilerConfig::default());
    };
    let source = read_file(path)?;
    let config: CompilerConfig = serde_yaml_ng::from_str(&source)
        .with_context(|| format!("Invalid configuration in {path}"))?;
    Ok(config)
}

fn read_file(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        anyhow::bail!("File not found: {path}");
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
}

/// Parse a `ROWSxCOLS` grid description.
pub fn parse_grid(grid: &str) -> Result<DeviceSpec> {
    let (rows, cols) = grid
        .split_once(['x', 'X'])
        .with_context(|| format!("Invalid grid '{grid}', expected ROWSxCOLS"))?;
    let rows = rows
        .trim()
        .parse()
        .with_context(|| format!("Invalid grid rows in '{grid}'"))?;
    let cols = cols
        .trim()
        .parse()
        .with_context(|| format!("Invalid grid columns in '{grid}'"))?;
    Ok(DeviceSpec::Grid { rows, cols })
}

/// Command-line values that take precedence over the configuration file.
#[derive(Debug, Default)]
pub struct Overrides {
    pub exact: bool,
    pub atol: Option<f64>,
    pub optimization_level: Option<u8>,
    pub grid: Option<String>,
}

impl Overrides {
    /// Apply to `config` and validate the result.
    pub fn apply(&self, mut config: CompilerConfig) -> Result<CompilerConfig> {
        if self.exact {
            config.match_policy = MatchPolicy::Exact;
        } else if let Some(atol) = self.atol {
            config.match_policy = MatchPolicy::Tolerance { atol };
        }
        if let Some(level) = self.optimization_level {
            config.optimization_level = level;
        }
        if let Some(grid) = &self.grid {
            config.device = Some(parse_grid(grid)?);
        }
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_matrix() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[[[0, 0], [1, 0]], [[1, 0], [0, 0]]]").unwrap();
        let u = load_matrix(file.path().to_str().unwrap()).unwrap();
        assert!(u.exactly_eq(&qsyc_ir::StandardGate::X.matrix()));
    }

    #[test]
    fn test_load_matrix_errors() {
        assert!(load_matrix("/nonexistent/matrix.json").is_err());

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[[[1, 0], [0, 0], [0, 0]]]").unwrap();
        let err = load_matrix(file.path().to_str().unwrap()).unwrap_err();
        assert!(err.to_string().contains("Invalid matrix"));
    }

    #[test]
    fn test_load_config() {
        assert_eq!(load_config(None).unwrap(), CompilerConfig::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("qsyc.yaml");
        fs::write(
            &path,
            "match_policy:\n  kind: tolerance\n  atol: 1.0e-6\noptimization_level: 1\ndevice:\n  kind: grid\n  rows: 2\n  cols: 3\n",
        )
        .unwrap();
        let config = load_config(path.to_str()).unwrap();
        assert_eq!(config.match_policy, MatchPolicy::Tolerance { atol: 1e-6 });
        assert_eq!(config.optimization_level, 1);
        assert_eq!(config.device, Some(DeviceSpec::Grid { rows: 2, cols: 3 }));

        fs::write(&path, "unknown_key: 1\n").unwrap();
        assert!(load_config(path.to_str()).is_err());
    }

    #[test]
    fn test_parse_grid() {
        assert_eq!(
            parse_grid("3x4").unwrap(),
            DeviceSpec::Grid { rows: 3, cols: 4 }
        );
        assert_eq!(
            parse_grid("2X2").unwrap(),
            DeviceSpec::Grid { rows: 2, cols: 2 }
        );
        assert!(parse_grid("3by4").is_err());
        assert!(parse_grid("ax4").is_err());
    }

    #[test]
    fn test_overrides() {
        let overrides = Overrides {
            exact: true,
            optimization_level: Some(0),
            grid: Some("2x2".into()),
            ..Overrides::default()
        };
        let config = overrides.apply(CompilerConfig::default()).unwrap();
        assert_eq!(config.match_policy, MatchPolicy::Exact);
        assert_eq!(config.optimization_level, 0);
        assert!(config.device.is_some());

        let bad = Overrides {
            optimization_level: Some(7),
            ..Overrides::default()
        };
        assert!(bad.apply(CompilerConfig::default()).is_err());

        let atol = Overrides {
            atol: Some(1e-3),
            ..Overrides::default()
        };
        assert_eq!(
            atol.apply(CompilerConfig::default()).unwrap().match_policy,
            MatchPolicy::Tolerance { atol: 1e-3 }
        );
    }
}
