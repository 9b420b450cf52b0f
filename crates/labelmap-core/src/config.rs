use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::checksum::ShaBits;

fn default_sort() -> bool {
    true
}

/// Global configuration loaded from `~/.config/labelmap/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelMapConfig {
    /// Directory whose entries become labels.
    pub source_dir: PathBuf,
    /// Label map file to (re)write.
    pub output_path: PathBuf,
    /// Literal, case-sensitive suffix that marks an entry as a label image.
    pub extension: String,
    /// Sort labels byte-wise; false keeps the OS listing order.
    #[serde(default = "default_sort")]
    pub sort: bool,
    /// Digest width (224, 256, 384, 512); 256 when missing.
    #[serde(default)]
    pub digest_bits: Option<ShaBits>,
    /// External checksum tool (e.g. "shasum") to run instead of the built-in digest.
    #[serde(default)]
    pub checksum_tool: Option<String>,
}

impl Default for LabelMapConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("bounding_box_imgs"),
            output_path: PathBuf::from("mediapipe/models/knift_plu_labelmap.txt"),
            extension: ".png".to_string(),
            sort: true,
            digest_bits: None,
            checksum_tool: None,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("labelmap")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<LabelMapConfig> {
    load_or_init_at(&config_path()?)
}

/// Like `load_or_init`, for a config file at `path`.
pub fn load_or_init_at(path: &Path) -> Result<LabelMapConfig> {
    if !path.exists() {
        let default_cfg = LabelMapConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)
            .with_context(|| format!("failed to write default config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from(path)
}

/// Load configuration from an explicit file. The file must exist.
pub fn load_from(path: &Path) -> Result<LabelMapConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config: {}", path.display()))?;
    let cfg: LabelMapConfig =
        toml::from_str(&data).with_context(|| format!("invalid config: {}", path.display()))?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_values() {
        let cfg = LabelMapConfig::default();
        assert_eq!(cfg.source_dir, PathBuf::from("bounding_box_imgs"));
        assert_eq!(
            cfg.output_path,
            PathBuf::from("mediapipe/models/knift_plu_labelmap.txt")
        );
        assert_eq!(cfg.extension, ".png");
        assert!(cfg.sort);
        assert!(cfg.digest_bits.is_none());
        assert!(cfg.checksum_tool.is_none());
    }

    #[test]
    fn config_toml_roundtrip() {
        let cfg = LabelMapConfig::default();
        let toml = toml::to_string_pretty(&cfg).unwrap();
        let parsed: LabelMapConfig = toml::from_str(&toml).unwrap();
        assert_eq!(parsed.source_dir, cfg.source_dir);
        assert_eq!(parsed.output_path, cfg.output_path);
        assert_eq!(parsed.extension, cfg.extension);
        assert_eq!(parsed.sort, cfg.sort);
    }

    #[test]
    fn config_toml_custom_values() {
        let toml = r#"
            source_dir = "/data/crops"
            output_path = "out/labels.txt"
            extension = ".jpg"
            sort = false
            digest_bits = 512
            checksum_tool = "shasum"
        "#;
        let cfg: LabelMapConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.source_dir, PathBuf::from("/data/crops"));
        assert_eq!(cfg.extension, ".jpg");
        assert!(!cfg.sort);
        assert_eq!(cfg.digest_bits, Some(ShaBits::Sha512));
        assert_eq!(cfg.checksum_tool.as_deref(), Some("shasum"));
    }

    #[test]
    fn config_toml_sort_defaults_true() {
        let toml = r#"
            source_dir = "imgs"
            output_path = "labels.txt"
            extension = ".png"
        "#;
        let cfg: LabelMapConfig = toml::from_str(toml).unwrap();
        assert!(cfg.sort);
    }

    #[test]
    fn config_toml_rejects_bad_bits() {
        let toml = r#"
            source_dir = "imgs"
            output_path = "labels.txt"
            extension = ".png"
            digest_bits = 100
        "#;
        assert!(toml::from_str::<LabelMapConfig>(toml).is_err());
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "source_dir = \"a\"\noutput_path = \"b.txt\"\nextension = \".webp\"\n",
        )
        .unwrap();
        let cfg = load_from(&path).unwrap();
        assert_eq!(cfg.extension, ".webp");
        assert!(load_from(&dir.path().join("missing.toml")).is_err());
    }

    #[test]
    fn load_or_init_writes_default_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("labelmap").join("config.toml");

        let cfg = load_or_init_at(&path).unwrap();
        assert_eq!(cfg.extension, ".png");
        assert!(path.exists());
        assert_eq!(load_from(&path).unwrap().output_path, cfg.output_path);

        fs::write(
            &path,
            "source_dir = \"crops\"\noutput_path = \"l.txt\"\nextension = \".jpg\"\n",
        )
        .unwrap();
        let edited = load_or_init_at(&path).unwrap();
        assert_eq!(edited.extension, ".jpg");
        assert_eq!(edited.source_dir, PathBuf::from("crops"));
    }
}
