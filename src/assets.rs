//! Asset load bookkeeping
//!
//! Actual scene import and texture decoding belong to external collaborator
//! libraries; this layer only decides what the game will draw with. The
//! primary scene is required - its absence is fatal to the caller. The
//! hammer model and mole texture degrade gracefully to a procedural
//! primitive and a flat color.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("primary scene {path}: {source}")]
    Scene {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// How the hammer will be drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HammerModel {
    /// Imported model file, handed to the scene-import collaborator
    Loaded(PathBuf),
    /// Procedurally drawn primitive fallback
    Primitive,
}

/// How the moles will be surfaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoleTexture {
    Loaded(PathBuf),
    FlatColor,
}

/// What loaded, and with which fallbacks.
#[derive(Debug, Clone)]
pub struct AssetCatalog {
    pub scene: PathBuf,
    pub hammer: HammerModel,
    pub mole_texture: MoleTexture,
}

impl AssetCatalog {
    /// Check the scene file and the optional extras. Only the scene can
    /// fail; the extras fall back with a warning.
    pub fn load(
        scene: &Path,
        hammer: Option<&Path>,
        mole_texture: Option<&Path>,
    ) -> Result<Self, AssetError> {
        if let Err(source) = fs::metadata(scene) {
            return Err(AssetError::Scene {
                path: scene.to_path_buf(),
                source,
            });
        }
        log::info!("primary scene: {}", scene.display());

        let hammer = match hammer {
            Some(path) if fs::metadata(path).is_ok() => HammerModel::Loaded(path.to_path_buf()),
            Some(path) => {
                log::warn!(
                    "hammer model {} unavailable, drawing primitive",
                    path.display()
                );
                HammerModel::Primitive
            }
            None => HammerModel::Primitive,
        };

        let mole_texture = match mole_texture {
            Some(path) if fs::metadata(path).is_ok() => MoleTexture::Loaded(path.to_path_buf()),
            Some(path) => {
                log::warn!("mole texture {} unavailable, using flat color", path.display());
                MoleTexture::FlatColor
            }
            None => MoleTexture::FlatColor,
        };

        Ok(Self {
            scene: scene.to_path_buf(),
            hammer,
            mole_texture,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("{name}_{}", std::process::id()));
        fs::write(&path, b"stub").unwrap();
        path
    }

    #[test]
    fn test_missing_scene_is_an_error() {
        let err = AssetCatalog::load(Path::new("/nonexistent/scene.obj"), None, None);
        assert!(err.is_err());
    }

    #[test]
    fn test_optional_assets_fall_back() {
        let scene = temp_file("mole_mallet_scene");
        let catalog = AssetCatalog::load(
            &scene,
            Some(Path::new("/nonexistent/hammer.obj")),
            Some(Path::new("/nonexistent/mole.png")),
        )
        .unwrap();
        assert_eq!(catalog.hammer, HammerModel::Primitive);
        assert_eq!(catalog.mole_texture, MoleTexture::FlatColor);
        let _ = fs::remove_file(&scene);
    }

    #[test]
    fn test_present_assets_are_recorded() {
        let scene = temp_file("mole_mallet_scene2");
        let hammer = temp_file("mole_mallet_hammer");
        let catalog = AssetCatalog::load(&scene, Some(&hammer), None).unwrap();
        assert_eq!(catalog.hammer, HammerModel::Loaded(hammer.clone()));
        assert_eq!(catalog.mole_texture, MoleTexture::FlatColor);
        let _ = fs::remove_file(&scene);
        let _ = fs::remove_file(&hammer);
    }
}
