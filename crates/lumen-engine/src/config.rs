//! Asset location configuration.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable naming the project root.
pub const ROOT_ENV: &str = "PROJ_PATH";

/// Where shader sources and textures live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetConfig {
    pub root: PathBuf,
    pub shaders_dir: PathBuf,
    pub textures_dir: PathBuf,
}

impl AssetConfig {
    /// Standard layout below `root`: `res/shaders` and `res/textures`.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let res = root.join("res");
        Self {
            shaders_dir: res.join("shaders"),
            textures_dir: res.join("textures"),
            root,
        }
    }

    /// Uses `$PROJ_PATH` as the root, or `fallback` when it is unset or empty.
    pub fn from_env(fallback: impl Into<PathBuf>) -> Self {
        Self::resolve(std::env::var_os(ROOT_ENV), fallback.into())
    }

    fn resolve(value: Option<OsString>, fallback: PathBuf) -> Self {
        match value.filter(|v| !v.is_empty()) {
            Some(root) => Self::from_root(root),
            None => {
                log::debug!("{ROOT_ENV} not set, using {}", fallback.display());
                Self::from_root(fallback)
            }
        }
    }

    /// `(<name>_vertex.glsl, <name>_fragment.glsl)` inside the shader directory.
    pub fn shader_paths(&self, name: &str) -> (PathBuf, PathBuf) {
        (
            self.shaders_dir.join(format!("{name}_vertex.glsl")),
            self.shaders_dir.join(format!("{name}_fragment.glsl")),
        )
    }

    pub fn texture_path(&self, file: impl AsRef<Path>) -> PathBuf {
        self.textures_dir.join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shader_files_follow_the_naming_scheme() {
        let assets = AssetConfig::from_root("/srv/game");
        let (vs, fs) = assets.shader_paths("phong");

        assert_eq!(vs, Path::new("/srv/game/res/shaders/phong_vertex.glsl"));
        assert_eq!(fs, Path::new("/srv/game/res/shaders/phong_fragment.glsl"));
        assert_eq!(
            assets.texture_path("crate.png"),
            Path::new("/srv/game/res/textures/crate.png")
        );
    }

    #[test]
    fn env_root_wins_over_fallback() {
        let assets = AssetConfig::resolve(Some("/from/env".into()), PathBuf::from("/fallback"));
        assert_eq!(assets.root, Path::new("/from/env"));
    }

    #[test]
    fn empty_env_uses_fallback() {
        let assets = AssetConfig::resolve(Some(OsString::new()), PathBuf::from("/fallback"));
        assert_eq!(assets.root, Path::new("/fallback"));
        assert_eq!(AssetConfig::resolve(None, "/fallback".into()), assets);
    }
}
