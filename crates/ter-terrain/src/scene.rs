//! JSON scene file acting as a mesh host.
//!
//! A scene is a flat list of named mesh objects. The command-line tool
//! reads meshes to export from it and appends imported terrains to it.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::{SurfaceMesh, TerResult};
use crate::host::MeshHost;

/// One named mesh in a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub mesh: SurfaceMesh,
}

/// Collection of mesh objects persisted as JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub objects: Vec<SceneObject>,
}

impl Scene {
    pub fn load(path: &Path) -> TerResult<Self> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Load a scene, or start an empty one if the file does not exist yet.
    pub fn load_or_default(path: &Path) -> TerResult<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self, path: &Path) -> TerResult<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    /// `base`, or `base.001`, `base.002`, ... whichever is free first.
    fn unique_name(&self, base: &str) -> String {
        if self.get(base).is_none() {
            return base.to_string();
        }
        (1..)
            .map(|n| format!("{base}.{n:03}"))
            .find(|candidate| self.get(candidate).is_none())
            .unwrap_or_else(|| base.to_string())
    }
}

impl MeshHost for Scene {
    fn mesh_objects(&self) -> Vec<(&str, &SurfaceMesh)> {
        self.objects
            .iter()
            .map(|o| (o.name.as_str(), &o.mesh))
            .collect()
    }

    fn add_mesh(&mut self, name: &str, mesh: SurfaceMesh) -> String {
        let name = self.unique_name(name);
        self.objects.push(SceneObject {
            name: name.clone(),
            mesh,
        });
        name
    }
}
