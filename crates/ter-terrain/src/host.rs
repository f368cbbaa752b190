//! Mesh host contract and the batch export/import commands built on it.

use std::path::{Path, PathBuf};

use log::{info, warn};

use crate::codec::{read_ter, write_ter};
use crate::core::constants::{FILE_EXTENSION, IMPORTED_OBJECT_NAME};
use crate::core::{SurfaceMesh, TerError, TerResult};
use crate::mesh::{check_mesh_size, to_document, to_mesh};

/// The application that owns mesh objects.
pub trait MeshHost {
    /// Mesh objects selected for export, with their names.
    fn mesh_objects(&self) -> Vec<(&str, &SurfaceMesh)>;

    /// Materialize a new mesh object. Returns the name actually used.
    fn add_mesh(&mut self, name: &str, mesh: SurfaceMesh) -> String;
}

/// Outcome of a batch export.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Files written, in host object order.
    pub written: Vec<PathBuf>,
    /// Objects that failed, with the reason.
    pub failed: Vec<(String, TerError)>,
}

impl ExportReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Fail when not a single object could be exported.
    pub fn ensure_any_written(self) -> TerResult<Self> {
        if self.written.is_empty() {
            return Err(TerError::ExportFailed {
                failed: self.failed.len(),
            });
        }
        Ok(self)
    }
}

/// Output path for one object: `terrain.ter` + `Hills` → `terrain_Hills.ter`.
pub fn export_path_for(target: &Path, object_name: &str) -> PathBuf {
    let stem = if target
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case(FILE_EXTENSION))
    {
        target.with_extension("")
    } else {
        target.to_path_buf()
    };
    let mut file_name = stem.into_os_string();
    file_name.push(format!("_{object_name}.{FILE_EXTENSION}"));
    PathBuf::from(file_name)
}

/// Write one terrain file per mesh object in the host.
///
/// A failing object is logged and recorded in the report; the remaining
/// objects are still exported.
pub fn export_meshes(host: &dyn MeshHost, target: &Path) -> TerResult<ExportReport> {
    let objects = host.mesh_objects();
    if objects.is_empty() {
        return Err(TerError::NoMeshes);
    }

    let mut report = ExportReport::default();
    for (name, mesh) in objects {
        let path = export_path_for(target, name);
        match to_document(mesh).and_then(|doc| write_ter(&path, &doc)) {
            Ok(()) => {
                info!("Exported terrain '{name}' to {}", path.display());
                report.written.push(path);
            }
            Err(e) => {
                warn!("Skipping '{name}': {e}");
                report.failed.push((name.to_string(), e));
            }
        }
    }
    Ok(report)
}

/// Read a terrain file and add it to the host as a new mesh object.
pub fn import_terrain(host: &mut dyn MeshHost, source: &Path) -> TerResult<String> {
    let doc = read_ter(source)?;
    check_mesh_size(doc.size)?;
    let mesh = to_mesh(&doc);
    let name = host.add_mesh(IMPORTED_OBJECT_NAME, mesh);
    info!(
        "Imported {}x{} terrain from {} as '{name}'",
        doc.size,
        doc.size,
        source.display()
    );
    Ok(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct VecHost {
        objects: Vec<(String, SurfaceMesh)>,
    }

    impl MeshHost for VecHost {
        fn mesh_objects(&self) -> Vec<(&str, &SurfaceMesh)> {
            self.objects.iter().map(|(n, m)| (n.as_str(), m)).collect()
        }

        fn add_mesh(&mut self, name: &str, mesh: SurfaceMesh) -> String {
            self.objects.push((name.to_string(), mesh));
            name.to_string()
        }
    }

    #[test]
    fn test_export_path_for() {
        assert_eq!(
            export_path_for(Path::new("out/terrain.ter"), "Hills"),
            PathBuf::from("out/terrain_Hills.ter")
        );
        assert_eq!(
            export_path_for(Path::new("terrain.TER"), "A"),
            PathBuf::from("terrain_A.ter")
        );
        // Only the extension is stripped, never trailing stem characters.
        assert_eq!(
            export_path_for(Path::new("water"), "B"),
            PathBuf::from("water_B.ter")
        );
        assert_eq!(
            export_path_for(Path::new("map.bin"), "C"),
            PathBuf::from("map.bin_C.ter")
        );
    }

    #[test]
    fn test_export_no_meshes() {
        let host = VecHost::default();
        let target = std::env::temp_dir().join("ter_host_test_empty.ter");
        assert!(matches!(
            export_meshes(&host, &target),
            Err(TerError::NoMeshes)
        ));
    }

    #[test]
    fn test_export_continues_after_failure() {
        let dir = std::env::temp_dir().join("ter_host_test_batch");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let good = to_mesh(&crate::core::TerrainDocument::flat(2, 10, Vec::new()));
        let bad = SurfaceMesh {
            vertices: vec![glam::Vec3::ZERO; 3],
            ..Default::default()
        };
        let host = VecHost {
            objects: vec![
                ("Bad".to_string(), bad),
                ("Good".to_string(), good),
            ],
        };

        let report = export_meshes(&host, &dir.join("terrain.ter"))
            .and_then(ExportReport::ensure_any_written)
            .unwrap();
        assert!(!report.is_complete());
        assert_eq!(report.written, vec![dir.join("terrain_Good.ter")]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "Bad");
        assert!(matches!(
            report.failed[0].1,
            TerError::NonSquareGrid { vertex_count: 3 }
        ));
        assert!(dir.join("terrain_Good.ter").exists());
        assert!(!dir.join("terrain_Bad.ter").exists());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_export_all_failed_is_an_error() {
        let dir = std::env::temp_dir().join("ter_host_test_all_failed");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();

        let host = VecHost {
            objects: vec![("Empty".to_string(), SurfaceMesh::default())],
        };
        let report = export_meshes(&host, &dir.join("terrain.ter")).unwrap();
        assert!(matches!(
            report.ensure_any_written(),
            Err(TerError::ExportFailed { failed: 1 })
        ));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_import_adds_mesh() {
        let path = std::env::temp_dir().join("ter_host_test_import.ter");
        let doc = crate::core::TerrainDocument::flat(3, 2500, vec!["grass".into()]);
        write_ter(&path, &doc).unwrap();

        let mut host = VecHost::default();
        let name = import_terrain(&mut host, &path).unwrap();
        assert_eq!(name, IMPORTED_OBJECT_NAME);
        assert_eq!(host.objects.len(), 1);
        let mesh = &host.objects[0].1;
        assert_eq!(mesh.vertices.len(), 9);
        assert_eq!(mesh.faces.len(), 4);
        assert!(mesh.vertices.iter().all(|v| (v.z - 2.5).abs() < 1e-6));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_import_truncated_file_adds_nothing() {
        let path = std::env::temp_dir().join("ter_host_test_truncated.ter");
        std::fs::write(&path, [9u8, 4, 0, 0, 0, 1, 2]).unwrap();

        let mut host = VecHost::default();
        assert!(matches!(
            import_terrain(&mut host, &path),
            Err(TerError::TruncatedData { .. })
        ));
        assert!(host.objects.is_empty());

        let _ = std::fs::remove_file(&path);
    }
}
