#[cfg(test)]
mod tests {
    use glam::Vec3;

    use crate::constants::{FORMAT_VERSION, MAX_MATERIAL_NAME_LEN};
    use crate::error::TerError;
    use crate::types::{SurfaceMesh, TerrainDocument};

    fn make_doc() -> TerrainDocument {
        TerrainDocument::new(
            2,
            vec![0, 1000, 2000, 3000],
            vec![0, 0, 1, 1],
            vec!["grass".to_string(), "rock".to_string()],
        )
    }

    #[test]
    fn test_new_uses_format_version() {
        let doc = make_doc();
        assert_eq!(doc.version, FORMAT_VERSION);
        assert_eq!(doc.cell_count(), Some(4));
    }

    #[test]
    fn test_cell_queries() {
        let doc = make_doc();
        assert_eq!(doc.index(1, 1), Some(3));
        assert_eq!(doc.index(2, 0), None);
        assert_eq!(doc.height_at(1, 0), Some(1.0));
        assert_eq!(doc.height_at(1, 1), Some(3.0));
        assert_eq!(doc.layer_at(0, 1), Some(1));
        assert_eq!(doc.material_at(0, 0), Some("grass"));
        assert_eq!(doc.material_at(1, 1), Some("rock"));
    }

    #[test]
    fn test_material_at_out_of_range_layer() {
        let mut doc = make_doc();
        doc.layers[0] = 7;
        assert_eq!(doc.material_at(0, 0), None);
    }

    #[test]
    fn test_flat_and_height_range() {
        let doc = TerrainDocument::flat(3, 500, Vec::new());
        assert_eq!(doc.heights.len(), 9);
        assert_eq!(doc.layers, vec![0; 9]);
        assert_eq!(doc.height_range(), Some((500, 500)));
        assert_eq!(make_doc().height_range(), Some((0, 3000)));
    }

    #[test]
    fn test_document_serde() {
        let doc = make_doc();
        let json = serde_json::to_string(&doc).unwrap();
        let back: TerrainDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(doc, back);
    }

    #[test]
    fn test_mesh_serde_defaults_materials() {
        let json = r#"{"vertices":[[0,0,0],[1,0,0],[0,1,0],[1,1,0]],"faces":[[0,1,3,2]]}"#;
        let mesh: SurfaceMesh = serde_json::from_str(json).unwrap();
        assert_eq!(mesh.vertices[3], Vec3::new(1.0, 1.0, 0.0));
        assert!(mesh.face_materials.is_empty());
        assert_eq!(mesh.face_material(0), 0);
    }

    #[test]
    fn test_error_messages() {
        let err = TerError::truncated("heights", 32, 7);
        assert_eq!(
            err.to_string(),
            "Truncated heights: needed 32 bytes, 7 available"
        );
        let err = TerError::NonSquareGrid { vertex_count: 10 };
        assert!(err.to_string().contains("10 vertices"));
        let err = TerError::encoding(format!("name longer than {MAX_MATERIAL_NAME_LEN}"));
        assert!(matches!(err, TerError::Encoding(_)));
    }
}
