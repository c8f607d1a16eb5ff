use std::{collections::HashSet, path::PathBuf};

use asset::{MeshData, edge_key, load_obj_from_path, parse_obj_str};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

/// Same cube with every face corner reduced to its position reference.
fn cube_positions_only() -> String {
    let src = std::fs::read_to_string(fixture("cube.obj")).unwrap();
    src.lines()
        .map(|line| match line.strip_prefix("f ") {
            Some(corners) => {
                let positions: Vec<&str> = corners
                    .split_whitespace()
                    .map(|c| c.split('/').next().unwrap())
                    .collect();
                format!("f {}", positions.join(" "))
            }
            None => line.to_owned(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn assert_well_formed(mesh: &MeshData) {
    let count = mesh.vertex_count() as u32;
    assert_eq!(mesh.indices.len() % 3, 0);
    assert_eq!(mesh.wireframe_indices.len() % 2, 0);
    assert_eq!(mesh.normals.len(), mesh.positions.len());
    assert!(mesh.indices.iter().all(|&i| i < count));
    assert!(mesh.wireframe_indices.iter().all(|&i| i < count));
    assert!(mesh.is_valid());
}

fn assert_edges_unique_and_complete(mesh: &MeshData) {
    let listed: Vec<_> = mesh
        .wireframe_indices
        .chunks_exact(2)
        .map(|e| edge_key(e[0], e[1]))
        .collect();
    let unique: HashSet<_> = listed.iter().copied().collect();
    assert_eq!(listed.len(), unique.len(), "duplicate edge in wireframe");

    let from_triangles: HashSet<_> = mesh
        .indices
        .chunks_exact(3)
        .flat_map(|t| [edge_key(t[0], t[1]), edge_key(t[1], t[2]), edge_key(t[2], t[0])])
        .collect();
    assert_eq!(unique, from_triangles);
}

#[test]
fn cube_with_flat_normals() {
    let mesh = load_obj_from_path(fixture("cube.obj")).expect("load cube");
    assert_well_formed(&mesh);
    assert_edges_unique_and_complete(&mesh);

    // Four corners per face, no sharing across faces with different normals.
    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.triangle_count(), 12);
    assert_eq!(mesh.edge_count(), 30);
    assert_eq!(mesh.normal(0), Some([0.0, 0.0, 1.0]));

    let bounds = mesh.bounds().unwrap();
    assert_eq!(bounds.min, [-1.0, -1.0, -1.0]);
    assert_eq!(bounds.max, [1.0, 1.0, 1.0]);
}

#[test]
fn cube_positions_only_shares_vertices_and_edges() {
    let mesh = parse_obj_str(&cube_positions_only()).unwrap();
    assert_well_formed(&mesh);
    assert_edges_unique_and_complete(&mesh);

    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 12);
    // 12 cube edges plus one diagonal per face.
    assert_eq!(mesh.edge_count(), 18);
    assert!(mesh.normals.iter().all(|&n| n == 0.0));
}

#[test]
fn parsing_is_idempotent() {
    let src = std::fs::read_to_string(fixture("cube.obj")).unwrap();
    let first = parse_obj_str(&src).unwrap();
    let second = parse_obj_str(&src).unwrap();
    assert_eq!(first, second);
}

#[test]
fn repeated_faces_do_not_grow_the_vertex_table() {
    let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
    let once = parse_obj_str(src).unwrap();
    let twice = parse_obj_str(&format!("{src}f 1 2 3\nf 2 3 1\n")).unwrap();
    assert_eq!(once.vertex_count(), twice.vertex_count());
    assert_eq!(twice.indices, vec![0, 1, 2, 0, 1, 2, 1, 2, 0]);
    assert_eq!(once.wireframe_indices, twice.wireframe_indices);
}

#[test]
fn load_error_names_line_and_file() {
    let dir = std::env::temp_dir().join("teapot-viewer-asset-tests");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("broken.obj");
    std::fs::write(&path, "v 0 0 0\nv 1 0 0\nf 1 2 9\n").unwrap();

    let err = load_obj_from_path(&path).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("broken.obj"), "{chain}");
    assert!(chain.contains("line 3"), "{chain}");
    assert!(chain.contains("position index 9"), "{chain}");
}
