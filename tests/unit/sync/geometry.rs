use super::*;
use crate::source::scene::Polygon;

fn quad_mesh() -> MeshData {
    MeshData {
        vertices: vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
        polygons: vec![Polygon {
            vertices: vec![0, 1, 2, 3],
            material_index: 0,
        }],
        show_instancer: true,
        ..MeshData::default()
    }
}

#[test]
fn quad_fans_into_two_triangles() {
    let (buf, faces) = triangulate(&quad_mesh(), 1).unwrap();
    assert_eq!(buf.positions.len(), 4);
    assert_eq!(faces.len(), 2);
    assert_eq!(faces[0].vertex_idx, [0, 1, 2]);
    assert_eq!(faces[1].vertex_idx, [0, 2, 3]);
    assert!(faces.iter().all(|f| f.normal_idx.is_none() && f.texture_idx.is_none()));
}

#[test]
fn corner_attributes_follow_the_corner_cursor() {
    let mut mesh = quad_mesh();
    mesh.polygons.push(Polygon {
        vertices: vec![1, 2, 3],
        material_index: 1,
    });
    mesh.corner_normals = vec![Vec3::new(0.0, 0.0, 1.0); 7];
    mesh.uvs = vec![Uv::new(0.0, 0.0); 7];

    let (_, faces) = triangulate(&mesh, 2).unwrap();
    assert_eq!(faces.len(), 3);
    assert_eq!(faces[1].normal_idx, Some([0, 2, 3]));
    assert_eq!(faces[2].vertex_idx, [1, 2, 3]);
    assert_eq!(faces[2].normal_idx, Some([4, 5, 6]));
    assert_eq!(faces[2].texture_idx, Some([4, 5, 6]));
    assert_eq!(faces[2].mat_idx, 1);
}

#[test]
fn material_index_past_the_slots_falls_back_to_zero() {
    let mut mesh = quad_mesh();
    mesh.polygons[0].material_index = 5;
    let (_, faces) = triangulate(&mesh, 2).unwrap();
    assert!(faces.iter().all(|f| f.mat_idx == 0));
}

#[test]
fn malformed_meshes_are_errors() {
    let empty = MeshData::default();
    assert!(triangulate(&empty, 1).is_err());

    let mut degenerate = quad_mesh();
    degenerate.polygons[0].vertices = vec![0, 1];
    let err = triangulate(&degenerate, 1).unwrap_err();
    assert!(err.to_string().contains("2 corners"), "{err}");

    let mut out_of_range = quad_mesh();
    out_of_range.polygons[0].vertices = vec![0, 1, 9];
    let err = triangulate(&out_of_range, 1).unwrap_err();
    assert!(err.to_string().contains("vertex 9"), "{err}");

    let mut short_uvs = quad_mesh();
    short_uvs.uvs = vec![Uv::new(0.0, 0.0); 3];
    assert!(triangulate(&short_uvs, 1).is_err());
}
