use crate::foundation::core::{Uv, Vec3};
use crate::foundation::error::{ShadeError, ShadeResult};
use crate::source::scene::MeshData;
use serde::Serialize;

/// Per-mesh attribute arrays. Normals and texture coordinates are indexed per corner.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct VertexBuffer {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Uv>,
}

/// One triangle. Optional attribute indices point into the vertex buffer's corner arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Face {
    pub vertex_idx: [u32; 3],
    pub normal_idx: Option<[u32; 3]>,
    pub texture_idx: Option<[u32; 3]>,
    pub mat_idx: u16,
}

/// Fan-triangulate a polygon mesh into engine faces.
///
/// Errors on meshes without vertices, polygons with fewer than three corners, vertex indices out
/// of range, and corner attribute arrays whose length does not match the corner count. Material
/// indices past the last slot fall back to slot 0.
pub fn triangulate(mesh: &MeshData, slot_count: usize) -> ShadeResult<(VertexBuffer, Vec<Face>)> {
    if mesh.vertices.is_empty() {
        return Err(ShadeError::geometry("mesh has no vertices"));
    }

    let corners: usize = mesh.polygons.iter().map(|p| p.vertices.len()).sum();
    let has_normals = corner_attr(mesh.corner_normals.len(), corners, "corner normals")?;
    let has_uvs = corner_attr(mesh.uvs.len(), corners, "uvs")?;
    let vertex_count = mesh.vertices.len();

    let mut faces = Vec::with_capacity(corners.saturating_sub(2 * mesh.polygons.len()));
    let mut cursor = 0u32;
    for (pi, poly) in mesh.polygons.iter().enumerate() {
        let n = poly.vertices.len();
        if n < 3 {
            return Err(ShadeError::geometry(format!(
                "polygon {pi} has {n} corners, need at least 3"
            )));
        }
        if let Some(bad) = poly.vertices.iter().find(|&&v| v as usize >= vertex_count) {
            return Err(ShadeError::geometry(format!(
                "polygon {pi} references vertex {bad}, mesh has {vertex_count}"
            )));
        }

        let mat_idx = if usize::from(poly.material_index) < slot_count {
            poly.material_index
        } else {
            0
        };
        let v = &poly.vertices;
        for i in 1..n - 1 {
            let corner = [cursor, cursor + i as u32, cursor + i as u32 + 1];
            faces.push(Face {
                vertex_idx: [v[0], v[i], v[i + 1]],
                normal_idx: has_normals.then_some(corner),
                texture_idx: has_uvs.then_some(corner),
                mat_idx,
            });
        }
        cursor += n as u32;
    }

    let buf = VertexBuffer {
        positions: mesh.vertices.clone(),
        normals: mesh.corner_normals.clone(),
        uvs: mesh.uvs.clone(),
    };
    Ok((buf, faces))
}

fn corner_attr(len: usize, corners: usize, what: &str) -> ShadeResult<bool> {
    match len {
        0 => Ok(false),
        l if l == corners => Ok(true),
        l => Err(ShadeError::geometry(format!(
            "{l} {what} for {corners} polygon corners"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sync/geometry.rs"]
mod tests;
