//! Mesh loading: Wavefront OBJ parsing and normalization into flat,
//! render-ready triangle lists.

pub mod error;
pub mod mesh;
pub mod normalize;
pub mod obj;

use std::path::Path;

pub use error::{Attribute, MeshError, MeshResult};
pub use mesh::{Aabb, GpuVertex, NormalSource, RawMesh, RenderMesh};
pub use normalize::{face_normal, normalize};
pub use obj::{parse_obj_path, parse_obj_reader, parse_obj_str};

/// Load an OBJ file and normalize it in one step.
pub fn load_mesh(path: impl AsRef<Path>) -> MeshResult<RenderMesh> {
    let path = path.as_ref();
    log::info!("Loading OBJ mesh from {:?}", path);
    let raw = parse_obj_path(path)?;
    finish(raw)
}

/// Same as [`load_mesh`] for in-memory OBJ text.
pub fn load_mesh_from_str(contents: &str) -> MeshResult<RenderMesh> {
    finish(parse_obj_str(contents)?)
}

fn finish(raw: RawMesh) -> MeshResult<RenderMesh> {
    log::debug!(
        "Parsed {} positions, {} normals, {} texcoords, {} triangles",
        raw.positions.len(),
        raw.normals.len(),
        raw.texcoords.len(),
        raw.triangle_count()
    );
    let mesh = normalize(raw)?;
    if mesh.is_empty() {
        log::warn!("OBJ contained no triangles");
    }
    log::info!(
        "Loaded mesh: {} triangles, normals {:?}, texcoords={}",
        mesh.triangle_count(),
        mesh.normal_source,
        mesh.has_texcoords()
    );
    Ok(mesh)
}
