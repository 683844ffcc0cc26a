//! CPU-side mesh representations: the parser's raw streams and the
//! render-ready per-corner arrays produced from them.

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Attribute arrays and index streams exactly as the OBJ file declared them.
///
/// Index streams are 0-based and flattened across faces, one entry per
/// triangle corner. Optional streams are `None` when no face carried that
/// component, which keeps "no normals" distinct from "no faces".
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawMesh {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub position_indices: Vec<usize>,
    pub texcoord_indices: Option<Vec<usize>>,
    pub normal_indices: Option<Vec<usize>>,
}

impl RawMesh {
    /// Number of triangles described by the position stream.
    pub fn triangle_count(&self) -> usize {
        self.position_indices.len() / 3
    }
}

/// Where the normals of a [`RenderMesh`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NormalSource {
    /// Resolved from `vn` records, possibly smooth per-vertex normals.
    FromFile,
    /// Flat per-triangle normals computed from the positions.
    Synthesized,
}

/// Flat triangle list: every three consecutive entries form one triangle.
///
/// `vertices` and `normals` always have equal length; `texcoords` is either
/// empty or the same length.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderMesh {
    pub vertices: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub texcoords: Vec<[f32; 2]>,
    pub normal_source: NormalSource,
}

impl RenderMesh {
    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn has_texcoords(&self) -> bool {
        !self.texcoords.is_empty()
    }

    /// Iterate over triangles as corner position triples.
    pub fn triangles(&self) -> impl Iterator<Item = [[f32; 3]; 3]> + '_ {
        self.vertices.chunks_exact(3).map(|c| [c[0], c[1], c[2]])
    }

    /// Axis-aligned bounds of all vertices, `None` for an empty mesh.
    pub fn bounds(&self) -> Option<Aabb> {
        let mut iter = self.vertices.iter().map(|&v| Vec3::from_array(v));
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
        Some(Aabb { min, max })
    }

    /// Interleave the per-corner arrays for upload as a non-indexed
    /// triangle list. Missing texcoords become `[0, 0]`.
    pub fn to_gpu_vertices(&self) -> Vec<GpuVertex> {
        self.vertices
            .iter()
            .zip(&self.normals)
            .enumerate()
            .map(|(i, (&position, &normal))| GpuVertex {
                position,
                normal,
                uv: self.texcoords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }
}

/// Axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Interleaved vertex: position + normal + uv.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}
