//! Expands a [`RawMesh`] into a flat, render-ready [`RenderMesh`].

use glam::Vec3;

use crate::error::{Attribute, MeshError, MeshResult};
use crate::mesh::{NormalSource, RawMesh, RenderMesh};

/// Resolve every index stream and fill in flat normals when the file has
/// none. Pure: no I/O, no shared state.
pub fn normalize(raw: RawMesh) -> MeshResult<RenderMesh> {
    let corners = raw.position_indices.len();
    if corners % 3 != 0 {
        return Err(MeshError::Shape {
            stream: "position index",
            len: corners,
            expected: "a multiple of 3".to_owned(),
        });
    }
    check_stream_len("texcoord index", raw.texcoord_indices.as_deref(), corners)?;
    check_stream_len("normal index", raw.normal_indices.as_deref(), corners)?;

    let vertices = resolve(&raw.positions, &raw.position_indices, Attribute::Position)?;

    let texcoords = match raw.texcoord_indices.as_deref() {
        Some(indices) => resolve(&raw.texcoords, indices, Attribute::Texcoord)?,
        None => Vec::new(),
    };

    // An empty `vn` table means there is nothing to resolve against.
    let (normals, normal_source) = match raw.normal_indices.as_deref() {
        Some(indices) if !raw.normals.is_empty() => (
            resolve(&raw.normals, indices, Attribute::Normal)?,
            NormalSource::FromFile,
        ),
        _ => (flat_normals(&vertices), NormalSource::Synthesized),
    };

    Ok(RenderMesh {
        vertices,
        normals,
        texcoords,
        normal_source,
    })
}

fn check_stream_len(
    stream: &'static str,
    indices: Option<&[usize]>,
    corners: usize,
) -> MeshResult<()> {
    match indices {
        Some(indices) if indices.len() != corners => Err(MeshError::Shape {
            stream,
            len: indices.len(),
            expected: format!("{corners} (one per corner)"),
        }),
        _ => Ok(()),
    }
}

fn resolve<T: Copy>(values: &[T], indices: &[usize], attribute: Attribute) -> MeshResult<Vec<T>> {
    indices
        .iter()
        .enumerate()
        .map(|(corner, &index)| {
            values.get(index).copied().ok_or(MeshError::Index {
                attribute,
                index,
                len: values.len(),
                corner,
            })
        })
        .collect()
}

/// One normal per triangle, repeated on its three corners.
fn flat_normals(vertices: &[[f32; 3]]) -> Vec<[f32; 3]> {
    let mut normals = Vec::with_capacity(vertices.len());
    let mut degenerate = 0usize;
    for tri in vertices.chunks_exact(3) {
        let n = face_normal(tri[0], tri[1], tri[2]);
        if n == [0.0; 3] {
            degenerate += 1;
        }
        normals.extend_from_slice(&[n, n, n]);
    }
    if degenerate > 0 {
        log::warn!("{} degenerate triangles got a zero normal", degenerate);
    }
    normals
}

/// Unit normal of triangle `abc` by the right-hand rule.
///
/// A zero-area triangle yields the zero vector instead of NaNs.
pub fn face_normal(a: [f32; 3], b: [f32; 3], c: [f32; 3]) -> [f32; 3] {
    let a = Vec3::from_array(a);
    let ab = Vec3::from_array(b) - a;
    let ac = Vec3::from_array(c) - a;
    let cross = ab.cross(ac);
    let len = cross.length();
    if len == 0.0 {
        cross.to_array()
    } else {
        (cross / len).to_array()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::parse_obj_str;

    fn approx(a: [f32; 3], b: [f32; 3]) -> bool {
        a.iter().zip(b.iter()).all(|(x, y)| (x - y).abs() < 1e-6)
    }

    #[test]
    fn unit_right_triangle_faces_positive_z() {
        let raw = parse_obj_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").expect("parse");
        let mesh = normalize(raw).expect("normalize");
        assert_eq!(mesh.triangle_count(), 1);
        assert_eq!(mesh.normal_source, NormalSource::Synthesized);
        assert_eq!(mesh.normals, vec![[0.0, 0.0, 1.0]; 3]);
        assert!(mesh.texcoords.is_empty());
    }

    #[test]
    fn synthesized_normals_are_flat_per_triangle() {
        let src = "v 0 0 0\nv 2 0 0\nv 2 3 0\nv 0 0 5\nf 1 2 3\nf 1 2 4\n";
        let mesh = normalize(parse_obj_str(src).expect("parse")).expect("normalize");
        assert_eq!(mesh.normals.len(), 6);
        for (tri, normals) in mesh.triangles().zip(mesh.normals.chunks_exact(3)) {
            assert_eq!(normals[0], normals[1]);
            assert_eq!(normals[1], normals[2]);
            let expected = face_normal(tri[0], tri[1], tri[2]);
            assert!(approx(normals[0], expected));
        }
        assert!(approx(mesh.normals[0], [0.0, 0.0, 1.0]));
        assert!(approx(mesh.normals[3], [0.0, -1.0, 0.0]));
    }

    #[test]
    fn degenerate_triangles_get_zero_normal() {
        assert_eq!(face_normal([0.0; 3], [1.0, 1.0, 1.0], [2.0, 2.0, 2.0]), [0.0; 3]);
        assert_eq!(face_normal([1.0; 3], [1.0; 3], [1.0; 3]), [0.0; 3]);

        let raw = parse_obj_str("v 0 0 0\nv 1 0 0\nv 2 0 0\nf 1 2 3\n").expect("parse");
        let mesh = normalize(raw).expect("degenerate is not an error");
        assert!(mesh.normals.iter().all(|n| *n == [0.0; 3]));
    }

    #[test]
    fn file_normals_are_resolved_per_corner() {
        let src = r#"
            v 0 0 0
            v 1 0 0
            v 1 1 0
            v 0 1 0
            vn 0 0 1
            vn 0 0.6 0.8
            vt 0 0
            vt 1 0
            vt 1 1
            vt 0 1
            f 1/1/1 2/2/2 3/3/1 4/4/2
        "#;
        let mesh = normalize(parse_obj_str(src).expect("parse")).expect("normalize");
        assert_eq!(mesh.normal_source, NormalSource::FromFile);
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.normals.len(), 6);
        assert_eq!(mesh.texcoords.len(), 6);
        assert_eq!(mesh.normals[1], [0.0, 0.6, 0.8]);
        assert_eq!(mesh.normals[2], [0.0, 0.0, 1.0]);
        assert_eq!(mesh.normals[5], [0.0, 0.6, 0.8]);
        assert_eq!(mesh.texcoords[4], [1.0, 1.0]);
        assert_eq!(mesh.vertices[5], [0.0, 1.0, 0.0]);
    }

    #[test]
    fn quad_output_follows_first_vertex_diagonal() {
        let src = "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n";
        let mesh = normalize(parse_obj_str(src).expect("parse")).expect("normalize");
        assert_eq!(
            mesh.vertices,
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ]
        );
        assert!(mesh.normals.iter().all(|n| approx(*n, [0.0, 0.0, 1.0])));
    }

    #[test]
    fn dangling_position_index_is_index_error() {
        let raw = parse_obj_str("v 0 0 0\nv 1 0 0\nf 1 2 3\n").expect("parse records raw indices");
        match normalize(raw) {
            Err(MeshError::Index {
                attribute: Attribute::Position,
                index: 2,
                len: 2,
                corner: 2,
            }) => {}
            other => panic!("expected position index error, got {other:?}"),
        }
    }

    #[test]
    fn dangling_normal_index_is_index_error() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 0 0 1\nf 1//1 2//1 3//2\n";
        let err = normalize(parse_obj_str(src).expect("parse")).unwrap_err();
        assert!(matches!(
            err,
            MeshError::Index {
                attribute: Attribute::Normal,
                ..
            }
        ));
    }

    #[test]
    fn dangling_texcoord_index_is_index_error() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1/1 2/1 3/1\n";
        match normalize(parse_obj_str(src).expect("parse")) {
            Err(MeshError::Index {
                attribute: Attribute::Texcoord,
                index: 0,
                len: 0,
                corner: 0,
            }) => {}
            other => panic!("expected texcoord index error, got {other:?}"),
        }
    }

    #[test]
    fn normal_indices_without_vn_records_fall_back_to_flat() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1//1 2//1 3//1\n";
        let mesh = normalize(parse_obj_str(src).expect("parse")).expect("normalize");
        assert_eq!(mesh.normal_source, NormalSource::Synthesized);
        assert_eq!(mesh.normals, vec![[0.0, 0.0, 1.0]; 3]);
    }

    #[test]
    fn vn_records_without_normal_indices_are_synthesized() {
        let src = "v 0 0 0\nv 1 0 0\nv 0 1 0\nvn 1 0 0\nf 1 2 3\n";
        let mesh = normalize(parse_obj_str(src).expect("parse")).expect("normalize");
        assert_eq!(mesh.normal_source, NormalSource::Synthesized);
        assert_eq!(mesh.normals[0], [0.0, 0.0, 1.0]);
    }

    #[test]
    fn truncated_position_stream_is_shape_error() {
        let raw = RawMesh {
            positions: vec![[0.0; 3]; 3],
            position_indices: vec![0, 1, 2, 0],
            ..RawMesh::default()
        };
        assert!(matches!(normalize(raw), Err(MeshError::Shape { len: 4, .. })));
    }

    #[test]
    fn mismatched_normal_stream_is_shape_error() {
        let raw = RawMesh {
            positions: vec![[0.0; 3]; 3],
            normals: vec![[0.0, 0.0, 1.0]],
            position_indices: vec![0, 1, 2],
            normal_indices: Some(vec![0, 0]),
            ..RawMesh::default()
        };
        assert!(matches!(
            normalize(raw),
            Err(MeshError::Shape {
                stream: "normal index",
                ..
            })
        ));
    }

    #[test]
    fn empty_mesh_normalizes_to_empty() {
        let mesh = normalize(parse_obj_str("# nothing\n").expect("parse")).expect("normalize");
        assert!(mesh.is_empty());
        assert!(mesh.normals.is_empty());
    }
}
