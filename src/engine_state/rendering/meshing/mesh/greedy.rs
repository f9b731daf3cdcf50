//! Greedy meshing implementation for voxel rendering.
//!
//! This module implements the greedy meshing algorithm which combines adjacent coplanar
//! faces with the same block id into larger quads, significantly reducing the number of
//! vertices and draw calls needed to render a voxel world.
//!
//! # Algorithm
//! For each axis `d` and each orientation (back faces, then front faces) a plane
//! sweeps from `x[d] = -1` to `x[d] = N - 1`. At each position every cell of the
//! `u×v` slice compares the current cell with the adjacent one at `x[d] + 1`,
//! writing a signed mask value: the block id of the solid side, negated when the
//! solid side is the adjacent cell. Each slice is then consumed row by row,
//! growing rectangles of identical mask values first along `u`, then along `v`.
//!
//! A chunk only emits faces of its own cells. Cells across the boundary are read
//! to decide visibility but their faces belong to the neighbor's mesh.

use log::debug;
use web_time::Instant;

use cgmath::Vector3;

use crate::config::FaceCulling;
use crate::engine_state::voxels::block::{is_solid, BlockId};
use crate::engine_state::voxels::chunk::VoxelSource;

use super::face::Face;
use super::mesh::MeshData;

/// Signed mask value for one cell pair, `0` when no face is visible.
type MaskValue = i64;

/// Mask value of the boundary between `current` and `adjacent` (one step along `+d`).
///
/// Front passes look for faces owned by `current` pointing toward `+d`; back
/// passes look for faces owned by `adjacent` pointing toward `-d`.
fn mask_value(
    current: BlockId,
    adjacent: BlockId,
    back_face: bool,
    culling: FaceCulling,
) -> MaskValue {
    let (owner, other) = if back_face {
        (adjacent, current)
    } else {
        (current, adjacent)
    };
    if !is_solid(owner) {
        return 0;
    }
    let visible = match culling {
        FaceCulling::Presence => !is_solid(other),
        FaceCulling::Material => owner != other,
    };
    if !visible {
        return 0;
    }
    if back_face {
        -(owner as MaskValue)
    } else {
        owner as MaskValue
    }
}

/// Consumes one `size×size` mask slice, pushing a face per maximal rectangle.
///
/// `origin` is the sweep position with `origin[d]` already on the face plane.
fn merge_slice(
    mask: &mut [MaskValue],
    size: usize,
    origin: [i32; 3],
    (u, v): (usize, usize),
    data: &mut MeshData,
) {
    let mut n = 0;
    for j in 0..size {
        let mut i = 0;
        while i < size {
            let value = mask[n];
            if value == 0 {
                i += 1;
                n += 1;
                continue;
            }

            let mut width = 1;
            while i + width < size && mask[n + width] == value {
                width += 1;
            }

            let mut height = 1;
            'rows: while j + height < size {
                for k in 0..width {
                    if mask[n + k + height * size] != value {
                        break 'rows;
                    }
                }
                height += 1;
            }

            let mut corner = origin;
            corner[u] = i as i32;
            corner[v] = j as i32;
            let mut du = [0; 3];
            du[u] = width as i32;
            let mut dv = [0; 3];
            dv[v] = height as i32;

            data.push_face(&Face::new(
                Vector3::from(corner),
                Vector3::from(du),
                Vector3::from(dv),
                value.unsigned_abs() as BlockId,
                value < 0,
            ));

            for l in 0..height {
                for k in 0..width {
                    mask[n + k + l * size] = 0;
                }
            }

            i += width;
            n += width;
        }
    }
}

/// Builds the mesh of the cube exposed by `source`.
///
/// Lookups outside `0..size` decide whether boundary faces are visible; a
/// source that reports air there gets a closed surface.
///
/// # Arguments
/// * `source` - The cube to mesh, with read access across its boundary
/// * `culling` - Which solid/solid boundaries count as visible
///
/// # Returns
/// Quads in local coordinates (four vertices and six indices each) with flat
/// normals filled in. Empty when nothing is visible.
pub fn build<S: VoxelSource + ?Sized>(source: &S, culling: FaceCulling) -> MeshData {
    let start = Instant::now();
    let size = source.size();
    let n = size as i32;
    let mut data = MeshData::new();
    let mut mask = vec![0 as MaskValue; size * size];

    for back_face in [true, false] {
        for d in 0..3 {
            let u = (d + 1) % 3;
            let v = (d + 2) % 3;
            let mut q = [0; 3];
            q[d] = 1;

            let mut x = [0i32; 3];
            x[d] = -1;
            while x[d] < n {
                // faces whose owning cell lies outside this chunk are the neighbor's
                let owned = if back_face { x[d] + 1 < n } else { x[d] >= 0 };

                let mut cell = 0;
                for xv in 0..n {
                    x[v] = xv;
                    for xu in 0..n {
                        x[u] = xu;
                        mask[cell] = if owned {
                            let current = source.voxel_id_at(x[0], x[1], x[2]);
                            let adjacent =
                                source.voxel_id_at(x[0] + q[0], x[1] + q[1], x[2] + q[2]);
                            mask_value(current, adjacent, back_face, culling)
                        } else {
                            0
                        };
                        cell += 1;
                    }
                }

                x[d] += 1;
                merge_slice(&mut mask, size, x, (u, v), &mut data);
            }
        }
    }

    data.compute_flat_normals();

    debug!(
        "Meshed {}³ volume into {} quads in {:?}",
        size,
        data.quad_count(),
        start.elapsed()
    );

    data
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::AIR;
    use crate::engine_state::voxels::chunk::Volume;

    /// Wraps a volume with a fixed answer for every lookup outside it.
    struct Surrounded<'a> {
        volume: &'a Volume,
        outside: BlockId,
    }

    impl VoxelSource for Surrounded<'_> {
        fn size(&self) -> usize {
            self.volume.size()
        }

        fn voxel_id_at(&self, x: i32, y: i32, z: i32) -> BlockId {
            self.volume.try_get(x, y, z).unwrap_or(self.outside)
        }
    }

    fn normals(data: &MeshData) -> Vec<[f32; 3]> {
        data.vertices.iter().step_by(4).map(|v| v.normal).collect()
    }

    #[test]
    fn empty_volume_has_no_geometry() {
        let data = build(&Volume::new(8), FaceCulling::Presence);
        assert!(data.vertices.is_empty());
        assert!(data.indices.is_empty());
    }

    #[test]
    fn solid_isolated_chunk_is_six_quads() {
        for size in [1, 2, 5, 16] {
            let data = build(&Volume::filled(size, 1), FaceCulling::Presence);
            assert_eq!(data.quad_count(), 6, "size {size}");
            assert_eq!(data.vertices.len(), 24);
            assert_eq!(data.indices.len(), 36);
        }
    }

    #[test]
    fn full_faces_span_the_chunk() {
        let data = build(&Volume::filled(4, 1), FaceCulling::Presence);
        for quad in data.vertices.chunks_exact(4) {
            let min = quad.iter().fold([f32::MAX; 3], |acc, v| {
                [0, 1, 2].map(|i| acc[i].min(v.position[i]))
            });
            let max = quad.iter().fold([f32::MIN; 3], |acc, v| {
                [0, 1, 2].map(|i| acc[i].max(v.position[i]))
            });
            let extents: Vec<f32> = (0..3).map(|i| max[i] - min[i]).collect();
            assert_eq!(extents.iter().filter(|e| **e == 4.0).count(), 2);
        }
    }

    #[test]
    fn two_by_two_slab_merges_each_side() {
        let mut volume = Volume::new(4);
        for x in 0..2 {
            for y in 0..2 {
                volume.set(x, y, 0, 1);
            }
        }
        let data = build(&volume, FaceCulling::Presence);
        assert_eq!(data.quad_count(), 6);
    }

    #[test]
    fn normals_face_outward() {
        let mut volume = Volume::new(3);
        volume.set(1, 1, 1, 1);
        let data = build(&volume, FaceCulling::Presence);
        let center = [1.5f32, 1.5, 1.5];

        for quad in data.vertices.chunks_exact(4) {
            let normal = quad[0].normal;
            assert!(quad.iter().all(|v| v.normal == normal));
            let mid: Vec<f32> = (0..3)
                .map(|i| quad.iter().map(|v| v.position[i]).sum::<f32>() / 4.0)
                .collect();
            let outward: f32 = (0..3).map(|i| (mid[i] - center[i]) * normal[i]).sum();
            assert!(outward > 0.0, "normal {normal:?} at {mid:?}");
        }

        let mut seen = normals(&data);
        seen.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
        seen.dedup();
        assert_eq!(seen.len(), 6);
    }

    #[test]
    fn block_id_is_carried_on_vertices() {
        let mut volume = Volume::new(2);
        volume.set(0, 0, 0, 2);
        let data = build(&volume, FaceCulling::Presence);
        assert!(data.vertices.iter().all(|v| v.block_id == 2.0));
    }

    #[test]
    fn presence_hides_material_boundaries() {
        let mut volume = Volume::new(2);
        for y in 0..2 {
            for z in 0..2 {
                volume.set(0, y, z, 1);
                volume.set(1, y, z, 2);
            }
        }
        let presence = build(&volume, FaceCulling::Presence);
        let material = build(&volume, FaceCulling::Material);

        // the ±x caps plus one strip per material on each remaining side
        assert_eq!(presence.quad_count(), 2 + 4 * 2);
        // plus the two faces between the materials
        assert_eq!(material.quad_count(), presence.quad_count() + 2);
    }

    #[test]
    fn solid_surroundings_hide_boundary_faces() {
        let volume = Volume::filled(4, 1);
        let enclosed = Surrounded { volume: &volume, outside: 1 };
        assert!(build(&enclosed, FaceCulling::Presence).is_empty());

        let open = Surrounded { volume: &volume, outside: AIR };
        assert_eq!(build(&open, FaceCulling::Presence).quad_count(), 6);
    }

    #[test]
    fn solid_neighbor_cells_do_not_emit_faces_here() {
        // empty chunk surrounded by solid cells: those faces belong to the neighbors
        let volume = Volume::new(4);
        let surrounded = Surrounded { volume: &volume, outside: 1 };
        assert!(build(&surrounded, FaceCulling::Presence).is_empty());
    }
}
