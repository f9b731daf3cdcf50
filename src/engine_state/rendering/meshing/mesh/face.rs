use cgmath::Vector3;

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::block::BlockId;

/// Triangle order for a quad whose normal points along `+d`.
const FRONT_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];
/// Triangle order for a quad whose normal points along `-d`.
const BACK_INDICES: [u32; 6] = [2, 1, 0, 3, 2, 0];

/// A merged rectangle of visible block faces, ready to become a quad.
///
/// Corners are stored counter-clockwise around `+d` (lower-left, lower-right,
/// upper-right, upper-left in the `u×v` plane); back faces keep the same corners
/// and reverse the triangle winding instead.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// Corner positions in chunk-local cell coordinates
    pub corners: [Vector3<i32>; 4],
    /// Block id the face is made of
    pub block_id: BlockId,
    /// Whether the face points toward `-d`
    pub back_face: bool,
}

impl Face {
    /// Builds the face whose lower-left corner is `origin`, spanning `du` and `dv`.
    pub fn new(
        origin: Vector3<i32>,
        du: Vector3<i32>,
        dv: Vector3<i32>,
        block_id: BlockId,
        back_face: bool,
    ) -> Self {
        Face {
            corners: [origin, origin + du, origin + du + dv, origin + dv],
            block_id,
            back_face,
        }
    }

    /// The four corner vertices, normals left for the mesher to fill in.
    pub fn vertices(&self) -> [Vertex; 4] {
        self.corners.map(|corner| {
            Vertex::new(
                [corner.x as f32, corner.y as f32, corner.z as f32],
                self.block_id,
            )
        })
    }

    /// The six indices of the quad's two triangles, offset by `base`.
    pub fn indices(&self, base: u32) -> [u32; 6] {
        let order = if self.back_face {
            BACK_INDICES
        } else {
            FRONT_INDICES
        };
        order.map(|index| base + index)
    }
}
