use bevy::prelude::*;
use bevy_asset::RenderAssetUsages;
use bevy_mesh::{Indices, PrimitiveTopology};

/// Setup camera for 2D rendering.
///
/// One world unit maps to one logical pixel, with the origin at the window
/// centre.
pub fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
    debug!("Camera spawned");
}

/// Build a filled circle of radius 1 as a triangle fan.
///
/// Every star, planet and halo shares this mesh and is sized through its
/// `Transform::scale`.
pub fn unit_disc_mesh(sides: u32) -> Mesh {
    let n = sides.max(3) as usize;
    let mut positions: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    let mut normals: Vec<[f32; 3]> = Vec::with_capacity(n + 1);
    let mut uvs: Vec<[f32; 2]> = Vec::with_capacity(n + 1);

    // Centre vertex.
    positions.push([0.0, 0.0, 0.0]);
    normals.push([0.0, 0.0, 1.0]);
    uvs.push([0.5, 0.5]);

    for i in 0..n {
        let angle = std::f32::consts::TAU * i as f32 / n as f32;
        let (y, x) = angle.sin_cos();
        positions.push([x, y, 0.0]);
        normals.push([0.0, 0.0, 1.0]);
        uvs.push([x * 0.5 + 0.5, y * 0.5 + 0.5]);
    }

    let rim = n as u32;
    let indices: Vec<u32> = (1..=rim).flat_map(|v| [0, v, v % rim + 1]).collect();

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::RENDER_WORLD,
    );
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(indices));
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unit_disc_is_a_closed_fan_on_the_unit_circle() {
        let mesh = unit_disc_mesh(8);
        assert_eq!(mesh.count_vertices(), 9);

        let Some(Indices::U32(indices)) = mesh.indices() else {
            panic!("expected u32 indices");
        };
        assert_eq!(indices.len(), 8 * 3);
        // Last triangle wraps back to the first rim vertex.
        assert_eq!(&indices[21..], &[0, 8, 1]);
    }

    #[test]
    fn too_few_sides_still_builds_a_triangle() {
        assert_eq!(unit_disc_mesh(1).count_vertices(), 4);
    }
}
