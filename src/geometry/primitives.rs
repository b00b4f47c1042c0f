//! # Primitive Shape Generation
//!
//! Functions to generate the shapes the bookstore scene is built from.
//! All shapes are generated with proper normals and texture coordinates,
//! in a Y-up coordinate system.

use super::GeometryData;
use cgmath::Vector3;
use std::f32::consts::PI;

/// Generate a box centered at the origin
///
/// Returns a box spanning `-width/2..width/2` on X, `-height/2..height/2`
/// on Y and `-depth/2..depth/2` on Z. Each face has outward normals and UV
/// coordinates from 0 to 1.
pub fn generate_box(width: f32, height: f32, depth: f32) -> GeometryData {
    let mut data = GeometryData::new();

    let (hw, hh, hd) = (width * 0.5, height * 0.5, depth * 0.5);

    let positions = [
        // Front face
        [-hw, -hh, hd], [hw, -hh, hd], [hw, hh, hd], [-hw, hh, hd],
        // Back face
        [-hw, -hh, -hd], [-hw, hh, -hd], [hw, hh, -hd], [hw, -hh, -hd],
        // Left face
        [-hw, -hh, -hd], [-hw, -hh, hd], [-hw, hh, hd], [-hw, hh, -hd],
        // Right face
        [hw, -hh, hd], [hw, -hh, -hd], [hw, hh, -hd], [hw, hh, hd],
        // Top face
        [-hw, hh, hd], [hw, hh, hd], [hw, hh, -hd], [-hw, hh, -hd],
        // Bottom face
        [-hw, -hh, -hd], [hw, -hh, -hd], [hw, -hh, hd], [-hw, -hh, hd],
    ];

    let tex_coords = [
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0],
        [1.0, 0.0], [0.0, 0.0], [0.0, 1.0], [1.0, 1.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    ];

    let normals = [
        // Front face (positive Z)
        [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0],
        // Back face (negative Z)
        [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0],
        // Left face (negative X)
        [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
        // Right face (positive X)
        [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0],
        // Top face (positive Y)
        [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0],
        // Bottom face (negative Y)
        [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.tex_coords = tex_coords.to_vec();
    data.normals = normals.to_vec();

    // Indices for each face (2 triangles per face, counter-clockwise)
    data.indices = vec![
        0, 1, 2, 2, 3, 0,
        4, 5, 6, 6, 7, 4,
        8, 9, 10, 10, 11, 8,
        12, 13, 14, 14, 15, 12,
        16, 17, 18, 18, 19, 16,
        20, 21, 22, 22, 23, 20,
    ];

    data
}

/// Generate a plane in the XZ plane (horizontal, Y-up)
///
/// # Arguments
/// * `width` - Width of the plane (X direction)
/// * `depth` - Depth of the plane (Z direction)
/// * `width_segments` - Number of subdivisions along width
/// * `depth_segments` - Number of subdivisions along depth
///
/// Returns a plane centered at the origin with normal pointing up (positive Y).
pub fn generate_plane(width: f32, depth: f32, width_segments: u32, depth_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    for z in 0..=d_segs {
        let v = z as f32 / d_segs as f32;
        let pos_z = (v - 0.5) * depth;

        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.vertices.push([pos_x, 0.0, pos_z]);
            data.normals.push([0.0, 1.0, 0.0]);
            data.tex_coords.push([u, v]);
        }
    }

    // Counter-clockwise winding when viewed from above
    for z in 0..d_segs {
        for x in 0..w_segs {
            let i = z * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.push(i);
            data.indices.push(i + 1);
            data.indices.push(next_row);

            data.indices.push(next_row);
            data.indices.push(i + 1);
            data.indices.push(next_row + 1);
        }
    }

    data
}

/// Generate a cylinder with specified parameters
///
/// # Arguments
/// * `radius` - Radius of the cylinder
/// * `height` - Height of the cylinder (along Y-axis)
/// * `segments` - Number of circular segments
///
/// Returns a cylinder centered at the origin extending from -height/2 to height/2 in Y.
pub fn generate_cylinder(radius: f32, height: f32, segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);
    let half_height = height * 0.5;

    // Side vertices
    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        let x = radius * cos_a;
        let z = radius * sin_a;

        data.vertices.push([x, -half_height, z]);
        data.normals.push([cos_a, 0.0, sin_a]);
        data.tex_coords.push([i as f32 / segs as f32, 0.0]);

        data.vertices.push([x, half_height, z]);
        data.normals.push([cos_a, 0.0, sin_a]);
        data.tex_coords.push([i as f32 / segs as f32, 1.0]);
    }

    // Side faces
    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = (i + 1) * 2;
        let top_next = bottom_next + 1;

        data.indices.push(bottom_current);
        data.indices.push(top_current);
        data.indices.push(bottom_next);

        data.indices.push(top_current);
        data.indices.push(top_next);
        data.indices.push(bottom_next);
    }

    // Cap centers
    let center_bottom_idx = data.vertices.len() as u32;
    data.vertices.push([0.0, -half_height, 0.0]);
    data.normals.push([0.0, -1.0, 0.0]);
    data.tex_coords.push([0.5, 0.5]);

    let center_top_idx = data.vertices.len() as u32;
    data.vertices.push([0.0, half_height, 0.0]);
    data.normals.push([0.0, 1.0, 0.0]);
    data.tex_coords.push([0.5, 0.5]);

    // Bottom cap
    for i in 0..segs {
        let current = i * 2;
        let next = (i + 1) * 2;

        data.indices.push(center_bottom_idx);
        data.indices.push(next);
        data.indices.push(current);
    }

    // Top cap
    for i in 0..segs {
        let current = i * 2 + 1;
        let next = (i + 1) * 2 + 1;

        data.indices.push(center_top_idx);
        data.indices.push(current);
        data.indices.push(next);
    }

    data
}

/// Generate an open-front bookshelf
///
/// Serves as the fallback container when no shelf model could be loaded.
/// The shelf sits on the floor: it spans `0..height` on Y, centered on X
/// and Z, with the open side facing positive Z. Panel thickness is fixed.
///
/// # Arguments
/// * `width` - Outer width (X direction)
/// * `height` - Outer height (Y direction)
/// * `depth` - Outer depth (Z direction)
/// * `shelf_count` - Number of horizontal shelf boards between the side panels
pub fn generate_shelf(width: f32, height: f32, depth: f32, shelf_count: u32) -> GeometryData {
    const PANEL: f32 = 0.05;

    let mut data = GeometryData::new();

    // Backing panel
    let backing = generate_box(width, height, PANEL);
    data.append(
        &backing,
        Vector3::new(0.0, height * 0.5, -(depth - PANEL) * 0.5),
    );

    // Side panels
    let side = generate_box(PANEL, height, depth);
    data.append(&side, Vector3::new(-(width - PANEL) * 0.5, height * 0.5, 0.0));
    data.append(&side, Vector3::new((width - PANEL) * 0.5, height * 0.5, 0.0));

    // Horizontal boards, bottom board included
    let board = generate_box(width - 2.0 * PANEL, PANEL, depth);
    let bands = shelf_count.max(1);
    for i in 0..=bands {
        let y = PANEL * 0.5 + i as f32 * (height - PANEL) / bands as f32;
        data.append(&board, Vector3::new(0.0, y, 0.0));
    }

    data
}
