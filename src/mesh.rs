use glam::{Vec2, Vec3};
use rayon::prelude::*;

use crate::body::{HullBounds, LocalToWorld};
use crate::field::WaveField;

/// A vertex in 3D space
#[derive(Debug, Clone, Copy)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// A face consisting of three vertex indices
#[derive(Debug, Clone, Copy)]
pub struct Face(pub usize, pub usize, pub usize);

/// The complete mesh
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

impl Mesh {
    /// Create a flat Z-up plane centered on the origin.
    ///
    /// Vertex positions double as the rest positions of the water particles
    /// when the plane is deformed with `apply_wave_field`. Segment counts
    /// below one are raised to one.
    pub fn new_plane(width: f32, length: f32, width_segments: usize, length_segments: usize) -> Self {
        let width_segments = width_segments.max(1);
        let length_segments = length_segments.max(1);
        let vertices: Vec<Vertex> = (0..=length_segments)
            .into_par_iter()
            .flat_map_iter(|y| {
                let v = y as f32 / length_segments as f32;
                (0..=width_segments).map(move |x| {
                    let u = x as f32 / width_segments as f32;
                    Vertex {
                        position: Vec3::new(width * (u - 0.5), length * (v - 0.5), 0.0),
                        normal: Vec3::Z,
                        uv: Vec2::new(u, v),
                    }
                })
            })
            .collect();

        let faces: Vec<Face> = (0..length_segments)
            .flat_map(|y| {
                (0..width_segments).flat_map(move |x| {
                    let a = x + y * (width_segments + 1);
                    let b = x + (y + 1) * (width_segments + 1);
                    let c = (x + 1) + (y + 1) * (width_segments + 1);
                    let d = (x + 1) + y * (width_segments + 1);
                    [Face(a, d, b), Face(b, d, c)]
                })
            })
            .collect();

        Mesh { vertices, faces }
    }

    /// Box mesh filling the given bounds, recentered on the origin
    pub fn from_bounds(bounds: &HullBounds) -> Self {
        let h = bounds.half_extents();
        let corners = [
            Vec3::new(-h.x, -h.y, -h.z),
            Vec3::new(h.x, -h.y, -h.z),
            Vec3::new(h.x, h.y, -h.z),
            Vec3::new(-h.x, h.y, -h.z),
            Vec3::new(-h.x, -h.y, h.z),
            Vec3::new(h.x, -h.y, h.z),
            Vec3::new(h.x, h.y, h.z),
            Vec3::new(-h.x, h.y, h.z),
        ];
        let uvs = [
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ];

        let vertices = corners
            .iter()
            .enumerate()
            .map(|(i, &position)| Vertex {
                position,
                normal: position.normalize_or_zero(),
                uv: uvs[i % 4],
            })
            .collect();

        let faces = vec![
            // Bottom
            Face(0, 2, 1),
            Face(0, 3, 2),
            // Top
            Face(4, 5, 6),
            Face(4, 6, 7),
            // Sides
            Face(0, 1, 5),
            Face(0, 5, 4),
            Face(1, 2, 6),
            Face(1, 6, 5),
            Face(2, 3, 7),
            Face(2, 7, 6),
            Face(3, 0, 4),
            Face(3, 4, 7),
        ];

        Mesh { vertices, faces }
    }

    /// Move every vertex by the wave displacement of its rest position.
    ///
    /// Vertex positions are read as rest positions, so apply this to an
    /// undeformed plane.
    pub fn apply_wave_field(&mut self, field: &WaveField, time: f32) {
        let rest: Vec<Vec2> = self
            .vertices
            .iter()
            .map(|vertex| vertex.position.truncate())
            .collect();
        let displacements = field.evaluate_batch(&rest, time);

        self.vertices
            .par_iter_mut()
            .zip(displacements.par_iter())
            .for_each(|(vertex, d)| vertex.position += *d);

        self.recalculate_normals();
    }

    /// Copy of the mesh with every vertex mapped through `transform`
    pub fn transformed<T: LocalToWorld + ?Sized>(&self, transform: &T) -> Mesh {
        let mut mesh = self.clone();
        for vertex in &mut mesh.vertices {
            vertex.position = transform.local_to_world(vertex.position);
        }
        mesh.recalculate_normals();
        mesh
    }

    /// Recalculate area-weighted vertex normals from the faces
    pub fn recalculate_normals(&mut self) {
        let mut accumulated = vec![Vec3::ZERO; self.vertices.len()];

        for &Face(i1, i2, i3) in &self.faces {
            let v1 = self.vertices[i1].position;
            let v2 = self.vertices[i2].position;
            let v3 = self.vertices[i3].position;
            let normal = (v2 - v1).cross(v3 - v1);

            accumulated[i1] += normal;
            accumulated[i2] += normal;
            accumulated[i3] += normal;
        }

        self.vertices
            .par_iter_mut()
            .zip(accumulated.par_iter())
            .for_each(|(vertex, normal)| {
                vertex.normal = normal.try_normalize().unwrap_or(vertex.normal);
            });
    }

    /// Lowest and highest vertex height
    pub fn height_range(&self) -> Option<(f32, f32)> {
        self.vertices.iter().map(|v| v.position.z).fold(None, |range, z| {
            Some(match range {
                None => (z, z),
                Some((min, max)) => (min.min(z), max.max(z)),
            })
        })
    }
}
