use mesh_tools::compat::{point3, vector2, vector3, Point3, Vector2, Vector3};
use std::path::Path;

use crate::error::{OceanError, Result};
use crate::mesh::Mesh;

fn to_gltf_mesh(
    mesh: &Mesh,
) -> (
    Vec<Point3<f32>>,
    Vec<mesh_tools::Triangle>,
    Vec<Vector3<f32>>,
    Vec<Vector2<f32>>,
) {
    let positions = mesh
        .vertices
        .iter()
        .map(|v| point3::new(v.position.x, v.position.y, v.position.z))
        .collect();
    let normals = mesh
        .vertices
        .iter()
        .map(|v| vector3::new(v.normal.x, v.normal.y, v.normal.z))
        .collect();
    let texcoords = mesh
        .vertices
        .iter()
        .map(|v| vector2::new(v.uv.x, v.uv.y))
        .collect();
    let triangles = mesh
        .faces
        .iter()
        .map(|face| mesh_tools::Triangle::new(face.0 as u32, face.1 as u32, face.2 as u32))
        .collect();

    (positions, triangles, normals, texcoords)
}

/// Write the ocean surface, and optionally a hull already placed in world
/// space, to a GLB file.
pub fn export_scene<P: AsRef<Path>>(ocean: &Mesh, hull: Option<&Mesh>, path: P) -> Result<()> {
    let path = path.as_ref();
    let mut builder = mesh_tools::GltfBuilder::new();

    // Translucent, reflective water
    let water_material = builder.create_metallic_material(
        Some("WaterMaterial".to_string()),
        [0.2, 0.4, 0.8, 0.8],
        0.9,
        0.1,
    );
    if let Some(materials) = &mut builder.gltf.materials {
        if let Some(material) = materials.get_mut(water_material) {
            material.double_sided = Some(true);
            material.alpha_mode = Some("BLEND".to_string());
        }
    }

    let (positions, triangles, normals, texcoords) = to_gltf_mesh(ocean);
    let ocean_index = builder.create_simple_mesh(
        Some("OceanSurface".to_string()),
        &positions,
        &triangles,
        Some(normals),
        Some(texcoords),
        Some(water_material),
    );
    let mut nodes = vec![builder.add_node(
        Some("Ocean".to_string()),
        Some(ocean_index),
        None,
        None,
        None,
    )];

    if let Some(hull) = hull {
        let hull_material =
            builder.create_basic_material(Some("HullMaterial".to_string()), [0.8, 0.5, 0.2, 1.0]);
        let (positions, triangles, normals, texcoords) = to_gltf_mesh(hull);
        let hull_index = builder.create_simple_mesh(
            Some("Hull".to_string()),
            &positions,
            &triangles,
            Some(normals),
            Some(texcoords),
            Some(hull_material),
        );
        nodes.push(builder.add_node(
            Some("Boat".to_string()),
            Some(hull_index),
            None,
            None,
            None,
        ));
    }

    let scene_index = builder.add_scene(Some("OceanScene".to_string()), Some(nodes));
    builder.gltf.scene = Some(scene_index);

    let path_str = path.to_str().ok_or_else(|| {
        OceanError::Export(format!("path is not valid UTF-8: {}", path.display()))
    })?;
    builder
        .export_glb(path_str)
        .map_err(|e| OceanError::Export(format!("Failed to export GLB: {}", e)))?;

    Ok(())
}
