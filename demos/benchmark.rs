use std::time::Instant;
use ocean_float::prelude::*;

fn main() {
    println!("Running Ocean Float Benchmarks");
    println!("==============================");

    let ocean = Ocean::new(Swell::default(), 1.0).expect("default swell is valid");

    // Parameters for different mesh sizes
    let resolutions = [
        (96, 96),     // the interactive ocean plane
        (500, 500),   // 250k vertices
        (1000, 1000), // 1M vertices
    ];

    for &(width_segments, length_segments) in &resolutions {
        println!("\nMesh size: {}x{} ({} vertices)",
            width_segments,
            length_segments,
            (width_segments + 1) * (length_segments + 1)
        );

        let start = Instant::now();
        let mesh = Mesh::new_plane(192.0, 192.0, width_segments, length_segments);
        println!("  Mesh generation: {:.2?}", start.elapsed());

        let mut wave_mesh = mesh.clone();
        let start = Instant::now();
        wave_mesh.apply_wave_field(ocean.field(), 0.0);
        println!("  Wave deformation: {:.2?}", start.elapsed());
    }

    // Boat update cost, five surface samples per frame
    let mut sim = Simulation::new(&SceneConfig {
        storm_factor: 2.0,
        ..Default::default()
    })
    .expect("default scene is valid");

    let frames = 100_000;
    let start = Instant::now();
    for frame in 1..=frames {
        sim.step(frame as f32 / 60.0);
    }
    let elapsed = start.elapsed();
    println!("\nBoat update: {} frames in {:.2?} ({:.2?} per frame)",
        frames,
        elapsed,
        elapsed / frames
    );
}
