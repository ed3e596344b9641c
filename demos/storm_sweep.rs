use ocean_float::prelude::*;

/// Sweep the storm control across its range and report how far the sampled
/// surface drifts from the true world position at each setting.
fn main() -> Result<()> {
    env_logger::init();

    let mut ocean = Ocean::new(Swell::default(), 0.01)?;
    let time = 3.7;

    println!(
        "{:>6} {:>10} {:>12} {:>14}",
        "storm", "amplitude", "contraction", "max residual"
    );
    for step in 0..=10 {
        let storm = 0.01 + step as f32 * 0.199;
        ocean.set_storm_factor(storm)?;
        let field = ocean.field();

        let mut max_residual: f32 = 0.0;
        for i in 0..200 {
            let world = glam::Vec2::new(i as f32 * 0.96 - 96.0, (i % 20) as f32 * 9.6 - 96.0);
            let rest = field.rest_position(world, time);
            let d = field.evaluate_displacement(rest.x, rest.y, time);
            max_residual = max_residual.max((rest + d.truncate() - world).length());
        }

        println!(
            "{:>6.2} {:>10.3} {:>12.3} {:>14.6}",
            storm,
            ocean.primary_amplitude(),
            field.contraction_bound(),
            max_residual
        );
    }

    Ok(())
}
