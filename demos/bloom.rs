//! Heavy bursts on a deep blue ground, cycling color fast.

use kaleido::{Kaleidoscope, Rgba};

fn main() {
    env_logger::init();

    if let Err(err) = Kaleidoscope::new()
        .with_title("Kaleido - Bloom")
        .with_symmetry(6)
        .with_spawn_per_move(8)
        .with_spawn_radius(2.0, 9.0)
        .with_hue_step(4.0)
        .with_fade_alpha(0.15)
        .with_background(Rgba::new(0.0, 0.01, 0.03, 1.0))
        .run()
    {
        log::error!("{err}");
        std::process::exit(1);
    }
}
