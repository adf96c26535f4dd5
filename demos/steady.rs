//! Dense mirror work: many slices, long trails, slow color drift.

use kaleido::Kaleidoscope;

fn main() {
    env_logger::init();

    if let Err(err) = Kaleidoscope::new()
        .with_title("Kaleido - Steady")
        .with_symmetry(16)
        .with_fade_alpha(0.04)
        .with_hue_step(0.25)
        .run()
    {
        log::error!("{err}");
        std::process::exit(1);
    }
}
