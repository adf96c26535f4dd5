use kaleido::Kaleidoscope;

fn main() {
    env_logger::init();

    if let Err(err) = Kaleidoscope::new().run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}
