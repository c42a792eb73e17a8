fn main() {
    env_logger::init();
    log::info!("liminal starting up");

    if let Err(e) = liminal::app::run() {
        log::error!("Fatal error: {e}");
        std::process::exit(1);
    }
}
