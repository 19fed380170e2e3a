mod app;
mod config;
mod debug;
mod particles;
mod platform;
mod render;
mod scheduler;
mod sim;
mod spatial;
mod util;

use clap::Parser;

fn main() {
    env_logger::init();
    log::info!("ReefTank starting up");

    if let Err(e) = app::run(app::Cli::parse()) {
        log::error!("Fatal error: {e:#}");
        std::process::exit(1);
    }
}
