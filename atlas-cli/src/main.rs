//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::init();
    if let Err(err) = atlas_cli::run() {
        eprintln!("atlas: {err}");
        std::process::exit(1);
    }
}
