use crate::cli::run;

pub mod cli;
mod config;
pub mod domain;
pub mod metadata;
pub mod session;

fn main() {
    env_logger::init();
    run();
}
