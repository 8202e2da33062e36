mod app;
mod backend;
mod config;
mod error;
mod metadata;
mod player;
mod playlist;
mod runtime;
mod session;
mod tags;
mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()?;
    Ok(())
}
