mod app;
mod audio;
mod config;
mod library;
mod runtime;
mod session;
mod ui;
mod view;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    runtime::run()
}
