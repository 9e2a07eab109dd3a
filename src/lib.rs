mod cli;
pub mod commands;
pub mod headers;
pub mod models;
pub mod normalize;
pub mod plates;
pub mod program;
pub mod resolver;
pub mod sheets;
pub mod summary;

#[cfg(test)]
mod test_utils;

use clap::Parser;

pub fn run() {
  // Load environment variables from .env file
  dotenvy::dotenv().ok();
  env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

  let cli = cli::Cli::parse();

  let runtime = match tokio::runtime::Runtime::new() {
    Ok(runtime) => runtime,
    Err(e) => {
      log::error!("Failed to start async runtime: {}", e);
      std::process::exit(1);
    }
  };

  if let Err(e) = runtime.block_on(cli::execute(cli)) {
    log::error!("{}", e);
    match serde_json::to_string(&e) {
      Ok(json) => eprintln!("{}", json),
      Err(_) => eprintln!("{}", e),
    }
    std::process::exit(1);
  }
}
