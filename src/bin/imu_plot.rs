use imu_plot::cli::parse_cli;
use imu_plot::{run, PlotError};
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let config = match parse_cli() {
        Ok(config) => config,
        Err(PlotError::Usage(e)) => e.exit(),
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(e.exit_code());
        }
    };

    let default_level = if config.verbose { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(&config) {
        tracing::error!(code = e.exit_code(), "{}", e);
        std::process::exit(e.exit_code());
    }
}
