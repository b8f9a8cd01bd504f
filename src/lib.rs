use std::path::Path;
pub mod cli;
pub mod error;
pub mod figure;
pub mod render;
pub mod table;
pub mod viewer;

pub use cli::PlotConfig;
pub use error::PlotError;
pub use figure::{build_figures, Figure, Sensor, Series};
pub use table::Table;

pub const VERSION: Option<&str> = option_env!("CARGO_PKG_VERSION");

/// Reference recording from the EuRoC-style calibration dataset,
/// relative to the working directory.
pub const DEFAULT_REFERENCE_PATH: &str = "data/dataset-calib-imu1_512_16/mav0/imu0/data.csv";

/// timestamp, gyro x y z, accel x y z
pub const MIN_COLUMNS: usize = 7;

/// Loads both tables and checks they are wide enough, generated first.
pub fn load_tables(generated: &Path, reference: &Path) -> Result<(Table, Table), PlotError> {
    let generated = Table::from_csv(generated)?;
    let reference = Table::from_csv(reference)?;
    generated.require_columns(MIN_COLUMNS)?;
    reference.require_columns(MIN_COLUMNS)?;
    Ok((generated, reference))
}

/// Loads the data, builds the Gyro and Accel figures,
/// optionally exports them and then shows them until the window is closed.
pub fn run(config: &PlotConfig) -> Result<Vec<Figure>, PlotError> {
    tracing::info!(
        generated = %config.generated.display(),
        reference = %config.reference.display(),
        "comparing imu data"
    );
    let (generated, reference) = load_tables(&config.generated, &config.reference)?;
    let figures = build_figures(&reference, &generated);

    if let Some(dir) = &config.svg_dir {
        render::export_svgs(&figures, dir)?;
    }
    if config.show {
        viewer::show(figures.clone())?;
    } else {
        tracing::debug!("plot window disabled");
    }
    Ok(figures)
}
