use super::{DEFAULT_REFERENCE_PATH, VERSION};
use crate::error::PlotError;
use clap::{App, Arg};
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

pub const REFERENCE_ENV: &str = "IMU_PLOT_REFERENCE";

/// What to load and where to show it.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    pub generated: PathBuf,
    pub reference: PathBuf,
    pub svg_dir: Option<PathBuf>,
    pub show: bool,
    pub verbose: bool,
}

fn app() -> App<'static, 'static> {
    let arg_generated = Arg::with_name("generated_csv")
        .help("csv file with the generated imu data")
        .long_help(
            "csv file with the generated imu data, no header, one sample per row: \
            timestamp, gyro x y z, accel x y z",
        )
        .required(true)
        .index(1);
    let arg_reference = Arg::with_name("reference_csv")
        .help("csv file with the reference imu recording")
        .short("r")
        .long("reference")
        .takes_value(true)
        .env(REFERENCE_ENV)
        .default_value(DEFAULT_REFERENCE_PATH);
    let arg_svg = Arg::with_name("svg_dir")
        .help("also write gyro.svg and accel.svg to this directory")
        .short("s")
        .long("svg")
        .takes_value(true);
    let arg_no_show = Arg::with_name("no_show")
        .help("do not open the plot window")
        .long("no-show")
        .takes_value(false);
    let arg_verbose = Arg::with_name("verbose")
        .help("print verbose information")
        .short("v")
        .long("verbose")
        .takes_value(false)
        .required(false);
    App::new("imu_plot")
        .version(VERSION.unwrap_or("unknown"))
        .author("Luca Peruzzo")
        .about("cli app to plot generated imu data against a reference recording")
        .arg(arg_generated)
        .arg(arg_reference)
        .arg(arg_svg)
        .arg(arg_no_show)
        .arg(arg_verbose)
}

/// Takes the CLI arguments of the current process.
pub fn parse_cli() -> Result<PlotConfig, PlotError> {
    parse_cli_from(std::env::args_os())
}

/// Parses the given arguments, the first one being the program name.
pub fn parse_cli_from<I, T>(args: I) -> Result<PlotConfig, PlotError>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli_args = app().get_matches_from_safe(args)?;
    let generated = PathBuf::from(cli_args.value_of_os("generated_csv").unwrap_or_default());
    let reference = PathBuf::from(
        cli_args
            .value_of_os("reference_csv")
            .unwrap_or_else(|| OsStr::new(DEFAULT_REFERENCE_PATH)),
    );
    let svg_dir = cli_args.value_of_os("svg_dir").map(PathBuf::from);
    Ok(PlotConfig {
        generated,
        reference,
        svg_dir,
        show: !cli_args.is_present("no_show"),
        verbose: cli_args.is_present("verbose"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_path_only() {
        let config = parse_cli_from(vec!["imu_plot", "gen.csv"]).unwrap();
        assert_eq!(config.generated, PathBuf::from("gen.csv"));
        assert_eq!(config.svg_dir, None);
        assert!(config.show);
        assert!(!config.verbose);
        // the environment may override the default, but never leaves it empty
        assert!(!config.reference.as_os_str().is_empty());
    }

    #[test]
    fn all_options() {
        let config = parse_cli_from(vec![
            "imu_plot",
            "-v",
            "--no-show",
            "--svg",
            "plots",
            "-r",
            "ref.csv",
            "gen.csv",
        ])
        .unwrap();
        assert_eq!(
            config,
            PlotConfig {
                generated: PathBuf::from("gen.csv"),
                reference: PathBuf::from("ref.csv"),
                svg_dir: Some(PathBuf::from("plots")),
                show: false,
                verbose: true,
            }
        );
    }

    #[test]
    fn missing_generated_path_is_a_usage_error() {
        let e = parse_cli_from(vec!["imu_plot"]).unwrap_err();
        assert!(matches!(e, PlotError::Usage(_)));
        assert_eq!(e.exit_code(), 1);
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        let e = parse_cli_from(vec!["imu_plot", "--bogus", "gen.csv"]).unwrap_err();
        assert!(matches!(e, PlotError::Usage(_)));
    }
}
