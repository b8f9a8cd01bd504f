use crate::table::Table;

/// An sRGB colour shared by the svg and the interactive backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const RED: Rgb = Rgb(255, 0, 0);
pub const GREEN: Rgb = Rgb(0, 128, 0);
pub const BLUE: Rgb = Rgb(0, 0, 255);
pub const MAGENTA: Rgb = Rgb(191, 0, 191);
pub const YELLOW: Rgb = Rgb(191, 191, 0);
pub const CYAN: Rgb = Rgb(0, 191, 191);

/// x, y, z colours of the reference and of the generated data
pub const REFERENCE_COLORS: [Rgb; 3] = [RED, GREEN, BLUE];
pub const GENERATED_COLORS: [Rgb; 3] = [MAGENTA, YELLOW, CYAN];

pub const TIME_COLUMN: usize = 0;

/// The two sensors recorded in an imu csv row:
/// timestamp, gyro x y z, accel x y z
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sensor {
    Gyro,
    Accel,
}

impl Sensor {
    pub const ALL: [Sensor; 2] = [Sensor::Gyro, Sensor::Accel];

    pub fn title(self) -> &'static str {
        match self {
            Sensor::Gyro => "Gyro",
            Sensor::Accel => "Accel",
        }
    }

    /// Table columns holding the x, y and z axes.
    pub fn columns(self) -> [usize; 3] {
        match self {
            Sensor::Gyro => [1, 2, 3],
            Sensor::Accel => [4, 5, 6],
        }
    }

    pub fn channel_names(self) -> [&'static str; 3] {
        match self {
            Sensor::Gyro => ["gyro_x", "gyro_y", "gyro_z"],
            Sensor::Accel => ["accel_x", "accel_y", "accel_z"],
        }
    }

    /// File stem used when the figure is exported.
    pub fn file_stem(self) -> &'static str {
        match self {
            Sensor::Gyro => "gyro",
            Sensor::Accel => "accel",
        }
    }
}

/// One line of a figure: a channel against the timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub label: String,
    pub color: Rgb,
    pub points: Vec<[f64; 2]>,
}

impl Series {
    pub fn from_column(table: &Table, col: usize, label: String, color: Rgb) -> Series {
        let points = table
            .column(TIME_COLUMN)
            .zip(table.column(col))
            .map(|(t, v)| [t, v])
            .collect();
        Series {
            label,
            color,
            points,
        }
    }
}

/// A titled plot overlaying the reference and the generated channels of one sensor.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub sensor: Sensor,
    pub series: Vec<Series>,
}

impl Figure {
    /// Reference x y z first (red, green, blue),
    /// then generated x y z (magenta, yellow, cyan).
    /// Both tables must already have been checked to hold the sensor columns.
    pub fn compare(sensor: Sensor, reference: &Table, generated: &Table) -> Figure {
        let mut series = Vec::with_capacity(6);
        for (name, table, colors) in [
            ("reference", reference, REFERENCE_COLORS),
            ("generated", generated, GENERATED_COLORS),
        ]
        .iter()
        {
            for ((&col, channel), &color) in sensor
                .columns()
                .iter()
                .zip(sensor.channel_names().iter())
                .zip(colors.iter())
            {
                let label = format!("{} {}", name, channel);
                series.push(Series::from_column(table, col, label, color));
            }
        }
        Figure { sensor, series }
    }

    pub fn title(&self) -> &'static str {
        self.sensor.title()
    }

    /// Timestamp bounds of all the series, with a 5% margin on each side.
    pub fn x_range(&self) -> (f64, f64) {
        padded_range(self.series.iter().flat_map(|s| s.points.iter().map(|p| p[0])), 20.)
    }

    /// Value bounds of all the series, with a 10% margin on each side.
    pub fn y_range(&self) -> (f64, f64) {
        padded_range(self.series.iter().flat_map(|s| s.points.iter().map(|p| p[1])), 10.)
    }
}

/// The Gyro and Accel figures, in that order.
pub fn build_figures(reference: &Table, generated: &Table) -> Vec<Figure> {
    Sensor::ALL
        .iter()
        .map(|&sensor| Figure::compare(sensor, reference, generated))
        .collect()
}

/// min and max of the finite values, `None` if there are none
pub fn min_and_max<I: Iterator<Item = f64>>(values: I) -> Option<(f64, f64)> {
    let mut finite = values.filter(|v| v.is_finite());
    let first = finite.next()?;
    let (mut min, mut max) = (first, first);
    for v in finite {
        if v > max {
            max = v
        }
        if v < min {
            min = v
        }
    }
    Some((min, max))
}

fn padded_range<I: Iterator<Item = f64>>(values: I, fraction: f64) -> (f64, f64) {
    match min_and_max(values) {
        None => (-1., 1.),
        Some((min, max)) if min == max => (min - 1., max + 1.),
        Some((min, max)) => {
            let margin = (max - min) / fraction;
            (min - margin, max + margin)
        }
    }
}
