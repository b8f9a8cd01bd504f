use crate::error::PlotError;
use crate::figure::{Figure, Rgb};
use plotters::prelude::*;
use std::path::{Path, PathBuf};

pub const SVG_SIZE: (u32, u32) = (1600, 800);

impl From<Rgb> for RGBColor {
    fn from(c: Rgb) -> RGBColor {
        RGBColor(c.0, c.1, c.2)
    }
}

/// Writes every figure as `<dir>/<gyro|accel>.svg`, creating `dir` if needed.
pub fn export_svgs(figures: &[Figure], dir: &Path) -> Result<Vec<PathBuf>, PlotError> {
    std::fs::create_dir_all(dir).map_err(|e| PlotError::io(dir, e))?;
    let mut written = Vec::with_capacity(figures.len());
    for figure in figures {
        let fout = dir.join(format!("{}.svg", figure.sensor.file_stem()));
        save_svg(figure, &fout)?;
        written.push(fout);
    }
    Ok(written)
}

/// Plots one figure to an svg file at the given path.
pub fn save_svg(figure: &Figure, fout: &Path) -> Result<(), PlotError> {
    let svg = render_svg(figure).map_err(|e| PlotError::Render(e.to_string()))?;
    std::fs::write(fout, svg).map_err(|e| PlotError::io(fout, e))?;
    tracing::info!(path = %fout.display(), figure = figure.title(), "wrote svg");
    Ok(())
}

/// Draws all the series of the figure as lines on shared axes, with a legend.
pub fn render_svg(figure: &Figure) -> Result<String, Box<dyn std::error::Error>> {
    let (xmin, xmax) = figure.x_range();
    let (ymin, ymax) = figure.y_range();
    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, SVG_SIZE).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .caption(figure.title(), ("sans-serif", 32))
            .margin(20)
            .x_label_area_size(60)
            .y_label_area_size(100)
            .build_cartesian_2d(xmin..xmax, ymin..ymax)?;
        chart
            .configure_mesh()
            .light_line_style(&TRANSPARENT)
            .bold_line_style(RGBColor(150, 150, 150).stroke_width(2))
            .set_all_tick_mark_size(2)
            .label_style(("sans-serif", 24))
            .x_desc("timestamp")
            .x_labels(10)
            .y_label_formatter(&|y: &f64| format!("{:5}", y))
            .draw()?;

        for series in figure.series.iter() {
            let color: RGBColor = series.color.into();
            chart
                .draw_series(LineSeries::new(
                    series.points.iter().map(|p| (p[0], p[1])),
                    color.stroke_width(2),
                ))?
                .label(series.label.as_str())
                .legend(move |(x, y)| {
                    PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2))
                });
        }

        chart
            .configure_series_labels()
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .label_font(("sans-serif", 20))
            .draw()?;
        root.present()?;
    }
    Ok(svg)
}
