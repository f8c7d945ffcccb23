use plotters::prelude::*;
use std::path::Path;

use crate::error::{MergeError, Result};

/// Render the cumulative MAF distribution as a step plot. The core hands the
/// renderer the ordered (threshold, count) series and does not consume any
/// result from it.
pub fn plot_cumulative_mafs(cumulative: &[(f64, u64)], path: &Path) -> Result<()> {
    let total = cumulative.last().map(|&(_, count)| count).unwrap_or(0) as f64;

    // Step points: hold the previous count until each threshold is reached
    let mut points: Vec<(f64, f64)> = Vec::with_capacity(2 * cumulative.len() + 2);
    let mut prev = 0.0;
    points.push((0.0, 0.0));
    for &(maf, count) in cumulative {
        points.push((maf, prev));
        points.push((maf, count as f64));
        prev = count as f64;
    }
    points.push((0.5, prev));

    let root_area = SVGBackend::new(path, (1280, 720)).into_drawing_area();
    root_area.fill(&WHITE).map_err(|e| MergeError::Plot {
        source: Box::new(e),
    })?;

    let mut chart = ChartBuilder::on(&root_area)
        .set_label_area_size(LabelAreaPosition::Left, 90)
        .set_label_area_size(LabelAreaPosition::Bottom, 60)
        .margin(20)
        .caption("Cumulative MAF Distribution", ("sans-serif", 32))
        .build_cartesian_2d(0.0..0.5f64, 0.0..(total * 1.05).max(1.0))
        .map_err(|e| MergeError::Plot {
            source: Box::new(e),
        })?;

    chart
        .configure_mesh()
        .label_style(("sans-serif", 20))
        .x_desc("MAF")
        .y_desc("SNPs with MAF <= threshold")
        .draw()
        .map_err(|e| MergeError::Plot {
            source: Box::new(e),
        })?;

    chart
        .draw_series(LineSeries::new(points, BLUE.stroke_width(3)))
        .map_err(|e| MergeError::Plot {
            source: Box::new(e),
        })?;

    root_area.present().map_err(|e| MergeError::Plot {
        source: Box::new(e),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn plot_writes_a_nonempty_svg() {
        let dir = std::env::temp_dir()
            .join("corpusmerge-output-tests")
            .join(format!("{}-plot", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("cum_mafs.svg");

        plot_cumulative_mafs(&[(0.05, 1), (0.1, 3), (0.3, 4)], &path).unwrap();
        let metadata = fs::metadata(&path).unwrap();
        assert!(metadata.len() > 0, "plot output is empty");
    }
}
