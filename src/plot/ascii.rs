//! ASCII/Unicode plotting for terminal output.
//!
//! This is intentionally "dumb" (fixed-size grid), optimized for:
//! - quick visual sanity checks in a terminal
//! - deterministic output (helpful for golden tests)
//!
//! Plot elements:
//! - history points: `o`
//! - connecting trend line: `-`

use crate::domain::HistoryPoint;

/// Render a score-trend series, oldest point on the left.
pub fn render_history_plot(points: &[HistoryPoint], width: usize, height: usize) -> String {
    let width = width.max(10);
    let height = height.max(5);

    let (y_min, y_max) = score_range(points);
    let (y_min, y_max) = pad_range(y_min, y_max, 0.05);

    let x_max = points.len().saturating_sub(1).max(1) as f64;
    let series: Vec<(f64, f64)> = points
        .iter()
        .enumerate()
        .map(|(i, p)| (i as f64, p.score as f64))
        .collect();

    let mut grid = vec![vec![' '; width]; height];

    // Draw the line first so points can overlay.
    draw_curve(&mut grid, &series, 0.0, x_max, y_min, y_max);
    for &(x, y) in &series {
        let col = map_x(x, 0.0, x_max, width);
        let row = map_y(y, y_min, y_max, height);
        grid[row][col] = 'o';
    }

    let first = points.first().map(|p| p.label.as_str()).unwrap_or("-");
    let last = points.last().map(|p| p.label.as_str()).unwrap_or("-");

    let mut out = String::new();
    out.push_str(&format!(
        "Plot: {first} → {last} | score=[{y_min:.1}, {y_max:.1}]\n"
    ));
    for row in grid {
        out.push_str(&row.into_iter().collect::<String>());
        out.push('\n');
    }
    out
}

fn score_range(points: &[HistoryPoint]) -> (f64, f64) {
    let mut min_y = f64::INFINITY;
    let mut max_y = f64::NEG_INFINITY;
    for p in points {
        min_y = min_y.min(p.score as f64);
        max_y = max_y.max(p.score as f64);
    }
    if !(min_y.is_finite() && max_y.is_finite()) {
        return (600.0, 1000.0);
    }
    if max_y <= min_y {
        return (min_y - 1.0, max_y + 1.0);
    }
    (min_y, max_y)
}

fn pad_range(min: f64, max: f64, frac: f64) -> (f64, f64) {
    let span = (max - min).abs();
    let pad = (span * frac).max(1e-12);
    (min - pad, max + pad)
}

fn map_x(t: f64, t_min: f64, t_max: f64, width: usize) -> usize {
    let width = width.max(2);
    let u = ((t - t_min) / (t_max - t_min)).clamp(0.0, 1.0);
    (u * (width as f64 - 1.0)).round() as usize
}

fn map_y(y: f64, y_min: f64, y_max: f64, height: usize) -> usize {
    let height = height.max(2);
    let u = ((y - y_min) / (y_max - y_min)).clamp(0.0, 1.0);
    // y=top is max -> row 0
    (height as f64 - 1.0 - (u * (height as f64 - 1.0))).round() as usize
}

fn draw_curve(grid: &mut [Vec<char>], curve: &[(f64, f64)], t_min: f64, t_max: f64, y_min: f64, y_max: f64) {
    if curve.len() < 2 {
        return;
    }
    let height = grid.len();
    let width = grid[0].len();

    let mut prev = None;
    for &(t, y) in curve {
        let x = map_x(t, t_min, t_max, width);
        let yy = map_y(y, y_min, y_max, height);
        if let Some((x0, y0)) = prev {
            draw_line(grid, x0, y0, x, yy, '-');
        } else {
            grid[yy][x] = '-';
        }
        prev = Some((x, yy));
    }
}

/// Integer line drawing (Bresenham-ish).
fn draw_line(grid: &mut [Vec<char>], x0: usize, y0: usize, x1: usize, y1: usize, ch: char) {
    let mut x0 = x0 as isize;
    let mut y0 = y0 as isize;
    let x1 = x1 as isize;
    let y1 = y1 as isize;

    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        if y0 >= 0
            && (y0 as usize) < grid.len()
            && x0 >= 0
            && (x0 as usize) < grid[0].len()
            && grid[y0 as usize][x0 as usize] == ' '
        {
            grid[y0 as usize][x0 as usize] = ch;
        }

        if x0 == x1 && y0 == y1 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x0 += sx;
        }
        if e2 <= dx {
            err += dx;
            y0 += sy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(label: &str, score: i64) -> HistoryPoint {
        HistoryPoint {
            label: label.to_string(),
            score,
        }
    }

    #[test]
    fn plot_golden_snapshot_flat() {
        let points = vec![point("2:00", 900), point("1:00", 900), point("0:00", 900)];
        let txt = render_history_plot(&points, 10, 5);
        let expected = concat!(
            "Plot: 2:00 → 0:00 | score=[898.9, 901.1]\n",
            "          \n",
            "          \n",
            "o----o---o\n",
            "          \n",
            "          \n",
        );
        assert_eq!(txt, expected);
    }

    #[test]
    fn rising_series_ends_top_right() {
        let points = vec![point("7d ago", 800), point("1d ago", 820)];
        let txt = render_history_plot(&points, 10, 5);
        let rows: Vec<&str> = txt.lines().skip(1).collect();
        assert_eq!(rows.len(), 5);
        assert!(rows[0].ends_with('o'));
        assert!(rows[4].starts_with('o'));
    }

    #[test]
    fn empty_series_renders_blank_grid() {
        let txt = render_history_plot(&[], 10, 5);
        assert!(txt.starts_with("Plot: - → - |"));
        assert_eq!(txt.lines().count(), 6);
    }
}
