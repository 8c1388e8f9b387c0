//! Language pie chart

use super::Slice;
use std::f64::consts::PI;
use std::fmt::Write;

/// Slices at or above this share get a percentage label
const LABEL_THRESHOLD_PCT: f64 = 3.0;

/// Render `slices` as a standalone `<svg>` pie of `size` pixels.
pub fn pie_chart(slices: &[Slice], size: u32) -> String {
    let radius = f64::from(size) / 2.0;
    let (cx, cy) = (radius, radius);

    let mut svg = format!(
        "<svg width=\"{size}\" height=\"{size}\" viewBox=\"0 0 {size} {size}\" xmlns=\"http://www.w3.org/2000/svg\">\n"
    );

    let mut labels = String::new();
    let mut start_angle = 0.0f64;
    for slice in slices {
        let angle = slice.percentage / 100.0 * 360.0;
        let end_angle = start_angle + angle;

        if slices.len() == 1 {
            // A full-circle arc has identical endpoints and would not draw
            let _ = writeln!(
                svg,
                "  <circle cx=\"{cx:.2}\" cy=\"{cy:.2}\" r=\"{radius:.2}\" fill=\"{}\" stroke=\"#333\" stroke-width=\"0.5\" />",
                slice.color
            );
        } else {
            let (x1, y1) = point(cx, cy, radius, start_angle);
            let (x2, y2) = point(cx, cy, radius, end_angle);
            let large_arc = u8::from(angle > 180.0);
            let _ = writeln!(
                svg,
                "  <path d=\"M {cx:.2} {cy:.2} L {x1:.2} {y1:.2} A {radius:.2} {radius:.2} 0 {large_arc} 1 {x2:.2} {y2:.2} Z\" fill=\"{}\" stroke=\"#333\" stroke-width=\"0.5\" />",
                slice.color
            );
        }

        if slice.percentage >= LABEL_THRESHOLD_PCT {
            let (lx, ly) = if slices.len() == 1 {
                (cx, cy)
            } else {
                point(cx, cy, radius * 0.7, start_angle + angle / 2.0)
            };
            let _ = writeln!(
                labels,
                "  <text x=\"{lx:.2}\" y=\"{ly:.2}\" text-anchor=\"middle\" dominant-baseline=\"middle\" fill=\"{}\" font-weight=\"bold\" font-family=\"monospace\">{}%</text>",
                label_color(slice.color),
                slice.percentage.round()
            );
        }

        start_angle = end_angle;
    }

    svg.push_str(&labels);
    svg.push_str("</svg>");
    svg
}

/// Point on the circle at `degrees` clockwise from twelve o'clock
fn point(cx: f64, cy: f64, radius: f64, degrees: f64) -> (f64, f64) {
    let rad = (degrees - 90.0) * PI / 180.0;
    (cx + radius * rad.cos(), cy + radius * rad.sin())
}

/// Black text on bright fills, white on dark ones
fn label_color(fill: &str) -> &'static str {
    let channel = |range: std::ops::Range<usize>| {
        fill.get(range)
            .and_then(|hex| u8::from_str_radix(hex, 16).ok())
            .map(f64::from)
            .unwrap_or(0.0)
    };
    let brightness = (channel(1..3) * 299.0 + channel(3..5) * 587.0 + channel(5..7) * 114.0) / 1000.0;
    if brightness > 128.0 {
        "#000000"
    } else {
        "#FFFFFF"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slice(name: &str, percentage: f64, color: &'static str) -> Slice {
        Slice {
            name: name.to_string(),
            size: 1,
            percentage,
            color,
        }
    }

    #[test]
    fn one_path_per_slice() {
        let svg = pie_chart(
            &[slice("Rust", 75.0, "#B7410E"), slice("Go", 25.0, "#00ADD8")],
            300,
        );
        assert_eq!(svg.matches("<path").count(), 2);
        assert!(svg.contains(">75%</text>"));
        assert!(svg.contains(">25%</text>"));
        // 75% slice spans more than half the circle
        assert!(svg.contains(" 0 1 1 "));
    }

    #[test]
    fn single_language_is_full_circle() {
        let svg = pie_chart(&[slice("Rust", 100.0, "#B7410E")], 300);
        assert!(svg.contains("<circle"));
        assert!(!svg.contains("<path"));
        assert!(svg.contains(">100%</text>"));
    }

    #[test]
    fn small_slices_are_unlabelled() {
        let svg = pie_chart(
            &[slice("Rust", 98.0, "#B7410E"), slice("Others", 2.0, "#808080")],
            300,
        );
        assert_eq!(svg.matches("<text").count(), 1);
    }

    #[test]
    fn label_contrast() {
        assert_eq!(label_color("#F7DF1E"), "#000000");
        assert_eq!(label_color("#363636"), "#FFFFFF");
    }
}
