//! Pie chart geometry
//!
//! Angles are in degrees, measured clockwise from 12 o'clock. Slices are laid
//! out in breakdown order, each spanning `percentage * 3.6` degrees, so the
//! first starts at 0 and the last ends at 360.

use std::path::Path as FsPath;

use serde::Serialize;
use svg::node::element::{Circle, Group, Path, Text};
use svg::Document;

use super::summary::{breakdown_total, CategoryTotal};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::{Category, Money};

/// Rendered size of the SVG chart in pixels
pub const CHART_SIZE: u32 = 180;
/// Side of the square SVG view box
pub const VIEW_BOX: f64 = 42.0;
/// Radius of the pie inside the view box
pub const PIE_RADIUS: f64 = 15.0;
/// Radius of the center disc holding the labels
pub const CENTER_RADIUS: f64 = 10.0;

const FULL_CIRCLE_EPSILON: f64 = 1e-9;

/// One category's share of the pie
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PieSlice {
    pub category: &'static Category,
    pub amount: Money,
    /// Share of the grand total, 0 to 100
    pub percentage: f64,
    pub start_angle: f64,
    pub end_angle: f64,
}

impl PieSlice {
    /// Angular extent in degrees
    pub fn span(&self) -> f64 {
        self.end_angle - self.start_angle
    }

    /// Whether this slice covers the whole circle
    pub fn is_full_circle(&self) -> bool {
        self.span() >= 360.0 - FULL_CIRCLE_EPSILON
    }

    /// Whether `angle` (degrees, already normalized to [0, 360)) falls in this slice
    pub fn contains_angle(&self, angle: f64) -> bool {
        angle >= self.start_angle && angle < self.end_angle
    }
}

/// Lay out a breakdown as pie slices
///
/// A zero grand total (including an empty breakdown) yields no slices, so no
/// division by zero can reach the output.
pub fn pie_slices(breakdown: &[CategoryTotal]) -> Vec<PieSlice> {
    let total = breakdown_total(breakdown);
    if !total.is_positive() {
        return Vec::new();
    }

    let mut cumulative = 0.0;
    breakdown
        .iter()
        .filter_map(|entry| {
            let percentage = entry.amount.percentage_of(total)?;
            let slice = PieSlice {
                category: entry.category,
                amount: entry.amount,
                percentage,
                start_angle: cumulative * 3.6,
                end_angle: (cumulative + percentage) * 3.6,
            };
            cumulative += percentage;
            Some(slice)
        })
        .collect()
}

/// Point on a circle of `radius` around `center` at a chart angle
pub fn polar_to_cartesian(center: (f64, f64), radius: f64, angle_degrees: f64) -> (f64, f64) {
    let radians = (angle_degrees - 90.0).to_radians();
    (
        center.0 + radius * radians.cos(),
        center.1 + radius * radians.sin(),
    )
}

fn large_arc_flag(start_angle: f64, end_angle: f64) -> u8 {
    if end_angle - start_angle <= 180.0 {
        0
    } else {
        1
    }
}

/// Closed wedge path that starts on the rim
///
/// `M sx sy A r r 0 flag 1 ex ey L cx cy Z`
pub fn arc_path(center: (f64, f64), radius: f64, start_angle: f64, end_angle: f64) -> String {
    let (sx, sy) = polar_to_cartesian(center, radius, start_angle);
    let (ex, ey) = polar_to_cartesian(center, radius, end_angle);
    format!(
        "M {} {} A {} {} 0 {} 1 {} {} L {} {} Z",
        sx,
        sy,
        radius,
        radius,
        large_arc_flag(start_angle, end_angle),
        ex,
        ey,
        center.0,
        center.1
    )
}

/// Closed wedge path around the origin, starting at the center
///
/// `M 0 0 L x1 y1 A r r 0 flag 1 x2 y2 Z`
pub fn sector_path(radius: f64, start_angle: f64, end_angle: f64) -> String {
    let (x1, y1) = polar_to_cartesian((0.0, 0.0), radius, start_angle);
    let (x2, y2) = polar_to_cartesian((0.0, 0.0), radius, end_angle);
    format!(
        "M 0 0 L {} {} A {} {} 0 {} 1 {} {} Z",
        x1,
        y1,
        radius,
        radius,
        large_arc_flag(start_angle, end_angle),
        x2,
        y2
    )
}

/// The slice covering `angle` degrees
///
/// Angles are normalized into [0, 360). An angle past the last slice's end
/// through rounding resolves to the last slice.
pub fn slice_at_angle(slices: &[PieSlice], angle: f64) -> Option<&PieSlice> {
    if !angle.is_finite() {
        return None;
    }
    let angle = angle.rem_euclid(360.0);
    slices
        .iter()
        .find(|slice| slice.contains_angle(angle))
        .or_else(|| slices.last())
}

/// Colors for the SVG document
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartTheme {
    pub slice_stroke: &'static str,
    pub center_fill: &'static str,
    pub center_stroke: &'static str,
    pub title_fill: &'static str,
    pub subtitle_fill: &'static str,
}

impl ChartTheme {
    pub const LIGHT: ChartTheme = ChartTheme {
        slice_stroke: "white",
        center_fill: "white",
        center_stroke: "#e2e8f0",
        title_fill: "#1e293b",
        subtitle_fill: "#64748b",
    };

    pub const DARK: ChartTheme = ChartTheme {
        slice_stroke: "#1e293b",
        center_fill: "#1e293b",
        center_stroke: "#334155",
        title_fill: "#f1f5f9",
        subtitle_fill: "#94a3b8",
    };

    pub fn for_dark_mode(dark_mode: bool) -> Self {
        if dark_mode {
            Self::DARK
        } else {
            Self::LIGHT
        }
    }
}

/// Build the SVG pie chart for a set of slices
pub fn render_svg(slices: &[PieSlice], theme: ChartTheme) -> Document {
    let center = VIEW_BOX / 2.0;

    let wedges = slices.iter().fold(
        Group::new().set("transform", format!("translate({}, {})", center, center)),
        |group, slice| {
            let label = format!("{} {:.1}%", slice.category.name, slice.percentage);
            if slice.is_full_circle() {
                // Coinciding arc endpoints draw nothing
                group.add(
                    Circle::new()
                        .set("cx", 0)
                        .set("cy", 0)
                        .set("r", PIE_RADIUS)
                        .set("fill", slice.category.color)
                        .set("stroke", theme.slice_stroke)
                        .set("stroke-width", 0.5)
                        .set("data-category", label),
                )
            } else {
                group.add(
                    Path::new()
                        .set("d", sector_path(PIE_RADIUS, slice.start_angle, slice.end_angle))
                        .set("fill", slice.category.color)
                        .set("stroke", theme.slice_stroke)
                        .set("stroke-width", 0.5)
                        .set("data-category", label),
                )
            }
        },
    );

    let disc = Circle::new()
        .set("cx", center)
        .set("cy", center)
        .set("r", CENTER_RADIUS)
        .set("fill", theme.center_fill)
        .set("stroke", theme.center_stroke)
        .set("stroke-width", 0.5);

    let title = Text::new("Total")
        .set("x", center)
        .set("y", center - 2.0)
        .set("text-anchor", "middle")
        .set("dominant-baseline", "middle")
        .set("font-size", 3.5)
        .set("font-weight", "bold")
        .set("fill", theme.title_fill);

    let subtitle = Text::new(format!("{} cats", slices.len()))
        .set("x", center)
        .set("y", center + 2.0)
        .set("text-anchor", "middle")
        .set("dominant-baseline", "middle")
        .set("font-size", 3)
        .set("fill", theme.subtitle_fill);

    Document::new()
        .set("width", CHART_SIZE)
        .set("height", CHART_SIZE)
        .set("viewBox", (0, 0, VIEW_BOX, VIEW_BOX))
        .add(wedges)
        .add(disc)
        .add(title)
        .add(subtitle)
}

/// Write an SVG document to disk
pub fn save_svg<P: AsRef<FsPath>>(path: P, document: &Document) -> ExpenseResult<()> {
    let path = path.as_ref();
    svg::save(path, document).map_err(|e| {
        ExpenseError::Export(format!("Failed to write chart to {}: {}", path.display(), e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CATEGORIES;

    const TOLERANCE: f64 = 1e-6;

    fn breakdown(amounts: &[(usize, i64)]) -> Vec<CategoryTotal> {
        amounts
            .iter()
            .map(|(index, cents)| CategoryTotal {
                category: &CATEGORIES[*index],
                amount: Money::from_cents(*cents),
            })
            .collect()
    }

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < TOLERANCE,
            "expected {} got {}",
            expected,
            actual
        );
    }

    #[test]
    fn test_scenario_ten_twenty_seventy() {
        let slices = pie_slices(&breakdown(&[(0, 1_000), (1, 2_000), (2, 7_000)]));

        assert_eq!(slices.len(), 3);
        assert_close(slices[0].span(), 36.0);
        assert_close(slices[1].span(), 72.0);
        assert_close(slices[2].span(), 252.0);
        assert_close(slices[0].start_angle, 0.0);
        assert_close(slices[1].start_angle, 36.0);
        assert_close(slices[2].start_angle, 108.0);
        assert_close(slices[2].end_angle, 360.0);
    }

    #[test]
    fn test_empty_and_zero_inputs() {
        assert!(pie_slices(&[]).is_empty());
        assert!(pie_slices(&breakdown(&[(0, 0), (3, 0)])).is_empty());
    }

    #[test]
    fn test_property_slices_partition_circle() {
        let mut seed: u64 = 7;
        for round in 0..40 {
            let count = round % 8 + 1;
            let entries: Vec<(usize, i64)> = (0..count)
                .map(|i| {
                    seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1);
                    (i, ((seed >> 33) % 50_000) as i64 + 1)
                })
                .collect();
            let slices = pie_slices(&breakdown(&entries));

            assert_close(slices[0].start_angle, 0.0);
            assert_close(slices[slices.len() - 1].end_angle, 360.0);
            for pair in slices.windows(2) {
                assert_close(pair[0].end_angle, pair[1].start_angle);
            }
            let percent: f64 = slices.iter().map(|s| s.percentage).sum();
            assert_close(percent, 100.0);
            assert!(slices
                .iter()
                .all(|s| s.start_angle.is_finite() && s.end_angle.is_finite()));
        }
    }

    #[test]
    fn test_arc_path_layout() {
        let path = arc_path((21.0, 21.0), 15.0, 0.0, 90.0);
        let parts: Vec<&str> = path.split(' ').collect();

        assert_eq!(parts[0], "M");
        assert_close(parts[1].parse().unwrap(), 21.0);
        assert_close(parts[2].parse().unwrap(), 6.0);
        assert_eq!(&parts[3..9], &["A", "15", "15", "0", "0", "1"]);
        assert_close(parts[9].parse().unwrap(), 36.0);
        assert_close(parts[10].parse().unwrap(), 21.0);
        assert_eq!(&parts[11..], &["L", "21", "21", "Z"]);
    }

    #[test]
    fn test_large_arc_flag() {
        assert!(arc_path((0.0, 0.0), 1.0, 0.0, 180.0).contains(" 0 0 1 "));
        assert!(arc_path((0.0, 0.0), 1.0, 0.0, 180.5).contains(" 0 1 1 "));
        assert!(sector_path(15.0, 108.0, 360.0).contains("A 15 15 0 1 1"));
    }

    #[test]
    fn test_sector_path_starts_at_origin() {
        let path = sector_path(15.0, 0.0, 36.0);
        let parts: Vec<&str> = path.split(' ').collect();

        assert_eq!(&parts[..3], &["M", "0", "0"]);
        assert_eq!(parts[3], "L");
        assert_close(parts[4].parse().unwrap(), 0.0);
        assert_close(parts[5].parse().unwrap(), -15.0);
        assert_eq!(&parts[6..12], &["A", "15", "15", "0", "0", "1"]);
        assert_eq!(parts[parts.len() - 1], "Z");
    }

    #[test]
    fn test_slice_at_angle() {
        let slices = pie_slices(&breakdown(&[(0, 1_000), (1, 2_000), (2, 7_000)]));

        assert_eq!(slice_at_angle(&slices, 10.0).unwrap().category.name, "Food");
        assert_eq!(slice_at_angle(&slices, 36.0).unwrap().category.name, "Transportation");
        assert_eq!(slice_at_angle(&slices, 200.0).unwrap().category.name, "Entertainment");
        assert_eq!(slice_at_angle(&slices, 370.0).unwrap().category.name, "Food");
        assert!(slice_at_angle(&[], 10.0).is_none());
        assert!(slice_at_angle(&slices, f64::NAN).is_none());
    }

    #[test]
    fn test_render_svg() {
        let slices = pie_slices(&breakdown(&[(0, 1_000), (7, 3_000)]));
        let doc = render_svg(&slices, ChartTheme::LIGHT).to_string();

        assert!(doc.contains("viewBox=\"0 0 42 42\""));
        assert!(doc.contains("translate(21, 21)"));
        assert!(doc.contains("#FF6B6B"));
        assert!(doc.contains("#8D99AE"));
        assert!(doc.contains("2 cats"));
        assert!(doc.contains("Total"));
    }

    #[test]
    fn test_single_slice_renders_full_circle() {
        let slices = pie_slices(&breakdown(&[(4, 5_000)]));
        assert!(slices[0].is_full_circle());

        let doc = render_svg(&slices, ChartTheme::DARK).to_string();
        assert!(doc.contains("r=\"15\""));
        assert!(!doc.contains("M 0 0"));
        assert!(doc.contains("1 cats"));
    }

    #[test]
    fn test_save_svg() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("chart.svg");
        let slices = pie_slices(&breakdown(&[(0, 100)]));

        save_svg(&path, &render_svg(&slices, ChartTheme::LIGHT)).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("<svg"));
    }
}
