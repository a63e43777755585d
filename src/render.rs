use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

// @module: Shape rendering to SVG

/// Axis and annotation color
const AXIS_COLOR: &str = "dimgray";

/// Curve color
const CURVE_COLOR: &str = "black";

/// Renders a trajectory as a story-shape SVG.
///
/// The curve is drawn in a [-1, 1] vertical domain with a zero line for
/// neutral fortune and a vertical line marking the story's beginning,
/// annotated the way the classic story-shape sketches are: good fortune up,
/// ill fortune down, beginning left, end right.
#[derive(Debug, Clone)]
pub struct ShapeRenderer {
    /// Canvas width in pixels
    pub width: u32,
    /// Canvas height in pixels
    pub height: u32,
}

impl Default for ShapeRenderer {
    fn default() -> Self {
        Self {
            width: 800,
            height: 500,
        }
    }
}

impl ShapeRenderer {
    /// Create a renderer with an explicit canvas size
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Render the trajectory to an SVG document string
    pub fn render_svg(&self, trajectory: &[f64], title: &str) -> String {
        let w = self.width as f64;
        let h = self.height as f64;
        let margin = 60.0;
        let plot_w = w - 2.0 * margin;
        let plot_h = h - 2.0 * margin;

        // x domain is -0.5..len so the first point sits just inside the
        // start axis; y domain is -1..1
        let x_min = -0.5;
        let x_max = trajectory.len().max(1) as f64;
        let to_x = |x: f64| margin + (x - x_min) / (x_max - x_min) * plot_w;
        let to_y = |y: f64| margin + (1.0 - y) / 2.0 * plot_h;

        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            self.width, self.height, self.width, self.height
        );
        let _ = writeln!(
            svg,
            r#"  <rect width="{}" height="{}" fill="white"/>"#,
            self.width, self.height
        );

        // Neutral-fortune line and story-start line
        let _ = writeln!(
            svg,
            r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1"/>"#,
            to_x(x_min),
            to_y(0.0),
            to_x(x_max),
            to_y(0.0),
            AXIS_COLOR
        );
        let _ = writeln!(
            svg,
            r#"  <line x1="{:.1}" y1="{:.1}" x2="{:.1}" y2="{:.1}" stroke="{}" stroke-width="1"/>"#,
            to_x(0.0),
            to_y(-1.0),
            to_x(0.0),
            to_y(1.0),
            AXIS_COLOR
        );

        if !trajectory.is_empty() {
            let points: Vec<String> = trajectory
                .iter()
                .enumerate()
                .map(|(i, v)| format!("{:.1},{:.1}", to_x(i as f64), to_y(v.clamp(-1.0, 1.0))))
                .collect();
            let _ = writeln!(
                svg,
                r#"  <polyline points="{}" fill="none" stroke="{}" stroke-width="2"/>"#,
                points.join(" "),
                CURVE_COLOR
            );
        }

        let label = |svg: &mut String, x: f64, y: f64, anchor: &str, size: u32, text: &str| {
            let _ = writeln!(
                svg,
                r#"  <text x="{:.1}" y="{:.1}" text-anchor="{}" font-family="sans-serif" font-size="{}" fill="{}">{}</text>"#,
                x, y, anchor, size, AXIS_COLOR, text
            );
        };

        label(&mut svg, margin, to_y(0.0) - 8.0, "start", 12, "BEGINNING");
        label(&mut svg, w - margin, to_y(0.0) - 8.0, "end", 12, "END");
        label(&mut svg, margin, margin - 12.0, "start", 12, "GOOD FORTUNE");
        label(&mut svg, margin, h - margin + 24.0, "start", 12, "ILL FORTUNE");

        let _ = writeln!(
            svg,
            r#"  <text x="{:.1}" y="{:.1}" text-anchor="end" font-family="sans-serif" font-size="18" fill="black">{}</text>"#,
            w - margin,
            h - 16.0,
            escape_text(&title.to_uppercase())
        );

        svg.push_str("</svg>\n");
        svg
    }

    /// Render the trajectory and write it to `path`
    pub fn render_to_file<P: AsRef<Path>>(
        &self,
        trajectory: &[f64],
        title: &str,
        path: P,
    ) -> Result<()> {
        let path = path.as_ref();
        let svg = self.render_svg(trajectory, title);
        fs::write(path, svg).context(format!("Failed to write shape to {:?}", path))?;
        info!("Story shape written to {:?}", path);
        Ok(())
    }
}

/// Escape characters with meaning inside SVG text nodes
fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
