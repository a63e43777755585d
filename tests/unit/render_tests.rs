/*!
 * Tests for SVG shape rendering
 */

use anyhow::Result;
use tempfile::TempDir;

use storyshape::render::ShapeRenderer;

/// Test that a non-empty trajectory renders a polyline and annotations
#[test]
fn test_render_svg_withTrajectory_shouldDrawCurveAndLabels() {
    let svg = ShapeRenderer::default().render_svg(&[0.2, -0.4, 0.8], "Beowulf");

    assert!(svg.contains("<polyline"));
    assert!(svg.contains("BEGINNING"));
    assert!(svg.contains("END"));
    assert!(svg.contains("GOOD FORTUNE"));
    assert!(svg.contains("ILL FORTUNE"));
    // Title is drawn uppercased
    assert!(svg.contains("BEOWULF"));
    assert!(!svg.contains(">Beowulf<"));
}

/// Test that an empty trajectory still renders the axes but no curve
#[test]
fn test_render_svg_withEmptyTrajectory_shouldOmitCurve() {
    let svg = ShapeRenderer::default().render_svg(&[], "empty");

    assert!(!svg.contains("<polyline"));
    assert!(svg.contains("<line"));
    assert!(svg.contains("GOOD FORTUNE"));
}

/// Test that out-of-range values are clamped into the [-1, 1] domain
#[test]
fn test_render_svg_withOutOfRangeValues_shouldClamp() {
    let renderer = ShapeRenderer::new(800, 500);
    let clamped = renderer.render_svg(&[1.0, -1.0], "t");
    let wild = renderer.render_svg(&[5.0, -5.0], "t");

    let points = |svg: &str| {
        let start = svg.find("points=\"").unwrap() + 8;
        let end = svg[start..].find('"').unwrap() + start;
        svg[start..end].to_string()
    };
    assert_eq!(points(&clamped), points(&wild));
}

/// Test that markup characters in the title are escaped
#[test]
fn test_render_svg_withMarkupInTitle_shouldEscape() {
    let svg = ShapeRenderer::default().render_svg(&[0.0], "war & peace <draft>");
    assert!(svg.contains("WAR &amp; PEACE &lt;DRAFT&gt;"));
    assert!(!svg.contains("<DRAFT>"));
}

/// Test writing the shape to a file
#[test]
fn test_render_to_file_withTrajectory_shouldWriteSvg() -> Result<()> {
    let dir = TempDir::new()?;
    let path = dir.path().join("story.shape.svg");

    ShapeRenderer::default().render_to_file(&[0.1, 0.3, -0.2], "story", &path)?;

    let written = std::fs::read_to_string(&path)?;
    assert!(written.starts_with("<svg"));
    assert!(written.trim_end().ends_with("</svg>"));
    Ok(())
}
