use std::{io::Write, path::Path};

use anyhow::{Result, anyhow};
use geo::{BoundingRect, Geometry};

use crate::{
    bivariate::{BivariateClass, ClassifiedRegion, TERTILES},
    common, geom,
    io::svg::{self, Projection, SvgWriter},
    layer::FeatureLayer,
};

const STYLES: [(&str, &str); 6] = [
    (".boundary", "fill:none;stroke:#c2c2c2;stroke-width:4.2"),
    (".region", "stroke:#ffffff;stroke-width:0.2"),
    (".river", "fill:#c2c2c2;stroke:none"),
    (".street", "fill:none;stroke:#5e5e5e;stroke-width:0.25"),
    (".swatch", "stroke:#808080;stroke-width:0.5"),
    (".caption", "font-family:sans-serif;font-size:10px;fill:#333333"),
];

/// Legend swatch side and spacing, in pixels.
const SWATCH: f64 = 18.0;
const GAP: f64 = 2.0;
/// Room reserved under the legend for the x caption.
const CAPTION_HEIGHT: f64 = 14.0;

const X_CAPTION: &str = "Quality of Cycling Infrastructure";
const Y_CAPTION: &str = "Material Deprivation";

/// Layers drawn around the classified regions.
#[derive(Debug, Clone)]
pub struct ContextLayers {
    /// Outer boundary, drawn first as a thick outline.
    pub boundary: FeatureLayer,
    pub rivers: FeatureLayer,
    pub streets: FeatureLayer,
}

impl ContextLayers {
    /// Read the three context layers; geometry only.
    pub fn read(boundary: &Path, rivers: &Path, streets: &Path) -> Result<Self> {
        log::info!("[bivariate::render] reading context layers");
        Ok(Self {
            boundary: FeatureLayer::read(boundary, &[])?,
            rivers: FeatureLayer::read(rivers, &[])?,
            streets: FeatureLayer::read(streets, &[])?,
        })
    }
}

/// Draw the full map to `writer`: boundary, classified regions, rivers, streets, legend.
/// The projection is fitted to the bounds of the classified regions.
pub fn render_map<W: Write>(
    writer: &mut W,
    context: &ContextLayers,
    regions: &[ClassifiedRegion],
    width: f64,
    margin: f64,
) -> Result<()> {
    let bounds = geom::merge_bounds(regions.iter().filter_map(|region| region.geometry.bounding_rect()))
        .ok_or_else(|| anyhow!("[bivariate::render] Could not determine bounds; nothing to draw."))?;

    let projection = Projection::fit(bounds, width, margin);
    let height = projection.height();

    svg::write_svg_header(writer, width, height, projection.bounds())?;
    svg::write_svg_styles(writer, &STYLES)?;

    draw_layer(writer, &context.boundary, "boundary", &projection)?;

    for region in regions {
        writeln!(
            writer,
            r#"<path class="region" data-class="{}" fill-rule="evenodd" style="fill:{}" d="{}"/>"#,
            region.class,
            region.color,
            svg::multipolygon_to_path(&region.geometry, &projection),
        )?;
    }

    draw_layer(writer, &context.rivers, "river", &projection)?;
    draw_layer(writer, &context.streets, "street", &projection)?;
    draw_legend(writer, width, height, margin)?;

    svg::write_svg_footer(writer)
}

/// Render the map into an SVG file at `path`, creating parent directories.
pub fn write_map(
    path: &Path,
    context: &ContextLayers,
    regions: &[ClassifiedRegion],
    width: f64,
    margin: f64,
) -> Result<()> {
    common::ensure_parent_dir(path)?;
    log::info!("[bivariate::render] writing {} regions to {}", regions.len(), path.display());

    let mut writer = SvgWriter::new(path)?;
    render_map(&mut writer, context, regions, width, margin)?;
    writer.flush()?;
    Ok(())
}

/// Draw every geometry of a layer as one path. Open lines are never filled.
fn draw_layer<W: Write>(writer: &mut W, layer: &FeatureLayer, class: &str, projection: &Projection) -> Result<()> {
    for geometry in layer.geoms() {
        let d = svg::geometry_to_path(geometry, projection);
        if d.is_empty() { continue }
        if is_linear(geometry) {
            writeln!(writer, r#"<path class="{class}" style="fill:none" d="{d}"/>"#)?;
        } else {
            writeln!(writer, r#"<path class="{class}" fill-rule="evenodd" d="{d}"/>"#)?;
        }
    }
    Ok(())
}

fn is_linear(geometry: &Geometry<f64>) -> bool {
    match geometry {
        Geometry::LineString(_) | Geometry::MultiLineString(_) | Geometry::Line(_) => true,
        Geometry::GeometryCollection(gc) => !gc.0.is_empty() && gc.0.iter().all(is_linear),
        _ => false,
    }
}

/// 3x3 grid in the lower-right corner: x class left to right, y class bottom to top.
fn draw_legend<W: Write>(writer: &mut W, width: f64, height: f64, margin: f64) -> Result<()> {
    let cell = SWATCH + GAP;
    let side = TERTILES as f64 * cell;
    let left = width - margin - side;
    let top = height - margin - CAPTION_HEIGHT - side;

    writeln!(writer, r#"<g class="legend">"#)?;
    for x in 0..TERTILES {
        for y in 0..TERTILES {
            let class = BivariateClass::new(x, y);
            let color = class.color()
                .ok_or_else(|| anyhow!("[bivariate::render] no colour for class {}", class))?;
            writeln!(
                writer,
                r#"<rect class="swatch" x="{:.3}" y="{:.3}" width="{SWATCH}" height="{SWATCH}" style="fill:{color}"/>"#,
                left + x as f64 * cell,
                top + (TERTILES - 1 - y) as f64 * cell,
            )?;
        }
    }
    writeln!(
        writer,
        r#"<text class="caption" x="{:.3}" y="{:.3}" text-anchor="end">{Y_CAPTION}</text>"#,
        left - 2.0 * GAP,
        top + side / 2.0,
    )?;
    writeln!(
        writer,
        r#"<text class="caption" x="{:.3}" y="{:.3}" text-anchor="end">{X_CAPTION}</text>"#,
        width - margin,
        height - margin,
    )?;
    writeln!(writer, "</g>")?;
    Ok(())
}
