//! Geometry to SVG path conversion.

use geo::{Coord, CoordsIter, Geometry, LineString, MultiPolygon, Rect};

/// Linear lon/lat -> SVG coords transform (preserve aspect, Y down).
#[derive(Debug, Clone, Copy)]
pub(crate) struct Projection {
    bounds: Rect<f64>,
    scale: f64,
    margin: f64,
}

impl Projection {
    /// Fit `bounds` into an image `width` pixels wide with `margin` on every side.
    pub(crate) fn fit(bounds: Rect<f64>, width: f64, margin: f64) -> Self {
        let extent = if bounds.width() > 0.0 { bounds.width() } else { bounds.height() };
        let scale = if extent > 0.0 { (width - 2.0 * margin) / extent } else { 1.0 };
        Self { bounds, scale, margin }
    }

    /// Image height implied by the fitted bounds.
    pub(crate) fn height(&self) -> f64 { self.bounds.height() * self.scale + 2.0 * self.margin }

    pub(crate) fn bounds(&self) -> &Rect<f64> { &self.bounds }

    #[inline]
    pub(crate) fn project(&self, coord: &Coord<f64>) -> (f64, f64) {
        let x = self.margin + (coord.x - self.bounds.min().x) * self.scale;
        let y = self.margin + (self.bounds.max().y - coord.y) * self.scale; // invert vertically
        (x, y)
    }
}

/// Build a compact SVG path string for any geometry. Points are skipped.
pub(crate) fn geometry_to_path(geometry: &Geometry<f64>, projection: &Projection) -> String {
    match geometry {
        Geometry::Polygon(polygon) => {
            let mut out = ring_to_path(polygon.exterior(), projection, true);
            for interior in polygon.interiors() {
                out.push_str(&ring_to_path(interior, projection, true));
            }
            out
        }
        Geometry::MultiPolygon(mp) => multipolygon_to_path(mp, projection),
        Geometry::LineString(line) => ring_to_path(line, projection, false),
        Geometry::MultiLineString(lines) => lines.0.iter()
            .map(|line| ring_to_path(line, projection, false))
            .collect(),
        Geometry::GeometryCollection(gc) => gc.0.iter()
            .map(|g| geometry_to_path(g, projection))
            .collect(),
        Geometry::Rect(rect) => geometry_to_path(&Geometry::Polygon(rect.to_polygon()), projection),
        Geometry::Triangle(tri) => geometry_to_path(&Geometry::Polygon(tri.to_polygon()), projection),
        Geometry::Point(_) | Geometry::MultiPoint(_) | Geometry::Line(_) => String::new(),
    }
}

/// Build a compact SVG path string for a MultiPolygon (exteriors + holes).
pub(crate) fn multipolygon_to_path(shape: &MultiPolygon<f64>, projection: &Projection) -> String {
    let mut out = String::new();

    for polygon in &shape.0 {
        out.push_str(&ring_to_path(polygon.exterior(), projection, true));
        for interior in polygon.interiors() {
            out.push_str(&ring_to_path(interior, projection, true));
        }
    }

    out
}

/// Build a compact SVG path string for a LineString, closing it if it is a ring.
fn ring_to_path(ring: &LineString<f64>, projection: &Projection, closed: bool) -> String {
    let mut out = String::new();

    let mut coords = ring.coords_iter()
        .map(|coord| projection.project(&coord));
    if let Some((x, y)) = coords.next() {
        out.push_str(&format!(" M{x:.3},{y:.3}"));
        for (x, y) in coords {
            out.push_str(&format!(" L{x:.3},{y:.3}"));
        }
        if closed { out.push('Z') }
    }

    out
}

#[cfg(test)]
mod tests {
    use geo::{LineString, Polygon, coord};

    use super::*;

    fn unit_projection() -> Projection {
        Projection::fit(Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 10.0, y: 5.0 }), 120.0, 10.0)
    }

    #[test]
    fn projection_inverts_y_and_preserves_aspect() {
        let projection = unit_projection();
        assert_eq!(projection.project(&coord! { x: 0.0, y: 5.0 }), (10.0, 10.0));
        assert_eq!(projection.project(&coord! { x: 10.0, y: 0.0 }), (110.0, 60.0));
        assert_eq!(projection.height(), 70.0);
    }

    #[test]
    fn polygons_close_and_lines_do_not() {
        let projection = unit_projection();
        let square = Polygon::new(LineString::from(vec![(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 0.0)]), vec![]);
        let line = LineString::from(vec![(0.0, 0.0), (10.0, 5.0)]);

        let polygon_path = geometry_to_path(&Geometry::Polygon(square), &projection);
        assert!(polygon_path.starts_with(" M10.000,60.000"));
        assert!(polygon_path.ends_with('Z'));

        let line_path = geometry_to_path(&Geometry::LineString(line), &projection);
        assert_eq!(line_path, " M10.000,60.000 L110.000,10.000");
    }
}
