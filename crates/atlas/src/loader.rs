//! GeoJSON dataset loading
//!
//! Both inputs may be a FeatureCollection, a single Feature or a bare
//! Geometry. Points may come as Point or MultiPoint geometries; polygons as
//! Polygon, MultiPolygon, Rect or Triangle. Collections are flattened and
//! every MultiPolygon is split into its member polygons.

use std::path::{Path, PathBuf};

use geo::{Geometry, Point, Polygon};
use geojson::GeoJson;

/// Dataset loading errors
#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot parse {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("{path}: {kind} geometries are not supported in the {role} dataset")]
    UnsupportedGeometry {
        path: PathBuf,
        role: &'static str,
        kind: &'static str,
    },
}

/// Read a GeoJSON file and convert every geometry it holds
fn read_geometries(path: &Path) -> Result<Vec<Geometry<f64>>, ProbeError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ProbeError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let parse_err = |message: String| ProbeError::Parse {
        path: path.to_path_buf(),
        message,
    };

    let geojson: GeoJson = raw.parse().map_err(|e: geojson::Error| parse_err(e.to_string()))?;
    let collection: geo::GeometryCollection<f64> =
        geojson::quick_collection(&geojson).map_err(|e| parse_err(e.to_string()))?;

    Ok(collection.0)
}

/// Load the point dataset
pub fn load_points(path: &Path) -> Result<Vec<Point<f64>>, ProbeError> {
    let mut points = Vec::new();
    for geometry in read_geometries(path)? {
        collect_points(path, geometry, &mut points)?;
    }
    tracing::debug!("Loaded {} point(s) from {}", points.len(), path.display());
    Ok(points)
}

/// Load the polygon dataset, decomposing multipolygons into their parts
pub fn load_polygons(path: &Path) -> Result<Vec<Polygon<f64>>, ProbeError> {
    let mut polygons = Vec::new();
    for geometry in read_geometries(path)? {
        collect_polygons(path, geometry, &mut polygons)?;
    }
    tracing::debug!("Loaded {} polygon part(s) from {}", polygons.len(), path.display());
    Ok(polygons)
}

fn collect_points(
    path: &Path,
    geometry: Geometry<f64>,
    out: &mut Vec<Point<f64>>,
) -> Result<(), ProbeError> {
    match geometry {
        Geometry::Point(point) => out.push(point),
        Geometry::MultiPoint(multi) => out.extend(multi.0),
        Geometry::GeometryCollection(collection) => {
            for inner in collection.0 {
                collect_points(path, inner, out)?;
            }
        }
        other => {
            return Err(ProbeError::UnsupportedGeometry {
                path: path.to_path_buf(),
                role: "points",
                kind: geometry_kind(&other),
            });
        }
    }
    Ok(())
}

/// Flatten polygonal geometry into single polygons
pub fn collect_polygons(
    path: &Path,
    geometry: Geometry<f64>,
    out: &mut Vec<Polygon<f64>>,
) -> Result<(), ProbeError> {
    match geometry {
        Geometry::Polygon(polygon) => out.push(polygon),
        Geometry::MultiPolygon(multi) => out.extend(multi.0),
        Geometry::Rect(rect) => out.push(rect.to_polygon()),
        Geometry::Triangle(triangle) => out.push(triangle.to_polygon()),
        Geometry::GeometryCollection(collection) => {
            for inner in collection.0 {
                collect_polygons(path, inner, out)?;
            }
        }
        other => {
            return Err(ProbeError::UnsupportedGeometry {
                path: path.to_path_buf(),
                role: "polygon",
                kind: geometry_kind(&other),
            });
        }
    }
    Ok(())
}

fn geometry_kind(geometry: &Geometry<f64>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::Line(_) => "Line",
        Geometry::LineString(_) => "LineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        Geometry::GeometryCollection(_) => "GeometryCollection",
        Geometry::Rect(_) => "Rect",
        Geometry::Triangle(_) => "Triangle",
    }
}
