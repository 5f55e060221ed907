//! Region boundaries: TopoJSON decoding and the Albers USA composite projection.
//!
//! Only the `states` object of the topology is read. Each named `Polygon` or
//! `MultiPolygon` geometry becomes one [`RegionShape`] in longitude/latitude
//! degrees; [`path_data`] projects it into SVG path syntax.

use std::collections::HashMap;
use std::f64::consts::{PI, TAU};
use std::fmt::Write as _;

use ::geo::{coord, Coord, LineString, MultiPolygon, Polygon};
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub struct RegionShape {
    pub name: String,
    /// Outline in longitude/latitude degrees.
    pub geom: MultiPolygon<f64>,
}

#[derive(Debug, Error)]
pub enum GeoError {
    #[error("topology is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("topology has no `states` object")]
    MissingStates,
    #[error("`states` object is not a GeometryCollection")]
    NotACollection,
    #[error("arc reference {0} is out of range")]
    ArcIndex(i64),
}

#[derive(Debug, Deserialize)]
struct Topology {
    #[serde(default)]
    transform: Option<Transform>,
    #[serde(default)]
    objects: HashMap<String, serde_json::Value>,
    #[serde(default)]
    arcs: Vec<Vec<Vec<f64>>>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
struct Transform {
    scale: [f64; 2],
    translate: [f64; 2],
}

#[derive(Debug, Default, Deserialize)]
struct Properties {
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum TopoGeometry {
    GeometryCollection {
        #[serde(default)]
        geometries: Vec<TopoGeometry>,
    },
    Polygon {
        arcs: Vec<Vec<i64>>,
        #[serde(default)]
        properties: Option<Properties>,
    },
    MultiPolygon {
        arcs: Vec<Vec<Vec<i64>>>,
        #[serde(default)]
        properties: Option<Properties>,
    },
    #[serde(other)]
    Other,
}

/// Decodes the `states` object of a TopoJSON document.
pub fn decode_states(text: &str) -> Result<Vec<RegionShape>, GeoError> {
    let topology: Topology = serde_json::from_str(text)?;
    let states = topology
        .objects
        .get("states")
        .cloned()
        .ok_or(GeoError::MissingStates)?;
    let geometries = match serde_json::from_value::<TopoGeometry>(states)? {
        TopoGeometry::GeometryCollection { geometries } => geometries,
        _ => return Err(GeoError::NotACollection),
    };

    let arcs = decode_arcs(&topology.arcs, topology.transform);
    let mut shapes = Vec::new();
    collect_shapes(&geometries, &arcs, &mut shapes)?;
    Ok(shapes)
}

fn collect_shapes(
    geometries: &[TopoGeometry],
    arcs: &[Vec<Coord<f64>>],
    out: &mut Vec<RegionShape>,
) -> Result<(), GeoError> {
    for geometry in geometries {
        match geometry {
            TopoGeometry::GeometryCollection { geometries } => {
                collect_shapes(geometries, arcs, out)?;
            }
            TopoGeometry::Polygon { arcs: rings, properties } => {
                if let Some(name) = shape_name(properties) {
                    out.push(RegionShape {
                        name,
                        geom: MultiPolygon::new(vec![build_polygon(rings, arcs)?]),
                    });
                }
            }
            TopoGeometry::MultiPolygon { arcs: polygons, properties } => {
                if let Some(name) = shape_name(properties) {
                    let polygons = polygons
                        .iter()
                        .map(|rings| build_polygon(rings, arcs))
                        .collect::<Result<Vec<_>, _>>()?;
                    out.push(RegionShape {
                        name,
                        geom: MultiPolygon::new(polygons),
                    });
                }
            }
            TopoGeometry::Other => {}
        }
    }
    Ok(())
}

fn shape_name(properties: &Option<Properties>) -> Option<String> {
    properties
        .as_ref()
        .and_then(|p| p.name.clone())
        .filter(|n| !n.is_empty())
}

/// Resolves delta-encoded, quantized arcs into absolute coordinates.
fn decode_arcs(raw: &[Vec<Vec<f64>>], transform: Option<Transform>) -> Vec<Vec<Coord<f64>>> {
    raw.iter()
        .map(|arc| match transform {
            Some(t) => {
                let (mut x, mut y) = (0.0, 0.0);
                arc.iter()
                    .filter(|pos| pos.len() >= 2)
                    .map(|pos| {
                        x += pos[0];
                        y += pos[1];
                        coord! {
                            x: x * t.scale[0] + t.translate[0],
                            y: y * t.scale[1] + t.translate[1],
                        }
                    })
                    .collect()
            }
            None => arc
                .iter()
                .filter(|pos| pos.len() >= 2)
                .map(|pos| coord! { x: pos[0], y: pos[1] })
                .collect(),
        })
        .collect()
}

/// The first ring is the exterior; any further rings are holes.
fn build_polygon(rings: &[Vec<i64>], arcs: &[Vec<Coord<f64>>]) -> Result<Polygon<f64>, GeoError> {
    let mut rings = rings
        .iter()
        .map(|refs| build_ring(refs, arcs))
        .collect::<Result<Vec<_>, _>>()?
        .into_iter();
    let exterior = rings.next().unwrap_or_else(|| LineString::new(Vec::new()));
    Ok(Polygon::new(exterior, rings.collect()))
}

/// Stitches arcs into a ring. A negative reference `~i` walks arc `i` backwards;
/// the shared endpoint between consecutive arcs is kept once.
fn build_ring(refs: &[i64], arcs: &[Vec<Coord<f64>>]) -> Result<LineString<f64>, GeoError> {
    let mut ring: Vec<Coord<f64>> = Vec::new();
    for &reference in refs {
        let (index, reversed) = if reference >= 0 {
            (reference, false)
        } else {
            (!reference, true)
        };
        let arc = usize::try_from(index)
            .ok()
            .and_then(|i| arcs.get(i))
            .ok_or(GeoError::ArcIndex(reference))?;

        let skip = usize::from(!ring.is_empty());
        if reversed {
            ring.extend(arc.iter().rev().skip(skip));
        } else {
            ring.extend(arc.iter().skip(skip));
        }
    }
    Ok(LineString::new(ring))
}

/// Conic equal-area projection with d3-style rotate/center/scale/translate.
#[derive(Debug, Clone, Copy)]
pub struct ConicEqualArea {
    n: f64,
    c: f64,
    r0: f64,
    rotate: f64,
    k: f64,
    dx: f64,
    dy: f64,
}

impl ConicEqualArea {
    /// Angles in degrees; `rotate` is the longitude shift, `center` is in
    /// rotated coordinates.
    pub fn new(
        parallels: (f64, f64),
        rotate: f64,
        center: (f64, f64),
        scale: f64,
        translate: (f64, f64),
    ) -> Self {
        let phi0 = parallels.0.to_radians();
        let phi1 = parallels.1.to_radians();
        let sy0 = phi0.sin();
        let n = (sy0 + phi1.sin()) / 2.0;
        let c = 1.0 + sy0 * (2.0 * n - sy0);
        let r0 = c.sqrt() / n;

        let mut projection = Self {
            n,
            c,
            r0,
            rotate: rotate.to_radians(),
            k: scale,
            dx: 0.0,
            dy: 0.0,
        };
        let origin = projection.raw(center.0.to_radians(), center.1.to_radians());
        projection.dx = translate.0 - scale * origin.x;
        projection.dy = translate.1 + scale * origin.y;
        projection
    }

    fn raw(&self, lambda: f64, phi: f64) -> Coord<f64> {
        let r = (self.c - 2.0 * self.n * phi.sin()).max(0.0).sqrt() / self.n;
        let x = lambda * self.n;
        coord! { x: r * x.sin(), y: self.r0 - r * x.cos() }
    }

    pub fn project(&self, point: Coord<f64>) -> Coord<f64> {
        let mut lambda = point.x.to_radians() + self.rotate;
        if lambda > PI {
            lambda -= TAU;
        } else if lambda < -PI {
            lambda += TAU;
        }
        let projected = self.raw(lambda, point.y.to_radians());
        coord! {
            x: self.dx + self.k * projected.x,
            y: self.dy - self.k * projected.y,
        }
    }
}

/// Lower 48 with Alaska and Hawaii inset below, as in the classic US atlas layout.
#[derive(Debug, Clone, Copy)]
pub struct AlbersUsa {
    lower48: ConicEqualArea,
    alaska: ConicEqualArea,
    hawaii: ConicEqualArea,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Inset {
    Lower48,
    Alaska,
    Hawaii,
}

impl AlbersUsa {
    pub fn new(scale: f64, translate: (f64, f64)) -> Self {
        let (x, y) = translate;
        Self {
            lower48: ConicEqualArea::new((29.5, 45.5), 96.0, (-0.6, 38.7), scale, translate),
            alaska: ConicEqualArea::new(
                (55.0, 65.0),
                154.0,
                (-2.0, 58.5),
                scale * 0.35,
                (x - 0.307 * scale, y + 0.201 * scale),
            ),
            hawaii: ConicEqualArea::new(
                (8.0, 18.0),
                157.0,
                (-3.0, 19.9),
                scale,
                (x - 0.205 * scale, y + 0.212 * scale),
            ),
        }
    }

    /// Projection fitted to a `width` × `height` viewport at the given scale.
    pub fn for_viewport(width: f64, height: f64, scale: f64) -> Self {
        Self::new(scale, (width / 2.0, height / 2.0))
    }

    fn inset_for(point: Coord<f64>) -> Option<Inset> {
        let Coord { x: lon, y: lat } = point;
        if lat >= 50.0 && (lon <= -129.0 || lon >= 170.0) {
            Some(Inset::Alaska)
        } else if (15.0..=23.0).contains(&lat) && (-162.0..=-154.0).contains(&lon) {
            Some(Inset::Hawaii)
        } else if (23.0..=50.0).contains(&lat) && (-130.0..=-60.0).contains(&lon) {
            Some(Inset::Lower48)
        } else {
            None
        }
    }

    fn inset(&self, inset: Inset) -> &ConicEqualArea {
        match inset {
            Inset::Lower48 => &self.lower48,
            Inset::Alaska => &self.alaska,
            Inset::Hawaii => &self.hawaii,
        }
    }

    /// Projects a point, or `None` outside the three covered areas.
    pub fn project(&self, point: Coord<f64>) -> Option<Coord<f64>> {
        Self::inset_for(point).map(|inset| self.inset(inset).project(point))
    }
}

/// SVG path for a shape. Polygons outside the projection are dropped; each
/// polygon is projected through the inset of its first vertex so it is never
/// split across insets.
pub fn path_data(shape: &RegionShape, projection: &AlbersUsa) -> String {
    let mut d = String::new();
    for polygon in shape.geom.iter() {
        let Some(inset) = polygon
            .exterior()
            .coords()
            .next()
            .and_then(|c| AlbersUsa::inset_for(*c))
        else {
            continue;
        };
        let conic = projection.inset(inset);
        let rings = std::iter::once(polygon.exterior()).chain(polygon.interiors());
        for ring in rings.filter(|r| r.0.len() >= 3) {
            for (i, c) in ring.coords().enumerate() {
                let p = conic.project(*c);
                let command = if i == 0 { 'M' } else { 'L' };
                let _ = write!(d, "{command}{:.1},{:.1}", p.x, p.y);
            }
            d.push('Z');
        }
    }
    d
}
