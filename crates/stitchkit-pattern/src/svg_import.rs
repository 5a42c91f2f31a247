//! SVG polyline/polygon import.
//!
//! Extracts the first `polyline` or `polygon` element carrying a `points`
//! attribute from an SVG document and converts it into MOVE pattern text,
//! the alternate entry point feeding the same translator as hand-written
//! patterns.

use quick_xml::events::Event;
use quick_xml::Reader;

use stitchkit_core::constants::MIN_MOVE_COORD_MM;
use stitchkit_core::error::{PatternError, PatternResult};

/// Converts SVG outlines into MOVE commands.
///
/// Every point is transformed as `(x * scale + offset_x, y * scale +
/// offset_y)`. If the transformed set touches or crosses zero on either
/// axis, the whole set is shifted by a small epsilon so every coordinate
/// satisfies MOVE's strictly-positive precondition.
#[derive(Debug, Clone, Copy)]
pub struct SvgImporter {
    /// Scale factor applied to SVG coordinates.
    pub scale: f64,
    /// X offset in millimeters, applied after scaling.
    pub offset_x: f64,
    /// Y offset in millimeters, applied after scaling.
    pub offset_y: f64,
}

impl Default for SvgImporter {
    fn default() -> Self {
        Self {
            scale: 1.0,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }
}

impl SvgImporter {
    /// Creates an importer with the given transform.
    pub fn new(scale: f64, offset_x: f64, offset_y: f64) -> Self {
        Self {
            scale,
            offset_x,
            offset_y,
        }
    }

    /// Converts the document's first qualifying outline into pattern text,
    /// one `MOVE x y` line per point.
    pub fn pattern_from_svg(&self, svg: &str) -> PatternResult<String> {
        let points = points_from_svg(svg)?;
        let scaled: Vec<(f64, f64)> = points
            .iter()
            .map(|(x, y)| (x * self.scale + self.offset_x, y * self.scale + self.offset_y))
            .collect();

        let min_x = scaled.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
        let min_y = scaled.iter().map(|(_, y)| *y).fold(f64::INFINITY, f64::min);
        let shift_x = if min_x <= 0.0 {
            MIN_MOVE_COORD_MM - min_x
        } else {
            0.0
        };
        let shift_y = if min_y <= 0.0 {
            MIN_MOVE_COORD_MM - min_y
        } else {
            0.0
        };

        let commands: Vec<String> = scaled
            .iter()
            .map(|(x, y)| format!("MOVE {:.3} {:.3}", x + shift_x, y + shift_y))
            .collect();
        Ok(commands.join("\n"))
    }
}

/// Returns the local element or attribute name without any XML namespace.
///
/// Handles both Clark notation (`{uri}tag`) and prefixed qualified names
/// (`svg:tag`).
pub fn strip_namespace(tag: &str) -> &str {
    if let Some(rest) = tag.strip_prefix('{') {
        if let Some(end) = rest.find('}') {
            return &rest[end + 1..];
        }
    }
    match tag.rfind(':') {
        Some(index) => &tag[index + 1..],
        None => tag,
    }
}

/// Parses an SVG `points` attribute into coordinate pairs.
///
/// Tokens are separated by commas and/or whitespace; an odd token count is
/// a geometry error.
pub fn parse_points_attribute(raw: &str) -> PatternResult<Vec<(f64, f64)>> {
    let tokens: Vec<&str> = raw
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect();
    if tokens.len() % 2 != 0 {
        return Err(PatternError::Geometry {
            reason: "points attribute must contain coordinate pairs".to_string(),
        });
    }
    let mut points = Vec::with_capacity(tokens.len() / 2);
    for pair in tokens.chunks_exact(2) {
        let x: f64 = pair[0].parse().map_err(|_| PatternError::Geometry {
            reason: "invalid numeric value in points attribute".to_string(),
        })?;
        let y: f64 = pair[1].parse().map_err(|_| PatternError::Geometry {
            reason: "invalid numeric value in points attribute".to_string(),
        })?;
        points.push((x, y));
    }
    Ok(points)
}

/// Extracts polyline or polygon coordinates from an SVG document.
///
/// Walks every element regardless of namespace; the first `polyline` or
/// `polygon` with a non-empty `points` attribute wins. A polygon whose
/// first and last points coincide drops the duplicate closing point.
pub fn points_from_svg(svg: &str) -> PatternResult<Vec<(f64, f64)>> {
    let mut reader = Reader::from_str(svg);
    loop {
        let event = reader.read_event().map_err(|err| PatternError::Geometry {
            reason: format!("invalid SVG markup: {}", err),
        })?;
        let element = match event {
            Event::Start(element) | Event::Empty(element) => element,
            Event::Eof => break,
            _ => continue,
        };

        let raw_name = String::from_utf8_lossy(element.name().as_ref()).into_owned();
        let local = strip_namespace(&raw_name);
        if local != "polyline" && local != "polygon" {
            continue;
        }

        let mut points_attr = None;
        for attribute in element.attributes().flatten() {
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            if strip_namespace(&key) == "points" {
                let value = attribute
                    .unescape_value()
                    .map_err(|err| PatternError::Geometry {
                        reason: format!("invalid SVG markup: {}", err),
                    })?;
                points_attr = Some(value.into_owned());
                break;
            }
        }
        let Some(raw_points) = points_attr else {
            continue;
        };
        if raw_points.trim().is_empty() {
            continue;
        }

        let mut points = parse_points_attribute(&raw_points)?;
        if local == "polygon" && points.len() > 1 && points.first() == points.last() {
            points.pop();
        }
        if !points.is_empty() {
            return Ok(points);
        }
    }
    Err(PatternError::Geometry {
        reason: "no polyline or polygon with a points attribute".to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_namespace_variants() {
        assert_eq!(
            strip_namespace("{http://www.w3.org/2000/svg}polyline"),
            "polyline"
        );
        assert_eq!(strip_namespace("svg:polygon"), "polygon");
        assert_eq!(strip_namespace("polyline"), "polyline");
    }

    #[test]
    fn test_parse_points_pairs() {
        let points = parse_points_attribute("0,0 10,5 20,0").unwrap();
        assert_eq!(points, [(0.0, 0.0), (10.0, 5.0), (20.0, 0.0)]);
    }

    #[test]
    fn test_parse_points_mixed_separators() {
        let points = parse_points_attribute("1 2, 3 4").unwrap();
        assert_eq!(points, [(1.0, 2.0), (3.0, 4.0)]);
    }

    #[test]
    fn test_parse_points_requires_even_count() {
        let err = parse_points_attribute("1 2 3").unwrap_err();
        assert!(err.is_geometry_error());
    }

    #[test]
    fn test_polyline_extraction() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
            <polyline points="0,0 10,5"/>
        </svg>"#;
        assert_eq!(points_from_svg(svg).unwrap(), [(0.0, 0.0), (10.0, 5.0)]);
    }

    #[test]
    fn test_polygon_drops_duplicate_endpoint() {
        let svg = r#"<svg><polygon points="0,0 4,0 4,4 0,0"/></svg>"#;
        assert_eq!(
            points_from_svg(svg).unwrap(),
            [(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)]
        );
    }

    #[test]
    fn test_missing_outline_is_error() {
        let svg = r#"<svg><rect width="4" height="4"/></svg>"#;
        let err = points_from_svg(svg).unwrap_err();
        assert!(err.is_geometry_error());
    }

    #[test]
    fn test_scale_and_offset() {
        let importer = SvgImporter::new(2.0, 1.0, 0.5);
        let pattern = importer
            .pattern_from_svg(r#"<svg><polyline points="0,0 1,1"/></svg>"#)
            .unwrap();
        assert_eq!(pattern, "MOVE 1.000 0.500\nMOVE 3.000 2.500");
    }

    #[test]
    fn test_shift_to_positive_envelope() {
        let importer = SvgImporter::default();
        let pattern = importer
            .pattern_from_svg(r#"<svg><polyline points="0,0 10,5"/></svg>"#)
            .unwrap();
        assert_eq!(pattern, "MOVE 0.001 0.001\nMOVE 10.001 5.001");
    }
}
