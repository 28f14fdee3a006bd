//! KML overlay export for classified maneuvers.
//!
//! The exporter runs a strictly linear pass over the subtracks:
//!
//! ```text
//! create ─► header + styles ─► (classify ─► line [+ arrow])* ─► footer ─► flush
//! ```
//!
//! Features are emitted in input order and never merged or dropped. Each
//! subtrack yields one line placemark; subtracks with at least two points
//! also yield an arrow placemark at their first point, rotated to the
//! reverse of the initial direction of travel.
//!
//! # Example
//!
//! ```ignore
//! use sailtrack::kml::{export_maneuvers, StylePalette};
//!
//! let summary = export_maneuvers(&subtracks, 215.0, "maneuvers.kml", &StylePalette::default())?;
//! println!("{} maneuvers, {} unknown", summary.subtracks, summary.unknown);
//! ```

mod style;
mod writer;

pub use style::{
    is_valid_color, IconStyle, LineStyle, StylePalette, ARROW_STYLE_ID, DEFAULT_ARROW_ICON,
    DEFAULT_ARROW_SCALE, DEFAULT_LINE_WIDTH,
};
pub use writer::{
    format_coordinate, format_coordinates, KmlWriter, COORDINATE_PRECISION, KML_NAMESPACE,
};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{ExportError, ExportResult};
use crate::geo::heading;
use crate::maneuver::{classify, ManeuverCategory};
use crate::track::Subtrack;

/// Counts gathered during one export pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExportSummary {
    /// Line placemarks written (one per subtrack).
    pub subtracks: usize,
    /// Arrow placemarks written.
    pub arrows: usize,
    pub port_jibes: usize,
    pub port_tacks: usize,
    pub starboard_jibes: usize,
    pub starboard_tacks: usize,
    /// Subtracks that fell back to the unknown style.
    pub unknown: usize,
}

impl ExportSummary {
    fn record(&mut self, category: ManeuverCategory) {
        self.subtracks += 1;
        match category {
            ManeuverCategory::PortJibe => self.port_jibes += 1,
            ManeuverCategory::PortTack => self.port_tacks += 1,
            ManeuverCategory::StarboardJibe => self.starboard_jibes += 1,
            ManeuverCategory::StarboardTack => self.starboard_tacks += 1,
            ManeuverCategory::Unknown => self.unknown += 1,
        }
    }
}

/// Classify `subtracks` and write the overlay document to `path`.
///
/// The file is created before anything else happens; if that fails the
/// error is returned as [`ExportError::Create`] and no output exists.
pub fn export_maneuvers(
    subtracks: &[Subtrack],
    wind_direction: f64,
    path: impl AsRef<Path>,
    palette: &StylePalette,
) -> ExportResult<ExportSummary> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|source| ExportError::Create {
        path: path.to_path_buf(),
        source,
    })?;

    let summary = write_maneuvers(BufWriter::new(file), subtracks, wind_direction, palette)?;

    tracing::info!(
        path = %path.display(),
        subtracks = summary.subtracks,
        arrows = summary.arrows,
        unknown = summary.unknown,
        "Exported maneuver overlay"
    );

    Ok(summary)
}

/// Classify `subtracks` and write the overlay document into `sink`.
///
/// The sink is flushed before returning.
pub fn write_maneuvers<W: Write>(
    sink: W,
    subtracks: &[Subtrack],
    wind_direction: f64,
    palette: &StylePalette,
) -> ExportResult<ExportSummary> {
    let mut kml = KmlWriter::new(sink);
    let mut summary = ExportSummary::default();

    kml.start_document()?;
    for (id, style) in palette.line_styles() {
        kml.line_style(id, style)?;
    }
    kml.icon_style(ARROW_STYLE_ID, &palette.arrow)?;

    for (index, subtrack) in subtracks.iter().enumerate() {
        let maneuver = classify(subtrack, index, wind_direction);
        let name = &maneuver.label.display_name;

        kml.line_placemark(name, maneuver.category().style_id(), &subtrack.points)?;
        summary.record(maneuver.category());

        match subtrack.initial_leg() {
            Some((first, second)) => {
                kml.arrow_placemark(name, ARROW_STYLE_ID, first, heading(second, first))?;
                summary.arrows += 1;
            }
            None => {
                tracing::warn!(
                    index,
                    points = subtrack.points.len(),
                    "Subtrack too short for a direction marker"
                );
            }
        }
    }

    kml.finish()?;
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoPoint;
    use crate::track::TackSide;

    fn render(subtracks: &[Subtrack], wind: f64) -> (String, ExportSummary) {
        let mut buf = Vec::new();
        let summary = write_maneuvers(&mut buf, subtracks, wind, &StylePalette::default()).unwrap();
        (String::from_utf8(buf).unwrap(), summary)
    }

    #[test]
    fn test_empty_export_has_header_styles_and_footer() {
        let (out, summary) = render(&[], 0.0);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], "<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        assert_eq!(
            lines[1],
            "<kml xmlns=\"http://www.opengis.net/kml/2.2\"><Document>"
        );
        assert_eq!(out.matches("<Style id=").count(), 5);
        assert_eq!(*lines.last().unwrap(), "</Document></kml>");
        assert_eq!(summary, ExportSummary::default());
    }

    #[test]
    fn test_degenerate_subtracks_have_no_arrow() {
        let subtracks = vec![
            Subtrack::new(TackSide::Port, vec![]),
            Subtrack::new(TackSide::Starboard, vec![GeoPoint::new(1.0, 2.0)]),
        ];
        let (out, summary) = render(&subtracks, 0.0);

        assert_eq!(summary.subtracks, 2);
        assert_eq!(summary.arrows, 0);
        assert_eq!(summary.unknown, 2);
        assert!(!out.contains("<styleUrl>#arrow</styleUrl>"));
        assert!(out.contains("<coordinates></coordinates>"));
        assert!(out.contains("<coordinates>2.000000,1.000000 </coordinates>"));
        assert!(out.contains("<styleUrl>#unknown</styleUrl>"));
    }

    #[test]
    fn test_arrow_points_back_along_first_leg() {
        let subtracks = vec![Subtrack::new(
            TackSide::Port,
            vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 0.0)],
        )];
        let (out, summary) = render(&subtracks, 90.0);

        assert_eq!(summary.arrows, 1);
        assert!(out.contains("<Point><coordinates>0.000000,0.000000</coordinates></Point>"));
        assert!(out.contains("<heading>180.0</heading>"));
    }

    #[test]
    fn test_summary_counts_categories() {
        let tack = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.01, 0.01),
            GeoPoint::new(0.02, 0.0),
        ];
        let jibe = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(-0.01, 0.01),
            GeoPoint::new(-0.02, 0.0),
        ];
        let subtracks = vec![
            Subtrack::new(TackSide::Port, tack.clone()),
            Subtrack::new(TackSide::Port, jibe.clone()),
            Subtrack::new(TackSide::Starboard, tack),
            Subtrack::new(TackSide::Starboard, jibe),
        ];
        let (out, summary) = render(&subtracks, 0.0);

        assert_eq!(summary.port_tacks, 1);
        assert_eq!(summary.port_jibes, 1);
        assert_eq!(summary.starboard_tacks, 1);
        assert_eq!(summary.starboard_jibes, 1);
        assert_eq!(summary.unknown, 0);
        assert_eq!(summary.arrows, 4);

        let port_tack = out.find("#1 Port Tack (no_time)").unwrap();
        let port_jibe = out.find("#2 Port Jibe (no_time)").unwrap();
        let stbd_tack = out.find("#3 Starboard Tack (no_time)").unwrap();
        let stbd_jibe = out.find("#4 Starboard Jibe (no_time)").unwrap();
        assert!(port_tack < port_jibe && port_jibe < stbd_tack && stbd_tack < stbd_jibe);
    }

    /// Sink that accepts `remaining` bytes, then fails every write.
    struct FailAfter {
        remaining: usize,
    }

    impl Write for FailAfter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            if self.remaining == 0 {
                return Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
            }
            let n = buf.len().min(self.remaining);
            self.remaining -= n;
            Ok(n)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_mid_stream_failure_reports_write_error() {
        let subtracks = vec![Subtrack::new(
            TackSide::Port,
            vec![
                GeoPoint::new(0.0, 0.0),
                GeoPoint::new(0.01, 0.01),
                GeoPoint::new(0.02, 0.0),
            ],
        )];

        // Fail inside the declaration, a tag, a style and a placemark
        for limit in [0, 10, 60, 600] {
            let sink = FailAfter { remaining: limit };
            let err = write_maneuvers(sink, &subtracks, 0.0, &StylePalette::default())
                .unwrap_err();

            match err {
                ExportError::Write(source) => {
                    assert!(source.to_string().contains("disk full"), "limit {}", limit)
                }
                other => panic!("limit {}: unexpected error {:?}", limit, other),
            }
        }
    }

    #[test]
    fn test_custom_palette_is_used() {
        let mut palette = StylePalette::default();
        palette.port_tack.color = "7f112233".to_string();
        palette.arrow.href = "file:///icons/arrow.png".to_string();

        let mut buf = Vec::new();
        write_maneuvers(&mut buf, &[], 0.0, &palette).unwrap();
        let out = String::from_utf8(buf).unwrap();

        assert!(out.contains("<Style id=\"portTack\"><LineStyle><color>7f112233</color>"));
        assert!(out.contains("<href>file:///icons/arrow.png</href>"));
    }
}
