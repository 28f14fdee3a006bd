//! Low-level KML element writer.
//!
//! Wraps a `quick_xml::Writer` and knows how to emit the handful of KML
//! constructs the overlay uses. Text content is escaped by quick-xml, so
//! placemark names may carry reserved characters.
//!
//! Each top-level construct is written on its own line:
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <kml xmlns="http://www.opengis.net/kml/2.2"><Document>
//! <Style id="portJibe">...</Style>
//! <Placemark>...</Placemark>
//! </Document></kml>
//! ```

use std::io::Write;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::style::{format_number, IconStyle, LineStyle};
use crate::error::ExportResult;
use crate::geo::GeoPoint;

/// KML 2.2 namespace.
pub const KML_NAMESPACE: &str = "http://www.opengis.net/kml/2.2";

/// Decimal places written for longitude and latitude (~0.1 m).
pub const COORDINATE_PRECISION: usize = 6;

/// Streaming writer for KML overlay documents.
pub struct KmlWriter<W: Write> {
    xml: Writer<W>,
}

impl<W: Write> KmlWriter<W> {
    /// Wrap a sink. Nothing is written until [`start_document`](Self::start_document).
    pub fn new(sink: W) -> Self {
        Self {
            xml: Writer::new(sink),
        }
    }

    /// Write the XML declaration and open `<kml><Document>`.
    pub fn start_document(&mut self) -> ExportResult<()> {
        self.xml
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        self.newline()?;
        self.xml.write_event(Event::Start(
            BytesStart::new("kml").with_attributes([("xmlns", KML_NAMESPACE)]),
        ))?;
        self.open("Document")?;
        self.newline()
    }

    /// Write a `<Style>` holding a `<LineStyle>`.
    pub fn line_style(&mut self, id: &str, style: &LineStyle) -> ExportResult<()> {
        self.open_style(id)?;
        self.open("LineStyle")?;
        self.text_element("color", &style.color)?;
        self.text_element("width", &format_number(style.width))?;
        self.close("LineStyle")?;
        self.close("Style")?;
        self.newline()
    }

    /// Write a `<Style>` holding an `<IconStyle>` with an icon reference.
    pub fn icon_style(&mut self, id: &str, style: &IconStyle) -> ExportResult<()> {
        self.open_style(id)?;
        self.open("IconStyle")?;
        self.text_element("scale", &format_number(style.scale))?;
        self.open("Icon")?;
        self.text_element("href", &style.href)?;
        self.close("Icon")?;
        self.close("IconStyle")?;
        self.close("Style")?;
        self.newline()
    }

    /// Write a placemark with a `<LineString>` through `points`, in order.
    pub fn line_placemark(
        &mut self,
        name: &str,
        style_id: &str,
        points: &[GeoPoint],
    ) -> ExportResult<()> {
        self.open("Placemark")?;
        self.text_element("name", name)?;
        self.text_element("styleUrl", &style_url(style_id))?;
        self.open("LineString")?;
        self.text_element("coordinates", &format_coordinates(points))?;
        self.close("LineString")?;
        self.close("Placemark")?;
        self.newline()
    }

    /// Write a point placemark whose icon is rotated to `heading` degrees.
    pub fn arrow_placemark(
        &mut self,
        name: &str,
        style_id: &str,
        at: &GeoPoint,
        heading: f64,
    ) -> ExportResult<()> {
        self.open("Placemark")?;
        self.text_element("name", name)?;
        self.text_element("styleUrl", &style_url(style_id))?;
        self.open("Point")?;
        self.text_element("coordinates", &format_coordinate(at))?;
        self.close("Point")?;
        self.open("Style")?;
        self.open("IconStyle")?;
        self.text_element("heading", &format!("{:.1}", heading))?;
        self.close("IconStyle")?;
        self.close("Style")?;
        self.close("Placemark")?;
        self.newline()
    }

    /// Close `</Document></kml>`, flush and hand back the sink.
    pub fn finish(mut self) -> ExportResult<W> {
        self.close("Document")?;
        self.close("kml")?;
        self.newline()?;
        let mut sink = self.xml.into_inner();
        sink.flush()?;
        Ok(sink)
    }

    fn open(&mut self, tag: &str) -> ExportResult<()> {
        self.xml.write_event(Event::Start(BytesStart::new(tag)))?;
        Ok(())
    }

    fn open_style(&mut self, id: &str) -> ExportResult<()> {
        self.xml.write_event(Event::Start(
            BytesStart::new("Style").with_attributes([("id", id)]),
        ))?;
        Ok(())
    }

    fn close(&mut self, tag: &str) -> ExportResult<()> {
        self.xml.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    fn text_element(&mut self, tag: &str, text: &str) -> ExportResult<()> {
        self.xml
            .create_element(tag)
            .write_text_content(BytesText::new(text))?;
        Ok(())
    }

    fn newline(&mut self) -> ExportResult<()> {
        self.xml.get_mut().write_all(b"\n")?;
        Ok(())
    }
}

/// `#id` reference to a shared style.
fn style_url(style_id: &str) -> String {
    format!("#{}", style_id)
}

/// Format one point as `lon,lat`.
pub fn format_coordinate(point: &GeoPoint) -> String {
    format!(
        "{:.prec$},{:.prec$}",
        point.lon,
        point.lat,
        prec = COORDINATE_PRECISION
    )
}

/// Format a point sequence as space-terminated `lon,lat ` pairs.
pub fn format_coordinates(points: &[GeoPoint]) -> String {
    points
        .iter()
        .map(|p| format!("{} ", format_coordinate(p)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut KmlWriter<Vec<u8>>) -> ExportResult<()>,
    {
        let mut writer = KmlWriter::new(Vec::new());
        f(&mut writer).unwrap();
        let bytes = writer.xml.into_inner();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_format_coordinates() {
        let points = [GeoPoint::new(53.5, 10.0), GeoPoint::new(-0.1234567, 179.9)];
        assert_eq!(
            format_coordinates(&points),
            "10.000000,53.500000 179.900000,-0.123457 "
        );
        assert_eq!(format_coordinates(&[]), "");
    }

    #[test]
    fn test_line_style() {
        let out = render(|w| {
            w.line_style(
                "portJibe",
                &LineStyle {
                    color: "ff00ffff".to_string(),
                    width: 1.0,
                },
            )
        });
        assert_eq!(
            out,
            "<Style id=\"portJibe\"><LineStyle><color>ff00ffff</color><width>1</width></LineStyle></Style>\n"
        );
    }

    #[test]
    fn test_icon_style() {
        let out = render(|w| {
            w.icon_style(
                "arrow",
                &IconStyle {
                    href: "http://example.com/arrow.png".to_string(),
                    scale: 1.0,
                },
            )
        });
        assert_eq!(
            out,
            "<Style id=\"arrow\"><IconStyle><scale>1</scale><Icon><href>http://example.com/arrow.png</href></Icon></IconStyle></Style>\n"
        );
    }

    #[test]
    fn test_arrow_placemark() {
        let out = render(|w| {
            w.arrow_placemark(
                "#1 Port Tack (no_time)",
                "arrow",
                &GeoPoint::new(0.0, 0.0),
                180.0,
            )
        });
        assert_eq!(
            out,
            "<Placemark><name>#1 Port Tack (no_time)</name><styleUrl>#arrow</styleUrl>\
             <Point><coordinates>0.000000,0.000000</coordinates></Point>\
             <Style><IconStyle><heading>180.0</heading></IconStyle></Style></Placemark>\n"
        );
    }

    #[test]
    fn test_names_are_escaped() {
        let out = render(|w| w.line_placemark("A & B <C>", "unknown", &[]));
        assert!(out.contains("<name>A &amp; B &lt;C&gt;</name>"), "{}", out);
        assert!(out.contains("<coordinates></coordinates>"), "{}", out);
    }
}
