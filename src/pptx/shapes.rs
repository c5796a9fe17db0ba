// ABOUTME: Slide content model for PPTX output
// ABOUTME: Colors, paragraphs and shapes, plus their DrawingML serialization

use quick_xml::escape::escape;

/// English Metric Units per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// Convert inches to EMU.
pub fn inches(value: f64) -> i64 {
    (value * EMU_PER_INCH as f64).round() as i64
}

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Hex form used by `a:srgbClr`, e.g. `0066CC`.
    pub fn hex(&self) -> String {
        format!("{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Align {
    #[default]
    Left,
    Center,
    Right,
}

impl Align {
    fn as_attr(self) -> &'static str {
        match self {
            Align::Left => "l",
            Align::Center => "ctr",
            Align::Right => "r",
        }
    }
}

/// Vertical anchoring of text inside a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Anchor {
    #[default]
    Top,
    Middle,
}

impl Anchor {
    fn as_attr(self) -> &'static str {
        match self {
            Anchor::Top => "t",
            Anchor::Middle => "ctr",
        }
    }
}

/// A single-run paragraph with uniform formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Paragraph {
    pub text: String,
    /// Font size in points.
    pub size: u32,
    pub bold: bool,
    pub color: Color,
    pub font: Option<String>,
    pub align: Align,
    pub bullet: bool,
    pub level: u32,
    /// Space before the paragraph, in points.
    pub space_before: Option<u32>,
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            size: 18,
            bold: false,
            color: Color::rgb(0, 0, 0),
            font: None,
            align: Align::Left,
            bullet: false,
            level: 0,
            space_before: None,
        }
    }

    pub fn size(mut self, points: u32) -> Self {
        self.size = points;
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn font(mut self, font: impl Into<String>) -> Self {
        self.font = Some(font.into());
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    /// Render with a bullet at the given outline level.
    pub fn bullet(mut self, level: u32) -> Self {
        self.bullet = true;
        self.level = level;
        self
    }

    pub fn space_before(mut self, points: u32) -> Self {
        self.space_before = Some(points);
        self
    }

    fn write_xml(&self, xml: &mut String) {
        xml.push_str("<a:p>");

        xml.push_str(&format!(r#"<a:pPr algn="{}""#, self.align.as_attr()));
        if self.bullet {
            let margin = 342_900 + i64::from(self.level) * 400_050;
            xml.push_str(&format!(
                r#" lvl="{}" marL="{}" indent="-342900""#,
                self.level, margin
            ));
        }
        xml.push('>');
        if let Some(points) = self.space_before {
            xml.push_str(&format!(
                r#"<a:spcBef><a:spcPts val="{}"/></a:spcBef>"#,
                points * 100
            ));
        }
        if self.bullet {
            xml.push_str(r#"<a:buFont typeface="Arial"/><a:buChar char="&#8226;"/>"#);
        } else {
            xml.push_str("<a:buNone/>");
        }
        xml.push_str("</a:pPr>");

        let mut run_props = format!(r#"lang="en-US" sz="{}""#, self.size * 100);
        if self.bold {
            run_props.push_str(r#" b="1""#);
        }
        run_props.push_str(r#" dirty="0""#);

        let mut run_children = format!(
            r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
            self.color.hex()
        );
        if let Some(font) = &self.font {
            let font = escape(font.as_str());
            run_children.push_str(&format!(
                r#"<a:latin typeface="{font}"/><a:cs typeface="{font}"/>"#
            ));
        }

        if self.text.is_empty() {
            xml.push_str(&format!(
                "<a:endParaRPr {}>{}</a:endParaRPr>",
                run_props, run_children
            ));
        } else {
            xml.push_str(&format!(
                "<a:r><a:rPr {}>{}</a:rPr><a:t>{}</a:t></a:r>",
                run_props,
                run_children,
                escape(self.text.as_str())
            ));
        }

        xml.push_str("</a:p>");
    }
}

/// Position and size of a shape, in EMU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    pub x: i64,
    pub y: i64,
    pub cx: i64,
    pub cy: i64,
}

impl Frame {
    /// Build a frame from measurements in inches.
    pub fn inches(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x: inches(x),
            y: inches(y),
            cx: inches(width),
            cy: inches(height),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    TextBox,
    Rectangle,
}

/// A text box or filled rectangle placed on a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    pub kind: ShapeKind,
    pub frame: Frame,
    pub fill: Option<Color>,
    pub anchor: Anchor,
    pub word_wrap: bool,
    pub paragraphs: Vec<Paragraph>,
}

impl Shape {
    pub fn text_box(frame: Frame) -> Self {
        Self {
            kind: ShapeKind::TextBox,
            frame,
            fill: None,
            anchor: Anchor::Top,
            word_wrap: true,
            paragraphs: Vec::new(),
        }
    }

    pub fn rectangle(frame: Frame, fill: Color) -> Self {
        Self {
            kind: ShapeKind::Rectangle,
            frame,
            fill: Some(fill),
            anchor: Anchor::Top,
            word_wrap: true,
            paragraphs: Vec::new(),
        }
    }

    pub fn paragraph(mut self, paragraph: Paragraph) -> Self {
        self.paragraphs.push(paragraph);
        self
    }

    pub fn paragraphs(mut self, paragraphs: impl IntoIterator<Item = Paragraph>) -> Self {
        self.paragraphs.extend(paragraphs);
        self
    }

    pub fn anchor(mut self, anchor: Anchor) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn word_wrap(mut self, wrap: bool) -> Self {
        self.word_wrap = wrap;
        self
    }

    /// Paragraph texts joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub(crate) fn write_xml(&self, xml: &mut String, shape_id: usize) {
        let (name, sp_props) = match self.kind {
            ShapeKind::TextBox => ("TextBox", r#"<p:cNvSpPr txBox="1"/>"#),
            ShapeKind::Rectangle => ("Rectangle", "<p:cNvSpPr/>"),
        };

        xml.push_str("<p:sp><p:nvSpPr>");
        xml.push_str(&format!(
            r#"<p:cNvPr id="{}" name="{} {}"/>"#,
            shape_id, name, shape_id
        ));
        xml.push_str(sp_props);
        xml.push_str("<p:nvPr/></p:nvSpPr>");

        xml.push_str("<p:spPr><a:xfrm>");
        xml.push_str(&format!(
            r#"<a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/>"#,
            self.frame.x, self.frame.y, self.frame.cx, self.frame.cy
        ));
        xml.push_str(r#"</a:xfrm><a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
        match self.fill {
            Some(color) => xml.push_str(&format!(
                r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:ln><a:noFill/></a:ln>"#,
                color.hex()
            )),
            None => xml.push_str("<a:noFill/>"),
        }
        xml.push_str("</p:spPr>");

        if !self.paragraphs.is_empty() {
            let wrap = if self.word_wrap { "square" } else { "none" };
            xml.push_str(&format!(
                r#"<p:txBody><a:bodyPr wrap="{}" lIns="91440" tIns="45720" rIns="91440" bIns="45720" anchor="{}" rtlCol="0"><a:noAutofit/></a:bodyPr><a:lstStyle/>"#,
                wrap,
                self.anchor.as_attr()
            ));
            for paragraph in &self.paragraphs {
                paragraph.write_xml(xml);
            }
            xml.push_str("</p:txBody>");
        }

        xml.push_str("</p:sp>");
    }
}

/// Everything drawn on one slide: a solid background and shapes in z-order.
#[derive(Debug, Clone, PartialEq)]
pub struct SlideLayout {
    pub background: Color,
    pub shapes: Vec<Shape>,
}

impl SlideLayout {
    pub fn new(background: Color) -> Self {
        Self {
            background,
            shapes: Vec::new(),
        }
    }

    pub fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    /// All paragraph texts on the slide, shape by shape.
    pub fn texts(&self) -> Vec<String> {
        self.shapes
            .iter()
            .flat_map(|s| s.paragraphs.iter().map(|p| p.text.clone()))
            .collect()
    }

    /// Serialize as a `p:sld` part.
    pub fn to_xml(&self) -> String {
        let mut xml = String::from(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main"><p:cSld>"#,
        );
        xml.push_str(&format!(
            r#"<p:bg><p:bgPr><a:solidFill><a:srgbClr val="{}"/></a:solidFill><a:effectLst/></p:bgPr></p:bg>"#,
            self.background.hex()
        ));
        xml.push_str(
            r#"<p:spTree><p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr><p:grpSpPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="0" cy="0"/><a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/></a:xfrm></p:grpSpPr>"#,
        );
        // Id 1 belongs to the group shape.
        for (i, shape) in self.shapes.iter().enumerate() {
            shape.write_xml(&mut xml, i + 2);
        }
        xml.push_str("</p:spTree></p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr></p:sld>");
        xml
    }
}
