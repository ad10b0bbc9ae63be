//! PDF rendering of [`MappingReportData`].
//!
//! Pages are laid out top to bottom with a single cursor. Korean text is set
//! in a predefined Adobe-Korea1 CID font addressed through the `UniKS-UCS2-H`
//! CMap, so strings are written as big-endian UCS-2 and no font program is
//! embedded. Glyph widths are estimated: half an em for ASCII, a full em for
//! everything else.

use super::schema::{LawGroup, MappingReportData, ReportCase};
use crate::config::ReportConfig;
use crate::error::{Error, Result};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};

const FONT_KEY: &str = "F1";
const CMAP: &str = "UniKS-UCS2-H";

/// Page geometry and type sizes, in points.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportStyle {
    /// Base name of the predefined CID font.
    pub font: String,
    pub page_width: f64,
    pub page_height: f64,
    pub padding: f64,
    pub title_size: f64,
    pub section_size: f64,
    pub body_size: f64,
    pub meta_size: f64,
    pub line_height: f64,
}

impl Default for ReportStyle {
    fn default() -> Self {
        Self {
            font: "HYGoThic-Medium".into(),
            page_width: 595.0,
            page_height: 842.0,
            padding: 24.0,
            title_size: 18.0,
            section_size: 14.0,
            body_size: 11.0,
            meta_size: 10.0,
            line_height: 1.4,
        }
    }
}

impl ReportStyle {
    pub fn from_config(config: &ReportConfig) -> Self {
        Self {
            font: config.font.clone(),
            ..Self::default()
        }
    }

    fn content_width(&self) -> f64 {
        self.page_width - 2.0 * self.padding
    }
}

fn char_width(c: char) -> f64 {
    if c.is_ascii() {
        0.5
    } else {
        1.0
    }
}

/// Estimated advance of `text` at `size` points.
pub fn text_width(text: &str, size: f64) -> f64 {
    text.chars().map(char_width).sum::<f64>() * size
}

/// Greedy line breaking. Prefers the last space of an overflowing line;
/// text without spaces (most Korean prose) breaks between any two glyphs.
/// Explicit newlines always break.
pub fn wrap_text(text: &str, max_width: f64, size: f64) -> Vec<String> {
    let mut lines = Vec::new();
    for segment in text.split('\n') {
        let mut current = String::new();
        let mut width = 0.0;
        for c in segment.chars() {
            let w = char_width(c) * size;
            if width + w > max_width && !current.is_empty() {
                match current.rfind(' ').filter(|&pos| pos > 0) {
                    Some(pos) => {
                        let rest = current[pos + 1..].to_string();
                        current.truncate(pos);
                        lines.push(std::mem::replace(&mut current, rest));
                    }
                    None => lines.push(std::mem::take(&mut current)),
                }
                width = text_width(&current, size);
                if c == ' ' && current.is_empty() {
                    continue;
                }
            }
            current.push(c);
            width += w;
        }
        lines.push(current);
    }
    lines
}

/// Big-endian UCS-2. Characters outside the BMP become `?`.
fn ucs2(text: &str) -> Vec<u8> {
    text.chars()
        .flat_map(|c| {
            let code = u16::try_from(c as u32).unwrap_or(0x003F);
            code.to_be_bytes()
        })
        .collect()
}

fn num(v: f64) -> Object {
    Object::Real(v as f32)
}

struct Layout<'a> {
    style: &'a ReportStyle,
    pages: Vec<Vec<Operation>>,
    /// Distance from the top edge of the current page.
    cursor: f64,
}

impl<'a> Layout<'a> {
    fn new(style: &'a ReportStyle) -> Self {
        Self {
            style,
            pages: vec![Vec::new()],
            cursor: style.padding,
        }
    }

    fn ops(&mut self) -> &mut Vec<Operation> {
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Start a new page when `height` does not fit below the cursor.
    fn reserve(&mut self, height: f64) {
        let bottom = self.style.page_height - self.style.padding;
        let at_top = self.cursor <= self.style.padding;
        if self.cursor + height > bottom && !at_top {
            self.pages.push(Vec::new());
            self.cursor = self.style.padding;
        }
    }

    fn gap(&mut self, points: f64) {
        self.cursor += points;
    }

    fn draw(&mut self, x: f64, baseline: f64, size: f64, bold: bool, text: &str) {
        if text.is_empty() {
            return;
        }
        let y = self.style.page_height - baseline;
        let mut ops = vec![Operation::new("BT", vec![])];
        ops.push(Operation::new("Tf", vec![Object::Name(FONT_KEY.as_bytes().to_vec()), num(size)]));
        if bold {
            ops.push(Operation::new("w", vec![num(size * 0.03)]));
            ops.push(Operation::new("Tr", vec![Object::Integer(2)]));
        } else {
            ops.push(Operation::new("Tr", vec![Object::Integer(0)]));
        }
        ops.push(Operation::new("Td", vec![num(x), num(y)]));
        ops.push(Operation::new(
            "Tj",
            vec![Object::String(ucs2(text), StringFormat::Hexadecimal)],
        ));
        ops.push(Operation::new("ET", vec![]));
        self.ops().extend(ops);
    }

    /// Reserve one line box and return the baseline inside it.
    fn next_line(&mut self, size: f64) -> f64 {
        let height = size * self.style.line_height;
        self.reserve(height);
        let baseline = self.cursor + (height - size) / 2.0 + size * 0.88;
        self.cursor += height;
        baseline
    }

    fn paragraph(&mut self, text: &str, size: f64, bold: bool, indent: f64) {
        let x = self.style.padding + indent;
        for line in wrap_text(text, self.style.content_width() - indent, size) {
            let baseline = self.next_line(size);
            self.draw(x, baseline, size, bold, &line);
        }
    }

    /// Paragraph with a marker hanging in front of its first line.
    fn marked(&mut self, marker: &str, text: &str, indent: f64, marker_width: f64) {
        let size = self.style.body_size;
        let x = self.style.padding + indent + marker_width;
        let lines = wrap_text(text, self.style.content_width() - indent - marker_width, size);
        for (i, line) in lines.iter().enumerate() {
            let baseline = self.next_line(size);
            if i == 0 {
                self.draw(self.style.padding + indent, baseline, size, false, marker);
            }
            self.draw(x, baseline, size, false, line);
        }
    }

    /// Bold heading on the left, plain note flush right on the first line.
    fn header_with_note(&mut self, left: &str, note: &str) {
        let size = self.style.body_size;
        let note_width = text_width(note, size);
        let room = self.style.content_width() - note_width - size;
        for (i, line) in wrap_text(left, room, size).iter().enumerate() {
            let baseline = self.next_line(size);
            self.draw(self.style.padding, baseline, size, true, line);
            if i == 0 {
                let x = self.style.page_width - self.style.padding - note_width;
                self.draw(x, baseline, size, false, note);
            }
        }
    }

    /// Thin separator under the cursor.
    fn rule(&mut self) {
        self.reserve(1.0);
        let y = self.style.page_height - self.cursor;
        let (x1, x2) = (self.style.padding, self.style.page_width - self.style.padding);
        self.ops().extend([
            Operation::new("q", vec![]),
            Operation::new("G", vec![num(0.75)]),
            Operation::new("w", vec![num(0.5)]),
            Operation::new("m", vec![num(x1), num(y)]),
            Operation::new("l", vec![num(x2), num(y)]),
            Operation::new("S", vec![]),
            Operation::new("Q", vec![]),
        ]);
        self.cursor += 0.5;
    }

    fn section_title(&mut self, title: &str) {
        let size = self.style.section_size;
        self.paragraph(title, size, true, 0.0);
        self.gap(6.0);
    }
}

fn law_section(layout: &mut Layout<'_>, groups: &[LawGroup]) {
    let body = layout.style.body_size;
    layout.section_title("관련 법령 조항");
    if groups.is_empty() {
        layout.paragraph("연동된 법령이 없습니다.", body, false, 0.0);
        return;
    }
    for group in groups {
        if group.articles.is_empty() {
            layout.paragraph(&group.law_title, body, true, 0.0);
        } else {
            let note = format!("{}개 조항", group.articles.len());
            layout.header_with_note(&group.law_title, &note);
        }
        layout.gap(2.0);
        for article in &group.articles {
            layout.gap(2.0);
            layout.paragraph(&article.title, body, true, 8.0);
            if !article.summary.trim().is_empty() {
                layout.paragraph(&article.summary, body, false, 8.0);
            }
        }
        layout.gap(4.0);
        layout.rule();
        layout.gap(8.0);
    }
}

fn case_meta(case: &ReportCase) -> Option<String> {
    if case.court.is_none() && case.decision_date.is_none() {
        return None;
    }
    let court = case.court.as_deref().unwrap_or("");
    let meta = match &case.decision_date {
        Some(date) => format!("{court} · {date}"),
        None => court.to_string(),
    };
    Some(meta.trim().to_string())
}

fn case_section(layout: &mut Layout<'_>, cases: &[ReportCase]) {
    let (body, meta_size) = (layout.style.body_size, layout.style.meta_size);
    layout.section_title("관련 판례");
    if cases.is_empty() {
        layout.paragraph("연동된 판례가 없습니다.", body, false, 0.0);
        return;
    }
    for case in cases {
        layout.paragraph(&case.title, body, true, 0.0);
        layout.gap(2.0);
        if let Some(meta) = case_meta(case) {
            layout.paragraph(&meta, meta_size, false, 0.0);
            layout.gap(2.0);
        }
        if let Some(summary) = &case.summary {
            layout.paragraph(summary, body, false, 0.0);
        }
        layout.gap(4.0);
        layout.rule();
        layout.gap(8.0);
    }
}

fn lay_out(data: &MappingReportData, style: &ReportStyle) -> Vec<Vec<Operation>> {
    let mut layout = Layout::new(style);
    let body = style.body_size;

    layout.paragraph("법령·판례 조합 매핑 리포트", style.title_size, true, 0.0);
    layout.gap(12.0);
    layout.paragraph(&format!("파일명: {}", data.file_name), body, false, 0.0);
    layout.gap(16.0);

    let summary = &data.ai_summary;
    layout.section_title("AI 분석 요약");
    if let Some(name) = &summary.file_display_name {
        layout.paragraph(&format!("· {name}"), body, false, 0.0);
    }
    let label = summary.risk_label.as_deref().unwrap_or("-");
    layout.paragraph(&format!("위험도: {label}"), body, false, 0.0);
    layout.gap(4.0);
    if let Some(text) = &summary.law_analysis {
        layout.paragraph("법령 관점 분석:", body, true, 0.0);
        layout.paragraph(text, body, false, 0.0);
        layout.gap(2.0);
    }
    if let Some(text) = &summary.case_analysis {
        layout.paragraph("판례 관점 분석:", body, true, 0.0);
        layout.paragraph(text, body, false, 0.0);
    }
    if !summary.bullets.is_empty() {
        layout.gap(4.0);
        for bullet in &summary.bullets {
            layout.marked("•", bullet, 10.0, 8.0);
            layout.gap(2.0);
        }
    }
    layout.gap(16.0);

    layout.section_title("업로드 문서");
    layout.paragraph(&data.uploaded_doc.file_name, body, false, 0.0);
    if let Some(desc) = &data.uploaded_doc.description {
        layout.paragraph(desc, body, false, 0.0);
    }
    layout.gap(16.0);

    law_section(&mut layout, &data.law_groups);
    layout.gap(16.0);
    case_section(&mut layout, &data.cases);

    layout.pages
}

fn pdf_text(text: &str) -> Object {
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

fn add_font(doc: &mut Document, font: &str) -> ObjectId {
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => Object::Name(font.as_bytes().to_vec()),
        "Flags" => Object::Integer(4),
        "FontBBox" => vec![
            Object::Integer(-6),
            Object::Integer(-145),
            Object::Integer(1003),
            Object::Integer(880),
        ],
        "ItalicAngle" => Object::Integer(0),
        "Ascent" => Object::Integer(880),
        "Descent" => Object::Integer(-120),
        "CapHeight" => Object::Integer(880),
        "StemV" => Object::Integer(93),
    });
    let cid_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType0",
        "BaseFont" => Object::Name(font.as_bytes().to_vec()),
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Korea1"),
            "Supplement" => Object::Integer(1),
        },
        "FontDescriptor" => Object::Reference(descriptor_id),
        "DW" => Object::Integer(1000),
        // Proportional Latin glyphs (CIDs 1..=95) at half an em.
        "W" => vec![Object::Integer(1), Object::Integer(95), Object::Integer(500)],
    });
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => Object::Name(format!("{font}-{CMAP}").into_bytes()),
        "Encoding" => CMAP,
        "DescendantFonts" => vec![Object::Reference(cid_font_id)],
    })
}

/// Render the report as an A4 PDF.
pub fn render_pdf(data: &MappingReportData, style: &ReportStyle) -> Result<Vec<u8>> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();
    let font_id = add_font(&mut doc, &style.font);
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { FONT_KEY => Object::Reference(font_id) },
    });

    let mut kids = Vec::new();
    for operations in lay_out(data, style) {
        let content = Content { operations };
        let encoded = content
            .encode()
            .map_err(|e| Error::Report(format!("failed to encode page content: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => Object::Reference(pages_id),
            "Contents" => Object::Reference(content_id),
            "Resources" => Object::Reference(resources_id),
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                num(style.page_width),
                num(style.page_height),
            ],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(count),
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => Object::Reference(pages_id),
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => pdf_text(&format!("매핑 리포트 - {}", data.file_name)),
        "Producer" => Object::string_literal("jeonsafe"),
    });
    doc.trailer.set("Root", Object::Reference(catalog_id));
    doc.trailer.set("Info", Object::Reference(info_id));
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| Error::Report(format!("failed to write pdf: {e}")))?;
    Ok(buf)
}
