use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::catalog::Catalog;
use crate::error::ExportError;
use crate::schedule::format_pdf_lines;

const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 40.0;

const TITLE_SIZE: f32 = 22.0;
const BODY_SIZE: f32 = 14.0;
const TIP_SIZE: f32 = 12.0;
const LINE_HEIGHT: f32 = 1.2;

const TITLE_COLOR: &str = "#2E7D32";
const BODY_COLOR: &str = "#263238";
const TIP_TEXT_COLOR: &str = "#546E7A";
const TIP_STROKE_COLOR: &str = "#81C784";
const TIP_FILL_COLOR: &str = "#E8F5E9";

const TIP_WIDTH: f32 = 500.0;
const TIP_HEIGHT: f32 = 60.0;
const TIP_RADIUS: f32 = 6.0;

const TIP_LINES: [&str; 3] = [
    "Tip:",
    "• Water: saturate soil until a little drains out the bottom, then wait the recommended interval.",
    "• Mist: spray leaves lightly to boost humidity; this does NOT replace watering.",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipBox {
    pub lines: Vec<String>,
}

impl Default for TipBox {
    fn default() -> Self {
        Self {
            lines: TIP_LINES.iter().map(|line| line.to_string()).collect(),
        }
    }
}

/// Everything needed to lay out one care-schedule page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRequest {
    pub plant: String,
    pub title: String,
    pub lines: Vec<String>,
    pub tip: TipBox,
}

/// Builds the export request, refusing empty or unknown plant names.
pub fn prepare_export(catalog: &Catalog, name: &str) -> Result<ExportRequest, ExportError> {
    if name.is_empty() {
        return Err(ExportError::NoValidSelection);
    }
    let record = catalog.get(name).ok_or(ExportError::NoValidSelection)?;
    Ok(ExportRequest {
        plant: name.to_string(),
        title: format!("{name} Care Schedule"),
        lines: format_pdf_lines(record)
            .into_iter()
            .map(|line| line.text)
            .collect(),
        tip: TipBox::default(),
    })
}

/// `"Boston Fern"` becomes `"Boston_Fern_schedule.pdf"`. Each run of whitespace or path
/// separators collapses to one underscore, so the file always lands inside the export directory.
pub fn export_filename(name: &str) -> String {
    let mut stem = String::with_capacity(name.len());
    let mut in_whitespace = false;
    for ch in name.chars() {
        if ch.is_whitespace() || matches!(ch, '/' | '\\') {
            if !in_whitespace {
                stem.push('_');
            }
            in_whitespace = true;
        } else {
            stem.push(ch);
            in_whitespace = false;
        }
    }
    format!("{stem}_schedule.pdf")
}

impl ExportRequest {
    pub fn filename(&self) -> String {
        export_filename(&self.plant)
    }

    pub fn render(&self, created: DateTime<Local>) -> Result<Vec<u8>, ExportError> {
        let mut page = PageBuilder::default();
        let mut y = MARGIN;

        page.text(TITLE_SIZE, TITLE_COLOR, MARGIN, y, &self.title);
        y += 30.0;

        for (index, line) in self.lines.iter().enumerate() {
            page.text(BODY_SIZE, BODY_COLOR, MARGIN, y, line);
            y += if index + 1 == self.lines.len() { 30.0 } else { 20.0 };
        }

        page.rounded_rect(
            MARGIN,
            y,
            TIP_WIDTH,
            TIP_HEIGHT,
            TIP_RADIUS,
            TIP_STROKE_COLOR,
            TIP_FILL_COLOR,
        );
        let mut tip_y = y + 15.0;
        for line in &self.tip.lines {
            page.text(TIP_SIZE, TIP_TEXT_COLOR, MARGIN + 10.0, tip_y, line);
            tip_y += TIP_SIZE * LINE_HEIGHT;
        }

        assemble(page.finish(), &self.title, created)
    }

    /// Renders and writes the document into `dir`, returning the written path.
    pub fn write_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
        let bytes = self.render(Local::now())?;
        let path = dir.as_ref().join(self.filename());
        fs::write(&path, bytes).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        tracing::info!(plant = %self.plant, path = %path.display(), "schedule exported");
        Ok(path)
    }
}

/// Collects drawing operations using top-left page coordinates.
#[derive(Default)]
struct PageBuilder {
    operations: Vec<Operation>,
}

impl PageBuilder {
    fn text(&mut self, size: f32, color: &str, x: f32, y: f32, text: &str) {
        let (r, g, b) = hex_rgb(color);
        self.operations.extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), real(size)]),
            Operation::new("rg", vec![real(r), real(g), real(b)]),
            Operation::new("Td", vec![real(x), real(PAGE_HEIGHT - y)]),
            Operation::new("Tj", vec![Object::string_literal(encode_win_ansi(text))]),
            Operation::new("ET", vec![]),
        ]);
    }

    #[allow(clippy::too_many_arguments)]
    fn rounded_rect(
        &mut self,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
        radius: f32,
        stroke: &str,
        fill: &str,
    ) {
        // Cubic control-point offset that approximates a quarter circle.
        let k = radius * 0.552_284_8;
        let left = x;
        let right = x + width;
        let top = PAGE_HEIGHT - y;
        let bottom = top - height;

        let (sr, sg, sb) = hex_rgb(stroke);
        let (fr, fg, fb) = hex_rgb(fill);
        self.operations.push(Operation::new("q", vec![]));
        self.operations
            .push(Operation::new("RG", vec![real(sr), real(sg), real(sb)]));
        self.operations
            .push(Operation::new("rg", vec![real(fr), real(fg), real(fb)]));

        self.move_to(left + radius, top);
        self.line_to(right - radius, top);
        self.curve_to(
            [right - radius + k, top],
            [right, top - radius + k],
            [right, top - radius],
        );
        self.line_to(right, bottom + radius);
        self.curve_to(
            [right, bottom + radius - k],
            [right - radius + k, bottom],
            [right - radius, bottom],
        );
        self.line_to(left + radius, bottom);
        self.curve_to(
            [left + radius - k, bottom],
            [left, bottom + radius - k],
            [left, bottom + radius],
        );
        self.line_to(left, top - radius);
        self.curve_to(
            [left, top - radius + k],
            [left + radius - k, top],
            [left + radius, top],
        );
        self.operations.push(Operation::new("h", vec![]));
        self.operations.push(Operation::new("B", vec![]));
        self.operations.push(Operation::new("Q", vec![]));
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.operations
            .push(Operation::new("m", vec![real(x), real(y)]));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.operations
            .push(Operation::new("l", vec![real(x), real(y)]));
    }

    fn curve_to(&mut self, c1: [f32; 2], c2: [f32; 2], end: [f32; 2]) {
        self.operations.push(Operation::new(
            "c",
            vec![
                real(c1[0]),
                real(c1[1]),
                real(c2[0]),
                real(c2[1]),
                real(end[0]),
                real(end[1]),
            ],
        ));
    }

    fn finish(self) -> Content {
        Content {
            operations: self.operations,
        }
    }
}

fn assemble(content: Content, title: &str, created: DateTime<Local>) -> Result<Vec<u8>, ExportError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });
    let encoded = content
        .encode()
        .map_err(|err| ExportError::Render(err.to_string()))?;
    let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), real(PAGE_WIDTH), real(PAGE_HEIGHT)],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => Object::string_literal(encode_win_ansi(title)),
        "Producer" => Object::string_literal("plant_core"),
        "CreationDate" => Object::string_literal(created.format("D:%Y%m%d%H%M%S").to_string()),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    doc.compress();

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes)
        .map_err(|err| ExportError::Render(err.to_string()))?;
    Ok(bytes)
}

fn real(value: f32) -> Object {
    Object::Real(value as _)
}

/// `#RRGGBB` to PDF colour components in `0.0..=1.0`. Malformed input yields black.
fn hex_rgb(hex: &str) -> (f32, f32, f32) {
    let digits = hex.trim_start_matches('#');
    let channel = |range: std::ops::Range<usize>| {
        digits
            .get(range)
            .and_then(|part| u8::from_str_radix(part, 16).ok())
            .map(|value| f32::from(value) / 255.0)
            .unwrap_or(0.0)
    };
    (channel(0..2), channel(2..4), channel(4..6))
}

/// Encodes text for a standard Type1 font using WinAnsiEncoding.
fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match ch {
            '\u{0}'..='\u{7f}' => ch as u8,
            '\u{a0}'..='\u{ff}' => ch as u32 as u8,
            '€' => 0x80,
            '‚' => 0x82,
            'ƒ' => 0x83,
            '„' => 0x84,
            '…' => 0x85,
            '†' => 0x86,
            '‡' => 0x87,
            'ˆ' => 0x88,
            '‰' => 0x89,
            'Š' => 0x8a,
            '‹' => 0x8b,
            'Œ' => 0x8c,
            'Ž' => 0x8e,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '˜' => 0x98,
            '™' => 0x99,
            'š' => 0x9a,
            '›' => 0x9b,
            'œ' => 0x9c,
            'ž' => 0x9e,
            'Ÿ' => 0x9f,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filename_collapses_whitespace_runs() {
        assert_eq!(export_filename("Pothos"), "Pothos_schedule.pdf");
        assert_eq!(export_filename("Boston Fern"), "Boston_Fern_schedule.pdf");
        assert_eq!(
            export_filename("String  of\tPearls"),
            "String_of_Pearls_schedule.pdf"
        );
    }

    #[test]
    fn filename_never_escapes_export_dir() {
        assert_eq!(
            export_filename("../../etc/passwd"),
            ".._.._etc_passwd_schedule.pdf"
        );
        assert_eq!(export_filename("a\\b / c"), "a_b_c_schedule.pdf");
        let dir = Path::new("/tmp/exports");
        assert_eq!(
            dir.join(export_filename("../evil")).parent(),
            Some(dir)
        );
    }

    #[test]
    fn export_refuses_missing_selection() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        assert!(matches!(
            prepare_export(&catalog, ""),
            Err(ExportError::NoValidSelection)
        ));
        assert!(matches!(
            prepare_export(&catalog, "Unknown Plant"),
            Err(ExportError::NoValidSelection)
        ));
    }

    #[test]
    fn export_request_for_known_plant() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let request = prepare_export(&catalog, "Pothos").expect("request");
        assert_eq!(request.title, "Pothos Care Schedule");
        assert_eq!(request.lines.first().map(String::as_str), Some("• Water every 7 days."));
        assert!(request.lines.iter().all(|line| !line.contains("Mist")));
        assert_eq!(request.tip.lines.len(), 3);
        assert_eq!(request.tip.lines[0], "Tip:");
    }

    #[test]
    fn rendered_document_is_a_pdf() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let request = prepare_export(&catalog, "Boston Fern").expect("request");
        let bytes = request.render(Local::now()).expect("render");
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).expect("reload");
        assert_eq!(doc.get_pages().len(), 1);
    }

    /// Pairs each `Tj` string with the font size and baseline (top-down) set before it.
    fn decoded_text_runs(bytes: &[u8]) -> (Vec<(f32, f32, Vec<u8>)>, Vec<String>) {
        let doc = Document::load_mem(bytes).expect("reload");
        let page_id = *doc.get_pages().get(&1).expect("first page");
        let content = doc.get_and_decode_page_content(page_id).expect("decode");

        let mut runs = Vec::new();
        let mut size = 0.0;
        let mut y = 0.0;
        for op in &content.operations {
            match op.operator.as_str() {
                "Tf" => size = op.operands[1].as_float().expect("font size"),
                "Td" => y = PAGE_HEIGHT - op.operands[1].as_float().expect("y"),
                "Tj" => runs.push((size, y, op.operands[0].as_str().expect("text").to_vec())),
                _ => {}
            }
        }
        let operators = content
            .operations
            .iter()
            .map(|op| op.operator.clone())
            .collect();
        (runs, operators)
    }

    #[test]
    fn page_content_follows_layout() {
        let catalog = Catalog::embedded().expect("embedded catalog");
        let request = prepare_export(&catalog, "Boston Fern").expect("request");
        let bytes = request.render(Local::now()).expect("render");
        let (runs, operators) = decoded_text_runs(&bytes);

        let expected: Vec<(f32, f32, &str)> = vec![
            (22.0, 40.0, "Boston Fern Care Schedule"),
            (14.0, 70.0, "• Water every 3 days."),
            (14.0, 90.0, "• Mist every 2 days."),
            (14.0, 110.0, "• Repot every 12 months."),
            (14.0, 130.0, "• Temperature: 60-75°F"),
            (14.0, 150.0, "• Soil Type: Rich, moisture-retentive"),
            (14.0, 170.0, "• Toxicity: Non-toxic"),
            (12.0, 215.0, TIP_LINES[0]),
            (12.0, 229.4, TIP_LINES[1]),
            (12.0, 243.8, TIP_LINES[2]),
        ];
        assert_eq!(runs.len(), expected.len());
        for ((size, y, text), (want_size, want_y, want_text)) in runs.iter().zip(&expected) {
            assert_eq!(*size, *want_size);
            assert!((y - want_y).abs() < 0.01, "{want_text}: y {y} != {want_y}");
            assert_eq!(text, &encode_win_ansi(want_text));
        }
        assert_eq!(runs[1].2[0], 0x95);
        assert!(runs[4].2.contains(&0xb0));

        let curves = operators.iter().filter(|op| op.as_str() == "c").count();
        assert_eq!(curves, 4);
        assert!(operators.iter().any(|op| op == "B"));
    }

    #[test]
    fn win_ansi_maps_bullets_and_degrees() {
        assert_eq!(encode_win_ansi("• 65°F"), vec![0x95, b' ', b'6', b'5', 0xb0, b'F']);
        assert_eq!(encode_win_ansi("🌱"), vec![b'?']);
    }

    #[test]
    fn hex_colours_parse() {
        let (r, g, b) = hex_rgb("#2E7D32");
        assert!((r - 46.0 / 255.0).abs() < f32::EPSILON);
        assert!((g - 125.0 / 255.0).abs() < f32::EPSILON);
        assert!((b - 50.0 / 255.0).abs() < f32::EPSILON);
        assert_eq!(hex_rgb("nope"), (0.0, 0.0, 0.0));
    }
}
