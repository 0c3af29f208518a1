//! A4 PDF rendering on top of `printpdf` builtin fonts.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rect, Rgb,
};

use super::{ReportBody, ReportDocument, ReportError, ReportRenderer, ReportRow, COLUMNS};

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const LAYER_NAME: &str = "Layer 1";
const MARGIN_X: f32 = 14.0;
const CONTENT_WIDTH: f32 = 182.0;

// Vertical positions are measured from the top edge of the page.
const TITLE_Y: f32 = 22.0;
const GENERATED_Y: f32 = 28.0;
const SUMMARY_BOX_TOP: f32 = 35.0;
const SUMMARY_BOX_HEIGHT: f32 = 25.0;
const SUMMARY_Y: f32 = 50.0;
const SUMMARY_X: [f32; 3] = [20.0, 80.0, 140.0];
const TABLE_TOP: f32 = 70.0;
const CONTINUATION_TOP: f32 = 20.0;
const BOTTOM_MARGIN: f32 = 20.0;

const ROW_HEIGHT: f32 = 7.0;
const CELL_PADDING: f32 = 1.5;
const COLUMN_WIDTHS: [f32; 6] = [24.0, 46.0, 20.0, 34.0, 22.0, 36.0];
// Rough Helvetica advance at 9pt, used to clip cell text.
const CHAR_WIDTH_9PT: f32 = 1.75;

const TITLE_SIZE: f32 = 20.0;
const SUBTITLE_SIZE: f32 = 10.0;
const SUMMARY_SIZE: f32 = 12.0;
const TABLE_SIZE: f32 = 9.0;

const INDIGO: (u8, u8, u8) = (79, 70, 229);
const GREY: (u8, u8, u8) = (100, 100, 100);
const DARK: (u8, u8, u8) = (50, 50, 50);
const PANEL: (u8, u8, u8) = (248, 250, 252);
const STRIPE: (u8, u8, u8) = (241, 245, 249);
const WHITE: (u8, u8, u8) = (255, 255, 255);

/// Renders reports as A4 PDF documents.
///
/// The transaction table is paginated with the header row repeated on every
/// page. With `table_layout` disabled the body degrades to the notice line.
#[derive(Debug, Clone, Copy)]
pub struct PdfRenderer {
    table_layout: bool,
}

impl Default for PdfRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

impl PdfRenderer {
    pub fn new(table_layout: bool) -> Self {
        Self { table_layout }
    }
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl ReportRenderer for PdfRenderer {
    fn extension(&self) -> &'static str {
        "pdf"
    }

    fn supports_tables(&self) -> bool {
        self.table_layout
    }

    fn ascii_only(&self) -> bool {
        true
    }

    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
        let (doc, page, layer) = PdfDocument::new(
            document.title.as_str(),
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            LAYER_NAME,
        );
        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(render_error)?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(render_error)?,
        };
        let canvas = doc.get_page(page).get_layer(layer);
        draw_heading(&canvas, document, &fonts);

        match &document.body {
            ReportBody::Notice(text) => {
                set_fill(&canvas, DARK);
                canvas.use_text(
                    pdf_text(text),
                    SUBTITLE_SIZE,
                    Mm(MARGIN_X),
                    from_top(TABLE_TOP),
                    &fonts.regular,
                );
            }
            ReportBody::Table(rows) => draw_table(&doc, canvas, rows, &fonts),
        }

        doc.save_to_bytes().map_err(render_error)
    }
}

fn draw_heading(canvas: &PdfLayerReference, document: &ReportDocument, fonts: &Fonts) {
    set_fill(canvas, INDIGO);
    canvas.use_text(
        pdf_text(&document.title),
        TITLE_SIZE,
        Mm(MARGIN_X),
        from_top(TITLE_Y),
        &fonts.bold,
    );

    set_fill(canvas, GREY);
    canvas.use_text(
        document.generated_line(),
        SUBTITLE_SIZE,
        Mm(MARGIN_X),
        from_top(GENERATED_Y),
        &fonts.regular,
    );

    set_fill(canvas, PANEL);
    fill_band(canvas, SUMMARY_BOX_TOP, SUMMARY_BOX_HEIGHT);

    set_fill(canvas, DARK);
    for (field, x) in document.summary.iter().zip(SUMMARY_X) {
        canvas.use_text(
            pdf_text(&format!("{}: {}", field.label, field.value)),
            SUMMARY_SIZE,
            Mm(x),
            from_top(SUMMARY_Y),
            &fonts.regular,
        );
    }
}

fn draw_table(
    doc: &PdfDocumentReference,
    first_page: PdfLayerReference,
    rows: &[ReportRow],
    fonts: &Fonts,
) {
    let mut canvas = first_page;
    let mut top = TABLE_TOP;
    draw_header_row(&canvas, top, fonts);
    top += ROW_HEIGHT;

    for (index, row) in rows.iter().enumerate() {
        if top + ROW_HEIGHT > PAGE_HEIGHT - BOTTOM_MARGIN {
            let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), LAYER_NAME);
            canvas = doc.get_page(page).get_layer(layer);
            top = CONTINUATION_TOP;
            draw_header_row(&canvas, top, fonts);
            top += ROW_HEIGHT;
        }
        if index % 2 == 1 {
            set_fill(&canvas, STRIPE);
            fill_band(&canvas, top, ROW_HEIGHT);
        }
        set_fill(&canvas, DARK);
        draw_cells(&canvas, top, &row.cells(), &fonts.regular);
        top += ROW_HEIGHT;
    }
}

fn draw_header_row(canvas: &PdfLayerReference, top: f32, fonts: &Fonts) {
    set_fill(canvas, INDIGO);
    fill_band(canvas, top, ROW_HEIGHT);
    set_fill(canvas, WHITE);
    draw_cells(canvas, top, &COLUMNS, &fonts.bold);
}

fn draw_cells(canvas: &PdfLayerReference, top: f32, cells: &[&str], font: &IndirectFontRef) {
    let baseline = from_top(top + ROW_HEIGHT - 2.0);
    let mut x = MARGIN_X;
    for (cell, width) in cells.iter().zip(COLUMN_WIDTHS) {
        canvas.use_text(
            clip(&pdf_text(cell), width),
            TABLE_SIZE,
            Mm(x + CELL_PADDING),
            baseline,
            font,
        );
        x += width;
    }
}

fn fill_band(canvas: &PdfLayerReference, top: f32, height: f32) {
    let rect = Rect::new(
        Mm(MARGIN_X),
        from_top(top + height),
        Mm(MARGIN_X + CONTENT_WIDTH),
        from_top(top),
    );
    canvas.add_rect(rect);
}

fn set_fill(canvas: &PdfLayerReference, (r, g, b): (u8, u8, u8)) {
    canvas.set_fill_color(Color::Rgb(Rgb::new(
        f32::from(r) / 255.0,
        f32::from(g) / 255.0,
        f32::from(b) / 255.0,
        None,
    )));
}

fn from_top(offset: f32) -> Mm {
    Mm(PAGE_HEIGHT - offset)
}

/// Builtin fonts only cover WinAnsi; anything outside ASCII is replaced.
fn pdf_text(text: &str) -> String {
    text.chars()
        .map(|c| if c.is_ascii() && !c.is_ascii_control() { c } else { '?' })
        .collect()
}

fn clip(text: &str, column_width: f32) -> String {
    let max_chars = ((column_width - 2.0 * CELL_PADDING) / CHAR_WIDTH_9PT) as usize;
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let mut clipped: String = text.chars().take(max_chars.saturating_sub(2)).collect();
    clipped.push_str("..");
    clipped
}

fn render_error(err: impl std::fmt::Debug) -> ReportError {
    ReportError::Render(format!("{err:?}"))
}
