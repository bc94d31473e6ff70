use std::io::{BufWriter, Write};

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point,
    Rgb as PdfRgb,
};

use super::{
    page::{Element, FontFace, PagedDocument, Rgb},
    text_metrics::ASCENT_FACTOR,
};
use crate::errors::AppResult;

const MM_PER_POINT: f32 = 25.4 / 72.0;
const LAYER_NAME: &str = "Content";

struct FontSet {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    oblique: IndirectFontRef,
}

impl FontSet {
    fn get(&self, face: FontFace) -> &IndirectFontRef {
        match face {
            FontFace::Regular => &self.regular,
            FontFace::Bold => &self.bold,
            FontFace::Oblique => &self.oblique,
        }
    }
}

fn mm(points: f32) -> Mm {
    Mm(points * MM_PER_POINT)
}

fn pdf_color(color: Rgb) -> Color {
    Color::Rgb(PdfRgb::new(
        f32::from(color.r) / 255.0,
        f32::from(color.g) / 255.0,
        f32::from(color.b) / 255.0,
        None,
    ))
}

/// Serializes a laid-out document as PDF into `writer`.
pub fn write_pdf<W: Write>(document: &PagedDocument, title: &str, writer: W) -> AppResult<()> {
    let geometry = document.geometry();
    let (width, height) = (mm(geometry.width), mm(geometry.height));

    let (pdf, first_page, first_layer) = PdfDocument::new(title, width, height, LAYER_NAME);
    let fonts = FontSet {
        regular: pdf.add_builtin_font(BuiltinFont::Helvetica)?,
        bold: pdf.add_builtin_font(BuiltinFont::HelveticaBold)?,
        oblique: pdf.add_builtin_font(BuiltinFont::HelveticaOblique)?,
    };

    for (index, page) in document.pages().iter().enumerate() {
        let (page_index, layer_index) = if index == 0 {
            (first_page, first_layer)
        } else {
            pdf.add_page(width, height, LAYER_NAME)
        };
        let layer = pdf.get_page(page_index).get_layer(layer_index);

        for element in &page.elements {
            draw(&layer, &fonts, geometry.height, element);
        }
    }

    let mut buffered = BufWriter::new(writer);
    pdf.save(&mut buffered)?;
    buffered.flush()?;

    Ok(())
}

fn draw(layer: &PdfLayerReference, fonts: &FontSet, page_height: f32, element: &Element) {
    match element {
        Element::Text { text, x, y, style } => {
            let baseline = y + style.size * ASCENT_FACTOR;
            layer.set_fill_color(pdf_color(style.color));
            layer.use_text(
                text.as_str(),
                style.size,
                mm(*x),
                mm(page_height - baseline),
                fonts.get(style.face),
            );
        }
        Element::Line {
            from,
            to,
            thickness,
            color,
        } => {
            layer.set_outline_color(pdf_color(*color));
            layer.set_outline_thickness(*thickness);
            layer.add_line(Line {
                points: vec![
                    (Point::new(mm(from.0), mm(page_height - from.1)), false),
                    (Point::new(mm(to.0), mm(page_height - to.1)), false),
                ],
                is_closed: false,
            });
        }
    }
}
