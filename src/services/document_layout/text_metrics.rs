use super::page::FontFace;

/// Line box height as a multiple of the font size (Helvetica ascender, descender
/// and line gap).
pub const LINE_HEIGHT_FACTOR: f32 = 1.156;

/// Baseline offset from the top of the line box, as a multiple of the font size.
pub const ASCENT_FACTOR: f32 = 0.718;

const BOLD_WIDTH_FACTOR: f32 = 1.06;
const DEFAULT_GLYPH_WIDTH: u16 = 556;

pub fn line_height(font_size: f32) -> f32 {
    font_size * LINE_HEIGHT_FACTOR
}

/// Helvetica advance widths in 1/1000 em.
fn glyph_units(c: char) -> u16 {
    match c {
        ' ' | '!' | ',' | '.' | '/' | ':' | ';' | '[' | '\\' | ']' | 'I' | 'f' | 't' => 278,
        'i' | 'j' | 'l' => 222,
        '\'' => 191,
        '"' => 355,
        '(' | ')' | '-' | '`' | 'r' => 333,
        '*' => 389,
        '+' | '<' | '=' | '>' | '~' => 584,
        '%' => 889,
        '&' | 'A' | 'B' | 'E' | 'K' | 'P' | 'S' | 'V' | 'X' | 'Y' => 667,
        '@' => 1015,
        'C' | 'D' | 'H' | 'N' | 'R' | 'U' | 'w' => 722,
        'F' | 'T' | 'Z' => 611,
        'G' | 'O' | 'Q' => 778,
        'J' => 500,
        'L' => 556,
        'M' | 'm' => 833,
        'W' => 944,
        '^' => 469,
        '{' | '}' => 334,
        '|' => 260,
        'c' | 'k' | 's' | 'v' | 'x' | 'y' | 'z' => 500,
        _ => DEFAULT_GLYPH_WIDTH,
    }
}

pub fn char_width(c: char, face: FontFace, font_size: f32) -> f32 {
    let width = f32::from(glyph_units(c)) * font_size / 1000.0;
    match face {
        FontFace::Bold => width * BOLD_WIDTH_FACTOR,
        FontFace::Regular | FontFace::Oblique => width,
    }
}

pub fn text_width(text: &str, face: FontFace, font_size: f32) -> f32 {
    text.chars().map(|c| char_width(c, face, font_size)).sum()
}

/// Greedy word wrap. Words wider than `max_width` are split between characters.
/// Blank input yields no lines.
pub fn wrap_text(text: &str, face: FontFace, font_size: f32, max_width: f32) -> Vec<String> {
    let space = char_width(' ', face, font_size);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        let mut line_width = 0.0;

        for word in paragraph.split_whitespace() {
            let word_width = text_width(word, face, font_size);

            if !line.is_empty() && line_width + space + word_width <= max_width {
                line.push(' ');
                line.push_str(word);
                line_width += space + word_width;
                continue;
            }

            if !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }

            if word_width <= max_width {
                line.push_str(word);
                line_width = word_width;
            } else {
                let mut pieces = split_long_word(word, face, font_size, max_width);
                let last = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
                line_width = text_width(&last, face, font_size);
                line = last;
            }
        }

        if !line.is_empty() {
            lines.push(line);
        }
    }

    lines
}

fn split_long_word(word: &str, face: FontFace, font_size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    let mut piece_width = 0.0;

    for c in word.chars() {
        let width = char_width(c, face, font_size);
        if !piece.is_empty() && piece_width + width > max_width {
            pieces.push(std::mem::take(&mut piece));
            piece_width = 0.0;
        }
        piece.push(c);
        piece_width += width;
    }

    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
