use super::text_metrics::{line_height, text_width, wrap_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
    Oblique,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub face: FontFace,
    pub size: f32,
    pub color: Rgb,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

/// One positioned drawing operation. Coordinates are points measured from the
/// top-left corner of the page; `y` of a text line is the top of its line box.
#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text {
        text: String,
        x: f32,
        y: f32,
        style: TextStyle,
    },
    Line {
        from: (f32, f32),
        to: (f32, f32),
        thickness: f32,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub elements: Vec<Element>,
}

impl Page {
    pub fn texts(&self) -> impl Iterator<Item = (&str, f32, &TextStyle)> {
        self.elements.iter().filter_map(|element| match element {
            Element::Text { text, y, style, .. } => Some((text.as_str(), *y, style)),
            Element::Line { .. } => None,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width: f32,
    pub height: f32,
    pub margin: f32,
}

impl PageGeometry {
    pub const fn a4() -> Self {
        Self {
            width: 595.28,
            height: 841.89,
            margin: 30.0,
        }
    }

    pub fn content_width(&self) -> f32 {
        self.width - 2.0 * self.margin
    }

    pub fn bottom_limit(&self) -> f32 {
        self.height - self.margin
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::a4()
    }
}

/// Buffered pages, kept until layout completes so every page can be revisited.
#[derive(Debug, Clone, PartialEq)]
pub struct PagedDocument {
    geometry: PageGeometry,
    pages: Vec<Page>,
}

impl PagedDocument {
    pub fn geometry(&self) -> PageGeometry {
        self.geometry
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn pages_mut(&mut self) -> &mut [Page] {
        &mut self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }
}

/// Vertical write cursor over a growing `PagedDocument`.
///
/// Text written through the flow is wrapped to its box and continues on a fresh
/// page whenever a line would cross the bottom margin.
pub struct PageFlow {
    document: PagedDocument,
    y: f32,
    font_size: f32,
}

impl PageFlow {
    pub fn new(geometry: PageGeometry) -> Self {
        Self {
            document: PagedDocument {
                geometry,
                pages: vec![Page::default()],
            },
            y: geometry.margin,
            font_size: 12.0,
        }
    }

    pub fn y(&self) -> f32 {
        self.y
    }

    pub fn page_height(&self) -> f32 {
        self.document.geometry.height
    }

    /// Space left between the cursor and the bottom margin.
    pub fn remaining(&self) -> f32 {
        self.document.geometry.bottom_limit() - self.y
    }

    pub fn add_page(&mut self) {
        self.document.pages.push(Page::default());
        self.y = self.document.geometry.margin;
    }

    /// Advances by `lines` line heights of the most recently used font size.
    pub fn move_down(&mut self, lines: f32) {
        self.y += lines * line_height(self.font_size);
    }

    pub fn write(&mut self, text: &str, x: f32, width: f32, style: TextStyle, align: Align) {
        self.font_size = style.size;
        let height = line_height(style.size);

        for line in wrap_text(text, style.face, style.size, width) {
            let at_top = self.y <= self.document.geometry.margin;
            if !at_top && self.y + height > self.document.geometry.bottom_limit() {
                self.add_page();
            }

            let line_x = match align {
                Align::Left => x,
                Align::Center => x + (width - text_width(&line, style.face, style.size)).max(0.0) / 2.0,
            };

            self.push(Element::Text {
                text: line,
                x: line_x,
                y: self.y,
                style,
            });
            self.y += height;
        }
    }

    /// Draws a line on the current page without moving the cursor.
    pub fn line(&mut self, from: (f32, f32), to: (f32, f32), thickness: f32, color: Rgb) {
        self.push(Element::Line {
            from,
            to,
            thickness,
            color,
        });
    }

    pub fn finish(self) -> PagedDocument {
        self.document
    }

    fn push(&mut self, element: Element) {
        if let Some(page) = self.document.pages.last_mut() {
            page.elements.push(element);
        }
    }
}
