//! Paginated report document model
//!
//! A rendered report is an ordered list of pages, each an ordered list of
//! positioned blocks. The layout pass produces this value; the PDF painter
//! consumes it. Coordinates are millimetres from the top-left page corner.

/// RGB color with 0.0-1.0 channels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

impl Rgb {
    /// Create a new color
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }
}

/// A single positioned drawing operation on a page
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// One line of text; `y` is the text baseline
    Text {
        x: f64,
        y: f64,
        size: f64,
        bold: bool,
        mono: bool,
        color: Rgb,
        content: String,
    },
    /// A filled rectangle; (`x`, `y`) is the top-left corner
    Rect {
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        color: Rgb,
    },
}

/// One page of the report
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Drawing operations in emission order
    pub blocks: Vec<Block>,
}

/// A fully laid-out report ready to paint
#[derive(Debug, Clone, PartialEq)]
pub struct ReportDocument {
    /// Page width in millimetres
    pub width: f64,
    /// Page height in millimetres
    pub height: f64,
    /// Pages in order; never empty
    pub pages: Vec<Page>,
}

impl ReportDocument {
    /// Create a new document with a single empty page
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            pages: vec![Page::default()],
        }
    }

    /// Number of pages
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Append a new empty page, returning its index
    pub fn add_page(&mut self) -> usize {
        self.pages.push(Page::default());
        self.pages.len() - 1
    }

    /// Append a block to the given page
    pub fn push_block(&mut self, page: usize, block: Block) {
        self.pages[page].blocks.push(block);
    }

    /// Iterate all text blocks on one page
    pub fn text_on_page(&self, page: usize) -> impl Iterator<Item = &str> {
        self.pages[page].blocks.iter().filter_map(|block| match block {
            Block::Text { content, .. } => Some(content.as_str()),
            _ => None,
        })
    }
}
