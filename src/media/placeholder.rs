use image::{Rgba, RgbaImage};

/// Slate background of generated placeholders
pub const BACKGROUND: Rgba<u8> = Rgba([0x2c, 0x3e, 0x50, 0xff]);
const FOREGROUND: Rgba<u8> = Rgba([0xff, 0xff, 0xff, 0xff]);

/// Placeholder sizes, matching where the image is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlaceholderSize {
    /// Lightbox and detail panel main image
    Main,
    /// Thumbnail strip
    Thumb,
    /// Gallery card cover
    Card,
}

impl PlaceholderSize {
    pub fn dimensions(self) -> (u32, u32) {
        match self {
            PlaceholderSize::Main => (800, 600),
            PlaceholderSize::Thumb => (150, 100),
            PlaceholderSize::Card => (600, 400),
        }
    }
}

// 3x5 block digits, one row per byte, most significant of the low 3 bits on the left
const GLYPHS: [[u8; 5]; 10] = [
    [0b111, 0b101, 0b101, 0b101, 0b111],
    [0b010, 0b110, 0b010, 0b010, 0b111],
    [0b111, 0b001, 0b111, 0b100, 0b111],
    [0b111, 0b001, 0b111, 0b001, 0b111],
    [0b101, 0b101, 0b111, 0b001, 0b001],
    [0b111, 0b100, 0b111, 0b001, 0b111],
    [0b111, 0b100, 0b111, 0b101, 0b111],
    [0b111, 0b001, 0b001, 0b001, 0b001],
    [0b111, 0b101, 0b111, 0b101, 0b111],
    [0b111, 0b101, 0b111, 0b001, 0b111],
];

/// Generate a placeholder image, optionally labelled with a 1-based position
pub fn placeholder(position: Option<usize>, width: u32, height: u32) -> RgbaImage {
    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);

    let Some(position) = position else {
        return img;
    };

    let digits: Vec<usize> = position
        .to_string()
        .bytes()
        .map(|b| (b - b'0') as usize)
        .collect();

    // Each digit is 3 cells wide with one blank cell between digits
    let cols = digits.len() as u32 * 4 - 1;
    let rows = 5;
    let scale = ((width * 3 / 5) / cols).min((height * 2 / 5) / rows).max(1);

    let text_width = cols * scale;
    let text_height = rows * scale;
    let origin_x = width.saturating_sub(text_width) / 2;
    let origin_y = height.saturating_sub(text_height) / 2;

    for (i, &digit) in digits.iter().enumerate() {
        let glyph_x = origin_x + i as u32 * 4 * scale;
        for (row, bits) in GLYPHS[digit].iter().enumerate() {
            for col in 0..3u32 {
                if bits & (0b100 >> col) == 0 {
                    continue;
                }
                fill_cell(
                    &mut img,
                    glyph_x + col * scale,
                    origin_y + row as u32 * scale,
                    scale,
                );
            }
        }
    }

    img
}

fn fill_cell(img: &mut RgbaImage, x: u32, y: u32, scale: u32) {
    for py in y..(y + scale).min(img.height()) {
        for px in x..(x + scale).min(img.width()) {
            img.put_pixel(px, py, FOREGROUND);
        }
    }
}
