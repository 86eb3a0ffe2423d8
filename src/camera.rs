use crate::present::Frame;
use crate::ScreenSize;

/// Hex values of braille dots
///
/// ```text
///  1   8
///  2  10
///  4  20
/// 40  80
/// ```
///
/// Where the base blank pattern is codepoint `0x2800` (or U+2800)
///
/// To get other configurations, just add the numbers above.
const BRAILLE_EMPTY: u32 = 0x2800;

/// Pan step, in dots
const PAN_STEP: i32 = 16;

/// A terminal view onto a presented frame.
///
/// Each character cell holds a 2x4 block of braille dots, and each dot shows one lattice cell.
/// The view is centered on the middle of the frame, shifted by the pan offset.
pub struct Camera {
    /// The cell buffer
    cb: Vec<bool>,

    /// The frame buffer.
    fb: String,

    /// Codepoints. This allows us to construct the framebuffer more easily
    cp: Vec<u32>,

    /// Width of the cell buffer, in dots
    w: usize,

    /// Height of the cell buffer, in dots
    h: usize,

    /// `x` offset from the frame center
    x: i32,

    /// `y` offset from the frame center
    y: i32,
}

impl Camera {
    /// A camera `w` dots wide and `h` dots tall
    pub fn new(w: usize, h: usize) -> Self {
        // For each braille character, we need 3 bytes:
        //  - The leader byte:     0b11100010
        //  - Continuation byte 1: 0b101000xx
        //  - Continuation byte 2: 0b10xxxxxx
        // For each newline, we need one byte: 0b00001010
        //
        // Let `w` and `h` refer to width and height of the cell buffer. Then `bw = ceil(w / 2)`
        // and `bh = ceil(h / 4)` are the width and height of braille characters of our framebuffer
        // (that is, not accounting for the trailing newlines expected at the end of each line).

        let (bw, bh) = (w.div_ceil(2), h.div_ceil(4));

        Self {
            cb: vec![false; w * h],
            fb: String::with_capacity(3 * (bw * bh) + bh),
            cp: vec![BRAILLE_EMPTY; bw * bh],
            w,
            h,
            x: 0,
            y: 0,
        }
    }

    /// A camera filling `cols x rows` terminal characters
    pub fn from_terminal(cols: ScreenSize, rows: ScreenSize) -> Self {
        Self::new(cols as usize * 2, rows as usize * 4)
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    /// Resize to `cols x rows` terminal characters, keeping the pan offset
    pub fn resize(&mut self, cols: ScreenSize, rows: ScreenSize) {
        let (x, y) = (self.x, self.y);

        *self = Self::from_terminal(cols, rows);
        self.x = x;
        self.y = y;
    }

    pub fn move_up(&mut self) {
        self.y -= PAN_STEP;
    }

    pub fn move_down(&mut self) {
        self.y += PAN_STEP;
    }

    pub fn move_left(&mut self) {
        self.x -= PAN_STEP;
    }

    pub fn move_right(&mut self) {
        self.x += PAN_STEP;
    }

    pub fn reset_view(&mut self) {
        self.x = 0;
        self.y = 0;
    }

    /// Reset the cell buffer
    pub fn reset(&mut self) {
        self.cb.fill(false);
    }

    /// Light up every dot whose frame pixel shows a live cell. Dots outside the frame stay dark.
    pub fn draw(&mut self, frame: &Frame) {
        let extent = frame.extent();

        let left = (extent.width / 2) as i64 - (self.w / 2) as i64 + self.x as i64;
        let top = (extent.height / 2) as i64 - (self.h / 2) as i64 + self.y as i64;

        for dy in 0..self.h {
            let fy = top + dy as i64;
            if fy < 0 || fy >= extent.height as i64 {
                continue;
            }

            for dx in 0..self.w {
                let fx = left + dx as i64;
                if fx < 0 || fx >= extent.width as i64 {
                    continue;
                }

                if frame.is_lit(fx as u32, fy as u32) {
                    let i = self.xy_from(dx, dy);
                    self.cb[i] = true;
                }
            }
        }
    }

    /// Fundamentally, we have a framebuffer of every pixel on our screen, and we ask ourselves "Is
    /// this pixel on or off?"
    pub fn render(&mut self) -> &str {
        let bw = self.w.div_ceil(2);

        // compute new codepoints
        self.cp.fill(BRAILLE_EMPTY);

        for (n, &px) in self.cb.iter().enumerate() {
            let (x, y) = self.xy_to(n);
            let hex = Self::get_hex_value(x, y);

            if px {
                self.cp[(y / 4) * bw + (x / 2)] += hex;
            }
        }

        // update framebuffer
        self.fb.clear();

        for (i, &c) in self.cp.iter().enumerate() {
            if i > 0 && i % bw == 0 {
                self.fb.push('\n');
            }

            // Every sum of dot values stays within U+2800..=U+28FF
            self.fb
                .push(char::from_u32(c).unwrap_or(char::REPLACEMENT_CHARACTER));
        }
        self.fb.push('\n');

        &self.fb
    }

    fn xy_to(&self, n: usize) -> (usize, usize) {
        (n % self.w, n / self.w)
    }

    fn xy_from(&self, x: usize, y: usize) -> usize {
        y * self.w + x
    }

    fn get_hex_value(x: usize, y: usize) -> u32 {
        match (x % 2, y % 4) {
            (0, 0) => 0x1,
            (1, 0) => 0x8,
            (0, 1) => 0x2,
            (1, 1) => 0x10,
            (0, 2) => 0x4,
            (1, 2) => 0x20,
            (0, 3) => 0x40,
            (1, 3) => 0x80,
            _ => unreachable!(),
        }
    }
}
