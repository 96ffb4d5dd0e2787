use image::codecs::png::PngEncoder;
use image::{ColorType, ImageEncoder, ImageError, Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_hollow_rect_mut};
use imageproc::rect::Rect;

use crate::field::Field;
use crate::svg_renderer::{CELL_HEIGHT, CELL_WIDTH, MARKED_STROKE_WIDTH};

const OUTLINE: Rgb<u8> = Rgb([0, 0, 0]);

pub struct PngRenderer;

impl PngRenderer {
    /// Same layout as the SVG output: one filled cell with a 1px outline,
    /// marked cells outlined `MARKED_STROKE_WIDTH` pixels thick.
    pub fn render_to_image(field: &Field) -> RgbImage {
        let width = (field.width() * CELL_WIDTH) as u32;
        let height = (field.height() * CELL_HEIGHT) as u32;
        let mut img = RgbImage::new(width, height);

        for (row, cells) in field.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                let x = (col * CELL_WIDTH) as i32;
                let y = (row * CELL_HEIGHT) as i32;
                let rect = Rect::at(x, y).of_size(CELL_WIDTH as u32, CELL_HEIGHT as u32);
                draw_filled_rect_mut(&mut img, rect, Rgb(cell.color.rgb()));

                let stroke = if cell.marked { MARKED_STROKE_WIDTH } else { 1 };
                // Inset outlines grow the border inward, one pixel per pass
                for inset in 0..stroke {
                    let w = CELL_WIDTH.saturating_sub(2 * inset);
                    let h = CELL_HEIGHT.saturating_sub(2 * inset);
                    if w == 0 || h == 0 {
                        break;
                    }
                    let outline = Rect::at(x + inset as i32, y + inset as i32).of_size(w as u32, h as u32);
                    draw_hollow_rect_mut(&mut img, outline, OUTLINE);
                }
            }
        }

        img
    }

    pub fn render(field: &Field) -> Result<Vec<u8>, ImageError> {
        let img = Self::render_to_image(field);
        let mut png_bytes = Vec::new();
        PngEncoder::new(&mut png_bytes).write_image(
            img.as_raw(),
            img.width(),
            img.height(),
            ColorType::Rgb8,
        )?;
        Ok(png_bytes)
    }
}
