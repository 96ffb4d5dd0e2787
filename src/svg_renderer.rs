use std::fmt::{self, Write};

use crate::field::Field;

pub const CELL_WIDTH: usize = 20;
pub const CELL_HEIGHT: usize = 12;
pub const MARKED_STROKE_WIDTH: usize = 4;

pub struct SvgRenderer;

impl SvgRenderer {
    /// Renders one outlined rectangle per cell as a standalone SVG document.
    /// Marked cells get a thicker outline.
    pub fn render(field: &Field) -> Result<String, fmt::Error> {
        let mut svg = String::new();
        Self::write_document(field, &mut svg)?;
        Ok(svg)
    }

    pub fn write_document<W: Write>(field: &Field, out: &mut W) -> fmt::Result {
        let canvas_width = field.width() * CELL_WIDTH;
        let canvas_height = field.height() * CELL_HEIGHT;

        writeln!(out, "<?xml version=\"1.0\"?>")?;
        writeln!(
            out,
            "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" \
             xmlns=\"http://www.w3.org/2000/svg\" xmlns:xlink=\"http://www.w3.org/1999/xlink\">",
            w = canvas_width,
            h = canvas_height
        )?;

        for (row, cells) in field.rows().enumerate() {
            for (col, cell) in cells.iter().enumerate() {
                write!(
                    out,
                    "<rect x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" style=\"stroke:black;fill:{}",
                    col * CELL_WIDTH,
                    row * CELL_HEIGHT,
                    CELL_WIDTH,
                    CELL_HEIGHT,
                    cell.color.name()
                )?;
                if cell.marked {
                    write!(out, ";stroke-width:{}", MARKED_STROKE_WIDTH)?;
                }
                writeln!(out, "\" />")?;
            }
        }

        writeln!(out, "</svg>")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Color::{Blue, Red};
    use crate::field::Coord;

    #[test]
    fn test_one_rect_per_cell() {
        let field = Field::from_colors(&[vec![Red, Blue, Red], vec![Blue, Blue, Red]]).unwrap();
        let svg = SvgRenderer::render(&field).unwrap();
        assert_eq!(svg.matches("<rect ").count(), 6);
        assert!(svg.starts_with("<?xml"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains("width=\"60\" height=\"24\""));
    }

    #[test]
    fn test_cell_geometry_and_fill() {
        let field = Field::from_colors(&[vec![Red, Blue], vec![Blue, Red]]).unwrap();
        let svg = SvgRenderer::render(&field).unwrap();
        assert!(svg.contains(
            "<rect x=\"20\" y=\"0\" width=\"20\" height=\"12\" style=\"stroke:black;fill:blue\" />"
        ));
        assert!(svg.contains(
            "<rect x=\"0\" y=\"12\" width=\"20\" height=\"12\" style=\"stroke:black;fill:blue\" />"
        ));
    }

    #[test]
    fn test_marked_cells_get_thick_outline() {
        let mut field = Field::from_colors(&[vec![Red, Red], vec![Blue, Red]]).unwrap();
        field.mark_group(&[Coord::new(0, 0), Coord::new(0, 1), Coord::new(1, 1)]);
        let svg = SvgRenderer::render(&field).unwrap();
        assert_eq!(svg.matches("stroke-width:4").count(), 3);
        assert!(svg.contains("style=\"stroke:black;fill:red;stroke-width:4\""));
        assert!(svg.contains("style=\"stroke:black;fill:blue\""));
    }

    #[test]
    fn test_write_document_appends_to_writer() {
        let field = Field::from_colors(&[vec![Red, Blue]]).unwrap();
        let mut out = String::from("<!-- header -->\n");
        SvgRenderer::write_document(&field, &mut out).unwrap();
        assert!(out.starts_with("<!-- header -->\n<?xml"));
        assert_eq!(&out["<!-- header -->\n".len()..], SvgRenderer::render(&field).unwrap());
    }

    #[test]
    fn test_render_is_stable() {
        let field = Field::from_colors(&[vec![Red, Blue]]).unwrap();
        assert_eq!(SvgRenderer::render(&field).unwrap(), SvgRenderer::render(&field).unwrap());
    }
}
