use serde::{Deserialize, Serialize};
use std::ops::Add;

use crate::error::FieldError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    Unspecified,
    Green,
    Blue,
    Red,
    Pink,
    BlueViolet,
    DimGray,
    OrangeRed,
    SpringGreen,
    Yellow,
    YellowGreen,
}

/// Colors the generator draws from, in draw order.
pub const PALETTE: [Color; 10] = [
    Color::Green,
    Color::Blue,
    Color::Red,
    Color::Pink,
    Color::BlueViolet,
    Color::DimGray,
    Color::OrangeRed,
    Color::SpringGreen,
    Color::Yellow,
    Color::YellowGreen,
];

pub const PALETTE_SIZE: usize = PALETTE.len();

impl Color {
    /// SVG/CSS color keyword.
    pub fn name(&self) -> &'static str {
        match self {
            Color::Unspecified => "none",
            Color::Green => "green",
            Color::Blue => "blue",
            Color::Red => "red",
            Color::Pink => "pink",
            Color::BlueViolet => "blueviolet",
            Color::DimGray => "dimgray",
            Color::OrangeRed => "orangered",
            Color::SpringGreen => "springgreen",
            Color::Yellow => "yellow",
            Color::YellowGreen => "yellowgreen",
        }
    }

    pub fn rgb(&self) -> [u8; 3] {
        match self {
            Color::Unspecified => [255, 255, 255], // Background white
            Color::Green => [0, 128, 0],
            Color::Blue => [0, 0, 255],
            Color::Red => [255, 0, 0],
            Color::Pink => [255, 192, 203],
            Color::BlueViolet => [138, 43, 226],
            Color::DimGray => [105, 105, 105],
            Color::OrangeRed => [255, 69, 0],
            Color::SpringGreen => [0, 255, 127],
            Color::Yellow => [255, 255, 0],
            Color::YellowGreen => [154, 205, 50],
        }
    }

    /// Single character used by the ASCII view.
    pub fn symbol(&self) -> char {
        match self {
            Color::Unspecified => ' ',
            Color::Green => 'g',
            Color::Blue => 'b',
            Color::Red => 'r',
            Color::Pink => 'p',
            Color::BlueViolet => 'v',
            Color::DimGray => 'd',
            Color::OrangeRed => 'o',
            Color::SpringGreen => 's',
            Color::Yellow => 'y',
            Color::YellowGreen => 'l',
        }
    }

    pub fn is_specified(&self) -> bool {
        *self != Color::Unspecified
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: isize,
    pub col: isize,
}

impl Coord {
    pub const UP: Coord = Coord { row: -1, col: 0 };
    pub const DOWN: Coord = Coord { row: 1, col: 0 };
    pub const LEFT: Coord = Coord { row: 0, col: -1 };
    pub const RIGHT: Coord = Coord { row: 0, col: 1 };

    pub fn new(row: isize, col: isize) -> Self {
        Coord { row, col }
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, other: Coord) -> Coord {
        Coord {
            row: self.row + other.row,
            col: self.col + other.col,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub color: Color,
    pub marked: bool,
}

impl Default for Cell {
    fn default() -> Self {
        Cell {
            color: Color::Unspecified,
            marked: false,
        }
    }
}

/// Row-major grid of cells. Dimensions are fixed at construction.
///
/// The setters and getters index directly; callers check `in_range` first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawField")]
pub struct Field {
    height: usize,
    width: usize,
    cells: Vec<Vec<Cell>>,
}

/// Wire form of `Field`, checked before it becomes one.
#[derive(Deserialize)]
struct RawField {
    height: usize,
    width: usize,
    cells: Vec<Vec<Cell>>,
}

impl TryFrom<RawField> for Field {
    type Error = FieldError;

    fn try_from(raw: RawField) -> Result<Self, Self::Error> {
        check_shape(raw.height, raw.width, &raw.cells)?;
        Ok(Field {
            height: raw.height,
            width: raw.width,
            cells: raw.cells,
        })
    }
}

fn check_shape<T>(height: usize, width: usize, rows: &[Vec<T>]) -> Result<(), FieldError> {
    if rows.len() != height {
        return Err(FieldError::RowCount {
            rows: rows.len(),
            height,
        });
    }
    match rows.iter().position(|row| row.len() != width) {
        Some(row) => Err(FieldError::RaggedRow {
            row,
            len: rows[row].len(),
            width,
        }),
        None => Ok(()),
    }
}

impl Field {
    pub fn new(height: usize, width: usize) -> Self {
        let cells = vec![vec![Cell::default(); width]; height];
        Field { height, width, cells }
    }

    /// Builds a field from rows of colors. Every row must be as long as the
    /// first one.
    pub fn from_colors(rows: &[Vec<Color>]) -> Result<Self, FieldError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.len());
        check_shape(height, width, rows)?;

        let cells = rows
            .iter()
            .map(|row| row.iter().map(|&color| Cell { color, marked: false }).collect())
            .collect();
        Ok(Field { height, width, cells })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn in_range(&self, coord: Coord) -> bool {
        coord.row >= 0
            && (coord.row as usize) < self.cells.len()
            && coord.col >= 0
            && (coord.col as usize) < self.cells[coord.row as usize].len()
    }

    pub fn cell(&self, coord: Coord) -> Cell {
        self.cells[coord.row as usize][coord.col as usize]
    }

    pub fn color(&self, coord: Coord) -> Color {
        self.cell(coord).color
    }

    pub fn set_color(&mut self, coord: Coord, color: Color) {
        self.cells[coord.row as usize][coord.col as usize].color = color;
    }

    pub fn is_marked(&self, coord: Coord) -> bool {
        self.cell(coord).marked
    }

    pub fn set_mark(&mut self, coord: Coord, value: bool) {
        self.cells[coord.row as usize][coord.col as usize].marked = value;
    }

    pub fn mark_group(&mut self, group: &[Coord]) {
        for &coord in group {
            self.set_mark(coord, true);
        }
    }

    pub fn marked_count(&self) -> usize {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|cell| cell.marked)
            .count()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.iter().map(|row| row.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_creation() {
        let field = Field::new(3, 5);
        assert_eq!(field.height(), 3);
        assert_eq!(field.width(), 5);
        assert_eq!(field.rows().count(), 3);
        assert!(field.rows().all(|row| row.len() == 5));
        assert!(field
            .rows()
            .flat_map(|row| row.iter())
            .all(|cell| *cell == Cell::default()));
    }

    #[test]
    fn test_in_range() {
        let field = Field::new(2, 3);
        assert!(field.in_range(Coord::new(0, 0)));
        assert!(field.in_range(Coord::new(1, 2)));
        assert!(!field.in_range(Coord::new(-1, 0)));
        assert!(!field.in_range(Coord::new(0, -1)));
        assert!(!field.in_range(Coord::new(2, 0)));
        assert!(!field.in_range(Coord::new(0, 3)));
    }

    #[test]
    fn test_coord_add() {
        let c = Coord::new(2, 2);
        assert_eq!(c + Coord::UP, Coord::new(1, 2));
        assert_eq!(c + Coord::DOWN, Coord::new(3, 2));
        assert_eq!(c + Coord::LEFT, Coord::new(2, 1));
        assert_eq!(c + Coord::RIGHT, Coord::new(2, 3));
        assert_eq!(Coord::new(0, 0) + Coord::UP, Coord::new(-1, 0));
    }

    #[test]
    fn test_accessors() {
        let mut field = Field::new(2, 2);
        let c = Coord::new(1, 0);
        field.set_color(c, Color::Pink);
        field.set_mark(c, true);
        assert_eq!(field.color(c), Color::Pink);
        assert!(field.is_marked(c));
        assert_eq!(field.color(Coord::new(0, 0)), Color::Unspecified);
        assert!(!field.is_marked(Coord::new(0, 0)));
    }

    #[test]
    fn test_clone_is_deep() {
        let mut field = Field::new(2, 2);
        field.set_color(Coord::new(0, 0), Color::Red);
        let mut copy = field.clone();
        copy.set_color(Coord::new(0, 0), Color::Unspecified);
        assert_eq!(field.color(Coord::new(0, 0)), Color::Red);
    }

    #[test]
    fn test_mark_group() {
        let mut field = Field::new(3, 3);
        field.mark_group(&[Coord::new(0, 0), Coord::new(2, 1)]);
        assert_eq!(field.marked_count(), 2);
        assert!(field.is_marked(Coord::new(2, 1)));
    }

    #[test]
    fn test_from_colors_rejects_ragged_rows() {
        let err = Field::from_colors(&[vec![Color::Red, Color::Red], vec![Color::Red]]).unwrap_err();
        assert_eq!(err, FieldError::RaggedRow { row: 1, len: 1, width: 2 });
    }

    #[test]
    fn test_deserialize_checks_shape() {
        let short_rows = r#"{"height":2,"width":3,"cells":[[{"color":"red","marked":false}],[{"color":"red","marked":false}]]}"#;
        let err = serde_json::from_str::<Field>(short_rows).unwrap_err();
        assert!(err.to_string().contains("row 0 has 1 cells, expected 3"), "{}", err);

        let missing_row = r#"{"height":2,"width":1,"cells":[[{"color":"red","marked":false}]]}"#;
        assert!(serde_json::from_str::<Field>(missing_row).is_err());

        let good = r#"{"height":1,"width":2,"cells":[[{"color":"red","marked":true},{"color":"blue","marked":false}]]}"#;
        let field: Field = serde_json::from_str(good).unwrap();
        assert_eq!(field.color(Coord::new(0, 1)), Color::Blue);
        assert!(field.is_marked(Coord::new(0, 0)));
    }

    #[test]
    fn test_search_stays_inside_real_rows() {
        // Declared size larger than the stored cells
        let field = Field {
            height: 2,
            width: 3,
            cells: vec![vec![Cell { color: Color::Red, marked: false }]; 2],
        };
        let group = crate::group_finder::find_max_group(&field);
        assert_eq!(group.len(), 2);
        assert_eq!(crate::group_finder::find_groups(&field).len(), 1);
    }

    #[test]
    fn test_palette_names() {
        assert_eq!(PALETTE_SIZE, 10);
        assert_eq!(PALETTE[0].name(), "green");
        assert_eq!(PALETTE[9].name(), "yellowgreen");
        assert!(PALETTE.iter().all(|c| c.is_specified()));
        assert!(!Color::Unspecified.is_specified());
    }
}
