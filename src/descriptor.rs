use std::fs;
use std::path::Path;

use crate::error::{DescriptorError, FieldError};
use crate::field_generator::validate_color_count;

const WIDTH_TOKEN: usize = 1;
const HEIGHT_TOKEN: usize = 3;
const COLORS_TOKEN: usize = 5;

/// Field size and color count read from a descriptor such as
/// `width 30 height 20 colors 4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Descriptor {
    pub width: usize,
    pub height: usize,
    pub num_colors: usize,
}

impl Descriptor {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DescriptorError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| DescriptorError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&text)
    }

    /// Lines are joined and split on whitespace; the values sit at fixed
    /// token positions and the labels in between are ignored.
    pub fn parse(text: &str) -> Result<Self, DescriptorError> {
        let tokens: Vec<&str> = text.lines().flat_map(str::split_whitespace).collect();

        let descriptor = Descriptor {
            width: number_at(&tokens, WIDTH_TOKEN, "width")?,
            height: number_at(&tokens, HEIGHT_TOKEN, "height")?,
            num_colors: number_at(&tokens, COLORS_TOKEN, "colors")?,
        };
        descriptor.validate()?;
        Ok(descriptor)
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        if self.width == 0 || self.height == 0 {
            return Err(FieldError::EmptyDimensions {
                height: self.height,
                width: self.width,
            });
        }
        validate_color_count(self.num_colors)
    }
}

fn number_at(tokens: &[&str], index: usize, name: &'static str) -> Result<usize, DescriptorError> {
    let token = tokens
        .get(index)
        .ok_or(DescriptorError::MissingToken { index, name })?;
    token.parse().map_err(|_| DescriptorError::InvalidNumber {
        name,
        value: token.to_string(),
    })
}
