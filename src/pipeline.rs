use log::info;

use crate::descriptor::Descriptor;
use crate::error::FieldError;
use crate::field::{Color, Coord, Field};
use crate::field_generator::FieldGenerator;
use crate::group_finder::find_max_group;

/// A generated field with its largest group already marked.
#[derive(Debug, Clone)]
pub struct MarkedField {
    pub field: Field,
    pub max_group: Vec<Coord>,
}

impl MarkedField {
    pub fn group_color(&self) -> Color {
        self.max_group
            .first()
            .map_or(Color::Unspecified, |&coord| self.field.color(coord))
    }
}

/// Generate, search, mark. Runs to completion before anything is served.
pub fn build_marked_field(
    descriptor: &Descriptor,
    generator: &mut FieldGenerator,
) -> Result<MarkedField, FieldError> {
    descriptor.validate()?;
    let mut field = generator.generate(descriptor.height, descriptor.width, descriptor.num_colors)?;
    info!(
        "generated {}x{} field with {} colors (seed {})",
        descriptor.height,
        descriptor.width,
        descriptor.num_colors,
        generator.seed()
    );

    let max_group = find_max_group(&field);
    field.mark_group(&max_group);

    let marked = MarkedField { field, max_group };
    info!(
        "largest group: {} {} cells",
        marked.max_group.len(),
        marked.group_color().name()
    );
    Ok(marked)
}
