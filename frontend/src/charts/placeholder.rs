use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{ChartError, FONT_FAMILY, MUTED_TEXT_COLOR};

/// Draw `message` centered on the surface in place of a chart
pub fn draw_placeholder<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    message: &str,
) -> Result<(), ChartError> {
    let (width, height) = root.dim_in_pixel();
    let style = TextStyle::from((FONT_FAMILY, 14).into_font())
        .color(&MUTED_TEXT_COLOR)
        .pos(Pos::new(HPos::Center, VPos::Center));

    root.draw_text(message, &style, ((width / 2) as i32, (height / 2) as i32))?;
    root.present()?;
    Ok(())
}
