//! Panel: a plain container.
//!
//! A panel draws nothing beyond the background and border every node gets
//! from the painter. It exists to group and dock child controls.

use std::any::Any;

use crate::widget::traits::Control;

/// A container control with no behavior of its own.
///
/// # Examples
///
/// ```ignore
/// let toolbar = ui.create_styled(1, Panel::new(), "height:24;width:fill")?;
/// ui.insert_child(ui.root(), toolbar)?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Panel;

impl Panel {
    pub fn new() -> Self {
        Self
    }
}

impl Control for Panel {
    fn control_type(&self) -> &'static str {
        "Panel"
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
