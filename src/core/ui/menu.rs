//=========================================================================
// Menu Builder
//=========================================================================
//
// Stacks clickable text options vertically.
//
// Option `i` (starting at 1) is placed at `base_y + i * row_height`, drawn
// in the default style, and bound to hover styling and its callback.
// Activating an option plays the layout's click sound first, if any.
//
//=========================================================================

use crate::core::globals::GlobalContext;
use crate::core::stage::{ObjectId, TextStyle};

use super::{WidgetContext, WidgetHandle};

/// Placement and styling shared by every option of one menu.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuLayout {
    pub x: f32,
    pub base_y: f32,
    pub row_height: f32,
    pub style: TextStyle,
    pub hover_style: TextStyle,
    pub click_sound: Option<String>,
}

/// An option added to the stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MenuOption {
    pub ordinal: u32,
    pub object: ObjectId,
    pub handle: WidgetHandle,
    pub y: f32,
}

#[derive(Debug, Clone)]
pub struct MenuBuilder {
    layout: MenuLayout,
    next_ordinal: u32,
}

impl MenuBuilder {
    pub fn new(layout: MenuLayout) -> Self {
        Self {
            layout,
            next_ordinal: 1,
        }
    }

    pub fn layout(&self) -> &MenuLayout {
        &self.layout
    }

    /// Ordinal the next option will get.
    pub fn next_ordinal(&self) -> u32 {
        self.next_ordinal
    }

    /// Adds `label` as the next option and binds `on_activate` to it.
    pub fn add_option<F>(&mut self, ctx: &mut GlobalContext, label: &str, mut on_activate: F) -> MenuOption
    where
        F: FnMut(&mut WidgetContext<'_>) + Send + 'static,
    {
        let ordinal = self.next_ordinal;
        let layout = &self.layout;
        let y = layout.base_y + ordinal as f32 * layout.row_height;

        let object = ctx.stage.add_text(layout.x, y, label, layout.style.clone());
        let click = layout.click_sound.clone();
        let handle = ctx.widgets.bind(
            object,
            layout.style.clone(),
            layout.hover_style.clone(),
            move |w: &mut WidgetContext<'_>| {
                if let Some(sound) = &click {
                    w.runtime.play_sound(sound);
                }
                on_activate(w);
            },
        );

        self.next_ordinal += 1;
        MenuOption {
            ordinal,
            object,
            handle,
            y,
        }
    }
}
