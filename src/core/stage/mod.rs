//=========================================================================
// Stage
//=========================================================================
//
// Display list owned by the active state.
//
// The stage is plain data: text and sprite objects with position,
// anchor, scale and alpha. A renderer (not part of this crate) consumes
// it; the shell uses it for layout, hit-testing and tweening. It is
// cleared on every state exit.
//
//=========================================================================

//=== Module Declarations =================================================

mod tween;

//=== Public API ==========================================================

pub use tween::{Easing, Property, TweenId, TweenManager};

//=== External Dependencies ===============================================

use std::collections::HashSet;

//=== Layout Constants ====================================================

/// Family used when a style's font has not (or not yet) been loaded.
pub const FALLBACK_FAMILY: &str = "sans-serif";

/// Approximate glyph advance as a fraction of the font size.
const GLYPH_ADVANCE: f32 = 0.55;

/// Line height as a multiple of the font size.
const LINE_HEIGHT: f32 = 1.25;

//=== Color ===============================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const TRANSPARENT: Self = Self::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// `0xRRGGBB`, opaque.
    pub const fn hex(value: u32) -> Self {
        Self::rgb((value >> 16) as u8, (value >> 8) as u8, value as u8)
    }
}

//=== TextStyle ===========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextStyle {
    pub family: String,
    pub size: f32,
    pub bold: bool,
    pub fill: Color,
    pub stroke: Color,
    pub stroke_thickness: f32,
    pub align: Align,
}

impl TextStyle {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            fill: Color::WHITE,
            stroke: Color::TRANSPARENT,
            stroke_thickness: 0.0,
            align: Align::Left,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn fill(mut self, color: Color) -> Self {
        self.fill = color;
        self
    }

    pub fn stroke(mut self, color: Color, thickness: f32) -> Self {
        self.stroke = color;
        self.stroke_thickness = thickness;
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }
}

//=== Display Objects =====================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    Text { content: String, style: TextStyle },
    Sprite { key: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayObject {
    pub id: ObjectId,
    pub visual: Visual,
    pub x: f32,
    pub y: f32,
    /// Normalised pivot; `(0.5, 0.5)` centres the object on `(x, y)`.
    pub anchor: (f32, f32),
    pub scale: (f32, f32),
    pub alpha: f32,
}

/// Axis-aligned rectangle in stage coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn contains(&self, (px, py): (f32, f32)) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }
}

//=== Stage ===============================================================

pub struct Stage {
    width: f32,
    height: f32,
    objects: Vec<DisplayObject>,
    next_id: u64,
    fonts: HashSet<String>,
}

impl Stage {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            objects: Vec::new(),
            next_id: 0,
            fonts: HashSet::new(),
        }
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }

    //--- Object Management ------------------------------------------------

    pub fn add_text(&mut self, x: f32, y: f32, content: impl Into<String>, style: TextStyle) -> ObjectId {
        self.push(
            Visual::Text {
                content: content.into(),
                style,
            },
            x,
            y,
        )
    }

    pub fn add_sprite(&mut self, x: f32, y: f32, key: impl Into<String>) -> ObjectId {
        self.push(Visual::Sprite { key: key.into() }, x, y)
    }

    fn push(&mut self, visual: Visual, x: f32, y: f32) -> ObjectId {
        self.next_id += 1;
        let id = ObjectId(self.next_id);
        self.objects.push(DisplayObject {
            id,
            visual,
            x,
            y,
            anchor: (0.0, 0.0),
            scale: (1.0, 1.0),
            alpha: 1.0,
        });
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&DisplayObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut DisplayObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn remove(&mut self, id: ObjectId) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| o.id != id);
        self.objects.len() != before
    }

    /// Drops every object. Loaded fonts stay registered.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Objects in draw order.
    pub fn objects(&self) -> &[DisplayObject] {
        &self.objects
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    //--- Text -------------------------------------------------------------

    pub fn set_text(&mut self, id: ObjectId, text: impl Into<String>) {
        if let Some(DisplayObject {
            visual: Visual::Text { content, .. },
            ..
        }) = self.get_mut(id)
        {
            *content = text.into();
        }
    }

    pub fn set_style(&mut self, id: ObjectId, new_style: TextStyle) {
        if let Some(DisplayObject {
            visual: Visual::Text { style, .. },
            ..
        }) = self.get_mut(id)
        {
            *style = new_style;
        }
    }

    pub fn text(&self, id: ObjectId) -> Option<&str> {
        match self.get(id).map(|o| &o.visual) {
            Some(Visual::Text { content, .. }) => Some(content.as_str()),
            _ => None,
        }
    }

    pub fn style(&self, id: ObjectId) -> Option<&TextStyle> {
        match self.get(id).map(|o| &o.visual) {
            Some(Visual::Text { style, .. }) => Some(style),
            _ => None,
        }
    }

    //--- Fonts ------------------------------------------------------------

    pub(crate) fn register_font(&mut self, family: &str) {
        self.fonts.insert(family.to_owned());
    }

    pub fn has_font(&self, family: &str) -> bool {
        self.fonts.contains(family)
    }

    /// Family a renderer should use for `style`.
    pub fn effective_family<'a>(&self, style: &'a TextStyle) -> &'a str {
        if self.fonts.contains(&style.family) {
            &style.family
        } else {
            FALLBACK_FAMILY
        }
    }

    //--- Geometry ---------------------------------------------------------

    /// Estimated bounds of a text object. Sprites have no intrinsic size
    /// here and report `None`.
    pub fn bounds(&self, id: ObjectId) -> Option<Rect> {
        let object = self.get(id)?;
        let Visual::Text { content, style } = &object.visual else {
            return None;
        };

        let width = content.chars().count() as f32 * style.size * GLYPH_ADVANCE * object.scale.0;
        let height = style.size * LINE_HEIGHT * object.scale.1;

        Some(Rect {
            x: object.x - object.anchor.0 * width,
            y: object.y - object.anchor.1 * height,
            width,
            height,
        })
    }

    //--- Properties -------------------------------------------------------

    pub fn property(&self, id: ObjectId, property: Property) -> Option<f32> {
        let object = self.get(id)?;
        Some(match property {
            Property::X => object.x,
            Property::Y => object.y,
            Property::Alpha => object.alpha,
            Property::ScaleX => object.scale.0,
        })
    }

    pub fn set_property(&mut self, id: ObjectId, property: Property, value: f32) -> bool {
        let Some(object) = self.get_mut(id) else {
            return false;
        };
        match property {
            Property::X => object.x = value,
            Property::Y => object.y = value,
            Property::Alpha => object.alpha = value.clamp(0.0, 1.0),
            Property::ScaleX => object.scale.0 = value,
        }
        true
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn style() -> TextStyle {
        TextStyle::new("TheMinion", 40.0)
    }

    #[test]
    fn ids_are_unique_and_clear_keeps_counting() {
        let mut stage = Stage::new(800.0, 600.0);
        let a = stage.add_text(0.0, 0.0, "a", style());
        stage.clear();
        let b = stage.add_sprite(0.0, 0.0, "stars");
        assert_ne!(a, b);
        assert!(stage.get(a).is_none());
    }

    #[test]
    fn text_and_style_updates() {
        let mut stage = Stage::new(800.0, 600.0);
        let id = stage.add_text(30.0, 280.0, "Music: On", style());

        stage.set_text(id, "Music: Off");
        stage.set_style(id, style().fill(Color::hex(0xFEFFD5)));

        assert_eq!(stage.text(id), Some("Music: Off"));
        assert_eq!(stage.style(id).unwrap().fill, Color::rgb(0xFE, 0xFF, 0xD5));
    }

    #[test]
    fn bounds_respect_anchor() {
        let mut stage = Stage::new(800.0, 600.0);
        let id = stage.add_text(400.0, 100.0, "abcd", TextStyle::new("x", 20.0));
        stage.get_mut(id).unwrap().anchor = (0.5, 0.5);

        let rect = stage.bounds(id).unwrap();
        assert_eq!(rect.width, 4.0 * 20.0 * GLYPH_ADVANCE);
        assert_eq!(rect.x, 400.0 - rect.width / 2.0);
        assert!(rect.contains((400.0, 100.0)));
        assert!(!rect.contains((400.0, 200.0)));
    }

    #[test]
    fn sprites_have_no_bounds() {
        let mut stage = Stage::new(800.0, 600.0);
        let id = stage.add_sprite(0.0, 0.0, "menu-bg");
        assert!(stage.bounds(id).is_none());
    }

    #[test]
    fn unloaded_font_falls_back() {
        let mut stage = Stage::new(800.0, 600.0);
        let style = style();
        assert_eq!(stage.effective_family(&style), FALLBACK_FAMILY);

        stage.register_font("TheMinion");
        assert_eq!(stage.effective_family(&style), "TheMinion");
    }

    #[test]
    fn alpha_is_clamped() {
        let mut stage = Stage::new(800.0, 600.0);
        let id = stage.add_sprite(0.0, 0.0, "brand");
        stage.set_property(id, Property::Alpha, 1.7);
        assert_eq!(stage.property(id, Property::Alpha), Some(1.0));
    }
}
