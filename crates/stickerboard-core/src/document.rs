//! Composition document: ordered elements plus background.

use crate::color::Color;
use crate::element::{Element, ElementContent, ElementId, ElementPatch, Geometry};
use crate::error::{EditorError, EditorResult};
use kurbo::{Point, Vec2};

/// Default gradient stops offered when switching to a gradient background.
pub const DEFAULT_GRADIENT: (Color, Color) = (
    Color::rgb(0xFF, 0x6B, 0x6B),
    Color::rgb(0x4E, 0xCD, 0xC4),
);

/// Canvas background. Exactly one variant is active.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Solid(Color),
    /// Two-stop linear gradient.
    LinearGradient { from: Color, to: Color },
    /// Image URI, drawn to cover the canvas.
    Image(String),
}

impl Background {
    pub fn default_gradient() -> Self {
        let (from, to) = DEFAULT_GRADIENT;
        Background::LinearGradient { from, to }
    }
}

impl Default for Background {
    fn default() -> Self {
        Background::Solid(Color::white())
    }
}

/// A composition: elements in z-order (back to front) and a background.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    elements: Vec<Element>,
    background: Background,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from already-validated parts.
    pub(crate) fn from_parts(elements: Vec<Element>, background: Background) -> Self {
        Self { elements, background }
    }

    /// Elements in z-order (back to front).
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn contains(&self, id: ElementId) -> bool {
        self.index_of(id).is_some()
    }

    /// Get an element by ID.
    pub fn get(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    fn index_of(&self, id: ElementId) -> Option<usize> {
        self.elements.iter().position(|el| el.id == id)
    }

    /// Append a new element on top of the z-order and return its id.
    pub fn add_element(&mut self, content: ElementContent, geometry: Geometry) -> ElementId {
        self.push(Element::new(content, geometry))
    }

    fn push(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.push(element);
        id
    }

    /// Apply a partial update to the element with `id`.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> EditorResult<()> {
        let element = self
            .elements
            .iter_mut()
            .find(|el| el.id == id)
            .ok_or(EditorError::InvalidElementReference(id))?;
        element.apply(patch);
        Ok(())
    }

    /// Remove the element with `id`, returning it.
    pub fn remove_element(&mut self, id: ElementId) -> EditorResult<Element> {
        let index = self
            .index_of(id)
            .ok_or(EditorError::InvalidElementReference(id))?;
        Ok(self.elements.remove(index))
    }

    /// Clone the element with `id` under a fresh id, shifted by `offset`,
    /// and place the copy on top of the z-order.
    pub fn duplicate_element(&mut self, id: ElementId, offset: Vec2) -> EditorResult<ElementId> {
        let copy = self
            .get(id)
            .ok_or(EditorError::InvalidElementReference(id))?
            .duplicate(offset);
        Ok(self.push(copy))
    }

    pub fn set_background(&mut self, background: Background) {
        self.background = background;
    }

    /// Clear all elements and restore the default background.
    pub fn reset(&mut self) {
        self.elements.clear();
        self.background = Background::default();
    }

    /// Topmost element under a point (in canvas coordinates).
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        // Front to back for selection priority
        self.elements
            .iter()
            .rev()
            .find(|el| el.hit_test(point))
            .map(|el| el.id)
    }

    /// Every element under a point, front to back.
    pub fn elements_at(&self, point: Point) -> Vec<ElementId> {
        self.elements
            .iter()
            .rev()
            .filter(|el| el.hit_test(point))
            .map(|el| el.id)
            .collect()
    }
}
