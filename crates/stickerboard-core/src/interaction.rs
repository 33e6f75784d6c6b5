//! Pointer gesture state for the editing session.

use crate::element::ElementId;
use kurbo::{Point, Vec2};

/// Pointer input, in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed; starts a drag if an element is under the pointer.
    Down { position: Point },
    Move { position: Point },
    /// Button released; ends and commits a drag.
    Up { position: Point },
    /// Press and release without movement; selects without dragging.
    Click { position: Point },
    /// Abort the gesture in progress (e.g. Escape).
    Cancel,
}

/// State of an in-progress drag.
#[derive(Debug, Clone, PartialEq)]
pub struct DragState {
    /// The element being moved.
    pub element: ElementId,
    /// Pointer position minus element position at gesture start.
    pub grab_offset: Vec2,
    /// Element position before the drag, restored on cancel.
    pub origin: Point,
    /// Last pointer position applied.
    pub current_point: Point,
}

impl DragState {
    pub fn new(element: ElementId, pointer: Point, element_position: Point) -> Self {
        Self {
            element,
            grab_offset: pointer - element_position,
            origin: element_position,
            current_point: pointer,
        }
    }

    /// Element position that keeps the grab offset under `pointer`.
    pub fn target_position(&self, pointer: Point) -> Point {
        pointer - self.grab_offset
    }

    /// Total displacement since the gesture started.
    pub fn delta(&self) -> Vec2 {
        self.target_position(self.current_point) - self.origin
    }
}

/// Gesture state machine: idle or dragging one element.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging(DragState),
}

impl Gesture {
    pub fn is_dragging(&self) -> bool {
        matches!(self, Gesture::Dragging(_))
    }

    pub fn drag(&self) -> Option<&DragState> {
        match self {
            Gesture::Dragging(drag) => Some(drag),
            Gesture::Idle => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grab_offset_is_preserved() {
        let drag = DragState::new(
            ElementId::new(),
            Point::new(215.0, 230.0),
            Point::new(200.0, 200.0),
        );
        assert_eq!(drag.grab_offset, Vec2::new(15.0, 30.0));
        assert_eq!(drag.target_position(Point::new(315.0, 130.0)), Point::new(300.0, 100.0));
    }

    #[test]
    fn test_delta() {
        let mut drag =
            DragState::new(ElementId::new(), Point::new(10.0, 10.0), Point::new(0.0, 0.0));
        drag.current_point = Point::new(40.0, -10.0);
        assert_eq!(drag.delta(), Vec2::new(30.0, -20.0));
    }

    #[test]
    fn test_gesture_default_idle() {
        let gesture = Gesture::default();
        assert!(!gesture.is_dragging());
        assert!(gesture.drag().is_none());
    }
}
