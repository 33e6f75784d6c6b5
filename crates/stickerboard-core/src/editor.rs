//! Editing session: document, history, selection and pointer gestures.

use crate::catalog::{AnimationPreset, FilterPreset, StickerId};
use crate::config::EditorConfig;
use crate::document::{Background, Document};
use crate::element::{Element, ElementContent, ElementId, ElementPatch, Geometry};
use crate::error::{EditorError, EditorResult};
use crate::history::History;
use crate::interaction::{DragState, Gesture, PointerEvent};
use crate::persistence::SaveRequest;
use crate::serialize::{self, DesignPayload};
use kurbo::Point;
use serde_json::Value;

/// A live editing session.
///
/// Every discrete action (adding, deleting, duplicating, choosing a preset,
/// changing the background, finishing a drag) commits exactly one snapshot.
/// Continuous adjustments go through [`Editor::update_element`] and are
/// committed by the caller with [`Editor::commit`] once the adjustment ends.
#[derive(Debug, Clone)]
pub struct Editor {
    document: Document,
    history: History,
    selection: Option<ElementId>,
    gesture: Gesture,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Create a session with an empty document and empty history.
    pub fn new() -> Self {
        Self::with_config(EditorConfig::default())
    }

    pub fn with_config(config: EditorConfig) -> Self {
        Self {
            document: Document::new(),
            history: History::new(config.history_limit),
            selection: None,
            gesture: Gesture::Idle,
            config,
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn selection(&self) -> Option<ElementId> {
        self.selection
    }

    /// The selected element, if any.
    pub fn selected_element(&self) -> Option<&Element> {
        self.selection.and_then(|id| self.document.get(id))
    }

    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        self.gesture.is_dragging()
    }

    /// Record the live document as a new history snapshot.
    pub fn commit(&mut self) {
        self.history.commit(&self.document);
    }

    // --- Tool actions ---

    /// Append an element on top, select it and commit.
    pub fn add_element(&mut self, content: ElementContent, geometry: Geometry) -> ElementId {
        let id = self.document.add_element(content, geometry);
        log::debug!("added element {id}");
        self.selection = Some(id);
        self.commit();
        id
    }

    fn placement(&self) -> Geometry {
        Geometry::at(self.config.placement)
    }

    pub fn add_emoji(&mut self, glyph: &str) -> ElementId {
        let geometry = self.placement();
        self.add_element(ElementContent::Emoji(glyph.to_string()), geometry)
    }

    pub fn add_sticker(&mut self, sticker: StickerId) -> ElementId {
        let geometry = self.placement();
        self.add_element(ElementContent::Sticker(sticker), geometry)
    }

    /// Add a text element in the default style. Blank text is ignored.
    pub fn add_text(&mut self, text: &str) -> Option<ElementId> {
        if text.trim().is_empty() {
            return None;
        }
        let content = ElementContent::Text {
            text: text.to_string(),
            style: self.config.default_text_style.clone(),
        };
        let geometry = self.placement();
        Some(self.add_element(content, geometry))
    }

    /// Add an image by URI. An empty URI is ignored.
    pub fn add_image(&mut self, uri: &str) -> Option<ElementId> {
        if uri.trim().is_empty() {
            return None;
        }
        let geometry = self.placement();
        Some(self.add_element(ElementContent::Image(uri.to_string()), geometry))
    }

    /// Delete an element, dropping the selection if it pointed there, and
    /// commit. Unknown ids are a no-op.
    pub fn remove_element(&mut self, id: ElementId) -> bool {
        if let Err(err) = self.document.remove_element(id) {
            log::warn!("remove ignored: {err}");
            return false;
        }
        if self.selection == Some(id) {
            self.selection = None;
        }
        if self.gesture.drag().is_some_and(|drag| drag.element == id) {
            self.gesture = Gesture::Idle;
        }
        self.commit();
        true
    }

    pub fn delete_selected(&mut self) -> bool {
        match self.selection {
            Some(id) => self.remove_element(id),
            None => false,
        }
    }

    /// Copy an element under a fresh id, offset by the configured delta.
    /// The copy goes on top, becomes the selection and is committed.
    pub fn duplicate_element(&mut self, id: ElementId) -> Option<ElementId> {
        match self.document.duplicate_element(id, self.config.duplicate_offset) {
            Ok(copy) => {
                log::debug!("duplicated {id} as {copy}");
                self.selection = Some(copy);
                self.commit();
                Some(copy)
            }
            Err(err) => {
                log::warn!("duplicate ignored: {err}");
                None
            }
        }
    }

    pub fn duplicate_selected(&mut self) -> Option<ElementId> {
        self.selection.and_then(|id| self.duplicate_element(id))
    }

    pub fn set_background(&mut self, background: Background) {
        self.document.set_background(background);
        self.commit();
    }

    /// Start a new composition: empty document, default background, no
    /// selection, and a history holding only that state.
    pub fn reset(&mut self) {
        self.document.reset();
        self.selection = None;
        self.gesture = Gesture::Idle;
        self.history.reset(&self.document);
        log::info!("document reset");
    }

    // --- Property edits ---

    /// Apply a live adjustment without committing. Returns false for an
    /// unknown id.
    pub fn update_element(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        match self.document.update_element(id, patch) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("update ignored: {err}");
                false
            }
        }
    }

    pub fn update_selected(&mut self, patch: &ElementPatch) -> bool {
        match self.selection {
            Some(id) => self.update_element(id, patch),
            None => false,
        }
    }

    /// Choose an animation preset. Commits.
    pub fn set_animation(&mut self, id: ElementId, animation: AnimationPreset) -> bool {
        self.apply_and_commit(id, &ElementPatch::animation(animation))
    }

    /// Choose a filter preset. Commits.
    pub fn set_filter(&mut self, id: ElementId, filter: FilterPreset) -> bool {
        self.apply_and_commit(id, &ElementPatch::filter(filter))
    }

    fn apply_and_commit(&mut self, id: ElementId, patch: &ElementPatch) -> bool {
        let applied = self.update_element(id, patch);
        if applied {
            self.commit();
        }
        applied
    }

    // --- History ---

    /// Step back one snapshot. Any drag in progress is abandoned first.
    /// Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        self.abandon_gesture();
        let Some(document) = self.history.undo() else {
            return false;
        };
        self.document = document.clone();
        self.retain_selection();
        true
    }

    /// Step forward one snapshot. Returns false when there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        self.abandon_gesture();
        let Some(document) = self.history.redo() else {
            return false;
        };
        self.document = document.clone();
        self.retain_selection();
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn retain_selection(&mut self) {
        self.selection = self.selection.filter(|id| self.document.contains(*id));
    }

    fn abandon_gesture(&mut self) {
        if self.gesture.is_dragging() {
            log::debug!("drag abandoned");
            self.gesture = Gesture::Idle;
        }
    }

    // --- Selection ---

    /// Select an element. Selection is not a history event.
    pub fn select(&mut self, id: ElementId) -> bool {
        if !self.document.contains(id) {
            log::warn!("select ignored: {}", EditorError::InvalidElementReference(id));
            return false;
        }
        self.selection = Some(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// Click on an element: select it without starting a drag.
    pub fn click(&mut self, id: ElementId) -> bool {
        if self.document.contains(id) {
            self.finish_lost_drag();
        }
        self.select(id)
    }

    /// Click on empty canvas.
    pub fn click_empty(&mut self) {
        self.finish_lost_drag();
        self.clear_selection();
    }

    /// Click at a canvas point, selecting the topmost element there or
    /// clearing the selection if there is none.
    pub fn click_at(&mut self, point: Point) -> Option<ElementId> {
        self.finish_lost_drag();
        match self.document.element_at(point) {
            Some(id) => {
                self.selection = Some(id);
                Some(id)
            }
            None => {
                self.click_empty();
                None
            }
        }
    }

    // --- Gestures ---

    /// Press on an element: select it and start dragging.
    pub fn pointer_down(&mut self, id: ElementId, pointer: Point) -> bool {
        let Some(element) = self.document.get(id) else {
            log::warn!("drag ignored: {}", EditorError::InvalidElementReference(id));
            return false;
        };
        let drag = DragState::new(id, pointer, element.position);
        self.finish_lost_drag();
        log::debug!("drag start on {id}");
        self.selection = Some(id);
        self.gesture = Gesture::Dragging(drag);
        true
    }

    /// Press at a canvas point. Starts a drag on the topmost element there;
    /// on empty canvas clears the selection.
    pub fn pointer_down_at(&mut self, point: Point) -> Option<ElementId> {
        match self.document.element_at(point) {
            Some(id) => self.pointer_down(id, point).then_some(id),
            None => {
                self.click_empty();
                None
            }
        }
    }

    /// Move the dragged element so the grab offset stays under the pointer.
    /// Does not commit.
    pub fn pointer_move(&mut self, pointer: Point) {
        let Gesture::Dragging(drag) = &mut self.gesture else {
            return;
        };
        drag.current_point = pointer;
        let id = drag.element;
        let position = drag.target_position(pointer);
        if let Err(err) = self.document.update_element(id, &ElementPatch::position(position)) {
            log::warn!("drag target vanished: {err}");
            self.gesture = Gesture::Idle;
        }
    }

    /// Release: apply the final position and commit once. Returns false if
    /// no drag was in progress.
    pub fn pointer_up(&mut self, pointer: Point) -> bool {
        if !self.gesture.is_dragging() {
            return false;
        }
        self.pointer_move(pointer);
        self.finish_drag()
    }

    /// A press or click while dragging means the release was lost: end the
    /// drag with its commit so `Dragging` never outlives its selection.
    fn finish_lost_drag(&mut self) {
        if self.gesture.is_dragging() {
            log::debug!("release lost, finishing drag");
            self.finish_drag();
        }
    }

    fn finish_drag(&mut self) -> bool {
        match std::mem::take(&mut self.gesture) {
            Gesture::Dragging(drag) => {
                log::debug!("drag end on {}, moved by {:?}", drag.element, drag.delta());
                self.commit();
                true
            }
            Gesture::Idle => false,
        }
    }

    /// Abort a drag, putting the element back where it started. Nothing is
    /// committed.
    pub fn cancel_gesture(&mut self) -> bool {
        let Gesture::Dragging(drag) = std::mem::take(&mut self.gesture) else {
            return false;
        };
        log::debug!("drag cancelled on {}", drag.element);
        if let Err(err) = self
            .document
            .update_element(drag.element, &ElementPatch::position(drag.origin))
        {
            log::debug!("drag target vanished before cancel: {err}");
        }
        true
    }

    /// Route a pointer event to the matching gesture handler.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Down { position } => {
                self.pointer_down_at(position);
            }
            PointerEvent::Move { position } => self.pointer_move(position),
            PointerEvent::Up { position } => {
                self.pointer_up(position);
            }
            PointerEvent::Click { position } => {
                self.click_at(position);
            }
            PointerEvent::Cancel => {
                self.cancel_gesture();
            }
        }
    }

    // --- Save / load ---

    /// Transport form of the live document.
    pub fn serialize(&self) -> DesignPayload {
        serialize::serialize(&self.document)
    }

    /// Replace the document with a stored design. On success the selection
    /// is cleared and history restarts from the loaded state. On error the
    /// session is left untouched.
    pub fn load(&mut self, payload: &Value) -> EditorResult<()> {
        let document = serialize::deserialize(payload)?;
        log::info!("loaded design with {} element(s)", document.len());
        self.document = document;
        self.selection = None;
        self.gesture = Gesture::Idle;
        self.history.reset(&self.document);
        Ok(())
    }

    pub fn load_json(&mut self, json: &str) -> EditorResult<()> {
        let value: Value = serde_json::from_str(json)?;
        self.load(&value)
    }

    /// Assemble a save request from the document as it is right now.
    pub fn save_request(
        &self,
        title: impl Into<String>,
        description: Option<String>,
        data_url: impl Into<String>,
        is_public: bool,
    ) -> SaveRequest {
        SaveRequest {
            title: title.into(),
            description,
            data_url: data_url.into(),
            design_data: self.serialize(),
            is_public,
        }
    }
}
