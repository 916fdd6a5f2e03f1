//! The drawing store: every committed drawing plus the single selection slot.

use crate::chart::coords::DomainPoint;
use crate::chart::drawings::model::{Drawing, DrawingAttributes, DrawingId};

/// Owns all committed drawings in insertion order (which is also z-order:
/// later entries paint on top) and at most one selected id.
///
/// Every operation is total: an id that is not in the store is a no-op, never
/// an error. Mutation happens only through these operations so the insertion
/// order is preserved across edits.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DrawingState {
    drawings: Vec<Drawing>,
    selected: Option<DrawingId>,
}

impl DrawingState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drawings(&self) -> &[Drawing] {
        &self.drawings
    }

    pub fn selected(&self) -> Option<DrawingId> {
        self.selected
    }

    pub fn get(&self, id: DrawingId) -> Option<&Drawing> {
        self.drawings.iter().find(|d| d.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.drawings.is_empty()
    }

    /// Appends a committed drawing. Later additions render on top.
    pub fn add_drawing(&mut self, drawing: Drawing) {
        log::debug!("drawing {} committed ({:?})", drawing.id, drawing.kind);
        self.drawings.push(drawing);
    }

    /// Merges an attribute snapshot into the drawing with this id. The
    /// snapshot's `points` buffer, if present, replaces the drawing's points
    /// wholesale and is not retained in the stored attributes.
    pub fn update_drawing(&mut self, id: DrawingId, attributes: DrawingAttributes) {
        let Some(drawing) = self.drawings.iter_mut().find(|d| d.id == id) else {
            return;
        };
        let DrawingAttributes {
            color,
            line_width,
            line_style,
            text,
            points,
        } = attributes;
        drawing.attributes = DrawingAttributes {
            color,
            line_width,
            line_style,
            text,
            points: None,
        };
        if let Some(points) = points {
            drawing.points = points;
        }
    }

    /// Replaces a single control point, leaving every other point and all
    /// attributes untouched. Out-of-range indices are ignored.
    pub fn move_point(&mut self, id: DrawingId, point_index: usize, point: DomainPoint) {
        if let Some(drawing) = self.drawings.iter_mut().find(|d| d.id == id)
            && let Some(slot) = drawing.points.get_mut(point_index)
        {
            *slot = point;
        }
    }

    /// Removes the drawing with this id. Removing the selected drawing clears
    /// the selection.
    pub fn remove_drawing(&mut self, id: DrawingId) {
        self.drawings.retain(|d| d.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    pub fn clear_all(&mut self) {
        self.drawings.clear();
        self.selected = None;
    }

    /// Selects a drawing by id, clearing any previous selection. Selecting an
    /// id that is not in the store leaves the selection unchanged.
    pub fn set_selected(&mut self, id: Option<DrawingId>) {
        match id {
            None => self.selected = None,
            Some(id) => {
                if self.drawings.iter().any(|d| d.id == id) {
                    self.selected = Some(id);
                }
            }
        }
    }
}
