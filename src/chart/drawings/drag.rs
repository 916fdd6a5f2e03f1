//! Grip dragging: relocating one control point of an existing drawing.

use crate::chart::coords::DomainPoint;
use crate::chart::drawings::model::DrawingId;
use crate::chart::drawings::store::DrawingState;

/// The single system-wide drag slot. At most one grip drag is active at a
/// time; the slot lives in a signal owned by the drawing layer and is cleared
/// unconditionally on mouse-up.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GripDrag {
    drawing_id: DrawingId,
    point_index: usize,
}

impl GripDrag {
    pub fn new(drawing_id: DrawingId, point_index: usize) -> Self {
        Self {
            drawing_id,
            point_index,
        }
    }

    pub fn drawing_id(&self) -> DrawingId {
        self.drawing_id
    }

    pub fn point_index(&self) -> usize {
        self.point_index
    }

    /// Applies one pointer-move step: replaces the dragged point with the new
    /// domain coordinate. The drawing is looked up by id on every call, so a
    /// drawing deleted mid-drag makes this a safe no-op.
    pub fn apply(&self, store: &mut DrawingState, point: DomainPoint) {
        store.move_point(self.drawing_id, self.point_index, point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::drawings::model::{Drawing, DrawingKind};

    fn point(x: f64, y: f64) -> DomainPoint {
        DomainPoint { x, y }
    }

    #[test]
    fn drag_moves_only_the_gripped_point() {
        let mut store = DrawingState::new();
        store.add_drawing(Drawing::new(
            7,
            DrawingKind::Rectangle,
            vec![point(0.0, 0.0), point(10.0, 10.0)],
        ));
        let drag = GripDrag::new(7, 1);

        drag.apply(&mut store, point(20.0, 5.0));

        let drawing = store.get(7).unwrap();
        assert_eq!(drawing.points, vec![point(0.0, 0.0), point(20.0, 5.0)]);
    }

    #[test]
    fn drag_after_deletion_is_a_no_op() {
        let mut store = DrawingState::new();
        store.add_drawing(Drawing::new(
            7,
            DrawingKind::TrendLine,
            vec![point(0.0, 0.0), point(1.0, 1.0)],
        ));
        let drag = GripDrag::new(7, 0);
        store.remove_drawing(7);

        drag.apply(&mut store, point(99.0, 99.0));

        assert!(store.is_empty());
    }
}
