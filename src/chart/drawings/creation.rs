//! Click-by-click creation of new drawings.

use crate::chart::coords::DomainPoint;
use crate::chart::drawings::model::{Drawing, DrawingId, DrawingKind};

/// What a chart-surface click did to the creation machine.
#[derive(Clone, Debug, PartialEq)]
pub enum ClickOutcome {
    /// No tool active, or the select pseudo-tool: the click is not ours.
    Ignored,
    /// First click of a two-click kind captured; now pending the second.
    Started,
    /// A drawing is complete and ready for the store.
    Committed(Drawing),
}

/// Converts a sequence of domain-space clicks into committed drawings.
///
/// Single-click kinds (horizontal line, text) commit immediately. Two-click
/// kinds hold their first point in a pending slot until the second click
/// arrives. Switching tools discards a pending first point silently.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CreationState {
    tool: Option<DrawingKind>,
    pending: Option<PendingDrawing>,
    next_id: DrawingId,
}

#[derive(Clone, Debug, PartialEq)]
struct PendingDrawing {
    kind: DrawingKind,
    first: DomainPoint,
}

impl CreationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active_tool(&self) -> Option<DrawingKind> {
        self.tool
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Activates a tool (or none). Always resets to Idle: a pending first
    /// point from the previous tool is dropped without feedback.
    pub fn select_tool(&mut self, tool: Option<DrawingKind>) {
        if self.pending.is_some() {
            log::debug!("tool switch discarded a pending first point");
        }
        self.tool = tool;
        self.pending = None;
    }

    /// Feeds one chart-background click, already converted to domain
    /// coordinates, through the state machine.
    pub fn handle_click(&mut self, point: DomainPoint) -> ClickOutcome {
        let Some(kind) = self.tool else {
            return ClickOutcome::Ignored;
        };
        if kind == DrawingKind::Select {
            return ClickOutcome::Ignored;
        }

        match self.pending.take() {
            None => {
                if kind.commits_on_first_click() {
                    ClickOutcome::Committed(self.commit(kind, vec![point]))
                } else {
                    self.pending = Some(PendingDrawing { kind, first: point });
                    ClickOutcome::Started
                }
            }
            Some(pending) => {
                ClickOutcome::Committed(self.commit(pending.kind, vec![pending.first, point]))
            }
        }
    }

    fn commit(&mut self, kind: DrawingKind, points: Vec<DomainPoint>) -> Drawing {
        let id = self.next_id;
        self.next_id += 1;
        Drawing::new(id, kind, points)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::drawings::model::LineStyle;
    use crate::chart::drawings::store::DrawingState;

    fn point(x: f64, y: f64) -> DomainPoint {
        DomainPoint { x, y }
    }

    #[test]
    fn no_tool_ignores_clicks() {
        let mut creation = CreationState::new();
        assert_eq!(creation.handle_click(point(1.0, 2.0)), ClickOutcome::Ignored);
    }

    #[test]
    fn select_tool_never_creates() {
        let mut creation = CreationState::new();
        creation.select_tool(Some(DrawingKind::Select));
        assert_eq!(creation.handle_click(point(1.0, 2.0)), ClickOutcome::Ignored);
        assert!(!creation.is_pending());
    }

    #[test]
    fn single_click_tool_commits_one_point_and_returns_to_idle() {
        let mut creation = CreationState::new();
        let mut store = DrawingState::new();
        creation.select_tool(Some(DrawingKind::HorizontalLine));

        match creation.handle_click(point(100.0, 42.0)) {
            ClickOutcome::Committed(drawing) => store.add_drawing(drawing),
            other => panic!("expected commit, got {other:?}"),
        }

        assert_eq!(store.drawings().len(), 1);
        let drawing = &store.drawings()[0];
        assert_eq!(drawing.kind, DrawingKind::HorizontalLine);
        assert_eq!(drawing.points.len(), 1);
        assert_eq!(drawing.attributes.color, "#ffffff");
        assert_eq!(drawing.attributes.line_width, 2.0);
        assert_eq!(drawing.attributes.line_style, LineStyle::Solid);
        assert!(!creation.is_pending());

        // A second click starts an independent drawing, not a continuation.
        match creation.handle_click(point(200.0, 43.0)) {
            ClickOutcome::Committed(drawing) => {
                assert_eq!(drawing.points.len(), 1);
                assert_ne!(drawing.id, store.drawings()[0].id);
            }
            other => panic!("expected commit, got {other:?}"),
        }
    }

    #[test]
    fn two_click_tool_commits_both_points_in_order() {
        let mut creation = CreationState::new();
        creation.select_tool(Some(DrawingKind::TrendLine));

        assert_eq!(creation.handle_click(point(1.0, 2.0)), ClickOutcome::Started);
        assert!(creation.is_pending());

        match creation.handle_click(point(3.0, 4.0)) {
            ClickOutcome::Committed(drawing) => {
                assert_eq!(drawing.kind, DrawingKind::TrendLine);
                assert_eq!(drawing.points, vec![point(1.0, 2.0), point(3.0, 4.0)]);
            }
            other => panic!("expected commit, got {other:?}"),
        }
        assert!(!creation.is_pending());
    }

    #[test]
    fn text_tool_commits_immediately() {
        let mut creation = CreationState::new();
        creation.select_tool(Some(DrawingKind::Text));
        match creation.handle_click(point(5.0, 6.0)) {
            ClickOutcome::Committed(drawing) => {
                assert_eq!(drawing.kind, DrawingKind::Text);
                assert_eq!(drawing.points, vec![point(5.0, 6.0)]);
            }
            other => panic!("expected commit, got {other:?}"),
        }
    }

    #[test]
    fn tool_switch_discards_pending_point() {
        let mut creation = CreationState::new();
        creation.select_tool(Some(DrawingKind::Rectangle));
        creation.handle_click(point(1.0, 1.0));
        assert!(creation.is_pending());

        creation.select_tool(Some(DrawingKind::Ellipse));
        assert!(!creation.is_pending());

        // First click of the new tool starts fresh, it does not complete the
        // abandoned rectangle.
        assert_eq!(creation.handle_click(point(2.0, 2.0)), ClickOutcome::Started);
    }

    #[test]
    fn committed_ids_are_unique_across_kinds() {
        let mut creation = CreationState::new();
        creation.select_tool(Some(DrawingKind::Text));
        let ClickOutcome::Committed(a) = creation.handle_click(point(0.0, 0.0)) else {
            panic!("expected commit");
        };
        creation.select_tool(Some(DrawingKind::HorizontalLine));
        let ClickOutcome::Committed(b) = creation.handle_click(point(0.0, 0.0)) else {
            panic!("expected commit");
        };
        assert_ne!(a.id, b.id);
    }
}
