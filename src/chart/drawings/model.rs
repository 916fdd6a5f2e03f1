//! Drawing entities: what the user has placed on the chart.

use crate::chart::coords::DomainPoint;

pub type DrawingId = u64;

/// The closed set of drawing tools.
///
/// `Select` is a pseudo-kind: it never produces a drawing, it only routes
/// pointer events to existing ones. Every match over this enum is exhaustive
/// so adding a kind fails to compile until geometry, grip enumeration and the
/// attribute form all handle it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawingKind {
    HorizontalLine,
    TrendLine,
    Rectangle,
    Ellipse,
    Text,
    Select,
}

impl DrawingKind {
    /// Number of control points a committed drawing of this kind carries.
    pub fn point_count(&self) -> usize {
        match self {
            DrawingKind::HorizontalLine | DrawingKind::Text => 1,
            DrawingKind::TrendLine | DrawingKind::Rectangle | DrawingKind::Ellipse => 2,
            DrawingKind::Select => 0,
        }
    }

    /// Single-click kinds commit immediately and never enter Pending.
    pub fn commits_on_first_click(&self) -> bool {
        self.point_count() == 1
    }

    pub fn label(&self) -> &'static str {
        match self {
            DrawingKind::HorizontalLine => "Horizontal Line",
            DrawingKind::TrendLine => "Trend Line",
            DrawingKind::Rectangle => "Rectangle",
            DrawingKind::Ellipse => "Ellipse",
            DrawingKind::Text => "Text",
            DrawingKind::Select => "Select",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

impl LineStyle {
    /// SVG stroke-dasharray value for this style.
    pub fn dash_array(&self) -> &'static str {
        match self {
            LineStyle::Solid => "none",
            LineStyle::Dashed => "5,5",
            LineStyle::Dotted => "2,2",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LineStyle::Solid => "solid",
            LineStyle::Dashed => "dashed",
            LineStyle::Dotted => "dotted",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label {
            "dashed" => LineStyle::Dashed,
            "dotted" => LineStyle::Dotted,
            _ => LineStyle::Solid,
        }
    }
}

/// Visual attributes of a drawing, plus a transient `points` buffer used by
/// the attributes form and the grip editor to carry point edits through a
/// store update. The store's own `points` field is authoritative; the buffer
/// is consumed on update and never kept.
#[derive(Clone, Debug, PartialEq)]
pub struct DrawingAttributes {
    pub color: String,
    pub line_width: f64,
    pub line_style: LineStyle,
    pub text: Option<String>,
    pub points: Option<Vec<DomainPoint>>,
}

impl Default for DrawingAttributes {
    fn default() -> Self {
        Self {
            color: "#ffffff".to_string(),
            line_width: 2.0,
            line_style: LineStyle::Solid,
            text: None,
            points: None,
        }
    }
}

/// One committed drawing. `id` and `kind` are frozen at commit time; `points`
/// and `attributes` change through store operations only.
#[derive(Clone, Debug, PartialEq)]
pub struct Drawing {
    pub id: DrawingId,
    pub kind: DrawingKind,
    pub points: Vec<DomainPoint>,
    pub attributes: DrawingAttributes,
}

impl Drawing {
    pub fn new(id: DrawingId, kind: DrawingKind, points: Vec<DomainPoint>) -> Self {
        Self {
            id,
            kind,
            points,
            attributes: DrawingAttributes::default(),
        }
    }

    /// Font size used when rendering a text drawing.
    pub fn font_size(&self) -> f64 {
        if self.attributes.line_width > 0.0 {
            self.attributes.line_width * 8.0
        } else {
            14.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_counts_match_kind() {
        assert_eq!(DrawingKind::HorizontalLine.point_count(), 1);
        assert_eq!(DrawingKind::Text.point_count(), 1);
        assert_eq!(DrawingKind::TrendLine.point_count(), 2);
        assert_eq!(DrawingKind::Rectangle.point_count(), 2);
        assert_eq!(DrawingKind::Ellipse.point_count(), 2);
        assert_eq!(DrawingKind::Select.point_count(), 0);
    }

    #[test]
    fn default_attributes() {
        let attrs = DrawingAttributes::default();
        assert_eq!(attrs.color, "#ffffff");
        assert_eq!(attrs.line_width, 2.0);
        assert_eq!(attrs.line_style, LineStyle::Solid);
        assert!(attrs.text.is_none());
        assert!(attrs.points.is_none());
    }

    #[test]
    fn text_font_size_scales_with_line_width() {
        let mut drawing = Drawing::new(1, DrawingKind::Text, vec![DomainPoint { x: 0.0, y: 0.0 }]);
        assert_eq!(drawing.font_size(), 16.0);
        drawing.attributes.line_width = 0.0;
        assert_eq!(drawing.font_size(), 14.0);
    }
}
