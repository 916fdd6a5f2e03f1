//! Pixel ↔ domain coordinate mapping for the chart surface.

/// Blank space between the canvas edge and the plotting area, in pixels.
/// Price labels sit in the right margin, date labels in the bottom one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// Margin used by every chart surface in the app. The drawing overlay and the
/// plotters-rendered bitmap must agree on this so they stay aligned.
pub const CHART_MARGIN: Margin = Margin {
    top: 20.0,
    right: 70.0,
    bottom: 30.0,
    left: 20.0,
};

/// A point in domain space: x is epoch milliseconds, y is price.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DomainPoint {
    pub x: f64,
    pub y: f64,
}

/// Stateless two-way transform between screen pixels and (time, price).
///
/// Pixel y grows downward while price grows upward, so the y axis is
/// inverted. A degenerate domain (zero time or price span) is mapped as if
/// the span were 1 so the transform never divides by zero; the resulting
/// coordinates are meaningless but finite.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartMapper {
    width: f64,
    height: f64,
    x_domain: (f64, f64),
    y_domain: (f64, f64),
    margin: Margin,
}

impl ChartMapper {
    pub fn new(
        width: f64,
        height: f64,
        x_domain: (f64, f64),
        y_domain: (f64, f64),
        margin: Margin,
    ) -> Self {
        Self {
            width,
            height,
            x_domain,
            y_domain,
            margin,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn margin(&self) -> Margin {
        self.margin
    }

    pub fn x_domain(&self) -> (f64, f64) {
        self.x_domain
    }

    pub fn y_domain(&self) -> (f64, f64) {
        self.y_domain
    }

    /// Width of the plotting area, margins excluded.
    pub fn plot_width(&self) -> f64 {
        self.width - self.margin.left - self.margin.right
    }

    /// Height of the plotting area, margins excluded.
    pub fn plot_height(&self) -> f64 {
        self.height - self.margin.top - self.margin.bottom
    }

    fn x_span(&self) -> f64 {
        non_zero_span(self.x_domain.1 - self.x_domain.0)
    }

    fn y_span(&self) -> f64 {
        non_zero_span(self.y_domain.1 - self.y_domain.0)
    }

    /// Converts a pixel position on the chart surface to (time, price).
    pub fn to_domain(&self, px: f64, py: f64) -> DomainPoint {
        let eff_x = px - self.margin.left;
        let eff_y = py - self.margin.top;

        let x = self.x_domain.0 + (eff_x / self.plot_width()) * self.x_span();
        let y = self.y_domain.1 - (eff_y / self.plot_height()) * self.y_span();

        DomainPoint { x, y }
    }

    /// Converts (time, price) to a pixel position on the chart surface.
    pub fn to_pixel(&self, point: DomainPoint) -> (f64, f64) {
        let eff_x = ((point.x - self.x_domain.0) / self.x_span()) * self.plot_width();
        let eff_y = ((self.y_domain.1 - point.y) / self.y_span()) * self.plot_height();

        (eff_x + self.margin.left, eff_y + self.margin.top)
    }
}

fn non_zero_span(span: f64) -> f64 {
    if span == 0.0 { 1.0 } else { span }
}
