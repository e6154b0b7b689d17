//! Carousel position record and the arithmetic behind it.

use serde::Serialize;

/// Position state of one carousel.
///
/// `length` is fixed at construction. A carousel over a different number of
/// items needs a new state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CarouselState {
    pub(crate) length: usize,
    pub(crate) current: usize,
    pub(crate) coordinate: f64,
    pub(crate) percentage: f64,
    pub(crate) start_x: f64,
}

impl CarouselState {
    /// Create the state for `length` items, positioned on the first one.
    pub fn new(length: usize) -> Self {
        Self {
            length,
            current: 0,
            coordinate: 0.0,
            percentage: 0.0,
            start_x: 0.0,
        }
    }

    /// Number of items.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Index of the active item.
    pub fn current(&self) -> usize {
        self.current
    }

    /// Track offset in percent.
    pub fn coordinate(&self) -> f64 {
        self.coordinate
    }

    /// Absolute displacement of the last drag sample in percent of the
    /// sample width.
    pub fn percentage(&self) -> f64 {
        self.percentage
    }

    /// `clientX` recorded at the last gesture start.
    pub fn start_x(&self) -> f64 {
        self.start_x
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Move to `index` and the matching resting coordinate.
    pub(crate) fn settle_on(self, index: usize) -> Self {
        Self {
            current: index,
            coordinate: item_coordinate(index, self.length),
            ..self
        }
    }
}

/// Index after `current`, wrapping to the first item.
///
/// Returns `None` for an empty sequence.
pub fn next_item(current: usize, length: usize) -> Option<usize> {
    if length == 0 {
        return None;
    }
    Some((current % length + 1) % length)
}

/// Index before `current`, wrapping to the last item.
///
/// Returns `None` for an empty sequence.
pub fn previous_item(current: usize, length: usize) -> Option<usize> {
    if length == 0 {
        return None;
    }
    Some((current % length + length - 1) % length)
}

/// Resting coordinate of the item at `index`: `-(index * 100 / length)`.
///
/// The first item rests at `0.0`, never `-0.0`. An empty sequence yields NaN.
pub fn item_coordinate(index: usize, length: usize) -> f64 {
    unsigned_zero(-(index as f64 * 100.0 / length as f64))
}

/// Result of one drag sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DragOffset {
    pub coordinate: f64,
    pub percentage: f64,
}

/// Map a drag sample to a track offset.
///
/// The displacement `start_x - client_x` is taken in percent of `width`.
/// The track follows the finger: dragging left (positive displacement)
/// yields a negative coordinate, scaled by the active item's position.
/// Both values are rounded to three decimals.
pub fn drag_offset(
    start_x: f64,
    client_x: f64,
    width: f64,
    current: usize,
    length: usize,
) -> DragOffset {
    let delta = start_x - client_x;
    let raw = delta * 100.0 / width;
    let direction = follow_direction(raw);

    let coordinate = (raw.abs() / length as f64) * direction * (current as f64 + 1.0);

    DragOffset {
        coordinate: round3(coordinate),
        percentage: round3(raw).abs(),
    }
}

/// `sign(-raw)`, with zero mapped to zero.
fn follow_direction(raw: f64) -> f64 {
    if raw.is_nan() {
        f64::NAN
    } else if raw > 0.0 {
        -1.0
    } else if raw < 0.0 {
        1.0
    } else {
        0.0
    }
}

/// Round to three decimals on the exact binary value, ties away from zero.
fn round3(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    let scaled = value * 1000.0;
    // `scaled` is exact only when the fused product leaves no remainder.
    let exact_tie = scaled.fract().abs() == 0.5 && value.mul_add(1000.0, -scaled) == 0.0;
    let rounded = if exact_tie {
        scaled.round() / 1000.0
    } else {
        format!("{:.3}", value)
            .parse()
            .unwrap_or_else(|_| scaled.round() / 1000.0)
    };
    unsigned_zero(rounded)
}

fn unsigned_zero(value: f64) -> f64 {
    if value == 0.0 {
        0.0
    } else {
        value
    }
}
