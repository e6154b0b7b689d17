//! Carousel commands and the pure transition function.

use thiserror::Error;
use wdlk_core::DegenerateInputPolicy;

use crate::state::{drag_offset, item_coordinate, next_item, previous_item, CarouselState};

/// A command applied to a carousel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CarouselAction {
    /// Show the item at this index.
    Jump(usize),
    /// Show the following item, wrapping to the first.
    Next,
    /// Show the preceding item, wrapping to the last.
    Previous,
    /// A touch began at `client_x`.
    MoveStart { client_x: f64 },
    /// The touch moved to `client_x` on an element `width` pixels wide.
    Move { client_x: f64, width: f64 },
}

/// Why a command left the state untouched.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    #[error("jump target {target} out of range for {length} items")]
    OutOfRange { target: usize, length: usize },

    #[error("carousel has no items")]
    EmptySequence,

    #[error("unusable gesture sample (client_x {client_x}, width {width})")]
    InvalidSample { client_x: f64, width: f64 },
}

/// Apply `action` to `state`, or report why it does not apply.
///
/// Out-of-range jumps are always rejected. Empty sequences and unusable
/// samples are rejected under `DegenerateInputPolicy::Ignore` and computed
/// anyway under `Propagate`.
pub fn transition(
    state: &CarouselState,
    action: CarouselAction,
    policy: DegenerateInputPolicy,
) -> Result<CarouselState, Rejection> {
    let ignore = policy == DegenerateInputPolicy::Ignore;
    let state = *state;

    match action {
        CarouselAction::Jump(target) => {
            if target >= state.length {
                return Err(Rejection::OutOfRange {
                    target,
                    length: state.length,
                });
            }
            Ok(state.settle_on(target))
        }

        CarouselAction::Next | CarouselAction::Previous => {
            let index = if action == CarouselAction::Next {
                next_item(state.current, state.length)
            } else {
                previous_item(state.current, state.length)
            };

            match index {
                Some(index) => Ok(state.settle_on(index)),
                None if ignore => Err(Rejection::EmptySequence),
                None => Ok(CarouselState {
                    coordinate: item_coordinate(state.current, state.length),
                    ..state
                }),
            }
        }

        CarouselAction::MoveStart { client_x } => {
            if ignore && !client_x.is_finite() {
                return Err(Rejection::InvalidSample {
                    client_x,
                    width: f64::NAN,
                });
            }
            Ok(CarouselState {
                start_x: client_x,
                ..state
            })
        }

        CarouselAction::Move { client_x, width } => {
            if ignore {
                if state.length == 0 {
                    return Err(Rejection::EmptySequence);
                }
                if !client_x.is_finite() || !(width.is_finite() && width > 0.0) {
                    return Err(Rejection::InvalidSample { client_x, width });
                }
            }

            let offset = drag_offset(state.start_x, client_x, width, state.current, state.length);
            Ok(CarouselState {
                coordinate: offset.coordinate,
                percentage: offset.percentage,
                ..state
            })
        }
    }
}

/// Apply `action` to `state`. Rejected commands return the state unchanged.
pub fn reduce(
    state: &CarouselState,
    action: CarouselAction,
    policy: DegenerateInputPolicy,
) -> CarouselState {
    transition(state, action, policy).unwrap_or(*state)
}
