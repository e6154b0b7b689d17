//! Carousel position state machine.
//!
//! A carousel owns a fixed-length circular sequence of items and turns
//! navigation commands and touch-drag samples into a `coordinate`: the
//! signed percentage the item track is shifted by.
//!
//! - `CarouselState` - Position record, fixed length
//! - `CarouselAction` / `reduce` - Pure transition function
//! - `Carousel` - Controller owning a state, with logging and policy
//! - `GestureBinding` - Scoped touch listener registration
//!
//! # Example
//!
//! ```
//! use wdlk_carousel::Carousel;
//!
//! let mut carousel = Carousel::new(4);
//! carousel.jump(3);
//! assert_eq!(carousel.coordinate(), -75.0);
//!
//! carousel.next();
//! assert_eq!(carousel.current(), 0);
//! ```

mod controller;
mod gesture;
mod reducer;
mod state;

pub use controller::Carousel;
pub use gesture::{EventDisposition, GestureBinding, GestureSurface, TouchEvent, TouchPhase};
pub use reducer::{reduce, transition, CarouselAction, Rejection};
pub use state::{drag_offset, item_coordinate, next_item, previous_item, CarouselState, DragOffset};

pub use wdlk_core::DegenerateInputPolicy;
