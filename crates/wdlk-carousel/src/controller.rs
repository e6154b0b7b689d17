//! Carousel controller.

use wdlk_core::{DegenerateInputPolicy, LogLevel, StoreConfig, StructuredLogger};

use crate::reducer::{transition, CarouselAction, Rejection};
use crate::state::CarouselState;

/// Owns the position state of one carousel instance.
///
/// Every command goes through [`transition`]; rejected commands leave the
/// state as it was and are logged at debug level.
#[derive(Debug, Clone)]
pub struct Carousel {
    state: CarouselState,
    policy: DegenerateInputPolicy,
    logger: StructuredLogger,
}

impl Carousel {
    /// Create a carousel over `length` items.
    pub fn new(length: usize) -> Self {
        Self {
            state: CarouselState::new(length),
            policy: DegenerateInputPolicy::default(),
            logger: StructuredLogger::new("carousel"),
        }
    }

    /// Create a carousel using the policy and logging settings from `config`.
    pub fn from_config(length: usize, config: &StoreConfig) -> Self {
        Self::new(length)
            .with_policy(config.carousel.degenerate_input)
            .with_logger(StructuredLogger::from_config("carousel", &config.logging))
    }

    /// Set the degenerate input policy.
    pub fn with_policy(mut self, policy: DegenerateInputPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the logger.
    pub fn with_logger(mut self, logger: StructuredLogger) -> Self {
        self.logger = logger;
        self
    }

    /// Apply a command. Returns `false` if it was rejected.
    pub fn dispatch(&mut self, action: CarouselAction) -> bool {
        match transition(&self.state, action, self.policy) {
            Ok(state) => {
                self.state = state;
                true
            }
            Err(rejection) => {
                self.log_rejection(&action, &rejection);
                false
            }
        }
    }

    /// Show the item at `target`. Targets past the last item are ignored.
    pub fn jump(&mut self, target: usize) {
        self.dispatch(CarouselAction::Jump(target));
    }

    /// Show the following item.
    pub fn next(&mut self) {
        self.dispatch(CarouselAction::Next);
    }

    /// Show the preceding item.
    pub fn previous(&mut self) {
        self.dispatch(CarouselAction::Previous);
    }

    /// Record the start of a drag.
    pub fn on_gesture_start(&mut self, client_x: f64) {
        self.dispatch(CarouselAction::MoveStart { client_x });
    }

    /// Follow a drag sample taken on an element `sample_width` pixels wide.
    pub fn on_gesture_move(&mut self, client_x: f64, sample_width: f64) {
        self.dispatch(CarouselAction::Move {
            client_x,
            width: sample_width,
        });
    }

    /// Track offset in percent, for positioning the track.
    pub fn coordinate(&self) -> f64 {
        self.state.coordinate()
    }

    /// Absolute displacement of the last drag sample in percent.
    pub fn percentage(&self) -> f64 {
        self.state.percentage()
    }

    /// Index of the active item.
    pub fn current(&self) -> usize {
        self.state.current()
    }

    /// Number of items.
    pub fn length(&self) -> usize {
        self.state.length()
    }

    /// Policy applied to empty sequences and unusable samples.
    pub fn policy(&self) -> DegenerateInputPolicy {
        self.policy
    }

    /// Snapshot of the full state.
    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    fn log_rejection(&self, action: &CarouselAction, rejection: &Rejection) {
        if !self.logger.enabled(LogLevel::Debug) {
            return;
        }
        self.logger
            .debug_builder("carousel command ignored")
            .field("action", format!("{:?}", action))
            .field("reason", rejection.to_string())
            .field_i64("current", self.state.current() as i64)
            .field_i64("length", self.state.length() as i64)
            .emit();
    }
}
