//! Touch listener lifecycle.
//!
//! A [`GestureBinding`] registers touch-start and touch-move listeners on a
//! [`GestureSurface`] when created and removes them when it is detached or
//! dropped, whichever comes first.

use crate::controller::Carousel;

/// Touch phases the carousel listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchPhase {
    Start,
    Move,
}

/// A touch event as delivered by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TouchEvent {
    /// First touch point went down at `client_x`.
    Start { client_x: f64 },
    /// First touch point moved to `client_x` on an element `target_width` wide.
    Move { client_x: f64, target_width: f64 },
    /// Touch ended. Carousels do not listen for this.
    End,
}

impl TouchEvent {
    pub fn phase(&self) -> Option<TouchPhase> {
        match self {
            TouchEvent::Start { .. } => Some(TouchPhase::Start),
            TouchEvent::Move { .. } => Some(TouchPhase::Move),
            TouchEvent::End => None,
        }
    }
}

/// What the caller should do with the native event after handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// The sample drove the carousel; suppress the default scroll behaviour.
    PreventDefault,
    /// Let the event through untouched.
    Default,
}

/// An element that touch listeners can be attached to.
pub trait GestureSurface {
    /// Handle returned on registration, needed to unregister.
    type Listener;

    /// Register a listener for `phase`.
    fn listen(&mut self, phase: TouchPhase) -> Self::Listener;

    /// Remove a previously registered listener.
    fn unlisten(&mut self, listener: Self::Listener);
}

/// Touch listeners registered on a surface for as long as the binding lives.
pub struct GestureBinding<S: GestureSurface> {
    surface: Option<S>,
    listeners: Vec<S::Listener>,
}

impl<S: GestureSurface> GestureBinding<S> {
    /// Register start and move listeners on `surface`.
    pub fn attach(mut surface: S) -> Self {
        let listeners = vec![
            surface.listen(TouchPhase::Start),
            surface.listen(TouchPhase::Move),
        ];
        Self {
            surface: Some(surface),
            listeners,
        }
    }

    /// Forward a touch event to `carousel`.
    pub fn handle(&self, carousel: &mut Carousel, event: TouchEvent) -> EventDisposition {
        match event {
            TouchEvent::Start { client_x } => {
                carousel.on_gesture_start(client_x);
                EventDisposition::Default
            }
            TouchEvent::Move {
                client_x,
                target_width,
            } => {
                carousel.on_gesture_move(client_x, target_width);
                EventDisposition::PreventDefault
            }
            TouchEvent::End => EventDisposition::Default,
        }
    }

    /// The surface the listeners are registered on.
    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Remove the listeners and hand the surface back.
    pub fn detach(mut self) -> Option<S> {
        self.release();
        self.surface.take()
    }

    fn release(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            for listener in self.listeners.drain(..) {
                surface.unlisten(listener);
            }
        }
    }
}

impl<S: GestureSurface> Drop for GestureBinding<S> {
    fn drop(&mut self) {
        self.release();
    }
}
