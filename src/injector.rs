use crate::error::SimulationError;
use crate::event::{MouseButton, PointerPosition};

/// Primitive pointer operations of the OS input backend.
pub trait MouseInjector {
    fn position(&self) -> Result<PointerPosition, SimulationError>;
    fn screen_size(&self) -> Result<(i32, i32), SimulationError>;
    fn move_to(&mut self, position: PointerPosition) -> Result<(), SimulationError>;
    /// Press and release `button` at the current position. `click_count` is
    /// the 1-based index of this click within a sequence.
    fn click(&mut self, button: MouseButton, click_count: i64) -> Result<(), SimulationError>;
}

#[cfg(target_os = "macos")]
pub type PlatformInjector = macos::MacOSInjector;

#[cfg(not(target_os = "macos"))]
pub type PlatformInjector = enigo_backend::EnigoInjector;

#[cfg(target_os = "macos")]
pub mod macos {
    use super::*;
    use core_graphics::display::CGDisplay;
    use core_graphics::event::{
        CGEvent, CGEventTapLocation, CGEventType, CGMouseButton, EventField,
    };
    use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
    use core_graphics::geometry::CGPoint;

    pub struct MacOSInjector {
        event_source: CGEventSource,
    }

    impl MacOSInjector {
        pub fn new() -> Result<Self, SimulationError> {
            let event_source = CGEventSource::new(CGEventSourceStateID::HIDSystemState)
                .map_err(|_| {
                    SimulationError::Unavailable(
                        "failed to create event source (is accessibility access granted?)"
                            .to_string(),
                    )
                })?;
            Ok(Self { event_source })
        }

        fn current_location(&self) -> Result<CGPoint, SimulationError> {
            let event = CGEvent::new(self.event_source.clone())
                .map_err(|_| SimulationError::Unavailable("failed to read pointer location".to_string()))?;
            Ok(event.location())
        }

        fn post_button(
            &self,
            event_type: CGEventType,
            button: CGMouseButton,
            click_count: i64,
            name: &'static str,
        ) -> Result<(), SimulationError> {
            let location = self.current_location()?;
            let event = CGEvent::new_mouse_event(self.event_source.clone(), event_type, location, button)
                .map_err(|_| SimulationError::EventFailed(name))?;
            event.set_integer_value_field(EventField::MOUSE_EVENT_CLICK_STATE, click_count);
            event.post(CGEventTapLocation::HID);
            Ok(())
        }
    }

    impl MouseInjector for MacOSInjector {
        fn position(&self) -> Result<PointerPosition, SimulationError> {
            let location = self.current_location()?;
            Ok(PointerPosition::new(location.x as i32, location.y as i32))
        }

        fn screen_size(&self) -> Result<(i32, i32), SimulationError> {
            let bounds = CGDisplay::main().bounds();
            Ok((bounds.size.width as i32, bounds.size.height as i32))
        }

        fn move_to(&mut self, position: PointerPosition) -> Result<(), SimulationError> {
            let location = CGPoint::new(position.x as f64, position.y as f64);
            let event = CGEvent::new_mouse_event(
                self.event_source.clone(),
                CGEventType::MouseMoved,
                location,
                CGMouseButton::Left,
            )
            .map_err(|_| SimulationError::EventFailed("mouse move"))?;
            event.post(CGEventTapLocation::HID);
            Ok(())
        }

        fn click(&mut self, button: MouseButton, click_count: i64) -> Result<(), SimulationError> {
            let (down, up, cg_button) = match button {
                MouseButton::Left => (
                    CGEventType::LeftMouseDown,
                    CGEventType::LeftMouseUp,
                    CGMouseButton::Left,
                ),
                MouseButton::Right => (
                    CGEventType::RightMouseDown,
                    CGEventType::RightMouseUp,
                    CGMouseButton::Right,
                ),
                MouseButton::Middle => (
                    CGEventType::OtherMouseDown,
                    CGEventType::OtherMouseUp,
                    CGMouseButton::Center,
                ),
            };
            log::debug!("Posting {} click #{}", button, click_count);
            self.post_button(down, cg_button, click_count, "mouse down")?;
            self.post_button(up, cg_button, click_count, "mouse up")
        }
    }
}

#[cfg(not(target_os = "macos"))]
pub mod enigo_backend {
    use super::*;
    use enigo::{Enigo, MouseControllable};

    pub struct EnigoInjector {
        enigo: Enigo,
    }

    impl EnigoInjector {
        pub fn new() -> Result<Self, SimulationError> {
            Ok(Self {
                enigo: Enigo::new(),
            })
        }
    }

    impl MouseInjector for EnigoInjector {
        fn position(&self) -> Result<PointerPosition, SimulationError> {
            let (x, y) = self.enigo.mouse_location();
            Ok(PointerPosition::new(x, y))
        }

        fn screen_size(&self) -> Result<(i32, i32), SimulationError> {
            let (width, height) = self.enigo.main_display_size();
            if width <= 0 || height <= 0 {
                return Err(SimulationError::Unavailable(
                    "no display reported by input backend".to_string(),
                ));
            }
            Ok((width, height))
        }

        fn move_to(&mut self, position: PointerPosition) -> Result<(), SimulationError> {
            self.enigo.mouse_move_to(position.x, position.y);
            Ok(())
        }

        fn click(&mut self, button: MouseButton, click_count: i64) -> Result<(), SimulationError> {
            // the OS pairs consecutive clicks by timing, so the count is unused here
            log::debug!("Clicking {} #{} with enigo", button, click_count);
            let button = match button {
                MouseButton::Left => enigo::MouseButton::Left,
                MouseButton::Right => enigo::MouseButton::Right,
                MouseButton::Middle => enigo::MouseButton::Middle,
            };
            self.enigo.mouse_click(button);
            Ok(())
        }
    }
}
