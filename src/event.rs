use serde::Deserialize;
use std::fmt;

use crate::error::ArgumentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    pub fn as_str(&self) -> &'static str {
        match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
            MouseButton::Middle => "middle",
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for PointerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Where a click sequence lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    At(PointerPosition),
    Current,
}

impl Target {
    /// Builds a target from an optional coordinate pair. Exactly one
    /// coordinate is rejected.
    pub fn from_coordinates(x: Option<i32>, y: Option<i32>) -> Result<Self, ArgumentError> {
        match (x, y) {
            (Some(x), Some(y)) => Ok(Target::At(PointerPosition::new(x, y))),
            (None, None) => Ok(Target::Current),
            _ => Err(ArgumentError::PartialCoordinates),
        }
    }
}

/// Body of `POST /api/click`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClickRequest {
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
    pub button: MouseButton,
    pub clicks: i32,
    #[serde(default)]
    pub interval: Option<f64>,
}

impl ClickRequest {
    pub fn validate(&self) -> Result<Target, ArgumentError> {
        if self.clicks < 1 {
            return Err(ArgumentError::InvalidClicks(self.clicks));
        }
        if let Some(interval) = self.interval {
            if !interval.is_finite() || interval < 0.0 {
                return Err(ArgumentError::InvalidInterval(interval));
            }
        }
        Target::from_coordinates(self.x, self.y)
    }

    /// The position string reported back to the client once the click ran.
    pub fn position_label(&self) -> String {
        match (self.x, self.y) {
            (Some(x), Some(y)) => format!("({}, {})", x, y),
            _ => "(current, current)".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_must_come_in_pairs() {
        assert_eq!(
            Target::from_coordinates(Some(10), None),
            Err(ArgumentError::PartialCoordinates)
        );
        assert_eq!(
            Target::from_coordinates(None, Some(0)),
            Err(ArgumentError::PartialCoordinates)
        );
        assert_eq!(Target::from_coordinates(None, None), Ok(Target::Current));
        assert_eq!(
            Target::from_coordinates(Some(0), Some(0)),
            Ok(Target::At(PointerPosition::new(0, 0)))
        );
    }

    #[test]
    fn click_request_without_coordinates() {
        let request: ClickRequest =
            serde_json::from_str(r#"{"button":"left","clicks":2}"#).unwrap();
        assert_eq!(request.button, MouseButton::Left);
        assert_eq!(request.clicks, 2);
        assert_eq!(request.validate(), Ok(Target::Current));
        assert_eq!(request.position_label(), "(current, current)");
    }

    #[test]
    fn click_request_null_coordinates_are_absent() {
        let request: ClickRequest =
            serde_json::from_str(r#"{"button":"middle","clicks":1,"x":null,"y":null}"#).unwrap();
        assert_eq!(request.validate(), Ok(Target::Current));
    }

    #[test]
    fn click_request_zero_is_a_coordinate() {
        let request: ClickRequest =
            serde_json::from_str(r#"{"button":"right","clicks":1,"x":0,"y":0}"#).unwrap();
        assert_eq!(
            request.validate(),
            Ok(Target::At(PointerPosition::new(0, 0)))
        );
        assert_eq!(request.position_label(), "(0, 0)");
    }

    #[test]
    fn click_request_rejects_bad_values() {
        let request: ClickRequest =
            serde_json::from_str(r#"{"button":"left","clicks":0}"#).unwrap();
        assert_eq!(request.validate(), Err(ArgumentError::InvalidClicks(0)));

        let request: ClickRequest =
            serde_json::from_str(r#"{"button":"left","clicks":1,"interval":-1.0}"#).unwrap();
        assert_eq!(request.validate(), Err(ArgumentError::InvalidInterval(-1.0)));

        let request: ClickRequest =
            serde_json::from_str(r#"{"button":"left","clicks":1,"x":5}"#).unwrap();
        assert_eq!(request.validate(), Err(ArgumentError::PartialCoordinates));
    }

    #[test]
    fn unknown_button_is_rejected() {
        assert!(serde_json::from_str::<ClickRequest>(r#"{"button":"side","clicks":1}"#).is_err());
        assert!(serde_json::from_str::<ClickRequest>(r#"{"clicks":1}"#).is_err());
    }
}
