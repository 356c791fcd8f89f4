//! Normalized pointer input, as delivered by the host's pointer source.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pressure reported when the device does not support it.
pub const DEFAULT_PRESSURE: f64 = 0.5;

/// How the pointer event was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InputMethod {
    #[default]
    Mouse,
    Stylus,
    Touch,
}

impl InputMethod {
    /// Snap-activation tolerance in pixels for this input method.
    ///
    /// Coarser pointing devices get a wider tolerance; `coarse` escalates
    /// touch further for capacitive surfaces without fine-grained hit data
    /// (iOS-class hardware).
    pub fn snap_tolerance(self, coarse: bool) -> f64 {
        match self {
            InputMethod::Mouse => 5.0,
            InputMethod::Stylus => 10.0,
            InputMethod::Touch => {
                if coarse {
                    20.0
                } else {
                    15.0
                }
            }
        }
    }
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub fn shift() -> Self {
        Self {
            shift: true,
            ..Self::default()
        }
    }
}

/// A single normalized pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Position in canvas coordinates.
    pub position: Point,
    /// Device pressure in `0.0..=1.0`; [`DEFAULT_PRESSURE`] when unreported.
    pub pressure: f64,
    /// Stylus tilt in degrees, when reported.
    pub tilt: Option<(f64, f64)>,
    pub input_method: InputMethod,
    pub modifiers: Modifiers,
}

impl PointerSample {
    pub fn mouse(position: Point) -> Self {
        Self {
            position,
            pressure: DEFAULT_PRESSURE,
            tilt: None,
            input_method: InputMethod::Mouse,
            modifiers: Modifiers::default(),
        }
    }

    pub fn stylus(position: Point, pressure: f64) -> Self {
        Self {
            position,
            pressure,
            tilt: None,
            input_method: InputMethod::Stylus,
            modifiers: Modifiers::default(),
        }
    }

    pub fn touch(position: Point) -> Self {
        Self {
            position,
            pressure: DEFAULT_PRESSURE,
            tilt: None,
            input_method: InputMethod::Touch,
            modifiers: Modifiers::default(),
        }
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Pointer event phases the editor reacts to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down(PointerSample),
    Move(PointerSample),
    Up(PointerSample),
}
