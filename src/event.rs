use serde::Serialize;
use serde_with::DeserializeFromStr;
use strum::{Display as StrumDisplay, EnumIter, EnumString, IntoStaticStr};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    DeserializeFromStr,
    EnumString,
    EnumIter,
    StrumDisplay,
    IntoStaticStr,
)]
#[strum(ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    #[strum(to_string = "touchstart", serialize = "start")]
    Start,
    #[strum(to_string = "touchmove", serialize = "move")]
    Move,
    #[strum(to_string = "touchend", serialize = "end")]
    End,
}

impl Phase {
    pub fn event_type(&self) -> &'static str {
        (*self).into()
    }

    pub fn notification(&self) -> Notification {
        match self {
            Phase::End => Notification::Change,
            Phase::Start | Phase::Move => Notification::Input,
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, StrumDisplay, IntoStaticStr,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Notification {
    Input,
    Change,
}

impl Notification {
    pub fn event_type(&self) -> &'static str {
        (*self).into()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchPoint {
    pub x: f64,
    pub y: f64,
}

impl TouchPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TouchEvent<E> {
    pub target: E,
    pub touches: Vec<TouchPoint>,
    pub phase: Phase,
}

impl<E> TouchEvent<E> {
    pub fn new(target: E, phase: Phase, touches: Vec<TouchPoint>) -> Self {
        Self {
            target,
            touches,
            phase,
        }
    }

    pub fn single(target: E, phase: Phase, x: f64) -> Self {
        Self::new(target, phase, vec![TouchPoint::new(x, 0.0)])
    }

    pub fn primary_touch(&self) -> Option<&TouchPoint> {
        self.touches.first()
    }
}
