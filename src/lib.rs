pub mod bounds;
pub mod controller;
pub mod css;
pub mod event;
pub mod geometry;
pub mod host;
mod macros;
pub mod settings;
pub mod step;
pub mod thumb;

pub use bounds::RangeBounds;
pub use controller::{BindState, IgnoreReason, Outcome, RangeTouch, TouchHandler};
pub use css::Selector;
pub use event::{Notification, Phase, TouchEvent, TouchPoint};
pub use geometry::{Rect, TextDirection, map_touch_to_value};
pub use host::{Host, ListenerId};
pub use settings::Settings;
