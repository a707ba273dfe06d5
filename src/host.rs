use crate::controller::TouchHandler;
use crate::event::{Notification, Phase};
use crate::geometry::{Rect, TextDirection};
use derive_more::{Display, From, Into};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
pub struct ListenerId(u64);

impl ListenerId {
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

pub trait Host {
    type Element: Clone;

    fn touch_capable(&self) -> bool;

    fn add_css(&mut self, selector: &str, declarations: &str);

    fn matches(&self, element: &Self::Element, selector: &str) -> bool;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn has_attribute(&self, element: &Self::Element, name: &str) -> bool {
        self.attribute(element, name).is_some()
    }

    /// Current rendered box. Never cached by callers.
    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    fn direction(&self, element: &Self::Element) -> TextDirection;

    fn set_value(&mut self, element: &Self::Element, value: f64);

    fn dispatch(&mut self, element: &Self::Element, notification: Notification);

    fn listen(&mut self, phase: Phase, handler: TouchHandler) -> ListenerId;

    fn unlisten(&mut self, id: ListenerId);
}
