use crate::bounds::RangeBounds;
use crate::css::USABILITY_DECLARATIONS;
use crate::event::{Notification, Phase, TouchEvent};
use crate::geometry::map_touch_to_value;
use crate::host::{Host, ListenerId};
use crate::settings::Settings;
use std::sync::Arc;
use strum::{Display as StrumDisplay, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
#[strum(serialize_all = "kebab-case")]
pub enum IgnoreReason {
    SelectorMismatch,
    Disabled,
    NoTouch,
    NonFinite,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Updated {
        value: f64,
        notification: Notification,
    },
    Ignored(IgnoreReason),
}

impl Outcome {
    pub fn prevents_default(&self) -> bool {
        matches!(
            self,
            Outcome::Updated { .. } | Outcome::Ignored(IgnoreReason::NonFinite)
        )
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Outcome::Updated { value, .. } => Some(*value),
            Outcome::Ignored(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TouchHandler {
    settings: Arc<Settings>,
}

impl TouchHandler {
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn is_disabled<H: Host>(&self, host: &H, element: &H::Element) -> bool {
        host.has_attribute(element, "disabled")
            || host.matches(element, &self.settings.disabled_selector)
    }

    pub fn value_at<H: Host>(&self, host: &H, element: &H::Element, x: f64) -> f64 {
        let bounds = RangeBounds::from_attributes(
            host.attribute(element, "min").as_deref(),
            host.attribute(element, "max").as_deref(),
            host.attribute(element, "step").as_deref(),
        );
        let rect = host.bounding_rect(element);
        let value = map_touch_to_value(
            x,
            &rect,
            &bounds,
            self.settings.thumb_width,
            host.direction(element),
        );

        if self.settings.clamp_to_bounds && value.is_finite() {
            bounds.clamp(value)
        } else {
            value
        }
    }

    pub fn handle<H: Host>(&self, host: &mut H, event: &TouchEvent<H::Element>) -> Outcome {
        let target = &event.target;

        if !host.matches(target, &self.settings.selector) {
            return Outcome::Ignored(IgnoreReason::SelectorMismatch);
        }
        if self.is_disabled(host, target) {
            return Outcome::Ignored(IgnoreReason::Disabled);
        }
        let Some(touch) = event.primary_touch() else {
            return Outcome::Ignored(IgnoreReason::NoTouch);
        };

        let value = self.value_at(host, target, touch.x);
        if !value.is_finite() {
            log::warn!(
                "Skipping {} at x={}: computed value {} is not finite",
                event.phase,
                touch.x,
                value
            );
            return Outcome::Ignored(IgnoreReason::NonFinite);
        }

        let notification = event.phase.notification();
        host.set_value(target, value);
        host.dispatch(target, notification);
        log::trace!("{} at x={} -> {} ({})", event.phase, touch.x, value, notification);

        Outcome::Updated {
            value,
            notification,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, StrumDisplay)]
pub enum BindState {
    Unbound,
    Bound,
}

#[derive(Debug)]
pub struct RangeTouch {
    handler: TouchHandler,
    listeners: Vec<ListenerId>,
}

impl RangeTouch {
    pub fn setup<H: Host>(settings: Settings, host: &mut H) -> Self {
        let mut controller = Self {
            handler: TouchHandler::new(Arc::new(settings)),
            listeners: Vec::new(),
        };

        if !host.touch_capable() {
            log::debug!("No touch support, leaving '{}' unbound", controller.selector());
            return controller;
        }

        let settings = controller.handler.settings();
        if settings.add_css {
            host.add_css(&settings.selector, USABILITY_DECLARATIONS);
        }

        controller.listeners = Phase::iter()
            .map(|phase| host.listen(phase, controller.handler.clone()))
            .collect();

        log::debug!(
            "Bound '{}' with {} listeners",
            controller.selector(),
            controller.listeners.len()
        );
        controller
    }

    pub fn destroy<H: Host>(&mut self, host: &mut H) {
        if self.listeners.is_empty() {
            return;
        }
        for id in self.listeners.drain(..) {
            host.unlisten(id);
        }
        log::debug!("Unbound '{}'", self.selector());
    }

    pub fn state(&self) -> BindState {
        if self.listeners.is_empty() {
            BindState::Unbound
        } else {
            BindState::Bound
        }
    }

    pub fn is_bound(&self) -> bool {
        self.state() == BindState::Bound
    }

    pub fn selector(&self) -> &str {
        &self.handler.settings().selector
    }
}
