use rangetouch::css::{STYLE_ELEMENT_ID, format_rule};
use rangetouch::{
    Host, ListenerId, Notification, Phase, Rect, RangeTouch, Settings, TextDirection, TouchEvent,
    TouchHandler, TouchPoint,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    AddEventListenerOptions, CssStyleSheet, Document, Element, Event, EventInit, HtmlInputElement,
    HtmlStyleElement,
};

type TouchClosure = Closure<dyn FnMut(web_sys::TouchEvent)>;

#[derive(Default)]
struct Registry {
    next: u64,
    listeners: HashMap<ListenerId, (Phase, TouchClosure)>,
}

#[derive(Clone)]
pub struct WebHost {
    document: Document,
    registry: Rc<RefCell<Registry>>,
}

impl WebHost {
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self {
            document,
            registry: Rc::default(),
        })
    }

    pub fn setup(settings: Settings) -> Option<(Self, RangeTouch)> {
        let mut host = Self::new()?;
        let controller = RangeTouch::setup(settings, &mut host);
        Some((host, controller))
    }

    fn style_element(&self) -> Result<HtmlStyleElement, JsValue> {
        if let Some(existing) = self
            .document
            .get_element_by_id(STYLE_ELEMENT_ID)
            .and_then(|el| el.dyn_into::<HtmlStyleElement>().ok())
        {
            return Ok(existing);
        }

        let style = self
            .document
            .create_element("style")?
            .dyn_into::<HtmlStyleElement>()?;
        style.set_id(STYLE_ELEMENT_ID);
        let head = self.document.head().ok_or("document has no head")?;
        head.append_child(&style)?;
        Ok(style)
    }

    fn insert_rule(&self, rule: &str) -> Result<(), JsValue> {
        let sheet = self
            .style_element()?
            .sheet()
            .ok_or("style element has no sheet")?
            .dyn_into::<CssStyleSheet>()?;
        sheet.insert_rule_with_index(rule, 0)?;
        Ok(())
    }

    fn computed_direction(&self, element: &Element) -> Option<String> {
        web_sys::window()?
            .get_computed_style(element)
            .ok()??
            .get_property_value("direction")
            .ok()
    }
}

fn to_touch_event(raw: &web_sys::TouchEvent, phase: Phase) -> Option<TouchEvent<Element>> {
    let target = raw.target()?.dyn_into::<Element>().ok()?;
    let list = raw.changed_touches();
    let touches = (0..list.length())
        .filter_map(|i| list.get(i))
        .map(|t| TouchPoint::new(t.client_x() as f64, t.client_y() as f64))
        .collect();
    Some(TouchEvent::new(target, phase, touches))
}

impl Host for WebHost {
    type Element = Element;

    fn touch_capable(&self) -> bool {
        self.document.document_element().is_some_and(|root| {
            js_sys::Reflect::has(&root, &JsValue::from_str("ontouchstart")).unwrap_or(false)
        })
    }

    fn add_css(&mut self, selector: &str, declarations: &str) {
        if let Err(e) = self.insert_rule(&format_rule(selector, declarations)) {
            log::warn!("Failed to insert rule for '{}': {:?}", selector, e);
        }
    }

    fn matches(&self, element: &Element, selector: &str) -> bool {
        element.matches(selector).unwrap_or(false)
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn has_attribute(&self, element: &Element, name: &str) -> bool {
        element.has_attribute(name)
    }

    fn bounding_rect(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect::new(rect.left(), rect.width())
    }

    fn direction(&self, element: &Element) -> TextDirection {
        let rtl = self.document.dir().eq_ignore_ascii_case("rtl")
            || element
                .get_attribute("dir")
                .is_some_and(|d| d.eq_ignore_ascii_case("rtl"))
            || self
                .computed_direction(element)
                .is_some_and(|d| d.eq_ignore_ascii_case("rtl"));
        if rtl {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }

    fn set_value(&mut self, element: &Element, value: f64) {
        match element.dyn_ref::<HtmlInputElement>() {
            Some(input) => input.set_value(&value.to_string()),
            None => {
                if let Err(e) = element.set_attribute("value", &value.to_string()) {
                    log::warn!("Failed to set value: {:?}", e);
                }
            }
        }
    }

    fn dispatch(&mut self, element: &Element, notification: Notification) {
        let init = EventInit::new();
        init.set_bubbles(true);
        let result = Event::new_with_event_init_dict(notification.event_type(), &init)
            .and_then(|event| element.dispatch_event(&event));
        if let Err(e) = result {
            log::warn!("Failed to dispatch '{}': {:?}", notification, e);
        }
    }

    fn listen(&mut self, phase: Phase, handler: TouchHandler) -> ListenerId {
        let host = self.clone();
        let closure: TouchClosure = Closure::new(move |raw: web_sys::TouchEvent| {
            let Some(event) = to_touch_event(&raw, phase) else {
                return;
            };
            let mut host = host.clone();
            if handler.handle(&mut host, &event).prevents_default() {
                raw.prevent_default();
            }
        });

        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        if let Err(e) = self
            .document
            .add_event_listener_with_callback_and_add_event_listener_options(
                phase.event_type(),
                closure.as_ref().unchecked_ref(),
                &options,
            )
        {
            log::warn!("Failed to add {} listener: {:?}", phase, e);
        }

        let mut registry = self.registry.borrow_mut();
        registry.next += 1;
        let id = ListenerId::from_raw(registry.next);
        registry.listeners.insert(id, (phase, closure));
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        let Some((phase, closure)) = self.registry.borrow_mut().listeners.remove(&id) else {
            return;
        };
        if let Err(e) = self
            .document
            .remove_event_listener_with_callback(phase.event_type(), closure.as_ref().unchecked_ref())
        {
            log::warn!("Failed to remove {} listener: {:?}", phase, e);
        }
    }
}
