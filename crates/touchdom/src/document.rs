use crate::selector::{Matchable, matches_selector};
use derive_more::{Display, From, Into};
use rangetouch::css::{STYLE_ELEMENT_ID, format_rule};
use rangetouch::{
    Host, ListenerId, Notification, Outcome, Phase, Rect, TextDirection, TouchEvent, TouchHandler,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Into)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Default)]
pub struct ElementData {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub rect: Rect,
    pub value: Option<f64>,
    pub connected: bool,
}

impl Matchable for ElementData {
    fn tag(&self) -> &str {
        &self.tag
    }

    fn attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleElement {
    pub id: String,
    pub rules: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispatched {
    pub target: ElementId,
    pub notification: Notification,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TouchDispatch {
    pub outcomes: Vec<Outcome>,
    pub default_prevented: bool,
}

struct Registration {
    id: ListenerId,
    phase: Phase,
    handler: TouchHandler,
}

pub struct MemoryDocument {
    touch: bool,
    dir: TextDirection,
    elements: Vec<ElementData>,
    style: Option<StyleElement>,
    listeners: Vec<Registration>,
    next_listener: u64,
    dispatched: Vec<Dispatched>,
}

impl MemoryDocument {
    pub fn new(touch: bool) -> Self {
        Self {
            touch,
            dir: TextDirection::Ltr,
            elements: Vec::new(),
            style: None,
            listeners: Vec::new(),
            next_listener: 0,
            dispatched: Vec::new(),
        }
    }

    pub fn with_touch() -> Self {
        Self::new(true)
    }

    pub fn set_dir(&mut self, dir: TextDirection) {
        self.dir = dir;
    }

    pub fn create_element(&mut self, tag: &str) -> ElementId {
        self.elements.push(ElementData {
            tag: tag.to_ascii_lowercase(),
            connected: true,
            ..ElementData::default()
        });
        ElementId(self.elements.len() - 1)
    }

    pub fn create_range(&mut self, rect: Rect) -> ElementId {
        let id = self.create_element("input");
        self.set_attribute(id, "type", "range");
        self.set_rect(id, rect);
        id
    }

    pub fn element(&self, id: ElementId) -> Option<&ElementData> {
        self.elements.get(id.0)
    }

    fn element_mut(&mut self, id: ElementId) -> Option<&mut ElementData> {
        self.elements.get_mut(id.0)
    }

    pub fn set_attribute(&mut self, id: ElementId, name: &str, value: &str) {
        let Some(el) = self.element_mut(id) else {
            return;
        };
        let name = name.to_ascii_lowercase();
        match el.attributes.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value.to_string(),
            None => el.attributes.push((name, value.to_string())),
        }
    }

    pub fn remove_attribute(&mut self, id: ElementId, name: &str) {
        if let Some(el) = self.element_mut(id) {
            el.attributes.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
        }
    }

    pub fn set_rect(&mut self, id: ElementId, rect: Rect) {
        if let Some(el) = self.element_mut(id) {
            el.rect = rect;
        }
    }

    pub fn remove_element(&mut self, id: ElementId) {
        if let Some(el) = self.element_mut(id) {
            el.connected = false;
        }
    }

    pub fn value(&self, id: ElementId) -> Option<f64> {
        self.element(id).and_then(|el| el.value)
    }

    pub fn style(&self) -> Option<&StyleElement> {
        self.style.as_ref()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listener_phases(&self) -> Vec<Phase> {
        self.listeners.iter().map(|r| r.phase).collect()
    }

    pub fn dispatched(&self) -> &[Dispatched] {
        &self.dispatched
    }

    pub fn dispatch_touch(&mut self, event: &TouchEvent<ElementId>) -> TouchDispatch {
        let handlers: Vec<TouchHandler> = self
            .listeners
            .iter()
            .filter(|r| r.phase == event.phase)
            .map(|r| r.handler.clone())
            .collect();

        let outcomes: Vec<Outcome> = handlers
            .iter()
            .map(|handler| handler.handle(self, event))
            .collect();
        let default_prevented = outcomes.iter().any(Outcome::prevents_default);

        TouchDispatch {
            outcomes,
            default_prevented,
        }
    }

    pub fn touch(&mut self, target: ElementId, phase: Phase, x: f64) -> TouchDispatch {
        self.dispatch_touch(&TouchEvent::single(target, phase, x))
    }
}

impl Default for MemoryDocument {
    fn default() -> Self {
        Self::with_touch()
    }
}

impl Host for MemoryDocument {
    type Element = ElementId;

    fn touch_capable(&self) -> bool {
        self.touch
    }

    fn add_css(&mut self, selector: &str, declarations: &str) {
        let style = self.style.get_or_insert_with(|| StyleElement {
            id: STYLE_ELEMENT_ID.to_string(),
            rules: Vec::new(),
        });
        style.rules.insert(0, format_rule(selector, declarations));
    }

    fn matches(&self, element: &ElementId, selector: &str) -> bool {
        self.element(*element)
            .is_some_and(|el| el.connected && matches_selector(el, selector))
    }

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String> {
        self.element(*element)
            .and_then(|el| el.attr(name))
            .map(str::to_string)
    }

    fn bounding_rect(&self, element: &ElementId) -> Rect {
        self.element(*element).map(|el| el.rect).unwrap_or_default()
    }

    fn direction(&self, element: &ElementId) -> TextDirection {
        let own = self
            .element(*element)
            .and_then(|el| el.attr("dir"))
            .and_then(|d| d.parse::<TextDirection>().ok());
        if self.dir == TextDirection::Rtl || own == Some(TextDirection::Rtl) {
            TextDirection::Rtl
        } else {
            TextDirection::Ltr
        }
    }

    fn set_value(&mut self, element: &ElementId, value: f64) {
        if let Some(el) = self.element_mut(*element) {
            el.value = Some(value);
        }
    }

    fn dispatch(&mut self, element: &ElementId, notification: Notification) {
        let value = self.value(*element);
        self.dispatched.push(Dispatched {
            target: *element,
            notification,
            value,
        });
    }

    fn listen(&mut self, phase: Phase, handler: TouchHandler) -> ListenerId {
        self.next_listener += 1;
        let id = ListenerId::from_raw(self.next_listener);
        self.listeners.push(Registration { id, phase, handler });
        id
    }

    fn unlisten(&mut self, id: ListenerId) {
        self.listeners.retain(|r| r.id != id);
    }
}
