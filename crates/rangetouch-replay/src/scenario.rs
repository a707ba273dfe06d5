use rangetouch::{Outcome, Phase, RangeTouch, Rect, Settings, TextDirection, TouchEvent, TouchPoint};
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use thiserror::Error;
use touchdom::{ElementId, MemoryDocument};

#[derive(Error, Debug)]
pub enum ScenarioError {
    #[error("Failed to read scenario: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid scenario: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Event {index} targets unknown control '{target}'")]
    UnknownTarget { index: usize, target: String },
    #[error("Control '{0}' is declared twice")]
    DuplicateControl(String),
}

fn default_tag() -> String {
    "input".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize)]
pub struct ControlDef {
    pub id: String,
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    pub left: f64,
    pub width: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventDef {
    pub phase: Phase,
    pub target: String,
    #[serde(default)]
    pub x: Vec<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    #[serde(default = "default_true")]
    pub touch: bool,
    #[serde(default)]
    pub dir: TextDirection,
    pub controls: Vec<ControlDef>,
    pub events: Vec<EventDef>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub phase: Phase,
    pub target: String,
    pub x: Option<f64>,
    pub outcomes: Vec<Outcome>,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:<10} {:<12}", self.phase, self.target)?;
        match self.x {
            Some(x) => write!(f, " x={x:<8}")?,
            None => write!(f, " x=-       ")?,
        }
        if self.outcomes.is_empty() {
            return write!(f, " -> no listener");
        }
        for outcome in &self.outcomes {
            match outcome {
                Outcome::Updated {
                    value,
                    notification,
                } => write!(f, " -> {value} ({notification})")?,
                Outcome::Ignored(reason) => write!(f, " -> ignored ({reason})")?,
            }
        }
        Ok(())
    }
}

impl Scenario {
    pub fn from_json(json: &str) -> Result<Self, ScenarioError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ScenarioError> {
        Self::from_json(&fs_err::read_to_string(path)?)
    }

    fn build_document(&self) -> Result<(MemoryDocument, HashMap<&str, ElementId>), ScenarioError> {
        let mut doc = MemoryDocument::new(self.touch);
        doc.set_dir(self.dir);

        let mut ids = HashMap::new();
        for control in &self.controls {
            let el = doc.create_element(&control.tag);
            if control.tag.eq_ignore_ascii_case("input") && !control.attributes.contains_key("type")
            {
                doc.set_attribute(el, "type", "range");
            }
            for (name, value) in &control.attributes {
                doc.set_attribute(el, name, value);
            }
            doc.set_rect(el, Rect::new(control.left, control.width));

            if ids.insert(control.id.as_str(), el).is_some() {
                return Err(ScenarioError::DuplicateControl(control.id.clone()));
            }
        }
        Ok((doc, ids))
    }

    pub fn replay(&self, settings: Settings) -> Result<Vec<Step>, ScenarioError> {
        let (mut doc, ids) = self.build_document()?;
        let controller = RangeTouch::setup(settings, &mut doc);
        log::info!(
            "Replaying {} events on {} controls ({})",
            self.events.len(),
            self.controls.len(),
            controller.state()
        );

        self.events
            .iter()
            .enumerate()
            .map(|(index, event)| {
                let target = ids.get(event.target.as_str()).copied().ok_or_else(|| {
                    ScenarioError::UnknownTarget {
                        index,
                        target: event.target.clone(),
                    }
                })?;
                let touches = event.x.iter().map(|&x| TouchPoint::new(x, 0.0)).collect();
                let result = doc.dispatch_touch(&TouchEvent::new(target, event.phase, touches));

                Ok(Step {
                    phase: event.phase,
                    target: event.target.clone(),
                    x: event.x.first().copied(),
                    outcomes: result.outcomes,
                })
            })
            .collect()
    }
}
