use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

pub const STYLE_ELEMENT_ID: &str = "rangetouch";

pub const USABILITY_DECLARATIONS: &str =
    "user-select: none; -webkit-user-select: none; touch-action: manipulation;";

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct Selector(String);

crate::impl_string_newtype!(Selector);

impl From<&str> for Selector {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

pub fn format_rule(selector: &str, declarations: &str) -> String {
    format!("{selector} {{ {declarations} }}")
}
