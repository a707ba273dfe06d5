#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Universal,
    Type(String),
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
    Disabled,
    Enabled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector(pub Vec<SimpleSelector>);

pub trait Matchable {
    fn tag(&self) -> &str;
    fn attr(&self, name: &str) -> Option<&str>;
}

// input: "input[type=\"range\"], .slider"
// output: Some(vec![CompoundSelector([Type("input"), Attribute{..}]), CompoundSelector([Class("slider")])])
pub fn parse_selector_list(input: &str) -> Option<Vec<CompoundSelector>> {
    input.split(',').map(parse_compound).collect()
}

pub fn matches_selector<M: Matchable>(element: &M, selector: &str) -> bool {
    parse_selector_list(selector)
        .is_some_and(|list| list.iter().any(|compound| compound.matches(element)))
}

impl CompoundSelector {
    pub fn matches<M: Matchable>(&self, element: &M) -> bool {
        self.0.iter().all(|simple| simple.matches(element))
    }
}

impl SimpleSelector {
    pub fn matches<M: Matchable>(&self, element: &M) -> bool {
        match self {
            SimpleSelector::Universal => true,
            SimpleSelector::Type(tag) => element.tag().eq_ignore_ascii_case(tag),
            SimpleSelector::Id(id) => element.attr("id") == Some(id.as_str()),
            SimpleSelector::Class(class) => element.attr("class").is_some_and(|classes| {
                classes
                    .split_ascii_whitespace()
                    .any(|c| c == class.as_str())
            }),
            SimpleSelector::Attribute { name, value } => match (element.attr(name), value) {
                (Some(actual), Some(expected)) => actual == expected.as_str(),
                (Some(_), None) => true,
                (None, _) => false,
            },
            SimpleSelector::Disabled => element.attr("disabled").is_some(),
            SimpleSelector::Enabled => element.attr("disabled").is_none(),
        }
    }
}

fn take_ident(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(s.len());
    s.split_at(end)
}

fn unquote(s: &str) -> &str {
    let s = s.trim();
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|r| r.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

fn parse_attribute(inner: &str) -> Option<SimpleSelector> {
    let (name, value) = match inner.split_once('=') {
        Some((name, value)) => (name, Some(unquote(value).to_string())),
        None => (inner, None),
    };
    let name = name.trim();
    if name.is_empty() || !take_ident(name).1.is_empty() {
        return None;
    }
    Some(SimpleSelector::Attribute {
        name: name.to_ascii_lowercase(),
        value,
    })
}

fn parse_compound(s: &str) -> Option<CompoundSelector> {
    let mut rest = s.trim();
    let mut parts = Vec::new();

    if let Some(r) = rest.strip_prefix('*') {
        parts.push(SimpleSelector::Universal);
        rest = r;
    } else {
        let (ident, r) = take_ident(rest);
        if !ident.is_empty() {
            parts.push(SimpleSelector::Type(ident.to_ascii_lowercase()));
            rest = r;
        }
    }

    while let Some(c) = rest.chars().next() {
        let after = &rest[c.len_utf8()..];
        match c {
            '#' | '.' | ':' => {
                let (ident, r) = take_ident(after);
                if ident.is_empty() {
                    return None;
                }
                parts.push(match c {
                    '#' => SimpleSelector::Id(ident.to_string()),
                    '.' => SimpleSelector::Class(ident.to_string()),
                    _ => match ident.to_ascii_lowercase().as_str() {
                        "disabled" => SimpleSelector::Disabled,
                        "enabled" => SimpleSelector::Enabled,
                        _ => return None,
                    },
                });
                rest = r;
            }
            '[' => {
                let (inner, r) = after.split_once(']')?;
                parts.push(parse_attribute(inner)?);
                rest = r;
            }
            _ => return None,
        }
    }

    (!parts.is_empty()).then_some(CompoundSelector(parts))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct El {
        tag: &'static str,
        attrs: Vec<(&'static str, &'static str)>,
    }

    impl Matchable for El {
        fn tag(&self) -> &str {
            self.tag
        }

        fn attr(&self, name: &str) -> Option<&str> {
            self.attrs.iter().find(|(k, _)| *k == name).map(|(_, v)| *v)
        }
    }

    fn range(extra: Vec<(&'static str, &'static str)>) -> El {
        let mut attrs = vec![("type", "range")];
        attrs.extend(extra);
        El {
            tag: "INPUT",
            attrs,
        }
    }

    #[test]
    fn test_parse_compound() {
        assert_eq!(
            parse_selector_list("input[type=\"range\"]"),
            Some(vec![CompoundSelector(vec![
                SimpleSelector::Type("input".into()),
                SimpleSelector::Attribute {
                    name: "type".into(),
                    value: Some("range".into())
                },
            ])])
        );
        assert_eq!(
            parse_selector_list("*:disabled"),
            Some(vec![CompoundSelector(vec![
                SimpleSelector::Universal,
                SimpleSelector::Disabled
            ])])
        );
    }

    #[test]
    fn test_unsupported_selectors_fail() {
        let cases = vec!["", "div > input", "form input", "a:hover", "[", "[=x]", "#", "a,"];
        for input in cases {
            assert_eq!(parse_selector_list(input), None, "input {input:?}");
        }
    }

    #[test]
    fn test_matching() {
        let el = range(vec![("id", "volume"), ("class", "slider big")]);
        let cases = vec![
            ("input[type=\"range\"]", true),
            ("input[type='range']", true),
            ("input[type=range]", true),
            ("[type]", true),
            ("input[type=checkbox]", false),
            ("#volume", true),
            ("#other", false),
            (".slider", true),
            (".big.slider", true),
            (".slide", false),
            ("textarea, .big", true),
            ("*", true),
            (":enabled", true),
            (":disabled", false),
            ("input > .slider", false),
        ];

        for (selector, expected) in cases {
            assert_eq!(matches_selector(&el, selector), expected, "{selector}");
        }
    }

    #[test]
    fn test_disabled_pseudo_class() {
        let el = range(vec![("disabled", "")]);
        assert!(matches_selector(&el, "input:disabled"));
        assert!(!matches_selector(&el, "input:enabled"));
    }
}
