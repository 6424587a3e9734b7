// Parsed form of a path template

use std::collections::HashMap;

/// A path template parsed once into literal text and placeholders
#[derive(Debug, Clone, PartialEq)]
pub struct PathTemplate {
    raw: String,
    pub parts: Vec<TemplatePart>,
}

/// A template consists of literal strings and `{name}` placeholders
#[derive(Debug, Clone, PartialEq)]
pub enum TemplatePart {
    Literal(String),
    Placeholder(String),
}

impl PathTemplate {
    pub fn new(raw: impl Into<String>, parts: Vec<TemplatePart>) -> Self {
        Self {
            raw: raw.into(),
            parts,
        }
    }

    /// The template exactly as declared in the API specification
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names, left to right
    pub fn placeholders(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                TemplatePart::Placeholder(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Index of the part holding `{name}`, if the template has one
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.parts
            .iter()
            .position(|part| matches!(part, TemplatePart::Placeholder(p) if p == name))
    }

    /// Static segment directly in front of the placeholder at `index`.
    ///
    /// For `/zone/{zone}/` and the index of `{zone}` this is `zone`. Returns `None`
    /// unless the template has the `/segment/{placeholder}` shape there.
    pub fn segment_before(&self, index: usize) -> Option<&str> {
        let previous = index.checked_sub(1).and_then(|i| self.parts.get(i))?;
        let TemplatePart::Literal(text) = previous else {
            return None;
        };
        let head = text.strip_suffix('/')?;
        let slash = head.rfind('/')?;
        let segment = &head[slash + 1..];
        if segment.is_empty() {
            None
        } else {
            Some(segment)
        }
    }

    /// True when the template addresses a single item, i.e. ends in a placeholder
    /// once trailing separators are ignored.
    pub fn is_item_path(&self) -> bool {
        self.parts
            .iter()
            .rev()
            .find(|part| !matches!(part, TemplatePart::Literal(s) if s.chars().all(|c| c == '/')))
            .is_some_and(|part| matches!(part, TemplatePart::Placeholder(_)))
    }

    /// Substitute every placeholder. Returns `None` if a placeholder has no value.
    pub fn render(&self, substitutions: &HashMap<String, String>) -> Option<String> {
        let mut result = String::new();

        for part in &self.parts {
            match part {
                TemplatePart::Literal(s) => result.push_str(s),
                TemplatePart::Placeholder(name) => result.push_str(substitutions.get(name)?),
            }
        }

        Some(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::TemplateParser;

    #[test]
    fn test_segment_before_placeholder() {
        let template = TemplateParser::parse("/zone/{zone}/").unwrap();
        let index = template.position_of("zone").unwrap();
        assert_eq!(template.segment_before(index), Some("zone"));
    }

    #[test]
    fn test_segment_before_nested_placeholder() {
        let template = TemplateParser::parse("/configurations/{config}/views/{view}/").unwrap();
        let index = template.position_of("view").unwrap();
        assert_eq!(template.segment_before(index), Some("views"));
    }

    #[test]
    fn test_segment_before_requires_static_segment() {
        let template = TemplateParser::parse("/{parent}/{child}/").unwrap();
        assert_eq!(template.segment_before(template.position_of("child").unwrap()), None);
        assert_eq!(template.segment_before(template.position_of("parent").unwrap()), None);

        let template = TemplateParser::parse("zone/{zone}").unwrap();
        assert_eq!(template.segment_before(template.position_of("zone").unwrap()), None);
    }

    #[test]
    fn test_is_item_path() {
        assert!(TemplateParser::parse("/R1/{p1}/").unwrap().is_item_path());
        assert!(TemplateParser::parse("/R1/{p1}").unwrap().is_item_path());
        assert!(!TemplateParser::parse("/R1/{p1}/R2").unwrap().is_item_path());
        assert!(!TemplateParser::parse("/R1/{p1}/R2/").unwrap().is_item_path());
        assert!(!TemplateParser::parse("/zones/").unwrap().is_item_path());
    }

    #[test]
    fn test_render_missing_value() {
        let template = TemplateParser::parse("/R1/{p1}/R2/{p2}/").unwrap();
        let mut values = HashMap::new();
        values.insert("p1".to_string(), "a".to_string());
        assert_eq!(template.render(&values), None);

        values.insert("p2".to_string(), "b".to_string());
        assert_eq!(template.render(&values).as_deref(), Some("/R1/a/R2/b/"));
    }
}
