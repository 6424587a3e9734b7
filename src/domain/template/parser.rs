// Path template parser using recursive descent

use anyhow::{bail, Result};
use std::collections::HashSet;

use super::ast::{PathTemplate, TemplatePart};

pub struct TemplateParser {
    input: String,
    pos: usize,
}

impl TemplateParser {
    pub fn parse(template: &str) -> Result<PathTemplate> {
        let mut parser = Self {
            input: template.to_string(),
            pos: 0,
        };
        let parts = parser.parse_parts()?;
        Ok(PathTemplate::new(template, parts))
    }

    fn parse_parts(&mut self) -> Result<Vec<TemplatePart>> {
        let mut parts = Vec::new();
        let mut literal_buf = String::new();
        let mut seen = HashSet::new();

        while self.pos < self.input.len() {
            match self.peek_char() {
                Some('{') => {
                    // Flush literal buffer before the placeholder
                    if !literal_buf.is_empty() {
                        parts.push(TemplatePart::Literal(std::mem::take(&mut literal_buf)));
                    }

                    let name = self.parse_placeholder()?;
                    if !seen.insert(name.clone()) {
                        bail!("Duplicate placeholder '{{{}}}' in '{}'", name, self.input);
                    }
                    parts.push(TemplatePart::Placeholder(name));
                }
                Some('}') => bail!("Unexpected closing brace at position {}", self.pos),
                _ => literal_buf.push(self.consume_char()?),
            }
        }

        if !literal_buf.is_empty() {
            parts.push(TemplatePart::Literal(literal_buf));
        }

        Ok(parts)
    }

    fn parse_placeholder(&mut self) -> Result<String> {
        self.expect_char('{')?;
        let start = self.pos;

        let mut name = String::new();
        while let Some(ch) = self.peek_char() {
            match ch {
                '}' => break,
                '{' | '/' => bail!(
                    "Invalid character '{}' in placeholder at position {}",
                    ch,
                    self.pos
                ),
                _ => name.push(self.consume_char()?),
            }
        }

        if self.peek_char().is_none() {
            bail!("Unclosed placeholder starting at position {}", start - 1);
        }
        self.expect_char('}')?;

        let name = name.trim().to_string();
        if name.is_empty() {
            bail!("Empty placeholder at position {}", start - 1);
        }

        Ok(name)
    }

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn consume_char(&mut self) -> Result<char> {
        let ch = self.peek_char()
            .ok_or_else(|| anyhow::anyhow!("Unexpected end of input at position {}", self.pos))?;
        self.pos += ch.len_utf8();
        Ok(ch)
    }

    fn expect_char(&mut self, expected: char) -> Result<()> {
        match self.peek_char() {
            Some(ch) if ch == expected => {
                self.consume_char()?;
                Ok(())
            }
            Some(ch) => bail!(
                "Expected '{}' but found '{}' at position {}",
                expected,
                ch,
                self.pos
            ),
            None => bail!("Expected '{}' but found end of input", expected),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_placeholder() {
        let template = TemplateParser::parse("/zone/{zone}/").unwrap();
        assert_eq!(template.parts.len(), 3);
        assert_eq!(template.parts[0], TemplatePart::Literal("/zone/".to_string()));
        assert_eq!(template.parts[1], TemplatePart::Placeholder("zone".to_string()));
        assert_eq!(template.parts[2], TemplatePart::Literal("/".to_string()));
        assert_eq!(template.as_str(), "/zone/{zone}/");
    }

    #[test]
    fn test_parse_no_placeholders() {
        let template = TemplateParser::parse("/configurations/").unwrap();
        assert_eq!(template.parts.len(), 1);
        assert!(template.placeholders().is_empty());
    }

    #[test]
    fn test_parse_multiple_placeholders_in_order() {
        let template = TemplateParser::parse("/R1/{p1}/R3/{p3}/R2/{p2}/").unwrap();
        assert_eq!(template.placeholders(), vec!["p1", "p3", "p2"]);
    }

    #[test]
    fn test_parse_adjacent_placeholders() {
        let template = TemplateParser::parse("/{a}{b}").unwrap();
        assert_eq!(template.parts.len(), 3);
        assert_eq!(template.placeholders(), vec!["a", "b"]);
    }

    #[test]
    fn test_parse_trims_placeholder_whitespace() {
        let template = TemplateParser::parse("/zone/{ zone }").unwrap();
        assert_eq!(template.placeholders(), vec!["zone"]);
    }

    #[test]
    fn test_parse_duplicate_placeholder_fails() {
        let result = TemplateParser::parse("/a/{id}/b/{id}/");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Duplicate placeholder '{id}'"));
    }

    #[test]
    fn test_parse_unclosed_placeholder_fails() {
        let result = TemplateParser::parse("/zone/{zone");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unclosed placeholder"));
    }

    #[test]
    fn test_parse_empty_placeholder_fails() {
        let result = TemplateParser::parse("/zone/{}/");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Empty placeholder"));
    }

    #[test]
    fn test_parse_stray_closing_brace_fails() {
        let result = TemplateParser::parse("/zone/}/");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Unexpected closing brace"));
    }

    #[test]
    fn test_parse_slash_inside_placeholder_fails() {
        let result = TemplateParser::parse("/zone/{a/b}/");
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid character '/'"));
    }
}
