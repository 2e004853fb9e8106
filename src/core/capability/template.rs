//! URI templates for resources.
//!
//! Templates are matched segment by segment on `/`. A segment is either a
//! literal, which must match exactly, or a `{placeholder}` spanning the whole
//! segment, which matches any single non-empty segment and captures it.

use super::error::ConfigurationError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A parsed resource URI template such as `corporate://employees/{employee_id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl UriTemplate {
    /// Parse a template.
    ///
    /// Placeholders must occupy a whole segment, carry a non-empty name made
    /// of ASCII letters, digits and `_`, and appear at most once.
    pub fn parse(raw: &str) -> Result<Self, ConfigurationError> {
        if raw.is_empty() {
            return Err(ConfigurationError::invalid_template(raw, "template is empty"));
        }

        let mut segments = Vec::new();
        let mut seen: Vec<&str> = Vec::new();

        for part in raw.split('/') {
            let segment = match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(name) => {
                    if name.is_empty() {
                        return Err(ConfigurationError::invalid_template(
                            raw,
                            "placeholder name is empty",
                        ));
                    }
                    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                        return Err(ConfigurationError::invalid_template(
                            raw,
                            format!("invalid placeholder name '{}'", name),
                        ));
                    }
                    if seen.contains(&name) {
                        return Err(ConfigurationError::invalid_template(
                            raw,
                            format!("placeholder '{}' appears more than once", name),
                        ));
                    }
                    seen.push(name);
                    Segment::Placeholder(name.to_string())
                }
                None if part.contains('{') || part.contains('}') => {
                    return Err(ConfigurationError::invalid_template(
                        raw,
                        format!("placeholder must span a whole segment: '{}'", part),
                    ));
                }
                None => Segment::Literal(part.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder names in template order.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }

    /// Whether the template has no placeholders, i.e. names a single URI.
    pub fn is_static(&self) -> bool {
        self.placeholders().next().is_none()
    }

    /// Match a concrete URI, returning captured `(placeholder, value)` pairs.
    pub fn matches(&self, uri: &str) -> Option<Vec<(String, String)>> {
        let parts: Vec<&str> = uri.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut captures = Vec::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(literal) if literal == part => {}
                Segment::Literal(_) => return None,
                Segment::Placeholder(_) if part.is_empty() => return None,
                Segment::Placeholder(name) => captures.push((name.clone(), part.to_string())),
            }
        }
        Some(captures)
    }

    /// Whether every URI matched by `later` is already matched by `self`.
    ///
    /// Used at composition time to reject templates that registration order
    /// would make unreachable. Partial overlap is not shadowing.
    pub fn shadows(&self, later: &UriTemplate) -> bool {
        self.segments.len() == later.segments.len()
            && self
                .segments
                .iter()
                .zip(&later.segments)
                .all(|(earlier, later)| match (earlier, later) {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (Segment::Placeholder(_), Segment::Placeholder(_)) => true,
                    (Segment::Placeholder(_), Segment::Literal(b)) => !b.is_empty(),
                    (Segment::Literal(_), Segment::Placeholder(_)) => false,
                })
    }
}

impl std::fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_template_matches_exactly() {
        let template = UriTemplate::parse("corporate://holidays/2025").unwrap();
        assert!(template.is_static());
        assert_eq!(template.matches("corporate://holidays/2025"), Some(vec![]));
        assert_eq!(template.matches("corporate://holidays/2026"), None);
        assert_eq!(template.matches("corporate://holidays/2025/extra"), None);
    }

    #[test]
    fn test_placeholder_captures_segment() {
        let template = UriTemplate::parse("corporate://employees/{employee_id}").unwrap();
        assert_eq!(template.placeholders().collect::<Vec<_>>(), vec!["employee_id"]);

        let captures = template.matches("corporate://employees/U123").unwrap();
        assert_eq!(
            captures,
            vec![("employee_id".to_string(), "U123".to_string())]
        );
    }

    #[test]
    fn test_placeholder_rejects_empty_segment() {
        let template = UriTemplate::parse("corporate://employees/{employee_id}").unwrap();
        assert_eq!(template.matches("corporate://employees/"), None);
    }

    #[test]
    fn test_placeholder_does_not_span_segments() {
        let template = UriTemplate::parse("config://{section}").unwrap();
        assert_eq!(template.matches("config://a/b"), None);
    }

    #[test]
    fn test_parse_errors() {
        assert!(UriTemplate::parse("").is_err());
        assert!(UriTemplate::parse("x://a/{}").is_err());
        assert!(UriTemplate::parse("x://a/id-{id}").is_err());
        assert!(UriTemplate::parse("x://a/{bad-name}").is_err());
        assert!(UriTemplate::parse("x://{id}/{id}").is_err());
    }

    #[test]
    fn test_shadowing() {
        let general = UriTemplate::parse("x://users/{id}").unwrap();
        let specific = UriTemplate::parse("x://users/me").unwrap();
        let renamed = UriTemplate::parse("x://users/{user}").unwrap();
        let other = UriTemplate::parse("x://{group}/admin").unwrap();

        assert!(general.shadows(&specific));
        assert!(!specific.shadows(&general));
        assert!(general.shadows(&renamed));
        assert!(!general.shadows(&other));
        assert!(!other.shadows(&general));
    }
}
