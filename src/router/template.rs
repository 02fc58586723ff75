use std::collections::HashMap;

use percent_encoding::percent_decode_str;

use super::RouteError;

/// One segment of a path template.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(String),
}

/// A path such as `/update/{metricType}/{metricName}` split into literal and
/// placeholder segments.
#[derive(Debug, Clone)]
pub struct PathTemplate {
    raw: String,
    segments: Vec<Segment>,
}

impl PathTemplate {
    pub fn parse(template: &str) -> Result<Self, RouteError> {
        let rest = template
            .strip_prefix('/')
            .ok_or_else(|| RouteError::MissingLeadingSlash(template.to_string()))?;

        let mut segments = Vec::new();
        for part in rest.split('/') {
            let segment = match part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
                Some(name) if name.is_empty() || name.contains(['{', '}']) => {
                    return Err(RouteError::MalformedSegment {
                        template: template.to_string(),
                        segment: part.to_string(),
                    });
                }
                Some(name) => {
                    if segments.contains(&Segment::Placeholder(name.to_string())) {
                        return Err(RouteError::DuplicatePlaceholder {
                            template: template.to_string(),
                            name: name.to_string(),
                        });
                    }
                    Segment::Placeholder(name.to_string())
                }
                None if part.contains(['{', '}']) => {
                    return Err(RouteError::MalformedSegment {
                        template: template.to_string(),
                        segment: part.to_string(),
                    });
                }
                None => Segment::Literal(part.to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            raw: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Matches `path` segment by segment, binding placeholders by name.
    ///
    /// The path is split on `/` first and each segment is then
    /// percent-decoded, so an encoded `%2F` stays inside its segment. Segment
    /// counts must be equal and every literal must equal its decoded segment.
    /// A segment that does not decode to UTF-8 matches nothing.
    pub fn matches(&self, path: &str) -> Option<PathParams> {
        let rest = path.strip_prefix('/')?;
        let parts: Vec<&str> = rest.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = PathParams::default();
        for (segment, part) in self.segments.iter().zip(parts) {
            let decoded = percent_decode_str(part).decode_utf8().ok()?;
            match segment {
                Segment::Literal(literal) if *literal == decoded => {}
                Segment::Literal(_) => return None,
                Segment::Placeholder(name) => {
                    params.0.insert(name.clone(), decoded.into_owned());
                }
            }
        }
        Some(params)
    }

    /// True if some path could match both templates.
    pub fn overlaps(&self, other: &PathTemplate) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    _ => true,
                })
    }
}

/// Placeholder values bound from a request path, keyed by placeholder name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(HashMap<String, String>);

impl PathParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        PathParams(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}
