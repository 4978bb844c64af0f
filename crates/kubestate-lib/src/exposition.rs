//! Line filter over the text exposition format
//!
//! Only as much of the format is parsed as the filter needs: the sample
//! name and the label set. Values and timestamps are passed through.

use crate::selector::Selector;

/// A sample line split into its name and labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleLine<'a> {
    pub name: &'a str,
    pub labels: Vec<(&'a str, String)>,
}

impl<'a> SampleLine<'a> {
    /// Returns `None` for blank lines, comments and lines that do not parse.
    pub fn parse(line: &'a str) -> Option<Self> {
        let line = line.trim_start();
        if line.is_empty() || line.starts_with('#') {
            return None;
        }

        let name_end = line
            .find(|c: char| c == '{' || c.is_whitespace())
            .unwrap_or(line.len());
        let name = &line[..name_end];
        if name.is_empty() {
            return None;
        }

        let rest = &line[name_end..];
        let labels = match rest.strip_prefix('{') {
            Some(body) => parse_labels(body)?,
            None => Vec::new(),
        };

        Some(Self { name, labels })
    }

    /// Value of the label, "" when absent
    pub fn label(&self, name: &str) -> &str {
        self.labels
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
            .unwrap_or_default()
    }
}

/// Parses `name="value",...}` and stops at the closing brace.
fn parse_labels(body: &str) -> Option<Vec<(&str, String)>> {
    let mut labels = Vec::new();
    let mut rest = body;

    loop {
        rest = rest.trim_start_matches([',', ' ']);
        if rest.starts_with('}') {
            return Some(labels);
        }

        let eq = rest.find('=')?;
        let key = rest[..eq].trim();
        rest = rest[eq + 1..].trim_start().strip_prefix('"')?;

        let mut value = String::new();
        let mut chars = rest.char_indices();
        let close = loop {
            let (i, c) = chars.next()?;
            match c {
                '\\' => match chars.next()?.1 {
                    'n' => value.push('\n'),
                    other => value.push(other),
                },
                '"' => break i,
                other => value.push(other),
            }
        };

        labels.push((key, value));
        rest = &rest[close + 1..];
    }
}

/// Keeps sample lines whose name matches `filter` and whose `namespace`
/// label matches `namespace`. With both selectors open the body is
/// returned untouched, comments included.
pub fn filter_exposition(body: &str, filter: &Selector, namespace: &Selector) -> String {
    if filter.is_all() && namespace.is_all() {
        return body.to_string();
    }

    let mut out = String::new();
    for line in body.lines() {
        let Some(sample) = SampleLine::parse(line) else {
            continue;
        };
        if filter.matches(sample.name) && namespace.matches(sample.label("namespace")) {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
