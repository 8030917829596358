// Hypermedia link templates.
// Parses and expands the RFC 6570 URI templates GitHub publishes in its API.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{OctokitError, Result};

/// Largest prefix length accepted by the `{var:n}` modifier.
const MAX_PREFIX: usize = 9999;

/// A URI template such as `/users/{user}/keys` or `/user/keys{/id}`.
///
/// Hyperlinks are plain values. Service defaults are `const` items, and
/// links returned by the API (the `*_url` fields) deserialize into the
/// same type so they can be handed straight back to a service method.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hyperlink(Cow<'static, str>);

impl Hyperlink {
    /// Create a hyperlink from a string literal. Usable in `const` items.
    pub const fn from_static(template: &'static str) -> Self {
        Self(Cow::Borrowed(template))
    }

    pub fn new(template: impl Into<String>) -> Self {
        Self(Cow::Owned(template.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expand the template with the given parameters.
    ///
    /// Variables in `{var}` and `{+var}` expressions are required. Variables
    /// behind any other operator are dropped when absent, so `/user/keys{/id}`
    /// expands to `/user/keys` without an `id`.
    pub fn expand(&self, params: &Params) -> Result<String> {
        let template = self.as_str();
        let mut url = String::with_capacity(template.len());

        for part in parse(template)? {
            match part {
                Part::Literal(text) => url.push_str(text),
                Part::Expression {
                    operator,
                    variables,
                } => {
                    let mut first = true;
                    for var in variables {
                        let Some(value) = params.get(var.name) else {
                            if operator.required() {
                                return Err(OctokitError::MissingParameter {
                                    template: template.to_string(),
                                    name: var.name.to_string(),
                                });
                            }
                            continue;
                        };

                        url.push_str(if first {
                            operator.first()
                        } else {
                            operator.separator()
                        });
                        first = false;

                        let value = match var.prefix {
                            Some(length) => truncate(value, length),
                            None => value,
                        };

                        if operator.named() {
                            url.push_str(var.name);
                            if value.is_empty() {
                                url.push_str(operator.if_empty());
                                continue;
                            }
                            url.push('=');
                        }

                        encode_into(&mut url, value, operator.allow_reserved());
                    }
                }
            }
        }

        Ok(url)
    }

    /// Names of the variables referenced by the template, in order.
    pub fn variables(&self) -> Result<Vec<String>> {
        let names = parse(self.as_str())?
            .into_iter()
            .filter_map(|part| match part {
                Part::Expression { variables, .. } => Some(variables),
                Part::Literal(_) => None,
            })
            .flatten()
            .map(|var| var.name.to_string())
            .collect();
        Ok(names)
    }
}

impl fmt::Display for Hyperlink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for Hyperlink {
    fn from(template: &'static str) -> Self {
        Self::from_static(template)
    }
}

impl From<String> for Hyperlink {
    fn from(template: String) -> Self {
        Self::new(template)
    }
}

/// Pick the caller's link, or the service default when none is given.
pub fn resolve<'a>(uri: Option<&'a Hyperlink>, default: &'a Hyperlink) -> &'a Hyperlink {
    uri.unwrap_or(default)
}

/// Template parameters, keyed by variable name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl ToString) -> Option<String> {
        self.0.insert(name.into(), value.to_string())
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

impl<K: Into<String>, V: ToString, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Expression operator, the first character inside the braces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Simple,
    Reserved,
    Fragment,
    Label,
    PathSegment,
    PathParameter,
    Query,
    QueryContinuation,
}

impl Operator {
    fn parse(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Reserved),
            '#' => Some(Operator::Fragment),
            '.' => Some(Operator::Label),
            '/' => Some(Operator::PathSegment),
            ';' => Some(Operator::PathParameter),
            '?' => Some(Operator::Query),
            '&' => Some(Operator::QueryContinuation),
            _ => None,
        }
    }

    fn first(self) -> &'static str {
        match self {
            Operator::Simple | Operator::Reserved => "",
            Operator::Fragment => "#",
            Operator::Label => ".",
            Operator::PathSegment => "/",
            Operator::PathParameter => ";",
            Operator::Query => "?",
            Operator::QueryContinuation => "&",
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Operator::Simple | Operator::Reserved | Operator::Fragment => ",",
            Operator::Label => ".",
            Operator::PathSegment => "/",
            Operator::PathParameter => ";",
            Operator::Query | Operator::QueryContinuation => "&",
        }
    }

    fn named(self) -> bool {
        matches!(
            self,
            Operator::PathParameter | Operator::Query | Operator::QueryContinuation
        )
    }

    fn if_empty(self) -> &'static str {
        match self {
            Operator::Query | Operator::QueryContinuation => "=",
            _ => "",
        }
    }

    fn allow_reserved(self) -> bool {
        matches!(self, Operator::Reserved | Operator::Fragment)
    }

    fn required(self) -> bool {
        matches!(self, Operator::Simple | Operator::Reserved)
    }
}

#[derive(Debug)]
struct VarSpec<'t> {
    name: &'t str,
    prefix: Option<usize>,
}

#[derive(Debug)]
enum Part<'t> {
    Literal(&'t str),
    Expression {
        operator: Operator,
        variables: Vec<VarSpec<'t>>,
    },
}

fn parse(template: &str) -> Result<Vec<Part<'_>>> {
    let mut parts = Vec::new();
    let mut literal_start = 0;
    let mut chars = template.char_indices();

    while let Some((position, c)) = chars.next() {
        match c {
            '}' => return Err(OctokitError::template(template, position, "unmatched '}'")),
            '{' => {
                if literal_start < position {
                    parts.push(Part::Literal(&template[literal_start..position]));
                }

                let end = loop {
                    match chars.next() {
                        Some((end, '}')) => break end,
                        Some((nested, '{')) => {
                            return Err(OctokitError::template(template, nested, "nested '{'"));
                        }
                        Some(_) => {}
                        None => {
                            return Err(OctokitError::template(template, position, "unclosed '{'"));
                        }
                    }
                };

                let body_start = position + 1;
                parts.push(parse_expression(
                    template,
                    body_start,
                    &template[body_start..end],
                )?);
                literal_start = end + 1;
            }
            _ => {}
        }
    }

    if literal_start < template.len() {
        parts.push(Part::Literal(&template[literal_start..]));
    }

    Ok(parts)
}

fn parse_expression<'t>(template: &str, offset: usize, body: &'t str) -> Result<Part<'t>> {
    let (operator, list) = match body.chars().next() {
        None => return Err(OctokitError::template(template, offset, "empty expression")),
        Some(c @ ('=' | ',' | '!' | '@' | '|')) => {
            return Err(OctokitError::template(
                template,
                offset,
                format!("reserved operator '{c}'"),
            ));
        }
        Some(c) => match Operator::parse(c) {
            Some(operator) => (operator, &body[c.len_utf8()..]),
            None => (Operator::Simple, body),
        },
    };

    let mut position = offset + (body.len() - list.len());
    let mut variables = Vec::new();
    for spec in list.split(',') {
        variables.push(parse_varspec(template, position, spec)?);
        position += spec.len() + 1;
    }

    Ok(Part::Expression {
        operator,
        variables,
    })
}

fn parse_varspec<'t>(template: &str, position: usize, spec: &'t str) -> Result<VarSpec<'t>> {
    let (name, prefix) = if let Some(name) = spec.strip_suffix('*') {
        (name, None)
    } else if let Some((name, length)) = spec.split_once(':') {
        let prefix = Some(length)
            .filter(|length| !length.is_empty() && length.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|length| length.parse::<usize>().ok())
            .filter(|length| (1..=MAX_PREFIX).contains(length))
            .ok_or_else(|| {
                OctokitError::template(
                    template,
                    position + name.len() + 1,
                    format!("invalid prefix length {length:?}"),
                )
            })?;
        (name, Some(prefix))
    } else {
        (spec, None)
    };

    if name.is_empty() {
        return Err(OctokitError::template(template, position, "empty variable name"));
    }

    if let Some((index, c)) = name.char_indices().find(|(_, c)| !is_varchar(*c)) {
        return Err(OctokitError::template(
            template,
            position + index,
            format!("invalid character {c:?} in variable name"),
        ));
    }

    Ok(VarSpec { name, prefix })
}

fn is_varchar(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '%')
}

fn is_reserved(c: char) -> bool {
    matches!(
        c,
        ':' | '/' | '?' | '#' | '[' | ']' | '@' | '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+'
            | ',' | ';' | '='
    )
}

/// First `length` characters of `value`.
fn truncate(value: &str, length: usize) -> &str {
    match value.char_indices().nth(length) {
        Some((index, _)) => &value[..index],
        None => value,
    }
}

fn encode_into(url: &mut String, value: &str, allow_reserved: bool) {
    if !allow_reserved {
        url.push_str(&urlencoding::encode(value));
        return;
    }

    let bytes = value.as_bytes();
    for (index, c) in value.char_indices() {
        let pct_triplet = c == '%'
            && bytes.len() > index + 2
            && bytes[index + 1].is_ascii_hexdigit()
            && bytes[index + 2].is_ascii_hexdigit();

        if is_reserved(c) || pct_triplet {
            url.push(c);
        } else {
            url.push_str(&urlencoding::encode(&value[index..index + c.len_utf8()]));
        }
    }
}
