//! # URI Templates
//!
//! RFC 6570 URI templates (up to level 4) as used by every route set:
//!
//! ```text
//! articles/{?searchQuery,page,rpp,sort,embed,fields}
//! articles/{id}/{?embed,fields}
//! ```
//!
//! A template is parsed once and can then be expanded any number of times
//! against a [`ParameterMap`]. Parsing is the only step that can fail;
//! expansion treats missing and `null` variables as undefined and simply
//! leaves them out.
//!
//! ```rust
//! use baasic_core::UriTemplate;
//! use serde_json::json;
//!
//! let template = UriTemplate::parse("articles/{id}/{?embed,fields}").unwrap();
//! let params = json!({"id": 42, "embed": "tags"});
//!
//! assert_eq!(template.expand(params.as_object().unwrap()), "articles/42/?embed=tags");
//! ```

use crate::error::CoreError;
use crate::options::ParameterMap;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

const MAX_PREFIX_LENGTH: usize = 9999;
const RESERVED: &str = ":/?#[]@!$&'()*+,;=";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operator {
    Simple,
    Reserved,
    Fragment,
    Label,
    Path,
    PathParameter,
    Query,
    QueryContinuation,
}

impl Operator {
    fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Reserved),
            '#' => Some(Operator::Fragment),
            '.' => Some(Operator::Label),
            '/' => Some(Operator::Path),
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
            Operator::Path => "/",
            Operator::PathParameter => ";",
            Operator::Query => "?",
            Operator::QueryContinuation => "&",
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Operator::Simple | Operator::Reserved | Operator::Fragment => ",",
            Operator::Label => ".",
            Operator::Path => "/",
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

    /// What follows a name whose value is the empty string.
    fn if_empty(self) -> &'static str {
        match self {
            Operator::Query | Operator::QueryContinuation => "=",
            _ => "",
        }
    }

    fn allow_reserved(self) -> bool {
        matches!(self, Operator::Reserved | Operator::Fragment)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Modifier {
    None,
    Prefix(usize),
    Explode,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct VarSpec {
    name: String,
    modifier: Modifier,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Expression {
        operator: Operator,
        variables: Vec<VarSpec>,
    },
}

/// A parsed RFC 6570 URI template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UriTemplate {
    source: String,
    parts: Vec<Part>,
}

impl UriTemplate {
    pub fn parse(source: &str) -> Result<Self, CoreError> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut rest = source;
        let mut offset = 0;

        while let Some(open) = rest.find('{') {
            literal.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let close = after.find('}').ok_or_else(|| CoreError::UnclosedExpression {
                template: source.to_owned(),
                position: offset + open,
            })?;

            if !literal.is_empty() {
                parts.push(Part::Literal(std::mem::take(&mut literal)));
            }
            parts.push(parse_expression(source, &after[..close])?);

            let consumed = open + 1 + close + 1;
            offset += consumed;
            rest = &rest[consumed..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }

        Ok(Self {
            source: source.to_owned(),
            parts,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Names of every variable referenced by the template, in order.
    pub fn variables(&self) -> Vec<&str> {
        self.parts
            .iter()
            .filter_map(|part| match part {
                Part::Expression { variables, .. } => Some(variables),
                Part::Literal(_) => None,
            })
            .flatten()
            .map(|var| var.name.as_str())
            .collect()
    }

    /// Expands the template. Undefined variables are left out.
    pub fn expand(&self, vars: &ParameterMap) -> String {
        let mut out = String::with_capacity(self.source.len());
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Expression {
                    operator,
                    variables,
                } => expand_expression(&mut out, *operator, variables, vars),
            }
        }
        out
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl FromStr for UriTemplate {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn parse_expression(template: &str, body: &str) -> Result<Part, CoreError> {
    let mut chars = body.chars();
    let (operator, list) = match chars.next() {
        Some(c) if matches!(c, '=' | ',' | '!' | '@' | '|') => {
            return Err(CoreError::UnsupportedOperator {
                template: template.to_owned(),
                operator: c,
            });
        }
        Some(c) => match Operator::from_char(c) {
            Some(operator) => (operator, chars.as_str()),
            None => (Operator::Simple, body),
        },
        None => (Operator::Simple, body),
    };

    let variables = list
        .split(',')
        .map(|spec| parse_varspec(template, spec))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Part::Expression {
        operator,
        variables,
    })
}

fn parse_varspec(template: &str, spec: &str) -> Result<VarSpec, CoreError> {
    let invalid = || CoreError::InvalidVariable {
        template: template.to_owned(),
        spec: spec.to_owned(),
    };

    let (name, modifier) = if let Some(name) = spec.strip_suffix('*') {
        (name, Modifier::Explode)
    } else if let Some((name, length)) = spec.split_once(':') {
        let length: usize = length.parse().map_err(|_| invalid())?;
        if length == 0 || length > MAX_PREFIX_LENGTH {
            return Err(invalid());
        }
        (name, Modifier::Prefix(length))
    } else {
        (spec, Modifier::None)
    };

    let valid_name = !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '%'));
    if !valid_name {
        return Err(invalid());
    }

    Ok(VarSpec {
        name: name.to_owned(),
        modifier,
    })
}

/// A variable value as RFC 6570 sees it.
enum Expandable {
    Scalar(String),
    List(Vec<String>),
    Pairs(Vec<(String, String)>),
}

impl Expandable {
    /// `None` for undefined values: missing, `null`, empty list or empty map.
    fn from_value(value: Option<&Value>) -> Option<Self> {
        match value? {
            Value::Null => None,
            Value::Array(items) => {
                let items: Vec<String> = items.iter().filter_map(scalar_text).collect();
                (!items.is_empty()).then_some(Expandable::List(items))
            }
            Value::Object(fields) => {
                let pairs: Vec<(String, String)> = fields
                    .iter()
                    .filter_map(|(k, v)| scalar_text(v).map(|v| (k.clone(), v)))
                    .collect();
                (!pairs.is_empty()).then_some(Expandable::Pairs(pairs))
            }
            scalar => scalar_text(scalar).map(Expandable::Scalar),
        }
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn expand_expression(out: &mut String, operator: Operator, variables: &[VarSpec], vars: &ParameterMap) {
    let expanded: Vec<String> = variables
        .iter()
        .filter_map(|var| {
            Expandable::from_value(vars.get(&var.name)).map(|value| expand_var(operator, var, value))
        })
        .collect();

    if expanded.is_empty() {
        return;
    }
    out.push_str(operator.first());
    out.push_str(&expanded.join(operator.separator()));
}

fn expand_var(operator: Operator, var: &VarSpec, value: Expandable) -> String {
    let reserved = operator.allow_reserved();
    let named = operator.named();
    let explode = var.modifier == Modifier::Explode;

    match value {
        Expandable::Scalar(text) => {
            let text = match var.modifier {
                Modifier::Prefix(length) => text.chars().take(length).collect(),
                _ => text,
            };
            if named {
                named_value(&var.name, &encode(&text, reserved), operator)
            } else {
                encode(&text, reserved)
            }
        }
        Expandable::List(items) if explode => items
            .iter()
            .map(|item| {
                let item = encode(item, reserved);
                if named {
                    named_value(&var.name, &item, operator)
                } else {
                    item
                }
            })
            .collect::<Vec<_>>()
            .join(operator.separator()),
        Expandable::List(items) => {
            let joined = items
                .iter()
                .map(|item| encode(item, reserved))
                .collect::<Vec<_>>()
                .join(",");
            if named {
                format!("{}={joined}", var.name)
            } else {
                joined
            }
        }
        Expandable::Pairs(pairs) if explode => pairs
            .iter()
            .map(|(key, value)| {
                let key = encode(key, reserved);
                let value = encode(value, reserved);
                if named {
                    named_value(&key, &value, operator)
                } else {
                    format!("{key}={value}")
                }
            })
            .collect::<Vec<_>>()
            .join(operator.separator()),
        Expandable::Pairs(pairs) => {
            let joined = pairs
                .iter()
                .flat_map(|(key, value)| [encode(key, reserved), encode(value, reserved)])
                .collect::<Vec<_>>()
                .join(",");
            if named {
                format!("{}={joined}", var.name)
            } else {
                joined
            }
        }
    }
}

fn named_value(name: &str, encoded: &str, operator: Operator) -> String {
    if encoded.is_empty() {
        format!("{name}{}", operator.if_empty())
    } else {
        format!("{name}={encoded}")
    }
}

fn encode(text: &str, allow_reserved: bool) -> String {
    if !allow_reserved {
        return urlencoding::encode(text).into_owned();
    }

    let mut out = String::with_capacity(text.len());
    for (index, c) in text.char_indices() {
        if c == '%' && is_pct_triplet(&text[index..]) {
            out.push(c);
        } else if c.is_ascii_alphanumeric() || "-._~".contains(c) || RESERVED.contains(c) {
            out.push(c);
        } else {
            let mut buf = [0u8; 4];
            out.push_str(&urlencoding::encode(c.encode_utf8(&mut buf)));
        }
    }
    out
}

fn is_pct_triplet(text: &str) -> bool {
    let bytes = text.as_bytes();
    bytes.len() >= 3 && bytes[1].is_ascii_hexdigit() && bytes[2].is_ascii_hexdigit()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn expand(template: &str, vars: Value) -> String {
        let template = UriTemplate::parse(template).unwrap();
        template.expand(vars.as_object().unwrap())
    }

    fn rfc_vars() -> Value {
        json!({
            "var": "value",
            "hello": "Hello World!",
            "path": "/foo/bar",
            "empty": "",
            "list": ["red", "green", "blue"],
            "keys": {"semi": ";", "dot": ".", "comma": ","},
            "x": "1024",
            "y": "768",
            "undef": null
        })
    }

    #[test]
    fn test_simple_and_reserved_expansion() {
        assert_eq!(expand("{var}", rfc_vars()), "value");
        assert_eq!(expand("{hello}", rfc_vars()), "Hello%20World%21");
        assert_eq!(expand("{+hello}", rfc_vars()), "Hello%20World!");
        assert_eq!(expand("{+path}/here", rfc_vars()), "/foo/bar/here");
        assert_eq!(expand("{x,y}", rfc_vars()), "1024,768");
        assert_eq!(expand("{var:3}", rfc_vars()), "val");
    }

    #[test]
    fn test_operator_expansion() {
        assert_eq!(expand("{#var}", rfc_vars()), "#value");
        assert_eq!(expand("X{.var}", rfc_vars()), "X.value");
        assert_eq!(expand("{/var,x}/here", rfc_vars()), "/value/1024/here");
        assert_eq!(expand("{;x,y,empty}", rfc_vars()), ";x=1024;y=768;empty");
        assert_eq!(expand("{?x,y,empty}", rfc_vars()), "?x=1024&y=768&empty=");
        assert_eq!(expand("?fixed=yes{&x}", rfc_vars()), "?fixed=yes&x=1024");
    }

    #[test]
    fn test_list_and_map_expansion() {
        assert_eq!(expand("{list}", rfc_vars()), "red,green,blue");
        assert_eq!(expand("{list*}", rfc_vars()), "red,green,blue");
        assert_eq!(expand("{/list*}", rfc_vars()), "/red/green/blue");
        assert_eq!(expand("{?list}", rfc_vars()), "?list=red,green,blue");
        assert_eq!(expand("{?list*}", rfc_vars()), "?list=red&list=green&list=blue");
        assert_eq!(expand("{keys}", rfc_vars()), "comma,%2C,dot,.,semi,%3B");
        assert_eq!(expand("{?keys*}", rfc_vars()), "?comma=%2C&dot=.&semi=%3B");
    }

    #[test]
    fn test_undefined_variables_are_skipped() {
        assert_eq!(expand("{?undef,missing}", rfc_vars()), "");
        assert_eq!(expand("{?undef,x}", rfc_vars()), "?x=1024");
        assert_eq!(expand("items/{id}", json!({})), "items/");
        assert_eq!(expand("{?tags}", json!({"tags": []})), "");
    }

    #[test]
    fn test_numbers_and_booleans_render_as_json_text() {
        let vars = json!({"page": 2, "rpp": 10, "draft": false});
        assert_eq!(expand("{?page,rpp,draft}", vars), "?page=2&rpp=10&draft=false");
    }

    #[test]
    fn test_route_style_templates() {
        let vars = json!({
            "searchQuery": "rust lang",
            "page": 1,
            "rpp": 10,
            "sort": "title|asc, date|desc",
            "statuses": ["published", "draft"]
        });
        assert_eq!(
            expand("articles/{?searchQuery,page,rpp,sort,embed,fields,statuses}", vars),
            "articles/?searchQuery=rust%20lang&page=1&rpp=10&sort=title%7Casc%2C%20date%7Cdesc&statuses=published,draft"
        );
    }

    #[test]
    fn test_variables_lists_names_in_order() {
        let template = UriTemplate::parse("a/{id}/{?embed,fields}").unwrap();
        assert_eq!(template.variables(), vec!["id", "embed", "fields"]);
        assert_eq!(template.to_string(), "a/{id}/{?embed,fields}");
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            UriTemplate::parse("articles/{id"),
            Err(CoreError::UnclosedExpression { position: 9, .. })
        ));
        assert!(matches!(
            UriTemplate::parse("{=id}"),
            Err(CoreError::UnsupportedOperator { operator: '=', .. })
        ));
        assert!(matches!(
            UriTemplate::parse("{}"),
            Err(CoreError::InvalidVariable { .. })
        ));
        assert!(matches!(
            UriTemplate::parse("{id:0}"),
            Err(CoreError::InvalidVariable { .. })
        ));
        assert!(matches!(
            UriTemplate::parse("{a b}"),
            Err(CoreError::InvalidVariable { .. })
        ));
    }

    #[test]
    fn test_reserved_expansion_keeps_pct_triplets() {
        assert_eq!(expand("{+v}", json!({"v": "a%20b c"})), "a%20b%20c");
        assert_eq!(expand("{v}", json!({"v": "a%20b"})), "a%2520b");
    }
}
