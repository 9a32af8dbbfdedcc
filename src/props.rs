use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use serde_json::Number;

pub type Properties = HashMap<String, PropertyValue>;

/// A page property, discriminated by its `type` key.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title {
        #[serde(default)]
        title: Vec<RichText>,
    },
    RichText {
        #[serde(default)]
        rich_text: Vec<RichText>,
    },
    Number {
        #[serde(default)]
        number: Option<Number>,
    },
    Url {
        #[serde(default)]
        url: Option<String>,
    },
    Select {
        #[serde(default)]
        select: Option<SelectOption>,
    },
    MultiSelect {
        #[serde(default)]
        multi_select: Vec<SelectOption>,
    },
    Checkbox {
        #[serde(default)]
        checkbox: bool,
    },
    Formula {
        #[serde(default)]
        formula: FormulaResult,
    },
    /// date, people, relation, rollup, files, ...
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub text: Option<TextContent>,
    #[serde(default)]
    pub plain_text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TextContent {
    #[serde(default)]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SelectOption {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormulaResult {
    #[serde(default)]
    pub number: Option<Number>,
    #[serde(default)]
    pub string: Option<String>,
}

/// Canonical value pulled out of a property.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(Number),
    Bool(bool),
}

impl Scalar {
    /// Empty text, zero and `false` count as "not set" when assembling lines.
    pub fn is_truthy(&self) -> bool {
        match self {
            Scalar::Text(s) => !s.is_empty(),
            Scalar::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
            Scalar::Bool(b) => *b,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Scalar::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Sort key for year columns; anything unparseable is year 0.
    pub fn year_key(&self) -> i64 {
        match self {
            Scalar::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
                .unwrap_or(0),
            Scalar::Text(s) => s.trim().parse().unwrap_or(0),
            Scalar::Bool(_) => 0,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Text(s) => f.write_str(s),
            Scalar::Number(n) => write!(f, "{}", n),
            Scalar::Bool(b) => write!(f, "{}", b),
        }
    }
}

fn join_runs(runs: &[RichText]) -> Option<Scalar> {
    let joined: String = runs
        .iter()
        .map(|run| match (&run.text, &run.plain_text) {
            (Some(t), _) => t.content.as_str(),
            (None, Some(plain)) => plain.as_str(),
            (None, None) => "",
        })
        .collect();
    if joined.is_empty() {
        None
    } else {
        Some(Scalar::Text(joined))
    }
}

/// Extract the canonical value of `key`, or `None` when the field is absent.
pub fn get_prop(props: &Properties, key: &str) -> Option<Scalar> {
    match props.get(key)? {
        PropertyValue::Title { title } => join_runs(title),
        PropertyValue::RichText { rich_text } => join_runs(rich_text),
        PropertyValue::Number { number } => number.clone().map(Scalar::Number),
        PropertyValue::Url { url } => url.clone().map(Scalar::Text),
        PropertyValue::Select { select } => select.as_ref().map(|s| Scalar::Text(s.name.clone())),
        PropertyValue::MultiSelect { multi_select } => Some(Scalar::Text(
            multi_select
                .iter()
                .map(|m| m.name.as_str())
                .collect::<Vec<_>>()
                .join(", "),
        )),
        PropertyValue::Checkbox { checkbox } => Some(Scalar::Bool(*checkbox)),
        PropertyValue::Formula { formula } => formula
            .number
            .clone()
            .map(Scalar::Number)
            .or_else(|| formula.string.clone().map(Scalar::Text)),
        PropertyValue::Unknown => None,
    }
}

/// Like [`get_prop`], rendered as text.
pub fn get_text(props: &Properties, key: &str) -> Option<String> {
    get_prop(props, key).map(|v| v.to_string())
}

// ── Tests ──
