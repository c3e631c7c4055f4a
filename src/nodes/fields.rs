//! Declarative field schemas for node configuration
//!
//! Every node type describes its editable configuration as a list of
//! `FieldSpec`s instead of a bespoke widget per type; the editor renders
//! the schema generically and new node types become registry data.

/// One editable field of a node type
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Key under which the value is stored in the node's data bag
    pub key: &'static str,
    /// Label shown above the widget
    pub label: &'static str,
    pub kind: FieldKind,
    /// Initial value; a `{n}` placeholder is replaced with the instance
    /// ordinal at creation time (e.g. `input_{n}` -> `input_2`)
    pub default: &'static str,
}

/// Widget variant for a field
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Dropdown over `(value, label)` pairs; the stored value is the key
    Select(&'static [(&'static str, &'static str)]),
    /// Single-line text input
    Text { placeholder: &'static str },
    /// Multi-line text input
    TextArea { placeholder: &'static str },
    /// File path picked through the native file dialog
    File,
}

impl FieldSpec {
    /// Resolves the default value for instance ordinal `n`
    pub fn default_for(&self, n: usize) -> String {
        self.default.replace("{n}", &n.to_string())
    }

    /// Human-readable label for a stored select value, falling back to the
    /// raw value for free-form fields
    pub fn display_label<'a>(&self, value: &'a str) -> &'a str {
        if let FieldKind::Select(options) = self.kind {
            for (key, label) in options {
                if *key == value {
                    return label;
                }
            }
        }
        value
    }
}

pub const DATA_TYPES: &[(&str, &str)] = &[
    ("text", "Text"),
    ("number", "Number"),
    ("file", "File"),
    ("image", "Image"),
    ("audio", "Audio"),
    ("video", "Video"),
    ("json", "JSON"),
    ("csv", "CSV"),
    ("boolean", "Boolean"),
];

pub const MATH_OPERATIONS: &[(&str, &str)] = &[
    ("add", "Add"),
    ("subtract", "Subtract"),
    ("multiply", "Multiply"),
    ("divide", "Divide"),
    ("power", "Power"),
    ("sqrt", "Square Root"),
    ("log", "Logarithm"),
    ("mod", "Modulo"),
];

pub const FILTER_OPERATIONS: &[(&str, &str)] = &[
    ("equals", "Equals"),
    ("contains", "Contains"),
    ("startsWith", "Starts With"),
    ("endsWith", "Ends With"),
    ("greaterThan", "Greater Than"),
    ("lessThan", "Less Than"),
    ("between", "Between"),
    ("regex", "Regular Expression"),
];

pub const LLM_MODELS: &[(&str, &str)] = &[
    ("gpt-4", "GPT-4"),
    ("gpt-3.5-turbo", "GPT-3.5 Turbo"),
    ("claude-3-opus", "Claude 3 Opus"),
    ("claude-3-sonnet", "Claude 3 Sonnet"),
    ("gemini-pro", "Gemini Pro"),
    ("mistral-large", "Mistral Large"),
    ("llama-2", "Llama 2"),
];

pub const LOG_LEVELS: &[(&str, &str)] = &[
    ("info", "Info"),
    ("warning", "Warning"),
    ("error", "Error"),
    ("debug", "Debug"),
    ("trace", "Trace"),
];

pub const LANGUAGES: &[(&str, &str)] = &[
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("de", "German"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("zh", "Chinese"),
    ("ja", "Japanese"),
    ("ko", "Korean"),
    ("ar", "Arabic"),
    ("hi", "Hindi"),
];
