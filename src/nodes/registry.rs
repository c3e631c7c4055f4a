//! Static registry of pipeline node types
//!
//! The registry is built once at process start and never mutated at
//! runtime. Lookups by unknown type id are reported and yield `None`; the
//! caller treats that as a skip, not an error.

use super::fields::{
    FieldKind, FieldSpec, DATA_TYPES, FILTER_OPERATIONS, LANGUAGES, LLM_MODELS, LOG_LEVELS,
    MATH_OPERATIONS,
};
use crate::theme::accent;
use egui::Color32;
use log::warn;
use once_cell::sync::Lazy;

/// Immutable description of a node type: ports, label, editable fields and
/// the accent color used when rendering instances of it.
#[derive(Debug, Clone, Copy)]
pub struct NodeTypeDefinition {
    pub type_id: &'static str,
    pub label: &'static str,
    pub description: &'static str,
    pub inputs: &'static [&'static str],
    pub outputs: &'static [&'static str],
    pub fields: &'static [FieldSpec],
    pub accent: Color32,
}

static DEFINITIONS: &[NodeTypeDefinition] = &[
    NodeTypeDefinition {
        type_id: "InputNode",
        label: "Input",
        description: "Pass data of different types into your workflow",
        inputs: &[],
        outputs: &["output"],
        fields: &[
            FieldSpec {
                key: "inputName",
                label: "Name",
                kind: FieldKind::Text {
                    placeholder: "Input name...",
                },
                default: "input_{n}",
            },
            FieldSpec {
                key: "inputType",
                label: "Type",
                kind: FieldKind::Select(DATA_TYPES),
                default: "text",
            },
        ],
        accent: accent::INPUT,
    },
    NodeTypeDefinition {
        type_id: "TextNode",
        label: "Text",
        description: "Create and edit text content for your workflow",
        inputs: &[],
        outputs: &["text"],
        fields: &[FieldSpec {
            key: "text",
            label: "Text",
            kind: FieldKind::TextArea {
                placeholder: "Enter text...",
            },
            default: "",
        }],
        accent: accent::TEXT,
    },
    NodeTypeDefinition {
        type_id: "LLMNode",
        label: "LLM",
        description: "Process text using large language models",
        inputs: &["prompt"],
        outputs: &["response"],
        fields: &[
            FieldSpec {
                key: "model",
                label: "Model",
                kind: FieldKind::Select(LLM_MODELS),
                default: "gpt-4",
            },
            FieldSpec {
                key: "systemPrompt",
                label: "System Prompt",
                kind: FieldKind::TextArea {
                    placeholder: "Enter system prompt...",
                },
                default: "",
            },
        ],
        accent: accent::LLM,
    },
    NodeTypeDefinition {
        type_id: "OutputNode",
        label: "Output",
        description: "Export data from your workflow",
        inputs: &["input"],
        outputs: &[],
        fields: &[
            FieldSpec {
                key: "outputName",
                label: "Name",
                kind: FieldKind::Text {
                    placeholder: "Output name...",
                },
                default: "output_{n}",
            },
            FieldSpec {
                key: "outputType",
                label: "Type",
                kind: FieldKind::Select(DATA_TYPES),
                default: "text",
            },
        ],
        accent: accent::OUTPUT,
    },
    NodeTypeDefinition {
        type_id: "MathNode",
        label: "Math Operation",
        description: "Perform mathematical operations on numeric inputs",
        inputs: &["value1", "value2"],
        outputs: &["result"],
        fields: &[FieldSpec {
            key: "operation",
            label: "Operation",
            kind: FieldKind::Select(MATH_OPERATIONS),
            default: "add",
        }],
        accent: accent::MATH,
    },
    NodeTypeDefinition {
        type_id: "PromptNode",
        label: "Prompt Template",
        description: "Create dynamic prompt templates with variables",
        inputs: &["variables"],
        outputs: &["prompt"],
        fields: &[FieldSpec {
            key: "promptTemplate",
            label: "Template",
            kind: FieldKind::TextArea {
                placeholder: "Enter prompt template...",
            },
            default: "",
        }],
        accent: accent::PROMPT,
    },
    NodeTypeDefinition {
        type_id: "ImageNode",
        label: "Image Processing",
        description: "Upload and process images in your workflow",
        inputs: &["image"],
        outputs: &["processed"],
        fields: &[FieldSpec {
            key: "image",
            label: "Image",
            kind: FieldKind::File,
            default: "",
        }],
        accent: accent::IMAGE,
    },
    NodeTypeDefinition {
        type_id: "FilterNode",
        label: "Filter",
        description: "Filter data based on conditions",
        inputs: &["data"],
        outputs: &["filtered", "rejected"],
        fields: &[
            FieldSpec {
                key: "operation",
                label: "Operation",
                kind: FieldKind::Select(FILTER_OPERATIONS),
                default: "equals",
            },
            FieldSpec {
                key: "condition",
                label: "Condition",
                kind: FieldKind::Text {
                    placeholder: "Enter filter condition...",
                },
                default: "",
            },
        ],
        accent: accent::FILTER,
    },
    NodeTypeDefinition {
        type_id: "LoggerNode",
        label: "Logger",
        description: "Log data with different severity levels",
        inputs: &["data"],
        outputs: &["logged"],
        fields: &[
            FieldSpec {
                key: "logLevel",
                label: "Level",
                kind: FieldKind::Select(LOG_LEVELS),
                default: "info",
            },
            FieldSpec {
                key: "prefix",
                label: "Prefix",
                kind: FieldKind::Text {
                    placeholder: "Log prefix...",
                },
                default: "",
            },
        ],
        accent: accent::LOGGER,
    },
    NodeTypeDefinition {
        type_id: "TranslationNode",
        label: "Translation",
        description: "Translate text to different languages",
        inputs: &["text"],
        outputs: &["translatedText"],
        fields: &[FieldSpec {
            key: "targetLanguage",
            label: "Target Language",
            kind: FieldKind::Select(LANGUAGES),
            default: "es",
        }],
        accent: accent::TRANSLATION,
    },
];

/// Registry of all node types available in the editor
pub struct NodeRegistry {
    definitions: &'static [NodeTypeDefinition],
}

static REGISTRY: Lazy<NodeRegistry> = Lazy::new(|| NodeRegistry {
    definitions: DEFINITIONS,
});

impl NodeRegistry {
    /// The process-wide registry instance
    pub fn global() -> &'static NodeRegistry {
        &REGISTRY
    }

    /// Looks up a type definition; a miss is logged and returns `None`
    pub fn lookup(&self, type_id: &str) -> Option<&'static NodeTypeDefinition> {
        let found = self.definitions.iter().find(|d| d.type_id == type_id);
        if found.is_none() {
            warn!("no definition registered for node type '{}'", type_id);
        }
        found
    }

    /// All definitions, in registration order (toolbar display order)
    pub fn definitions(&self) -> &'static [NodeTypeDefinition] {
        self.definitions
    }
}
