//! Parameter descriptors
//!
//! Describe how a consumer should render, label and validate one positional
//! input of an operation.

use serde::Serialize;

/// Input flavour of a text-like parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextKind {
    Text,
    Number,
    Email,
    Password,
}

/// One selectable option of a choice parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    /// Text shown to the operator
    pub text: &'static str,
    /// Value passed to the operation
    pub value: &'static str,
}

impl ChoiceOption {
    pub const fn new(text: &'static str, value: &'static str) -> Self {
        Self { text, value }
    }
}

/// How to collect one input value
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ParamDescriptor {
    #[serde(rename = "text")]
    TextLike { subtype: TextKind, required: bool },
    Choice {
        multiple: bool,
        required: bool,
        options: Vec<ChoiceOption>,
    },
}

impl ParamDescriptor {
    pub fn required(&self) -> bool {
        match self {
            ParamDescriptor::TextLike { required, .. } | ParamDescriptor::Choice { required, .. } => {
                *required
            }
        }
    }
}

/// A labelled parameter, in the positional order the operation expects
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Param {
    pub label: &'static str,
    #[serde(flatten)]
    pub descriptor: ParamDescriptor,
}

impl Param {
    pub fn text(label: &'static str, subtype: TextKind, required: bool) -> Self {
        Self {
            label,
            descriptor: ParamDescriptor::TextLike { subtype, required },
        }
    }

    pub fn choice(
        label: &'static str,
        multiple: bool,
        required: bool,
        options: &[ChoiceOption],
    ) -> Self {
        Self {
            label,
            descriptor: ParamDescriptor::Choice {
                multiple,
                required,
                options: options.to_vec(),
            },
        }
    }

    pub fn required(&self) -> bool {
        self.descriptor.required()
    }
}
