//! Positional argument definition

/// A positional argument, bound by position rather than by name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Argument {
    pub name: String,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    /// Applied by actions through `CommandContext::argument_or_default`,
    /// never written into the bound arguments by the dispatcher
    pub default: String,
}

impl Argument {
    /// A required argument with no default
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: true,
            optional: false,
            default: String::new(),
        }
    }

    /// An optional argument that falls back to `default`
    pub fn optional(
        name: impl Into<String>,
        description: impl Into<String>,
        default: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: false,
            optional: true,
            default: default.into(),
        }
    }

    /// Whether the dispatcher must reject an invocation that leaves this unbound
    pub fn is_mandatory(&self) -> bool {
        self.required && !self.optional
    }
}
