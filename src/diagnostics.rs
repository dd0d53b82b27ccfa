use serde::Serialize;
use std::fmt;

/// Category of a soft translation failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Producer node tag is not in the supported set.
    UnknownNode,
    /// Producer is known but the linked output has no translation in this category.
    UnsupportedOutput,
    /// Operator, light path query, ramp mode or interpolation not in its table.
    UnknownOperator,
    /// Image texture without a bound image.
    MissingImage,
    /// A rule expected an input socket the node does not declare.
    MissingSocket,
    /// Group node without a node tree.
    MissingGroupTree,
    /// Group body without a usable output.
    MissingGroupOutput,
    /// Link from a group input socket with no binding in scope.
    UnboundGroupInput,
    /// A producer was revisited on the active translation path.
    Cycle,
    /// Translation nested deeper than the configured limit.
    DepthLimit,
    /// A shader was linked where a color, value or vector is expected.
    Coercion,
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::UnknownNode => "unknown node",
            Self::UnsupportedOutput => "unsupported output",
            Self::UnknownOperator => "unknown operator",
            Self::MissingImage => "missing image",
            Self::MissingSocket => "missing socket",
            Self::MissingGroupTree => "missing group tree",
            Self::MissingGroupOutput => "missing group output",
            Self::UnboundGroupInput => "unbound group input",
            Self::Cycle => "cycle",
            Self::DepthLimit => "depth limit",
            Self::Coercion => "coercion",
        };
        f.write_str(s)
    }
}

/// One logged-and-degraded event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    /// Name of the offending source node, when known.
    pub node: Option<String>,
    pub message: String,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node {
            Some(node) => write!(f, "{} at '{}': {}", self.kind, node, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

/// Ordered diagnostic log. Every report is also emitted as a `tracing` warning.
#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    items: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report(&mut self, kind: DiagnosticKind, node: Option<&str>, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(kind = %kind, node = node.unwrap_or("-"), "{message}");
        self.items.push(Diagnostic {
            kind,
            node: node.map(str::to_owned),
            message,
        });
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn as_slice(&self) -> &[Diagnostic] {
        &self.items
    }

    pub fn count(&self, kind: DiagnosticKind) -> usize {
        self.items.iter().filter(|d| d.kind == kind).count()
    }

    /// Drain everything reported so far.
    pub fn take(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.items)
    }
}
