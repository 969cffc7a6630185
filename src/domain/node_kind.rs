//! Categories of code entities carried by semantic graph records.

/// Entity category of a graph node, parsed from its wire string.
///
/// Unrecognized categories are preserved verbatim in [`NodeKind::Other`] so
/// records written by newer indexers still load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    File,
    Package,
    PackageObject,
    Class,
    Trait,
    Object,
    Method,
    Constructor,
    Function,
    Value,
    Variable,
    Type,
    TypeParameter,
    Parameter,
    Macro,
    Other(String),
}

impl NodeKind {
    /// Parse the wire representation, e.g. `"CLASS"` or `"PACKAGE_OBJECT"`.
    pub fn from_wire(raw: &str) -> NodeKind {
        match raw {
            "FILE" => NodeKind::File,
            "PACKAGE" => NodeKind::Package,
            "PACKAGE_OBJECT" => NodeKind::PackageObject,
            "CLASS" => NodeKind::Class,
            "TRAIT" => NodeKind::Trait,
            "OBJECT" => NodeKind::Object,
            "METHOD" => NodeKind::Method,
            "CONSTRUCTOR" => NodeKind::Constructor,
            "FUNCTION" => NodeKind::Function,
            "VALUE" => NodeKind::Value,
            "VARIABLE" => NodeKind::Variable,
            "TYPE" => NodeKind::Type,
            "TYPE_PARAMETER" => NodeKind::TypeParameter,
            "PARAMETER" => NodeKind::Parameter,
            "MACRO" => NodeKind::Macro,
            other => NodeKind::Other(other.to_string()),
        }
    }

    /// Structural kinds describe containers rather than code entities and
    /// never appear in the rendered graph.
    pub fn is_structural(&self) -> bool {
        matches!(self, NodeKind::File | NodeKind::PackageObject)
    }

    /// Wire name of the kind.
    pub fn name(&self) -> &str {
        match self {
            NodeKind::File => "FILE",
            NodeKind::Package => "PACKAGE",
            NodeKind::PackageObject => "PACKAGE_OBJECT",
            NodeKind::Class => "CLASS",
            NodeKind::Trait => "TRAIT",
            NodeKind::Object => "OBJECT",
            NodeKind::Method => "METHOD",
            NodeKind::Constructor => "CONSTRUCTOR",
            NodeKind::Function => "FUNCTION",
            NodeKind::Value => "VALUE",
            NodeKind::Variable => "VARIABLE",
            NodeKind::Type => "TYPE",
            NodeKind::TypeParameter => "TYPE_PARAMETER",
            NodeKind::Parameter => "PARAMETER",
            NodeKind::Macro => "MACRO",
            NodeKind::Other(raw) => raw,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
