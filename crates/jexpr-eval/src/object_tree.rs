use jexpr_types::{Type, Value};

/// A named entry of the custom hierarchy, addressed as `{Top#Child#Leaf}`.
///
/// Nodes without a value only group children; naming one as the last segment is an error.
#[derive(Debug, Clone)]
pub struct ObjectTreeNode {
    name: String,
    value: Option<(Value, Type)>,
    children: Vec<ObjectTreeNode>,
}

impl ObjectTreeNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            children: Vec::new(),
        }
    }

    /// The unnamed root whose children are the top-level nodes.
    pub fn root(children: Vec<ObjectTreeNode>) -> Self {
        Self {
            name: String::new(),
            value: None,
            children,
        }
    }

    pub fn with_value(mut self, value: Value, declared_type: Type) -> Self {
        self.value = Some((value, declared_type));
        self
    }

    pub fn with_child(mut self, child: ObjectTreeNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> Option<&(Value, Type)> {
        self.value.as_ref()
    }

    pub fn children(&self) -> &[ObjectTreeNode] {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&ObjectTreeNode> {
        self.children.iter().find(|child| child.name == name)
    }
}
