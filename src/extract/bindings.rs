//! Binding classification produced by fragment analysis

use serde::Serialize;

/// Insertion-ordered set of names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BindingSet(Vec<String>);

impl BindingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a name; returns false if it was already present
    pub fn insert(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.0.push(name.to_string());
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|existing| existing == name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<'a> FromIterator<&'a str> for BindingSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for name in iter {
            set.insert(name);
        }
        set
    }
}

impl<'a> IntoIterator for &'a BindingSet {
    type Item = &'a str;
    type IntoIter = std::iter::Map<std::slice::Iter<'a, String>, fn(&'a String) -> &'a str>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter().map(String::as_str as fn(&'a String) -> &'a str)
    }
}

/// The four binding categories found in an extracted fragment
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Bindings {
    /// Free identifiers, passed in from the extraction site's local scope
    pub argument_props: BindingSet,
    /// Names read through `this.props.<name>`
    pub member_props: BindingSet,
    /// Names read through `this.state.<name>`, passed down as props
    pub state: BindingSet,
    /// Names read through `this.<name>`, passed down as props
    pub component_members: BindingSet,
}

impl Bindings {
    /// Anything that can only be reached through the instance
    pub fn needs_instance(&self) -> bool {
        !self.state.is_empty() || !self.member_props.is_empty() || !self.component_members.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.argument_props.is_empty() && !self.needs_instance()
    }
}
