//! Component synthesis
//!
//! Renders a rewritten fragment body plus its bindings into a component
//! definition. A function component is emitted whenever the fragment only
//! uses argument bindings; any instance binding forces a class component.

use serde::Serialize;

use super::bindings::{BindingSet, Bindings};
use crate::detectors::shape::ComponentShape;

/// Base class of generated class components
pub const COMPONENT_BASE: &str = "React.Component";

const INDENT: &str = "  ";

/// A component ready to be rendered to source text
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComponentDefinition {
    pub name: String,
    pub body: String,
    pub shape: ComponentShape,
    pub bindings: Bindings,
}

impl ComponentDefinition {
    /// Pick the smallest shape that can express `bindings`
    pub fn new(name: impl Into<String>, body: impl Into<String>, bindings: Bindings) -> Self {
        let shape = if bindings.needs_instance() {
            ComponentShape::Class
        } else {
            ComponentShape::Function
        };

        Self {
            name: name.into(),
            body: body.into(),
            shape,
            bindings,
        }
    }

    pub fn render(&self) -> String {
        match self.shape {
            ComponentShape::Function => self.render_function(),
            ComponentShape::Class => self.render_class(),
        }
    }

    fn render_function(&self) -> String {
        let level = INDENT;
        format!(
            "function {}({}) {{\n{level}return {};\n}}",
            self.name,
            object_pattern(&self.bindings.argument_props, ""),
            reindent(&self.body, level),
        )
    }

    fn render_class(&self) -> String {
        let level = INDENT.repeat(2);
        let mut render = String::new();

        if !self.bindings.argument_props.is_empty() {
            render.push_str(&format!(
                "{level}const {} = this.props;\n",
                object_pattern(&self.bindings.argument_props, &level)
            ));
        }
        render.push_str(&format!("{level}return {};\n", reindent(&self.body, &level)));

        format!(
            "class {} extends {} {{\n{INDENT}render() {{\n{render}{INDENT}}}\n\n}}",
            self.name, COMPONENT_BASE
        )
    }
}

/// Render a component definition for `name` around `body`
pub fn build_component(name: &str, body: &str, bindings: &Bindings) -> String {
    ComponentDefinition::new(name, body, bindings.clone()).render()
}

/// `{}` or a multi-line `{ a, b }` destructuring pattern at `indent`
fn object_pattern(names: &BindingSet, indent: &str) -> String {
    if names.is_empty() {
        return "{}".to_string();
    }

    let entries: Vec<String> = names
        .iter()
        .map(|name| format!("{indent}{INDENT}{name}"))
        .collect();
    format!("{{\n{}\n{indent}}}", entries.join(",\n"))
}

/// Shift the continuation lines of `body` so the least indented one sits at
/// `indent`. The first line follows `return ` and is left alone.
fn reindent(body: &str, indent: &str) -> String {
    let mut lines = body.lines();
    let Some(first) = lines.next() else {
        return String::new();
    };
    let rest: Vec<&str> = lines.collect();

    let common = rest
        .iter()
        .filter(|line| !line.trim().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let mut out = first.to_string();
    for line in rest {
        out.push('\n');
        if !line.trim().is_empty() {
            out.push_str(indent);
            out.push_str(line.get(common..).unwrap_or_else(|| line.trim_start()));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(args: &[&str], members: &[&str]) -> Bindings {
        Bindings {
            argument_props: args.iter().copied().collect(),
            component_members: members.iter().copied().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_function_component() {
        let text = build_component("Source", "<div>{foo}</div>", &bindings(&["foo"], &[]));
        assert_eq!(text, "function Source({\n  foo\n}) {\n  return <div>{foo}</div>;\n}");
    }

    #[test]
    fn test_function_component_without_bindings() {
        let text = build_component("Logo", "<img src=\"logo.svg\" />", &Bindings::default());
        assert_eq!(text, "function Logo({}) {\n  return <img src=\"logo.svg\" />;\n}");
    }

    #[test]
    fn test_function_component_lists_every_argument() {
        let text = build_component("Row", "<tr>{a}{b}</tr>", &bindings(&["a", "b"], &[]));
        assert_eq!(text, "function Row({\n  a,\n  b\n}) {\n  return <tr>{a}{b}</tr>;\n}");
    }

    #[test]
    fn test_class_component_without_arguments() {
        let mut bindings = Bindings::default();
        bindings.member_props.insert("foo");
        let text = build_component("Source", "<div>{this.props.foo}</div>", &bindings);
        assert_eq!(
            text,
            "class Source extends React.Component {\n  render() {\n    return <div>{this.props.foo}</div>;\n  }\n\n}"
        );
    }

    #[test]
    fn test_class_component_destructures_arguments() {
        let text = build_component(
            "Source",
            "<Wrapper bar={bar}>{this.props.foo}</Wrapper>",
            &bindings(&["bar"], &["foo"]),
        );
        assert_eq!(
            text,
            "class Source extends React.Component {\n  render() {\n    const {\n      bar\n    } = this.props;\n    return <Wrapper bar={bar}>{this.props.foo}</Wrapper>;\n  }\n\n}"
        );
    }

    #[test]
    fn test_shape_selection() {
        assert_eq!(
            ComponentDefinition::new("A", "<a />", bindings(&["x"], &[])).shape,
            ComponentShape::Function
        );
        assert_eq!(
            ComponentDefinition::new("A", "<a />", bindings(&["x"], &["y"])).shape,
            ComponentShape::Class
        );
    }

    #[test]
    fn test_multiline_body_is_reindented() {
        let body = "<ul>\n            <li>{item}</li>\n          </ul>";
        let text = build_component("List", body, &bindings(&["item"], &[]));
        assert_eq!(
            text,
            "function List({\n  item\n}) {\n  return <ul>\n    <li>{item}</li>\n  </ul>;\n}"
        );
    }
}
