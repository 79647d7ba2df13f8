//! Instantiation markup for an extracted component

use super::bindings::Bindings;

/// Build the self-closing tag that renders `name` from the extraction site.
///
/// Attributes come in category order (state, arguments, member props,
/// component members), each category in the order its names were found.
pub fn instantiate(name: &str, bindings: &Bindings) -> String {
    let attributes: Vec<String> = bindings
        .state
        .iter()
        .map(|prop| format!("{prop}={{this.state.{prop}}}"))
        .chain(
            bindings
                .argument_props
                .iter()
                .map(|prop| format!("{prop}={{{prop}}}")),
        )
        .chain(
            bindings
                .member_props
                .iter()
                .map(|prop| format!("{prop}={{this.props.{prop}}}")),
        )
        .chain(
            bindings
                .component_members
                .iter()
                .map(|prop| format!("{prop}={{this.{prop}}}")),
        )
        .collect();

    if attributes.is_empty() {
        format!("<{} />", name)
    } else {
        format!("<{} {} />", name, attributes.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_order_follows_categories() {
        let mut bindings = Bindings::default();
        bindings.component_members.insert("onSave");
        bindings.member_props.insert("user");
        bindings.argument_props.insert("index");
        bindings.state.insert("draft");

        assert_eq!(
            instantiate("Editor", &bindings),
            "<Editor draft={this.state.draft} index={index} user={this.props.user} onSave={this.onSave} />"
        );
    }

    #[test]
    fn test_insertion_order_within_category() {
        let mut bindings = Bindings::default();
        bindings.argument_props.insert("zeta");
        bindings.argument_props.insert("alpha");
        assert_eq!(
            instantiate("Pair", &bindings),
            "<Pair zeta={zeta} alpha={alpha} />"
        );
    }

    #[test]
    fn test_no_bindings() {
        assert_eq!(instantiate("Divider", &Bindings::default()), "<Divider />");
    }
}
