//! Minimal XML element tree used to assemble and render test plans.

/// An XML element with ordered attributes, optional text and children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    name: String,
    attributes: Vec<(String, String)>,
    text: Option<String>,
    children: Vec<Element>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            text: None,
            children: Vec::new(),
        }
    }

    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(key, value);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set an attribute, replacing any previous value for the same key.
    pub fn set_attr(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.attributes.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((key, value)),
        }
    }

    pub fn add(&mut self, child: Element) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First direct child with the given tag and `name` attribute.
    pub fn prop(&self, name: &str) -> Option<&Element> {
        self.children
            .iter()
            .find(|child| child.attr("name") == Some(name))
    }

    /// All descendants with the given tag, depth first in document order.
    pub fn descendants(&self, tag: &str) -> Vec<&Element> {
        let mut found = Vec::new();
        self.collect_descendants(tag, &mut found);
        found
    }

    fn collect_descendants<'a>(&'a self, tag: &str, found: &mut Vec<&'a Element>) {
        for child in &self.children {
            if child.name == tag {
                found.push(child);
            }
            child.collect_descendants(tag, found);
        }
    }

    pub fn to_xml(&self) -> String {
        let mut out = String::new();
        self.write_xml(&mut out, 0);
        out
    }

    fn write_xml(&self, out: &mut String, depth: usize) {
        let indent = "  ".repeat(depth);
        out.push_str(&indent);
        out.push('<');
        out.push_str(&self.name);
        for (key, value) in &self.attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(&escape(value));
            out.push('"');
        }

        if self.children.is_empty() {
            match &self.text {
                Some(text) => {
                    out.push('>');
                    out.push_str(&escape(text));
                    out.push_str("</");
                    out.push_str(&self.name);
                    out.push_str(">\n");
                }
                None => out.push_str("/>\n"),
            }
            return;
        }

        out.push_str(">\n");
        if let Some(text) = &self.text {
            out.push_str(&indent);
            out.push_str("  ");
            out.push_str(&escape(text));
            out.push('\n');
        }
        for child in &self.children {
            child.write_xml(out, depth + 1);
        }
        out.push_str(&indent);
        out.push_str("</");
        out.push_str(&self.name);
        out.push_str(">\n");
    }
}

fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

pub fn string_prop(name: &str, value: impl Into<String>) -> Element {
    Element::new("stringProp")
        .with_attr("name", name)
        .with_text(value)
}

pub fn bool_prop(name: &str, value: bool) -> Element {
    Element::new("boolProp")
        .with_attr("name", name)
        .with_text(value.to_string())
}

pub fn int_prop(name: &str, value: i64) -> Element {
    Element::new("intProp")
        .with_attr("name", name)
        .with_text(value.to_string())
}

pub fn collection_prop(name: &str, items: Vec<Element>) -> Element {
    let mut collection = Element::new("collectionProp").with_attr("name", name);
    for item in items {
        collection.add(item);
    }
    collection
}

pub fn element_prop(name: &str, element_type: &str) -> Element {
    Element::new("elementProp")
        .with_attr("name", name)
        .with_attr("elementType", element_type)
}

/// A JMeter test element paired with the `hashTree` holding its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestElement {
    element: Element,
    children: Vec<TestElement>,
}

impl TestElement {
    pub fn new(tag: &str, guiclass: &str, testclass: &str, testname: &str) -> Self {
        let element = Element::new(tag)
            .with_attr("guiclass", guiclass)
            .with_attr("testclass", testclass)
            .with_attr("testname", testname)
            .with_attr("enabled", "true");
        Self {
            element,
            children: Vec::new(),
        }
    }

    /// Add a property (or any nested element) to the element itself.
    pub fn prop(&mut self, prop: Element) -> &mut Self {
        self.element.add(prop);
        self
    }

    /// Append a child test element to this element's hash tree.
    pub fn put(&mut self, child: TestElement) -> &mut Self {
        self.children.push(child);
        self
    }

    pub fn element(&self) -> &Element {
        &self.element
    }

    /// Write the element and its hash tree into `tree`.
    pub fn write_into(self, tree: &mut Element) {
        tree.add(self.element);
        let mut hash_tree = Element::new("hashTree");
        for child in self.children {
            child.write_into(&mut hash_tree);
        }
        tree.add(hash_tree);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_empty_element_self_closing() {
        assert_eq!(Element::new("hashTree").to_xml(), "<hashTree/>\n");
    }

    #[test]
    fn renders_text_and_escapes() {
        let xml = string_prop("Argument.value", "{\"a\":1} & <b>").to_xml();
        assert_eq!(
            xml,
            "<stringProp name=\"Argument.value\">{&quot;a&quot;:1} &amp; &lt;b&gt;</stringProp>\n"
        );
    }

    #[test]
    fn empty_text_is_not_self_closing() {
        assert_eq!(
            string_prop("TestPlan.comments", "").to_xml(),
            "<stringProp name=\"TestPlan.comments\"></stringProp>\n"
        );
    }

    #[test]
    fn renders_nested_children_indented() {
        let mut root = Element::new("root").with_attr("v", "1");
        root.add(bool_prop("flag", true));
        root.add(Element::new("empty"));

        assert_eq!(
            root.to_xml(),
            "<root v=\"1\">\n  <boolProp name=\"flag\">true</boolProp>\n  <empty/>\n</root>\n"
        );
    }

    #[test]
    fn set_attr_replaces_existing_value() {
        let mut element = Element::new("a").with_attr("k", "1");
        element.set_attr("k", "2");
        assert_eq!(element.attr("k"), Some("2"));
        assert_eq!(element.to_xml(), "<a k=\"2\"/>\n");
    }

    #[test]
    fn test_element_writes_sibling_hash_tree() {
        let mut parent = TestElement::new("ThreadGroup", "ThreadGroupGui", "ThreadGroup", "tg");
        parent.put(TestElement::new("DurationAssertion", "DurationAssertionGui", "DurationAssertion", "d"));

        let mut tree = Element::new("hashTree");
        parent.write_into(&mut tree);

        let names: Vec<_> = tree.children().iter().map(Element::name).collect();
        assert_eq!(names, vec!["ThreadGroup", "hashTree"]);
        let inner: Vec<_> = tree.children()[1].children().iter().map(Element::name).collect();
        assert_eq!(inner, vec!["DurationAssertion", "hashTree"]);
    }

    #[test]
    fn descendants_in_document_order() {
        let mut root = Element::new("root");
        let mut a = Element::new("item").with_attr("name", "a");
        a.add(Element::new("item").with_attr("name", "b"));
        root.add(a);
        root.add(Element::new("item").with_attr("name", "c"));

        let names: Vec<_> = root
            .descendants("item")
            .iter()
            .map(|e| e.attr("name").unwrap())
            .collect();
        assert_eq!(names, vec!["a", "b", "c"]);
    }
}
