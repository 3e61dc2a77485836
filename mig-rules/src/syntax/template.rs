//! Angular HTML templates.

use matmig_core::Span;
use tree_sitter::{Node, Parser};

use super::{node_span, node_text, parse_binding, preorder};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateAttribute {
    /// Attribute name as written, binding syntax included (`[value]`, `(change)`).
    pub name: String,
    pub name_span: Span,
    pub value: Option<String>,
    /// Span of the value without quotes.
    pub value_span: Option<Span>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateElement {
    pub tag: String,
    /// Spans of the tag name in the start tag and, if present, the end tag.
    pub tag_spans: Vec<Span>,
    pub attributes: Vec<TemplateAttribute>,
}

impl TemplateElement {
    /// Attribute names with binding syntax removed.
    pub fn bound_names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| parse_binding(&a.name).name)
    }
}

/// A parsed template. All spans are absolute offsets in the containing file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Template {
    pub elements: Vec<TemplateElement>,
    /// Contents of `<style>` elements.
    pub styles: Vec<Span>,
}

impl Template {
    /// Parse template text located at `base` in its file.
    pub fn parse(text: &str, base: usize) -> Option<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_html::LANGUAGE.into())
            .ok()?;
        let tree = parser.parse(text, None)?;

        let mut template = Template::default();
        for node in preorder(tree.root_node()) {
            match node.kind() {
                "element" | "script_element" | "style_element" => {
                    if let Some(element) = read_element(node, text, base) {
                        template.elements.push(element);
                    }
                    if node.kind() == "style_element" {
                        let mut cursor = node.walk();
                        template.styles.extend(
                            node.named_children(&mut cursor)
                                .filter(|c| c.kind() == "raw_text")
                                .map(|c| node_span(c).offset(base)),
                        );
                    }
                }
                _ => {}
            }
        }

        Some(template)
    }
}

fn read_element(node: Node<'_>, text: &str, base: usize) -> Option<TemplateElement> {
    let mut element: Option<TemplateElement> = None;
    let mut end_tag: Option<Span> = None;

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "start_tag" | "self_closing_tag" => {
                let mut tag_cursor = child.walk();
                let mut tag = None;
                let mut attributes = Vec::new();
                for part in child.named_children(&mut tag_cursor) {
                    match part.kind() {
                        "tag_name" => tag = Some(part),
                        "attribute" => attributes.extend(read_attribute(part, text, base)),
                        _ => {}
                    }
                }
                let tag = tag?;
                element = Some(TemplateElement {
                    tag: node_text(tag, text).to_string(),
                    tag_spans: vec![node_span(tag).offset(base)],
                    attributes,
                });
            }
            "end_tag" => {
                let mut tag_cursor = child.walk();
                end_tag = child
                    .named_children(&mut tag_cursor)
                    .find(|c| c.kind() == "tag_name")
                    .map(|t| node_span(t).offset(base));
            }
            _ => {}
        }
    }

    let mut element = element?;
    element.tag_spans.extend(end_tag);
    Some(element)
}

fn read_attribute(node: Node<'_>, text: &str, base: usize) -> Option<TemplateAttribute> {
    let mut name = None;
    let mut value = None;
    let mut value_span = None;

    let mut cursor = node.walk();
    for child in node.named_children(&mut cursor) {
        match child.kind() {
            "attribute_name" => name = Some(child),
            "attribute_value" => {
                value = Some(node_text(child, text).to_string());
                value_span = Some(node_span(child).offset(base));
            }
            "quoted_attribute_value" => {
                let mut inner = child.walk();
                match child
                    .named_children(&mut inner)
                    .find(|c| c.kind() == "attribute_value")
                {
                    Some(v) => {
                        value = Some(node_text(v, text).to_string());
                        value_span = Some(node_span(v).offset(base));
                    }
                    None => {
                        value = Some(String::new());
                        value_span = Some(Span::new(child.start_byte() + 1, 0).offset(base));
                    }
                }
            }
            _ => {}
        }
    }

    let name = name?;
    Some(TemplateAttribute {
        name: node_text(name, text).to_string(),
        name_span: node_span(name).offset(base),
        value,
        value_span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elements_and_attributes() {
        let src = r#"<mat-input-container class="a mat-input-flex"><input [value]="v" (change)="c()" disabled></mat-input-container>"#;
        let template = Template::parse(src, 0).unwrap();

        assert_eq!(template.elements.len(), 2);
        let outer = &template.elements[0];
        assert_eq!(outer.tag, "mat-input-container");
        assert_eq!(outer.tag_spans.len(), 2);
        for span in &outer.tag_spans {
            assert_eq!(&src[span.range()], "mat-input-container");
        }
        assert_eq!(outer.attributes[0].value.as_deref(), Some("a mat-input-flex"));

        let input = &template.elements[1];
        let names: Vec<&str> = input.attributes.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["[value]", "(change)", "disabled"]);
        assert!(input.attributes[2].value.is_none());
        let bound: Vec<&str> = input.bound_names().collect();
        assert_eq!(bound, vec!["value", "change", "disabled"]);
    }

    #[test]
    fn test_spans_are_offset_by_base() {
        let file = "xxxx<div cdkPortalHost></div>";
        let template = Template::parse(&file[4..], 4).unwrap();
        let attr = &template.elements[0].attributes[0];
        assert_eq!(&file[attr.name_span.range()], "cdkPortalHost");
    }

    #[test]
    fn test_style_elements() {
        let src = "<style>.mat-input-flex { color: red; }</style><p>hi</p>";
        let template = Template::parse(src, 0).unwrap();
        assert_eq!(template.styles.len(), 1);
        assert_eq!(
            &src[template.styles[0].range()],
            ".mat-input-flex { color: red; }"
        );
    }
}
