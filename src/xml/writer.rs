use std::io::Cursor;

use quick_xml::events::{BytesCData, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use super::{Element, XmlNode, XML_NAMESPACE};

type Scope = Vec<(Option<String>, String)>;

pub(super) fn child_nodes_as_xml(el: &Element) -> String {
    let mut writer = Writer::new(Cursor::new(Vec::new()));
    let mut scope = Scope::new();

    for node in el.children() {
        let written = match node {
            XmlNode::Element(child) => write_element(&mut writer, child, &mut scope, el.xml_base()),
            other => write_node(&mut writer, other, &mut scope),
        };
        if let Err(e) = written {
            tracing::warn!(element = %el.local_name(), error = %e, "Failed to serialize child nodes");
            return String::new();
        }
    }

    String::from_utf8_lossy(&writer.into_inner().into_inner())
        .trim()
        .to_string()
}

fn write_node(writer: &mut Writer<Cursor<Vec<u8>>>, node: &XmlNode, scope: &mut Scope) -> std::io::Result<()> {
    match node {
        XmlNode::Text(t) => writer.write_event(Event::Text(BytesText::new(t))),
        XmlNode::CData(t) => writer.write_event(Event::CData(BytesCData::new(t.as_str()))),
        XmlNode::Element(el) => write_element(writer, el, scope, None),
    }
}

fn declare(prefix: Option<&str>, uri: &str, start: &mut BytesStart<'_>, scope: &mut Scope) {
    let bound = match scope.iter().rev().find(|(p, _)| p.as_deref() == prefix) {
        Some((_, u)) => u == uri,
        None => uri.is_empty(),
    };
    if !bound {
        let key = match prefix {
            Some(p) => format!("xmlns:{}", p),
            None => "xmlns".to_string(),
        };
        start.push_attribute((key.as_str(), uri));
        scope.push((prefix.map(str::to_string), uri.to_string()));
    }
}

/// Writes `el` and its subtree. Namespace bindings that the fragment would
/// otherwise lose are re-declared on the outermost element that uses them.
fn write_element(
    writer: &mut Writer<Cursor<Vec<u8>>>,
    el: &Element,
    scope: &mut Scope,
    inherited_base: Option<&str>,
) -> std::io::Result<()> {
    let name = el.qualified_name();
    let mut start = BytesStart::new(name.as_str());
    let scope_len = scope.len();

    for (prefix, uri) in el.namespace_declarations() {
        declare(prefix.as_deref(), uri, &mut start, scope);
    }
    declare(el.prefix(), el.namespace(), &mut start, scope);

    for attr in el.attributes() {
        let key = match &attr.prefix {
            Some(p) => {
                if p != "xml" {
                    if let Some(ns) = &attr.namespace {
                        declare(Some(p), ns, &mut start, scope);
                    }
                }
                format!("{}:{}", p, attr.local_name)
            }
            None => attr.local_name.clone(),
        };
        start.push_attribute((key.as_str(), attr.value.as_str()));
    }

    if let Some(base) = inherited_base {
        if el.attribute_ns(XML_NAMESPACE, "base").is_none() {
            start.push_attribute(("xml:base", base));
        }
    }

    if el.children().is_empty() {
        writer.write_event(Event::Empty(start))?;
    } else {
        writer.write_event(Event::Start(start))?;
        for child in el.children() {
            write_node(writer, child, scope)?;
        }
        writer.write_event(Event::End(BytesEnd::new(name.as_str())))?;
    }

    scope.truncate(scope_len);
    Ok(())
}
