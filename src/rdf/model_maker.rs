use super::model::Model;
use super::node::{Node, Resource, Sequence};
use super::vocab::rdf;
use crate::xml::{Element, XmlDocument};

/// Builds a [`Model`] from an RDF/XML element tree.
///
/// Supports the striped syntax RSS 1.0 uses: typed node elements with
/// `rdf:about`, property elements with `rdf:resource`, literal text or one
/// nested node element, and `rdf:Seq` containers. Reification and other
/// container types parse as plain resources.
#[derive(Debug, Default, Clone, Copy)]
pub struct ModelMaker;

/// `rdf:name`, falling back to an unqualified `name` attribute.
fn rdf_attribute<'a>(el: &'a Element, name: &str) -> Option<&'a str> {
    el.attribute_ns(rdf::NAMESPACE, name).or_else(|| el.attribute(name))
}

impl ModelMaker {
    pub fn create_from_xml(&self, doc: &XmlDocument) -> Model {
        let mut model = Model::new();
        for el in doc.root().child_elements() {
            Self::read_resource(&mut model, el);
        }
        model
    }

    fn read_resource(model: &mut Model, el: &Element) -> Node {
        let about = rdf_attribute(el, "about").unwrap_or("");
        let type_uri = el.expanded_name();
        let ty = model.create_resource(&type_uri);

        let (subject, seq): (Resource, Option<Sequence>) = if type_uri == rdf::SEQ {
            let seq = model.create_sequence(about);
            (seq.as_resource().clone(), Some(seq))
        } else {
            (model.create_resource(about), None)
        };

        let type_pred = model.create_property(rdf::TYPE);
        model.add_statement(&subject, &type_pred, &ty.into());

        for child in el.child_elements() {
            let pred_uri = child.expanded_name();
            let pred = model.create_property(&pred_uri);

            let object: Node = if let Some(uri) = rdf_attribute(child, "resource") {
                model.create_resource(uri).into()
            } else if !child.has_child_elements() {
                let text = child.text();
                if text.is_empty() {
                    continue;
                }
                model.create_literal(&text).into()
            } else {
                match child.last_child_element() {
                    Some(embedded) => Self::read_resource(model, embedded),
                    None => continue,
                }
            };

            if let Some(seq) = &seq {
                if pred_uri == rdf::LI {
                    model.sequence_append(seq, &object);
                }
            }
            model.add_statement(&subject, &pred, &object);
        }

        match seq {
            Some(seq) => seq.into(),
            None => subject.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::vocab::rss;

    const RSS10: &str = r#"<?xml version="1.0"?>
<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns="http://purl.org/rss/1.0/">
  <channel rdf:about="http://example.com/">
    <title>Example</title>
    <link>http://example.com/</link>
    <items>
      <rdf:Seq>
        <rdf:li rdf:resource="http://example.com/2"/>
        <rdf:li rdf:resource="http://example.com/1"/>
      </rdf:Seq>
    </items>
  </channel>
  <item rdf:about="http://example.com/1"><title>One</title></item>
  <item rdf:about="http://example.com/2"><title>Two</title></item>
</rdf:RDF>"#;

    #[test]
    fn test_builds_typed_resources() {
        let doc = XmlDocument::parse_str(RSS10).unwrap();
        let model = ModelMaker.create_from_xml(&doc);

        let channels = model.resources_with_type(rss::CHANNEL);
        assert_eq!(channels.len(), 1);
        let channel = &channels[0];
        assert_eq!(channel.uri(), "http://example.com/");
        assert_eq!(channel.property(&model, rss::TITLE).as_string(&model), "Example");

        let items = model.resources_with_type(rss::ITEM);
        assert_eq!(items.len(), 2);
    }

    #[test]
    fn test_sequence_gets_members_and_statements() {
        let doc = XmlDocument::parse_str(RSS10).unwrap();
        let model = ModelMaker.create_from_xml(&doc);
        let channel = &model.resources_with_type(rss::CHANNEL)[0];

        let seq_node = channel.property(&model, rss::ITEMS).object(&model);
        assert!(seq_node.is_sequence());
        let Node::Sequence(seq) = seq_node else { unreachable!() };

        let members: Vec<_> = seq.items(&model).iter().map(|n| n.text().to_string()).collect();
        assert_eq!(members, vec!["http://example.com/2", "http://example.com/1"]);
        assert_eq!(seq.properties(&model, rdf::LI).len(), 2);
    }

    #[test]
    fn test_resource_reference_before_definition_is_interned() {
        let doc = XmlDocument::parse_str(RSS10).unwrap();
        let model = ModelMaker.create_from_xml(&doc);
        let channel = &model.resources_with_type(rss::CHANNEL)[0];
        let Node::Sequence(seq) = channel.property(&model, rss::ITEMS).object(&model) else {
            panic!("items is not a sequence");
        };
        let first = seq.items(&model)[0].as_resource().cloned().unwrap_or_default();
        assert_eq!(first.property(&model, rss::TITLE).as_string(&model), "Two");
    }

    #[test]
    fn test_unqualified_about_attribute() {
        let doc = XmlDocument::parse_str(
            r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#" xmlns="http://purl.org/rss/1.0/">
                 <item about="http://x/"><title>T</title></item>
               </rdf:RDF>"#,
        )
        .unwrap();
        let model = ModelMaker.create_from_xml(&doc);
        assert_eq!(model.resources_with_type(rss::ITEM)[0].uri(), "http://x/");
    }
}
