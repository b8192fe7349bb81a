//! Integration tests for the RDF graph built from RDF/XML documents.

use anyhow::{Context, Result};
use pretty_assertions::assert_eq;
use syndication::rdf::vocab::{dc, rdf, rss};
use syndication::rdf::{Model, ModelMaker, Node, RdfParser, Statement};
use syndication::xml::XmlDocument;
use syndication::DocumentSource;

const RSS10: &str = r#"<rdf:RDF xmlns:rdf="http://www.w3.org/1999/02/22-rdf-syntax-ns#"
         xmlns="http://purl.org/rss/1.0/"
         xmlns:dc="http://purl.org/dc/elements/1.1/">
  <channel rdf:about="http://example.com/">
    <title>Example</title>
    <items>
      <rdf:Seq>
        <rdf:li rdf:resource="http://example.com/2"/>
        <rdf:li rdf:resource="http://example.com/1"/>
      </rdf:Seq>
    </items>
  </channel>
  <item rdf:about="http://example.com/1">
    <title>One</title>
    <dc:subject>first</dc:subject>
    <dc:subject>second</dc:subject>
  </item>
  <item rdf:about="http://example.com/2"><title>Two</title></item>
</rdf:RDF>"#;

fn model() -> Result<Model> {
    let doc = XmlDocument::parse_str(RSS10).context("well-formed")?;
    Ok(ModelMaker.create_from_xml(&doc))
}

#[test]
fn test_graph_shape() -> Result<()> {
    let model = model()?;
    let items = model.resources_with_type(rss::ITEM);
    assert_eq!(items.len(), 2);

    let channel = model
        .resources_with_type(rss::CHANNEL)
        .into_iter()
        .next()
        .context("channel typed")?;
    assert_eq!(channel.uri(), "http://example.com/");

    let seq = match channel.property(&model, rss::ITEMS).object(&model) {
        Node::Sequence(seq) => seq,
        other => anyhow::bail!("expected a sequence, got {other:?}"),
    };
    let members: Vec<_> = seq.items(&model).iter().map(|n| n.text().to_string()).collect();
    assert_eq!(members, vec!["http://example.com/2", "http://example.com/1"]);
    // Sequence members are also plain rdf:li statements.
    assert_eq!(seq.properties(&model, rdf::LI).len(), 2);
    Ok(())
}

#[test]
fn test_repeated_properties_keep_insertion_order() -> Result<()> {
    let mut model = model()?;
    // Interning hands back the resource the parser created.
    let one = model.create_resource("http://example.com/1");
    assert!(one.has_property(&model, rss::TITLE));
    let subjects: Vec<_> = one
        .properties(&model, dc::SUBJECT)
        .iter()
        .map(|st| st.as_string(&model))
        .collect();
    assert_eq!(subjects, vec!["first", "second"]);
    assert_eq!(one.property(&model, dc::SUBJECT).as_string(&model), "first");
    Ok(())
}

#[test]
fn test_statements_do_not_resolve_against_other_models() -> Result<()> {
    let a = model()?;
    let b = model()?;
    let st = a.statements().into_iter().next().context("non-empty graph")?;
    assert!(!st.subject(&a).is_null());
    assert!(st.subject(&b).is_null());
    assert!(st.object(&b).is_null());
    assert_eq!(st.as_string(&b), "");
    assert!(Statement::null().subject(&a).is_null());
    Ok(())
}

#[test]
fn test_parser_orders_items_by_sequence() {
    let doc = RdfParser::default().parse_document(&DocumentSource::new(RSS10, ""));
    let titles: Vec<_> = doc.items().iter().map(|i| i.title()).collect();
    assert_eq!(titles, vec!["Two", "One"]);
}
