//! RSS 1.0 / RDF support.
//!
//! RDF feeds are read into an in-memory triple graph rather than walked as
//! XML: [`ModelMaker`] turns the RDF/XML striped syntax into a [`Model`],
//! and [`Document`]/[`Item`] are thin views that query it.
//!
//! # Architecture
//!
//! - [`node`] - graph value types ([`Resource`], [`Property`], [`Sequence`],
//!   [`Literal`]) and [`Statement`] triples. Nodes are plain ids plus data;
//!   every query takes the owning [`Model`] explicitly.
//! - [`model`] - the arena owning all nodes and statements of one document.
//! - [`model_maker`] - RDF/XML to [`Model`].
//! - [`parser`] - format entry point, including RSS 0.9 normalization.
//! - [`document`], [`item`], [`elements`] - read-only feed views.

pub mod document;
pub mod elements;
pub mod item;
pub mod model;
pub mod model_maker;
pub mod node;
pub mod parser;
pub mod vocab;

pub use document::{Document, ResourceWrapper, DEFAULT_MARKUP_SAMPLE_SIZE};
pub use elements::{DublinCore, Image, SyndicationInfo, TextInput, UpdatePeriod};
pub use item::Item;
pub use model::Model;
pub use model_maker::ModelMaker;
pub use node::{Literal, ModelId, Node, NodeId, Property, Resource, Sequence, Statement, NULL_ID};
pub use parser::RdfParser;
