//! The reading direction.

use tracing::trace;

use super::{Field, Strategy};
use crate::direction::{ConversionPolicy, Direction};
use crate::error::Result;
use crate::provider::NodeHandle;
use crate::scalar::Slot;

/// Copies values out of an existing tree.
///
/// Absent values are back-filled from the slot's default when it has one.
/// Without a default, missing text reads as the zero value while a missing
/// attribute leaves the slot as it was.
#[derive(Debug, Clone, Default)]
pub struct ReadStrategy {
    policy: ConversionPolicy,
}

impl ReadStrategy {
    /// Creates a reader applying `policy` to malformed values.
    pub fn new(policy: ConversionPolicy) -> Self {
        ReadStrategy { policy }
    }

    /// The conversion policy in effect.
    pub fn policy(&self) -> ConversionPolicy {
        self.policy
    }
}

impl<N: NodeHandle> Strategy<N> for ReadStrategy {
    fn direction(&self) -> Direction {
        Direction::Reading
    }

    fn node_name(&self, node: &N, name: &mut String) -> Result<()> {
        *name = node.name();
        Ok(())
    }

    fn child(&self, node: &N, name: &str) -> N {
        let child = node.child(name);
        if child.is_null() {
            trace!(target: "xml_serializer::read", name, "child not found");
        }
        child
    }

    fn next_sibling(&self, node: &N, name: &str) -> N {
        let sibling = node.next_sibling(name);
        if sibling.is_null() {
            trace!(target: "xml_serializer::read", name, "sibling not found");
        }
        sibling
    }

    fn transfer(&self, node: &N, field: Field<'_>, slot: &mut dyn Slot) -> Result<()> {
        let raw = match field {
            Field::Text => node.text(),
            Field::Attribute(name) => node.attribute(name),
        };

        match raw {
            Some(raw) => slot.decode(&raw, self.policy),
            None => {
                if !slot.fill_default() && field == Field::Text {
                    slot.clear();
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{Document, XmlNode};
    use crate::scalar::ScalarSlot;
    use crate::xml::parse_str;
    use crate::Error;

    fn sample() -> (Document, XmlNode) {
        let doc = parse_str(
            r#"<doc version="3" ratio="oops"><name>widget</name><count>12</count><empty/><a/><b/><a/></doc>"#,
        )
        .unwrap();
        let root = doc.document_element();
        (doc, root)
    }

    #[test]
    fn test_navigation_finds_existing_nodes_only() {
        let (_doc, root) = sample();
        let reader = ReadStrategy::default();

        assert_eq!(reader.child(&root, "name").name(), "name");
        assert!(reader.child(&root, "missing").is_null());

        let first_a = reader.child(&root, "a");
        let second_a = reader.next_sibling(&first_a, "a");
        assert!(!second_a.is_null());
        assert_ne!(first_a, second_a);
        assert!(reader.next_sibling(&second_a, "a").is_null());
        // Reading never changes the tree
        assert_eq!(root.child_names(), ["name", "count", "empty", "a", "b", "a"]);
    }

    #[test]
    fn test_node_name_is_copied_out() {
        let (_doc, root) = sample();
        let mut name = String::from("before");
        Strategy::<XmlNode>::node_name(&ReadStrategy::default(), &root, &mut name).unwrap();
        assert_eq!(name, "doc");
    }

    #[test]
    fn test_text_and_attribute_values() {
        let (_doc, root) = sample();
        let reader = ReadStrategy::default();

        let mut count = 0u32;
        reader
            .transfer(&root.child("count"), Field::Text, &mut ScalarSlot::new(&mut count))
            .unwrap();
        assert_eq!(count, 12);

        let mut version = 0i64;
        reader
            .transfer(&root, Field::Attribute("version"), &mut ScalarSlot::new(&mut version))
            .unwrap();
        assert_eq!(version, 3);
    }

    #[test]
    fn test_missing_text_reads_zero_or_default() {
        let (_doc, root) = sample();
        let reader = ReadStrategy::default();
        let empty = root.child("empty");

        let mut value = 99i32;
        reader
            .transfer(&empty, Field::Text, &mut ScalarSlot::new(&mut value))
            .unwrap();
        assert_eq!(value, 0);

        let mut value = 99i32;
        reader
            .transfer(&empty, Field::Text, &mut ScalarSlot::with_default(&mut value, 7))
            .unwrap();
        assert_eq!(value, 7);
    }

    #[test]
    fn test_missing_attribute_keeps_value_or_uses_default() {
        let (_doc, root) = sample();
        let reader = ReadStrategy::default();

        let mut value = String::from("kept");
        reader
            .transfer(&root, Field::Attribute("nope"), &mut ScalarSlot::new(&mut value))
            .unwrap();
        assert_eq!(value, "kept");

        reader
            .transfer(
                &root,
                Field::Attribute("nope"),
                &mut ScalarSlot::with_default(&mut value, "dflt".to_string()),
            )
            .unwrap();
        assert_eq!(value, "dflt");
    }

    #[test]
    fn test_present_value_wins_over_default() {
        let (_doc, root) = sample();
        let mut count = 0i32;
        ReadStrategy::default()
            .transfer(
                &root.child("count"),
                Field::Text,
                &mut ScalarSlot::with_default(&mut count, 5),
            )
            .unwrap();
        assert_eq!(count, 12);
    }

    #[test]
    fn test_conversion_policy() {
        let (_doc, root) = sample();

        let mut ratio = 1.5f64;
        ReadStrategy::new(ConversionPolicy::Lenient)
            .transfer(&root, Field::Attribute("ratio"), &mut ScalarSlot::new(&mut ratio))
            .unwrap();
        assert_eq!(ratio, 0.0);

        let mut ratio = 1.5f64;
        let err = ReadStrategy::new(ConversionPolicy::Strict)
            .transfer(&root, Field::Attribute("ratio"), &mut ScalarSlot::new(&mut ratio))
            .unwrap_err();
        assert!(matches!(err, Error::Conversion { kind: "f64", .. }));
        assert_eq!(ratio, 1.5);
    }
}
