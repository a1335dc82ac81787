//! `0x2::vec_map::VecMap<K, V>` and its `Entry<K, V>`.

use std::sync::Arc;

use crate::error::Result;
use crate::reified::{
    vector, FieldDescriptor, FieldValue, Fields, Reified, StructClass, StructDescriptor,
    StructReified, TypeArgs, TypeArgument, TypeParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    key: FieldValue,
    value: FieldValue,
    descriptor: Arc<StructDescriptor>,
}

impl Entry {
    pub fn reified(k: impl Into<Reified>, v: impl Into<Reified>) -> StructReified<Self> {
        StructReified::new(vec![
            TypeArgument::Reified(k.into()),
            TypeArgument::Reified(v.into()),
        ])
    }

    pub fn key(&self) -> &FieldValue {
        &self.key
    }

    pub fn value(&self) -> &FieldValue {
        &self.value
    }
}

impl StructClass for Entry {
    const TYPE_NAME: &'static str = "0x2::vec_map::Entry";
    const TYPE_PARAMS: &'static [TypeParam] = &[TypeParam::NonPhantom, TypeParam::NonPhantom];

    fn field_types(type_args: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("key", type_args.reified(0)),
            FieldDescriptor::new("value", type_args.reified(1)),
        ]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            key: fields.take("key")?,
            value: fields.take("value")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("key", self.key.clone())
            .with("value", self.value.clone())
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}

/// Insertion-ordered map backed by a vector of entries.
#[derive(Debug, Clone, PartialEq)]
pub struct VecMap {
    contents: Vec<Entry>,
    descriptor: Arc<StructDescriptor>,
}

impl VecMap {
    pub fn reified(k: impl Into<Reified>, v: impl Into<Reified>) -> StructReified<Self> {
        StructReified::new(vec![
            TypeArgument::Reified(k.into()),
            TypeArgument::Reified(v.into()),
        ])
    }

    pub fn contents(&self) -> &[Entry] {
        &self.contents
    }

    /// Linear lookup, as on chain.
    pub fn get(&self, key: &FieldValue) -> Option<&FieldValue> {
        self.contents
            .iter()
            .find(|e| &e.key == key)
            .map(|e| &e.value)
    }
}

impl StructClass for VecMap {
    const TYPE_NAME: &'static str = "0x2::vec_map::VecMap";
    const TYPE_PARAMS: &'static [TypeParam] = &[TypeParam::NonPhantom, TypeParam::NonPhantom];

    fn field_types(type_args: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        let entry = Entry::reified(type_args.reified(0), type_args.reified(1));
        vec![FieldDescriptor::new("contents", vector(entry))]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            contents: fields.take_vec_struct("contents")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        let contents: Vec<_> = self.contents.iter().map(Entry::to_value).collect();
        Fields::new().with("contents", contents)
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::string::MoveString;
    use crate::reified::Primitive;
    use serde_json::json;

    #[test]
    fn test_vec_map_nested_generic_name() {
        let reified = VecMap::reified(MoveString::reified(), vector(Primitive::U64));
        assert_eq!(
            reified.full_type_name(),
            "0x2::vec_map::VecMap<0x1::string::String, vector<u64>>"
        );
    }

    #[test]
    fn test_vec_map_json_round_trip() {
        let reified = VecMap::reified(MoveString::reified(), Primitive::U64);
        let json = json!({
            "$typeName": "0x2::vec_map::VecMap",
            "$typeArgs": ["0x1::string::String", "u64"],
            "contents": [
                { "key": "a", "value": "1" },
                { "key": "b", "value": "18446744073709551615" }
            ]
        });
        let map = reified.from_json(&json).unwrap();
        assert_eq!(
            map.get(&FieldValue::from("b")),
            Some(&FieldValue::U64(u64::MAX))
        );
        assert_eq!(map.to_json(), json);

        let bytes = map.to_bcs().unwrap();
        assert_eq!(reified.from_bcs(&bytes).unwrap(), map);
    }
}
