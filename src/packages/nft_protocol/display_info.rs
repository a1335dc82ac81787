//! `display_info::DisplayInfo`: name and description shown for a collection.

use std::sync::Arc;

use crate::error::Result;
use crate::framework::string::MoveString;
use crate::reified::{
    FieldDescriptor, Fields, StructClass, StructDescriptor, StructReified, TypeArgs, TypeParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayInfo {
    name: String,
    description: String,
    descriptor: Arc<StructDescriptor>,
}

impl DisplayInfo {
    pub fn reified() -> StructReified<Self> {
        StructReified::new(vec![])
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl StructClass for DisplayInfo {
    const TYPE_NAME: &'static str =
        "0xbc3df36be17f27ac98e3c839b2589db8475fa07b20657b08e8891e3aaf5ee5f9::display_info::DisplayInfo";
    const TYPE_PARAMS: &'static [TypeParam] = &[];

    fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("name", MoveString::reified()),
            FieldDescriptor::new("description", MoveString::reified()),
        ]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            name: fields.take("name")?,
            description: fields.take("description")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("name", self.name.as_str())
            .with("description", self.description.as_str())
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display_info_strings_encode_as_bytes() {
        let info = DisplayInfo::reified()
            .from_fields(&json!({
                "name": { "bytes": [79, 66] },
                "description": { "bytes": [] }
            }))
            .unwrap();
        assert_eq!(info.name(), "OB");
        assert_eq!(info.to_bcs().unwrap(), vec![2, 79, 66, 0]);
        assert_eq!(
            info.to_json(),
            json!({
                "$typeName": DisplayInfo::TYPE_NAME,
                "$typeArgs": [],
                "name": "OB",
                "description": ""
            })
        );
    }
}
