//! `utils::Marker<phantom T>`: a one-field witness keyed by type.

use std::sync::Arc;

use crate::error::Result;
use crate::reified::{
    FieldDescriptor, Fields, PhantomReified, Primitive, StructClass, StructDescriptor,
    StructReified, TypeArgs, TypeArgument, TypeParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    dummy_field: bool,
    descriptor: Arc<StructDescriptor>,
}

impl Marker {
    pub fn reified(t: impl Into<PhantomReified>) -> StructReified<Self> {
        StructReified::new(vec![TypeArgument::Phantom(t.into())])
    }

    pub fn dummy_field(&self) -> bool {
        self.dummy_field
    }
}

impl StructClass for Marker {
    const TYPE_NAME: &'static str =
        "0x859eb18bd5b5e8cc32deb6dfb1c39941008ab3c6e27f0b8ce2364be7102bb7cb::utils::Marker";
    const TYPE_PARAMS: &'static [TypeParam] = &[TypeParam::Phantom];

    fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::new("dummy_field", Primitive::Bool)]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            dummy_field: fields.take("dummy_field")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("dummy_field", self.dummy_field)
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}
