//! `0x2::object::ID` and `0x2::object::UID`.

use std::sync::Arc;

use move_core_types::account_address::AccountAddress;
use ob_types::framework::{ID_TYPE, UID_TYPE};

use crate::error::Result;
use crate::reified::{
    FieldDescriptor, Fields, Primitive, StructClass, StructDescriptor, StructReified, TypeArgs,
    TypeParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Id {
    bytes: AccountAddress,
    descriptor: Arc<StructDescriptor>,
}

impl Id {
    pub fn reified() -> StructReified<Self> {
        StructReified::new(vec![])
    }

    pub fn bytes(&self) -> &AccountAddress {
        &self.bytes
    }
}

impl StructClass for Id {
    const TYPE_NAME: &'static str = ID_TYPE;
    const TYPE_PARAMS: &'static [TypeParam] = &[];

    fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::new("bytes", Primitive::Address)]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            bytes: fields.take("bytes")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("bytes", self.bytes)
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}

/// Object identity. Nested `ID` fields collapse to their address.
#[derive(Debug, Clone, PartialEq)]
pub struct Uid {
    id: AccountAddress,
    descriptor: Arc<StructDescriptor>,
}

impl Uid {
    pub fn reified() -> StructReified<Self> {
        StructReified::new(vec![])
    }

    pub fn id(&self) -> &AccountAddress {
        &self.id
    }
}

impl StructClass for Uid {
    const TYPE_NAME: &'static str = UID_TYPE;
    const TYPE_PARAMS: &'static [TypeParam] = &[];

    fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::new("id", Id::reified())]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            id: fields.take("id")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("id", self.id)
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}
