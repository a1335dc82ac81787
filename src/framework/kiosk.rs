//! `0x2::kiosk::KioskOwnerCap`.

use std::sync::Arc;

use move_core_types::account_address::AccountAddress;

use super::object::{Id, Uid};
use crate::error::Result;
use crate::reified::{
    FieldDescriptor, Fields, StructClass, StructDescriptor, StructReified, TypeArgs, TypeParam,
};

/// Capability granting ownership rights over a kiosk.
#[derive(Debug, Clone, PartialEq)]
pub struct KioskOwnerCap {
    id: AccountAddress,
    for_: AccountAddress,
    descriptor: Arc<StructDescriptor>,
}

impl KioskOwnerCap {
    pub fn reified() -> StructReified<Self> {
        StructReified::new(vec![])
    }

    pub fn id(&self) -> &AccountAddress {
        &self.id
    }

    /// The kiosk this cap controls.
    pub fn for_(&self) -> &AccountAddress {
        &self.for_
    }
}

impl StructClass for KioskOwnerCap {
    const TYPE_NAME: &'static str = "0x2::kiosk::KioskOwnerCap";
    const TYPE_PARAMS: &'static [TypeParam] = &[];

    fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id", Uid::reified()),
            FieldDescriptor::new("for", Id::reified()),
        ]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            id: fields.take("id")?,
            for_: fields.take("for")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("id", self.id).with("for", self.for_)
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}
