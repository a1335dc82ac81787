//! `0x2::table::Table<phantom K, phantom V>`.
//!
//! Entries live in dynamic fields; only the handle is decoded here.

use std::sync::Arc;

use move_core_types::account_address::AccountAddress;

use super::object::Uid;
use crate::error::Result;
use crate::reified::{
    FieldDescriptor, Fields, PhantomReified, Primitive, StructClass, StructDescriptor,
    StructReified, TypeArgs, TypeArgument, TypeParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    id: AccountAddress,
    size: u64,
    descriptor: Arc<StructDescriptor>,
}

impl Table {
    pub fn reified(
        k: impl Into<PhantomReified>,
        v: impl Into<PhantomReified>,
    ) -> StructReified<Self> {
        StructReified::new(vec![
            TypeArgument::Phantom(k.into()),
            TypeArgument::Phantom(v.into()),
        ])
    }

    pub fn id(&self) -> &AccountAddress {
        &self.id
    }

    pub fn size(&self) -> u64 {
        self.size
    }
}

impl StructClass for Table {
    const TYPE_NAME: &'static str = "0x2::table::Table";
    const TYPE_PARAMS: &'static [TypeParam] = &[TypeParam::Phantom, TypeParam::Phantom];

    fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id", Uid::reified()),
            FieldDescriptor::new("size", Primitive::U64),
        ]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            id: fields.take("id")?,
            size: fields.take("size")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("id", self.id).with("size", self.size)
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}
