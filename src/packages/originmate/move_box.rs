//! `box::Box<T>`: an object wrapping a single value of any stored type.

use std::sync::Arc;

use move_core_types::account_address::AccountAddress;

use crate::error::Result;
use crate::framework::object::Uid;
use crate::reified::{
    FieldDescriptor, FieldValue, Fields, Reified, StructClass, StructDescriptor, StructReified,
    TypeArgs, TypeArgument, TypeParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct MoveBox {
    id: AccountAddress,
    obj: FieldValue,
    descriptor: Arc<StructDescriptor>,
}

impl MoveBox {
    pub fn reified(t: impl Into<Reified>) -> StructReified<Self> {
        StructReified::new(vec![TypeArgument::Reified(t.into())])
    }

    pub fn id(&self) -> &AccountAddress {
        &self.id
    }

    pub fn obj(&self) -> &FieldValue {
        &self.obj
    }
}

impl StructClass for MoveBox {
    const TYPE_NAME: &'static str =
        "0xed6c6fe0732be937f4379bc0b471f0f6bfbe0e8741968009e0f01e6de3d59f32::box::Box";
    const TYPE_PARAMS: &'static [TypeParam] = &[TypeParam::NonPhantom];

    fn field_types(type_args: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id", Uid::reified()),
            FieldDescriptor::new("obj", type_args.reified(0)),
        ]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            id: fields.take("id")?,
            obj: fields.take("obj")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("id", self.id)
            .with("obj", self.obj.clone())
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}
