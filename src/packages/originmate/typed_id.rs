//! `typed_id::TypedID<phantom T>`: an object ID tagged with the object type.

use std::sync::Arc;

use move_core_types::account_address::AccountAddress;

use crate::error::Result;
use crate::framework::object::Id;
use crate::reified::{
    FieldDescriptor, Fields, PhantomReified, StructClass, StructDescriptor, StructReified,
    TypeArgs, TypeArgument, TypeParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct TypedId {
    id: AccountAddress,
    descriptor: Arc<StructDescriptor>,
}

impl TypedId {
    pub fn reified(t: impl Into<PhantomReified>) -> StructReified<Self> {
        StructReified::new(vec![TypeArgument::Phantom(t.into())])
    }

    pub fn id(&self) -> &AccountAddress {
        &self.id
    }
}

impl StructClass for TypedId {
    const TYPE_NAME: &'static str =
        "0xed6c6fe0732be937f4379bc0b471f0f6bfbe0e8741968009e0f01e6de3d59f32::typed_id::TypedID";
    const TYPE_PARAMS: &'static [TypeParam] = &[TypeParam::Phantom];

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

pub mod functions {
    use super::super::PUBLISHED_AT;
    use crate::error::Result;
    use crate::transaction::{generic, obj, Argument, GenericArg, ObjectArg, TransactionBuilder};

    fn target(function: &str) -> String {
        format!("{}::typed_id::{}", PUBLISHED_AT, function)
    }

    pub fn new(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        object: impl Into<GenericArg>,
    ) -> Result<Argument> {
        let args = vec![generic(tx, type_arg, object)?];
        tx.move_call(&target("new"), vec![type_arg.to_string()], args)
    }

    pub fn as_id(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        typed_id: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        let args = vec![obj(tx, typed_id)?];
        tx.move_call(&target("as_id"), vec![type_arg.to_string()], args)
    }

    pub fn to_id(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        typed_id: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        let args = vec![obj(tx, typed_id)?];
        tx.move_call(&target("to_id"), vec![type_arg.to_string()], args)
    }

    pub fn equals_object(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        typed_id: impl Into<ObjectArg>,
        object: impl Into<GenericArg>,
    ) -> Result<Argument> {
        let args = vec![obj(tx, typed_id)?, generic(tx, type_arg, object)?];
        tx.move_call(&target("equals_object"), vec![type_arg.to_string()], args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_typed_id_json() {
        let reified = TypedId::reified("0x2::kiosk::Kiosk");
        let typed = reified
            .from_json_field(&json!({ "id": "0x1234" }))
            .unwrap();
        assert_eq!(typed.id().to_hex_literal(), "0x1234");
        assert_eq!(
            typed.full_type_name(),
            "0xed6c6fe0732be937f4379bc0b471f0f6bfbe0e8741968009e0f01e6de3d59f32::typed_id::TypedID<0x2::kiosk::Kiosk>"
        );
        assert_eq!(reified.from_json(&typed.to_json()).unwrap(), typed);
    }
}
