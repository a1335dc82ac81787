//! `collection::Collection<phantom T>`.

use std::sync::Arc;

use move_core_types::account_address::AccountAddress;

use crate::error::Result;
use crate::framework::object::Uid;
use crate::reified::{
    FieldDescriptor, Fields, PhantomReified, Primitive, StructClass, StructDescriptor,
    StructReified, TypeArgs, TypeArgument, TypeParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    id: AccountAddress,
    version: u64,
    descriptor: Arc<StructDescriptor>,
}

impl Collection {
    pub fn reified(t: impl Into<PhantomReified>) -> StructReified<Self> {
        StructReified::new(vec![TypeArgument::Phantom(t.into())])
    }

    pub fn id(&self) -> &AccountAddress {
        &self.id
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

impl StructClass for Collection {
    const TYPE_NAME: &'static str =
        "0xbc3df36be17f27ac98e3c839b2589db8475fa07b20657b08e8891e3aaf5ee5f9::collection::Collection";
    const TYPE_PARAMS: &'static [TypeParam] = &[TypeParam::Phantom];

    fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id", Uid::reified()),
            FieldDescriptor::new("version", Primitive::U64),
        ]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            id: fields.take("id")?,
            version: fields.take("version")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("id", self.id)
            .with("version", self.version)
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const WITNESS: &str = "0x1234::my_nft::MyNft";

    #[test]
    fn test_collection_phantom_arg_does_not_change_layout() {
        let a = Collection::reified(WITNESS);
        let b = Collection::reified("0x2::sui::SUI");
        let fields = json!({ "id": { "id": { "bytes": "0x5" } }, "version": "7" });

        let ca = a.from_fields(&fields).unwrap();
        let cb = b.from_fields(&fields).unwrap();
        assert_eq!(ca.to_bcs().unwrap(), cb.to_bcs().unwrap());
        assert_ne!(ca.full_type_name(), cb.full_type_name());
        assert_eq!(ca.version(), 7);
    }
}
