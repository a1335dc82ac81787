//! Mint and burn events emitted by collections.

use std::sync::Arc;

use move_core_types::account_address::AccountAddress;

use crate::error::Result;
use crate::framework::object::Id;
use crate::reified::{
    FieldDescriptor, Fields, PhantomReified, StructClass, StructDescriptor, StructReified,
    TypeArgs, TypeArgument, TypeParam,
};

fn event_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("collection_id", Id::reified()),
        FieldDescriptor::new("object", Id::reified()),
    ]
}

macro_rules! collection_event {
    ($(#[$meta:meta])* $name:ident, $type_name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq)]
        pub struct $name {
            collection_id: AccountAddress,
            object: AccountAddress,
            descriptor: Arc<StructDescriptor>,
        }

        impl $name {
            pub fn reified(t: impl Into<PhantomReified>) -> StructReified<Self> {
                StructReified::new(vec![TypeArgument::Phantom(t.into())])
            }

            pub fn collection_id(&self) -> &AccountAddress {
                &self.collection_id
            }

            pub fn object(&self) -> &AccountAddress {
                &self.object
            }
        }

        impl StructClass for $name {
            const TYPE_NAME: &'static str = $type_name;
            const TYPE_PARAMS: &'static [TypeParam] = &[TypeParam::Phantom];

            fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
                event_fields()
            }

            fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
                Ok(Self {
                    collection_id: fields.take("collection_id")?,
                    object: fields.take("object")?,
                    descriptor,
                })
            }

            fn to_fields(&self) -> Fields {
                Fields::new()
                    .with("collection_id", self.collection_id)
                    .with("object", self.object)
            }

            fn descriptor(&self) -> &Arc<StructDescriptor> {
                &self.descriptor
            }
        }
    };
}

collection_event!(
    /// Emitted when an NFT is minted into a collection.
    MintEvent,
    "0xbc3df36be17f27ac98e3c839b2589db8475fa07b20657b08e8891e3aaf5ee5f9::mint_event::MintEvent"
);

collection_event!(
    /// Emitted when an NFT is burned.
    BurnEvent,
    "0xbc3df36be17f27ac98e3c839b2589db8475fa07b20657b08e8891e3aaf5ee5f9::mint_event::BurnEvent"
);
