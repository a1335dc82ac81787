//! `0x2::coin::Coin<phantom T>`.

use std::sync::Arc;

use move_core_types::account_address::AccountAddress;

use super::balance::Balance;
use super::object::Uid;
use crate::error::Result;
use crate::reified::{
    FieldDescriptor, Fields, PhantomReified, StructClass, StructDescriptor, StructReified,
    TypeArgs, TypeArgument, TypeParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Coin {
    id: AccountAddress,
    balance: Balance,
    descriptor: Arc<StructDescriptor>,
}

impl Coin {
    pub fn reified(t: impl Into<PhantomReified>) -> StructReified<Self> {
        StructReified::new(vec![TypeArgument::Phantom(t.into())])
    }

    pub fn id(&self) -> &AccountAddress {
        &self.id
    }

    pub fn balance(&self) -> &Balance {
        &self.balance
    }
}

impl StructClass for Coin {
    const TYPE_NAME: &'static str = "0x2::coin::Coin";
    const TYPE_PARAMS: &'static [TypeParam] = &[TypeParam::Phantom];

    fn field_types(type_args: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id", Uid::reified()),
            FieldDescriptor::new("balance", Balance::reified(type_args.phantom(0))),
        ]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            id: fields.take("id")?,
            balance: fields.take_struct("balance")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("id", self.id)
            .with("balance", self.balance.to_value())
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}
