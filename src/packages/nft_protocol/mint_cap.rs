//! `mint_cap::MintCap<phantom C>`: authority to mint NFTs into a collection,
//! optionally bounded by a supply.

use std::sync::Arc;

use move_core_types::account_address::AccountAddress;

use crate::error::Result;
use crate::framework::object::{Id, Uid};
use crate::framework::option::MoveOption;
use crate::packages::utils::utils_supply::Supply;
use crate::reified::{
    FieldDescriptor, Fields, PhantomReified, StructClass, StructDescriptor, StructReified,
    TypeArgs, TypeArgument, TypeParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct MintCap {
    id: AccountAddress,
    collection_id: AccountAddress,
    supply: Option<Supply>,
    descriptor: Arc<StructDescriptor>,
}

impl MintCap {
    pub fn reified(c: impl Into<PhantomReified>) -> StructReified<Self> {
        StructReified::new(vec![TypeArgument::Phantom(c.into())])
    }

    pub fn id(&self) -> &AccountAddress {
        &self.id
    }

    pub fn collection_id(&self) -> &AccountAddress {
        &self.collection_id
    }

    /// `None` for an unlimited cap.
    pub fn supply(&self) -> Option<&Supply> {
        self.supply.as_ref()
    }
}

impl StructClass for MintCap {
    const TYPE_NAME: &'static str =
        "0xbc3df36be17f27ac98e3c839b2589db8475fa07b20657b08e8891e3aaf5ee5f9::mint_cap::MintCap";
    const TYPE_PARAMS: &'static [TypeParam] = &[TypeParam::Phantom];

    fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("id", Uid::reified()),
            FieldDescriptor::new("collection_id", Id::reified()),
            FieldDescriptor::new("supply", MoveOption::reified(Supply::reified())),
        ]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            id: fields.take("id")?,
            collection_id: fields.take("collection_id")?,
            supply: fields.take_option_struct("supply")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("id", self.id)
            .with("collection_id", self.collection_id)
            .with("supply", self.supply.as_ref().map(|s| s.to_value()))
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}

pub mod functions {
    use super::super::PUBLISHED_AT;
    use crate::error::Result;
    use crate::transaction::{
        generic, obj, pure, Argument, GenericArg, ObjectArg, PureArg, TransactionBuilder,
    };

    fn target(function: &str) -> String {
        format!("{}::mint_cap::{}", PUBLISHED_AT, function)
    }

    fn call_with_cap(
        tx: &mut TransactionBuilder,
        function: &str,
        type_arg: &str,
        mint_cap: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        let args = vec![obj(tx, mint_cap)?];
        tx.move_call(&target(function), vec![type_arg.to_string()], args)
    }

    /// `type_args` are the witness and collection types.
    pub fn new(
        tx: &mut TransactionBuilder,
        type_args: [&str; 2],
        witness: impl Into<GenericArg>,
        collection_id: impl Into<PureArg>,
        supply: impl Into<PureArg>,
    ) -> Result<Argument> {
        let args = vec![
            generic(tx, type_args[0], witness)?,
            pure(tx, collection_id, "0x2::object::ID")?,
            pure(tx, supply, "0x1::option::Option<u64>")?,
        ];
        tx.move_call(&target("new"), type_args.map(String::from).to_vec(), args)
    }

    pub fn new_limited(
        tx: &mut TransactionBuilder,
        type_args: [&str; 2],
        witness: impl Into<GenericArg>,
        collection_id: impl Into<PureArg>,
        supply: impl Into<PureArg>,
    ) -> Result<Argument> {
        let args = vec![
            generic(tx, type_args[0], witness)?,
            pure(tx, collection_id, "0x2::object::ID")?,
            pure(tx, supply, "u64")?,
        ];
        tx.move_call(
            &target("new_limited"),
            type_args.map(String::from).to_vec(),
            args,
        )
    }

    pub fn new_unlimited(
        tx: &mut TransactionBuilder,
        type_args: [&str; 2],
        witness: impl Into<GenericArg>,
        collection_id: impl Into<PureArg>,
    ) -> Result<Argument> {
        let args = vec![
            generic(tx, type_args[0], witness)?,
            pure(tx, collection_id, "0x2::object::ID")?,
        ];
        tx.move_call(
            &target("new_unlimited"),
            type_args.map(String::from).to_vec(),
            args,
        )
    }

    pub fn split(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        mint_cap: impl Into<ObjectArg>,
        quantity: impl Into<PureArg>,
    ) -> Result<Argument> {
        let args = vec![obj(tx, mint_cap)?, pure(tx, quantity, "u64")?];
        tx.move_call(&target("split"), vec![type_arg.to_string()], args)
    }

    pub fn increment_supply(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        mint_cap: impl Into<ObjectArg>,
        quantity: impl Into<PureArg>,
    ) -> Result<Argument> {
        let args = vec![obj(tx, mint_cap)?, pure(tx, quantity, "u64")?];
        tx.move_call(&target("increment_supply"), vec![type_arg.to_string()], args)
    }

    pub fn merge(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        mint_cap: impl Into<ObjectArg>,
        other: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        let args = vec![obj(tx, mint_cap)?, obj(tx, other)?];
        tx.move_call(&target("merge"), vec![type_arg.to_string()], args)
    }

    pub fn new_display(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        witness: impl Into<ObjectArg>,
        publisher: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        let args = vec![obj(tx, witness)?, obj(tx, publisher)?];
        tx.move_call(&target("new_display"), vec![type_arg.to_string()], args)
    }

    pub fn supply(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        mint_cap: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        call_with_cap(tx, "supply", type_arg, mint_cap)
    }

    pub fn borrow_supply(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        mint_cap: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        call_with_cap(tx, "borrow_supply", type_arg, mint_cap)
    }

    pub fn has_supply(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        mint_cap: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        call_with_cap(tx, "has_supply", type_arg, mint_cap)
    }

    pub fn get_supply(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        mint_cap: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        call_with_cap(tx, "get_supply", type_arg, mint_cap)
    }

    pub fn collection_id(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        mint_cap: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        call_with_cap(tx, "collection_id", type_arg, mint_cap)
    }

    pub fn delete_mint_cap(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        mint_cap: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        call_with_cap(tx, "delete_mint_cap", type_arg, mint_cap)
    }

    pub fn assert_limited(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        mint_cap: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        call_with_cap(tx, "assert_limited", type_arg, mint_cap)
    }

    pub fn assert_unlimited(
        tx: &mut TransactionBuilder,
        type_arg: &str,
        mint_cap: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        call_with_cap(tx, "assert_unlimited", type_arg, mint_cap)
    }
}
