//! `utils_supply::Supply`: a bounded counter.

use std::sync::Arc;

use crate::error::Result;
use crate::reified::{
    FieldDescriptor, Fields, Primitive, StructClass, StructDescriptor, StructReified, TypeArgs,
    TypeParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Supply {
    max: u64,
    current: u64,
    descriptor: Arc<StructDescriptor>,
}

impl Supply {
    pub fn reified() -> StructReified<Self> {
        StructReified::new(vec![])
    }

    pub fn max(&self) -> u64 {
        self.max
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn remaining(&self) -> u64 {
        self.max.saturating_sub(self.current)
    }
}

impl StructClass for Supply {
    const TYPE_NAME: &'static str =
        "0x859eb18bd5b5e8cc32deb6dfb1c39941008ab3c6e27f0b8ce2364be7102bb7cb::utils_supply::Supply";
    const TYPE_PARAMS: &'static [TypeParam] = &[];

    fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("max", Primitive::U64),
            FieldDescriptor::new("current", Primitive::U64),
        ]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            max: fields.take("max")?,
            current: fields.take("current")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("max", self.max)
            .with("current", self.current)
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}

pub mod functions {
    use super::super::PUBLISHED_AT;
    use crate::error::Result;
    use crate::transaction::{obj, pure, Argument, ObjectArg, PureArg, TransactionBuilder};

    fn target(function: &str) -> String {
        format!("{}::utils_supply::{}", PUBLISHED_AT, function)
    }

    fn call_with_supply(
        tx: &mut TransactionBuilder,
        function: &str,
        supply: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        let args = vec![obj(tx, supply)?];
        tx.move_call(&target(function), vec![], args)
    }

    fn call_with_value(
        tx: &mut TransactionBuilder,
        function: &str,
        supply: impl Into<ObjectArg>,
        value: impl Into<PureArg>,
    ) -> Result<Argument> {
        let args = vec![obj(tx, supply)?, pure(tx, value, "u64")?];
        tx.move_call(&target(function), vec![], args)
    }

    pub fn new(tx: &mut TransactionBuilder, max: impl Into<PureArg>) -> Result<Argument> {
        let args = vec![pure(tx, max, "u64")?];
        tx.move_call(&target("new"), vec![], args)
    }

    pub fn split(
        tx: &mut TransactionBuilder,
        supply: impl Into<ObjectArg>,
        value: impl Into<PureArg>,
    ) -> Result<Argument> {
        call_with_value(tx, "split", supply, value)
    }

    pub fn increment(
        tx: &mut TransactionBuilder,
        supply: impl Into<ObjectArg>,
        value: impl Into<PureArg>,
    ) -> Result<Argument> {
        call_with_value(tx, "increment", supply, value)
    }

    pub fn decrement(
        tx: &mut TransactionBuilder,
        supply: impl Into<ObjectArg>,
        value: impl Into<PureArg>,
    ) -> Result<Argument> {
        call_with_value(tx, "decrement", supply, value)
    }

    pub fn increase_maximum(
        tx: &mut TransactionBuilder,
        supply: impl Into<ObjectArg>,
        value: impl Into<PureArg>,
    ) -> Result<Argument> {
        call_with_value(tx, "increase_maximum", supply, value)
    }

    pub fn decrease_maximum(
        tx: &mut TransactionBuilder,
        supply: impl Into<ObjectArg>,
        value: impl Into<PureArg>,
    ) -> Result<Argument> {
        call_with_value(tx, "decrease_maximum", supply, value)
    }

    pub fn merge(
        tx: &mut TransactionBuilder,
        supply: impl Into<ObjectArg>,
        other: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        let args = vec![obj(tx, supply)?, obj(tx, other)?];
        tx.move_call(&target("merge"), vec![], args)
    }

    pub fn assert_zero(tx: &mut TransactionBuilder, supply: impl Into<ObjectArg>) -> Result<Argument> {
        call_with_supply(tx, "assert_zero", supply)
    }

    pub fn get_current(tx: &mut TransactionBuilder, supply: impl Into<ObjectArg>) -> Result<Argument> {
        call_with_supply(tx, "get_current", supply)
    }

    pub fn get_max(tx: &mut TransactionBuilder, supply: impl Into<ObjectArg>) -> Result<Argument> {
        call_with_supply(tx, "get_max", supply)
    }

    pub fn get_remaining(
        tx: &mut TransactionBuilder,
        supply: impl Into<ObjectArg>,
    ) -> Result<Argument> {
        call_with_supply(tx, "get_remaining", supply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supply_bcs_round_trip() {
        let reified = Supply::reified();
        let supply = reified
            .construct(Fields::new().with("max", 10u64).with("current", 3u64))
            .unwrap();
        assert_eq!(supply.remaining(), 7);

        let bytes = supply.to_bcs().unwrap();
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[..8], &10u64.to_le_bytes());
        assert_eq!(reified.from_bcs(&bytes).unwrap(), supply);
    }

    #[test]
    fn test_construct_rejects_unknown_field() {
        let fields = Fields::new()
            .with("max", 1u64)
            .with("current", 0u64)
            .with("extra", true);
        assert!(Supply::reified().construct(fields).is_err());
    }
}
