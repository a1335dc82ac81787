//! `i64_type::I64`: two's complement signed integer stored as `u64` bits.

use std::sync::Arc;

use crate::error::Result;
use crate::reified::{
    FieldDescriptor, Fields, Primitive, StructClass, StructDescriptor, StructReified, TypeArgs,
    TypeParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct I64 {
    bits: u64,
    descriptor: Arc<StructDescriptor>,
}

impl I64 {
    pub fn reified() -> StructReified<Self> {
        StructReified::new(vec![])
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    pub fn value(&self) -> i64 {
        self.bits as i64
    }
}

impl StructClass for I64 {
    const TYPE_NAME: &'static str =
        "0xed6c6fe0732be937f4379bc0b471f0f6bfbe0e8741968009e0f01e6de3d59f32::i64_type::I64";
    const TYPE_PARAMS: &'static [TypeParam] = &[];

    fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::new("bits", Primitive::U64)]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            bits: fields.take("bits")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("bits", self.bits)
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_value() {
        let minus_one = I64::reified().from_bcs(&[0xff; 8]).unwrap();
        assert_eq!(minus_one.value(), -1);
        assert_eq!(minus_one.to_json_field()["bits"], "18446744073709551615");
    }
}
