//! `0x2::balance::Balance<phantom T>` and `0x2::balance::Supply<phantom T>`.

use std::sync::Arc;

use ob_types::framework::BALANCE_TYPE;

use crate::error::Result;
use crate::reified::{
    FieldDescriptor, Fields, PhantomReified, Primitive, StructClass, StructDescriptor,
    StructReified, TypeArgs, TypeArgument, TypeParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Balance {
    value: u64,
    descriptor: Arc<StructDescriptor>,
}

impl Balance {
    pub fn reified(t: impl Into<PhantomReified>) -> StructReified<Self> {
        StructReified::new(vec![TypeArgument::Phantom(t.into())])
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

impl StructClass for Balance {
    const TYPE_NAME: &'static str = BALANCE_TYPE;
    const TYPE_PARAMS: &'static [TypeParam] = &[TypeParam::Phantom];

    fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::new("value", Primitive::U64)]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            value: fields.take("value")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("value", self.value)
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Supply {
    value: u64,
    descriptor: Arc<StructDescriptor>,
}

impl Supply {
    pub fn reified(t: impl Into<PhantomReified>) -> StructReified<Self> {
        StructReified::new(vec![TypeArgument::Phantom(t.into())])
    }

    pub fn value(&self) -> u64 {
        self.value
    }
}

impl StructClass for Supply {
    const TYPE_NAME: &'static str = "0x2::balance::Supply";
    const TYPE_PARAMS: &'static [TypeParam] = &[TypeParam::Phantom];

    fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::new("value", Primitive::U64)]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            value: fields.take("value")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("value", self.value)
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_balance_phantom_only_changes_name() {
        let sui = Balance::reified("0x2::sui::SUI")
            .from_bcs(&7u64.to_le_bytes())
            .unwrap();
        let usdc = Balance::reified("0xa::usdc::USDC")
            .from_bcs(&7u64.to_le_bytes())
            .unwrap();
        assert_eq!(sui.to_json_field(), usdc.to_json_field());
        assert_ne!(sui.to_json()["$typeArgs"], usdc.to_json()["$typeArgs"]);
        assert_ne!(sui, usdc);
        assert_eq!(sui.to_json_field(), json!({ "value": "7" }));
    }
}
