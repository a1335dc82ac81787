//! `0x1::option::Option<T>`.

use std::sync::Arc;

use ob_types::framework::OPTION_TYPE;

use crate::error::{ReifiedError, Result};
use crate::reified::{
    vector, FieldDescriptor, FieldValue, Fields, Reified, StructClass, StructDescriptor,
    StructReified, TypeArgs, TypeArgument, TypeParam,
};

/// Top-level `Option` instance: a vector of zero or one element.
#[derive(Debug, Clone, PartialEq)]
pub struct MoveOption {
    vec: Vec<FieldValue>,
    descriptor: Arc<StructDescriptor>,
}

impl MoveOption {
    pub fn reified(t: impl Into<Reified>) -> StructReified<Self> {
        StructReified::new(vec![TypeArgument::Reified(t.into())])
    }

    pub fn vec(&self) -> &[FieldValue] {
        &self.vec
    }

    pub fn value(&self) -> Option<&FieldValue> {
        self.vec.first()
    }

    pub fn is_some(&self) -> bool {
        !self.vec.is_empty()
    }
}

impl StructClass for MoveOption {
    const TYPE_NAME: &'static str = OPTION_TYPE;
    const TYPE_PARAMS: &'static [TypeParam] = &[TypeParam::NonPhantom];

    fn field_types(type_args: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::new("vec", vector(type_args.reified(0)))]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        let vec: Vec<FieldValue> = fields.take("vec")?;
        if vec.len() > 1 {
            return Err(ReifiedError::InvalidField {
                expected: descriptor.full_type_name().to_string(),
                got: format!("vector of {} elements", vec.len()),
            });
        }
        Ok(Self { vec, descriptor })
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("vec", FieldValue::Vector(self.vec.clone()))
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reified::Primitive;

    #[test]
    fn test_empty_option_is_single_zero_byte() {
        let reified = MoveOption::reified(Primitive::U8);
        assert_eq!(reified.full_type_name(), "0x1::option::Option<u8>");

        let none = reified
            .construct(Fields::new().with("vec", FieldValue::Vector(vec![])))
            .unwrap();
        assert_eq!(none.to_bcs().unwrap(), vec![0]);
        assert_eq!(reified.from_bcs(&[0]).unwrap(), none);
        assert!(!none.is_some());
    }

    #[test]
    fn test_option_rejects_two_elements() {
        let reified = MoveOption::reified(Primitive::U8);
        assert!(reified.from_bcs(&[2, 1, 2]).is_err());
    }
}
