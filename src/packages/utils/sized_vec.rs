//! `sized_vec::SizedVec<Element>`: a vector with a fixed capacity.

use std::sync::Arc;

use crate::error::{ReifiedError, Result};
use crate::reified::{
    vector, FieldDescriptor, FieldValue, Fields, Primitive, Reified, StructClass,
    StructDescriptor, StructReified, TypeArgs, TypeArgument, TypeParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct SizedVec {
    capacity: u64,
    vec: Vec<FieldValue>,
    descriptor: Arc<StructDescriptor>,
}

impl SizedVec {
    pub fn reified(element: impl Into<Reified>) -> StructReified<Self> {
        StructReified::new(vec![TypeArgument::Reified(element.into())])
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn vec(&self) -> &[FieldValue] {
        &self.vec
    }
}

impl StructClass for SizedVec {
    const TYPE_NAME: &'static str =
        "0x859eb18bd5b5e8cc32deb6dfb1c39941008ab3c6e27f0b8ce2364be7102bb7cb::sized_vec::SizedVec";
    const TYPE_PARAMS: &'static [TypeParam] = &[TypeParam::NonPhantom];

    fn field_types(type_args: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("capacity", Primitive::U64),
            FieldDescriptor::new("vec", vector(type_args.reified(0))),
        ]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        let capacity: u64 = fields.take("capacity")?;
        let vec: Vec<FieldValue> = fields.take("vec")?;
        if vec.len() as u64 > capacity {
            return Err(ReifiedError::InvalidField {
                expected: format!("at most {} elements", capacity),
                got: format!("{} elements", vec.len()),
            });
        }
        Ok(Self {
            capacity,
            vec,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new()
            .with("capacity", self.capacity)
            .with("vec", FieldValue::Vector(self.vec.clone()))
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}
