//! `0x2::url::Url`.

use std::sync::Arc;

use ob_types::framework::URL_TYPE;

use super::string::AsciiString;
use crate::error::Result;
use crate::reified::{
    FieldDescriptor, Fields, StructClass, StructDescriptor, StructReified, TypeArgs, TypeParam,
};

#[derive(Debug, Clone, PartialEq)]
pub struct Url {
    url: String,
    descriptor: Arc<StructDescriptor>,
}

impl Url {
    pub fn reified() -> StructReified<Self> {
        StructReified::new(vec![])
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl StructClass for Url {
    const TYPE_NAME: &'static str = URL_TYPE;
    const TYPE_PARAMS: &'static [TypeParam] = &[];

    fn field_types(_: &TypeArgs<'_>) -> Vec<FieldDescriptor> {
        vec![FieldDescriptor::new("url", AsciiString::reified())]
    }

    fn instantiate(descriptor: Arc<StructDescriptor>, mut fields: Fields) -> Result<Self> {
        Ok(Self {
            url: fields.take("url")?,
            descriptor,
        })
    }

    fn to_fields(&self) -> Fields {
        Fields::new().with("url", self.url.as_str())
    }

    fn descriptor(&self) -> &Arc<StructDescriptor> {
        &self.descriptor
    }
}
