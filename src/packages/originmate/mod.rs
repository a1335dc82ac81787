//! `originmate`: shared Move utilities from Origin Byte.

pub mod i64_type;
pub mod move_box;
pub mod typed_id;

use crate::loader::StructClassLoader;

pub const PACKAGE: &str = "0xed6c6fe0732be937f4379bc0b471f0f6bfbe0e8741968009e0f01e6de3d59f32";
pub const PUBLISHED_AT: &str = PACKAGE;

pub(crate) fn register_classes(loader: &mut StructClassLoader) {
    loader.register::<typed_id::TypedId>();
    loader.register::<i64_type::I64>();
    loader.register::<move_box::MoveBox>();
}
