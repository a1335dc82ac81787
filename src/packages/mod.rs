//! Struct classes and move-call builders for the OriginByte packages.

pub mod nft_protocol;
pub mod originmate;
pub mod utils;

use crate::loader::StructClassLoader;

pub(crate) fn register_classes(loader: &mut StructClassLoader) {
    originmate::register_classes(loader);
    utils::register_classes(loader);
    nft_protocol::register_classes(loader);
}
