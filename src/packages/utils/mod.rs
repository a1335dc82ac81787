//! `utils`: collection helpers used by the NFT protocol.

pub mod sized_vec;
#[allow(clippy::module_inception)]
pub mod utils;
pub mod utils_supply;

use crate::loader::StructClassLoader;

pub const PACKAGE: &str = "0x859eb18bd5b5e8cc32deb6dfb1c39941008ab3c6e27f0b8ce2364be7102bb7cb";
pub const PUBLISHED_AT: &str = PACKAGE;

pub(crate) fn register_classes(loader: &mut StructClassLoader) {
    loader.register::<sized_vec::SizedVec>();
    loader.register::<utils_supply::Supply>();
    loader.register::<utils::Marker>();
}
