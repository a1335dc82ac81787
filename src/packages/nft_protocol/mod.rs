//! `nft_protocol`: collections, mint capabilities and display metadata.

pub mod collection;
pub mod display_info;
pub mod mint_cap;
pub mod mint_event;

use crate::loader::StructClassLoader;

pub const PACKAGE: &str = "0xbc3df36be17f27ac98e3c839b2589db8475fa07b20657b08e8891e3aaf5ee5f9";
pub const PUBLISHED_AT: &str = PACKAGE;

pub(crate) fn register_classes(loader: &mut StructClassLoader) {
    loader.register::<mint_cap::MintCap>();
    loader.register::<display_info::DisplayInfo>();
    loader.register::<collection::Collection>();
    loader.register::<mint_event::MintEvent>();
    loader.register::<mint_event::BurnEvent>();
}
