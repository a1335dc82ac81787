//! Move stdlib (`0x1`) and Sui framework (`0x2`) struct classes.
//!
//! Only the types the protocol packages nest are shipped. `String`, `Url`,
//! `ID`, `UID`, `Option` and `Balance` get special field representations in
//! the decoders; at top level they decode like any other struct.

pub mod balance;
pub mod coin;
pub mod kiosk;
pub mod object;
pub mod option;
pub mod string;
pub mod table;
pub mod url;
pub mod vec_map;

use crate::loader::StructClassLoader;

pub(crate) fn register_classes(loader: &mut StructClassLoader) {
    loader.register::<option::MoveOption>();
    loader.register::<string::MoveString>();
    loader.register::<string::AsciiString>();
    loader.register::<object::Id>();
    loader.register::<object::Uid>();
    loader.register::<url::Url>();
    loader.register::<balance::Balance>();
    loader.register::<balance::Supply>();
    loader.register::<coin::Coin>();
    loader.register::<table::Table>();
    loader.register::<vec_map::VecMap>();
    loader.register::<vec_map::Entry>();
    loader.register::<kiosk::KioskOwnerCap>();
}
