//! Keyboard identity: physical scancodes, canonical keys and the native
//! tables that connect them.
//!
//! Translation is always native code → [`Scancode`] → [`Key`]. Only the first
//! step differs between backends; [`scancode_to_key`] is shared.

mod key;
mod mapping;
pub mod native;
mod scancode;

pub use key::Key;
pub use mapping::{key_to_scancode, resolve_key, scancode_to_key};
pub use native::NativeKey;
pub use scancode::Scancode;
