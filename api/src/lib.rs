#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate enum_primitive_derive;
extern crate num_traits;
extern crate serde;

pub static API_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod classifiers;
pub mod config;
pub mod consts;
pub mod decoder;
pub mod dissectors;
pub mod fields;
pub mod packet;
pub mod plugins;
pub mod record;

pub use dissectors::Error;
