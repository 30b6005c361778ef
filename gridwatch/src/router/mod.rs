#[macro_use]
mod macros;

mod energy;
mod fetch;
mod live;
pub mod util;
mod views;
