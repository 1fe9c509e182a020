#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(unsafe_code)]

pub mod bots;
pub mod models;
pub mod rl;
pub mod view;
pub mod views;
