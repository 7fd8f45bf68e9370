// Numerical methods

mod controller;
mod hinit;

pub mod dp;
pub mod result;
pub mod rk;
pub mod settings;
