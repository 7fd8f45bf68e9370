//! Explicit Runge-Kutta integrators (RK23)

mod rk23;

pub use rk23::rk23;
