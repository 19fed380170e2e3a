pub mod pool;
pub mod random;
pub mod trig;
