pub mod slack;
pub mod yahoo;
