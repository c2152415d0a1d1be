pub mod key_schedule;
pub mod nf64;
pub mod round_function;
pub mod sboxes;
