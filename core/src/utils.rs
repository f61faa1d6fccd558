mod sorted;

pub use sorted::*;
