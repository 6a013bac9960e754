pub mod core;
pub mod dte;
pub mod rank;
pub mod select;
pub mod types;
