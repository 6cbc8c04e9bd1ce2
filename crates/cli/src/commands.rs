pub mod plot;
pub mod solve;
pub mod table;
