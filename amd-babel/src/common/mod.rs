//! Body structure shared by the parser and the form payload.

pub mod outline;
pub mod table;
