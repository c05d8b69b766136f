pub mod error;
pub mod locate;
pub mod lookup;
pub mod parser;
