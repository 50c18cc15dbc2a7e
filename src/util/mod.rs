pub mod destination;
pub mod output;
