pub mod balance_writer;
pub mod grant_reader;
