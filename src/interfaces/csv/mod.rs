pub mod denomination_reader;
