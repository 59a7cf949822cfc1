pub mod integer_key;
pub mod shell;
