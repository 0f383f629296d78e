pub mod patch;
pub mod release;
pub mod store;
pub mod table;

#[cfg(test)]
pub mod fixtures;
