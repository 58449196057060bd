pub mod city;
pub mod error;
pub mod index;
pub mod input;
pub mod job;
pub mod queue;
pub mod sim;
pub mod viz;

#[cfg(test)]
mod test;
