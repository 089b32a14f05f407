//! Generation: instruction assembly and the gateway to the remote model.

pub mod assembler;
pub mod gateway;
