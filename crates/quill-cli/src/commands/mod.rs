pub mod check_config;
pub mod emit;
pub mod pipe;
