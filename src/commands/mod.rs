pub mod configure;
pub mod trace;
