pub mod config;
pub mod logging;

pub mod checksum;
pub mod form;
pub mod gateway;
pub mod message;
pub mod pki;
pub mod status;
