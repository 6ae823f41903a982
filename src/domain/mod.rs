pub mod account;
pub mod amount;
pub mod currency;
pub mod grant;
pub mod message;
pub mod ports;
