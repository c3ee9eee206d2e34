pub mod catalog;
pub mod scan;
pub mod source;
pub mod validator;

pub mod error;
