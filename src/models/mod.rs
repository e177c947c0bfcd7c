pub mod question;
pub mod source;
