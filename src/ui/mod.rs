pub mod controls;
pub mod home;
pub mod login;
pub mod registration;
pub mod styles;
