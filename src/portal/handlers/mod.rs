pub mod admin;
pub mod applicant;
pub mod auth;
pub mod health;
pub mod pages;
