mod auth;
mod config;
mod curie;
mod error;
mod literal;
