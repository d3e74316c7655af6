pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod episodes;
pub mod humanize;
pub mod observability;
pub mod pages;
pub mod render;
pub mod site;
