pub mod article;
pub mod feed;
pub mod interaction;
pub mod spotlight;
