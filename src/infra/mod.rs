pub mod icon_loader;
pub mod logger;
pub mod panic;
