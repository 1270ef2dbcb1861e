pub mod checks;
pub mod loader;
pub mod model;
pub mod output;
