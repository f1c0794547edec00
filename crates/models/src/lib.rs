pub mod errors;
pub mod db;
pub mod menu;
pub mod submenu;
pub mod dish;

#[cfg(test)]
mod tests;
