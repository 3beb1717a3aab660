pub mod constants;
pub mod editor;
pub mod lifetime;
#[cfg(test)]
pub mod test_helpers;
pub mod types;
