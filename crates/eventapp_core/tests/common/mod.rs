pub mod app_instance;
pub mod test_helpers;
