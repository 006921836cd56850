pub mod assert_steps;
pub mod check_steps;
