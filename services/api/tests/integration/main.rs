mod helpers;

mod auth_test;
mod profile_test;
mod sweep_test;
