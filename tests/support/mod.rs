pub mod dragdeck_env;
