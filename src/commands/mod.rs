pub mod install;
pub mod list;
pub mod new;
pub mod run;
pub mod set;
pub mod view;
