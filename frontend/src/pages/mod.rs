pub mod dashboard;
pub mod home;
pub mod login;

pub use dashboard::*;
pub use home::*;
pub use login::*;
