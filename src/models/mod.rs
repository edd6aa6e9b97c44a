mod blog;
mod contact;
mod notification;
mod upload;
mod user;

pub use blog::*;
pub use contact::*;
pub use notification::*;
pub use upload::*;
pub use user::*;
